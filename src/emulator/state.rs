//! Memory, registers, stack, timers, screen and keys of the virtual machine.

use std::fmt;

use crate::emulator::display::{DisplayMode, Framebuffer};
use crate::emulator::error::{Fault, LoadError};
use crate::emulator::instruction::Reg;

pub const MEM_SIZE: usize = 4096;
pub const NUM_REGISTERS: usize = 16;
pub const STACK_SIZE: usize = 16;
pub const NUM_KEYS: usize = 16;
pub const PC_START: u16 = 0x200;
pub const MAX_PROGRAM_SIZE: usize = MEM_SIZE - PC_START as usize;
pub const FONT_ADDR: u16 = 0x50;
pub const FONT_HEIGHT: u16 = 5;
pub const FLAG: Reg = Reg(0xF);

const FONT: [u8; 80] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];

/// Everything a running program can observe or change.
///
/// Addresses are 16 bits wide but memory is only 4 KiB,
/// so every access wraps around modulo [`MEM_SIZE`].
#[derive(Clone)]
pub struct State {
    pub memory: [u8; MEM_SIZE],
    pub registers: [u8; NUM_REGISTERS],
    pub i: u16,
    pub program_counter: u16,
    pub stack: [u16; STACK_SIZE],
    /// Number of return addresses on the stack, never above [`STACK_SIZE`].
    pub stack_pointer: usize,
    pub delay_timer: u8,
    pub sound_timer: u8,
    pub framebuffer: Framebuffer,
    /// Which of the keys `0x0..=0xF` are held down, written by the host.
    pub keys: [bool; NUM_KEYS],
}

impl State {

    /// Zeroed machine with the font loaded and the program counter at 0x200.
    pub fn new() -> State {
        let mut memory = [0; MEM_SIZE];
        let font_start = FONT_ADDR as usize;
        memory[font_start..font_start + FONT.len()].copy_from_slice(&FONT);

        State {
            memory,
            registers: [0; NUM_REGISTERS],
            i: 0,
            program_counter: PC_START,
            stack: [0; STACK_SIZE],
            stack_pointer: 0,
            delay_timer: 0,
            sound_timer: 0,
            framebuffer: Framebuffer::new(),
            keys: [false; NUM_KEYS],
        }
    }

    /// Copy a program into memory at 0x200.
    /// Memory is left untouched if the program does not fit.
    pub fn load(&mut self, program: &[u8]) -> Result<(), LoadError> {
        if program.len() > MAX_PROGRAM_SIZE {
            return Err(LoadError::RomTooLarge {
                size: program.len(),
                max: MAX_PROGRAM_SIZE,
            });
        }
        let start = PC_START as usize;
        self.memory[start..start + program.len()].copy_from_slice(program);
        Ok(())
    }

    pub fn read(&self, addr: u16) -> u8 {
        self.memory[addr as usize % MEM_SIZE]
    }

    pub fn write(&mut self, addr: u16, value: u8) {
        self.memory[addr as usize % MEM_SIZE] = value;
    }

    /// The big-endian word at the program counter.
    pub fn fetch(&self) -> u16 {
        let pc = self.program_counter;
        u16::from_be_bytes([self.read(pc), self.read(pc.wrapping_add(1))])
    }

    pub fn reg(&self, Reg(x): Reg) -> u8 {
        self.registers[x as usize & 0xF]
    }

    pub fn set_reg(&mut self, Reg(x): Reg, value: u8) {
        self.registers[x as usize & 0xF] = value;
    }

    /// Move past the next instruction.
    pub fn skip(&mut self) {
        self.program_counter = self.program_counter.wrapping_add(2);
    }

    pub fn push(&mut self, return_address: u16) -> Result<(), Fault> {
        let slot = self
            .stack
            .get_mut(self.stack_pointer)
            .ok_or(Fault::StackOverflow { return_address })?;
        *slot = return_address;
        self.stack_pointer += 1;
        Ok(())
    }

    pub fn pop(&mut self) -> Result<u16, Fault> {
        if self.stack_pointer == 0 {
            return Err(Fault::StackUnderflow);
        }
        self.stack_pointer -= 1;
        Ok(self.stack[self.stack_pointer])
    }

    /// Whether the key with this value is held. Values above 0xF are never held.
    pub fn is_key_pressed(&self, key: u8) -> bool {
        self.keys.get(key as usize).copied().unwrap_or(false)
    }

    /// The lowest-numbered key that is held now but was not held in `before`.
    pub fn first_new_press(&self, before: &[bool; NUM_KEYS]) -> Option<u8> {
        self.keys
            .iter()
            .zip(before.iter())
            .position(|(&now, &was)| now && !was)
            .map(|key| key as u8)
    }

    pub fn display_mode(&self) -> DisplayMode {
        self.framebuffer.mode()
    }

    /// True while a tone should be playing.
    pub fn sound_active(&self) -> bool {
        self.sound_timer > 0
    }

    /// Count both timers down by one, stopping at zero.
    pub fn tick_timers(&mut self) {
        self.delay_timer = self.delay_timer.saturating_sub(1);
        self.sound_timer = self.sound_timer.saturating_sub(1);
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("State")
            .field("registers", &self.registers)
            .field("i", &format_args!("{:#05x}", self.i))
            .field("program_counter", &format_args!("{:#05x}", self.program_counter))
            .field("stack", &&self.stack[..self.stack_pointer])
            .field("delay_timer", &self.delay_timer)
            .field("sound_timer", &self.sound_timer)
            .field("mode", &self.display_mode())
            .field("keys", &self.keys)
            .finish()
    }
}
