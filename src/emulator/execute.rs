//! The effect of every instruction on the machine state.

use crate::emulator::display::DisplayMode;
use crate::emulator::error::Fault;
use crate::emulator::instruction::*;
use crate::emulator::random::RandomSource;
use crate::emulator::state::{State, FLAG, FONT_ADDR, FONT_HEIGHT};

/// What the caller has to do after an instruction, besides moving on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Nothing special happened.
    Continue,
    /// Execution must pause until a key is pressed, which goes into the register.
    AwaitKey(Reg),
    /// The display switched resolution and was cleared.
    ModeChanged(DisplayMode),
    /// The program asked to stop.
    Exit,
    /// The program misbehaved. The instruction did nothing.
    Fault(Fault),
}

/// Execute a single instruction against `state`.
///
/// The program counter is expected to already point past the instruction.
pub fn execute<R: RandomSource + ?Sized>(
    instruction: Instruction,
    state: &mut State,
    rng: &mut R,
) -> Effect {
    match instruction {

        // Shift the picture down, blanking the top
        Instruction::ScrollDown(Const(n)) => state.framebuffer.scroll_down(n as usize),

        Instruction::ClearScreen => state.framebuffer.clear(),

        // Return to the previous call site via the stack.
        Instruction::Return => match state.pop() {
            Ok(address) => state.program_counter = address,
            Err(fault) => return Effect::Fault(fault),
        },

        Instruction::ScrollRight => state.framebuffer.scroll_right(),

        Instruction::ScrollLeft => state.framebuffer.scroll_left(),

        Instruction::Exit => return Effect::Exit,

        Instruction::LowRes => return switch_mode(state, DisplayMode::Normal),

        Instruction::HighRes => return switch_mode(state, DisplayMode::Extended),

        Instruction::Goto(Addr(addr)) => {
            state.program_counter = addr;
        }

        // Store the current address on the stack, then jump to the specified address
        Instruction::Call(Addr(addr)) => {
            if let Err(fault) = state.push(state.program_counter) {
                return Effect::Fault(fault);
            }
            state.program_counter = addr;
        }

        Instruction::IfRegEqConst(x, Const(n)) => {
            if state.reg(x) == n {
                state.skip();
            }
        }

        Instruction::IfRegNeqConst(x, Const(n)) => {
            if state.reg(x) != n {
                state.skip();
            }
        }

        Instruction::IfRegEqReg(x, y) => {
            if state.reg(x) == state.reg(y) {
                state.skip();
            }
        }

        Instruction::SetRegToConst(x, Const(n)) => state.set_reg(x, n),

        // No carry flag for this one
        Instruction::IncRegByConst(x, Const(n)) => {
            state.set_reg(x, state.reg(x).wrapping_add(n));
        }

        Instruction::SetRegToReg(x, y) => state.set_reg(x, state.reg(y)),

        Instruction::BitwiseOr(x, y) => state.set_reg(x, state.reg(x) | state.reg(y)),

        Instruction::BitwiseAnd(x, y) => state.set_reg(x, state.reg(x) & state.reg(y)),

        Instruction::BitwiseXor(x, y) => state.set_reg(x, state.reg(x) ^ state.reg(y)),

        // The flag is always written last, so it wins when X is VF.
        Instruction::IncRegByReg(x, y) => {
            let (sum, carry) = state.reg(x).overflowing_add(state.reg(y));
            state.set_reg(x, sum);
            state.set_reg(FLAG, carry as u8);
        }

        Instruction::DecRegByReg(x, y) => {
            let (vx, vy) = (state.reg(x), state.reg(y));
            state.set_reg(x, vx.wrapping_sub(vy));
            state.set_reg(FLAG, (vx > vy) as u8);
        }

        Instruction::BitshiftRight(x) => {
            let vx = state.reg(x);
            state.set_reg(x, vx >> 1);
            state.set_reg(FLAG, vx & 0x01);
        }

        Instruction::SetVxVyMinusVx(x, y) => {
            let (vx, vy) = (state.reg(x), state.reg(y));
            state.set_reg(x, vy.wrapping_sub(vx));
            state.set_reg(FLAG, (vy > vx) as u8);
        }

        Instruction::BitshiftLeft(x) => {
            let vx = state.reg(x);
            state.set_reg(x, vx << 1);
            state.set_reg(FLAG, vx >> 7);
        }

        Instruction::IfRegNeqReg(x, y) => {
            if state.reg(x) != state.reg(y) {
                state.skip();
            }
        }

        Instruction::SetI(Addr(addr)) => state.i = addr,

        Instruction::SetPcToV0PlusAddr(Addr(addr)) => {
            state.program_counter = addr + state.reg(Reg(0)) as u16;
        }

        Instruction::SetVxRand(x, Const(n)) => state.set_reg(x, rng.next_byte() & n),

        Instruction::Draw(x, y, Const(n)) => draw(state, x, y, n),

        Instruction::IfKeyEqVx(x) => {
            if state.is_key_pressed(state.reg(x)) {
                state.skip();
            }
        }

        Instruction::IfKeyNeqVx(x) => {
            if !state.is_key_pressed(state.reg(x)) {
                state.skip();
            }
        }

        Instruction::SetRegToDelayTimer(x) => state.set_reg(x, state.delay_timer),

        // The caller polls the keys, we only ask it to
        Instruction::SetRegToGetKey(x) => return Effect::AwaitKey(x),

        Instruction::SetDelayTimerToReg(x) => state.delay_timer = state.reg(x),

        Instruction::SetSoundTimerToReg(x) => state.sound_timer = state.reg(x),

        Instruction::AddRegToI(x) => {
            state.i = state.i.wrapping_add(state.reg(x) as u16);
        }

        // Each font glyph is 5 bytes tall
        Instruction::SetIToSpriteAddrVx(x) => {
            state.i = FONT_ADDR + state.reg(x) as u16 * FONT_HEIGHT;
        }

        Instruction::SetIToBcdOfReg(x) => {
            let value = state.reg(x);
            let i = state.i;
            state.write(i, value / 100);
            state.write(i.wrapping_add(1), (value / 10) % 10);
            state.write(i.wrapping_add(2), value % 10);
        }

        // Dump register values up to Vx, leaving I as it is
        Instruction::RegDump(Reg(x)) => {
            for reg_no in 0..=x {
                let value = state.reg(Reg(reg_no));
                state.write(state.i.wrapping_add(reg_no as u16), value);
            }
        }

        // Load register values up to Vx
        Instruction::RegLoad(Reg(x)) => {
            for reg_no in 0..=x {
                let value = state.read(state.i.wrapping_add(reg_no as u16));
                state.set_reg(Reg(reg_no), value);
            }
        }

        Instruction::Unknown(opcode) => {
            log::debug!("Ignoring unknown opcode {:#06x}", opcode);
        }
    };

    Effect::Continue
}

fn switch_mode(state: &mut State, mode: DisplayMode) -> Effect {
    state.framebuffer.set_mode(mode);
    Effect::ModeChanged(mode)
}

/// XOR a sprite from memory at I onto the screen, setting VF on collision.
///
/// Sprites are 8 pixels wide and `n` rows tall, one byte per row.
/// In extended mode, `n == 0` selects a 16x16 sprite with two bytes per row.
fn draw(state: &mut State, x: Reg, y: Reg, n: u8) {
    let x_coord = state.reg(x) as usize;
    let y_coord = state.reg(y) as usize;

    let (width, height) = if n == 0 && state.display_mode() == DisplayMode::Extended {
        (16, 16)
    } else {
        (8, n as usize)
    };
    let bytes_per_row = width / 8;

    let mut any_collisions = false;
    for row in 0..height {
        let addr = state.i.wrapping_add((row * bytes_per_row) as u16);
        let bits = if bytes_per_row == 2 {
            u16::from_be_bytes([state.read(addr), state.read(addr.wrapping_add(1))])
        } else {
            (state.read(addr) as u16) << 8
        };
        for col in 0..width {
            if bits & (0x8000 >> col) != 0 {
                any_collisions |= state.framebuffer.toggle(x_coord + col, y_coord + row);
            }
        }
    }

    state.set_reg(FLAG, any_collisions as u8);
}
