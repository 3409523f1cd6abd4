//! The fetch-decode-execute loop, one cycle per call.

use std::collections::VecDeque;
use std::path::Path;

use crate::emulator::display::{DisplayMode, Framebuffer, ModeChange};
use crate::emulator::error::{Fault, LoadError};
use crate::emulator::execute::{execute, Effect};
use crate::emulator::instruction::{Instruction, Reg};
use crate::emulator::random::{RandomSource, SeededRandom, ThreadRandom};
use crate::emulator::state::{State, NUM_KEYS};
use crate::emulator::timer::TimerCadence;

/// Default number of cycles between two timer ticks used by [`Emulator::step`].
pub const DEFAULT_CYCLES_PER_TICK: u32 = 8;

/// How many faults are remembered before the oldest are dropped.
const FAULT_LOG_CAPACITY: usize = 32;

/// What the emulator is doing between cycles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Running,
    /// Stopped at an `FX0A` until a key goes down. `held` is the keypad as
    /// last seen, so keys that were already down do not count.
    WaitingForKey { reg: Reg, held: [bool; NUM_KEYS] },
    /// The program executed `00FD`. Further cycles do nothing.
    Exited,
}

/// The outcome of a single cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// An instruction ran, or a key wait finished.
    Ran,
    /// Nothing happened, still waiting for a key.
    WaitingForKey,
    /// The program has stopped. The host should stop calling.
    Exited,
}

pub struct Emulator<R: RandomSource> {
    state: State,
    run_state: RunState,
    rng: R,
    cadence: TimerCadence,
    mode_change: Option<ModeChange>,
    faults: VecDeque<Fault>,
}

impl Emulator<ThreadRandom> {

    /// Create a new emulator that gets random numbers from the thread generator.
    pub fn new() -> Emulator<ThreadRandom> {
        Emulator::with_rng(ThreadRandom)
    }
}

impl Emulator<SeededRandom> {

    /// Create an emulator whose `CXKK` results are the same on every run.
    pub fn with_seed(seed: u64) -> Emulator<SeededRandom> {
        Emulator::with_rng(SeededRandom::new(seed))
    }
}

impl Default for Emulator<ThreadRandom> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: RandomSource> Emulator<R> {

    /// Create a new emulator with a custom random source
    pub fn with_rng(rng: R) -> Emulator<R> {
        Emulator {
            state: State::new(),
            run_state: RunState::Running,
            rng,
            cadence: TimerCadence::every_n_cycles(DEFAULT_CYCLES_PER_TICK),
            mode_change: None,
            faults: VecDeque::new(),
        }
    }

    /// Replace the cadence [`Emulator::step`] uses to tick the timers.
    pub fn with_cadence(mut self, cadence: TimerCadence) -> Emulator<R> {
        self.cadence = cadence;
        self
    }

    /// Copy a program into memory at 0x200.
    pub fn load(&mut self, program: &[u8]) -> Result<(), LoadError> {
        self.state.load(program)?;
        log::info!("Loaded {} byte program", program.len());
        Ok(())
    }

    /// Read a program from a file and load it.
    pub fn load_file<P: AsRef<Path>>(&mut self, path: P) -> Result<(), LoadError> {
        let program = std::fs::read(path.as_ref())?;
        self.load(&program)
    }

    /// Run one cycle, letting the configured cadence decide whether the timers tick.
    pub fn step(&mut self) -> Step {
        let timer_tick = self.cadence.poll();
        self.cycle(timer_tick)
    }

    /// Run one cycle: fetch, decode and execute an instruction, then count
    /// the timers down if `timer_tick` is set.
    ///
    /// While waiting for a key, a cycle only looks for a key that went down
    /// since the previous cycle: the program counter and the timers stay where they are.
    pub fn cycle(&mut self, timer_tick: bool) -> Step {
        match self.run_state {
            RunState::Exited => Step::Exited,
            RunState::WaitingForKey { reg, held } => match self.state.first_new_press(&held) {
                Some(key) => {
                    log::debug!("Key {:X} pressed, resuming", key);
                    self.state.set_reg(reg, key);
                    self.run_state = RunState::Running;
                    Step::Ran
                }
                None => {
                    // A key let go of while waiting can be pressed again
                    self.run_state = RunState::WaitingForKey { reg, held: self.state.keys };
                    Step::WaitingForKey
                }
            },
            RunState::Running => {
                // Each opcode is two bytes
                let opcode = self.state.fetch();
                self.state.program_counter = self.state.program_counter.wrapping_add(2);
                let instruction = Instruction::from_u16(opcode);

                log::trace!("{:#05x}: {:?}", self.state.program_counter.wrapping_sub(2), instruction);

                let step = self.execute_single(instruction);
                if timer_tick {
                    self.state.tick_timers();
                }
                step
            }
        }
    }

    /// Execute a single instruction, without fetching it or touching the timers.
    pub fn execute_single(&mut self, instruction: Instruction) -> Step {
        match execute(instruction, &mut self.state, &mut self.rng) {
            Effect::Continue => Step::Ran,
            Effect::AwaitKey(reg) => {
                self.run_state = RunState::WaitingForKey { reg, held: self.state.keys };
                Step::WaitingForKey
            }
            Effect::ModeChanged(mode) => {
                log::debug!("Display mode is now {:?}", mode);
                self.mode_change = Some(ModeChange::from(mode));
                Step::Ran
            }
            Effect::Exit => {
                log::info!("Program exited");
                self.run_state = RunState::Exited;
                Step::Exited
            }
            Effect::Fault(fault) => {
                log::warn!("{}", fault);
                if self.faults.len() == FAULT_LOG_CAPACITY {
                    self.faults.pop_front();
                }
                self.faults.push_back(fault);
                Step::Ran
            }
        }
    }

    /// Execute instructions in order, stopping early if one of them waits or exits.
    pub fn execute_many(&mut self, instructions: &[Instruction]) -> Step {
        for &instruction in instructions {
            let step = self.execute_single(instruction);
            if step != Step::Ran {
                return step;
            }
        }
        Step::Ran
    }

    /// Tell the emulator whether a key is held down.
    pub fn set_key(&mut self, key: u8, pressed: bool) {
        if let Some(held) = self.state.keys.get_mut(key as usize) {
            *held = pressed;
        }
    }

    /// Replace the state of all keys at once.
    pub fn set_keys(&mut self, keys: [bool; NUM_KEYS]) {
        self.state.keys = keys;
    }

    pub fn framebuffer(&self) -> &Framebuffer {
        &self.state.framebuffer
    }

    pub fn display_mode(&self) -> DisplayMode {
        self.state.display_mode()
    }

    /// Whether a tone should be playing.
    pub fn sound_active(&self) -> bool {
        self.state.sound_active()
    }

    /// The latest display mode switch, if one happened since the last call.
    pub fn take_mode_change(&mut self) -> Option<ModeChange> {
        self.mode_change.take()
    }

    /// Faults recorded since the last call, oldest first.
    pub fn take_faults(&mut self) -> Vec<Fault> {
        self.faults.drain(..).collect()
    }

    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut State {
        &mut self.state
    }
}
