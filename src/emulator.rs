//! The SCHIP virtual machine: memory, registers, timers, a switchable
//! 64x32 / 128x64 screen and a sixteen key keypad.
//!
//! The emulator never talks to a terminal or a clock on its own.
//! The host presses keys with [`Emulator::set_key`], runs cycles, and reads
//! back the [`Framebuffer`], [`Emulator::sound_active`] and any mode change.

pub mod decoder;
pub mod display;
#[allow(clippy::module_inception)]
pub mod emulator;
pub mod error;
pub mod execute;
pub mod instruction;
pub mod random;
pub mod state;
pub mod timer;

pub use display::{DisplayMode, Framebuffer, ModeChange, Palette, Rgb};
pub use emulator::{Emulator, RunState, Step};
pub use error::{Fault, LoadError};
pub use random::{FixedRandom, RandomSource, SeededRandom, ThreadRandom};
pub use timer::TimerCadence;
