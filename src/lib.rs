/*!

A CHIP-8 emulator with the SUPER-CHIP extensions: a 128x64 high resolution mode,
screen scrolling, 16x16 sprites and an exit instruction.

# Crossterm Frontend

If you want to try the emulator on some programs, there is a ready-to-use implementation
you can run by using `cargo run --release --bin crossterm_frontend -- <program>`.
The keypad is mapped to the left side of the keyboard:

```text
1 2 3 4        1 2 3 C
Q W E R   ->   4 5 6 D
A S D F        7 8 9 E
Z X C V        A 0 B F
```

Press escape to quit. A tone plays while the sound timer runs, pass `--mute` to silence it.
Set `RUST_LOG=debug` to see what the emulator is doing.

# Library

The emulator owns no input or output devices. You tell it which keys are held,
run it one cycle at a time, and look at the screen afterwards.

```rust
use schip_8::emulator::Emulator;

let mut emulator = Emulator::new();

// Load a program at address 0x200.
let clear_display = [0x00, 0xE0];
emulator.load(&clear_display).unwrap();
emulator.step(); // Will now clear the display
```

Timers count down at 60 Hz. By default [`step`](emulator::Emulator::step) ticks them every
eighth cycle, but you can decide for yourself by calling `cycle` directly.

```rust
use schip_8::emulator::Emulator;

let mut emulator = Emulator::with_seed(7);
emulator.load(&[0x60, 0x05, 0xF0, 0x15]).unwrap(); // V0 = 5, delay = V0

emulator.cycle(false);
emulator.cycle(true);
assert_eq!(emulator.state().delay_timer, 4);
```

Alternatively, you can experiment by executing instructions manually.

```rust
use schip_8::emulator::Emulator;
use schip_8::emulator::instruction::{Instruction, Reg, Const, Addr};

let mut emulator = Emulator::new();

// Execute instructions manually
emulator.execute_single(Instruction::ClearScreen);

// Or many sequentially
emulator.execute_many(&[
    Instruction::Goto(Addr(0x250)),
    Instruction::SetRegToConst(Reg(0xA), Const(35)),
    Instruction::SetRegToReg(Reg(0xB), Reg(0xA))
]);
assert_eq!(emulator.state().registers[0xB], 35);
```

## Running a frontend

A frontend presses keys, runs cycles and draws whatever is on the screen.

```rust
use schip_8::emulator::{Emulator, TimerCadence};

let mut emulator = Emulator::new().with_cadence(TimerCadence::for_speed(500));
emulator.load(&[0x00, 0xFF, 0x12, 0x02]).unwrap(); // High resolution, then loop

emulator.set_key(0x5, true);
for _ in 0..10 {
    emulator.step();
}

if let Some(change) = emulator.take_mode_change() {
    assert_eq!((change.width, change.height), (128, 64));
}
print!("{}", emulator.framebuffer());
```
*/

pub mod emulator;
