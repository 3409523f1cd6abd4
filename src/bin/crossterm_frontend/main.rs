use std::path::PathBuf;
use std::process;
use std::thread;
use std::time::{Duration, Instant};

use structopt::StructOpt;

use schip_8::emulator::{Emulator, RandomSource, SeededRandom, Step, ThreadRandom, TimerCadence};

mod audio;
mod crossterm_io;
mod key_buffer;
mod key_manager;
use audio::Beep;
use crossterm_io::CrosstermOutput;
use key_manager::KeyManager;

/// How often the terminal is redrawn.
const FRAME_PERIOD: Duration = Duration::from_millis(1_000 / 60);

/// The program options.
#[derive(StructOpt)]
struct Opt {
    /// The program to execute
    #[structopt(parse(from_os_str))]
    input: PathBuf,

    /// Instructions executed per second
    #[structopt(short, long, default_value = "500")]
    speed: u32,

    /// Seed for the random number instruction, for reproducible runs
    #[structopt(long)]
    seed: Option<u64>,

    /// Don't play a tone while the sound timer runs
    #[structopt(short, long)]
    mute: bool,
}

fn main() -> crossterm::Result<()> {

    env_logger::init();

    // Get configuration and read input file
    let opt = Opt::from_args();
    log::info!("Executing {:?} at {} instructions per second", &opt.input, opt.speed);

    let rng: Box<dyn RandomSource> = match opt.seed {
        Some(seed) => Box::new(SeededRandom::new(seed)),
        None => Box::new(ThreadRandom),
    };
    let mut emulator = Emulator::with_rng(rng).with_cadence(TimerCadence::wall_clock());

    // Load instructions into emulator memory
    if let Err(e) = emulator.load_file(&opt.input) {
        eprintln!("{}: {}", opt.input.display(), e);
        process::exit(1);
    }

    let mut beep = if opt.mute {
        None
    } else {
        match Beep::new() {
            Ok(beep) => Some(beep),
            Err(e) => {
                log::warn!("Running without sound, {}", e);
                None
            }
        }
    };

    let key_manager = KeyManager::new();
    let mut output = CrosstermOutput::new()?;

    let cycle_period = Duration::from_secs(1) / opt.speed.max(1);
    let mut next_cycle = Instant::now();
    let mut last_frame = Instant::now();

    // Start execution
    while !key_manager.quit_requested() {
        emulator.set_keys(key_manager.held());
        if emulator.step() == Step::Exited {
            break;
        }

        if let Some(beep) = beep.as_mut() {
            beep.set(emulator.sound_active());
        }
        if emulator.take_mode_change().is_some() {
            output.clear()?;
        }
        if last_frame.elapsed() >= FRAME_PERIOD {
            output.refresh(emulator.framebuffer(), emulator.sound_active())?;
            last_frame = Instant::now();
        }

        next_cycle += cycle_period;
        if let Some(wait) = next_cycle.checked_duration_since(Instant::now()) {
            thread::sleep(wait);
        }
    }

    Ok(())
}
