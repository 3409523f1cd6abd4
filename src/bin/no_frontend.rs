use std::path::PathBuf;
use std::process;

use structopt::StructOpt;

use schip_8::emulator::{Emulator, RandomSource, SeededRandom, Step, ThreadRandom, TimerCadence};

/// Run a program without a screen or keyboard, then print what it drew.
#[derive(StructOpt)]
struct Opt {
    /// The program to execute
    #[structopt(parse(from_os_str))]
    input: PathBuf,

    /// Number of cycles to run before stopping
    #[structopt(short, long, default_value = "1000")]
    cycles: u64,

    /// Instructions per second the timers are paced against
    #[structopt(short, long, default_value = "500")]
    speed: u32,

    /// Seed for the random number instruction
    #[structopt(long)]
    seed: Option<u64>,
}

fn main() {
    env_logger::init();

    // Get configuration and read input file
    let opt = Opt::from_args();
    log::info!("Executing {:?} for {} cycles", &opt.input, opt.cycles);

    let rng: Box<dyn RandomSource> = match opt.seed {
        Some(seed) => Box::new(SeededRandom::new(seed)),
        None => Box::new(ThreadRandom),
    };
    let mut emulator = Emulator::with_rng(rng).with_cadence(TimerCadence::for_speed(opt.speed));

    // Load instructions into emulator memory
    if let Err(e) = emulator.load_file(&opt.input) {
        eprintln!("{}: {}", opt.input.display(), e);
        process::exit(1);
    }

    // Start execution
    for cycle in 0..opt.cycles {
        match emulator.step() {
            Step::Ran => {}
            Step::WaitingForKey => {
                // Nobody will ever press a key
                log::info!("Waiting for a key after {} cycles, stopping", cycle);
                break;
            }
            Step::Exited => break,
        }
    }

    for fault in emulator.take_faults() {
        eprintln!("fault: {}", fault);
    }
    print!("{}", emulator.framebuffer());
}
