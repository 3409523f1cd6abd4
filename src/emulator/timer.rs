use std::time::{Duration, Instant};

/// The rate at which the delay and sound timers count down.
pub const TIMER_HZ: u32 = 60;

/// Missed wall-clock ticks that are caught up on before the clock is reset.
const MAX_TICK_BACKLOG: u32 = 4;

/// Decides on which cycles the delay and sound timers should count down.
///
/// The timers run at a fixed rate no matter how fast instructions are
/// executed, so the host either says how many cycles make up one tick,
/// or lets the wall clock decide.
#[derive(Debug, Clone)]
pub enum TimerCadence {
    /// Tick once every `per_tick` cycles.
    Cycles { per_tick: u32, elapsed: u32 },
    /// Tick whenever `period` has passed since the last tick.
    WallClock { period: Duration, last: Instant },
}

impl TimerCadence {

    pub fn every_n_cycles(per_tick: u32) -> TimerCadence {
        TimerCadence::Cycles {
            per_tick: per_tick.max(1),
            elapsed: 0,
        }
    }

    /// The cycle count that gives 60 Hz timers at the given instruction rate.
    pub fn for_speed(instructions_per_second: u32) -> TimerCadence {
        TimerCadence::every_n_cycles(instructions_per_second / TIMER_HZ)
    }

    /// Real-time 60 Hz ticks.
    pub fn wall_clock() -> TimerCadence {
        TimerCadence::WallClock {
            period: Duration::from_secs(1) / TIMER_HZ,
            last: Instant::now(),
        }
    }

    /// Call once per cycle. Returns true if the timers should tick on this cycle.
    pub fn poll(&mut self) -> bool {
        match self {
            TimerCadence::Cycles { per_tick, elapsed } => {
                *elapsed += 1;
                if *elapsed >= *per_tick {
                    *elapsed = 0;
                    true
                } else {
                    false
                }
            }
            TimerCadence::WallClock { period, last } => {
                let lag = last.elapsed();
                if lag < *period {
                    return false;
                }
                if lag > *period * MAX_TICK_BACKLOG {
                    // The host stalled, so start over instead of draining the timers
                    *last = Instant::now();
                } else {
                    // Keep the phase, so ticks don't drift with slow cycles
                    *last += *period;
                }
                true
            }
        }
    }
}
