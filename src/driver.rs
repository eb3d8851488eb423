use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use rand::Rng;
use tracing::{debug, warn};

use crate::client::DeliveryOutcome;
use crate::record::{self, LogRecord};

/// Granularity at which an interval sleep notices the stop flag.
const STOP_POLL: Duration = Duration::from_millis(50);

#[derive(Debug)]
pub(crate) struct Schedule {
    pub(crate) interval: Duration,
    pub(crate) batch_size: usize,
    /// None runs until interrupted.
    pub(crate) run_time: Option<Duration>,
}

/// Fixed-cadence loop: one batch per tick until the run time expires or the
/// stop flag is raised. Delivery outcomes never end the loop; an `Err` from
/// `deliver` is an unexpected internal failure and propagates.
///
/// Returns the number of ticks performed.
pub(crate) fn run<R, F>(
    schedule: &Schedule,
    stop: &AtomicBool,
    rng: &mut R,
    mut deliver: F,
) -> anyhow::Result<u64>
where
    R: Rng + ?Sized,
    F: FnMut(&[LogRecord]) -> anyhow::Result<DeliveryOutcome>,
{
    let start = Instant::now();
    let deadline = schedule.run_time.map(|run_time| start + run_time);
    let mut iteration: u32 = 0;

    while !stop.load(Ordering::Relaxed) && deadline.map_or(true, |end| Instant::now() < end) {
        iteration += 1;
        let batch = record::generate_batch(rng, schedule.batch_size);
        match deliver(&batch)? {
            DeliveryOutcome::Delivered { .. } => debug!(iteration, "batch delivered"),
            outcome => warn!(iteration, ?outcome, "delivery attempt failed"),
        }
        // Absolute schedule: tick n fires at start + n * interval, so a slow
        // delivery shrinks the next sleep instead of shifting every later
        // tick. Missed ticks are skipped, never caught up.
        sleep_until(start + schedule.interval * iteration, stop);
    }

    Ok(u64::from(iteration))
}

fn sleep_until(deadline: Instant, stop: &AtomicBool) {
    while !stop.load(Ordering::Relaxed) {
        let now = Instant::now();
        if now >= deadline {
            return;
        }
        std::thread::sleep((deadline - now).min(STOP_POLL));
    }
}
