//! Background maintenance thread.
//!
//! The sweeper wakes on a fixed period and hands the tick time to a callback.
//! Stopping is signalled through a condition variable, so a sleeping sweeper
//! exits as soon as it is told to rather than at its next tick.

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use parking_lot::{Condvar, Mutex, MutexGuard};
use tracing::{debug, warn};

use ephemera_core::constants::SWEEPER_THREAD_NAME;
use ephemera_core::error::{EphemeraError, Result};

#[derive(Default)]
struct StopSignal {
    stopped: Mutex<bool>,
    wake: Condvar,
}

/// Handle to a running sweeper thread.
///
/// Dropping the handle stops and joins the thread.
pub(crate) struct Sweeper {
    signal: Arc<StopSignal>,
    handle: Option<JoinHandle<()>>,
    interval: Duration,
}

impl Sweeper {
    /// Starts a thread that calls `tick(now)` every `interval`.
    pub(crate) fn spawn<F>(interval: Duration, tick: F) -> Result<Self>
    where
        F: FnMut(Instant) + Send + 'static,
    {
        let signal = Arc::new(StopSignal::default());
        let thread_signal = Arc::clone(&signal);

        let handle = thread::Builder::new()
            .name(SWEEPER_THREAD_NAME.to_string())
            .spawn(move || run(interval, &thread_signal, tick))
            .map_err(EphemeraError::SweeperSpawn)?;

        debug!(?interval, "sweeper started");

        Ok(Self {
            signal,
            handle: Some(handle),
            interval,
        })
    }

    /// Stops the thread and waits for it to exit. Safe to call repeatedly.
    pub(crate) fn stop(&mut self) {
        let Some(handle) = self.handle.take() else {
            return;
        };

        *self.signal.stopped.lock() = true;
        self.signal.wake.notify_all();

        if handle.join().is_err() {
            warn!("sweeper thread panicked");
        }
        debug!(interval = ?self.interval, "sweeper stopped");
    }

    /// False once stopped, or if the thread has exited on its own.
    pub(crate) fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|handle| !handle.is_finished())
    }
}

impl Drop for Sweeper {
    fn drop(&mut self) {
        self.stop();
    }
}

fn run<F>(interval: Duration, signal: &StopSignal, mut tick: F)
where
    F: FnMut(Instant),
{
    let mut deadline = Instant::now().checked_add(interval);
    let mut stopped = signal.stopped.lock();

    loop {
        if *stopped {
            return;
        }

        // An interval too large to represent never fires; only a stop wakes us.
        let Some(at) = deadline else {
            signal.wake.wait(&mut stopped);
            continue;
        };

        let now = Instant::now();
        if now < at {
            signal.wake.wait_until(&mut stopped, at);
            continue;
        }

        // A panicking tick skips that sweep only; the thread keeps running.
        let outcome = MutexGuard::unlocked(&mut stopped, || {
            panic::catch_unwind(AssertUnwindSafe(|| tick(now)))
        });
        if outcome.is_err() {
            warn!("sweep panicked; continuing with the next tick");
        }
        deadline = next_deadline(at, interval, Instant::now());
    }
}

/// Advances by one period; ticks that were missed are dropped, not replayed.
fn next_deadline(previous: Instant, interval: Duration, now: Instant) -> Option<Instant> {
    let next = previous.checked_add(interval)?;
    if next > now {
        Some(next)
    } else {
        now.checked_add(interval)
    }
}
