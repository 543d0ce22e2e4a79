//! Background periodic sync.

use crate::engine::SyncEngine;
use crate::transport::SyncTransport;
use parking_lot::{Condvar, Mutex};
use phrasedb_store::ReplicaStore;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::{debug, warn};

struct StopSignal {
    stopped: Mutex<bool>,
    wake: Condvar,
}

/// A background thread re-running [`SyncEngine::initialize`] on a timer.
///
/// The first round runs immediately, then once per interval. A tick that
/// lands while a round is still in flight (a slow network round trip, for
/// example) is a no-op through the engine's reentrancy guard, so rounds
/// never overlap. There is no mid-round cancellation: `stop` wakes the
/// timer immediately but a running round completes first.
pub struct PeriodicSync {
    signal: Arc<StopSignal>,
    handle: Option<JoinHandle<()>>,
}

impl PeriodicSync {
    /// Spawns the timer thread over `engine`.
    pub fn spawn<T, S>(engine: Arc<SyncEngine<T, S>>, interval: Duration) -> Self
    where
        T: SyncTransport + 'static,
        S: ReplicaStore + 'static,
    {
        let signal = Arc::new(StopSignal {
            stopped: Mutex::new(false),
            wake: Condvar::new(),
        });

        let thread_signal = Arc::clone(&signal);
        let handle = thread::spawn(move || loop {
            if let Err(err) = engine.initialize() {
                warn!(error = %err, "periodic sync round failed");
            }

            let mut stopped = thread_signal.stopped.lock();
            if *stopped {
                break;
            }
            let _ = thread_signal.wake.wait_for(&mut stopped, interval);
            if *stopped {
                break;
            }
        });

        debug!(interval_ms = interval.as_millis() as u64, "periodic sync started");
        Self {
            signal,
            handle: Some(handle),
        }
    }

    /// Stops the timer and waits for the thread to finish.
    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        {
            let mut stopped = self.signal.stopped.lock();
            *stopped = true;
        }
        self.signal.wake.notify_all();

        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
            debug!("periodic sync stopped");
        }
    }
}

impl Drop for PeriodicSync {
    fn drop(&mut self) {
        self.shutdown();
    }
}
