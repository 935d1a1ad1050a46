//! Progress reporting and cooperative cancellation for generation jobs.

use crate::error::PipelineError;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::watch;

/// Share of the progress range covered by encoding.
const ENCODING_SHARE: f64 = 80.0;
/// Share covered by drawing, on top of the encoding share.
const DRAWING_SHARE: f64 = 15.0;
/// Drawing never reports more than this; 100 is reserved for completion.
const DRAWING_CEILING: u8 = 95;

/// Percentage after `done` of `total` codes are encoded (0..=80).
pub fn encoding_progress(done: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    (done.min(total) as f64 / total as f64 * ENCODING_SHARE).round() as u8
}

/// Percentage after `placed` of `total` cards are drawn (80..=95).
pub fn drawing_progress(placed: usize, total: usize) -> u8 {
    let drawn = if total == 0 {
        0.0
    } else {
        (placed.min(total) as f64 / total as f64 * DRAWING_SHARE).round()
    };
    (ENCODING_SHARE as u8 + drawn as u8).min(DRAWING_CEILING)
}

/// Publishes job progress as a pollable, monotonically non-decreasing value.
///
/// Reporting never blocks and never fails, whether or not anybody listens.
#[derive(Debug, Clone)]
pub struct ProgressReporter {
    sender: Arc<watch::Sender<u8>>,
}

impl ProgressReporter {
    pub fn new() -> (Self, watch::Receiver<u8>) {
        let (sender, receiver) = watch::channel(0);
        (
            Self {
                sender: Arc::new(sender),
            },
            receiver,
        )
    }

    /// A reporter nobody is subscribed to yet.
    pub fn detached() -> Self {
        Self::new().0
    }

    pub fn subscribe(&self) -> watch::Receiver<u8> {
        self.sender.subscribe()
    }

    /// Raises the published value to `percent` (clamped to 100). Lower values
    /// are ignored.
    pub fn report(&self, percent: u8) {
        let percent = percent.min(100);
        let raised = self.sender.send_if_modified(|current| {
            if percent > *current {
                *current = percent;
                true
            } else {
                false
            }
        });
        if raised {
            log::trace!("Progress {}%", percent);
        }
    }

    pub fn complete(&self) {
        self.report(100);
    }

    pub fn current(&self) -> u8 {
        *self.sender.borrow()
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::detached()
    }
}

/// A shared flag that asks a running job to stop at its next checkpoint.
#[derive(Debug, Clone, Default)]
pub struct CancellationFlag(Arc<AtomicBool>);

impl CancellationFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    /// `Err(PipelineError::Cancelled)` once cancellation was requested.
    pub fn check(&self) -> Result<(), PipelineError> {
        if self.is_cancelled() {
            Err(PipelineError::Cancelled)
        } else {
            Ok(())
        }
    }
}
