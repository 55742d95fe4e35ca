// src/task.rs
//
// Background requests for the UI thread.
//
// Every network call runs on its own short-lived worker thread. The worker
// sends `(seq, result)` back over the owning component's channel and pokes
// egui to repaint; the component drains its inbox at the start of each
// frame and applies only the newest request's answer (`RequestSeq`).
// Requests are never aborted; stale answers are simply dropped.

use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use eframe::egui;

/// Monotonic request tags. Only the latest issued tag is accepted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RequestSeq {
    latest: u64,
}

impl RequestSeq {
    /// Tag a new request. Everything issued before it becomes stale.
    pub fn issue(&mut self) -> u64 {
        self.latest += 1;
        self.latest
    }

    /// Make every outstanding request stale without issuing a new one.
    pub fn invalidate(&mut self) {
        self.latest += 1;
    }

    pub fn is_latest(&self, seq: u64) -> bool {
        seq != 0 && seq == self.latest
    }

    pub fn latest(&self) -> u64 {
        self.latest
    }
}

/// Receiving end for one component's background results.
pub struct Inbox<T> {
    tx: Sender<(u64, T)>,
    rx: Receiver<(u64, T)>,
}

impl<T> Default for Inbox<T> {
    fn default() -> Self {
        let (tx, rx) = mpsc::channel();
        Self { tx, rx }
    }
}

impl<T> Inbox<T> {
    pub fn sender(&self) -> Sender<(u64, T)> {
        self.tx.clone()
    }

    /// Everything that arrived since the last drain, in arrival order.
    pub fn drain(&self) -> Vec<(u64, T)> {
        self.rx.try_iter().collect()
    }
}

/// Run `job` on a worker thread and post its result tagged with `seq`.
/// `repaint` wakes the UI when the result lands (None in tests).
pub fn spawn<T, F>(repaint: Option<egui::Context>, tx: Sender<(u64, T)>, seq: u64, job: F)
where
    T: Send + 'static,
    F: FnOnce() -> T + Send + 'static,
{
    thread::spawn(move || {
        let out = job();
        // Receiver gone means the component was dropped; nothing to do.
        let _ = tx.send((seq, out));
        if let Some(ctx) = repaint {
            ctx.request_repaint();
        }
    });
}
