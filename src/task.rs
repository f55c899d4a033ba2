//! Background requests whose late answers can be discarded.
//!
//! A `RequestSlot` runs one job at a time on a worker thread and hands the
//! result back through a channel, polled from the UI loop. Every `spawn` gets a
//! fresh `RequestToken`; spawning again (or cancelling) supersedes whatever is
//! in flight. A superseded job keeps running but its channel is gone, so its
//! result is dropped when it arrives.

use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

/// Identifies one issued request within its slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

#[derive(Debug)]
pub struct RequestSlot<T> {
    latest: u64,
    pending: Option<(RequestToken, Receiver<T>)>,
}

impl<T> Default for RequestSlot<T> {
    fn default() -> Self {
        Self {
            latest: 0,
            pending: None,
        }
    }
}

impl<T: Send + 'static> RequestSlot<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `job` on a worker thread, superseding any pending request.
    pub fn spawn<F>(&mut self, job: F) -> RequestToken
    where
        F: FnOnce() -> T + Send + 'static,
    {
        let token = self.next_token();
        let (sender, receiver) = mpsc::channel();
        self.pending = Some((token, receiver));
        thread::spawn(move || {
            // The receiver is gone if the request was superseded; ignore.
            let _ = sender.send(job());
        });
        token
    }

    /// Result of the current request, once. Stale results are never returned.
    pub fn poll(&mut self) -> Option<T> {
        let (token, receiver) = self.pending.as_ref()?;
        let token = *token;
        let outcome = receiver.try_recv();
        match outcome {
            Ok(value) => {
                self.pending = None;
                Some(value)
            }
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                // Worker panicked before answering.
                log::warn!("request {:?} ended without a result", token);
                self.pending = None;
                None
            }
        }
    }

    /// Drop the pending request; its answer will be ignored.
    pub fn cancel(&mut self) {
        if self.pending.take().is_some() {
            self.latest += 1;
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Token of the request currently awaited, if any.
    pub fn current(&self) -> Option<RequestToken> {
        self.pending.as_ref().map(|(t, _)| *t)
    }

    fn next_token(&mut self) -> RequestToken {
        self.latest += 1;
        RequestToken(self.latest)
    }
}
