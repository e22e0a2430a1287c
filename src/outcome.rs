//! Single-assignment outward result of a pipeline invocation.
use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};

use tokio::sync::oneshot;
use tracing::debug;

use crate::error::{Error, Result};

/// Creates a connected [`Outcome`] / [`OutcomeReceiver`] pair.
pub fn channel<T>() -> (Outcome<T>, OutcomeReceiver<T>) {
    let (tx, rx) = oneshot::channel();
    (Outcome(tx), OutcomeReceiver(rx))
}

/// Write half of the outward result.
///
/// Every terminal method consumes the sink, so at most one of them can ever be called.
#[derive(Debug)]
#[must_use = "an outcome must be completed or failed"]
pub struct Outcome<T>(oneshot::Sender<Result<T>>);

impl<T> Outcome<T> {
    pub fn complete(self, value: T) {
        self.settle(Ok(value))
    }

    pub fn fail(self, error: Error) {
        self.settle(Err(error))
    }

    pub fn settle(self, result: Result<T>) {
        if self.0.send(result).is_err() {
            debug!("outcome receiver dropped, discarding result");
        }
    }

    /// Returns `true` if nobody is waiting for the result anymore.
    pub fn is_closed(&self) -> bool {
        self.0.is_closed()
    }
}

/// Read half of the outward result.
///
/// Resolves to [`Error::Abandoned`] if the [`Outcome`] is dropped without being written.
#[derive(Debug)]
#[must_use = "futures do nothing unless polled"]
pub struct OutcomeReceiver<T>(oneshot::Receiver<Result<T>>);

impl<T> Future for OutcomeReceiver<T> {
    type Output = Result<T>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.0)
            .poll(cx)
            .map(|res| res.unwrap_or(Err(Error::Abandoned)))
    }
}
