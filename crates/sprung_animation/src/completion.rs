//! Resolve-once completion futures

use crate::error::AnimationError;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::sync::oneshot;

/// Completion of an animation, sequence step or stagger member
///
/// Resolves exactly once: `Ok(())` when the animation finished, or
/// [`AnimationError::Interrupted`] when its task was dropped first (for
/// example because the runtime shut down).
#[derive(Debug)]
#[must_use = "a completion does nothing unless awaited or checked"]
pub struct Completion {
    state: State,
}

#[derive(Debug)]
enum State {
    Pending(oneshot::Receiver<()>),
    Done(Result<(), AnimationError>),
    Taken,
}

impl Completion {
    /// A completion that is already resolved
    pub fn resolved() -> Self {
        Self {
            state: State::Done(Ok(())),
        }
    }

    pub(crate) fn pending() -> (Completer, Completion) {
        let (tx, rx) = oneshot::channel();
        (
            Completer { tx },
            Self {
                state: State::Pending(rx),
            },
        )
    }

    /// Non-blocking check; true once the animation finished successfully
    pub fn is_complete(&mut self) -> bool {
        if let State::Pending(rx) = &mut self.state {
            match rx.try_recv() {
                Ok(()) => self.state = State::Done(Ok(())),
                Err(oneshot::error::TryRecvError::Closed) => {
                    self.state = State::Done(Err(AnimationError::Interrupted))
                }
                Err(oneshot::error::TryRecvError::Empty) => {}
            }
        }
        matches!(self.state, State::Done(Ok(())))
    }
}

impl Future for Completion {
    type Output = Result<(), AnimationError>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let result = match &mut self.state {
            State::Pending(rx) => match Pin::new(rx).poll(cx) {
                Poll::Ready(Ok(())) => Ok(()),
                Poll::Ready(Err(_)) => Err(AnimationError::Interrupted),
                Poll::Pending => return Poll::Pending,
            },
            State::Done(result) => result.clone(),
            State::Taken => panic!("Completion polled after it resolved"),
        };
        self.state = State::Taken;
        Poll::Ready(result)
    }
}

/// Sending half held by the task driving an animation
#[derive(Debug)]
pub(crate) struct Completer {
    tx: oneshot::Sender<()>,
}

impl Completer {
    /// Consumes the completer, so a completion can only fire once
    pub(crate) fn resolve(self) {
        // The receiver may already be gone; fire-and-forget callers never await.
        let _ = self.tx.send(());
    }
}
