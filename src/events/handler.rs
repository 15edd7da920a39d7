use futures::channel::oneshot;
use futures::future::BoxFuture;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

use super::{HandlerError, HandlerResult};
use crate::state::State;

type SyncFn = dyn Fn(&State) -> HandlerResult + Send + Sync;
type CallbackFn = dyn Fn(&State, Completion) + Send + Sync;
type FutureFn = dyn Fn(&State) -> BoxFuture<'static, HandlerResult> + Send + Sync;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlerKind {
    /// Completes when it returns.
    Sync,
    /// Completes when its [`Completion`] is signalled.
    Callback,
    /// Completes when its future resolves.
    Future,
}

/// A lifecycle callback. The kind is fixed when the handler is built and
/// decides how the sequencer waits for it.
#[derive(Clone)]
pub enum Handler {
    Sync(Arc<SyncFn>),
    Callback(Arc<CallbackFn>),
    Future(Arc<FutureFn>),
}

impl Handler {
    pub fn sync<F>(f: F) -> Self
    where
        F: Fn(&State) -> HandlerResult + Send + Sync + 'static,
    {
        Self::Sync(Arc::new(f))
    }

    pub fn callback<F>(f: F) -> Self
    where
        F: Fn(&State, Completion) + Send + Sync + 'static,
    {
        Self::Callback(Arc::new(f))
    }

    pub fn future<F, Fut>(f: F) -> Self
    where
        F: Fn(&State) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        Self::Future(Arc::new(move |state: &State| -> BoxFuture<'static, HandlerResult> {
            Box::pin(f(state))
        }))
    }

    #[inline]
    pub fn kind(&self) -> HandlerKind {
        match self {
            Self::Sync(_) => HandlerKind::Sync,
            Self::Callback(_) => HandlerKind::Callback,
            Self::Future(_) => HandlerKind::Future,
        }
    }

    pub(crate) async fn invoke(&self, state: &State, event: &str) -> HandlerResult {
        match self {
            Self::Sync(f) => f(state),
            Self::Callback(f) => {
                let (completion, rx) = Completion::channel();
                f(state, completion);
                match rx.await {
                    Ok(result) => result,
                    Err(oneshot::Canceled) => Err(HandlerError::Abandoned {
                        event: event.to_string(),
                    }),
                }
            }
            Self::Future(f) => f(state).await,
        }
    }
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Handler").field(&self.kind()).finish()
    }
}

/// Completion signal handed to [`Handler::callback`] handlers.
///
/// Dropping it without calling [`done`](Self::done) or [`fail`](Self::fail)
/// fails the emission.
pub struct Completion {
    tx: oneshot::Sender<HandlerResult>,
}

impl Completion {
    fn channel() -> (Self, oneshot::Receiver<HandlerResult>) {
        let (tx, rx) = oneshot::channel();
        (Self { tx }, rx)
    }

    pub fn done(self) {
        let _ = self.tx.send(Ok(()));
    }

    pub fn fail(self, err: HandlerError) {
        let _ = self.tx.send(Err(err));
    }

    pub fn finish(self, result: HandlerResult) {
        let _ = self.tx.send(result);
    }
}

impl fmt::Debug for Completion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Completion")
            .field("canceled", &self.tx.is_canceled())
            .finish()
    }
}
