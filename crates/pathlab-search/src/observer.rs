//! Step observation and cooperative cancellation.
//!
//! Every algorithm calls [`Observer::on_step`] synchronously after each
//! expansion. The observer may render, log or ignore the step; returning
//! [`Flow::Cancel`] stops the search at that step boundary.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Exploration state after one expansion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step<'a, N> {
    /// Node that was just expanded.
    pub current: N,
    /// Nodes newly added to (or improved in) the frontier by this expansion.
    pub opened: &'a [N],
    /// Node finalized by this expansion, if any. The start node is never
    /// reported as closed.
    pub closed: Option<N>,
}

impl<N: Copy> Step<'_, N> {
    /// Owned copy of the step.
    pub fn owned(&self) -> OwnedStep<N> {
        OwnedStep {
            current: self.current,
            opened: self.opened.to_vec(),
            closed: self.closed,
        }
    }
}

/// Owned form of a [`Step`], as kept by [`Recorder`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnedStep<N> {
    pub current: N,
    pub opened: Vec<N>,
    pub closed: Option<N>,
}

/// Whether the search should keep going after a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Cancel,
}

/// Receiver of exploration steps.
pub trait Observer<N> {
    fn on_step(&mut self, step: &Step<'_, N>) -> Flow;

    /// Combine with a [`CancelToken`]: the search stops once the token is
    /// triggered, even if `self` would continue.
    fn with_cancel(self, token: CancelToken) -> WithCancel<Self>
    where
        Self: Sized,
    {
        WithCancel { inner: self, token }
    }
}

/// Ignores every step.
impl<N> Observer<N> for () {
    #[inline]
    fn on_step(&mut self, _step: &Step<'_, N>) -> Flow {
        Flow::Continue
    }
}

impl<N, O: Observer<N> + ?Sized> Observer<N> for &mut O {
    #[inline]
    fn on_step(&mut self, step: &Step<'_, N>) -> Flow {
        (**self).on_step(step)
    }
}

/// Records every step for later replay.
#[derive(Debug, Clone)]
pub struct Recorder<N> {
    pub steps: Vec<OwnedStep<N>>,
}

impl<N> Recorder<N> {
    pub fn new() -> Self {
        Self { steps: Vec::new() }
    }
}

impl<N> Default for Recorder<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: Copy> Observer<N> for Recorder<N> {
    fn on_step(&mut self, step: &Step<'_, N>) -> Flow {
        self.steps.push(step.owned());
        Flow::Continue
    }
}

/// Observer backed by a closure. See [`observe_fn`].
pub struct FnObserver<F>(F);

/// Wrap `f(step) -> Flow` as an [`Observer`].
pub fn observe_fn<N, F: FnMut(&Step<'_, N>) -> Flow>(f: F) -> FnObserver<F> {
    FnObserver(f)
}

impl<N, F: FnMut(&Step<'_, N>) -> Flow> Observer<N> for FnObserver<F> {
    fn on_step(&mut self, step: &Step<'_, N>) -> Flow {
        (self.0)(step)
    }
}

/// Shared abort flag. Clones observe the same flag, so a token can be
/// handed to a UI thread and triggered while a search runs elsewhere.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Whether cancellation was requested.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

impl<N> Observer<N> for CancelToken {
    fn on_step(&mut self, _step: &Step<'_, N>) -> Flow {
        if self.is_cancelled() {
            Flow::Cancel
        } else {
            Flow::Continue
        }
    }
}

/// Observer combined with a [`CancelToken`]. See [`Observer::with_cancel`].
pub struct WithCancel<O> {
    inner: O,
    token: CancelToken,
}

impl<O> WithCancel<O> {
    /// Unwrap the inner observer.
    pub fn into_inner(self) -> O {
        self.inner
    }
}

impl<N, O: Observer<N>> Observer<N> for WithCancel<O> {
    fn on_step(&mut self, step: &Step<'_, N>) -> Flow {
        let flow = self.inner.on_step(step);
        if self.token.is_cancelled() {
            Flow::Cancel
        } else {
            flow
        }
    }
}
