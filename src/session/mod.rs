//! Short-lived control sessions over a compositor connection.
//!
//! A session waits for the connection's initial sync, binds the toplevel
//! registry, waits for a round-trip so the registry holds every open window,
//! then either snapshots the windows or applies one mutation and waits for a
//! final round-trip before shutting the connection down.

mod backend;
pub mod driver;

pub use backend::{Backend, BackendEvent, SyncToken};
pub use driver::{Outcome, run, wlctrl, wlctrl_named};

use std::fmt;
use tracing::{debug, info, trace};

use crate::error::ControlError;
use crate::toplevel::{ActionRequest, Mutation, Target, WindowMap};

/// Where a session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Transport handshake still in progress
    Connecting,
    /// Registry bound, waiting for the snapshot barrier
    AwaitingInitialSync,
    /// Snapshot complete, action being resolved
    Ready,
    /// Mutation sent, waiting for the server to acknowledge it
    AwaitingFinalSync,
    /// Finished; the transport has been shut down
    Done,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SessionState::Connecting => "connecting",
            SessionState::AwaitingInitialSync => "awaiting initial sync",
            SessionState::Ready => "ready",
            SessionState::AwaitingFinalSync => "awaiting final sync",
            SessionState::Done => "done",
        };
        f.write_str(name)
    }
}

/// One list-or-mutate exchange with the compositor.
pub struct ControlSession<'a, B: Backend> {
    backend: &'a mut B,
    request: ActionRequest,
    target: Option<Target>,
    state: SessionState,
    barrier: Option<SyncToken>,
    resolved: Option<Mutation<B::Seat>>,
    result: Option<WindowMap>,
}

impl<'a, B: Backend> ControlSession<'a, B> {
    /// Create a session; mutations without a target are rejected here.
    pub fn new(
        backend: &'a mut B,
        request: ActionRequest,
        target: Option<Target>,
    ) -> Result<Self, ControlError> {
        if let ActionRequest::Mutate(pending) = request
            && target.is_none()
        {
            return Err(ControlError::MissingTarget(pending.into()));
        }

        Ok(Self {
            backend,
            request,
            target,
            state: SessionState::Connecting,
            barrier: None,
            resolved: None,
            result: None,
        })
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// The mutation as sent, once the session has resolved it.
    pub fn resolved(&self) -> Option<&Mutation<B::Seat>> {
        self.resolved.as_ref()
    }

    pub fn backend(&self) -> &B {
        self.backend
    }

    /// Advance the state machine with one event from the backend.
    ///
    /// `Disconnected` is not handled here; the driver stops on it.
    pub fn handle(&mut self, event: BackendEvent) -> Result<(), ControlError> {
        match (self.state, event) {
            (SessionState::Connecting, BackendEvent::InitialSync) => {
                debug!("Initial sync complete, binding toplevel registry");
                self.state = SessionState::AwaitingInitialSync;
                self.backend.bind_toplevels()?;
                self.barrier = Some(self.backend.sync()?);
            }
            (SessionState::AwaitingInitialSync, BackendEvent::SyncDone(token))
                if self.barrier == Some(token) =>
            {
                self.barrier = None;
                self.state = SessionState::Ready;
                self.on_ready()?;
            }
            (SessionState::AwaitingFinalSync, BackendEvent::SyncDone(token))
                if self.barrier == Some(token) =>
            {
                self.barrier = None;
                self.finish();
            }
            (state, event) => {
                trace!(%state, ?event, "Ignoring event");
            }
        }
        Ok(())
    }

    fn on_ready(&mut self) -> Result<(), ControlError> {
        let pending = match self.request {
            ActionRequest::List => {
                let windows = self.backend.windows().clone();
                debug!(count = windows.len(), "Collected window snapshot");
                self.result = Some(windows);
                self.finish();
                return Ok(());
            }
            ActionRequest::Mutate(pending) => pending,
        };

        let target = self
            .target
            .as_ref()
            .ok_or(ControlError::MissingTarget(pending.into()))?;
        let window = target.resolve(self.backend.windows())?;
        let mutation = pending.resolve(self.backend.seat())?;

        info!(%window, request = mutation.request_name(), "Applying window request");
        self.backend.apply(window, &mutation)?;
        self.resolved = Some(mutation);

        self.barrier = Some(self.backend.sync()?);
        self.state = SessionState::AwaitingFinalSync;
        Ok(())
    }

    fn finish(&mut self) {
        self.state = SessionState::Done;
        self.backend.shutdown();
    }

    /// Pull the next event from the backend and handle it.
    ///
    /// Returns `false` once the transport is gone.
    pub fn step(&mut self) -> Result<bool, ControlError> {
        match self.backend.next_event()? {
            BackendEvent::Disconnected => {
                debug!(state = %self.state, "Transport disconnected");
                Ok(false)
            }
            event => {
                self.handle(event)?;
                Ok(true)
            }
        }
    }

    /// Close the transport after a failure.
    pub fn abort(&mut self) {
        self.backend.shutdown();
    }

    /// Consume the session, producing its terminal result.
    pub fn into_outcome(self) -> Outcome {
        match (self.state, self.result) {
            (SessionState::Done, Some(windows)) => Outcome::Listed(windows),
            (SessionState::Done, None) => Outcome::Applied,
            (state, _) => Outcome::Interrupted { state },
        }
    }
}
