use std::fmt;

use crate::error::ControlError;
use crate::toplevel::{Mutation, WindowId, WindowMap};

/// Identifies one round-trip barrier issued with [`Backend::sync`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SyncToken(pub u32);

/// Events a backend delivers to the session, one at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendEvent {
    /// The handshake finished: globals are known and the seat is available.
    InitialSync,
    /// Every request sent before the barrier was processed by the server.
    SyncDone(SyncToken),
    /// The transport is closed; nothing more will be delivered.
    Disconnected,
}

/// A connection to a compositor with a foreign-toplevel registry.
///
/// Implementations deliver events strictly in order and never run session
/// code re-entrantly.
pub trait Backend {
    /// Input context handed to activation requests.
    type Seat: Clone + fmt::Debug;

    /// Block until the next event is available.
    fn next_event(&mut self) -> Result<BackendEvent, ControlError>;

    /// The seat discovered during the handshake, if any.
    fn seat(&self) -> Option<Self::Seat>;

    /// Bind the toplevel manager so the server replays every open window.
    fn bind_toplevels(&mut self) -> Result<(), ControlError>;

    /// Issue a round-trip barrier.
    ///
    /// `SyncDone` carrying the returned token is delivered exactly once,
    /// after everything sent before it has been processed.
    fn sync(&mut self) -> Result<SyncToken, ControlError>;

    /// Windows the registry knows about.
    fn windows(&self) -> &WindowMap;

    /// Send a mutation request for one window.
    fn apply(&mut self, window: WindowId, mutation: &Mutation<Self::Seat>)
    -> Result<(), ControlError>;

    /// Close the transport. Later calls to `next_event` report `Disconnected`.
    fn shutdown(&mut self);
}
