//! Test utilities and mock factories.
//!
//! This module provides an ordered fake compositor transport, a fake
//! compositor for the launcher layer, and small factories for windows and
//! config. Only compiled in test builds.

use std::collections::VecDeque;
use std::sync::Mutex;

use crate::compositor::{Compositor, ensure_mutation};
use crate::config::AppConfig;
use crate::error::ControlError;
use crate::items::WindowItem;
use crate::session::{Backend, BackendEvent, SyncToken};
use crate::toplevel::{Action, Mutation, Target, Toplevel, ToplevelState, WindowId, WindowMap};

/// Seat handed out by [`FakeBackend`] once its handshake completes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FakeSeat(pub String);

/// A request as seen by the fake server, in processing order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Processed {
    Bind,
    Apply(WindowId, Mutation<FakeSeat>),
    Sync(SyncToken),
}

#[derive(Debug)]
enum Request {
    Bind,
    Apply(WindowId, Mutation<FakeSeat>),
    Sync(SyncToken),
}

/// An in-memory compositor that processes requests strictly in order.
///
/// Requests queue up in an outbox; each `next_event` call lets the "server"
/// work through the outbox until it has something to deliver. A barrier's
/// `SyncDone` is only queued when the server reaches it, so it always
/// follows the requests sent before it. An idle server hangs up.
#[derive(Debug)]
pub struct FakeBackend {
    server_windows: WindowMap,
    windows: WindowMap,
    seat: Option<FakeSeat>,
    handshake_done: bool,
    has_manager: bool,
    has_seat: bool,
    apply_version: Option<u32>,
    closed: bool,
    remaining_events: Option<usize>,
    next_token: u32,
    outbox: VecDeque<Request>,
    inbox: VecDeque<BackendEvent>,
    /// Mutations as the client sent them
    pub applied: Vec<(WindowId, Mutation<FakeSeat>)>,
    /// Requests in the order the server processed them
    pub log: Vec<Processed>,
    pub issued_syncs: Vec<SyncToken>,
    pub delivered_syncs: Vec<SyncToken>,
}

impl FakeBackend {
    /// A server announcing one window per `(title, app_id)` pair.
    pub fn with_windows(windows: &[(&str, &str)]) -> Self {
        Self {
            server_windows: mock_windows(windows),
            windows: WindowMap::new(),
            seat: None,
            handshake_done: false,
            has_manager: true,
            has_seat: true,
            apply_version: None,
            closed: false,
            remaining_events: None,
            next_token: 1,
            outbox: VecDeque::new(),
            inbox: VecDeque::new(),
            applied: Vec::new(),
            log: Vec::new(),
            issued_syncs: Vec::new(),
            delivered_syncs: Vec::new(),
        }
    }

    /// A server that does not advertise the toplevel manager.
    pub fn without_manager(mut self) -> Self {
        self.has_manager = false;
        self
    }

    /// A server that announces no seat.
    pub fn without_seat(mut self) -> Self {
        self.has_seat = false;
        self
    }

    /// Refuse every mutation as if the handle had protocol `version`.
    pub fn fail_apply(mut self, version: u32) -> Self {
        self.apply_version = Some(version);
        self
    }

    /// Id of the window with the given title.
    pub fn id_of(&self, title: &str) -> WindowId {
        self.server_windows
            .values()
            .find(|w| w.title == title)
            .map(|w| w.id)
            .unwrap_or_else(|| panic!("no window titled {title:?}"))
    }

    /// Drop the connection after `count` more events.
    pub fn disconnect_after(&mut self, count: usize) {
        self.remaining_events = Some(count);
    }

    pub fn is_shut_down(&self) -> bool {
        self.closed
    }

    fn produce(&mut self) -> BackendEvent {
        if !self.handshake_done {
            self.handshake_done = true;
            if self.has_seat {
                self.seat = Some(FakeSeat("seat0".into()));
            }
            return BackendEvent::InitialSync;
        }

        loop {
            if let Some(event) = self.inbox.pop_front() {
                if let BackendEvent::SyncDone(token) = &event {
                    self.delivered_syncs.push(*token);
                }
                return event;
            }
            let Some(request) = self.outbox.pop_front() else {
                self.closed = true;
                return BackendEvent::Disconnected;
            };
            self.process(request);
        }
    }

    fn process(&mut self, request: Request) {
        match request {
            Request::Bind => {
                self.windows = self.server_windows.clone();
                self.log.push(Processed::Bind);
            }
            Request::Apply(id, mutation) => {
                match &mutation {
                    Mutation::Close => {
                        self.windows.remove(&id);
                    }
                    Mutation::Activate { .. } => self.set_flag(id, ToplevelState::ACTIVATED, true),
                    Mutation::SetMaximized(on) => self.set_flag(id, ToplevelState::MAXIMIZED, *on),
                    Mutation::SetMinimized(on) => self.set_flag(id, ToplevelState::MINIMIZED, *on),
                    Mutation::SetFullscreen(on) => {
                        self.set_flag(id, ToplevelState::FULLSCREEN, *on)
                    }
                }
                self.log.push(Processed::Apply(id, mutation));
            }
            Request::Sync(token) => {
                self.log.push(Processed::Sync(token));
                self.inbox.push_back(BackendEvent::SyncDone(token));
            }
        }
    }

    fn set_flag(&mut self, id: WindowId, flag: ToplevelState, on: bool) {
        if let Some(window) = self.windows.get_mut(&id) {
            window.state.set(flag, on);
        }
    }
}

impl Backend for FakeBackend {
    type Seat = FakeSeat;

    fn next_event(&mut self) -> Result<BackendEvent, ControlError> {
        if self.closed {
            return Ok(BackendEvent::Disconnected);
        }
        if self.remaining_events == Some(0) {
            self.closed = true;
            return Ok(BackendEvent::Disconnected);
        }
        let event = self.produce();
        if let Some(remaining) = self.remaining_events.as_mut() {
            *remaining -= 1;
        }
        Ok(event)
    }

    fn seat(&self) -> Option<FakeSeat> {
        self.seat.clone()
    }

    fn bind_toplevels(&mut self) -> Result<(), ControlError> {
        if !self.has_manager {
            return Err(ControlError::GlobalMissing("zwlr_foreign_toplevel_manager_v1"));
        }
        self.outbox.push_back(Request::Bind);
        Ok(())
    }

    fn sync(&mut self) -> Result<SyncToken, ControlError> {
        let token = SyncToken(self.next_token);
        self.next_token += 1;
        self.issued_syncs.push(token);
        self.outbox.push_back(Request::Sync(token));
        Ok(token)
    }

    fn windows(&self) -> &WindowMap {
        &self.windows
    }

    fn apply(
        &mut self,
        window: WindowId,
        mutation: &Mutation<FakeSeat>,
    ) -> Result<(), ControlError> {
        if let Some(version) = self.apply_version {
            return Err(ControlError::UnsupportedRequest {
                request: mutation.request_name(),
                version,
            });
        }
        self.applied.push((window, mutation.clone()));
        self.outbox.push_back(Request::Apply(window, mutation.clone()));
        Ok(())
    }

    fn shutdown(&mut self) {
        self.closed = true;
    }
}

/// A compositor returning fixed windows and recording performed actions.
#[derive(Debug, Default)]
pub struct FakeCompositor {
    pub windows: Vec<Toplevel>,
    /// Fail every call as if no display could be reached
    pub unreachable: bool,
    pub performed: Mutex<Vec<(Action, Target)>>,
}

impl FakeCompositor {
    pub fn with_windows(windows: &[(&str, &str)]) -> Self {
        Self {
            windows: mock_windows(windows).into_values().collect(),
            unreachable: false,
            performed: Mutex::new(Vec::new()),
        }
    }

    pub fn unreachable() -> Self {
        Self {
            unreachable: true,
            ..Self::default()
        }
    }

    fn check_reachable(&self) -> Result<(), ControlError> {
        if self.unreachable {
            return Err(ControlError::Connect(wayland_client::ConnectError::NoCompositor));
        }
        Ok(())
    }

    pub fn performed(&self) -> Vec<(Action, Target)> {
        self.performed.lock().unwrap().clone()
    }
}

impl Compositor for FakeCompositor {
    fn list_windows(&self) -> Result<Vec<Toplevel>, ControlError> {
        self.check_reachable()?;
        Ok(self.windows.clone())
    }

    fn perform(&self, action: Action, target: Target) -> Result<(), ControlError> {
        ensure_mutation(action)?;
        self.check_reachable()?;
        self.performed.lock().unwrap().push((action, target));
        Ok(())
    }

    fn name(&self) -> &'static str {
        "Fake"
    }
}

/// Build a window map with ids starting at 10, in the given order.
pub fn mock_windows(windows: &[(&str, &str)]) -> WindowMap {
    windows
        .iter()
        .enumerate()
        .map(|(i, (title, app_id))| {
            let id = WindowId(10 + i as u32);
            let window = Toplevel {
                id,
                title: title.to_string(),
                app_id: app_id.to_string(),
                state: ToplevelState::empty(),
            };
            (id, window)
        })
        .collect()
}

/// Create a mock WindowItem.
pub fn mock_window_item(title: &str, app_id: &str) -> WindowItem {
    let window = Toplevel {
        id: WindowId(10),
        title: title.to_string(),
        app_id: app_id.to_string(),
        state: ToplevelState::empty(),
    };
    WindowItem::from_toplevel(window)
}

/// Create a mock AppConfig with default values.
pub fn mock_config() -> AppConfig {
    AppConfig::default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_windows() {
        let windows = mock_windows(&[("Firefox", "firefox"), ("term", "foot")]);
        assert_eq!(windows.len(), 2);
        assert_eq!(windows[&WindowId(10)].app_id, "firefox");
        assert_eq!(windows[&WindowId(11)].title, "term");
    }

    #[test]
    fn test_fake_backend_handshake_first() {
        let mut backend = FakeBackend::with_windows(&[("Firefox", "firefox")]);
        assert!(backend.seat().is_none());
        assert_eq!(backend.next_event().unwrap(), BackendEvent::InitialSync);
        assert_eq!(backend.seat(), Some(FakeSeat("seat0".into())));
        assert!(backend.windows().is_empty());
    }

    #[test]
    fn test_fake_backend_idle_hangs_up() {
        let mut backend = FakeBackend::with_windows(&[]);
        backend.next_event().unwrap();
        assert_eq!(backend.next_event().unwrap(), BackendEvent::Disconnected);
        assert!(backend.is_shut_down());
    }

    #[test]
    fn test_mock_window_item() {
        let item = mock_window_item("My Document", "code");
        assert_eq!(item.title, "My Document");
        assert_eq!(item.app_id, "code");
    }
}
