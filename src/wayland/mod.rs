//! wlroots foreign-toplevel backend on top of `wayland-client`.
//!
//! Supported by Sway, Hyprland, Wayfire, River, labwc, dwl, Niri and other
//! compositors implementing `zwlr_foreign_toplevel_manager_v1`.

mod dispatch;
#[cfg(test)]
mod test_server;

use std::collections::{HashMap, VecDeque};
use std::os::unix::net::UnixStream;
use tracing::{debug, warn};
use wayland_client::backend::WaylandError;
use wayland_client::protocol::{wl_registry, wl_seat};
use wayland_client::{Connection, DispatchError, EventQueue, Proxy, QueueHandle};
use wayland_protocols_wlr::foreign_toplevel::v1::client::{
    zwlr_foreign_toplevel_handle_v1::ZwlrForeignToplevelHandleV1,
    zwlr_foreign_toplevel_manager_v1::ZwlrForeignToplevelManagerV1,
};

use crate::error::ControlError;
use crate::session::{Backend, BackendEvent, SyncToken};
use crate::toplevel::{Mutation, WindowId, WindowMap};

const MANAGER_INTERFACE: &str = "zwlr_foreign_toplevel_manager_v1";
const MANAGER_MAX_VERSION: u32 = 3;

/// User data attached to `wl_display.sync` callbacks.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Barrier {
    /// Completes the registry handshake
    Initial,
    /// Requested by the session
    Session(SyncToken),
}

/// Client-side state updated by the dispatch handlers.
pub(crate) struct WaylandState {
    registry: wl_registry::WlRegistry,
    manager_global: Option<(u32, u32)>,
    manager: Option<ZwlrForeignToplevelManagerV1>,
    seat: Option<wl_seat::WlSeat>,
    handles: HashMap<WindowId, ZwlrForeignToplevelHandleV1>,
    windows: WindowMap,
    events: VecDeque<BackendEvent>,
}

/// A live connection to the compositor.
pub struct WaylandBackend {
    conn: Connection,
    queue: EventQueue<WaylandState>,
    qh: QueueHandle<WaylandState>,
    state: WaylandState,
    next_token: u32,
    closed: bool,
}

impl WaylandBackend {
    /// Connect using `WAYLAND_DISPLAY` / `WAYLAND_SOCKET` and start the handshake.
    pub fn connect() -> Result<Self, ControlError> {
        Ok(Self::with_connection(Connection::connect_to_env()?))
    }

    /// Use an already connected socket, such as one end of a socket pair.
    pub fn from_socket(stream: UnixStream) -> Result<Self, ControlError> {
        Ok(Self::with_connection(Connection::from_socket(stream)?))
    }

    fn with_connection(conn: Connection) -> Self {
        let queue = conn.new_event_queue();
        let qh = queue.handle();

        let display = conn.display();
        let registry = display.get_registry(&qh, ());
        display.sync(&qh, Barrier::Initial);
        debug!("Requested registry and initial sync");

        Self {
            conn,
            queue,
            qh,
            state: WaylandState {
                registry,
                manager_global: None,
                manager: None,
                seat: None,
                handles: HashMap::new(),
                windows: WindowMap::new(),
                events: VecDeque::new(),
            },
            next_token: 0,
            closed: false,
        }
    }
}

impl Backend for WaylandBackend {
    type Seat = wl_seat::WlSeat;

    fn next_event(&mut self) -> Result<BackendEvent, ControlError> {
        loop {
            if self.closed {
                return Ok(BackendEvent::Disconnected);
            }
            if let Some(event) = self.state.events.pop_front() {
                return Ok(event);
            }

            match self.queue.blocking_dispatch(&mut self.state) {
                Ok(_) => {}
                Err(DispatchError::Backend(WaylandError::Io(e))) => {
                    debug!("Wayland connection closed: {}", e);
                    self.closed = true;
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    fn seat(&self) -> Option<wl_seat::WlSeat> {
        self.state.seat.clone()
    }

    fn bind_toplevels(&mut self) -> Result<(), ControlError> {
        if self.state.manager.is_some() {
            return Ok(());
        }

        let (name, version) = self
            .state
            .manager_global
            .ok_or(ControlError::GlobalMissing(MANAGER_INTERFACE))?;
        let manager = self.state.registry.bind::<ZwlrForeignToplevelManagerV1, _, _>(
            name,
            version.min(MANAGER_MAX_VERSION),
            &self.qh,
            (),
        );
        debug!(version = manager.version(), "Bound {}", MANAGER_INTERFACE);
        self.state.manager = Some(manager);
        Ok(())
    }

    fn sync(&mut self) -> Result<SyncToken, ControlError> {
        let token = SyncToken(self.next_token);
        self.next_token += 1;
        self.conn.display().sync(&self.qh, Barrier::Session(token));
        Ok(token)
    }

    fn windows(&self) -> &WindowMap {
        &self.state.windows
    }

    fn apply(
        &mut self,
        window: WindowId,
        mutation: &Mutation<wl_seat::WlSeat>,
    ) -> Result<(), ControlError> {
        let handle = self
            .state
            .handles
            .get(&window)
            .ok_or(ControlError::WindowNotFound(window))?;

        match mutation {
            Mutation::Activate { seat } => handle.activate(seat),
            Mutation::SetMaximized(true) => handle.set_maximized(),
            Mutation::SetMaximized(false) => handle.unset_maximized(),
            Mutation::SetMinimized(true) => handle.set_minimized(),
            Mutation::SetMinimized(false) => handle.unset_minimized(),
            Mutation::SetFullscreen(on) => {
                if handle.version() < 2 {
                    return Err(ControlError::UnsupportedRequest {
                        request: mutation.request_name(),
                        version: handle.version(),
                    });
                }
                if *on {
                    handle.set_fullscreen(None);
                } else {
                    handle.unset_fullscreen();
                }
            }
            Mutation::Close => handle.close(),
        }
        Ok(())
    }

    fn shutdown(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;

        if let Some(manager) = self.state.manager.take() {
            manager.stop();
        }
        if let Err(e) = self.conn.flush() {
            warn!("Failed to flush Wayland connection on shutdown: {}", e);
        }
        debug!("Closed compositor connection");
    }
}
