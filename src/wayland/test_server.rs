//! In-process compositor for backend tests.
//!
//! Serves one client over a socket pair on its own thread, advertising a seat
//! and optionally the wlroots toplevel manager. Requests it receives are
//! recorded as `"request:title"` strings and returned when the client leaves.

use std::os::unix::net::UnixStream;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use wayland_protocols_wlr::foreign_toplevel::v1::server::{
    zwlr_foreign_toplevel_handle_v1::{self, ZwlrForeignToplevelHandleV1},
    zwlr_foreign_toplevel_manager_v1::{self, ZwlrForeignToplevelManagerV1},
};
use wayland_server::backend::{ClientData, ClientId, DisconnectReason};
use wayland_server::protocol::wl_seat::{self, WlSeat};
use wayland_server::{
    Client, DataInit, Dispatch, Display, DisplayHandle, GlobalDispatch, New, Resource,
};

struct ServerWindow {
    title: String,
    app_id: String,
    state: Vec<u32>,
}

/// Describes the compositor a test talks to.
pub struct TestServer {
    manager_version: Option<u32>,
    windows: Vec<ServerWindow>,
}

impl TestServer {
    /// A compositor advertising the toplevel manager at `manager_version`.
    pub fn new(manager_version: u32) -> Self {
        Self {
            manager_version: Some(manager_version),
            windows: Vec::new(),
        }
    }

    /// A compositor without the toplevel manager.
    pub fn without_manager() -> Self {
        Self {
            manager_version: None,
            windows: Vec::new(),
        }
    }

    /// Announce a window with wire state values (0 maximized .. 3 fullscreen).
    pub fn window(mut self, title: &str, app_id: &str, state: &[u32]) -> Self {
        self.windows.push(ServerWindow {
            title: title.to_string(),
            app_id: app_id.to_string(),
            state: state.to_vec(),
        });
        self
    }

    /// Start serving; returns the client end and the thread yielding the request log.
    pub fn spawn(self) -> (UnixStream, JoinHandle<Vec<String>>) {
        let (server_end, client_end) = UnixStream::pair().expect("socket pair");
        let thread = thread::spawn(move || self.serve(server_end));
        (client_end, thread)
    }

    fn serve(self, stream: UnixStream) -> Vec<String> {
        let mut display = Display::<ServerState>::new().expect("server display");
        let mut handle = display.handle();
        handle.create_global::<ServerState, WlSeat, ()>(1, ());
        if let Some(version) = self.manager_version {
            handle.create_global::<ServerState, ZwlrForeignToplevelManagerV1, ()>(version, ());
        }

        let gone = Arc::new(AtomicBool::new(false));
        handle
            .insert_client(stream, Arc::new(ClientState(gone.clone())))
            .expect("insert client");

        let mut state = ServerState {
            windows: self.windows,
            log: Vec::new(),
        };
        let deadline = Instant::now() + Duration::from_secs(5);
        while !gone.load(Ordering::Acquire) && Instant::now() < deadline {
            display.dispatch_clients(&mut state).expect("dispatch clients");
            let _ = display.flush_clients();
            thread::sleep(Duration::from_millis(1));
        }
        state.log
    }
}

struct ServerState {
    windows: Vec<ServerWindow>,
    log: Vec<String>,
}

struct ClientState(Arc<AtomicBool>);

impl ClientData for ClientState {
    fn initialized(&self, _: ClientId) {}

    fn disconnected(&self, _: ClientId, _: DisconnectReason) {
        self.0.store(true, Ordering::Release);
    }
}

impl GlobalDispatch<WlSeat, ()> for ServerState {
    fn bind(
        _: &mut Self,
        _: &DisplayHandle,
        _: &Client,
        resource: New<WlSeat>,
        _: &(),
        data_init: &mut DataInit<'_, Self>,
    ) {
        data_init.init(resource, ());
    }
}

impl Dispatch<WlSeat, ()> for ServerState {
    fn request(
        _: &mut Self,
        _: &Client,
        _: &WlSeat,
        _: wl_seat::Request,
        _: &(),
        _: &DisplayHandle,
        _: &mut DataInit<'_, Self>,
    ) {
    }
}

impl GlobalDispatch<ZwlrForeignToplevelManagerV1, ()> for ServerState {
    fn bind(
        state: &mut Self,
        dh: &DisplayHandle,
        client: &Client,
        resource: New<ZwlrForeignToplevelManagerV1>,
        _: &(),
        data_init: &mut DataInit<'_, Self>,
    ) {
        let manager = data_init.init(resource, ());
        state.log.push(format!("bind:{}", manager.version()));

        for window in &state.windows {
            let toplevel = client
                .create_resource::<ZwlrForeignToplevelHandleV1, _, Self>(
                    dh,
                    manager.version(),
                    window.title.clone(),
                )
                .expect("toplevel handle");
            manager.toplevel(&toplevel);
            toplevel.title(window.title.clone());
            toplevel.app_id(window.app_id.clone());
            toplevel.state(window.state.iter().flat_map(|s| s.to_ne_bytes()).collect());
            toplevel.done();
        }
    }
}

impl Dispatch<ZwlrForeignToplevelManagerV1, ()> for ServerState {
    fn request(
        state: &mut Self,
        _: &Client,
        manager: &ZwlrForeignToplevelManagerV1,
        request: zwlr_foreign_toplevel_manager_v1::Request,
        _: &(),
        _: &DisplayHandle,
        _: &mut DataInit<'_, Self>,
    ) {
        if let zwlr_foreign_toplevel_manager_v1::Request::Stop = request {
            state.log.push("stop".to_string());
            manager.finished();
        }
    }
}

impl Dispatch<ZwlrForeignToplevelHandleV1, String> for ServerState {
    fn request(
        state: &mut Self,
        _: &Client,
        toplevel: &ZwlrForeignToplevelHandleV1,
        request: zwlr_foreign_toplevel_handle_v1::Request,
        title: &String,
        _: &DisplayHandle,
        _: &mut DataInit<'_, Self>,
    ) {
        use zwlr_foreign_toplevel_handle_v1::Request;

        let name = match request {
            Request::SetMaximized => "set_maximized",
            Request::UnsetMaximized => "unset_maximized",
            Request::SetMinimized => "set_minimized",
            Request::UnsetMinimized => "unset_minimized",
            Request::Activate { .. } => "activate",
            Request::SetFullscreen { .. } => "set_fullscreen",
            Request::UnsetFullscreen => "unset_fullscreen",
            Request::Close => {
                toplevel.closed();
                "close"
            }
            Request::Destroy => "destroy",
            _ => return,
        };
        state.log.push(format!("{name}:{title}"));
    }
}
