use tracing::{debug, trace};
use wayland_client::protocol::{wl_callback, wl_registry, wl_seat};
use wayland_client::{Connection, Dispatch, Proxy, QueueHandle, event_created_child};
use wayland_protocols_wlr::foreign_toplevel::v1::client::{
    zwlr_foreign_toplevel_handle_v1::{self, ZwlrForeignToplevelHandleV1},
    zwlr_foreign_toplevel_manager_v1::{self, ZwlrForeignToplevelManagerV1},
};

use super::{Barrier, MANAGER_INTERFACE, WaylandState};
use crate::session::BackendEvent;
use crate::toplevel::{Toplevel, ToplevelState, WindowId};

impl Dispatch<wl_registry::WlRegistry, ()> for WaylandState {
    fn event(
        state: &mut Self,
        registry: &wl_registry::WlRegistry,
        event: wl_registry::Event,
        _: &(),
        _: &Connection,
        qh: &QueueHandle<Self>,
    ) {
        if let wl_registry::Event::Global {
            name,
            interface,
            version,
        } = event
        {
            if interface == MANAGER_INTERFACE {
                debug!(name, version, "Found {}", MANAGER_INTERFACE);
                state.manager_global = Some((name, version));
            } else if interface == "wl_seat" && state.seat.is_none() {
                let seat = registry.bind::<wl_seat::WlSeat, _, _>(name, version.min(1), qh, ());
                state.seat = Some(seat);
                debug!("Bound to wl_seat");
            }
        }
    }
}

impl Dispatch<wl_seat::WlSeat, ()> for WaylandState {
    fn event(
        _: &mut Self,
        _: &wl_seat::WlSeat,
        _: wl_seat::Event,
        _: &(),
        _: &Connection,
        _: &QueueHandle<Self>,
    ) {
    }
}

impl Dispatch<wl_callback::WlCallback, Barrier> for WaylandState {
    fn event(
        state: &mut Self,
        _: &wl_callback::WlCallback,
        event: wl_callback::Event,
        barrier: &Barrier,
        _: &Connection,
        _: &QueueHandle<Self>,
    ) {
        if let wl_callback::Event::Done { .. } = event {
            trace!(?barrier, "Round-trip complete");
            state.events.push_back(match *barrier {
                Barrier::Initial => BackendEvent::InitialSync,
                Barrier::Session(token) => BackendEvent::SyncDone(token),
            });
        }
    }
}

impl Dispatch<ZwlrForeignToplevelManagerV1, ()> for WaylandState {
    fn event(
        state: &mut Self,
        _: &ZwlrForeignToplevelManagerV1,
        event: zwlr_foreign_toplevel_manager_v1::Event,
        _: &(),
        _: &Connection,
        _: &QueueHandle<Self>,
    ) {
        match event {
            zwlr_foreign_toplevel_manager_v1::Event::Toplevel { toplevel } => {
                let id = WindowId(toplevel.id().protocol_id());
                trace!(%id, "New toplevel handle");
                state.windows.insert(id, Toplevel::new(id));
                state.handles.insert(id, toplevel);
            }
            zwlr_foreign_toplevel_manager_v1::Event::Finished => {
                debug!("Toplevel manager finished");
            }
            _ => {}
        }
    }

    event_created_child!(WaylandState, ZwlrForeignToplevelManagerV1, [
        zwlr_foreign_toplevel_manager_v1::EVT_TOPLEVEL_OPCODE => (ZwlrForeignToplevelHandleV1, ())
    ]);
}

impl Dispatch<ZwlrForeignToplevelHandleV1, ()> for WaylandState {
    fn event(
        state: &mut Self,
        proxy: &ZwlrForeignToplevelHandleV1,
        event: zwlr_foreign_toplevel_handle_v1::Event,
        _: &(),
        _: &Connection,
        _: &QueueHandle<Self>,
    ) {
        let id = WindowId(proxy.id().protocol_id());

        match event {
            zwlr_foreign_toplevel_handle_v1::Event::Title { title } => {
                trace!(%id, %title, "Toplevel title");
                if let Some(window) = state.windows.get_mut(&id) {
                    window.title = title;
                }
            }
            zwlr_foreign_toplevel_handle_v1::Event::AppId { app_id } => {
                trace!(%id, %app_id, "Toplevel app_id");
                if let Some(window) = state.windows.get_mut(&id) {
                    window.app_id = app_id;
                }
            }
            zwlr_foreign_toplevel_handle_v1::Event::State { state: flags } => {
                if let Some(window) = state.windows.get_mut(&id) {
                    window.state = ToplevelState::from_wire(&flags);
                    trace!(%id, state = ?window.state, "Toplevel state");
                }
            }
            zwlr_foreign_toplevel_handle_v1::Event::Closed => {
                debug!(%id, "Toplevel closed");
                state.windows.remove(&id);
                state.handles.remove(&id);
                proxy.destroy();
            }
            _ => {}
        }
    }
}
