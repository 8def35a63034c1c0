use super::traits::{DisplayItem, Executable, IconProvider};
use crate::compositor::{Compositor, display_label};
use crate::error::ControlError;
use crate::toplevel::{Action, Target, Toplevel, ToplevelState, WindowId};

/// Icon for windows without an app id.
const GENERIC_WINDOW_ICON: &str = "window";

/// A window item representing an open toplevel.
#[derive(Clone, Debug)]
pub struct WindowItem {
    /// Internal ID for the list
    pub key: String,
    /// Compositor window id (used for actions)
    pub window: WindowId,
    /// Label shown in the list, e.g. "Inbox (thunderbird)"
    pub label: String,
    /// Window title
    pub title: String,
    /// Application ID (e.g., "firefox")
    pub app_id: String,
    /// Compositor-reported state
    pub state: ToplevelState,
    /// Pre-computed description (e.g., "firefox · maximized")
    pub description: String,
}

impl WindowItem {
    /// Create a WindowItem from a compositor toplevel.
    pub fn from_toplevel(window: Toplevel) -> Self {
        let label = display_label(&window.title, &window.app_id);
        let description = describe(&window.app_id, window.state);
        Self {
            key: format!("window-{}", window.id),
            window: window.id,
            label,
            title: window.title,
            app_id: window.app_id,
            state: window.state,
            description,
        }
    }

    /// Target for acting on this window from a later session.
    ///
    /// Carries the app id so a reused id is refused instead of hitting
    /// another application's window.
    pub fn target(&self) -> Target {
        Target::Checked {
            id: self.window,
            app_id: self.app_id.clone(),
        }
    }

    /// Actions offered for this window, activation first.
    pub fn actions(&self) -> Vec<WindowAction> {
        Action::ALL
            .into_iter()
            .filter(Action::needs_target)
            .map(|action| WindowAction::new(self.target(), action))
            .collect()
    }
}

impl DisplayItem for WindowItem {
    fn id(&self) -> &str {
        &self.key
    }

    fn name(&self) -> &str {
        &self.label
    }

    fn description(&self) -> Option<&str> {
        Some(&self.description)
    }

    fn action_label(&self) -> &'static str {
        "Switch"
    }
}

impl IconProvider for WindowItem {
    fn icon_name(&self) -> Option<&str> {
        if self.app_id.is_empty() {
            Some(GENERIC_WINDOW_ICON)
        } else {
            Some(self.app_id.as_str())
        }
    }
}

/// One invocable action on one window.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WindowAction {
    pub target: Target,
    pub action: Action,
    pub label: &'static str,
    pub icon_name: Option<&'static str>,
}

impl WindowAction {
    pub fn new(target: Target, action: Action) -> Self {
        let (label, icon_name) = match action {
            Action::List => ("List", None),
            Action::Activate => ("Activate", None),
            Action::Maximize => ("Maximize", Some("window-maximize")),
            Action::Minimize => ("Minimize", Some("window-minimize")),
            Action::Fullscreen => ("Fullscreen", Some("view-fullscreen")),
            Action::Unmaximize => ("Unmaximize", Some("window-restore")),
            Action::Unminimize => ("Unminimize", Some("window-restore")),
            Action::Unfullscreen => ("Leave Fullscreen", Some("view-restore")),
            Action::Close => ("Close", Some("window-close")),
        };
        Self {
            target,
            action,
            label,
            icon_name,
        }
    }
}

impl DisplayItem for WindowAction {
    fn id(&self) -> &str {
        self.action.as_str()
    }

    fn name(&self) -> &str {
        self.label
    }

    fn description(&self) -> Option<&str> {
        None
    }

    fn action_label(&self) -> &'static str {
        self.label
    }
}

impl IconProvider for WindowAction {
    fn icon_name(&self) -> Option<&str> {
        self.icon_name
    }
}

impl Executable for WindowAction {
    fn execute(&self, compositor: &dyn Compositor) -> Result<(), ControlError> {
        compositor.perform(self.action, self.target.clone())
    }
}

fn describe(app_id: &str, state: ToplevelState) -> String {
    let app = if app_id.is_empty() { "Window" } else { app_id };
    let flags = state.labels();
    if flags.is_empty() {
        app.to_string()
    } else {
        format!("{} · {}", app, flags.join(", "))
    }
}
