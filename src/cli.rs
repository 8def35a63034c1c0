use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::io::Write;
use std::sync::Arc;

use crate::compositor::{Compositor, WlrootsCompositor};
use crate::config::{self, ListFormat};
use crate::error::ControlError;
use crate::items::{DisplayItem, WindowItem, WindowSource};
use crate::session::{Outcome, wlctrl};
use crate::toplevel::{Action, Target, Toplevel, WindowId, WindowMatcher};

#[derive(Parser)]
#[command(name = "wlctrl", version)]
#[command(about = "List and control windows on wlroots-based Wayland compositors")]
pub struct Cli {
    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List all windows as "id, app id, title"
    List {
        /// Print JSON instead of tab-separated lines
        #[arg(long)]
        json: bool,
    },
    /// List windows as launcher items as "id, label"
    Items {
        /// Print JSON instead of tab-separated lines
        #[arg(long)]
        json: bool,
    },
    /// Focus a window
    #[command(visible_alias = "focus")]
    Activate(TargetArgs),
    /// Maximize a window
    Maximize(TargetArgs),
    /// Minimize a window
    Minimize(TargetArgs),
    /// Make a window fullscreen
    Fullscreen(TargetArgs),
    /// Restore a maximized window
    Unmaximize(TargetArgs),
    /// Restore a minimized window
    Unminimize(TargetArgs),
    /// Leave fullscreen
    Unfullscreen(TargetArgs),
    /// Ask a window to close
    Close(TargetArgs),
}

/// Which window an action applies to.
#[derive(Args, Debug, Clone)]
pub struct TargetArgs {
    /// Window id as printed by `wlctrl list`
    #[arg(required_unless_present_any = ["app_id", "title"])]
    pub window: Option<String>,

    /// Select the single window with this app id
    #[arg(long, conflicts_with = "window")]
    pub app_id: Option<String>,

    /// Select the single window whose title contains this text
    #[arg(long, conflicts_with = "window")]
    pub title: Option<String>,
}

impl TargetArgs {
    /// Resolve the arguments into a session target.
    pub fn target(&self) -> Result<Target, ControlError> {
        if let Some(window) = &self.window {
            return Ok(Target::Id(window.parse::<WindowId>()?));
        }

        let matcher = WindowMatcher {
            app_id: self.app_id.clone(),
            title: self.title.clone(),
        };
        if matcher.is_empty() {
            return Err(ControlError::InvalidTarget(String::new()));
        }
        Ok(Target::Matching(matcher))
    }
}

impl Commands {
    /// The session action this command runs.
    pub fn action(&self) -> Action {
        match self {
            Commands::List { .. } | Commands::Items { .. } => Action::List,
            Commands::Activate(_) => Action::Activate,
            Commands::Maximize(_) => Action::Maximize,
            Commands::Minimize(_) => Action::Minimize,
            Commands::Fullscreen(_) => Action::Fullscreen,
            Commands::Unmaximize(_) => Action::Unmaximize,
            Commands::Unminimize(_) => Action::Unminimize,
            Commands::Unfullscreen(_) => Action::Unfullscreen,
            Commands::Close(_) => Action::Close,
        }
    }

    fn target_args(&self) -> Option<&TargetArgs> {
        match self {
            Commands::List { .. } | Commands::Items { .. } => None,
            Commands::Activate(args)
            | Commands::Maximize(args)
            | Commands::Minimize(args)
            | Commands::Fullscreen(args)
            | Commands::Unmaximize(args)
            | Commands::Unminimize(args)
            | Commands::Unfullscreen(args)
            | Commands::Close(args) => Some(args),
        }
    }
}

#[derive(Serialize)]
struct ItemOutput<'a> {
    id: WindowId,
    label: &'a str,
    description: Option<&'a str>,
    actions: Vec<Action>,
}

/// Run a parsed command line.
pub fn handle_command(cli: Cli) -> Result<()> {
    let format = config::config().list_format;
    let json = |flag: bool| flag || format == ListFormat::Json;

    match &cli.command {
        Commands::List { json: flag } => list_windows(&WlrootsCompositor, json(*flag)),
        Commands::Items { json: flag } => list_items(Arc::new(WlrootsCompositor), json(*flag)),
        command => {
            let action = command.action();
            let target = command
                .target_args()
                .map(TargetArgs::target)
                .transpose()?;
            let outcome = wlctrl(action, target)?;
            if let Outcome::Interrupted { state } = outcome {
                tracing::warn!(
                    %action,
                    %state,
                    "Connection closed before the action was confirmed"
                );
            }
            Ok(())
        }
    }
}

/// `list`: every window, unfiltered. Fails like `items` without a display.
fn list_windows(compositor: &dyn Compositor, json: bool) -> Result<()> {
    let windows = compositor.list_windows()?;
    print_windows(&windows, json)
}

/// `items`: windows as launcher entries, after config exclusions.
fn list_items(compositor: Arc<dyn Compositor>, json: bool) -> Result<()> {
    let source = WindowSource::new(compositor, config::config());
    let items = source.items()?;
    print_items(&items, json)
}

fn print_windows(windows: &[Toplevel], json: bool) -> Result<()> {
    let mut out = std::io::stdout().lock();
    if json {
        serde_json::to_writer_pretty(&mut out, windows).context("Failed to write window list")?;
        writeln!(out)?;
        return Ok(());
    }

    for window in windows {
        writeln!(out, "{}\t{}\t{}", window.id, window.app_id, window.title)
            .context("Failed to write window list")?;
    }
    Ok(())
}

fn print_items(items: &[WindowItem], json: bool) -> Result<()> {
    let mut out = std::io::stdout().lock();
    if json {
        let output: Vec<ItemOutput<'_>> = items
            .iter()
            .map(|item| ItemOutput {
                id: item.window,
                label: item.name(),
                description: item.description(),
                actions: item.actions().into_iter().map(|a| a.action).collect(),
            })
            .collect();
        serde_json::to_writer_pretty(&mut out, &output).context("Failed to write item list")?;
        writeln!(out)?;
        return Ok(());
    }

    for item in items {
        writeln!(out, "{}\t{}", item.window, item.name()).context("Failed to write item list")?;
    }
    Ok(())
}
