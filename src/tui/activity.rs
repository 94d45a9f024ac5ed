//! Activity-based architecture for the TUI.
//!
//! Each screen in the TUI is an Activity with its own Application instance,
//! component IDs, and message types. The ActivityManager drives the current one.

use std::io::Stdout;

use color_eyre::eyre::{Result, eyre};
use ratatui::{Terminal, prelude::CrosstermBackend};

use super::Board;
use super::activities::MainActivity;

/// Shared context passed between activities.
pub struct Context {
    pub board: Board,
}

/// Exit reasons for activity transitions.
#[derive(Debug, Clone, PartialEq)]
pub enum ExitReason {
    Quit,
}

/// Activity lifecycle trait.
///
/// Each activity owns its own tui-realm Application and handles its own events.
pub trait Activity {
    /// Initialize the activity with context from the manager.
    fn on_create(&mut self, context: Context);

    /// Draw the UI and handle one tick of events.
    fn on_draw(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()>;

    /// Check if activity wants to exit. Returns Some(reason) to exit, None to continue.
    fn will_umount(&self) -> Option<&ExitReason>;

    /// Clean up and return the context to the manager.
    fn on_destroy(&mut self) -> Option<Context>;
}

/// Manages activity lifecycle.
pub struct ActivityManager {
    context: Option<Context>,
}

impl ActivityManager {
    pub fn new(context: Context) -> Self {
        Self {
            context: Some(context),
        }
    }

    pub fn run(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        let mut activity: Box<dyn Activity> = Box::<MainActivity>::default();
        let context = self
            .context
            .take()
            .ok_or_else(|| eyre!("Activity context already taken"))?;
        activity.on_create(context);

        loop {
            activity.on_draw(terminal)?;

            if let Some(ExitReason::Quit) = activity.will_umount() {
                self.context = activity.on_destroy();
                return Ok(());
            }
        }
    }
}
