//! Interactive board: a stage of draggable swatches beside the HSL mixer.
//!
//! Architecture: Activity-based with tui-realm for components.
//! Each screen (activity) has its own Application instance and message types.
//!
//! Stage coordinates are one unit per column and two per row, so swatches
//! are drawn with half-block cells and stay round.

mod activities;
mod activity;
mod components;
mod model;

use std::io::stdout;
use std::sync::LazyLock;

use color_eyre::eyre::Result;
use crossterm_actions::{
    ActionBinding, ActionConfig, AppEvent, EditingMode, TuiEvent, TuiRealmDispatcher,
    defaults, keys,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use ratatui::{
    Terminal,
    crossterm::ExecutableCommand,
    crossterm::event::{DisableMouseCapture, EnableMouseCapture},
    crossterm::terminal::{
        EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
    },
    prelude::CrosstermBackend,
};

use crate::config::BoardConfig;

pub use model::{Board, MixerFocus};

use activities::Msg;
use activity::{ActivityManager, Context};

// ============================================================================
// Event handling (shared across activities)
// ============================================================================

/// Unified application events - wraps TuiEvent + custom actions.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum AppAction {
    /// Standard TUI events (navigation, input, selection, app)
    Tui(TuiEvent),
    /// Place a new random swatch
    AddSwatch,
    /// Delete the swatch in the mixer
    RemoveSwatch,
    /// Move the slider down by the small step
    ValueDecrementSmall,
    /// Move the slider up by the small step
    ValueIncrementSmall,
    /// Move the slider down by the large step
    ValueDecrementLarge,
    /// Move the slider up by the large step
    ValueIncrementLarge,
}

/// Global dispatcher instance - shared by all components.
pub static DISPATCHER: LazyLock<TuiRealmDispatcher<AppAction>> = LazyLock::new(|| {
    let mut config = ActionConfig::new(EditingMode::Emacs);

    for binding in defaults::emacs_defaults().bindings() {
        config.bind(ActionBinding {
            action: AppAction::Tui(binding.action),
            keys: binding.keys.clone(),
            description: binding.description.clone(),
        });
    }

    config.bind(
        ActionBinding::builder()
            .action(AppAction::AddSwatch)
            .key(keys::char('a'))
            .description("Add swatch")
            .build(),
    );
    config.bind(
        ActionBinding::builder()
            .action(AppAction::RemoveSwatch)
            .key(keys::char('x'))
            .description("Remove selected swatch")
            .build(),
    );

    config.bind(
        ActionBinding::builder()
            .action(AppAction::ValueDecrementSmall)
            .key(keys::char('['))
            .description("Decrease value")
            .build(),
    );
    config.bind(
        ActionBinding::builder()
            .action(AppAction::ValueIncrementSmall)
            .key(keys::char(']'))
            .description("Increase value")
            .build(),
    );
    config.bind(
        ActionBinding::builder()
            .action(AppAction::ValueDecrementLarge)
            .key(keys::char('{'))
            .description("Decrease value (10x)")
            .build(),
    );
    config.bind(
        ActionBinding::builder()
            .action(AppAction::ValueIncrementLarge)
            .key(keys::char('}'))
            .description("Increase value (10x)")
            .build(),
    );

    config.compile();
    TuiRealmDispatcher::new(config)
});

/// Convenience function for components to access the dispatcher.
pub fn dispatcher() -> &'static TuiRealmDispatcher<AppAction> {
    &DISPATCHER
}

/// Handle global application events that are common across all components.
/// Returns Some(Msg) if the action was handled, None otherwise.
pub fn handle_global_app_events(action: &AppAction) -> Option<Msg> {
    match action {
        AppAction::Tui(TuiEvent::App(AppEvent::Quit)) => Some(Msg::Quit),
        AppAction::Tui(TuiEvent::App(AppEvent::Help)) => Some(Msg::ShowHelp),
        AppAction::AddSwatch => Some(Msg::AddSwatch),
        AppAction::RemoveSwatch => Some(Msg::RemoveSwatch),
        _ => None,
    }
}

// ============================================================================
// TUI entry point
// ============================================================================

/// Run the interactive board.
///
/// `seed` fixes the random colors and positions of added swatches.
pub fn run(config: &BoardConfig, seed: Option<u64>) -> Result<()> {
    let rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let board = Board::new(config.clone(), rng);

    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    stdout().execute(EnableMouseCapture)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let context = Context { board };
    let mut manager = ActivityManager::new(context);

    let result = manager.run(&mut terminal);

    stdout().execute(DisableMouseCapture)?;
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    result
}
