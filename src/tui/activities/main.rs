//! Main activity - the swatch stage and the mixer panel.

use std::io::Stdout;
use std::time::Duration;

use color_eyre::eyre::{Result, eyre};
use ratatui::{
    Terminal,
    crossterm::event::{self, Event, KeyCode},
    layout::{Constraint, Direction, Layout, Rect},
    prelude::CrosstermBackend,
    style::{Modifier, Style},
    widgets::{Block, Borders, Paragraph},
};
use tuirealm::{
    Application, EventListenerCfg, PollStrategy, Sub, SubClause, SubEventClause, Update,
};

use crate::tui::Board;
use crate::tui::activity::{Activity, Context, ExitReason};
use crate::tui::components::{MAIN_FOOTER_ACTIONS, MixerPanel, StageView, format_footer, render_help};

/// Width of the mixer panel, borders included.
const MIXER_WIDTH: u16 = 40;

// ============================================================================
// Component identifiers (scoped to MainActivity)
// ============================================================================

/// Unique identifiers for all components in MainActivity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Id {
    /// Swatch stage (pointer input, never focused)
    Stage,
    /// HSL mixer (keyboard input, always focused)
    Mixer,
}

// ============================================================================
// Messages (scoped to MainActivity)
// ============================================================================

/// All possible messages that can be sent in MainActivity.
#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    // Application control
    Quit,
    ShowHelp,
    HideHelp,

    // Layout, in screen cells
    Resized { stage: Rect, mixer: Rect },

    // Pointer, in screen cells
    PointerDown { column: u16, row: u16 },
    PointerDrag { column: u16, row: u16 },
    PointerUp,

    // Swatches
    AddSwatch,
    RemoveSwatch,
    Deselect,

    // Mixer channel selection
    ChannelNext,
    ChannelPrev,

    // Slider steps (direction is +1 or -1)
    NudgeSmall(i32),
    NudgeLarge(i32),

    // Numeric field editing
    FieldType(char),
    FieldBackspace,
    FieldCommit,

    // Components must be remounted (chained after board changes)
    Refresh,
}

// ============================================================================
// User events (required by tui-realm, currently unused)
// ============================================================================

/// Custom user events (currently unused, but required by tui-realm).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserEvent {}

// ============================================================================
// Layout
// ============================================================================

/// Screen areas of the main activity.
struct BoardLayout {
    title: Rect,
    stage_frame: Rect,
    stage: Rect,
    mixer: Rect,
    status: Rect,
}

impl BoardLayout {
    fn new(area: Rect) -> Self {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Title
                Constraint::Min(6),    // Content
                Constraint::Length(1), // Status
            ])
            .split(area);

        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(10), Constraint::Length(MIXER_WIDTH)])
            .split(rows[1]);

        Self {
            title: rows[0],
            stage_frame: cols[0],
            stage: stage_block().inner(cols[0]),
            mixer: cols[1],
            status: rows[2],
        }
    }
}

fn stage_block() -> Block<'static> {
    Block::default().title(" Stage ").borders(Borders::ALL)
}

// ============================================================================
// MainActivity
// ============================================================================

/// The main board activity.
#[derive(Default)]
pub struct MainActivity {
    app: Option<Application<Id, Msg, UserEvent>>,
    context: Option<Context>,
    exit_reason: Option<ExitReason>,
}

impl MainActivity {
    /// Create and configure the tui-realm application.
    fn create_application() -> Application<Id, Msg, UserEvent> {
        Application::init(
            EventListenerCfg::default()
                .crossterm_input_listener(Duration::from_millis(20), 10)
                .poll_timeout(Duration::from_millis(50)),
        )
    }

    /// Mount both components from the current board and focus the mixer.
    ///
    /// The stage never takes focus; it receives pointer events through a
    /// subscription.
    fn mount_components(app: &mut Application<Id, Msg, UserEvent>, board: &Board) -> Result<()> {
        let _ = app.umount(&Id::Stage);
        app.mount(
            Id::Stage,
            Box::new(StageView::new(&board.stage)),
            vec![Sub::new(SubEventClause::Any, SubClause::Always)],
        )?;

        let _ = app.umount(&Id::Mixer);
        app.mount(
            Id::Mixer,
            Box::new(MixerPanel::new(board.mixer.widgets().cloned(), board.focus)),
            vec![],
        )?;

        app.active(&Id::Mixer)?;
        Ok(())
    }

    /// Run a message and everything it chains through the board.
    /// Returns whether the components need remounting.
    fn process(board: &mut Board, msg: Msg) -> bool {
        let mut needs_sync = false;
        let mut current = Some(msg);
        while let Some(m) = current {
            if matches!(m, Msg::Refresh) {
                needs_sync = true;
            }
            current = board.update(Some(m));
        }
        needs_sync
    }
}

impl Activity for MainActivity {
    fn on_create(&mut self, context: Context) {
        let mut app = Self::create_application();
        if let Err(e) = Self::mount_components(&mut app, &context.board) {
            tracing::error!("Failed to mount components: {}", e);
        }
        self.context = Some(context);
        self.app = Some(app);
    }

    fn on_draw(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        let app = self
            .app
            .as_mut()
            .ok_or_else(|| eyre!("Application not initialized"))?;
        let board = &mut self
            .context
            .as_mut()
            .ok_or_else(|| eyre!("Context not set"))?
            .board;

        // Measure before drawing so swatches reflow with the terminal
        let size = terminal.size()?;
        let layout = BoardLayout::new(Rect::new(0, 0, size.width, size.height));
        let moved = board.stage_area() != layout.stage || board.mixer_area() != layout.mixer;
        if (!board.is_laid_out() || moved)
            && Self::process(
                board,
                Msg::Resized {
                    stage: layout.stage,
                    mixer: layout.mixer,
                },
            )
        {
            Self::mount_components(app, board)?;
        }

        terminal.draw(|frame| {
            let title = format!(
                " swatchboard - {} swatches{} ",
                board.stage.len(),
                board
                    .mixer
                    .target()
                    .map(|id| format!(", editing {id}"))
                    .unwrap_or_default()
            );
            let title_widget =
                Paragraph::new(title).style(Style::default().add_modifier(Modifier::BOLD));
            frame.render_widget(title_widget, layout.title);

            frame.render_widget(stage_block(), layout.stage_frame);
            app.view(&Id::Stage, frame, layout.stage);
            app.view(&Id::Mixer, frame, layout.mixer);

            let status = board.message.clone().unwrap_or_else(|| {
                format_footer(
                    MAIN_FOOTER_ACTIONS,
                    &[("select", "click"), ("move", "drag")],
                )
            });
            let status_widget =
                Paragraph::new(status).style(Style::default().add_modifier(Modifier::DIM));
            frame.render_widget(status_widget, layout.status);

            if board.show_help {
                render_help(frame);
            }
        })?;

        // Help modal intercepts all input when visible
        if board.show_help {
            if let Event::Key(key) = event::read()? {
                match key.code {
                    KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') | KeyCode::Char('?') => {
                        board.update(Some(Msg::HideHelp));
                    }
                    _ => {}
                }
            }
            return Ok(());
        }

        match app.tick(PollStrategy::Once) {
            Ok(messages) => {
                let mut needs_sync = false;

                for msg in messages {
                    if matches!(msg, Msg::Quit) {
                        self.exit_reason = Some(ExitReason::Quit);
                        return Ok(());
                    }
                    needs_sync |= Self::process(board, msg);
                }

                if needs_sync {
                    Self::mount_components(app, board)?;
                }
            }
            Err(_) => {
                // Timeout is fine, just continue
            }
        }

        Ok(())
    }

    fn will_umount(&self) -> Option<&ExitReason> {
        self.exit_reason.as_ref()
    }

    fn on_destroy(&mut self) -> Option<Context> {
        self.app = None;
        self.context.take()
    }
}
