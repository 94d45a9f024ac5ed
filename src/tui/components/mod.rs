//! TUI components using tui-realm.

pub mod help;
pub mod mixer;
pub mod stage;

pub use help::{MAIN_FOOTER_ACTIONS, format_footer, render_help};
pub use mixer::MixerPanel;
pub use stage::StageView;
