//! Terminal board of draggable color swatches with a synchronized HSL mixer.
//!
//! HSL is the canonical color representation; every swatch is rendered in
//! RGB derived from it. The library is host-agnostic: [`stage`], [`mixer`],
//! [`drag`] and [`layout`] take plain positions and sizes, and [`tui`] maps
//! terminal mouse and key events onto them.

pub mod cli;
pub mod color;
pub mod config;
pub mod convert;
pub mod drag;
pub mod layout;
pub mod logging;
pub mod mixer;
pub mod spawn;
pub mod stage;
pub mod state;
pub mod tui;
