//! Stage component: paints the swatches and reports pointer input.

use ratatui::Frame;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
};
use tuirealm::{
    Component, Event, MockComponent, State,
    command::{Cmd, CmdResult},
    event::{MouseButton, MouseEvent, MouseEventKind},
    props::{AttrValue, Attribute, Props},
};

use crate::stage::{Position, Stage, Swatch};
use crate::tui::activities::{Msg, main::UserEvent};

/// Upper half block: foreground paints the top half of a cell, background
/// the bottom half.
const HALF_BLOCK: &str = "▀";

/// Width of the editing ring, in stage units.
const RING_WIDTH: f64 = 1.0;

/// Snapshot of the stage, drawn with two stage units per cell row.
pub struct StageView {
    props: Props,
    swatches: Vec<Swatch>,
}

impl StageView {
    pub fn new(stage: &Stage) -> Self {
        Self {
            props: Props::default(),
            swatches: stage.swatches().to_vec(),
        }
    }

    /// Color of the topmost swatch at `point`, if any.
    fn pixel(&self, point: Position) -> Option<Color> {
        let swatch = self.swatches.iter().rev().find(|s| s.contains(point))?;
        let fill = swatch.rendered_rgb();

        if swatch.is_editing() {
            let c = swatch.center();
            let inner = swatch.size / 2.0 - RING_WIDTH;
            let (dx, dy) = (point.x - c.x, point.y - c.y);
            if dx * dx + dy * dy > inner * inner {
                return Some(ring_color(fill));
            }
        }

        Some(match fill {
            Some(rgb) => Color::Rgb(rgb.red, rgb.green, rgb.blue),
            None => Color::DarkGray,
        })
    }

    /// Lines for a `width` x `height` cell area.
    fn paint(&self, width: u16, height: u16) -> Vec<Line<'static>> {
        (0..height)
            .map(|row| {
                let spans: Vec<Span<'static>> = (0..width)
                    .map(|col| {
                        let x = f64::from(col) + 0.5;
                        let y = f64::from(row) * 2.0;
                        let upper = self.pixel(Position::new(x, y + 0.5));
                        let lower = self.pixel(Position::new(x, y + 1.5));
                        match (upper, lower) {
                            (None, None) => Span::raw(" "),
                            (upper, lower) => Span::styled(
                                HALF_BLOCK,
                                Style::default()
                                    .fg(upper.unwrap_or(Color::Reset))
                                    .bg(lower.unwrap_or(Color::Reset)),
                            ),
                        }
                    })
                    .collect();
                Line::from(spans)
            })
            .collect()
    }
}

/// Black or white, whichever stands out against `fill`.
fn ring_color(fill: Option<palette::Srgb<u8>>) -> Color {
    let Some(rgb) = fill else {
        return Color::White;
    };
    let luma = 0.299 * f64::from(rgb.red) + 0.587 * f64::from(rgb.green) + 0.114 * f64::from(rgb.blue);
    if luma > 140.0 { Color::Black } else { Color::White }
}

impl MockComponent for StageView {
    fn view(&mut self, frame: &mut Frame, area: Rect) {
        let lines = self.paint(area.width, area.height);
        frame.render_widget(Paragraph::new(lines), area);
    }

    fn query(&self, attr: Attribute) -> Option<AttrValue> {
        self.props.get(attr)
    }

    fn attr(&mut self, attr: Attribute, value: AttrValue) {
        self.props.set(attr, value);
    }

    fn state(&self) -> State {
        State::None
    }

    fn perform(&mut self, _cmd: Cmd) -> CmdResult {
        CmdResult::None
    }
}

impl Component<Msg, UserEvent> for StageView {
    fn on(&mut self, ev: Event<UserEvent>) -> Option<Msg> {
        let Event::Mouse(MouseEvent {
            kind, column, row, ..
        }) = ev
        else {
            return None;
        };

        match kind {
            MouseEventKind::Down(MouseButton::Left) => Some(Msg::PointerDown { column, row }),
            MouseEventKind::Drag(MouseButton::Left) => Some(Msg::PointerDrag { column, row }),
            MouseEventKind::Up(MouseButton::Left) => Some(Msg::PointerUp),
            _ => None,
        }
    }
}
