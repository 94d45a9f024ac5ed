//! Mixer panel: a slider and numeric field per HSL channel plus the preview.

use crossterm_actions::{NavigationEvent, TuiEvent};
use ratatui::Frame;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use tuirealm::{
    Component, Event, MockComponent, State, StateValue,
    command::{Cmd, CmdResult, Direction as CmdDirection},
    event::Key,
    props::{AttrValue, Attribute, Props},
};

use crate::color::{Channel, parse_rgb_triple};
use crate::mixer::MixerWidgets;
use crate::tui::activities::{Msg, main::UserEvent};
use crate::tui::{AppAction, MixerFocus, dispatcher, handle_global_app_events};

/// Width reserved for the numeric field and its unit.
const FIELD_WIDTH: u16 = 7;

/// The HSL mixer. Renders the widgets owned by the mixer sync and turns keys
/// into board messages.
pub struct MixerPanel {
    props: Props,
    widgets: Option<MixerWidgets>,
    focus: MixerFocus,
}

impl MixerPanel {
    pub fn new(widgets: Option<MixerWidgets>, focus: MixerFocus) -> Self {
        Self {
            props: Props::default(),
            widgets,
            focus,
        }
    }

    fn draw_channel(&self, frame: &mut Frame, area: Rect, widgets: &MixerWidgets, channel: Channel) {
        let selected = channel == self.focus.channel;
        let w = widgets.channel(channel);

        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(5),
                Constraint::Length(FIELD_WIDTH),
            ])
            .split(area);

        let label_style = if selected {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        frame.render_widget(
            Paragraph::new(format!("{}:", channel.label())).style(label_style),
            cols[0],
        );

        // Slider track
        let (min, max) = channel.range();
        let track_width = cols[1].width.saturating_sub(1) as usize;
        let ratio = f64::from(w.slider - min) / f64::from(max - min);
        let pos = (ratio * track_width.saturating_sub(1) as f64).round() as usize;

        let (filled_style, empty_style, handle_style) = if selected {
            (
                Style::default().fg(Color::Cyan),
                Style::default().fg(Color::DarkGray),
                Style::default().fg(Color::White),
            )
        } else {
            (
                Style::default().fg(Color::DarkGray),
                Style::default().fg(Color::DarkGray),
                Style::default().fg(Color::Gray),
            )
        };

        let spans: Vec<Span> = (0..track_width)
            .map(|i| {
                if i == pos {
                    Span::styled("●", handle_style)
                } else if i < pos {
                    Span::styled("━", filled_style)
                } else {
                    Span::styled("─", empty_style)
                }
            })
            .collect();
        frame.render_widget(Paragraph::new(Line::from(spans)), cols[1]);

        // Numeric field
        let field_style = if selected && self.focus.typing {
            Style::default().fg(Color::White).bg(Color::DarkGray)
        } else if selected {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default()
        };
        let field = Line::from(vec![
            Span::styled(format!("{:>4}", w.field), field_style),
            Span::raw(channel.suffix()),
        ]);
        frame.render_widget(Paragraph::new(field), cols[2]);
    }

    fn draw_preview(&self, frame: &mut Frame, area: Rect, widgets: &MixerWidgets) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(1)])
            .split(area);

        let fill = parse_rgb_triple(&widgets.preview)
            .map(|rgb| Color::Rgb(rgb.red, rgb.green, rgb.blue))
            .unwrap_or(Color::Reset);
        frame.render_widget(
            Block::default().style(Style::default().bg(fill)),
            rows[0],
        );
        frame.render_widget(
            Paragraph::new(widgets.preview.as_str())
                .alignment(ratatui::layout::Alignment::Center)
                .style(Style::default().add_modifier(Modifier::DIM)),
            rows[1],
        );
    }

    fn step_msg(&self, action: &AppAction) -> Option<Msg> {
        match action {
            AppAction::Tui(TuiEvent::Navigation(NavigationEvent::Up)) => Some(Msg::ChannelPrev),
            AppAction::Tui(TuiEvent::Navigation(NavigationEvent::Down)) => Some(Msg::ChannelNext),
            AppAction::Tui(TuiEvent::Navigation(NavigationEvent::Left))
            | AppAction::ValueDecrementSmall => Some(Msg::NudgeSmall(-1)),
            AppAction::Tui(TuiEvent::Navigation(NavigationEvent::Right))
            | AppAction::ValueIncrementSmall => Some(Msg::NudgeSmall(1)),
            AppAction::ValueDecrementLarge => Some(Msg::NudgeLarge(-1)),
            AppAction::ValueIncrementLarge => Some(Msg::NudgeLarge(1)),
            _ => None,
        }
    }
}

impl MockComponent for MixerPanel {
    fn view(&mut self, frame: &mut Frame, area: Rect) {
        let focused = self
            .props
            .get_or(Attribute::Focus, AttrValue::Flag(false))
            .unwrap_flag();

        let block = Block::default()
            .title(" Mixer ")
            .borders(Borders::ALL)
            .border_style(if focused {
                Style::default().fg(Color::Cyan)
            } else {
                Style::default()
            });
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let Some(widgets) = self.widgets.as_ref() else {
            let hint = vec![
                Line::from("No swatch selected"),
                Line::from(""),
                Line::from(Span::styled(
                    "Click a swatch to edit it",
                    Style::default().add_modifier(Modifier::DIM),
                )),
            ];
            frame.render_widget(Paragraph::new(hint), inner);
            return;
        };

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Hue
                Constraint::Length(1), // Saturation
                Constraint::Length(1), // Lightness
                Constraint::Length(1), // Spacer
                Constraint::Min(2),    // Preview
            ])
            .split(inner);

        for (i, channel) in Channel::ALL.into_iter().enumerate() {
            self.draw_channel(frame, rows[i], widgets, channel);
        }
        self.draw_preview(frame, rows[4], widgets);
    }

    fn query(&self, attr: Attribute) -> Option<AttrValue> {
        self.props.get(attr)
    }

    fn attr(&mut self, attr: Attribute, value: AttrValue) {
        self.props.set(attr, value);
    }

    fn state(&self) -> State {
        match self.widgets.as_ref() {
            Some(w) => State::One(StateValue::String(w.preview.clone())),
            None => State::None,
        }
    }

    fn perform(&mut self, cmd: Cmd) -> CmdResult {
        match cmd {
            Cmd::Move(CmdDirection::Up) => {
                self.focus.channel = self.focus.channel.prev();
                CmdResult::None
            }
            Cmd::Move(CmdDirection::Down) => {
                self.focus.channel = self.focus.channel.next();
                CmdResult::None
            }
            _ => CmdResult::None,
        }
    }
}

impl Component<Msg, UserEvent> for MixerPanel {
    fn on(&mut self, ev: Event<UserEvent>) -> Option<Msg> {
        let focused = self
            .props
            .get_or(Attribute::Focus, AttrValue::Flag(false))
            .unwrap_flag();

        if !focused {
            return None;
        }

        let Event::Keyboard(key_event) = ev else {
            return None;
        };

        match key_event.code {
            Key::Esc => return Some(Msg::Deselect),
            Key::Delete => return Some(Msg::RemoveSwatch),
            _ => {}
        }

        // Typing into a numeric field takes raw keys; anything else leaves
        // the field and commits it.
        if self.focus.typing {
            return match key_event.code {
                Key::Char(c) if c.is_ascii_digit() || c == '-' => Some(Msg::FieldType(c)),
                Key::Backspace => Some(Msg::FieldBackspace),
                _ => Some(Msg::FieldCommit),
            };
        }

        if let Key::Char(c) = key_event.code
            && c.is_ascii_digit()
            && self.widgets.is_some()
        {
            return Some(Msg::FieldType(c));
        }

        let action = dispatcher().dispatch(&key_event)?;

        if let Some(msg) = handle_global_app_events(&action) {
            return Some(msg);
        }

        let msg = self.step_msg(&action)?;
        match msg {
            Msg::ChannelPrev => {
                self.perform(Cmd::Move(CmdDirection::Up));
            }
            Msg::ChannelNext => {
                self.perform(Cmd::Move(CmdDirection::Down));
            }
            _ => {}
        }
        Some(msg)
    }
}
