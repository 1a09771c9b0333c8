//! Help popup: centred floating overlay listing all keybindings.
//!
//! Toggle with `?`; close with `?` or `Escape`.

use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Clear, Paragraph, Widget},
};

const BINDINGS: &[(&str, &str)] = &[
    ("q  /  Ctrl+c", "Quit"),
    ("Tab", "Cycle focus: filters → keyword"),
    ("/", "Edit the keyword filter"),
    ("Escape", "Leave the text input or collapse a facet"),
    ("↑ k  /  ↓ j", "Move between facets and options"),
    ("← h  /  → l", "Collapse / expand a facet"),
    ("Space / Enter", "Expand a facet or apply an option"),
    ("x  /  Delete", "Remove the facet's filter"),
    ("R", "Reset every filter to the defaults"),
    (":", "Command line (:help lists commands)"),
    ("?", "Toggle this help popup"),
];

const COMMANDS: &[(&str, &str)] = &[
    (":status <v..>", "Add status values"),
    (":bool <term> <true|false|missing>", "Set a boolean filter"),
    (":date <term> [expr]", "Set a date filter"),
    (":string <term> [value]", "Set a string filter"),
    (":kw [text]", "Set the keyword filter"),
    (":filter <json>", "Apply a filter descriptor"),
    (":rm <key>", "Remove the filter with this key"),
    (":reset", "Reset to the defaults"),
    (":theme <name>", "Switch theme (default, gruvbox)"),
];

pub struct HelpPopup<'a> {
    theme: &'a Theme,
}

impl<'a> HelpPopup<'a> {
    pub fn new(theme: &'a Theme) -> Self {
        Self { theme }
    }
}

impl Widget for HelpPopup<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let height = (BINDINGS.len() + COMMANDS.len() + 3) as u16;
        let popup = centered_rect(80, height, area);
        Clear.render(popup, buf);

        let block = Block::bordered()
            .title(" facets keybindings (? to close) ")
            .border_style(self.theme.border_focused);

        let inner = block.inner(popup);
        block.render(popup, buf);

        let row = |(key, desc): &(&str, &str)| {
            Line::from(vec![
                Span::styled(
                    format!("  {:<36}", key),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::raw(desc.to_string()),
            ])
        };

        let mut lines: Vec<Line> = BINDINGS.iter().map(row).collect();
        lines.push(Line::default());
        lines.extend(COMMANDS.iter().map(row));

        Paragraph::new(lines).render(inner, buf);
    }
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}
