//! Text input widget: the single-line editor at the bottom of the screen
//! used for the keyword facet and for string facets.
//!
//! # Editing
//!
//! - `Char(c)` inserts at the cursor.
//! - `Backspace` deletes the character before the cursor.
//! - `Nav(Left)` / `Nav(Right)` move the cursor.
//!
//! `Enter` and `Escape` are handled by the app shell, which turns the input
//! into a filter with [`TextTarget::build`].

use crate::event::{AppEvent, Direction};
use crate::theme::Theme;
use facets_core::{Filter, KeywordFilter, StringFilter};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget},
};

/// Which filter the text input is editing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TextTarget {
    #[default]
    Keyword,
    /// A string filter on the named field.
    Term(String),
}

impl TextTarget {
    pub fn label(&self) -> &str {
        match self {
            TextTarget::Keyword => "Keyword",
            TextTarget::Term(term) => term,
        }
    }

    /// Build the filter the typed text stands for. Blank text clears the
    /// value.
    pub fn build(&self, text: &str) -> Filter {
        let text = text.trim();
        match self {
            TextTarget::Keyword => {
                let mut keyword = KeywordFilter::default();
                if !text.is_empty() {
                    keyword.value = Some(text.to_string());
                }
                keyword.into()
            }
            TextTarget::Term(term) => {
                let value = (!text.is_empty()).then(|| text.to_string());
                StringFilter::new(term.as_str(), value).into()
            }
        }
    }
}

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct TextInputState {
    pub target: TextTarget,
    pub input: String,
    /// Byte offset of the cursor within `input`.
    pub cursor: usize,
}

impl TextInputState {
    /// Start editing `target`, pre-filled with its current value.
    pub fn begin(&mut self, target: TextTarget, initial: &str) {
        tracing::debug!(editing = target.label(), "text input: begin");
        self.target = target;
        self.input = initial.to_string();
        self.cursor = self.input.len();
    }

    /// The filter for the current input.
    pub fn submit(&self) -> Filter {
        self.target.build(&self.input)
    }

    pub fn handle(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Char(c) => {
                self.input.insert(self.cursor, *c);
                self.cursor += c.len_utf8();
            }
            AppEvent::Backspace => {
                if self.cursor > 0 {
                    let prev = prev_boundary(&self.input, self.cursor);
                    self.input.remove(prev);
                    self.cursor = prev;
                }
            }
            AppEvent::Nav(Direction::Left) => {
                self.cursor = prev_boundary(&self.input, self.cursor);
            }
            AppEvent::Nav(Direction::Right) => {
                if self.cursor < self.input.len() {
                    self.cursor = self.input[self.cursor..]
                        .char_indices()
                        .nth(1)
                        .map(|(i, _)| self.cursor + i)
                        .unwrap_or(self.input.len());
                }
            }
            _ => return,
        }
        tracing::trace!(input = %self.input, cursor = self.cursor, "text input edited");
    }
}

fn prev_boundary(s: &str, cursor: usize) -> usize {
    s[..cursor]
        .char_indices()
        .last()
        .map(|(i, _)| i)
        .unwrap_or(0)
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

pub struct TextInput<'a> {
    state: &'a TextInputState,
    focused: bool,
    theme: &'a Theme,
}

impl<'a> TextInput<'a> {
    pub fn new(state: &'a TextInputState, focused: bool, theme: &'a Theme) -> Self {
        Self {
            state,
            focused,
            theme,
        }
    }

    /// Absolute terminal position of the text cursor within this widget's
    /// rendered area. Pass to `frame.set_cursor_position()` after rendering.
    pub fn cursor_position(&self, area: Rect) -> (u16, u16) {
        let col = self.state.input[..self.state.cursor].chars().count() as u16;
        let x = (area.x + 1 + col).min(area.right().saturating_sub(1));
        (x, area.y + 1)
    }
}

impl Widget for TextInput<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .title(self.state.target.label().to_string())
            .border_style(self.theme.border(self.focused));

        let inner = block.inner(area);
        block.render(area, buf);

        let line = if self.focused {
            Line::from(self.state.input.as_str())
        } else {
            Line::from(Span::styled(
                "press / to search by keyword",
                self.theme.query_empty,
            ))
        };
        Paragraph::new(line).render(inner, buf);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
