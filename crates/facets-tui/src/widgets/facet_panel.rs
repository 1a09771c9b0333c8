//! Facet panel: one collapsible row per active filter in the left pane.
//!
//! # Navigation
//! - `↑`/`k` and `↓`/`j` move the cursor over the visible rows.
//! - `→`/`l` expands the facet under the cursor; `←`/`h` collapses it.
//! - `Space` / `Enter` on a facet expands it (or opens the text input for
//!   keyword and string facets); on an option it applies that option.
//! - `x` / `Delete` removes the facet's filter.
//!
//! The panel never edits the filter list itself. [`FacetPanelState::handle`]
//! returns a [`PanelAction`] and the app shell applies it to the store.

use crate::event::{AppEvent, Direction};
use crate::facets::{FacetWidget, FacetedFilter};
use crate::theme::Theme;
use crate::widgets::text_input::TextTarget;
use facets_core::config::FiltersConfig;
use facets_core::{BooleanFilter, DateFilter, DateValue, Filter, QueryFilter, StatusFilter};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, List, ListItem, ListState, StatefulWidget, Widget},
};

const MISSING: &str = "missing";

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// One choice offered under an expanded facet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacetOption {
    pub label: String,
    pub checked: bool,
}

impl FacetOption {
    fn new(label: impl Into<String>, checked: bool) -> Self {
        Self {
            label: label.into(),
            checked,
        }
    }
}

/// The choices an expanded facet offers. Text facets have none.
pub fn options(filter: &Filter, cfg: &FiltersConfig) -> Vec<FacetOption> {
    match filter {
        Filter::Boolean(f) => vec![
            FacetOption::new("true", f.value == Some(true)),
            FacetOption::new("false", f.value == Some(false)),
            FacetOption::new(MISSING, f.value.is_none()),
        ],
        Filter::Date(f) => {
            let current = f.value.as_ref().map(DateValue::to_query_value);
            let mut opts: Vec<FacetOption> = cfg
                .date_presets
                .iter()
                .map(|p| FacetOption::new(p.as_str(), current.as_deref() == Some(p.as_str())))
                .collect();
            if let Some(current) = current.filter(|c| !cfg.date_presets.contains(c)) {
                opts.push(FacetOption::new(current, true));
            }
            opts.push(FacetOption::new(MISSING, f.value.is_none()));
            opts
        }
        Filter::Status(f) => {
            let mut opts: Vec<FacetOption> = cfg
                .statuses
                .iter()
                .map(|s| FacetOption::new(s.as_str(), f.value.contains(s)))
                .collect();
            for extra in f.value.iter().filter(|v| !cfg.statuses.contains(v)) {
                opts.push(FacetOption::new(extra.as_str(), true));
            }
            opts
        }
        Filter::Keyword(_) | Filter::String(_) => Vec::new(),
    }
}

/// The edit choosing `option` under `filter` stands for.
fn choose(filter: &Filter, option: &FacetOption) -> Option<PanelAction> {
    let label = option.label.as_str();
    match filter {
        Filter::Boolean(f) => {
            let value = match label {
                "true" => Some(true),
                "false" => Some(false),
                _ => None,
            };
            Some(PanelAction::Change(
                BooleanFilter {
                    term: f.term.clone(),
                    value,
                }
                .into(),
            ))
        }
        Filter::Date(f) => {
            let value = (label != MISSING).then(|| DateValue::parse(label));
            Some(PanelAction::Change(
                DateFilter {
                    term: f.term.clone(),
                    value,
                }
                .into(),
            ))
        }
        Filter::Status(f) if option.checked => {
            let remaining: Vec<String> =
                f.value.iter().filter(|v| *v != label).cloned().collect();
            Some(PanelAction::Replace {
                removed: filter.clone(),
                updated: (!remaining.is_empty()).then(|| StatusFilter::new(remaining).into()),
            })
        }
        Filter::Status(_) => Some(PanelAction::Change(StatusFilter::new([label]).into())),
        Filter::Keyword(_) | Filter::String(_) => None,
    }
}

// ---------------------------------------------------------------------------
// Actions
// ---------------------------------------------------------------------------

/// An edit requested by the panel.
#[derive(Debug, Clone, PartialEq)]
pub enum PanelAction {
    /// Merge this filter into the active list.
    Change(Filter),
    /// Remove this filter (a default is restored instead).
    Remove(Filter),
    /// Remove `removed`, then merge `updated` if there is one. Used where a
    /// merge alone cannot shrink a value, such as unticking a status.
    Replace {
        removed: Filter,
        updated: Option<Filter>,
    },
    /// Open the text input for a keyword or string facet.
    EditText { target: TextTarget, initial: String },
}

// ---------------------------------------------------------------------------
// Panel state
// ---------------------------------------------------------------------------

/// A visible row: a facet header, or one option under an expanded facet.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Row {
    Facet(usize),
    Option(usize, FacetOption),
}

impl Row {
    fn facet(&self) -> usize {
        match self {
            Row::Facet(i) | Row::Option(i, _) => *i,
        }
    }
}

#[derive(Debug, Default)]
pub struct FacetPanelState {
    /// Index into the currently-visible (flattened) rows.
    pub cursor: usize,
}

impl FacetPanelState {
    fn visible(facets: &[FacetedFilter], cfg: &FiltersConfig) -> Vec<Row> {
        let mut rows = Vec::new();
        for (i, facet) in facets.iter().enumerate() {
            rows.push(Row::Facet(i));
            if facet.open {
                rows.extend(options(&facet.filter, cfg).into_iter().map(|o| Row::Option(i, o)));
            }
        }
        rows
    }

    /// Index of the facet under the cursor.
    pub fn selected_facet(&self, facets: &[FacetedFilter], cfg: &FiltersConfig) -> Option<usize> {
        Self::visible(facets, cfg).get(self.cursor).map(Row::facet)
    }

    /// Keep the cursor on a visible row after the facet list changed.
    pub fn clamp(&mut self, facets: &[FacetedFilter], cfg: &FiltersConfig) {
        let len = Self::visible(facets, cfg).len();
        self.cursor = self.cursor.min(len.saturating_sub(1));
    }

    /// Handle a navigation-mode event. Open/closed state is written back to
    /// `facets`; filter edits are returned for the caller to apply.
    pub fn handle(
        &mut self,
        event: &AppEvent,
        facets: &mut [FacetedFilter],
        cfg: &FiltersConfig,
    ) -> Option<PanelAction> {
        let rows = Self::visible(facets, cfg);
        let row = rows.get(self.cursor)?.clone();
        let idx = row.facet();

        match (event, row) {
            (AppEvent::Nav(Direction::Up), _) => {
                self.cursor = self.cursor.saturating_sub(1);
                None
            }
            (AppEvent::Nav(Direction::Down), _) => {
                if self.cursor + 1 < rows.len() {
                    self.cursor += 1;
                }
                None
            }
            (AppEvent::Nav(Direction::Right), Row::Facet(_)) => {
                if !facets[idx].widget.is_text() {
                    facets[idx].open = true;
                }
                None
            }
            (AppEvent::Nav(Direction::Left) | AppEvent::Escape, _) => {
                self.collapse(idx, &rows, facets);
                None
            }
            (AppEvent::Toggle | AppEvent::Enter, Row::Facet(_)) => {
                if facets[idx].widget.is_text() {
                    return Some(edit_text(&facets[idx]));
                }
                if facets[idx].open {
                    self.collapse(idx, &rows, facets);
                } else {
                    facets[idx].open = true;
                }
                None
            }
            (AppEvent::Toggle | AppEvent::Enter, Row::Option(_, option)) => {
                tracing::debug!(facet = %facets[idx].title, option = %option.label, "option chosen");
                choose(&facets[idx].filter, &option)
            }
            (AppEvent::Remove, _) => Some(PanelAction::Remove(facets[idx].filter.clone())),
            _ => None,
        }
    }

    fn collapse(&mut self, idx: usize, rows: &[Row], facets: &mut [FacetedFilter]) {
        facets[idx].open = false;
        if let Some(header) = rows.iter().position(|r| *r == Row::Facet(idx)) {
            self.cursor = header;
        }
    }
}

fn edit_text(facet: &FacetedFilter) -> PanelAction {
    match &facet.filter {
        Filter::String(f) => PanelAction::EditText {
            target: TextTarget::Term(f.term.clone().unwrap_or_default()),
            initial: f.value.clone().unwrap_or_default(),
        },
        other => PanelAction::EditText {
            target: TextTarget::Keyword,
            initial: other.to_filter(),
        },
    }
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

pub struct FacetPanel<'a> {
    state: &'a FacetPanelState,
    facets: &'a [FacetedFilter],
    config: &'a FiltersConfig,
    focused: bool,
    theme: &'a Theme,
}

impl<'a> FacetPanel<'a> {
    pub fn new(
        state: &'a FacetPanelState,
        facets: &'a [FacetedFilter],
        config: &'a FiltersConfig,
        focused: bool,
        theme: &'a Theme,
    ) -> Self {
        Self {
            state,
            facets,
            config,
            focused,
            theme,
        }
    }

    fn header(&self, facet: &FacetedFilter) -> Line<'a> {
        let marker = match (facet.widget, facet.open) {
            (w, _) if w.is_text() => "  ",
            (_, true) => "▼ ",
            (_, false) => "▶ ",
        };
        let summary = facet.filter.to_filter();
        let summary = if summary.is_empty() {
            Span::styled("any", self.theme.facet_inactive)
        } else {
            Span::styled(summary, self.theme.facet_active)
        };
        Line::from(vec![
            Span::raw(marker),
            Span::styled(facet.title.clone(), self.theme.facet_title),
            Span::raw("  "),
            summary,
        ])
    }

    fn option(&self, option: &FacetOption, widget: FacetWidget) -> Line<'a> {
        let mark = match (widget, option.checked) {
            (FacetWidget::Status, true) => "[x] ",
            (FacetWidget::Status, false) => "[ ] ",
            (_, true) => "(•) ",
            (_, false) => "( ) ",
        };
        let style = if option.checked {
            self.theme.option_on
        } else {
            self.theme.option_off
        };
        Line::from(vec![
            Span::raw("    "),
            Span::styled(format!("{mark}{}", option.label), style),
        ])
    }
}

impl Widget for FacetPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .title("Filters")
            .border_style(self.theme.border(self.focused));

        let inner = block.inner(area);
        block.render(area, buf);

        let items: Vec<ListItem> = FacetPanelState::visible(self.facets, self.config)
            .iter()
            .map(|row| match row {
                Row::Facet(i) => ListItem::new(self.header(&self.facets[*i])),
                Row::Option(i, option) => {
                    ListItem::new(self.option(option, self.facets[*i].widget))
                }
            })
            .collect();

        let list = List::new(items).highlight_style(self.theme.selected);
        let selected = self.focused.then_some(self.state.cursor);
        let mut list_state = ListState::default().with_selected(selected);
        StatefulWidget::render(list, inner, buf, &mut list_state);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
