//! Top-level application state and the main event loop.
//!
//! [`App::run`] sets up the terminal, drives the crossterm event loop, and
//! tears everything down cleanly on exit or panic.
//!
//! The filter list lives in a [`FilterStore`]. Widgets only request edits;
//! the app applies them to the store and rebuilds the facet list from the
//! store's subscription.

use crate::{
    commands::{execute_command, Command},
    event::{self, AppEvent},
    facets::{refresh_faceted_filters, to_faceted_filters, FacetedFilter},
    theme::Theme,
    widgets::{
        command_bar::{CommandBar, CommandBarState},
        facet_panel::{FacetPanel, FacetPanelState, PanelAction},
        help::HelpPopup,
        query_view::QueryView,
        text_input::{TextInput, TextInputState, TextTarget},
    },
};
use crossterm::{
    event::{self as ct_event, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use facets_core::{config::Config, Filter, FilterReceiver, FilterStore};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction as LayoutDir, Layout, Rect},
    Frame, Terminal,
};
use std::{io, time::Duration};

// ---------------------------------------------------------------------------
// Focus
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Panel,
    /// The keyword / string text input.
    Text,
    /// Vim-style `:` command line is active.
    Command,
}

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

pub struct AppState {
    pub store: FilterStore,
    updates: FilterReceiver,
    /// Latest snapshot of the active list.
    pub filters: Vec<Filter>,
    pub facets: Vec<FacetedFilter>,
    pub panel: FacetPanelState,
    pub text: TextInputState,
    pub focus: Focus,
    /// Focus state before entering command mode, restored on exit.
    pub prev_focus: Focus,
    pub theme: Theme,
    pub config: Config,
    pub show_help: bool,
    pub command_bar: CommandBarState,
    pub quit: bool,
}

impl AppState {
    fn new(store: FilterStore, config: Config, theme: Theme) -> Self {
        let updates = store.subscribe();
        let filters = store.filters();
        let facets = to_faceted_filters(&filters);
        Self {
            store,
            updates,
            filters,
            facets,
            panel: FacetPanelState::default(),
            text: TextInputState::default(),
            focus: Focus::Panel,
            prev_focus: Focus::Panel,
            theme,
            config,
            show_help: false,
            command_bar: CommandBarState::default(),
            quit: false,
        }
    }

    /// Pull the latest list from the store subscription, if it changed.
    pub fn sync(&mut self) {
        if !self.updates.has_changed().unwrap_or(false) {
            return;
        }
        let filters = self.updates.borrow_and_update().clone();
        self.facets = refresh_faceted_filters(&self.facets, &filters);
        self.filters = filters;
        self.panel.clamp(&self.facets, &self.config.filters);
        tracing::debug!(facets = self.facets.len(), "facets refreshed");
    }

    /// Apply an edit requested by the facet panel.
    fn apply(&mut self, action: PanelAction) {
        tracing::debug!(action = ?action, "panel action");
        match action {
            PanelAction::Change(filter) => self.store.filter_changed(filter),
            PanelAction::Remove(filter) => self.store.filter_removed(Some(&filter)),
            PanelAction::Replace { removed, updated } => {
                self.store.filter_removed(Some(&removed));
                if let Some(updated) = updated {
                    self.store.filter_changed(updated);
                }
            }
            PanelAction::EditText { target, initial } => {
                self.text.begin(target, &initial);
                self.focus = Focus::Text;
            }
        }
        self.sync();
    }

    fn edit_keyword(&mut self) {
        let current = self
            .filters
            .iter()
            .find_map(|f| match f {
                Filter::Keyword(k) => k.value.clone(),
                _ => None,
            })
            .unwrap_or_default();
        self.text.begin(TextTarget::Keyword, &current);
        self.focus = Focus::Text;
    }
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

pub struct App {
    state: AppState,
}

impl App {
    /// An app over a fresh store seeded with the configured defaults.
    pub fn new(config: Config, theme: Theme) -> Self {
        let store = FilterStore::new(config.default_filters());
        Self::with_store(store, config, theme)
    }

    pub fn with_store(store: FilterStore, config: Config, theme: Theme) -> Self {
        App {
            state: AppState::new(store, config, theme),
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Set up the terminal, run the event loop, and restore the terminal on
    /// exit. Returns the query the filters rendered to when the user quit.
    pub fn run(mut self) -> anyhow::Result<String> {
        install_panic_hook();

        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(io::stdout());
        let mut terminal = Terminal::new(backend)?;

        let result = self.event_loop(&mut terminal);

        // Always restore terminal, even if the loop returned an error
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        let _ = terminal.show_cursor();

        result?;
        let query = self.state.store.query();
        tracing::info!(query = %query, "facets exited");
        Ok(query)
    }

    fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> anyhow::Result<()> {
        loop {
            {
                let s = &self.state;
                terminal.draw(|frame| draw(frame, s))?;
            }

            if self.state.quit {
                break;
            }

            if ct_event::poll(Duration::from_millis(16))? {
                match ct_event::read()? {
                    Event::Key(key) if key.kind == crossterm::event::KeyEventKind::Press => {
                        let raw = Event::Key(key);
                        // Use insert-mode mapping when a text widget is focused
                        let app_event = if is_insert_mode(self.state.focus) {
                            event::to_app_event_insert(raw)
                        } else {
                            event::to_app_event(raw)
                        };
                        if let Some(ev) = app_event {
                            tracing::debug!(focus = ?self.state.focus, event = ?ev, "key event");
                            self.handle(ev);
                        }
                    }
                    other => {
                        if let Some(ev) = event::to_app_event(other) {
                            self.handle(ev);
                        }
                    }
                }
            }
        }
        Ok(())
    }

    pub fn handle(&mut self, event: AppEvent) {
        let s = &mut self.state;

        // Help popup intercepts all events; only close keys pass through.
        if s.show_help {
            if matches!(event, AppEvent::Char('?') | AppEvent::Escape | AppEvent::Quit) {
                tracing::debug!("help popup closed");
                s.show_help = false;
            }
            return;
        }

        // Command mode intercepts all events.
        if s.focus == Focus::Command {
            handle_command_bar(s, event);
            return;
        }

        // Text input owns every key but its confirm / cancel / quit keys.
        if s.focus == Focus::Text {
            match event {
                AppEvent::Quit => s.quit = true,
                AppEvent::Enter => {
                    let filter = s.text.submit();
                    tracing::debug!(filter = ?filter, "text input submitted");
                    s.store.filter_changed(filter);
                    s.focus = Focus::Panel;
                    s.sync();
                }
                AppEvent::Escape | AppEvent::FocusNext => {
                    tracing::debug!("focus: Text -> Panel");
                    s.focus = Focus::Panel;
                }
                other => s.text.handle(&other),
            }
            return;
        }

        match event {
            AppEvent::Char('?') => {
                tracing::debug!("help popup opened");
                s.show_help = true;
            }
            AppEvent::Char(':') => {
                tracing::debug!(prev_focus = ?s.focus, "entering command mode");
                s.prev_focus = s.focus;
                s.command_bar.clear();
                s.focus = Focus::Command;
            }
            AppEvent::Quit => {
                tracing::debug!("quit");
                s.quit = true;
            }
            AppEvent::FocusNext | AppEvent::KeywordFocus => s.edit_keyword(),
            AppEvent::ResetAll => {
                s.store.reset();
                s.sync();
            }
            // Terminal resize is handled automatically by ratatui
            AppEvent::Resize(_, _) => {}
            other => {
                if let Some(action) = s.panel.handle(&other, &mut s.facets, &s.config.filters) {
                    s.apply(action);
                }
            }
        }
    }
}

fn handle_command_bar(s: &mut AppState, event: AppEvent) {
    match event {
        AppEvent::Escape => {
            tracing::debug!("command bar cancelled");
            s.command_bar.clear();
            s.focus = s.prev_focus;
        }
        AppEvent::Enter => {
            let input = s.command_bar.input.clone();
            match Command::parse(&input) {
                Ok(cmd) => {
                    tracing::debug!(command = ?cmd, "executing command");
                    s.command_bar.clear();
                    s.focus = s.prev_focus;
                    execute_command(s, cmd);
                    // A failed command leaves its error on the reopened bar.
                    if s.command_bar.error.is_some() {
                        s.focus = Focus::Command;
                    }
                }
                Err(msg) if msg.is_empty() => {
                    s.command_bar.clear();
                    s.focus = s.prev_focus;
                }
                Err(msg) => {
                    s.command_bar.error = Some(msg);
                }
            }
        }
        AppEvent::Quit => s.quit = true,
        other => s.command_bar.handle(&other),
    }
}

/// Returns true when the current focus is on a text-input widget, meaning
/// alphabetic keys should produce characters rather than trigger shortcuts.
fn is_insert_mode(focus: Focus) -> bool {
    matches!(focus, Focus::Text | Focus::Command)
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

pub fn draw(frame: &mut Frame, state: &AppState) {
    let area = frame.area();

    // Vertical: body | 3-line text input
    let vert = Layout::default()
        .direction(LayoutDir::Vertical)
        .constraints([Constraint::Fill(1), Constraint::Length(3)])
        .split(area);

    let pct = state.config.ui.panel_width_pct.min(100);
    let horiz = Layout::default()
        .direction(LayoutDir::Horizontal)
        .constraints([Constraint::Percentage(pct), Constraint::Fill(1)])
        .split(vert[0]);

    frame.render_widget(
        FacetPanel::new(
            &state.panel,
            &state.facets,
            &state.config.filters,
            state.focus == Focus::Panel,
            &state.theme,
        ),
        horiz[0],
    );
    frame.render_widget(QueryView::new(&state.filters, &state.theme), horiz[1]);
    frame.render_widget(
        TextInput::new(&state.text, state.focus == Focus::Text, &state.theme),
        vert[1],
    );

    if state.show_help {
        frame.render_widget(HelpPopup::new(&state.theme), area);
    }

    // Command bar overlays the bottom row of the screen
    if state.focus == Focus::Command {
        let cmd_area = Rect {
            y: area.bottom().saturating_sub(1),
            height: 1,
            ..area
        };
        frame.render_widget(CommandBar::new(&state.command_bar, &state.theme), cmd_area);
        let col = state.command_bar.cursor_col(cmd_area);
        frame.set_cursor_position((col, cmd_area.y));
        return;
    }

    if state.focus == Focus::Text {
        let input = TextInput::new(&state.text, true, &state.theme);
        frame.set_cursor_position(input.cursor_position(vert[1]));
    }
}

// ---------------------------------------------------------------------------
// Terminal helpers
// ---------------------------------------------------------------------------

fn install_panic_hook() {
    let original = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original(info);
    }));
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
