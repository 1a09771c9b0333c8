//! Headless TUI harness: drives the app with semantic events, no terminal.
//!
//! # What this covers
//!
//! - **Facets follow the store**: every edit made through the panel, the text
//!   input or the command line shows up in both the store and the facets.
//! - **Open state survives edits**: an expanded facet stays expanded while
//!   its filter changes.
//! - **Presentation**: titles and widgets for a descriptor-seeded list.
//!
//! # Running
//!
//! ```sh
//! cargo test --test tui_harness
//! ```

mod common;
use common::*;

use facets::facets_core::config::Config;
use facets::facets_core::{default_filters, FilterStore};
use facets::facets_tui::event::{AppEvent, Direction};
use facets::facets_tui::theme::Theme;
use facets::facets_tui::{to_faceted_filters, App, FacetWidget};
use pretty_assertions::assert_eq;

fn seeded(filters: Vec<facets::facets_core::Filter>) -> App {
    let store = FilterStore::with_filters(default_filters(true), filters);
    App::with_store(store, Config::defaults(), Theme::load_default())
}

fn send(app: &mut App, events: impl IntoIterator<Item = AppEvent>) {
    for event in events {
        app.handle(event);
    }
}

fn typed(text: &str) -> Vec<AppEvent> {
    text.chars().map(AppEvent::Char).collect()
}

#[test]
fn titles_for_a_seeded_list() {
    let facets = to_faceted_filters(&populated_filters());
    let shown: Vec<(&str, FacetWidget)> =
        facets.iter().map(|f| (f.title.as_str(), f.widget)).collect();
    assert_eq!(
        shown,
        vec![
            ("fixed", FacetWidget::Boolean),
            ("Date Range", FacetWidget::Date),
            ("Keyword", FacetWidget::Keyword),
            ("Status", FacetWidget::Status),
            ("tag", FacetWidget::String),
        ]
    );
}

#[test]
fn boolean_facet_cycles_through_options() {
    let mut app = seeded(vec![boolean("fixed", None)]);
    assert_eq!(app.state().store.query(), "_missing_:fixed");

    // open, then pick "true"
    send(&mut app, [AppEvent::Toggle, AppEvent::Nav(Direction::Down), AppEvent::Enter]);
    assert_eq!(app.state().store.query(), "fixed:true");
    assert!(app.state().facets[0].open);

    // "false"
    send(&mut app, [AppEvent::Nav(Direction::Down), AppEvent::Enter]);
    assert_eq!(app.state().store.query(), "fixed:false");
}

#[test]
fn string_facet_is_edited_in_the_text_input() {
    let mut app = seeded(vec![string("tag", Some("db"))]);

    app.handle(AppEvent::Enter);
    send(&mut app, [AppEvent::Backspace, AppEvent::Backspace]);
    send(&mut app, typed("cache hit"));
    app.handle(AppEvent::Enter);

    assert_eq!(app.state().store.query(), r#"tag:"cache hit""#);
    assert_eq!(app.state().facets[0].filter, string("tag", Some("cache hit")));
}

#[test]
fn removing_a_seeded_filter_drops_its_facet() {
    let mut app = seeded(vec![string("tag", Some("db")), keyword("oom")]);
    app.handle(AppEvent::Remove);

    let titles: Vec<&str> = app.state().facets.iter().map(|f| f.title.as_str()).collect();
    assert_eq!(titles, vec!["Keyword"]);
    assert_eq!(app.state().store.query(), "oom");
}

#[test]
fn commands_and_reset() {
    let mut app = seeded(Vec::new());
    assert_eq!(app.state().store.query(), "");

    app.handle(AppEvent::Char(':'));
    send(&mut app, typed("status open regressed"));
    app.handle(AppEvent::Enter);
    assert_eq!(
        app.state().store.query(),
        "(status:open OR status:regressed)"
    );

    app.handle(AppEvent::ResetAll);
    assert_eq!(app.state().filters, default_filters(true));
    assert_eq!(app.state().facets.len(), 3);
}
