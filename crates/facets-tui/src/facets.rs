//! Faceted filters: pairs each active filter with a display title, the
//! editor that presents it, and whether its panel is expanded.

use facets_core::{Filter, QueryFilter};

/// The editor a facet is presented with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FacetWidget {
    /// true / false / missing picker.
    Boolean,
    /// Range preset picker.
    Date,
    /// Free-text input.
    Keyword,
    /// Multi-select of known statuses.
    Status,
    /// Single-value text input for a named field.
    String,
}

impl FacetWidget {
    /// Whether the facet is edited through the text input rather than an
    /// option list.
    pub fn is_text(&self) -> bool {
        matches!(self, FacetWidget::Keyword | FacetWidget::String)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FacetedFilter {
    pub title: String,
    pub widget: FacetWidget,
    pub filter: Filter,
    pub open: bool,
}

impl FacetedFilter {
    pub fn new(filter: Filter) -> Self {
        let (title, widget) = describe(&filter);
        Self {
            title,
            widget,
            filter,
            open: false,
        }
    }

    pub fn key(&self) -> String {
        self.filter.key()
    }
}

fn describe(filter: &Filter) -> (String, FacetWidget) {
    match filter {
        Filter::Boolean(f) => (
            f.term.clone().unwrap_or_else(|| "Boolean".to_string()),
            FacetWidget::Boolean,
        ),
        Filter::Date(f) => {
            let title = match f.term.as_deref() {
                Some("date") => "Date Range".to_string(),
                Some(term) => term.to_string(),
                None => "Date".to_string(),
            };
            (title, FacetWidget::Date)
        }
        Filter::Keyword(_) => ("Keyword".to_string(), FacetWidget::Keyword),
        Filter::Status(_) => ("Status".to_string(), FacetWidget::Status),
        Filter::String(f) => (
            f.term.clone().unwrap_or_else(|| "String".to_string()),
            FacetWidget::String,
        ),
    }
}

/// Build the facet list for `filters`, all collapsed.
pub fn to_faceted_filters(filters: &[Filter]) -> Vec<FacetedFilter> {
    filters.iter().cloned().map(FacetedFilter::new).collect()
}

/// Rebuild the facet list for `filters`, keeping each facet's open state
/// from `previous` when its key is still present.
pub fn refresh_faceted_filters(previous: &[FacetedFilter], filters: &[Filter]) -> Vec<FacetedFilter> {
    to_faceted_filters(filters)
        .into_iter()
        .map(|mut facet| {
            let key = facet.key();
            facet.open = previous.iter().any(|p| p.open && p.key() == key);
            facet
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
