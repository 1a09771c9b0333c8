//! Query view: the right-hand pane showing the query the active filters
//! render to, followed by each contributing fragment.

use crate::theme::Theme;
use facets_core::{to_query, Filter, QueryFilter};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget, Wrap},
};

pub struct QueryView<'a> {
    filters: &'a [Filter],
    theme: &'a Theme,
}

impl<'a> QueryView<'a> {
    pub fn new(filters: &'a [Filter], theme: &'a Theme) -> Self {
        Self { filters, theme }
    }

    fn lines(&self) -> Vec<Line<'static>> {
        let query = to_query(self.filters);
        if query.is_empty() {
            return vec![Line::from(Span::styled(
                "no filters applied",
                self.theme.query_empty,
            ))];
        }

        let mut lines = vec![
            Line::from(Span::styled(query, self.theme.query_text)),
            Line::default(),
        ];
        lines.extend(
            self.filters
                .iter()
                .map(|f| (f.key(), f.to_filter()))
                .filter(|(_, fragment)| !fragment.is_empty())
                .map(|(key, fragment)| {
                    Line::from(vec![
                        Span::styled(format!("{key:<20}"), self.theme.facet_title),
                        Span::styled(fragment, self.theme.facet_active),
                    ])
                }),
        );
        lines
    }
}

impl Widget for QueryView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .title("Query")
            .border_style(self.theme.border(false));

        Paragraph::new(self.lines())
            .block(block)
            .wrap(Wrap { trim: false })
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use facets_core::{default_filters, KeywordFilter, StatusFilter};
    use pretty_assertions::assert_eq;

    fn text(lines: &[Line]) -> Vec<String> {
        lines.iter().map(|l| l.to_string()).collect()
    }

    #[test]
    fn empty_query_shows_placeholder() {
        let theme = Theme::load_default();
        let filters = default_filters(false);
        let view = QueryView::new(&filters, &theme);
        assert_eq!(text(&view.lines()), vec!["no filters applied"]);
    }

    #[test]
    fn lists_contributing_fragments() {
        let theme = Theme::load_default();
        let filters = vec![
            Filter::from(StatusFilter::new(["open"])),
            Filter::from(KeywordFilter::default()),
            Filter::from(KeywordFilter::new("oom")),
        ];
        let view = QueryView::new(&filters, &theme);
        let lines = text(&view.lines());
        assert_eq!(lines[0], "status:open oom");
        assert_eq!(lines.len(), 4);
        assert!(lines[2].starts_with("status"));
        assert!(lines[3].ends_with("oom"));
    }
}
