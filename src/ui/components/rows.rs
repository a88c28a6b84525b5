use ratatui::text::{Line, Span, Text};
use ratatui::widgets::ListItem;

use crate::text::{TruncateOptions, decode_entities, render_highlight, truncate_default};
use crate::types::{HistoryEntry, SearchResult};
use crate::ui::style::Theme;

/// Characters skipped at the front of a locator, enough for `https://www.`.
pub const LOCATOR_PREFIX_SKIP: usize = 12;

/// Display attributes a row is drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RowStyle {
	pub selected: bool,
}

impl RowStyle {
	#[must_use]
	pub fn selected(selected: bool) -> Self {
		Self { selected }
	}
}

/// Decoded title cut to the default budget.
#[must_use]
pub fn display_title(title: &str) -> String {
	truncate_default(&decode_entities(title))
}

/// Locator with its scheme-and-host prefix skipped.
#[must_use]
pub fn display_locator(id: &str) -> String {
	TruncateOptions::new().start(LOCATOR_PREFIX_SKIP).apply(id)
}

/// Build the list item for a live search result.
///
/// With a highlight the row shows the excerpt and then the title. Without one
/// it shows the title and then the locator.
#[must_use]
pub fn result_item(result: &SearchResult, row: RowStyle, theme: &Theme) -> ListItem<'static> {
	let primary = theme.row_style(row.selected);
	let detail = theme.row_detail_style(row.selected);

	let lines = match result.primary_highlight() {
		Some(highlight) => {
			let rendered = render_highlight(&highlight.texts);
			vec![
				rendered.to_line(primary, theme.hit_style(row.selected)),
				Line::from(Span::styled(display_title(&result.title), detail)),
			]
		}
		None => title_and_locator(&result.title, &result.id, primary, detail),
	};

	ListItem::new(Text::from(lines)).style(primary)
}

/// Build the list item for a history entry.
#[must_use]
pub fn history_item(entry: &HistoryEntry, row: RowStyle, theme: &Theme) -> ListItem<'static> {
	let primary = theme.row_style(row.selected);
	let detail = theme.row_detail_style(row.selected);
	let lines = title_and_locator(entry.title(), entry.id(), primary, detail);
	ListItem::new(Text::from(lines)).style(primary)
}

fn title_and_locator(
	title: &str,
	id: &str,
	primary: ratatui::style::Style,
	detail: ratatui::style::Style,
) -> Vec<Line<'static>> {
	vec![
		Line::from(Span::styled(display_title(title), primary)),
		Line::from(Span::styled(display_locator(id), detail)),
	]
}

#[cfg(test)]
mod tests {
	use ratatui::style::Modifier;

	use super::*;
	use crate::types::{Highlight, TextSpan};

	#[test]
	fn locator_drops_scheme_prefix() {
		assert_eq!(
			display_locator("https://www.mongodb.com/docs/atlas"),
			"mongodb.com/docs/atlas"
		);
	}

	#[test]
	fn title_entities_are_decoded() {
		assert_eq!(display_title("Q&amp;A"), "Q&A");
	}

	#[test]
	fn highlighted_result_shows_excerpt_then_title() {
		let result = SearchResult::new("https://www.x.io/a", "Atlas &amp; You").with_highlight(
			Highlight::new(vec![TextSpan::plain("use "), TextSpan::hit("atlas")]),
		);
		let item = result_item(&result, RowStyle::selected(true), &Theme::default());
		assert_eq!(item.height(), 2);
	}

	#[test]
	fn focused_hit_is_underlined() {
		let theme = Theme::default();
		let rendered = render_highlight(&[TextSpan::hit("atlas")]);
		let line = rendered.to_line(theme.row_style(true), theme.hit_style(true));
		assert!(line.spans[0].style.add_modifier.contains(Modifier::UNDERLINED));
	}
}
