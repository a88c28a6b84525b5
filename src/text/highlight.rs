use ratatui::style::Style;
use ratatui::text::{Line, Span};

use super::truncate::{TruncateOptions, TruncationStyle};
use crate::types::TextSpan;

/// Characters of context kept on each side of the hit.
pub const CONTEXT_BUDGET: usize = 30;

/// Decode HTML entities such as `&amp;` and `&#39;` in remote text.
#[must_use]
pub fn decode_entities(text: &str) -> String {
	html_escape::decode_html_entities(text).into_owned()
}

/// Raw partition of a span sequence around its first hit.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HighlightParts {
	pub before: String,
	pub hit: Option<String>,
	pub after: String,
}

impl HighlightParts {
	/// Split `spans` into the text before the first hit, the hit itself, and
	/// everything after it. Later hits are folded into `after` as plain text.
	#[must_use]
	pub fn partition(spans: &[TextSpan]) -> Self {
		let mut parts = Self::default();
		for span in spans {
			match (&parts.hit, span.is_hit()) {
				(None, true) => parts.hit = Some(span.value.clone()),
				(None, false) => parts.before.push_str(&span.value),
				(Some(_), _) => parts.after.push_str(&span.value),
			}
		}
		parts
	}
}

/// Display-ready highlight: entities decoded and context trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RenderedHighlight {
	pub before: String,
	pub hit: Option<String>,
	pub after: String,
}

impl RenderedHighlight {
	/// Build a ratatui line with the hit drawn in `hit_style`.
	#[must_use]
	pub fn to_line(&self, base: Style, hit_style: Style) -> Line<'static> {
		let mut spans = Vec::with_capacity(3);
		if !self.before.is_empty() {
			spans.push(Span::styled(self.before.clone(), base));
		}
		if let Some(hit) = self.hit.as_ref().filter(|hit| !hit.is_empty()) {
			spans.push(Span::styled(hit.clone(), base.patch(hit_style)));
		}
		if !self.after.is_empty() {
			spans.push(Span::styled(self.after.clone(), base));
		}
		Line::from(spans)
	}

	/// Concatenated text without styling.
	#[must_use]
	pub fn plain_text(&self) -> String {
		let mut text = self.before.clone();
		if let Some(hit) = &self.hit {
			text.push_str(hit);
		}
		text.push_str(&self.after);
		text
	}
}

/// Render `spans` for a result row.
///
/// The context before the hit keeps its right edge and the context after
/// keeps its left edge, each limited to [`CONTEXT_BUDGET`] characters.
#[must_use]
pub fn render_highlight(spans: &[TextSpan]) -> RenderedHighlight {
	let parts = HighlightParts::partition(spans);
	let before = TruncateOptions::new()
		.max_length(CONTEXT_BUDGET)
		.style(TruncationStyle::Left)
		.apply(&decode_entities(&parts.before));
	let after = TruncateOptions::new()
		.max_length(CONTEXT_BUDGET)
		.apply(&decode_entities(&parts.after));

	RenderedHighlight {
		before,
		hit: parts.hit.as_deref().map(decode_entities),
		after,
	}
}

#[cfg(test)]
mod tests {
	use ratatui::style::{Color, Modifier};

	use super::*;

	#[test]
	fn partitions_around_single_hit() {
		let spans = [
			TextSpan::plain("Hello "),
			TextSpan::hit("World"),
			TextSpan::plain("!"),
		];
		let rendered = render_highlight(&spans);
		assert_eq!(rendered.before, "Hello ");
		assert_eq!(rendered.hit.as_deref(), Some("World"));
		assert_eq!(rendered.after, "!");
		assert_eq!(rendered.plain_text(), "Hello World!");
	}

	#[test]
	fn decodes_entities_in_every_segment() {
		let spans = [
			TextSpan::plain("a &amp; b "),
			TextSpan::hit("&lt;tag&gt;"),
			TextSpan::plain(" it&#39;s"),
		];
		let rendered = render_highlight(&spans);
		assert_eq!(rendered.before, "a & b ");
		assert_eq!(rendered.hit.as_deref(), Some("<tag>"));
		assert_eq!(rendered.after, " it's");
	}

	#[test]
	fn later_hits_fold_into_trailing_context() {
		let spans = [
			TextSpan::hit("first"),
			TextSpan::plain(" and "),
			TextSpan::hit("second"),
		];
		let parts = HighlightParts::partition(&spans);
		assert_eq!(parts.before, "");
		assert_eq!(parts.hit.as_deref(), Some("first"));
		assert_eq!(parts.after, " and second");
	}

	#[test]
	fn no_hit_keeps_everything_before() {
		let spans = [TextSpan::plain("just "), TextSpan::plain("context")];
		let parts = HighlightParts::partition(&spans);
		assert_eq!(parts.before, "just context");
		assert!(parts.hit.is_none());
		assert!(parts.after.is_empty());
	}

	#[test]
	fn long_context_is_trimmed_towards_the_hit() {
		let before = "x".repeat(40) + "near ";
		let after = " next".to_string() + &"y".repeat(40);
		let spans = [
			TextSpan::plain(before),
			TextSpan::hit("match"),
			TextSpan::plain(after),
		];
		let rendered = render_highlight(&spans);
		assert!(rendered.before.starts_with("..."));
		assert!(rendered.before.ends_with("near "));
		assert_eq!(rendered.before.chars().count(), CONTEXT_BUDGET + 3);
		assert!(rendered.after.starts_with(" next"));
		assert!(rendered.after.ends_with("..."));
	}

	#[test]
	fn line_styles_only_the_hit() {
		let rendered = render_highlight(&[
			TextSpan::plain("a "),
			TextSpan::hit("b"),
			TextSpan::plain(" c"),
		]);
		let hit_style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);
		let line = rendered.to_line(Style::default(), hit_style);
		assert_eq!(line.spans.len(), 3);
		assert_eq!(line.spans[1].content, "b");
		assert_eq!(line.spans[1].style.fg, Some(Color::Green));
		assert_eq!(line.spans[0].style.fg, None);
	}
}
