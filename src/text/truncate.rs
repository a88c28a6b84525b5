/// Which end of the text is cut when it exceeds the budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TruncationStyle {
	/// Keep the head and cut the tail, appending the placeholder.
	#[default]
	Right,
	/// Keep the tail and cut the head, prefixing the placeholder.
	Left,
}

pub const DEFAULT_MAX_LENGTH: usize = 80;
pub const DEFAULT_PLACEHOLDER: &str = "...";

/// Parameters for [`truncate`]. Defaults match a plain 80 character cut.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TruncateOptions<'a> {
	pub start: usize,
	pub max_length: usize,
	pub style: TruncationStyle,
	pub placeholder: &'a str,
}

impl Default for TruncateOptions<'_> {
	fn default() -> Self {
		Self {
			start: 0,
			max_length: DEFAULT_MAX_LENGTH,
			style: TruncationStyle::Right,
			placeholder: DEFAULT_PLACEHOLDER,
		}
	}
}

impl<'a> TruncateOptions<'a> {
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	#[must_use]
	pub fn start(mut self, start: usize) -> Self {
		self.start = start;
		self
	}

	#[must_use]
	pub fn max_length(mut self, max_length: usize) -> Self {
		self.max_length = max_length;
		self
	}

	#[must_use]
	pub fn style(mut self, style: TruncationStyle) -> Self {
		self.style = style;
		self
	}

	#[must_use]
	pub fn placeholder(mut self, placeholder: &'a str) -> Self {
		self.placeholder = placeholder;
		self
	}

	/// Apply these options to `text`.
	#[must_use]
	pub fn apply(&self, text: &str) -> String {
		truncate(text, self.start, self.max_length, self.style, self.placeholder)
	}
}

/// Cut `text` down to `max_length` characters.
///
/// Lengths and offsets count Unicode scalar values. When the text is over
/// budget the kept window is `[start, start + max_length)` for
/// [`TruncationStyle::Right`] and `[len - max_length + start, len)` for
/// [`TruncationStyle::Left`], with the placeholder on the cut side. Text under
/// budget is returned unchanged unless `start` is non-zero, in which case the
/// same window is taken without a placeholder. Offsets past the end clamp.
#[must_use]
pub fn truncate(
	text: &str,
	start: usize,
	max_length: usize,
	style: TruncationStyle,
	placeholder: &str,
) -> String {
	let len = text.chars().count();

	if len > max_length {
		return match style {
			TruncationStyle::Right => {
				let mut out = char_window(text, start, start.saturating_add(max_length));
				out.push_str(placeholder);
				out
			}
			TruncationStyle::Left => {
				let from = (len - max_length).saturating_add(start);
				let mut out = placeholder.to_string();
				out.push_str(&char_window(text, from, len));
				out
			}
		};
	}

	if start > 0 {
		return char_window(text, start, start.saturating_add(max_length));
	}

	text.to_string()
}

/// Shorthand for [`truncate`] with every default: 80 characters, cut right.
#[must_use]
pub fn truncate_default(text: &str) -> String {
	TruncateOptions::default().apply(text)
}

fn char_window(text: &str, from: usize, to: usize) -> String {
	if to <= from {
		return String::new();
	}
	text.chars().skip(from).take(to - from).collect()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn right_truncation_appends_placeholder() {
		assert_eq!(
			truncate("abcdefghij", 0, 5, TruncationStyle::Right, "..."),
			"abcde..."
		);
	}

	#[test]
	fn short_text_is_untouched() {
		assert_eq!(truncate("short", 0, 80, TruncationStyle::Right, "..."), "short");
		assert_eq!(truncate_default("short"), "short");
	}

	#[test]
	fn left_truncation_keeps_tail_shifted_by_start() {
		assert_eq!(
			truncate("abcdefghij", 2, 5, TruncationStyle::Left, "..."),
			"...hij"
		);
		assert_eq!(
			truncate("abcdefghij", 0, 5, TruncationStyle::Left, "..."),
			"...fghij"
		);
	}

	#[test]
	fn offset_under_budget_drops_prefix_without_placeholder() {
		let url = "https://www.example.com/docs";
		assert_eq!(TruncateOptions::new().start(12).apply(url), "example.com/docs");
	}

	#[test]
	fn offset_past_end_yields_empty() {
		assert_eq!(TruncateOptions::new().start(50).apply("tiny"), "");
	}

	#[test]
	fn exact_budget_is_not_truncated() {
		assert_eq!(truncate("abcde", 0, 5, TruncationStyle::Right, "..."), "abcde");
	}

	#[test]
	fn counts_characters_not_bytes() {
		assert_eq!(
			truncate("héllo wörld", 0, 4, TruncationStyle::Right, "…"),
			"héll…"
		);
		assert_eq!(
			truncate("héllo wörld", 0, 4, TruncationStyle::Left, "…"),
			"…örld"
		);
	}

	#[test]
	fn zero_budget_leaves_only_placeholder() {
		assert_eq!(truncate("abc", 0, 0, TruncationStyle::Right, "..."), "...");
	}
}
