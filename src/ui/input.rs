use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::style::Style;
use ratatui::widgets::Block;
use tui_textarea::{CursorMove, TextArea};

/// Single-line query editor built on `tui-textarea`.
#[derive(Debug, Clone)]
pub struct SearchInput<'a> {
	textarea: TextArea<'a>,
}

impl Default for SearchInput<'_> {
	fn default() -> Self {
		Self::new("")
	}
}

impl<'a> SearchInput<'a> {
	#[must_use]
	pub fn new(initial: impl Into<String>) -> Self {
		let initial: String = initial.into();
		// Keep the editor single-line even if the seed text had newlines.
		let line = initial.lines().next().unwrap_or_default().to_string();
		let mut textarea = TextArea::new(vec![line]);
		textarea.set_cursor_line_style(Style::default());
		textarea.move_cursor(CursorMove::End);
		Self { textarea }
	}

	/// Current query text.
	#[must_use]
	pub fn text(&self) -> &str {
		self.textarea
			.lines()
			.first()
			.map(String::as_str)
			.unwrap_or_default()
	}

	pub fn set_placeholder(&mut self, placeholder: impl Into<String>, style: Style) {
		self.textarea.set_placeholder_text(placeholder);
		self.textarea.set_placeholder_style(style);
	}

	pub fn set_block(&mut self, block: Block<'a>) {
		self.textarea.set_block(block);
	}

	pub fn set_style(&mut self, style: Style) {
		self.textarea.set_style(style);
	}

	/// Feed a key to the editor. Returns `true` when the text changed.
	///
	/// Keys that would insert a line break or a tab are rejected.
	pub fn input(&mut self, key: KeyEvent) -> bool {
		let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
		match key.code {
			KeyCode::Enter | KeyCode::Tab | KeyCode::BackTab => false,
			KeyCode::Char('m' | 'j') if ctrl => false,
			_ => self.textarea.input(key),
		}
	}

	pub(crate) fn widget(&self) -> &TextArea<'a> {
		&self.textarea
	}
}
