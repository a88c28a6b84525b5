use ratatui::style::{Color, Modifier, Style};

/// Colours and modifiers used by the search dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
	pub border: Style,
	pub prompt: Style,
	pub section: Style,
	pub text: Style,
	pub muted: Style,
	pub row_selected: Style,
	pub accent: Style,
	pub empty: Style,
	pub error: Style,
}

const ATLAS_GREEN: Color = Color::Rgb(146, 210, 147);
const FOREST_GREEN: Color = Color::Rgb(46, 125, 50);

/// Green accents on a neutral dialog.
pub const DEFAULT: Theme = Theme {
	border: Style::new().fg(Color::Gray),
	prompt: Style::new().fg(FOREST_GREEN).add_modifier(Modifier::BOLD),
	section: Style::new().fg(ATLAS_GREEN),
	text: Style::new(),
	muted: Style::new().fg(Color::Gray),
	row_selected: Style::new().bg(ATLAS_GREEN).fg(Color::White),
	accent: Style::new().fg(ATLAS_GREEN),
	empty: Style::new().fg(Color::DarkGray),
	error: Style::new().fg(Color::LightRed),
};

pub const SLATE: Theme = Theme {
	border: Style::new().fg(Color::Rgb(71, 85, 105)),
	prompt: Style::new().fg(Color::LightCyan),
	section: Style::new()
		.fg(Color::Rgb(226, 232, 240))
		.add_modifier(Modifier::BOLD),
	text: Style::new().fg(Color::Rgb(226, 232, 240)),
	muted: Style::new().fg(Color::Rgb(148, 163, 184)),
	row_selected: Style::new()
		.bg(Color::Rgb(30, 41, 59))
		.fg(Color::Rgb(250, 204, 21)),
	accent: Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD),
	empty: Style::new().fg(Color::DarkGray),
	error: Style::new().fg(Color::Red),
};

const BUILTINS: [(&str, Theme); 2] = [("default", DEFAULT), ("slate", SLATE)];

impl Default for Theme {
	fn default() -> Self {
		DEFAULT
	}
}

impl Theme {
	/// Style for the matched run in a highlight.
	///
	/// A focused row is already coloured by its selection style, so the hit is
	/// underlined and inherits that colour. Other rows use the accent colour.
	#[must_use]
	pub fn hit_style(&self, in_focus: bool) -> Style {
		if in_focus {
			Style::new().add_modifier(Modifier::UNDERLINED)
		} else {
			self.accent
		}
	}

	/// Base style for a row's primary line.
	#[must_use]
	pub fn row_style(&self, selected: bool) -> Style {
		if selected {
			self.text.patch(self.row_selected)
		} else {
			self.text
		}
	}

	/// Style for a row's secondary line (locator or title under a highlight).
	#[must_use]
	pub fn row_detail_style(&self, selected: bool) -> Style {
		if selected {
			self.muted.patch(self.row_selected)
		} else {
			self.muted
		}
	}
}

/// Look up a built-in theme by case-insensitive name.
#[must_use]
pub fn by_name(name: &str) -> Option<Theme> {
	let wanted = name.trim().to_ascii_lowercase();
	BUILTINS
		.iter()
		.find(|(candidate, _)| *candidate == wanted)
		.map(|(_, theme)| *theme)
}

/// Names of the built-in themes.
#[must_use]
pub fn names() -> Vec<&'static str> {
	BUILTINS.iter().map(|(name, _)| *name).collect()
}
