use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use throbber_widgets_tui::{Throbber, ThrobberState};
use unicode_width::UnicodeWidthStr;

use crate::ui::style::Theme;

/// What the left half of the status row reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status<'a> {
	Idle,
	Loading(&'a str),
	Notice(&'a str),
	Error(&'a str),
}

/// Argument bundle for the status row.
pub struct StatusContext<'a> {
	pub status: Status<'a>,
	pub footer: &'a str,
	pub throbber_state: &'a ThrobberState,
	pub theme: &'a Theme,
}

/// Render the status on the left and the footer right-aligned.
pub fn render_status(frame: &mut Frame, area: Rect, ctx: StatusContext<'_>) {
	let footer_width = footer_width(ctx.footer).min(area.width);
	let columns = Layout::default()
		.direction(Direction::Horizontal)
		.constraints([Constraint::Min(0), Constraint::Length(footer_width)])
		.split(area);

	if let Some(line) = status_line(&ctx) {
		frame.render_widget(Paragraph::new(line), columns[0]);
	}
	if footer_width > 0 {
		let footer = Paragraph::new(Span::styled(ctx.footer.to_string(), ctx.theme.muted));
		frame.render_widget(footer, columns[1]);
	}
}

fn status_line(ctx: &StatusContext<'_>) -> Option<Line<'static>> {
	match ctx.status {
		Status::Idle => None,
		Status::Loading(message) => {
			let symbol = Throbber::default()
				.style(ctx.theme.accent)
				.to_symbol_span(ctx.throbber_state);
			Some(Line::from(vec![
				symbol,
				Span::styled(message.to_string(), ctx.theme.muted),
			]))
		}
		Status::Notice(message) => Some(Line::from(Span::styled(
			message.to_string(),
			ctx.theme.muted,
		))),
		Status::Error(message) => Some(Line::from(Span::styled(
			message.to_string(),
			ctx.theme.error,
		))),
	}
}

fn footer_width(footer: &str) -> u16 {
	u16::try_from(UnicodeWidthStr::width(footer)).unwrap_or(u16::MAX)
}
