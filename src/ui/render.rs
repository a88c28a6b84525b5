use ratatui::{
	Frame,
	layout::{Alignment, Constraint, Direction, Layout, Margin, Rect},
	text::{Line, Span},
	widgets::{Clear, List, ListItem, Paragraph},
};
use unicode_width::UnicodeWidthStr;

use super::App;
use super::components::{
	RowStyle, Status, StatusContext, history_item, render_status, result_item,
};
use super::state::View;

impl<'a> App<'a> {
	pub(crate) fn draw(&mut self, frame: &mut Frame) {
		let area = frame.area().inner(Margin {
			vertical: 0,
			horizontal: 1,
		});

		let layout = Layout::default()
			.direction(Direction::Vertical)
			.constraints([
				Constraint::Length(1),
				Constraint::Length(1),
				Constraint::Min(1),
				Constraint::Length(1),
			])
			.split(area);

		self.render_input(frame, layout[0]);
		self.render_section_header(frame, layout[1]);
		self.render_rows(frame, layout[2]);
		self.render_status_row(frame, layout[3]);
	}

	fn render_input(&self, frame: &mut Frame, area: Rect) {
		let prompt = format!("{} > ", self.ui.input_title);
		let prompt_width = u16::try_from(UnicodeWidthStr::width(prompt.as_str()))
			.unwrap_or(u16::MAX)
			.min(area.width);
		let columns = Layout::default()
			.direction(Direction::Horizontal)
			.constraints([Constraint::Length(prompt_width), Constraint::Min(1)])
			.split(area);

		frame.render_widget(
			Paragraph::new(Span::styled(prompt, self.theme.prompt)),
			columns[0],
		);
		frame.render_widget(self.search_input.widget(), columns[1]);
	}

	fn render_section_header(&self, frame: &mut Frame, area: Rect) {
		let title = match self.view() {
			View::History if !self.history_entries.is_empty() => &self.ui.history_title,
			View::Results if self.visible_len() > 0 => &self.ui.results_title,
			_ => return,
		};
		let header = Line::from(Span::styled(title.clone(), self.theme.section));
		frame.render_widget(Paragraph::new(header), area);
	}

	fn render_rows(&mut self, frame: &mut Frame, area: Rect) {
		let selected = self.list_state.selected();
		let items: Vec<ListItem<'static>> = match self.view() {
			View::History => self
				.history_entries
				.iter()
				.enumerate()
				.map(|(index, entry)| {
					history_item(entry, RowStyle::selected(selected == Some(index)), &self.theme)
				})
				.collect(),
			View::Results if self.session.is_loading() => Vec::new(),
			View::Results => self
				.session
				.results()
				.iter()
				.enumerate()
				.map(|(index, result)| {
					result_item(result, RowStyle::selected(selected == Some(index)), &self.theme)
				})
				.collect(),
		};

		if items.is_empty() {
			if self.session.no_results() {
				let empty = Paragraph::new(self.ui.empty_message.clone())
					.alignment(Alignment::Center)
					.style(self.theme.empty);
				frame.render_widget(Clear, area);
				frame.render_widget(empty, area);
			}
			return;
		}

		// Rows carry their own selection colours; the list only drives scrolling.
		let list = List::new(items);
		frame.render_stateful_widget(list, area, &mut self.list_state);
	}

	fn render_status_row(&self, frame: &mut Frame, area: Rect) {
		let status = if self.session.is_loading() {
			Status::Loading(&self.ui.loading_message)
		} else if let Some(error) = self.session.last_error() {
			Status::Error(error)
		} else if let Some(notice) = self.notice.as_deref() {
			Status::Notice(notice)
		} else {
			Status::Idle
		};
		render_status(
			frame,
			area,
			StatusContext {
				status,
				footer: &self.ui.footer,
				throbber_state: &self.throbber_state,
				theme: &self.theme,
			},
		);
	}
}
