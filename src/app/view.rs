use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};

use crate::form::{Field, FormState};

use super::picker::{OperationPicker, PickerEntry};

pub(crate) struct FormView<'a> {
    pub title: &'a str,
    pub form: &'a FormState,
    pub status_message: &'a str,
    pub dirty: bool,
    pub help: Option<&'a str>,
}

pub(crate) struct PickerView<'a> {
    pub title: &'a str,
    pub picker: &'a OperationPicker,
    pub help: Option<&'a str>,
}

fn split_screen(area: Rect) -> [Rect; 3] {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(3),
        ])
        .split(area);
    [chunks[0], chunks[1], chunks[2]]
}

fn title_style() -> Style {
    Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
}

fn highlight_style() -> Style {
    Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD)
}

pub(crate) fn draw_picker(frame: &mut Frame<'_>, ctx: PickerView<'_>) {
    let [header, body, footer] = split_screen(frame.area());

    let query = Line::from(vec![
        Span::styled("Filter: ", title_style()),
        Span::raw(ctx.picker.query().to_string()),
    ]);
    let header_widget = Paragraph::new(query)
        .block(Block::default().title(ctx.title.to_string()).borders(Borders::ALL));
    frame.render_widget(header_widget, header);

    let items: Vec<ListItem<'static>> = ctx.picker.visible().map(build_entry_row).collect();
    if items.is_empty() {
        let placeholder = Paragraph::new("No matching operations")
            .block(Block::default().title("Operations").borders(Borders::ALL));
        frame.render_widget(placeholder, body);
    } else {
        let mut list_state = ListState::default();
        list_state.select(Some(ctx.picker.selected()));
        let list = List::new(items)
            .block(Block::default().title("Operations").borders(Borders::ALL))
            .highlight_style(highlight_style())
            .highlight_symbol("» ");
        frame.render_stateful_widget(list, body, &mut list_state);
    }

    let shown = ctx.picker.visible().count();
    let status = format!("{shown} of {} operation(s)", ctx.picker.total());
    render_footer(frame, footer, status, ctx.help);
}

fn build_entry_row(entry: &PickerEntry) -> ListItem<'static> {
    let mut spans = vec![Span::styled(entry.label.clone(), title_style())];
    if let Some(summary) = &entry.summary {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            summary.clone(),
            Style::default().fg(Color::DarkGray),
        ));
    }
    ListItem::new(Line::from(spans))
}

pub(crate) fn draw_form(frame: &mut Frame<'_>, ctx: FormView<'_>) {
    let [header, body, footer] = split_screen(frame.area());

    let header_widget = Paragraph::new(Line::from(Span::styled(
        ctx.title.to_string(),
        title_style(),
    )))
    .block(Block::default().title("Request body").borders(Borders::ALL));
    frame.render_widget(header_widget, header);

    render_fields(frame, body, ctx.form);

    let mut status = ctx.status_message.to_string();
    if ctx.dirty {
        status.push_str(" • unsent changes");
    }
    if let Some(focused) = ctx.form.focused_field() {
        status.push_str(" • focus: ");
        status.push_str(&focused.schema.display_label());
    }
    render_footer(frame, footer, status, ctx.help);
}

fn render_fields(frame: &mut Frame<'_>, area: Rect, form: &FormState) {
    if form.is_empty() {
        let placeholder = Paragraph::new("This request body has no properties")
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(placeholder, area);
        return;
    }

    let focused = form.field_index();
    let items: Vec<ListItem<'static>> = form
        .fields()
        .iter()
        .enumerate()
        .map(|(index, field)| build_field_row(field, index == focused))
        .collect();

    let mut list_state = ListState::default();
    list_state.select(Some(focused.min(form.fields().len() - 1)));

    let list = List::new(items)
        .block(Block::default().title("Fields").borders(Borders::ALL))
        .highlight_style(highlight_style())
        .highlight_symbol("» ");

    frame.render_stateful_widget(list, area, &mut list_state);
}

fn build_field_row(field: &Field, focused: bool) -> ListItem<'static> {
    let mut lines = Vec::new();
    let mut label = field.schema.display_label();
    if field.schema.required {
        label.push_str(" *");
    }

    let value = field.display_value();
    let mut value_lines = value.lines();
    lines.push(Line::from(vec![
        Span::styled(label, title_style()),
        Span::raw(": "),
        Span::styled(
            value_lines.next().unwrap_or_default().to_string(),
            Style::default().fg(Color::White),
        ),
    ]));
    for rest in value_lines {
        lines.push(Line::from(Span::styled(
            format!("  {rest}"),
            Style::default().fg(Color::White),
        )));
    }

    if let Some(description) = &field.schema.description {
        lines.push(Line::from(Span::styled(
            description.clone(),
            Style::default().fg(Color::DarkGray),
        )));
    }

    if let Some(preview) = field.preview.as_ref().filter(|_| focused) {
        for line in preview.lines() {
            lines.push(Line::from(Span::styled(
                format!("  │ {line}"),
                Style::default().fg(Color::DarkGray),
            )));
        }
    }

    if let Some(error) = &field.error {
        lines.push(Line::from(Span::styled(
            error.clone(),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )));
    }

    ListItem::new(lines)
}

fn render_footer(frame: &mut Frame<'_>, area: Rect, status: String, help: Option<&str>) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(area);

    let status_widget = Paragraph::new(status)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Status"));
    frame.render_widget(status_widget, chunks[0]);

    let help_widget = Paragraph::new(help.unwrap_or(" ").to_string())
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Keys"));
    frame.render_widget(help_widget, chunks[1]);
}
