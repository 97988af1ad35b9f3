//! Screen rendering

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState, Wrap};
use tui_input::Input;

use crate::app::{App, Mode};
use crate::form::{AddressField, EmployeeField, FormFocus, FormState};

pub fn render(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(1),    // Table
            Constraint::Length(3), // Status / notice
            Constraint::Length(1), // Key hints
        ])
        .split(f.area());

    render_header(f, app, chunks[0]);
    render_table(f, app, chunks[1]);
    render_status(f, app, chunks[2]);
    render_hints(f, app, chunks[3]);

    match &app.mode {
        Mode::Browse => {}
        Mode::Form(form) => render_form(f, form),
        Mode::ConfirmDelete { first_name, .. } => render_confirm(f, first_name),
    }
}

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let state = if app.busy {
        Span::styled(
            " WORKING... ",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )
    } else {
        Span::styled(
            " Ready ",
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        )
    };

    let title = Paragraph::new(vec![Line::from(vec![
        Span::raw(" Staffdeck "),
        Span::styled(" Employee Directory ", Style::default().fg(Color::Yellow)),
        Span::raw(" | "),
        state,
    ])])
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );
    f.render_widget(title, area);
}

fn render_table(f: &mut Frame, app: &App, area: Rect) {
    let header = Row::new(["First Name", "Last Name", "Email", "Phone Number", "Addresses"])
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );

    let rows = app.page_rows().iter().map(|e| {
        Row::new([
            Cell::from(e.first_name.clone()),
            Cell::from(e.last_name.clone()),
            Cell::from(e.email.clone()),
            Cell::from(e.phone_number.clone()),
            Cell::from(e.addresses.len().to_string()),
        ])
    });

    let table = Table::new(
        rows,
        [
            Constraint::Percentage(18),
            Constraint::Percentage(18),
            Constraint::Percentage(32),
            Constraint::Percentage(20),
            Constraint::Percentage(12),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .title(" Employees ")
            .borders(Borders::ALL),
    )
    .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED))
    .highlight_symbol("> ");

    let mut state = TableState::default();
    if !app.page_rows().is_empty() {
        state.select(Some(app.selected_in_page().min(app.page_rows().len() - 1)));
    }
    f.render_stateful_widget(table, area, &mut state);
}

fn render_status(f: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![Span::raw(format!(
        " Page {}/{} ({} employees)",
        app.page() + 1,
        app.page_count(),
        app.employees.len()
    ))];

    if let Some(notice) = &app.notice {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            format!(" {} ", notice.text),
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ));
    }

    let status = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(status, area);
}

fn render_hints(f: &mut Frame, app: &App, area: Rect) {
    let hints = match app.mode {
        Mode::Browse => {
            " up/down select | left/right page | n new | e edit | d delete | r refresh | q quit"
        }
        Mode::Form(_) => {
            " tab/shift-tab move | enter next/activate | ctrl-d remove address | esc cancel"
        }
        Mode::ConfirmDelete { .. } => " y confirm | n cancel",
    };

    let help = Paragraph::new(hints).style(Style::default().fg(Color::DarkGray));
    f.render_widget(help, area);
}

fn render_form(f: &mut Frame, form: &FormState) {
    let area = centered_rect(64, 80, f.area());
    f.render_widget(Clear, area);

    let block = Block::default()
        .title(format!(" {} ", form.title()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let (lines, focused_line) = form_lines(form);

    // Keep the focused line inside the viewport.
    let inner_height = area.height.saturating_sub(2) as usize;
    let scroll = if inner_height > 0 && focused_line >= inner_height {
        (focused_line + 1 - inner_height) as u16
    } else {
        0
    };

    let body = Paragraph::new(lines).block(block).scroll((scroll, 0));
    f.render_widget(body, area);
}

/// Build the form body, returning the index of the focused line.
fn form_lines(form: &FormState) -> (Vec<Line<'_>>, usize) {
    let mut lines = Vec::new();
    let mut focused_line = 0;

    for field in EmployeeField::ALL {
        let focused = form.focus == FormFocus::Employee(field);
        if focused {
            focused_line = lines.len();
        }
        lines.push(field_line(field.label(), form.employee_input(field), focused));
    }

    lines.push(Line::raw(""));
    lines.push(Line::styled(
        format!(" Addresses ({})", form.addresses.len()),
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    ));

    for (row, entry) in form.addresses.iter().enumerate() {
        lines.push(Line::styled(
            format!("  Address {}", row + 1),
            Style::default().fg(Color::DarkGray),
        ));
        for field in AddressField::ALL {
            let focused = form.focus == FormFocus::Address { row, field };
            if focused {
                focused_line = lines.len();
            }
            lines.push(field_line(field.label(), entry.input(field), focused));
        }
    }

    lines.push(Line::raw(""));

    let add_focused = form.focus == FormFocus::AddAddress;
    if add_focused {
        focused_line = lines.len();
    }
    lines.push(button_line("[ Add Address ]", add_focused));

    let submit_focused = form.focus == FormFocus::Submit;
    if submit_focused {
        focused_line = lines.len();
    }
    lines.push(button_line("[ Submit ]", submit_focused));

    (lines, focused_line)
}

fn field_line<'a>(label: &'a str, input: &'a Input, focused: bool) -> Line<'a> {
    let label_style = if focused {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };

    let mut spans = vec![Span::styled(format!(" {:<18}", label), label_style)];
    spans.extend(input_spans(input, focused));
    Line::from(spans)
}

/// Render an input value, with a block cursor when the field is focused.
fn input_spans(input: &Input, focused: bool) -> Vec<Span<'_>> {
    if !focused {
        return vec![Span::raw(input.value())];
    }

    let value = input.value();
    let cursor = input.visual_cursor();
    let before: String = value.chars().take(cursor).collect();
    let at = value.chars().nth(cursor).unwrap_or(' ');
    let after: String = value.chars().skip(cursor + 1).collect();

    vec![
        Span::raw(before),
        Span::styled(at.to_string(), Style::default().add_modifier(Modifier::REVERSED)),
        Span::raw(after),
    ]
}

fn button_line(text: &str, focused: bool) -> Line<'_> {
    let style = if focused {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD | Modifier::REVERSED)
    } else {
        Style::default().fg(Color::Gray)
    };
    Line::from(vec![Span::raw(" "), Span::styled(text, style)])
}

fn render_confirm(f: &mut Frame, first_name: &str) {
    let area = centered_rect(50, 30, f.area());
    f.render_widget(Clear, area);

    let block = Block::default()
        .title(" You are about to delete! ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red));

    let text = vec![
        Line::raw(""),
        Line::from(format!(
            " {first_name}'s record will be deleted permanently. Are you sure?"
        )),
        Line::raw(""),
        Line::from(vec![
            Span::styled(
                " [y] delete ",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(" [n] cancel ", Style::default().fg(Color::Gray)),
        ]),
    ];

    let body = Paragraph::new(text).block(block).wrap(Wrap { trim: false });
    f.render_widget(body, area);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
