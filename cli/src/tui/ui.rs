use chrono::Datelike;
use cragbook_core::calendar::WEEKDAY_TITLES;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Row, Table, Tabs, Wrap},
    Frame,
};

use crate::stats;
use crate::tui::app::{App, InputMode, Tab};

pub fn draw(f: &mut Frame, app: &mut App) {
    let size = f.area();

    // Header and Main Content Split
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(0)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(1),    // Content
            Constraint::Length(3), // Input
            Constraint::Length(1), // Footer/Help
        ])
        .split(size);

    let selected_tab = match app.tab {
        Tab::Calendar => 0,
        Tab::Stats => 1,
    };
    let header = Tabs::new(vec![" Calendar ", " Statistics "])
        .select(selected_tab)
        .style(Style::default().fg(Color::DarkGray))
        .highlight_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .block(
            Block::default()
                .title(" CRAGBOOK ")
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded),
        );
    f.render_widget(header, main_chunks[0]);

    match app.tab {
        Tab::Calendar => {
            // Split Content into Left (Month) and Right (Day)
            let content_chunks = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Length(38), Constraint::Min(20)])
                .split(main_chunks[1]);

            draw_month(f, app, content_chunks[0]);
            draw_day(f, app, content_chunks[1]);
        }
        Tab::Stats => stats::draw(f, &app.report, app.today, main_chunks[1]),
    }

    draw_input(f, app, main_chunks[2]);

    let help = match app.input_mode {
        InputMode::Normal => {
            "←↓↑→/hjkl: Day | [/]: Month | t: Today | J/K: Climb | a: Log | d: Delete | Tab: Stats | q: Quit"
        }
        InputMode::Logging => "route:<id> mood:.. res:.. att:.. weather:.. note | Enter: Save | Esc: Cancel",
    };
    let footer = Paragraph::new(help)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    f.render_widget(footer, main_chunks[3]);
}

fn draw_month(f: &mut Frame, app: &App, area: Rect) {
    let month = &app.page.month;
    let title = format!(" {} {} ", month.title(), month.first_day.year());

    let header = Row::new(WEEKDAY_TITLES.to_vec()).style(Style::default().fg(Color::Yellow));

    let cells: Vec<_> = month.cells().collect();
    let rows: Vec<Row> = cells
        .chunks(7)
        .map(|week| {
            Row::new(week.iter().map(|(cell, active)| {
                let mut style = Style::default();
                if !cell.is_in_current_month {
                    style = style.fg(Color::DarkGray);
                }
                if *active {
                    style = style.fg(Color::Green).add_modifier(Modifier::BOLD);
                }
                if cell.date == Some(app.today) {
                    style = style.add_modifier(Modifier::UNDERLINED);
                }
                if cell.date == Some(app.selected) {
                    style = style.bg(Color::DarkGray).fg(Color::White);
                }
                let mark = if *active { "•" } else { " " };
                Span::styled(format!("{:>2}{}", cell.day_number_text(), mark), style)
            }))
        })
        .collect();

    let table = Table::new(rows, [Constraint::Length(4); 7])
        .header(header)
        .column_spacing(1)
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded),
        );

    f.render_widget(table, area);
}

fn draw_day(f: &mut Frame, app: &mut App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(7)])
        .split(area);

    let title = format!(" {} ", app.selected.format("%A, %d.%m.%Y"));
    let rows: Vec<Row> = app
        .page
        .climbings
        .iter()
        .map(|c| {
            Row::new(vec![
                Span::raw(c.date.format("%H:%M").to_string()),
                Span::styled(c.grade_text.clone(), Style::default().fg(Color::Yellow)),
                Span::styled(
                    c.route_name.clone().unwrap_or_else(|| "-".to_string()),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::raw(c.place_name.clone()),
                Span::raw(c.result.to_string()),
                Span::raw(c.mood.glyph()),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(5),  // Time
            Constraint::Length(4),  // Grade
            Constraint::Min(10),    // Route
            Constraint::Length(14), // Place
            Constraint::Length(8),  // Result
            Constraint::Length(4),  // Mood
        ],
    )
    .header(Row::new(vec!["Time", "Gr", "Route", "Place", "Result", ""]).style(Style::default().fg(Color::Yellow)))
    .block(Block::default().title(title).borders(Borders::ALL).border_type(BorderType::Rounded))
    .row_highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
    .highlight_symbol(">> ");

    f.render_stateful_widget(table, chunks[0], &mut app.state);

    draw_detail(f, app, chunks[1]);
}

fn draw_detail(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default().title(" Detail ").borders(Borders::ALL).border_type(BorderType::Rounded);

    let Some(climb) = app.state.selected().and_then(|i| app.page.climbings.get(i)) else {
        let empty = Paragraph::new("No climbs on this day. Press 'a' to log one.")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        f.render_widget(empty, area);
        return;
    };

    let mut lines = vec![
        Line::from(vec![
            Span::styled("Weather: ", Style::default().fg(Color::Blue)),
            Span::raw(climb.weather.to_string()),
            Span::styled("  Attempts: ", Style::default().fg(Color::Blue)),
            Span::raw(climb.attempts.to_string()),
            Span::styled("  Photos: ", Style::default().fg(Color::Blue)),
            Span::raw(climb.photo_count.to_string()),
        ]),
        Line::from(vec![
            Span::styled("Mood: ", Style::default().fg(Color::Blue)),
            Span::raw(format!("{} {}", climb.mood.glyph(), climb.mood)),
        ]),
    ];
    if !climb.note.is_empty() {
        lines.push(Line::from(climb.note.as_str()));
    }

    let detail = Paragraph::new(lines).block(block).wrap(Wrap { trim: true });
    f.render_widget(detail, area);
}

fn draw_input(f: &mut Frame, app: &App, area: Rect) {
    let (text, style, title) = match app.input_mode {
        InputMode::Logging => (
            app.input.clone(),
            Style::default().fg(Color::Yellow),
            format!(" Log on {} ", app.selected.format("%d.%m")),
        ),
        InputMode::Normal => (
            app.message.clone().unwrap_or_default(),
            Style::default().fg(Color::DarkGray),
            String::new(),
        ),
    };

    let input = Paragraph::new(text)
        .style(style)
        .block(Block::default().title(title).borders(Borders::ALL).border_type(BorderType::Rounded));
    f.render_widget(input, area);

    if let InputMode::Logging = app.input_mode {
        f.set_cursor_position((area.x + app.cursor_position as u16 + 1, area.y + 1));
    }
}
