use anyhow::Result;
use chrono::{Datelike, NaiveDate};
use cragbook_core::stats::{grade_label, short_month_title, MonthlyDifficultyPoint};
use cragbook_core::usecase::statistics::StatisticsUseCase;
use cragbook_core::StatisticsReport;
use ratatui::{
    prelude::*,
    widgets::{Bar, BarChart, BarGroup, Block, BorderType, Borders, Paragraph, Wrap},
};

use crate::Service;

// --- THEME ---
struct Theme {
    primary: Color,
    muted: Color,
    text: Color,
    line: Color,
    marker: Color,
}

const THEME: Theme = Theme {
    primary: Color::Cyan, // Highlights
    muted: Color::DarkGray,
    text: Color::White,
    line: Color::Green,
    marker: Color::Yellow,
};

pub fn print_report(service: &Service, today: NaiveDate) -> Result<()> {
    let report = StatisticsUseCase::new(service.repo()).get_report(today)?;

    let axis: Vec<_> = report.domain.axis_values.iter().map(|r| grade_label(*r as i32)).collect();
    println!("\n\x1b[1;36mDifficulty {}\x1b[0m (scale {})", today.year(), axis.join(" / "));
    if report.points.is_empty() {
        println!("  No graded climbs this year.");
    } else {
        for line in trend_lines(&report.points, today.month()) {
            println!("  {}", line);
        }
        let runs: Vec<_> = report.segments.iter().map(|s| segment_text(&s.months())).collect();
        println!("  Streaks: {}", runs.join(", "));
    }

    println!("\n\x1b[1;36mMoods\x1b[0m");
    if report.moods.is_empty() {
        println!("  No climbs this year.");
    }
    for stat in &report.moods {
        println!("  {:<4} {:<10} {:>3}%", stat.mood.glyph(), stat.mood.title(), stat.percent);
    }

    println!("\n\x1b[1;36mNext\x1b[0m\n  {}", report.recommendation);
    Ok(())
}

/// One text row per month up to `last_month`; months without climbs stay
/// empty so gaps in the trend remain visible.
fn trend_lines(points: &[MonthlyDifficultyPoint], last_month: u32) -> Vec<String> {
    (1..=last_month)
        .map(|month| match points.iter().find(|p| p.month_index == month) {
            Some(p) => format!(
                "{} {} {}",
                short_month_title(month),
                "#".repeat(p.max_grade_rank as usize + 1),
                grade_label(p.max_grade_rank as i32)
            ),
            None => format!("{} ·", short_month_title(month)),
        })
        .collect()
}

fn segment_text(months: &[u32]) -> String {
    match (months.first(), months.last()) {
        (Some(first), Some(last)) if first != last => {
            format!("{}-{}", short_month_title(*first), short_month_title(*last))
        }
        (Some(only), _) => short_month_title(*only).to_string(),
        _ => String::new(),
    }
}

/// Statistics tab of the TUI.
pub fn draw(frame: &mut Frame, report: &StatisticsReport, today: NaiveDate, area: Rect) {
    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(70), // Chart Area
            Constraint::Length(1),      // Gutter
            Constraint::Percentage(30), // Info Panel
        ])
        .split(area);

    draw_chart(frame, report, today, content_chunks[0]);
    draw_info_panel(frame, report, content_chunks[2]);
}

fn draw_chart(frame: &mut Frame, report: &StatisticsReport, today: NaiveDate, area: Rect) {
    let bar_items: Vec<Bar> = (1..=today.month())
        .map(|month| {
            let label = short_month_title(month);
            match report.points.iter().find(|p| p.month_index == month) {
                Some(point) => {
                    // Months climbed alone are drawn as markers, runs as a line.
                    let connected = report
                        .segments
                        .iter()
                        .any(|s| s.is_connected() && s.months().contains(&month));
                    Bar::default()
                        .label(label)
                        .value(point.max_grade_rank as u64 + 1)
                        .style(Style::default().fg(if connected { THEME.line } else { THEME.marker }))
                        .text_value(grade_label(point.max_grade_rank as i32))
                }
                None => Bar::default().label(label).value(0).text_value(""),
            }
        })
        .collect();

    let axis: Vec<_> = report.domain.axis_values.iter().map(|r| grade_label(*r as i32)).collect();
    let chart_block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(THEME.muted))
        .title(format!(" Difficulty {} ({}) ", today.year(), axis.join(" / ")));

    let chart = BarChart::default()
        .block(chart_block)
        .bar_width(4)
        .bar_gap(1)
        .data(BarGroup::default().bars(&bar_items))
        .max(report.domain.max as u64 + 1);

    frame.render_widget(chart, area);
}

fn draw_info_panel(frame: &mut Frame, report: &StatisticsReport, area: Rect) {
    let mut lines = vec![
        Line::from(vec![Span::styled("Moods", Style::default().add_modifier(Modifier::BOLD))]),
        Line::from(""),
    ];

    if report.moods.is_empty() {
        lines.push(Line::from(Span::styled("No climbs this year", Style::default().fg(THEME.muted))));
    }
    for stat in &report.moods {
        lines.push(Line::from(vec![
            Span::styled(format!("{:<4}", stat.mood.glyph()), Style::default().fg(THEME.primary)),
            Span::styled(format!("{:<10}", stat.mood.title()), Style::default().fg(THEME.text)),
            Span::styled(format!("{:>3}%", stat.percent), Style::default().add_modifier(Modifier::BOLD)),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(vec![Span::styled("Next", Style::default().add_modifier(Modifier::BOLD))]));
    lines.push(Line::from(Span::styled(
        report.recommendation.to_string(),
        Style::default().fg(THEME.line),
    )));

    let panel = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(THEME.muted))
                .title(" Summary "),
        );
    frame.render_widget(panel, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trend_lines_keep_gaps() {
        let points = vec![
            MonthlyDifficultyPoint { month_index: 1, max_grade_rank: 2 },
            MonthlyDifficultyPoint { month_index: 3, max_grade_rank: 0 },
        ];
        let lines = trend_lines(&points, 4);
        assert_eq!(lines, vec!["Jan ### 5b", "Feb ·", "Mar # 4", "Apr ·"]);
    }

    #[test]
    fn test_segment_text() {
        assert_eq!(segment_text(&[1, 2, 3]), "Jan-Mar");
        assert_eq!(segment_text(&[7]), "Jul");
    }
}
