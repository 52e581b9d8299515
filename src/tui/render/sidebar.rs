use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::model::task::{CATEGORIES, Task};
use crate::ops::filter::{FilterOutcome, search_regex};
use crate::tui::app::{App, Mode};
use crate::tui::render::push_highlighted_spans;

/// Render the filter panel and selected-task details
pub fn render_sidebar(frame: &mut Frame, app: &App, outcome: &FilterOutcome, area: Rect) {
    let bg = app.theme.background;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.grid_border).bg(bg))
        .title(Span::styled(
            " Filters ",
            Style::default()
                .fg(app.theme.text_bright)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.width == 0 || inner.height == 0 {
        return;
    }

    let text_style = Style::default().fg(app.theme.text).bg(bg);
    let bright_style = Style::default().fg(app.theme.text_bright).bg(bg);
    let dim_style = Style::default().fg(app.theme.dim).bg(bg);
    let header_style = bright_style.add_modifier(Modifier::BOLD);

    let mut lines: Vec<Line> = Vec::new();

    // Search
    let query_style = if app.mode == Mode::Search {
        bright_style
    } else {
        text_style
    };
    let mut search_spans = vec![Span::styled(" Search: ", dim_style)];
    search_spans.push(Span::styled(app.criteria.search_query.clone(), query_style));
    if app.mode == Mode::Search {
        search_spans.push(Span::styled(
            "\u{258C}",
            Style::default().fg(app.theme.highlight).bg(bg),
        ));
    }
    lines.push(Line::from(search_spans));
    lines.push(Line::from(""));

    // Category toggles with visible/total counts
    lines.push(Line::from(Span::styled(" Categories", header_style)));
    for (i, category) in CATEGORIES.iter().enumerate() {
        let checked = app.criteria.categories.contains(category);
        let checkbox = if checked { "[x]" } else { "[ ]" };
        let visible = outcome.per_category_visible.get(category).copied().unwrap_or(0);
        let total = outcome.per_category.get(category).copied().unwrap_or(0);
        let label = format!("{:<12}", category.label());
        lines.push(Line::from(vec![
            Span::styled(format!(" {} {checkbox} ", i + 1), text_style),
            Span::styled(
                label,
                Style::default().fg(app.theme.category_color(*category)).bg(bg),
            ),
            Span::styled(format!("{visible}/{total}"), dim_style),
        ]));
    }
    lines.push(Line::from(""));

    // Time range window
    let window = match app.criteria.time_range {
        Some(range) => format!(" Window: next {} days", range.days()),
        None => " Window: all dates".to_string(),
    };
    lines.push(Line::from(Span::styled(window, text_style)));
    lines.push(Line::from(""));

    // Totals
    let total: usize = outcome.per_category.values().sum();
    lines.push(Line::from(vec![
        Span::styled(
            format!(" Showing {}/{} tasks", outcome.visible.len(), total),
            text_style,
        ),
        Span::styled(
            if app.criteria.is_active() {
                format!("  ({} filters)", app.criteria.active_count())
            } else {
                String::new()
            },
            dim_style,
        ),
    ]));

    if let Some(task) = app.selected_task() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(" Selected", header_style)));
        push_task_details(&mut lines, app, task);
    }

    frame.render_widget(Paragraph::new(lines).style(Style::default().bg(bg)), inner);
}

fn push_task_details<'a>(lines: &mut Vec<Line<'a>>, app: &App, task: &Task) {
    let bg = app.theme.background;
    let text_style = Style::default().fg(app.theme.text).bg(bg);
    let dim_style = Style::default().fg(app.theme.dim).bg(bg);
    let match_style = Style::default()
        .fg(app.theme.background)
        .bg(app.theme.highlight);

    let re = search_regex(&app.criteria.search_query);
    let mut name_spans = vec![Span::styled(" ", text_style)];
    push_highlighted_spans(
        &mut name_spans,
        &task.name,
        Style::default()
            .fg(app.theme.text_bright)
            .bg(bg)
            .add_modifier(Modifier::BOLD),
        match_style,
        re.as_ref(),
    );
    lines.push(Line::from(name_spans));

    lines.push(Line::from(Span::styled(
        format!(" {}", task.category.label()),
        Style::default()
            .fg(app.theme.category_color(task.category))
            .bg(bg),
    )));

    let days = task.duration_days();
    let unit = if days == 1 { "day" } else { "days" };
    lines.push(Line::from(Span::styled(
        format!(
            " {} \u{2013} {} ({days} {unit})",
            task.start_date.format("%b %-d"),
            task.end_date.format("%b %-d")
        ),
        text_style,
    )));

    if let Some(description) = &task.description {
        let mut desc_spans = vec![Span::styled(" ", dim_style)];
        push_highlighted_spans(&mut desc_spans, description, dim_style, match_style, re.as_ref());
        lines.push(Line::from(desc_spans));
    }
}
