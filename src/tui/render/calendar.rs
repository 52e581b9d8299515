use chrono::{Datelike, NaiveDate};
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Span;
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::model::task::Task;
use crate::ops::filter::FilterOutcome;
use crate::ops::gesture::GrabRegion;
use crate::ops::grid::month_grid;
use crate::tui::app::{App, HitRegion, HitTarget};
use crate::util::unicode;

/// Render the month grid: weekday header, day cells, and task bar segments.
/// Every day cell and bar segment registers a hit region so the mouse handler
/// can map screen positions back to dates and tasks.
pub fn render_calendar(frame: &mut Frame, app: &mut App, outcome: &FilterOutcome, area: Rect) {
    let bg = app.theme.background;
    let title = format!(" {} ", app.focus.format("%B %Y"));
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.grid_border).bg(bg))
        .title(Span::styled(
            title,
            Style::default()
                .fg(app.theme.text_bright)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.height < 2 || inner.width < 7 {
        return;
    }

    let days = month_grid(app.focus, app.config.week_start_day());
    let weeks = (days.len() / 7) as u32;

    let mut constraints = vec![Constraint::Length(1)];
    constraints.extend((0..weeks).map(|_| Constraint::Ratio(1, weeks)));
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    render_weekday_header(frame, app, &days[..7], rows[0]);

    // The dragged task's working copy replaces its committed bar for the
    // duration of the drag
    let mut tasks = outcome.visible.clone();
    if let Some(working) = app.gesture.drag_preview() {
        if let Some(slot) = tasks.iter_mut().find(|t| t.id == working.id) {
            *slot = working.clone();
        } else {
            tasks.push(working.clone());
        }
    }
    tasks.sort_by_key(|t| (t.start_date, t.id));

    let selection = app.gesture.selection_bounds();

    for week in 0..weeks as usize {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, 7); 7])
            .split(rows[week + 1]);
        for col in 0..7 {
            let day = days[week * 7 + col];
            render_day_cell(frame, app, &tasks, selection, day, cols[col]);
        }
    }
}

fn render_weekday_header(frame: &mut Frame, app: &App, week: &[NaiveDate], area: Rect) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 7); 7])
        .split(area);
    let style = Style::default()
        .fg(app.theme.dim)
        .bg(app.theme.background)
        .add_modifier(Modifier::BOLD);
    for (i, day) in week.iter().enumerate() {
        let label = format!(" {}", day.format("%a"));
        frame.render_widget(Paragraph::new(Span::styled(label, style)), cols[i]);
    }
}

fn render_day_cell(
    frame: &mut Frame,
    app: &mut App,
    tasks: &[Task],
    selection: Option<(NaiveDate, NaiveDate)>,
    day: NaiveDate,
    area: Rect,
) {
    if area.width == 0 || area.height == 0 {
        return;
    }

    // The cell itself is the bottom layer; bars register after it and win
    // the reverse hit scan
    app.hits.push(HitRegion {
        rect: area,
        target: HitTarget::DayCell(day),
    });

    let bg = app.theme.background;
    let in_month = day.month() == app.focus.month() && day.year() == app.focus.year();
    let selected = selection.is_some_and(|(start, end)| start <= day && day <= end);

    if selected {
        frame.render_widget(
            Block::default().style(Style::default().bg(app.theme.selection_bg)),
            area,
        );
    }
    let cell_bg = if selected { app.theme.selection_bg } else { bg };

    let num_style = if day == app.today {
        Style::default()
            .fg(app.theme.today)
            .bg(cell_bg)
            .add_modifier(Modifier::BOLD)
    } else if in_month {
        Style::default().fg(app.theme.text).bg(cell_bg)
    } else {
        Style::default().fg(app.theme.dim).bg(cell_bg)
    };
    let number_area = Rect::new(area.x, area.y, area.width, 1);
    frame.render_widget(
        Paragraph::new(Span::styled(format!(" {:>2}", day.day()), num_style)),
        number_area,
    );

    // Bar lanes below the day number
    let lanes = area.height.saturating_sub(1) as usize;
    if lanes == 0 {
        return;
    }
    let occupying: Vec<&Task> = tasks.iter().filter(|t| t.occupies(day)).collect();
    let shown = if occupying.len() > lanes {
        lanes.saturating_sub(1)
    } else {
        occupying.len()
    };

    for (lane, task) in occupying.iter().take(shown).enumerate() {
        let bar_area = Rect::new(area.x, area.y + 1 + lane as u16, area.width, 1);
        render_task_bar(frame, app, task, day, bar_area);
    }

    let hidden = occupying.len() - shown;
    if hidden > 0 {
        let overflow_area = Rect::new(area.x, area.y + area.height - 1, area.width, 1);
        frame.render_widget(
            Paragraph::new(Span::styled(
                format!(" +{hidden} more"),
                Style::default().fg(app.theme.dim).bg(cell_bg),
            )),
            overflow_area,
        );
    }
}

fn render_task_bar(frame: &mut Frame, app: &mut App, task: &Task, day: NaiveDate, area: Rect) {
    let is_start = day == task.start_date;
    let is_end = day == task.end_date;
    let edges = task.is_multi_day() && area.width >= 3;

    app.hits.push(HitRegion {
        rect: area,
        target: HitTarget::TaskBar {
            id: task.id,
            date: day,
            region: GrabRegion::Body,
        },
    });
    // One-column resize handles on the first and last segment of a
    // multi-day bar, registered after the body so they take precedence
    if edges && is_start {
        app.hits.push(HitRegion {
            rect: Rect::new(area.x, area.y, 1, 1),
            target: HitTarget::TaskBar {
                id: task.id,
                date: day,
                region: GrabRegion::StartEdge,
            },
        });
    }
    if edges && is_end {
        app.hits.push(HitRegion {
            rect: Rect::new(area.x + area.width - 1, area.y, 1, 1),
            target: HitTarget::TaskBar {
                id: task.id,
                date: day,
                region: GrabRegion::EndEdge,
            },
        });
    }

    let color = app.theme.category_color(task.category);
    let mut style = Style::default().fg(app.theme.background).bg(color);
    if app.selected == Some(task.id) {
        style = style.add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
    }

    let width = area.width as usize;
    let mut label = String::new();
    label.push(if edges && is_start { '<' } else { ' ' });
    let body_width = width.saturating_sub(2);
    let body = if is_start {
        unicode::truncate_to_width(&task.name, body_width)
    } else {
        "\u{2026}".to_string()
    };
    label.push_str(&body);
    // Pad out to the full segment so the bar reads as one block
    let pad = width
        .saturating_sub(unicode::display_width(&label))
        .saturating_sub(1);
    label.push_str(&" ".repeat(pad));
    label.push(if edges && is_end { '>' } else { ' ' });

    frame.render_widget(Paragraph::new(Span::styled(label, style)), area);
}
