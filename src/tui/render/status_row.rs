use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::ops::gesture::DragMode;
use crate::tui::app::{App, Mode};

/// Render the status row (bottom of screen)
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    let line = match app.mode {
        Mode::Navigate => {
            if let Some(message) = &app.message {
                Line::from(Span::styled(
                    format!(" {message}"),
                    Style::default().fg(app.theme.error).bg(bg),
                ))
            } else if let Some(mode) = app.gesture.drag_mode() {
                let verb = match mode {
                    DragMode::Move => "moving task",
                    DragMode::ResizeStart => "resizing start",
                    DragMode::ResizeEnd => "resizing end",
                };
                Line::from(Span::styled(
                    format!(" {verb} \u{2014} release to apply"),
                    Style::default().fg(app.theme.highlight).bg(bg),
                ))
            } else if app.gesture.selection_bounds().is_some() {
                Line::from(Span::styled(
                    " selecting days \u{2014} release to create a task",
                    Style::default().fg(app.theme.highlight).bg(bg),
                ))
            } else {
                hint_line(app, width, "n new  e edit  x delete  / search  w window  c clear  ? help  q quit")
            }
        }
        Mode::Search => {
            let mut spans = vec![
                Span::styled(
                    format!("/{}", app.criteria.search_query),
                    Style::default().fg(app.theme.text_bright).bg(bg),
                ),
                Span::styled("\u{258C}", Style::default().fg(app.theme.highlight).bg(bg)),
            ];
            let hint = "Enter keep  Esc clear";
            let content_width: usize = spans.iter().map(|s| s.content.chars().count()).sum();
            let hint_width = hint.chars().count();
            if content_width + hint_width < width {
                let padding = width - content_width - hint_width;
                spans.push(Span::styled(" ".repeat(padding), Style::default().bg(bg)));
                spans.push(Span::styled(hint, Style::default().fg(app.theme.dim).bg(bg)));
            }
            Line::from(spans)
        }
        Mode::TaskForm => hint_line(
            app,
            width,
            "Enter save  Tab next field  \u{2190}/\u{2192} category  Esc cancel",
        ),
        Mode::ConfirmDelete => {
            let name = app
                .pending_delete
                .and_then(|id| app.store.get(id))
                .map(|t| t.name.as_str())
                .unwrap_or("task");
            Line::from(Span::styled(
                format!(" Delete \u{201c}{name}\u{201d}? y/n"),
                Style::default().fg(app.theme.error).bg(bg),
            ))
        }
    };

    let paragraph = Paragraph::new(line).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

fn hint_line<'a>(app: &App, width: usize, hint: &'a str) -> Line<'a> {
    let bg = app.theme.background;
    let hint_width = hint.chars().count();
    let mut spans = Vec::new();
    if hint_width < width {
        spans.push(Span::styled(
            " ".repeat(width - hint_width),
            Style::default().bg(bg),
        ));
    }
    spans.push(Span::styled(hint, Style::default().fg(app.theme.dim).bg(bg)));
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::render::test_helpers::*;

    #[test]
    fn test_search_prompt() {
        let mut app = app_with_demo_tasks();
        app.mode = Mode::Search;
        app.criteria.search_query = "plan".into();

        let output = render_to_string(TERM_W, 1, |frame, area| {
            render_status_row(frame, &app, area);
        });
        assert!(output.starts_with("/plan"));
        assert!(output.contains("Esc clear"));
    }

    #[test]
    fn test_confirm_prompt_names_task() {
        let mut app = app_with_demo_tasks();
        let id = app.store.iter().next().map(|t| t.id);
        app.pending_delete = id;
        app.mode = Mode::ConfirmDelete;

        let output = render_to_string(TERM_W, 1, |frame, area| {
            render_status_row(frame, &app, area);
        });
        assert!(output.contains("Quarterly report"));
        assert!(output.contains("y/n"));
    }

    #[test]
    fn test_message_shown_in_navigate() {
        let mut app = app_with_demo_tasks();
        app.message = Some("task 99 no longer exists".into());

        let output = render_to_string(TERM_W, 1, |frame, area| {
            render_status_row(frame, &app, area);
        });
        assert!(output.contains("task 99 no longer exists"));
    }
}
