use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::app::{App, FormField, FormTarget};

/// Render the task create/edit popup
pub fn render_form_popup(frame: &mut Frame, app: &App, area: Rect) {
    let Some(form) = &app.form else {
        return;
    };

    let popup_w: u16 = 46.min(area.width.saturating_sub(2));
    let popup_h: u16 = 11.min(area.height.saturating_sub(2));
    let overlay_area = centered_rect_fixed(popup_w, popup_h, area);
    frame.render_widget(Clear, overlay_area);

    let bg = app.theme.background;
    let text_style = Style::default().fg(app.theme.text).bg(bg);
    let bright_style = Style::default().fg(app.theme.text_bright).bg(bg);
    let dim_style = Style::default().fg(app.theme.dim).bg(bg);
    let header_style = Style::default()
        .fg(app.theme.highlight)
        .bg(bg)
        .add_modifier(Modifier::BOLD);

    let (title, dates) = match form.target {
        FormTarget::Create { start, end } => (" New Task", Some((start, end))),
        FormTarget::Edit { id } => (
            " Edit Task",
            app.store.get(id).map(|t| (t.start_date, t.end_date)),
        ),
    };

    let mut lines: Vec<Line> = Vec::new();
    lines.push(Line::from(Span::styled(title, header_style)));
    lines.push(Line::from(""));

    let cursor = Span::styled("\u{258C}", Style::default().fg(app.theme.highlight).bg(bg));

    let mut name_spans = vec![
        Span::styled(" Name: ", text_style),
        Span::styled(form.name.clone(), bright_style),
    ];
    if form.field == FormField::Name {
        name_spans.push(cursor.clone());
    }
    lines.push(Line::from(name_spans));

    let mut desc_spans = vec![
        Span::styled(" Notes: ", text_style),
        Span::styled(form.description.clone(), bright_style),
    ];
    if form.field == FormField::Description {
        desc_spans.push(cursor);
    }
    lines.push(Line::from(desc_spans));

    lines.push(Line::from(vec![
        Span::styled(" Category: ", text_style),
        Span::styled(
            form.category.label(),
            Style::default()
                .fg(app.theme.category_color(form.category))
                .bg(bg),
        ),
        Span::styled("  (\u{2190}/\u{2192} to change)", dim_style),
    ]));

    if let Some((start, end)) = dates {
        let days = (end - start).num_days() + 1;
        let unit = if days == 1 { "day" } else { "days" };
        lines.push(Line::from(Span::styled(
            format!(
                " Dates: {} \u{2013} {} ({days} {unit})",
                start.format("%b %-d"),
                end.format("%b %-d")
            ),
            text_style,
        )));
    }

    if let Some(error) = &form.error {
        lines.push(Line::from(Span::styled(
            format!(" {error}"),
            Style::default().fg(app.theme.error).bg(bg),
        )));
    } else {
        lines.push(Line::from(""));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        " Enter save   Tab next field   Esc cancel",
        dim_style,
    )));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.highlight).bg(bg))
        .style(Style::default().bg(bg));
    let paragraph = Paragraph::new(lines)
        .block(block)
        .style(Style::default().bg(bg));
    frame.render_widget(paragraph, overlay_area);
}

fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width, height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::app::{FormState, Mode};
    use crate::tui::render::test_helpers::*;

    #[test]
    fn test_create_form_shows_range() {
        let mut app = app_with_demo_tasks();
        app.form = Some(FormState::create(date(2024, 6, 10), date(2024, 6, 12)));
        app.mode = Mode::TaskForm;

        let output = render_to_string(TERM_W, TERM_H, |frame, area| {
            render_form_popup(frame, &app, area);
        });
        assert!(output.contains("New Task"));
        assert!(output.contains("Jun 10"));
        assert!(output.contains("3 days"));
    }

    #[test]
    fn test_edit_form_shows_existing_description() {
        let mut app = app_with_demo_tasks();
        let task = app.store.get(1).cloned().unwrap();
        app.form = Some(FormState::edit(&task));
        app.mode = Mode::TaskForm;

        let output = render_to_string(TERM_W, TERM_H, |frame, area| {
            render_form_popup(frame, &app, area);
        });
        assert!(output.contains("Edit Task"));
        assert!(output.contains("Quarterly report"));
        assert!(output.contains("Numbers from finance due first"));
    }

    #[test]
    fn test_form_error_is_shown() {
        let mut app = app_with_demo_tasks();
        let mut form = FormState::create(date(2024, 6, 10), date(2024, 6, 10));
        form.error = Some("task name cannot be empty".into());
        app.form = Some(form);
        app.mode = Mode::TaskForm;

        let output = render_to_string(TERM_W, TERM_H, |frame, area| {
            render_form_popup(frame, &app, area);
        });
        assert!(output.contains("task name cannot be empty"));
    }
}
