use chrono::NaiveDate;
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;

use crate::model::config::PlannerConfig;
use crate::model::task::{TaskCategory, TaskDraft};
use crate::tui::app::App;

pub const TERM_W: u16 = 80;
pub const TERM_H: u16 = 24;

/// Render into an in-memory buffer and return plain text (no styles).
pub fn render_to_string<F>(w: u16, h: u16, f: F) -> String
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    let backend = TestBackend::new(w, h);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            f(frame, area);
        })
        .unwrap();

    let buf = terminal.backend().buffer().clone();
    let w = buf.area.width as usize;
    let lines: Vec<String> = buf
        .content
        .chunks(w)
        .map(|row| {
            let s: String = row.iter().map(|cell| cell.symbol()).collect();
            s.trim_end().to_string()
        })
        .collect();

    // Trim trailing blank lines
    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(0, |i| i + 1);
    lines[..end].join("\n")
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// An app pinned to June 2024 so grid layout and window math are stable.
pub fn fixed_app() -> App {
    let mut app = App::new(PlannerConfig::default());
    app.today = date(2024, 6, 15);
    app.focus = app.today;
    app
}

fn draft(
    name: &str,
    category: TaskCategory,
    start: NaiveDate,
    end: NaiveDate,
    description: Option<&str>,
) -> TaskDraft {
    TaskDraft {
        name: name.to_string(),
        category,
        start_date: start,
        end_date: end,
        description: description.map(String::from),
    }
}

/// Three tasks around the pinned today (2024-06-15): one multi-day in the
/// current week, one single-day later in June, one in July.
pub fn app_with_demo_tasks() -> App {
    let mut app = fixed_app();
    let drafts = [
        draft(
            "Quarterly report",
            TaskCategory::Todo,
            date(2024, 6, 10),
            date(2024, 6, 14),
            Some("Numbers from finance due first"),
        ),
        draft(
            "Design review",
            TaskCategory::Review,
            date(2024, 6, 20),
            date(2024, 6, 20),
            None,
        ),
        draft(
            "Offsite planning",
            TaskCategory::Todo,
            date(2024, 7, 10),
            date(2024, 7, 11),
            None,
        ),
    ];
    for d in drafts {
        app.store.create(d).unwrap();
    }
    app
}
