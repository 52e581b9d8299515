use std::io;
use std::time::{Duration, Instant};

use chrono::{Days, Local, NaiveDate};
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Position, Rect};

use crate::model::config::PlannerConfig;
use crate::model::filter::FilterCriteria;
use crate::model::task::{Task, TaskCategory, TaskDraft, TaskId};
use crate::ops::filter::{self, FilterOutcome};
use crate::ops::gesture::{GestureMachine, GrabRegion};
use crate::ops::store::TaskStore;

use super::input;
use super::render;
use super::theme::Theme;

/// Two presses on the same task bar within this window count as a double-click
pub const DOUBLE_CLICK_WINDOW: Duration = Duration::from_millis(400);

/// Current interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Navigate,
    /// Incremental search query entry (edits the filter live)
    Search,
    /// Create/edit popup opened by a range selection or a double-click
    TaskForm,
    /// Pending delete, waiting for y/n
    ConfirmDelete,
}

/// What the task form will do on submit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormTarget {
    Create { start: NaiveDate, end: NaiveDate },
    Edit { id: TaskId },
}

/// Which text input of the task form has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Description,
}

/// State of the task form popup
#[derive(Debug, Clone)]
pub struct FormState {
    pub target: FormTarget,
    pub name: String,
    pub description: String,
    pub category: TaskCategory,
    /// Input receiving keystrokes; Tab toggles
    pub field: FormField,
    /// Validation message shown inside the popup (form stays open)
    pub error: Option<String>,
}

impl FormState {
    pub fn create(start: NaiveDate, end: NaiveDate) -> Self {
        FormState {
            target: FormTarget::Create { start, end },
            name: String::new(),
            description: String::new(),
            category: TaskCategory::Todo,
            field: FormField::Name,
            error: None,
        }
    }

    pub fn edit(task: &Task) -> Self {
        FormState {
            target: FormTarget::Edit { id: task.id },
            name: task.name.clone(),
            description: task.description.clone().unwrap_or_default(),
            category: task.category,
            field: FormField::Name,
            error: None,
        }
    }
}

/// What a screen position maps to, registered by the render pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    /// Empty grid space for this day
    DayCell(NaiveDate),
    /// A task bar segment; `region` is Body except on the one-column resize
    /// edges of multi-day bars
    TaskBar {
        id: TaskId,
        date: NaiveDate,
        region: GrabRegion,
    },
}

#[derive(Debug, Clone, Copy)]
pub struct HitRegion {
    pub rect: Rect,
    pub target: HitTarget,
}

/// A pointer press being tracked for click-vs-drag disambiguation
#[derive(Debug, Clone, Copy)]
pub struct PressState {
    pub date: NaiveDate,
    pub task: Option<TaskId>,
    /// Set once the pointer crosses into a different cell
    pub moved: bool,
}

/// Main application state
pub struct App {
    pub config: PlannerConfig,
    pub theme: Theme,
    pub store: TaskStore,
    pub criteria: FilterCriteria,
    pub gesture: GestureMachine,
    pub mode: Mode,
    /// Any date inside the month being displayed
    pub focus: NaiveDate,
    pub today: NaiveDate,
    pub selected: Option<TaskId>,
    pub form: Option<FormState>,
    pub pending_delete: Option<TaskId>,
    /// Transient status-row message
    pub message: Option<String>,
    pub show_help: bool,
    pub should_quit: bool,
    /// Hit regions registered by the last render, in paint order
    pub hits: Vec<HitRegion>,
    pub press: Option<PressState>,
    pub last_click: Option<(TaskId, Instant)>,
}

impl App {
    pub fn new(config: PlannerConfig) -> Self {
        let theme = Theme::from_config(&config.ui);
        let today = Local::now().date_naive();
        App {
            config,
            theme,
            store: TaskStore::new(),
            criteria: FilterCriteria::default(),
            gesture: GestureMachine::new(),
            mode: Mode::Navigate,
            focus: today,
            today,
            selected: None,
            form: None,
            pending_delete: None,
            message: None,
            show_help: false,
            should_quit: false,
            hits: Vec::new(),
            press: None,
            last_click: None,
        }
    }

    /// Run the filter engine over the current store
    pub fn filter_outcome(&self) -> FilterOutcome {
        filter::apply(&self.store.tasks(), &self.criteria, self.today)
    }

    /// The selected task, if it still exists
    pub fn selected_task(&self) -> Option<&Task> {
        self.selected.and_then(|id| self.store.get(id))
    }

    /// Map a screen position to the topmost registered hit region.
    /// Bars are registered after their cell and edges after the body, so the
    /// reverse scan gives bar-over-cell and edge-over-body precedence.
    pub fn hit_at(&self, column: u16, row: u16) -> Option<HitTarget> {
        let pos = Position::new(column, row);
        self.hits
            .iter()
            .rev()
            .find(|hit| hit.rect.contains(pos))
            .map(|hit| hit.target)
    }

    /// The day a screen position falls on, regardless of what covers it
    pub fn date_at(&self, column: u16, row: u16) -> Option<NaiveDate> {
        self.hit_at(column, row).map(|target| match target {
            HitTarget::DayCell(date) => date,
            HitTarget::TaskBar { date, .. } => date,
        })
    }

    /// Seed a handful of tasks around today (`--demo`)
    pub fn seed_demo(&mut self) {
        let today = self.today;
        let drafts = [
            ("Draft quarterly report", TaskCategory::Todo, -2i64, 2i64, Some("Numbers from finance due first")),
            ("Review design doc", TaskCategory::Review, 1, 1, None),
            ("Implement drag scheduling", TaskCategory::InProgress, 0, 4, None),
            ("Team offsite", TaskCategory::Todo, 8, 9, Some("Book the venue")),
            ("Ship v0.1", TaskCategory::Completed, -7, -7, None),
        ];
        for (name, category, start_off, end_off, description) in drafts {
            let draft = TaskDraft {
                name: name.to_string(),
                category,
                start_date: offset_days(today, start_off),
                end_date: offset_days(today, end_off),
                description: description.map(String::from),
            };
            // Drafts above are statically valid
            let _ = self.store.create(draft);
        }
    }
}

fn offset_days(date: NaiveDate, days: i64) -> NaiveDate {
    let shifted = if days >= 0 {
        date.checked_add_days(Days::new(days as u64))
    } else {
        date.checked_sub_days(Days::new((-days) as u64))
    };
    shifted.unwrap_or(date)
}

/// Run the TUI application
pub fn run(config: PlannerConfig, demo: bool) -> Result<(), Box<dyn std::error::Error>> {
    let mut app = App::new(config);
    if demo {
        app.seed_demo();
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), DisableMouseCapture, LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), DisableMouseCapture, LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        app.today = Local::now().date_naive();
        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(Duration::from_millis(250))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    input::handle_key(app, key);
                }
                Event::Mouse(mouse) => {
                    input::handle_mouse(app, mouse);
                }
                // Losing focus is our pointer-leave: a drag released outside
                // the terminal still commits
                Event::FocusLost => {
                    input::handle_pointer_leave(app);
                }
                _ => {}
            }
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
