use chrono::{Days, NaiveDate};

use crate::model::task::{Task, TaskId};

/// Where on a task bar the pointer went down
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrabRegion {
    /// Bar body — drag moves the whole task
    Body,
    /// Left edge of a multi-day bar's first cell
    StartEdge,
    /// Right edge of a multi-day bar's last cell
    EndEdge,
}

/// Active drag variant for a grabbed task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragMode {
    Move,
    ResizeStart,
    ResizeEnd,
}

/// In-progress selection of a date range on empty grid cells.
///
/// `anchor` is where the pointer went down; `current` follows the pointer.
/// `bounds()` normalizes so start <= end regardless of drag direction.
#[derive(Debug, Clone, Copy)]
pub struct RangeSelection {
    pub anchor: NaiveDate,
    pub current: NaiveDate,
}

impl RangeSelection {
    pub fn bounds(&self) -> (NaiveDate, NaiveDate) {
        if self.anchor <= self.current {
            (self.anchor, self.current)
        } else {
            (self.current, self.anchor)
        }
    }
}

/// In-progress drag of an existing task.
///
/// `working` is a copy with tentative dates; the store's record is untouched
/// until the drag commits.
#[derive(Debug, Clone)]
pub struct TaskDrag {
    pub working: Task,
    pub mode: DragMode,
    /// Span in days at drag start; Move preserves it
    pub duration_days: i64,
    /// Days between the grabbed cell and the task's original start; Move
    /// derives the new start from the cursor's date with this offset
    pub grab_offset_days: i64,
}

/// The two gestures are mutually exclusive, so a single state enum holds
/// whichever is active
#[derive(Debug, Clone)]
enum Gesture {
    Idle,
    RangeSelecting(RangeSelection),
    TaskDragging(TaskDrag),
}

/// What a completed gesture produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GestureOutcome {
    /// A range was selected on empty cells; the host should offer task
    /// creation for it. A single-day click is a valid selection and emits.
    RangeSelected { start: NaiveDate, end: NaiveDate },
    /// A task drag finished; the host should patch the task's dates. A drag
    /// with zero net displacement commits the original dates (idempotent).
    TaskDragged {
        id: TaskId,
        start_date: NaiveDate,
        end_date: NaiveDate,
    },
}

/// Pointer-gesture state machine.
///
/// Driven by the host's pointer events: `press_*` on pointer-down,
/// `pointer_move` on every cell the pointer crosses, `release` on pointer-up
/// or when the pointer leaves the surface. Events that don't apply to the
/// current state are silent no-ops — never errors.
#[derive(Debug, Clone)]
pub struct GestureMachine {
    state: Gesture,
}

impl Default for GestureMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl GestureMachine {
    pub fn new() -> Self {
        GestureMachine {
            state: Gesture::Idle,
        }
    }

    /// Whether any gesture is in progress
    pub fn is_active(&self) -> bool {
        !matches!(self.state, Gesture::Idle)
    }

    /// Pointer-down on an empty grid cell: begin range selection with
    /// anchor = current = `date`. Ignored unless idle.
    pub fn press_cell(&mut self, date: NaiveDate) {
        if self.is_active() {
            return;
        }
        self.state = Gesture::RangeSelecting(RangeSelection {
            anchor: date,
            current: date,
        });
    }

    /// Pointer-down on a task bar: begin a drag of `task`. The region maps
    /// directly to the drag mode; the host only reports edge regions for
    /// multi-day bars. Ignored unless idle.
    pub fn press_task(&mut self, task: &Task, date: NaiveDate, region: GrabRegion) {
        if self.is_active() {
            return;
        }
        let mode = match region {
            GrabRegion::Body => DragMode::Move,
            GrabRegion::StartEdge => DragMode::ResizeStart,
            GrabRegion::EndEdge => DragMode::ResizeEnd,
        };
        self.state = Gesture::TaskDragging(TaskDrag {
            working: task.clone(),
            mode,
            duration_days: task.duration_days(),
            grab_offset_days: (date - task.start_date).num_days(),
        });
    }

    /// Pointer moved onto `date`. Updates the active gesture; no-op when
    /// idle. Only the latest position matters, so coalesced/throttled move
    /// streams are fine.
    pub fn pointer_move(&mut self, date: NaiveDate) {
        match &mut self.state {
            Gesture::Idle => {}
            Gesture::RangeSelecting(sel) => {
                sel.current = date;
            }
            Gesture::TaskDragging(drag) => match drag.mode {
                DragMode::Move => {
                    // New start follows the cursor, offset by where the bar
                    // was grabbed; span is preserved. No clamping — the host
                    // may clamp to its visible grid, the machine does not.
                    let start = add_days(date, -drag.grab_offset_days);
                    let end = add_days(start, drag.duration_days - 1);
                    drag.working.start_date = start;
                    drag.working.end_date = end;
                }
                DragMode::ResizeStart => {
                    // Never invert the range
                    if date <= drag.working.end_date {
                        drag.working.start_date = date;
                    }
                }
                DragMode::ResizeEnd => {
                    if date >= drag.working.start_date {
                        drag.working.end_date = date;
                    }
                }
            },
        }
    }

    /// Pointer released (or left the surface). Returns the gesture's outcome
    /// and resets to idle. `None` when no gesture was active.
    pub fn release(&mut self) -> Option<GestureOutcome> {
        let state = std::mem::replace(&mut self.state, Gesture::Idle);
        match state {
            Gesture::Idle => None,
            Gesture::RangeSelecting(sel) => {
                let (start, end) = sel.bounds();
                Some(GestureOutcome::RangeSelected { start, end })
            }
            Gesture::TaskDragging(drag) => Some(GestureOutcome::TaskDragged {
                id: drag.working.id,
                start_date: drag.working.start_date,
                end_date: drag.working.end_date,
            }),
        }
    }

    /// Normalized bounds of the in-progress range selection, if one is active
    pub fn selection_bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        match &self.state {
            Gesture::RangeSelecting(sel) => Some(sel.bounds()),
            _ => None,
        }
    }

    /// The working copy of the task being dragged, for the render layer to
    /// substitute in place of the committed record
    pub fn drag_preview(&self) -> Option<&Task> {
        match &self.state {
            Gesture::TaskDragging(drag) => Some(&drag.working),
            _ => None,
        }
    }

    /// Mode of the active task drag, if any
    pub fn drag_mode(&self) -> Option<DragMode> {
        match &self.state {
            Gesture::TaskDragging(drag) => Some(drag.mode),
            _ => None,
        }
    }
}

fn add_days(date: NaiveDate, days: i64) -> NaiveDate {
    let shifted = if days >= 0 {
        date.checked_add_days(Days::new(days as u64))
    } else {
        date.checked_sub_days(Days::new((-days) as u64))
    };
    shifted.unwrap_or(date)
}
