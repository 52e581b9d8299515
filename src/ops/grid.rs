use chrono::{Datelike, Days, NaiveDate, Weekday};

/// Generate the calendar cell dates for the month containing `reference`:
/// every day from the first `week_start` on/before the 1st through the last
/// week-end on/after the month's final day. The result is always whole weeks
/// (length a multiple of 7).
pub fn month_grid(reference: NaiveDate, week_start: Weekday) -> Vec<NaiveDate> {
    let month_start = first_day_of_month(reference);
    let month_end = last_day_of_month(reference);

    let grid_start = start_of_week(month_start, week_start);
    let grid_end = end_of_week(month_end, week_start);

    let mut days = Vec::with_capacity(42);
    let mut day = grid_start;
    while day <= grid_end {
        days.push(day);
        day = day.succ_opt().unwrap_or(day);
    }
    days
}

/// First day of the month containing `date`
pub fn first_day_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Last day of the month containing `date`
pub fn last_day_of_month(date: NaiveDate) -> NaiveDate {
    let next_month = if date.month() == 12 {
        NaiveDate::from_ymd_opt(date.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(date.year(), date.month() + 1, 1)
    };
    next_month
        .and_then(|d| d.pred_opt())
        .unwrap_or(date)
}

/// The `week_start` day on or before `day`
pub fn start_of_week(day: NaiveDate, week_start: Weekday) -> NaiveDate {
    let day_idx = day.weekday().num_days_from_monday() as i64;
    let start_idx = week_start.num_days_from_monday() as i64;
    let diff = (7 + day_idx - start_idx) % 7;
    day.checked_sub_days(Days::new(diff as u64)).unwrap_or(day)
}

/// The last day of the week containing `day` (six days after its start)
pub fn end_of_week(day: NaiveDate, week_start: Weekday) -> NaiveDate {
    start_of_week(day, week_start)
        .checked_add_days(Days::new(6))
        .unwrap_or(day)
}

/// Shift `date` by whole months, clamping the day-of-month to what the
/// target month has (Jan 31 ± 1 month lands on the end of the month)
pub fn shift_months(date: NaiveDate, months: i32) -> NaiveDate {
    let mut year = date.year();
    let mut month = date.month() as i32 + months;
    while month < 1 {
        month += 12;
        year -= 1;
    }
    while month > 12 {
        month -= 12;
        year += 1;
    }
    let month = month as u32;
    let last = NaiveDate::from_ymd_opt(year, month, 1)
        .map(last_day_of_month)
        .map_or(28, |d| d.day());
    NaiveDate::from_ymd_opt(year, month, date.day().min(last)).unwrap_or(date)
}
