use chrono::{Datelike, NaiveDate};

pub const WEEKDAY_LETTERS: [&str; 7] = ["D", "L", "M", "X", "J", "V", "S"];

pub const MONTH_NAMES: [&str; 12] = [
    "Enero",
    "Febrero",
    "Marzo",
    "Abril",
    "Mayo",
    "Junio",
    "Julio",
    "Agosto",
    "Septiembre",
    "Octubre",
    "Noviembre",
    "Diciembre",
];

/// `day` is the preferred day-of-month and may exceed the current month's
/// length after year navigation; anything shown or written out uses
/// `effective_day`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarCursor {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl CalendarCursor {
    pub fn new(year: i32, month: u32, day: u32) -> Self {
        Self {
            year,
            month: month.clamp(1, 12),
            day: day.clamp(1, 31),
        }
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
            day: date.day(),
        }
    }

    /// The day field may be omitted and defaults to 1; `None` for
    /// anything that does not name a real calendar date.
    pub fn parse(text: &str) -> Option<Self> {
        let parts: Vec<&str> = text.trim().split('-').collect();
        if parts.len() != 2 && parts.len() != 3 {
            return None;
        }
        let year: i32 = parts[0].parse().ok()?;
        let month: u32 = parts[1].parse().ok()?;
        let day: u32 = match parts.get(2) {
            Some(raw) => raw.parse().ok()?,
            None => 1,
        };
        NaiveDate::from_ymd_opt(year, month, day)?;
        Some(Self { year, month, day })
    }

    pub fn effective_day(&self) -> u32 {
        self.day.min(days_in_month(self.year, self.month))
    }

    pub fn formatted(&self) -> String {
        format!("{}-{:02}-{:02}", self.year, self.month, self.effective_day())
    }
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month >= 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first| first.pred_opt())
        .map_or(31, |last| last.day())
}

pub fn weekday_offset(year: i32, month: u32) -> u32 {
    NaiveDate::from_ymd_opt(year, month, 1).map_or(0, |first| first.weekday().num_days_from_sunday())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayCell {
    pub day: u32,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarGrid {
    pub year: i32,
    pub month: u32,
    pub leading_blanks: u32,
    pub days: Vec<DayCell>,
}

pub fn month_grid(year: i32, month: u32, active_day: Option<u32>) -> CalendarGrid {
    let last = days_in_month(year, month);
    let days = (1..=last)
        .map(|day| DayCell {
            day,
            active: active_day == Some(day),
        })
        .collect();
    CalendarGrid {
        year,
        month,
        leading_blanks: weekday_offset(year, month),
        days,
    }
}
