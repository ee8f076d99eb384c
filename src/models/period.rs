//! Budget period representation
//!
//! A [`BudgetPeriod`] is the unit every assignment and balance is scoped to.
//! Its [`PeriodSpan`] supports monthly, weekly, and custom date ranges.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::BudgetPeriodId;
use super::money::Money;

/// The date range covered by a budget period
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum PeriodSpan {
    /// Monthly period (e.g., "2025-01")
    Monthly { year: i32, month: u32 },

    /// ISO week period (e.g., "2025-W03")
    Weekly { year: i32, week: u32 },

    /// Custom date range, both ends inclusive
    Custom { start: NaiveDate, end: NaiveDate },
}

impl PeriodSpan {
    /// Create a monthly span
    pub fn monthly(year: i32, month: u32) -> Self {
        Self::Monthly { year, month }
    }

    /// Create a weekly span (ISO week)
    pub fn weekly(year: i32, week: u32) -> Self {
        Self::Weekly { year, week }
    }

    /// Create a custom span
    pub fn custom(start: NaiveDate, end: NaiveDate) -> Self {
        Self::Custom { start, end }
    }

    /// Get the start date of this span
    ///
    /// Spans chrono cannot represent report `NaiveDate::MIN`; `parse`
    /// never produces one.
    pub fn start_date(&self) -> NaiveDate {
        self.bounds().map(|(start, _)| start).unwrap_or(NaiveDate::MIN)
    }

    /// Get the end date of this span (inclusive)
    pub fn end_date(&self) -> NaiveDate {
        self.bounds().map(|(_, end)| end).unwrap_or(NaiveDate::MIN)
    }

    /// First and last day, if both are representable
    fn bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        match self {
            Self::Monthly { year, month } => {
                let start = NaiveDate::from_ymd_opt(*year, *month, 1)?;
                let (next_year, next_month) = if *month >= 12 {
                    (year.checked_add(1)?, 1)
                } else {
                    (*year, *month + 1)
                };
                let end = NaiveDate::from_ymd_opt(next_year, next_month, 1)?.pred_opt()?;
                Some((start, end))
            }
            Self::Weekly { year, week } => {
                let start = NaiveDate::from_isoywd_opt(*year, *week, Weekday::Mon)?;
                Some((start, start.checked_add_signed(Duration::days(6))?))
            }
            Self::Custom { start, end } => Some((*start, *end)),
        }
    }

    /// Check if a date falls within this span
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start_date() && date <= self.end_date()
    }

    /// Get the following span of the same shape
    pub fn next(&self) -> Self {
        match self {
            Self::Monthly { year, month } => {
                if *month >= 12 {
                    Self::monthly(year.saturating_add(1), 1)
                } else {
                    Self::monthly(*year, *month + 1)
                }
            }
            Self::Weekly { year, week } => {
                if *week >= iso_weeks_in(*year) {
                    Self::weekly(year.saturating_add(1), 1)
                } else {
                    Self::weekly(*year, *week + 1)
                }
            }
            Self::Custom { start, end } => {
                let length = *end - *start;
                let next_start = end.succ_opt().unwrap_or(NaiveDate::MAX);
                Self::Custom {
                    start: next_start,
                    end: next_start
                        .checked_add_signed(length)
                        .unwrap_or(NaiveDate::MAX),
                }
            }
        }
    }

    /// Get the preceding span of the same shape
    pub fn prev(&self) -> Self {
        match self {
            Self::Monthly { year, month } => {
                if *month <= 1 {
                    Self::monthly(year.saturating_sub(1), 12)
                } else {
                    Self::monthly(*year, *month - 1)
                }
            }
            Self::Weekly { year, week } => {
                if *week <= 1 {
                    let year = year.saturating_sub(1);
                    Self::weekly(year, iso_weeks_in(year))
                } else {
                    Self::weekly(*year, *week - 1)
                }
            }
            Self::Custom { start, end } => {
                let length = *end - *start;
                let prev_end = start.pred_opt().unwrap_or(NaiveDate::MIN);
                Self::Custom {
                    start: prev_end
                        .checked_sub_signed(length)
                        .unwrap_or(NaiveDate::MIN),
                    end: prev_end,
                }
            }
        }
    }

    /// Parse a span string
    ///
    /// Formats:
    /// - Monthly: "2025-01"
    /// - Weekly: "2025-W03"
    /// - Custom: "2025-01-01..2025-01-15"
    pub fn parse(s: &str) -> Result<Self, PeriodParseError> {
        let span = Self::parse_unchecked(s)?;
        if span.bounds().is_none() {
            return Err(PeriodParseError::InvalidFormat(s.trim().to_string()));
        }
        Ok(span)
    }

    fn parse_unchecked(s: &str) -> Result<Self, PeriodParseError> {
        let s = s.trim();
        let invalid = || PeriodParseError::InvalidFormat(s.to_string());

        if let Some((year, week)) = s.split_once("-W") {
            let year: i32 = year.parse().map_err(|_| invalid())?;
            let week: u32 = week.parse().map_err(|_| invalid())?;
            if week == 0 || week > iso_weeks_in(year) {
                return Err(PeriodParseError::InvalidWeek(week));
            }
            return Ok(Self::Weekly { year, week });
        }

        if let Some((start, end)) = s.split_once("..") {
            let start = NaiveDate::parse_from_str(start, "%Y-%m-%d").map_err(|_| invalid())?;
            let end = NaiveDate::parse_from_str(end, "%Y-%m-%d").map_err(|_| invalid())?;
            if end < start {
                return Err(PeriodParseError::EndBeforeStart);
            }
            return Ok(Self::Custom { start, end });
        }

        let (year, month) = s.split_once('-').ok_or_else(invalid)?;
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        if !(1..=12).contains(&month) {
            return Err(PeriodParseError::InvalidMonth(month));
        }

        Ok(Self::Monthly { year, month })
    }
}

fn iso_weeks_in(year: i32) -> u32 {
    // Dec 28 always falls in the last ISO week of its year
    NaiveDate::from_ymd_opt(year, 12, 28)
        .map(|d| d.iso_week().week())
        .unwrap_or(52)
}

impl fmt::Display for PeriodSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Monthly { year, month } => write!(f, "{:04}-{:02}", year, month),
            Self::Weekly { year, week } => write!(f, "{:04}-W{:02}", year, week),
            Self::Custom { start, end } => {
                write!(
                    f,
                    "{}..{}",
                    start.format("%Y-%m-%d"),
                    end.format("%Y-%m-%d")
                )
            }
        }
    }
}

impl Ord for PeriodSpan {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.start_date()
            .cmp(&other.start_date())
            .then_with(|| self.end_date().cmp(&other.end_date()))
    }
}

impl PartialOrd for PeriodSpan {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// A budget period: the span it covers plus the income expected in it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetPeriod {
    /// Unique identifier
    pub id: BudgetPeriodId,

    /// Dates covered
    pub span: PeriodSpan,

    /// Income the user expects to receive during the period
    #[serde(default)]
    pub expected_income: Money,
}

impl BudgetPeriod {
    /// Create a period with no expected income
    pub fn new(span: PeriodSpan) -> Self {
        Self {
            id: BudgetPeriodId::new(),
            span,
            expected_income: Money::zero(),
        }
    }

    /// Set the expected income
    pub fn with_expected_income(mut self, amount: Money) -> Self {
        self.expected_income = amount;
        self
    }

    pub fn start_date(&self) -> NaiveDate {
        self.span.start_date()
    }

    pub fn end_date(&self) -> NaiveDate {
        self.span.end_date()
    }

    /// Check if a date falls within this period
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.span.contains(date)
    }
}

impl fmt::Display for BudgetPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.span)
    }
}

/// Error type for period parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PeriodParseError {
    InvalidFormat(String),
    InvalidMonth(u32),
    InvalidWeek(u32),
    EndBeforeStart,
}

impl fmt::Display for PeriodParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PeriodParseError::InvalidFormat(s) => write!(f, "Invalid period format: {}", s),
            PeriodParseError::InvalidMonth(m) => write!(f, "Invalid month: {}", m),
            PeriodParseError::InvalidWeek(w) => write!(f, "Invalid ISO week: {}", w),
            PeriodParseError::EndBeforeStart => write!(f, "Period ends before it starts"),
        }
    }
}

impl std::error::Error for PeriodParseError {}
