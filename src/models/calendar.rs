//! Calendar template models.
//!
//! A calendar template describes the shape of a school day: which
//! periods exist, in what order, and which of them can host a lesson.
//!
//! # Day Tags
//! Each slot is either pinned to one weekday or tagged `ALL`, meaning it
//! repeats on every working day. Expansion into concrete per-day lists
//! happens in [`WeekSlots::expand`](crate::scheduler::WeekSlots::expand).
//!
//! # Blocks
//! Only [`BlockKind::Class`] slots are assignable. Breaks, prayer and
//! other blocks are kept in the template for display purposes only.
//!
//! # Time Model
//! Start and end times are minutes since midnight.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::TimetableError;

/// A day of the week, written as a three-letter tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Weekday {
    /// Sunday.
    Sun,
    /// Monday.
    Mon,
    /// Tuesday.
    Tue,
    /// Wednesday.
    Wed,
    /// Thursday.
    Thu,
    /// Friday.
    Fri,
    /// Saturday.
    Sat,
}

impl Weekday {
    /// All seven days, Sunday first.
    pub const ALL: [Weekday; 7] = [
        Weekday::Sun,
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
    ];

    /// Three-letter tag (`"Sun"`, `"Mon"`, ...).
    pub fn as_str(&self) -> &'static str {
        match self {
            Weekday::Sun => "Sun",
            Weekday::Mon => "Mon",
            Weekday::Tue => "Tue",
            Weekday::Wed => "Wed",
            Weekday::Thu => "Thu",
            Weekday::Fri => "Fri",
            Weekday::Sat => "Sat",
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Weekday {
    type Err = TimetableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim();
        Weekday::ALL
            .iter()
            .copied()
            .find(|d| d.as_str().eq_ignore_ascii_case(tag))
            .ok_or_else(|| TimetableError::InvalidDay(s.to_string()))
    }
}

/// Day selector of a calendar slot.
///
/// Serialized as `"ALL"` or a weekday tag, matching how templates are
/// stored by the calendar editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum DayTag {
    /// Repeats on every working day.
    All,
    /// Applies to one weekday only.
    On(Weekday),
}

impl DayTag {
    /// Whether this tag covers the given day.
    pub fn covers(&self, day: Weekday) -> bool {
        match self {
            DayTag::All => true,
            DayTag::On(d) => *d == day,
        }
    }
}

impl fmt::Display for DayTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DayTag::All => f.write_str("ALL"),
            DayTag::On(d) => d.fmt(f),
        }
    }
}

impl FromStr for DayTag {
    type Err = TimetableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(DayTag::All)
        } else {
            s.parse::<Weekday>().map(DayTag::On)
        }
    }
}

impl TryFrom<String> for DayTag {
    type Error = TimetableError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DayTag> for String {
    fn from(tag: DayTag) -> Self {
        tag.to_string()
    }
}

impl From<Weekday> for DayTag {
    fn from(day: Weekday) -> Self {
        DayTag::On(day)
    }
}

/// Kind of block a slot represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BlockKind {
    /// Teaching period. The only assignable kind.
    Class,
    /// Recess.
    Break,
    /// Prayer time.
    Prayer,
    /// Anything else (assembly, activities).
    Other,
}

impl FromStr for BlockKind {
    type Err = TimetableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "CLASS" => Ok(BlockKind::Class),
            "BREAK" => Ok(BlockKind::Break),
            "PRAYER" => Ok(BlockKind::Prayer),
            "OTHER" => Ok(BlockKind::Other),
            _ => Err(TimetableError::InvalidBlock(s.to_string())),
        }
    }
}

/// One slot definition inside a template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarSlot {
    /// Period label (e.g. `"1"`..`"7"`, `"BREAK"`).
    pub label: String,
    /// Day this slot applies to.
    pub day: DayTag,
    /// Block kind.
    pub block: BlockKind,
    /// Explicit ordering index within the day.
    pub order: u32,
    /// Start time (minutes since midnight).
    pub start_min: u16,
    /// End time (minutes since midnight).
    pub end_min: u16,
}

impl CalendarSlot {
    /// Creates a slot with zeroed times.
    pub fn new(label: impl Into<String>, day: DayTag, block: BlockKind, order: u32) -> Self {
        Self {
            label: label.into(),
            day,
            block,
            order,
            start_min: 0,
            end_min: 0,
        }
    }

    /// Creates a teaching slot.
    pub fn class(label: impl Into<String>, day: DayTag, order: u32) -> Self {
        Self::new(label, day, BlockKind::Class, order)
    }

    /// Sets start and end times (minutes since midnight).
    pub fn with_times(mut self, start_min: u16, end_min: u16) -> Self {
        self.start_min = start_min;
        self.end_min = end_min;
        self
    }

    /// Whether a lesson may be placed here.
    #[inline]
    pub fn is_assignable(&self) -> bool {
        self.block == BlockKind::Class
    }

    /// Slot length in minutes.
    #[inline]
    pub fn duration_min(&self) -> u16 {
        self.end_min.saturating_sub(self.start_min)
    }
}

/// A named calendar template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarTemplate {
    /// Template name (also its lookup id).
    pub name: String,
    /// Scope tag, e.g. `"ALL"` or a building wing.
    #[serde(default = "default_scope")]
    pub scope: String,
    /// Slot definitions in any order.
    pub slots: Vec<CalendarSlot>,
}

fn default_scope() -> String {
    "ALL".to_string()
}

impl CalendarTemplate {
    /// Creates an empty template.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            scope: default_scope(),
            slots: Vec::new(),
        }
    }

    /// Sets the scope tag.
    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = scope.into();
        self
    }

    /// Adds a slot definition.
    pub fn with_slot(mut self, slot: CalendarSlot) -> Self {
        self.slots.push(slot);
        self
    }

    /// The stock school day: seven teaching periods with a break after
    /// period 2 and prayer after period 4, defined once for all days.
    pub fn standard_week(name: impl Into<String>) -> Self {
        let rows: [(&str, BlockKind, (u16, u16), (u16, u16)); 9] = [
            ("1", BlockKind::Class, (7, 0), (7, 45)),
            ("2", BlockKind::Class, (7, 50), (8, 35)),
            ("BREAK", BlockKind::Break, (8, 35), (8, 50)),
            ("3", BlockKind::Class, (8, 50), (9, 35)),
            ("4", BlockKind::Class, (9, 40), (10, 25)),
            ("PRAYER", BlockKind::Prayer, (10, 25), (10, 45)),
            ("5", BlockKind::Class, (10, 50), (11, 35)),
            ("6", BlockKind::Class, (11, 40), (12, 25)),
            ("7", BlockKind::Class, (12, 30), (13, 15)),
        ];

        let mut template = Self::new(name);
        for (order, (label, block, start, end)) in rows.into_iter().enumerate() {
            template.slots.push(
                CalendarSlot::new(label, DayTag::All, block, order as u32 + 1)
                    .with_times(hm(start.0, start.1), hm(end.0, end.1)),
            );
        }
        template
    }

    /// Number of assignable slot definitions (before expansion).
    pub fn class_slot_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_assignable()).count()
    }
}

/// Minutes since midnight for `hour:minute`.
#[inline]
pub fn hm(hour: u16, minute: u16) -> u16 {
    hour * 60 + minute
}
