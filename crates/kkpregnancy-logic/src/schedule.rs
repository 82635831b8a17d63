//! Menstruation schedule variants and their fixed day tables.
//!
//! Each variant maps to a 15-entry table indexed by day-of-cycle, where `0`
//! is a safe day and `1` is a risky day. The `Default` variant delegates to
//! the host calendar's own table, which is handed in at construction time.
//!
//! Every table keeps at least one entry of each kind. Host code that wants a
//! specific day type re-rolls the cycle day until it matches, so a table made
//! of a single kind would never terminate.

use serde::{Deserialize, Serialize};

use crate::constants::CYCLE_DAYS;

/// One menstruation cycle, indexed by day. `0` = safe, `1` = risky.
pub type DayTable = [u8; CYCLE_DAYS];

/// Selectable policy for a character's conception-risk calendar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MenstruationSchedule {
    /// Use the host calendar's stock table.
    #[default]
    Default,
    MostlyRisky,
    AlwaysSafe,
    AlwaysRisky,
}

impl MenstruationSchedule {
    pub const ALL: [MenstruationSchedule; 4] = [
        Self::Default,
        Self::MostlyRisky,
        Self::AlwaysSafe,
        Self::AlwaysRisky,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Default => "Default",
            Self::MostlyRisky => "Mostly risky",
            Self::AlwaysSafe => "Always safe",
            Self::AlwaysRisky => "Always risky",
        }
    }
}

/// Binary classification of a calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DayKind {
    Safe,
    Risky,
}

impl DayKind {
    pub fn from_table_value(value: u8) -> Self {
        if value == 0 {
            Self::Safe
        } else {
            Self::Risky
        }
    }

    pub fn table_value(self) -> u8 {
        match self {
            Self::Safe => 0,
            Self::Risky => 1,
        }
    }
}

/// Stock host calendar table, used when no host-specific table is supplied.
pub const DEFAULT_HOST_TABLE: DayTable = [0, 0, 0, 0, 0, 1, 1, 1, 1, 1, 0, 0, 0, 0, 0];

const MOSTLY_RISKY_TABLE: DayTable = [0, 0, 0, 0, 1, 1, 1, 1, 1, 1, 1, 1, 1, 0, 0];

// One risky day kept so "set to risky" can still find a match.
const ALWAYS_SAFE_TABLE: DayTable = [0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0];

// One safe day kept so "set to safe" can still find a match.
const ALWAYS_RISKY_TABLE: DayTable = [0, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1];

/// Whether a table only holds 0/1 values and contains at least one of each.
pub fn is_valid_table(table: &DayTable) -> bool {
    table.iter().all(|&v| v <= 1) && table.contains(&0) && table.contains(&1)
}

/// Schedule construction error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    /// Host default table is missing a safe or risky day, or holds values other than 0/1.
    InvalidDefaultTable(DayTable),
}

impl std::fmt::Display for ScheduleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScheduleError::InvalidDefaultTable(table) => write!(
                f,
                "host default table {:?} must contain both safe (0) and risky (1) days",
                table
            ),
        }
    }
}

impl std::error::Error for ScheduleError {}

/// Resolves a schedule variant to its day table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleTables {
    default_table: DayTable,
}

impl ScheduleTables {
    /// Build a resolver around the host calendar's default table.
    pub fn new(default_table: DayTable) -> Result<Self, ScheduleError> {
        if !is_valid_table(&default_table) {
            return Err(ScheduleError::InvalidDefaultTable(default_table));
        }
        Ok(Self { default_table })
    }

    pub fn resolve(&self, schedule: MenstruationSchedule) -> &DayTable {
        match schedule {
            MenstruationSchedule::Default => &self.default_table,
            MenstruationSchedule::MostlyRisky => &MOSTLY_RISKY_TABLE,
            MenstruationSchedule::AlwaysSafe => &ALWAYS_SAFE_TABLE,
            MenstruationSchedule::AlwaysRisky => &ALWAYS_RISKY_TABLE,
        }
    }

    /// Day type for a cycle day. Days past the cycle length wrap around.
    pub fn day_kind(&self, schedule: MenstruationSchedule, day: usize) -> DayKind {
        DayKind::from_table_value(self.resolve(schedule)[day % CYCLE_DAYS])
    }

    /// All cycle days of the given kind, in ascending order.
    ///
    /// Never empty: construction rejects default tables lacking either kind,
    /// and the fixed tables each keep one dissenting day.
    pub fn days_of_kind(&self, schedule: MenstruationSchedule, kind: DayKind) -> Vec<usize> {
        self.resolve(schedule)
            .iter()
            .enumerate()
            .filter(|(_, v)| DayKind::from_table_value(**v) == kind)
            .map(|(day, _)| day)
            .collect()
    }
}

impl Default for ScheduleTables {
    fn default() -> Self {
        Self {
            default_table: DEFAULT_HOST_TABLE,
        }
    }
}
