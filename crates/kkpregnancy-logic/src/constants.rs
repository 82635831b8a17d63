//! Game constants — pregnancy thresholds, cycle length, persistence key.
//!
//! Plain constants with no host dependency. Both the host glue and the
//! headless harness use these.

/// Week at which the character goes on maternal leave. Belly size saturates here.
pub const LEAVE_WEEK: i32 = 41;

/// Week at which the character returns from leave and the pregnancy ends.
pub const RETURN_WEEK: i32 = LEAVE_WEEK + 7;

/// Conception probability multiplier for characters with no saved data.
pub const DEFAULT_FERTILITY: f32 = 0.3;

/// Base chance of conception on a risky day before the fertility multiplier.
pub const BASE_CONCEPTION_CHANCE: f32 = 0.5;

/// Length of the host calendar's menstruation cycle in days.
pub const CYCLE_DAYS: usize = 15;

/// Key of the extended-data blob this module owns on each character card.
pub const DATA_KEY: &str = "KK_Pregnancy";
