//! Per-character pregnancy state and its derived queries.
//!
//! `week` drives everything: belly size, risk-day eligibility, and the
//! maternal leave window. Gameplay helpers (`advance_week`, `conceive`)
//! respect `gameplay_enabled`; the raw fields do not.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_FERTILITY, LEAVE_WEEK, RETURN_WEEK};
use crate::schedule::MenstruationSchedule;

/// Pregnancy data owned by one character.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PregnancyState {
    /// `<= 0` not pregnant, `1..LEAVE_WEEK` pregnant, `>= LEAVE_WEEK` on maternal leave.
    pub week: i32,
    /// When false the week never advances and the character can't conceive.
    pub gameplay_enabled: bool,
    /// Conception probability multiplier.
    pub fertility: f32,
    pub schedule: MenstruationSchedule,
}

impl Default for PregnancyState {
    fn default() -> Self {
        Self {
            week: 0,
            gameplay_enabled: false,
            fertility: DEFAULT_FERTILITY,
            schedule: MenstruationSchedule::Default,
        }
    }
}

/// What happened when a week was advanced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeekChange {
    /// Gameplay disabled or not pregnant.
    Unchanged,
    /// Still pregnant, now at the given week.
    Progressed(i32),
    /// Reached the leave week this step.
    StartedLeave,
    /// Came back from leave; pregnancy is over.
    Returned,
}

impl PregnancyState {
    /// Belly size in `[0, 1]`.
    pub fn belly_size_percent(&self) -> f32 {
        belly_size_percent(self.week, LEAVE_WEEK)
    }

    pub fn is_pregnant(&self) -> bool {
        self.week > 0
    }

    /// Risk days stop once the pregnancy is past its first week.
    pub fn can_have_risk_days(&self) -> bool {
        self.week <= 1
    }

    pub fn is_on_leave(&self) -> bool {
        self.week >= LEAVE_WEEK
    }

    /// Advance one week of gameplay time.
    pub fn advance_week(&mut self) -> WeekChange {
        if !self.gameplay_enabled || !self.is_pregnant() {
            return WeekChange::Unchanged;
        }

        // Checked before incrementing; loaded cards may carry any week.
        if self.week >= RETURN_WEEK - 1 {
            self.week = 0;
            return WeekChange::Returned;
        }

        self.week += 1;
        if self.week == LEAVE_WEEK {
            WeekChange::StartedLeave
        } else {
            WeekChange::Progressed(self.week)
        }
    }

    /// Chance of conceiving on a risky day, scaled by fertility.
    pub fn conception_chance(&self, base_chance: f32) -> f32 {
        if !self.gameplay_enabled || self.is_pregnant() {
            return 0.0;
        }
        (base_chance * self.fertility).clamp(0.0, 1.0)
    }

    /// Start a pregnancy at week 1. Returns false if not allowed.
    pub fn conceive(&mut self) -> bool {
        if !self.gameplay_enabled || self.is_pregnant() {
            return false;
        }
        self.week = 1;
        true
    }
}

/// `clamp01((week - 1) / (leave_week - 1))`.
///
/// Week 1 is the moment of conception and shows nothing yet.
pub fn belly_size_percent(week: i32, leave_week: i32) -> f32 {
    let span = (leave_week - 1).max(1) as f32;
    ((week as f32 - 1.0) / span).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pregnant_at(week: i32) -> PregnancyState {
        PregnancyState {
            week,
            gameplay_enabled: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_defaults() {
        let s = PregnancyState::default();
        assert_eq!(s.week, 0);
        assert!(!s.gameplay_enabled);
        assert!((s.fertility - DEFAULT_FERTILITY).abs() < f32::EPSILON);
        assert_eq!(s.schedule, MenstruationSchedule::Default);
    }

    #[test]
    fn test_belly_zero_up_to_week_one() {
        for week in -5..=1 {
            assert_eq!(pregnant_at(week).belly_size_percent(), 0.0);
        }
    }

    #[test]
    fn test_belly_saturates_at_leave() {
        for week in LEAVE_WEEK..LEAVE_WEEK + 20 {
            assert_eq!(pregnant_at(week).belly_size_percent(), 1.0);
        }
    }

    #[test]
    fn test_belly_monotonic() {
        let mut last = 0.0;
        for week in 1..=LEAVE_WEEK {
            let b = pregnant_at(week).belly_size_percent();
            assert!(b >= last, "week {} shrank: {} < {}", week, b, last);
            last = b;
        }
    }

    #[test]
    fn test_belly_midpoint() {
        // leave week 11 → week 6 is halfway
        assert!((belly_size_percent(6, 11) - 0.5).abs() < 0.001);
        assert_eq!(belly_size_percent(10, 10), 1.0);
    }

    #[test]
    fn test_pregnancy_and_risk_days() {
        for week in -3..=LEAVE_WEEK + 3 {
            let s = pregnant_at(week);
            assert_eq!(s.is_pregnant(), week > 0);
            assert_eq!(s.can_have_risk_days(), week <= 1);
        }
    }

    #[test]
    fn test_week_one_example() {
        let s = pregnant_at(1);
        assert_eq!(s.belly_size_percent(), 0.0);
        assert!(s.is_pregnant());
        assert!(s.can_have_risk_days());
    }

    #[test]
    fn test_leave_week_example() {
        let s = pregnant_at(LEAVE_WEEK);
        assert_eq!(s.belly_size_percent(), 1.0);
        assert!(s.is_pregnant());
        assert!(!s.can_have_risk_days());
        assert!(s.is_on_leave());
    }

    #[test]
    fn test_advance_requires_gameplay() {
        let mut s = pregnant_at(5);
        s.gameplay_enabled = false;
        assert_eq!(s.advance_week(), WeekChange::Unchanged);
        assert_eq!(s.week, 5);
    }

    #[test]
    fn test_advance_not_pregnant() {
        let mut s = pregnant_at(0);
        assert_eq!(s.advance_week(), WeekChange::Unchanged);
        assert_eq!(s.week, 0);
    }

    #[test]
    fn test_advance_through_leave_and_return() {
        let mut s = pregnant_at(LEAVE_WEEK - 1);
        assert_eq!(s.advance_week(), WeekChange::StartedLeave);
        assert!(s.is_on_leave());
        assert_eq!(s.belly_size_percent(), 1.0);
        assert!(!s.can_have_risk_days());

        s.week = RETURN_WEEK - 1;
        assert_eq!(s.advance_week(), WeekChange::Returned);
        assert_eq!(s.week, 0);
        assert!(!s.is_pregnant());
    }

    #[test]
    fn test_started_leave_always_on_leave() {
        for start in 1..RETURN_WEEK {
            let mut s = pregnant_at(start);
            if s.advance_week() == WeekChange::StartedLeave {
                assert!(s.is_on_leave(), "week {}", s.week);
                assert_eq!(s.belly_size_percent(), 1.0);
            }
        }
    }

    #[test]
    fn test_advance_from_max_week_returns() {
        let mut s = pregnant_at(i32::MAX);
        assert_eq!(s.advance_week(), WeekChange::Returned);
        assert_eq!(s.week, 0);
        assert!(!s.is_pregnant());
    }

    #[test]
    fn test_advance_past_return_week_returns() {
        let mut s = pregnant_at(RETURN_WEEK + 10);
        assert_eq!(s.advance_week(), WeekChange::Returned);
        assert_eq!(s.week, 0);
    }

    #[test]
    fn test_conception_chance() {
        let mut s = pregnant_at(0);
        s.fertility = 0.5;
        assert!((s.conception_chance(0.5) - 0.25).abs() < 0.001);
        s.fertility = 10.0;
        assert_eq!(s.conception_chance(0.5), 1.0);

        s.gameplay_enabled = false;
        assert_eq!(s.conception_chance(0.5), 0.0);
        assert_eq!(pregnant_at(3).conception_chance(0.5), 0.0);
    }

    #[test]
    fn test_conceive() {
        let mut s = pregnant_at(0);
        assert!(s.conceive());
        assert_eq!(s.week, 1);
        assert!(!s.conceive());

        let mut disabled = PregnancyState::default();
        assert!(!disabled.conceive());
        assert_eq!(disabled.week, 0);
    }
}
