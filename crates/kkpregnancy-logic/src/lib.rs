//! Pure pregnancy-state logic for KK Pregnancy.
//!
//! This crate contains all per-character pregnancy rules that are independent
//! of the host game. Functions take plain data and return results, making
//! them unit-testable and usable from the host glue, the headless harness,
//! and any future frontend.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | Tunable thresholds and conception chance, with validation |
//! | [`constants`] | Leave/return weeks, cycle length, blob key |
//! | [`pregnancy`] | `PregnancyState`, belly size, week progression, conception |
//! | [`schedule`] | Menstruation schedule variants and their 15-day tables |

pub mod config;
pub mod constants;
pub mod pregnancy;
pub mod schedule;
