//! Save/Load functionality for the per-character pregnancy blob
//!
//! Uses bincode with a fixed field order: week (i32), gameplay flag (bool),
//! fertility (f32), schedule (u32 variant index). The layout carries no
//! version; a missing or unreadable blob loads as the default state.

use kkpregnancy_logic::pregnancy::PregnancyState;
use kkpregnancy_logic::schedule::MenstruationSchedule;
use log::warn;
use serde::{Deserialize, Serialize};

/// On-card layout of the pregnancy data
#[derive(Serialize, Deserialize)]
struct PregnancyBlob {
    week: i32,
    gameplay_enabled: bool,
    fertility: f32,
    schedule: MenstruationSchedule,
}

impl From<&PregnancyState> for PregnancyBlob {
    fn from(state: &PregnancyState) -> Self {
        Self {
            week: state.week,
            gameplay_enabled: state.gameplay_enabled,
            fertility: state.fertility,
            schedule: state.schedule,
        }
    }
}

impl From<PregnancyBlob> for PregnancyState {
    fn from(blob: PregnancyBlob) -> Self {
        Self {
            week: blob.week,
            gameplay_enabled: blob.gameplay_enabled,
            fertility: blob.fertility,
            schedule: blob.schedule,
        }
    }
}

/// Encode all four fields into a blob. Fertility is stored bit for bit, so a
/// NaN survives the trip even though it never compares equal to itself.
pub fn serialize_state(state: &PregnancyState) -> Result<Vec<u8>, BlobError> {
    Ok(bincode::serialize(&PregnancyBlob::from(state))?)
}

/// Decode a blob, surfacing any decoding failure
pub fn try_deserialize_state(data: &[u8]) -> Result<PregnancyState, BlobError> {
    let blob: PregnancyBlob = bincode::deserialize(data)?;
    Ok(blob.into())
}

/// Decode a blob, falling back to the default state when it is absent or
/// unreadable. Never fails.
pub fn deserialize_state(data: Option<&[u8]>) -> PregnancyState {
    match data {
        None => PregnancyState::default(),
        Some(bytes) => try_deserialize_state(bytes).unwrap_or_else(|e| {
            warn!(
                "Discarding unreadable pregnancy data ({} bytes): {}",
                bytes.len(),
                e
            );
            PregnancyState::default()
        }),
    }
}

/// Errors that can occur while encoding or decoding the blob
#[derive(Debug)]
pub enum BlobError {
    Bincode(Box<bincode::ErrorKind>),
}

impl From<Box<bincode::ErrorKind>> for BlobError {
    fn from(e: Box<bincode::ErrorKind>) -> Self {
        BlobError::Bincode(e)
    }
}

impl std::fmt::Display for BlobError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BlobError::Bincode(e) => write!(f, "Serialization error: {}", e),
        }
    }
}

impl std::error::Error for BlobError {}
