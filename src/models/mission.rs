//! Mission feedback records.

use serde::{Deserialize, Serialize};

use crate::api::{EquipmentId, MissionLogId};

use super::profile::GeoPoint;
use super::time::TimestampMs;

/// Success band derived from the 1-10 operator score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuccessBand {
    Success,
    Normal,
    Failure,
}

impl SuccessBand {
    /// Band for a raw score: >= 8 success, 4-7 normal, < 4 failure.
    pub fn from_score(score: u8) -> Self {
        if score >= 8 {
            SuccessBand::Success
        } else if score >= 4 {
            SuccessBand::Normal
        } else {
            SuccessBand::Failure
        }
    }

    /// Whether missions in this band feed the auto-threshold estimator.
    pub fn is_degraded(&self) -> bool {
        !matches!(self, SuccessBand::Success)
    }
}

/// One GNSS error reading recorded during a mission.
///
/// `position` is present only for equipment that records its track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissionErrorSample {
    pub time: TimestampMs,
    pub error_rate: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<GeoPoint>,
}

/// One historical mission feedback record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissionOutcome {
    pub id: MissionLogId,
    pub equipment_id: EquipmentId,
    pub start_time: TimestampMs,
    pub end_time: TimestampMs,
    /// Operator-assigned score, 1-10.
    pub success_score: u8,
    /// Error readings taken during the mission, in recording order. May be
    /// empty when no error log was uploaded with the feedback.
    pub error_samples: Vec<MissionErrorSample>,
}

impl MissionOutcome {
    pub fn band(&self) -> SuccessBand {
        SuccessBand::from_score(self.success_score)
    }

    /// Maximum error rate observed during the mission, `None` when no error
    /// readings were recorded.
    pub fn peak_error(&self) -> Option<f64> {
        self.error_samples
            .iter()
            .map(|s| s.error_rate)
            .fold(None, |acc, e| Some(acc.map_or(e, |m: f64| m.max(e))))
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome_with_errors(score: u8, errors: &[f64]) -> MissionOutcome {
        MissionOutcome {
            id: MissionLogId::new(1),
            equipment_id: EquipmentId::new(1),
            start_time: TimestampMs::new(0),
            end_time: TimestampMs::new(1000),
            success_score: score,
            error_samples: errors
                .iter()
                .enumerate()
                .map(|(i, &e)| MissionErrorSample {
                    time: TimestampMs::new(i as i64 * 1000),
                    error_rate: e,
                    position: None,
                })
                .collect(),
        }
    }

    #[test]
    fn test_band_boundaries() {
        assert_eq!(SuccessBand::from_score(10), SuccessBand::Success);
        assert_eq!(SuccessBand::from_score(8), SuccessBand::Success);
        assert_eq!(SuccessBand::from_score(7), SuccessBand::Normal);
        assert_eq!(SuccessBand::from_score(4), SuccessBand::Normal);
        assert_eq!(SuccessBand::from_score(3), SuccessBand::Failure);
        assert_eq!(SuccessBand::from_score(1), SuccessBand::Failure);
    }

    #[test]
    fn test_degraded_bands() {
        assert!(!SuccessBand::Success.is_degraded());
        assert!(SuccessBand::Normal.is_degraded());
        assert!(SuccessBand::Failure.is_degraded());
    }

    #[test]
    fn test_peak_error() {
        let outcome = outcome_with_errors(5, &[3.0, 9.5, 4.2]);
        assert_eq!(outcome.peak_error(), Some(9.5));
    }

    #[test]
    fn test_peak_error_empty() {
        let outcome = outcome_with_errors(5, &[]);
        assert_eq!(outcome.peak_error(), None);
    }
}
