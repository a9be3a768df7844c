//! Unit and equipment profiles with their alerting thresholds.

use serde::{Deserialize, Serialize};

use crate::api::EquipmentId;

/// Alerting threshold in meters of GNSS error.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Threshold(f64);

impl Threshold {
    /// Create a threshold, clamping negatives to zero.
    pub fn new(meters: f64) -> Self {
        Self(meters.max(0.0))
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

impl From<f64> for Threshold {
    fn from(meters: f64) -> Self {
        Threshold::new(meters)
    }
}

/// How a profile's active threshold is sourced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThresholdMode {
    /// Operator-set constant.
    Manual,
    /// Derived from degraded-mission statistics.
    Auto,
}

/// Geographic position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, String> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err("Latitude must be between -90 and 90 degrees".to_string());
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err("Longitude must be between -180 and 180 degrees".to_string());
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }
}

/// One equipment type operated by the unit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EquipmentProfile {
    pub id: EquipmentId,
    pub name: String,
    pub threshold_mode: ThresholdMode,
    pub manual_threshold: Threshold,
    /// Present once the estimator has produced a value for this equipment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_threshold: Option<Threshold>,
    /// Whether this equipment records its track during missions.
    pub uses_geo_data: bool,
}

impl EquipmentProfile {
    /// The threshold currently in force for this equipment.
    ///
    /// Auto mode falls back to the manual value while no auto threshold has
    /// been computed yet.
    pub fn active_threshold(&self) -> Threshold {
        match self.threshold_mode {
            ThresholdMode::Manual => self.manual_threshold,
            ThresholdMode::Auto => self.auto_threshold.unwrap_or(self.manual_threshold),
        }
    }
}

/// Air-wing profile: the unit-level threshold plus its equipment roster.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnitProfile {
    pub unit_name: String,
    pub threshold_mode: ThresholdMode,
    pub manual_threshold: Threshold,
    pub location: GeoPoint,
    pub equipment: Vec<EquipmentProfile>,
}

impl UnitProfile {
    /// Unit-level auto threshold: the most conservative (minimum) of the
    /// equipment active thresholds. `None` with an empty roster.
    pub fn auto_threshold(&self) -> Option<Threshold> {
        self.equipment
            .iter()
            .map(|eq| eq.active_threshold())
            .fold(None, |acc: Option<Threshold>, t| {
                Some(acc.map_or(t, |m| if t.value() < m.value() { t } else { m }))
            })
    }

    /// The unit threshold currently in force.
    pub fn active_threshold(&self) -> Threshold {
        match self.threshold_mode {
            ThresholdMode::Manual => self.manual_threshold,
            ThresholdMode::Auto => self.auto_threshold().unwrap_or(self.manual_threshold),
        }
    }

    pub fn equipment_by_id(&self, id: EquipmentId) -> Option<&EquipmentProfile> {
        self.equipment.iter().find(|eq| eq.id == id)
    }
}
