use serde::{Deserialize, Serialize};
use std::fmt;

use crate::vitals::VitalsReading;

// Clinical thresholds. Inclusive bounds define the normal range.
pub const HEART_RATE_NORMAL: (f64, f64) = (60.0, 100.0); // beats per minute
pub const OXYGEN_LEVEL_FLOOR: f64 = 95.0; // percent
pub const TEMPERATURE_NORMAL: (f64, f64) = (36.5, 37.5); // degrees Celsius

/// Aggregate judgment for one reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VitalStatus {
    Normal,
    NeedsAttention,
}

impl fmt::Display for VitalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VitalStatus::Normal => write!(f, "Normal"),
            VitalStatus::NeedsAttention => write!(f, "NeedsAttention"),
        }
    }
}

/// Per-field out-of-range markers, used by the front end to highlight a
/// single cell independently of the aggregate status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbnormalFlags {
    pub heart_rate: bool,
    pub oxygen_level: bool,
    pub temperature: bool,
    pub blood_pressure: bool,
}

impl AbnormalFlags {
    pub fn any(&self) -> bool {
        self.heart_rate || self.oxygen_level || self.temperature || self.blood_pressure
    }
}

/// A reading plus its derived judgment. Built on demand, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedReading {
    pub reading: VitalsReading,
    pub status: VitalStatus,
    pub flags: AbnormalFlags,
}

/// Judge one reading against the fixed thresholds.
///
/// Pure and total: every reading is judged on its own, with no hysteresis
/// or debouncing across consecutive readings. The status is a plain OR
/// over the per-field checks.
pub fn classify(reading: VitalsReading) -> ClassifiedReading {
    let flags = AbnormalFlags {
        heart_rate: outside(reading.heart_rate, HEART_RATE_NORMAL),
        oxygen_level: reading.oxygen_level < OXYGEN_LEVEL_FLOOR,
        temperature: outside(reading.temperature, TEMPERATURE_NORMAL),
        blood_pressure: blood_pressure_abnormal(&reading.blood_pressure),
    };

    let status = if flags.any() {
        VitalStatus::NeedsAttention
    } else {
        VitalStatus::Normal
    };

    ClassifiedReading {
        reading,
        status,
        flags,
    }
}

fn outside(value: f64, (low, high): (f64, f64)) -> bool {
    value < low || value > high
}

/// Blood pressure arrives as a free-form string (e.g. "120/80") and has no
/// agreed numeric rule yet, so it is displayed but never raises a flag.
/// A systolic/diastolic rule slots in here without touching the status
/// logic above.
fn blood_pressure_abnormal(_raw: &str) -> bool {
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    fn reading(heart_rate: f64, oxygen_level: f64, temperature: f64) -> VitalsReading {
        VitalsReading {
            patient_id: "p-001".to_string(),
            name: "Alice".to_string(),
            heart_rate,
            blood_pressure: "120/80".to_string(),
            oxygen_level,
            temperature,
            timestamp: Utc.timestamp_opt(1_700_000_000, 0).unwrap(),
        }
    }

    #[test]
    fn test_in_range_reading_is_normal() {
        let classified = classify(reading(72.0, 98.0, 37.0));

        assert_eq!(classified.status, VitalStatus::Normal);
        assert_eq!(classified.flags, AbnormalFlags::default());
    }

    #[test]
    fn test_boundary_values_are_normal() {
        // Inclusive bounds: the exact thresholds still count as normal.
        for (hr, o2, temp) in [
            (60.0, 95.0, 36.5),
            (100.0, 95.0, 37.5),
            (60.0, 100.0, 37.5),
        ] {
            assert_eq!(classify(reading(hr, o2, temp)).status, VitalStatus::Normal);
        }
    }

    #[test]
    fn test_low_heart_rate_needs_attention() {
        let classified = classify(reading(55.0, 98.0, 37.0));

        assert_eq!(classified.status, VitalStatus::NeedsAttention);
        assert!(classified.flags.heart_rate);
        assert!(!classified.flags.oxygen_level);
        assert!(!classified.flags.temperature);
    }

    #[test]
    fn test_high_heart_rate_needs_attention() {
        assert_eq!(
            classify(reading(100.1, 98.0, 37.0)).status,
            VitalStatus::NeedsAttention
        );
    }

    #[test]
    fn test_low_oxygen_needs_attention() {
        let classified = classify(reading(72.0, 94.9, 37.0));

        assert_eq!(classified.status, VitalStatus::NeedsAttention);
        assert!(classified.flags.oxygen_level);
    }

    #[test]
    fn test_temperature_out_of_range_needs_attention() {
        assert!(classify(reading(72.0, 98.0, 38.0)).flags.temperature);
        assert!(classify(reading(72.0, 98.0, 36.4)).flags.temperature);
    }

    #[test]
    fn test_all_fields_abnormal_at_once() {
        let classified = classify(reading(55.0, 90.0, 38.0));

        assert_eq!(classified.status, VitalStatus::NeedsAttention);
        assert_eq!(
            classified.flags,
            AbnormalFlags {
                heart_rate: true,
                oxygen_level: true,
                temperature: true,
                blood_pressure: false,
            }
        );
    }

    #[test]
    fn test_blood_pressure_never_flags() {
        let mut extreme = reading(72.0, 98.0, 37.0);
        extreme.blood_pressure = "210/130".to_string();

        let classified = classify(extreme);
        assert!(!classified.flags.blood_pressure);
        assert_eq!(classified.status, VitalStatus::Normal);
    }

    #[test]
    fn test_classify_is_deterministic() {
        let first = classify(reading(55.0, 98.0, 37.0));
        let second = classify(reading(55.0, 98.0, 37.0));

        assert_eq!(first, second);
    }

    #[test]
    fn test_status_label_text() {
        assert_eq!(VitalStatus::Normal.to_string(), "Normal");
        assert_eq!(VitalStatus::NeedsAttention.to_string(), "NeedsAttention");
    }
}
