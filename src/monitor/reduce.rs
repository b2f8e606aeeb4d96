use std::collections::hash_map::Entry;
use std::collections::HashMap;

use crate::monitor::classify::{classify, ClassifiedReading};
use crate::vitals::VitalsReading;

/// Collapse a window of readings down to the latest reading per patient,
/// classified.
///
/// Input order does not matter: timestamps are compared explicitly, so the
/// caller owes no pre-sorting. When two readings for the same patient share
/// a timestamp the one appearing earlier in the input wins, which keeps the
/// result deterministic for a deterministic input.
///
/// The output preserves first-encounter order of patient names; patients
/// with no reading in the window are simply absent.
pub fn latest_per_patient(readings: &[VitalsReading]) -> Vec<ClassifiedReading> {
    let mut order: Vec<String> = Vec::new();
    let mut latest: HashMap<String, &VitalsReading> = HashMap::new();

    for reading in readings {
        match latest.entry(reading.name.clone()) {
            Entry::Occupied(mut slot) => {
                if reading.timestamp > slot.get().timestamp {
                    slot.insert(reading);
                }
            }
            Entry::Vacant(slot) => {
                order.push(reading.name.clone());
                slot.insert(reading);
            }
        }
    }

    order
        .into_iter()
        .filter_map(|name| latest.remove(name.as_str()))
        .map(|reading| classify(reading.to_owned()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monitor::classify::VitalStatus;
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    fn reading(name: &str, heart_rate: f64, at: i64) -> VitalsReading {
        VitalsReading {
            patient_id: format!("id-{}", name.to_lowercase()),
            name: name.to_string(),
            heart_rate,
            blood_pressure: "120/80".to_string(),
            oxygen_level: 98.0,
            temperature: 37.0,
            timestamp: Utc.timestamp_opt(at, 0).unwrap(),
        }
    }

    #[test]
    fn test_empty_input_yields_empty_output() {
        assert_eq!(latest_per_patient(&[]), vec![]);
    }

    #[test]
    fn test_one_entry_per_distinct_patient() {
        let window = vec![
            reading("Alice", 72.0, 300),
            reading("Bob", 80.0, 290),
            reading("Alice", 75.0, 280),
            reading("Carol", 66.0, 270),
        ];

        let reduced = latest_per_patient(&window);

        assert_eq!(reduced.len(), 3);
        let names: Vec<&str> = reduced.iter().map(|c| c.reading.name.as_str()).collect();
        assert_eq!(names, vec!["Alice", "Bob", "Carol"]);
    }

    #[test]
    fn test_descending_input_keeps_the_newest_reading() {
        // The usual case: the source returns most-recent-first.
        let window = vec![reading("Bob", 72.0, 200), reading("Bob", 110.0, 100)];

        let reduced = latest_per_patient(&window);

        assert_eq!(reduced.len(), 1);
        assert_eq!(reduced[0].reading.heart_rate, 72.0);
        assert_eq!(reduced[0].status, VitalStatus::Normal);
    }

    #[test]
    fn test_unordered_input_still_picks_the_maximum_timestamp() {
        let window = vec![
            reading("Bob", 110.0, 100),
            reading("Bob", 72.0, 300),
            reading("Bob", 90.0, 200),
        ];

        let reduced = latest_per_patient(&window);

        assert_eq!(reduced[0].reading.timestamp.timestamp(), 300);
        assert_eq!(reduced[0].reading.heart_rate, 72.0);
    }

    #[test]
    fn test_duplicate_timestamps_prefer_the_earlier_row() {
        let window = vec![reading("Bob", 72.0, 100), reading("Bob", 110.0, 100)];

        let reduced = latest_per_patient(&window);

        assert_eq!(reduced[0].reading.heart_rate, 72.0);
    }

    #[test]
    fn test_winner_is_classified() {
        let window = vec![reading("Bob", 45.0, 300), reading("Bob", 72.0, 100)];

        let reduced = latest_per_patient(&window);

        assert_eq!(reduced[0].status, VitalStatus::NeedsAttention);
        assert!(reduced[0].flags.heart_rate);
    }
}
