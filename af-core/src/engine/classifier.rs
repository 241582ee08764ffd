//! Sensor classification
//!
//! Splits a provider's readings into the fan tachometer reading and the
//! temperature readings that feed the aggregator. Pure selection: values pass
//! through untouched.

use regex::Regex;
use tracing::trace;

use crate::data::{ChipReadings, SensorSnapshot};

/// Result of classifying one set of provider readings
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Classified {
    /// Temperature readings selected by the patterns
    pub snapshot: SensorSnapshot,
    /// Current fan reading in RPM, 0 when the fan was not found
    pub fan_speed: i64,
}

/// Selects the fan reading and the temperature readings to aggregate
#[derive(Debug, Clone)]
pub struct SensorClassifier {
    fan: String,
    patterns: Vec<Regex>,
}

impl SensorClassifier {
    /// `fan` is compared against whitespace-trimmed composed names.
    /// An empty `patterns` list selects every non-fan reading.
    pub fn new(fan: impl Into<String>, patterns: Vec<Regex>) -> Self {
        Self {
            fan: fan.into(),
            patterns,
        }
    }

    /// Whether a composed name passes the temperature filter
    pub fn matches(&self, name: &str) -> bool {
        self.patterns.is_empty() || self.patterns.iter().any(|re| re.is_match(name))
    }

    /// Classify every reading of every chip
    pub fn classify(&self, chips: &[ChipReadings]) -> Classified {
        let mut classified = Classified::default();

        for reading in chips.iter().flat_map(ChipReadings::readings) {
            if reading.name.trim() == self.fan {
                classified.fan_speed = reading.value as i64;
                continue;
            }

            if !self.matches(&reading.name) {
                trace!(sensor = %reading.name, "Sensor filtered out");
                continue;
            }

            classified.snapshot.insert(reading.name, reading.value);
        }

        classified
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chips() -> Vec<ChipReadings> {
        vec![
            ChipReadings::new("coretemp-isa-0000")
                .with_feature("Package id 0", 58.0)
                .with_feature("Core 0", 50.0)
                .with_feature("Core 1", 60.0),
            ChipReadings::new("applesmc-isa-0300")
                .with_feature("Master ", 2163.0)
                .with_feature("TC0P", 47.25),
        ]
    }

    fn patterns(list: &[&str]) -> Vec<Regex> {
        list.iter().map(|p| Regex::new(p).unwrap()).collect()
    }

    #[test]
    fn test_fan_matched_after_trim() {
        let classifier = SensorClassifier::new("applesmc-isa-0300:Master", vec![]);
        let classified = classifier.classify(&chips());
        assert_eq!(classified.fan_speed, 2163);
        assert!(!classified.snapshot.contains("applesmc-isa-0300:Master "));
    }

    #[test]
    fn test_missing_fan_reads_zero() {
        let classifier = SensorClassifier::new("it87-isa-0a30:fan1", patterns(&["Core"]));
        let classified = classifier.classify(&chips());
        assert_eq!(classified.fan_speed, 0);
        assert_eq!(classified.snapshot.len(), 2);
    }

    #[test]
    fn test_patterns_select_temperatures() {
        let classifier = SensorClassifier::new(
            "applesmc-isa-0300:Master",
            patterns(&["coretemp-isa-0000:Core .*"]),
        );
        let classified = classifier.classify(&chips());
        assert_eq!(classified.snapshot.len(), 2);
        assert_eq!(classified.snapshot.get("coretemp-isa-0000:Core 0"), Some(50.0));
        assert_eq!(classified.snapshot.get("coretemp-isa-0000:Core 1"), Some(60.0));
        assert!(!classified.snapshot.contains("coretemp-isa-0000:Package id 0"));
    }

    #[test]
    fn test_patterns_are_or_ed() {
        let classifier = SensorClassifier::new(
            "applesmc-isa-0300:Master",
            patterns(&["Core 0$", "TC0P"]),
        );
        let classified = classifier.classify(&chips());
        assert_eq!(classified.snapshot.len(), 2);
        assert!(classified.snapshot.contains("coretemp-isa-0000:Core 0"));
        assert!(classified.snapshot.contains("applesmc-isa-0300:TC0P"));
    }

    #[test]
    fn test_patterns_search_unanchored() {
        let classifier = SensorClassifier::new("x:y", patterns(&["Package"]));
        let classified = classifier.classify(&chips());
        assert_eq!(classified.snapshot.len(), 1);
        assert!(classified.snapshot.contains("coretemp-isa-0000:Package id 0"));
    }

    #[test]
    fn test_empty_patterns_match_all_but_fan() {
        let classifier = SensorClassifier::new("applesmc-isa-0300:Master", vec![]);
        let classified = classifier.classify(&chips());
        assert_eq!(classified.snapshot.len(), 4);
        assert!(classified
            .snapshot
            .iter()
            .all(|(name, _)| name.trim() != "applesmc-isa-0300:Master"));
    }

    #[test]
    fn test_fan_excluded_even_when_pattern_matches() {
        let classifier = SensorClassifier::new(
            "applesmc-isa-0300:Master",
            patterns(&["applesmc"]),
        );
        let classified = classifier.classify(&chips());
        assert_eq!(classified.fan_speed, 2163);
        assert_eq!(classified.snapshot.len(), 1);
        assert!(classified.snapshot.contains("applesmc-isa-0300:TC0P"));
    }

    #[test]
    fn test_fan_speed_truncated() {
        let chips = vec![ChipReadings::new("nct6775-isa-0290").with_feature("fan2", 1234.9)];
        let classifier = SensorClassifier::new("nct6775-isa-0290:fan2", vec![]);
        let classified = classifier.classify(&chips);
        assert_eq!(classified.fan_speed, 1234);
        assert!(classified.snapshot.is_empty());
    }

    #[test]
    fn test_no_chips() {
        let classifier = SensorClassifier::new("a:b", vec![]);
        let classified = classifier.classify(&[]);
        assert!(classified.snapshot.is_empty());
        assert_eq!(classified.fan_speed, 0);
    }
}
