//! Turns an email and its metadata into the first-person encounter
//! note stored in the memory provider. The labelled fact block is what
//! later searches ("who did I meet at Blue Bottle?") match against.
use chrono::{DateTime, Utc};

use super::metadata::EmailMetadata;

const NOT_AVAILABLE: &str = "N/A";
const UNKNOWN_LOCATION: &str = "Unknown location";

/// Display name of a sender, e.g. `Joy` for `Joy <joy@example.com>`.
/// Bare addresses are returned unchanged.
pub fn sender_name(from: &str) -> &str {
    match from.split_once('<') {
        Some((name, _)) if !name.trim().is_empty() => name.trim(),
        _ => from,
    }
}

fn or_default<'a>(value: Option<&'a str>, default: &'a str) -> &'a str {
    value.filter(|v| !v.is_empty()).unwrap_or(default)
}

fn coordinate(value: Option<f64>) -> String {
    value.map_or_else(|| NOT_AVAILABLE.to_string(), |v| v.to_string())
}

pub fn build_narrative(
    from: &str,
    text: &str,
    received_at: DateTime<Utc>,
    metadata: &EmailMetadata,
) -> String {
    let name = sender_name(from);
    let location = metadata.location_name.as_deref().filter(|l| !l.is_empty());
    let heading_location = location.unwrap_or(UNKNOWN_LOCATION);
    let met_at = location.unwrap_or("an unknown location");
    let present_at = location.unwrap_or("this location");

    let date = received_at.format("%-m/%-d/%Y");
    let when = received_at.format("%-m/%-d/%Y, %-I:%M:%S %p");
    let device_name = or_default(metadata.device_name.as_deref(), NOT_AVAILABLE);
    let device_id = or_default(metadata.device_id.as_deref(), NOT_AVAILABLE);
    let interests = metadata
        .topics
        .as_ref()
        .map(|topics| topics.join(", "))
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string());
    let latitude = coordinate(metadata.latitude);
    let longitude = coordinate(metadata.longitude);

    format!(
        r#"ENCOUNTER WITH {name} at {heading_location}

I met {name} at {met_at} on {date}.

{name} was physically present at {present_at} and sent me a message:

"{text}"

WHO I MET: {name}
WHERE WE MET: {heading_location}
WHEN: {when}
THEIR DEVICE: {device_name} ({device_id})
THEIR INTERESTS: {interests}
GPS LOCATION: {latitude}, {longitude}

IMPORTANT: This is a record of an encounter. {name} was at {present_at} and I met them there."#
    )
    .trim()
    .to_string()
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn received() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 11, 3, 15, 4, 5).unwrap()
    }

    #[test]
    fn it_derives_sender_names() {
        assert_eq!(sender_name("Joy <joy@example.com>"), "Joy");
        assert_eq!(sender_name("  Joy Park   <joy@example.com>"), "Joy Park");
        assert_eq!(sender_name("joy@example.com"), "joy@example.com");
        assert_eq!(sender_name("<joy@example.com>"), "<joy@example.com>");
        assert_eq!(sender_name(""), "");
    }

    #[test]
    fn it_renders_all_facts() {
        let narrative = build_narrative(
            "Joy <joy@example.com>",
            "great to meet you",
            received(),
            &EmailMetadata::demo(),
        );

        assert!(narrative.starts_with("ENCOUNTER WITH Joy at Blue Bottle Coffee, SF\n"));
        assert!(narrative.contains("I met Joy at Blue Bottle Coffee, SF on 11/3/2025."));
        assert!(narrative.contains("\"great to meet you\""));
        assert!(narrative.contains("WHO I MET: Joy\n"));
        assert!(narrative.contains("WHERE WE MET: Blue Bottle Coffee, SF\n"));
        assert!(narrative.contains("WHEN: 11/3/2025, 3:04:05 PM\n"));
        assert!(narrative.contains("THEIR DEVICE: Plaipin #742 (plaipin_742)\n"));
        assert!(narrative.contains("THEIR INTERESTS: robots, raves, hiking\n"));
        assert!(narrative.contains("GPS LOCATION: 37.7749, -122.4194\n"));
        assert!(narrative.ends_with(
            "IMPORTANT: This is a record of an encounter. Joy was at Blue Bottle Coffee, SF and I met them there."
        ));
    }

    #[test]
    fn it_substitutes_missing_metadata() {
        let narrative = build_narrative(
            "joy@example.com",
            "hi",
            received(),
            &EmailMetadata::default(),
        );

        assert!(narrative.starts_with("ENCOUNTER WITH joy@example.com at Unknown location\n"));
        assert!(narrative.contains("I met joy@example.com at an unknown location on"));
        assert!(narrative.contains("was physically present at this location"));
        assert!(narrative.contains("WHERE WE MET: Unknown location\n"));
        assert!(narrative.contains("THEIR DEVICE: N/A (N/A)\n"));
        assert!(narrative.contains("THEIR INTERESTS: N/A\n"));
        assert!(narrative.contains("GPS LOCATION: N/A, N/A\n"));
    }

    #[test]
    fn it_treats_empty_topics_and_names_as_missing() {
        let metadata = EmailMetadata {
            location_name: Some(String::new()),
            device_name: Some(String::new()),
            topics: Some(vec![]),
            ..Default::default()
        };
        let narrative = build_narrative("a@b.com", "hi", received(), &metadata);
        assert!(narrative.contains("WHERE WE MET: Unknown location\n"));
        assert!(narrative.contains("THEIR DEVICE: N/A (N/A)\n"));
        assert!(narrative.contains("THEIR INTERESTS: N/A\n"));
    }

    #[test]
    fn it_renders_morning_times() {
        let at = Utc.with_ymd_and_hms(2025, 1, 9, 0, 7, 0).unwrap();
        let narrative = build_narrative("a@b.com", "hi", at, &EmailMetadata::default());
        assert!(narrative.contains("WHEN: 1/9/2025, 12:07:00 AM\n"));
    }
}
