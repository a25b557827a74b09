//! Validation of serialized character records.
//!
//! Works on `serde_json::Value` so files can be checked without building a
//! `Character` first. The rules are the domain's own: after a shape check the
//! value goes through `Character::from_record`.
//!
//! Failures are sorted into two kinds:
//! - `PersistError::Malformed`: not an object, or a field has the wrong JSON
//!   type (e.g. `"level": "three"`)
//! - `PersistError::Validation`: a required field is missing, or a value
//!   breaks a domain rule (e.g. `"level": 0`)

use chrono::{DateTime, Utc};
use charsheet_domain::{Character, CharacterRecord};
use serde_json::Value;

use crate::infrastructure::error::PersistError;

/// Keys every record must carry.
pub const REQUIRED_FIELDS: [&str; 2] = ["character_id", "name"];

/// Check required keys and decode the record shape.
pub fn parse_record(value: Value) -> Result<CharacterRecord, PersistError> {
    let Some(object) = value.as_object() else {
        return Err(PersistError::malformed(
            "character data must be a JSON object",
        ));
    };
    for field in REQUIRED_FIELDS {
        match object.get(field) {
            None | Some(Value::Null) => {
                return Err(PersistError::validation(format!(
                    "Missing required field: {}",
                    field
                )))
            }
            Some(_) => {}
        }
    }
    serde_json::from_value(value).map_err(PersistError::malformed)
}

/// Decode and validate a record, producing the character it describes.
///
/// Missing timestamps are filled with `now`.
pub fn character_from_value(value: Value, now: DateTime<Utc>) -> Result<Character, PersistError> {
    let record = parse_record(value)?;
    Ok(Character::from_record(record, now)?)
}

/// Check a serialized character; the first broken rule is reported.
pub fn validate_record(value: &Value) -> Result<(), PersistError> {
    character_from_value(value.clone(), DateTime::<Utc>::default()).map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn valid() -> Value {
        let now = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
        serde_json::to_value(Character::new_default(now)).unwrap()
    }

    fn message_for(value: &Value) -> String {
        match validate_record(value) {
            Err(PersistError::Validation(msg)) => msg,
            other => panic!("expected a validation error, got {:?}", other),
        }
    }

    #[test]
    fn a_fresh_character_is_valid() {
        validate_record(&valid()).unwrap();
    }

    #[test]
    fn each_rule_has_its_own_message() {
        let mut cases = Vec::new();

        let mut v = valid();
        v["name"] = json!("   ");
        cases.push(message_for(&v));

        let mut v = valid();
        v["level"] = json!(0);
        cases.push(message_for(&v));

        let mut v = valid();
        v["level"] = json!(101);
        cases.push(message_for(&v));

        let mut v = valid();
        v["stats"]["strength"] = json!(26);
        cases.push(message_for(&v));

        let mut v = valid();
        v["relationships"] = json!([{
            "character_id": "npc-bram",
            "name": "Bram",
            "type": "friend",
            "strength": 11,
        }]);
        cases.push(message_for(&v));

        let mut v = valid();
        v["biography"] = json!("x".repeat(10_001));
        cases.push(message_for(&v));

        assert_eq!(cases[0], "Character name cannot be empty");
        assert_eq!(cases[1], "Level must be between 1 and 100, got 0");
        assert_eq!(cases[2], "Level must be between 1 and 100, got 101");
        assert_eq!(cases[3], "Strength must be between 1 and 25, got 26");
        assert_eq!(cases[4], "Relationship strength must be between 1 and 10, got 11");
        assert_eq!(cases[5], "Biography cannot exceed 10000 characters");
    }

    #[test]
    fn missing_required_fields_are_validation_errors() {
        let mut v = valid();
        v.as_object_mut().unwrap().remove("name");
        assert_eq!(message_for(&v), "Missing required field: name");

        let mut v = valid();
        v["character_id"] = Value::Null;
        assert_eq!(message_for(&v), "Missing required field: character_id");
    }

    #[test]
    fn wrong_json_types_are_malformed() {
        let mut v = valid();
        v["level"] = json!("three");
        assert!(matches!(validate_record(&v), Err(PersistError::Malformed(_))));

        assert!(matches!(
            validate_record(&json!([1, 2, 3])),
            Err(PersistError::Malformed(_))
        ));
    }

    #[test]
    fn enneagram_rules_apply() {
        let mut v = valid();
        v["enneagram"]["main_type"] = json!(2);
        v["enneagram"]["wing"] = json!(6);
        v["enneagram"]["integration_point"] = json!(4);
        v["enneagram"]["disintegration_point"] = json!(8);
        assert!(message_for(&v).contains("Wing 6 is not valid for type 2"));

        let mut v = valid();
        v["enneagram"]["integration_point"] = json!(1);
        assert!(message_for(&v).contains("Integration point"));
    }

    #[test]
    fn event_importance_is_checked() {
        let mut v = valid();
        v["narrative_events"] = json!([{
            "character_id": "npc-bram",
            "title": "Born",
            "importance": 0,
        }]);
        assert_eq!(
            message_for(&v),
            "Event importance must be between 1 and 10, got 0"
        );
    }
}
