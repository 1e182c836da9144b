//! Generic validation routine over a schema table
//!
//! [`validate_record`] turns a partial JSON object into a fully populated one:
//! absent fields take their defaults, supplied fields are type-checked, and
//! floors and blank-string rules are enforced. The first violation found in
//! declaration order is returned.

use serde_json::{Map, Value};

use crate::error::DomainError;
use crate::schema::{nested_default, FieldDescriptor, FieldType, Scalar};

/// Path reported when the input itself is not an object
pub const ROOT_PATH: &str = "record";

/// Validate and normalize `input` against `fields`.
///
/// Keys not declared in the schema are dropped from the output.
pub fn validate_record(
    fields: &[FieldDescriptor],
    input: &Value,
) -> Result<Map<String, Value>, DomainError> {
    let object = input
        .as_object()
        .ok_or_else(|| DomainError::invalid_type(ROOT_PATH, "object"))?;
    resolve_fields(fields, &[], object, None)
}

/// Re-validate a single top-level value, as a setter does before writing.
///
/// Unlike construction, there is no fallback: the value must itself satisfy
/// the descriptor.
pub fn validate_field(field: &FieldDescriptor, value: &Value) -> Result<Value, DomainError> {
    match field.field_type {
        FieldType::Schema { fields, defaults } => {
            let object = value
                .as_object()
                .ok_or_else(|| DomainError::invalid_type(field.name, "object"))?;
            resolve_fields(fields, defaults, object, Some(field.name)).map(Value::Object)
        }
        _ => check_scalar(field, value.clone(), field.name),
    }
}

fn resolve_fields(
    fields: &[FieldDescriptor],
    defaults: &[(&'static str, Scalar)],
    input: &Map<String, Value>,
    prefix: Option<&str>,
) -> Result<Map<String, Value>, DomainError> {
    let mut out = Map::new();
    for field in fields {
        let path = match prefix {
            Some(prefix) => format!("{prefix}.{}", field.name),
            None => field.name.to_string(),
        };
        let fallback = nested_default(defaults, field.name);
        if let Some(value) = resolve_field(field, input.get(field.name), fallback, &path)? {
            out.insert(field.name.to_string(), value);
        }
    }
    Ok(out)
}

fn resolve_field(
    field: &FieldDescriptor,
    supplied: Option<&Value>,
    fallback: Option<Value>,
    path: &str,
) -> Result<Option<Value>, DomainError> {
    // An explicit null is an undefined value, not an absent key.
    if let Some(Value::Null) = supplied {
        if field.nullable {
            return Ok(Some(Value::Null));
        }
        if field.required {
            return Err(DomainError::required(path));
        }
    }

    if let FieldType::Schema { fields, defaults } = field.field_type {
        let empty = Map::new();
        let nested = match supplied {
            Some(Value::Object(map)) => map,
            Some(Value::Null) | None => &empty,
            Some(_) => return Err(DomainError::invalid_type(path, "object")),
        };
        return resolve_fields(fields, defaults, nested, Some(path))
            .map(|map| Some(Value::Object(map)));
    }

    let resolved = match supplied {
        Some(Value::Null) | None => fallback.or_else(|| field.initial_value()),
        Some(value) => Some(value.clone()),
    };

    match resolved {
        Some(value) => check_scalar(field, value, path).map(Some),
        None if field.required => Err(DomainError::required(path)),
        None => Ok(None),
    }
}

fn check_scalar(field: &FieldDescriptor, value: Value, path: &str) -> Result<Value, DomainError> {
    match field.field_type {
        FieldType::String { blank, trim, .. } => {
            let Value::String(text) = value else {
                return Err(DomainError::invalid_type(path, "string"));
            };
            let text = if trim { text.trim().to_string() } else { text };
            if !blank && text.trim().is_empty() {
                return Err(DomainError::validation(format!(
                    "{} cannot be empty",
                    field.label
                )));
            }
            Ok(Value::String(text))
        }
        FieldType::Integer { min, .. } => {
            let number =
                as_integer(&value).ok_or_else(|| DomainError::invalid_type(path, "integer"))?;
            if let Some(min) = min {
                if number < min {
                    return Err(DomainError::range(path, min, number));
                }
            }
            Ok(Value::from(number))
        }
        FieldType::Schema { .. } => Err(DomainError::invalid_type(path, "object")),
    }
}

/// Accept JSON integers and integral floats such as `5.0`.
///
/// `i64::MAX as f64` rounds up to 2^63, so the upper bound is exclusive.
fn as_integer(value: &Value) -> Option<i64> {
    if let Some(n) = value.as_i64() {
        return Some(n);
    }
    value
        .as_f64()
        .filter(|f| f.is_finite() && f.fract() == 0.0)
        .filter(|f| (i64::MIN as f64..i64::MAX as f64).contains(f))
        .map(|f| f as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{CHARACTER_SCHEMA, LEVEL_FIELD};
    use serde_json::json;

    const NAMELESS: &[FieldDescriptor] = &[FieldDescriptor {
        name: "title",
        label: "Title",
        required: true,
        nullable: false,
        field_type: FieldType::String {
            initial: None,
            blank: true,
            trim: false,
        },
    }];

    const BANNER_FIELDS: &[FieldDescriptor] = &[
        FieldDescriptor {
            name: "motto",
            label: "Motto",
            required: true,
            nullable: false,
            field_type: FieldType::String {
                initial: None,
                blank: false,
                trim: true,
            },
        },
        FieldDescriptor::integer("rank", "Rank", 1, Some(1)),
    ];

    const BANNER: &[FieldDescriptor] = &[FieldDescriptor {
        name: "banner",
        label: "Banner",
        required: true,
        nullable: false,
        field_type: FieldType::Schema {
            fields: BANNER_FIELDS,
            defaults: &[("motto", Scalar::Str(" Onward ")), ("rank", Scalar::Int(2))],
        },
    }];

    #[test]
    fn empty_input_resolves_every_default() {
        let out = validate_record(CHARACTER_SCHEMA, &json!({})).expect("defaults are valid");
        assert_eq!(out["characterName"], "New Character");
        assert_eq!(out["level"], 1);
        assert_eq!(out["actionPoints"], 3);
        assert_eq!(out["attributes"]["charisma"], 10);
        assert_eq!(out["skills"]["deception"], 0);
        assert_eq!(out["health"], json!({ "current": 10, "max": 10 }));
    }

    #[test]
    fn extra_keys_are_dropped() {
        let out = validate_record(
            CHARACTER_SCHEMA,
            &json!({ "favouriteColour": "green", "attributes": { "luck": 4 } }),
        )
        .expect("extra keys are ignored");
        assert!(!out.contains_key("favouriteColour"));
        assert!(out["attributes"].get("luck").is_none());
    }

    #[test]
    fn partial_nested_record_keeps_other_sub_defaults() {
        let out = validate_record(CHARACTER_SCHEMA, &json!({ "health": { "current": 4 } }))
            .expect("partial health");
        assert_eq!(out["health"], json!({ "current": 4, "max": 10 }));
    }

    #[test]
    fn nested_floor_reports_dotted_path() {
        let err = validate_record(CHARACTER_SCHEMA, &json!({ "attributes": { "wisdom": 0 } }))
            .expect_err("wisdom below floor");
        assert_eq!(err, DomainError::range("attributes.wisdom", 1, 0));
    }

    #[test]
    fn skills_have_no_floor() {
        let out = validate_record(CHARACTER_SCHEMA, &json!({ "skills": { "insight": -2 } }))
            .expect("negative skill is allowed");
        assert_eq!(out["skills"]["insight"], -2);
    }

    #[test]
    fn explicit_null_on_required_field_fails() {
        let err = validate_record(CHARACTER_SCHEMA, &json!({ "level": null }))
            .expect_err("null level");
        assert_eq!(err, DomainError::required("level"));

        let err = validate_record(CHARACTER_SCHEMA, &json!({ "health": { "max": null } }))
            .expect_err("null max health");
        assert_eq!(err, DomainError::required("health.max"));
    }

    #[test]
    fn required_field_without_initial_fails_when_absent() {
        let err = validate_record(NAMELESS, &json!({})).expect_err("no title");
        assert_eq!(err, DomainError::required("title"));

        let out = validate_record(NAMELESS, &json!({ "title": "" })).expect("blank allowed");
        assert_eq!(out["title"], "");
    }

    #[test]
    fn wrong_types_are_rejected() {
        let err = validate_record(CHARACTER_SCHEMA, &json!({ "level": "5" }))
            .expect_err("string level");
        assert_eq!(err, DomainError::invalid_type("level", "integer"));

        let err = validate_record(CHARACTER_SCHEMA, &json!({ "skills": 3 }))
            .expect_err("scalar skills");
        assert_eq!(err, DomainError::invalid_type("skills", "object"));

        let err = validate_record(CHARACTER_SCHEMA, &json!([])).expect_err("array input");
        assert_eq!(err, DomainError::invalid_type(ROOT_PATH, "object"));
    }

    #[test]
    fn integral_floats_are_integers() {
        let out = validate_record(CHARACTER_SCHEMA, &json!({ "level": 4.0 })).expect("4.0");
        assert_eq!(out["level"], 4);

        let err = validate_record(CHARACTER_SCHEMA, &json!({ "level": 4.5 }))
            .expect_err("fractional level");
        assert!(matches!(err, DomainError::InvalidType { .. }));
    }

    #[test]
    fn numbers_outside_i64_are_rejected() {
        let input: Value =
            serde_json::from_str(r#"{ "level": 9223372036854775808 }"#).expect("json");
        let err = validate_record(CHARACTER_SCHEMA, &input).expect_err("2^63 is not an i64");
        assert_eq!(err, DomainError::invalid_type("level", "integer"));

        let err = validate_record(CHARACTER_SCHEMA, &json!({ "actionPoints": 1.0e19 }))
            .expect_err("float above i64");
        assert_eq!(err, DomainError::invalid_type("actionPoints", "integer"));

        let out = validate_record(CHARACTER_SCHEMA, &json!({ "level": i64::MAX }))
            .expect("i64::MAX is representable");
        assert_eq!(out["level"], i64::MAX);
    }

    #[test]
    fn nested_defaults_fill_string_and_integer_sub_fields() {
        let out = validate_record(BANNER, &json!({})).expect("defaults");
        assert_eq!(out["banner"], json!({ "motto": "Onward", "rank": 2 }));

        let out = validate_record(BANNER, &json!({ "banner": { "motto": "Hold" } }))
            .expect("partial banner");
        assert_eq!(out["banner"], json!({ "motto": "Hold", "rank": 2 }));

        let err = validate_record(BANNER, &json!({ "banner": { "motto": "  " } }))
            .expect_err("blank motto");
        assert_eq!(err, DomainError::validation("Motto cannot be empty"));
    }

    #[test]
    fn name_is_trimmed_and_must_not_be_blank() {
        let out = validate_record(CHARACTER_SCHEMA, &json!({ "characterName": "  Ayla " }))
            .expect("padded name");
        assert_eq!(out["characterName"], "Ayla");

        let err = validate_record(CHARACTER_SCHEMA, &json!({ "characterName": " \t" }))
            .expect_err("blank name");
        assert_eq!(
            err,
            DomainError::validation("Character name cannot be empty")
        );
    }

    #[test]
    fn first_violation_in_declaration_order_wins() {
        let err = validate_record(
            CHARACTER_SCHEMA,
            &json!({ "actionPoints": -1, "level": 0 }),
        )
        .expect_err("two violations");
        assert_eq!(err.path(), Some("level"));
    }

    #[test]
    fn validate_field_has_no_fallback() {
        assert_eq!(
            validate_field(&LEVEL_FIELD, &json!(7)).expect("level 7"),
            json!(7)
        );
        assert_eq!(
            validate_field(&LEVEL_FIELD, &json!(0)).expect_err("level 0"),
            DomainError::range("level", 1, 0)
        );
        assert!(matches!(
            validate_field(&LEVEL_FIELD, &Value::Null),
            Err(DomainError::InvalidType { .. })
        ));
    }
}
