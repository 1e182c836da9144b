//! Declarative field descriptors for persisted records
//!
//! A schema is a static table of [`FieldDescriptor`]s. Each descriptor names a
//! field, states whether it is required, and carries the type-specific options
//! the host understands (`initial`, `min`, `blank`, `trim`). The table is data:
//! one generic routine in [`crate::validate`] interprets any table, so new
//! record shapes never need new validation code.
//!
//! # Field kinds
//!
//! - `String`: text with an optional initial value, optional trimming, and a
//!   `blank` flag controlling whether an empty (post-trim) string is accepted
//! - `Integer`: whole number with an optional initial value and floor
//! - `Schema`: nested record of scalar sub-fields, with optional per-key
//!   defaults that take precedence over the sub-field initials

use serde_json::{json, Map, Value};

// =============================================================================
// Character defaults and floors
// =============================================================================

pub const DEFAULT_CHARACTER_NAME: &str = "New Character";
pub const DEFAULT_LEVEL: i64 = 1;
pub const MIN_LEVEL: i64 = 1;
pub const DEFAULT_ATTRIBUTE: i64 = 10;
pub const MIN_ATTRIBUTE: i64 = 1;
pub const DEFAULT_SKILL: i64 = 0;
pub const DEFAULT_HEALTH: i64 = 10;
pub const DEFAULT_ACTION_POINTS: i64 = 3;
pub const MIN_ACTION_POINTS: i64 = 0;

// =============================================================================
// Descriptors
// =============================================================================

/// A scalar literal usable in a const schema table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scalar {
    Str(&'static str),
    Int(i64),
}

impl Scalar {
    pub fn to_value(self) -> Value {
        match self {
            Scalar::Str(s) => Value::from(s),
            Scalar::Int(n) => Value::from(n),
        }
    }
}

/// Type of a field and its type-specific options.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldType {
    String {
        initial: Option<&'static str>,
        /// Whether an empty string is an acceptable value
        blank: bool,
        /// Whether surrounding whitespace is stripped before storage
        trim: bool,
    },
    Integer {
        initial: Option<i64>,
        min: Option<i64>,
    },
    Schema {
        fields: &'static [FieldDescriptor],
        /// Per-key defaults, consulted before each sub-field's own initial
        defaults: &'static [(&'static str, Scalar)],
    },
}

impl FieldType {
    /// Short name used in error messages and schema descriptions
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldType::String { .. } => "string",
            FieldType::Integer { .. } => "integer",
            FieldType::Schema { .. } => "object",
        }
    }
}

/// Declarative specification of a single field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldDescriptor {
    /// Key in the persisted record (camelCase)
    pub name: &'static str,
    /// Human-readable label
    pub label: &'static str,
    pub required: bool,
    /// Whether an explicit `null` is a legal stored value
    pub nullable: bool,
    pub field_type: FieldType,
}

impl FieldDescriptor {
    /// Required, non-blank, trimmed string field
    pub const fn string(name: &'static str, label: &'static str, initial: &'static str) -> Self {
        Self {
            name,
            label,
            required: true,
            nullable: false,
            field_type: FieldType::String {
                initial: Some(initial),
                blank: false,
                trim: true,
            },
        }
    }

    /// Required integer field with an optional floor
    pub const fn integer(
        name: &'static str,
        label: &'static str,
        initial: i64,
        min: Option<i64>,
    ) -> Self {
        Self {
            name,
            label,
            required: true,
            nullable: false,
            field_type: FieldType::Integer {
                initial: Some(initial),
                min,
            },
        }
    }

    /// Required nested record with no per-key defaults
    pub const fn schema(
        name: &'static str,
        label: &'static str,
        fields: &'static [FieldDescriptor],
    ) -> Self {
        Self {
            name,
            label,
            required: true,
            nullable: false,
            field_type: FieldType::Schema {
                fields,
                defaults: &[],
            },
        }
    }

    /// Numeric floor, if any
    pub fn min(&self) -> Option<i64> {
        match self.field_type {
            FieldType::Integer { min, .. } => min,
            _ => None,
        }
    }

    /// Value used when the input omits this field.
    ///
    /// For nested records, each sub-field resolves to the nested default for
    /// its key, falling back to the sub-field's own initial. Sub-fields with
    /// neither are left out.
    pub fn initial_value(&self) -> Option<Value> {
        match self.field_type {
            FieldType::String { initial, .. } => initial.map(Value::from),
            FieldType::Integer { initial, .. } => initial.map(Value::from),
            FieldType::Schema { fields, defaults } => {
                let mut map = Map::new();
                for field in fields {
                    if let Some(value) = nested_default(defaults, field.name)
                        .or_else(|| field.initial_value())
                    {
                        map.insert(field.name.to_string(), value);
                    }
                }
                Some(Value::Object(map))
            }
        }
    }
}

/// Look up a per-key default in a nested schema's defaults table
pub(crate) fn nested_default(defaults: &[(&'static str, Scalar)], key: &str) -> Option<Value> {
    defaults
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, value)| value.to_value())
}

/// Find a field by name
pub fn lookup<'a>(fields: &'a [FieldDescriptor], name: &str) -> Option<&'a FieldDescriptor> {
    fields.iter().find(|f| f.name == name)
}

/// Render a schema table as JSON, keyed by field name.
pub fn describe_schema(fields: &[FieldDescriptor]) -> Value {
    let mut out = Map::new();
    for field in fields {
        let mut entry = json!({
            "type": field.field_type.type_name(),
            "label": field.label,
            "required": field.required,
            "nullable": field.nullable,
        });
        if let Value::Object(ref mut obj) = entry {
            match field.field_type {
                FieldType::String {
                    initial,
                    blank,
                    trim,
                } => {
                    obj.insert("initial".into(), json!(initial));
                    obj.insert("blank".into(), json!(blank));
                    obj.insert("trim".into(), json!(trim));
                }
                FieldType::Integer { initial, min } => {
                    obj.insert("initial".into(), json!(initial));
                    if let Some(min) = min {
                        obj.insert("min".into(), json!(min));
                    }
                }
                FieldType::Schema { fields, .. } => {
                    obj.insert("fields".into(), describe_schema(fields));
                }
            }
        }
        out.insert(field.name.to_string(), entry);
    }
    Value::Object(out)
}

// =============================================================================
// Character schema
// =============================================================================

const ATTRIBUTE_FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::integer("strength", "Strength", DEFAULT_ATTRIBUTE, Some(MIN_ATTRIBUTE)),
    FieldDescriptor::integer("dexterity", "Dexterity", DEFAULT_ATTRIBUTE, Some(MIN_ATTRIBUTE)),
    FieldDescriptor::integer(
        "constitution",
        "Constitution",
        DEFAULT_ATTRIBUTE,
        Some(MIN_ATTRIBUTE),
    ),
    FieldDescriptor::integer(
        "intelligence",
        "Intelligence",
        DEFAULT_ATTRIBUTE,
        Some(MIN_ATTRIBUTE),
    ),
    FieldDescriptor::integer("wisdom", "Wisdom", DEFAULT_ATTRIBUTE, Some(MIN_ATTRIBUTE)),
    FieldDescriptor::integer("charisma", "Charisma", DEFAULT_ATTRIBUTE, Some(MIN_ATTRIBUTE)),
];

const SKILL_FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::integer("acrobatics", "Acrobatics", DEFAULT_SKILL, None),
    FieldDescriptor::integer("athletics", "Athletics", DEFAULT_SKILL, None),
    FieldDescriptor::integer("deception", "Deception", DEFAULT_SKILL, None),
    FieldDescriptor::integer("insight", "Insight", DEFAULT_SKILL, None),
    FieldDescriptor::integer("intimidation", "Intimidation", DEFAULT_SKILL, None),
    FieldDescriptor::integer("investigation", "Investigation", DEFAULT_SKILL, None),
];

const HEALTH_FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::integer("current", "Current", DEFAULT_HEALTH, None),
    FieldDescriptor::integer("max", "Max", DEFAULT_HEALTH, None),
];

pub const CHARACTER_NAME_FIELD: FieldDescriptor =
    FieldDescriptor::string("characterName", "Character name", DEFAULT_CHARACTER_NAME);

pub const LEVEL_FIELD: FieldDescriptor =
    FieldDescriptor::integer("level", "Level", DEFAULT_LEVEL, Some(MIN_LEVEL));

pub const ACTION_POINTS_FIELD: FieldDescriptor = FieldDescriptor::integer(
    "actionPoints",
    "Action points",
    DEFAULT_ACTION_POINTS,
    Some(MIN_ACTION_POINTS),
);

/// Schema of the persisted character record.
pub const CHARACTER_SCHEMA: &[FieldDescriptor] = &[
    CHARACTER_NAME_FIELD,
    LEVEL_FIELD,
    FieldDescriptor::schema("attributes", "Attributes", ATTRIBUTE_FIELDS),
    FieldDescriptor::schema("skills", "Skills", SKILL_FIELDS),
    FieldDescriptor::schema("health", "Health", HEALTH_FIELDS),
    ACTION_POINTS_FIELD,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn character_schema_declares_six_fields_in_order() {
        let names: Vec<&str> = CHARACTER_SCHEMA.iter().map(|f| f.name).collect();
        assert_eq!(
            names,
            vec![
                "characterName",
                "level",
                "attributes",
                "skills",
                "health",
                "actionPoints"
            ]
        );
        assert!(CHARACTER_SCHEMA.iter().all(|f| f.required));
    }

    #[test]
    fn floors_match_data_model() {
        assert_eq!(lookup(CHARACTER_SCHEMA, "level").and_then(|f| f.min()), Some(1));
        assert_eq!(
            lookup(CHARACTER_SCHEMA, "actionPoints").and_then(|f| f.min()),
            Some(0)
        );
        assert_eq!(
            lookup(CHARACTER_SCHEMA, "characterName").and_then(|f| f.min()),
            None
        );
    }

    #[test]
    fn nested_initial_value_collects_sub_field_initials() {
        let health = lookup(CHARACTER_SCHEMA, "health").expect("health field");
        assert_eq!(
            health.initial_value(),
            Some(json!({ "current": 10, "max": 10 }))
        );
    }

    #[test]
    fn nested_defaults_take_precedence_over_sub_field_initials() {
        const POOL: &[FieldDescriptor] = &[
            FieldDescriptor::integer("current", "Current", 1, None),
            FieldDescriptor::integer("max", "Max", 1, None),
        ];
        let field = FieldDescriptor {
            name: "pool",
            label: "Pool",
            required: true,
            nullable: false,
            field_type: FieldType::Schema {
                fields: POOL,
                defaults: &[("max", Scalar::Int(6))],
            },
        };
        assert_eq!(field.initial_value(), Some(json!({ "current": 1, "max": 6 })));
    }

    #[test]
    fn describe_schema_exposes_options() {
        let described = describe_schema(CHARACTER_SCHEMA);
        assert_eq!(described["characterName"]["type"], "string");
        assert_eq!(described["characterName"]["initial"], "New Character");
        assert_eq!(described["characterName"]["blank"], false);
        assert_eq!(described["level"]["min"], 1);
        assert_eq!(described["attributes"]["fields"]["wisdom"]["initial"], 10);
        assert!(described["skills"]["fields"]["insight"].get("min").is_none());
    }
}
