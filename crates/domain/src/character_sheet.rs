//! Character Sheet Layout Types
//!
//! Describes how the character sheet view lays out a [`CharacterRecord`]. The
//! layout is derived from the character schema table, so labels and floors
//! shown in the sheet always match what validation enforces.
//!
//! # Design Philosophy
//!
//! - **Presentational only**: the view reads values, it never computes rules
//! - **Field-level granularity**: each field has a type and display hints
//! - **Sections**: fields are grouped into logical sections for UI layout
//! - **Editable mirrors setters**: only top-level scalars are editable

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::character::{Ability, CharacterRecord, SkillKind};
use crate::schema::{FieldDescriptor, FieldType, CHARACTER_SCHEMA};

// =============================================================================
// Sheet Layout
// =============================================================================

/// Complete layout for rendering a character sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetLayout {
    /// Ordered list of sections to display
    pub sections: Vec<SheetSection>,
}

/// A section of the character sheet (e.g., "Attributes", "Skills").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetSection {
    /// Unique section identifier
    pub id: String,
    /// Display label for the section header
    pub label: String,
    /// Type of section (affects layout)
    pub section_type: SectionType,
    /// Fields within this section
    pub fields: Vec<SheetField>,
}

/// Type of section, affects rendering layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionType {
    /// Character info (name, level, action points)
    Identity,
    /// Attribute scores (grid layout)
    AbilityScores,
    /// Skills (list)
    Skills,
    /// Combat stats (health)
    Combat,
    /// Unknown for forward compatibility
    #[serde(other)]
    Unknown,
}

/// Definition of a single field in the sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetField {
    /// Dotted path into the persisted record (e.g. `attributes.strength`)
    pub id: String,
    /// Display label
    pub label: String,
    /// Field data type and rendering hints
    pub field_type: SheetFieldType,
    /// Whether the player can edit this field after creation
    pub editable: bool,
    pub required: bool,
}

/// Type of field data and how to render it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum SheetFieldType {
    /// Plain text input
    Text,
    /// Integer number
    Integer {
        #[serde(default)]
        min: Option<i64>,
    },
    /// Attribute score with modifier display
    AbilityScore {
        #[serde(default)]
        min: Option<i64>,
    },
    /// Skill rank with its governing attribute
    Skill {
        /// Attribute abbreviation (e.g. "DEX")
        ability: String,
    },
    /// Current/max resource bar
    ResourceBar {
        /// ID of the max value field
        max_field: String,
    },
}

impl SheetLayout {
    /// Layout for the character record, derived from its schema.
    pub fn for_character() -> Self {
        let mut identity = SheetSection {
            id: "identity".to_string(),
            label: "Character".to_string(),
            section_type: SectionType::Identity,
            fields: Vec::new(),
        };
        let mut sections = Vec::new();

        for field in CHARACTER_SCHEMA {
            match field.field_type {
                FieldType::Schema { fields, .. } => {
                    let section_type = section_type_for(field.name);
                    sections.push(SheetSection {
                        id: field.name.to_string(),
                        label: field.label.to_string(),
                        section_type,
                        fields: fields
                            .iter()
                            .map(|sub| nested_field(field.name, sub, section_type))
                            .collect(),
                    });
                }
                _ => identity.fields.push(SheetField {
                    id: field.name.to_string(),
                    label: field.label.to_string(),
                    field_type: scalar_type(field),
                    editable: true,
                    required: field.required,
                }),
            }
        }

        sections.insert(0, identity);
        Self { sections }
    }

    /// Iterate every field across sections in display order
    pub fn fields(&self) -> impl Iterator<Item = &SheetField> {
        self.sections.iter().flat_map(|s| s.fields.iter())
    }

    /// Current values of every laid-out field (field id -> value).
    pub fn values(&self, record: &CharacterRecord) -> BTreeMap<String, Value> {
        let data = record.to_value();
        self.fields()
            .filter_map(|field| {
                value_at(&data, &field.id).map(|value| (field.id.clone(), value.clone()))
            })
            .collect()
    }

    /// Derived display values (field id -> value): attribute modifiers.
    pub fn calculated(&self, record: &CharacterRecord) -> BTreeMap<String, Value> {
        Ability::all()
            .into_iter()
            .map(|ability| {
                (
                    format!("attributes.{}", ability.key()),
                    Value::from(record.attributes().modifier(ability)),
                )
            })
            .collect()
    }
}

fn section_type_for(name: &str) -> SectionType {
    match name {
        "attributes" => SectionType::AbilityScores,
        "skills" => SectionType::Skills,
        "health" => SectionType::Combat,
        _ => SectionType::Unknown,
    }
}

fn scalar_type(field: &FieldDescriptor) -> SheetFieldType {
    match field.field_type {
        FieldType::String { .. } => SheetFieldType::Text,
        _ => SheetFieldType::Integer { min: field.min() },
    }
}

fn nested_field(parent: &str, field: &FieldDescriptor, section: SectionType) -> SheetField {
    let field_type = match section {
        SectionType::AbilityScores => SheetFieldType::AbilityScore { min: field.min() },
        SectionType::Skills => match SkillKind::from_key(field.name) {
            Some(skill) => SheetFieldType::Skill {
                ability: skill.ability().abbreviation().to_string(),
            },
            None => scalar_type(field),
        },
        SectionType::Combat if field.name == "current" => SheetFieldType::ResourceBar {
            max_field: format!("{parent}.max"),
        },
        _ => scalar_type(field),
    };
    SheetField {
        id: format!("{parent}.{}", field.name),
        label: field.label.to_string(),
        field_type,
        editable: false,
        required: field.required,
    }
}

fn value_at<'a>(data: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(data, |value, key| value.get(key))
}

// =============================================================================
// Tests
// =============================================================================
