//! Character record - the validated per-character state the host persists
//!
//! A record is built once from a partial JSON input through
//! [`CharacterRecord::from_value`]; every field is present afterwards. Only
//! the top-level scalars (`characterName`, `level`, `actionPoints`) can be
//! changed later, and each write is re-validated. The nested records are
//! read-only after construction.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::DomainError;
use crate::schema::{
    FieldDescriptor, ACTION_POINTS_FIELD, CHARACTER_NAME_FIELD, CHARACTER_SCHEMA,
    DEFAULT_ACTION_POINTS, DEFAULT_ATTRIBUTE, DEFAULT_HEALTH, DEFAULT_LEVEL, DEFAULT_SKILL,
    LEVEL_FIELD,
};
use crate::validate::{validate_field, validate_record};
use crate::value_objects::CharacterName;

// =============================================================================
// Abilities
// =============================================================================

/// The six attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Ability {
    Strength,
    Dexterity,
    Constitution,
    Intelligence,
    Wisdom,
    Charisma,
}

impl Ability {
    pub fn all() -> [Ability; 6] {
        [
            Ability::Strength,
            Ability::Dexterity,
            Ability::Constitution,
            Ability::Intelligence,
            Ability::Wisdom,
            Ability::Charisma,
        ]
    }

    /// Key in the persisted `attributes` record
    pub fn key(&self) -> &'static str {
        match self {
            Ability::Strength => "strength",
            Ability::Dexterity => "dexterity",
            Ability::Constitution => "constitution",
            Ability::Intelligence => "intelligence",
            Ability::Wisdom => "wisdom",
            Ability::Charisma => "charisma",
        }
    }

    /// Display name, as the schema labels the attribute
    pub fn label(&self) -> &'static str {
        match self {
            Ability::Strength => "Strength",
            Ability::Dexterity => "Dexterity",
            Ability::Constitution => "Constitution",
            Ability::Intelligence => "Intelligence",
            Ability::Wisdom => "Wisdom",
            Ability::Charisma => "Charisma",
        }
    }

    pub fn abbreviation(&self) -> &'static str {
        match self {
            Ability::Strength => "STR",
            Ability::Dexterity => "DEX",
            Ability::Constitution => "CON",
            Ability::Intelligence => "INT",
            Ability::Wisdom => "WIS",
            Ability::Charisma => "CHA",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::all().into_iter().find(|a| a.key() == key)
    }
}

impl fmt::Display for Ability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.abbreviation())
    }
}

/// The six trained skills
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkillKind {
    Acrobatics,
    Athletics,
    Deception,
    Insight,
    Intimidation,
    Investigation,
}

impl SkillKind {
    pub fn all() -> [SkillKind; 6] {
        [
            SkillKind::Acrobatics,
            SkillKind::Athletics,
            SkillKind::Deception,
            SkillKind::Insight,
            SkillKind::Intimidation,
            SkillKind::Investigation,
        ]
    }

    /// Key in the persisted `skills` record
    pub fn key(&self) -> &'static str {
        match self {
            SkillKind::Acrobatics => "acrobatics",
            SkillKind::Athletics => "athletics",
            SkillKind::Deception => "deception",
            SkillKind::Insight => "insight",
            SkillKind::Intimidation => "intimidation",
            SkillKind::Investigation => "investigation",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SkillKind::Acrobatics => "Acrobatics",
            SkillKind::Athletics => "Athletics",
            SkillKind::Deception => "Deception",
            SkillKind::Insight => "Insight",
            SkillKind::Intimidation => "Intimidation",
            SkillKind::Investigation => "Investigation",
        }
    }

    /// Attribute the skill is usually rolled with
    pub fn ability(&self) -> Ability {
        match self {
            SkillKind::Acrobatics => Ability::Dexterity,
            SkillKind::Athletics => Ability::Strength,
            SkillKind::Deception | SkillKind::Intimidation => Ability::Charisma,
            SkillKind::Insight => Ability::Wisdom,
            SkillKind::Investigation => Ability::Intelligence,
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::all().into_iter().find(|s| s.key() == key)
    }
}

// =============================================================================
// Nested records
// =============================================================================

/// Attribute scores, each at least 1 when part of a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attributes {
    pub strength: i64,
    pub dexterity: i64,
    pub constitution: i64,
    pub intelligence: i64,
    pub wisdom: i64,
    pub charisma: i64,
}

impl Attributes {
    pub fn get(&self, ability: Ability) -> i64 {
        match ability {
            Ability::Strength => self.strength,
            Ability::Dexterity => self.dexterity,
            Ability::Constitution => self.constitution,
            Ability::Intelligence => self.intelligence,
            Ability::Wisdom => self.wisdom,
            Ability::Charisma => self.charisma,
        }
    }

    /// Ability modifier: floor((score - 10) / 2)
    pub fn modifier(&self, ability: Ability) -> i64 {
        (self.get(ability) - 10).div_euclid(2)
    }
}

impl Default for Attributes {
    fn default() -> Self {
        Self {
            strength: DEFAULT_ATTRIBUTE,
            dexterity: DEFAULT_ATTRIBUTE,
            constitution: DEFAULT_ATTRIBUTE,
            intelligence: DEFAULT_ATTRIBUTE,
            wisdom: DEFAULT_ATTRIBUTE,
            charisma: DEFAULT_ATTRIBUTE,
        }
    }
}

/// Skill ranks (no floor)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skills {
    pub acrobatics: i64,
    pub athletics: i64,
    pub deception: i64,
    pub insight: i64,
    pub intimidation: i64,
    pub investigation: i64,
}

impl Skills {
    pub fn get(&self, skill: SkillKind) -> i64 {
        match skill {
            SkillKind::Acrobatics => self.acrobatics,
            SkillKind::Athletics => self.athletics,
            SkillKind::Deception => self.deception,
            SkillKind::Insight => self.insight,
            SkillKind::Intimidation => self.intimidation,
            SkillKind::Investigation => self.investigation,
        }
    }
}

impl Default for Skills {
    fn default() -> Self {
        Self {
            acrobatics: DEFAULT_SKILL,
            athletics: DEFAULT_SKILL,
            deception: DEFAULT_SKILL,
            insight: DEFAULT_SKILL,
            intimidation: DEFAULT_SKILL,
            investigation: DEFAULT_SKILL,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Health {
    pub current: i64,
    pub max: i64,
}

impl Default for Health {
    fn default() -> Self {
        Self {
            current: DEFAULT_HEALTH,
            max: DEFAULT_HEALTH,
        }
    }
}

// =============================================================================
// Field updates
// =============================================================================

/// Update to a single top-level field, addressed by its persisted key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldUpdate {
    pub field_id: String,
    pub value: Value,
}

impl FieldUpdate {
    pub fn new(field_id: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            field_id: field_id.into(),
            value: value.into(),
        }
    }
}

// =============================================================================
// CharacterRecord
// =============================================================================

/// Validated character state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "Value")]
pub struct CharacterRecord {
    character_name: CharacterName,
    level: i64,
    attributes: Attributes,
    skills: Skills,
    health: Health,
    action_points: i64,
}

/// Typed view of an already-normalized record
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RecordData {
    character_name: CharacterName,
    level: i64,
    attributes: Attributes,
    skills: Skills,
    health: Health,
    action_points: i64,
}

impl From<RecordData> for CharacterRecord {
    fn from(data: RecordData) -> Self {
        Self {
            character_name: data.character_name,
            level: data.level,
            attributes: data.attributes,
            skills: data.skills,
            health: data.health,
            action_points: data.action_points,
        }
    }
}

impl CharacterRecord {
    /// Build a record from a partial input object.
    ///
    /// Absent fields take their defaults and unknown keys are ignored.
    ///
    /// # Errors
    ///
    /// - `DomainError::RequiredField` if a required field is explicitly null
    /// - `DomainError::Range` if `level`, `actionPoints` or an attribute is below its floor
    /// - `DomainError::Validation` if the character name is blank
    /// - `DomainError::InvalidType` if a value has the wrong JSON type
    pub fn from_value(input: &Value) -> Result<Self, DomainError> {
        let normalized = validate_record(CHARACTER_SCHEMA, input)?;
        let data: RecordData = serde_json::from_value(Value::Object(normalized))?;
        Ok(data.into())
    }

    /// Parse and build a record from JSON text.
    pub fn from_json(json: &str) -> Result<Self, DomainError> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(&value)
    }

    /// Persisted layout of the record.
    pub fn to_value(&self) -> Value {
        serde_json::json!({
            "characterName": self.character_name.as_str(),
            "level": self.level,
            "attributes": self.attributes,
            "skills": self.skills,
            "health": self.health,
            "actionPoints": self.action_points,
        })
    }

    pub fn character_name(&self) -> &str {
        self.character_name.as_str()
    }

    pub fn level(&self) -> i64 {
        self.level
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    pub fn skills(&self) -> &Skills {
        &self.skills
    }

    pub fn health(&self) -> &Health {
        &self.health
    }

    pub fn action_points(&self) -> i64 {
        self.action_points
    }

    /// Set the character name, trimmed. Blank names are rejected.
    pub fn set_character_name(&mut self, value: impl Into<String>) -> Result<(), DomainError> {
        self.character_name = CharacterName::new(value)?;
        Ok(())
    }

    /// Set the level. Values below 1 are rejected, never clamped.
    pub fn set_level(&mut self, value: i64) -> Result<(), DomainError> {
        validate_field(&LEVEL_FIELD, &Value::from(value))?;
        self.level = value;
        Ok(())
    }

    /// Set the action points. Negative values are rejected, never clamped.
    pub fn set_action_points(&mut self, value: i64) -> Result<(), DomainError> {
        validate_field(&ACTION_POINTS_FIELD, &Value::from(value))?;
        self.action_points = value;
        Ok(())
    }

    /// Apply one field update through the matching setter.
    ///
    /// Nested records are read-only after construction, so updates naming
    /// `attributes`, `skills` or `health` are rejected like unknown fields.
    pub fn apply_update(&mut self, update: &FieldUpdate) -> Result<(), DomainError> {
        match update.field_id.as_str() {
            "characterName" => {
                let name = update.value.as_str().ok_or_else(|| {
                    DomainError::invalid_type(CHARACTER_NAME_FIELD.name, "string")
                })?;
                self.set_character_name(name)
            }
            "level" => self.set_level(integer_value(&LEVEL_FIELD, &update.value)?),
            "actionPoints" => {
                self.set_action_points(integer_value(&ACTION_POINTS_FIELD, &update.value)?)
            }
            "attributes" | "skills" | "health" => Err(DomainError::validation(format!(
                "{} is read-only after creation",
                update.field_id
            ))),
            other => Err(DomainError::validation(format!("Unknown field: {other}"))),
        }
    }

    /// Apply several updates atomically: on error nothing is changed.
    pub fn apply_updates(&mut self, updates: &[FieldUpdate]) -> Result<(), DomainError> {
        let mut next = self.clone();
        for update in updates {
            next.apply_update(update)?;
        }
        *self = next;
        Ok(())
    }
}

fn integer_value(field: &FieldDescriptor, value: &Value) -> Result<i64, DomainError> {
    validate_field(field, value)?
        .as_i64()
        .ok_or_else(|| DomainError::invalid_type(field.name, "integer"))
}

impl Default for CharacterRecord {
    fn default() -> Self {
        Self {
            character_name: CharacterName::default(),
            level: DEFAULT_LEVEL,
            attributes: Attributes::default(),
            skills: Skills::default(),
            health: Health::default(),
            action_points: DEFAULT_ACTION_POINTS,
        }
    }
}

impl TryFrom<Value> for CharacterRecord {
    type Error = DomainError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::from_value(&value)
    }
}

// =============================================================================
// Tests
// =============================================================================
