//! Actor document adapter
//!
//! The host stores each character as an actor document whose `system` payload
//! is the [`CharacterRecord`] layout. This adapter composes the record rather
//! than extending a host base class: the record stays host-agnostic and the
//! document only adds identity, type, and bookkeeping.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use forward_domain::{CharacterName, CharacterRecord, DomainError, FieldUpdate};

use crate::ids::ActorId;

/// Document type key the character record is registered under
pub const CHARACTER_TYPE: &str = "character";

#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error("Invalid document JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Unsupported document type: {0}")]
    UnsupportedType(String),
}

/// A character actor as the host persists it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActorDocument {
    #[serde(rename = "_id")]
    id: ActorId,
    name: String,
    #[serde(rename = "type")]
    document_type: String,
    system: CharacterRecord,
    #[serde(skip_serializing_if = "Option::is_none")]
    updated_at: Option<DateTime<Utc>>,
}

/// Stored form before the system payload is validated
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredActor {
    #[serde(rename = "_id")]
    id: ActorId,
    name: String,
    #[serde(rename = "type")]
    document_type: String,
    #[serde(default = "empty_system")]
    system: Value,
    #[serde(default)]
    updated_at: Option<DateTime<Utc>>,
}

fn empty_system() -> Value {
    Value::Object(serde_json::Map::new())
}

impl ActorDocument {
    /// Create a new character actor from a (possibly partial) system payload.
    pub fn create(
        name: impl Into<String>,
        system: &Value,
        now: DateTime<Utc>,
    ) -> Result<Self, DocumentError> {
        let name = CharacterName::new(name)?;
        let system = CharacterRecord::from_value(system)?;
        Ok(Self {
            id: ActorId::new(),
            name: name.into(),
            document_type: CHARACTER_TYPE.to_string(),
            system,
            updated_at: Some(now),
        })
    }

    /// Load a stored actor, validating its name and system payload.
    ///
    /// A missing `system` key yields a record of defaults. The actor name is
    /// held to the same rules as [`ActorDocument::create`].
    pub fn from_json(json: &str) -> Result<Self, DocumentError> {
        let stored: StoredActor = serde_json::from_str(json)?;
        if stored.document_type != CHARACTER_TYPE {
            return Err(DocumentError::UnsupportedType(stored.document_type));
        }
        let name = CharacterName::new(stored.name)?;
        let system = CharacterRecord::from_value(&stored.system)?;
        Ok(Self {
            id: stored.id,
            name: name.into(),
            document_type: stored.document_type,
            system,
            updated_at: stored.updated_at,
        })
    }

    pub fn to_json(&self) -> Result<String, DocumentError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn id(&self) -> ActorId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn document_type(&self) -> &str {
        &self.document_type
    }

    pub fn system(&self) -> &CharacterRecord {
        &self.system
    }

    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    /// Apply field updates to the system record, all or nothing.
    pub fn update_system(
        &mut self,
        updates: &[FieldUpdate],
        now: DateTime<Utc>,
    ) -> Result<(), DocumentError> {
        self.system.apply_updates(updates)?;
        self.updated_at = Some(now);
        tracing::debug!(actor_id = %self.id, fields = updates.len(), "Updated actor system data");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0)
            .single()
            .expect("valid timestamp")
    }

    #[test]
    fn create_fills_system_defaults() {
        let actor = ActorDocument::create("Ayla", &json!({ "level": 2 }), fixed_time())
            .expect("valid actor");
        assert_eq!(actor.name(), "Ayla");
        assert_eq!(actor.document_type(), "character");
        assert_eq!(actor.system().level(), 2);
        assert_eq!(actor.system().character_name(), "New Character");
        assert_eq!(actor.updated_at(), Some(fixed_time()));
    }

    #[test]
    fn create_rejects_invalid_system() {
        let err = ActorDocument::create("Ayla", &json!({ "actionPoints": -1 }), fixed_time())
            .expect_err("negative action points");
        assert!(matches!(
            err,
            DocumentError::Domain(DomainError::Range { .. })
        ));
    }

    #[test]
    fn stored_json_round_trips() {
        let actor = ActorDocument::create(
            "Ayla",
            &json!({ "characterName": "Ayla the Bold", "skills": { "insight": 3 } }),
            fixed_time(),
        )
        .expect("valid actor");
        let text = actor.to_json().expect("serialize");
        assert!(text.contains("\"_id\""));
        assert!(text.contains("\"type\": \"character\""));
        assert!(text.contains("\"characterName\": \"Ayla the Bold\""));

        let loaded = ActorDocument::from_json(&text).expect("reload");
        assert_eq!(loaded, actor);
    }

    #[test]
    fn missing_system_uses_defaults() {
        let json = r#"{
            "_id": "9f1c2d3e-4b5a-4c6d-8e7f-0a1b2c3d4e5f",
            "name": "Fresh",
            "type": "character"
        }"#;
        let actor = ActorDocument::from_json(json).expect("defaults");
        assert_eq!(actor.system(), &CharacterRecord::default());
        assert_eq!(actor.updated_at(), None);
    }

    #[test]
    fn other_document_types_are_rejected() {
        let json = r#"{
            "_id": "9f1c2d3e-4b5a-4c6d-8e7f-0a1b2c3d4e5f",
            "name": "Goblin",
            "type": "npc",
            "system": {}
        }"#;
        assert!(matches!(
            ActorDocument::from_json(json),
            Err(DocumentError::UnsupportedType(t)) if t == "npc"
        ));
    }

    #[test]
    fn stored_name_is_trimmed_and_must_not_be_blank() {
        let padded = r#"{
            "_id": "9f1c2d3e-4b5a-4c6d-8e7f-0a1b2c3d4e5f",
            "name": "  Mira  ",
            "type": "character"
        }"#;
        let actor = ActorDocument::from_json(padded).expect("padded name");
        assert_eq!(actor.name(), "Mira");

        let blank = r#"{
            "_id": "9f1c2d3e-4b5a-4c6d-8e7f-0a1b2c3d4e5f",
            "name": "   ",
            "type": "character"
        }"#;
        assert!(matches!(
            ActorDocument::from_json(blank),
            Err(DocumentError::Domain(DomainError::Validation(_)))
        ));
    }

    #[test]
    fn stored_system_is_validated() {
        let json = r#"{
            "_id": "9f1c2d3e-4b5a-4c6d-8e7f-0a1b2c3d4e5f",
            "name": "Broken",
            "type": "character",
            "system": { "level": 0 }
        }"#;
        assert!(matches!(
            ActorDocument::from_json(json),
            Err(DocumentError::Domain(DomainError::Range { .. }))
        ));
    }

    #[test]
    fn update_system_is_atomic() {
        let created = fixed_time();
        let later = created + chrono::Duration::minutes(5);
        let mut actor = ActorDocument::create("Ayla", &json!({}), created).expect("valid actor");

        actor
            .update_system(&[FieldUpdate::new("level", 3)], later)
            .expect("level 3");
        assert_eq!(actor.system().level(), 3);
        assert_eq!(actor.updated_at(), Some(later));

        let before = actor.clone();
        let err = actor
            .update_system(
                &[
                    FieldUpdate::new("actionPoints", 1),
                    FieldUpdate::new("characterName", "  "),
                ],
                later + chrono::Duration::minutes(1),
            )
            .expect_err("blank name");
        assert!(matches!(
            err,
            DocumentError::Domain(DomainError::Validation(_))
        ));
        assert_eq!(actor, before);
    }
}
