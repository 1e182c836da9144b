//! Loading character files from disk.
//!
//! A file holds either a full actor document (it has an `_id` or a `system`
//! key) or a bare system record. Bare records are wrapped in a new actor named after the
//! record's character name.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde_json::Value;

use forward_domain::schema::DEFAULT_CHARACTER_NAME;
use forward_module::{ActorDocument, DocumentError};

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid JSON in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    Document(#[from] DocumentError),
}

/// Read and validate a character file.
pub fn load_character(path: &Path, now: DateTime<Utc>) -> Result<ActorDocument, LoadError> {
    let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let value: Value = serde_json::from_str(&text).map_err(|source| LoadError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    if is_actor_document(&value) {
        tracing::debug!(path = %path.display(), "Loading actor document");
        return Ok(ActorDocument::from_json(&text)?);
    }

    tracing::debug!(path = %path.display(), "Loading bare character record");
    let name = value
        .get("characterName")
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
        .unwrap_or(DEFAULT_CHARACTER_NAME);
    Ok(ActorDocument::create(name, &value, now)?)
}

/// Bare records may carry any extra key, including `type`.
fn is_actor_document(value: &Value) -> bool {
    value.get("_id").is_some() || value.get("system").is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(contents.as_bytes()).expect("write temp file");
        file
    }

    #[test]
    fn loads_bare_record() {
        let file = write_temp(r#"{ "characterName": " Ayla ", "level": 4 }"#);
        let actor = load_character(file.path(), Utc::now()).expect("valid record");
        assert_eq!(actor.name(), "Ayla");
        assert_eq!(actor.system().character_name(), "Ayla");
        assert_eq!(actor.system().level(), 4);
    }

    #[test]
    fn empty_record_gets_default_name() {
        let file = write_temp("{}");
        let actor = load_character(file.path(), Utc::now()).expect("defaults");
        assert_eq!(actor.name(), "New Character");
    }

    #[test]
    fn loads_actor_document() {
        let file = write_temp(
            r#"{
                "_id": "9f1c2d3e-4b5a-4c6d-8e7f-0a1b2c3d4e5f",
                "name": "Mira",
                "type": "character",
                "system": { "actionPoints": 5 }
            }"#,
        );
        let actor = load_character(file.path(), Utc::now()).expect("actor");
        assert_eq!(actor.name(), "Mira");
        assert_eq!(actor.system().action_points(), 5);
    }

    #[test]
    fn bare_record_with_type_key_is_not_an_actor() {
        let file = write_temp(r#"{ "type": "hero", "characterName": "Ayla", "level": 2 }"#);
        let actor = load_character(file.path(), Utc::now()).expect("extra keys are ignored");
        assert_eq!(actor.name(), "Ayla");
        assert_eq!(actor.document_type(), "character");
        assert_eq!(actor.system().level(), 2);
    }

    #[test]
    fn document_without_id_is_still_an_actor() {
        let file = write_temp(r#"{ "name": "Mira", "type": "character", "system": {} }"#);
        assert!(matches!(
            load_character(file.path(), Utc::now()),
            Err(LoadError::Document(DocumentError::Parse(_)))
        ));
    }

    #[test]
    fn invalid_record_is_reported() {
        let file = write_temp(r#"{ "level": 0 }"#);
        let err = load_character(file.path(), Utc::now()).expect_err("level 0");
        assert!(matches!(err, LoadError::Document(_)));
        assert!(err.to_string().contains("level"));
    }

    #[test]
    fn missing_file_and_bad_json() {
        let dir = tempfile::tempdir().expect("temp dir");
        let missing = dir.path().join("missing.json");
        assert!(matches!(
            load_character(&missing, Utc::now()),
            Err(LoadError::Io { .. })
        ));

        let file = write_temp("{ nope");
        assert!(matches!(
            load_character(file.path(), Utc::now()),
            Err(LoadError::Json { .. })
        ));
    }
}
