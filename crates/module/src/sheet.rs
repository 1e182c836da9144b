//! Character sheet application shell
//!
//! The sheet is presentational: it binds an actor, reads the record through
//! [`SheetLayout`], and produces a [`SheetView`] for the host renderer. It
//! holds no rules of its own.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use forward_domain::{SectionType, SheetLayout};

use crate::document::ActorDocument;

pub const DEFAULT_SHEET_ID: &str = "project-forward-character-sheet";
pub const DEFAULT_SHEET_TITLE: &str = "Character Sheet";
pub const DEFAULT_SHEET_WIDTH: u32 = 800;
pub const DEFAULT_SHEET_HEIGHT: u32 = 600;

// =============================================================================
// Options
// =============================================================================

/// Window options the host uses when opening the sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetOptions {
    pub id: String,
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub resizable: bool,
}

impl Default for SheetOptions {
    fn default() -> Self {
        Self {
            id: DEFAULT_SHEET_ID.to_string(),
            title: DEFAULT_SHEET_TITLE.to_string(),
            width: DEFAULT_SHEET_WIDTH,
            height: DEFAULT_SHEET_HEIGHT,
            resizable: true,
        }
    }
}

/// Partial options; set fields replace the defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetOptionOverrides {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub resizable: Option<bool>,
}

impl SheetOptions {
    /// Merge overrides over these options
    pub fn merge(mut self, overrides: &SheetOptionOverrides) -> Self {
        if let Some(id) = &overrides.id {
            self.id = id.clone();
        }
        if let Some(title) = &overrides.title {
            self.title = title.clone();
        }
        if let Some(width) = overrides.width {
            self.width = width;
        }
        if let Some(height) = overrides.height {
            self.height = height;
        }
        if let Some(resizable) = overrides.resizable {
            self.resizable = resizable;
        }
        self
    }
}

// =============================================================================
// Rendered view
// =============================================================================

/// What the host renderer receives for one open sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetView {
    pub sheet_id: String,
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub resizable: bool,
    pub actor_name: String,
    pub sections: Vec<SectionView>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionView {
    pub id: String,
    pub label: String,
    pub section_type: SectionType,
    pub fields: Vec<FieldView>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldView {
    pub id: String,
    pub label: String,
    pub value: Value,
    /// Derived display value (e.g. attribute modifier)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calculated: Option<Value>,
    pub editable: bool,
}

/// Data handed to the view component
#[derive(Debug, Clone, Copy)]
pub struct SheetData<'a> {
    pub actor: Option<&'a ActorDocument>,
}

// =============================================================================
// Application
// =============================================================================

/// The character sheet application registered as the default sheet.
#[derive(Debug, Clone)]
pub struct CharacterSheetApplication {
    options: SheetOptions,
    layout: SheetLayout,
    actor: Option<ActorDocument>,
}

impl CharacterSheetApplication {
    /// Name the host lists this sheet under
    pub const SHEET_CLASS: &'static str = "CharacterSheetApplication";

    pub fn new(options: SheetOptions) -> Self {
        Self {
            options,
            layout: SheetLayout::for_character(),
            actor: None,
        }
    }

    pub fn options(&self) -> &SheetOptions {
        &self.options
    }

    /// Bind the actor this sheet displays
    pub fn bind(&mut self, actor: ActorDocument) {
        self.actor = Some(actor);
    }

    pub fn actor(&self) -> Option<&ActorDocument> {
        self.actor.as_ref()
    }

    pub fn data(&self) -> SheetData<'_> {
        SheetData {
            actor: self.actor.as_ref(),
        }
    }

    /// Render the bound actor. Nothing is rendered without an actor.
    pub fn render(&self) -> Option<SheetView> {
        let Some(actor) = self.actor.as_ref() else {
            tracing::debug!(sheet_id = %self.options.id, "No actor bound, skipping render");
            return None;
        };

        let record = actor.system();
        let values = self.layout.values(record);
        let calculated = self.layout.calculated(record);

        let sections = self
            .layout
            .sections
            .iter()
            .map(|section| SectionView {
                id: section.id.clone(),
                label: section.label.clone(),
                section_type: section.section_type,
                fields: section
                    .fields
                    .iter()
                    .map(|field| FieldView {
                        id: field.id.clone(),
                        label: field.label.clone(),
                        value: values.get(&field.id).cloned().unwrap_or(Value::Null),
                        calculated: calculated.get(&field.id).cloned(),
                        editable: field.editable,
                    })
                    .collect(),
            })
            .collect();

        Some(SheetView {
            sheet_id: self.options.id.clone(),
            title: self.options.title.clone(),
            width: self.options.width,
            height: self.options.height,
            resizable: self.options.resizable,
            actor_name: actor.name().to_string(),
            sections,
        })
    }
}

impl Default for CharacterSheetApplication {
    fn default() -> Self {
        Self::new(SheetOptions::default())
    }
}
