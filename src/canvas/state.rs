//! Canvas document model
//!
//! All state that is persisted or exported lives here. `CanvasState` is a
//! total mapping: every known [`SectionId`] always has exactly one entry, so
//! consumers never see a missing key.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::section::SectionId;

/// Partial section values parsed from a saved or imported document.
///
/// Keys the canvas does not know are dropped before a patch is built.
pub type SectionPatch = BTreeMap<SectionId, String>;

/// Partial metadata parsed from a saved or imported document.
///
/// Each field is independently optional so a merge can leave absent fields
/// untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataPatch {
    #[serde(default)]
    pub innovation_name: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
}

/// Document header: free-text name and author, ISO-8601 date string
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanvasMetadata {
    pub innovation_name: String,
    pub date: String,
    pub author: String,
}

impl CanvasMetadata {
    /// Initial metadata: empty name and author, caller-supplied date
    pub fn initial(today: &str) -> Self {
        Self {
            innovation_name: String::new(),
            date: today.to_string(),
            author: String::new(),
        }
    }

    /// Build metadata from a patch alone. Absent fields come out empty;
    /// nothing from any previous metadata survives.
    pub fn from_patch(patch: &MetadataPatch) -> Self {
        Self {
            innovation_name: patch.innovation_name.clone().unwrap_or_default(),
            date: patch.date.clone().unwrap_or_default(),
            author: patch.author.clone().unwrap_or_default(),
        }
    }

    /// Overwrite only the fields present in the patch
    pub fn merge_patch(&mut self, patch: &MetadataPatch) {
        if let Some(name) = &patch.innovation_name {
            self.innovation_name = name.clone();
        }
        if let Some(date) = &patch.date {
            self.date = date.clone();
        }
        if let Some(author) = &patch.author {
            self.author = author.clone();
        }
    }
}

/// Total mapping from every section id to its free-text content
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CanvasState(BTreeMap<SectionId, String>);

impl Default for CanvasState {
    fn default() -> Self {
        Self::initial()
    }
}

impl CanvasState {
    /// Every section present, every value empty
    pub fn initial() -> Self {
        Self(
            SectionId::ALL
                .iter()
                .map(|id| (*id, String::new()))
                .collect(),
        )
    }

    /// Build a state from a patch alone. Sections absent from the patch come
    /// out empty; nothing from any previous state survives.
    pub fn from_patch(patch: &SectionPatch) -> Self {
        let mut state = Self::initial();
        state.merge_patch(patch);
        state
    }

    /// Overwrite only the sections present in the patch
    pub fn merge_patch(&mut self, patch: &SectionPatch) {
        for (id, text) in patch {
            self.set(*id, text.clone());
        }
    }

    pub fn get(&self, id: SectionId) -> &str {
        // Total by construction; the entry is always there.
        self.0.get(&id).map(String::as_str).unwrap_or("")
    }

    pub fn set(&mut self, id: SectionId, text: String) {
        self.0.insert(id, text);
    }

    /// True when every section is empty
    pub fn is_blank(&self) -> bool {
        self.0.values().all(String::is_empty)
    }
}

/// The serializable pair of metadata and section values
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CanvasDocument {
    pub metadata: CanvasMetadata,
    pub sections: CanvasState,
}
