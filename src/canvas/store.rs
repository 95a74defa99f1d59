//! The in-memory canvas store
//!
//! Owned by the application entry point and passed to collaborators; the
//! store itself never touches persistence.

use super::section::SectionId;
use super::state::{CanvasDocument, CanvasMetadata, CanvasState, MetadataPatch, SectionPatch};

/// Selects one of the three metadata fields for a field-level edit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetadataField {
    InnovationName,
    Date,
    Author,
}

/// Holds the current canvas document and applies field-level edits
#[derive(Debug, Clone)]
pub struct CanvasStore {
    metadata: CanvasMetadata,
    sections: CanvasState,
    /// Date the session started with; `reset` restores it.
    initial_date: String,
}

impl CanvasStore {
    /// A fresh store: blank sections, initial metadata dated `today`
    pub fn new(today: impl Into<String>) -> Self {
        let initial_date = today.into();
        Self {
            metadata: CanvasMetadata::initial(&initial_date),
            sections: CanvasState::initial(),
            initial_date,
        }
    }

    /// Replace one section's text verbatim
    pub fn set_section(&mut self, id: SectionId, text: impl Into<String>) {
        self.sections.set(id, text.into());
    }

    /// Replace one metadata field verbatim
    pub fn set_metadata_field(&mut self, field: MetadataField, text: impl Into<String>) {
        let text = text.into();
        match field {
            MetadataField::InnovationName => self.metadata.innovation_name = text,
            MetadataField::Date => self.metadata.date = text,
            MetadataField::Author => self.metadata.author = text,
        }
    }

    /// Restore the initial document the session started with.
    ///
    /// Clearing the persisted copy is the gateway's job; the store has no
    /// persistence coupling.
    pub fn reset(&mut self) {
        self.metadata = CanvasMetadata::initial(&self.initial_date);
        self.sections = CanvasState::initial();
    }

    /// Snapshot of the full document, by value. Later edits are never
    /// observable through a previously returned snapshot.
    pub fn current(&self) -> CanvasDocument {
        CanvasDocument {
            metadata: self.metadata.clone(),
            sections: self.sections.clone(),
        }
    }

    pub fn metadata(&self) -> &CanvasMetadata {
        &self.metadata
    }

    pub fn sections(&self) -> &CanvasState {
        &self.sections
    }

    /// Wholesale replace of both halves (auto-restore of a full-shape doc)
    pub fn replace_document(&mut self, metadata: CanvasMetadata, sections: CanvasState) {
        self.metadata = metadata;
        self.sections = sections;
    }

    /// Wholesale replace of the sections only (auto-restore of a legacy doc)
    pub fn replace_sections(&mut self, sections: CanvasState) {
        self.sections = sections;
    }

    /// Field-by-field metadata merge (import)
    pub fn merge_metadata(&mut self, patch: &MetadataPatch) {
        self.metadata.merge_patch(patch);
    }

    /// Section-by-section merge (import)
    pub fn merge_sections(&mut self, patch: &SectionPatch) {
        self.sections.merge_patch(patch);
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_new_store_is_initial() {
        let store = CanvasStore::new("2026-08-04");
        let doc = store.current();
        assert!(doc.sections.is_blank());
        assert_eq!(doc.metadata.innovation_name, "");
        assert_eq!(doc.metadata.date, "2026-08-04");
        assert_eq!(doc.metadata.author, "");
    }

    #[test]
    fn test_snapshot_is_isolated_from_later_edits() {
        let mut store = CanvasStore::new("2026-08-04");
        let before = store.current();
        store.set_section(SectionId::DiscChallenge, "maternal health access");
        store.set_metadata_field(MetadataField::Author, "Budi");
        assert_eq!(before.sections.get(SectionId::DiscChallenge), "");
        assert_eq!(before.metadata.author, "");
    }

    #[test]
    fn test_reset_restores_initial_document() {
        let mut store = CanvasStore::new("2026-08-04");
        let initial = store.current();
        store.set_section(SectionId::DelScale, "pilot in 3 puskesmas");
        store.set_metadata_field(MetadataField::Date, "2027-01-01");
        store.reset();
        assert_eq!(store.current(), initial);
    }

    #[test]
    fn test_metadata_field_edits() {
        let mut store = CanvasStore::new("2026-08-04");
        store.set_metadata_field(MetadataField::InnovationName, "TeleDerm");
        store.set_metadata_field(MetadataField::Date, "2026-09-01");
        store.set_metadata_field(MetadataField::Author, "Sari");
        let meta = store.metadata();
        assert_eq!(meta.innovation_name, "TeleDerm");
        assert_eq!(meta.date, "2026-09-01");
        assert_eq!(meta.author, "Sari");
    }

    fn any_section_id() -> impl Strategy<Value = SectionId> {
        (0..SectionId::ALL.len()).prop_map(|i| SectionId::ALL[i])
    }

    proptest! {
        #[test]
        fn prop_set_section_is_verbatim_and_local(id in any_section_id(), text in ".*") {
            let mut store = CanvasStore::new("2026-08-04");
            store.set_section(id, text.clone());
            let doc = store.current();
            prop_assert_eq!(doc.sections.get(id), text.as_str());
            for other in SectionId::ALL {
                if other != id {
                    prop_assert_eq!(doc.sections.get(other), "");
                }
            }
        }
    }
}
