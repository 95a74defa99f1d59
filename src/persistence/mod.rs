//! Persistence gateway
//!
//! Moves full canvas documents between the store and three channels:
//! browser storage (restore/save/clear), file download (export) and file
//! upload (import). Saved documents come in two shapes:
//!
//! - full: `{ "metadata": {...}, "sections": {...} }`, written since
//!   metadata was added
//! - legacy: a bare `{ "<sectionId>": "...", ... }` mapping, read-only
//!
//! Restore replaces the document wholesale; import merges field-by-field.
//! Both run through the same [`parse_document`] and differ only in how the
//! parsed patch is applied and how a parse failure is reported: restore
//! logs and falls open, import hands the error back for the UI to surface.

use serde::Deserialize;
use thiserror::Error;

use crate::canvas::{
    CanvasDocument, CanvasMetadata, CanvasState, CanvasStore, MetadataPatch, SectionPatch,
};
use crate::platform::StorageBackend;

/// Browser storage slot holding the saved document
pub const STORAGE_KEY: &str = "vdhic-canvas-v1";

/// Why a saved or imported document could not be used.
///
/// Malformed JSON is the only failure mode; a syntactically valid payload
/// is always accepted, with unusable parts dropped during patch extraction.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// A successfully parsed document, tagged by shape
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedDocument {
    /// Both `metadata` and `sections` present
    Full {
        metadata: MetadataPatch,
        sections: SectionPatch,
    },
    /// A bare section mapping from before metadata existed
    Legacy { sections: SectionPatch },
}

#[derive(Deserialize)]
struct FullShape {
    metadata: MetadataPatch,
    sections: serde_json::Map<String, serde_json::Value>,
}

/// Decode a document, trying the full shape first and reading anything else
/// as a legacy bare mapping. Only keys the canvas knows, with text values,
/// make it into a patch; everything else is dropped without complaint.
pub fn parse_document(text: &str) -> Result<ParsedDocument, DocumentError> {
    let value: serde_json::Value = serde_json::from_str(text)?;

    if let Ok(full) = FullShape::deserialize(&value) {
        return Ok(ParsedDocument::Full {
            metadata: full.metadata,
            sections: known_sections(&full.sections),
        });
    }

    let sections = match value.as_object() {
        Some(map) => known_sections(map),
        None => SectionPatch::new(),
    };
    Ok(ParsedDocument::Legacy { sections })
}

fn known_sections(raw: &serde_json::Map<String, serde_json::Value>) -> SectionPatch {
    let mut patch = SectionPatch::new();
    for (key, value) in raw {
        let Some(id) = crate::SectionId::from_key(key) else {
            log::debug!("dropping unknown section key {key:?}");
            continue;
        };
        match value.as_str() {
            Some(text) => {
                patch.insert(id, text.to_string());
            }
            None => log::debug!("dropping non-text value for section {key:?}"),
        }
    }
    patch
}

/// Merge a parsed document into the current store, section by section and
/// metadata field by metadata field. Used by import for both shapes.
pub fn import_document(store: &mut CanvasStore, text: &str) -> Result<(), DocumentError> {
    match parse_document(text)? {
        ParsedDocument::Full { metadata, sections } => {
            store.merge_metadata(&metadata);
            store.merge_sections(&sections);
        }
        ParsedDocument::Legacy { sections } => {
            store.merge_sections(&sections);
        }
    }
    log::info!("imported canvas document");
    Ok(())
}

/// Pretty-printed JSON of the full document, for file export
pub fn export_json(doc: &CanvasDocument) -> String {
    match serde_json::to_string_pretty(doc) {
        Ok(json) => json,
        Err(err) => {
            log::error!("failed to serialize canvas: {err}");
            String::new()
        }
    }
}

/// Export filename: `vdhic-<slug>.json` from the innovation name, or
/// `vdhic-canvas-<today>.json` when the name is empty
pub fn export_filename(metadata: &CanvasMetadata, today: &str) -> String {
    if metadata.innovation_name.is_empty() {
        format!("vdhic-canvas-{today}.json")
    } else {
        format!("vdhic-{}.json", slug(&metadata.innovation_name))
    }
}

/// Lower-case the name and collapse each run of non-alphanumeric characters
/// into a single hyphen.
fn slug(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c.to_ascii_lowercase());
        } else if !out.ends_with('-') {
            out.push('-');
        }
    }
    out
}

/// Reads and writes the saved document under [`STORAGE_KEY`]
#[derive(Debug)]
pub struct Gateway<S> {
    storage: S,
}

impl<S: StorageBackend> Gateway<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Load the saved document into the store, replacing it wholesale.
    ///
    /// A full-shape document replaces metadata and sections; a legacy one
    /// replaces the sections and leaves metadata alone. Absent or
    /// unparseable records leave the store untouched; a bad record is
    /// logged but never surfaced, so a corrupt save cannot take the UI
    /// down. Returns whether a document was applied.
    pub fn restore(&self, store: &mut CanvasStore) -> bool {
        let Some(text) = self.storage.get(STORAGE_KEY) else {
            return false;
        };
        match parse_document(&text) {
            Ok(ParsedDocument::Full { metadata, sections }) => {
                store.replace_document(
                    CanvasMetadata::from_patch(&metadata),
                    CanvasState::from_patch(&sections),
                );
                log::info!("restored saved canvas");
                true
            }
            Ok(ParsedDocument::Legacy { sections }) => {
                store.replace_sections(CanvasState::from_patch(&sections));
                log::info!("restored saved canvas (legacy shape)");
                true
            }
            Err(err) => {
                log::warn!("ignoring saved canvas: {err}");
                false
            }
        }
    }

    /// Write the document under the storage key, overwriting any prior value
    pub fn save(&mut self, doc: &CanvasDocument) {
        if let Ok(json) = serde_json::to_string(doc) {
            self.storage.set(STORAGE_KEY, &json);
            log::info!("canvas saved");
        }
    }

    /// Remove the saved document; used by reset
    pub fn clear(&mut self) {
        self.storage.remove(STORAGE_KEY);
        log::info!("saved canvas cleared");
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::canvas::{MetadataField, SectionId};
    use crate::platform::MemoryStorage;

    const TODAY: &str = "2026-08-04";

    fn gateway() -> Gateway<MemoryStorage> {
        Gateway::new(MemoryStorage::new())
    }

    #[test]
    fn test_parse_full_shape() {
        let text = r#"{
            "metadata": {"innovationName": "TeleDerm", "date": "2026-01-01", "author": "Sari"},
            "sections": {"gov_regulatory": "BPOM class B"}
        }"#;
        match parse_document(text).unwrap() {
            ParsedDocument::Full { metadata, sections } => {
                assert_eq!(metadata.innovation_name.as_deref(), Some("TeleDerm"));
                assert_eq!(
                    sections.get(&SectionId::GovRegulatory).map(String::as_str),
                    Some("BPOM class B")
                );
            }
            other => panic!("expected full shape, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_legacy_shape() {
        match parse_document(r#"{"gov_regulatory": "x"}"#).unwrap() {
            ParsedDocument::Legacy { sections } => {
                assert_eq!(
                    sections.get(&SectionId::GovRegulatory).map(String::as_str),
                    Some("x")
                );
            }
            other => panic!("expected legacy shape, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_drops_unknown_keys() {
        let parsed = parse_document(r#"{"gov_regulatory": "x", "not_a_section": "y"}"#).unwrap();
        let ParsedDocument::Legacy { sections } = parsed else {
            panic!("expected legacy shape");
        };
        assert_eq!(sections.len(), 1);
    }

    #[test]
    fn test_parse_malformed_json() {
        assert!(matches!(
            parse_document("{not json"),
            Err(DocumentError::Json(_))
        ));
    }

    #[test]
    fn test_parse_accepts_any_valid_json() {
        // Odd shapes are not errors; they just contribute nothing.
        let ParsedDocument::Legacy { sections } = parse_document("[1, 2, 3]").unwrap() else {
            panic!("expected legacy shape");
        };
        assert!(sections.is_empty());

        let ParsedDocument::Legacy { sections } = parse_document("7").unwrap() else {
            panic!("expected legacy shape");
        };
        assert!(sections.is_empty());
    }

    #[test]
    fn test_parse_legacy_drops_non_text_values_only() {
        // A realistic legacy export with a stray non-text field: the known
        // section still applies.
        let parsed =
            parse_document(r#"{"gov_regulatory": "x", "exportedAt": 1699999999999}"#).unwrap();
        let ParsedDocument::Legacy { sections } = parsed else {
            panic!("expected legacy shape");
        };
        assert_eq!(
            sections.get(&SectionId::GovRegulatory).map(String::as_str),
            Some("x")
        );
        assert_eq!(sections.len(), 1);

        let parsed = parse_document(r#"{"gov_regulatory": 7}"#).unwrap();
        let ParsedDocument::Legacy { sections } = parsed else {
            panic!("expected legacy shape");
        };
        assert!(sections.is_empty());
    }

    #[test]
    fn test_parse_full_shape_drops_non_text_values() {
        let text = r#"{
            "metadata": {},
            "sections": {"gov_regulatory": 7, "gov_clinical": "kept"}
        }"#;
        let ParsedDocument::Full { sections, .. } = parse_document(text).unwrap() else {
            panic!("expected full shape");
        };
        assert_eq!(
            sections.get(&SectionId::GovClinical).map(String::as_str),
            Some("kept")
        );
        assert_eq!(sections.len(), 1);
    }

    #[test]
    fn test_restore_absent_record_leaves_store() {
        let gw = gateway();
        let mut store = CanvasStore::new(TODAY);
        let before = store.current();
        assert!(!gw.restore(&mut store));
        assert_eq!(store.current(), before);
    }

    #[test]
    fn test_restore_bad_record_fails_open() {
        let mut gw = gateway();
        gw.storage.set(STORAGE_KEY, "{corrupt");
        let mut store = CanvasStore::new(TODAY);
        let before = store.current();
        assert!(!gw.restore(&mut store));
        assert_eq!(store.current(), before);
    }

    #[test]
    fn test_restore_full_shape_replaces_wholesale() {
        let mut gw = gateway();
        gw.storage.set(
            STORAGE_KEY,
            r#"{"metadata": {"innovationName": "Saved", "date": "2025-12-31", "author": ""},
                "sections": {"gov_regulatory": "a"}}"#,
        );

        let mut store = CanvasStore::new(TODAY);
        store.set_section(SectionId::GovRegulatory, "b");
        store.set_section(SectionId::GovClinical, "pre-existing");

        assert!(gw.restore(&mut store));
        let doc = store.current();
        assert_eq!(doc.sections.get(SectionId::GovRegulatory), "a");
        // Not merged: every in-memory value is overwritten by the saved doc.
        assert_eq!(doc.sections.get(SectionId::GovClinical), "");
        assert_eq!(doc.metadata.innovation_name, "Saved");
        assert_eq!(doc.metadata.date, "2025-12-31");
    }

    #[test]
    fn test_restore_legacy_shape_keeps_initial_metadata() {
        let mut gw = gateway();
        gw.storage.set(STORAGE_KEY, r#"{"val_cost": "lower readmissions"}"#);

        let mut store = CanvasStore::new(TODAY);
        assert!(gw.restore(&mut store));
        let doc = store.current();
        assert_eq!(doc.sections.get(SectionId::ValCost), "lower readmissions");
        assert_eq!(doc.metadata.date, TODAY);
        assert_eq!(doc.metadata.innovation_name, "");
    }

    #[test]
    fn test_import_merge_is_partial() {
        let mut store = CanvasStore::new(TODAY);
        store.set_section(SectionId::GovRegulatory, "a");
        store.set_section(SectionId::GovClinical, "b");

        import_document(&mut store, r#"{"sections": {"gov_regulatory": "c"}, "metadata": {}}"#)
            .unwrap();

        let doc = store.current();
        assert_eq!(doc.sections.get(SectionId::GovRegulatory), "c");
        assert_eq!(doc.sections.get(SectionId::GovClinical), "b");
    }

    #[test]
    fn test_import_legacy_touches_only_named_sections() {
        let mut store = CanvasStore::new(TODAY);
        store.set_metadata_field(MetadataField::Author, "Ana");

        import_document(&mut store, r#"{"gov_regulatory": "x"}"#).unwrap();

        let doc = store.current();
        assert_eq!(doc.sections.get(SectionId::GovRegulatory), "x");
        assert_eq!(doc.metadata.author, "Ana");
        for id in SectionId::ALL {
            if id != SectionId::GovRegulatory {
                assert_eq!(doc.sections.get(id), "");
            }
        }
    }

    #[test]
    fn test_import_legacy_with_stray_fields_applies_known_sections() {
        let mut store = CanvasStore::new(TODAY);
        import_document(
            &mut store,
            r#"{"gov_regulatory": "x", "exportedAt": 1699999999999}"#,
        )
        .unwrap();
        assert_eq!(store.current().sections.get(SectionId::GovRegulatory), "x");
    }

    #[test]
    fn test_import_merges_metadata_fields_independently() {
        let mut store = CanvasStore::new(TODAY);
        store.set_metadata_field(MetadataField::Author, "Ana");

        import_document(
            &mut store,
            r#"{"metadata": {"innovationName": "Imported"}, "sections": {}}"#,
        )
        .unwrap();

        let meta = store.current().metadata;
        assert_eq!(meta.innovation_name, "Imported");
        assert_eq!(meta.author, "Ana");
        assert_eq!(meta.date, TODAY);
    }

    #[test]
    fn test_import_failure_leaves_store_untouched() {
        let mut store = CanvasStore::new(TODAY);
        store.set_section(SectionId::DesUx, "offline-first");
        let before = store.current();

        assert!(import_document(&mut store, "not json at all").is_err());
        assert_eq!(store.current(), before);
    }

    #[test]
    fn test_export_import_round_trip() {
        let mut store = CanvasStore::new(TODAY);
        store.set_metadata_field(MetadataField::InnovationName, "TeleDerm");
        store.set_section(SectionId::DiscUsers, "rural midwives");
        store.set_section(SectionId::ValEquity, "closes the specialist gap");
        let exported = export_json(&store.current());

        let mut fresh = CanvasStore::new(TODAY);
        fresh.reset();
        import_document(&mut fresh, &exported).unwrap();

        assert_eq!(fresh.current(), store.current());
    }

    #[test]
    fn test_save_then_restore_round_trip() {
        let mut gw = gateway();
        let mut store = CanvasStore::new(TODAY);
        store.set_metadata_field(MetadataField::InnovationName, "TeleDerm");
        store.set_section(SectionId::DelBusiness, "B2G via BPJS");
        gw.save(&store.current());

        let mut reloaded = CanvasStore::new(TODAY);
        assert!(gw.restore(&mut reloaded));
        assert_eq!(reloaded.current(), store.current());
    }

    #[test]
    fn test_clear_removes_storage_slot() {
        let mut gw = gateway();
        let store = CanvasStore::new(TODAY);
        gw.save(&store.current());
        assert!(gw.storage.get(STORAGE_KEY).is_some());
        gw.clear();
        assert!(gw.storage.get(STORAGE_KEY).is_none());
    }

    #[test]
    fn test_export_is_pretty_printed_full_shape() {
        let store = CanvasStore::new(TODAY);
        let json = export_json(&store.current());
        assert!(json.contains("\n  \"metadata\""));
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["sections"].as_object().unwrap().len(), 18);
        assert_eq!(value["metadata"]["date"], TODAY);
    }

    #[test]
    fn test_export_filename_from_name() {
        let mut meta = CanvasMetadata::initial(TODAY);
        meta.innovation_name = "Tele-Health!".into();
        assert_eq!(export_filename(&meta, TODAY), "vdhic-tele-health-.json");

        meta.innovation_name = "My  App  2".into();
        assert_eq!(export_filename(&meta, TODAY), "vdhic-my-app-2.json");
    }

    #[test]
    fn test_export_filename_fallback() {
        let meta = CanvasMetadata::initial(TODAY);
        assert_eq!(export_filename(&meta, TODAY), "vdhic-canvas-2026-08-04.json");
    }

    proptest! {
        #[test]
        fn prop_slug_is_lowercase_alnum_and_hyphens(name in ".*") {
            let s = slug(&name);
            prop_assert!(s.chars().all(|c| c == '-' || c.is_ascii_lowercase() || c.is_ascii_digit()));
            prop_assert!(!s.contains("--"));
        }
    }
}
