//! VDHIC Canvas - Value-Based Digital Health Innovation Canvas
//!
//! Core modules:
//! - `canvas`: Canvas state model (section ids, document types, store)
//! - `persistence`: Save/restore/import/export with two-shape JSON parsing
//! - `platform`: Browser/native abstraction (storage, clock, downloads)
//! - `config`: Static section and panel definitions for the form UI

pub mod canvas;
pub mod config;
pub mod persistence;
pub mod platform;

pub use canvas::{
    CanvasDocument, CanvasMetadata, CanvasState, CanvasStore, MetadataField, SectionGroup,
    SectionId,
};
pub use persistence::{DocumentError, Gateway, STORAGE_KEY};
