//! Canvas state model
//!
//! - `section`: the closed set of section identifiers and their panels
//! - `state`: the document types (sections mapping, metadata, full document)
//! - `store`: the mutable store the UI edits through

pub mod section;
pub mod state;
pub mod store;

pub use section::{SECTION_COUNT, SectionGroup, SectionId};
pub use state::{CanvasDocument, CanvasMetadata, CanvasState, MetadataPatch, SectionPatch};
pub use store::{CanvasStore, MetadataField};
