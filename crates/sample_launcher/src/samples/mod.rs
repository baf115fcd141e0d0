//! Sample model, indexing and tag filtering
//!
//! - `sample`: immutable sample descriptors
//! - `ordering`: priority-then-alphabetical key ordering
//! - `index`: category/tag lookups and the active filter
//! - `filter_dialog`: uncommitted filter edits and the apply/cancel protocol

pub mod filter_dialog;
pub mod index;
pub mod ordering;
pub mod sample;

pub use filter_dialog::{DialogState, FilterDialog, FilterRow};
pub use index::{SampleIndex, ALL_CATEGORIES};
pub use ordering::PriorityOrder;
pub use sample::{display_label, Sample, ANY_TAG};
