//! Multi-select tag filter dialog
//!
//! The dialog edits a private copy of the index's active filter. Row toggles
//! only touch that copy; the index sees the result when the dialog is
//! applied, as one wholesale replacement. Closing the dialog any other way
//! discards the copy.

use std::collections::BTreeSet;
use std::mem;

use super::index::SampleIndex;
use super::sample::display_label;

/// Dialog title shown by hosts
pub const FILTER_DIALOG_TITLE: &str = "Filter Samples by Tag";

/// Label of the commit action
pub const FILTER_APPLY_LABEL: &str = "Apply";

/// Open/closed state of the filter dialog
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DialogState {
    /// Not shown
    #[default]
    Closed,
    /// Shown, with the selection being edited
    Open {
        /// Uncommitted tag selection
        pending: BTreeSet<String>,
    },
}

/// One checkbox row of the dialog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterRow<'a> {
    /// Raw tag
    pub tag: &'a str,
    /// Capitalized label
    pub label: &'a str,
    /// Whether the row is checked in the pending selection
    pub checked: bool,
}

/// Filter dialog state machine
#[derive(Debug, Clone, Default)]
pub struct FilterDialog {
    tags: Vec<String>,
    labels: Vec<String>,
    state: DialogState,
}

impl FilterDialog {
    /// Create a dialog listing `tags` in the given order
    pub fn new(tags: &[String]) -> Self {
        Self {
            tags: tags.to_vec(),
            labels: tags.iter().map(|t| display_label(t)).collect(),
            state: DialogState::Closed,
        }
    }

    /// Create a dialog listing every tag of `index`
    pub fn for_index(index: &SampleIndex) -> Self {
        Self::new(index.tags())
    }

    /// Current state
    pub fn state(&self) -> &DialogState {
        &self.state
    }

    /// Whether the dialog is shown
    pub fn is_open(&self) -> bool {
        matches!(self.state, DialogState::Open { .. })
    }

    /// Capitalized row labels
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Show the dialog, seeding the selection from the committed filter
    ///
    /// Re-opening an already open dialog restarts the edit.
    pub fn open(&mut self, index: &SampleIndex) {
        self.state = DialogState::Open {
            pending: index.active_filter().clone(),
        };
    }

    /// Rows with their pending checked state; empty while closed
    pub fn rows(&self) -> Vec<FilterRow<'_>> {
        let DialogState::Open { pending } = &self.state else {
            return Vec::new();
        };
        self.tags
            .iter()
            .zip(&self.labels)
            .map(|(tag, label)| FilterRow {
                tag: tag.as_str(),
                label: label.as_str(),
                checked: pending.contains(tag),
            })
            .collect()
    }

    /// Pending checked state of `tag`; `None` while closed
    pub fn is_checked(&self, tag: &str) -> Option<bool> {
        match &self.state {
            DialogState::Open { pending } => Some(pending.contains(tag)),
            DialogState::Closed => None,
        }
    }

    /// Set the pending state of `tag`
    ///
    /// Returns `false` when the dialog is closed or the tag is not listed.
    pub fn toggle(&mut self, tag: &str, checked: bool) -> bool {
        if !self.tags.iter().any(|t| t == tag) {
            return false;
        }
        let DialogState::Open { pending } = &mut self.state else {
            return false;
        };
        if checked {
            pending.insert(tag.to_string());
        } else {
            pending.remove(tag);
        }
        true
    }

    /// Set the pending state of the row at `row`; out of range rows are ignored
    pub fn toggle_at(&mut self, row: usize, checked: bool) -> bool {
        match self.tags.get(row).cloned() {
            Some(tag) => self.toggle(&tag, checked),
            None => false,
        }
    }

    /// Close without committing
    pub fn cancel(&mut self) {
        if self.is_open() {
            log::debug!("Filter dialog dismissed without applying");
        }
        self.state = DialogState::Closed;
    }

    /// Commit the pending selection to `index` and close
    ///
    /// Returns the committed filter, or `None` when the dialog was not open.
    pub fn apply(&mut self, index: &mut SampleIndex) -> Option<BTreeSet<String>> {
        match mem::take(&mut self.state) {
            DialogState::Open { pending } => {
                index.apply_filter(pending.iter().cloned());
                Some(pending)
            }
            DialogState::Closed => None,
        }
    }
}
