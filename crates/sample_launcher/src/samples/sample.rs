//! Sample descriptors as reported by the native samples library

use serde::{Deserialize, Serialize};

/// Sentinel tag carried by samples that declare no specific tag
pub const ANY_TAG: &str = "any";

/// One runnable demo exposed by the native application
///
/// Values are immutable once built; the index hands out shared references
/// and never edits a sample after construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sample {
    id: String,
    category: String,
    #[serde(default)]
    author: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    tags: Vec<String>,
}

impl Sample {
    /// Create a sample with the given id and category
    ///
    /// The sample starts with the sentinel tag only; use [`Sample::with_tags`]
    /// to replace it.
    pub fn new(id: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            category: category.into(),
            author: String::new(),
            name: String::new(),
            description: String::new(),
            tags: vec![ANY_TAG.to_string()],
        }
    }

    /// Set the author
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }

    /// Set the display name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Replace the tag list
    ///
    /// An empty list falls back to the sentinel tag.
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self.normalize();
        self
    }

    /// Restore the "at least one tag" rule after deserialization
    pub(crate) fn normalize(&mut self) {
        if self.tags.is_empty() {
            self.tags.push(ANY_TAG.to_string());
        }
    }

    /// Unique identifier
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Grouping key used for tabs
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Author display string
    pub fn author(&self) -> &str {
        &self.author
    }

    /// Display name, falling back to the id when none was given
    pub fn name(&self) -> &str {
        if self.name.is_empty() {
            &self.id
        } else {
            &self.name
        }
    }

    /// Description display string
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Tags in declaration order
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Whether this sample carries `tag`
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// Label shown for a tag or category: first character upper-cased
pub fn display_label(raw: &str) -> String {
    let mut chars = raw.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
