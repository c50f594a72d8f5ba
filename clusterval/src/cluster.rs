use std::fmt;
use std::str::FromStr;

use crate::error::{ClustervalError, Result};
use crate::item::Item;
use crate::text;

/// A single cluster of items with an optional label.
///
/// The label is for reporting only and never affects scoring.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cluster {
    items: Vec<Item>,
    label: Option<String>,
}

impl Cluster {
    /// Creates a cluster from a list of items. Duplicates are kept.
    pub fn new<I, T>(items: I, label: Option<String>) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Item>,
    {
        Self {
            items: items.into_iter().map(Into::into).collect(),
            label,
        }
    }

    /// Creates a cluster from a whitespace-delimited string,
    /// e.g. `"foo bar baz"` becomes three items.
    ///
    /// Fails with [`ClustervalError::InvalidArgument`] if `source` is empty.
    pub fn parse(source: &str, label: Option<String>) -> Result<Self> {
        if source.is_empty() {
            return Err(ClustervalError::InvalidArgument(
                "cluster expects a list of items or a space-delimited string; given an empty string"
                    .into(),
            ));
        }
        Ok(Self::new(source.split_whitespace(), label))
    }

    /// Appends one item.
    pub fn add(&mut self, item: impl Into<Item>) {
        self.items.push(item.into());
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Returns the number of items, counting duplicates.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns true if the cluster carries a non-empty label.
    pub fn has_label(&self) -> bool {
        self.label.as_deref().is_some_and(|l| !l.is_empty())
    }

    /// Renders the cluster as a text-format line: `label:item1 item2 ...`.
    pub fn to_text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Cluster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        text::write_line(f, self.label.as_deref().unwrap_or(""), &self.items)
    }
}

impl FromStr for Cluster {
    type Err = ClustervalError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s, None)
    }
}
