//! Global boolean flags used for locking and branching.
//!
//! Flag names are chosen by authors when they build content, so they stay
//! plain strings. Names are checked to be non-blank wherever they enter the
//! board.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::RulesError;
use crate::graph::TaskNode;

/// Session-wide mapping from flag name to value.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Flags(HashMap<String, bool>);

impl Flags {
    /// Create an empty flag store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if a flag is present and true.
    pub fn is_raised(&self, name: &str) -> bool {
        self.0.get(name).copied().unwrap_or(false)
    }

    /// Get the stored value of a flag, if any.
    pub fn get(&self, name: &str) -> Option<bool> {
        self.0.get(name).copied()
    }

    /// Set a flag to a value.
    pub fn set(&mut self, name: &str, value: bool) -> Result<(), RulesError> {
        let name = validate_flag_name(name)?;
        self.0.insert(name.to_string(), value);
        Ok(())
    }

    /// Set a flag to true.
    pub fn raise(&mut self, name: &str) -> Result<(), RulesError> {
        self.set(name, true)
    }

    /// Remove a flag entirely. Returns the previous value.
    pub fn clear(&mut self, name: &str) -> Option<bool> {
        self.0.remove(name)
    }

    /// Iterate over all flags.
    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.0.iter().map(|(name, value)| (name.as_str(), *value))
    }

    /// Get the number of stored flags.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, bool)> for Flags {
    fn from_iter<I: IntoIterator<Item = (String, bool)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Reject blank flag names.
///
/// Names are matched exactly as written, so the gate and the node that
/// raises it only need to agree with each other.
pub fn validate_flag_name(name: &str) -> Result<&str, RulesError> {
    if name.trim().is_empty() {
        return Err(RulesError::InvalidFlagName(name.to_string()));
    }
    Ok(name)
}

/// Normalise an optional flag field from an edit form: blank means unset.
pub fn normalize_flag_field(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Title and description a node currently shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayedContent<'a> {
    pub title: &'a str,
    pub description: &'a str,
    /// Whether the conditional content replaced the base content.
    pub conditional: bool,
}

/// Resolve what a node shows under the current flags.
///
/// While the node's condition flag is raised, non-empty conditional title and
/// description replace the base ones, each falling back independently. Only
/// content changes: traversal rules ignore the condition flag.
pub fn resolve_content<'a>(node: &'a TaskNode, flags: &Flags) -> DisplayedContent<'a> {
    let active = node
        .condition_flag
        .as_deref()
        .is_some_and(|flag| flags.is_raised(flag));
    if !active {
        return DisplayedContent {
            title: &node.title,
            description: &node.description,
            conditional: false,
        };
    }

    let pick = |alt: &'a Option<String>, base: &'a str| match alt.as_deref() {
        Some(text) if !text.is_empty() => text,
        _ => base,
    };
    DisplayedContent {
        title: pick(&node.condition_title, &node.title),
        description: pick(&node.condition_desc, &node.description),
        conditional: true,
    }
}
