//! Client types
//!
//! Identifiers for the portal's clients and the tags a consultant attaches to them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque client identifier as the portal exposes it
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClientId(pub String);

impl ClientId {
    /// Parse an identifier read from the view. Blank input yields `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(ClientId(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A tag button on the client table, identified by client and tag name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClientTag {
    pub client_id: ClientId,
    pub tag: String,
}

impl ClientTag {
    pub fn new(client_id: ClientId, tag: impl Into<String>) -> Self {
        Self {
            client_id,
            tag: tag.into(),
        }
    }
}

/// Split the portal's comma separated tag column
pub fn split_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Rewrite a comma separated tag column with `tag` switched on or off
pub fn with_tag(raw: &str, tag: &str, active: bool) -> String {
    let mut tags: Vec<String> = split_tags(raw).into_iter().filter(|t| t != tag).collect();
    if active {
        tags.push(tag.to_string());
    }
    tags.join(",")
}
