//! # Links
//!
//! Typed view of the HAL `_links` object: relation name to [`Link`].

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single HAL link object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub href: String,

    /// Set when `href` is an RFC 6570 URI template.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub templated: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Link {
    pub fn new(href: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            templated: false,
            title: None,
            name: None,
        }
    }

    /// The href with any template expressions (`{?projection}` and the like) removed.
    ///
    /// Non-templated links are returned as-is.
    pub fn target(&self) -> String {
        if !self.templated {
            return self.href.clone();
        }
        let mut out = String::with_capacity(self.href.len());
        let mut depth = 0usize;
        for c in self.href.chars() {
            match c {
                '{' => depth += 1,
                '}' if depth > 0 => depth -= 1,
                _ if depth == 0 => out.push(c),
                _ => {}
            }
        }
        out
    }
}

/// HAL allows a relation to hold either one link object or an array of them.
#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(Link),
    Many(Vec<Link>),
}

/// The link map of a hydrated resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Links(BTreeMap<String, Link>);

impl Links {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, relation: impl Into<String>, link: Link) -> Option<Link> {
        self.0.insert(relation.into(), link)
    }

    pub fn get(&self, relation: &str) -> Option<&Link> {
        self.0.get(relation)
    }

    pub fn contains(&self, relation: &str) -> bool {
        self.0.contains_key(relation)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Link)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<'de> Deserialize<'de> for Links {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = BTreeMap::<String, OneOrMany>::deserialize(deserializer)?;
        // Array-valued relations keep their first entry.
        let links = raw
            .into_iter()
            .filter_map(|(rel, value)| match value {
                OneOrMany::One(link) => Some((rel, link)),
                OneOrMany::Many(list) => list.into_iter().next().map(|link| (rel, link)),
            })
            .collect();
        Ok(Self(links))
    }
}

impl<K: Into<String>> FromIterator<(K, Link)> for Links {
    fn from_iter<I: IntoIterator<Item = (K, Link)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// Whether a resource has been hydrated from a server representation.
///
/// A locally constructed resource is `Unhydrated`; hydration replaces the whole
/// link map at once, so a partially populated state cannot be observed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LinkState {
    #[default]
    Unhydrated,
    Hydrated(Links),
}

impl LinkState {
    pub fn links(&self) -> Option<&Links> {
        match self {
            LinkState::Unhydrated => None,
            LinkState::Hydrated(links) => Some(links),
        }
    }

    pub fn is_hydrated(&self) -> bool {
        matches!(self, LinkState::Hydrated(_))
    }
}
