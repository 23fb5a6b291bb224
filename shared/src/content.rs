//! Locale handling and "override or built-in default" text resolution.
//!
//! Page copy is compiled into the frontend for both locales. Editors can
//! replace any string by key; whatever they leave out or blank keeps the
//! built-in text.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum Locale {
    #[default]
    Fi,
    En,
}

impl Locale {
    pub const ALL: [Locale; 2] = [Locale::Fi, Locale::En];

    pub fn code(&self) -> &'static str {
        match self {
            Locale::Fi => "fi",
            Locale::En => "en",
        }
    }

    /// Accepts bare codes and region tags (`en-US`, `fi_FI`); anything else
    /// is the default locale.
    pub fn from_tag(tag: &str) -> Self {
        let primary = tag
            .trim()
            .split(['-', '_'])
            .next()
            .unwrap_or_default();
        Self::ALL
            .into_iter()
            .find(|l| l.code().eq_ignore_ascii_case(primary))
            .unwrap_or_default()
    }

    pub fn other(&self) -> Self {
        match self {
            Locale::Fi => Locale::En,
            Locale::En => Locale::Fi,
        }
    }
}

impl From<String> for Locale {
    fn from(value: String) -> Self {
        Self::from_tag(&value)
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Prefer the override when it has visible text, else the fallback.
pub fn resolve<'a>(value: Option<&'a str>, fallback: &'a str) -> &'a str {
    match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => fallback,
    }
}

/// Externally edited strings for one locale, keyed like `hero.title`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentOverrides(BTreeMap<String, String>);

impl ContentOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn text<'a>(&'a self, key: &str, fallback: &'a str) -> &'a str {
        resolve(self.get(key), fallback)
    }

    /// Layers `other` on top; blank values in `other` do not erase ours.
    pub fn merge(&mut self, other: ContentOverrides) {
        for (key, value) in other.0 {
            if !value.trim().is_empty() {
                self.0.insert(key, value);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, String)> for ContentOverrides {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
