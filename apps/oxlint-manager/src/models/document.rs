//! The `.oxlintrc.json` document and the severity/category vocabulary.
//!
//! The document is kept as a raw JSON object so unknown keys and rich rule
//! values (e.g. `["warn", { ... }]`) survive every read/write untouched.
//! Typed accessors only interpret the `categories` and `rules` sections.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as Json};
use std::fmt;
use std::str::FromStr;

pub const CATEGORIES_KEY: &str = "categories";
pub const RULES_KEY: &str = "rules";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
/// Rule severity as written in the config file.
pub enum Severity {
    Error,
    Warn,
    Off,
}

impl Severity {
    pub const ALL: [Severity; 3] = [Severity::Error, Severity::Warn, Severity::Off];

    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warn => "warn",
            Severity::Off => "off",
        }
    }

    /// Interpret a rule or category value from the config file.
    ///
    /// Accepts the aliases oxlint understands (`deny`/`allow`, `0..=2`) and
    /// the array form whose first element carries the severity.
    pub fn from_json(value: &Json) -> Option<Severity> {
        match value {
            Json::String(s) => match s.as_str() {
                "error" | "deny" => Some(Severity::Error),
                "warn" | "warning" => Some(Severity::Warn),
                "off" | "allow" => Some(Severity::Off),
                _ => None,
            },
            Json::Number(n) => match n.as_u64()? {
                2 => Some(Severity::Error),
                1 => Some(Severity::Warn),
                0 => Some(Severity::Off),
                _ => None,
            },
            Json::Array(items) => items.first().and_then(Severity::from_json),
            _ => None,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Severity::ALL
            .into_iter()
            .find(|sev| sev.as_str() == s)
            .ok_or_else(|| format!("unknown severity '{}' (expected error|warn|off)", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
/// The fixed set of oxlint rule categories.
pub enum Category {
    Correctness,
    Nursery,
    Pedantic,
    Perf,
    Restriction,
    Style,
    Suspicious,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Correctness,
        Category::Nursery,
        Category::Pedantic,
        Category::Perf,
        Category::Restriction,
        Category::Style,
        Category::Suspicious,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Correctness => "correctness",
            Category::Nursery => "nursery",
            Category::Pedantic => "pedantic",
            Category::Perf => "perf",
            Category::Restriction => "restriction",
            Category::Style => "style",
            Category::Suspicious => "suspicious",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| format!("unknown category '{}'", s))
    }
}

/// Name of a JSON value's kind, used in rejection messages.
pub fn json_kind(value: &Json) -> &'static str {
    match value {
        Json::Null => "null",
        Json::Bool(_) => "boolean",
        Json::Number(_) => "number",
        Json::String(_) => "string",
        Json::Array(_) => "array",
        Json::Object(_) => "object",
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
/// A configuration document: always a JSON object, otherwise opaque.
pub struct ConfigDocument(Map<String, Json>);

impl ConfigDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept `value` only if it is a JSON object; otherwise return its kind.
    pub fn from_value(value: Json) -> Result<Self, &'static str> {
        match value {
            Json::Object(map) => Ok(Self(map)),
            other => Err(json_kind(&other)),
        }
    }

    pub fn as_map(&self) -> &Map<String, Json> {
        &self.0
    }

    pub fn into_value(self) -> Json {
        Json::Object(self.0)
    }

    pub fn get(&self, key: &str) -> Option<&Json> {
        self.0.get(key)
    }

    pub fn categories(&self) -> Option<&Map<String, Json>> {
        self.0.get(CATEGORIES_KEY).and_then(Json::as_object)
    }

    pub fn rules(&self) -> Option<&Map<String, Json>> {
        self.0.get(RULES_KEY).and_then(Json::as_object)
    }

    pub fn category_severity(&self, category: Category) -> Option<Severity> {
        self.categories()?
            .get(category.as_str())
            .and_then(Severity::from_json)
    }

    pub fn rule_severity(&self, rule: &str) -> Option<Severity> {
        self.rules()?.get(rule).and_then(Severity::from_json)
    }

    pub fn set_category(&mut self, category: Category, severity: Severity) {
        self.section_mut(CATEGORIES_KEY)
            .insert(category.as_str().to_string(), Json::from(severity.as_str()));
    }

    pub fn set_rule(&mut self, rule: &str, severity: Severity) {
        self.section_mut(RULES_KEY)
            .insert(rule.to_string(), Json::from(severity.as_str()));
    }

    /// Object stored under `key`, created (or replacing a non-object) on demand.
    fn section_mut(&mut self, key: &str) -> &mut Map<String, Json> {
        let slot = self
            .0
            .entry(key.to_string())
            .or_insert_with(|| Json::Object(Map::new()));
        if !slot.is_object() {
            *slot = Json::Object(Map::new());
        }
        match slot {
            Json::Object(map) => map,
            _ => unreachable!("section was just normalized to an object"),
        }
    }
}
