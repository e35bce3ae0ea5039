//! Localized text lookup
//!
//! Every user-facing string is addressed by a dot-separated key path such as
//! `navigation.newChat.dialog.title`.

use std::path::Path;

use anyhow::{bail, Context, Result};
use serde_json::Value;

const EMBEDDED_EN_US: &str = include_str!("locales/en-US.json");

/// Resolves a key path to display text
pub trait Translator {
    fn translate(&self, path: &str) -> String;
}

/// Translation catalog backed by a nested JSON object
#[derive(Debug, Clone)]
pub struct Catalog {
    root: Value,
}

impl Catalog {
    pub fn from_json(json: &str) -> Result<Self> {
        let root: Value = serde_json::from_str(json).context("Failed to parse translations")?;
        if !root.is_object() {
            bail!("Translations must be a JSON object");
        }
        Ok(Self { root })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read translations: {}", path.display()))?;
        Self::from_json(&content)
            .with_context(|| format!("Invalid translations file: {}", path.display()))
    }

    /// The English catalog compiled into the binary
    pub fn embedded() -> Result<Self> {
        Self::from_json(EMBEDDED_EN_US).context("Built-in English translations are invalid")
    }

    fn lookup(&self, path: &str) -> Option<&str> {
        path.split('.')
            .try_fold(&self.root, |node, key| node.get(key))
            .and_then(Value::as_str)
    }
}

impl Translator for Catalog {
    /// Unknown paths come back verbatim so missing keys stay visible
    fn translate(&self, path: &str) -> String {
        self.lookup(path).unwrap_or(path).to_string()
    }
}
