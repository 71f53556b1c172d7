//! Catalog of categories a deck can be built from.
//!
//! A category groups items that share a unit (release year, distance, ...),
//! so one game only ever mixes comparable keys.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::cards::Card;
use crate::errors::DomainError;

const SAMPLE_CATALOG: &str = include_str!("../../data/sample_catalog.json");

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
    /// What the ordering key measures, for display.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(default)]
    pub items: Vec<Card>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    pub categories: Vec<Category>,
}

impl Catalog {
    pub fn from_json(raw: &str) -> Result<Self, DomainError> {
        let catalog: Catalog = serde_json::from_str(raw)
            .map_err(|e| DomainError::catalog(format!("invalid catalog JSON: {e}")))?;
        catalog.validate()?;
        debug!(categories = catalog.categories.len(), "catalog loaded");
        Ok(catalog)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, DomainError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|e| {
            DomainError::catalog(format!("cannot read catalog {}: {e}", path.display()))
        })?;
        Self::from_json(&raw)
    }

    /// Built-in demo catalog (songs by year, planets by distance).
    pub fn sample() -> Result<Self, DomainError> {
        Self::from_json(SAMPLE_CATALOG)
    }

    pub fn category(&self, id: &str) -> Result<&Category, DomainError> {
        self.categories
            .iter()
            .find(|c| c.id == id)
            .ok_or_else(|| DomainError::catalog(format!("unknown category '{id}'")))
    }

    pub fn first_category(&self) -> Result<&Category, DomainError> {
        self.categories
            .first()
            .ok_or_else(|| DomainError::catalog("catalog has no categories"))
    }

    /// Category ids and card ids must be unique; a game relies on card ids
    /// to tell cards apart.
    fn validate(&self) -> Result<(), DomainError> {
        let mut category_ids = HashSet::new();
        for category in &self.categories {
            if !category_ids.insert(category.id.as_str()) {
                return Err(DomainError::catalog(format!(
                    "duplicate category id '{}'",
                    category.id
                )));
            }
            let mut card_ids = HashSet::new();
            for card in &category.items {
                if !card_ids.insert(card.id.as_str()) {
                    return Err(DomainError::catalog(format!(
                        "duplicate card id '{}' in category '{}'",
                        card.id, category.id
                    )));
                }
            }
        }
        Ok(())
    }
}
