//! Display copy per variant.

use std::collections::BTreeMap;

use crate::config::VariantContent;

use super::Variant;

/// Immutable map from variant to its display copy.
///
/// Built once at startup from the `[variants.*]` tables; a variant without a
/// table simply has no content.
#[derive(Debug, Clone, Default)]
pub struct ContentCatalog {
    entries: BTreeMap<Variant, VariantContent>,
}

impl ContentCatalog {
    /// Build the catalog from configuration, skipping ids that are not A or B.
    pub fn from_config(raw: &BTreeMap<String, VariantContent>) -> Self {
        let entries = raw
            .iter()
            .filter_map(|(id, content)| {
                let variant = id.parse::<Variant>().ok()?;
                Some((variant, content.clone()))
            })
            .collect();
        Self { entries }
    }

    pub fn get(&self, variant: Variant) -> Option<&VariantContent> {
        self.entries.get(&variant)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
