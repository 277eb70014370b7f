//! The running experiment: documents to serve and copy to expose.

use crate::config::AbConfig;

use super::{ContentCatalog, Variant};

/// Immutable experiment definition shared by all requests.
#[derive(Debug, Clone)]
pub struct Experiment {
    override_param: String,
    document_a: String,
    document_b: String,
    catalog: ContentCatalog,
}

impl Experiment {
    pub fn from_config(config: &AbConfig) -> Self {
        Self {
            override_param: config.experiment.override_param.clone(),
            document_a: config.experiment.document_a.clone(),
            document_b: config.experiment.document_b.clone(),
            catalog: ContentCatalog::from_config(&config.variants),
        }
    }

    /// Query parameter that forces a variant.
    pub fn override_param(&self) -> &str {
        &self.override_param
    }

    /// Origin path of the HTML document for `variant`.
    pub fn document(&self, variant: Variant) -> &str {
        match variant {
            Variant::A => &self.document_a,
            Variant::B => &self.document_b,
        }
    }

    pub fn catalog(&self) -> &ContentCatalog {
        &self.catalog
    }
}
