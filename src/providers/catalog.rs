//! Provider catalog on disk.
//!
//! `catalogs/providers.json` is the data-driven stand-in for the provider
//! plugin registry: one record per provider with its type flags, the
//! capabilities its driver declares, and any documentation notes. Loading is
//! strict. The raw document is checked against the bundled JSON Schema, then
//! names are checked for uniqueness so two records can never fight over one
//! matrix column.

use super::{Capability, DocumentationNotes, NotesStore, ProviderRegistry};
use crate::schema_loader::{CatalogSchema, PROVIDER_CATALOG_SCHEMA_VERSION};
use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
/// One registered provider.
pub struct ProviderRecord {
    pub name: String,
    #[serde(default)]
    pub registrar: bool,
    #[serde(default)]
    pub dns_provider: bool,
    #[serde(default)]
    pub capabilities: BTreeSet<Capability>,
    #[serde(default)]
    pub notes: DocumentationNotes,
}

impl ProviderRecord {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            registrar: false,
            dns_provider: false,
            capabilities: BTreeSet::new(),
            notes: DocumentationNotes::new(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct CatalogDocument {
    schema_version: String,
    providers: Vec<ProviderRecord>,
}

#[derive(Clone, Debug, Default)]
/// Validated provider catalog keyed by provider name.
pub struct ProviderCatalog {
    by_name: BTreeMap<String, ProviderRecord>,
}

/// Load, schema-check, and index a provider catalog.
pub fn load_catalog_from_path(path: &Path) -> Result<ProviderCatalog> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("reading provider catalog {}", path.display()))?;
    let raw: Value = serde_json::from_str(&data)
        .with_context(|| format!("parsing provider catalog {}", path.display()))?;
    ProviderCatalog::from_value(raw, &path.display().to_string())
}

impl ProviderCatalog {
    /// Validate a raw catalog document; `label` names it in error messages.
    pub fn from_value(raw: Value, label: &str) -> Result<Self> {
        CatalogSchema::load()?.validate(&raw, label)?;
        let document: CatalogDocument = serde_json::from_value(raw)
            .with_context(|| format!("decoding provider catalog {label}"))?;
        if document.schema_version != PROVIDER_CATALOG_SCHEMA_VERSION {
            bail!(
                "unsupported provider catalog version '{}', expected {}",
                document.schema_version,
                PROVIDER_CATALOG_SCHEMA_VERSION
            );
        }
        Self::from_records(document.providers)
            .with_context(|| format!("indexing provider catalog {label}"))
    }

    /// Index records by name after structural checks.
    pub fn from_records(records: impl IntoIterator<Item = ProviderRecord>) -> Result<Self> {
        let mut by_name = BTreeMap::new();
        for record in records {
            validate_record(&record)?;
            if by_name.contains_key(&record.name) {
                bail!("duplicate provider name {}", record.name);
            }
            by_name.insert(record.name.clone(), record);
        }
        Ok(Self { by_name })
    }

    pub fn provider(&self, name: &str) -> Option<&ProviderRecord> {
        self.by_name.get(name)
    }

    /// Iterates records in name order.
    pub fn providers(&self) -> impl Iterator<Item = &ProviderRecord> {
        self.by_name.values()
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

fn validate_record(record: &ProviderRecord) -> Result<()> {
    if record.name.trim().is_empty() {
        bail!("encountered provider with no name");
    }
    if !record
        .name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
    {
        bail!(
            "provider name must match ^[A-Za-z0-9_.-]+$, got {}",
            record.name
        );
    }
    if !record.registrar && !record.dns_provider {
        bail!(
            "provider {} is neither a registrar nor a DNS provider",
            record.name
        );
    }
    if let Some(doc) = record.capabilities.iter().find(|cap| cap.is_documentation()) {
        bail!(
            "provider {} declares documentation key {} as a capability; use notes instead",
            record.name,
            doc
        );
    }
    Ok(())
}

impl ProviderRegistry for ProviderCatalog {
    fn registrar_names(&self) -> BTreeSet<&str> {
        self.providers()
            .filter(|record| record.registrar)
            .map(|record| record.name.as_str())
            .collect()
    }

    fn dns_provider_names(&self) -> BTreeSet<&str> {
        self.providers()
            .filter(|record| record.dns_provider)
            .map(|record| record.name.as_str())
            .collect()
    }

    fn has_capability(&self, provider: &str, capability: Capability) -> bool {
        self.provider(provider)
            .map(|record| record.capabilities.contains(&capability))
            .unwrap_or(false)
    }
}

impl NotesStore for ProviderCatalog {
    fn notes_for(&self, provider: &str) -> Cow<'_, DocumentationNotes> {
        match self.provider(provider) {
            Some(record) => Cow::Borrowed(&record.notes),
            None => Cow::Owned(DocumentationNotes::new()),
        }
    }
}
