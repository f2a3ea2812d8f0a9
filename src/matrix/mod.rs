//! Capability matrix derivation.
//!
//! `build_matrix` merges three inputs into one renderable value: registry
//! membership, capability probes, and documentation notes. Precedence per
//! cell is note, then probe, then absence, with the exact rule chosen by the
//! row's [`Resolution`]. The build is a pure in-memory pass; it cannot fail.

pub mod features;

pub use features::{FEATURES, FeatureDefinition, Resolution, feature};

use crate::providers::{
    DocumentationNotes, NO_PROVIDER, NotesStore, OverrideNote, ProviderKind, ProviderRegistry,
};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, info, warn};

/// Resolved value of one provider/feature cell.
///
/// Probe- and registry-derived entries always carry `Some(bool)`. Entries
/// copied from a note keep the note's boolean, which may be unset.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FeatureEntry {
    pub has_feature: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl FeatureEntry {
    pub fn simple(has_feature: bool) -> Self {
        Self {
            has_feature: Some(has_feature),
            comment: None,
        }
    }
}

impl From<&OverrideNote> for FeatureEntry {
    fn from(note: &OverrideNote) -> Self {
        Self {
            has_feature: note.has_feature,
            comment: note.comment.clone(),
        }
    }
}

/// Feature name to entry for one provider. Missing keys render as n/a.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ProviderFeatureMap(BTreeMap<String, FeatureEntry>);

impl ProviderFeatureMap {
    pub fn get(&self, feature: &str) -> Option<&FeatureEntry> {
        self.0.get(feature)
    }

    pub fn insert(&mut self, feature: &str, entry: FeatureEntry) {
        self.0.insert(feature.to_string(), entry);
    }

    pub fn feature_names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Ordered rows plus one column per provider, sorted by name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FeatureMatrix {
    pub features: Vec<FeatureDefinition>,
    pub providers: BTreeMap<String, ProviderFeatureMap>,
}

/// Registry membership for one provider.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ProviderKinds {
    pub registrar: bool,
    pub dns_provider: bool,
}

impl ProviderKinds {
    pub fn contains(&self, kind: ProviderKind) -> bool {
        match kind {
            ProviderKind::Registrar => self.registrar,
            ProviderKind::DnsProvider => self.dns_provider,
        }
    }
}

/// Sorted union of registrar and DNS-provider names, minus the sentinel.
pub fn provider_names(registry: &dyn ProviderRegistry) -> Vec<String> {
    let mut names: BTreeSet<&str> = registry.registrar_names();
    names.extend(registry.dns_provider_names());
    if names.remove(NO_PROVIDER) {
        debug!(sentinel = NO_PROVIDER, "skipping sentinel provider name");
    }
    names.into_iter().map(str::to_string).collect()
}

/// Build the matrix for the bundled [`FEATURES`] table.
pub fn build_matrix(registry: &dyn ProviderRegistry, notes: &dyn NotesStore) -> FeatureMatrix {
    build_matrix_with(FEATURES, registry, notes)
}

/// Build the matrix for an arbitrary feature table.
pub fn build_matrix_with(
    features: &[FeatureDefinition],
    registry: &dyn ProviderRegistry,
    notes: &dyn NotesStore,
) -> FeatureMatrix {
    let registrars = registry.registrar_names();
    let dns_providers = registry.dns_provider_names();

    let mut providers = BTreeMap::new();
    for name in provider_names(registry) {
        let kinds = ProviderKinds {
            registrar: registrars.contains(name.as_str()),
            dns_provider: dns_providers.contains(name.as_str()),
        };
        let provider_notes = notes.notes_for(&name);
        warn_on_unused_notes(&name, &provider_notes, features);

        let mut map = ProviderFeatureMap::default();
        for definition in features {
            if let Some(entry) =
                resolve_feature(definition, &name, kinds, &provider_notes, registry)
            {
                map.insert(definition.name, entry);
            }
        }
        debug!(provider = %name, entries = map.len(), "resolved provider features");
        providers.insert(name, map);
    }

    info!(
        providers = providers.len(),
        features = features.len(),
        "built feature matrix"
    );
    FeatureMatrix {
        features: features.to_vec(),
        providers,
    }
}

/// Resolve one cell. `None` means the cell is absent (n/a).
pub fn resolve_feature(
    definition: &FeatureDefinition,
    provider: &str,
    kinds: ProviderKinds,
    notes: &DocumentationNotes,
    registry: &dyn ProviderRegistry,
) -> Option<FeatureEntry> {
    match definition.resolution {
        Resolution::ProviderKind(kind) => Some(FeatureEntry::simple(kinds.contains(kind))),
        Resolution::Documented(cap) => notes.get(&cap).map(FeatureEntry::from),
        Resolution::Probed(cap) => Some(match notes.get(&cap) {
            Some(note) => FeatureEntry::from(note),
            None => FeatureEntry::simple(registry.has_capability(provider, cap)),
        }),
        // The probe asks "cannot use", the row shows "can use".
        Resolution::InvertedProbe(cap) => Some(match notes.get(&cap) {
            Some(note) => FeatureEntry::from(note),
            None => FeatureEntry::simple(!registry.has_capability(provider, cap)),
        }),
    }
}

fn warn_on_unused_notes(
    provider: &str,
    notes: &DocumentationNotes,
    features: &[FeatureDefinition],
) {
    for cap in notes.keys() {
        let used = features
            .iter()
            .any(|def| def.resolution.note_key() == Some(*cap));
        if !used {
            warn!(provider, capability = %cap, "documentation note has no matrix row");
        }
    }
}
