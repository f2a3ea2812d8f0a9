//! Provider registry wiring.
//!
//! The matrix builder never talks to provider plugins directly. It reads two
//! seams: a [`ProviderRegistry`] that knows which providers exist, what type
//! they are, and which capabilities they declare, and a [`NotesStore`] holding
//! hand-written documentation notes. `ProviderCatalog` implements both from
//! `catalogs/providers.json`; tests plug in their own in-memory sources.

pub mod capability;
pub mod catalog;

pub use capability::{Capability, DocumentationNotes, OverrideNote};
pub use catalog::{ProviderCatalog, ProviderRecord, load_catalog_from_path};

use std::borrow::Cow;
use std::collections::BTreeSet;

/// Reserved provider name meaning "no provider". Never rendered.
pub const NO_PROVIDER: &str = "NONE";

/// Default relative path to the bundled provider catalog.
pub const DEFAULT_CATALOG_PATH: &str = "catalogs/providers.json";

/// The two provider type registries a name can belong to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ProviderKind {
    Registrar,
    DnsProvider,
}

/// Source of provider names, type membership, and capability probes.
pub trait ProviderRegistry {
    fn registrar_names(&self) -> BTreeSet<&str>;

    fn dns_provider_names(&self) -> BTreeSet<&str>;

    /// Whether `provider` declares `capability`. Unknown providers probe false.
    fn has_capability(&self, provider: &str, capability: Capability) -> bool;
}

/// Source of hand-written per-provider documentation notes.
pub trait NotesStore {
    /// Notes for `provider`; an unknown provider yields an empty map.
    fn notes_for(&self, provider: &str) -> Cow<'_, DocumentationNotes>;
}
