#![allow(dead_code)]

use anyhow::Result;
use featurematrix::{Capability, DocumentationNotes, NotesStore, OverrideNote, ProviderRegistry};
use serde_json::Value;
use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

pub fn repo_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

pub fn bundled_catalog_path() -> PathBuf {
    repo_root().join(featurematrix::DEFAULT_CATALOG_PATH)
}

// In-memory registry and notes store so matrix tests can pin every input.
#[derive(Default)]
pub struct FixtureRegistry {
    registrars: BTreeSet<String>,
    dns_providers: BTreeSet<String>,
    capabilities: BTreeMap<String, BTreeSet<Capability>>,
    notes: BTreeMap<String, DocumentationNotes>,
}

impl FixtureRegistry {
    pub fn registrar(mut self, name: &str) -> Self {
        self.registrars.insert(name.to_string());
        self
    }

    pub fn dns_provider(mut self, name: &str) -> Self {
        self.dns_providers.insert(name.to_string());
        self
    }

    pub fn capability(mut self, name: &str, capability: Capability) -> Self {
        self.capabilities
            .entry(name.to_string())
            .or_default()
            .insert(capability);
        self
    }

    pub fn note(
        mut self,
        name: &str,
        capability: Capability,
        has_feature: Option<bool>,
        comment: Option<&str>,
    ) -> Self {
        self.notes
            .entry(name.to_string())
            .or_default()
            .insert(capability, OverrideNote::new(has_feature, comment));
        self
    }
}

impl ProviderRegistry for FixtureRegistry {
    fn registrar_names(&self) -> BTreeSet<&str> {
        self.registrars.iter().map(String::as_str).collect()
    }

    fn dns_provider_names(&self) -> BTreeSet<&str> {
        self.dns_providers.iter().map(String::as_str).collect()
    }

    fn has_capability(&self, provider: &str, capability: Capability) -> bool {
        self.capabilities
            .get(provider)
            .map(|caps| caps.contains(&capability))
            .unwrap_or(false)
    }
}

impl NotesStore for FixtureRegistry {
    fn notes_for(&self, provider: &str) -> Cow<'_, DocumentationNotes> {
        match self.notes.get(provider) {
            Some(notes) => Cow::Borrowed(notes),
            None => Cow::Owned(DocumentationNotes::new()),
        }
    }
}

// Scratch checkout with a Cargo.toml and catalog so the binary accepts it as
// a repository root via FEATURE_MATRIX_ROOT.
pub struct TempRepo {
    dir: TempDir,
}

impl TempRepo {
    pub fn with_catalog(catalog: &Value) -> Result<Self> {
        let dir = TempDir::new()?;
        fs::write(dir.path().join("Cargo.toml"), "[package]\n")?;
        fs::create_dir_all(dir.path().join("catalogs"))?;
        fs::write(
            dir.path().join(featurematrix::DEFAULT_CATALOG_PATH),
            serde_json::to_string_pretty(catalog)?,
        )?;
        Ok(Self { dir })
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn output_path(&self) -> PathBuf {
        self.root().join(featurematrix::DEFAULT_OUTPUT_PATH)
    }

    pub fn json_output_path(&self) -> PathBuf {
        self.root().join(featurematrix::DEFAULT_JSON_OUTPUT_PATH)
    }
}

pub fn run_generator(repo: &TempRepo, args: &[&str]) -> Result<Output> {
    let output = Command::new(env!("CARGO_BIN_EXE_feature-matrix"))
        .args(args)
        .env("FEATURE_MATRIX_ROOT", repo.root())
        .env_remove("FEATURE_MATRIX_CATALOG")
        .env_remove("FEATURE_MATRIX_OUTPUT")
        .env("FEATURE_MATRIX_LOG", "warn")
        .output()?;
    Ok(output)
}
