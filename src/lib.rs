pub mod error;
pub mod logging;
pub mod matrix;
pub mod output;
pub mod providers;
pub mod render;
mod schema_loader;

pub use error::MatrixError;
pub use matrix::{
    FEATURES, FeatureDefinition, FeatureEntry, FeatureMatrix, ProviderFeatureMap, ProviderKinds,
    Resolution, build_matrix, build_matrix_with, provider_names, resolve_feature,
};
pub use output::{DEFAULT_JSON_OUTPUT_PATH, DEFAULT_OUTPUT_PATH, check_up_to_date, write_atomic};
pub use providers::{
    Capability, DEFAULT_CATALOG_PATH, DocumentationNotes, NO_PROVIDER, NotesStore, OverrideNote,
    ProviderCatalog, ProviderKind, ProviderRecord, ProviderRegistry, load_catalog_from_path,
};
pub use render::{MatrixTemplate, escape_html, render_json};
pub use schema_loader::PROVIDER_CATALOG_SCHEMA_VERSION;

use anyhow::{Result, bail};
use std::{
    env, fs,
    path::{Path, PathBuf},
};

const ROOT_ENV: &str = "FEATURE_MATRIX_ROOT";
const MANIFEST: &str = "Cargo.toml";

fn is_repo_root(candidate: &Path) -> bool {
    candidate.join(DEFAULT_CATALOG_PATH).is_file() && candidate.join(MANIFEST).is_file()
}

fn repo_root_from_hint(hint: &str) -> Option<PathBuf> {
    if hint.is_empty() {
        return None;
    }
    let hint_path = PathBuf::from(hint);
    if !hint_path.exists() || !is_repo_root(&hint_path) {
        return None;
    }
    fs::canonicalize(hint_path).ok()
}

fn search_upwards(start: &Path) -> Option<PathBuf> {
    let mut dir = fs::canonicalize(start).ok()?;
    loop {
        if is_repo_root(&dir) {
            return Some(dir);
        }
        if !dir.pop() {
            break;
        }
    }
    None
}

/// Locate the repository that holds the provider catalog.
///
/// Checks `FEATURE_MATRIX_ROOT`, then walks up from the executable, then
/// falls back to the root baked in at build time.
pub fn find_repo_root() -> Result<PathBuf> {
    if let Ok(env_root) = env::var(ROOT_ENV) {
        if let Some(root) = repo_root_from_hint(&env_root) {
            return Ok(root);
        }
    }

    if let Ok(exe_path) = env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            if let Some(root) = search_upwards(exe_dir) {
                return Ok(root);
            }
        }
    }

    if let Some(hint) = option_env!("FEATURE_MATRIX_ROOT_HINT") {
        if let Some(root) = repo_root_from_hint(hint) {
            return Ok(root);
        }
    }

    bail!(
        "Unable to locate the repository root (no {DEFAULT_CATALOG_PATH} found). Set {ROOT_ENV} to the checkout."
    );
}

/// Resolve `path` against `repo_root` unless it is already absolute.
pub fn resolve_in_repo(repo_root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        repo_root.join(path)
    }
}
