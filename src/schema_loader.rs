//! JSON Schema guard for catalog documents.
//!
//! The provider catalog contract lives in
//! `schema/provider_catalog.schema.json` and is compiled into the binary so
//! catalog validation does not depend on the working directory. Callers
//! compile once and validate raw `Value`s before handing them to serde.

use anyhow::{Result, anyhow, bail};
use jsonschema::JSONSchema;
use serde_json::Value;

/// Version marker every provider catalog must declare.
pub const PROVIDER_CATALOG_SCHEMA_VERSION: &str = "provider_catalog_v1";

const PROVIDER_CATALOG_SCHEMA: &str =
    include_str!("../schema/provider_catalog.schema.json");

/// Compiled provider catalog contract.
pub(crate) struct CatalogSchema {
    compiled: JSONSchema,
}

impl CatalogSchema {
    pub(crate) fn load() -> Result<Self> {
        let raw: Value = serde_json::from_str(PROVIDER_CATALOG_SCHEMA)
            .map_err(|err| anyhow!("parsing bundled provider catalog schema: {err}"))?;
        let declared = extract_schema_version(&raw, "/properties/schema_version/const")
            .ok_or_else(|| anyhow!("provider catalog schema missing schema_version const"))?;
        if declared != PROVIDER_CATALOG_SCHEMA_VERSION {
            bail!(
                "bundled provider catalog schema declares '{}', expected {}",
                declared,
                PROVIDER_CATALOG_SCHEMA_VERSION
            );
        }
        let compiled = JSONSchema::compile(&raw)
            .map_err(|err| anyhow!("compiling provider catalog schema: {err}"))?;
        Ok(Self { compiled })
    }

    /// Validate `instance`, joining every violation into one error.
    pub(crate) fn validate(&self, instance: &Value, label: &str) -> Result<()> {
        if let Err(errors) = self.compiled.validate(instance) {
            let details = errors
                .map(|err| format!("{}: {}", err.instance_path, err))
                .collect::<Vec<_>>()
                .join("\n");
            bail!("{label} failed schema validation:\n{details}");
        }
        Ok(())
    }
}

fn extract_schema_version(schema: &Value, pointer: &str) -> Option<String> {
    let version = schema.pointer(pointer).and_then(Value::as_str)?;
    if version
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
    {
        Some(version.to_string())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn bundled_schema_compiles() {
        assert!(CatalogSchema::load().is_ok());
    }

    #[test]
    fn rejects_wrong_version_marker() {
        let schema = CatalogSchema::load().unwrap();
        let doc = json!({"schema_version": "provider_catalog_v0", "providers": []});
        let err = schema.validate(&doc, "fixture").unwrap_err();
        assert!(err.to_string().contains("fixture failed schema validation"));
    }

    #[test]
    fn rejects_unknown_capability_names() {
        let schema = CatalogSchema::load().unwrap();
        let doc = json!({
            "schema_version": PROVIDER_CATALOG_SCHEMA_VERSION,
            "providers": [{"name": "FOO", "dns_provider": true, "capabilities": ["CanUseMX"]}]
        });
        assert!(schema.validate(&doc, "fixture").is_err());
    }

    #[test]
    fn version_extraction_rejects_odd_characters() {
        let schema = json!({"properties": {"schema_version": {"const": "v1 beta"}}});
        assert_eq!(
            extract_schema_version(&schema, "/properties/schema_version/const"),
            None
        );
    }
}
