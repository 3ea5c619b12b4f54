//! Template manifest parsing.
//!
//! A template root may carry a `template.toml` manifest describing its
//! identity, the parameters it expects, and the derived-parameter rule
//! table. The manifest is engine configuration — it is never copied into
//! the rendered output.
//!
//! # `template.toml` format
//!
//! ```toml
//! [template]
//! id      = "android-app"        # unique identifier
//! version = "1.0.0"
//!
//! [metadata]
//! name        = "Android App"
//! description = "Minimal Android application."   # optional
//! author      = "Stencil"                        # optional
//! tags        = ["android", "mobile"]            # optional
//!
//! # Parameters the template expects. A parameter without a default must be
//! # supplied by the caller (e.g. `--param bundle_id=com.example.app`).
//! [[parameters]]
//! name        = "project_name"
//! default     = "myapp"
//! description = "Name of the generated project"
//!
//! [[parameters]]
//! name = "bundle_id"
//!
//! # Derived parameters: computed from another parameter through a pipeline
//! # of pure transforms, evaluated in dependency order.
//! [[derived]]
//! name       = "bundle_path"
//! from       = "bundle_id"
//! transforms = [{ replace = { find = ".", with = "/" } }]
//!
//! [[derived]]
//! name       = "project_class"
//! from       = "project_name"
//! transforms = ["pascal_case"]
//! ```

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use stencil_core::{
    application::ApplicationError,
    domain::DerivedRule,
    error::EngineResult,
};

/// Deserialised representation of a `template.toml` file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TemplateManifest {
    #[serde(default)]
    pub template: TemplateSection,
    #[serde(default)]
    pub metadata: MetadataSection,
    /// Parameters the template expects from the caller.
    #[serde(default)]
    pub parameters: Vec<ParameterEntry>,
    /// Derived-parameter rule table, deserialized straight into the core
    /// rule type.
    #[serde(default)]
    pub derived: Vec<DerivedRule>,
}

/// `[template]` section — identity of the template.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TemplateSection {
    /// Unique slug, e.g. `"android-app"`.
    #[serde(default)]
    pub id: String,
    /// SemVer string, e.g. `"1.0.0"`.
    #[serde(default)]
    pub version: String,
}

/// `[metadata]` section — human-facing information about the template.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MetadataSection {
    /// Display name shown in `stencil inspect`.
    #[serde(default)]
    pub name: String,
    pub description: Option<String>,
    pub author: Option<String>,
    /// Free-form tags used for filtering and search.
    pub tags: Option<Vec<String>>,
}

/// One entry under `[[parameters]]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParameterEntry {
    /// Parameter name as referenced by `{{ tokens }}`.
    pub name: String,
    /// Value used when the caller supplies no override.
    pub default: Option<String>,
    /// Shown by `stencil inspect` next to the parameter.
    pub description: Option<String>,
}

impl TemplateManifest {
    /// File name looked up in the template root.
    pub const FILE_NAME: &'static str = "template.toml";

    /// Load the manifest from a template root.
    ///
    /// # Errors
    ///
    /// [`ApplicationError::InvalidManifest`] if the file is missing,
    /// unreadable, or not valid TOML.
    pub fn load(template_root: &Path) -> EngineResult<Self> {
        let path = template_root.join(Self::FILE_NAME);

        let raw = fs::read_to_string(&path).map_err(|e| ApplicationError::InvalidManifest {
            path: path.clone(),
            reason: e.to_string(),
        })?;

        Self::parse(&raw, &path)
    }

    /// Like [`load`](Self::load), but a template without a manifest is legal:
    /// it simply declares no parameters and no derived rules (pure-copy
    /// templates need no configuration).
    pub fn load_or_default(template_root: &Path) -> EngineResult<Self> {
        let path = template_root.join(Self::FILE_NAME);
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load(template_root)
    }

    fn parse(raw: &str, path: &Path) -> EngineResult<Self> {
        let manifest: Self = toml::from_str(raw).map_err(|e| {
            ApplicationError::InvalidManifest {
                path: path.to_path_buf(),
                reason: e.to_string(),
            }
        })?;
        Ok(manifest)
    }

    /// Merge caller overrides over declared defaults into the user-parameter
    /// list handed to the engine.
    ///
    /// Overrides may introduce names the manifest does not declare (extra
    /// context is legal). Declared parameters without a default that receive
    /// no override are collected into one
    /// [`ApplicationError::MissingParameters`] so the caller sees the whole
    /// list at once.
    pub fn user_parameters(
        &self,
        overrides: &BTreeMap<String, String>,
    ) -> EngineResult<Vec<(String, String)>> {
        let mut resolved: BTreeMap<String, String> = BTreeMap::new();
        let mut missing = Vec::new();

        for param in &self.parameters {
            match overrides.get(&param.name).or(param.default.as_ref()) {
                Some(value) => {
                    resolved.insert(param.name.clone(), value.clone());
                }
                None => missing.push(param.name.clone()),
            }
        }

        if !missing.is_empty() {
            return Err(ApplicationError::MissingParameters { names: missing }.into());
        }

        for (name, value) in overrides {
            resolved.entry(name.clone()).or_insert_with(|| value.clone());
        }

        Ok(resolved.into_iter().collect())
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────
