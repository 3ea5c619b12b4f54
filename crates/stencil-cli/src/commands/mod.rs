pub mod completions;
pub mod inspect;
pub mod new;

use std::path::{Path, PathBuf};

use crate::{
    config::AppConfig,
    error::{CliError, CliResult},
};

/// Resolve the TEMPLATE argument to a concrete directory.
///
/// A path that exists is used as-is; otherwise a bare name is looked up
/// under the configured `templates.search_path`.
pub fn resolve_template_dir(template: &Path, config: &AppConfig) -> CliResult<PathBuf> {
    if template.is_dir() {
        return Ok(template.to_path_buf());
    }

    if let Some(search_path) = &config.templates.search_path {
        let candidate = search_path.join(template);
        if candidate.is_dir() {
            return Ok(candidate);
        }
    }

    Err(CliError::TemplateNotFound {
        name: template.display().to_string(),
    })
}
