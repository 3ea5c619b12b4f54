//! Implementation of the `stencil inspect` command.
//!
//! Shows a template's manifest (identity, parameters, derived rules) and its
//! tree entries without rendering anything.

use serde_json::json;
use tracing::instrument;

use stencil_adapters::{FilesystemTemplateSource, TemplateManifest};
use stencil_core::{application::ports::TemplateSource, domain::TemplateEntry};

use crate::{
    cli::{InspectArgs, InspectFormat, global::GlobalArgs},
    commands::resolve_template_dir,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

#[instrument(skip_all, fields(template = %args.template.display()))]
pub fn execute(
    args: InspectArgs,
    _global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let template_root = resolve_template_dir(&args.template, &config)?;
    let manifest = TemplateManifest::load_or_default(&template_root).map_err(CliError::Core)?;
    let tree = FilesystemTemplateSource::new(&template_root)
        .load()
        .map_err(CliError::Core)?;

    match args.format {
        InspectFormat::Table => {
            let title = if manifest.metadata.name.is_empty() {
                template_root.display().to_string()
            } else {
                manifest.metadata.name.clone()
            };
            output.header(&format!("Template: {title}"))?;
            if let Some(desc) = &manifest.metadata.description {
                output.print(&format!("  {desc}"))?;
            }
            if !manifest.template.id.is_empty() {
                output.print(&format!(
                    "  id: {} @ {}",
                    manifest.template.id, manifest.template.version
                ))?;
            }

            output.print("")?;
            output.header("Parameters:")?;
            if manifest.parameters.is_empty() {
                output.print("  (none declared)")?;
            }
            for param in &manifest.parameters {
                let default = param
                    .default
                    .as_ref()
                    .map_or_else(|| "required".to_string(), |d| format!("default: {d}"));
                match &param.description {
                    Some(desc) => output.print(&format!("  {} ({default}) - {desc}", param.name))?,
                    None => output.print(&format!("  {} ({default})", param.name))?,
                }
            }
            for rule in &manifest.derived {
                output.print(&format!("  {} (derived from {})", rule.name, rule.from))?;
            }

            output.print("")?;
            output.header(&format!("Entries ({}):", tree.len()))?;
            for entry in tree.entries() {
                match entry {
                    TemplateEntry::Directory(d) => output.print(&format!("  {}/", d.path))?,
                    TemplateEntry::File(f) => {
                        output.print(&format!("  {} ({} bytes)", f.path, f.content.len()))?
                    }
                }
            }
        }
        InspectFormat::Json => {
            let entries: Vec<_> = tree
                .entries()
                .iter()
                .map(|entry| match entry {
                    TemplateEntry::Directory(d) => json!({
                        "path": d.path,
                        "kind": "directory",
                    }),
                    TemplateEntry::File(f) => json!({
                        "path": f.path,
                        "kind": "file",
                        "bytes": f.content.len(),
                        "executable": f.permissions.is_executable(),
                    }),
                })
                .collect();

            let doc = json!({
                "template": manifest.template,
                "metadata": manifest.metadata,
                "parameters": manifest.parameters,
                "derived": manifest.derived,
                "entries": entries,
            });

            // Serialise straight to stdout (bypasses OutputManager because
            // JSON output must be parseable even in non-TTY pipes).
            println!(
                "{}",
                serde_json::to_string_pretty(&doc).unwrap_or_else(|_| "{}".into())
            );
        }
    }

    Ok(())
}
