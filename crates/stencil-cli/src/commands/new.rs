//! Implementation of the `stencil new` command.
//!
//! Responsibility: translate CLI arguments into a render invocation, call
//! the core render service, and display results. No rendering logic lives
//! here.

use std::collections::BTreeMap;

use tracing::{debug, info, instrument};

use stencil_adapters::{FilesystemTemplateSource, LocalFilesystem, TemplateManifest};
use stencil_core::application::{RenderOptions, RenderService};

use crate::{
    cli::{NewArgs, global::GlobalArgs},
    commands::resolve_template_dir,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Execute the `stencil new` command.
///
/// Dispatch sequence:
/// 1. Resolve the template directory and load its manifest
/// 2. Merge `--param` overrides over manifest defaults
/// 3. Confirm with user unless `--yes` or `--quiet`
/// 4. Early-exit if `--dry-run`
/// 5. Execute the render via `RenderService`
/// 6. Print next-steps guidance
#[instrument(skip_all, fields(template = %args.template.display()))]
pub fn execute(
    args: NewArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    // 1. Template + manifest
    let template_root = resolve_template_dir(&args.template, &config)?;
    let manifest = TemplateManifest::load_or_default(&template_root).map_err(CliError::Core)?;

    // 2. Parameters: overrides beat manifest defaults; missing required
    //    parameters are reported all at once.
    let overrides: BTreeMap<String, String> = args.params.iter().cloned().collect();
    let user_params = manifest.user_parameters(&overrides).map_err(CliError::Core)?;

    debug!(
        template_root = %template_root.display(),
        parameters = user_params.len(),
        derived_rules = manifest.derived.len(),
        "Template resolved"
    );

    let overwrite = args.overwrite || config.render.overwrite;

    // 3. Show configuration and confirm
    if !global.quiet && !args.yes && !args.dry_run {
        show_configuration(&manifest, &user_params, &args, &output)?;
        if overwrite {
            output.warning("Existing destination files will be overwritten")?;
        }
        if !confirm()? {
            return Err(CliError::Cancelled);
        }
    }

    // 4. Build service
    let service = RenderService::new(
        Box::new(FilesystemTemplateSource::new(&template_root)),
        Box::new(LocalFilesystem::new()),
    );

    // 5. Dry run: render but do not write.
    if args.dry_run {
        let tree = service
            .preview(user_params, &manifest.derived)
            .map_err(CliError::Core)?;
        output.info(&format!(
            "Dry run: would create {} entries under {}",
            tree.entry_count(),
            args.destination.display(),
        ))?;
        for entry in tree.entries() {
            output.print(&format!("  {}", entry.path()))?;
        }
        return Ok(());
    }

    // 6. Render
    output.header(&format!("Rendering into {}...", args.destination.display()))?;
    info!(dest = %args.destination.display(), "Render started");

    let opts = RenderOptions {
        overwrite,
        ..Default::default()
    };
    let report = service
        .render(user_params, &manifest.derived, &args.destination, &opts)
        .map_err(CliError::Core)?;

    info!(
        files = report.files_written,
        directories = report.directories_created,
        "Render completed"
    );

    // 7. Success + next steps
    output.success(&format!(
        "Rendered {} files into {}",
        report.files_written,
        args.destination.display(),
    ))?;

    if !global.quiet {
        output.print("")?;
        output.print("Next steps:")?;
        output.print(&format!("  cd {}", args.destination.display()))?;
        output.print("  # Start building!")?;
    }

    Ok(())
}

// ── UI helpers ────────────────────────────────────────────────────────────────

fn show_configuration(
    manifest: &TemplateManifest,
    params: &[(String, String)],
    args: &NewArgs,
    out: &OutputManager,
) -> CliResult<()> {
    out.header("Configuration")?;
    if !manifest.metadata.name.is_empty() {
        out.print(&format!("  Template:     {}", manifest.metadata.name))?;
    }
    out.print(&format!("  Source:       {}", args.template.display()))?;
    out.print(&format!("  Destination:  {}", args.destination.display()))?;
    for (name, value) in params {
        out.print(&format!("  {name} = {value}"))?;
    }
    out.print("")?;
    Ok(())
}

fn confirm() -> CliResult<bool> {
    use std::io::{self, Write};

    print!("Continue? [Y/n] ");
    io::stdout().flush().map_err(|e| CliError::IoError {
        message: "failed to flush stdout".into(),
        source: e,
    })?;

    let mut input = String::new();
    io::stdin()
        .read_line(&mut input)
        .map_err(|e| CliError::IoError {
            message: "failed to read confirmation input".into(),
            source: e,
        })?;

    let input = input.trim().to_ascii_lowercase();
    Ok(input.is_empty() || input == "y" || input == "yes")
}
