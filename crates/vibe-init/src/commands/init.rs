//! Project initialization command

use anyhow::{Context, Result};
use vibe_init_core::{
    EntryKind, InitOptions, InitReport, ManifestOutcome, ProjectInitializer, SettingsLoader,
};

use crate::cli::Cli;
use crate::output;
use crate::prompt::TerminalPrompt;

/// Create a new project from the template
pub fn run(cli: &Cli) -> Result<()> {
    let template_dir = cli.template.as_std_path();

    let mut loader = SettingsLoader::new(template_dir);
    if let Some(path) = &cli.settings {
        loader = loader.with_file(path.as_std_path());
    }
    let settings = loader.load().context("Failed to load settings")?;

    let initializer = ProjectInitializer::new(template_dir, settings)?;
    tracing::debug!(
        "Template {} with exclusions {:?}",
        initializer.template_dir().display(),
        initializer.exclusions().patterns()
    );

    let options = InitOptions {
        name: cli.name.clone(),
        force: cli.force,
    };
    let report = initializer.run(&options, &mut TerminalPrompt::new())?;

    if !cli.quiet {
        print_report(&report);
    }

    Ok(())
}

fn print_report(report: &InitReport) {
    let dirs = report
        .copied
        .iter()
        .filter(|e| e.kind == EntryKind::Directory)
        .count();
    let files = report.copied.len() - dirs;

    println!();
    output::success(&format!(
        "Project {} has been created successfully!",
        report.project_name
    ));
    output::kv("Location", &report.target_dir.display().to_string());
    output::kv(
        "Copied",
        &format!("{} directories, {} files", dirs, files),
    );
    if !report.skipped.is_empty() {
        output::kv("Skipped", &report.skipped.join(", "));
    }
    output::kv("README", &report.readme_path.display().to_string());

    match report.manifest {
        ManifestOutcome::Patched { .. } => {
            output::kv("Manifest", &format!("{} renamed", report.manifest_file))
        }
        ManifestOutcome::Unchanged => output::warning(&format!(
            "{} has no template name to replace; left as copied",
            report.manifest_file
        )),
        ManifestOutcome::Missing => {}
    }

    println!();
    output::info("Next steps:");
    println!("1. Navigate to your project directory:");
    println!("   cd {}", report.target_dir.display());
    println!("2. Install with poetry");
    println!("3. Configure your .env file based on .env.example");
    println!("4. Run your FastAPI application with docker compose");
}
