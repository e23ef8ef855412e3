use crate::agents::{DeclarationKind, PlannedFile, TreeWalker, UpdateReport, VersionRewriter};
use crate::config::UpdaterConfig;
use crate::error::Result;
use crate::golang::{GoReleaseFeed, ReleaseSource, ReleaseVersion};
use crate::utils::path_validator::PathValidator;
use colored::Colorize;
use std::path::Path;
use tracing::debug;

/// Fetch the latest Go release from the configured feed and update the project
pub fn execute<P: AsRef<Path>>(config: &UpdaterConfig, project_path: P) -> Result<UpdateReport> {
    let feed = GoReleaseFeed::new(config)?;
    execute_update(config, project_path, &feed)
}

/// Execute the update workflow against an arbitrary release source.
///
/// Every manifest is validated before the first write, so a malformed
/// `go.mod` aborts the run with nothing modified. After that each file
/// commits on its own.
pub fn execute_update<P: AsRef<Path>>(
    config: &UpdaterConfig,
    project_path: P,
    source: &dyn ReleaseSource,
) -> Result<UpdateReport> {
    println!("{}", "Updating Go version declarations...".cyan().bold());

    // Step 1: Validate project root
    println!("\n{}", "1. Validating project path...".yellow());
    let root = PathValidator::validate_project_path(project_path)?;
    println!("   {}", root.display().to_string().dimmed());

    // Step 2: Resolve the latest release before touching anything
    println!("\n{}", "2. Fetching latest Go release...".yellow());
    let latest = source.latest()?;
    println!("{}", format!("✓ Latest Go release: {latest}").green());

    let mut report = UpdateReport::new(latest);
    let walker = TreeWalker::new(config);

    // Step 3: Locate declarations
    println!("\n{}", "3. Scanning project tree...".yellow());
    let build_files = walker.plan_build_files(&root, &mut report);
    let manifests = walker.plan_manifests(&root, &mut report)?;
    println!(
        "   Found {} {} and {} {}",
        build_files.len(),
        config.build_file_name.bright_cyan(),
        manifests.len(),
        config.manifest_file_name.bright_cyan()
    );

    // Step 4: Rewrite, build files first
    println!("\n{}", "4. Rewriting declarations...".yellow());
    apply_plan(&build_files, &manifests, &latest, &mut report)?;
    println!("{}", "✓ Rewrite completed".green());

    print_update_report(&report, &root);

    Ok(report)
}

/// Commit planned rewrites, build files first.
///
/// A build file that cannot be written is recorded as skipped and its
/// siblings are still processed. A manifest that cannot be written stops
/// the run; files already written stay written.
fn apply_plan(
    build_files: &[PlannedFile],
    manifests: &[PlannedFile],
    latest: &ReleaseVersion,
    report: &mut UpdateReport,
) -> Result<()> {
    for planned in build_files {
        match VersionRewriter::apply(planned, latest) {
            Ok(update) => report.record_update(update),
            Err(e) => {
                debug!("skipping build file: {e}");
                report.record_skip(&planned.target.path, e.to_string());
            }
        }
    }

    for planned in manifests {
        let update = VersionRewriter::apply(planned, latest)?;
        report.record_update(update);
    }

    Ok(())
}

fn print_update_report(report: &UpdateReport, root: &Path) {
    let display = |path: &Path| path.strip_prefix(root).unwrap_or(path).display().to_string();

    if report.is_empty() {
        println!("\n{}", "No Go version declarations were found".yellow());
    } else {
        println!("\n{}", "Update Summary:".cyan().bold());
        println!(
            "{}",
            format!("Total changes: {}", report.total_changes()).green()
        );

        for (kind, title) in [
            (DeclarationKind::BaseImage, "Build files"),
            (DeclarationKind::ModuleDirective, "Manifests"),
        ] {
            let mut updates = report.updates_of(kind).peekable();
            if updates.peek().is_none() {
                continue;
            }

            println!("\n{}:", title.cyan());
            for update in updates {
                if update.is_unchanged() {
                    println!(
                        "  • {} {}",
                        display(&update.path).white().bold(),
                        "(already current)".dimmed()
                    );
                    continue;
                }
                for replacement in &update.replacements {
                    println!(
                        "  • {}:{} {} → {}",
                        display(&update.path).white().bold(),
                        replacement.line,
                        replacement.old.red(),
                        replacement.new.green()
                    );
                }
            }
        }
    }

    if !report.skipped.is_empty() {
        println!("\n{}:", "Skipped".yellow());
        for skipped in &report.skipped {
            println!(
                "  • {} {}",
                display(&skipped.path),
                format!("({})", skipped.reason).dimmed()
            );
        }
    }

    println!(
        "\n{}",
        format!("✨ Go version set to {}", report.latest)
            .green()
            .bold()
    );
}
