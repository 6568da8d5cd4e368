use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

mod audit;
mod backup;
mod candidates;
mod classify;
mod docaudit;
mod extractor;
mod inventory;
mod models;
mod report;
mod rules;
mod scanner;
mod transform;

use audit::HookAuditor;
use candidates::CandidateAnalyzer;
use docaudit::DocAuditor;
use rules::RuleSet;
use scanner::SourceScanner;
use transform::CssTransformer;

#[derive(Parser)]
#[command(name = "tcmaint")]
#[command(about = "Maintenance passes for CSS design tokens and hook audits", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Namespace-prefix CSS variables and repair legacy names
    PrefixVars {
        /// Base directory to scan for CSS files
        #[arg(short, long, default_value = "./src")]
        path: PathBuf,

        /// Variable namespace prefix (without dashes)
        #[arg(long, default_value = "tc")]
        prefix: String,

        /// Show changes without writing any file
        #[arg(long)]
        dry_run: bool,

        /// Overwrite existing .bak backups
        #[arg(long)]
        force: bool,
    },

    /// Replace hardcoded CSS values with token references
    FixValues {
        /// Base directory to scan for CSS files
        #[arg(short, long, default_value = "./src")]
        path: PathBuf,

        /// Variable namespace prefix (without dashes)
        #[arg(long, default_value = "tc")]
        prefix: String,

        /// Show changes without writing any file
        #[arg(long)]
        dry_run: bool,

        /// Overwrite existing .bak backups
        #[arg(long)]
        force: bool,
    },

    /// Standardize media-query breakpoints to token references
    Breakpoints {
        /// Base directory to scan for CSS files
        #[arg(short, long, default_value = "./src")]
        path: PathBuf,

        /// Variable namespace prefix (without dashes)
        #[arg(long, default_value = "tc")]
        prefix: String,

        /// Show changes without writing any file
        #[arg(long)]
        dry_run: bool,

        /// Overwrite existing .bak backups
        #[arg(long)]
        force: bool,
    },

    /// Audit the hooks tree and write Markdown + JSON reports
    AuditHooks {
        /// Project root (must contain src/hooks)
        #[arg(short, long, default_value = ".")]
        path: PathBuf,

        /// Output path without extension (.md and .json are written)
        #[arg(short, long, default_value = "reports/hook-audit")]
        output: PathBuf,
    },

    /// Score JSDoc coverage of the hooks tree and write a report
    AuditDocs {
        /// Project root (must contain src/hooks)
        #[arg(short, long, default_value = ".")]
        path: PathBuf,

        /// Markdown output path
        #[arg(short, long, default_value = "reports/hook-docs.md")]
        output: PathBuf,
    },

    /// Analyze generalization candidates from a prior audit
    Candidates {
        /// JSON artifact written by audit-hooks
        #[arg(long, default_value = "reports/hook-audit.json")]
        audit_json: PathBuf,

        /// Markdown output path
        #[arg(short, long, default_value = "reports/generalization-plan.md")]
        output: PathBuf,
    },

    /// Show migration progress from an inventory checklist
    Progress {
        /// Inventory Markdown document with - [ ] / - [x] items
        #[arg(short, long)]
        inventory: PathBuf,
    },
}

fn run_css_pass(
    path: &Path,
    rules: RuleSet,
    dry_run: bool,
    force: bool,
    verbose: bool,
) -> Result<()> {
    if !path.exists() {
        bail!("path does not exist: {}", path.display());
    }

    let files = SourceScanner::new(path, &["css"]).scan();
    info!("Found {} CSS files under {}", files.len(), path.display());

    CssTransformer::new(rules)
        .with_dry_run(dry_run)
        .with_force(force)
        .with_verbose(verbose)
        .run(&files)?;
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::PrefixVars {
            path,
            prefix,
            dry_run,
            force,
        } => {
            info!("🎨 Prefixing CSS variables with --{}-...", prefix);
            run_css_pass(&path, rules::prefix_rules(&prefix), dry_run, force, cli.verbose)
        }

        Commands::FixValues {
            path,
            prefix,
            dry_run,
            force,
        } => {
            info!("🎨 Replacing hardcoded values with tokens...");
            run_css_pass(&path, rules::value_rules(&prefix), dry_run, force, cli.verbose)
        }

        Commands::Breakpoints {
            path,
            prefix,
            dry_run,
            force,
        } => {
            info!("📐 Standardizing media-query breakpoints...");
            run_css_pass(
                &path,
                rules::breakpoint_rules(&prefix),
                dry_run,
                force,
                cli.verbose,
            )
        }

        Commands::AuditHooks { path, output } => {
            info!("🔍 Auditing hooks in {}...", path.display());

            let audit = HookAuditor::new(&path).run()?;

            let md_path = output.with_extension("md");
            let json_path = output.with_extension("json");
            report::write_report(&md_path, &audit.render_markdown())?;
            report::write_report(&json_path, &serde_json::to_string_pretty(&audit.data)?)?;

            println!("✅ Audit report: {}", md_path.display());
            println!("✅ Audit data:   {}", json_path.display());
            println!(
                "   {} hooks, {} high-priority candidates",
                audit.total_hooks(),
                audit.high_priority.len()
            );
            Ok(())
        }

        Commands::AuditDocs { path, output } => {
            info!("📚 Auditing hook documentation in {}...", path.display());

            let docs = DocAuditor::new(&path).run()?;
            report::write_report(&output, &docs.render_markdown())?;

            println!("✅ Documentation report: {}", output.display());
            println!(
                "   {} hooks, {} well documented, {} critical",
                docs.records.len(),
                docs.well_documented(),
                docs.critical()
            );
            Ok(())
        }

        Commands::Candidates { audit_json, output } => {
            info!("🎯 Analyzing generalization candidates...");

            let plan = CandidateAnalyzer::new(&audit_json).run()?;
            report::write_report(&output, &plan.render_markdown())?;

            println!("✅ Plan written to: {}", output.display());
            println!(
                "   {} buckets evaluated, {} hooks worth individual review",
                plan.evaluations.len(),
                plan.interesting.len()
            );
            Ok(())
        }

        Commands::Progress { inventory } => {
            info!("📋 Reading inventory {}...", inventory.display());
            inventory::report_progress(&inventory)?;
            Ok(())
        }
    }
}
