// Applies a rewrite pass across scanned files, with backups and dry-run
use crate::backup;
use crate::rules::RuleSet;
use crate::scanner::SourceFile;
use anyhow::Result;
use colored::Colorize;
use std::fs;
use tracing::{error, info, warn};

#[derive(Debug, Default)]
pub struct TransformSummary {
    pub files_seen: usize,
    pub files_changed: usize,
    pub total_replacements: usize,
    pub files_failed: usize,
}

pub struct CssTransformer {
    rules: RuleSet,
    dry_run: bool,
    force: bool,
    verbose: bool,
}

impl CssTransformer {
    pub fn new(rules: RuleSet) -> Self {
        Self {
            rules,
            dry_run: false,
            force: false,
            verbose: false,
        }
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Run the pass over every file. Unchanged files are never rewritten.
    /// A file whose backup or write fails is reported and skipped; a failed
    /// write is rolled back from the backup just taken.
    pub fn run(&self, files: &[SourceFile]) -> Result<TransformSummary> {
        info!("Running {} over {} files", self.rules.name, files.len());
        let mut summary = TransformSummary {
            files_seen: files.len(),
            ..Default::default()
        };

        for file in files {
            let outcome = self.rules.apply(&file.content);
            if !outcome.changed() {
                if self.verbose {
                    println!("  {} {}", "·".dimmed(), file.path.display());
                }
                continue;
            }

            if !self.dry_run {
                let bak = match backup::create_backup(&file.path, self.force) {
                    Ok(bak) => bak,
                    Err(e) => {
                        warn!("Skipping {}: {}", file.path.display(), e);
                        summary.files_failed += 1;
                        continue;
                    }
                };

                if let Err(e) = fs::write(&file.path, &outcome.content) {
                    error!("Write failed for {}: {}", file.path.display(), e);
                    match backup::restore_backup(&bak, &file.path) {
                        Ok(()) => warn!("Restored {} from backup", file.path.display()),
                        Err(re) => error!("Restore also failed: {}", re),
                    }
                    summary.files_failed += 1;
                    continue;
                }
            }

            summary.files_changed += 1;
            summary.total_replacements += outcome.total();

            println!(
                "{} {} ({} replacements)",
                "✔".green(),
                file.path.display(),
                outcome.total()
            );
            if self.verbose {
                for (rule, count) in &outcome.changes {
                    println!("    {} x{}", rule, count);
                }
            }
        }

        self.print_summary(&summary);
        Ok(summary)
    }

    fn print_summary(&self, summary: &TransformSummary) {
        println!();
        println!("{}", "Summary".bold());
        println!("  Files scanned:  {}", summary.files_seen);
        println!("  Files changed:  {}", summary.files_changed);
        println!("  Replacements:   {}", summary.total_replacements);
        if summary.files_failed > 0 {
            println!(
                "  {}",
                format!("Files skipped on error: {}", summary.files_failed).red()
            );
        }
        if self.dry_run && summary.files_changed > 0 {
            println!(
                "{}",
                "Dry run: no files were written. Re-run without --dry-run to apply.".yellow()
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules;
    use crate::scanner::SourceScanner;
    use tempfile::tempdir;

    fn scan_css(root: &std::path::Path) -> Vec<SourceFile> {
        SourceScanner::new(root, &["css"]).scan()
    }

    #[test]
    fn test_changed_file_gets_backup_and_rewrite() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("a.css");
        fs::write(&file, ".a { color: #eee; }").unwrap();

        let transformer = CssTransformer::new(rules::value_rules("tc"));
        let summary = transformer.run(&scan_css(dir.path())).unwrap();

        assert_eq!(summary.files_changed, 1);
        assert_eq!(
            fs::read_to_string(&file).unwrap(),
            ".a { color: var(--tc-color-border, #eee); }"
        );
        assert_eq!(
            fs::read_to_string(backup::backup_path(&file)).unwrap(),
            ".a { color: #eee; }"
        );
    }

    #[test]
    fn test_unchanged_file_is_not_written() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("a.css");
        fs::write(&file, ".a { margin: 4px; }").unwrap();

        let transformer = CssTransformer::new(rules::value_rules("tc"));
        let summary = transformer.run(&scan_css(dir.path())).unwrap();

        assert_eq!(summary.files_changed, 0);
        assert!(!backup::backup_path(&file).exists());
        assert_eq!(fs::read_to_string(&file).unwrap(), ".a { margin: 4px; }");
    }

    #[test]
    fn test_dry_run_leaves_files_alone() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("a.css");
        fs::write(&file, ".a { color: #fff; }").unwrap();

        let transformer = CssTransformer::new(rules::value_rules("tc")).with_dry_run(true);
        let summary = transformer.run(&scan_css(dir.path())).unwrap();

        assert_eq!(summary.files_changed, 1);
        assert_eq!(fs::read_to_string(&file).unwrap(), ".a { color: #fff; }");
        assert!(!backup::backup_path(&file).exists());
    }

    #[test]
    fn test_second_run_is_a_no_op() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("a.css");
        fs::write(&file, "@media (max-width: 768px) { .a { display: none; } }").unwrap();

        let transformer = CssTransformer::new(rules::breakpoint_rules("tc")).with_force(true);
        transformer.run(&scan_css(dir.path())).unwrap();
        let after_first = fs::read_to_string(&file).unwrap();

        let transformer = CssTransformer::new(rules::breakpoint_rules("tc")).with_force(true);
        let summary = transformer.run(&scan_css(dir.path())).unwrap();

        assert_eq!(summary.files_changed, 0);
        assert_eq!(fs::read_to_string(&file).unwrap(), after_first);
    }

    #[test]
    fn test_existing_backup_without_force_skips_file() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("a.css");
        fs::write(&file, ".a { color: #eee; }").unwrap();
        fs::write(backup::backup_path(&file), "earlier state").unwrap();

        let transformer = CssTransformer::new(rules::value_rules("tc"));
        let summary = transformer.run(&scan_css(dir.path())).unwrap();

        assert_eq!(summary.files_changed, 0);
        assert_eq!(summary.files_failed, 1);
        // neither the file nor the old backup was touched
        assert_eq!(fs::read_to_string(&file).unwrap(), ".a { color: #eee; }");
        assert_eq!(
            fs::read_to_string(backup::backup_path(&file)).unwrap(),
            "earlier state"
        );
    }
}
