// Hook dependency audit: inventory, usage counts, migration candidates
use crate::classify::{classify, PatternBucket};
use crate::extractor::{self, HOOK_IMPORT_RE, GENERIC_HOOKS};
use crate::models::{AuditData, HookRecord};
use crate::report;
use crate::scanner::SourceScanner;
use anyhow::{bail, Result};
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing::info;

/// A bucket needs at least this many similar hooks before any of them is
/// worth generalizing.
const MIN_BUCKET_SIZE: usize = 3;

pub struct HookAuditor {
    hooks_dir: PathBuf,
    components_dir: PathBuf,
}

#[derive(Debug, Default)]
pub struct DomainStats {
    pub total_hooks: usize,
    pub generic_hooks: usize,
    pub deprecated_hooks: usize,
    pub wrapper_hooks: usize,
    pub avg_complexity: f64,
    pub patterns: BTreeMap<PatternBucket, usize>,
}

pub struct AuditReport {
    pub data: AuditData,
    pub domain_stats: BTreeMap<String, DomainStats>,
    pub high_priority: Vec<(String, PatternBucket)>,
    pub medium_priority: Vec<(String, PatternBucket)>,
    pub low_priority: Vec<(String, PatternBucket)>,
    pub already_generic: Vec<String>,
}

impl HookAuditor {
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        let root = project_root.into();
        Self {
            hooks_dir: root.join("src").join("hooks"),
            components_dir: root.join("src").join("components"),
        }
    }

    pub fn run(&self) -> Result<AuditReport> {
        if !self.hooks_dir.exists() {
            bail!("hooks directory not found: {}", self.hooks_dir.display());
        }

        info!("Scanning hooks in {}", self.hooks_dir.display());
        let mut data = AuditData::default();

        for file in SourceScanner::new(&self.hooks_dir, &["js", "jsx"])
            .with_excludes(&["__tests__"])
            .scan()
        {
            let rel = file
                .path
                .strip_prefix(&self.hooks_dir)
                .unwrap_or(&file.path)
                .to_path_buf();
            if rel.file_stem().and_then(|s| s.to_str()) == Some("index") {
                continue;
            }

            let record = extractor::extract(&rel, &file.content);
            let key = format!("{}/{}", record.domain, record.name);
            data.hooks_inventory.insert(key, record);
        }
        info!("Inventoried {} hooks", data.hooks_inventory.len());

        self.resolve_dependencies(&mut data);
        self.scan_component_usage(&mut data);

        let domain_stats = domain_statistics(&data);
        let (high, medium, low, generic) = rank_candidates(&data);

        Ok(AuditReport {
            data,
            domain_stats,
            high_priority: high,
            medium_priority: medium,
            low_priority: low,
            already_generic: generic,
        })
    }

    fn resolve_dependencies(&self, data: &mut AuditData) {
        for (key, record) in &data.hooks_inventory {
            let mut deps: Vec<String> = record
                .imports
                .iter()
                .map(|import| import.replace("@/hooks/", "").replace("../", ""))
                .map(|import| import.trim_end_matches(".js").to_string())
                .filter(|dep| dep != key)
                .collect();
            deps.sort();
            deps.dedup();
            if !deps.is_empty() {
                data.dependencies.insert(key.clone(), deps);
            }
        }
    }

    fn scan_component_usage(&self, data: &mut AuditData) {
        if !self.components_dir.exists() {
            info!(
                "No components directory at {}, usage counts will be zero",
                self.components_dir.display()
            );
            return;
        }

        for file in SourceScanner::new(&self.components_dir, &["js", "jsx"]).scan() {
            let rel = file
                .path
                .strip_prefix(&self.components_dir)
                .unwrap_or(&file.path)
                .to_string_lossy()
                .replace('\\', "/");

            for caps in HOOK_IMPORT_RE.captures_iter(&file.content) {
                let import = caps[1].trim_end_matches(".js").to_string();
                *data.usage_stats.entry(import).or_insert(0) += 1;
            }

            for generic in GENERIC_HOOKS {
                if file.content.contains(generic) {
                    data.generic_adoption
                        .entry(generic.to_string())
                        .or_default()
                        .push(rel.clone());
                }
            }
        }
    }
}

/// Usage count for a record, keyed by its extension-less path.
fn usage_of(data: &AuditData, record: &HookRecord) -> u32 {
    let key = record.path.trim_end_matches(".js").trim_end_matches(".jsx");
    data.usage_stats.get(key).copied().unwrap_or(0)
}

fn domain_statistics(data: &AuditData) -> BTreeMap<String, DomainStats> {
    let mut stats: BTreeMap<String, DomainStats> = BTreeMap::new();
    let mut totals: BTreeMap<String, u64> = BTreeMap::new();

    for record in data.hooks_inventory.values() {
        let entry = stats.entry(record.domain.clone()).or_default();
        entry.total_hooks += 1;
        if record.uses_generic {
            entry.generic_hooks += 1;
        }
        if record.deprecated {
            entry.deprecated_hooks += 1;
        }
        if record.is_wrapper {
            entry.wrapper_hooks += 1;
        }
        for bucket in classify(&record.name) {
            *entry.patterns.entry(bucket).or_insert(0) += 1;
        }
        *totals.entry(record.domain.clone()).or_insert(0) += u64::from(record.complexity_score);
    }

    for (domain, entry) in stats.iter_mut() {
        if entry.total_hooks > 0 {
            entry.avg_complexity = totals[domain] as f64 / entry.total_hooks as f64;
        }
    }
    stats
}

type RankedCandidates = (
    Vec<(String, PatternBucket)>,
    Vec<(String, PatternBucket)>,
    Vec<(String, PatternBucket)>,
    Vec<String>,
);

/// Group hooks by bucket and rank each one by usage and complexity. A hook
/// that sits in several buckets is ranked per bucket. Every member counts
/// toward the bucket-size threshold, migrated and deprecated ones included;
/// only the unmigrated, non-deprecated members are then ranked.
fn rank_candidates(data: &AuditData) -> RankedCandidates {
    let mut buckets: BTreeMap<PatternBucket, Vec<&String>> = BTreeMap::new();
    let mut already_generic = Vec::new();

    for (key, record) in &data.hooks_inventory {
        if record.uses_generic {
            already_generic.push(key.clone());
        }
        for bucket in classify(&record.name) {
            buckets.entry(bucket).or_default().push(key);
        }
    }

    let mut high = Vec::new();
    let mut medium = Vec::new();
    let mut low = Vec::new();

    for (bucket, keys) in buckets {
        if keys.len() < MIN_BUCKET_SIZE {
            continue;
        }
        for key in keys {
            let record = &data.hooks_inventory[key];
            if record.uses_generic || record.deprecated {
                continue;
            }
            let usage = usage_of(data, record);
            let complexity = record.complexity_score;

            if usage >= 5 && complexity >= 15 {
                high.push((key.clone(), bucket));
            } else if usage >= 2 && complexity >= 10 {
                medium.push((key.clone(), bucket));
            } else {
                low.push((key.clone(), bucket));
            }
        }
    }

    (high, medium, low, already_generic)
}

impl AuditReport {
    pub fn total_hooks(&self) -> usize {
        self.data.hooks_inventory.len()
    }

    pub fn render_markdown(&self) -> String {
        let mut out = Vec::new();
        out.push("# Hook Dependency Audit".to_string());
        out.push(format!("*Generated: {}*\n", report::timestamp()));

        let dep_count: usize = self.data.dependencies.values().map(Vec::len).sum();
        out.push("## Summary".to_string());
        out.push(format!("- **Hooks analyzed**: {}", self.total_hooks()));
        out.push(format!(
            "- **Already using generics**: {}",
            self.already_generic.len()
        ));
        out.push(format!(
            "- **High-priority candidates**: {}",
            self.high_priority.len()
        ));
        out.push(format!(
            "- **Medium-priority candidates**: {}",
            self.medium_priority.len()
        ));
        out.push(format!("- **Dependencies mapped**: {}\n", dep_count));

        out.push("## Domains".to_string());
        for (domain, stats) in &self.domain_stats {
            let pct = if stats.total_hooks > 0 {
                stats.generic_hooks as f64 / stats.total_hooks as f64 * 100.0
            } else {
                0.0
            };
            out.push(format!("### {}", domain));
            out.push(format!("- **Hooks**: {}", stats.total_hooks));
            out.push(format!(
                "- **Generic adoption**: {}/{} ({:.1}%)",
                stats.generic_hooks, stats.total_hooks, pct
            ));
            out.push(format!("- **Deprecated**: {}", stats.deprecated_hooks));
            out.push(format!("- **Wrappers**: {}", stats.wrapper_hooks));
            out.push(format!(
                "- **Average complexity**: {:.1}",
                stats.avg_complexity
            ));
            if !stats.patterns.is_empty() {
                let listed: Vec<String> = stats
                    .patterns
                    .iter()
                    .map(|(bucket, count)| format!("{}: {}", bucket, count))
                    .collect();
                out.push(format!("- **Patterns**: {}", listed.join(", ")));
            }
            out.push(String::new());
        }

        out.push("## Migration candidates".to_string());
        out.push("### High priority".to_string());
        if self.high_priority.is_empty() {
            out.push("*No high-priority candidates identified*".to_string());
        }
        for (key, bucket) in &self.high_priority {
            let record = &self.data.hooks_inventory[key];
            out.push(format!("- **{}** ({})", record.name, record.domain));
            out.push(format!("  - Bucket: {} -> `{}`", bucket, bucket.generic_target()));
            out.push(format!("  - Complexity: {}", record.complexity_score));
            out.push(format!(
                "  - Used by {} components",
                usage_of(&self.data, record)
            ));
            out.push(format!("  - Lines: {}", record.line_count));
        }
        out.push(String::new());

        out.push("### Medium priority".to_string());
        if self.medium_priority.is_empty() {
            out.push("*No medium-priority candidates identified*".to_string());
        }
        for (key, bucket) in self.medium_priority.iter().take(10) {
            let record = &self.data.hooks_inventory[key];
            out.push(format!(
                "- **{}** ({}) — {} — complexity {}, usage {}",
                record.name,
                record.domain,
                bucket,
                record.complexity_score,
                usage_of(&self.data, record)
            ));
        }
        out.push(String::new());

        out.push("## Already migrated".to_string());
        if self.already_generic.is_empty() {
            out.push("*No migrated hooks found*".to_string());
        }
        for key in &self.already_generic {
            let record = &self.data.hooks_inventory[key];
            out.push(format!(
                "- **{}** ({}) — {} lines",
                record.name, record.domain, record.line_count
            ));
        }
        out.push(String::new());

        out.push("## Critical dependencies".to_string());
        let mut critical: Vec<(&String, &Vec<String>)> = self
            .data
            .dependencies
            .iter()
            .filter(|(_, deps)| deps.len() >= 3)
            .collect();
        critical.sort_by_key(|(_, deps)| std::cmp::Reverse(deps.len()));
        if critical.is_empty() {
            out.push("*No hook depends on three or more other hooks*".to_string());
        }
        for (key, deps) in critical.into_iter().take(10) {
            out.push(format!("- **{}**: {} dependencies", key, deps.len()));
            for dep in deps.iter().take(5) {
                out.push(format!("  - {}", dep));
            }
            if deps.len() > 5 {
                out.push(format!("  - ... and {} more", deps.len() - 5));
            }
        }
        out.push(String::new());

        out.push("## Recommendations".to_string());
        let total = self.total_hooks();
        let adoption = if total > 0 {
            self.already_generic.len() as f64 / total as f64 * 100.0
        } else {
            0.0
        };
        if adoption < 50.0 {
            out.push(format!(
                "- Generic adoption is {:.1}% (target: above 80%) — accelerate migration",
                adoption
            ));
        }
        if !self.high_priority.is_empty() {
            out.push(format!(
                "- {} high-priority hooks combine heavy usage with high complexity; migrate these first",
                self.high_priority.len()
            ));
        }
        out.push("- Document hook dependencies before touching anything with three or more dependents".to_string());
        out.push("- Keep regression tests in place for every migrated hook".to_string());
        out.push(String::new());

        out.push("## Feasibility".to_string());
        let to_migrate = self.high_priority.len() + self.medium_priority.len();
        let (grade, estimate) = if to_migrate <= 10 {
            ("High", "2-3 weeks")
        } else if to_migrate <= 20 {
            ("Moderate — migrate in phases", "4-6 weeks")
        } else {
            ("Complex — strict prioritization needed", "2-3 months")
        };
        out.push(format!("- **Assessment**: {}", grade));
        out.push(format!("- **Hooks to migrate**: {}", to_migrate));
        out.push(format!(
            "- **Already migrated**: {}",
            self.already_generic.len()
        ));
        out.push(format!("- **Estimated duration**: {}", estimate));

        out.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn write_hook(root: &std::path::Path, rel: &str, content: &str) {
        let path = root.join("src").join("hooks").join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn write_component(root: &std::path::Path, rel: &str, content: &str) {
        let path = root.join("src").join("components").join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn busy_hook_body() -> String {
        // enough stateful calls to clear the medium-complexity threshold
        let mut body = String::from("import { useState, useEffect } from 'react';\n");
        for _ in 0..3 {
            body.push_str("const [s, setS] = useState(null);\nuseEffect(() => { if (s) { setS(s); } }, [s]);\n");
        }
        body.push_str("export const hook = () => {};\n");
        body
    }

    #[test]
    fn test_missing_hooks_dir_aborts() {
        let dir = tempdir().unwrap();
        assert!(HookAuditor::new(dir.path()).run().is_err());
    }

    #[test]
    fn test_inventory_and_usage() {
        let dir = tempdir().unwrap();
        write_hook(
            dir.path(),
            "concerts/useConcertDetails.js",
            &busy_hook_body(),
        );
        write_hook(dir.path(), "concerts/index.js", "export * from './useConcertDetails';");
        write_component(
            dir.path(),
            "concerts/ConcertPage.js",
            "import { useConcertDetails } from '@/hooks/concerts/useConcertDetails';",
        );

        let audit = HookAuditor::new(dir.path()).run().unwrap();
        assert_eq!(audit.total_hooks(), 1); // index.js excluded
        let record = &audit.data.hooks_inventory["concerts/useConcertDetails"];
        assert_eq!(record.domain, "concerts");
        assert_eq!(usage_of(&audit.data, record), 1);
    }

    #[test]
    fn test_small_buckets_produce_no_candidates() {
        let dir = tempdir().unwrap();
        write_hook(dir.path(), "concerts/useConcertForm.js", &busy_hook_body());
        write_hook(dir.path(), "venues/useVenueForm.js", &busy_hook_body());

        let audit = HookAuditor::new(dir.path()).run().unwrap();
        assert!(audit.high_priority.is_empty());
        assert!(audit.medium_priority.is_empty());
        assert!(audit.low_priority.is_empty());
    }

    #[test]
    fn test_candidate_ranking() {
        let dir = tempdir().unwrap();
        write_hook(dir.path(), "concerts/useConcertForm.js", &busy_hook_body());
        write_hook(dir.path(), "venues/useVenueForm.js", &busy_hook_body());
        write_hook(dir.path(), "contacts/useContactForm.js", &busy_hook_body());

        // useConcertForm imported by five components -> high priority
        for i in 0..5 {
            write_component(
                dir.path(),
                &format!("concerts/Page{}.js", i),
                "import { useConcertForm } from '@/hooks/concerts/useConcertForm';",
            );
        }
        // useVenueForm imported twice -> medium priority
        for i in 0..2 {
            write_component(
                dir.path(),
                &format!("venues/Page{}.js", i),
                "import { useVenueForm } from '@/hooks/venues/useVenueForm';",
            );
        }

        let audit = HookAuditor::new(dir.path()).run().unwrap();
        assert_eq!(
            audit.high_priority,
            vec![("concerts/useConcertForm".to_string(), PatternBucket::Form)]
        );
        assert_eq!(
            audit.medium_priority,
            vec![("venues/useVenueForm".to_string(), PatternBucket::Form)]
        );
        assert_eq!(
            audit.low_priority,
            vec![("contacts/useContactForm".to_string(), PatternBucket::Form)]
        );
    }

    #[test]
    fn test_migrated_hooks_count_toward_bucket_size() {
        let dir = tempdir().unwrap();
        write_hook(dir.path(), "concerts/useConcertForm.js", &busy_hook_body());
        write_hook(dir.path(), "venues/useVenueForm.js", &busy_hook_body());
        write_hook(
            dir.path(),
            "contacts/useContactForm.js",
            "import { useGenericEntityForm } from '@/hooks/common/useGenericEntityForm';\nexport const useContactForm = () => useGenericEntityForm('contacts');\n",
        );

        // the bucket has three form hooks; the migrated one makes it eligible
        // but is not itself ranked
        let audit = HookAuditor::new(dir.path()).run().unwrap();
        assert_eq!(audit.already_generic, vec!["contacts/useContactForm"]);
        assert_eq!(audit.low_priority.len(), 2);
        assert!(!audit
            .low_priority
            .iter()
            .any(|(key, _)| key == "contacts/useContactForm"));
    }

    #[test]
    fn test_generic_hooks_are_set_aside() {
        let dir = tempdir().unwrap();
        write_hook(
            dir.path(),
            "concerts/useConcertList.js",
            "import { useGenericEntityList } from '@/hooks/common/useGenericEntityList';\nexport const useConcertList = () => useGenericEntityList('concerts');\n",
        );

        let audit = HookAuditor::new(dir.path()).run().unwrap();
        assert_eq!(audit.already_generic, vec!["concerts/useConcertList"]);
        assert!(audit.low_priority.is_empty());
    }

    #[test]
    fn test_markdown_render_mentions_core_sections() {
        let dir = tempdir().unwrap();
        write_hook(dir.path(), "concerts/useConcertForm.js", &busy_hook_body());

        let audit = HookAuditor::new(dir.path()).run().unwrap();
        let md = audit.render_markdown();
        assert!(md.starts_with("# Hook Dependency Audit"));
        assert!(md.contains("## Summary"));
        assert!(md.contains("## Domains"));
        assert!(md.contains("### concerts"));
        assert!(md.contains("## Feasibility"));
    }
}
