// Generalization-candidate analysis over a prior audit's JSON output
use crate::classify::{classify, PatternBucket};
use crate::models::{AuditData, AuditDataError, EffortBand, HookRecord, Priority};
use crate::report;
use anyhow::Result;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Domains holding shared plumbing rather than feature hooks; never
/// proposed for generalization.
const UTILITY_DOMAINS: &[&str] = &["common", "root"];

#[derive(Debug)]
pub struct BucketEvaluation {
    pub bucket: PatternBucket,
    pub hooks: Vec<String>,
    pub avg_complexity: f64,
    pub total_lines: usize,
    pub domains: BTreeMap<String, usize>,
    pub score: u32,
    pub priority: Priority,
    pub effort_days: f64,
    pub effort: EffortBand,
    pub savings_lines: usize,
}

#[derive(Debug)]
pub struct InterestingHook {
    pub key: String,
    pub target: &'static str,
    pub migration_risk: &'static str,
    pub usage: u32,
}

pub struct CandidatePlan {
    pub data: AuditData,
    pub evaluations: Vec<BucketEvaluation>,
    pub interesting: Vec<InterestingHook>,
}

pub struct CandidateAnalyzer {
    audit_json: PathBuf,
}

impl CandidateAnalyzer {
    pub fn new(audit_json: impl Into<PathBuf>) -> Self {
        Self {
            audit_json: audit_json.into(),
        }
    }

    pub fn run(&self) -> Result<CandidatePlan> {
        let data = load_audit_data(&self.audit_json)?;
        info!(
            "Loaded audit data: {} hooks from {}",
            data.hooks_inventory.len(),
            self.audit_json.display()
        );
        Ok(analyze(data))
    }
}

/// Load the audit artifact. Missing or malformed input aborts the run;
/// there is nothing sensible to recover to.
pub fn load_audit_data(path: &Path) -> Result<AuditData, AuditDataError> {
    let content =
        fs::read_to_string(path).map_err(|_| AuditDataError::Missing(path.to_path_buf()))?;
    serde_json::from_str(&content).map_err(|e| AuditDataError::Malformed(path.to_path_buf(), e))
}

fn eligible(record: &HookRecord) -> bool {
    !record.uses_generic
        && !record.deprecated
        && !UTILITY_DOMAINS.contains(&record.domain.as_str())
        && !record.name.to_lowercase().contains("index")
}

pub fn analyze(data: AuditData) -> CandidatePlan {
    let mut buckets: BTreeMap<PatternBucket, Vec<String>> = BTreeMap::new();
    for (key, record) in &data.hooks_inventory {
        if !eligible(record) {
            continue;
        }
        for bucket in classify(&record.name) {
            buckets.entry(bucket).or_default().push(key.clone());
        }
    }

    let mut evaluations: Vec<BucketEvaluation> = buckets
        .into_iter()
        .map(|(bucket, hooks)| evaluate_bucket(&data, bucket, hooks))
        .collect();
    evaluations.sort_by(|a, b| b.score.cmp(&a.score));

    let mut interesting: Vec<InterestingHook> = data
        .hooks_inventory
        .iter()
        .filter(|(_, r)| eligible(r))
        .filter(|(_, r)| {
            r.complexity_score > 40
                || r.line_count > 100
                || classify(&r.name).iter().any(PatternBucket::preferred)
        })
        .map(|(key, record)| {
            let target = classify(&record.name)
                .first()
                .map(|b| b.generic_target())
                .unwrap_or("manual review");
            InterestingHook {
                key: key.clone(),
                target,
                migration_risk: migration_risk(record),
                usage: usage_of(&data, record),
            }
        })
        .collect();
    interesting.sort_by(|a, b| {
        let ca = data.hooks_inventory[&a.key].complexity_score;
        let cb = data.hooks_inventory[&b.key].complexity_score;
        cb.cmp(&ca)
    });

    CandidatePlan {
        data,
        evaluations,
        interesting,
    }
}

fn evaluate_bucket(data: &AuditData, bucket: PatternBucket, hooks: Vec<String>) -> BucketEvaluation {
    let records: Vec<&HookRecord> = hooks.iter().map(|k| &data.hooks_inventory[k]).collect();
    let n = records.len();

    let total_complexity: u64 = records.iter().map(|r| u64::from(r.complexity_score)).sum();
    let avg_complexity = if n > 0 {
        total_complexity as f64 / n as f64
    } else {
        0.0
    };
    let total_lines: usize = records.iter().map(|r| r.line_count).sum();

    let mut domains: BTreeMap<String, usize> = BTreeMap::new();
    for record in &records {
        *domains.entry(record.domain.clone()).or_insert(0) += 1;
    }

    // More siblings, more complexity, more domains: all push the score up,
    // each contribution capped.
    let mut score = (n as u32 * 10).min(50);
    score += avg_complexity.min(30.0).round() as u32;
    score += (domains.len() as u32 * 15).min(45);
    if bucket.preferred() {
        score += 20;
    }

    let effort_days = n as f64 * 0.5 * (avg_complexity / 50.0).min(2.0);
    let savings_lines = if n > 1 { total_lines * 7 / 10 } else { 0 };

    BucketEvaluation {
        bucket,
        hooks,
        avg_complexity,
        total_lines,
        domains,
        score,
        priority: Priority::from_score(score),
        effort_days,
        effort: EffortBand::from_days(effort_days),
        savings_lines,
    }
}

fn migration_risk(record: &HookRecord) -> &'static str {
    if record.complexity_score > 100 || record.line_count > 400 {
        "HIGH — needs dedicated analysis before touching"
    } else if record.complexity_score > 50 || record.line_count > 200 {
        "MODERATE — standard migration"
    } else {
        "LOW — simple migration"
    }
}

fn usage_of(data: &AuditData, record: &HookRecord) -> u32 {
    let key = record.path.trim_end_matches(".js").trim_end_matches(".jsx");
    data.usage_stats.get(key).copied().unwrap_or(0)
}

impl CandidatePlan {
    pub fn render_markdown(&self) -> String {
        let mut out = Vec::new();
        out.push("# Generalization Candidates".to_string());
        out.push(format!("*Generated: {}*\n", report::timestamp()));

        let eligible_count = self
            .data
            .hooks_inventory
            .values()
            .filter(|r| eligible(r))
            .count();
        out.push("## Summary".to_string());
        out.push(format!("- **Non-generic hooks analyzed**: {}", eligible_count));
        out.push(format!(
            "- **High-priority buckets**: {}",
            self.evaluations
                .iter()
                .filter(|e| e.priority == Priority::High)
                .count()
        ));
        out.push(format!(
            "- **Hooks worth individual review**: {}\n",
            self.interesting.len()
        ));

        out.push("## Buckets".to_string());
        for eval in &self.evaluations {
            out.push(format!(
                "### {} — priority {}",
                eval.bucket.keyword().to_uppercase(),
                eval.priority.label()
            ));
            out.push(format!("- **Generalization score**: {}/145", eval.score));
            out.push(format!("- **Hooks**: {}", eval.hooks.len()));
            out.push(format!("- **Average complexity**: {:.1}", eval.avg_complexity));
            out.push(format!("- **Total lines**: {}", eval.total_lines));
            out.push(format!(
                "- **Domains**: {}",
                eval.domains.keys().cloned().collect::<Vec<_>>().join(", ")
            ));
            out.push(format!(
                "- **Estimated effort**: {:.1} days ({})",
                eval.effort_days,
                eval.effort.label()
            ));
            if eval.savings_lines > 0 {
                out.push(format!(
                    "- **Potential savings**: ~{} lines (70%)",
                    eval.savings_lines
                ));
            }
            out.push(format!("- **Target**: `{}`", eval.bucket.generic_target()));

            if eval.priority >= Priority::Medium {
                out.push("- **Hooks in bucket**:".to_string());
                for key in &eval.hooks {
                    let record = &self.data.hooks_inventory[key];
                    out.push(format!(
                        "  - `{}` ({}) — {} lines, complexity {}",
                        record.name, record.domain, record.line_count, record.complexity_score
                    ));
                }
            }
            out.push(String::new());
        }

        out.push("## Hooks worth individual review".to_string());
        for hook in self.interesting.iter().take(15) {
            let record = &self.data.hooks_inventory[&hook.key];
            out.push(format!("### {} ({})", record.name, record.domain));
            out.push(format!("- **Lines**: {}", record.line_count));
            out.push(format!("- **Complexity**: {}", record.complexity_score));
            out.push(format!("- **Used by**: {} components", hook.usage));
            out.push(format!("- **Target**: `{}`", hook.target));
            out.push(format!("- **Migration risk**: {}", hook.migration_risk));
            out.push(String::new());
        }

        out.push("## Suggested plan".to_string());
        let actionable: Vec<&BucketEvaluation> = self
            .evaluations
            .iter()
            .filter(|e| e.priority >= Priority::Medium)
            .collect();
        let total_effort: f64 = actionable.iter().map(|e| e.effort_days).sum();

        for (i, eval) in actionable.iter().enumerate() {
            out.push(format!(
                "{}. Generalize the {} hooks ({} hooks, {:.1} days)",
                i + 1,
                eval.bucket.keyword().to_uppercase(),
                eval.hooks.len(),
                eval.effort_days
            ));
        }
        out.push(String::new());

        if total_effort <= 10.0 {
            out.push("### Feasibility: high".to_string());
            out.push(format!("- **Total effort**: {:.1} days", total_effort));
            out.push("- **Approach**: single migration phase".to_string());
            out.push("- **Duration**: 2-3 weeks".to_string());
        } else if total_effort <= 20.0 {
            out.push("### Feasibility: moderate".to_string());
            out.push(format!("- **Total effort**: {:.1} days", total_effort));
            out.push("- **Approach**: two phases, high-priority buckets first".to_string());
            out.push("- **Duration**: 4-6 weeks".to_string());
        } else {
            out.push("### Feasibility: complex".to_string());
            out.push(format!("- **Total effort**: {:.1} days", total_effort));
            out.push("- **Approach**: staged migration with strict prioritization".to_string());
            out.push("- **Duration**: 2-3 months".to_string());
        }
        out.push(String::new());

        out.push("## Mitigations".to_string());
        out.push("1. Regression tests for every migrated hook".to_string());
        out.push("2. Migrate progressively; keep the old hook until its callers are switched".to_string());
        out.push("3. Document API changes as they land".to_string());

        out.join("\n")
    }
}
