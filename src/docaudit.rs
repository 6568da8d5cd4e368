// Hook documentation audit: JSDoc coverage scoring and improvement plan
use crate::report;
use crate::scanner::SourceScanner;
use anyhow::{bail, Result};
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing::info;

/// JSDoc tags a fully documented hook carries, with what each one covers.
/// Each present tag is worth ten points.
const REQUIRED_TAGS: &[(&str, &str)] = &[
    ("@description", "what the hook does"),
    ("@param", "parameters"),
    ("@returns", "return value"),
    ("@example", "usage example"),
    ("@dependencies", "hooks this one depends on"),
    ("@complexity", "complexity level"),
    ("@businessCritical", "business criticality"),
];

const WELL_DOCUMENTED: u32 = 70;
const NEEDS_IMPROVEMENT: u32 = 30;

/// Below this comment-to-code ratio a hook counts as effectively
/// undocumented no matter what its header says.
const MIN_DOC_RATIO: f64 = 0.1;

lazy_static! {
    static ref JSDOC_RE: Regex = Regex::new(r"(?s)/\*\*(.*?)\*/").unwrap();
}

#[derive(Debug)]
pub struct DocRecord {
    pub path: String,
    pub name: String,
    pub line_count: usize,
    pub jsdoc_blocks: usize,
    /// Comment lines over all non-blank lines.
    pub doc_ratio: f64,
    pub score: u32,
    pub present: Vec<&'static str>,
    pub missing: Vec<&'static str>,
    pub suggestions: Vec<String>,
}

impl DocRecord {
    pub fn is_critical(&self) -> bool {
        self.score < NEEDS_IMPROVEMENT || self.doc_ratio < MIN_DOC_RATIO
    }

    pub fn is_well_documented(&self) -> bool {
        !self.is_critical() && self.score >= WELL_DOCUMENTED
    }
}

pub struct DocAuditReport {
    pub records: BTreeMap<String, DocRecord>,
}

pub struct DocAuditor {
    hooks_dir: PathBuf,
}

impl DocAuditor {
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        Self {
            hooks_dir: project_root.into().join("src").join("hooks"),
        }
    }

    pub fn run(&self) -> Result<DocAuditReport> {
        if !self.hooks_dir.exists() {
            bail!("hooks directory not found: {}", self.hooks_dir.display());
        }

        info!("Scoring hook documentation in {}", self.hooks_dir.display());
        let mut records = BTreeMap::new();

        for file in SourceScanner::new(&self.hooks_dir, &["js", "jsx"])
            .with_excludes(&["__tests__"])
            .scan()
        {
            let rel = file.path.strip_prefix(&self.hooks_dir).unwrap_or(&file.path);
            if rel.file_stem().and_then(|s| s.to_str()) == Some("index") {
                continue;
            }

            let path = rel.to_string_lossy().replace('\\', "/");
            let record = score_documentation(&path, &file.content);
            records.insert(path, record);
        }
        info!("Scored {} hooks", records.len());

        Ok(DocAuditReport { records })
    }
}

fn score_documentation(path: &str, content: &str) -> DocRecord {
    let name = path
        .rsplit('/')
        .next()
        .unwrap_or(path)
        .trim_end_matches(".jsx")
        .trim_end_matches(".js")
        .to_string();
    let line_count = content.lines().count();

    let blocks: Vec<&str> = JSDOC_RE
        .captures_iter(content)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .collect();

    let mut present = Vec::new();
    let mut missing = Vec::new();
    let mut score = 0u32;

    // the longest block is taken as the hook's main documentation
    if let Some(main) = blocks.iter().max_by_key(|b| b.len()) {
        for (tag, _) in REQUIRED_TAGS {
            if main.contains(tag) {
                present.push(*tag);
                score += 10;
            } else {
                missing.push(*tag);
            }
        }
        let lowered = main.to_lowercase();
        if lowered.contains("workflow") {
            score += 5;
        }
        if lowered.contains("errorhandling") {
            score += 5;
        }
        if main.len() > 1000 {
            score += 10;
        }
    } else {
        missing.extend(REQUIRED_TAGS.iter().map(|(tag, _)| *tag));
    }

    let doc_ratio = documentation_ratio(content);
    let mut record = DocRecord {
        path: path.to_string(),
        name,
        line_count,
        jsdoc_blocks: blocks.len(),
        doc_ratio,
        score,
        present,
        missing,
        suggestions: Vec::new(),
    };
    record.suggestions = suggestions_for(&record);
    record
}

fn documentation_ratio(content: &str) -> f64 {
    let mut comment_lines = 0usize;
    let mut code_lines = 0usize;

    for line in content.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if trimmed.starts_with("//") || trimmed.starts_with("/*") || trimmed.starts_with('*') {
            comment_lines += 1;
        } else {
            code_lines += 1;
        }
    }

    if comment_lines + code_lines == 0 {
        0.0
    } else {
        comment_lines as f64 / (comment_lines + code_lines) as f64
    }
}

fn suggestions_for(record: &DocRecord) -> Vec<String> {
    let mut out = Vec::new();

    if record.jsdoc_blocks == 0 {
        out.push("Add a main JSDoc block above the hook".to_string());
    }
    if record
        .missing
        .iter()
        .any(|tag| matches!(*tag, "@description" | "@param" | "@returns"))
    {
        out.push("Document the basics: description, parameters, return value".to_string());
    }
    if record
        .missing
        .iter()
        .any(|tag| matches!(*tag, "@example" | "@dependencies" | "@complexity"))
    {
        out.push("Add the advanced tags: example, dependencies, complexity".to_string());
    }
    if record.line_count > 200 && !record.present.contains(&"@complexity") {
        out.push("Large hook: tag @complexity and @businessCritical".to_string());
    }
    if record.doc_ratio < MIN_DOC_RATIO {
        out.push(format!(
            "Comment ratio is {:.0}%, aim for at least 10%",
            record.doc_ratio * 100.0
        ));
    }

    out
}

impl DocAuditReport {
    pub fn well_documented(&self) -> usize {
        self.records.values().filter(|r| r.is_well_documented()).count()
    }

    pub fn critical(&self) -> usize {
        self.records.values().filter(|r| r.is_critical()).count()
    }

    pub fn needs_improvement(&self) -> usize {
        self.records.len() - self.well_documented() - self.critical()
    }

    pub fn render_markdown(&self) -> String {
        let mut out = Vec::new();
        out.push("# Hook Documentation Audit".to_string());
        out.push(format!("*Generated: {}*\n", report::timestamp()));

        let total = self.records.len();
        let well = self.well_documented();
        let critical = self.critical();
        let improvable = self.needs_improvement();
        let quality_rate = if total > 0 {
            well as f64 / total as f64 * 100.0
        } else {
            0.0
        };

        out.push("## Summary".to_string());
        out.push(format!("- **Hooks analyzed**: {}", total));
        out.push(format!("- **Well documented**: {} (score 70+)", well));
        out.push(format!("- **Needs improvement**: {} (score 30-69)", improvable));
        out.push(format!("- **Critical**: {} (score below 30 or under-commented)", critical));
        out.push(format!("- **Quality rate**: {:.1}%\n", quality_rate));

        out.push("## Hooks".to_string());
        let mut ranked: Vec<&DocRecord> = self.records.values().collect();
        ranked.sort_by_key(|r| r.score);
        for record in &ranked {
            let status = if record.is_critical() {
                "CRITICAL"
            } else if record.is_well_documented() {
                "well documented"
            } else {
                "needs improvement"
            };
            out.push(format!("### {} — {}", record.name, status));
            out.push(format!("- **Path**: `{}`", record.path));
            out.push(format!("- **Score**: {}/100", record.score.min(100)));
            out.push(format!("- **Lines**: {}", record.line_count));
            out.push(format!("- **JSDoc blocks**: {}", record.jsdoc_blocks));
            out.push(format!("- **Comment ratio**: {:.1}%", record.doc_ratio * 100.0));
            if !record.missing.is_empty() {
                out.push("- **Missing tags**:".to_string());
                for tag in &record.missing {
                    let covers = REQUIRED_TAGS
                        .iter()
                        .find(|(t, _)| t == tag)
                        .map(|(_, covers)| *covers)
                        .unwrap_or("");
                    out.push(format!("  - `{}` — {}", tag, covers));
                }
            }
            if !record.suggestions.is_empty() {
                out.push("- **Suggestions**:".to_string());
                for suggestion in &record.suggestions {
                    out.push(format!("  - {}", suggestion));
                }
            }
            out.push(String::new());
        }

        out.push("## Action plan".to_string());
        // writing a full header takes about two hours, topping one up about one
        let effort_hours = critical * 2 + improvable;
        out.push(format!(
            "- **Critical hooks**: {} x 2h = {}h",
            critical,
            critical * 2
        ));
        out.push(format!(
            "- **Hooks to top up**: {} x 1h = {}h",
            improvable, improvable
        ));
        out.push(format!(
            "- **Total estimated**: {}h ({:.1} days)\n",
            effort_hours,
            effort_hours as f64 / 8.0
        ));

        out.push("## Suggested header".to_string());
        out.push("```javascript".to_string());
        out.push("/**".to_string());
        out.push(" * @description What the hook does and when to reach for it".to_string());
        out.push(" * @param {Object} config - Hook configuration".to_string());
        out.push(" * @returns {Object} State and handlers".to_string());
        out.push(" * @example".to_string());
        out.push(" * const { data, loading } = useMyHook({ entityType: 'concerts' });".to_string());
        out.push(" * @dependencies useGenericEntityDetails".to_string());
        out.push(" * @complexity MEDIUM".to_string());
        out.push(" * @businessCritical false".to_string());
        out.push(" */".to_string());
        out.push("```".to_string());

        out.join("\n")
    }
}
