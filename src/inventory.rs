// Migration-inventory checklist parsing (`- [ ]` / `- [x]` lines)
use anyhow::{Context, Result};
use colored::Colorize;
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

lazy_static! {
    static ref CHECKLIST_RE: Regex = Regex::new(r"(?m)^\s*-\s*\[([ xX])\]\s*(.+)$").unwrap();
    static ref HEADING_RE: Regex = Regex::new(r"(?m)^#{1,6}\s+(.+)$").unwrap();
    static ref BACKTICK_PATH_RE: Regex = Regex::new(r"`([^`]+)`").unwrap();
}

#[derive(Debug, Clone)]
pub struct ChecklistItem {
    pub done: bool,
    pub text: String,
    /// Backticked path inside the item text, when present.
    pub path: Option<String>,
    pub section: String,
}

#[derive(Debug, Default)]
pub struct ProgressSummary {
    pub total: usize,
    pub done: usize,
    pub by_section: BTreeMap<String, (usize, usize)>,
}

impl ProgressSummary {
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.done as f64 / self.total as f64 * 100.0
        }
    }
}

/// Parse every checklist line, tagging each with the nearest heading above.
pub fn parse_inventory(content: &str) -> Vec<ChecklistItem> {
    // heading start offset -> title
    let headings: Vec<(usize, String)> = HEADING_RE
        .captures_iter(content)
        .map(|caps| {
            let m = caps.get(0).unwrap();
            (m.start(), caps[1].trim().to_string())
        })
        .collect();

    CHECKLIST_RE
        .captures_iter(content)
        .map(|caps| {
            let start = caps.get(0).unwrap().start();
            let section = headings
                .iter()
                .rev()
                .find(|(offset, _)| *offset < start)
                .map(|(_, title)| title.clone())
                .unwrap_or_else(|| "(top)".to_string());

            let text = caps[2].trim().to_string();
            ChecklistItem {
                done: !caps[1].trim().is_empty(),
                path: BACKTICK_PATH_RE
                    .captures(&text)
                    .map(|p| p[1].to_string()),
                text,
                section,
            }
        })
        .collect()
}

pub fn summarize(items: &[ChecklistItem]) -> ProgressSummary {
    let mut summary = ProgressSummary::default();
    for item in items {
        summary.total += 1;
        let entry = summary.by_section.entry(item.section.clone()).or_insert((0, 0));
        entry.1 += 1;
        if item.done {
            summary.done += 1;
            entry.0 += 1;
        }
    }
    summary
}

/// Read an inventory document and print its completion state. A missing
/// file aborts the run.
pub fn report_progress(path: &Path) -> Result<ProgressSummary> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("cannot read inventory: {}", path.display()))?;

    let items = parse_inventory(&content);
    let summary = summarize(&items);

    println!("{}", "Migration progress".bold());
    println!(
        "  {}/{} items done ({:.1}%)",
        summary.done,
        summary.total,
        summary.percent()
    );
    for (section, (done, total)) in &summary.by_section {
        let line = format!("  {:>3}/{:<3} {}", done, total, section);
        if done == total {
            println!("{}", line.green());
        } else {
            println!("{}", line);
        }
    }

    let remaining: Vec<&ChecklistItem> = items.iter().filter(|i| !i.done).collect();
    if !remaining.is_empty() {
        println!("\n{}", "Next up".bold());
        for item in remaining.iter().take(10) {
            match &item.path {
                Some(p) => println!("  - {} ({})", p, item.section),
                None => println!("  - {} ({})", item.text, item.section),
            }
        }
    }

    Ok(summary)
}
