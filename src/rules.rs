// Ordered rewrite rules for CSS maintenance passes.
//
// Every pass is a single deterministic sweep over one ordered rule list.
// A rule may carry an idempotence guard: when the guard matches the
// matched text, the text is already in its target form and is left alone.
// Re-running any pass over its own output is a no-op.
use regex::{Captures, Regex};

/// Legacy variable names (suffix after the namespace prefix) and their
/// standardized replacements. Entries that share a prefix are ordered
/// longest-first so `color-text-muted` is renamed before the bare
/// `color-text` rule can touch it.
const LEGACY_VARIABLE_MAP: &[(&str, &str)] = &[
    // main palette
    ("color-white", "white"),
    ("color-black", "black"),
    ("color-primary", "primary-color"),
    ("color-secondary", "secondary-color"),
    ("color-success", "success-color"),
    ("color-danger", "danger-color"),
    ("color-warning", "warning-color"),
    ("color-info", "info-color"),
    ("color-light", "light-color"),
    ("color-dark", "dark-color"),
    // gray scale
    ("color-gray-50", "gray-50"),
    ("color-gray-100", "gray-100"),
    ("color-gray-200", "gray-200"),
    ("color-gray-300", "gray-300"),
    ("color-gray-400", "gray-400"),
    ("color-gray-500", "gray-500"),
    ("color-gray-600", "gray-600"),
    ("color-gray-700", "gray-700"),
    ("color-gray-800", "gray-800"),
    ("color-gray-900", "gray-900"),
    // text
    ("color-text-primary", "text-color"),
    ("color-text-secondary", "text-color-secondary"),
    ("color-text-muted", "text-muted"),
    ("color-text-dark", "text-color"),
    ("color-text", "text-color"),
    ("color-title", "text-color"),
    // borders
    ("color-border-light", "border-color"),
    ("color-border-medium", "border-color"),
    ("color-border", "border-color"),
    // backgrounds
    ("color-background-secondary", "gray-50"),
    ("color-background", "white"),
    ("color-surface", "white"),
    // error aliases
    ("color-error-light", "danger-light"),
    ("color-error", "danger-color"),
    // hex-named variables left behind by a mechanical extraction
    ("color-2c3e50", "gray-800"),
    ("color-34495e", "gray-700"),
    ("color-eee", "gray-200"),
    ("color-3498db", "primary-color"),
    ("color-2980b9", "primary-dark"),
    ("color-e9e9e9", "gray-200"),
    ("color-333", "gray-800"),
    ("color-d4d4d4", "gray-300"),
    ("color-f39c12", "warning-color"),
    ("color-e67e22", "warning-dark"),
    ("color-e74c3c", "danger-color"),
    ("color-c0392b", "danger-dark"),
    ("color-2ecc71", "success-color"),
    ("color-f0f7fb", "info-light"),
    ("color-ffe9e0", "warning-light"),
    ("color-6c757d", "gray-600"),
    ("color-f5f5f5", "gray-100"),
    ("color-ccc", "gray-300"),
    ("color-fff", "white"),
    ("color-000", "black"),
    ("color-17a2b8", "info-color"),
    ("color-dc3545", "danger-color"),
    ("color-dee2e6", "gray-200"),
    ("color-06c", "primary-color"),
    ("color-555", "gray-600"),
    ("color-666", "gray-600"),
    ("color-ddd", "gray-300"),
    ("color-f0f0f0", "gray-100"),
    ("color-f8f9fa", "gray-50"),
    ("color-e9ecef", "gray-200"),
    ("color-344767", "gray-700"),
    ("color-495057", "gray-600"),
    ("color-198754", "success-color"),
    ("color-ffc107", "warning-color"),
    ("color-0d6efd", "primary-color"),
    ("color-e0e0e0", "gray-200"),
    ("color-fafafa", "gray-50"),
    ("color-ced4da", "gray-300"),
    ("color-86b7fe", "primary-light"),
    ("color-28a745", "success-color"),
    ("color-f8d7da", "danger-light"),
    ("color-721c24", "danger-dark"),
    // misnamed dimension variables (picker, preview, input)
    ("color-picker-width", "input-width"),
    ("color-picker-height", "input-height"),
    ("color-picker-padding", "spacing-sm"),
    ("color-preview-width", "preview-width"),
    ("color-preview-height", "preview-height"),
    ("color-input-width", "input-width"),
    // gradient and accent hex names
    ("color-f0f7ff", "primary-lightest"),
    ("color-e0f2fe", "info-lightest"),
    ("color-2563eb", "primary-color"),
    ("color-bfdbfe", "primary-light"),
    ("color-dbeafe", "primary-lighter"),
    ("color-bae6fd", "info-light"),
    ("color-93c5fd", "primary-light"),
    ("color-1d4ed8", "primary-dark"),
    ("color-e5e7eb", "gray-200"),
    ("color-f8fafc", "gray-50"),
    ("color-f1f5f9", "gray-100"),
    ("color-e2e8f0", "gray-200"),
    ("color-94a3b8", "gray-400"),
    ("color-cbd5e1", "gray-300"),
    ("color-64748b", "gray-500"),
    ("color-f0f9ff", "info-lightest"),
    ("color-e0f7fa", "info-lightest"),
    ("color-374151", "gray-700"),
    ("color-6366f1", "primary-color"),
    ("color-10b981", "success-color"),
    ("color-059669", "success-dark"),
    ("color-ff9800", "warning-color"),
    ("color-2196f3", "info-color"),
    ("color-666666", "gray-600"),
    ("color-f9f9f9", "gray-50"),
];

/// Hardcoded declaration values and the token each one becomes. The
/// original value is kept as the `var()` fallback.
const VALUE_TOKEN_MAP: &[(&str, &str)] = &[
    ("#ffffff", "color-white"),
    ("#fff", "color-white"),
    ("#000000", "color-black"),
    ("#000", "color-black"),
    ("#eeeeee", "color-border"),
    ("#eee", "color-border"),
    ("#e9ecef", "color-border-light"),
    ("#dee2e6", "color-border-light"),
    ("#333", "color-text-dark"),
    ("#666", "color-text-muted"),
    ("#f8f9fa", "color-bg-subtle"),
    ("#f5f5f5", "color-bg-light"),
];

/// Responsive breakpoint widths and their token names.
const BREAKPOINT_MAP: &[(&str, &str)] = &[
    ("576px", "breakpoint-xs"),
    ("768px", "breakpoint-sm"),
    ("992px", "breakpoint-md"),
    ("1200px", "breakpoint-lg"),
    ("1400px", "breakpoint-xl"),
];

pub struct RewriteRule {
    pub name: String,
    pattern: Regex,
    replacement: String,
    guard: Option<Regex>,
}

impl RewriteRule {
    pub fn new(name: impl Into<String>, pattern: &str, replacement: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pattern: Regex::new(pattern).unwrap(),
            replacement: replacement.into(),
            guard: None,
        }
    }

    /// Skip any match the guard recognizes as already rewritten.
    pub fn with_guard(mut self, guard: &str) -> Self {
        self.guard = Some(Regex::new(guard).unwrap());
        self
    }

    /// Apply the rule once over the whole input, returning the rewritten
    /// text and the number of replacements made.
    pub fn apply(&self, input: &str) -> (String, usize) {
        let mut count = 0usize;
        let out = self.pattern.replace_all(input, |caps: &Captures| {
            let whole = &caps[0];
            if let Some(guard) = &self.guard {
                if guard.is_match(whole) {
                    return whole.to_string();
                }
            }
            count += 1;
            let mut expanded = String::new();
            caps.expand(&self.replacement, &mut expanded);
            expanded
        });
        (out.into_owned(), count)
    }
}

pub struct RewriteOutcome {
    pub content: String,
    /// (rule name, replacement count) for every rule that fired.
    pub changes: Vec<(String, usize)>,
}

impl RewriteOutcome {
    pub fn changed(&self) -> bool {
        !self.changes.is_empty()
    }

    pub fn total(&self) -> usize {
        self.changes.iter().map(|(_, n)| n).sum()
    }
}

pub struct RuleSet {
    pub name: &'static str,
    rules: Vec<RewriteRule>,
}

impl RuleSet {
    pub fn new(name: &'static str, rules: Vec<RewriteRule>) -> Self {
        Self { name, rules }
    }

    pub fn apply(&self, input: &str) -> RewriteOutcome {
        let mut content = input.to_string();
        let mut changes = Vec::new();

        for rule in &self.rules {
            let (next, count) = rule.apply(&content);
            if count > 0 {
                changes.push((rule.name.clone(), count));
            }
            content = next;
        }

        RewriteOutcome { content, changes }
    }
}

/// Variable prefixing pass: collapse doubled prefixes, namespace any
/// unprefixed custom property, repair malformed `var()` syntax left behind
/// by earlier migrations, then apply the legacy rename table.
pub fn prefix_rules(prefix: &str) -> RuleSet {
    let p = regex::escape(prefix);
    let mut rules = vec![
        RewriteRule::new(
            "collapse-double-prefix",
            &format!(r"--{p}-(?:{p}-)+"),
            format!("--{prefix}-"),
        ),
        RewriteRule::new(
            "namespace-prefix",
            r"--([a-zA-Z][a-zA-Z0-9-]*)",
            format!("--{prefix}-${{1}}"),
        )
        .with_guard(&format!(r"^--{p}-")),
    ];

    // Malformed var() syntax left behind by earlier migrations; these run
    // before the rename table so the broken forms are still recognizable.
    rules.push(RewriteRule::new(
        "repair-black-parens",
        &format!(r"var\(--{p}-color-000000\)000\)"),
        format!("var(--{prefix}-black)"),
    ));
    rules.push(RewriteRule::new(
        "repair-rgba-wrapped",
        &format!(r"var\(--{p}-color-rgba\(0\), rgba\(([^)]+)\)\)"),
        "rgba(${1})",
    ));
    rules.push(RewriteRule::new(
        "repair-rgba-fallback",
        &format!(r"var\(--{p}-color-rgba\([^)]+\), ([^)]+)\)"),
        "${1}",
    ));
    rules.push(RewriteRule::new(
        "repair-danger-light-parens",
        &format!(r"var\(--{p}-color-error-light\)\)"),
        format!("var(--{prefix}-danger-light)"),
    ));
    rules.push(RewriteRule::new(
        "repair-shadow-parens",
        &format!(r"var\(--{p}-box-shadow(-lg|-sm)?\)\)"),
        format!("var(--{prefix}-shadow${{1}})"),
    ));

    for (old, new) in LEGACY_VARIABLE_MAP {
        rules.push(RewriteRule::new(
            format!("map-{old}"),
            &format!(r"--{p}-{}\b", regex::escape(old)),
            format!("--{prefix}-{new}"),
        ));
    }

    RuleSet::new("prefix-vars", rules)
}

/// Hardcoded-value substitution pass: each known literal becomes a token
/// reference with the literal kept as fallback.
pub fn value_rules(prefix: &str) -> RuleSet {
    let rules = VALUE_TOKEN_MAP
        .iter()
        .map(|(value, token)| {
            let v = regex::escape(value);
            RewriteRule::new(
                format!("tokenize-{value}"),
                &format!(r"(?i)(?:var\(--[a-z0-9-]+,\s*)?{v}\b"),
                format!("var(--{prefix}-{token}, {value})"),
            )
            .with_guard(r"(?i)^var\(")
        })
        .collect();

    RuleSet::new("fix-values", rules)
}

/// Breakpoint standardization pass for media-query width conditions.
pub fn breakpoint_rules(prefix: &str) -> RuleSet {
    let rules = BREAKPOINT_MAP
        .iter()
        .map(|(width, token)| {
            RewriteRule::new(
                format!("breakpoint-{width}"),
                &format!(r"\((min|max)-width:\s*{width}\)"),
                format!("(${{1}}-width: var(--{prefix}-{token}, {width}))"),
            )
        })
        .collect();

    RuleSet::new("breakpoints", rules)
}
