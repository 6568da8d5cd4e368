// Regex-based feature extraction for hook files.
//
// No AST parsing: matches inside comments or strings are accepted noise,
// the same approximation the audit has always made.
use crate::models::HookRecord;
use lazy_static::lazy_static;
use regex::Regex;
use std::path::Path;

/// The shared generic hooks; importing or calling one of these marks a
/// file as already migrated.
pub const GENERIC_HOOKS: &[&str] = &[
    "useGenericEntityDetails",
    "useGenericEntityForm",
    "useGenericEntitySearch",
    "useGenericEntityList",
    "useGenericEntityDelete",
];

lazy_static! {
    /// import ... from 'hooks/...' (with optional @/ alias)
    pub static ref HOOK_IMPORT_RE: Regex =
        Regex::new(r#"import\s+.*?from\s+['"]@?/?hooks/([^'"]+)['"]"#).unwrap();
    static ref EXPORT_DECL_RE: Regex =
        Regex::new(r"export\s+(?:default\s+)?(?:const|function)\s+(\w+)").unwrap();
    static ref EXPORT_BRACE_RE: Regex = Regex::new(r"export\s+\{\s*([^}]+)\s*\}").unwrap();
    static ref EXPORT_DEFAULT_RE: Regex = Regex::new(r"export\s+default\s+(\w+)").unwrap();
}

/// Build a HookRecord from a file's text. `rel_path` is relative to the
/// hooks root; its first directory is the domain (`root` when flat).
pub fn extract(rel_path: &Path, content: &str) -> HookRecord {
    let parts: Vec<_> = rel_path.components().collect();
    let domain = if parts.len() > 1 {
        parts[0].as_os_str().to_string_lossy().to_string()
    } else {
        "root".to_string()
    };
    let name = rel_path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();

    let uses_generic = uses_generic_hooks(content);
    let line_count = content.lines().count();

    HookRecord {
        path: rel_path.to_string_lossy().replace('\\', "/"),
        domain,
        name,
        file_size: content.len(),
        line_count,
        imports: extract_imports(content),
        exports: extract_exports(content),
        uses_generic,
        deprecated: content.contains("@deprecated") || content.contains("DEPRECATED"),
        is_wrapper: is_wrapper(content, uses_generic, line_count),
        complexity_score: complexity_score(content),
    }
}

pub fn extract_imports(content: &str) -> Vec<String> {
    HOOK_IMPORT_RE
        .captures_iter(content)
        .map(|c| c[1].to_string())
        .collect()
}

pub fn extract_exports(content: &str) -> Vec<String> {
    let mut exports = Vec::new();
    for caps in EXPORT_DECL_RE.captures_iter(content) {
        exports.push(caps[1].to_string());
    }
    for caps in EXPORT_BRACE_RE.captures_iter(content) {
        for name in caps[1].split(',') {
            let name = name.trim();
            if !name.is_empty() {
                exports.push(name.to_string());
            }
        }
    }
    for caps in EXPORT_DEFAULT_RE.captures_iter(content) {
        let name = caps[1].to_string();
        if !exports.contains(&name) {
            exports.push(name);
        }
    }
    exports
}

pub fn uses_generic_hooks(content: &str) -> bool {
    GENERIC_HOOKS.iter().any(|g| content.contains(g))
}

/// A thin wrapper: delegates to a generic hook, few returns, short file.
fn is_wrapper(content: &str, uses_generic: bool, line_count: usize) -> bool {
    uses_generic && content.matches("return").count() <= 2 && line_count < 50
}

/// Heuristic complexity: length plus weighted counts of stateful calls
/// and control flow. Comparable only within a single run.
pub fn complexity_score(content: &str) -> u32 {
    let count = |pat: &str| content.matches(pat).count() as u32;

    let mut score = (content.lines().count() / 10) as u32;
    score += count("useState") * 2;
    score += count("useEffect") * 3;
    score += count("useCallback") * 2;
    score += count("useMemo") * 2;
    score += count("if (") + count("if(");
    score += count("for (") + count("for(");
    score += count("while (") + count("while(");
    score += count("try {") * 2;
    score += count("catch") * 2;
    score
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const SAMPLE: &str = r#"
import { useState, useEffect } from 'react';
import { useGenericEntityList } from '@/hooks/common/useGenericEntityList';

/**
 * @deprecated use useGenericEntityList directly
 */
export const useConcertsList = () => {
    const [items, setItems] = useState([]);
    useEffect(() => {
        if (items.length === 0) {
            setItems([]);
        }
    }, []);
    return useGenericEntityList('concerts');
};

export default useConcertsList;
"#;

    #[test]
    fn test_extract_full_record() {
        let record = extract(&PathBuf::from("concerts/useConcertsList.js"), SAMPLE);
        assert_eq!(record.domain, "concerts");
        assert_eq!(record.name, "useConcertsList");
        assert_eq!(record.imports, vec!["common/useGenericEntityList"]);
        assert!(record.exports.contains(&"useConcertsList".to_string()));
        assert!(record.uses_generic);
        assert!(record.deprecated);
        assert!(record.is_wrapper);
    }

    #[test]
    fn test_flat_file_lands_in_root_domain() {
        let record = extract(&PathBuf::from("useMultiEntQuery.js"), "export const useMultiEntQuery = () => {};");
        assert_eq!(record.domain, "root");
        assert_eq!(record.name, "useMultiEntQuery");
    }

    #[test]
    fn test_brace_exports() {
        let exports = extract_exports("const a = 1;\nexport { useFoo, useBar };");
        assert_eq!(exports, vec!["useFoo", "useBar"]);
    }

    #[test]
    fn test_complexity_is_non_negative_and_counts_features() {
        assert_eq!(complexity_score(""), 0);

        let content = "useState()\nuseEffect()\nif (x) {}\ntry {\n} catch (e) {}\n";
        // 5 lines/10=0, useState 2, useEffect 3, if 1, try 2, catch 2
        assert_eq!(complexity_score(content), 10);
    }

    #[test]
    fn test_complexity_monotonic_in_line_count() {
        let base = "useState()\nif (x) {}\n";
        let mut padded = base.to_string();
        let mut last = complexity_score(base);
        for _ in 0..30 {
            padded.push_str("const filler = 1;\n");
            let next = complexity_score(&padded);
            assert!(next >= last, "score dropped when lines grew");
            last = next;
        }
        assert!(last > complexity_score(base));
    }
}
