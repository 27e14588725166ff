//! Language Registry
//!
//! **Single source of truth** for all language detection across the engine.
//! Maps file extensions to a [`LanguageProfile`]: display metadata, the
//! ordered import-statement patterns used for extraction, and the probe
//! lists (extensions, index files) used when resolving a relative import
//! to a concrete repository file.
//!
//! Import scraping is lexical by design. The patterns are a best-effort
//! regex approximation of each language's import syntax, not an AST-level
//! parser; false positives in odd contexts (strings, comments) are an
//! accepted trade-off.

use std::collections::HashMap;

use regex::Regex;

// =============================================================================
// Profile Types
// =============================================================================

/// One import-statement pattern and the capture group holding the
/// imported path.
#[derive(Debug)]
pub struct ImportPattern {
    regex: Regex,
    capture_group: usize,
}

impl ImportPattern {
    fn new(pattern: &str, capture_group: usize) -> Self {
        Self {
            // All patterns are compile-time literals defined below.
            regex: Regex::new(pattern).expect("builtin import pattern"),
            capture_group,
        }
    }
}

/// Everything the engine knows about one language.
#[derive(Debug)]
pub struct LanguageProfile {
    /// Stable lowercase identifier (e.g. `typescript`).
    pub id: &'static str,
    /// Human-readable name.
    pub display_name: &'static str,
    /// Display color for graph consumers.
    pub color: &'static str,
    /// File extensions that map to this language (lowercase, no dot).
    pub extensions: &'static [&'static str],
    /// Ordered import patterns; extraction runs them in declared order.
    import_patterns: Vec<ImportPattern>,
    /// Suffixes (with leading dot) to append when probing a relative
    /// import against the file set.
    pub resolution_extensions: &'static [&'static str],
    /// Index file names to probe when an import points at a directory.
    pub index_file_names: &'static [&'static str],
}

impl LanguageProfile {
    /// Run every import pattern against `content` in declared order and
    /// collect the captured import strings. Duplicates are preserved;
    /// deduplication, if any, is the caller's concern.
    pub fn extract_imports(&self, content: &str) -> Vec<String> {
        let mut imports = Vec::new();
        for pattern in &self.import_patterns {
            for caps in pattern.regex.captures_iter(content) {
                if let Some(m) = caps.get(pattern.capture_group) {
                    imports.push(m.as_str().to_string());
                }
            }
        }
        imports
    }
}

// =============================================================================
// Registry
// =============================================================================

/// Immutable registry of all supported languages, constructed once and
/// queried through pure lookups. Absent mappings return `None`, never an
/// error.
#[derive(Debug)]
pub struct LanguageRegistry {
    profiles: Vec<LanguageProfile>,
    by_extension: HashMap<&'static str, usize>,
}

impl LanguageRegistry {
    pub fn new() -> Self {
        let profiles = builtin_profiles();
        let mut by_extension = HashMap::new();
        for (index, profile) in profiles.iter().enumerate() {
            for ext in profile.extensions {
                by_extension.insert(*ext, index);
            }
        }
        Self {
            profiles,
            by_extension,
        }
    }

    /// Look up a profile by file extension (case-insensitive, no dot).
    pub fn profile_for_extension(&self, extension: &str) -> Option<&LanguageProfile> {
        let ext = extension.to_ascii_lowercase();
        self.by_extension.get(ext.as_str()).map(|i| &self.profiles[*i])
    }

    /// Look up a profile from a file path, deriving the extension from
    /// the substring after the last `.` of the basename.
    pub fn profile_for_path(&self, path: &str) -> Option<&LanguageProfile> {
        crate::types::extension_of(path).and_then(|ext| self.profile_for_extension(&ext))
    }

    pub fn is_supported(&self, extension: &str) -> bool {
        self.profile_for_extension(extension).is_some()
    }

    /// All extensions with a registered profile.
    pub fn supported_extensions(&self) -> Vec<&'static str> {
        let mut extensions: Vec<_> = self.by_extension.keys().copied().collect();
        extensions.sort_unstable();
        extensions
    }

    /// Iterate all registered profiles.
    pub fn all(&self) -> impl Iterator<Item = &LanguageProfile> {
        self.profiles.iter()
    }
}

impl Default for LanguageRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Builtin Language Table
// =============================================================================

fn profile(
    id: &'static str,
    display_name: &'static str,
    color: &'static str,
    extensions: &'static [&'static str],
    patterns: &[(&str, usize)],
    resolution_extensions: &'static [&'static str],
    index_file_names: &'static [&'static str],
) -> LanguageProfile {
    LanguageProfile {
        id,
        display_name,
        color,
        extensions,
        import_patterns: patterns
            .iter()
            .map(|(p, group)| ImportPattern::new(p, *group))
            .collect(),
        resolution_extensions,
        index_file_names,
    }
}

fn builtin_profiles() -> Vec<LanguageProfile> {
    vec![
        profile(
            "javascript",
            "JavaScript",
            "#f7df1e",
            &["js", "jsx", "mjs", "cjs"],
            &[
                // ES modules: import X from 'module'
                (
                    r#"import\s+(?:(?:\{[^}]*\}|\*\s+as\s+\w+|\w+)\s+from\s+)?['"]([^'"]+)['"]"#,
                    1,
                ),
                // CommonJS: require('module')
                (r#"require\s*\(\s*['"]([^'"]+)['"]\s*\)"#, 1),
                // Dynamic: import('module')
                (r#"import\s*\(\s*['"]([^'"]+)['"]\s*\)"#, 1),
            ],
            &[".js", ".jsx", ".mjs", ".cjs", ".json"],
            &["index.js", "index.jsx", "index.mjs"],
        ),
        profile(
            "typescript",
            "TypeScript",
            "#3178c6",
            &["ts", "tsx", "mts", "cts"],
            &[
                (
                    r#"import\s+(?:(?:\{[^}]*\}|\*\s+as\s+\w+|\w+)\s+from\s+)?['"]([^'"]+)['"]"#,
                    1,
                ),
                (r#"require\s*\(\s*['"]([^'"]+)['"]\s*\)"#, 1),
                (r#"import\s*\(\s*['"]([^'"]+)['"]\s*\)"#, 1),
                // import type { X } from 'module'
                (r#"import\s+type\s+(?:\{[^}]*\}|\w+)\s+from\s+['"]([^'"]+)['"]"#, 1),
            ],
            &[".ts", ".tsx", ".mts", ".cts", ".js", ".jsx", ".json", ".d.ts"],
            &["index.ts", "index.tsx", "index.mts", "index.js"],
        ),
        profile(
            "python",
            "Python",
            "#3776ab",
            &["py", "pyw", "pyi"],
            &[
                // from X import Y
                (r"from\s+(\S+)\s+import", 1),
                // import X
                (r"(?m)^import\s+(\S+)", 1),
                // import X as Y
                (r"(?m)^import\s+(\S+)\s+as", 1),
            ],
            &[".py", ".pyi"],
            &["__init__.py"],
        ),
        profile(
            "java",
            "Java",
            "#b07219",
            &["java"],
            &[(r"import\s+(?:static\s+)?([^;]+);", 1)],
            &[".java"],
            &[],
        ),
        profile(
            "go",
            "Go",
            "#00add8",
            &["go"],
            &[
                (r#"import\s+"([^"]+)""#, 1),
                // grouped form: import ( "a" "b" )
                (r#"import\s+\([^)]*"([^"]+)""#, 1),
            ],
            &[".go"],
            &[],
        ),
        profile(
            "rust",
            "Rust",
            "#dea584",
            &["rs"],
            &[
                (r"use\s+crate::([^;]+);", 1),
                (r"use\s+super::([^;]+);", 1),
                (r"use\s+self::([^;]+);", 1),
                (r"mod\s+([^;]+);", 1),
                (r"use\s+([a-zA-Z_][a-zA-Z0-9_]*)::", 1),
            ],
            &[".rs"],
            &["mod.rs", "lib.rs"],
        ),
        profile(
            "c",
            "C",
            "#555555",
            &["c", "h"],
            &[
                (r#"#include\s+"([^"]+)""#, 1),
                (r"#include\s+<([^>]+)>", 1),
            ],
            &[".h", ".c"],
            &[],
        ),
        profile(
            "cpp",
            "C++",
            "#f34b7d",
            &["cpp", "cc", "cxx", "hpp", "hh", "hxx"],
            &[
                (r#"#include\s+"([^"]+)""#, 1),
                (r"#include\s+<([^>]+)>", 1),
            ],
            &[".hpp", ".hh", ".hxx", ".h", ".cpp", ".cc", ".cxx"],
            &[],
        ),
        profile(
            "csharp",
            "C#",
            "#178600",
            &["cs"],
            &[(r"using\s+([^;]+);", 1)],
            &[".cs"],
            &[],
        ),
        profile(
            "ruby",
            "Ruby",
            "#cc342d",
            &["rb", "rake", "gemspec"],
            &[
                (r#"require\s+['"]([^'"]+)['"]"#, 1),
                (r#"require_relative\s+['"]([^'"]+)['"]"#, 1),
                (r#"load\s+['"]([^'"]+)['"]"#, 1),
            ],
            &[".rb"],
            &[],
        ),
        profile(
            "php",
            "PHP",
            "#4f5d95",
            &["php", "phtml"],
            &[
                (r#"require\s+['"]([^'"]+)['"]"#, 1),
                (r#"require_once\s+['"]([^'"]+)['"]"#, 1),
                (r#"include\s+['"]([^'"]+)['"]"#, 1),
                (r#"include_once\s+['"]([^'"]+)['"]"#, 1),
                (r"use\s+([^;]+);", 1),
            ],
            &[".php"],
            &[],
        ),
        profile(
            "kotlin",
            "Kotlin",
            "#a97bff",
            &["kt", "kts"],
            &[(r"import\s+(\S+)", 1)],
            &[".kt", ".kts"],
            &[],
        ),
        profile(
            "swift",
            "Swift",
            "#ffac45",
            &["swift"],
            &[(
                r"import\s+(?:class|struct|enum|protocol|typealias|func|let|var)?\s*(\S+)",
                1,
            )],
            &[".swift"],
            &[],
        ),
        profile(
            "scala",
            "Scala",
            "#c22d40",
            &["scala", "sc"],
            &[(r"import\s+(\S+)", 1)],
            &[".scala"],
            &[],
        ),
        profile(
            "dart",
            "Dart",
            "#00b4ab",
            &["dart"],
            &[
                (r#"import\s+['"]([^'"]+)['"]"#, 1),
                (r#"export\s+['"]([^'"]+)['"]"#, 1),
            ],
            &[".dart"],
            &[],
        ),
        profile(
            "elixir",
            "Elixir",
            "#6e4a7e",
            &["ex", "exs"],
            &[
                (r"import\s+(\S+)", 1),
                (r"alias\s+(\S+)", 1),
                (r"require\s+(\S+)", 1),
            ],
            &[".ex", ".exs"],
            &[],
        ),
        profile(
            "haskell",
            "Haskell",
            "#5e5086",
            &["hs", "lhs"],
            &[(r"import\s+(?:qualified\s+)?([^\s(]+)", 1)],
            &[".hs", ".lhs"],
            &[],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> LanguageRegistry {
        LanguageRegistry::new()
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let reg = registry();
        assert_eq!(reg.profile_for_extension("RS").unwrap().id, "rust");
        assert_eq!(reg.profile_for_extension("Ts").unwrap().id, "typescript");
        assert!(reg.profile_for_extension("zzz").is_none());
    }

    #[test]
    fn test_profile_for_path() {
        let reg = registry();
        assert_eq!(reg.profile_for_path("src/app.PY").unwrap().id, "python");
        assert_eq!(reg.profile_for_path("a/b/main.go").unwrap().id, "go");
        assert!(reg.profile_for_path("README").is_none());
        assert!(reg.profile_for_path("LICENSE.txt").is_none());
    }

    #[test]
    fn test_javascript_import_forms() {
        let reg = registry();
        let js = reg.profile_for_extension("js").unwrap();
        let content = r#"
            import React from 'react'
            import { useState } from "./hooks"
            import * as path from 'path'
            const fs = require('fs')
            const lazy = import('./lazy')
        "#;
        let imports = js.extract_imports(content);
        assert!(imports.contains(&"react".to_string()));
        assert!(imports.contains(&"./hooks".to_string()));
        assert!(imports.contains(&"path".to_string()));
        assert!(imports.contains(&"fs".to_string()));
        assert!(imports.contains(&"./lazy".to_string()));
    }

    #[test]
    fn test_typescript_type_import() {
        let reg = registry();
        let ts = reg.profile_for_extension("ts").unwrap();
        let imports = ts.extract_imports(r#"import type { Foo } from "./types""#);
        assert!(imports.contains(&"./types".to_string()));
    }

    #[test]
    fn test_python_import_forms() {
        let reg = registry();
        let py = reg.profile_for_extension("py").unwrap();
        let content = "import os\nfrom utils.helpers import clamp\nimport numpy as np\n";
        let imports = py.extract_imports(content);
        assert!(imports.contains(&"os".to_string()));
        assert!(imports.contains(&"utils.helpers".to_string()));
        assert!(imports.contains(&"numpy".to_string()));
    }

    #[test]
    fn test_c_include_forms() {
        let reg = registry();
        let c = reg.profile_for_extension("h").unwrap();
        let imports = c.extract_imports("#include \"util.h\"\n#include <stdio.h>\n");
        assert_eq!(imports, vec!["util.h".to_string(), "stdio.h".to_string()]);
    }

    #[test]
    fn test_rust_use_and_mod_forms() {
        let reg = registry();
        let rust = reg.profile_for_extension("rs").unwrap();
        let content = "use crate::engine;\nmod parser;\nuse serde::Deserialize;\n";
        let imports = rust.extract_imports(content);
        assert!(imports.contains(&"engine".to_string()));
        assert!(imports.contains(&"parser".to_string()));
        assert!(imports.contains(&"serde".to_string()));
    }

    #[test]
    fn test_duplicates_are_preserved() {
        let reg = registry();
        let js = reg.profile_for_extension("js").unwrap();
        let imports = js.extract_imports("require('a')\nrequire('a')\n");
        assert_eq!(imports.iter().filter(|i| *i == "a").count(), 2);
    }

    #[test]
    fn test_patterns_run_in_declared_order() {
        let reg = registry();
        let rust = reg.profile_for_extension("rs").unwrap();
        // crate:: pattern is declared before the bare external pattern
        let imports = rust.extract_imports("use serde::de;\nuse crate::alpha;\n");
        assert_eq!(imports[0], "alpha");
    }

    #[test]
    fn test_supported_extensions_cover_minimum_set() {
        let reg = registry();
        for ext in ["js", "ts", "py", "java", "c", "cpp", "rs"] {
            assert!(reg.is_supported(ext), "missing profile for {}", ext);
        }
    }

    #[test]
    fn test_profile_metadata_consistency() {
        for profile in registry().all() {
            assert!(!profile.extensions.is_empty(), "no extensions for {}", profile.id);
            assert!(
                !profile.import_patterns.is_empty(),
                "no import patterns for {}",
                profile.id
            );
            assert!(!profile.color.is_empty());
        }
    }
}
