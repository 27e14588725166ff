//! Relative Import Path Resolver
//!
//! Purely textual normalization of a relative import against the
//! importing file's directory. No existence checks happen here; callers
//! probe the produced candidate against the known file set.

/// Resolve `import_path` against `base_dir`, both repository-relative.
///
/// Strips one leading `./`, pops one `base_dir` segment per leading `../`
/// (clamped at the repository root), and joins the remainder with `/`.
/// An empty `base_dir` yields the import text itself, with no leading
/// slash introduced.
pub fn resolve_relative(base_dir: &str, import_path: &str) -> String {
    let mut rest = import_path.strip_prefix("./").unwrap_or(import_path);

    let mut parts: Vec<&str> = if base_dir.is_empty() {
        Vec::new()
    } else {
        base_dir.split('/').collect()
    };

    while let Some(stripped) = rest.strip_prefix("../") {
        rest = stripped;
        // popping past the root is a no-op, not an error
        parts.pop();
    }

    if parts.is_empty() {
        rest.to_string()
    } else {
        format!("{}/{}", parts.join("/"), rest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_sibling_import() {
        assert_eq!(resolve_relative("src/utils", "./helpers"), "src/utils/helpers");
    }

    #[test]
    fn test_parent_import() {
        assert_eq!(resolve_relative("src/utils", "../core/init"), "src/core/init");
    }

    #[test]
    fn test_pop_clamps_at_root() {
        assert_eq!(resolve_relative("a", "../../x"), "x");
        assert_eq!(resolve_relative("", "../x"), "x");
    }

    #[test]
    fn test_empty_base_dir_adds_no_slash() {
        assert_eq!(resolve_relative("", "helpers"), "helpers");
        assert_eq!(resolve_relative("", "./helpers"), "helpers");
    }

    #[test]
    fn test_plain_relative_without_dot_prefix() {
        assert_eq!(resolve_relative("src", "lib/util"), "src/lib/util");
    }

    #[test]
    fn test_multiple_parent_hops() {
        assert_eq!(resolve_relative("a/b/c", "../../x/y"), "a/x/y");
    }

    proptest! {
        #[test]
        fn prop_never_leading_slash(
            base in r"([a-z]{1,4}/){0,4}[a-z]{1,4}",
            hops in 0usize..6,
            tail in r"[a-z]{1,6}(\.[a-z]{1,3})?",
        ) {
            let import = format!("{}{}", "../".repeat(hops), tail);
            let resolved = resolve_relative(&base, &import);
            prop_assert!(!resolved.starts_with('/'));
            prop_assert!(resolved.ends_with(&tail));
        }

        #[test]
        fn prop_sibling_is_join(
            base in r"([a-z]{1,4}/){0,3}[a-z]{1,4}",
            tail in r"[a-z]{1,6}",
        ) {
            let resolved = resolve_relative(&base, &format!("./{}", tail));
            prop_assert_eq!(resolved, format!("{}/{}", base, tail));
        }
    }
}
