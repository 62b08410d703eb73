//! Share-link fragments.
//!
//! A smell is addressed by its lowercased name with whitespace runs
//! replaced by hyphens (`Long Method` becomes `long-method`). Resolution
//! reverses the hyphens and matches names case-insensitively, searching the
//! general catalog before the Lambda catalog.

use crate::catalog::{CatalogStore, Smell};

/// Fragment identifier for a smell name.
pub fn slug(name: &str) -> String {
    name.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

/// Extract the smell name encoded in a fragment.
///
/// Accepts a bare fragment (`long-method`), a fragment with its `#`, or a
/// full URL; only the part after the last `#` is used when one is present.
/// Returns `None` when nothing remains.
pub fn fragment_to_name(input: &str) -> Option<String> {
    let fragment = match input.rfind('#') {
        Some(idx) => &input[idx + 1..],
        None => input,
    };
    let fragment = fragment.trim();
    if fragment.is_empty() {
        return None;
    }
    Some(fragment.replace('-', " "))
}

/// Resolve a fragment to a smell.
pub fn resolve<'a, C: CatalogStore + ?Sized>(catalog: &'a C, input: &str) -> Option<&'a Smell> {
    let name = fragment_to_name(input)?;
    catalog.find_ignore_case(&name)
}

/// Full share link for a smell.
///
/// With an empty base the bare `#fragment` is returned.
pub fn share_link(base_url: &str, name: &str) -> String {
    let base = base_url.trim_end_matches('#');
    format!("{}#{}", base, slug(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fixtures::sample_catalog;
    use crate::catalog::Catalog;

    #[test]
    fn test_slug() {
        assert_eq!(slug("Long Method"), "long-method");
        assert_eq!(slug("Overprivileged IAM Role"), "overprivileged-iam-role");
        assert_eq!(slug("  Dead \t Code "), "dead-code");
    }

    #[test]
    fn test_fragment_to_name() {
        assert_eq!(fragment_to_name("long-method").unwrap(), "long method");
        assert_eq!(fragment_to_name("#dead-code").unwrap(), "dead code");
        assert_eq!(
            fragment_to_name("https://smells.example/index.html#middle-man").unwrap(),
            "middle man"
        );
        assert!(fragment_to_name("").is_none());
        assert!(fragment_to_name("#").is_none());
        assert!(fragment_to_name("https://smells.example/#  ").is_none());
    }

    #[test]
    fn test_resolve_general() {
        let catalog = Catalog::builtin().unwrap();
        let smell = resolve(&catalog, "long-method").unwrap();
        assert_eq!(smell.name, "Long Method");
    }

    #[test]
    fn test_resolve_lambda() {
        let catalog = Catalog::builtin().unwrap();
        let smell = resolve(&catalog, "#Lambda-Calling-Lambda").unwrap();
        assert_eq!(smell.name, "Lambda Calling Lambda");
    }

    #[test]
    fn test_resolve_unknown() {
        let catalog = sample_catalog();
        assert!(resolve(&catalog, "no-such-smell").is_none());
        assert!(resolve(&catalog, "").is_none());
    }

    #[test]
    fn test_every_builtin_slug_resolves_to_itself() {
        let catalog = Catalog::builtin().unwrap();
        for smell in catalog.combined() {
            let resolved = resolve(&catalog, &smell.slug()).unwrap();
            assert_eq!(resolved.name, smell.name);
        }
    }

    #[test]
    fn test_share_link() {
        assert_eq!(share_link("", "Dead Code"), "#dead-code");
        assert_eq!(
            share_link("https://smells.example/", "Dead Code"),
            "https://smells.example/#dead-code"
        );
        assert_eq!(
            share_link("https://smells.example/#", "Dead Code"),
            "https://smells.example/#dead-code"
        );
    }
}
