//! Catalog storage and the `CatalogStore` trait.
//!
//! The built-in catalog is a TOML document compiled into the binary. It is
//! parsed once at startup and never mutated afterwards.

use serde::Deserialize;

use crate::catalog::smell::{GeneralCategory, Smell, SmellKind, Workshop};
use crate::core::Tab;
use crate::error::{Result, SmellbookError};

/// The catalog document shipped with the binary.
pub const BUILTIN_CATALOG: &str = include_str!("../../data/catalog.toml");

/// Read access to a smell catalog.
///
/// The filter engine and selection controller only see this trait, so they
/// can be exercised against small fixture catalogs.
pub trait CatalogStore {
    /// General smells grouped by category, in declared category order.
    fn general_sections(&self) -> &[CategorySection];

    /// Lambda smells in declared order.
    fn lambda_smells(&self) -> &[Smell];

    /// All general smells, categories concatenated in declared order.
    fn general_smells(&self) -> Vec<&Smell> {
        self.general_sections()
            .iter()
            .flat_map(|section| section.smells.iter())
            .collect()
    }

    /// General smells in the workshop subset, sorted by `(session, name)`.
    ///
    /// Names compare byte-wise, so uppercase sorts before lowercase.
    fn workshop_smells(&self) -> Vec<&Smell> {
        let mut smells: Vec<(Workshop, &Smell)> = self
            .general_smells()
            .into_iter()
            .filter_map(|smell| smell.workshop().map(|w| (w, smell)))
            .collect();
        smells.sort_by(|(a_ws, a), (b_ws, b)| {
            a_ws.sort_key()
                .cmp(&b_ws.sort_key())
                .then_with(|| a.name.cmp(&b.name))
        });
        smells.into_iter().map(|(_, smell)| smell).collect()
    }

    /// The ordered smells listed under a tab.
    fn all_smells(&self, tab: Tab) -> Vec<&Smell> {
        match tab {
            Tab::General => self.general_smells(),
            Tab::Lambda => self.lambda_smells().iter().collect(),
            Tab::Workshop => self.workshop_smells(),
        }
    }

    /// Exact-name lookup; the general catalog is searched before Lambda.
    fn find_by_name(&self, name: &str) -> Option<&Smell> {
        self.general_smells()
            .into_iter()
            .find(|smell| smell.name == name)
            .or_else(|| self.lambda_smells().iter().find(|smell| smell.name == name))
    }

    /// Case-insensitive lookup with the same search order as `find_by_name`.
    fn find_ignore_case(&self, name: &str) -> Option<&Smell> {
        let wanted = name.to_lowercase();
        self.general_smells()
            .into_iter()
            .find(|smell| smell.name.to_lowercase() == wanted)
            .or_else(|| {
                self.lambda_smells()
                    .iter()
                    .find(|smell| smell.name.to_lowercase() == wanted)
            })
    }

    /// Every smell, general first.
    fn combined(&self) -> Vec<&Smell> {
        let mut all = self.general_smells();
        all.extend(self.lambda_smells());
        all
    }
}

/// One general category and its smells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySection {
    pub category: GeneralCategory,
    pub smells: Vec<Smell>,
}

/// The immutable smell catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    sections: Vec<CategorySection>,
    lambda: Vec<Smell>,
    tips: Vec<String>,
}

impl Catalog {
    /// Build a catalog from general and Lambda smells.
    ///
    /// General smells are grouped by category; every category gets a
    /// section, even when empty. Smells keep their relative order within a
    /// category. Lambda-kind smells passed in `general` are ignored.
    pub fn new(general: Vec<Smell>, lambda: Vec<Smell>, tips: Vec<String>) -> Self {
        let mut sections: Vec<CategorySection> = GeneralCategory::ALL
            .into_iter()
            .map(|category| CategorySection {
                category,
                smells: Vec::new(),
            })
            .collect();

        for smell in general {
            if let Some(category) = smell.general_category() {
                if let Some(section) = sections.iter_mut().find(|s| s.category == category) {
                    section.smells.push(smell);
                }
            } else {
                tracing::warn!(name = %smell.name, "lambda smell listed as general, ignoring");
            }
        }

        Self {
            sections,
            lambda,
            tips,
        }
    }

    /// Parse the catalog compiled into the binary.
    pub fn builtin() -> Result<Self> {
        Self::from_toml_str(BUILTIN_CATALOG)
    }

    /// Parse a catalog document.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let doc: CatalogDocument =
            toml::from_str(content).map_err(|e| SmellbookError::catalog(e.to_string()))?;

        let general = doc.general.into_iter().map(Smell::from).collect();
        let lambda = doc.lambda.into_iter().map(Smell::from).collect();

        let catalog = Self::new(general, lambda, doc.tips);
        tracing::debug!(
            general = catalog.general_smells().len(),
            lambda = catalog.lambda.len(),
            "catalog loaded"
        );
        Ok(catalog)
    }

    /// Refactoring tips.
    pub fn tips(&self) -> &[String] {
        &self.tips
    }

    /// Number of smells across both catalogs.
    pub fn len(&self) -> usize {
        self.general_smells().len() + self.lambda.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl CatalogStore for Catalog {
    fn general_sections(&self) -> &[CategorySection] {
        &self.sections
    }

    fn lambda_smells(&self) -> &[Smell] {
        &self.lambda
    }
}

// =============================================================================
// Document schema
// =============================================================================

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CatalogDocument {
    #[serde(default)]
    tips: Vec<String>,
    #[serde(default)]
    general: Vec<GeneralEntry>,
    #[serde(default)]
    lambda: Vec<LambdaEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct GeneralEntry {
    name: String,
    category: GeneralCategory,
    #[serde(default)]
    workshop: bool,
    session: Option<u32>,
    brief: String,
    indicators: Vec<String>,
    bad_example: String,
    good_example: String,
    fix_steps: Vec<String>,
    #[serde(default)]
    techniques: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct LambdaEntry {
    name: String,
    #[serde(default)]
    category: String,
    brief: String,
    why: Option<String>,
    indicators: Vec<String>,
    bad_example: String,
    good_example: String,
    fix_steps: Vec<String>,
}

impl From<GeneralEntry> for Smell {
    fn from(entry: GeneralEntry) -> Self {
        let workshop = entry.workshop.then_some(Workshop {
            session: entry.session,
        });
        Smell {
            name: entry.name,
            brief: entry.brief,
            indicators: entry.indicators,
            bad_example: entry.bad_example,
            good_example: entry.good_example,
            fix_steps: entry.fix_steps,
            kind: SmellKind::General {
                category: entry.category,
                techniques: entry.techniques,
                workshop,
            },
        }
    }
}

impl From<LambdaEntry> for Smell {
    fn from(entry: LambdaEntry) -> Self {
        Smell {
            name: entry.name,
            brief: entry.brief,
            indicators: entry.indicators,
            bad_example: entry.bad_example,
            good_example: entry.good_example,
            fix_steps: entry.fix_steps,
            kind: SmellKind::Lambda {
                category: entry.category,
                why: entry.why,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fixtures::{general, lambda, sample_catalog, workshop};
    use std::collections::HashSet;

    fn names(smells: &[&Smell]) -> Vec<String> {
        smells.iter().map(|s| s.name.clone()).collect()
    }

    #[test]
    fn test_builtin_parses() {
        let catalog = Catalog::builtin().unwrap();
        assert_eq!(catalog.general_smells().len(), 15);
        assert_eq!(catalog.lambda_smells().len(), 10);
        assert_eq!(catalog.tips().len(), 10);
        assert_eq!(catalog.len(), 25);
    }

    #[test]
    fn test_builtin_names_unique() {
        let catalog = Catalog::builtin().unwrap();
        let all = catalog.combined();
        let unique: HashSet<&str> = all.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(unique.len(), all.len());
    }

    #[test]
    fn test_builtin_general_order() {
        let catalog = Catalog::builtin().unwrap();
        let general = catalog.all_smells(Tab::General);
        assert_eq!(general.first().unwrap().name, "Long Method");
        assert_eq!(general.last().unwrap().name, "Middle Man");

        let categories: Vec<GeneralCategory> = general
            .iter()
            .filter_map(|s| s.general_category())
            .collect();
        let mut sorted = categories.clone();
        sorted.sort();
        assert_eq!(categories, sorted, "categories must appear in declared order");
    }

    #[test]
    fn test_builtin_sections_shape() {
        let catalog = Catalog::builtin().unwrap();
        let counts: Vec<usize> = catalog
            .general_sections()
            .iter()
            .map(|s| s.smells.len())
            .collect();
        assert_eq!(counts, vec![5, 2, 2, 3, 3]);
    }

    #[test]
    fn test_builtin_workshop_ordering() {
        let catalog = Catalog::builtin().unwrap();
        let workshop = catalog.workshop_smells();
        assert_eq!(workshop.len(), 11);
        assert_eq!(workshop[0].name, "Data Clumps");
        for pair in workshop.windows(2) {
            let a = pair[0].workshop().unwrap().sort_key();
            let b = pair[1].workshop().unwrap().sort_key();
            assert!((a, &pair[0].name) <= (b, &pair[1].name));
        }
        let dead = workshop.iter().position(|s| s.name == "Dead Code").unwrap();
        let long = workshop.iter().position(|s| s.name == "Long Method").unwrap();
        assert!(dead < long);
    }

    #[test]
    fn test_builtin_lambda_sections() {
        let catalog = Catalog::builtin().unwrap();
        for smell in catalog.lambda_smells() {
            assert!(smell.techniques().is_none(), "{}", smell.name);
            assert!(smell.why().is_some(), "{}", smell.name);
        }
        for smell in catalog.general_smells() {
            assert!(smell.why().is_none(), "{}", smell.name);
            assert!(!smell.techniques().unwrap().is_empty(), "{}", smell.name);
        }
    }

    #[test]
    fn test_workshop_sorts_by_session_then_name() {
        let catalog = Catalog::new(
            vec![
                workshop("Long Method", GeneralCategory::Bloaters, Some(2)),
                workshop("Middle Man", GeneralCategory::Couplers, Some(1)),
                workshop("Dead Code", GeneralCategory::Dispensables, Some(2)),
                workshop("Unscheduled", GeneralCategory::Couplers, None),
                general("Large Class", GeneralCategory::Bloaters),
            ],
            vec![],
            vec![],
        );
        assert_eq!(
            names(&catalog.workshop_smells()),
            vec!["Middle Man", "Dead Code", "Long Method", "Unscheduled"]
        );
    }

    #[test]
    fn test_workshop_name_ties_compare_bytewise() {
        let catalog = Catalog::new(
            vec![
                workshop("data Clumps", GeneralCategory::Bloaters, Some(1)),
                workshop("Zombie Flag", GeneralCategory::Dispensables, Some(1)),
            ],
            vec![],
            vec![],
        );
        assert_eq!(
            names(&catalog.workshop_smells()),
            vec!["Zombie Flag", "data Clumps"]
        );
    }

    #[test]
    fn test_new_groups_by_category_keeping_order() {
        let catalog = sample_catalog();
        assert_eq!(
            names(&catalog.general_smells()),
            vec![
                "Long Method",
                "Large Class",
                "Switch Statements",
                "Duplicate Code",
                "Dead Code",
                "Feature Envy"
            ]
        );
        let change_preventers = &catalog.general_sections()[2];
        assert_eq!(change_preventers.category, GeneralCategory::ChangePreventers);
        assert!(change_preventers.smells.is_empty());
    }

    #[test]
    fn test_new_groups_interleaved_input() {
        let catalog = Catalog::new(
            vec![
                general("Feature Envy", GeneralCategory::Couplers),
                general("Long Method", GeneralCategory::Bloaters),
                general("Middle Man", GeneralCategory::Couplers),
            ],
            vec![],
            vec![],
        );
        assert_eq!(
            names(&catalog.general_smells()),
            vec!["Long Method", "Feature Envy", "Middle Man"]
        );
    }

    #[test]
    fn test_new_ignores_lambda_in_general() {
        let catalog = Catalog::new(vec![lambda("Stray", "Design")], vec![], vec![]);
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_all_smells_per_tab() {
        let catalog = sample_catalog();
        assert_eq!(catalog.all_smells(Tab::General).len(), 6);
        assert_eq!(
            names(&catalog.all_smells(Tab::Lambda)),
            vec!["Lambda Monolith", "Synchronous Waiting", "Recursive Invocation"]
        );
        assert_eq!(
            names(&catalog.all_smells(Tab::Workshop)),
            vec!["Dead Code", "Duplicate Code", "Long Method"]
        );
    }

    #[test]
    fn test_find_by_name_prefers_general() {
        let catalog = Catalog::new(
            vec![general("Twin", GeneralCategory::Bloaters)],
            vec![lambda("Twin", "Design")],
            vec![],
        );
        let found = catalog.find_by_name("Twin").unwrap();
        assert!(!found.is_lambda());
    }

    #[test]
    fn test_find_by_name_exact() {
        let catalog = sample_catalog();
        assert!(catalog.find_by_name("Dead Code").is_some());
        assert!(catalog.find_by_name("dead code").is_none());
        assert!(catalog.find_by_name("Recursive Invocation").unwrap().is_lambda());
        assert!(catalog.find_by_name("Nope").is_none());
    }

    #[test]
    fn test_find_ignore_case() {
        let catalog = sample_catalog();
        assert_eq!(
            catalog.find_ignore_case("dead CODE").unwrap().name,
            "Dead Code"
        );
        assert_eq!(
            catalog.find_ignore_case("lambda monolith").unwrap().name,
            "Lambda Monolith"
        );
    }

    #[test]
    fn test_empty_catalog() {
        let catalog = Catalog::new(vec![], vec![], vec![]);
        for tab in Tab::ALL {
            assert!(catalog.all_smells(tab).is_empty());
        }
        assert!(catalog.find_ignore_case("anything").is_none());
    }

    #[test]
    fn test_from_toml_str_minimal() {
        let doc = r#"
tips = ["Keep it small"]

[[general]]
name = "Dead Code"
category = "dispensables"
workshop = true
session = 1
brief = "Unused code"
indicators = ["Never called"]
bad_example = "x = 1"
good_example = ""
fix_steps = ["Delete it"]
techniques = ["Remove Dead Code"]

[[lambda]]
name = "Fat Deployment Package"
category = "Performance"
brief = "Big zip"
indicators = ["Slow cold start"]
bad_example = "zip -r"
good_example = "layers"
fix_steps = ["Trim dependencies"]
"#;
        let catalog = Catalog::from_toml_str(doc).unwrap();
        let dead = catalog.find_by_name("Dead Code").unwrap();
        assert_eq!(dead.workshop(), Some(Workshop { session: Some(1) }));
        let fat = catalog.find_by_name("Fat Deployment Package").unwrap();
        assert!(fat.why().is_none());
        assert_eq!(catalog.tips(), &["Keep it small".to_string()]);
    }

    #[test]
    fn test_from_toml_str_rejects_unknown_category() {
        let doc = r#"
[[general]]
name = "Spaghetti"
category = "pasta"
brief = ""
indicators = []
bad_example = ""
good_example = ""
fix_steps = []
"#;
        let err = Catalog::from_toml_str(doc).unwrap_err();
        assert!(matches!(err, SmellbookError::Catalog { .. }));
    }

    #[test]
    fn test_from_toml_str_rejects_unknown_fields() {
        let doc = r#"
[[lambda]]
name = "Lambda Monolith"
brief = ""
indicators = []
bad_example = ""
good_example = ""
fix_steps = []
techniques = ["Extract Function"]
"#;
        assert!(Catalog::from_toml_str(doc).is_err());
    }
}
