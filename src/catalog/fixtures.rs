//! Small hand-built smells and catalogs for unit tests.

use super::{Catalog, GeneralCategory, Smell, SmellKind, Workshop};

fn base(name: &str, kind: SmellKind) -> Smell {
    Smell {
        name: name.to_string(),
        brief: format!("{} brief", name),
        indicators: vec![format!("{} indicator", name)],
        bad_example: "def bad(): pass".to_string(),
        good_example: "def good(): pass".to_string(),
        fix_steps: vec!["Refactor it".to_string()],
        kind,
    }
}

/// A general smell outside the workshop subset.
pub fn general(name: &str, category: GeneralCategory) -> Smell {
    base(
        name,
        SmellKind::General {
            category,
            techniques: vec!["Extract Method".to_string()],
            workshop: None,
        },
    )
}

/// A general smell in the workshop subset.
pub fn workshop(name: &str, category: GeneralCategory, session: Option<u32>) -> Smell {
    base(
        name,
        SmellKind::General {
            category,
            techniques: vec!["Extract Method".to_string()],
            workshop: Some(Workshop { session }),
        },
    )
}

/// A Lambda smell with a rationale.
pub fn lambda(name: &str, category: &str) -> Smell {
    base(
        name,
        SmellKind::Lambda {
            category: category.to_string(),
            why: Some(format!("{} costs money", name)),
        },
    )
}

/// A compact catalog covering every tab.
///
/// General (declared order): Long Method*, Large Class, Switch Statements,
/// Duplicate Code*, Dead Code*, Feature Envy. Starred entries are in the
/// workshop subset, all in session 1.
pub fn sample_catalog() -> Catalog {
    Catalog::new(
        vec![
            workshop("Long Method", GeneralCategory::Bloaters, Some(1)),
            general("Large Class", GeneralCategory::Bloaters),
            general("Switch Statements", GeneralCategory::OoAbusers),
            workshop("Duplicate Code", GeneralCategory::Dispensables, Some(1)),
            workshop("Dead Code", GeneralCategory::Dispensables, Some(1)),
            general("Feature Envy", GeneralCategory::Couplers),
        ],
        vec![
            lambda("Lambda Monolith", "Bloaters"),
            lambda("Synchronous Waiting", "Performance"),
            lambda("Recursive Invocation", "Dangerous"),
        ],
        vec!["Refactor in small steps".to_string()],
    )
}
