use pipcat_core::manifest::Manifest;
use pipcat_ops::ops_freeze::{filter_frozen, mask_set};

fn lines(raw: &[&str]) -> Vec<String> {
    raw.iter().map(|l| l.to_string()).collect()
}

#[test]
fn builtin_tooling_is_always_masked() {
    let masked = mask_set(None);
    for name in ["virtualenv", "setuptools", "pipenv", "pip"] {
        assert!(masked.contains(name), "missing {name}");
    }
}

#[test]
fn dev_packages_join_the_mask() {
    let manifest = Manifest::from_str(
        "[dev-packages]\npytest = \"7.0.0\"\nblack = \"*\"\n",
    )
    .unwrap();
    let masked = mask_set(Some(&manifest));

    assert!(masked.contains("pytest"));
    assert!(masked.contains("black"));
    assert!(masked.contains("pip"));
}

#[test]
fn filter_keeps_unmasked_names_without_versions() {
    let masked = mask_set(None);
    let frozen = lines(&["requests==2.28.1", "pip==23.0", "flask==2.2.0", ""]);

    let names = filter_frozen(&frozen, &masked);
    assert_eq!(names, vec!["requests", "flask"]);
}

#[test]
fn filter_drops_declared_dev_packages() {
    let manifest = Manifest::from_str("[dev-packages]\npytest = \"7.0.0\"\n").unwrap();
    let masked = mask_set(Some(&manifest));
    let frozen = lines(&["requests==2.28.1", "pytest==7.2.0"]);

    let names = filter_frozen(&frozen, &masked);
    assert_eq!(names, vec!["requests"]);
}
