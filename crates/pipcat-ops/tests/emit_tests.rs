use pipcat_core::manifest::Manifest;
use pipcat_core::merge::{MergeLog, MergeState};
use pipcat_ops::ops_emit::{render_dist, render_pipfile};

fn merged(contents: &[&str]) -> (MergeState, MergeLog) {
    let mut state = MergeState::new();
    let mut log = MergeLog::new();
    for (i, content) in contents.iter().enumerate() {
        let manifest = Manifest::from_str(content).unwrap();
        state.fold_manifest(&format!("m{i}"), &manifest, &mut log);
    }
    (state, log)
}

#[test]
fn pipfile_starts_with_the_public_source_block() {
    let (state, _) = merged(&["[packages]\nrequests = \"2.28.1\"\n"]);
    let out = render_pipfile(&state);

    assert!(out.starts_with("[[source]]\n"), "got: {out}");
    assert!(out.contains("url = \"https://pypi.python.org/simple\""));
    assert!(out.contains("verify_ssl = true"));
    assert!(out.contains("name = \"pypi\""));
}

#[test]
fn pipfile_renders_compatible_release_constraints() {
    let (state, _) = merged(&["[packages]\nrequests = \"==2.28.1\"\nflask = \"*\"\n"]);
    let out = render_pipfile(&state);

    assert!(out.contains("requests = \"~=2.28\"\n"), "got: {out}");
    assert!(out.contains("flask = \"*\"\n"), "got: {out}");
}

#[test]
fn pipfile_renders_non_default_index_inline() {
    let (state, _) = merged(&[
        "[packages]\ninternal-lib = { version = \"1.4.0\", index = \"internal\" }\n",
    ]);
    let out = render_pipfile(&state);

    assert!(
        out.contains("internal-lib = { version = \"~=1.4\", index = \"internal\" }\n"),
        "got: {out}"
    );
}

#[test]
fn pipfile_includes_extra_sources() {
    let (state, _) = merged(&[
        "[source.internal]\nhost = \"pypi.corp.example.com\"\nport = 8443\nverify_ssl = false\n",
    ]);
    let out = render_pipfile(&state);

    assert!(
        out.contains("url = \"https://pypi.corp.example.com:8443/simple\""),
        "got: {out}"
    );
    assert!(out.contains("verify_ssl = false"), "got: {out}");
    assert!(out.contains("name = \"internal\""), "got: {out}");
}

#[test]
fn pipfile_requires_section_leads_with_python() {
    let (mut state, _) = merged(&["[requires]\nplatform_release = \"5.10\"\n"]);
    state.python = Some("3.10".to_string());
    let out = render_pipfile(&state);

    let requires_idx = out.find("[requires]").unwrap();
    let python_idx = out.find("python_version = \"3.10\"").unwrap();
    let platform_idx = out.find("platform_release = \"5.10\"").unwrap();
    assert!(requires_idx < python_idx);
    assert!(python_idx < platform_idx);
}

#[test]
fn pipfile_sections_present_even_when_empty() {
    let (state, _) = merged(&[]);
    let out = render_pipfile(&state);

    assert!(out.contains("\n[packages]\n"));
    assert!(out.contains("\n[dev-packages]\n"));
    assert!(out.contains("\n[requires]\n"));
}

#[test]
fn dist_renders_flat_requirement_lines() {
    let (mut state, _) = merged(&["[packages]\nrequests = \"2.28.1\"\nflask = \"*\"\n"]);
    state.python = Some("3.10".to_string());
    let mut log = MergeLog::new();
    let out = render_dist(&state, &mut log);

    assert!(out.contains("requests~=2.28\n"), "got: {out}");
    // Wildcard renders the bare name.
    assert!(out.contains("flask\n"), "got: {out}");
    assert!(!out.contains("python_version"), "got: {out}");
    assert!(log.is_empty());
}

#[test]
fn dist_omits_non_public_index_with_diagnostic() {
    let (state, _) = merged(&[
        "[packages]\npub-lib = \"1.0.0\"\nprivate-lib = { version = \"2.0.0\", index = \"internal\" }\n",
    ]);
    let mut log = MergeLog::new();
    let out = render_dist(&state, &mut log);

    assert!(out.contains("pub-lib~=1.0\n"), "got: {out}");
    assert!(!out.contains("private-lib"), "got: {out}");
    assert_eq!(log.skipped.len(), 1);
    assert_eq!(log.skipped[0].name, "private-lib");
    assert!(log.skipped[0].reason.contains("internal"));
}

#[test]
fn dist_excludes_dev_packages() {
    let (state, _) = merged(&[
        "[packages]\nrequests = \"2.28.1\"\n\n[dev-packages]\npytest = \"7.0.0\"\n",
    ]);
    let mut log = MergeLog::new();
    let out = render_dist(&state, &mut log);

    assert!(out.contains("requests~=2.28\n"));
    assert!(!out.contains("pytest"));
}
