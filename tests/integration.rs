use std::path::Path;
use std::process::{Command, Output};

fn docxref_cmd(root: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_docxref"));
    cmd.current_dir(root);
    cmd.env_remove("RUST_LOG");
    cmd
}

fn run(root: &Path, args: &[&str]) -> Output {
    docxref_cmd(root).args(args).output().unwrap()
}

fn glossary() -> tempfile::TempDir {
    let root = tempfile::tempdir().unwrap();
    std::fs::create_dir(root.path().join("xml")).unwrap();
    std::fs::write(root.path().join("xml/a.xml"), r#"<term id="alpha">Alpha</term>"#).unwrap();
    std::fs::write(root.path().join("xml/b.xml"), "See alpha for details.").unwrap();
    root
}

fn read(root: &Path, rel: &str) -> String {
    std::fs::read_to_string(root.join(rel)).unwrap()
}

#[test]
fn link_rewrites_mentions_and_skips_declaration() {
    let root = glossary();

    let out = run(root.path(), &[]);
    assert!(out.status.success(), "link failed: {}", String::from_utf8_lossy(&out.stderr));

    assert_eq!(
        read(root.path(), "xml/b.xml"),
        r#"See <link linkend="alpha">alpha</link> for details."#
    );
    assert_eq!(read(root.path(), "xml/a.xml"), r#"<term id="alpha">Alpha</term>"#);
    assert!(String::from_utf8_lossy(&out.stderr).contains("Linked 1 of 2 documents (1 identifiers)"));
}

#[test]
fn second_link_run_is_byte_identical() {
    let root = glossary();

    assert!(run(root.path(), &["link"]).status.success());
    let once = read(root.path(), "xml/b.xml");
    assert!(run(root.path(), &["link"]).status.success());
    assert_eq!(read(root.path(), "xml/b.xml"), once);
}

#[test]
fn check_reports_stale_then_passes_after_link() {
    let root = glossary();

    let before = run(root.path(), &["check"]);
    assert_eq!(before.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&before.stdout);
    assert!(stdout.contains("STALE") && stdout.contains("b.xml"), "{stdout}");
    assert!(!stdout.contains("a.xml"), "{stdout}");
    assert_eq!(read(root.path(), "xml/b.xml"), "See alpha for details.");

    assert!(run(root.path(), &["link"]).status.success());

    let after = run(root.path(), &["check"]);
    assert!(after.status.success(), "{}", String::from_utf8_lossy(&after.stdout));
}

#[test]
fn ids_json_lists_declarations() {
    let root = glossary();

    let out = run(root.path(), &["ids", "--json"]);
    assert!(out.status.success());
    let listing: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    let entries = listing.as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["value"], "alpha");
    assert!(entries[0]["declared_in"].as_str().unwrap().ends_with("a.xml"));
}

#[test]
fn config_selects_directory_and_modes() {
    let root = tempfile::tempdir().unwrap();
    std::fs::create_dir(root.path().join("reference")).unwrap();
    std::fs::write(
        root.path().join(".docxref.toml"),
        "dir = \"reference\"\nscan = \"attribute\"\nself_link = \"declaring\"\n",
    )
    .unwrap();
    std::fs::write(
        root.path().join("reference/types.xml"),
        "<t id=\"point\"/><t id=\"path\"/>\n<para> a path </para>\n",
    )
    .unwrap();
    std::fs::write(root.path().join("reference/usage.xml"), "<para> point and path </para>").unwrap();

    assert!(run(root.path(), &[]).status.success());

    assert_eq!(
        read(root.path(), "reference/usage.xml"),
        r#"<para> <link linkend="point">point</link> and <link linkend="path">path</link> </para>"#
    );
    assert_eq!(
        read(root.path(), "reference/types.xml"),
        "<t id=\"point\"/><t id=\"path\"/>\n<para> a path </para>\n"
    );
}

#[test]
fn dir_flag_overrides_default_directory() {
    let root = tempfile::tempdir().unwrap();
    std::fs::create_dir(root.path().join("docs")).unwrap();
    std::fs::write(root.path().join("docs/a.xml"), r#"<term id="beta"/>"#).unwrap();
    std::fs::write(root.path().join("docs/b.xml"), "(beta)").unwrap();

    assert!(run(root.path(), &["--dir", "docs"]).status.success());
    assert_eq!(read(root.path(), "docs/b.xml"), r#"(<link linkend="beta">beta</link>)"#);
}

#[test]
fn missing_corpus_is_not_an_error() {
    let root = tempfile::tempdir().unwrap();
    let out = run(root.path(), &[]);
    assert!(out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("Linked 0 of 0 documents"));
}

#[test]
fn malformed_config_fails_with_diagnostic() {
    let root = glossary();
    std::fs::write(root.path().join(".docxref.toml"), "scan = \"tree\"\n").unwrap();

    let out = run(root.path(), &[]);
    assert_eq!(out.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&out.stderr).contains("Invalid .docxref.toml"));
    assert_eq!(read(root.path(), "xml/b.xml"), "See alpha for details.");
}

#[test]
fn space_separated_mentions_settle_in_one_run() {
    let root = glossary();
    std::fs::write(root.path().join("xml/b.xml"), "<para>alpha alpha</para>").unwrap();

    assert!(run(root.path(), &["link"]).status.success());
    let once = read(root.path(), "xml/b.xml");
    assert_eq!(
        once,
        r#"<para><link linkend="alpha">alpha</link> <link linkend="alpha">alpha</link></para>"#
    );

    let check = run(root.path(), &["check"]);
    assert!(check.status.success(), "{}", String::from_utf8_lossy(&check.stdout));

    assert!(run(root.path(), &["link"]).status.success());
    assert_eq!(read(root.path(), "xml/b.xml"), once);
}

// `/proc/version` reads as text but rejects writes, even for root, so the
// rewrite of `c.xml` fails after `b.xml` has already been written.
#[cfg(target_os = "linux")]
#[test]
fn write_failure_aborts_and_keeps_earlier_rewrites() {
    let root = glossary();
    std::fs::write(
        root.path().join("xml/a.xml"),
        "<term id=\"alpha\">Alpha</term>\n<term id=\"version\">Version</term>\n",
    )
    .unwrap();
    std::os::unix::fs::symlink("/proc/version", root.path().join("xml/c.xml")).unwrap();

    let out = run(root.path(), &["link"]);
    assert_eq!(out.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("Write Failed") && stderr.contains("c.xml"), "{stderr}");
    assert_eq!(
        read(root.path(), "xml/b.xml"),
        r#"See <link linkend="alpha">alpha</link> for details."#
    );
}
