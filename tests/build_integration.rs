//! Integration tests for `mdsite build`, `render` and `check`.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

fn mdsite_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_mdsite"))
}

fn mdsite() -> Command {
    let mut cmd = Command::new(mdsite_bin());
    cmd.env("NO_COLOR", "1");
    cmd
}

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn temp_out(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join("mdsite-build-test").join(name);
    // Clean up from previous runs
    let _ = fs::remove_dir_all(&dir);
    dir
}

fn build_site(out: &Path) -> std::process::ExitStatus {
    mdsite()
        .args([
            "build",
            "--config",
            fixture("site/mdsite.json").to_str().unwrap(),
            "--out",
            out.to_str().unwrap(),
            "--quiet",
        ])
        .status()
        .expect("failed to run mdsite build")
}

#[test]
fn build_produces_mirrored_file_tree() {
    let out = temp_out("tree");
    assert!(build_site(&out).success(), "mdsite build should succeed");

    assert!(out.join("index.html").exists(), "index.html should exist");
    assert!(
        out.join("blog/glorfindel/index.html").exists(),
        "blog/glorfindel/index.html should exist"
    );
    assert!(!out.join("notes.html").exists(), "non-Markdown content is skipped");
    assert!(!out.join("notes.txt").exists(), "content files are not copied");

    let _ = fs::remove_dir_all(&out);
}

#[test]
fn build_copies_static_assets() {
    let out = temp_out("static");
    assert!(build_site(&out).success());

    assert!(out.join("index.css").exists(), "index.css should be copied");
    assert!(out.join("images/tolkien.png").exists(), "nested assets should be copied");

    let _ = fs::remove_dir_all(&out);
}

#[test]
fn build_removes_stale_output() {
    let out = temp_out("stale");
    fs::create_dir_all(&out).unwrap();
    fs::write(out.join("old.html"), "stale").unwrap();

    assert!(build_site(&out).success());
    assert!(!out.join("old.html").exists(), "previous output should be cleared");

    let _ = fs::remove_dir_all(&out);
}

#[test]
fn build_fills_template_markers() {
    let out = temp_out("template");
    assert!(build_site(&out).success());

    let index = fs::read_to_string(out.join("index.html")).unwrap();
    assert!(index.contains("<title>Tolkien Fan Club</title>"));
    assert!(index.contains("<article><div><h1>Tolkien Fan Club</h1>"));
    assert!(index.contains(r#"<img src="/images/tolkien.png" alt="JRR Tolkien sitting">"#));
    assert!(!index.contains("{{ Title }}"));
    assert!(!index.contains("{{ Content }}"));

    let post = fs::read_to_string(out.join("blog/glorfindel/index.html")).unwrap();
    assert!(post.contains(
        "<title>Why Glorfindel is More Impressive than Legolas</title>"
    ));
    assert!(post.contains(
        "<blockquote>All that is gold does not glitter, not all those who wander are lost.</blockquote>"
    ));
    assert!(post.contains(
        "<ol><li>He fought a <b>Balrog</b></li><li>He came back from the dead</li></ol>"
    ));

    let _ = fs::remove_dir_all(&out);
}

#[test]
fn build_skips_failing_pages_and_exits_nonzero() {
    let out = temp_out("broken");
    let output = mdsite()
        .current_dir(fixture("broken"))
        .args(["build", "--out", out.to_str().unwrap()])
        .output()
        .expect("failed to run mdsite build");

    assert!(!output.status.success(), "build with broken pages should fail");
    assert!(out.join("good.html").exists(), "valid pages are still written");
    assert!(!out.join("bad.html").exists());
    assert!(!out.join("untitled.html").exists());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("FAILED bad.md"), "failures should name bad.md: {stderr}");
    assert!(stderr.contains("FAILED untitled.md"), "failures should name untitled.md: {stderr}");
    assert!(stderr.contains("2 of 3 pages failed"), "got: {stderr}");

    let _ = fs::remove_dir_all(&out);
}

#[test]
fn render_prints_fragment() {
    let output = mdsite()
        .args(["render", fixture("broken/content/good.md").to_str().unwrap()])
        .output()
        .expect("failed to run mdsite render");

    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim_end(),
        "<div><h1>Good page</h1><p>All fine here.</p></div>"
    );
}

#[test]
fn render_title_only() {
    let output = mdsite()
        .args(["render", "--title", fixture("site/content/index.md").to_str().unwrap()])
        .output()
        .expect("failed to run mdsite render");

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim_end(), "Tolkien Fan Club");
}

#[test]
fn check_reports_each_file() {
    let output = mdsite()
        .args([
            "check",
            fixture("broken/content/good.md").to_str().unwrap(),
            fixture("broken/content/bad.md").to_str().unwrap(),
        ])
        .output()
        .expect("failed to run mdsite check");

    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("good.md: OK"), "got: {stdout}");
    assert!(!stdout.contains("bad.md"), "errors belong on stderr: {stdout}");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("bad.md: error: Unbalanced '_' delimiter"), "got: {stderr}");
}

fn copy_tree(src: &Path, dst: &Path) {
    fs::create_dir_all(dst).unwrap();
    for entry in fs::read_dir(src).unwrap() {
        let entry = entry.unwrap();
        let target = dst.join(entry.file_name());
        if entry.file_type().unwrap().is_dir() {
            copy_tree(&entry.path(), &target);
        } else {
            fs::copy(entry.path(), &target).unwrap();
        }
    }
}

#[test]
fn build_refuses_to_wipe_site_sources() {
    let site = temp_out("into-sources");
    copy_tree(&fixture("site"), &site);

    let output = mdsite()
        .args([
            "build",
            "--config",
            site.join("mdsite.json").to_str().unwrap(),
            "--out",
            site.to_str().unwrap(),
        ])
        .output()
        .expect("failed to run mdsite build");

    assert!(!output.status.success(), "building over the sources should fail");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Refusing to build into"), "got: {stderr}");

    assert!(site.join("mdsite.json").exists());
    assert!(site.join("template.html").exists());
    assert!(site.join("content/index.md").exists());
    assert!(site.join("static/index.css").exists());

    let _ = fs::remove_dir_all(&site);
}

#[test]
fn build_into_sibling_output_dir_succeeds() {
    let site = temp_out("fresh-out");
    copy_tree(&fixture("site"), &site);

    let status = mdsite()
        .args([
            "build",
            "--config",
            site.join("mdsite.json").to_str().unwrap(),
            "--out",
            site.join("public").to_str().unwrap(),
            "--quiet",
        ])
        .status()
        .expect("failed to run mdsite build");

    assert!(status.success(), "an output dir beside the sources is fine");
    assert!(site.join("public/index.html").exists());
    assert!(site.join("content/index.md").exists());

    let _ = fs::remove_dir_all(&site);
}
