#![allow(deprecated)]
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// `<tmp>/tool` is the tool directory, `<tmp>/src` the sibling checkout.
fn tool_dir(dir: &TempDir) -> PathBuf {
    dir.path().join("tool")
}

fn wltool(dir: &TempDir) -> Command {
    let root = tool_dir(dir);
    fs::create_dir_all(&root).unwrap();
    let mut cmd = Command::cargo_bin("wltool").unwrap();
    cmd.current_dir(&root).env("WL_ROOT", &root);
    cmd
}

fn write(path: &Path, content: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn setup_templates(dir: &TempDir) {
    let t = tool_dir(dir).join("template");
    write(&t.join("NewSite-DB-01-template.txt"), "name={$webSiteName} url=$url enum={$enumName}\n");
    write(&t.join("NewSite-DB-41-template.txt"), "-- {$ticketNo} {$corsDomainValues}\n");
    write(&t.join("DomainTypeTemplate.txt"), "public class {$className}DomainType {}\n");
    write(&t.join("WebSitePageTemplate.txt"), "public class {$className}WebSitePage {}\n");
    write(&t.join("NewSite-WST.txt"), "{$webSiteName}({$webSiteValue}),\n");
}

fn setup_checkout(dir: &TempDir) {
    let src = dir.path().join("src/main");
    write(
        &src.join("java/com/nv/commons/code/WebSiteType.java"),
        "package com.nv.commons.code;\n\nimport java.util.List;\n\npublic enum WebSiteType {\n    // insert New White Label\n}\n",
    );
    write(
        &src.join("java/com/nv/commons/model/Setting.java"),
        "public class Setting {\n    // insert New White Label setting-1\n    // insert New White Label setting-2\n}\n",
    );
    write(&src.join("webapp/js/const/Const.js"), "// insert New White Label\n");
}

fn write_config(dir: &TempDir, json: &str) -> PathBuf {
    let path = tool_dir(dir).join("whiteLabel.json");
    write(&path, json);
    path
}

const REGULAR: &str = r#"{
  "ticketNo": "123",
  "webSiteName": "ABC_SITE",
  "webSiteValue": 101,
  "host": "abc.com",
  "apiWhiteLabel": false,
  "jiraSummary": "x",
  "developer": "W",
  "sqlOnly": true
}"#;

// ---------------------------------------------------------------------------
// wltool A
// ---------------------------------------------------------------------------

#[test]
fn generates_sql_for_every_environment() {
    let dir = TempDir::new().unwrap();
    setup_templates(&dir);
    let config = write_config(&dir, REGULAR);

    wltool(&dir).arg("A").arg(&config).assert().success();

    let result = tool_dir(&dir).join("result");
    assert_eq!(
        fs::read_to_string(result.join("SACRIC-123-DEV-DB-01.sql")).unwrap(),
        "name=ABCSITE url=abc.com enum=ABC_COM\n\n"
    );
    for env in ["DEV", "UAT", "SIM"] {
        assert!(result.join(format!("SACRIC-123-{env}-DB-01.sql")).exists());
        assert!(result.join(format!("SACRIC-123-{env}-DB-41.sql")).exists());
    }
    let uat = fs::read_to_string(result.join("SACRIC-123-UAT-DB-41.sql")).unwrap();
    assert!(uat.contains("('abc.com', 1, 'tberwxsjyk', 'uat9wapi', sysdate(6), sysdate(6))"));
}

#[test]
fn lowercase_mode_alias() {
    let dir = TempDir::new().unwrap();
    setup_templates(&dir);
    let config = write_config(&dir, REGULAR);
    wltool(&dir).arg("a").arg(&config).assert().success();
    assert!(tool_dir(&dir).join("result/SACRIC-123-SIM-DB-41.sql").exists());
}

#[test]
fn full_run_splices_sibling_checkout() {
    let dir = TempDir::new().unwrap();
    setup_templates(&dir);
    setup_checkout(&dir);
    let config = write_config(&dir, &REGULAR.replace(r#""sqlOnly": true"#, r#""sqlOnly": false"#));

    wltool(&dir)
        .arg("A")
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("White label ABC_SITE generated."));

    let java = dir.path().join("src/main/java/com/nv/commons");
    assert_eq!(
        fs::read_to_string(java.join("code/domain/AbcSiteDomainType.java")).unwrap(),
        "public class AbcSiteDomainType {}\n"
    );
    let wst = fs::read_to_string(java.join("code/WebSiteType.java")).unwrap();
    assert!(wst.contains("    ABCSITE(101),\n    // insert New White Label"));
    assert!(wst.contains("import com.nv.commons.website.page.AbcSiteWebSitePage;"));
    let setting = fs::read_to_string(java.join("model/Setting.java")).unwrap();
    assert!(setting.contains("ENABLE_TS_FINANCIAL_ABCSITE = true;"));
}

#[test]
fn json_report() {
    let dir = TempDir::new().unwrap();
    setup_templates(&dir);
    let config = write_config(&dir, REGULAR);
    wltool(&dir)
        .arg("--json")
        .arg("A")
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"written\""))
        .stdout(predicate::str::contains("SACRIC-123-DEV-DB-01.sql"));
}

#[test]
fn invalid_config_lists_violations_and_writes_nothing() {
    let dir = TempDir::new().unwrap();
    setup_templates(&dir);
    let config = write_config(&dir, r#"{"webSiteName":"X","webSiteValue":0}"#);

    wltool(&dir)
        .arg("A")
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("❌ ticketNo must not be blank"))
        .stderr(predicate::str::contains("❌ webSiteValue must be at least 1"))
        .stderr(predicate::str::contains("❌ host is required"));

    assert!(!tool_dir(&dir).join("result").exists());
}

#[test]
fn malformed_json_fails() {
    let dir = TempDir::new().unwrap();
    let config = write_config(&dir, "{ not json");
    wltool(&dir)
        .arg("A")
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("❌"))
        .stderr(predicate::str::contains("invalid white-label config"));
}

#[test]
fn rust_log_debug_shows_decoded_config() {
    let dir = TempDir::new().unwrap();
    setup_templates(&dir);
    setup_checkout(&dir);
    let config = write_config(&dir, REGULAR);
    wltool(&dir)
        .env("RUST_LOG", "debug")
        .arg("A")
        .arg(&config)
        .assert()
        .success()
        .stderr(predicate::str::contains("decoded white-label config"));
}

#[test]
fn default_log_level_hides_debug_lines() {
    let dir = TempDir::new().unwrap();
    setup_templates(&dir);
    setup_checkout(&dir);
    let config = write_config(&dir, REGULAR);
    wltool(&dir)
        .env_remove("RUST_LOG")
        .arg("A")
        .arg(&config)
        .assert()
        .success()
        .stderr(predicate::str::contains("decoded white-label config").not());
}

#[test]
fn missing_config_argument_fails() {
    let dir = TempDir::new().unwrap();
    wltool(&dir).arg("A").assert().failure();
}

#[test]
fn missing_or_unknown_mode_prints_usage() {
    let dir = TempDir::new().unwrap();
    wltool(&dir)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
    wltool(&dir).arg("Z").assert().failure();
}

// ---------------------------------------------------------------------------
// wltool B
// ---------------------------------------------------------------------------

#[test]
fn url_check_reports_unreachable_hosts() {
    let dir = TempDir::new().unwrap();
    write(
        &tool_dir(&dir).join("sample-urlChecker.json"),
        r#"{"isHttps": false, "domainList": ["127.0.0.1:1"]}"#,
    );
    wltool(&dir)
        .arg("B")
        .assert()
        .success()
        .stdout(predicate::str::contains("[1/1] Checking URL: http://127.0.0.1:1"))
        .stdout(predicate::str::contains("Total failed: 1 out of 1"))
        .stdout(predicate::str::contains("127.0.0.1:1 - Connection failed"));
}

#[test]
fn url_check_rejects_bad_timeouts() {
    let dir = TempDir::new().unwrap();
    let file = tool_dir(&dir).join("custom.json");
    write(&file, r#"{"domainList": ["a.com"], "connectTimeout": 10}"#);
    wltool(&dir)
        .arg("b")
        .arg("--file")
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("❌ connectTimeout must be between 15000 and 120000"));
}

#[test]
fn url_check_missing_file_fails() {
    let dir = TempDir::new().unwrap();
    wltool(&dir)
        .arg("B")
        .assert()
        .failure()
        .stderr(predicate::str::contains("sample-urlChecker.json"));
}
