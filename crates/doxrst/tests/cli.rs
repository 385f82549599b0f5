use std::{fs, path::Path};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const INDEX: &str = r#"<?xml version='1.0' encoding='UTF-8' standalone='no'?>
<doxygenindex version="1.9.1">
  <compound refid="namespace_lib" kind="namespace"><name>Lib</name></compound>
  <compound refid="class_lib_1_1_widget" kind="class"><name>Lib::Widget</name></compound>
</doxygenindex>
"#;

const NAMESPACE: &str = r#"<?xml version='1.0' encoding='UTF-8' standalone='no'?>
<doxygen version="1.9.1">
  <compounddef id="namespace_lib" kind="namespace" language="PHP">
    <compoundname>Lib</compoundname>
    <innerclass refid="class_lib_1_1_widget" prot="public">Lib::Widget</innerclass>
    <briefdescription><para>Widgets.</para></briefdescription>
  </compounddef>
</doxygen>
"#;

const WIDGET: &str = r#"<?xml version='1.0' encoding='UTF-8' standalone='no'?>
<doxygen version="1.9.1">
  <compounddef id="class_lib_1_1_widget" kind="class" language="PHP" prot="public">
    <compoundname>Lib::Widget</compoundname>
    <sectiondef kind="public-func">
      <memberdef kind="function" id="widget_show" prot="public" static="no">
        <definition>Lib\Widget::show</definition>
        <argsstring>($times=1)</argsstring>
        <param><type>int</type><declname>$times</declname><defval>1</defval></param>
      </memberdef>
    </sectiondef>
  </compounddef>
</doxygen>
"#;

fn xml_dir() -> TempDir {
    let dir = TempDir::new().unwrap();
    for (name, xml) in [
        ("index", INDEX),
        ("namespace_lib", NAMESPACE),
        ("class_lib_1_1_widget", WIDGET),
    ] {
        fs::write(dir.path().join(format!("{name}.xml")), xml).unwrap();
    }
    dir
}

fn doxrst(xml: &Path, out: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_doxrst"));
    cmd.env_remove("RUST_LOG")
        .env_remove("DOXRST_XML_DIR")
        .env_remove("DOXRST_OUT_DIR")
        .arg("--xml-dir")
        .arg(xml)
        .arg("--out-dir")
        .arg(out);
    cmd
}

#[test]
fn test_writes_pages() {
    let xml = xml_dir();
    let out = TempDir::new().unwrap();

    doxrst(xml.path(), out.path()).arg("Lib").assert().success();

    let root = fs::read_to_string(out.path().join("api.rst")).unwrap();
    assert!(root.starts_with("API documentation\n"));
    let widget = fs::read_to_string(out.path().join("api/widget.rst")).unwrap();
    assert!(widget.contains("  .. php:method:: show ([int times])\n"));
    assert!(widget.contains("    :param int times:\n      Default: ``1``\n"));
}

#[test]
fn test_domain_flag() {
    let xml = xml_dir();
    let out = TempDir::new().unwrap();

    doxrst(xml.path(), out.path())
        .args(["--domain", "hack", "Lib"])
        .assert()
        .success();

    let widget = fs::read_to_string(out.path().join("api/widget.rst")).unwrap();
    assert!(widget.contains(".. hack:class:: Widget\n"));
}

#[test]
fn test_progress_logging() {
    let xml = xml_dir();
    let out = TempDir::new().unwrap();

    doxrst(xml.path(), out.path())
        .arg("Lib")
        .assert()
        .success()
        .stderr(predicate::str::contains("Processing class Lib::Widget"));

    doxrst(xml.path(), out.path())
        .args(["-q", "Lib"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Processing").not());
}

#[test]
fn test_raw_output() {
    let xml = xml_dir();
    let out = TempDir::new().unwrap();

    doxrst(xml.path(), out.path())
        .args(["--raw", "Lib"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"name\": \"Lib\""));

    assert!(!out.path().join("api.rst").exists());
}

#[test]
fn test_unknown_namespace_fails() {
    let xml = xml_dir();
    let out = TempDir::new().unwrap();

    doxrst(xml.path(), out.path())
        .arg("Nope")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Nope"));
}

#[test]
fn test_missing_namespace_argument() {
    let xml = xml_dir();
    let out = TempDir::new().unwrap();

    doxrst(xml.path(), out.path()).assert().failure();
}
