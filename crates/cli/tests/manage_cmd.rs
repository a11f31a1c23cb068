use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::tempdir;

fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

fn skillpack(xdg: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("skillpack"));
    cmd.env("XDG_CONFIG_HOME", xdg);
    cmd
}

fn install_plain(tmp: &Path, target: &Path) {
    let src = tmp.join("src/notes");
    write_file(&src.join("SKILL.md"), "---\nname: notes\ndescription: Notes\n---\n");
    skillpack(tmp).arg("install").arg(&src).arg("--target").arg(target).assert().success();
}

#[test]
fn list_shows_installed_skills() {
    let tmp = tempdir().unwrap();
    let target = tmp.path().join("skills");
    install_plain(tmp.path(), &target);

    skillpack(tmp.path())
        .arg("list")
        .arg("--target")
        .arg(&target)
        .assert()
        .success()
        .stdout(predicate::str::contains("notes"))
        .stdout(predicate::str::contains("Total: 1 skills"));
}

#[test]
fn list_json_is_machine_readable() {
    let tmp = tempdir().unwrap();
    let target = tmp.path().join("skills");
    install_plain(tmp.path(), &target);

    let output = skillpack(tmp.path())
        .args(["list", "--json", "--target"])
        .arg(&target)
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let skills = json["skills"].as_array().unwrap();
    assert_eq!(skills.len(), 1);
    assert_eq!(skills[0]["name"], "notes");
    assert_eq!(skills[0]["customized"], false);
    assert_eq!(skills[0]["files"][0], "SKILL.md");
}

#[test]
fn remove_deletes_skill_and_entry() {
    let tmp = tempdir().unwrap();
    let target = tmp.path().join("skills");
    install_plain(tmp.path(), &target);

    skillpack(tmp.path())
        .args(["remove", "notes", "--target"])
        .arg(&target)
        .assert()
        .success()
        .stdout(predicate::str::contains("OK   skillpack remove"));

    assert!(!target.join("notes").exists());

    skillpack(tmp.path())
        .args(["list", "--target"])
        .arg(&target)
        .assert()
        .success()
        .stdout(predicate::str::contains("(no skills installed"));

    skillpack(tmp.path())
        .args(["remove", "notes", "--target"])
        .arg(&target)
        .assert()
        .failure()
        .stdout(predicate::str::contains("skill 'notes' is not installed"));
}
