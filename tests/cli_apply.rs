use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

fn cmd(profiles: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("netmotive-ip"));
    cmd.arg("--profiles").arg(profiles);
    cmd
}

const PROFILES: &str = r#"{
  "Office": {
    "ip": "192.168.1.50",
    "mask": "255.255.255.0",
    "gateway": "192.168.1.1",
    "dns": "8.8.8.8"
  },
  "DHCP": "dhcp",
  "Broken": {
    "ip": "10.0.0.5",
    "mask": "255.0.0.0"
  }
}"#;

fn write_profiles(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("profiles.json");
    fs::write(&path, PROFILES).expect("write profiles");
    path
}

#[test]
fn dry_run_dhcp_prints_two_commands() {
    let dir = tempdir().expect("tempdir");
    let path = write_profiles(dir.path());

    let output = cmd(&path)
        .args(["apply", "DHCP", "--adapter", "Ethernet 2", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "[dry-run] netsh interface ip set address \"Ethernet 2\" dhcp",
        ))
        .stdout(predicate::str::contains(
            "[dry-run] netsh interface ip set dns \"Ethernet 2\" dhcp",
        ))
        .stdout(predicate::str::contains("Applied 'DHCP'"))
        .get_output()
        .stdout
        .clone();

    let issued = String::from_utf8(output)
        .expect("utf8")
        .lines()
        .filter(|l| l.starts_with("[dry-run]"))
        .count();
    assert_eq!(issued, 2);
}

#[test]
fn dry_run_static_prints_address_then_dns() {
    let dir = tempdir().expect("tempdir");
    let path = write_profiles(dir.path());

    let output = cmd(&path)
        .args(["apply", "Office", "-a", "Wi-Fi", "--dry-run"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let stdout = String::from_utf8(output).expect("utf8");

    let address = stdout
        .find("set address \"Wi-Fi\" static 192.168.1.50 255.255.255.0 192.168.1.1 1")
        .expect("address command");
    let dns = stdout
        .find("set dns \"Wi-Fi\" static 8.8.8.8")
        .expect("dns command");
    assert!(address < dns);
}

#[test]
fn incomplete_static_issues_nothing() {
    let dir = tempdir().expect("tempdir");
    let path = write_profiles(dir.path());

    cmd(&path)
        .args(["apply", "Broken", "--adapter", "Ethernet", "--dry-run"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("[dry-run]").not())
        .stdout(predicate::str::contains("Applied").not())
        .stderr(predicate::str::contains("requires IP / Mask / Gateway / DNS"));
}

#[test]
fn unknown_profile_is_rejected() {
    let dir = tempdir().expect("tempdir");
    let path = write_profiles(dir.path());

    cmd(&path)
        .args(["apply", "Cafe", "--adapter", "Ethernet", "--dry-run"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("saved: Office, DHCP, Broken"));
}

#[test]
fn rejection_is_printed_once() {
    let dir = tempdir().expect("tempdir");
    let path = write_profiles(dir.path());

    let output = cmd(&path)
        .args(["apply", "Cafe", "--adapter", "Ethernet", "--dry-run"])
        .assert()
        .failure()
        .get_output()
        .stderr
        .clone();

    let stderr = String::from_utf8(output).expect("utf8");
    assert_eq!(stderr.matches("no profile named 'Cafe'").count(), 1);
    assert_eq!(stderr.lines().count(), 1);
}

#[test]
fn padded_name_added_then_applied() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("profiles.json");

    cmd(&path)
        .args([
            "add", " Lab ", "--ip", "10.1.0.20", "--mask", "255.255.0.0", "--gateway", "10.1.0.1",
            "--dns", "10.1.0.2",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added 'Lab'"));

    cmd(&path)
        .args(["show", " Lab "])
        .assert()
        .success()
        .stdout(predicate::str::contains("10.1.0.20"));

    cmd(&path)
        .args(["apply", " Lab ", "-a", "Ethernet", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "[dry-run] netsh interface ip set address \"Ethernet\" static 10.1.0.20 255.255.0.0 10.1.0.1 1",
        ))
        .stdout(predicate::str::contains("Applied 'Lab'"));
}

#[test]
fn hand_edited_shell_syntax_issues_nothing() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("profiles.json");
    fs::write(
        &path,
        r#"{"Lab": {"ip": "10.0.0.5", "mask": "255.0.0.0", "gateway": "10.0.0.1", "dns": "8.8.8.8&calc"}}"#,
    )
    .expect("write profiles");

    cmd(&path)
        .args(["apply", "Lab", "--adapter", "Ethernet", "--dry-run"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("[dry-run]").not())
        .stderr(predicate::str::contains("refusing to pass dns to the shell"));
}

// Without netsh every command fails; both must still be attempted and reported.
#[cfg(unix)]
#[test]
fn failed_commands_are_each_reported() {
    let dir = tempdir().expect("tempdir");
    let path = write_profiles(dir.path());

    let output = cmd(&path)
        .env("PATH", dir.path())
        .args(["apply", "DHCP", "--adapter", "Ethernet"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Applied 'DHCP'"))
        .stderr(predicate::str::contains("2 of 2 command(s) failed"))
        .get_output()
        .stderr
        .clone();

    let stderr = String::from_utf8(output).expect("utf8");
    assert_eq!(stderr.matches("failed  netsh").count(), 2);
    assert!(!stderr.contains("Configuration command failed"));
}

#[cfg(unix)]
#[test]
fn adapters_fall_back_when_enumeration_fails() {
    let dir = tempdir().expect("tempdir");

    cmd(&dir.path().join("profiles.json"))
        .env("PATH", dir.path())
        .arg("adapters")
        .assert()
        .success()
        .stdout("Ethernet\n");
}
