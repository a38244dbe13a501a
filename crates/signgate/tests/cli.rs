use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;
use serde_json::Value;
use tempfile::TempDir;

const UNCONFIGURED: &str = "Release signing isn't configured. Create android/key.properties and point it at your upload keystore (.jks). Then rebuild with: flutter build appbundle --release";

struct Project {
    tmp: TempDir,
}

impl Project {
    fn new() -> Self {
        let tmp = TempDir::new().expect("create temp dir");
        fs::create_dir_all(tmp.path().join("home")).expect("create isolated home");
        fs::create_dir_all(tmp.path().join("repo/android/app")).expect("create android module");
        Self { tmp }
    }

    fn root(&self) -> PathBuf {
        self.tmp
            .path()
            .canonicalize()
            .expect("canonical temp dir")
            .join("repo")
    }

    fn write(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.root().join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, content).unwrap();
        path
    }

    fn with_keystore(&self) {
        self.write("android/app/upload-keystore.jks", "keystore");
        self.write(
            "android/key.properties",
            "storePassword=store-secret\nkeyPassword=key-secret\nkeyAlias=upload\nstoreFile=upload-keystore.jks\n",
        );
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("signgate").unwrap();
        cmd.current_dir(self.root())
            .env("HOME", self.tmp.path().join("home"))
            .env_remove("SIGNGATE_DESCRIPTOR")
            .env_remove("RUST_LOG");
        cmd
    }

    fn run_json(&self, args: &[&str]) -> Value {
        let out = self
            .cmd()
            .arg("--format")
            .arg("json")
            .args(args)
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        serde_json::from_slice(&out).expect("valid json output")
    }
}

fn path_str(path: &Path) -> String {
    path.to_string_lossy().to_string()
}

#[test]
fn debug_build_without_descriptor_proceeds() {
    let project = Project::new();
    project
        .cmd()
        .args(["resolve", "assembleDebug"])
        .assert()
        .success()
        .stdout(contains("unconfigured"));
}

#[test]
fn release_build_without_descriptor_fails() {
    let project = Project::new();
    project
        .cmd()
        .args(["resolve", "clean", "bundleRelease"])
        .assert()
        .code(6)
        .stderr(contains(UNCONFIGURED));
}

#[test]
fn uppercase_release_task_fails() {
    let project = Project::new();
    project
        .cmd()
        .args(["--quiet", "resolve", "RELEASE_BUILD"])
        .assert()
        .code(6)
        .stderr(contains(UNCONFIGURED));
}

#[test]
fn release_build_with_descriptor_is_configured() {
    let project = Project::new();
    project.with_keystore();

    let json = project.run_json(&["resolve", "bundleRelease"]);
    assert_eq!(json["descriptorPresent"], true);
    assert_eq!(json["buildType"], "release");
    assert_eq!(json["resolution"]["mustFail"], false);
    assert_eq!(json["resolution"]["signing"]["status"], "configured");
    assert_eq!(json["resolution"]["signing"]["keystore"]["keyAlias"], "upload");
    assert_eq!(
        json["keystorePath"],
        path_str(&project.root().join("android/app/upload-keystore.jks"))
    );
}

#[test]
fn json_output_redacts_passwords() {
    let project = Project::new();
    project.with_keystore();

    project
        .cmd()
        .args(["--format", "json", "resolve", "bundleRelease"])
        .assert()
        .success()
        .stdout(contains("store-secret").not())
        .stdout(contains("key-secret").not());
}

#[test]
fn blank_store_file_counts_as_unconfigured() {
    let project = Project::new();
    project.write(
        "android/key.properties",
        "storePassword=a\nkeyPassword=b\nkeyAlias=upload\nstoreFile=   \n",
    );

    project
        .cmd()
        .args(["resolve", "assembleRelease"])
        .assert()
        .code(6)
        .stderr(contains(UNCONFIGURED));
}

#[test]
fn missing_key_alias_is_reported() {
    let project = Project::new();
    project.write(
        "android/key.properties",
        "storePassword=a\nkeyPassword=b\nstoreFile=upload.jks\n",
    );

    project
        .cmd()
        .args(["resolve", "assembleDebug"])
        .assert()
        .code(6)
        .stderr(contains("keyAlias"));
}

#[test]
fn malformed_descriptor_is_config_error() {
    let project = Project::new();
    project.write("android/key.properties", "storeFile=\\u12\n");

    project
        .cmd()
        .args(["resolve", "assembleDebug"])
        .assert()
        .code(2)
        .stderr(contains("line 1"));
}

#[test]
fn descriptor_location_from_config() {
    let project = Project::new();
    project.write(
        "signgate.toml",
        "[android]\nroot = \"mobile\"\ndescriptor = \"signing.properties\"\n",
    );
    project.write(
        "mobile/signing.properties",
        "storePassword=a\nkeyPassword=b\nkeyAlias=upload\nstoreFile=upload.jks\n",
    );

    let json = project.run_json(&["resolve", "bundleRelease"]);
    assert_eq!(json["resolution"]["signing"]["status"], "configured");
    assert_eq!(
        json["descriptor"],
        path_str(&project.root().join("mobile/signing.properties"))
    );
}

#[test]
fn descriptor_flag_overrides_config() {
    let project = Project::new();
    let path = project.write(
        "ci/key.properties",
        "storePassword=a\nkeyPassword=b\nkeyAlias=ci\nstoreFile=/keys/ci.jks\n",
    );

    let json = project.run_json(&["--descriptor", &path_str(&path), "resolve", "bundleRelease"]);
    assert_eq!(json["resolution"]["signing"]["keystore"]["keyAlias"], "ci");
}

#[test]
fn invalid_config_is_config_error() {
    let project = Project::new();
    project.write("signgate.toml", "[android]\nmodule = \"\"\n");

    project
        .cmd()
        .args(["resolve"])
        .assert()
        .code(2)
        .stderr(contains("android.module"));
}

#[test]
fn check_passes_with_keystore() {
    let project = Project::new();
    project.with_keystore();

    let json = project.run_json(&["check"]);
    assert_eq!(json["valid"], true);
    assert_eq!(json["errors"].as_array().unwrap().len(), 0);
}

#[test]
fn check_fails_without_descriptor() {
    let project = Project::new();
    project
        .cmd()
        .arg("check")
        .assert()
        .code(5)
        .stdout(contains("Keystore descriptor not found"));
}

#[test]
fn check_strict_promotes_warnings() {
    let project = Project::new();
    project.with_keystore();
    project.write("android/.gitignore", "local.properties\n");

    project.cmd().arg("check").assert().success();
    project.cmd().args(["check", "--strict"]).assert().code(5);
}

#[test]
fn init_writes_template_and_refuses_overwrite() {
    let project = Project::new();
    project
        .cmd()
        .args(["init", "--store-file", "upload-keystore.jks"])
        .assert()
        .success();

    let content = fs::read_to_string(project.root().join("android/key.properties")).unwrap();
    assert!(content.contains("keyAlias=upload"));
    assert!(content.contains("storeFile=upload-keystore.jks"));

    project
        .cmd()
        .arg("init")
        .assert()
        .code(1)
        .stderr(contains("--force"));

    project.cmd().args(["init", "--force"]).assert().success();
}

#[test]
fn init_without_store_file_warns_release_fails() {
    let project = Project::new();
    project
        .cmd()
        .arg("init")
        .assert()
        .success()
        .stdout(contains("release builds will fail until it is set"));

    project
        .cmd()
        .args(["resolve", "bundleRelease"])
        .assert()
        .code(6)
        .stderr(contains(UNCONFIGURED));
}
