//! Configuration integration tests.
//!
//! Each test writes config files into a temp tree, runs `info --json` from
//! somewhere inside it, and checks the reference data settings the binary
//! actually resolved.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::TempDir;

#[allow(deprecated)]
fn cmd() -> Command {
    let mut cmd = Command::cargo_bin(env!("CARGO_PKG_NAME")).unwrap();
    for var in [
        "SYLBA_LEXICON_PATH",
        "SYLBA_DICTIONARY_PATH",
        "SYLBA_MAX_WORD_CHARS",
        "SYLBA_LOG_LEVEL",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

/// Effective config reported by `info --json` when run from `dir`.
fn effective_config(dir: &Path) -> Value {
    let output = cmd()
        .args(["-C", dir.to_str().unwrap(), "info", "--json"])
        .output()
        .expect("failed to run sylba");
    assert!(
        output.status.success(),
        "info failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let json: Value = serde_json::from_slice(&output.stdout).expect("invalid JSON output");
    json["config"].clone()
}

#[test]
fn nothing_configured_by_default() {
    let tmp = TempDir::new().unwrap();
    let config = effective_config(tmp.path());

    assert!(config["config_file"].is_null());
    assert!(config["lexicon"].is_null());
    assert!(config["dictionary"].is_null());
    assert!(config["max_word_chars"].is_null());
}

#[test]
fn dotfile_sets_word_limit() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join(".sylba.toml"), "max_word_chars = 30\n").unwrap();

    let config = effective_config(tmp.path());
    assert_eq!(config["max_word_chars"], 30);
    assert!(
        config["config_file"]
            .as_str()
            .unwrap()
            .ends_with(".sylba.toml")
    );
}

#[test]
fn every_format_can_name_the_dictionary() {
    let cases = [
        ("sylba.toml", "dictionary_path = \"/dict/cmu.toml.dict\"\nlexicon_path = \"/lex.data\"\n"),
        ("sylba.yaml", "dictionary_path: /dict/cmu.yaml.dict\nlexicon_path: /lex.data\n"),
        ("sylba.yml", "dictionary_path: /dict/cmu.yml.dict\nlexicon_path: /lex.data\n"),
        (
            "sylba.json",
            r#"{"dictionary_path": "/dict/cmu.json.dict", "lexicon_path": "/lex.data"}"#,
        ),
    ];
    for (name, body) in cases {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(name), body).unwrap();

        let config = effective_config(tmp.path());
        let ext = name.rsplit('.').next().unwrap();
        assert_eq!(
            config["dictionary"],
            format!("/dict/cmu.{ext}.dict"),
            "{name} should set dictionary_path"
        );
    }
}

#[test]
fn regular_file_beats_dotfile() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join(".sylba.toml"), "max_word_chars = 10\n").unwrap();
    fs::write(tmp.path().join("sylba.toml"), "max_word_chars = 20\n").unwrap();

    assert_eq!(effective_config(tmp.path())["max_word_chars"], 20);
}

#[test]
fn closest_config_wins() {
    let tmp = TempDir::new().unwrap();
    let project = tmp.path().join("project");
    fs::create_dir_all(&project).unwrap();
    fs::write(tmp.path().join("sylba.toml"), "lexicon_path = \"/outer.data\"\n").unwrap();
    fs::write(project.join("sylba.toml"), "lexicon_path = \"/inner.data\"\n").unwrap();

    assert_eq!(effective_config(&project)["lexicon"], "/inner.data");
}

#[test]
fn relative_lexicon_path_resolves_against_config_dir() {
    let tmp = TempDir::new().unwrap();
    let sub_dir = tmp.path().join("work");
    fs::create_dir_all(&sub_dir).unwrap();
    fs::write(
        tmp.path().join("sylba.toml"),
        "lexicon_path = \"data/nettalk.data\"\ndictionary_path = \"data/cmudict.dict\"\n",
    )
    .unwrap();

    let config = effective_config(&sub_dir);

    let lexicon = Path::new(config["lexicon"].as_str().unwrap());
    assert!(lexicon.is_absolute(), "should be resolved: {}", lexicon.display());
    assert!(lexicon.ends_with(Path::new("data").join("nettalk.data")));
    assert!(
        config["dictionary"]
            .as_str()
            .unwrap()
            .ends_with("cmudict.dict")
    );
}

#[test]
fn absolute_lexicon_path_is_kept() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join(".sylba.yaml"),
        "lexicon_path: /srv/nettalk.data\n",
    )
    .unwrap();

    assert_eq!(effective_config(tmp.path())["lexicon"], "/srv/nettalk.data");
}

#[test]
fn git_boundary_hides_outer_lexicon() {
    let tmp = TempDir::new().unwrap();
    let repo = tmp.path().join("repo");
    let src = repo.join("src");
    fs::create_dir_all(&src).unwrap();
    fs::create_dir(repo.join(".git")).unwrap();
    fs::write(tmp.path().join("sylba.toml"), "lexicon_path = \"/outer.data\"\n").unwrap();

    let config = effective_config(&src);
    assert!(config["lexicon"].is_null());
    assert!(config["config_file"].is_null());
}

#[test]
fn explicit_config_overrides_project_limit() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("sylba.toml"), "max_word_chars = 12\n").unwrap();
    let explicit = tmp.path().join("strict.toml");
    fs::write(&explicit, "max_word_chars = 6\n").unwrap();

    let output = cmd()
        .args([
            "-C",
            tmp.path().to_str().unwrap(),
            "--config",
            explicit.to_str().unwrap(),
            "info",
            "--json",
        ])
        .output()
        .expect("failed to run sylba");
    assert!(output.status.success());

    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["config"]["max_word_chars"], 6);
    assert!(
        json["config"]["config_file"]
            .as_str()
            .unwrap()
            .ends_with("strict.toml")
    );
}

#[test]
fn env_var_overrides_file_and_sets_lexicon() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("sylba.toml"), "max_word_chars = 12\n").unwrap();

    let output = cmd()
        .env("SYLBA_LEXICON_PATH", "/srv/sylba/nettalk.data")
        .env("SYLBA_MAX_WORD_CHARS", "24")
        .args(["-C", tmp.path().to_str().unwrap(), "info", "--json"])
        .output()
        .expect("failed to run sylba");
    assert!(output.status.success());

    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["config"]["lexicon"], "/srv/sylba/nettalk.data");
    assert_eq!(json["config"]["max_word_chars"], 24);
}

#[test]
fn non_numeric_word_limit_is_rejected() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("sylba.toml"), "max_word_chars = \"many\"\n").unwrap();

    cmd()
        .args(["-C", tmp.path().to_str().unwrap(), "info"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("configuration"));
}

#[test]
fn broken_yaml_is_rejected() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join(".sylba.yaml"), "lexicon_path: [unclosed\n").unwrap();

    cmd()
        .args(["-C", tmp.path().to_str().unwrap(), "info"])
        .assert()
        .failure();
}

#[test]
fn configured_lexicon_is_used_by_count() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join("words.data"),
        "cat k@t >1< 0\nrabbit r@bIt >1<>0< 0\n",
    )
    .unwrap();
    fs::write(
        tmp.path().join(".sylba.toml"),
        "lexicon_path = \"words.data\"\n",
    )
    .unwrap();

    cmd()
        .args(["-C", tmp.path().to_str().unwrap(), "count", "rabbit"])
        .assert()
        .success()
        .stdout(predicate::str::contains("rabbit: 2"));
}

#[test]
fn configured_word_limit_applies_to_syllabify() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join("words.data"),
        "cat k@t >1< 0\nrabbit r@bIt >1<>0< 0\n",
    )
    .unwrap();
    fs::write(
        tmp.path().join("sylba.toml"),
        "lexicon_path = \"words.data\"\nmax_word_chars = 4\n",
    )
    .unwrap();

    cmd()
        .args(["-C", tmp.path().to_str().unwrap(), "syllabify", "rabbit"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("limit: 4"));
}
