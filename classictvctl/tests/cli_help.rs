use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::{Value, json};

const SERIES_A: &str = "6f1c2a9e-2d3b-4c5d-8e7f-0a1b2c3d4e5f";
const SERIES_B: &str = "1d2e3f40-5a6b-4c7d-8e9f-a0b1c2d3e4f5";
const USER: &str = "0b7e4c1d-9a8f-4e2d-b3c4-5d6e7f8a9b0c";
const A1: &str = "a0000000-0000-4000-8000-000000000001";
const A2: &str = "a0000000-0000-4000-8000-000000000002";
const B1: &str = "b0000000-0000-4000-8000-000000000001";

#[test]
fn top_level_help_lists_subcommands() {
    let mut cmd = cargo_bin_cmd!("classictvctl");
    let out = cmd
        .arg("--help")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let text = String::from_utf8_lossy(&out);
    for sub in ["generate", "preview", "check-config", "describe"] {
        assert!(text.contains(sub), "help missing '{sub}'");
    }
    assert!(text.contains("--config"), "help missing --config");
}

#[test]
fn generate_help_mentions_dry_run() {
    let mut cmd = cargo_bin_cmd!("classictvctl");
    cmd.arg("generate")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--dry-run"))
        .stdout(predicate::str::contains("--library"));
}

#[test]
fn describe_prints_the_task_descriptor() {
    let mut cmd = cargo_bin_cmd!("classictvctl");
    cmd.arg("describe")
        .assert()
        .success()
        .stdout(predicate::str::contains("Generate ClassicTV playlist"))
        .stdout(predicate::str::contains("ClassicTV_PlaylistGenerator"))
        .stdout(predicate::str::contains("manual only"));
}

fn write_fixture(dir: &Path) -> (PathBuf, PathBuf) {
    let library = dir.join("library.json");
    fs::write(
        &library,
        json!({
            "series": [
                {
                    "id": SERIES_A,
                    "name": "Alpha",
                    "episodes": [
                        { "id": A2, "name": "Second", "season": 1, "episode": 2 },
                        { "id": A1, "name": "First", "season": 1, "episode": 1 }
                    ]
                },
                {
                    "id": SERIES_B,
                    "name": "Bravo",
                    "episodes": [
                        { "id": B1, "name": "Pilot", "season": 1, "episode": 1,
                          "watch_state": [{ "user_id": USER, "played": false }] }
                    ]
                }
            ],
            "users": [{ "id": USER, "name": "U1" }]
        })
        .to_string(),
    )
    .expect("write library");

    let config = dir.join("classictv.toml");
    fs::write(
        &config,
        format!(
            "series_ids = [\"{SERIES_A}\", \"{SERIES_B}\"]\n\
             user_ids = [\"{USER}\"]\n\n\
             [library]\n\
             snapshot_path = \"{}\"\n",
            library.display()
        ),
    )
    .expect("write config");

    (config, library)
}

#[test]
fn generate_writes_the_mixed_playlist_into_the_snapshot() {
    let dir = tempfile::tempdir().expect("tempdir");
    let (config, library) = write_fixture(dir.path());

    let mut cmd = cargo_bin_cmd!("classictvctl");
    cmd.arg("--config")
        .arg(&config)
        .arg("generate")
        .assert()
        .success()
        .stdout(predicate::str::contains("1 synced, 0 skipped, 0 failed"));

    let saved: Value =
        serde_json::from_str(&fs::read_to_string(&library).expect("read"))
            .expect("json");
    let playlists = saved["playlists"].as_array().expect("playlists");
    assert_eq!(playlists.len(), 1);
    assert_eq!(playlists[0]["name"], "ClassicTV Playlist - U1");
    assert_eq!(playlists[0]["items"], json!([A1, B1, A2]));
}

#[test]
fn dry_run_leaves_the_snapshot_untouched() {
    let dir = tempfile::tempdir().expect("tempdir");
    let (config, library) = write_fixture(dir.path());
    let before = fs::read_to_string(&library).expect("read");

    let mut cmd = cargo_bin_cmd!("classictvctl");
    cmd.arg("--config")
        .arg(&config)
        .arg("generate")
        .arg("--dry-run")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "ClassicTV Playlist - U1 (3 episodes)",
        ))
        .stdout(predicate::str::contains("Alpha S01E01 First"));

    assert_eq!(fs::read_to_string(&library).expect("read"), before);
}

#[test]
fn check_config_reports_unknown_users() {
    let dir = tempfile::tempdir().expect("tempdir");
    let (_, library) = write_fixture(dir.path());
    let config = dir.path().join("other.json");
    fs::write(
        &config,
        json!({
            "series_ids": [SERIES_A],
            "user_ids": ["not-a-guid", "11111111-2222-4333-8444-555555555555"],
            "library": { "snapshot_path": library }
        })
        .to_string(),
    )
    .expect("write config");

    let mut cmd = cargo_bin_cmd!("classictvctl");
    cmd.arg("--config")
        .arg(&config)
        .arg("check-config")
        .assert()
        .success()
        .stdout(predicate::str::contains("'not-a-guid' is not a valid"))
        .stdout(predicate::str::contains("is not in the library"));
}
