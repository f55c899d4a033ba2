mod common;

use assert_cmd::prelude::*;
use common::mock_api;
use predicates::prelude::*;
use std::process::Command;
use tempfile::tempdir;

/// `cex` with a clean environment so local CEX_* settings don't leak in.
fn cex() -> Command {
    let mut cmd = Command::cargo_bin("cex").unwrap();
    for var in ["CEX_BASE_URL", "CEX_TIMEOUT_SECS", "CEX_FAVORITES", "CEX_LOCALE"] {
        cmd.env_remove(var);
    }
    cmd
}

#[test]
fn cli_shows_help() {
    cex()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("cex"));
}

#[test]
fn about_prints_description() {
    cex()
        .arg("about")
        .assert()
        .success()
        .stdout(predicate::str::contains("REST Countries"));
}

#[test]
fn favorite_toggles_and_lists() {
    let dir = tempdir().unwrap();
    let favs = dir.path().join("favs.json");
    let favs = favs.to_str().unwrap();

    cex()
        .args(["favorites", "--favorites", favs])
        .assert()
        .success()
        .stdout(predicate::str::contains("No favorites yet."));

    cex()
        .args(["favorite", "per", "--favorites", favs])
        .assert()
        .success()
        .stdout(predicate::str::contains("PER added to favorites"));

    cex()
        .args(["favorites", "--favorites", favs])
        .assert()
        .success()
        .stdout(predicate::str::diff("PER\n"));

    cex()
        .args(["favorite", "PER", "--favorites", favs])
        .assert()
        .success()
        .stdout(predicate::str::contains("PER removed from favorites"));
}

#[test]
fn list_filters_loaded_countries() {
    let base = format!("{}/v3.1", mock_api::start());

    cex()
        .args(["list", "--base-url", &base])
        .assert()
        .success()
        .stdout(predicate::str::contains("Showing 5 countries"));

    cex()
        .args(["list", "-r", "europe", "-s", "IA", "--base-url", &base])
        .assert()
        .success()
        .stdout(predicate::str::contains("Showing 1 countries in Europe"))
        .stdout(predicate::str::contains("Austria [AUT]"));
}

#[test]
fn list_exports_shown_countries() {
    let base = format!("{}/v3.1", mock_api::start());
    let dir = tempdir().unwrap();
    let out = dir.path().join("europe.csv");

    cex()
        .args(["list", "-r", "Europe", "--base-url", &base])
        .args(["--out", out.to_str().unwrap()])
        .assert()
        .success()
        .stderr(predicate::str::contains("Saved 3 countries"));
    let text = std::fs::read_to_string(&out).unwrap();
    assert_eq!(text.lines().count(), 4);
}

#[test]
fn search_applies_region() {
    let base = format!("{}/v3.1", mock_api::start());

    cex()
        .args(["search", "republic", "--region", "Europe", "--base-url", &base])
        .assert()
        .success()
        .stdout(predicate::str::contains("Germany [DEU]"))
        .stdout(predicate::str::contains("Austria [AUT]"))
        .stdout(predicate::str::contains("Peru").not());

    // Matches exist, just none in the region: an answer, not a failure.
    cex()
        .args(["search", "republic", "--region", "Oceania", "--base-url", &base])
        .assert()
        .success()
        .stdout(predicate::str::contains("Showing 0 countries in Oceania"))
        .stdout(predicate::str::contains(
            "No countries found with your search and filter.",
        ));

    cex()
        .args(["search", "atlantis", "--base-url", &base])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Country not found or API error."));
}

#[test]
fn show_prints_details_and_neighbors() {
    let base = format!("{}/v3.1", mock_api::start());
    let dir = tempdir().unwrap();
    let favs = dir.path().join("favs.json");
    std::fs::write(&favs, r#"["DEU"]"#).unwrap();

    cex()
        .args(["show", "Germany", "--neighbors", "--base-url", &base])
        .args(["--favorites", favs.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Germany ★"))
        .stdout(predicate::str::contains("Euro (€)"))
        .stdout(predicate::str::contains("Austria [AUT]  Vienna"));

    cex()
        .args(["show", "Iceland", "--neighbors", "--base-url", &base])
        .args(["--favorites", favs.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("no land borders"));
}

#[test]
fn show_unknown_country_fails() {
    let base = format!("{}/v3.1", mock_api::start());
    let dir = tempdir().unwrap();

    cex()
        .args(["show", "Atlantis", "--base-url", &base])
        .args(["--favorites", dir.path().join("f.json").to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Failed to load country data: no country matches \"Atlantis\"",
        ));
}

#[test]
fn unreachable_api_reports_load_failure() {
    cex()
        .args(["list", "--base-url", "http://127.0.0.1:9/v3.1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load countries data."));
}

#[test]
fn invalid_timeout_is_rejected() {
    cex().args(["list", "--timeout", "soon"]).assert().failure();
}
