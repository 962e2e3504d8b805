//! CLI integration tests using assert_cmd.
//!
//! All tests are self-contained: no network, config files live in tempdirs.

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;

#[allow(deprecated)]
fn nthprime() -> Command {
    let mut cmd = Command::cargo_bin("nthprime").unwrap();
    cmd.env_remove("NTHPRIME_CONFIG").env("RUST_LOG", "warn");
    cmd
}

// --- Help and arg validation ---

#[test]
fn help_shows_all_subcommands() {
    nthprime().arg("--help").assert().success().stdout(
        predicate::str::contains("nth")
            .and(predicate::str::contains("sieve"))
            .and(predicate::str::contains("estimate"))
            .and(predicate::str::contains("--strategy"))
            .and(predicate::str::contains("--config")),
    );
}

#[test]
fn help_nth_shows_args() {
    nthprime()
        .args(["nth", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--verify").and(predicate::str::contains("--json")));
}

#[test]
fn unknown_subcommand_fails() {
    nthprime()
        .arg("nonexistent")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unrecognized subcommand"));
}

#[test]
fn nth_missing_index_fails() {
    nthprime()
        .arg("nth")
        .assert()
        .failure()
        .stderr(predicate::str::contains("required"));
}

#[test]
fn unknown_strategy_fails() {
    nthprime()
        .args(["--strategy", "atkin", "nth", "5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown sieve strategy"));
}

// --- Lookups ---

#[test]
fn nth_prints_anchors() {
    nthprime()
        .args(["nth", "0", "11", "100", "1000"])
        .assert()
        .success()
        .stdout("2\n37\n547\n7927\n");
}

#[test]
fn nth_every_strategy() {
    for strategy in ["simple", "wheel", "segmented"] {
        nthprime()
            .args(["--strategy", strategy, "nth", "10000"])
            .assert()
            .success()
            .stdout("104743\n");
    }
}

#[test]
fn nth_negative_index_fails() {
    nthprime()
        .args(["nth", "-1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("index cannot be negative"));
}

#[test]
fn nth_json_with_verify() {
    nthprime()
        .args(["nth", "--json", "--verify", "100"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("\"index\":100")
                .and(predicate::str::contains("\"prime\":547"))
                .and(predicate::str::contains("\"verified\":true")),
        );
}

#[test]
fn nth_out_of_range_fails() {
    nthprime()
        .args(["--max-limit", "1000", "nth", "1000"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("out of range"));
}

#[test]
fn nth_huge_rank_under_default_limit_fails() {
    nthprime()
        .args(["--strategy", "simple", "nth", "35000000000"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("out of range"));
}

// --- Sieve and estimate ---

#[test]
fn sieve_lists_primes() {
    nthprime()
        .args(["sieve", "--limit", "30"])
        .assert()
        .success()
        .stdout("2\n3\n5\n7\n11\n13\n17\n19\n23\n29\n");
}

#[test]
fn sieve_count() {
    for strategy in ["simple", "wheel", "segmented"] {
        nthprime()
            .args(["--strategy", strategy, "sieve", "--limit", "1000000", "--count"])
            .assert()
            .success()
            .stdout("78498\n");
    }
}

#[test]
fn sieve_limit_above_max_fails() {
    nthprime()
        .args(["--max-limit", "100", "sieve", "--limit", "1000"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("exceeds max_limit"));
}

#[test]
fn estimate_prints_bound() {
    nthprime()
        .args(["estimate", "11"])
        .assert()
        .success()
        .stdout("36\n");
}

#[test]
fn estimate_below_two_fails() {
    nthprime()
        .args(["estimate", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no estimate"));
}

// --- Config file ---

#[test]
fn config_file_applies() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nthprime.toml");
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(file, "max_limit = 100").unwrap();

    nthprime()
        .arg("--config")
        .arg(&path)
        .args(["nth", "1000"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("out of range"));
}

#[test]
fn config_from_env_var() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nthprime.toml");
    std::fs::write(&path, "strategy = \"wheel\"\n").unwrap();

    nthprime()
        .env("NTHPRIME_CONFIG", &path)
        .args(["nth", "25"])
        .assert()
        .success()
        .stdout("101\n");
}

#[test]
fn invalid_config_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.toml");
    std::fs::write(&path, "segment_size = 8\n").unwrap();

    nthprime()
        .arg("--config")
        .arg(&path)
        .args(["nth", "5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("segment_size"));
}
