use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::os::unix::fs::MetadataExt;
use tempfile::TempDir;

fn sfind() -> Command {
    let mut cmd = Command::cargo_bin("sfind").unwrap();
    // keep the user's config file out of the tests
    cmd.env("XDG_CONFIG_HOME", "/nonexistent");
    cmd
}

fn scenario_tree() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("a.txt"), "alpha\n").unwrap();
    fs::write(dir.path().join("b.txt~"), "beta\n").unwrap();
    fs::create_dir(dir.path().join("sub")).unwrap();
    fs::write(dir.path().join("sub/c.zip"), "gamma\n").unwrap();
    dir
}

#[test]
fn default_listing_uses_dot_prefix() {
    let dir = scenario_tree();
    sfind()
        .current_dir(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("./a.txt"))
        .stdout(predicate::str::contains("./sub"))
        .stdout(predicate::str::contains("c.zip").not());
}

#[test]
fn recursive_walk_with_ignored_backups() {
    let dir = scenario_tree();
    sfind()
        .args(["-r", "-B", "-x", "10"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("a.txt"))
        .stdout(predicate::str::contains("sub"))
        .stdout(predicate::str::contains("c.zip"))
        .stdout(predicate::str::contains("b.txt~").not());
}

#[test]
fn hidden_entries_require_all_flag() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join(".env"), "secret\n").unwrap();
    fs::write(dir.path().join("visible.txt"), "ok\n").unwrap();

    sfind()
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(".env").not());

    sfind()
        .arg("-a")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(".env"));
}

#[test]
fn exit_budget_is_a_hard_bound() {
    let dir = scenario_tree();
    let output = sfind()
        .args(["-x", "1"])
        .arg(dir.path())
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).lines().count(), 1);
}

#[test]
fn exit_budget_zero_emits_nothing() {
    let dir = scenario_tree();
    sfind()
        .args(["-x", "0"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn in_file_search_with_line_numbers() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("log.txt"), "zero\nneedle here\n").unwrap();
    sfind()
        .args(["-i", "needle", "-p", "-l"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("log.txt"))
        .stdout(predicate::str::contains(" [2] + needle here"));
}

#[test]
fn print_all_prints_every_matching_line() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("log.txt"),
        "needle one\nnothing\nneedle two\n",
    )
    .unwrap();
    sfind()
        .args(["-i", "needle", "-V"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(" + needle one"))
        .stdout(predicate::str::contains(" + needle two"));
}

#[test]
fn count_mode_reports_match_totals() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("log.txt"), "needle\nneedle\n").unwrap();
    sfind()
        .args(["-i", "needle", "--count"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("(n_result: 2)"));
}

#[test]
fn case_insensitive_content_search() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("todo.txt"), "todo: fix\n").unwrap();

    sfind()
        .args(["-i", "TODO"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    sfind()
        .args(["-i", "TODO", "--ign-case-in-file"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("todo.txt"));
}

#[test]
fn extension_search_accepts_bare_extension() {
    let dir = scenario_tree();
    sfind()
        .args(["-e", "txt"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("a.txt"))
        .stdout(predicate::str::contains("sub").not());
}

#[test]
fn exact_name_match_with_case_folding() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("Makefile"), "all:\n").unwrap();
    sfind()
        .args(["-N", "makefile", "--ign-case-file-name"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Makefile"));
}

#[test]
fn uid_search_matches_owned_entries() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("mine.txt"), "x\n").unwrap();
    let uid = fs::metadata(dir.path()).unwrap().uid();
    sfind()
        .args(["-u", &uid.to_string()])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("mine.txt"));
}

#[test]
fn inode_search_matches_exactly_one_entry() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("one.txt"), "x\n").unwrap();
    fs::write(dir.path().join("two.txt"), "y\n").unwrap();
    let ino = fs::metadata(dir.path().join("one.txt")).unwrap().ino();
    sfind()
        .args(["-Q", &ino.to_string(), "-I"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("one.txt"))
        .stdout(predicate::str::contains(format!("(ino: {ino})")))
        .stdout(predicate::str::contains("two.txt").not());
}

#[test]
fn which_searches_the_path_variable() {
    let bin_dir = TempDir::new().unwrap();
    fs::write(bin_dir.path().join("mytool"), "#!/bin/sh\n").unwrap();
    let cwd = TempDir::new().unwrap();
    sfind()
        .args(["-w", "-N", "mytool"])
        .current_dir(cwd.path())
        .env("PATH", bin_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("mytool"));
}

#[test]
fn no_scan_skips_matching_names() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("keep.txt"), "").unwrap();
    fs::write(dir.path().join("skip_me.txt"), "").unwrap();
    sfind()
        .args(["-o", "skip"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("keep.txt"))
        .stdout(predicate::str::contains("skip_me.txt").not());
}

#[test]
fn missing_root_is_reported_but_not_fatal() {
    let dir = scenario_tree();
    sfind()
        .arg(dir.path().join("missing"))
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("a.txt"))
        .stderr(predicate::str::contains("sfind:stat"));
}

#[test]
fn ack_combination_colors_and_numbers_lines() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("f.txt"), "needle here\n").unwrap();
    sfind()
        .args(["--ack", "needle"])
        .current_dir(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("[1] + needle here"))
        .stdout(predicate::str::contains("\u{1b}["));
}

#[test]
fn full_path_display_resolves_against_cwd() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("a.txt"), "").unwrap();
    let canonical = dir.path().canonicalize().unwrap();
    sfind()
        .arg("-P")
        .current_dir(&canonical)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            canonical.join("a.txt").to_string_lossy().into_owned(),
        ));
}

#[test]
fn config_file_supplies_ignored_extensions() {
    let config_home = TempDir::new().unwrap();
    fs::create_dir_all(config_home.path().join("sfind")).unwrap();
    fs::write(
        config_home.path().join("sfind/config.toml"),
        "[ignore]\nextensions = [\".log\"]\n",
    )
    .unwrap();

    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("a.txt"), "").unwrap();
    fs::write(dir.path().join("b.log"), "").unwrap();

    let mut cmd = Command::cargo_bin("sfind").unwrap();
    cmd.env("XDG_CONFIG_HOME", config_home.path())
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("a.txt"))
        .stdout(predicate::str::contains("b.log").not());
}

#[test]
fn malformed_config_file_is_fatal() {
    let config_home = TempDir::new().unwrap();
    fs::create_dir_all(config_home.path().join("sfind")).unwrap();
    fs::write(config_home.path().join("sfind/config.toml"), "not toml [").unwrap();

    let mut cmd = Command::cargo_bin("sfind").unwrap();
    cmd.env("XDG_CONFIG_HOME", config_home.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("config"));
}

#[test]
fn version_and_completions() {
    sfind()
        .arg("-v")
        .assert()
        .success()
        .stdout(predicate::str::contains("1.4.0"));

    sfind()
        .args(["--completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("sfind"));
}
