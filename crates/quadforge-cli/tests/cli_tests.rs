//! CLI integration tests using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// A command isolated from any user or project config.
fn quadforge(home: &TempDir) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("quadforge").unwrap();
    cmd.env("HOME", home.path()).env_remove("QUADFORGE_SEED");
    cmd
}

fn home() -> TempDir {
    tempfile::tempdir().unwrap()
}

#[test]
fn solve_prints_canonical_roots() {
    let home = home();
    quadforge(&home)
        .args(["solve", "1", "4", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("x² + 4x + 1 = 0"))
        .stdout(predicate::str::contains("Discriminant: 12 (irrational)"))
        .stdout(predicate::str::contains("x₁ = -2-√3"))
        .stdout(predicate::str::contains("x₂ = -2+√3"));
}

#[test]
fn solve_accepts_negative_coefficients() {
    let home = home();
    quadforge(&home)
        .args(["solve", "1", "-1", "-1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("x₁ = (1-√5)/2"))
        .stdout(predicate::str::contains("x₂ = (1+√5)/2"));
}

#[test]
fn solve_rational_roots() {
    let home = home();
    quadforge(&home)
        .args(["solve", "2", "-7", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("perfect square"))
        .stdout(predicate::str::contains("x₁ = 1/2"))
        .stdout(predicate::str::contains("x₂ = 3"));
}

#[test]
fn solve_rejects_zero_leading_coefficient() {
    let home = home();
    quadforge(&home)
        .args(["solve", "0", "2", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("a must be non-zero"));
}

#[test]
fn solve_reports_negative_discriminant() {
    let home = home();
    quadforge(&home)
        .args(["solve", "1", "0", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("discriminant -4 is negative"));
}

#[test]
fn quiz_same_seed_same_question() {
    let home = home();
    let run = || {
        quadforge(&home)
            .current_dir(home.path())
            .args(["quiz", "1", "6", "5", "--seed", "7"])
            .output()
            .unwrap()
    };
    let first = run();
    let second = run();
    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);

    let stdout = String::from_utf8(first.stdout).unwrap();
    assert!(stdout.contains("x² + 6x + 5 = 0"));
    assert!(stdout.contains("x = -5 or x = -1"));
    assert!(stdout.contains("Answer: "));
    assert!(stdout.contains("Seed: 7"));
}

#[test]
fn quiz_without_seed_prints_the_drawn_seed() {
    let home = home();
    quadforge(&home)
        .current_dir(home.path())
        .args(["quiz", "1", "4", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Seed: "));
}

#[test]
fn quiz_explain_names_mistake_models() {
    let home = home();
    quadforge(&home)
        .current_dir(home.path())
        .args(["quiz", "1", "6", "5", "--seed", "1", "--explain"])
        .assert()
        .success()
        .stdout(predicate::str::contains("sign-flip-on-b"))
        .stdout(predicate::str::contains("single-root-sign-flip"));
}

#[test]
fn quiz_json_has_one_correct_choice() {
    let home = home();
    let output = quadforge(&home)
        .current_dir(home.path())
        .args(["quiz", "1", "4", "1", "--seed", "3", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let output: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(output["seed"], 3);
    let question = &output["question"];
    let choices = question["choices"]["choices"].as_array().unwrap();
    assert_eq!(choices.len(), 4);
    let correct = "x = -2-√3 or x = -2+√3";
    assert_eq!(choices.iter().filter(|c| *c == correct).count(), 1);

    let letter = question["choices"]["correct"].as_str().unwrap();
    let index = ["A", "B", "C", "D"].iter().position(|l| *l == letter).unwrap();
    assert_eq!(choices[index], correct);
}

#[test]
fn quiz_json_records_drawn_seed_for_replay() {
    let home = home();
    let quiz_json = |extra: &[&str]| -> serde_json::Value {
        let output = quadforge(&home)
            .current_dir(home.path())
            .args(["quiz", "1", "4", "1", "--json"])
            .args(extra)
            .output()
            .unwrap();
        assert!(output.status.success());
        serde_json::from_slice(&output.stdout).unwrap()
    };

    let drawn = quiz_json(&[]);
    let seed = drawn["seed"].as_u64().expect("seed recorded in JSON output");

    let replay = quiz_json(&["--seed", &seed.to_string()]);
    assert_eq!(replay["seed"], seed);
    assert_eq!(replay["question"], drawn["question"]);
}

#[test]
fn quiz_uses_config_seed() {
    let home = home();
    std::fs::write(home.path().join("quadforge.toml"), "seed = 99\n").unwrap();
    quadforge(&home)
        .current_dir(home.path())
        .args(["quiz", "1", "6", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Seed: 99"));
}

#[test]
fn quiz_seed_env_override() {
    let home = home();
    quadforge(&home)
        .current_dir(home.path())
        .env("QUADFORGE_SEED", "12")
        .args(["quiz", "1", "6", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Seed: 12"));
}

#[test]
fn check_accepts_a_root() {
    let home = home();
    quadforge(&home)
        .args(["check", "1", "4", "1", "--answer", "-2+√3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Correct"));
}

#[test]
fn check_accepts_sqrt_spelling() {
    let home = home();
    quadforge(&home)
        .args(["check", "1", "-1", "-1", "--answer", "(1+sqrt5)/2"])
        .assert()
        .success();
}

#[test]
fn check_rejects_a_distractor() {
    let home = home();
    quadforge(&home)
        .args(["check", "1", "4", "1", "--answer", "2+√3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("is not a root"));
}

#[test]
fn check_rejects_garbage() {
    let home = home();
    quadforge(&home)
        .args(["check", "1", "4", "1", "--answer", "two"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot read answer"));
}

#[test]
fn validate_basics_item_set() {
    let home = home();
    quadforge(&home)
        .arg("validate")
        .arg("--item-set")
        .arg("../../item-sets/quadratics-basics.toml")
        .assert()
        .success()
        .stdout(predicate::str::contains("7 items"))
        .stdout(predicate::str::contains("All item sets valid"));
}

#[test]
fn validate_directory() {
    let home = home();
    quadforge(&home)
        .arg("validate")
        .arg("--item-set")
        .arg("../../item-sets")
        .assert()
        .success()
        .stdout(predicate::str::contains("Quadratics Basics"))
        .stdout(predicate::str::contains("Irrational Roots"));
}

#[test]
fn validate_nonexistent_file() {
    let home = home();
    quadforge(&home)
        .arg("validate")
        .arg("--item-set")
        .arg("nonexistent.toml")
        .assert()
        .failure();
}

#[test]
fn validate_flags_bad_items() {
    let home = home();
    let path = home.path().join("bad.toml");
    std::fs::write(
        &path,
        r#"
[item_set]
id = "bad"
name = "Bad"

[[items]]
id = "linear"
a = 0
b = 2
c = 1

[[items]]
id = "complex"
a = 1
b = 0
c = 1
"#,
    )
    .unwrap();

    quadforge(&home)
        .arg("validate")
        .arg("--item-set")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("[linear] WARNING"))
        .stdout(predicate::str::contains("no real roots"))
        .stdout(predicate::str::contains("2 warning(s) found"));
}

#[test]
fn generate_writes_json_and_quiz_sheet() {
    let home = home();
    let output = home.path().join("out");
    quadforge(&home)
        .arg("generate")
        .arg("--item-set")
        .arg("../../item-sets/irrational.toml")
        .args(["--seed", "5", "--format", "all"])
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stderr(predicate::str::contains("Complete: 5/5 generated, 0 failed"));

    let mut files: Vec<String> = std::fs::read_dir(&output)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    files.sort();
    assert_eq!(files.len(), 2);
    assert!(files[0].starts_with("report-irrational-") && files[0].ends_with(".json"));
    assert!(files[1].ends_with(".txt"));

    let sheet = std::fs::read_to_string(output.join(&files[1])).unwrap();
    assert!(sheet.contains("Irrational Roots"));
    assert!(sheet.contains("Seed: 5"));
    assert!(sheet.contains("Answer key"));
}

#[test]
fn generate_applies_tag_filter() {
    let home = home();
    let output = home.path().join("out");
    quadforge(&home)
        .arg("generate")
        .arg("--item-set")
        .arg("../../item-sets/quadratics-basics.toml")
        .args(["--filter", "fraction", "--format", "json"])
        .arg("--output")
        .arg(&output)
        .assert()
        .success();

    let entry = std::fs::read_dir(&output).unwrap().next().unwrap().unwrap();
    let report: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(entry.path()).unwrap()).unwrap();
    assert_eq!(report["questions"].as_array().unwrap().len(), 2);
    // The set's own seed applies when no flag is given.
    assert_eq!(report["seed"], 2024);
}

#[test]
fn generate_rejects_unknown_format() {
    let home = home();
    quadforge(&home)
        .arg("generate")
        .arg("--item-set")
        .arg("../../item-sets/irrational.toml")
        .args(["--format", "html"])
        .arg("--output")
        .arg(home.path().join("out"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown format 'html'"));
}

#[test]
fn audit_reports_uniform_positions() {
    let home = home();
    quadforge(&home)
        .args(["audit", "1", "-4", "3", "--trials", "400"])
        .assert()
        .success()
        .stdout(predicate::str::contains("χ²"))
        .stdout(predicate::str::contains("Verdict: uniform"));
}

#[test]
fn audit_rejects_oversized_trial_count() {
    let home = home();
    quadforge(&home)
        .args(["audit", "1", "-4", "3", "--trials", "18446744073709551615"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::starts_with("Error:"))
        .stderr(predicate::str::contains("trials must be between 1 and 1000000"));
}

#[test]
fn audit_rejects_zero_trials() {
    let home = home();
    quadforge(&home)
        .args(["audit", "1", "-4", "3", "--trials", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("trials must be between"));
}

#[test]
fn audit_reports_unsolvable_equation() {
    let home = home();
    quadforge(&home)
        .args(["audit", "1", "0", "1", "--trials", "10"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("discriminant -4 is negative"));
}

#[test]
fn init_creates_starter_files() {
    let home = home();
    quadforge(&home)
        .current_dir(home.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created quadforge.toml"));

    assert!(home.path().join("quadforge.toml").exists());
    assert!(home.path().join("item-sets/example.toml").exists());

    quadforge(&home)
        .current_dir(home.path())
        .args(["validate", "--item-set", "item-sets/example.toml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("All item sets valid"));
}

#[test]
fn init_skips_existing_files() {
    let home = home();
    std::fs::write(home.path().join("quadforge.toml"), "seed = 1\n").unwrap();
    quadforge(&home)
        .current_dir(home.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists, skipping"));
    assert_eq!(
        std::fs::read_to_string(home.path().join("quadforge.toml")).unwrap(),
        "seed = 1\n"
    );
}

#[test]
fn help_lists_commands() {
    let home = home();
    quadforge(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("solve"))
        .stdout(predicate::str::contains("quiz"))
        .stdout(predicate::str::contains("generate"))
        .stdout(predicate::str::contains("audit"));
}
