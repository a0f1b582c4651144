//! Integration tests for the mc CLI commands.
#![allow(deprecated)] // Command::cargo_bin – macro replacement not yet stable

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const LESSON: &str = r#"{
    "title": "Agreeing & Disagreeing",
    "description": "Dire qu'on est d'accord, ou pas.",
    "questions": [
        {
            "id": "agree-1",
            "prompt": "« Je suis d'accord »",
            "kind": "multiple_choice",
            "choices": ["I am agree", "I agree"],
            "correct_index": 1,
            "explanation": "'Agree' is a verb: no 'am'."
        },
        {
            "id": "hedge-1",
            "prompt": { "text": "It's ___ cold. (un peu)", "spoken": "It's kind of cold." },
            "kind": "fill_in_text",
            "accepted": ["kind of", "kinda"],
            "hint": "Informal, two words."
        },
        {
            "id": "order-1",
            "prompt": "Je suis tout à fait d'accord",
            "kind": "word_order",
            "target": ["I", "totally", "agree"]
        }
    ]
}"#;

/// A temp directory holding a lesson file and an empty progress store.
struct Fixture {
    dir: TempDir,
}

impl Fixture {
    fn new() -> Self {
        Self::with_lesson(LESSON)
    }

    fn with_lesson(json: &str) -> Self {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("lesson.json"), json).unwrap();
        Self { dir }
    }

    fn lesson(&self) -> PathBuf {
        self.dir.path().join("lesson.json")
    }

    fn store(&self) -> PathBuf {
        self.dir.path().join("store")
    }

    /// `mc <command> <lesson> [extra...] --store <store>`
    fn mc(&self, command: &str, extra: &[&str]) -> Command {
        let mut cmd = mc();
        cmd.arg(command)
            .arg(self.lesson())
            .args(extra)
            .arg("--store")
            .arg(self.store());
        cmd
    }

    fn play(&self, extra: &[&str], stdin: &str) -> Command {
        let mut args = vec!["--no-shuffle", "--seed", "1"];
        args.extend_from_slice(extra);
        let mut cmd = self.mc("play", &args);
        cmd.write_stdin(stdin.to_string());
        cmd
    }
}

fn mc() -> Command {
    let mut cmd = Command::cargo_bin("mc").unwrap();
    cmd.env("NO_COLOR", "1");
    cmd
}

fn path_str(path: &Path) -> &str {
    path.to_str().unwrap()
}

// ---------------------------------------------------------------------------
// check
// ---------------------------------------------------------------------------

#[test]
fn check_passes_valid_lesson() {
    let fx = Fixture::new();
    fx.mc("check", &[])
        .assert()
        .success()
        .stdout(predicate::str::contains("All checks passed").and(predicate::str::contains("3 questions")));
}

#[test]
fn check_reports_every_problem() {
    let fx = Fixture::with_lesson(
        r#"{
        "title": "Broken",
        "questions": [
            { "id": "a", "prompt": "Pick", "kind": "multiple_choice", "choices": ["x"], "correct_index": 4 },
            { "id": "a", "prompt": "Type", "kind": "fill_in_text", "accepted": ["ok"] },
            { "id": "b", "prompt": "Build", "kind": "word_order", "target": [] }
        ]
    }"#,
    );
    fx.mc("check", &[])
        .assert()
        .failure()
        .stderr(
            predicate::str::contains("out of range")
                .and(predicate::str::contains("duplicate question id"))
                .and(predicate::str::contains("empty target"))
                .and(predicate::str::contains("3 problems found")),
        );
}

#[test]
fn check_rejects_empty_lesson() {
    let fx = Fixture::with_lesson(r#"{ "title": "Empty", "questions": [] }"#);
    fx.mc("check", &[])
        .assert()
        .failure()
        .stderr(predicate::str::contains("has no questions"));
}

#[test]
fn check_reports_malformed_json() {
    let fx = Fixture::with_lesson("{ not json");
    fx.mc("check", &[])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to parse lesson"));
}

#[test]
fn missing_lesson_file() {
    mc().args(["check", "/definitely/not/here.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read lesson"));
}

// ---------------------------------------------------------------------------
// list / show
// ---------------------------------------------------------------------------

#[test]
fn list_shows_all_questions() {
    let fx = Fixture::new();
    fx.mc("list", &[])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("agree-1")
                .and(predicate::str::contains("fill_in_text"))
                .and(predicate::str::contains("word_order"))
                .and(predicate::str::contains("3 questions, 0 answered")),
        );
}

#[test]
fn show_question_with_hint_and_answer() {
    let fx = Fixture::new();
    fx.mc("show", &["hedge-1"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("It's kind of cold.")
                .and(predicate::str::contains("Informal, two words."))
                .and(predicate::str::contains("kind of | kinda")),
        );
}

#[test]
fn show_uses_fallback_hint_and_joined_answer() {
    let fx = Fixture::new();
    fx.mc("show", &["order-1"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Read the question again carefully.")
                .and(predicate::str::contains("I totally agree")),
        );
}

#[test]
fn show_unknown_id_suggests_closest() {
    let fx = Fixture::new();
    fx.mc("show", &["agre-1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("did you mean \"agree-1\""));
}

// ---------------------------------------------------------------------------
// play
// ---------------------------------------------------------------------------

#[test]
fn play_whole_lesson_correctly() {
    let fx = Fixture::new();
    fx.play(&[], "2\nKIND   OF\n1 2 3\n:check\n")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Bravo, c'est correct !")
                .and(predicate::str::contains("sentence: I totally agree"))
                .and(predicate::str::contains("Final score: 3/3 correct (100%)"))
                .and(predicate::str::contains("Completed 3/3 questions (100%)")),
        );
}

#[test]
fn play_wrong_answer_counts_once() {
    let fx = Fixture::new();
    fx.play(&[], "1\n2\n")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Pas tout à fait.")
                .and(predicate::str::contains("answer:   I agree"))
                .and(predicate::str::contains("Score: 0/1 correct (0%)")),
        );
}

#[test]
fn play_in_english() {
    let fx = Fixture::new();
    fx.play(&["--english"], "1\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Not quite."));
}

#[test]
fn play_retry_renders_a_new_instance() {
    let fx = Fixture::new();
    fx.play(&["--retry"], "1\n2\n")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Try again.")
                .and(predicate::str::contains("Score: 1/2 correct (50%)")),
        );
}

#[test]
fn play_hint_and_reveal_do_not_score() {
    let fx = Fixture::new();
    fx.play(&[], ":hint\n:reveal\n:reveal\n:quit\n")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Read the question again carefully.")
                .and(predicate::str::contains("» I agree"))
                .and(predicate::str::contains("Final score: 0/0 correct (0%)")),
        );
}

#[test]
fn play_rejects_out_of_range_choice_without_scoring() {
    let fx = Fixture::new();
    fx.play(&[], "7\nabc\n:quit\n")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Type a number from 1 to 2.")
                .and(predicate::str::contains("Final score: 0/0 correct (0%)")),
        );
}

#[test]
fn play_missing_capabilities_show_notices() {
    let fx = Fixture::new();
    fx.play(&[], ":copy\n:record\n:say\n:frobnicate\n:quit\n")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Copy failed")
                .and(predicate::str::contains("Microphone unavailable"))
                .and(predicate::str::contains("unknown command: :frobnicate")),
        );
}

#[test]
fn play_word_order_editing() {
    let fx = Fixture::new();
    fx.play(&[], ":skip\n:skip\n3 1\n:undo\n:clear\n:check\n1 2 3\n:check\n")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("sentence: agree I")
                .and(predicate::str::contains("Construis d'abord la phrase."))
                .and(predicate::str::contains("Final score: 1/1 correct (100%)")),
        );
}

#[test]
fn play_auto_check() {
    let fx = Fixture::new();
    fx.play(&["--auto-check"], ":skip\n:skip\n1 2 3\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Final score: 1/1 correct (100%)"));
}

#[test]
fn play_rejects_unknown_accent() {
    let fx = Fixture::new();
    fx.play(&["--accent", "klingon"], "")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown accent: klingon"));
}

#[test]
fn play_refuses_invalid_lesson() {
    let fx = Fixture::with_lesson(
        r#"{ "title": "Bad", "questions": [
            { "id": "a", "prompt": "Pick", "kind": "multiple_choice", "choices": [], "correct_index": 0 }
        ] }"#,
    );
    fx.play(&[], "")
        .assert()
        .failure()
        .stderr(predicate::str::contains("run `mc check`"));
}

#[test]
fn play_lang_switches_help_from_next_question() {
    let fx = Fixture::new();
    fx.play(&[], ":lang\n1\nsort of\n")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Help in English from the next question")
                .and(predicate::str::contains("Pas tout à fait."))
                .and(predicate::str::contains("Not quite.")),
        );

    fx.mc("stats", &[])
        .assert()
        .success()
        .stdout(predicate::str::contains("help:       English"));
}

#[test]
fn play_hints_toggle_hides_hints() {
    let fx = Fixture::new();
    fx.play(&[], ":hints\n2\n:hint\n:quit\n")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Hints off from the next question")
                .and(predicate::str::contains("Les indices sont désactivés."))
                .and(predicate::str::contains("Informal, two words.").not()),
        );

    fx.mc("stats", &[])
        .assert()
        .success()
        .stdout(predicate::str::contains("hints:      off"));
}

// ---------------------------------------------------------------------------
// progress: resume / stats / reset
// ---------------------------------------------------------------------------

#[test]
fn play_resumes_saved_progress() {
    let fx = Fixture::new();
    fx.play(&[], "2\n:quit\n").assert().success();

    fx.play(&[], ":quit\n")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Question 2/3")
                .and(predicate::str::contains("Final score: 1/1 correct (100%)")),
        );

    fx.play(&["--fresh"], ":quit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Question 1/3"));
}

#[test]
fn stats_without_progress() {
    let fx = Fixture::new();
    fx.mc("stats", &[])
        .assert()
        .success()
        .stdout(predicate::str::contains("No saved progress."));
}

#[test]
fn stats_after_play() {
    let fx = Fixture::new();
    fx.play(&["--accent", "british"], "2\nsort of\n").assert().success();

    fx.mc("stats", &[])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("1/2 correct (50%)")
                .and(predicate::str::contains("2/3 questions (67%)"))
                .and(predicate::str::contains("British")),
        );
}

#[test]
fn list_marks_completed_questions() {
    let fx = Fixture::new();
    fx.play(&[], "2\n").assert().success();
    fx.mc("list", &[])
        .assert()
        .success()
        .stdout(predicate::str::contains("✓").and(predicate::str::contains("1 answered")));
}

#[test]
fn reset_clears_progress() {
    let fx = Fixture::new();
    fx.play(&[], "2\n").assert().success();

    fx.mc("reset", &[])
        .assert()
        .success()
        .stdout(predicate::str::contains("Progress cleared for 'Agreeing & Disagreeing'"));

    fx.mc("stats", &[])
        .assert()
        .success()
        .stdout(predicate::str::contains("No saved progress."));
}

#[test]
fn progress_file_is_namespaced_by_lesson() {
    let fx = Fixture::new();
    fx.play(&[], "2\n").assert().success();
    let saved = fx.store().join("masterclass.agreeing-disagreeing.progress.json");
    assert!(saved.exists(), "expected {}", path_str(&saved));
}

#[test]
fn corrupt_progress_is_ignored() {
    let fx = Fixture::new();
    fs::create_dir_all(fx.store()).unwrap();
    fs::write(
        fx.store().join("masterclass.agreeing-disagreeing.progress.json"),
        "garbage",
    )
    .unwrap();

    fx.play(&[], ":quit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Question 1/3"));
}
