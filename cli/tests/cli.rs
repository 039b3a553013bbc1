use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const GOLD: &str = "\
外国\t名詞,普通名詞
人\t接尾辞,名詞性
EOS
彼\t代名詞,*
EOS
";

const SYSTEM: &str = "\
外国人\t名詞,普通名詞
EOS
彼\t代名詞,*
EOS
";

fn write_fixtures(dir: &TempDir) -> (String, String) {
    let system = dir.path().join("system.txt");
    let gold = dir.path().join("gold.txt");
    fs::write(&system, SYSTEM).unwrap();
    fs::write(&gold, GOLD).unwrap();
    (
        system.to_string_lossy().into_owned(),
        gold.to_string_lossy().into_owned(),
    )
}

#[test]
fn identity_evaluation_is_perfect() {
    let dir = TempDir::new().unwrap();
    let (_, gold) = write_fixtures(&dir);
    Command::cargo_bin("morpheval")
        .unwrap()
        .args([gold.as_str(), gold.as_str(), "-l", "1"])
        .assert()
        .success()
        .stderr(predicate::str::contains("LEVEL 0: "))
        .stderr(predicate::str::contains("LEVEL 1: "))
        .stderr(predicate::str::contains("(1.0000, 1.0000, 1.0000)"))
        .stdout(predicate::str::is_empty());
}

#[test]
fn segmentation_report_goes_to_stdout() {
    let dir = TempDir::new().unwrap();
    let (system, gold) = write_fixtures(&dir);
    Command::cargo_bin("morpheval")
        .unwrap()
        .args([system.as_str(), gold.as_str(), "-e", "seg", "--no-color"])
        .assert()
        .success()
        .stdout(predicate::str::contains("# 外国人"))
        .stdout(predicate::str::contains("[外国 人 ->  外国人]"))
        .stderr(predicate::str::contains("LEVEL 0: "));
}

#[test]
fn vocabulary_split_adds_seen_and_unseen_lines() {
    let dir = TempDir::new().unwrap();
    let (system, gold) = write_fixtures(&dir);
    let train = dir.path().join("train.txt");
    fs::write(&train, "彼\t代名詞,*\nEOS\n").unwrap();
    Command::cargo_bin("morpheval")
        .unwrap()
        .args([
            system.as_str(),
            gold.as_str(),
            "-t",
            train.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stderr(predicate::str::contains("(seen)"))
        .stderr(predicate::str::contains("(unseen)"));
}

#[test]
fn malformed_corpus_aborts_with_line_number() {
    let dir = TempDir::new().unwrap();
    let (_, gold) = write_fixtures(&dir);
    let broken = dir.path().join("broken.txt");
    fs::write(&broken, "外国\t名詞\nno separator here\nEOS\n").unwrap();
    Command::cargo_bin("morpheval")
        .unwrap()
        .args([broken.to_str().unwrap(), gold.as_str()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("line 2"));
}

#[test]
fn mismatched_corpora_abort() {
    let dir = TempDir::new().unwrap();
    let (_, gold) = write_fixtures(&dir);
    let short = dir.path().join("short.txt");
    fs::write(&short, "外国人\t名詞\nEOS\n").unwrap();
    Command::cargo_bin("morpheval")
        .unwrap()
        .args([short.to_str().unwrap(), gold.as_str()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("sentences"));
}

#[test]
fn train_and_dictionary_are_mutually_exclusive() {
    let dir = TempDir::new().unwrap();
    let (system, gold) = write_fixtures(&dir);
    Command::cargo_bin("morpheval")
        .unwrap()
        .args([
            system.as_str(),
            gold.as_str(),
            "-t",
            "a.txt",
            "-d",
            "b.csv",
        ])
        .assert()
        .failure();
}
