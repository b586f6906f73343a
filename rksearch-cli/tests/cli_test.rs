use anyhow::Result;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::{tempdir, TempDir};

fn setup(content: &str) -> Result<(TempDir, PathBuf, PathBuf)> {
    let dir = tempdir()?;
    let input = dir.path().join("input.txt");
    let output = dir.path().join("output.txt");
    fs::write(&input, content)?;
    Ok((dir, input, output))
}

fn rksearch(dir: &TempDir) -> Result<Command> {
    let mut cmd = Command::cargo_bin("rksearch")?;
    cmd.current_dir(dir.path()).env_remove("RUST_LOG");
    Ok(cmd)
}

#[test]
fn test_prompted_search() -> Result<()> {
    let (dir, input, output) = setup("The Quick fox. the quick Fox.")?;

    rksearch(&dir)?
        .arg(&input)
        .arg(&output)
        .write_stdin("fox\n4\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Enter the search string: "))
        .stdout(predicate::str::contains(
            "Enter the radius of visibility of the context: ",
        ))
        .stdout(predicate::str::contains("The results are saved in:"));

    assert_eq!(
        fs::read_to_string(&output)?,
        "A match was found: \"fox\" in the position 10\n\
         Context: ick fox. th\n\
         A match was found: \"fox\" in the position 25\n\
         Context: ick Fox.\n"
    );
    Ok(())
}

#[test]
fn test_flags_skip_prompts() -> Result<()> {
    let (dir, input, output) = setup("ab\ncd")?;

    rksearch(&dir)?
        .arg(&input)
        .arg(&output)
        .args(["--pattern", "CD", "--radius", "0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Enter the").not());

    assert_eq!(
        fs::read_to_string(&output)?,
        "A match was found: \"CD\" in the position 2\nContext: cd\n"
    );
    Ok(())
}

#[test]
fn test_no_matches_sentinel() -> Result<()> {
    let (dir, input, output) = setup("nothing to see here")?;

    rksearch(&dir)?
        .arg(&input)
        .arg(&output)
        .write_stdin("zebra\n3\n")
        .assert()
        .success();

    assert_eq!(fs::read_to_string(&output)?, "No matches were found.\n");
    Ok(())
}

#[test]
fn test_missing_arguments_prints_usage() -> Result<()> {
    let dir = tempdir()?;

    rksearch(&dir)?
        .arg("only-one.txt")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
    Ok(())
}

#[test]
fn test_missing_input_fails_before_prompting() -> Result<()> {
    let dir = tempdir()?;
    let output = dir.path().join("output.txt");

    rksearch(&dir)?
        .arg(dir.path().join("missing.txt"))
        .arg(&output)
        .write_stdin("fox\n1\n")
        .assert()
        .failure()
        .stdout(predicate::str::contains("Enter the search string").not())
        .stderr(predicate::str::contains("File not found"));

    assert!(!output.exists());
    Ok(())
}

#[test]
fn test_empty_pattern_rejected() -> Result<()> {
    let (dir, input, output) = setup("some text")?;

    rksearch(&dir)?
        .arg(&input)
        .arg(&output)
        .write_stdin("\n2\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be empty"));

    assert!(!output.exists());
    Ok(())
}

#[test]
fn test_non_ascii_pattern_rejected() -> Result<()> {
    let (dir, input, output) = setup("caf\u{e9} au lait")?;

    rksearch(&dir)?
        .arg(&input)
        .arg(&output)
        .write_stdin("caf\u{e9}\n2\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("printable ASCII"));

    assert!(!output.exists());
    Ok(())
}

#[test]
fn test_invalid_utf8_pattern_rejected() -> Result<()> {
    let (dir, input, output) = setup("some text")?;

    rksearch(&dir)?
        .arg(&input)
        .arg(&output)
        .write_stdin(vec![b'a', 0xff, b'\n', b'1', b'\n'])
        .assert()
        .failure()
        .stderr(predicate::str::contains("printable ASCII"))
        .stderr(predicate::str::contains("UTF-8").not());

    assert!(!output.exists());
    Ok(())
}

#[test]
fn test_huge_radius_covers_whole_text() -> Result<()> {
    let (dir, input, output) = setup("a fox\nran")?;

    rksearch(&dir)?
        .arg(&input)
        .arg(&output)
        .write_stdin("fox\n9223372036854775807\n")
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(&output)?,
        "A match was found: \"fox\" in the position 2\nContext: a fox\nran\n"
    );
    Ok(())
}

#[test]
fn test_negative_radius_rejected() -> Result<()> {
    let (dir, input, output) = setup("some text")?;

    rksearch(&dir)?
        .arg(&input)
        .arg(&output)
        .write_stdin("text\n-4\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("radius"));

    rksearch(&dir)?
        .arg(&input)
        .arg(&output)
        .args(["-p", "text", "-r", "-4"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("radius"));

    assert!(!output.exists());
    Ok(())
}

#[test]
fn test_non_numeric_radius_rejected() -> Result<()> {
    let (dir, input, output) = setup("some text")?;

    rksearch(&dir)?
        .arg(&input)
        .arg(&output)
        .write_stdin("text\nwide\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("radius"));

    assert!(!output.exists());
    Ok(())
}

#[test]
fn test_unwritable_output_reported() -> Result<()> {
    let (dir, input, _) = setup("fox")?;
    let output = dir.path().join("missing-dir").join("out.txt");

    rksearch(&dir)?
        .arg(&input)
        .arg(&output)
        .args(["-p", "fox", "-r", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Couldn't write"));
    Ok(())
}

#[test]
fn test_json_format_and_russian_locale() -> Result<()> {
    let (dir, input, output) = setup("aaaa")?;

    rksearch(&dir)?
        .arg(&input)
        .arg(&output)
        .args(["-p", "aa", "-r", "0", "--format", "json"])
        .assert()
        .success();

    let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(&output)?)?;
    let positions: Vec<u64> = value["matches"]
        .as_array()
        .map(|m| m.iter().filter_map(|e| e["position"].as_u64()).collect())
        .unwrap_or_default();
    assert_eq!(positions, vec![0, 1, 2]);

    rksearch(&dir)?
        .arg(&input)
        .arg(&output)
        .args(["-p", "zz", "-r", "0", "--locale", "ru"])
        .assert()
        .success();
    assert_eq!(fs::read_to_string(&output)?, "Совпадений не найдено.\n");
    Ok(())
}

#[test]
fn test_config_file_supplies_radius() -> Result<()> {
    let (dir, input, output) = setup("one two three")?;
    let config = dir.path().join("search.yaml");
    fs::write(&config, "radius: 1\nmodulus: 7\n")?;

    rksearch(&dir)?
        .arg(&input)
        .arg(&output)
        .arg("--config")
        .arg(&config)
        .write_stdin("two\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("radius of visibility").not());

    assert_eq!(
        fs::read_to_string(&output)?,
        "A match was found: \"two\" in the position 4\nContext:  two \n"
    );
    Ok(())
}
