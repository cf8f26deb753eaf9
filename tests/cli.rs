// assert_cmd::cargo_bin is deprecated but still works
#![allow(deprecated)]

use assert_cmd::prelude::*;
use predicates::prelude::*;
use rstest::rstest;
use std::fs;
use std::process::Command;
use tempfile::tempdir;

type TestResult = Result<(), Box<dyn std::error::Error>>;

#[rstest]
#[case("CCO", 120, 80)]
#[case("c1ccccc1", 64, 64)]
fn render_png(#[case] smiles: &str, #[case] width: u32, #[case] height: u32) -> TestResult {
    let dir = tempdir()?;
    let output = dir.path().join("out.png");
    Command::cargo_bin("molpaint")?
        .arg("render")
        .arg(smiles)
        .arg("-o").arg(&output)
        .arg("--width").arg(width.to_string())
        .arg("--height").arg(height.to_string())
        .assert()
        .success();

    let image = image::open(&output)?;
    assert_eq!((image.width(), image.height()), (width, height));
    Ok(())
}

#[test]
fn render_svg() -> TestResult {
    let dir = tempdir()?;
    let output = dir.path().join("out.svg");
    Command::cargo_bin("molpaint")?
        .arg("render")
        .arg("CC(=O)O")
        .arg("-o").arg(&output)
        .arg("--format").arg("svg")
        .assert()
        .success();

    let svg = fs::read_to_string(&output)?;
    assert!(svg.starts_with("<svg"));
    assert!(svg.contains("<line"));
    Ok(())
}

#[test]
fn render_resized() -> TestResult {
    let dir = tempdir()?;
    let output = dir.path().join("small.png");
    Command::cargo_bin("molpaint")?
        .arg("render")
        .arg("c1ccc2ccccc2c1")
        .arg("-o").arg(&output)
        .arg("--resize").arg("32x24")
        .assert()
        .success();

    let image = image::open(&output)?;
    assert_eq!((image.width(), image.height()), (32, 24));
    Ok(())
}

#[test]
fn svg_cannot_be_resized() -> TestResult {
    let dir = tempdir()?;
    Command::cargo_bin("molpaint")?
        .arg("render")
        .arg("CCO")
        .arg("-o").arg(dir.path().join("out.svg"))
        .arg("--format").arg("svg")
        .arg("--resize").arg("10x10")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--resize"));
    Ok(())
}

#[test]
fn invalid_smiles_fails() -> TestResult {
    let dir = tempdir()?;
    let output = dir.path().join("out.png");
    Command::cargo_bin("molpaint")?
        .arg("render")
        .arg("C1CC")
        .arg("-o").arg(&output)
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid SMILES"));
    assert!(!output.exists());
    Ok(())
}

#[test]
fn options_file_sets_background() -> TestResult {
    let dir = tempdir()?;
    let options = dir.path().join("options.json");
    fs::write(&options, r##"{"background": "#000000", "foreground": "#ffffff"}"##)?;
    let output = dir.path().join("dark.png");
    Command::cargo_bin("molpaint")?
        .arg("render")
        .arg("CC")
        .arg("-o").arg(&output)
        .arg("--width").arg("50")
        .arg("--height").arg("50")
        .arg("--options").arg(&options)
        .assert()
        .success();

    let image = image::open(&output)?.to_rgb8();
    assert_eq!(image.get_pixel(0, 0).0, [0, 0, 0]);
    Ok(())
}

#[test]
fn malformed_options_file_fails() -> TestResult {
    let dir = tempdir()?;
    let options = dir.path().join("options.json");
    fs::write(&options, r#"{"background": "not a colour"}"#)?;
    Command::cargo_bin("molpaint")?
        .arg("render")
        .arg("CC")
        .arg("-o").arg(dir.path().join("out.png"))
        .arg("--options").arg(&options)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse options file"));
    Ok(())
}

#[test]
fn batch_skips_failures() -> TestResult {
    let dir = tempdir()?;
    let input = dir.path().join("input.smi");
    fs::write(&input, "CCO\nnot-a-smiles\n\nc1ccccc1\n")?;
    let output = dir.path().join("images");
    Command::cargo_bin("molpaint")?
        .arg("batch")
        .arg("-i").arg(&input)
        .arg("-o").arg(&output)
        .arg("--width").arg("40")
        .arg("--height").arg("30")
        .assert()
        .success();

    let image = image::open(output.join("0.png"))?;
    assert_eq!((image.width(), image.height()), (40, 30));
    assert!(!output.join("1.png").exists());
    assert!(output.join("2.png").exists());
    Ok(())
}

#[test]
fn batch_missing_input_fails() -> TestResult {
    let dir = tempdir()?;
    Command::cargo_bin("molpaint")?
        .arg("batch")
        .arg("-i").arg(dir.path().join("missing.smi"))
        .arg("-o").arg(dir.path().join("images"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read SMILES file"));
    Ok(())
}
