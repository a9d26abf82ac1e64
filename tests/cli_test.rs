use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::path::Path;
use std::process::Command;

type StdResult = Result<(), Box<dyn std::error::Error>>;

/// `tdrcc generate` followed by `tdrcc run` over the generated capture;
/// checks the three output artifacts land on disk and are non-empty.
#[test]
fn generate_then_run_produces_compressed_preload_and_resync_files() -> StdResult {
    let temp_dir = tempfile::tempdir()?;
    let capture_path = temp_dir.path().join("capture.tdr");

    Command::cargo_bin("tdrcc")?
        .arg("generate")
        .arg("-n").arg("256")
        .arg("-s").arg("7")
        .arg("-o").arg(&capture_path)
        .assert()
        .success();
    assert!(capture_path.exists());

    let out_prefix = temp_dir.path().join("capture");
    Command::cargo_bin("tdrcc")?
        .arg("run")
        .arg("-i").arg(&capture_path)
        .arg("-o").arg(&out_prefix)
        .arg("--stats")
        .assert()
        .success()
        .stderr(predicate::str::contains("CompressorStats"));

    for ext in ["compressed", "preload", "resync"] {
        let path = Path::new(&format!("{}.{ext}", out_prefix.display())).to_path_buf();
        let contents = std::fs::read_to_string(&path)?;
        assert!(!contents.is_empty(), "{ext} file was empty");
    }
    Ok(())
}

/// A deterministic seed must generate the same capture twice, so a golden
/// fixture comparison is reproducible without committing a binary fixture.
#[test]
fn generate_is_reproducible_for_a_fixed_seed() -> StdResult {
    let temp_dir = tempfile::tempdir()?;
    let first = temp_dir.path().join("a.tdr");
    let second = temp_dir.path().join("b.tdr");

    for path in [&first, &second] {
        Command::cargo_bin("tdrcc")?
            .arg("generate")
            .arg("-n").arg("128")
            .arg("-s").arg("42")
            .arg("-o").arg(path)
            .assert()
            .success();
    }

    let a = std::fs::read_to_string(&first)?;
    let b = std::fs::read_to_string(&second)?;
    assert_eq!(a, b);
    Ok(())
}

/// The hex reader rejects any line that isn't exactly 9 characters long.
#[test]
fn run_reports_malformed_hex_input() -> StdResult {
    let temp_dir = tempfile::tempdir()?;
    let capture_path = temp_dir.path().join("bad.hex");
    std::fs::write(&capture_path, "deadbe\n")?;

    let out_prefix = temp_dir.path().join("bad");
    Command::cargo_bin("tdrcc")?
        .arg("run")
        .arg("--hex")
        .arg("-i").arg(&capture_path)
        .arg("-o").arg(&out_prefix)
        .assert()
        .failure();
    Ok(())
}

/// A YAML config overriding `dynamic: false` runs the static-codebook path
/// end to end without requiring any dynamic selector.
#[test]
fn run_honors_a_static_dictionary_config() -> StdResult {
    let temp_dir = tempfile::tempdir()?;
    let capture_path = temp_dir.path().join("capture.tdr");
    Command::cargo_bin("tdrcc")?
        .arg("generate")
        .arg("-n").arg("64")
        .arg("-s").arg("3")
        .arg("-o").arg(&capture_path)
        .assert()
        .success();

    let config_path = temp_dir.path().join("config.yaml");
    std::fs::write(&config_path, "tdr_codec:\n  dynamic: false\n  validate: true\n")?;

    let out_prefix = temp_dir.path().join("out");
    Command::cargo_bin("tdrcc")?
        .arg("run")
        .arg("-i").arg(&capture_path)
        .arg("-o").arg(&out_prefix)
        .arg("-c").arg(&config_path)
        .assert()
        .success();
    Ok(())
}
