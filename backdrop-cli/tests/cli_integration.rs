use assert_cmd::Command;
use predicates::str::contains;
use std::error::Error;
use tempfile::tempdir;

// Helper function to get the path to the compiled binary
fn backdrop_cmd() -> Command {
    let mut cmd = Command::cargo_bin("backdrop").expect("Failed to find backdrop binary");
    cmd.env("NO_COLOR", "1");
    cmd
}

#[test]
fn test_help_lists_options() {
    backdrop_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("--num-output"))
        .stdout(contains("--max-x-shift"))
        .stdout(contains("--min-sampling-duration"))
        .stdout(contains("--seed"));
}

#[test]
fn test_missing_video_fails() -> Result<(), Box<dyn Error>> {
    let output_dir = tempdir()?;

    backdrop_cmd()
        .arg("surely/this/does/not/exist/clip.mp4")
        .arg("--output")
        .arg(output_dir.path())
        .arg("--yes")
        .assert()
        .failure()
        .code(1)
        .stderr(contains("Error: Couldn't find video"));

    Ok(())
}

#[test]
fn test_no_video_without_terminal_quits_cleanly() {
    // stdin is not a terminal here, so no path can be asked for
    backdrop_cmd()
        .write_stdin("")
        .assert()
        .success()
        .stdout(contains("No video given"));
}

#[test]
fn test_invalid_duration_is_rejected() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let video = dir.path().join("clip.mp4");
    std::fs::write(&video, "dummy content")?;

    backdrop_cmd()
        .arg(&video)
        .args(["--dx", "1.5"])
        .assert()
        .failure()
        .stderr(contains("Invalid configuration"));

    Ok(())
}

#[test]
fn test_unsupported_extension_is_rejected() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let video = dir.path().join("clip.mp4");
    std::fs::write(&video, "dummy content")?;

    backdrop_cmd()
        .arg(&video)
        .args(["--ext", "xyz"])
        .assert()
        .failure()
        .stderr(contains("unsupported image extension"));

    Ok(())
}

#[test]
fn test_zero_outputs_is_rejected() {
    backdrop_cmd()
        .args(["clip.mp4", "-n", "0"])
        .assert()
        .failure()
        .stderr(contains("number of outputs must be at least 1"));
}

#[test]
fn test_non_numeric_count_is_a_usage_error() {
    backdrop_cmd()
        .args(["clip.mp4", "-s", "many"])
        .assert()
        .failure()
        .stderr(contains("invalid value 'many'"));
}
