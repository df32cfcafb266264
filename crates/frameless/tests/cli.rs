use std::process::Command;

fn frameless() -> Command {
    Command::new(env!("CARGO_BIN_EXE_frameless"))
}

#[test]
fn help_exits_successfully() {
    // Arrange
    let mut cmd = frameless();
    cmd.arg("--help");

    // Act
    let output = cmd.output().expect("failed to execute frameless");

    // Assert
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("borderless windows"));
}

#[test]
fn version_exits_successfully() {
    // Arrange
    let mut cmd = frameless();
    cmd.arg("--version");

    // Act
    let output = cmd.output().expect("failed to execute frameless");

    // Assert
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("frameless"));
}

#[test]
fn add_requires_a_handle() {
    // Arrange
    let mut cmd = frameless();
    cmd.args(["add", "--preset", "full"]);

    // Act
    let output = cmd.output().expect("failed to execute frameless");

    // Assert
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("--handle"));
}

#[cfg(not(windows))]
#[test]
fn commands_are_unsupported_off_windows() {
    // Arrange
    let mut cmd = frameless();
    cmd.arg("list");

    // Act
    let output = cmd.output().expect("failed to execute frameless");

    // Assert
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unsupported"));
}

#[cfg(windows)]
#[test]
fn list_subcommand_runs() {
    // Arrange
    let mut cmd = frameless();
    cmd.arg("list");

    // Act
    let output = cmd.output().expect("failed to execute frameless");

    // Assert
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("windows found"));
}

#[cfg(windows)]
#[test]
fn monitors_subcommand_lists_a_display() {
    // Arrange
    let mut cmd = frameless();
    cmd.arg("monitors");

    // Act
    let output = cmd.output().expect("failed to execute frameless");

    // Assert
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Display 1"));
}

#[cfg(windows)]
#[test]
fn status_subcommand_runs() {
    // Arrange
    let mut cmd = frameless();
    cmd.arg("status");

    // Act
    let output = cmd.output().expect("failed to execute frameless");

    // Assert
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Frameless is"));
}
