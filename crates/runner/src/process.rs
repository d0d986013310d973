//! Process Capture
//!
//! Spawns a process, waits for it and keeps everything it printed.

use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, warn};

/// Everything a finished (or unlaunchable) process produced
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Capture {
    /// Captured standard output
    pub stdout: String,
    /// Captured standard error; holds the launch error if the process never started
    pub stderr: String,
    /// Exit code; `None` if the process could not be launched or was killed by a signal
    pub status: Option<i32>,
}

impl Capture {
    /// Exited with status 0
    pub fn success(&self) -> bool {
        self.status == Some(0)
    }

    /// Stdout if anything was printed there, otherwise stderr
    pub fn text(&self) -> &str {
        if self.stdout.is_empty() {
            &self.stderr
        } else {
            &self.stdout
        }
    }

    fn launch_failed(program: &str, err: std::io::Error) -> Self {
        Self {
            stdout: String::new(),
            stderr: format!("{}: {}\n", program, err),
            status: None,
        }
    }
}

/// Run `argv[0]` with the remaining arguments and capture its output.
///
/// An empty `argv` yields an empty capture.
pub async fn capture(argv: &[String], cwd: Option<&Path>) -> Capture {
    let Some((program, args)) = argv.split_first() else {
        return Capture::default();
    };

    debug!("Running: {} {:?}", program, args);

    let mut cmd = Command::new(program);
    cmd.args(args);
    if let Some(dir) = cwd {
        cmd.current_dir(dir);
    }
    run(cmd, program).await
}

/// Run a literal command line through the platform shell and capture its output
pub async fn capture_shell(line: &str) -> Capture {
    debug!("Running shell line: {}", line);

    let (shell, flag) = if cfg!(windows) { ("cmd", "/C") } else { ("sh", "-c") };
    let mut cmd = Command::new(shell);
    cmd.args([flag, line]);
    run(cmd, shell).await
}

async fn run(mut cmd: Command, program: &str) -> Capture {
    cmd.stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    match cmd.output().await {
        Ok(output) => Capture {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            status: output.status.code(),
        },
        Err(e) => {
            warn!("Failed to launch {}: {}", program, e);
            Capture::launch_failed(program, e)
        }
    }
}
