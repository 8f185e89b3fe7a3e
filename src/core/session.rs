use crate::core::{KeepAlive, apply_keep_alive, probe_command, recorded_session_command};
use std::{
    env,
    ffi::OsString,
    io,
    path::{Path, PathBuf},
    process::{Child, Command},
};
use thiserror::Error;

/* =========================== Subsystem dispatch ============================ */

/// Errors surfaced while reaching the subsystem. Command failures inside
/// the subsystem are not errors; they come back as a [`CapturedRun`] with
/// `success == false`.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("WSL launcher not found on PATH")]
    LauncherNotFound,
    #[error("failed to spawn {program}: {source}")]
    Spawn {
        program: String,
        source: io::Error,
    },
    #[error("failed waiting for session to finish: {0}")]
    Wait(io::Error),
}

/// Outcome of a captured (invisible, blocking) run.
#[derive(Clone, Debug)]
pub struct CapturedRun {
    pub success: bool,
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

/// What an interactive session left behind.
#[derive(Clone, Debug)]
pub struct SessionOutcome {
    pub recorded: bool,
    pub transcript: Option<PathBuf>,
}

/// Bridge to the POSIX subsystem: wraps every command in
/// `<launcher> [-d <distro>] -- bash -lc <cmd>` and dispatches it either
/// captured or in a new terminal window.
///
/// One OS process per invocation, no retries; captured calls block the
/// calling thread, so UI hosts should offload them to a worker.
#[derive(Clone, Debug)]
pub struct WslBridge {
    launcher: PathBuf,
    terminal: Option<PathBuf>,
    distro: Option<String>,
}

impl WslBridge {
    /// Find `wsl` on PATH, remembering Windows Terminal if present for
    /// windowed dispatch.
    pub fn locate() -> Result<Self, SessionError> {
        let launcher =
            find_program(&["wsl.exe", "wsl"]).ok_or(SessionError::LauncherNotFound)?;
        Ok(Self {
            launcher,
            terminal: find_program(&["wt.exe", "wt"]),
            distro: None,
        })
    }

    /// Bridge through an explicit launcher, bypassing PATH discovery.
    #[must_use]
    pub fn with_launcher(launcher: PathBuf) -> Self {
        Self {
            launcher,
            terminal: None,
            distro: None,
        }
    }

    /// Target a specific distro instead of the default one.
    #[must_use]
    pub fn with_distro(mut self, distro: impl Into<String>) -> Self {
        self.distro = Some(distro.into());
        self
    }

    fn launcher_args(&self, command: &str) -> Vec<OsString> {
        let mut args: Vec<OsString> = Vec::new();
        if let Some(d) = &self.distro {
            args.push("-d".into());
            args.push(d.into());
        }
        args.push("--".into());
        args.push("bash".into());
        args.push("-lc".into());
        args.push(command.into());
        args
    }

    /// Run a command invisibly, blocking until it exits, and hand back
    /// exit status plus captured output. A non-zero exit is a normal
    /// result, not an error.
    pub fn execute_captured(&self, command: &str) -> Result<CapturedRun, SessionError> {
        log::debug!("captured run: {command}");
        let output = Command::new(&self.launcher)
            .args(self.launcher_args(command))
            .output()
            .map_err(|source| SessionError::Spawn {
                program: self.launcher.display().to_string(),
                source,
            })?;

        let run = CapturedRun {
            success: output.status.success(),
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };
        if !run.success {
            log::debug!("captured run exited with {:?}", run.exit_code);
        }
        Ok(run)
    }

    /// Run a command in a new, visible terminal window and return as soon
    /// as the window process has been started. Completion is only
    /// observable through `keep_alive` behavior inside the window.
    pub fn execute_windowed(
        &self,
        command: &str,
        keep_alive: KeepAlive,
    ) -> Result<(), SessionError> {
        let wrapped = apply_keep_alive(command, keep_alive);
        log::info!("windowed run: {wrapped}");

        if let Some(wt) = &self.terminal {
            let mut cmd = Command::new(wt);
            cmd.arg("wsl");
            if let Some(d) = &self.distro {
                cmd.args(["-d", d]);
            }
            cmd.arg("--").args(["bash", "-lc", &wrapped]);
            cmd.spawn().map_err(|source| SessionError::Spawn {
                program: wt.display().to_string(),
                source,
            })?;
            return Ok(());
        }

        self.spawn_console(&wrapped)?;
        Ok(())
    }

    /// Check whether `tool` exists inside the subsystem via a captured
    /// probe. Spawn failures count as missing.
    #[must_use]
    pub fn probe_tool(&self, tool: &str) -> bool {
        match self.execute_captured(&probe_command(tool)) {
            Ok(run) => run.stdout.contains("OK"),
            Err(err) => {
                log::warn!("probe for {tool} failed: {err}");
                false
            }
        }
    }

    /// Whether the `script` pty recorder is installed in the subsystem.
    #[must_use]
    pub fn recorder_available(&self) -> bool {
        self.probe_tool("script")
    }

    /// Launch `binary` (a WSL path) interactively in a new window, wrapped
    /// in the pty recorder when available, and wait for the window to
    /// close. The transcript is only complete once this returns. Callers
    /// should probe [`WslBridge::recorder_available`] first and pass the
    /// result in; with the recorder missing the session still runs
    /// interactively, just without a transcript.
    pub fn run_recorded_session(
        &self,
        binary: &str,
        transcript: &Path,
        recorder_available: bool,
    ) -> Result<SessionOutcome, SessionError> {
        let command = recorded_session_command(binary, transcript, recorder_available);
        if !recorder_available {
            log::warn!("pty recorder unavailable; session will not be recorded");
        }

        let mut child = self.spawn_console(&command)?;
        child.wait().map_err(SessionError::Wait)?;

        if recorder_available {
            log::info!("interactive session ended, transcript at {}", transcript.display());
            Ok(SessionOutcome {
                recorded: true,
                transcript: Some(transcript.to_path_buf()),
            })
        } else {
            log::info!("interactive session ended (not recorded)");
            Ok(SessionOutcome {
                recorded: false,
                transcript: None,
            })
        }
    }

    #[cfg(windows)]
    fn spawn_console(&self, command: &str) -> Result<Child, SessionError> {
        use std::os::windows::process::CommandExt;
        const CREATE_NEW_CONSOLE: u32 = 0x0000_0010;

        Command::new(&self.launcher)
            .args(self.launcher_args(command))
            .creation_flags(CREATE_NEW_CONSOLE)
            .spawn()
            .map_err(|source| SessionError::Spawn {
                program: self.launcher.display().to_string(),
                source,
            })
    }

    #[cfg(not(windows))]
    fn spawn_console(&self, command: &str) -> Result<Child, SessionError> {
        // No console windows to open here; run in place.
        Command::new(&self.launcher)
            .args(self.launcher_args(command))
            .spawn()
            .map_err(|source| SessionError::Spawn {
                program: self.launcher.display().to_string(),
                source,
            })
    }
}

fn find_program(candidates: &[&str]) -> Option<PathBuf> {
    let path_var = env::var_os("PATH")?;
    for dir in env::split_paths(&path_var) {
        for name in candidates {
            let full = dir.join(name);
            if full.is_file() {
                return Some(full);
            }
        }
    }
    None
}
