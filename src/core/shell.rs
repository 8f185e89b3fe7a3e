use crate::core::{NodeKind, SelectedSource};
use serde::{Deserialize, Serialize};
use std::path::Path;

/* ====================== Cross-environment commands ========================= */

/// C++ standards the compile command accepts, oldest first.
pub const CPP_STANDARDS: [&str; 6] = ["c++98", "c++11", "c++14", "c++17", "c++20", "c++23"];

/// Named compiler toggles. Each maps to exactly one `g++` flag and the
/// emission order is fixed regardless of toggle order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompileOptions {
    pub optimize: bool,
    pub warn_all: bool,
    pub debug_info: bool,
    pub warnings_as_errors: bool,
    pub link_static: bool,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            optimize: false,
            warn_all: true,
            debug_info: true,
            warnings_as_errors: false,
            link_static: false,
        }
    }
}

impl CompileOptions {
    #[must_use]
    pub fn flags(&self) -> Vec<&'static str> {
        let mut flags = Vec::new();
        if self.optimize {
            flags.push("-O2");
        }
        if self.warn_all {
            flags.push("-Wall");
        }
        if self.debug_info {
            flags.push("-g");
        }
        if self.warnings_as_errors {
            flags.push("-Werror");
        }
        if self.link_static {
            flags.push("-static");
        }
        flags
    }
}

/// What the terminal window does once the command inside it finishes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum KeepAlive {
    /// Window closes immediately.
    #[default]
    None,
    /// An interactive shell takes over the window.
    Shell,
    /// A "press any key" prompt holds the window open.
    Pause,
}

/// Map a host-native absolute path to its WSL mount form:
/// `D:\a\b` becomes `/mnt/d/a/b`. Already-POSIX paths pass through
/// unchanged, which also makes the mapping idempotent. Pure string
/// translation; never touches the filesystem.
#[must_use]
pub fn path_to_wsl(path: &Path) -> String {
    let s = path.to_string_lossy();
    if s.starts_with('/') {
        return s.into_owned();
    }

    let mut chars = s.chars();
    if let (Some(drive), Some(':')) = (chars.next(), chars.next())
        && drive.is_ascii_alphabetic()
    {
        let rest = s[2..].replace('\\', "/");
        let rest = rest.trim_start_matches('/');
        return format!("/mnt/{}/{}", drive.to_ascii_lowercase(), rest);
    }

    // Relative or otherwise unprefixed input: just translate separators.
    s.replace('\\', "/")
}

/// Quote one word for `bash -lc`. Safe words come back unchanged.
#[must_use]
pub fn shell_quote(s: &str) -> String {
    // try_quote only fails on interior NUL, which no real path contains.
    shlex::try_quote(s).map_or_else(|_| s.to_string(), |q| q.into_owned())
}

fn output_or_default(output_name: &str) -> &str {
    if output_name.trim().is_empty() {
        "a.out"
    } else {
        output_name
    }
}

/// Assemble the full compile invocation:
/// `cd <root> && g++ <flags> -std=<std> -IHeaders -ISources <sources> -o <out>`.
///
/// Directory sources compile their immediate `*.cpp` children only;
/// nested subdirectories must be checked separately. Same inputs always
/// produce the identical string.
#[must_use]
pub fn build_compile_command(
    root: &Path,
    sources: &[SelectedSource],
    options: &CompileOptions,
    standard: Option<&str>,
    output_name: &str,
) -> String {
    let mut cmd = format!("cd {} && g++", shell_quote(&path_to_wsl(root)));

    for flag in options.flags() {
        cmd.push(' ');
        cmd.push_str(flag);
    }
    if let Some(std) = standard {
        cmd.push_str(" -std=");
        cmd.push_str(std);
    }
    cmd.push_str(" -IHeaders -ISources");

    for source in sources {
        let mapped = shell_quote(&path_to_wsl(&source.path));
        cmd.push(' ');
        cmd.push_str(&mapped);
        if source.kind == NodeKind::Directory {
            // Glob stays outside the quotes so the shell expands it.
            cmd.push_str("/*.cpp");
        }
    }

    cmd.push_str(" -o ");
    cmd.push_str(&shell_quote(output_or_default(output_name)));
    cmd
}

/// `cd <root> && [valgrind --leak-check=full ]./<out>`.
#[must_use]
pub fn build_run_command(root: &Path, output_name: &str, memcheck: bool) -> String {
    let tool = if memcheck {
        "valgrind --leak-check=full "
    } else {
        ""
    };
    format!(
        "cd {} && {}./{}",
        shell_quote(&path_to_wsl(root)),
        tool,
        shell_quote(output_or_default(output_name))
    )
}

/// Wrap a command so the hosting window behaves per `keep_alive` after
/// the command exits.
#[must_use]
pub fn apply_keep_alive(cmd: &str, keep_alive: KeepAlive) -> String {
    match keep_alive {
        KeepAlive::None => cmd.to_string(),
        KeepAlive::Shell => format!("{cmd}; echo; exec bash"),
        KeepAlive::Pause => {
            format!("{cmd}; echo; read -n1 -r -p \"Press any key to exit...\"")
        }
    }
}

/// Run `binary` under the `script` pty recorder, transcript to
/// `transcript` (already in WSL form), then hold the window.
#[must_use]
pub fn build_recorded_command(binary: &str, transcript: &str) -> String {
    format!(
        "script -q -f {} -c {}; echo; read -n1 -s -r -p \"Press any key to close...\"",
        shell_quote(transcript),
        shell_quote(binary)
    )
}

/// Recorder-less fallback: still interactive, still holds the window,
/// produces no transcript.
#[must_use]
pub fn build_unrecorded_command(binary: &str) -> String {
    format!(
        "{}; echo; read -n1 -s -r -p \"Press any key to close...\"",
        shell_quote(binary)
    )
}

/// Pick the recorded or fallback command for an interactive session.
/// `transcript` is a host path; it is mapped to WSL form here.
#[must_use]
pub fn recorded_session_command(
    binary: &str,
    transcript: &Path,
    recorder_available: bool,
) -> String {
    if recorder_available {
        build_recorded_command(binary, &path_to_wsl(transcript))
    } else {
        build_unrecorded_command(binary)
    }
}

/// Captured-mode probe for an optional tool inside the subsystem.
/// Prints `OK` when present, `MISSING` otherwise.
#[must_use]
pub fn probe_command(tool: &str) -> String {
    format!(
        "command -v {} >/dev/null 2>&1 && echo OK || echo MISSING",
        shell_quote(tool)
    )
}
