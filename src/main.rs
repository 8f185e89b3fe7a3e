use anyhow::{Context, Result, bail};
use std::path::PathBuf;

use nopaste::core::{
    CPP_STANDARDS, FileTree, KeepAlive, WslBridge, build_compile_command, build_run_command,
    default_settings_path, load_settings, path_to_wsl,
};

const USAGE: &str = "usage: nopaste <compile|run|run-valgrind|record> [settings.json]";

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let action = args.next().context(USAGE)?;
    let settings_path = args
        .next()
        .map_or_else(default_settings_path, PathBuf::from);

    let settings = load_settings(&settings_path).unwrap_or_default();
    let root = settings
        .root_directory
        .clone()
        .context("no project directory in settings; select one first")?;

    let mut tree = FileTree::new();
    if !tree.set_root(&root) {
        bail!("project directory {} is not accessible", root.display());
    }
    tree.restore_checked(&settings.checked_paths);

    let bridge = WslBridge::locate()?;

    match action.as_str() {
        "compile" => {
            let sources = tree.checked_sources();
            if sources.is_empty() {
                bail!("no files selected");
            }
            let standard = if CPP_STANDARDS.contains(&settings.cpp_standard.as_str()) {
                settings.cpp_standard.as_str()
            } else {
                log::warn!(
                    "unknown C++ standard {:?} in settings, using c++17",
                    settings.cpp_standard
                );
                "c++17"
            };
            let cmd = build_compile_command(
                &root,
                &sources,
                &settings.options,
                Some(standard),
                &settings.output_file_name,
            );
            log::info!("compiling inside WSL: {cmd}");
            bridge.execute_windowed(&cmd, KeepAlive::Pause)?;
        }
        "run" | "run-valgrind" => {
            let cmd = build_run_command(&root, &settings.output_file_name, action == "run-valgrind");
            bridge.execute_windowed(&cmd, KeepAlive::Pause)?;
        }
        "record" => {
            let recorder = bridge.recorder_available();
            if !recorder {
                log::warn!(
                    "`script` not found in WSL; install util-linux to enable recording"
                );
            }
            let root_wsl = path_to_wsl(&root);
            let output = if settings.output_file_name.trim().is_empty() {
                "a.out"
            } else {
                settings.output_file_name.as_str()
            };
            let binary = format!("{}/{}", root_wsl.trim_end_matches('/'), output);
            let transcript = root.join("session_record.txt");
            let outcome = bridge.run_recorded_session(&binary, &transcript, recorder)?;
            if let Some(path) = outcome.transcript {
                println!("Recording saved to: {}", path.display());
            }
        }
        other => bail!("unknown action `{other}`\n{USAGE}"),
    }

    Ok(())
}
