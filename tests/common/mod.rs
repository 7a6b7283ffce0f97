use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};
use std::time::{SystemTime, UNIX_EPOCH};

pub struct CmdResult {
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
    pub log_path: PathBuf,
}

/// Env vars the binary reads; cleared per case so the runner's environment
/// cannot leak in. Cases opt back in through the `envs` parameter.
const CONFIG_ENV_VARS: [&str; 5] = [
    "DISTCLEAN_CLEANER_ROOT_DIR",
    "DISTCLEAN_CLEANER_NESTED_DIR",
    "DISTCLEAN_CLEANER_DRY_RUN",
    "DISTCLEAN_PATTERNS_FORBIDDEN",
    "DISTCLEAN_OUTPUT_FORMAT",
];

fn now_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_millis())
}

fn sanitize(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

fn resolve_bin_path() -> PathBuf {
    if let Ok(path) = std::env::var("CARGO_BIN_EXE_distclean") {
        return PathBuf::from(path);
    }

    let exe_name = if cfg!(windows) {
        "distclean.exe"
    } else {
        "distclean"
    };
    let fallback = std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(PathBuf::from))
        .and_then(|deps| deps.parent().map(PathBuf::from))
        .map(|debug_dir| debug_dir.join(exe_name));

    match fallback {
        Some(path) if path.exists() => path,
        _ => panic!("unable to resolve distclean binary path for integration test"),
    }
}

/// Run the binary from `cwd` with per-case env vars, capturing output plus a
/// log file for post-mortem inspection.
///
/// HOME points at `cwd` so a developer's real config file cannot leak into
/// the case; pass `envs` to set DISTCLEAN_* variables deliberately.
pub fn run_cli_case(
    case_name: &str,
    args: &[&str],
    cwd: &Path,
    envs: &[(&str, &str)],
) -> CmdResult {
    let root = std::env::temp_dir().join("distclean-test-logs");
    fs::create_dir_all(&root).expect("create temp test log dir");

    let log_path = root.join(format!("{}-{}.log", sanitize(case_name), now_millis()));
    let bin_path = resolve_bin_path();

    let mut command = Command::new(&bin_path);
    command
        .args(args)
        .current_dir(cwd)
        .env("HOME", cwd)
        .env("RUST_BACKTRACE", "1");
    for name in CONFIG_ENV_VARS {
        command.env_remove(name);
    }
    for (name, value) in envs {
        command.env(name, value);
    }

    let output = command.output().expect("execute distclean command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();

    let mut log_content = String::new();
    log_content.push_str(&format!("case={case_name}\n"));
    log_content.push_str(&format!("bin={}\n", bin_path.display()));
    log_content.push_str(&format!("args={args:?}\n"));
    log_content.push_str(&format!("cwd={}\n", cwd.display()));
    log_content.push_str(&format!("status={}\n", output.status));
    log_content.push_str("----- stdout -----\n");
    log_content.push_str(&stdout);
    log_content.push('\n');
    log_content.push_str("----- stderr -----\n");
    log_content.push_str(&stderr);
    log_content.push('\n');
    fs::write(&log_path, log_content).expect("write test log");

    CmdResult {
        status: output.status,
        stdout,
        stderr,
        log_path,
    }
}

/// Create a small file, creating parent directories as needed.
pub fn touch(path: &Path) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent dirs");
    }
    fs::write(path, b"artifact").expect("write fixture file");
}
