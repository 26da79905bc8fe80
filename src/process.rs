//! Subprocess execution for the command-line tools.
//!
//! [`run`] never fails: a tool that cannot be launched is reported as a
//! [`CommandResult`] carrying [`LAUNCH_FAILURE_CODE`], and every other exit
//! code is passed through for the caller to interpret.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use serde::{Deserialize, Serialize};
use tokio::process::Command;
use tracing::{debug, warn};

/// Code reported when the executable could not be started at all.
pub const LAUNCH_FAILURE_CODE: i32 = 2;

/// Outcome of one tool invocation. `output` is the tool's raw text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandResult {
    pub code: i32,
    pub output: String,
    pub error: String,
}

impl CommandResult {
    pub fn success(&self) -> bool {
        self.code == 0
    }

    fn launch_failure(program: &Path) -> Self {
        let name = program
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| program.display().to_string());
        Self {
            code: LAUNCH_FAILURE_CODE,
            output: String::new(),
            error: format!("{name} not found"),
        }
    }
}

/// Run `program` with `args`, wait for it to exit and capture both streams.
///
/// The token after any of `secret_flags` is masked in the debug log.
pub async fn run(program: &Path, args: &[String], secret_flags: &[&str]) -> CommandResult {
    debug!(
        program = %program.display(),
        args = ?redact(args, secret_flags),
        "running command"
    );

    let output = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .await;

    let output = match output {
        Ok(output) => output,
        Err(e) => {
            warn!(program = %program.display(), error = %e, "failed to launch command");
            return CommandResult::launch_failure(program);
        }
    };

    // Terminated by a signal.
    let code = output.status.code().unwrap_or(-1);
    let result = CommandResult {
        code,
        output: String::from_utf8_lossy(&output.stdout).trim().to_owned(),
        error: String::from_utf8_lossy(&output.stderr).trim().to_owned(),
    };

    debug!(program = %program.display(), code, "command finished");
    result
}

/// Copy of `args` with the value after each of `secret_flags` masked.
pub fn redact(args: &[String], secret_flags: &[&str]) -> Vec<String> {
    let mut out = Vec::with_capacity(args.len());
    let mut mask_next = false;
    for arg in args {
        if mask_next {
            out.push("***".to_owned());
            mask_next = false;
        } else {
            mask_next = secret_flags.contains(&arg.as_str());
            out.push(arg.clone());
        }
    }
    out
}

/// Locate a tool binary: `PATH` first, then the given install locations.
pub fn find_executable(name: &str, fallbacks: &[&str]) -> Option<PathBuf> {
    if let Some(path_var) = std::env::var_os("PATH") {
        for dir in std::env::split_paths(&path_var) {
            let candidate = dir.join(name);
            if is_executable(&candidate) {
                return Some(candidate);
            }
        }
    }

    fallbacks
        .iter()
        .map(|dir| Path::new(dir).join(name))
        .find(|candidate| is_executable(candidate))
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    std::fs::metadata(path)
        .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_executable_returns_sentinel() {
        let result = run(Path::new("/nonexistent/dir/vmrun"), &["list".into()], &[]).await;
        assert_eq!(result.code, LAUNCH_FAILURE_CODE);
        assert_eq!(result.output, "");
        assert_eq!(result.error, "vmrun not found");
        assert!(!result.success());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn captures_and_trims_stdout() {
        let result = run(Path::new("/bin/echo"), &["  hello".into(), "world".into()], &[]).await;
        assert_eq!(result.code, 0);
        assert_eq!(result.output, "hello world");
        assert_eq!(result.error, "");
        assert!(result.success());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn passes_exit_code_and_stderr_through() {
        let script = "echo partial; echo 'Error: the virtual machine is locked' >&2; exit 255";
        let result = run(Path::new("/bin/sh"), &["-c".into(), script.into()], &[]).await;
        assert_eq!(result.code, 255);
        assert_eq!(result.output, "partial");
        assert_eq!(result.error, "Error: the virtual machine is locked");
    }

    #[test]
    fn redact_masks_password_values() {
        let args: Vec<String> = ["-T", "fusion", "-vp", "s3cret", "-gu", "root", "-gp", "pw", "start"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(
            redact(&args, &["-vp", "-gp"]),
            vec!["-T", "fusion", "-vp", "***", "-gu", "root", "-gp", "***", "start"]
        );
    }

    #[test]
    fn redact_leaves_unlisted_flags_alone() {
        let args: Vec<String> = ["VMTemplate", "Deploy", "-p", "/t/web.vmtx"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(redact(&args, &[]), args);
        assert_eq!(
            redact(&args, &["-p"]),
            vec!["VMTemplate", "Deploy", "-p", "***"]
        );
    }

    #[cfg(unix)]
    fn write_tool(path: &Path, mode: u32) {
        use std::os::unix::fs::PermissionsExt;

        std::fs::write(path, "").unwrap();
        std::fs::set_permissions(path, std::fs::Permissions::from_mode(mode)).unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn find_executable_checks_fallbacks() {
        let dir = tempfile::tempdir().unwrap();
        let tool = dir.path().join("fusion-ctl-test-tool");
        write_tool(&tool, 0o755);

        let found = find_executable(
            "fusion-ctl-test-tool",
            &[dir.path().to_str().unwrap()],
        );
        assert_eq!(found, Some(tool));
        assert_eq!(find_executable("fusion-ctl-test-missing", &["/nonexistent"]), None);
    }

    #[cfg(unix)]
    #[test]
    fn find_executable_skips_files_without_execute_bits() {
        let dir = tempfile::tempdir().unwrap();
        let plain = dir.path().join("fusion-ctl-plain-file");
        write_tool(&plain, 0o644);

        let dirs = [dir.path().to_str().unwrap()];
        assert_eq!(find_executable("fusion-ctl-plain-file", &dirs), None);

        write_tool(&plain, 0o700);
        assert_eq!(find_executable("fusion-ctl-plain-file", &dirs), Some(plain));
    }
}
