//! `Guest` module: file and process operations through VMware Tools.
//!
//! Every command except `query` carries the configured guest credentials
//! (`-u <user> -p <password>`) ahead of its own arguments.

use crate::command::{Operation, resolve_target};
use crate::process::CommandResult;

use super::VmCli;

/// Options for [`Guest::run`].
#[derive(Debug, Clone, Copy, Default)]
pub struct GuestRun<'a> {
    /// `-nw`: return without waiting for the program to exit.
    pub no_wait: bool,
    /// `-aw`
    pub activate_window: bool,
    /// `-i`
    pub interactive: bool,
    /// `-w <dir>`
    pub working_dir: Option<&'a str>,
    /// `-e <VAR=value>`
    pub environment: Option<&'a str>,
}

pub struct Guest<'a> {
    pub(super) cli: &'a VmCli,
}

impl Guest<'_> {
    fn authed(&self, command: &'static str, vm_path: Option<&str>) -> Operation {
        let op = Operation::new(command)
            .group("Guest")
            .target(resolve_target(vm_path, self.cli.default_vm_path()));
        self.cli.with_guest_auth(op)
    }

    pub async fn query(&self, vm_path: Option<&str>) -> CommandResult {
        let target = resolve_target(vm_path, self.cli.default_vm_path());
        let op = Operation::new("query").group("Guest").target(target);
        self.cli.execute(op).await
    }

    pub async fn ls(&self, vm_path: Option<&str>, path: &str) -> CommandResult {
        self.cli.execute(self.authed("ls", vm_path).arg(path)).await
    }

    pub async fn mkdir(&self, vm_path: Option<&str>, path: &str) -> CommandResult {
        self.cli.execute(self.authed("mkdir", vm_path).arg(path)).await
    }

    pub async fn rm(&self, vm_path: Option<&str>, path: &str) -> CommandResult {
        self.cli.execute(self.authed("rm", vm_path).arg(path)).await
    }

    pub async fn rmdir(&self, vm_path: Option<&str>, path: &str) -> CommandResult {
        self.cli.execute(self.authed("rmdir", vm_path).arg(path)).await
    }

    pub async fn mv(&self, vm_path: Option<&str>, src: &str, dst: &str) -> CommandResult {
        self.cli
            .execute(self.authed("mv", vm_path).arg(src).arg(dst))
            .await
    }

    pub async fn mvdir(&self, vm_path: Option<&str>, src: &str, dst: &str) -> CommandResult {
        self.cli
            .execute(self.authed("mvdir", vm_path).arg(src).arg(dst))
            .await
    }

    /// List guest processes, optionally only `pid`.
    pub async fn ps(&self, vm_path: Option<&str>, pid: Option<u32>) -> CommandResult {
        self.cli
            .execute(self.authed("ps", vm_path).opt_pair("-pid", pid))
            .await
    }

    pub async fn kill(&self, vm_path: Option<&str>, pid: u32) -> CommandResult {
        self.cli.execute(self.authed("kill", vm_path).arg(pid)).await
    }

    /// `Guest run [-u -p] [-nw] [-aw] [-i] [-w <dir>] [-e <env>] <program> [<args>...]`
    pub async fn run(
        &self,
        vm_path: Option<&str>,
        program: &str,
        program_args: &[&str],
        options: GuestRun<'_>,
    ) -> CommandResult {
        let op = self
            .authed("run", vm_path)
            .flag(options.no_wait, "-nw")
            .flag(options.activate_window, "-aw")
            .flag(options.interactive, "-i")
            .opt_pair("-w", options.working_dir)
            .opt_pair("-e", options.environment)
            .arg(program)
            .args(program_args);
        self.cli.execute(op).await
    }

    pub async fn copy_from(&self, vm_path: Option<&str>, guest_path: &str, host_path: &str) -> CommandResult {
        let op = self.authed("copyFrom", vm_path).arg(guest_path).arg(host_path);
        self.cli.execute(op).await
    }

    pub async fn copy_to(&self, vm_path: Option<&str>, host_path: &str, guest_path: &str) -> CommandResult {
        let op = self.authed("copyTo", vm_path).arg(host_path).arg(guest_path);
        self.cli.execute(op).await
    }

    pub async fn create_temp_dir(&self, vm_path: Option<&str>) -> CommandResult {
        self.cli.execute(self.authed("createTempDir", vm_path)).await
    }

    pub async fn create_temp_file(&self, vm_path: Option<&str>) -> CommandResult {
        self.cli.execute(self.authed("createTempFile", vm_path)).await
    }

    /// Guest environment variables.
    pub async fn env(&self, vm_path: Option<&str>) -> CommandResult {
        self.cli.execute(self.authed("env", vm_path)).await
    }
}
