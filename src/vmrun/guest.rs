//! Guest operations. These go through VMware Tools and need guest
//! credentials (`-gu`/`-gp`) configured on the [`VmRun`].

use std::fmt;

use crate::command::{Operation, resolve_target};
use crate::process::CommandResult;

use super::VmRun;

/// Switches accepted by `runProgramInGuest` and `runScriptInGuest`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProgramOptions {
    /// Return as soon as the program starts.
    pub no_wait: bool,
    pub active_window: bool,
    pub interactive: bool,
}

impl ProgramOptions {
    fn apply(self, op: Operation) -> Operation {
        op.flag(self.no_wait, "-noWait")
            .flag(self.active_window, "-activeWindow")
            .flag(self.interactive, "-interactive")
    }
}

/// Namespace of `readVariable` / `writeVariable`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariableType {
    RuntimeConfig,
    GuestEnv,
    GuestVar,
}

impl VariableType {
    pub fn as_str(self) -> &'static str {
        match self {
            VariableType::RuntimeConfig => "runtimeConfig",
            VariableType::GuestEnv => "guestEnv",
            VariableType::GuestVar => "guestVar",
        }
    }
}

impl fmt::Display for VariableType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub struct Guest<'a> {
    pub(super) vmrun: &'a VmRun,
}

impl Guest<'_> {
    async fn with_paths(
        &self,
        command: &'static str,
        vm_path: Option<&str>,
        paths: &[&str],
    ) -> CommandResult {
        let target = resolve_target(vm_path, self.vmrun.default_vm_path());
        let op = Operation::new(command).target(target).args(paths);
        self.vmrun.execute(op).await
    }

    /// `runProgramInGuest <vmx> [switches] <program> [<args>...]`
    pub async fn run_program(
        &self,
        vm_path: Option<&str>,
        program: &str,
        options: ProgramOptions,
        program_args: &[&str],
    ) -> CommandResult {
        let target = resolve_target(vm_path, self.vmrun.default_vm_path());
        let op = options
            .apply(Operation::new("runProgramInGuest").target(target))
            .arg(program)
            .args(program_args);
        self.vmrun.execute(op).await
    }

    /// `runScriptInGuest <vmx> [switches] <interpreter> <script text>`
    pub async fn run_script(
        &self,
        vm_path: Option<&str>,
        interpreter: &str,
        script: &str,
        options: ProgramOptions,
    ) -> CommandResult {
        let target = resolve_target(vm_path, self.vmrun.default_vm_path());
        let op = options
            .apply(Operation::new("runScriptInGuest").target(target))
            .arg(interpreter)
            .arg(script);
        self.vmrun.execute(op).await
    }

    pub async fn file_exists(&self, vm_path: Option<&str>, path: &str) -> CommandResult {
        self.with_paths("fileExistsInGuest", vm_path, &[path]).await
    }

    pub async fn directory_exists(&self, vm_path: Option<&str>, path: &str) -> CommandResult {
        self.with_paths("directoryExistsInGuest", vm_path, &[path]).await
    }

    pub async fn delete_file(&self, vm_path: Option<&str>, path: &str) -> CommandResult {
        self.with_paths("deleteFileInGuest", vm_path, &[path]).await
    }

    pub async fn create_directory(&self, vm_path: Option<&str>, path: &str) -> CommandResult {
        self.with_paths("createDirectoryInGuest", vm_path, &[path]).await
    }

    pub async fn delete_directory(&self, vm_path: Option<&str>, path: &str) -> CommandResult {
        self.with_paths("deleteDirectoryInGuest", vm_path, &[path]).await
    }

    pub async fn create_temp_file(&self, vm_path: Option<&str>) -> CommandResult {
        self.with_paths("createTempfileInGuest", vm_path, &[]).await
    }

    pub async fn list_directory(&self, vm_path: Option<&str>, path: &str) -> CommandResult {
        self.with_paths("listDirectoryInGuest", vm_path, &[path]).await
    }

    pub async fn copy_to_guest(
        &self,
        vm_path: Option<&str>,
        host_path: &str,
        guest_path: &str,
    ) -> CommandResult {
        self.with_paths("CopyFileFromHostToGuest", vm_path, &[host_path, guest_path])
            .await
    }

    pub async fn copy_from_guest(
        &self,
        vm_path: Option<&str>,
        guest_path: &str,
        host_path: &str,
    ) -> CommandResult {
        self.with_paths("CopyFileFromGuestToHost", vm_path, &[guest_path, host_path])
            .await
    }

    pub async fn rename_file(
        &self,
        vm_path: Option<&str>,
        original: &str,
        new_name: &str,
    ) -> CommandResult {
        self.with_paths("renameFileInGuest", vm_path, &[original, new_name])
            .await
    }

    pub async fn list_processes(&self, vm_path: Option<&str>) -> CommandResult {
        self.with_paths("listProcessesInGuest", vm_path, &[]).await
    }

    pub async fn kill_process(&self, vm_path: Option<&str>, pid: u32) -> CommandResult {
        let target = resolve_target(vm_path, self.vmrun.default_vm_path());
        let op = Operation::new("killProcessInGuest").target(target).arg(pid);
        self.vmrun.execute(op).await
    }

    pub async fn type_keystrokes(&self, vm_path: Option<&str>, keystrokes: &str) -> CommandResult {
        self.with_paths("typeKeystrokesInGuest", vm_path, &[keystrokes])
            .await
    }

    /// Save a PNG of the guest console to `host_path`.
    pub async fn capture_screen(&self, vm_path: Option<&str>, host_path: &str) -> CommandResult {
        self.with_paths("captureScreen", vm_path, &[host_path]).await
    }

    pub async fn read_variable(
        &self,
        vm_path: Option<&str>,
        variable_type: VariableType,
        name: &str,
    ) -> CommandResult {
        let target = resolve_target(vm_path, self.vmrun.default_vm_path());
        let op = Operation::new("readVariable")
            .target(target)
            .arg(variable_type)
            .arg(name);
        self.vmrun.execute(op).await
    }

    pub async fn write_variable(
        &self,
        vm_path: Option<&str>,
        variable_type: VariableType,
        name: &str,
        value: &str,
    ) -> CommandResult {
        let target = resolve_target(vm_path, self.vmrun.default_vm_path());
        let op = Operation::new("writeVariable")
            .target(target)
            .arg(variable_type)
            .arg(name)
            .arg(value);
        self.vmrun.execute(op).await
    }

    /// `getGuestIPAddress <vmx> [-wait]`
    pub async fn ip_address(&self, vm_path: Option<&str>, wait: bool) -> CommandResult {
        let target = resolve_target(vm_path, self.vmrun.default_vm_path());
        let op = Operation::new("getGuestIPAddress")
            .target(target)
            .flag(wait, "-wait");
        self.vmrun.execute(op).await
    }
}
