use std::fmt;

use crate::command::{Operation, resolve_target};
use crate::process::CommandResult;

use super::VmRun;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SharedFolderMode {
    Writable,
    ReadOnly,
}

impl SharedFolderMode {
    pub fn as_str(self) -> &'static str {
        match self {
            SharedFolderMode::Writable => "writable",
            SharedFolderMode::ReadOnly => "readonly",
        }
    }
}

impl fmt::Display for SharedFolderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Host-to-guest shared folders.
pub struct SharedFolders<'a> {
    pub(super) vmrun: &'a VmRun,
}

impl SharedFolders<'_> {
    /// `enableSharedFolders <vmx> [runtime]`
    pub async fn enable(&self, vm_path: Option<&str>, runtime: bool) -> CommandResult {
        let target = resolve_target(vm_path, self.vmrun.default_vm_path());
        let op = Operation::new("enableSharedFolders")
            .target(target)
            .flag(runtime, "runtime");
        self.vmrun.execute(op).await
    }

    pub async fn disable(&self, vm_path: Option<&str>, runtime: bool) -> CommandResult {
        let target = resolve_target(vm_path, self.vmrun.default_vm_path());
        let op = Operation::new("disableSharedFolders")
            .target(target)
            .flag(runtime, "runtime");
        self.vmrun.execute(op).await
    }

    pub async fn add(&self, vm_path: Option<&str>, share_name: &str, host_path: &str) -> CommandResult {
        let target = resolve_target(vm_path, self.vmrun.default_vm_path());
        let op = Operation::new("addSharedFolder")
            .target(target)
            .arg(share_name)
            .arg(host_path);
        self.vmrun.execute(op).await
    }

    pub async fn remove(&self, vm_path: Option<&str>, share_name: &str) -> CommandResult {
        let target = resolve_target(vm_path, self.vmrun.default_vm_path());
        let op = Operation::new("removeSharedFolder")
            .target(target)
            .arg(share_name);
        self.vmrun.execute(op).await
    }

    /// `setSharedFolderState <vmx> <share> <host path> writable|readonly`
    pub async fn set_state(
        &self,
        vm_path: Option<&str>,
        share_name: &str,
        host_path: &str,
        mode: SharedFolderMode,
    ) -> CommandResult {
        let target = resolve_target(vm_path, self.vmrun.default_vm_path());
        let op = Operation::new("setSharedFolderState")
            .target(target)
            .arg(share_name)
            .arg(host_path)
            .arg(mode);
        self.vmrun.execute(op).await
    }
}
