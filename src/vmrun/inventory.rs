use std::fmt;

use crate::command::{Operation, resolve_target};
use crate::process::CommandResult;

use super::VmRun;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloneType {
    Full,
    Linked,
}

impl CloneType {
    pub fn as_str(self) -> &'static str {
        match self {
            CloneType::Full => "full",
            CloneType::Linked => "linked",
        }
    }
}

impl fmt::Display for CloneType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Running-VM listing, VM maintenance, cloning and devices.
pub struct Inventory<'a> {
    pub(super) vmrun: &'a VmRun,
}

impl Inventory<'_> {
    /// List running VMs. Never targeted.
    pub async fn list(&self) -> CommandResult {
        self.vmrun.execute(Operation::new("list")).await
    }

    pub async fn upgrade(&self, vm_path: Option<&str>) -> CommandResult {
        let target = resolve_target(vm_path, self.vmrun.default_vm_path());
        self.vmrun.execute(Operation::new("upgradevm").target(target)).await
    }

    pub async fn install_tools(&self, vm_path: Option<&str>) -> CommandResult {
        let target = resolve_target(vm_path, self.vmrun.default_vm_path());
        self.vmrun.execute(Operation::new("installTools").target(target)).await
    }

    pub async fn check_tools_state(&self, vm_path: Option<&str>) -> CommandResult {
        let target = resolve_target(vm_path, self.vmrun.default_vm_path());
        self.vmrun
            .execute(Operation::new("checkToolsState").target(target))
            .await
    }

    /// Delete the VM and its files from disk.
    pub async fn delete(&self, vm_path: Option<&str>) -> CommandResult {
        let target = resolve_target(vm_path, self.vmrun.default_vm_path());
        self.vmrun.execute(Operation::new("deleteVM").target(target)).await
    }

    /// `clone <vmx> <destination> full|linked [-snapshot <name>] [-cloneName <name>]`
    pub async fn clone_vm(
        &self,
        vm_path: Option<&str>,
        destination: &str,
        clone_type: CloneType,
        snapshot: Option<&str>,
        clone_name: Option<&str>,
    ) -> CommandResult {
        let target = resolve_target(vm_path, self.vmrun.default_vm_path());
        let op = Operation::new("clone")
            .target(target)
            .arg(destination)
            .arg(clone_type)
            .opt_pair("-snapshot", snapshot)
            .opt_pair("-cloneName", clone_name);
        self.vmrun.execute(op).await
    }

    pub async fn connect_device(&self, vm_path: Option<&str>, device: &str) -> CommandResult {
        let target = resolve_target(vm_path, self.vmrun.default_vm_path());
        let op = Operation::new("connectNamedDevice").target(target).arg(device);
        self.vmrun.execute(op).await
    }

    pub async fn disconnect_device(&self, vm_path: Option<&str>, device: &str) -> CommandResult {
        let target = resolve_target(vm_path, self.vmrun.default_vm_path());
        let op = Operation::new("disconnectNamedDevice")
            .target(target)
            .arg(device);
        self.vmrun.execute(op).await
    }

    /// Download a Photon OS VM to `destination`.
    pub async fn download_photon_vm(&self, destination: &str) -> CommandResult {
        let op = Operation::new("downloadPhotonVM").target(Some(destination.to_owned()));
        self.vmrun.execute(op).await
    }
}
