//! VMX config entries, shared folders (HGFS), VMware Tools and VProbes.

use crate::command::{Operation, resolve_target};
use crate::process::CommandResult;

use super::VmCli;

/// `ConfigParams` module: raw VMX entries.
pub struct ConfigParams<'a> {
    pub(super) cli: &'a VmCli,
}

impl ConfigParams<'_> {
    pub async fn query(&self, vm_path: Option<&str>) -> CommandResult {
        let target = resolve_target(vm_path, self.cli.default_vm_path());
        let op = Operation::new("query").group("ConfigParams").target(target);
        self.cli.execute(op).await
    }

    pub async fn set_entry(&self, vm_path: Option<&str>, name: &str, value: &str) -> CommandResult {
        let target = resolve_target(vm_path, self.cli.default_vm_path());
        let op = Operation::new("SetEntry")
            .group("ConfigParams")
            .target(target)
            .arg(name)
            .arg(value);
        self.cli.execute(op).await
    }
}

/// `HGFS` module: per-share settings of host shared folders.
pub struct Hgfs<'a> {
    pub(super) cli: &'a VmCli,
}

impl Hgfs<'_> {
    fn op(&self, command: &'static str, vm_path: Option<&str>, share_label: &str) -> Operation {
        Operation::new(command)
            .group("HGFS")
            .target(resolve_target(vm_path, self.cli.default_vm_path()))
            .arg(share_label)
    }

    pub async fn query(&self, vm_path: Option<&str>) -> CommandResult {
        let target = resolve_target(vm_path, self.cli.default_vm_path());
        let op = Operation::new("query").group("HGFS").target(target);
        self.cli.execute(op).await
    }

    pub async fn set_enabled(&self, vm_path: Option<&str>, share_label: &str, enabled: bool) -> CommandResult {
        self.cli
            .execute(self.op("SetEnabled", vm_path, share_label).toggle(enabled))
            .await
    }

    pub async fn set_read_access(&self, vm_path: Option<&str>, share_label: &str, readable: bool) -> CommandResult {
        self.cli
            .execute(self.op("SetReadAccess", vm_path, share_label).toggle(readable))
            .await
    }

    pub async fn set_write_access(&self, vm_path: Option<&str>, share_label: &str, writable: bool) -> CommandResult {
        self.cli
            .execute(self.op("SetWriteAccess", vm_path, share_label).toggle(writable))
            .await
    }

    pub async fn set_follow_symlinks(&self, vm_path: Option<&str>, share_label: &str, follow: bool) -> CommandResult {
        self.cli
            .execute(self.op("SetFollowSymlinks", vm_path, share_label).toggle(follow))
            .await
    }

    pub async fn set_host_path(&self, vm_path: Option<&str>, share_label: &str, host_path: &str) -> CommandResult {
        self.cli
            .execute(self.op("SetHostPath", vm_path, share_label).arg(host_path))
            .await
    }

    /// Name under which the guest sees the share.
    pub async fn set_guest_name(&self, vm_path: Option<&str>, share_label: &str, guest_name: &str) -> CommandResult {
        self.cli
            .execute(self.op("SetGuestName", vm_path, share_label).arg(guest_name))
            .await
    }

    pub async fn set_present(&self, vm_path: Option<&str>, share_label: &str, present: bool) -> CommandResult {
        self.cli
            .execute(self.op("SetPresent", vm_path, share_label).toggle(present))
            .await
    }
}

/// `Tools` module: VMware Tools inside the guest.
pub struct Tools<'a> {
    pub(super) cli: &'a VmCli,
}

impl Tools<'_> {
    pub async fn install(&self, vm_path: Option<&str>) -> CommandResult {
        let target = resolve_target(vm_path, self.cli.default_vm_path());
        let op = Operation::new("Install").group("Tools").target(target);
        self.cli.execute(op).await
    }

    /// `Tools Upgrade [-c <cmdline>] [-bt <backing type>] [-bp <backing path>]`
    pub async fn upgrade(
        &self,
        vm_path: Option<&str>,
        cmdline: Option<&str>,
        backing_type: Option<u32>,
        backing_path: Option<&str>,
    ) -> CommandResult {
        let target = resolve_target(vm_path, self.cli.default_vm_path());
        let op = Operation::new("Upgrade")
            .group("Tools")
            .target(target)
            .opt_pair("-c", cmdline)
            .opt_pair("-bt", backing_type)
            .opt_pair("-bp", backing_path);
        self.cli.execute(op).await
    }

    pub async fn query(&self, vm_path: Option<&str>) -> CommandResult {
        let target = resolve_target(vm_path, self.cli.default_vm_path());
        let op = Operation::new("Query").group("Tools").target(target);
        self.cli.execute(op).await
    }
}

/// `VProbes` module.
pub struct VProbes<'a> {
    pub(super) cli: &'a VmCli,
}

impl VProbes<'_> {
    fn op(&self, command: &'static str, vm_path: Option<&str>) -> Operation {
        Operation::new(command)
            .group("VProbes")
            .target(resolve_target(vm_path, self.cli.default_vm_path()))
    }

    pub async fn query(&self, vm_path: Option<&str>) -> CommandResult {
        self.cli.execute(self.op("Query", vm_path)).await
    }

    /// Load a VProbes script (the script text or a path, as vmcli accepts).
    pub async fn load(&self, vm_path: Option<&str>, script: &str) -> CommandResult {
        self.cli.execute(self.op("Load", vm_path).arg(script)).await
    }

    pub async fn reset(&self, vm_path: Option<&str>) -> CommandResult {
        self.cli.execute(self.op("Reset", vm_path)).await
    }

    pub async fn set_enabled(&self, vm_path: Option<&str>, enabled: bool) -> CommandResult {
        self.cli.execute(self.op("SetEnabled", vm_path).toggle(enabled)).await
    }
}
