//! VM creation, power, snapshots and templates.

use crate::command::{Operation, resolve_target};
use crate::process::CommandResult;

use super::VmCli;

/// `VM` module.
pub struct Vm<'a> {
    pub(super) cli: &'a VmCli,
}

impl Vm<'_> {
    /// `VM Create -n <name> -d <dir> [-g <guest type>] [-c <custom guest type>]`
    ///
    /// Never targeted: the VM does not exist yet.
    pub async fn create(
        &self,
        name: &str,
        dir: &str,
        guest_type: Option<&str>,
        custom_guest_type: Option<&str>,
    ) -> CommandResult {
        let op = Operation::new("Create")
            .group("VM")
            .args(["-n", name, "-d", dir])
            .opt_pair("-g", guest_type)
            .opt_pair("-c", custom_guest_type);
        self.cli.execute(op).await
    }
}

/// `Power` module.
pub struct Power<'a> {
    pub(super) cli: &'a VmCli,
}

impl Power<'_> {
    async fn simple(&self, command: &'static str, vm_path: Option<&str>) -> CommandResult {
        let target = resolve_target(vm_path, self.cli.default_vm_path());
        self.cli
            .execute(Operation::new(command).group("Power").target(target))
            .await
    }

    pub async fn query(&self, vm_path: Option<&str>) -> CommandResult {
        self.simple("query", vm_path).await
    }

    pub async fn start(&self, vm_path: Option<&str>) -> CommandResult {
        self.simple("Start", vm_path).await
    }

    pub async fn stop(&self, vm_path: Option<&str>) -> CommandResult {
        self.simple("Stop", vm_path).await
    }

    pub async fn pause(&self, vm_path: Option<&str>) -> CommandResult {
        self.simple("Pause", vm_path).await
    }

    pub async fn reset(&self, vm_path: Option<&str>) -> CommandResult {
        self.simple("Reset", vm_path).await
    }

    pub async fn suspend(&self, vm_path: Option<&str>) -> CommandResult {
        self.simple("Suspend", vm_path).await
    }

    pub async fn unpause(&self, vm_path: Option<&str>) -> CommandResult {
        self.simple("Unpause", vm_path).await
    }
}

/// `Snapshot` module.
pub struct Snapshot<'a> {
    pub(super) cli: &'a VmCli,
}

impl Snapshot<'_> {
    async fn named(&self, command: &'static str, vm_path: Option<&str>, name: Option<&str>) -> CommandResult {
        let target = resolve_target(vm_path, self.cli.default_vm_path());
        let op = Operation::new(command)
            .group("Snapshot")
            .target(target)
            .opt(name);
        self.cli.execute(op).await
    }

    pub async fn query(&self, vm_path: Option<&str>) -> CommandResult {
        self.named("query", vm_path, None).await
    }

    pub async fn take(&self, vm_path: Option<&str>, name: &str) -> CommandResult {
        self.named("Take", vm_path, Some(name)).await
    }

    pub async fn delete(&self, vm_path: Option<&str>, name: &str) -> CommandResult {
        self.named("Delete", vm_path, Some(name)).await
    }

    pub async fn revert(&self, vm_path: Option<&str>, name: &str) -> CommandResult {
        self.named("Revert", vm_path, Some(name)).await
    }

    /// Clone a new VM from snapshot `name`.
    pub async fn clone_from(&self, vm_path: Option<&str>, name: &str) -> CommandResult {
        self.named("Clone", vm_path, Some(name)).await
    }
}

/// `VMTemplate` module.
pub struct Template<'a> {
    pub(super) cli: &'a VmCli,
}

impl Template<'_> {
    /// `<source vmx> VMTemplate Create -p <template path> -n <name>`
    ///
    /// Without `source_vmx` the instance default VM is templated.
    pub async fn create(&self, template_path: &str, name: &str, source_vmx: Option<&str>) -> CommandResult {
        let target = resolve_target(source_vmx, self.cli.default_vm_path());
        let op = Operation::new("Create")
            .group("VMTemplate")
            .target(target)
            .args(["-p", template_path, "-n", name]);
        self.cli.execute(op).await
    }

    pub async fn deploy(&self, template_path: &str) -> CommandResult {
        let op = Operation::new("Deploy")
            .group("VMTemplate")
            .args(["-p", template_path]);
        self.cli.execute(op).await
    }
}
