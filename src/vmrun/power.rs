use crate::command::{Operation, resolve_target};
use crate::process::CommandResult;

use super::VmRun;

fn mode(hard: bool) -> &'static str {
    if hard { "hard" } else { "soft" }
}

/// Power-state operations: `start`, `stop`, `reset`, `suspend`, `pause`,
/// `unpause`.
pub struct Power<'a> {
    pub(super) vmrun: &'a VmRun,
}

impl Power<'_> {
    /// `start <vmx> gui|nogui`
    pub async fn start(&self, vm_path: Option<&str>, nogui: bool) -> CommandResult {
        let target = resolve_target(vm_path, self.vmrun.default_vm_path());
        let op = Operation::new("start")
            .target(target)
            .arg(if nogui { "nogui" } else { "gui" });
        self.vmrun.execute(op).await
    }

    /// `stop <vmx> hard|soft`
    pub async fn stop(&self, vm_path: Option<&str>, hard: bool) -> CommandResult {
        let target = resolve_target(vm_path, self.vmrun.default_vm_path());
        let op = Operation::new("stop").target(target).arg(mode(hard));
        self.vmrun.execute(op).await
    }

    pub async fn reset(&self, vm_path: Option<&str>, hard: bool) -> CommandResult {
        let target = resolve_target(vm_path, self.vmrun.default_vm_path());
        let op = Operation::new("reset").target(target).arg(mode(hard));
        self.vmrun.execute(op).await
    }

    pub async fn suspend(&self, vm_path: Option<&str>, hard: bool) -> CommandResult {
        let target = resolve_target(vm_path, self.vmrun.default_vm_path());
        let op = Operation::new("suspend").target(target).arg(mode(hard));
        self.vmrun.execute(op).await
    }

    pub async fn pause(&self, vm_path: Option<&str>) -> CommandResult {
        let target = resolve_target(vm_path, self.vmrun.default_vm_path());
        self.vmrun.execute(Operation::new("pause").target(target)).await
    }

    pub async fn unpause(&self, vm_path: Option<&str>) -> CommandResult {
        let target = resolve_target(vm_path, self.vmrun.default_vm_path());
        self.vmrun.execute(Operation::new("unpause").target(target)).await
    }
}
