use crate::command::{Operation, resolve_target};
use crate::process::CommandResult;

use super::VmRun;

/// Snapshot operations.
pub struct Snapshots<'a> {
    pub(super) vmrun: &'a VmRun,
}

impl Snapshots<'_> {
    /// `listSnapshots <vmx> [showTree]`
    pub async fn list(&self, vm_path: Option<&str>, show_tree: bool) -> CommandResult {
        let target = resolve_target(vm_path, self.vmrun.default_vm_path());
        let op = Operation::new("listSnapshots")
            .target(target)
            .flag(show_tree, "showTree");
        self.vmrun.execute(op).await
    }

    /// `snapshot <vmx> <name>`
    pub async fn take(&self, vm_path: Option<&str>, name: &str) -> CommandResult {
        let target = resolve_target(vm_path, self.vmrun.default_vm_path());
        let op = Operation::new("snapshot").target(target).arg(name);
        self.vmrun.execute(op).await
    }

    /// `deleteSnapshot <vmx> <name> [andDeleteChildren]`
    pub async fn delete(
        &self,
        vm_path: Option<&str>,
        name: &str,
        and_delete_children: bool,
    ) -> CommandResult {
        let target = resolve_target(vm_path, self.vmrun.default_vm_path());
        let op = Operation::new("deleteSnapshot")
            .target(target)
            .arg(name)
            .flag(and_delete_children, "andDeleteChildren");
        self.vmrun.execute(op).await
    }

    pub async fn revert(&self, vm_path: Option<&str>, name: &str) -> CommandResult {
        let target = resolve_target(vm_path, self.vmrun.default_vm_path());
        let op = Operation::new("revertToSnapshot").target(target).arg(name);
        self.vmrun.execute(op).await
    }
}
