//! Host bus adapters: the `Nvme` and `Sata` modules.
//!
//! Both modules accept the same core command set, provided once by
//! [`HostBusAdapter`]. Each family adds its own extra commands on its struct.

use crate::command::{Operation, resolve_target};
use crate::process::CommandResult;

use super::VmCli;

/// Commands common to every vmcli HBA module.
#[allow(async_fn_in_trait)]
pub trait HostBusAdapter {
    /// vmcli module name.
    const MODULE: &'static str;

    fn cli(&self) -> &VmCli;

    fn operation(&self, command: &'static str, vm_path: Option<&str>) -> Operation {
        Operation::new(command)
            .group(Self::MODULE)
            .target(resolve_target(vm_path, self.cli().default_vm_path()))
    }

    async fn query(&self, vm_path: Option<&str>) -> CommandResult {
        self.cli().execute(self.operation("query", vm_path)).await
    }

    /// Remove the adapter and clean out its configuration.
    async fn purge(&self, vm_path: Option<&str>, device_label: &str) -> CommandResult {
        self.cli()
            .execute(self.operation("Purge", vm_path).arg(device_label))
            .await
    }

    async fn move_slot(&self, vm_path: Option<&str>, from: &str, to: &str) -> CommandResult {
        self.cli()
            .execute(self.operation("Move", vm_path).arg(from).arg(to))
            .await
    }

    async fn set_present(&self, vm_path: Option<&str>, device_label: &str, enabled: bool) -> CommandResult {
        let op = self
            .operation("SetPresent", vm_path)
            .arg(device_label)
            .toggle(enabled);
        self.cli().execute(op).await
    }

    async fn set_type(&self, vm_path: Option<&str>, device_label: &str, hba_type: &str) -> CommandResult {
        let op = self
            .operation("SetType", vm_path)
            .arg(device_label)
            .arg(hba_type);
        self.cli().execute(op).await
    }

    async fn set_pci_slot_number(&self, vm_path: Option<&str>, device_label: &str, slot: u32) -> CommandResult {
        let op = self
            .operation("SetPciSlotNumber", vm_path)
            .arg(device_label)
            .arg(slot);
        self.cli().execute(op).await
    }

    async fn set_max_devices(&self, vm_path: Option<&str>, device_label: &str, max_devices: u32) -> CommandResult {
        let op = self
            .operation("SetMaxDevices", vm_path)
            .arg(device_label)
            .arg(max_devices);
        self.cli().execute(op).await
    }

    async fn is_child_present(&self, vm_path: Option<&str>, device_label: &str) -> CommandResult {
        self.cli()
            .execute(self.operation("IsChildPresent", vm_path).arg(device_label))
            .await
    }

    /// First free device address on the adapter.
    async fn find_first_free(&self, vm_path: Option<&str>, device_label: &str) -> CommandResult {
        self.cli()
            .execute(self.operation("FindFirstFree", vm_path).arg(device_label))
            .await
    }
}

/// `Nvme` module.
pub struct Nvme<'a> {
    pub(super) cli: &'a VmCli,
}

impl HostBusAdapter for Nvme<'_> {
    const MODULE: &'static str = "Nvme";

    fn cli(&self) -> &VmCli {
        self.cli
    }
}

impl Nvme<'_> {
    pub async fn set_bus_type(&self, vm_path: Option<&str>, device_label: &str, bus_type: &str) -> CommandResult {
        let op = self
            .operation("SetBusType", vm_path)
            .arg(device_label)
            .arg(bus_type);
        self.cli.execute(op).await
    }
}

/// `Sata` module.
pub struct Sata<'a> {
    pub(super) cli: &'a VmCli,
}

impl HostBusAdapter for Sata<'_> {
    const MODULE: &'static str = "Sata";

    fn cli(&self) -> &VmCli {
        self.cli
    }
}

impl Sata<'_> {
    pub async fn is_present(&self, vm_path: Option<&str>, device_label: &str) -> CommandResult {
        self.cli
            .execute(self.operation("IsPresent", vm_path).arg(device_label))
            .await
    }

    pub async fn has_no_device(&self, vm_path: Option<&str>, device_label: &str) -> CommandResult {
        self.cli
            .execute(self.operation("HasNoDevice", vm_path).arg(device_label))
            .await
    }

    pub async fn set_numa_node(&self, vm_path: Option<&str>, device_label: &str, numa_node: u32) -> CommandResult {
        let op = self
            .operation("SetNumaNode", vm_path)
            .arg(device_label)
            .arg(numa_node);
        self.cli.execute(op).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shared_operations_use_each_family_module() {
        let cli = VmCli::new("vmcli").with_vm_path(Some("/vms/db.vmx".into()));
        let nvme = cli.nvme().operation("Purge", None).arg("nvme0");
        let sata = cli.sata().operation("Purge", None).arg("sata0");

        assert_eq!(cli.argv(&nvme), vec!["/vms/db.vmx", "Nvme", "Purge", "nvme0"]);
        assert_eq!(cli.argv(&sata), vec!["/vms/db.vmx", "Sata", "Purge", "sata0"]);
    }
}
