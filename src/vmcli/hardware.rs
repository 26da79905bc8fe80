//! Virtual hardware modules: chipset, disks, ethernet, display (MKS) and
//! serial ports.

use crate::command::{Operation, resolve_target};
use crate::process::CommandResult;

use super::VmCli;

/// `Chipset` module: vCPU and memory layout.
pub struct Chipset<'a> {
    pub(super) cli: &'a VmCli,
}

impl Chipset<'_> {
    fn op(&self, command: &'static str, vm_path: Option<&str>) -> Operation {
        Operation::new(command)
            .group("Chipset")
            .target(resolve_target(vm_path, self.cli.default_vm_path()))
    }

    pub async fn query(&self, vm_path: Option<&str>) -> CommandResult {
        self.cli.execute(self.op("query", vm_path)).await
    }

    pub async fn set_vcpu_count(&self, vm_path: Option<&str>, vcpus: u32) -> CommandResult {
        self.cli.execute(self.op("SetVCpuCount", vm_path).arg(vcpus)).await
    }

    /// Memory size in MB.
    pub async fn set_mem_size(&self, vm_path: Option<&str>, size_mb: u64) -> CommandResult {
        self.cli.execute(self.op("SetMemSize", vm_path).arg(size_mb)).await
    }

    pub async fn set_cores_per_socket(&self, vm_path: Option<&str>, cores: u32) -> CommandResult {
        self.cli
            .execute(self.op("SetCoresPerSocket", vm_path).arg(cores))
            .await
    }

    pub async fn set_simultaneous_threads(&self, vm_path: Option<&str>, threads: u32) -> CommandResult {
        self.cli
            .execute(self.op("SetSimultaneousThreads", vm_path).arg(threads))
            .await
    }
}

/// `Disk` module.
pub struct Disk<'a> {
    pub(super) cli: &'a VmCli,
}

impl Disk<'_> {
    fn op(&self, command: &'static str, vm_path: Option<&str>) -> Operation {
        Operation::new(command)
            .group("Disk")
            .target(resolve_target(vm_path, self.cli.default_vm_path()))
    }

    pub async fn query(&self, vm_path: Option<&str>) -> CommandResult {
        self.cli.execute(self.op("query", vm_path)).await
    }

    /// `Disk Create -f <file> -a <adapter> -s <size> -t <disk type>`
    ///
    /// `size` is passed through verbatim (`20GB`, `512MB`).
    pub async fn create(
        &self,
        vm_path: Option<&str>,
        file: &str,
        adapter: &str,
        size: &str,
        disk_type: u32,
    ) -> CommandResult {
        let op = self
            .op("Create", vm_path)
            .args(["-f", file, "-a", adapter, "-s", size, "-t"])
            .arg(disk_type);
        self.cli.execute(op).await
    }

    pub async fn extend(&self, vm_path: Option<&str>, disk_label: &str, new_num_sectors: u64) -> CommandResult {
        let op = self.op("Extend", vm_path).arg(disk_label).arg(new_num_sectors);
        self.cli.execute(op).await
    }

    /// Move a disk between device slots (`sata0:1` to `sata0:2`).
    pub async fn move_slot(&self, vm_path: Option<&str>, from: &str, to: &str) -> CommandResult {
        self.cli.execute(self.op("Move", vm_path).arg(from).arg(to)).await
    }

    pub async fn branch(&self, vm_path: Option<&str>, disk_label: &str) -> CommandResult {
        self.cli.execute(self.op("Branch", vm_path).arg(disk_label)).await
    }

    pub async fn connection_control(&self, vm_path: Option<&str>, disk_label: &str, connected: bool) -> CommandResult {
        let op = self
            .op("ConnectionControl", vm_path)
            .arg(disk_label)
            .toggle(connected);
        self.cli.execute(op).await
    }
}

/// `Ethernet` module.
pub struct Ethernet<'a> {
    pub(super) cli: &'a VmCli,
}

impl Ethernet<'_> {
    fn op(&self, command: &'static str, vm_path: Option<&str>) -> Operation {
        Operation::new(command)
            .group("Ethernet")
            .target(resolve_target(vm_path, self.cli.default_vm_path()))
    }

    pub async fn query(&self, vm_path: Option<&str>) -> CommandResult {
        self.cli.execute(self.op("query", vm_path)).await
    }

    pub async fn set_connection_type(
        &self,
        vm_path: Option<&str>,
        device_label: &str,
        connection_type: &str,
    ) -> CommandResult {
        let op = self
            .op("SetConnectionType", vm_path)
            .arg(device_label)
            .arg(connection_type);
        self.cli.execute(op).await
    }

    pub async fn set_security_policy(
        &self,
        vm_path: Option<&str>,
        device_label: &str,
        no_promisc: bool,
        down_when_addr_mismatch: bool,
        no_forged_src_addr: bool,
    ) -> CommandResult {
        let op = self
            .op("SetSecurityPolicy", vm_path)
            .arg(device_label)
            .toggle(no_promisc)
            .toggle(down_when_addr_mismatch)
            .toggle(no_forged_src_addr);
        self.cli.execute(op).await
    }

    pub async fn set_network_name(&self, vm_path: Option<&str>, device_label: &str, network_name: &str) -> CommandResult {
        let op = self
            .op("SetNetworkName", vm_path)
            .arg(device_label)
            .arg(network_name);
        self.cli.execute(op).await
    }

    pub async fn connection_control(&self, vm_path: Option<&str>, device_label: &str, connected: bool) -> CommandResult {
        let op = self
            .op("ConnectionControl", vm_path)
            .arg(device_label)
            .toggle(connected);
        self.cli.execute(op).await
    }
}

/// `MKS` module: display, keyboard and screen capture.
pub struct Mks<'a> {
    pub(super) cli: &'a VmCli,
}

impl Mks<'_> {
    fn op(&self, command: &'static str, vm_path: Option<&str>) -> Operation {
        Operation::new(command)
            .group("MKS")
            .target(resolve_target(vm_path, self.cli.default_vm_path()))
    }

    pub async fn query(&self, vm_path: Option<&str>) -> CommandResult {
        self.cli.execute(self.op("query", vm_path)).await
    }

    pub async fn capture_screenshot(&self, vm_path: Option<&str>, filename: &str) -> CommandResult {
        self.cli
            .execute(self.op("captureScreenshot", vm_path).arg(filename))
            .await
    }

    /// Send one USB HID key code with a modifier bitmask.
    pub async fn send_key_event(&self, vm_path: Option<&str>, hid_code: u32, modifier: u32) -> CommandResult {
        let op = self.op("sendKeyEvent", vm_path).arg(hid_code).arg(modifier);
        self.cli.execute(op).await
    }

    pub async fn send_key_sequence(&self, vm_path: Option<&str>, sequence: &str) -> CommandResult {
        self.cli
            .execute(self.op("sendKeySequence", vm_path).arg(sequence))
            .await
    }

    pub async fn set_guest_resolution(&self, vm_path: Option<&str>, width: u32, height: u32) -> CommandResult {
        let op = self.op("SetGuestResolution", vm_path).arg(width).arg(height);
        self.cli.execute(op).await
    }

    pub async fn set_num_displays(&self, vm_path: Option<&str>, count: u32) -> CommandResult {
        self.cli.execute(self.op("SetNumDisplays", vm_path).arg(count)).await
    }

    pub async fn set_3d_accel(&self, vm_path: Option<&str>, enabled: bool) -> CommandResult {
        self.cli.execute(self.op("SetAccel3d", vm_path).toggle(enabled)).await
    }

    pub async fn set_vram_size(&self, vm_path: Option<&str>, size_mb: u32) -> CommandResult {
        self.cli.execute(self.op("SetVramSize", vm_path).arg(size_mb)).await
    }

    pub async fn set_graphics_memory(&self, vm_path: Option<&str>, size_kb: u64) -> CommandResult {
        self.cli
            .execute(self.op("SetGraphicsMemoryKB", vm_path).arg(size_kb))
            .await
    }
}

/// `Serial` module.
pub struct Serial<'a> {
    pub(super) cli: &'a VmCli,
}

impl Serial<'_> {
    fn op(&self, command: &'static str, vm_path: Option<&str>) -> Operation {
        Operation::new(command)
            .group("Serial")
            .target(resolve_target(vm_path, self.cli.default_vm_path()))
    }

    async fn labelled_toggle(
        &self,
        command: &'static str,
        vm_path: Option<&str>,
        device_label: &str,
        value: bool,
    ) -> CommandResult {
        let op = self.op(command, vm_path).arg(device_label).toggle(value);
        self.cli.execute(op).await
    }

    pub async fn query(&self, vm_path: Option<&str>) -> CommandResult {
        self.cli.execute(self.op("Query", vm_path)).await
    }

    /// Remove the serial port and its configuration.
    pub async fn purge(&self, vm_path: Option<&str>, device_label: &str) -> CommandResult {
        self.cli.execute(self.op("Purge", vm_path).arg(device_label)).await
    }

    pub async fn connection_control(&self, vm_path: Option<&str>, device_label: &str, op_type: &str) -> CommandResult {
        let op = self
            .op("ConnectionControl", vm_path)
            .arg(device_label)
            .arg(op_type);
        self.cli.execute(op).await
    }

    pub async fn set_allow_guest_control(&self, vm_path: Option<&str>, device_label: &str, allow: bool) -> CommandResult {
        self.labelled_toggle("SetAllowGuestControl", vm_path, device_label, allow)
            .await
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn set_backing_info(
        &self,
        vm_path: Option<&str>,
        device_label: &str,
        backing_type: &str,
        backing_path: &str,
        backing_path_net_proxy: &str,
        pipe_end_point: &str,
        net_end_point: &str,
    ) -> CommandResult {
        let op = self.op("SetBackingInfo", vm_path).args([
            device_label,
            backing_type,
            backing_path,
            backing_path_net_proxy,
            pipe_end_point,
            net_end_point,
        ]);
        self.cli.execute(op).await
    }

    pub async fn set_present(&self, vm_path: Option<&str>, device_label: &str, enabled: bool) -> CommandResult {
        self.labelled_toggle("SetPresent", vm_path, device_label, enabled)
            .await
    }

    /// Takes effect on the next power-on.
    pub async fn start_connected(&self, vm_path: Option<&str>, device_label: &str, start_connected: bool) -> CommandResult {
        self.labelled_toggle("StartConnected", vm_path, device_label, start_connected)
            .await
    }

    pub async fn try_no_rx_loss(&self, vm_path: Option<&str>, device_label: &str, enabled: bool) -> CommandResult {
        self.labelled_toggle("TryNoRxLoss", vm_path, device_label, enabled)
            .await
    }

    pub async fn yield_on_msr_read(&self, vm_path: Option<&str>, device_label: &str, enabled: bool) -> CommandResult {
        self.labelled_toggle("YieldOnMsrRead", vm_path, device_label, enabled)
            .await
    }
}
