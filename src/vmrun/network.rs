use std::fmt;

use crate::command::{Operation, resolve_target};
use crate::process::CommandResult;
use crate::types::Protocol;

use super::VmRun;

/// Connection type of a virtual network adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdapterType {
    Bridged,
    Nat,
    HostOnly,
    Custom,
}

impl AdapterType {
    pub fn as_str(self) -> &'static str {
        match self {
            AdapterType::Bridged => "bridged",
            AdapterType::Nat => "nat",
            AdapterType::HostOnly => "hostonly",
            AdapterType::Custom => "custom",
        }
    }
}

impl fmt::Display for AdapterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// VM network adapters, host networks and NAT port forwarding.
///
/// Host-network commands target the network name (`vmnet8`) rather than a
/// VMX path, so they never fall back to the default VM.
pub struct Network<'a> {
    pub(super) vmrun: &'a VmRun,
}

impl Network<'_> {
    pub async fn list_adapters(&self, vm_path: Option<&str>) -> CommandResult {
        let target = resolve_target(vm_path, self.vmrun.default_vm_path());
        self.vmrun
            .execute(Operation::new("listNetworkAdapters").target(target))
            .await
    }

    /// `addNetworkAdapter <vmx> <type> [<host network>]`
    pub async fn add_adapter(
        &self,
        vm_path: Option<&str>,
        adapter_type: AdapterType,
        host_network: Option<&str>,
    ) -> CommandResult {
        let target = resolve_target(vm_path, self.vmrun.default_vm_path());
        let op = Operation::new("addNetworkAdapter")
            .target(target)
            .arg(adapter_type)
            .opt(host_network);
        self.vmrun.execute(op).await
    }

    /// `setNetworkAdapter <vmx> <index> <type> [<host network>]`
    pub async fn set_adapter(
        &self,
        vm_path: Option<&str>,
        index: u32,
        adapter_type: AdapterType,
        host_network: Option<&str>,
    ) -> CommandResult {
        let target = resolve_target(vm_path, self.vmrun.default_vm_path());
        let op = Operation::new("setNetworkAdapter")
            .target(target)
            .arg(index)
            .arg(adapter_type)
            .opt(host_network);
        self.vmrun.execute(op).await
    }

    pub async fn delete_adapter(&self, vm_path: Option<&str>, index: u32) -> CommandResult {
        let target = resolve_target(vm_path, self.vmrun.default_vm_path());
        let op = Operation::new("deleteNetworkAdapter")
            .target(target)
            .arg(index);
        self.vmrun.execute(op).await
    }

    pub async fn list_host_networks(&self) -> CommandResult {
        self.vmrun.execute(Operation::new("listHostNetworks")).await
    }

    pub async fn list_port_forwardings(&self, host_network: &str) -> CommandResult {
        let op = Operation::new("listPortForwardings").target(Some(host_network.to_owned()));
        self.vmrun.execute(op).await
    }

    /// `setPortForwarding <network> <protocol> <host port> <guest ip> <guest port> [<description>]`
    pub async fn set_port_forwarding(
        &self,
        host_network: &str,
        protocol: Protocol,
        host_port: u16,
        guest_ip: &str,
        guest_port: u16,
        description: Option<&str>,
    ) -> CommandResult {
        let op = Operation::new("setPortForwarding")
            .target(Some(host_network.to_owned()))
            .arg(protocol)
            .arg(host_port)
            .arg(guest_ip)
            .arg(guest_port)
            .opt(description);
        self.vmrun.execute(op).await
    }

    pub async fn delete_port_forwarding(
        &self,
        host_network: &str,
        protocol: Protocol,
        host_port: u16,
    ) -> CommandResult {
        let op = Operation::new("deletePortForwarding")
            .target(Some(host_network.to_owned()))
            .arg(protocol)
            .arg(host_port);
        self.vmrun.execute(op).await
    }
}
