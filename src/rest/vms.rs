use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use reqwest::Method;
use serde::Serialize;

use super::{RestResult, VmRest};

/// Body accepted by `PUT /vms/{id}/power`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerOperation {
    On,
    Off,
    Shutdown,
    Suspend,
    Pause,
    Unpause,
}

impl PowerOperation {
    pub fn as_str(self) -> &'static str {
        match self {
            PowerOperation::On => "on",
            PowerOperation::Off => "off",
            PowerOperation::Shutdown => "shutdown",
            PowerOperation::Suspend => "suspend",
            PowerOperation::Pause => "pause",
            PowerOperation::Unpause => "unpause",
        }
    }
}

impl fmt::Display for PowerOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PowerOperation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "on" => PowerOperation::On,
            "off" => PowerOperation::Off,
            "shutdown" => PowerOperation::Shutdown,
            "suspend" => PowerOperation::Suspend,
            "pause" => PowerOperation::Pause,
            "unpause" => PowerOperation::Unpause,
            other => return Err(format!("unknown power operation `{other}`")),
        })
    }
}

#[derive(Serialize)]
struct VmUpdate {
    processors: u32,
    memory: u64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct VmClone<'a> {
    parent_id: &'a str,
    name: &'a str,
    location: &'a str,
}

#[derive(Serialize)]
struct VmRegistration<'a> {
    path: &'a str,
    name: &'a str,
}

#[derive(Serialize)]
struct NicSpec<'a> {
    r#type: &'a str,
    vmnet: &'a str,
}

#[derive(Serialize)]
struct SharedFolderMount<'a> {
    host_path: &'a str,
    guest_path: &'a str,
    flags: u32,
}

#[derive(Serialize)]
struct SharedFolderUpdate<'a> {
    host_path: &'a str,
    flags: u32,
}

/// Endpoints under `/api/vms`.
pub struct Vms<'a> {
    pub(super) rest: &'a VmRest,
}

impl Vms<'_> {
    /// All registered VMs.
    pub async fn list(&self) -> RestResult {
        self.rest.request(Method::GET, "/vms").await
    }

    pub async fn get(&self, vm_id: &str) -> RestResult {
        self.rest.request(Method::GET, &format!("/vms/{vm_id}")).await
    }

    /// Set vCPU count and memory (MB).
    pub async fn update(&self, vm_id: &str, cpu: u32, memory_mb: u64) -> RestResult {
        let body = VmUpdate {
            processors: cpu,
            memory: memory_mb,
        };
        self.rest
            .request_json(Method::PUT, &format!("/vms/{vm_id}"), &body)
            .await
    }

    /// Clone `parent_id` into a new VM called `name` under `location`.
    pub async fn clone_vm(&self, parent_id: &str, name: &str, location: &str) -> RestResult {
        let body = VmClone {
            parent_id,
            name,
            location,
        };
        self.rest.request_json(Method::POST, "/vms", &body).await
    }

    pub async fn delete(&self, vm_id: &str) -> RestResult {
        self.rest
            .request(Method::DELETE, &format!("/vms/{vm_id}"))
            .await
    }

    /// Register an existing VMX file with the library.
    pub async fn register(&self, path: &str, name: &str) -> RestResult {
        let body = VmRegistration { path, name };
        self.rest
            .request_json(Method::POST, "/vms/registration", &body)
            .await
    }

    pub async fn power_state(&self, vm_id: &str) -> RestResult {
        self.rest
            .request(Method::GET, &format!("/vms/{vm_id}/power"))
            .await
    }

    pub async fn set_power_state(&self, vm_id: &str, operation: PowerOperation) -> RestResult {
        self.rest
            .request_text(Method::PUT, &format!("/vms/{vm_id}/power"), operation.as_str())
            .await
    }

    /// Guest IP address (needs VMware Tools running in the guest).
    pub async fn ip(&self, vm_id: &str) -> RestResult {
        self.rest
            .request(Method::GET, &format!("/vms/{vm_id}/ip"))
            .await
    }

    pub async fn nic_ips(&self, vm_id: &str) -> RestResult {
        self.rest
            .request(Method::GET, &format!("/vms/{vm_id}/nicips"))
            .await
    }

    pub async fn list_nics(&self, vm_id: &str) -> RestResult {
        self.rest
            .request(Method::GET, &format!("/vms/{vm_id}/nic"))
            .await
    }

    /// Add a NIC, e.g. `create_nic(id, "bridged", "vmnet0")`.
    pub async fn create_nic(&self, vm_id: &str, nic_type: &str, vmnet: &str) -> RestResult {
        let body = NicSpec {
            r#type: nic_type,
            vmnet,
        };
        self.rest
            .request_json(Method::POST, &format!("/vms/{vm_id}/nic"), &body)
            .await
    }

    pub async fn update_nic(&self, vm_id: &str, index: u32, nic_type: &str, vmnet: &str) -> RestResult {
        let body = NicSpec {
            r#type: nic_type,
            vmnet,
        };
        self.rest
            .request_json(Method::PUT, &format!("/vms/{vm_id}/nic/{index}"), &body)
            .await
    }

    pub async fn delete_nic(&self, vm_id: &str, index: u32) -> RestResult {
        self.rest
            .request(Method::DELETE, &format!("/vms/{vm_id}/nic/{index}"))
            .await
    }

    pub async fn list_shared_folders(&self, vm_id: &str) -> RestResult {
        self.rest
            .request(Method::GET, &format!("/vms/{vm_id}/sharedfolders"))
            .await
    }

    pub async fn mount_shared_folder(
        &self,
        vm_id: &str,
        host_path: &str,
        guest_path: &str,
        flags: u32,
    ) -> RestResult {
        let body = SharedFolderMount {
            host_path,
            guest_path,
            flags,
        };
        self.rest
            .request_json(Method::POST, &format!("/vms/{vm_id}/sharedfolders"), &body)
            .await
    }

    pub async fn update_shared_folder(
        &self,
        vm_id: &str,
        folder_id: &str,
        host_path: &str,
        flags: u32,
    ) -> RestResult {
        let body = SharedFolderUpdate { host_path, flags };
        self.rest
            .request_json(
                Method::PUT,
                &format!("/vms/{vm_id}/sharedfolders/{folder_id}"),
                &body,
            )
            .await
    }

    pub async fn delete_shared_folder(&self, vm_id: &str, folder_id: &str) -> RestResult {
        self.rest
            .request(
                Method::DELETE,
                &format!("/vms/{vm_id}/sharedfolders/{folder_id}"),
            )
            .await
    }

    /// One VMX parameter.
    pub async fn param(&self, vm_id: &str, name: &str) -> RestResult {
        self.rest
            .request(Method::GET, &format!("/vms/{vm_id}/params/{name}"))
            .await
    }

    pub async fn update_params(&self, vm_id: &str, params: &BTreeMap<String, String>) -> RestResult {
        self.rest
            .request_json(Method::PUT, &format!("/vms/{vm_id}/params"), params)
            .await
    }

    pub async fn restrictions(&self, vm_id: &str) -> RestResult {
        self.rest
            .request(Method::GET, &format!("/vms/{vm_id}/restrictions"))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clone_body_uses_parent_id_key() {
        let body = VmClone {
            parent_id: "ABC",
            name: "web-2",
            location: "/vms",
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({"parentId": "ABC", "name": "web-2", "location": "/vms"})
        );
    }

    #[test]
    fn nic_body_has_type_and_vmnet_only() {
        let body = NicSpec {
            r#type: "bridged",
            vmnet: "vmnet0",
        };
        assert_eq!(
            serde_json::to_string(&body).unwrap(),
            r#"{"type":"bridged","vmnet":"vmnet0"}"#
        );
    }

    #[test]
    fn power_operation_parses_its_own_output() {
        for op in [
            PowerOperation::On,
            PowerOperation::Off,
            PowerOperation::Shutdown,
            PowerOperation::Suspend,
            PowerOperation::Pause,
            PowerOperation::Unpause,
        ] {
            assert_eq!(op.as_str().parse::<PowerOperation>(), Ok(op));
        }
        assert!("reboot".parse::<PowerOperation>().is_err());
    }
}
