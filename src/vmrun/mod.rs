//! Wrapper for `vmrun`, the VMware power/guest-operations CLI.
//!
//! Command shape:
//!
//! ```text
//! vmrun [-T <host>] [-vp <vm password>] [-gu <guest user>] [-gp <guest password>]
//!       <command> [<target>] [<args>...]
//! ```
//!
//! The global flags are forwarded on every invocation, with or without a
//! target. Operations are grouped the way the VMware documentation groups
//! them: [`Power`], [`Snapshots`], [`Network`], [`Guest`], [`SharedFolders`]
//! and [`Inventory`].

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::command::Operation;
use crate::process::{self, CommandResult};

mod guest;
mod inventory;
mod network;
mod power;
mod shared_folders;
mod snapshot;

pub use guest::{Guest, ProgramOptions, VariableType};
pub use inventory::{CloneType, Inventory};
pub use network::{AdapterType, Network};
pub use power::Power;
pub use shared_folders::{SharedFolderMode, SharedFolders};
pub use snapshot::Snapshots;

/// Global flags whose value is a password.
const SECRET_FLAGS: &[&str] = &["-vp", "-gp"];

/// Installation locations searched after `PATH`.
pub const VMRUN_LOCATIONS: &[&str] = &[
    "/Applications/VMware Fusion.app/Contents/Library",
    "/Applications/VMware Fusion.app/Contents/Public",
    "/usr/bin",
    "/usr/local/bin",
];

/// Product family passed with `-T`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HostType {
    Ws,
    Fusion,
    Player,
}

impl HostType {
    pub fn as_str(self) -> &'static str {
        match self {
            HostType::Ws => "ws",
            HostType::Fusion => "fusion",
            HostType::Player => "player",
        }
    }
}

impl fmt::Display for HostType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A configured `vmrun` executable.
///
/// Holds only read-only configuration; one instance can be used for any
/// number of VMs by passing an explicit `vm_path` per call.
#[derive(Debug, Clone)]
pub struct VmRun {
    vmrun_path: PathBuf,
    host_type: Option<HostType>,
    vm_password: Option<String>,
    guest_user: Option<String>,
    guest_password: Option<String>,
    vm_path: Option<String>,
}

impl VmRun {
    pub fn new(vmrun_path: impl Into<PathBuf>) -> Self {
        Self {
            vmrun_path: vmrun_path.into(),
            host_type: None,
            vm_password: None,
            guest_user: None,
            guest_password: None,
            vm_path: None,
        }
    }

    pub fn set_vmrun_path(&mut self, vmrun_path: impl Into<PathBuf>) -> &mut Self {
        self.vmrun_path = vmrun_path.into();
        self
    }

    pub fn set_host_type(&mut self, host_type: Option<HostType>) -> &mut Self {
        self.host_type = host_type;
        self
    }

    pub fn set_vm_password(&mut self, vm_password: Option<String>) -> &mut Self {
        self.vm_password = vm_password;
        self
    }

    pub fn set_guest_user(&mut self, guest_user: Option<String>) -> &mut Self {
        self.guest_user = guest_user;
        self
    }

    pub fn set_guest_password(&mut self, guest_password: Option<String>) -> &mut Self {
        self.guest_password = guest_password;
        self
    }

    /// Default VMX path for operations called without one.
    pub fn set_vm_path(&mut self, vm_path: Option<String>) -> &mut Self {
        self.vm_path = vm_path;
        self
    }

    pub fn vmrun_path(&self) -> &Path {
        &self.vmrun_path
    }

    pub fn default_vm_path(&self) -> Option<&str> {
        self.vm_path.as_deref()
    }

    pub fn power(&self) -> Power<'_> {
        Power { vmrun: self }
    }

    pub fn snapshots(&self) -> Snapshots<'_> {
        Snapshots { vmrun: self }
    }

    pub fn network(&self) -> Network<'_> {
        Network { vmrun: self }
    }

    pub fn guest(&self) -> Guest<'_> {
        Guest { vmrun: self }
    }

    pub fn shared_folders(&self) -> SharedFolders<'_> {
        SharedFolders { vmrun: self }
    }

    pub fn inventory(&self) -> Inventory<'_> {
        Inventory { vmrun: self }
    }

    /// Lower `op` to the full argument list, executable excluded.
    pub fn argv(&self, op: &Operation) -> Vec<String> {
        let mut argv = Vec::with_capacity(op.args.len() + 10);

        if let Some(host_type) = self.host_type {
            argv.push("-T".to_owned());
            argv.push(host_type.as_str().to_owned());
        }
        for (flag, value) in [
            ("-vp", &self.vm_password),
            ("-gu", &self.guest_user),
            ("-gp", &self.guest_password),
        ] {
            if let Some(value) = value.as_deref().filter(|v| !v.is_empty()) {
                argv.push(flag.to_owned());
                argv.push(value.to_owned());
            }
        }

        argv.push(op.command.to_owned());
        if let Some(target) = &op.target {
            argv.push(target.clone());
        }
        argv.extend(op.args.iter().cloned());
        argv
    }

    pub async fn execute(&self, op: Operation) -> CommandResult {
        debug!(operation = %op, target = ?op.target, "vmrun");
        process::run(&self.vmrun_path, &self.argv(&op), SECRET_FLAGS).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::resolve_target;

    fn configured() -> VmRun {
        let mut vmrun = VmRun::new("/usr/bin/vmrun");
        vmrun
            .set_host_type(Some(HostType::Fusion))
            .set_vm_password(Some("vmpw".into()))
            .set_guest_user(Some("root".into()))
            .set_guest_password(Some("guestpw".into()));
        vmrun
    }

    #[test]
    fn global_flags_precede_command_and_target() {
        let vmrun = configured();
        let op = Operation::new("start")
            .target(Some("/vms/web.vmx".into()))
            .arg("nogui");
        assert_eq!(
            vmrun.argv(&op),
            vec![
                "-T", "fusion", "-vp", "vmpw", "-gu", "root", "-gp", "guestpw", "start",
                "/vms/web.vmx", "nogui"
            ]
        );
    }

    #[test]
    fn untargeted_command_keeps_flags_and_args() {
        let vmrun = configured();
        let op = Operation::new("listHostNetworks");
        assert_eq!(
            vmrun.argv(&op),
            vec!["-T", "fusion", "-vp", "vmpw", "-gu", "root", "-gp", "guestpw", "listHostNetworks"]
        );
    }

    #[test]
    fn empty_credentials_are_omitted() {
        let mut vmrun = VmRun::new("vmrun");
        vmrun.set_vm_password(Some(String::new()));
        let op = Operation::new("list");
        assert_eq!(vmrun.argv(&op), vec!["list"]);
    }

    #[test]
    fn default_vm_path_is_resolved_by_caller() {
        let mut vmrun = VmRun::new("vmrun");
        vmrun.set_vm_path(Some("/vms/default.vmx".into()));
        let target = resolve_target(None, vmrun.default_vm_path());
        assert_eq!(target.as_deref(), Some("/vms/default.vmx"));
    }

    #[test]
    fn host_type_parses_lowercase() {
        #[derive(Deserialize)]
        struct Wrapper {
            host_type: HostType,
        }
        let w: Wrapper = toml::from_str("host_type = \"ws\"").unwrap();
        assert_eq!(w.host_type, HostType::Ws);
        assert_eq!(HostType::Player.to_string(), "player");
    }
}
