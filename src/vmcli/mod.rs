//! Wrapper for `vmcli`, the per-module VM configuration CLI that ships with
//! VMware Fusion.
//!
//! Command shape:
//!
//! ```text
//! vmcli [<vmx>] <Module> <command> [<args>...] [--verbose]
//! ```
//!
//! Each vmcli module is exposed as a grouping object borrowed from
//! [`VmCli`], e.g. `vmcli.chipset().set_vcpu_count(None, 4)`. Booleans are
//! passed as the literal tokens `true` / `false`.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::command::Operation;
use crate::process::{self, CommandResult};

mod guest;
mod hardware;
mod hba;
mod lifecycle;
mod settings;

pub use guest::{Guest, GuestRun};
pub use hardware::{Chipset, Disk, Ethernet, Mks, Serial};
pub use hba::{HostBusAdapter, Nvme, Sata};
pub use lifecycle::{Power, Snapshot, Template, Vm};
pub use settings::{ConfigParams, Hgfs, Tools, VProbes};

/// Installation locations searched after `PATH`.
pub const VMCLI_LOCATIONS: &[&str] = &[
    "/Applications/VMware Fusion.app/Contents/Public",
    "/Applications/VMware Fusion.app/Contents/Library",
    "/usr/bin",
    "/usr/local/bin",
];

/// A configured `vmcli` executable.
#[derive(Debug, Clone)]
pub struct VmCli {
    vmcli_path: PathBuf,
    vm_path: Option<String>,
    guest_user: Option<String>,
    guest_password: Option<String>,
    verbose: bool,
}

impl VmCli {
    pub fn new(vmcli_path: impl Into<PathBuf>) -> Self {
        Self {
            vmcli_path: vmcli_path.into(),
            vm_path: None,
            guest_user: None,
            guest_password: None,
            verbose: false,
        }
    }

    pub fn with_vm_path(mut self, vm_path: Option<String>) -> Self {
        self.vm_path = vm_path;
        self
    }

    /// Credentials for [`Guest`] operations (`-u` / `-p`).
    pub fn with_guest_credentials(mut self, user: Option<String>, password: Option<String>) -> Self {
        self.guest_user = user;
        self.guest_password = password;
        self
    }

    /// Append `--verbose` to every invocation.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn vmcli_path(&self) -> &Path {
        &self.vmcli_path
    }

    pub fn default_vm_path(&self) -> Option<&str> {
        self.vm_path.as_deref()
    }

    pub fn vm(&self) -> Vm<'_> {
        Vm { cli: self }
    }

    pub fn chipset(&self) -> Chipset<'_> {
        Chipset { cli: self }
    }

    pub fn disk(&self) -> Disk<'_> {
        Disk { cli: self }
    }

    pub fn ethernet(&self) -> Ethernet<'_> {
        Ethernet { cli: self }
    }

    pub fn mks(&self) -> Mks<'_> {
        Mks { cli: self }
    }

    pub fn config_params(&self) -> ConfigParams<'_> {
        ConfigParams { cli: self }
    }

    pub fn hgfs(&self) -> Hgfs<'_> {
        Hgfs { cli: self }
    }

    pub fn tools(&self) -> Tools<'_> {
        Tools { cli: self }
    }

    pub fn template(&self) -> Template<'_> {
        Template { cli: self }
    }

    pub fn vprobes(&self) -> VProbes<'_> {
        VProbes { cli: self }
    }

    pub fn guest(&self) -> Guest<'_> {
        Guest { cli: self }
    }

    pub fn power(&self) -> Power<'_> {
        Power { cli: self }
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot { cli: self }
    }

    pub fn nvme(&self) -> Nvme<'_> {
        Nvme { cli: self }
    }

    pub fn sata(&self) -> Sata<'_> {
        Sata { cli: self }
    }

    pub fn serial(&self) -> Serial<'_> {
        Serial { cli: self }
    }

    /// Prefix `op`'s arguments with the configured guest credentials.
    pub(crate) fn with_guest_auth(&self, op: Operation) -> Operation {
        let user = self.guest_user.as_deref().filter(|u| !u.is_empty());
        let password = self.guest_password.as_deref().filter(|p| !p.is_empty());
        op.opt_pair("-u", user).opt_pair("-p", password)
    }

    /// Lower `op` to the full argument list, executable excluded.
    pub fn argv(&self, op: &Operation) -> Vec<String> {
        let mut argv = Vec::with_capacity(op.args.len() + 4);
        if let Some(target) = &op.target {
            argv.push(target.clone());
        }
        if let Some(group) = op.group {
            argv.push(group.to_owned());
        }
        argv.push(op.command.to_owned());
        argv.extend(op.args.iter().cloned());
        if self.verbose {
            argv.push("--verbose".to_owned());
        }
        argv
    }

    pub async fn execute(&self, op: Operation) -> CommandResult {
        debug!(operation = %op, target = ?op.target, "vmcli");
        process::run(&self.vmcli_path, &self.argv(&op), secret_flags(&op)).await
    }
}

/// `-p` carries the guest password only in the Guest module. Elsewhere
/// (`VMTemplate -p <path>`) it is logged as-is.
fn secret_flags(op: &Operation) -> &'static [&'static str] {
    if op.group == Some("Guest") { &["-p"] } else { &[] }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_guest_passwords_are_masked() {
        let cli = VmCli::new("vmcli").with_guest_credentials(Some("admin".into()), Some("pw".into()));
        let guest = cli.with_guest_auth(Operation::new("ls").group("Guest")).arg("/tmp");
        let template = Operation::new("Deploy").group("VMTemplate").args(["-p", "/t/web.vmtx"]);

        assert_eq!(
            process::redact(&cli.argv(&guest), secret_flags(&guest)),
            vec!["Guest", "ls", "-u", "admin", "-p", "***", "/tmp"]
        );
        assert_eq!(
            process::redact(&cli.argv(&template), secret_flags(&template)),
            vec!["VMTemplate", "Deploy", "-p", "/t/web.vmtx"]
        );
    }

    #[test]
    fn target_precedes_module_and_verbose_trails() {
        let cli = VmCli::new("vmcli").with_verbose(true);
        let op = Operation::new("SetVCpuCount")
            .group("Chipset")
            .target(Some("/vms/web.vmx".into()))
            .arg(4);
        assert_eq!(
            cli.argv(&op),
            vec!["/vms/web.vmx", "Chipset", "SetVCpuCount", "4", "--verbose"]
        );
    }

    #[test]
    fn untargeted_operation_starts_with_module() {
        let cli = VmCli::new("vmcli");
        let op = Operation::new("Deploy").group("VMTemplate").arg("-p").arg("/t.vmtx");
        assert_eq!(cli.argv(&op), vec!["VMTemplate", "Deploy", "-p", "/t.vmtx"]);
    }

    #[test]
    fn guest_auth_only_includes_configured_fields() {
        let cli = VmCli::new("vmcli").with_guest_credentials(Some("admin".into()), None);
        let op = cli.with_guest_auth(Operation::new("ls").group("Guest")).arg("/tmp");
        assert_eq!(op.args, vec!["-u", "admin", "/tmp"]);

        let bare = VmCli::new("vmcli");
        let op = bare.with_guest_auth(Operation::new("env").group("Guest"));
        assert!(op.args.is_empty());
    }
}
