//! `config.toml` loading and client construction.
//!
//! ```toml
//! [vmrun]
//! path = "/Applications/VMware Fusion.app/Contents/Library/vmrun"
//! host_type = "fusion"
//! vm_path = "/Users/me/Virtual Machines.localized/web.vmwarevm/web.vmx"
//! guest_user = "admin"
//! guest_password = "secret"
//!
//! [vmcli]
//! verbose = true
//!
//! [rest]
//! base_url = "http://127.0.0.1:8697"
//! username = "admin"
//! timeout_secs = 30
//! ```
//!
//! Every key is optional. `VMREST_USER`, `VMREST_PASS` and `VMREST_URL`
//! override the `[rest]` table. Tool paths left unset are looked up on
//! `PATH` and in the standard VMware install locations.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use tracing::debug;

use crate::paths::AppPaths;
use crate::process::find_executable;
use crate::rest::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT, RestConfig, VmRest};
use crate::vmcli::{VMCLI_LOCATIONS, VmCli};
use crate::vmrun::{HostType, VMRUN_LOCATIONS, VmRun};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub vmrun: VmRunSection,
    pub vmcli: VmCliSection,
    pub rest: RestSection,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VmRunSection {
    pub path: Option<PathBuf>,
    pub host_type: Option<HostType>,
    pub vm_password: Option<String>,
    pub guest_user: Option<String>,
    pub guest_password: Option<String>,
    pub vm_path: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VmCliSection {
    pub path: Option<PathBuf>,
    pub vm_path: Option<String>,
    pub guest_user: Option<String>,
    pub guest_password: Option<String>,
    pub verbose: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RestSection {
    pub base_url: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("failed to parse config {}", path.display()))
    }

    /// Load `path` if given, else the user config file if it exists, else
    /// defaults. Environment overrides are applied in every case.
    pub fn discover(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::load(path)?,
            None => match AppPaths::resolve().map(|p| p.config_file()) {
                Some(file) if file.is_file() => {
                    debug!(path = %file.display(), "loading config");
                    Self::load(&file)?
                }
                _ => Self::default(),
            },
        };
        config.apply_env_from(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Apply `VMREST_*` overrides using `lookup` as the environment.
    pub fn apply_env_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(user) = lookup("VMREST_USER") {
            self.rest.username = Some(user);
        }
        if let Some(pass) = lookup("VMREST_PASS") {
            self.rest.password = Some(pass);
        }
        if let Some(url) = lookup("VMREST_URL") {
            self.rest.base_url = Some(url);
        }
    }

    pub fn vmrun(&self) -> Result<VmRun> {
        let section = &self.vmrun;
        let path = tool_path("vmrun", section.path.as_deref(), VMRUN_LOCATIONS)?;
        let mut vmrun = VmRun::new(path);
        vmrun
            .set_host_type(section.host_type)
            .set_vm_password(section.vm_password.clone())
            .set_guest_user(section.guest_user.clone())
            .set_guest_password(section.guest_password.clone())
            .set_vm_path(section.vm_path.clone());
        Ok(vmrun)
    }

    pub fn vmcli(&self) -> Result<VmCli> {
        let section = &self.vmcli;
        let path = tool_path("vmcli", section.path.as_deref(), VMCLI_LOCATIONS)?;
        Ok(VmCli::new(path)
            .with_vm_path(section.vm_path.clone())
            .with_guest_credentials(section.guest_user.clone(), section.guest_password.clone())
            .with_verbose(section.verbose))
    }

    pub fn rest_config(&self) -> RestConfig {
        let section = &self.rest;
        RestConfig {
            base_url: section
                .base_url
                .clone()
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_owned()),
            username: section.username.clone(),
            password: section.password.clone(),
            timeout: section
                .timeout_secs
                .map(Duration::from_secs)
                .unwrap_or(DEFAULT_TIMEOUT),
        }
    }

    pub fn rest(&self) -> Result<VmRest> {
        VmRest::new(self.rest_config())
    }
}

/// Configured path if any, else a search of `PATH` and `locations`.
fn tool_path(name: &str, configured: Option<&Path>, locations: &[&str]) -> Result<PathBuf> {
    if let Some(path) = configured {
        return Ok(path.to_path_buf());
    }
    match find_executable(name, locations) {
        Some(path) => {
            debug!(tool = name, path = %path.display(), "found tool binary");
            Ok(path)
        }
        None => bail!(
            "{name} binary not found. Install VMware Fusion or Workstation, \
             or set `path` in the [{name}] table of config.toml."
        ),
    }
}
