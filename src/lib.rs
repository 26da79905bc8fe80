//! fusion-ctl: host-side automation for VMware Fusion and Workstation.
//!
//! Three independent clients, one per external interface:
//!
//! - [`vmrun::VmRun`] wraps the `vmrun` CLI (power, snapshots, guest
//!   operations, shared folders, networking);
//! - [`vmcli::VmCli`] wraps the `vmcli` CLI (per-module hardware and VMX
//!   configuration);
//! - [`rest::VmRest`] talks to the `vmrest` REST service.
//!
//! CLI calls never fail: they return a [`process::CommandResult`] with the
//! tool's exit code and raw output. REST calls return `Ok(Some(json))`,
//! `Ok(None)` for empty 2xx bodies, or a typed [`rest::RestError`].

pub mod command;
pub mod config;
pub mod logging;
pub mod paths;
pub mod process;
pub mod rest;
pub mod types;
pub mod vmcli;
pub mod vmrun;

pub use command::{Operation, bool_token, resolve_target};
pub use config::Config;
pub use process::{CommandResult, LAUNCH_FAILURE_CODE};
pub use rest::{RestConfig, RestError, RestErrorKind, VmRest};
pub use types::Protocol;
pub use vmcli::VmCli;
pub use vmrun::VmRun;
