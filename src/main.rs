//! fusion-ctl: command-line front end for the vmrun, vmcli and vmrest
//! clients.
//!
//! Tool output is printed as-is and the process exits with the tool's exit
//! code. REST responses are printed as pretty JSON.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;

use fusion_ctl::rest::{PowerOperation, RestErrorKind};
use fusion_ctl::vmrun::CloneType;
use fusion_ctl::{CommandResult, Config};

/// Automate VMware Fusion from the command line
#[derive(Parser, Debug)]
#[command(name = "fusion-ctl", version, about = "Automate VMware Fusion via vmrun, vmcli and vmrest")]
struct Args {
    /// Config file (default: ~/.config/fusion-ctl/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log tool invocations and HTTP requests to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a vmrun operation
    #[command(subcommand)]
    Vmrun(VmrunCommand),
    /// Run a vmcli operation
    #[command(subcommand)]
    Vmcli(VmcliCommand),
    /// Call the vmrest API
    #[command(subcommand)]
    Rest(RestCommand),
    /// Check that vmrun and vmrest are reachable
    Doctor,
}

#[derive(Subcommand, Debug)]
enum VmrunCommand {
    /// List running VMs
    List,
    Start {
        #[arg(long)]
        vm: Option<String>,
        #[arg(long)]
        nogui: bool,
    },
    Stop {
        #[arg(long)]
        vm: Option<String>,
        #[arg(long)]
        hard: bool,
    },
    Suspend {
        #[arg(long)]
        vm: Option<String>,
        #[arg(long)]
        hard: bool,
    },
    /// List snapshots
    Snapshots {
        #[arg(long)]
        vm: Option<String>,
        #[arg(long)]
        tree: bool,
    },
    /// Take a snapshot
    Snapshot {
        name: String,
        #[arg(long)]
        vm: Option<String>,
    },
    /// Revert to a snapshot
    Revert {
        name: String,
        #[arg(long)]
        vm: Option<String>,
    },
    /// Clone a VM
    Clone {
        destination: String,
        /// Create a linked clone instead of a full one
        #[arg(long)]
        linked: bool,
        #[arg(long)]
        snapshot: Option<String>,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        vm: Option<String>,
    },
    /// Print the guest IP address
    Ip {
        #[arg(long)]
        vm: Option<String>,
        #[arg(long)]
        wait: bool,
    },
}

#[derive(Subcommand, Debug)]
enum VmcliCommand {
    /// Power operation: query, start, stop, pause, unpause, reset, suspend
    Power {
        action: String,
        #[arg(long)]
        vm: Option<String>,
    },
    /// Take a snapshot
    Snapshot {
        name: String,
        #[arg(long)]
        vm: Option<String>,
    },
    /// Set vCPU count and memory size
    Resize {
        #[arg(long)]
        cpus: Option<u32>,
        #[arg(long)]
        memory_mb: Option<u64>,
        #[arg(long)]
        vm: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
enum RestCommand {
    /// List registered VMs
    Vms,
    /// Show one VM's settings
    Vm { id: String },
    /// Show or change a VM's power state
    Power {
        id: String,
        /// on, off, shutdown, suspend, pause, unpause
        state: Option<PowerOperation>,
    },
    /// List virtual networks
    Vmnets,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = Args::parse();
    let _log_guard = fusion_ctl::logging::init(args.verbose);

    let config = Config::discover(args.config.as_deref())?;
    info!(command = ?args.command, "fusion-ctl starting");

    match args.command {
        Command::Vmrun(cmd) => run_vmrun(&config, cmd).await,
        Command::Vmcli(cmd) => run_vmcli(&config, cmd).await,
        Command::Rest(cmd) => run_rest(&config, cmd).await,
        Command::Doctor => doctor(&config).await,
    }
}

async fn run_vmrun(config: &Config, cmd: VmrunCommand) -> Result<ExitCode> {
    let vmrun = config.vmrun()?;
    let result = match cmd {
        VmrunCommand::List => vmrun.inventory().list().await,
        VmrunCommand::Start { vm, nogui } => vmrun.power().start(vm.as_deref(), nogui).await,
        VmrunCommand::Stop { vm, hard } => vmrun.power().stop(vm.as_deref(), hard).await,
        VmrunCommand::Suspend { vm, hard } => vmrun.power().suspend(vm.as_deref(), hard).await,
        VmrunCommand::Snapshots { vm, tree } => vmrun.snapshots().list(vm.as_deref(), tree).await,
        VmrunCommand::Snapshot { name, vm } => vmrun.snapshots().take(vm.as_deref(), &name).await,
        VmrunCommand::Revert { name, vm } => vmrun.snapshots().revert(vm.as_deref(), &name).await,
        VmrunCommand::Clone {
            destination,
            linked,
            snapshot,
            name,
            vm,
        } => {
            let clone_type = if linked { CloneType::Linked } else { CloneType::Full };
            vmrun
                .inventory()
                .clone_vm(
                    vm.as_deref(),
                    &destination,
                    clone_type,
                    snapshot.as_deref(),
                    name.as_deref(),
                )
                .await
        }
        VmrunCommand::Ip { vm, wait } => vmrun.guest().ip_address(vm.as_deref(), wait).await,
    };
    Ok(report(&result))
}

async fn run_vmcli(config: &Config, cmd: VmcliCommand) -> Result<ExitCode> {
    let vmcli = config.vmcli()?;
    let result = match cmd {
        VmcliCommand::Power { action, vm } => {
            let power = vmcli.power();
            let vm = vm.as_deref();
            match action.as_str() {
                "query" => power.query(vm).await,
                "start" => power.start(vm).await,
                "stop" => power.stop(vm).await,
                "pause" => power.pause(vm).await,
                "unpause" => power.unpause(vm).await,
                "reset" => power.reset(vm).await,
                "suspend" => power.suspend(vm).await,
                other => anyhow::bail!("unknown power action `{other}`"),
            }
        }
        VmcliCommand::Snapshot { name, vm } => vmcli.snapshot().take(vm.as_deref(), &name).await,
        VmcliCommand::Resize { cpus, memory_mb, vm } => {
            let chipset = vmcli.chipset();
            let vm = vm.as_deref();
            match (cpus, memory_mb) {
                (None, None) => anyhow::bail!("nothing to change: pass --cpus and/or --memory-mb"),
                (Some(cpus), None) => chipset.set_vcpu_count(vm, cpus).await,
                (None, Some(memory_mb)) => chipset.set_mem_size(vm, memory_mb).await,
                (Some(cpus), Some(memory_mb)) => {
                    let result = chipset.set_vcpu_count(vm, cpus).await;
                    if !result.success() {
                        return Ok(report(&result));
                    }
                    chipset.set_mem_size(vm, memory_mb).await
                }
            }
        }
    };
    Ok(report(&result))
}

async fn run_rest(config: &Config, cmd: RestCommand) -> Result<ExitCode> {
    let rest = config.rest()?;
    let value = match cmd {
        RestCommand::Vms => rest.vms().list().await?,
        RestCommand::Vm { id } => rest.vms().get(&id).await?,
        RestCommand::Power { id, state: None } => rest.vms().power_state(&id).await?,
        RestCommand::Power {
            id,
            state: Some(state),
        } => rest.vms().set_power_state(&id, state).await?,
        RestCommand::Vmnets => rest.network().list_vmnets().await?,
    };
    if let Some(value) = value {
        println!("{}", serde_json::to_string_pretty(&value)?);
    }
    Ok(ExitCode::SUCCESS)
}

/// List VMs through vmrun and vmrest, the way a first-time setup is checked.
async fn doctor(config: &Config) -> Result<ExitCode> {
    let mut healthy = true;

    match config.vmrun() {
        Ok(vmrun) => {
            let result = vmrun.inventory().list().await;
            if result.success() {
                println!("vmrun: ok ({})", vmrun.vmrun_path().display());
                println!("{}", result.output);
            } else {
                healthy = false;
                println!("vmrun: exit {}: {}", result.code, result.error);
            }
        }
        Err(e) => {
            healthy = false;
            println!("vmrun: {e}");
        }
    }

    let rest_config = config.rest_config();
    if rest_config.username.is_none() || rest_config.password.is_none() {
        println!("vmrest: skipped (set VMREST_USER and VMREST_PASS or the [rest] table)");
        return Ok(exit_status(healthy));
    }

    let rest = config.rest()?;
    match rest.vms().list().await {
        Ok(vms) => {
            println!("vmrest: ok ({})", rest.base_url());
            println!("{}", serde_json::to_string_pretty(&vms)?);
            let nets = rest.network().list_vmnets().await?;
            println!("{}", serde_json::to_string_pretty(&nets)?);
        }
        Err(e) if e.kind() == RestErrorKind::Connection => {
            healthy = false;
            println!("vmrest: not running at {} ({})", rest.base_url(), e.message());
        }
        Err(e) => {
            healthy = false;
            println!("vmrest: {e}");
        }
    }

    Ok(exit_status(healthy))
}

fn report(result: &CommandResult) -> ExitCode {
    if !result.output.is_empty() {
        println!("{}", result.output);
    }
    if !result.error.is_empty() {
        eprintln!("{}", result.error);
    }
    u8::try_from(result.code)
        .map(ExitCode::from)
        .unwrap_or(ExitCode::FAILURE)
}

fn exit_status(healthy: bool) -> ExitCode {
    if healthy {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
