//! End-to-end argv tests: the clients are pointed at `/bin/echo`, so the
//! captured output is exactly the argument list the real tool would see.
#![cfg(unix)]

use fusion_ctl::vmcli::{GuestRun, HostBusAdapter};
use fusion_ctl::vmrun::{CloneType, HostType, ProgramOptions};
use fusion_ctl::{Protocol, VmCli, VmRun};

const ECHO: &str = "/bin/echo";

fn vmrun() -> VmRun {
    let mut vmrun = VmRun::new(ECHO);
    vmrun.set_host_type(Some(HostType::Fusion));
    vmrun
}

fn vmcli() -> VmCli {
    VmCli::new(ECHO)
}

#[tokio::test]
async fn vmrun_start_gui_and_nogui() {
    let vmrun = vmrun();

    let gui = vmrun.power().start(Some("/vms/web.vmx"), false).await;
    assert!(gui.success());
    assert_eq!(gui.output, "-T fusion start /vms/web.vmx gui");

    let headless = vmrun.power().start(Some("/vms/web.vmx"), true).await;
    assert_eq!(headless.output, "-T fusion start /vms/web.vmx nogui");
}

#[tokio::test]
async fn vmrun_uses_default_vm_path_when_none_given() {
    let mut vmrun = vmrun();
    vmrun.set_vm_path(Some("/vms/default.vmx".into()));

    let result = vmrun.power().stop(None, true).await;
    assert_eq!(result.output, "-T fusion stop /vms/default.vmx hard");

    let explicit = vmrun.power().stop(Some("/vms/other.vmx"), false).await;
    assert_eq!(explicit.output, "-T fusion stop /vms/other.vmx soft");
}

#[tokio::test]
async fn vmrun_without_any_target_omits_it() {
    let vmrun = vmrun();
    let result = vmrun.power().pause(None).await;
    assert_eq!(result.output, "-T fusion pause");
}

#[tokio::test]
async fn vmrun_credentials_precede_command() {
    let mut vmrun = vmrun();
    vmrun
        .set_guest_user(Some("admin".into()))
        .set_guest_password(Some("s3cret".into()))
        .set_vm_password(Some(String::new()));

    let result = vmrun.guest().list_processes(Some("/vms/web.vmx")).await;
    assert_eq!(
        result.output,
        "-T fusion -gu admin -gp s3cret listProcessesInGuest /vms/web.vmx"
    );
}

#[tokio::test]
async fn vmrun_delete_snapshot_children_flag() {
    let vmrun = vmrun();

    let only = vmrun
        .snapshots()
        .delete(Some("/vms/web.vmx"), "base", false)
        .await;
    assert_eq!(only.output, "-T fusion deleteSnapshot /vms/web.vmx base");

    let tree = vmrun
        .snapshots()
        .delete(Some("/vms/web.vmx"), "base", true)
        .await;
    assert_eq!(
        tree.output,
        "-T fusion deleteSnapshot /vms/web.vmx base andDeleteChildren"
    );
}

#[tokio::test]
async fn vmrun_clone_optional_pairs() {
    let vmrun = vmrun();

    let bare = vmrun
        .inventory()
        .clone_vm(Some("/vms/web.vmx"), "/vms/copy.vmx", CloneType::Full, None, None)
        .await;
    assert_eq!(bare.output, "-T fusion clone /vms/web.vmx /vms/copy.vmx full");

    let linked = vmrun
        .inventory()
        .clone_vm(
            Some("/vms/web.vmx"),
            "/vms/copy.vmx",
            CloneType::Linked,
            Some("base"),
            Some("copy"),
        )
        .await;
    assert_eq!(
        linked.output,
        "-T fusion clone /vms/web.vmx /vms/copy.vmx linked -snapshot base -cloneName copy"
    );
}

fn vmrun_with_default_vm() -> VmRun {
    let mut vmrun = vmrun();
    vmrun.set_vm_path(Some("/vms/default.vmx".into()));
    vmrun
}

#[tokio::test]
async fn vmrun_host_network_commands_target_the_network() {
    let vmrun = vmrun_with_default_vm();
    let network = vmrun.network();

    let list = network.list_port_forwardings("vmnet8").await;
    assert_eq!(list.output, "-T fusion listPortForwardings vmnet8");

    let set = network
        .set_port_forwarding("vmnet8", Protocol::Tcp, 8080, "192.168.56.10", 80, None)
        .await;
    assert_eq!(
        set.output,
        "-T fusion setPortForwarding vmnet8 tcp 8080 192.168.56.10 80"
    );

    let described = network
        .set_port_forwarding("vmnet8", Protocol::Udp, 5353, "192.168.56.10", 53, Some("dns"))
        .await;
    assert_eq!(
        described.output,
        "-T fusion setPortForwarding vmnet8 udp 5353 192.168.56.10 53 dns"
    );

    let delete = network
        .delete_port_forwarding("vmnet8", Protocol::Tcp, 8080)
        .await;
    assert_eq!(delete.output, "-T fusion deletePortForwarding vmnet8 tcp 8080");

    let hosts = network.list_host_networks().await;
    assert_eq!(hosts.output, "-T fusion listHostNetworks");
}

#[tokio::test]
async fn vmrun_empty_description_is_dropped() {
    let vmrun = vmrun_with_default_vm();
    let result = vmrun
        .network()
        .set_port_forwarding("vmnet8", Protocol::Tcp, 2222, "192.168.56.10", 22, Some(""))
        .await;
    assert_eq!(
        result.output,
        "-T fusion setPortForwarding vmnet8 tcp 2222 192.168.56.10 22"
    );
}

#[tokio::test]
async fn vmrun_photon_download_targets_destination() {
    let vmrun = vmrun_with_default_vm();
    let result = vmrun.inventory().download_photon_vm("/vms/photon").await;
    assert_eq!(result.output, "-T fusion downloadPhotonVM /vms/photon");
}

#[tokio::test]
async fn vmrun_run_program_options() {
    let vmrun = vmrun();
    let options = ProgramOptions {
        no_wait: true,
        interactive: true,
        ..ProgramOptions::default()
    };

    let result = vmrun
        .guest()
        .run_program(Some("/vms/web.vmx"), "/bin/ls", options, &["-la", "/tmp"])
        .await;
    assert_eq!(
        result.output,
        "-T fusion runProgramInGuest /vms/web.vmx -noWait -interactive /bin/ls -la /tmp"
    );
}

#[tokio::test]
async fn vmcli_targeted_module_command() {
    let vmcli = vmcli();
    let result = vmcli
        .chipset()
        .set_vcpu_count(Some("/vms/web.vmx"), 4)
        .await;
    assert_eq!(result.output, "/vms/web.vmx Chipset SetVCpuCount 4");
}

#[tokio::test]
async fn vmcli_boolean_tokens_are_lowercase_words() {
    let vmcli = vmcli();
    let result = vmcli
        .ethernet()
        .set_security_policy(Some("/vms/web.vmx"), "ethernet0", true, false, true)
        .await;
    assert_eq!(
        result.output,
        "/vms/web.vmx Ethernet SetSecurityPolicy ethernet0 true false true"
    );
}

#[tokio::test]
async fn vmcli_guest_run_carries_credentials_and_flags() {
    let vmcli = vmcli()
        .with_vm_path(Some("/vms/web.vmx".into()))
        .with_guest_credentials(Some("admin".into()), Some("pw".into()));
    let options = GuestRun {
        no_wait: true,
        working_dir: Some("/tmp"),
        ..GuestRun::default()
    };

    let result = vmcli.guest().run(None, "/bin/ls", &["-l"], options).await;
    assert_eq!(
        result.output,
        "/vms/web.vmx Guest run -u admin -p pw -nw -w /tmp /bin/ls -l"
    );
}

#[tokio::test]
async fn vmcli_guest_query_has_no_credentials() {
    let vmcli = vmcli().with_guest_credentials(Some("admin".into()), Some("pw".into()));
    let result = vmcli.guest().query(Some("/vms/web.vmx")).await;
    assert_eq!(result.output, "/vms/web.vmx Guest query");
}

#[tokio::test]
async fn vmcli_verbose_flag_trails() {
    let vmcli = vmcli().with_verbose(true);
    let result = vmcli.power().query(Some("/vms/web.vmx")).await;
    assert_eq!(result.output, "/vms/web.vmx Power query --verbose");
}

#[tokio::test]
async fn vmcli_hba_modules_share_commands() {
    let vmcli = vmcli();

    let nvme = vmcli
        .nvme()
        .set_present(Some("/vms/web.vmx"), "nvme0", true)
        .await;
    assert_eq!(nvme.output, "/vms/web.vmx Nvme SetPresent nvme0 true");

    let sata = vmcli
        .sata()
        .set_present(Some("/vms/web.vmx"), "sata0", false)
        .await;
    assert_eq!(sata.output, "/vms/web.vmx Sata SetPresent sata0 false");
}

#[tokio::test]
async fn vmcli_vm_create_is_untargeted() {
    let vmcli = vmcli().with_vm_path(Some("/vms/web.vmx".into()));
    let result = vmcli
        .vm()
        .create("fresh", "/vms", Some("ubuntu-64"), None)
        .await;
    assert_eq!(result.output, "VM Create -n fresh -d /vms -g ubuntu-64");
}

#[tokio::test]
async fn missing_tool_reports_launch_failure() {
    let vmrun = VmRun::new("/nonexistent/vmrun");
    let result = vmrun.inventory().list().await;
    assert_eq!(result.code, fusion_ctl::LAUNCH_FAILURE_CODE);
    assert_eq!(result.output, "");
    assert_eq!(result.error, "vmrun not found");
}

fn vmcli_with_default_vm() -> VmCli {
    vmcli().with_vm_path(Some("/vms/web.vmx".into()))
}

#[tokio::test]
async fn vmcli_template_create_falls_back_to_default_vm() {
    let vmcli = vmcli_with_default_vm();

    let default = vmcli.template().create("/t/web.vmtx", "web-tpl", None).await;
    assert_eq!(
        default.output,
        "/vms/web.vmx VMTemplate Create -p /t/web.vmtx -n web-tpl"
    );

    let explicit = vmcli
        .template()
        .create("/t/db.vmtx", "db-tpl", Some("/vms/db.vmx"))
        .await;
    assert_eq!(
        explicit.output,
        "/vms/db.vmx VMTemplate Create -p /t/db.vmtx -n db-tpl"
    );
}

#[tokio::test]
async fn vmcli_template_deploy_is_untargeted() {
    let vmcli = vmcli_with_default_vm();
    let result = vmcli.template().deploy("/t/web.vmtx").await;
    assert_eq!(result.output, "VMTemplate Deploy -p /t/web.vmtx");
}

#[tokio::test]
async fn vmcli_tools_upgrade_optional_pairs() {
    let vmcli = vmcli_with_default_vm();
    let tools = vmcli.tools();

    let bare = tools.upgrade(None, None, None, None).await;
    assert_eq!(bare.output, "/vms/web.vmx Tools Upgrade");

    let full = tools
        .upgrade(None, Some("/S /v/qn"), Some(1), Some("/iso/tools.iso"))
        .await;
    assert_eq!(
        full.output,
        "/vms/web.vmx Tools Upgrade -c /S /v/qn -bt 1 -bp /iso/tools.iso"
    );

    let empty_cmdline = tools.upgrade(Some("/vms/db.vmx"), Some(""), Some(0), None).await;
    assert_eq!(empty_cmdline.output, "/vms/db.vmx Tools Upgrade -bt 0");
}
