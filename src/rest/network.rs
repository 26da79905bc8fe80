use reqwest::Method;
use serde::Serialize;

use crate::types::Protocol;

use super::{RestResult, VmRest};

#[derive(Serialize)]
struct VmnetCreate<'a> {
    name: &'a str,
    r#type: &'a str,
    subnet: &'a str,
    mask: &'a str,
}

#[derive(Serialize)]
struct MacToIp<'a> {
    #[serde(rename = "IP")]
    ip: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PortForwardRule<'a> {
    guest_ip: &'a str,
    guest_port: u16,
    desc: &'a str,
}

/// Virtual network endpoints under `/api/vmnet` and `/api/vmnets`.
pub struct Networks<'a> {
    pub(super) rest: &'a VmRest,
}

impl Networks<'_> {
    pub async fn list_vmnets(&self) -> RestResult {
        self.rest.request(Method::GET, "/vmnet").await
    }

    /// Create a virtual network (`type` is `hostOnly` or `nat`).
    pub async fn create_vmnet(&self, name: &str, vmnet_type: &str, subnet: &str, mask: &str) -> RestResult {
        let body = VmnetCreate {
            name,
            r#type: vmnet_type,
            subnet,
            mask,
        };
        self.rest.request_json(Method::POST, "/vmnets", &body).await
    }

    /// Static DHCP MAC-to-IP bindings of `vmnet`.
    pub async fn mac_to_ip(&self, vmnet: &str) -> RestResult {
        self.rest
            .request(Method::GET, &format!("/vmnet/{vmnet}/mactoip"))
            .await
    }

    pub async fn update_mac_to_ip(&self, vmnet: &str, mac: &str, ip: &str) -> RestResult {
        self.rest
            .request_json(
                Method::PUT,
                &format!("/vmnet/{vmnet}/mactoip/{mac}"),
                &MacToIp { ip },
            )
            .await
    }

    pub async fn port_forwards(&self, vmnet: &str) -> RestResult {
        self.rest
            .request(Method::GET, &format!("/vmnet/{vmnet}/portforward"))
            .await
    }

    /// Add or replace the rule for `protocol`/`port` on `vmnet`.
    pub async fn update_port_forward(
        &self,
        vmnet: &str,
        protocol: Protocol,
        port: u16,
        guest_ip: &str,
        guest_port: u16,
        desc: &str,
    ) -> RestResult {
        let body = PortForwardRule {
            guest_ip,
            guest_port,
            desc,
        };
        self.rest
            .request_json(
                Method::PUT,
                &format!("/vmnet/{vmnet}/portforward/{protocol}/{port}"),
                &body,
            )
            .await
    }

    pub async fn delete_port_forward(&self, vmnet: &str, protocol: Protocol, port: u16) -> RestResult {
        self.rest
            .request(
                Method::DELETE,
                &format!("/vmnet/{vmnet}/portforward/{protocol}/{port}"),
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn port_forward_body_keys() {
        let body = PortForwardRule {
            guest_ip: "192.168.56.10",
            guest_port: 22,
            desc: "ssh",
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({"guestIp": "192.168.56.10", "guestPort": 22, "desc": "ssh"})
        );
    }

    #[test]
    fn mac_to_ip_body_uses_upper_case_key() {
        let body = MacToIp { ip: "192.168.56.20" };
        assert_eq!(serde_json::to_string(&body).unwrap(), r#"{"IP":"192.168.56.20"}"#);
    }
}
