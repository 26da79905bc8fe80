//! Operation descriptors and argument-list construction.
//!
//! Every grouping method in [`crate::vmrun`] and [`crate::vmcli`] builds one
//! [`Operation`] and hands it to its tool, which lowers it to an argv in that
//! tool's grammar:
//!
//! ```text
//! vmrun [global flags] <command> [<target>] [<args>...]
//! vmcli [<target>] <Module> <command> [<args>...] [--verbose]
//! ```
//!
//! The builder never reorders tokens: the order of the builder calls is the
//! order on the command line. Unset optionals produce no tokens at all.

use std::fmt;

/// Literal token for a boolean argument in grammars that spell booleans out.
pub fn bool_token(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}

/// Pick the target for one call: the per-call value wins, then the
/// instance default. An empty default counts as unset.
pub fn resolve_target(explicit: Option<&str>, default: Option<&str>) -> Option<String> {
    explicit
        .or(default.filter(|d| !d.is_empty()))
        .map(str::to_owned)
}

/// What to execute, before it is lowered to a concrete argv.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operation {
    /// vmcli module (`Chipset`, `Power`, ...). vmrun has no modules.
    pub group: Option<&'static str>,
    pub command: &'static str,
    /// VM path, host network name or destination path, depending on the command.
    pub target: Option<String>,
    pub args: Vec<String>,
}

impl Operation {
    pub fn new(command: &'static str) -> Self {
        Self {
            group: None,
            command,
            target: None,
            args: Vec::new(),
        }
    }

    pub fn group(mut self, group: &'static str) -> Self {
        self.group = Some(group);
        self
    }

    pub fn target(mut self, target: Option<String>) -> Self {
        self.target = target;
        self
    }

    /// Append one token.
    pub fn arg(mut self, value: impl ToString) -> Self {
        self.args.push(value.to_string());
        self
    }

    pub fn args<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: ToString,
    {
        self.args.extend(values.into_iter().map(|v| v.to_string()));
        self
    }

    /// Append a switch token only when `enabled`.
    pub fn flag(mut self, enabled: bool, token: &str) -> Self {
        if enabled {
            self.args.push(token.to_owned());
        }
        self
    }

    /// Append `value` only when it is set and not empty.
    pub fn opt(mut self, value: Option<impl ToString>) -> Self {
        if let Some(v) = present(value) {
            self.args.push(v);
        }
        self
    }

    /// Append `flag value` only when `value` is set and not empty.
    pub fn opt_pair(mut self, flag: &str, value: Option<impl ToString>) -> Self {
        if let Some(v) = present(value) {
            self.args.push(flag.to_owned());
            self.args.push(v);
        }
        self
    }

    /// Append `"true"` or `"false"`.
    pub fn toggle(self, value: bool) -> Self {
        self.arg(bool_token(value))
    }
}

/// `Some("")` counts as unset.
fn present(value: Option<impl ToString>) -> Option<String> {
    value.map(|v| v.to_string()).filter(|v| !v.is_empty())
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.group {
            Some(group) => write!(f, "{group} {}", self.command),
            None => f.write_str(self.command),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bool_token_literals() {
        assert_eq!(bool_token(true), "true");
        assert_eq!(bool_token(false), "false");
    }

    #[test]
    fn resolve_target_prefers_explicit() {
        assert_eq!(
            resolve_target(Some("/a.vmx"), Some("/b.vmx")).as_deref(),
            Some("/a.vmx")
        );
        assert_eq!(resolve_target(None, Some("/b.vmx")).as_deref(), Some("/b.vmx"));
        assert_eq!(resolve_target(None, Some("")), None);
        assert_eq!(resolve_target(None, None), None);
    }

    #[test]
    fn unset_optionals_emit_nothing() {
        let op = Operation::new("clone")
            .arg("/dest.vmx")
            .opt(None::<&str>)
            .opt_pair("-snapshot", None::<&str>)
            .flag(false, "-nw");
        assert_eq!(op.args, vec!["/dest.vmx"]);
    }

    #[test]
    fn empty_optionals_emit_nothing() {
        let op = Operation::new("Upgrade")
            .opt_pair("-c", Some(""))
            .opt(Some(String::new()))
            .opt_pair("-bp", Some("/iso/tools.iso"));
        assert_eq!(op.args, vec!["-bp", "/iso/tools.iso"]);
    }

    #[test]
    fn set_optionals_keep_builder_order() {
        let op = Operation::new("clone")
            .arg("/dest.vmx")
            .arg("linked")
            .opt_pair("-snapshot", Some("base"))
            .opt_pair("-cloneName", Some("web"))
            .flag(true, "-nw")
            .opt(Some(3));
        assert_eq!(
            op.args,
            vec!["/dest.vmx", "linked", "-snapshot", "base", "-cloneName", "web", "-nw", "3"]
        );
    }

    #[test]
    fn toggle_serializes_literals() {
        let op = Operation::new("SetEnabled").toggle(true).toggle(false);
        assert_eq!(op.args, vec!["true", "false"]);
    }

    #[test]
    fn identical_inputs_build_identical_operations() {
        let build = || {
            Operation::new("SetSecurityPolicy")
                .group("Ethernet")
                .target(Some("/vm.vmx".into()))
                .arg("ethernet0")
                .toggle(true)
                .toggle(false)
        };
        assert_eq!(build(), build());
    }

    #[test]
    fn display_includes_group() {
        let op = Operation::new("Take").group("Snapshot");
        assert_eq!(op.to_string(), "Snapshot Take");
        assert_eq!(Operation::new("list").to_string(), "list");
    }
}
