//! # Sweep Target Model
//!
//! Defines the input for a reachability sweep: an ordered list of host
//! identifiers (IP literals or DNS names), parsed from a single
//! comma-separated argument.

use std::fmt;
use std::net::IpAddr;
use std::str::FromStr;

/// An ordered, non-empty list of hosts to probe.
///
/// Order is significant: verdicts are reported in the order hosts were
/// given. The list is never mutated after parsing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HostList(Vec<String>);

impl HostList {
    pub fn hosts(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromStr for HostList {
    type Err = String;

    /// Parses a comma-separated host list.
    ///
    /// Each entry must be an IP address or a plausible hostname.
    /// Entries are trimmed; empty entries are rejected rather than
    /// silently dropped so a typo like `"a,,b"` surfaces early.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut hosts = Vec::new();

        for entry in s.split(',') {
            let entry = entry.trim();
            if entry.is_empty() {
                return Err(format!("empty host entry in list: {s}"));
            }
            if !is_valid_host(entry) {
                return Err(format!("invalid host: {entry}"));
            }
            hosts.push(entry.to_string());
        }

        if hosts.is_empty() {
            return Err("host list is empty".to_string());
        }

        Ok(HostList(hosts))
    }
}

impl fmt::Display for HostList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join(","))
    }
}

fn is_valid_host(s: &str) -> bool {
    if s.parse::<IpAddr>().is_ok() {
        return true;
    }

    // Loose hostname check: labels of alphanumerics and hyphens,
    // separated by dots. Resolution decides the rest.
    s.split('.').all(|label| {
        !label.is_empty()
            && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
            && !label.starts_with('-')
            && !label.ends_with('-')
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_single_ip() {
        let list: HostList = "8.8.8.8".parse().unwrap();
        assert_eq!(list.hosts(), &["8.8.8.8".to_string()]);
    }

    #[test]
    fn parses_comma_separated_list_in_order() {
        let list: HostList = "8.8.8.8, 9.76.144.104,example.com".parse().unwrap();
        assert_eq!(
            list.hosts(),
            &[
                "8.8.8.8".to_string(),
                "9.76.144.104".to_string(),
                "example.com".to_string()
            ]
        );
    }

    #[test]
    fn rejects_empty_entry() {
        assert!("8.8.8.8,,1.1.1.1".parse::<HostList>().is_err());
    }

    #[test]
    fn rejects_garbage_host() {
        assert!("not a host!".parse::<HostList>().is_err());
    }

    #[test]
    fn accepts_ipv6_literal() {
        assert!("2001:4860:4860::8888".parse::<HostList>().is_ok());
    }
}
