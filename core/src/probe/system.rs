//! Reachability probing via the operating system's `ping` utility.
//!
//! This is the unprivileged fallback: the `ping` binary is spawned as
//! a child process, its combined output is captured, and the host is
//! classified by the presence of the reply's TTL field in the text.
//! Fragile by nature, but it works everywhere without raw sockets.

use std::io::ErrorKind;
use std::time::Duration;

use async_trait::async_trait;
use opskit_common::error::ProbeError;
use tokio::process::Command;
use tracing::trace;

use super::{Prober, Verdict};

/// The reply's time-to-live field, present on both Unix (`ttl=`) and
/// Windows (`TTL=`) whenever an echo reply actually came back.
const SUCCESS_TOKEN: &str = "ttl=";

pub struct SystemPinger {
    timeout: Duration,
}

impl SystemPinger {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

#[async_trait]
impl Prober for SystemPinger {
    async fn probe(&self, host: &str, count: u32) -> Result<Verdict, ProbeError> {
        let output = tokio::time::timeout(self.timeout, ping_command(host, count).output())
            .await
            .map_err(|_| {
                ProbeError::Inconclusive(format!(
                    "ping did not finish within {:.0?}",
                    self.timeout
                ))
            })?
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => {
                    ProbeError::Unavailable("no `ping` utility in PATH".to_string())
                }
                _ => ProbeError::Unavailable(format!("failed to run ping: {e}")),
            })?;

        let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
        text.push_str(&String::from_utf8_lossy(&output.stderr));
        trace!(host, bytes = text.len(), "captured ping output");

        classify(&text)
    }
}

#[cfg(windows)]
fn ping_command(host: &str, count: u32) -> Command {
    let mut cmd = Command::new("ping");
    cmd.arg(host).arg("-n").arg(count.max(1).to_string());
    cmd
}

#[cfg(not(windows))]
fn ping_command(host: &str, count: u32) -> Command {
    let mut cmd = Command::new("ping");
    cmd.arg("-c").arg(count.max(1).to_string()).arg(host);
    cmd
}

/// Classifies captured ping output.
///
/// Reachable iff the success token appears. Output with no token is a
/// failed ping, except that completely empty output means the utility
/// told us nothing at all and no verdict can be given.
fn classify(output: &str) -> Result<Verdict, ProbeError> {
    if output.to_ascii_lowercase().contains(SUCCESS_TOKEN) {
        return Ok(Verdict::Reachable);
    }
    if output.trim().is_empty() {
        return Err(ProbeError::Inconclusive(
            "ping produced no output".to_string(),
        ));
    }
    Ok(Verdict::Unreachable)
}

#[cfg(test)]
mod tests {
    use super::*;

    const LINUX_REPLY: &str = "\
PING 8.8.8.8 (8.8.8.8) 56(84) bytes of data.
64 bytes from 8.8.8.8: icmp_seq=1 ttl=117 time=9.81 ms

--- 8.8.8.8 ping statistics ---
1 packets transmitted, 1 received, 0% packet loss, time 0ms
";

    const WINDOWS_REPLY: &str = "\
Pinging 8.8.8.8 with 32 bytes of data:
Reply from 8.8.8.8: bytes=32 time=10ms TTL=117

Ping statistics for 8.8.8.8:
    Packets: Sent = 1, Received = 1, Lost = 0 (0% loss),
";

    const LINUX_LOSS: &str = "\
PING 10.255.255.1 (10.255.255.1) 56(84) bytes of data.

--- 10.255.255.1 ping statistics ---
3 packets transmitted, 0 received, 100% packet loss, time 2048ms
";

    const WINDOWS_TIMEOUT: &str = "\
Pinging 10.255.255.1 with 32 bytes of data:
Request timed out.
Request timed out.
";

    #[test]
    fn linux_reply_is_reachable() {
        assert_eq!(classify(LINUX_REPLY).unwrap(), Verdict::Reachable);
    }

    #[test]
    fn windows_reply_is_reachable() {
        assert_eq!(classify(WINDOWS_REPLY).unwrap(), Verdict::Reachable);
    }

    #[test]
    fn full_loss_is_unreachable() {
        assert_eq!(classify(LINUX_LOSS).unwrap(), Verdict::Unreachable);
    }

    #[test]
    fn windows_timeouts_are_unreachable() {
        assert_eq!(classify(WINDOWS_TIMEOUT).unwrap(), Verdict::Unreachable);
    }

    #[test]
    fn empty_output_is_inconclusive() {
        assert!(matches!(
            classify("   \n"),
            Err(ProbeError::Inconclusive(_))
        ));
    }

    #[test]
    fn token_match_ignores_case() {
        assert_eq!(
            classify("Reply from 1.1.1.1: TTL=55").unwrap(),
            Verdict::Reachable
        );
    }
}
