//! The central **abstraction** for reachability probing.
//!
//! This module defines the unified interface that specific probing
//! strategies (the [`system`] ping runner and the privileged [`raw`]
//! ICMP prober) must implement, plus the verdict model shared by all
//! of them.
//!
//! High-level code depends on the [`Prober`] trait only, so the sweep
//! orchestration and its tests never care which technique is in use.

use std::fmt;

use async_trait::async_trait;
use is_root::is_root;
use opskit_common::{config::Config, error::ProbeError};
use tracing::debug;

pub mod raw;
pub mod system;

/// Outcome of probing a single host.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
    /// At least one echo round-trip succeeded.
    Reachable,
    /// Every probe completed without evidence of a reply.
    Unreachable,
    /// The probe could not produce a verdict; the host may or may not
    /// be up. Carried separately so one broken probe never aborts the
    /// rest of the sweep.
    Undetermined,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Verdict::Reachable => "Successful Ping",
            Verdict::Unreachable => "Failed Ping",
            Verdict::Undetermined => "Probe Error",
        };
        write!(f, "{s}")
    }
}

/// One host's result within a sweep.
#[derive(Clone, Debug)]
pub struct HostReport {
    pub host: String,
    pub verdict: Verdict,
    /// Cause description when the verdict is [`Verdict::Undetermined`].
    pub detail: Option<String>,
}

impl fmt::Display for HostReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} : {}", self.host, self.verdict)
    }
}

/// A strategy for answering "is this host reachable?".
#[async_trait]
pub trait Prober: Send + Sync {
    /// Sends `count` echo probes to `host` and classifies the result.
    ///
    /// Implementations must be independent per call: probing one host
    /// never affects the verdict of another.
    async fn probe(&self, host: &str, count: u32) -> Result<Verdict, ProbeError>;
}

/// Picks the best available prober for this process.
///
/// Root gets the raw ICMP socket; everyone else falls back to the
/// system `ping` utility, which carries its own privileges.
pub fn select_prober(cfg: &Config) -> Box<dyn Prober> {
    if !cfg.force_system && is_root() {
        debug!("running privileged, using raw ICMP prober");
        Box::new(raw::RawIcmpProber::new(cfg.probe_timeout))
    } else {
        debug!("using system ping prober");
        Box::new(system::SystemPinger::new(cfg.probe_timeout))
    }
}
