use std::time::Duration;

/// Runtime options shared by the sweep engine and the CLI.
pub struct Config {
    /// Number of echo requests sent per host.
    pub probe_count: u32,
    /// Upper bound for a single host's probe, covering every attempt.
    pub probe_timeout: Duration,
    /// Forces the system `ping` prober even when running as root.
    pub force_system: bool,
    /// Output verbosity: 0 = normal, 1 = warnings only, 2+ = errors only.
    pub quiet: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            probe_count: 3,
            probe_timeout: Duration::from_secs(10),
            force_system: false,
            quiet: 0,
        }
    }
}
