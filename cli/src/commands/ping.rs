use std::sync::Arc;
use std::time::{Duration, Instant};

use opskit_common::{config::Config, hosts::HostList};
use opskit_core::probe::{self, HostReport};
use opskit_core::sweep;

use crate::terminal::print;

pub async fn ping(
    targets: HostList,
    count: u32,
    timeout: u64,
    no_raw: bool,
    quiet: u8,
) -> anyhow::Result<()> {
    let cfg = Config {
        probe_count: count,
        probe_timeout: Duration::from_secs(timeout),
        force_system: no_raw,
        quiet,
    };

    print::header("Reachability Sweep", cfg.quiet);

    let prober: Arc<dyn probe::Prober> = Arc::from(probe::select_prober(&cfg));
    let bar = print::sweep_bar(targets.len(), cfg.quiet);
    let on_progress = bar.clone().map(|bar| {
        Box::new(move |done: usize| bar.set_position(done as u64)) as Box<sweep::ProgressFn>
    });

    let start_time = Instant::now();
    let reports = sweep::perform_sweep(targets.hosts(), &cfg, prober, on_progress).await;

    if let Some(bar) = bar {
        bar.finish_and_clear();
    }

    sweep_ends(&reports, start_time.elapsed(), &cfg);
    Ok(())
}

fn sweep_ends(reports: &[HostReport], total_time: Duration, cfg: &Config) {
    // One line per host, input order.
    for report in reports {
        print::verdict_line(report, cfg.quiet);
    }

    print::sweep_summary(reports, total_time, cfg.quiet);
}
