use std::time::Duration;

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use opskit_core::probe::{HostReport, Verdict};

const SEPARATOR_WIDTH: usize = 48;

pub fn header(title: &str, quiet: u8) {
    if quiet > 0 {
        return;
    }
    let sep = "─".repeat(SEPARATOR_WIDTH).bright_black();
    println!("{sep}");
    println!("{}", title.bold());
    println!("{sep}");
}

/// Progress bar over the sweep, suppressed in quiet mode.
pub fn sweep_bar(total: usize, quiet: u8) -> Option<ProgressBar> {
    if quiet > 0 {
        return None;
    }

    let bar = ProgressBar::new(total as u64);
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} probing {pos}/{len} hosts") {
        bar.set_style(style);
    }
    bar.enable_steady_tick(Duration::from_millis(100));
    Some(bar)
}

pub fn verdict_line(report: &HostReport, quiet: u8) {
    if quiet > 1 {
        return;
    }

    let verdict = match report.verdict {
        Verdict::Reachable => report.verdict.to_string().green().bold(),
        Verdict::Unreachable => report.verdict.to_string().red().bold(),
        Verdict::Undetermined => report.verdict.to_string().yellow().bold(),
    };

    match &report.detail {
        Some(detail) => println!("{} : {verdict} ({})", report.host, detail.dimmed()),
        None => println!("{} : {verdict}", report.host),
    }
}

pub fn sweep_summary(reports: &[HostReport], total_time: Duration, quiet: u8) {
    if quiet > 1 {
        return;
    }

    let reachable = reports
        .iter()
        .filter(|r| r.verdict == Verdict::Reachable)
        .count();
    let reachable = format!("{reachable}/{} reachable", reports.len()).bold().green();
    let elapsed = format!("{:.2}s", total_time.as_secs_f64()).bold().yellow();

    println!();
    println!("Sweep complete: {reachable} in {elapsed}");
}
