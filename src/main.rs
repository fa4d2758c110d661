// Report tool entry point: the presentation collaborator around the
// pipeline library.
//
// Startup sequence:
// 1. Initialize tracing (stderr)
// 2. Load config (copying defaults/ into config/ on first run)
// 3. Run the pipeline
// 4. Print the analysis summary to stdout

use std::path::Path;

use anyhow::Context;
use tracing::info;

use statsheet::analysis::TopView;
use statsheet::config;
use statsheet::pipeline;

fn main() -> anyhow::Result<()> {
    init_tracing()?;

    let config = config::load_config().context("failed to load configuration")?;
    info!(
        "Config loaded: source={}, report={}, charts_dir={}",
        config.paths.source, config.paths.report, config.paths.charts_dir
    );

    let report = pipeline::run(
        Path::new(&config.paths.source),
        Path::new(&config.paths.report),
        Path::new(&config.paths.charts_dir),
    )
    .context("pipeline failed")?;

    println!("Analysis completed.\n");
    print_top_view("Top Run Scorers", &report.analysis.top_runs);
    print_top_view("Top Wicket Takers", &report.analysis.top_wickets);

    println!("Summary Stats:");
    print_stat("Avg_Batting_SR", report.analysis.summary.avg_batting_strike_rate);
    print_stat("Avg_Bowling_Econ", report.analysis.summary.avg_bowling_economy);
    println!(
        "  {:<18} {}\n  {:<18} {}",
        "Players", report.overview.players, "Teams", report.overview.teams
    );

    println!("\nReport saved to: {}", report.report_path.display());
    Ok(())
}

fn print_top_view(heading: &str, view: &TopView) {
    println!("{heading}:");
    for entry in &view.entries {
        println!("  {:<24} {:<16} {:>6}", entry.name, entry.team, entry.value);
    }
    println!();
}

fn print_stat(label: &str, value: Option<f64>) {
    match value {
        Some(v) => println!("  {label:<18} {v:.2}"),
        None => println!("  {label:<18} n/a"),
    }
}

/// Initialize tracing to stderr, leaving stdout for the report summary.
fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("statsheet=info,warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
