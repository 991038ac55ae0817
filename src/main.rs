use akas_participation::{run, ReportConfig};
use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<()> {
    // ─── 1) init logging (stderr; stdout carries only the report) ────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .init();
    info!("startup");

    // ─── 2) resolve inputs ───────────────────────────────────────────
    let config = ReportConfig::resolve()?;

    // ─── 3) load, count, subtract ────────────────────────────────────
    let report = run(&config)?;

    // ─── 4) print ────────────────────────────────────────────────────
    report
        .write_to(&mut std::io::stdout().lock())
        .context("writing report")?;

    info!("all done");
    Ok(())
}
