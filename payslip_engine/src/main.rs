//! Entry point for the Payslip Engine binary.
//!
//! Running this binary starts an HTTP server that exposes the payroll
//! engine.  The bind address is read from `PAYSLIP_BIND_ADDR` and an
//! optional directory of rule files from `PAYSLIP_RULES_DIR`; log
//! verbosity follows `RUST_LOG` (default `info`).

use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_line_number(true)
        .init();

    let config = payslip_engine::config::load()?;
    if let Err(err) = payslip_engine::api::serve(config).await {
        tracing::error!("Error running server: {err:#}");
        return Err(err);
    }
    Ok(())
}
