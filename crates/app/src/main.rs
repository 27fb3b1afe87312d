//! Probe binary: runs the contract suites and reports the results.
//!
//! Exits with 0 only when every case of every suite passed.

use std::io::{self, Write};
use std::process::ExitCode;
use std::sync::Arc;

use probe::report::write_report;
use probe::settings::BASE_URL_VAR;
use probe::suites::{reqres, template};
use probe::Settings;
use probe_infrastructure::{ReqwestHttpClient, SuiteRunner};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    tracing::info!("Starting Probe v{}", env!("CARGO_PKG_VERSION"));

    match run().await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            tracing::error!(error = %e, "Probe could not run");
            ExitCode::from(2)
        }
    }
}

async fn run() -> Result<bool, Box<dyn std::error::Error>> {
    let settings = Settings::from_env()?;
    let client = Arc::new(ReqwestHttpClient::new()?);

    let reqres_runner = SuiteRunner::new(Arc::clone(&client), reqres::config(reqres::BASE_URI)?);
    let template_runner = settings
        .as_ref()
        .map(template::config)
        .transpose()?
        .map(|config| SuiteRunner::new(Arc::clone(&client), config));
    if template_runner.is_none() {
        tracing::info!("{BASE_URL_VAR} not set, skipping template suite");
    }

    let reqres_suite = reqres::suite();
    let template_suite = template::suite();

    // Independent suites run concurrently.
    let (reqres_report, template_report) = tokio::join!(reqres_runner.run(&reqres_suite), async {
        match &template_runner {
            Some(runner) => Some(runner.run(&template_suite).await),
            None => None,
        }
    });

    let mut stdout = io::stdout().lock();
    let mut all_passed = true;
    for report in std::iter::once(reqres_report).chain(template_report) {
        write_report(&mut stdout, &report)?;
        all_passed &= report.all_passed();
    }
    stdout.flush()?;

    Ok(all_passed)
}
