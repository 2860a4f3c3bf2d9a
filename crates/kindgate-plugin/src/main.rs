//! kindgate write-policy plugin.
//!
//! Spawned by the relay (strfry `writePolicy.plugin`, or `pluginDown` /
//! `pluginUp` in a router stream). Requests arrive on stdin, verdicts leave on
//! stdout, diagnostics go to stderr.

use std::process::ExitCode;

use tracing_subscriber::{fmt, EnvFilter};

use kindgate_core::error::Result;
use kindgate_plugin::policy::{AdmissionPolicy, KindPolicy};
use kindgate_plugin::shutdown::ShutdownSignal;
use kindgate_plugin::{config, transport};

/// Optional path to a YAML policy file replacing the built-in table.
const CONFIG_ENV: &str = "KINDGATE_CONFIG";

fn main() -> ExitCode {
    fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let rt = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            tracing::error!(error = %e, "runtime build failed");
            return ExitCode::FAILURE;
        }
    };

    // Handlers first: a signal during config load must not kill the process.
    let shutdown = {
        let _guard = rt.enter();
        ShutdownSignal::install()
    };

    let policy = match load_policy() {
        Ok(p) => p,
        Err(e) => {
            tracing::error!(error = %e, code = e.code().as_str(), "policy load failed");
            return ExitCode::FAILURE;
        }
    };

    tracing::info!(
        purpose = policy.purpose(),
        allowed = %policy.allowed_summary(),
        "kindgate plugin started"
    );

    let res = rt.block_on(async {
        let stdin = tokio::io::BufReader::new(tokio::io::stdin());
        let stdout = tokio::io::stdout();
        transport::run(stdin, stdout, &policy, shutdown.wait()).await
    });

    // stdin is read on a blocking thread that cannot be cancelled; do not wait for it.
    rt.shutdown_background();

    match res {
        Ok(report) => {
            tracing::info!(
                reason = report.stop.as_str(),
                requests = report.stats.requests,
                accepted = report.stats.accepted,
                rejected = report.stats.rejected,
                decode_errors = report.stats.decode_errors,
                "kindgate plugin shutting down"
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, code = e.code().as_str(), "protocol loop failed");
            ExitCode::FAILURE
        }
    }
}

fn load_policy() -> Result<KindPolicy> {
    match std::env::var(CONFIG_ENV) {
        Ok(path) if !path.trim().is_empty() => {
            let cfg = config::load_from_file(path.trim())?;
            tracing::info!(%path, "loaded policy config");
            KindPolicy::from_config(&cfg)
        }
        _ => Ok(KindPolicy::discovery_relay()),
    }
}
