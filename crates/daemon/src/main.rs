// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rc_daemon::{config, logging, supervisor};

/// Wait for whatever this platform's "please stop" signal is: SIGTERM or
/// SIGINT on Unix, Ctrl-C or a console-close event on Windows.
async fn wait_for_shutdown_signal() -> std::io::Result<()> {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        let mut sigterm = signal(SignalKind::terminate())?;
        let mut sigint = signal(SignalKind::interrupt())?;
        tokio::select! {
            _ = sigterm.recv() => {}
            _ = sigint.recv() => {}
        }
        Ok(())
    }

    #[cfg(windows)]
    {
        use tokio::signal::windows::{ctrl_c, ctrl_close, ctrl_shutdown};
        let mut ctrl_c = ctrl_c()?;
        let mut ctrl_close = ctrl_close()?;
        let mut ctrl_shutdown = ctrl_shutdown()?;
        tokio::select! {
            _ = ctrl_c.recv() => {}
            _ = ctrl_close.recv() => {}
            _ = ctrl_shutdown.recv() => {}
        }
        Ok(())
    }

    #[cfg(not(any(unix, windows)))]
    {
        tokio::signal::ctrl_c().await
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if let Some(arg) = args.first() {
        match arg.as_str() {
            "--version" | "-V" | "-v" => {
                println!("rcd {}", env!("CARGO_PKG_VERSION"));
                return Ok(());
            }
            "--help" | "-h" | "help" => {
                println!("Remote Controls Daemon - subscribes to MQTT and drives the local machine");
                println!();
                println!("USAGE:");
                println!("    rcd");
                println!();
                println!("OPTIONS:");
                println!("    -h, --help       Print help information");
                println!("    -v, --version    Print version information");
                return Ok(());
            }
            other => {
                eprintln!("error: unexpected argument '{other}'");
                eprintln!("Usage: rcd [--help | --version]");
                std::process::exit(2);
            }
        }
    }

    let paths = config::Paths::load()?;
    logging::rotate_log_if_needed(&paths.log_path);
    let _guard = logging::setup_logging(&paths.log_path)?;

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "starting");

    let config = config::load_and_validate(&paths.config_path, |c| {
        rc_engine::build(c).enabled_topic_count()
    })?;

    let stop = Arc::new(AtomicBool::new(false));

    let signal_stop = stop.clone();
    tokio::spawn(async move {
        if let Err(error) = wait_for_shutdown_signal().await {
            tracing::warn!(%error, "failed to install shutdown signal handler");
            return;
        }
        tracing::info!("shutdown signal received");
        signal_stop.store(true, Ordering::Relaxed);
    });

    println!("READY");
    tracing::info!("session starting");

    let terminal_reason = supervisor::run(config, stop).await;

    if let Some(reason) = terminal_reason {
        tracing::error!(reason = %reason, "session terminated");
        eprintln!("rcd: {reason}");
        std::process::exit(1);
    }

    tracing::info!("shutdown complete");
    Ok(())
}
