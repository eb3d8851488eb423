use std::io;
use std::process::ExitCode;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::debug;
use tracing_subscriber::{self, EnvFilter};

use cfg::Config;
use client::DeliveryClient;
use driver::Schedule;
use styler::Styler;

mod catalog;
mod cfg;
mod client;
mod driver;
mod record;
mod styler;
mod synth;

fn main() -> ExitCode {
    let args = cfg::Args::parse();
    let config = cfg::Config::new(args);

    init_logging();
    debug!(config = ?config, "starting up");

    match run(config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("❌ Fatal error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging() {
    static INIT: std::sync::Once = std::sync::Once::new();

    INIT.call_once(|| {
        let default_filter = std::env::var("LOGGEN_LOG_FILTER").unwrap_or_else(|_| {
            if cfg!(test) {
                "trace".to_string()
            } else {
                "warn".to_string()
            }
        });
        let env_filter = EnvFilter::new(default_filter);
        let builder = tracing_subscriber::fmt().with_env_filter(env_filter);
        if cfg!(test) {
            builder.with_test_writer().init();
        } else {
            builder.init();
        }
    });
}

fn run(config: Config) -> anyhow::Result<()> {
    let styler = Styler::new(config.color);
    let delivery = DeliveryClient::new(&config.host, config.port, &config.endpoint)?;

    let stop = Arc::new(AtomicBool::new(false));
    let handler_stop = Arc::clone(&stop);
    ctrlc::set_handler(move || handler_stop.store(true, Ordering::Relaxed))
        .context("registering interrupt handler")?;

    println!("🚀 Starting log generator - sending to {}", delivery.url());
    println!(
        "📊 Configuration: {} logs every {}s",
        config.batch_size,
        config.interval.as_secs_f64()
    );
    match config.run_time {
        Some(run_time) => println!("⏱️  Will run for {} seconds", run_time.as_secs()),
        None => println!("⏱️  Running indefinitely (Ctrl+C to stop)"),
    }

    let schedule = Schedule {
        interval: config.interval,
        batch_size: config.batch_size,
        run_time: config.run_time,
    };

    let stdout = io::stdout();
    let mut rng = rand::thread_rng();
    driver::run(&schedule, &stop, &mut rng, |batch| {
        let outcome = delivery.send(batch);
        client::report(&mut stdout.lock(), styler, batch, &outcome)
            .context("writing delivery report")?;
        Ok(outcome)
    })?;

    if stop.load(Ordering::Relaxed) {
        println!("\n⏹️  Log generator stopped by user");
    } else {
        println!("⏹️  Log generator finished");
    }
    Ok(())
}
