//! fencewatchd - the fencewatch background service
//!
//! This is the main entry point for the watchdog. It wires together:
//! - Configuration loading
//! - The location API client
//! - The mail session (opened and authenticated once per run)
//! - The watch engine
//! - The bounded polling loop

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use fencewatch_client::{HttpLocationClient, LocationApiConfig, LocationSource};
use fencewatch_config::{Settings, load_config};
use fencewatch_core::{Classification, WatchEngine};
use fencewatch_notify::{Notifier, SmtpConfig, SmtpMailer};
use fencewatch_util::{AlertId, Deadline, format_duration};
use std::path::PathBuf;
use std::time::Duration;
use tokio::signal::unix::{SignalKind, signal};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// fencewatchd - geofence monitoring watchdog
#[derive(Parser, Debug)]
#[command(name = "fencewatchd")]
#[command(
    about = "Polls subject locations against their geofences and mails alerts on transitions",
    long_about = None
)]
struct Args {
    /// Configuration file path
    #[arg(short, long)]
    config: PathBuf,

    /// Run duration override in seconds (or set FENCEWATCH_RUN_SECONDS)
    #[arg(long, env = "FENCEWATCH_RUN_SECONDS")]
    run_seconds: Option<u64>,

    /// SMTP login username
    #[arg(long, env = "FENCEWATCH_SMTP_USERNAME")]
    smtp_username: String,

    /// SMTP login password
    #[arg(long, env = "FENCEWATCH_SMTP_PASSWORD", hide_env_values = true)]
    smtp_password: String,

    /// Log level
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

/// Counters reported once at the end of the run
#[derive(Debug, Default)]
struct RunCounters {
    ticks: u64,
    polls: u64,
    alerts: u64,
    api_errors: u64,
}

/// Main service state
struct Service {
    settings: Settings,
    engine: WatchEngine,
    source: HttpLocationClient,
    notifier: Notifier<SmtpMailer>,
    counters: RunCounters,
}

impl Service {
    async fn new(args: &Args) -> Result<Self> {
        let mut settings = load_config(&args.config)
            .with_context(|| format!("Failed to load config from {:?}", args.config))?;

        if let Some(seconds) = args.run_seconds {
            settings.monitor.run_duration = Duration::from_secs(seconds);
        }

        info!(
            config_path = %args.config.display(),
            roster_size = settings.roster.len(),
            poll_interval = %format_duration(settings.monitor.poll_interval),
            run_duration = %format_duration(settings.monitor.run_duration),
            "Configuration loaded"
        );

        let source = HttpLocationClient::new(LocationApiConfig {
            base_url: settings.source.base_url.clone(),
            request_timeout: settings.source.request_timeout,
            retry_attempts: settings.source.retry_attempts,
            retry_delay: settings.source.retry_delay,
        });

        // One mail session for the whole run; the notifier owns it from here.
        let mailer = SmtpMailer::connect(SmtpConfig {
            host: settings.mail.smtp_host.clone(),
            port: settings.mail.smtp_port,
            sender: settings.mail.sender.clone(),
            recipients: settings.mail.recipients.clone(),
            username: args.smtp_username.clone(),
            password: args.smtp_password.clone(),
        })
        .await
        .context("Failed to open mail session")?;

        let engine = WatchEngine::new(settings.roster_ids());

        Ok(Self {
            settings,
            engine,
            source,
            notifier: Notifier::new(mailer),
            counters: RunCounters::default(),
        })
    }

    async fn run(mut self) -> Result<()> {
        let deadline = Deadline::after(self.settings.monitor.run_duration);

        let mut sigterm =
            signal(SignalKind::terminate()).context("Failed to create SIGTERM handler")?;
        let mut sigint =
            signal(SignalKind::interrupt()).context("Failed to create SIGINT handler")?;

        let ends_at = Local::now()
            + chrono::Duration::from_std(self.settings.monitor.run_duration)
                .unwrap_or_else(|_| chrono::Duration::zero());
        info!(until = %ends_at.format("%Y-%m-%d %H:%M:%S"), "Monitor running");

        loop {
            if deadline.is_reached() {
                info!("Run deadline reached");
                break;
            }

            self.roster_pass().await?;
            self.counters.ticks += 1;

            tokio::select! {
                _ = tokio::time::sleep(self.settings.monitor.poll_interval) => {}
                _ = sigterm.recv() => {
                    info!("Received SIGTERM, shutting down gracefully");
                    break;
                }
                _ = sigint.recv() => {
                    info!("Received SIGINT, shutting down gracefully");
                    break;
                }
            }
        }

        self.notifier.close().await;

        info!(
            ticks = self.counters.ticks,
            polls = self.counters.polls,
            alerts = self.counters.alerts,
            api_errors = self.counters.api_errors,
            "Monitor stopped"
        );

        Ok(())
    }

    /// One tick: poll every subject in roster order, advance its status, and
    /// dispatch the indicated alert.
    async fn roster_pass(&mut self) -> Result<()> {
        for subject in &self.settings.roster {
            let classification = self
                .source
                .fetch_status(&subject.id)
                .await
                .with_context(|| format!("Fatal payload defect polling subject {}", subject.id))?;
            self.counters.polls += 1;

            if classification == Classification::ApiError {
                self.counters.api_errors += 1;
            }

            let transition = self.engine.observe(&subject.id, classification)?;

            if let Some(kind) = transition.alert {
                let alert_id = AlertId::new();
                info!(
                    alert = %alert_id,
                    subject = %subject.id,
                    label = subject.label.as_deref().unwrap_or(""),
                    kind = %kind,
                    from = %transition.previous,
                    to = %transition.next,
                    "Dispatching alert"
                );
                self.notifier
                    .notify(kind, &subject.id)
                    .await
                    .with_context(|| format!("Mail delivery failed for subject {}", subject.id))?;
                self.counters.alerts += 1;
            }
        }

        Ok(())
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::try_new(&args.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let service = Service::new(&args).await?;
    service.run().await
}
