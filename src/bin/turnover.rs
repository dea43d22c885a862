//! Command-line entry point for calendar synchronization and reconciliation.
//!
//! Usage:
//!
//! ```text
//! turnover sync --subscription <uuid>
//! turnover detect-cancellations --property <uuid>
//! turnover reconcile-all
//! turnover attach-payment --subscription <uuid> --payment-intent <id>
//! ```
//!
//! Every command prints its JSON report on stdout. Logs go to stderr and are
//! filtered with `RUST_LOG` (default `info`).

use chrono_tz::Tz;
use clap::{Args, Parser, Subcommand};
use diesel::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool, PoolError};
use mockable::DefaultClock;
use serde::Serialize;
use std::num::NonZeroUsize;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::error;
use tracing_subscriber::EnvFilter;
use turnover::calendar::adapters::{HttpCalendarSource, HttpSourceConfig};
use turnover::calendar::ports::CalendarFetchError;
use turnover::job::adapters::postgres::PostgresJobStore;
use turnover::property::adapters::postgres::PostgresPropertyDirectory;
use turnover::property::domain::{PropertyId, SubscriptionId};
use turnover::sync::SyncSettings;
use turnover::sync::domain::{CancellationReport, SyncReport};
use turnover::sync::services::{
    BulkCancellationOrchestrator, CalendarSyncService, CancellationDetector,
    ContextResolutionError, ContextResolver, SyncTarget,
};
use uuid::Uuid;

type Directory = PostgresPropertyDirectory;
type Resolver = ContextResolver<Directory, Directory>;
type Detector =
    CancellationDetector<Directory, Directory, HttpCalendarSource, PostgresJobStore, DefaultClock>;

#[derive(Debug, Parser)]
#[command(name = "turnover", version, about = "Keeps cleaning jobs in step with booking calendars")]
struct Cli {
    /// `PostgreSQL` connection string.
    #[arg(long, env = "DATABASE_URL")]
    database_url: String,

    /// IANA timezone used for date-only bookings and the sync horizon.
    #[arg(long, env = "TURNOVER_TIMEZONE", default_value = "America/New_York")]
    timezone: String,

    /// Days from today before a booking is scheduled.
    #[arg(long, env = "TURNOVER_HORIZON_DAYS", default_value_t = 7)]
    horizon_days: u32,

    /// Jobs written per upsert statement.
    #[arg(long, env = "TURNOVER_BATCH_SIZE", default_value = "100")]
    batch_size: NonZeroUsize,

    /// Calendar request timeout in seconds.
    #[arg(long, env = "TURNOVER_HTTP_TIMEOUT_SECS", default_value_t = 20)]
    http_timeout_secs: u64,

    /// `User-Agent` sent with calendar requests.
    #[arg(long, env = "TURNOVER_USER_AGENT")]
    user_agent: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Upserts jobs from one subscription's calendar.
    Sync(TargetArgs),
    /// Archives jobs whose booking left one subscription's calendar.
    DetectCancellations(TargetArgs),
    /// Archives vanished jobs for every active subscription.
    ReconcileAll,
    /// Marks a subscription's earliest job as paid.
    AttachPayment {
        /// Subscription whose earliest job is paid.
        #[arg(long)]
        subscription: Uuid,
        /// Payment intent identifier from the payment provider.
        #[arg(long)]
        payment_intent: String,
    },
}

/// Subscription or property to operate on; the subscription wins when both
/// are given.
#[derive(Debug, Args)]
struct TargetArgs {
    /// Subscription identifier.
    #[arg(long)]
    subscription: Option<Uuid>,
    /// Property identifier.
    #[arg(long)]
    property: Option<Uuid>,
}

impl TargetArgs {
    fn target(&self) -> Result<SyncTarget, ContextResolutionError> {
        SyncTarget::from_parts(
            self.subscription.map(SubscriptionId::from_uuid),
            self.property.map(PropertyId::from_uuid),
        )
    }
}

#[derive(Debug, Error)]
enum CliError {
    #[error("unknown timezone: {0}")]
    InvalidTimezone(String),
    #[error("database pool: {0}")]
    Pool(#[from] PoolError),
    #[error("calendar client: {0}")]
    Calendar(#[from] CalendarFetchError),
    #[error("serialising report: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PaymentReport {
    success: bool,
    job_id: Option<String>,
    message: String,
}

struct Runtime {
    directory: Arc<Directory>,
    jobs: Arc<PostgresJobStore>,
    source: Arc<HttpCalendarSource>,
    clock: Arc<DefaultClock>,
    settings: SyncSettings,
}

impl Runtime {
    fn connect(cli: &Cli) -> Result<Self, CliError> {
        let timezone: Tz = cli
            .timezone
            .parse()
            .map_err(|_| CliError::InvalidTimezone(cli.timezone.clone()))?;
        let settings = SyncSettings::default()
            .with_timezone(timezone)
            .with_horizon_days(cli.horizon_days)
            .with_batch_size(cli.batch_size);

        let defaults = HttpSourceConfig::default();
        let http = HttpSourceConfig {
            timeout: Duration::from_secs(cli.http_timeout_secs),
            user_agent: cli.user_agent.clone().or(defaults.user_agent),
        };

        let manager = ConnectionManager::<PgConnection>::new(&cli.database_url);
        let pool = Pool::builder().build(manager)?;
        Ok(Self {
            directory: Arc::new(PostgresPropertyDirectory::new(pool.clone())),
            jobs: Arc::new(PostgresJobStore::new(pool)),
            source: Arc::new(HttpCalendarSource::new(&http)?),
            clock: Arc::new(DefaultClock),
            settings,
        })
    }

    fn resolver(&self) -> Resolver {
        ContextResolver::new(Arc::clone(&self.directory), Arc::clone(&self.directory))
    }

    fn sync_service(
        &self,
    ) -> CalendarSyncService<Directory, Directory, HttpCalendarSource, PostgresJobStore, DefaultClock>
    {
        CalendarSyncService::new(
            self.resolver(),
            Arc::clone(&self.directory),
            Arc::clone(&self.source),
            Arc::clone(&self.jobs),
            Arc::clone(&self.clock),
            self.settings,
        )
    }

    fn detector(&self) -> Detector {
        CancellationDetector::new(
            self.resolver(),
            Arc::clone(&self.source),
            Arc::clone(&self.jobs),
            Arc::clone(&self.clock),
        )
    }
}

/// Runs a command and returns whether its report marks success.
async fn run(cli: Cli) -> Result<bool, CliError> {
    let runtime = Runtime::connect(&cli)?;
    match cli.command {
        Command::Sync(args) => {
            let report = match args.target() {
                Ok(target) => runtime
                    .sync_service()
                    .sync(target)
                    .await
                    .unwrap_or_else(|err| SyncReport::aborted(err.to_string())),
                Err(err) => SyncReport::aborted(err.to_string()),
            };
            print_json(&report)?;
            Ok(report.success)
        }
        Command::DetectCancellations(args) => {
            let report = match args.target() {
                Ok(target) => runtime
                    .detector()
                    .detect(target)
                    .await
                    .unwrap_or_else(|err| CancellationReport::aborted(err.to_string())),
                Err(err) => CancellationReport::aborted(err.to_string()),
            };
            print_json(&report)?;
            Ok(report.success)
        }
        Command::ReconcileAll => {
            let orchestrator = BulkCancellationOrchestrator::new(
                Arc::clone(&runtime.directory),
                Arc::clone(&runtime.directory),
                runtime.detector(),
            );
            let report = orchestrator.reconcile_all().await;
            print_json(&report)?;
            Ok(report.success)
        }
        Command::AttachPayment {
            subscription,
            payment_intent,
        } => {
            let outcome = runtime
                .sync_service()
                .attach_initial_payment(SubscriptionId::from_uuid(subscription), &payment_intent)
                .await;
            let report = match outcome {
                Ok(Some(job_id)) => PaymentReport {
                    success: true,
                    job_id: Some(job_id.to_string()),
                    message: "Payment attached to the earliest job".to_owned(),
                },
                Ok(None) => PaymentReport {
                    success: false,
                    job_id: None,
                    message: "Subscription has no jobs".to_owned(),
                },
                Err(err) => PaymentReport {
                    success: false,
                    job_id: None,
                    message: err.to_string(),
                },
            };
            print_json(&report)?;
            Ok(report.success)
        }
    }
}

#[expect(clippy::print_stdout, reason = "reports are the command's output")]
fn print_json(report: &impl Serialize) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(Cli::parse()).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            error!(error = %err, "turnover failed");
            ExitCode::FAILURE
        }
    }
}
