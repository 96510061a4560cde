mod config;

use std::{
    env, process,
    str::FromStr,
    sync::{
        atomic::{AtomicBool, Ordering},
        mpsc, Arc,
    },
    thread,
    time::Duration,
};

use config::{AppConfig, ConfigError, Environment};
use core_types::types::AccountId;
use ledger::{LedgerController, LedgerError, LedgerEvent, Payment};
use log::{info, warn};
use thiserror::Error;
use time::{format_description::well_known::Rfc3339, OffsetDateTime};
use tokio::sync::broadcast;

fn main() {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));
    if let Err(err) = run() {
        eprintln!("frontdesk failed: {err}");
        process::exit(1);
    }
}

const STATUS_LOG_INTERVAL_SECS: u64 = 30;

fn run() -> Result<(), AppError> {
    let config = {
        let env = parse_environment()?;
        AppConfig::load(env)?
    };

    let controller = Arc::new(LedgerController::bootstrap(
        config.ledger.clone(),
        config.owner.clone(),
    )?);

    println!(
        "frontdesk booted in {} mode; ledger state at {:?}",
        config.env_label(),
        config.ledger.state_dir()
    );
    println!(
        "Owner: {}; accepted rating range: {}..={}",
        controller.owner(),
        config.ledger.rating_min,
        config.ledger.rating_max
    );

    seed_rooms(&controller, &config)?;

    let event_logger = EventLogger::spawn(controller.subscribe());
    let status_logger = StatusLogger::spawn(
        controller.clone(),
        Duration::from_secs(STATUS_LOG_INTERVAL_SECS),
    );

    if config.env == Environment::Dev {
        run_walkthrough(&controller)?;
    }

    println!("Front desk is open; press Ctrl+C to shut down.");
    wait_for_shutdown_signal()?;
    println!("Shutdown signal received; closing the front desk...");
    status_logger.shutdown();

    // Dropping the last controller handle closes the event stream.
    drop(controller);
    event_logger.join();
    Ok(())
}

#[derive(Debug, Error)]
enum AppError {
    #[error("usage: frontdesk <dev|prod>")]
    Usage,
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error("failed to install signal handler: {0}")]
    Signal(#[from] ctrlc::Error),
    #[error("failed while waiting for shutdown signal: {0}")]
    ShutdownWait(#[from] mpsc::RecvError),
}

fn parse_environment() -> Result<Environment, AppError> {
    let arg = env::args().nth(1).ok_or(AppError::Usage)?;
    Environment::from_str(&arg).map_err(AppError::from)
}

fn seed_rooms(controller: &LedgerController, config: &AppConfig) -> Result<(), AppError> {
    for def in &config.seed_rooms {
        controller.set_hotel_room(&config.owner, def.room_no, &def.category, def.tariff)?;
        println!(
            "Room {} configured: {} at tariff {}",
            def.room_no, def.category, def.tariff
        );
    }
    if config.seed_rooms.is_empty() {
        println!("No rooms configured; waiting for the owner.");
    }
    Ok(())
}

/// Books, checks in, and checks out one guest so the event stream and
/// treasury are observable in dev.
fn run_walkthrough(controller: &LedgerController) -> Result<(), AppError> {
    let guest = AccountId::new("guest-0");
    let room_no = 1;

    let tariff = controller.hotel_room_details(room_no).tariff;
    let receipt = controller.pay_to_book(
        room_no,
        Payment {
            payer: guest.clone(),
            amount: tariff,
        },
    )?;
    controller.check_in(&guest, room_no)?;
    controller.check_out(&guest, room_no, controller.config().rating_max)?;

    let room = controller.hotel_room_details(room_no);
    println!(
        "Walkthrough: room {} \"{}\" took payment {}, review {} ({} total), owner balance {}",
        room_no,
        room.category_name,
        receipt.amount,
        room.review,
        room.review_no,
        controller.balance()
    );
    Ok(())
}

fn wait_for_shutdown_signal() -> Result<(), AppError> {
    let (tx, rx) = mpsc::channel();
    ctrlc::set_handler(move || {
        let _ = tx.send(());
    })?;
    rx.recv()?;
    Ok(())
}

fn format_timestamp_ns(ts_ns: i64) -> String {
    OffsetDateTime::from_unix_timestamp_nanos(ts_ns as i128)
        .ok()
        .and_then(|dt| dt.format(&Rfc3339).ok())
        .unwrap_or_else(|| format!("{ts_ns}"))
}

struct EventLogger {
    handle: Option<thread::JoinHandle<()>>,
}

impl EventLogger {
    fn spawn(mut rx: broadcast::Receiver<LedgerEvent>) -> Self {
        let handle = thread::spawn(move || loop {
            match rx.blocking_recv() {
                Ok(event) => log_event(&event),
                Err(broadcast::error::RecvError::Lagged(missed)) => {
                    warn!("event logger lagged; {missed} notifications dropped");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        });
        Self {
            handle: Some(handle),
        }
    }

    fn join(mut self) {
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

fn log_event(event: &LedgerEvent) {
    match event {
        LedgerEvent::RoomBooked {
            room_no,
            customer,
            ts_ns,
        } => info!(
            "room {room_no} booked by {customer} at {}",
            format_timestamp_ns(*ts_ns)
        ),
        LedgerEvent::CheckedIn {
            room_no,
            customer,
            ts_ns,
        } => info!(
            "room {room_no} checked in by {customer} at {}",
            format_timestamp_ns(*ts_ns)
        ),
        LedgerEvent::CheckedOut {
            room_no,
            customer,
            rating,
            ts_ns,
        } => info!(
            "room {room_no} checked out by {customer} with rating {rating} at {}",
            format_timestamp_ns(*ts_ns)
        ),
    }
}

struct StatusLogger {
    stop: Arc<AtomicBool>,
    handle: Option<thread::JoinHandle<()>>,
}

impl StatusLogger {
    fn spawn(controller: Arc<LedgerController>, interval: Duration) -> Self {
        let stop = Arc::new(AtomicBool::new(false));
        let stop_clone = Arc::clone(&stop);
        let handle = thread::spawn(move || {
            while !stop_clone.load(Ordering::Relaxed) {
                let counts = controller.room_status_snapshot();
                info!(
                    "rooms: {} vacant, {} booked, {} occupied; owner balance {}",
                    counts.vacant,
                    counts.booked,
                    counts.occupied,
                    controller.balance()
                );
                sleep_with_stop(&stop_clone, interval);
            }
        });
        Self {
            stop,
            handle: Some(handle),
        }
    }

    fn shutdown(mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

fn sleep_with_stop(stop: &AtomicBool, interval: Duration) {
    const STEP: Duration = Duration::from_millis(200);
    let mut remaining = interval;
    while !stop.load(Ordering::Relaxed) && remaining > Duration::ZERO {
        let chunk = remaining.min(STEP);
        thread::sleep(chunk);
        remaining = remaining.saturating_sub(chunk);
    }
}
