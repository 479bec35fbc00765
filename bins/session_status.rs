use std::path::Path;
use std::process::ExitCode;

use dotenvy::dotenv;
use models::{session::unix_now, PersistentRecord, Session};
use storage::FileStorage;
use tracing::{error, info, warn};
use uuid::Uuid;

/// Exit code when no session is cached.
const EXIT_ABSENT: u8 = 2;
/// Exit code when the cached session has expired.
const EXIT_EXPIRED: u8 = 3;

fn init_logging(format: configs::LogFormat) {
    match format {
        configs::LogFormat::Compact => common::utils::logging::init_logging_default(),
        configs::LogFormat::Json => common::utils::logging::init_logging_json(),
    }
    info!(service = "session-status", event = "logger_init", "tracing subscriber initialized");
}

fn main() -> ExitCode {
    // .env first so RUST_LOG, CONFIG_PATH and LOCAL_STORAGE_ROOT_PATH apply
    dotenv().ok();

    let cfg = match configs::AppConfig::load_and_validate() {
        Ok(cfg) => cfg,
        Err(e) => {
            common::utils::logging::init_logging_default();
            error!(service = "session-status", event = "config_invalid", error = %e, "failed to load configuration");
            return ExitCode::FAILURE;
        }
    };
    init_logging(cfg.logging.format);

    let run_id = Uuid::new_v4();
    let root = Path::new(&cfg.storage.root_path);
    if let Err(e) = common::env::ensure_storage_root(root) {
        error!(service = "session-status", event = "root_unavailable", %run_id, error = %e, "storage root unavailable");
        return ExitCode::FAILURE;
    }

    let storage = FileStorage::new(root);
    let session = match Session::load(&storage) {
        Ok(session) => session,
        Err(e) => {
            // A corrupt cache is surfaced rather than treated as absent.
            error!(service = "session-status", event = "load_failed", %run_id, key = Session::STORAGE_KEY, error = %e, "cannot load cached session");
            return ExitCode::FAILURE;
        }
    };

    // One clock read so the expiry check and remaining time agree.
    let now = unix_now();
    match session {
        None => {
            warn!(service = "session-status", event = "absent", %run_id, root = %root.display(), "no cached session; login required");
            println!("absent");
            ExitCode::from(EXIT_ABSENT)
        }
        Some(session) if session.is_expired_at(now) => {
            warn!(service = "session-status", event = "expired", %run_id, expires_at = session.expires_at(), "cached session expired; login required");
            println!("expired");
            ExitCode::from(EXIT_EXPIRED)
        }
        Some(session) => {
            let remaining = session.remaining_secs_at(now);
            info!(service = "session-status", event = "valid", %run_id, expires_at = session.expires_at(), remaining_secs = remaining, "cached session valid");
            println!("valid {remaining}s");
            ExitCode::SUCCESS
        }
    }
}
