//! ComandaGo Server - restaurant point of sale
//!
//! # Overview
//!
//! - **Cash shift** (`cashier`): open/close the drawer, balance snapshots
//!   recomputed from the order ledger
//! - **Database** (`db`): SQLite via sqlx, migrations, repositories
//! - **HTTP API** (`api`): tables, orders, kitchen, checkout, catalog, staff
//!
//! # Layout
//!
//! ```text
//! comanda-server/src/
//! ├── core/          # config, state, server, startup errors
//! ├── cashier/       # shift service and balance aggregation
//! ├── api/           # HTTP handlers
//! ├── routes/        # router and middleware stack
//! ├── utils/         # logging, money, time, validation
//! └── db/            # pool, migrations, repositories
//! ```

pub mod api;
pub mod cashier;
pub mod core;
pub mod db;
pub mod routes;
pub mod utils;

// Re-export public types
pub use cashier::ShiftService;
pub use core::{Config, Server, ServerState};
pub use utils::{AppError, AppResult, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// Load `.env` and start logging from the environment configuration
pub fn setup_environment() -> Config {
    if let Err(e) = dotenv::dotenv()
        && !e.not_found()
    {
        eprintln!("Failed to load .env: {e}");
    }

    let config = Config::from_env();
    init_logger_with_file(Some(&config.log_level), config.log_dir.as_deref());
    config
}

pub fn print_banner() {
    println!(
        r#"
   ______                                __       ______
  / ____/___  ____ ___  ____ _____  ____/ /___ _/ ____/___
 / /   / __ \/ __ `__ \/ __ `/ __ \/ __  / __ `/ / __/ __ \
/ /___/ /_/ / / / / / / /_/ / / / / /_/ / /_/ / /_/ / /_/ /
\____/\____/_/ /_/ /_/\__,_/_/ /_/\__,_/\__,_/\____/\____/
    "#
    );
}
