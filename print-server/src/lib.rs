//! Markit Print Server - local receipt and label printing over USB
//!
//! Browser tills post bills, reports and label batches as JSON; the server
//! renders them to ESC/POS or TSPL and writes them to the attached printer.
//!
//! # Module structure
//!
//! ```text
//! print-server/src/
//! ├── core/          # config, state, server
//! ├── api/           # HTTP handlers
//! ├── routes/        # router and middleware
//! ├── printing/      # payloads, renderers, executor
//! └── utils/         # errors, logging, time
//! ```

pub mod api;
pub mod core;
pub mod printing;
pub mod routes;
pub mod utils;

pub use crate::core::{Config, Server, ServerState};
pub use routes::build_app;
pub use utils::logger::init_logger_with_file;
pub use utils::{AppError, AppResult};

/// Load `.env`, read the configuration and initialize logging
pub fn setup_environment() -> anyhow::Result<Config> {
    // A missing .env file is fine
    let _ = dotenv::dotenv();

    let config = Config::from_env();
    init_logger_with_file(Some(&config.log_level), config.log_dir.as_deref());

    Ok(config)
}

pub fn print_banner() {
    println!(
        r#"
                       __   _ __
   ____ ___  ____ ______/ /__(_) /_
  / __ `__ \/ __ `/ ___/ //_/ / __/
 / / / / / / /_/ / /  / ,< / / /_
/_/ /_/ /_/\__,_/_/  /_/|_/_/\__/
        print server
    "#
    );
}
