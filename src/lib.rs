//! Smakowało Discount Service
//!
//! Backend for the Smakowało storefront's discount codes: an HTTP JSON
//! API that evaluates a user-supplied code against an order subtotal
//! and returns a structured decision.
//!
//! # Module structure
//!
//! ```text
//! src/
//! ├── core/        # Config, state, server startup
//! ├── api/         # HTTP routes and handlers
//! ├── middleware/  # Request logging
//! ├── pricing/     # Discount evaluation (the business logic)
//! ├── db/          # SQLite pool, models, repositories
//! └── utils/       # Errors, logging, time helpers
//! ```

pub mod api;
pub mod core;
pub mod db;
pub mod middleware;
pub mod pricing;
pub mod utils;

// Re-export public types
pub use crate::core::{AppState, Config, Server};
pub use pricing::{DiscountDecision, DiscountService};
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

pub fn print_banner() {
    println!(
        r#"
   _____                 _                    _
  / ____|               | |                  | |
 | (___  _ __ ___   __ _| | _______      ____| | ___
  \___ \| '_ ` _ \ / _` | |/ / _ \ \ /\ / / _` |/ _ \
  ____) | | | | | | (_| |   < (_) \ V  V / (_| | (_) |
 |_____/|_| |_| |_|\__,_|_|\_\___/ \_/\_/ \__,_|\___/
    "#
    );
}
