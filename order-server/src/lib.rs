//! Order Server - multi-tenant food-ordering backend
//!
//! # Layout
//!
//! ```text
//! order-server/src/
//! ├── core/          # config, state, errors, server
//! ├── auth/          # JWT, principal resolution, middleware
//! ├── orders/        # order authorization and lifecycle
//! ├── accounts/      # user accounts
//! ├── restaurants/   # restaurants
//! ├── api/           # HTTP routes and handlers
//! ├── db/            # redb storage
//! └── utils/         # logging, validation
//! ```

pub mod accounts;
pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod orders;
pub mod restaurants;
pub mod utils;

// Re-exports
pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use db::Storage;
pub use orders::{OrderError, OrderService};
pub use shared::{ApiResponse, AppError, AppResult, ErrorCode};

pub use utils::logger::init_logger;

/// Security logging macro
///
/// Emits on target `security`; fields use the usual tracing syntax
/// (`user_id = %id`, `roles = ?roles`).
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr) => {
        tracing::info!(target: "security", level = $level, event = $event);
    };
    ($level:expr, $event:expr, $($fields:tt)+) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($fields)+
        );
    };
}
