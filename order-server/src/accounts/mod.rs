//! User accounts backing the principal resolver

pub mod model;
pub mod service;

pub use model::User;
pub use service::AccountService;
