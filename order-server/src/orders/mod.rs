//! Order authorization and lifecycle
//!
//! - **visibility**: who may list, read, update or delete an order
//! - **lifecycle**: validated creation and field mutation, totals recomputed
//! - **service**: the use cases, composing the two with an [`OrderStore`]
//!
//! # Data Flow
//!
//! ```text
//! Principal → OrderService → visibility gate → LifecycleManager → OrderStore
//!                                                                    ↓
//!                                                               OrderDto
//! ```
//!
//! Storage and price resolution sit behind traits ([`OrderStore`],
//! [`RestaurantDirectory`], [`PriceCatalog`]) so the rules here never see redb.

pub mod catalog;
pub mod error;
pub mod lifecycle;
pub mod model;
pub mod service;
pub mod traits;
pub mod visibility;

pub use catalog::StubCatalog;
pub use error::{Denial, InvalidInput, OrderError, OrderResult};
pub use lifecycle::LifecycleManager;
pub use model::{Order, OrderItem};
pub use service::OrderService;
pub use traits::{CatalogEntry, OrderStore, PriceCatalog, RestaurantDirectory};
pub use visibility::{ListFilter, Operation};
