//! Contact management REST service.
//!
//! A single `Contact` entity with create and filtered, paginated list
//! operations. Storage sits behind [`store::ContactStore`] so the HTTP layer
//! can run over `PostgreSQL` or an in-memory store.

#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod model;
pub mod pagination;
pub mod routes;
pub mod state;
pub mod store;

pub use routes::build_router;
pub use state::AppState;
