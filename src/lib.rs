pub mod client;
pub mod config;
pub mod context;
pub mod error;
pub mod i18n;
pub mod not_found;
pub mod resource;
pub mod routes;
pub mod store;

pub use client::{ApiClient, SiteShell};
pub use config::Config;
pub use context::AppContext;
pub use error::ApiError;
pub use resource::{Mutation, Query, RequestState};
pub use routes::{Audience, HttpMethod, Operation, PathParams, Route};
