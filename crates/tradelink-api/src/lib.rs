//! # tradelink-api: REST Client for the Trading Backend
//!
//! All HTTP traffic between the client and the supplier REST API goes
//! through this crate.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   tradelink-flow                                                        │
//! │   (workflows)  ───depends on───►  traits (OrdersApi, SalesApi, ...)    │
//! │                                        ▲                                │
//! │                                        │ implemented by                 │
//! │                                   RestClient                            │
//! │                                        │                                │
//! │                                   HttpClient (reqwest)                  │
//! │                                        │                                │
//! │                                   Trading backend (REST)                │
//! │                                                                         │
//! │   Workflows never see reqwest; tests swap RestClient for a fake.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`traits`] - API port traits, the seam the workflows depend on
//! - [`client`] - [`RestClient`], the production implementation
//! - [`http`] - bearer auth, timeouts, status → error mapping
//! - [`config`] - base URL, token, timeout (explicit or from env)
//! - [`session`] - the 401 → session-expired callback
//! - [`error`] - the API error taxonomy

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod session;
pub mod traits;

pub use client::RestClient;
pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};
pub use session::{LoggingSession, SessionEvents};
pub use traits::{OrdersApi, ReceiptsApi, SalesApi, TransportersApi, WholesalersApi};
