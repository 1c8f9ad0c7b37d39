//! `velodash-api` -- async HTTP client for the Velocité rental service.
//!
//! A thin, hand-crafted reqwest wrapper over the service's JSON REST
//! endpoints: the pricing snapshot (the only endpoint with scheduling
//! semantics upstream), company branding, customer reviews, and login.
//! Wire shapes live in [`types`]; `velodash-core` converts them into
//! domain types.

mod client;
mod error;
mod transport;
pub mod types;

pub use client::RentalClient;
pub use error::Error;
pub use transport::TransportConfig;
