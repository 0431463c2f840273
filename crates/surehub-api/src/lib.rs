// surehub-api: Async Rust client for the Sure Petcare cloud API

pub mod auth;
pub mod client;
pub mod endpoints;
pub mod error;
pub mod models;
pub mod resources;
pub mod transport;

pub use auth::{Credentials, token_seems_valid};
pub use client::SureApiClient;
pub use error::Error;
