//! Net Studio: typed client and terminal front-end for the Net job and
//! matching network API.

pub mod api;
pub mod cli;
pub mod core;
pub mod types;
pub mod views;
pub mod web;

pub use crate::core::{
    ApiError, ApiResult, ConfigManager, NetClient, RequestOptions, Session, DEFAULT_NET_API_BASE_URL,
};
