// src/core/mod.rs
//! Client plumbing shared by every endpoint wrapper and view

pub mod config_manager;
pub mod error;
pub mod net_client;
pub mod query;
pub mod session;

pub use config_manager::{BootstrapConfig, ConfigManager};
pub use error::{ApiError, ApiResult};
pub use net_client::{NetClient, RequestOptions, DEFAULT_NET_API_BASE_URL};
pub use query::{Query, ToQuery};
pub use session::{FileTokenStore, MemoryTokenStore, Session, TokenStore};
