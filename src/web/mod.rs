// src/web/mod.rs
//! Local server exposing the bootstrap credential to browser front-ends

use anyhow::Result;
use rocket::fairing::{Fairing, Info, Kind};
use rocket::http::{Header, Status};
use rocket::serde::json::Json;
use rocket::serde::Serialize;
use rocket::{catchers, get, options, routes, Build, Request, Response, Rocket, State};
use std::path::PathBuf;
use tracing::info;

use crate::core::ConfigManager;

pub struct ServerConfig {
    pub config_path: PathBuf,
    pub state_path: PathBuf,
}

#[derive(Debug, Serialize)]
#[serde(crate = "rocket::serde", rename_all = "camelCase")]
pub struct ConfigResponse {
    pub has_token: bool,
    pub api_key: Option<String>,
    pub api_base_url: String,
}

#[derive(Debug, Serialize)]
#[serde(crate = "rocket::serde")]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
#[serde(crate = "rocket::serde")]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

// CORS Fairing
pub struct Cors;

#[rocket::async_trait]
impl Fairing for Cors {
    fn info(&self) -> Info {
        Info {
            name: "Add CORS headers to responses",
            kind: Kind::Response,
        }
    }

    async fn on_response<'r>(&self, _request: &'r Request<'_>, response: &mut Response<'r>) {
        response.set_header(Header::new("Access-Control-Allow-Origin", "*"));
        response.set_header(Header::new("Access-Control-Allow-Methods", "GET, OPTIONS"));
        response.set_header(Header::new("Access-Control-Allow-Headers", "*"));
    }
}

/// The bootstrap file is re-read on every call so a fresh CLI login is
/// picked up without restarting the server.
#[get("/config")]
pub async fn get_config(config: &State<ServerConfig>) -> Json<ConfigResponse> {
    let manager = ConfigManager::load_from(config.config_path.clone(), config.state_path.clone());
    let api_key = manager.api_key().map(str::to_string);
    info!("Serving bootstrap config (token present: {})", api_key.is_some());

    Json(ConfigResponse {
        has_token: api_key.is_some(),
        api_key,
        api_base_url: manager.net_api_base_url(),
    })
}

#[get("/health")]
pub async fn health() -> Json<&'static str> {
    Json("OK")
}

#[options("/<_..>")]
pub async fn options() -> Status {
    Status::Ok
}

#[rocket::catch(404)]
pub fn not_found() -> Json<ErrorResponse> {
    Json(ErrorResponse {
        error: ErrorDetail {
            code: "NOT_FOUND".to_string(),
            message: "Unknown route".to_string(),
        },
    })
}

#[rocket::catch(500)]
pub fn internal_error() -> Json<ErrorResponse> {
    Json(ErrorResponse {
        error: ErrorDetail {
            code: "INTERNAL_ERROR".to_string(),
            message: "Internal server error".to_string(),
        },
    })
}

pub fn build_rocket(config: ServerConfig, port: u16) -> Rocket<Build> {
    let figment = rocket::Config::figment()
        .merge(("port", port))
        .merge(("address", "127.0.0.1"));

    rocket::custom(figment)
        .attach(Cors)
        .manage(config)
        .register("/api", catchers![not_found, internal_error])
        .mount("/api", routes![get_config, health, options])
}

pub async fn start_config_server(config: ServerConfig, port: u16) -> Result<()> {
    info!("Starting Net Studio config server on http://127.0.0.1:{}", port);
    info!("Bootstrap file: {}", config.config_path.display());

    build_rocket(config, port)
        .launch()
        .await
        .map_err(|e| anyhow::anyhow!("Config server failed: {}", e))?;
    Ok(())
}
