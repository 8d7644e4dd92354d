use std::env;
use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use actix_web_prometheus::PrometheusMetricsBuilder;
use env_logger::Env;

pub mod catalog;
pub mod dates;
pub mod db;
pub mod error;
pub mod expense;
pub mod mcp;

pub use crate::db::AppState;

use crate::mcp::tools::calculator::CalculatorTools;
use crate::mcp::tools::ToolRegistry;
use crate::mcp::{McpService, McpState};

const DEFAULT_EXPENSE_PORT: u16 = 8000;
const DEFAULT_CALCULATOR_PORT: u16 = 8001;

fn init_logging() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
}

/// HOST/PORT from the environment, falling back to `default_port`.
fn bind_address(default_port: u16) -> (String, u16) {
    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = env::var("PORT")
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default_port);
    (host, port)
}

/// Run the expense tracking MCP server.
pub async fn run() -> std::io::Result<()> {
    dotenvy::dotenv().ok(); // Load .env file
    init_logging();

    let app_state = match AppState::new() {
        Ok(state) => state,
        Err(e) => {
            log::error!(
                "Failed to open the expense database. Check EXPENSE_DB_PATH and file permissions. Error: {}",
                e
            );
            std::process::exit(1);
        }
    };

    let registry = ToolRegistry::new(app_state, catalog::catalog_path_from_env());
    let mcp_state = web::Data::new(Arc::new(McpState::new(McpService::new(Arc::new(registry)))));

    let prometheus = PrometheusMetricsBuilder::new("expense_mcp_server")
        .endpoint("/metrics")
        .build()
        .expect("Failed to create Prometheus metrics middleware");

    let (host, port) = bind_address(DEFAULT_EXPENSE_PORT);
    log::info!("Starting expense server at http://{}:{}", host, port);

    HttpServer::new(move || {
        let mcp_state = mcp_state.clone();
        let prometheus = prometheus.clone();

        App::new()
            .wrap(prometheus)
            .app_data(mcp_state)
            .configure(mcp::config)
    })
    .bind((host, port))?
    .run()
    .await
}

/// Run the standalone calculator MCP server.
pub async fn run_calculator() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    init_logging();

    let service = McpService::new(Arc::new(CalculatorTools));
    let mcp_state = web::Data::new(Arc::new(McpState::new(service)));

    let (host, port) = bind_address(DEFAULT_CALCULATOR_PORT);
    log::info!("Starting calculator server at http://{}:{}", host, port);

    HttpServer::new(move || {
        let mcp_state = mcp_state.clone();

        App::new().app_data(mcp_state).configure(mcp::config)
    })
    .bind((host, port))?
    .run()
    .await
}
