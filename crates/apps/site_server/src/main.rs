use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod routes;

#[derive(Clone, Debug)]
pub struct SiteConfig {
    pub addr: SocketAddr,
    pub templates: PathBuf,
    pub static_root: PathBuf,
    pub data_root: PathBuf,
}

impl SiteConfig {
    fn from_env() -> Result<Self, String> {
        let addr = env_var_or("SITE_ADDR", "127.0.0.1:8080");
        let addr: SocketAddr = addr
            .parse()
            .map_err(|e| format!("invalid SITE_ADDR {addr:?}: {e}"))?;
        Ok(Self {
            addr,
            templates: PathBuf::from(env_var_or("SITE_TEMPLATES", "templates")),
            static_root: PathBuf::from(env_var_or("SITE_STATIC", "static")),
            data_root: PathBuf::from(env_var_or("SITE_DATA", "data")),
        })
    }
}

fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = match SiteConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            error!("{err}");
            std::process::exit(2);
        }
    };
    info!(
        templates = %config.templates.display(),
        static_root = %config.static_root.display(),
        data_root = %config.data_root.display(),
        "site configuration loaded"
    );

    let addr = config.addr;
    let app = routes::app(Arc::new(config));

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(err) => {
            error!("failed to bind {addr}: {err}");
            std::process::exit(1);
        }
    };
    info!("site server listening on http://{addr}");
    if let Err(err) = axum::serve(listener, app).await {
        error!("server stopped: {err}");
    }
}
