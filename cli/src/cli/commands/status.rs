use std::path::PathBuf;

use fpl_relay_core::config::{default_config_path, load_config};

pub async fn run(config_path: Option<PathBuf>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;

    println!("FPL Relay Status");
    println!("================");
    println!();
    println!("Configuration:");
    println!("  Config file: {:?}", default_config_path());
    println!();
    println!("Server settings:");
    println!("  Host: {}", config.server.host);
    println!("  Port: {}", config.server.port);
    println!();
    println!("Relay settings:");
    println!("  Upstream base: {}", config.upstream.base_url);
    println!("  Allowed origin: {}", config.cors.allowed_origin);
    println!("  Request timeout: {}s", config.upstream.request_timeout);

    // Check if server is reachable
    println!();
    let url = format!("http://{}:{}/", config.server.host, config.server.port);
    match reqwest::get(&url).await {
        Ok(resp) if resp.status().is_success() => {
            println!("Server: RUNNING ✓");
        }
        _ => {
            println!("Server: NOT RUNNING");
        }
    }

    Ok(())
}
