//! CLI Status Command
//!
//! Reports the pairing state of a running instance.

use anyhow::Result;
use serde_json::Value;

use tubewire_config::{config_dir, config_file_path, load_and_prepare};

pub async fn run(port: Option<u16>) -> Result<()> {
    let port = match port {
        Some(port) => port,
        None => load_and_prepare(&config_file_path(&config_dir())).await?.server.port,
    };

    println!("\n📊 tubewire status\n");

    let client = reqwest::Client::new();
    match client
        .get(format!("http://localhost:{port}/pair-code"))
        .send()
        .await
    {
        Ok(resp) => {
            let body: Value = resp.json().await?;
            println!("Session:    {}", body["status"].as_str().unwrap_or("unknown"));
            println!("Pair code:  {}\n", body["pairCode"].as_str().unwrap_or("-"));
        }
        Err(_) => {
            println!("tubewire is not running on port {port}\n");
        }
    }

    Ok(())
}
