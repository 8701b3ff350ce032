//! Loading a configuration file into Rust types with serde.
//!
//! Run with: cargo run --example typed_config

use braceconf::from_str;
use serde::Deserialize;
use std::error::Error;

#[derive(Debug, Deserialize)]
struct Config {
    user: String,
    worker_processes: u32,
    http: Http,
}

#[derive(Debug, Deserialize)]
struct Http {
    sendfile: bool,
    #[serde(default)]
    gzip: bool,
    server: Vec<Server>,
}

#[derive(Debug, Deserialize)]
struct Server {
    #[serde(rename = "$value")]
    name: String,
    listen: Vec<u16>,
    root: Option<String>,
}

const CONFIG: &str = r#"
user www;
worker_processes 4;

http {
    sendfile on;

    server main {
        listen 80;
        listen 443;
        root "/srv/www";
    }

    server admin {
        listen 8080;
    }
}
"#;

fn main() -> Result<(), Box<dyn Error>> {
    let config: Config = from_str(CONFIG)?;

    println!("user {} with {} workers", config.user, config.worker_processes);
    println!("sendfile={} gzip={}", config.http.sendfile, config.http.gzip);
    for server in &config.http.server {
        println!(
            "  server {} on {:?} serving {}",
            server.name,
            server.listen,
            server.root.as_deref().unwrap_or("nothing")
        );
    }

    Ok(())
}
