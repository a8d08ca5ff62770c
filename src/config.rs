use anyhow::Context;
use clap::Parser;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

use crate::i18n::Language;

#[derive(Parser, Debug)]
#[command(name = "bayleaf", about = "Bay Leaf restaurant site and admin dashboard")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Host to bind to
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind to
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Base URL of the hosted table service
    #[arg(long, env = "SUPABASE_URL")]
    pub supabase_url: Option<String>,

    /// Anonymous API key of the hosted table service
    #[arg(long, env = "SUPABASE_ANON_KEY", hide_env_values = true)]
    pub supabase_anon_key: Option<String>,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub remote: RemoteConfig,
    pub site: SiteConfig,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct RemoteConfig {
    pub url: Option<String>,
    pub anon_key: Option<String>,
    pub timeout_secs: u64,
}

/// Restaurant details shown on the public pages
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct SiteConfig {
    pub name: String,
    pub default_language: Language,
    pub address: String,
    pub phone: String,
    pub email: String,
    pub hours: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            url: None,
            anon_key: None,
            timeout_secs: 30,
        }
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            name: "Bay Leaf".to_string(),
            default_language: Language::En,
            address: "August-Ruf-Straße 16, 78224 Singen (Hohentwiel)".to_string(),
            phone: "+49 179 423 2002".to_string(),
            email: "info@bay-leaf.eu".to_string(),
            hours: vec![
                "Tue-Sun: 11:30 AM - 2:30 PM / 5:30 PM - 10:00 PM".to_string(),
                "Closed on Mondays".to_string(),
            ],
        }
    }
}

impl RemoteConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Service URL and key, both of which are required to start
    pub fn credentials(&self) -> anyhow::Result<(&str, &str)> {
        let url = self.url.as_deref().filter(|u| !u.trim().is_empty());
        let key = self.anon_key.as_deref().filter(|k| !k.trim().is_empty());
        match (url, key) {
            (Some(url), Some(key)) => Ok((url, key)),
            _ => anyhow::bail!("Missing Supabase configuration"),
        }
    }
}

impl Config {
    pub fn load(cli: &Cli) -> anyhow::Result<Self> {
        let config_path = match cli.config.clone() {
            Some(path) => path,
            None => Self::config_dir()?.join("config.toml"),
        };

        let mut config = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)
                .with_context(|| format!("Failed to read {}", config_path.display()))?;
            toml::from_str(&content)
                .with_context(|| format!("Invalid config file {}", config_path.display()))?
        } else {
            Config::default()
        };

        // CLI overrides
        if let Some(ref host) = cli.host {
            config.server.host = host.clone();
        }
        if let Some(port) = cli.port {
            config.server.port = port;
        }
        if let Some(ref url) = cli.supabase_url {
            config.remote.url = Some(url.clone());
        }
        if let Some(ref key) = cli.supabase_anon_key {
            config.remote.anon_key = Some(key.clone());
        }

        config.remote.credentials()?;

        Ok(config)
    }

    pub fn config_dir() -> anyhow::Result<PathBuf> {
        let home = dirs::home_dir().context("Could not determine home directory")?;
        Ok(home.join(".bayleaf"))
    }
}
