use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use client::ClientConfig;
use url::Url;

#[derive(Args, Clone, Debug)]
pub struct Config {
    /// Base of the store's REST api; request paths are appended to it.
    #[arg(
        long,
        env = "STOREFRONT_API_URL",
        default_value = "http://localhost:5000/api",
        global = true
    )]
    pub api_url: Url,

    /// Where the signed-in session is kept. Defaults to ~/.storefront/session.json
    #[arg(long, env = "STOREFRONT_SESSION_FILE", global = true)]
    pub session_file: Option<PathBuf>,

    #[arg(
        long,
        env = "STOREFRONT_LOGIN_ROUTE",
        default_value = "/login",
        global = true
    )]
    pub login_route: String,

    /// Path prefixes whose 401 responses do not end the session.
    #[arg(
        long = "anonymous-prefix",
        env = "STOREFRONT_ANONYMOUS_PREFIXES",
        value_delimiter = ',',
        global = true
    )]
    pub anonymous_prefixes: Vec<String>,

    /// Print raw JSON instead of text.
    #[arg(long, global = true)]
    pub json: bool,
}

impl Config {
    pub fn session_path(&self) -> anyhow::Result<PathBuf> {
        match &self.session_file {
            Some(path) => Ok(path.clone()),
            None => home::home_dir()
                .map(|home| home.join(".storefront").join("session.json"))
                .context("Cannot locate the home directory, pass --session-file"),
        }
    }

    pub fn client_config(&self) -> ClientConfig {
        let config = ClientConfig::new(self.api_url.clone()).with_login_route(&self.login_route);
        if self.anonymous_prefixes.is_empty() {
            config
        } else {
            config.with_anonymous_tolerant_prefixes(self.anonymous_prefixes.iter().cloned())
        }
    }
}
