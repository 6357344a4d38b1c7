use anyhow::{Context, Result};

pub const DEFAULT_API_BASE: &str = "https://api.github.com";
const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Clone)]
pub struct Config {
    pub github_token: Option<String>,
    pub api_base: String,
    pub bind_address: String,
}

impl Config {
    /// Read configuration from the process environment (after loading `.env`).
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let github_token = lookup("GITHUB_TOKEN").filter(|t| !t.trim().is_empty());

        let api_base = lookup("GITHUB_API_BASE")
            .unwrap_or_else(|| DEFAULT_API_BASE.into())
            .trim_end_matches('/')
            .to_string();

        let bind_address = match lookup("BIND_ADDRESS") {
            Some(addr) => addr,
            None => {
                let port = match lookup("PORT") {
                    Some(port) => port
                        .parse::<u16>()
                        .with_context(|| format!("Invalid PORT value: {}", port))?,
                    None => DEFAULT_PORT,
                };
                format!("0.0.0.0:{}", port)
            }
        };

        Ok(Self {
            github_token,
            api_base,
            bind_address,
        })
    }
}
