//! Credentials and endpoints, read from the environment.

pub const DEFAULT_POCKET_ENDPOINT: &str = "https://getpocket.com/v3/get";
pub const DEFAULT_PINBOARD_ENDPOINT: &str = "https://api.pinboard.in/v1/posts/add";

const REQUIRED_VARS: [&str; 4] = [
    "POCKET_CONSUMER_KEY",
    "POCKET_ACCESS_TOKEN",
    "PINBOARD_USERNAME",
    "PINBOARD_API_TOKEN",
];

#[derive(Debug, Clone)]
pub struct PocketConfig {
    pub endpoint: String,
    pub consumer_key: String,
    pub access_token: String,
}

#[derive(Debug, Clone)]
pub struct PinboardConfig {
    pub endpoint: String,
    pub username: String,
    pub api_token: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub pocket: PocketConfig,
    pub pinboard: PinboardConfig,
}

impl Config {
    /// Reads the four required credentials plus the optional endpoint
    /// overrides. All missing variables are reported in one error.
    pub fn from_env() -> anyhow::Result<Self> {
        let missing = REQUIRED_VARS
            .iter()
            .copied()
            .filter(|name| std::env::var(name).is_err())
            .collect::<Vec<_>>();
        if !missing.is_empty() {
            anyhow::bail!(
                "missing required environment variables: {}",
                missing.join(", ")
            );
        }

        Ok(Self {
            pocket: PocketConfig {
                endpoint: env_or("POCKET_API_ENDPOINT", DEFAULT_POCKET_ENDPOINT),
                consumer_key: env_required("POCKET_CONSUMER_KEY")?,
                access_token: env_required("POCKET_ACCESS_TOKEN")?,
            },
            pinboard: PinboardConfig {
                endpoint: env_or("PINBOARD_API_ENDPOINT", DEFAULT_PINBOARD_ENDPOINT),
                username: env_required("PINBOARD_USERNAME")?,
                api_token: env_required("PINBOARD_API_TOKEN")?,
            },
        })
    }
}

fn env_required(name: &str) -> anyhow::Result<String> {
    std::env::var(name).map_err(|_| anyhow::anyhow!("{name} is not set"))
}

fn env_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_owned())
}
