//! Server Configuration
//!
//! Read once at startup from the environment (after `.env` is loaded).
//!
//! | Variable | Default |
//! |---|---|
//! | `DATABASE_URL` | required |
//! | `DATABASE_MAX_CONNECTIONS` | `5` |
//! | `BIND_ADDR` | `0.0.0.0:3000` |
//! | `TOKEN_SECRET` | Base64, 32 bytes; random in debug builds |
//! | `TOKEN_TTL_SECS` | 7 days |
//! | `PASSWORD_PEPPER` | none |
//! | `FRONTEND_ORIGINS` | `http://localhost:5173,http://127.0.0.1:5173` |

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{Context, bail};
use board::BoardConfig;
use identity::IdentityConfig;
use platform::crypto::from_base64;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_FRONTEND_ORIGINS: &str = "http://localhost:5173,http://127.0.0.1:5173";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub database_url: String,
    pub database_max_connections: u32,
    pub bind_addr: SocketAddr,
    pub frontend_origins: Vec<String>,
    pub identity: IdentityConfig,
    pub board: BoardConfig,
}

impl ApiConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok(), cfg!(debug_assertions))
    }

    /// `allow_random_secret` lets a missing `TOKEN_SECRET` fall back to a
    /// per-process secret; tokens then die with the process.
    pub fn from_lookup<F>(lookup: F, allow_random_secret: bool) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let database_url = get("DATABASE_URL").context("DATABASE_URL must be set")?;

        let database_max_connections = match get("DATABASE_MAX_CONNECTIONS") {
            Some(raw) => raw
                .parse()
                .with_context(|| format!("DATABASE_MAX_CONNECTIONS is not a number: {raw}"))?,
            None => DEFAULT_MAX_CONNECTIONS,
        };

        let bind_addr = get("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse()
            .context("BIND_ADDR must be host:port")?;

        let frontend_origins = get("FRONTEND_ORIGINS")
            .unwrap_or_else(|| DEFAULT_FRONTEND_ORIGINS.to_string())
            .split(',')
            .map(str::trim)
            .filter(|o| !o.is_empty())
            .map(String::from)
            .collect();

        let mut identity = match get("TOKEN_SECRET") {
            Some(raw) => IdentityConfig {
                token_secret: decode_secret(&raw)?,
                ..IdentityConfig::default()
            },
            None if allow_random_secret => {
                tracing::warn!("TOKEN_SECRET not set, using a random secret for this process");
                IdentityConfig::development()
            }
            None => bail!("TOKEN_SECRET must be set in production"),
        };

        if let Some(raw) = get("TOKEN_TTL_SECS") {
            let secs: u64 = raw
                .parse()
                .with_context(|| format!("TOKEN_TTL_SECS is not a number: {raw}"))?;
            identity.token_ttl = Duration::from_secs(secs);
        }

        identity.password_pepper = get("PASSWORD_PEPPER").map(String::into_bytes);

        Ok(Self {
            database_url,
            database_max_connections,
            bind_addr,
            frontend_origins,
            identity,
            board: BoardConfig::default(),
        })
    }
}

fn decode_secret(raw: &str) -> anyhow::Result<[u8; 32]> {
    let bytes = from_base64(raw).context("TOKEN_SECRET must be Base64")?;
    <[u8; 32]>::try_from(bytes.as_slice())
        .map_err(|_| anyhow::anyhow!("TOKEN_SECRET must decode to 32 bytes (got {})", bytes.len()))
}
