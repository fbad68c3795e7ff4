use clap::{Parser, ValueEnum};
use std::{net::SocketAddr, path::PathBuf};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum StorageBackend {
    /// Persist users in MongoDB.
    Mongodb,
    /// Keep users in process memory. Everything is lost on exit.
    Memory,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Clone, Debug, Parser)]
#[command(name = "roster-api", version, about = "User directory REST API")]
pub struct ApiConfig {
    #[clap(
        short,
        long,
        env = "ROSTER_API_BIND_ADDR",
        default_value = "0.0.0.0:4000"
    )]
    pub bind_addr: SocketAddr,

    #[clap(
        long,
        env = "ROSTER_API_PUBLIC_URL",
        default_value = "http://localhost:4000"
    )]
    pub public_url: String,

    #[clap(long, default_value_t = false)]
    pub dump_openapi: bool,

    #[clap(
        long,
        env = "ROSTER_API_STORAGE",
        value_enum,
        default_value_t = StorageBackend::Mongodb
    )]
    pub storage: StorageBackend,

    #[clap(
        long,
        env = "ROSTER_API_MONGODB_URI",
        default_value = "mongodb://localhost:27017/roster"
    )]
    pub mongodb_uri: String,

    /// Shared secret used to verify HS256 bearer tokens.
    ///
    /// Mutually exclusive with `jwt_secret_file`.
    #[clap(long, env = "JWT_SECRET_KEY", hide_env_values = true)]
    pub jwt_secret: Option<String>,

    /// Path to a file holding the bearer token secret. A single trailing
    /// newline is ignored.
    ///
    /// Mutually exclusive with `jwt_secret`.
    #[clap(long, env = "JWT_SECRET_KEY_FILE", conflicts_with = "jwt_secret")]
    pub jwt_secret_file: Option<PathBuf>,

    #[clap(
        long,
        env = "ROSTER_API_LOG_FORMAT",
        value_enum,
        default_value_t = LogFormat::Pretty
    )]
    pub log_format: LogFormat,
}

impl ApiConfig {
    /// Get the token secret from either inline config or file.
    ///
    /// Checks `jwt_secret` first, then falls back to reading from
    /// `jwt_secret_file`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Neither `jwt_secret` nor `jwt_secret_file` is configured
    /// - `jwt_secret_file` path doesn't exist or can't be read
    /// - The resolved secret is empty
    pub fn get_jwt_secret(&self) -> anyhow::Result<String> {
        let secret = if let Some(ref secret) = self.jwt_secret {
            secret.clone()
        } else if let Some(ref path) = self.jwt_secret_file {
            let raw = std::fs::read_to_string(path)
                .map_err(|e| anyhow::anyhow!("failed to read JWT secret file: {}", e))?;
            raw.strip_suffix('\n')
                .map(|s| s.strip_suffix('\r').unwrap_or(s))
                .unwrap_or(&raw)
                .to_string()
        } else {
            return Err(anyhow::anyhow!(
                "no JWT secret configured (set JWT_SECRET_KEY or JWT_SECRET_KEY_FILE)"
            ));
        };

        if secret.is_empty() {
            return Err(anyhow::anyhow!("JWT secret must not be empty"));
        }

        Ok(secret)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> ApiConfig {
        ApiConfig::try_parse_from(std::iter::once("roster-api").chain(args.iter().copied()))
            .unwrap()
    }

    #[test]
    fn inline_secret_wins() {
        let cfg = parse(&["--jwt-secret", "alguma-senha-secreta"]);
        assert_eq!(cfg.get_jwt_secret().unwrap(), "alguma-senha-secreta");
    }

    #[test]
    fn secret_file_strips_trailing_newline() {
        let path = std::env::temp_dir().join(format!("roster-secret-{}", std::process::id()));
        std::fs::write(&path, "from-file\n").unwrap();

        let cfg = parse(&["--jwt-secret-file", path.to_str().unwrap()]);
        let secret = cfg.get_jwt_secret();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(secret.unwrap(), "from-file");
    }

    #[test]
    fn missing_secret_file_is_an_error() {
        let cfg = parse(&["--jwt-secret-file", "/definitely/not/here"]);
        assert!(cfg.get_jwt_secret().is_err());
    }

    #[test]
    fn backend_and_log_format_parse() {
        let cfg = parse(&["--storage", "memory", "--log-format", "json"]);
        assert_eq!(cfg.storage, StorageBackend::Memory);
        assert_eq!(cfg.log_format, LogFormat::Json);
    }
}
