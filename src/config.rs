use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::{env, fmt};

pub const DEFAULT_SOCIAL_API_URL: &str = "https://app.ayrshare.com/api/post";

/// Where phrases are kept.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhraseBackend {
    /// Process memory, seeded with sample phrases; lost on restart.
    Memory,
    /// The SQLite database at `database_url`.
    Sqlite,
}

/// Centralized application configuration.
/// Combines environment variables and CLI arguments.
#[derive(Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub storage_dir: String,
    pub database_url: String,
    pub phrase_backend: PhraseBackend,
    pub social_api_url: String,
    pub social_api_key: Option<String>,
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("storage_dir", &self.storage_dir)
            .field("database_url", &self.database_url)
            .field("phrase_backend", &self.phrase_backend)
            .field("social_api_url", &self.social_api_url)
            .field(
                "social_api_key",
                &self.social_api_key.as_ref().map(|_| "<redacted>"),
            )
            .finish()
    }
}

/// Command-line + environment configuration.
#[derive(Parser, Debug, Default)]
#[command(author, version, about = "Phrase console API")]
pub struct Args {
    /// Host to bind to (overrides PHRASE_CONSOLE_HOST)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind to (overrides PHRASE_CONSOLE_PORT)
    #[arg(long)]
    pub port: Option<u16>,

    /// Directory where uploaded clips are stored (overrides PHRASE_CONSOLE_STORAGE_DIR)
    #[arg(long)]
    pub storage_dir: Option<String>,

    /// Database URL (overrides PHRASE_CONSOLE_DATABASE_URL)
    #[arg(long)]
    pub database_url: Option<String>,

    /// Phrase storage backend (overrides PHRASE_CONSOLE_PHRASE_BACKEND)
    #[arg(long, value_enum)]
    pub phrase_backend: Option<PhraseBackend>,

    /// Social posting endpoint (overrides PHRASE_CONSOLE_SOCIAL_API_URL)
    #[arg(long)]
    pub social_api_url: Option<String>,

    /// Run migrations and exit
    #[arg(long)]
    pub migrate: bool,
}

impl AppConfig {
    /// Parse environment variables + CLI args into AppConfig and migrate flag.
    pub fn from_env_and_args() -> Result<(Self, bool)> {
        // Parse CLI once
        let args = Args::parse();
        let migrate = args.migrate;
        let cfg = Self::merge(args, |key| env::var(key))?;
        Ok((cfg, migrate))
    }

    /// Merge CLI values over `lookup`ed environment values over defaults.
    pub fn merge<F>(args: Args, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Result<String, env::VarError>,
    {
        let optional = |key: &str| -> Result<Option<String>> {
            match lookup(key) {
                Ok(value) => Ok(Some(value)),
                Err(env::VarError::NotPresent) => Ok(None),
                Err(err) => Err(err).with_context(|| format!("reading {key}")),
            }
        };

        // --- Environment fallback ---
        let env_host = optional("PHRASE_CONSOLE_HOST")?.unwrap_or_else(|| "0.0.0.0".into());
        let env_port = match optional("PHRASE_CONSOLE_PORT")? {
            Some(value) => value
                .parse::<u16>()
                .with_context(|| format!("parsing PHRASE_CONSOLE_PORT value `{}`", value))?,
            None => 3000,
        };
        let env_storage =
            optional("PHRASE_CONSOLE_STORAGE_DIR")?.unwrap_or_else(|| "./data/clips".into());
        let env_db = optional("PHRASE_CONSOLE_DATABASE_URL")?
            .unwrap_or_else(|| "sqlite://./data/meta/phrases.db".into());
        let env_backend = match optional("PHRASE_CONSOLE_PHRASE_BACKEND")? {
            Some(value) => PhraseBackend::from_str(&value, true).map_err(|err| {
                anyhow::anyhow!("parsing PHRASE_CONSOLE_PHRASE_BACKEND value `{value}`: {err}")
            })?,
            None => PhraseBackend::Sqlite,
        };
        let env_social_url = optional("PHRASE_CONSOLE_SOCIAL_API_URL")?
            .unwrap_or_else(|| DEFAULT_SOCIAL_API_URL.into());
        let social_api_key =
            optional("PHRASE_CONSOLE_SOCIAL_API_KEY")?.filter(|k| !k.trim().is_empty());

        // --- Merge ---
        Ok(Self {
            host: args.host.unwrap_or(env_host),
            port: args.port.unwrap_or(env_port),
            storage_dir: args.storage_dir.unwrap_or(env_storage),
            database_url: args.database_url.unwrap_or(env_db),
            phrase_backend: args.phrase_backend.unwrap_or(env_backend),
            social_api_url: args.social_api_url.unwrap_or(env_social_url),
            social_api_key,
        })
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(
        vars: &[(&str, &str)],
    ) -> impl Fn(&str) -> Result<String, env::VarError> + use<> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned().ok_or(env::VarError::NotPresent)
    }

    #[test]
    fn defaults_apply_without_env_or_flags() {
        let cfg = AppConfig::merge(Args::default(), lookup(&[])).unwrap();
        assert_eq!(cfg.addr(), "0.0.0.0:3000");
        assert_eq!(cfg.phrase_backend, PhraseBackend::Sqlite);
        assert_eq!(cfg.social_api_url, DEFAULT_SOCIAL_API_URL);
        assert!(cfg.social_api_key.is_none());
    }

    #[test]
    fn flags_override_environment() {
        let args = Args {
            port: Some(8080),
            phrase_backend: Some(PhraseBackend::Memory),
            ..Args::default()
        };
        let cfg = AppConfig::merge(
            args,
            lookup(&[
                ("PHRASE_CONSOLE_PORT", "9000"),
                ("PHRASE_CONSOLE_HOST", "127.0.0.1"),
                ("PHRASE_CONSOLE_PHRASE_BACKEND", "sqlite"),
            ]),
        )
        .unwrap();
        assert_eq!(cfg.addr(), "127.0.0.1:8080");
        assert_eq!(cfg.phrase_backend, PhraseBackend::Memory);
    }

    #[test]
    fn bad_port_is_reported_with_context() {
        let err = AppConfig::merge(Args::default(), lookup(&[("PHRASE_CONSOLE_PORT", "http")]))
            .unwrap_err();
        assert!(err.to_string().contains("PHRASE_CONSOLE_PORT"));
    }

    #[test]
    fn api_key_is_redacted_in_debug_output() {
        let cfg = AppConfig::merge(
            Args::default(),
            lookup(&[("PHRASE_CONSOLE_SOCIAL_API_KEY", "super-secret")]),
        )
        .unwrap();
        assert_eq!(cfg.social_api_key.as_deref(), Some("super-secret"));
        let rendered = format!("{cfg:?}");
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("<redacted>"));
    }
}
