use vitrina_core::AppError;

/// Default database location, next to the process working directory.
/// `mode=rwc` creates the file on first startup.
const DEFAULT_URL: &str = "sqlite:vitrina.db?mode=rwc";

/// Configuration for the database connection pool.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

impl DatabaseConfig {
    /// Read configuration from environment variables.
    ///
    /// - `VITRINA_DATABASE_URL` (optional, defaults to a local `vitrina.db`)
    /// - `VITRINA_DATABASE_MAX_CONNECTIONS` (optional, defaults to 5)
    pub fn from_env() -> Result<Self, AppError> {
        let url =
            std::env::var("VITRINA_DATABASE_URL").unwrap_or_else(|_| DEFAULT_URL.to_string());

        let max_connections = match std::env::var("VITRINA_DATABASE_MAX_CONNECTIONS") {
            Err(_) => 5,
            Ok(raw) => {
                let parsed: u32 = raw.parse().map_err(|_| {
                    AppError::ConfigError(format!(
                        "Invalid VITRINA_DATABASE_MAX_CONNECTIONS '{raw}': must be a positive integer"
                    ))
                })?;
                if parsed == 0 {
                    return Err(AppError::ConfigError(
                        "VITRINA_DATABASE_MAX_CONNECTIONS must be at least 1".into(),
                    ));
                }
                parsed
            }
        };

        Ok(Self {
            url,
            max_connections,
        })
    }
}
