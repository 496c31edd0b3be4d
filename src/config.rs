use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    #[serde(default)]
    pub jobs: JobsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobsConfig {
    /// Privileged credential the external scheduler presents as a bearer token.
    pub service_key: String,
    #[serde(default = "default_retention_days")]
    pub retention_days: i64,
    /// Also run the jobs on in-process daily loops, not only via HTTP triggers.
    #[serde(default = "default_spawn_tasks")]
    pub spawn_tasks: bool,
}

fn default_retention_days() -> i64 {
    30
}

fn default_spawn_tasks() -> bool {
    true
}

impl Default for JobsConfig {
    fn default() -> Self {
        Self {
            service_key: String::new(),
            retention_days: default_retention_days(),
            spawn_tasks: default_spawn_tasks(),
        }
    }
}

impl JobsConfig {
    fn ensure_service_key(&self) -> Result<(), String> {
        if self.service_key.is_empty() {
            return Err(
                "SERVICE_KEY is not set; the job endpoints require the service credential"
                    .to_string(),
            );
        }
        Ok(())
    }
}

impl Config {
    pub fn from_toml() -> Result<Self, Box<dyn std::error::Error>> {
        let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
        use std::io::ErrorKind;

        // Try the config file first; without one, build entirely from env vars.
        let config_result = std::fs::read_to_string(&config_path);

        let mut config: Config = match config_result {
            Ok(config_str) => {
                toml::from_str(&config_str).map_err(|e| format!("Failed to parse config file: {e}"))?
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                fn get_env(name: &str) -> Option<String> {
                    env::var(name).ok()
                }
                fn get_env_parse<T: std::str::FromStr>(name: &str, default: T) -> T {
                    env::var(name)
                        .ok()
                        .and_then(|v| v.parse::<T>().ok())
                        .unwrap_or(default)
                }

                // The database URL has no sensible default.
                let database_url = get_env("DATABASE_URL")
                    .ok_or("DATABASE_URL is not set and no config.toml was found")?;

                Config {
                    server: ServerConfig {
                        host: get_env("SERVER_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
                        port: get_env_parse("SERVER_PORT", 8080u16),
                    },
                    database: DatabaseConfig {
                        url: database_url,
                        max_connections: get_env_parse("DB_MAX_CONNECTIONS", 10u32),
                    },
                    jobs: JobsConfig {
                        service_key: get_env("SERVICE_KEY").unwrap_or_default(),
                        retention_days: get_env_parse(
                            "NOTIFICATION_RETENTION_DAYS",
                            default_retention_days(),
                        ),
                        spawn_tasks: get_env_parse("SPAWN_TASKS", default_spawn_tasks()),
                    },
                }
            }
            Err(e) => {
                return Err(format!("Failed to read config file {config_path}: {e}").into());
            }
        };

        // Environment variables override file values.
        if let Ok(v) = env::var("SERVER_HOST") {
            config.server.host = v;
        }
        if let Ok(v) = env::var("SERVER_PORT")
            && let Ok(p) = v.parse()
        {
            config.server.port = p;
        }
        if let Ok(v) = env::var("DATABASE_URL") {
            config.database.url = v;
        }
        if let Ok(v) = env::var("DB_MAX_CONNECTIONS")
            && let Ok(mc) = v.parse()
        {
            config.database.max_connections = mc;
        }
        if let Ok(v) = env::var("SERVICE_KEY") {
            config.jobs.service_key = v;
        }
        if let Ok(v) = env::var("NOTIFICATION_RETENTION_DAYS")
            && let Ok(n) = v.parse()
        {
            config.jobs.retention_days = n;
        }
        if let Ok(v) = env::var("SPAWN_TASKS")
            && let Ok(b) = v.parse()
        {
            config.jobs.spawn_tasks = b;
        }

        // An empty key would make the auth guard reject every request, leaving
        // the job endpoints silently unreachable. Fail at startup instead.
        config.jobs.ensure_service_key()?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_service_key_is_rejected() {
        let jobs = JobsConfig::default();
        assert!(jobs.ensure_service_key().is_err());
    }

    #[test]
    fn test_configured_service_key_is_accepted() {
        let jobs = JobsConfig {
            service_key: "scheduler-secret".to_string(),
            ..JobsConfig::default()
        };
        assert!(jobs.ensure_service_key().is_ok());
    }
}
