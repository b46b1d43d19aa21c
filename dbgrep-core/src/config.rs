//! Connection configuration sourced from the environment.
//!
//! Settings are read from `DATABASE__*` environment variables so credentials
//! never appear on the command line or in shell history. Host and port have
//! defaults; database name, user, and password are required.

use std::env;
use std::fmt;

use crate::error::{DbGrepError, Result};

/// Environment variable for the server host. Defaults to `localhost`.
pub const ENV_HOST: &str = "DATABASE__HOST";
/// Environment variable for the server port. Defaults to `1433`.
pub const ENV_PORT: &str = "DATABASE__PORT";
/// Environment variable for the database name. Required.
pub const ENV_DATABASE: &str = "DATABASE__DATABASE";
/// Environment variable for the login user. Required.
pub const ENV_USER: &str = "DATABASE__USER";
/// Environment variable for the login password. Required.
pub const ENV_PASSWORD: &str = "DATABASE__PASSWORD";

/// Default server host when [`ENV_HOST`] is not set.
pub const DEFAULT_HOST: &str = "localhost";
/// Default TDS port when [`ENV_PORT`] is not set.
pub const DEFAULT_PORT: u16 = 1433;

/// Connection settings for a SQL Server database.
///
/// # Security
/// The password is kept out of both [`fmt::Display`] and [`fmt::Debug`]
/// output, so the struct is safe to log at any level.
#[derive(Clone, PartialEq, Eq)]
pub struct ConnectionConfig {
    /// Server host name or address
    pub host: String,
    /// TDS port
    pub port: u16,
    /// Database to search
    pub database: String,
    /// SQL Server login user
    pub username: String,
    /// SQL Server login password
    pub password: String,
}

impl ConnectionConfig {
    /// Builds a configuration from `DATABASE__*` environment variables.
    ///
    /// Unset and empty variables are treated the same way: optional settings
    /// fall back to their defaults and required settings are reported as
    /// missing. All missing required variables are listed in a single error
    /// so they can be fixed in one pass.
    ///
    /// # Errors
    /// Returns [`DbGrepError::Configuration`] when a required variable is
    /// missing or the port value does not parse as a valid port number.
    pub fn from_env() -> Result<Self> {
        let host = read_var(ENV_HOST).unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = match read_var(ENV_PORT) {
            None => DEFAULT_PORT,
            Some(raw) => parse_port(&raw)?,
        };

        let database = read_var(ENV_DATABASE);
        let username = read_var(ENV_USER);
        let password = read_var(ENV_PASSWORD);

        let mut missing = Vec::new();
        if database.is_none() {
            missing.push(ENV_DATABASE);
        }
        if username.is_none() {
            missing.push(ENV_USER);
        }
        if password.is_none() {
            missing.push(ENV_PASSWORD);
        }
        if !missing.is_empty() {
            return Err(DbGrepError::configuration(format!(
                "Missing required environment variables: {}",
                missing.join(", ")
            )));
        }

        // The is_none checks above guarantee all three are present.
        let (Some(database), Some(username), Some(password)) = (database, username, password)
        else {
            return Err(DbGrepError::configuration(
                "Missing required environment variables",
            ));
        };

        Ok(Self {
            host,
            port,
            database,
            username,
            password,
        })
    }
}

/// Reads an environment variable, treating empty values as unset.
fn read_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}

fn parse_port(raw: &str) -> Result<u16> {
    let port: u16 = raw.trim().parse().map_err(|_| {
        DbGrepError::configuration(format!(
            "Invalid {ENV_PORT} value '{raw}': expected a number between 1 and 65535"
        ))
    })?;
    if port == 0 {
        return Err(DbGrepError::configuration(format!(
            "Invalid {ENV_PORT} value '0': port must be between 1 and 65535"
        )));
    }
    Ok(port)
}

impl fmt::Display for ConnectionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}/{}", self.host, self.port, self.database)
    }
}

impl fmt::Debug for ConnectionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("username", &self.username)
            .field("password", &"****")
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    // Tests that touch the process environment set every DATABASE__* variable
    // explicitly so ambient values cannot leak in.
    const ALL_VARS: [&str; 5] = [ENV_HOST, ENV_PORT, ENV_DATABASE, ENV_USER, ENV_PASSWORD];

    fn with_env<F: FnOnce()>(vars: &[(&str, &str)], f: F) {
        let values: Vec<(&str, Option<&str>)> = ALL_VARS
            .iter()
            .map(|name| {
                let set = vars.iter().find(|(key, _)| key == name);
                (*name, set.map(|(_, value)| *value))
            })
            .collect();
        temp_env::with_vars(values, f);
    }

    #[test]
    fn test_from_env_defaults_host_and_port() {
        with_env(
            &[
                (ENV_DATABASE, "northwind"),
                (ENV_USER, "reader"),
                (ENV_PASSWORD, "s3cret"),
            ],
            || {
                let config = ConnectionConfig::from_env().unwrap();
                assert_eq!(config.host, "localhost");
                assert_eq!(config.port, 1433);
                assert_eq!(config.database, "northwind");
                assert_eq!(config.username, "reader");
                assert_eq!(config.password, "s3cret");
            },
        );
    }

    #[test]
    fn test_from_env_reads_all_variables() {
        with_env(
            &[
                (ENV_HOST, "db.internal"),
                (ENV_PORT, "14330"),
                (ENV_DATABASE, "warehouse"),
                (ENV_USER, "svc_search"),
                (ENV_PASSWORD, "hunter2"),
            ],
            || {
                let config = ConnectionConfig::from_env().unwrap();
                assert_eq!(config.host, "db.internal");
                assert_eq!(config.port, 14330);
                assert_eq!(config.database, "warehouse");
            },
        );
    }

    #[test]
    fn test_from_env_lists_all_missing_variables() {
        with_env(&[(ENV_HOST, "db.internal")], || {
            let error = ConnectionConfig::from_env().unwrap_err();
            let message = error.to_string();
            assert!(message.contains(ENV_DATABASE));
            assert!(message.contains(ENV_USER));
            assert!(message.contains(ENV_PASSWORD));
        });
    }

    #[test]
    fn test_from_env_empty_value_counts_as_missing() {
        with_env(
            &[
                (ENV_DATABASE, "northwind"),
                (ENV_USER, "reader"),
                (ENV_PASSWORD, ""),
            ],
            || {
                let error = ConnectionConfig::from_env().unwrap_err();
                assert!(error.to_string().contains(ENV_PASSWORD));
                assert!(!error.to_string().contains(ENV_USER));
            },
        );
    }

    #[test]
    fn test_from_env_rejects_bad_port() {
        with_env(
            &[
                (ENV_PORT, "not-a-port"),
                (ENV_DATABASE, "northwind"),
                (ENV_USER, "reader"),
                (ENV_PASSWORD, "s3cret"),
            ],
            || {
                let error = ConnectionConfig::from_env().unwrap_err();
                assert!(error.to_string().contains("not-a-port"));
            },
        );
    }

    #[test]
    fn test_from_env_rejects_port_zero() {
        with_env(
            &[
                (ENV_PORT, "0"),
                (ENV_DATABASE, "northwind"),
                (ENV_USER, "reader"),
                (ENV_PASSWORD, "s3cret"),
            ],
            || {
                let error = ConnectionConfig::from_env().unwrap_err();
                assert!(error.to_string().contains("between 1 and 65535"));
            },
        );
    }

    #[test]
    fn test_display_and_debug_omit_password() {
        let config = ConnectionConfig {
            host: "db.internal".to_string(),
            port: 1433,
            database: "warehouse".to_string(),
            username: "svc_search".to_string(),
            password: "hunter2".to_string(),
        };

        let display = config.to_string();
        let debug = format!("{config:?}");
        assert_eq!(display, "db.internal:1433/warehouse");
        assert!(!display.contains("hunter2"));
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("****"));
    }
}
