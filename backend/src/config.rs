//! Environment-driven application settings.
//!
//! Settings are read through [`mockable::Env`] so they can be validated in
//! isolation. Startup aborts on the first invalid value.

use std::fmt;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;

use mockable::Env;
use tracing::debug;

const PORT_ENV: &str = "PORT";
const APP_ENV_ENV: &str = "APP_ENV";
const BIND_HOST_ENV: &str = "BIND_HOST";
const PORT_EXPECTED: &str = "an integer between 0 and 65535";
const APP_ENV_EXPECTED: &str = "development|production|test";
const BIND_HOST_EXPECTED: &str = "an IPv4 or IPv6 address";

/// Deployment environment the service runs in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AppEnvironment {
    /// Local development; API docs are served.
    #[default]
    Development,
    /// Production; API docs are disabled and logs are JSON.
    Production,
    /// Automated tests.
    Test,
}

impl AppEnvironment {
    /// Whether this is the production environment.
    #[must_use]
    pub const fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }

    /// Lowercase name as accepted in `APP_ENV`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Production => "production",
            Self::Test => "test",
        }
    }
}

impl fmt::Display for AppEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown environment name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown application environment: {0}")]
pub struct UnknownEnvironment(pub String);

impl FromStr for AppEnvironment {
    type Err = UnknownEnvironment;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" => Ok(Self::Development),
            "production" => Ok(Self::Production),
            "test" => Ok(Self::Test),
            _ => Err(UnknownEnvironment(s.to_owned())),
        }
    }
}

/// Errors raised while reading settings.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// A required environment variable is missing.
    #[error("missing required environment variable: {name}")]
    MissingEnv { name: &'static str },
    /// A variable is present but contains an invalid value.
    #[error("invalid value for {name}='{value}'; expected {expected}")]
    InvalidEnv {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
}

/// Settings the server starts with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AppSettings {
    /// Deployment environment.
    pub environment: AppEnvironment,
    /// Address the HTTP listener binds to.
    pub bind_addr: SocketAddr,
}

impl AppSettings {
    /// Read settings from the environment.
    ///
    /// `PORT` is required. `APP_ENV` defaults to `development` and
    /// `BIND_HOST` to `0.0.0.0`.
    ///
    /// # Errors
    /// Returns [`ConfigError`] when `PORT` is missing or any variable is
    /// malformed.
    ///
    /// # Examples
    /// ```
    /// use envelope::config::{AppEnvironment, AppSettings};
    /// use mockable::MockEnv;
    ///
    /// let mut env = MockEnv::new();
    /// env.expect_string().returning(|name| match name {
    ///     "PORT" => Some("8080".to_owned()),
    ///     _ => None,
    /// });
    ///
    /// let settings = AppSettings::from_env(&env).expect("valid settings");
    /// assert_eq!(settings.environment, AppEnvironment::Development);
    /// assert_eq!(settings.bind_addr.port(), 8080);
    /// ```
    pub fn from_env<E: Env>(env: &E) -> Result<Self, ConfigError> {
        let port: u16 = required(env, PORT_ENV, PORT_EXPECTED)?;
        let environment: AppEnvironment =
            optional(env, APP_ENV_ENV, APP_ENV_EXPECTED)?.unwrap_or_default();
        let host: IpAddr = optional(env, BIND_HOST_ENV, BIND_HOST_EXPECTED)?
            .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED));

        let settings = Self {
            environment,
            bind_addr: SocketAddr::new(host, port),
        };
        debug!(
            environment = %settings.environment,
            bind_addr = %settings.bind_addr,
            "loaded application settings"
        );
        Ok(settings)
    }

    /// Whether the OpenAPI document and Swagger UI are served.
    #[must_use]
    pub const fn serve_docs(&self) -> bool {
        !self.environment.is_production()
    }
}

fn required<E: Env, T: FromStr>(
    env: &E,
    name: &'static str,
    expected: &'static str,
) -> Result<T, ConfigError> {
    optional(env, name, expected)?.ok_or(ConfigError::MissingEnv { name })
}

fn optional<E: Env, T: FromStr>(
    env: &E,
    name: &'static str,
    expected: &'static str,
) -> Result<Option<T>, ConfigError> {
    let Some(value) = env.string(name) else {
        return Ok(None);
    };
    value
        .trim()
        .parse()
        .map(Some)
        .map_err(|_| ConfigError::InvalidEnv {
            name,
            value,
            expected,
        })
}
