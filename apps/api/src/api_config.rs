use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use formsmith_core::AppError;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub frontend_url: String,
    pub api_host: String,
    pub api_port: u16,
}

impl ApiConfig {
    pub fn load() -> Result<Self, AppError> {
        let frontend_url =
            env::var("FRONTEND_URL").unwrap_or_else(|_| "http://localhost:3000".to_owned());
        let api_host = env::var("API_HOST").unwrap_or_else(|_| "127.0.0.1".to_owned());
        let api_port = match env::var("API_PORT") {
            Ok(value) => parse_port(value.as_str())?,
            Err(_) => 3001,
        };

        Ok(Self {
            frontend_url,
            api_host,
            api_port,
        })
    }

    pub fn socket_address(&self) -> Result<SocketAddr, AppError> {
        let host = IpAddr::from_str(&self.api_host).map_err(|error| {
            AppError::Validation(format!("invalid API_HOST '{}': {error}", self.api_host))
        })?;
        Ok(SocketAddr::from((host, self.api_port)))
    }
}

pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

fn parse_port(value: &str) -> Result<u16, AppError> {
    value
        .trim()
        .parse::<u16>()
        .map_err(|error| AppError::Validation(format!("invalid API_PORT '{value}': {error}")))
}

#[cfg(test)]
mod tests {
    use formsmith_core::AppError;

    use super::{ApiConfig, parse_port};

    fn config(api_host: &str) -> ApiConfig {
        ApiConfig {
            frontend_url: "http://localhost:3000".to_owned(),
            api_host: api_host.to_owned(),
            api_port: 3001,
        }
    }

    #[test]
    fn socket_address_combines_host_and_port() {
        let address = config("127.0.0.1").socket_address();
        assert!(matches!(address, Ok(value) if value.to_string() == "127.0.0.1:3001"));
    }

    #[test]
    fn invalid_host_is_a_validation_error() {
        let address = config("not-a-host").socket_address();
        assert!(matches!(address, Err(AppError::Validation(_))));
    }

    #[test]
    fn ports_must_be_numeric() {
        assert!(matches!(parse_port(" 8080 "), Ok(8080)));
        assert!(matches!(parse_port("http"), Err(AppError::Validation(_))));
        assert!(matches!(parse_port("70000"), Err(AppError::Validation(_))));
    }
}
