use std::net::{IpAddr, Ipv4Addr, SocketAddr};

/// Process-wide configuration, read from the environment exactly once at
/// startup and passed around by reference. Handlers never consult the
/// environment themselves.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub log_level: String,
    pub environment: String,
    pub database_url: Option<String>,
    pub jwt_secret: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(3000);

        let host = std::env::var("HOST")
            .ok()
            .and_then(|value| value.parse::<IpAddr>().ok())
            .unwrap_or(IpAddr::V4(Ipv4Addr::new(0, 0, 0, 0)));

        let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        let environment = std::env::var("NODE_ENV")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| "development".to_string());

        Self {
            host,
            port,
            log_level,
            environment,
            database_url: non_empty_env("DATABASE_URL"),
            jwt_secret: non_empty_env("JWT_SECRET"),
        }
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .filter(|value| !value.trim().is_empty())
}
