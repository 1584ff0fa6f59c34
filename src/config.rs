use std::net::SocketAddr;
use std::path::PathBuf;

use jsonwebtoken::Algorithm;
use secrecy::SecretString;
use url::Url;

use crate::auth::Authenticator;
use crate::error::{ApplicationError, ConfigLoadSnafu};
use crate::prelude::*;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(rename = "host_address", default = "default_host")]
    pub host: SocketAddr,
    #[serde(default = "default_log_dir")]
    pub log_dir: PathBuf,
    #[serde(rename = "secret")]
    pub token_secret: String,
    #[serde(flatten)]
    pub surreal: SurrealConfig,
}

fn default_host() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 3003))
}

fn default_log_dir() -> PathBuf {
    PathBuf::from("logs")
}

impl Config {
    pub fn from_env() -> Result<Config, ApplicationError> {
        envy::from_env::<Config>().context(ConfigLoadSnafu)
    }

    pub async fn database(&self) -> Result<Database, DatabaseError> {
        self.surreal.connect().await
    }

    pub fn authenticator(&self) -> Authenticator {
        Authenticator::new(SecretString::new(self.token_secret.clone()), Algorithm::HS256)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct SurrealConfig {
    #[serde(rename = "surreal_url", default = "default_endpoint")]
    pub endpoint: Url,
    #[serde(rename = "surreal_ns", default = "default_name")]
    pub namespace: String,
    #[serde(rename = "surreal_db", default = "default_name")]
    pub database: String,
    #[serde(rename = "surreal_username", default)]
    pub username: Option<String>,
    #[serde(rename = "surreal_password", default)]
    pub password: Option<String>,
}

fn default_endpoint() -> Url {
    Url::parse("mem://").expect("`mem://` is a valid url")
}

fn default_name() -> String {
    "bloglist".to_string()
}

impl Connection for SurrealConfig {
    async fn connect(&self) -> Result<Database, DatabaseError> {
        let credentials = match (&self.username, &self.password) {
            (Some(username), Some(password)) => Some(Auth {
                username: username.clone(),
                password: password.clone(),
                namespace: self.namespace.clone(),
                database: self.database.clone(),
            }),
            _ => None,
        };

        let connection = ServerConnection {
            address: &self.endpoint,
            namespace: &self.namespace,
            database: &self.database,
            credentials: credentials.as_ref(),
        };

        connection.connect().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect()
    }

    #[test]
    fn defaults_fill_everything_but_the_secret() {
        let config: Config = envy::from_iter(vars(&[("SECRET", "hunter2")])).unwrap();

        assert_eq!(config.host, default_host());
        assert_eq!(config.log_dir, PathBuf::from("logs"));
        assert_eq!(config.token_secret, "hunter2");
        assert_eq!(config.surreal.endpoint.scheme(), "mem");
        assert_eq!(config.surreal.namespace, "bloglist");
        assert_eq!(config.surreal.database, "bloglist");
        assert!(config.surreal.username.is_none());
    }

    #[test]
    fn missing_secret_is_an_error() {
        let result = envy::from_iter::<_, Config>(vars(&[("HOST_ADDRESS", "0.0.0.0:8080")]));
        assert!(result.is_err());
    }

    #[test]
    fn reads_surreal_settings() {
        let config: Config = envy::from_iter(vars(&[
            ("SECRET", "s"),
            ("HOST_ADDRESS", "0.0.0.0:8080"),
            ("SURREAL_URL", "http://localhost:8000"),
            ("SURREAL_NS", "blogs"),
            ("SURREAL_DB", "test"),
            ("SURREAL_USERNAME", "root"),
            ("SURREAL_PASSWORD", "root"),
        ]))
        .unwrap();

        assert_eq!(config.host.port(), 8080);
        assert_eq!(config.surreal.endpoint.as_str(), "http://localhost:8000/");
        assert_eq!(config.surreal.namespace, "blogs");
        assert_eq!(config.surreal.username.as_deref(), Some("root"));
    }
}
