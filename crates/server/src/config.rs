//! Server configuration, loaded from a TOML file with env overrides.

use serde::Deserialize;

/// Top-level configuration for the Medway server.
#[derive(Debug, Default, Deserialize)]
pub struct MedwayConfig {
    /// HTTP server bind configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Session token configuration.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Initial-data seeding configuration.
    #[serde(default)]
    pub seed: SeedConfig,
}

/// HTTP server bind configuration.
#[derive(Debug, Deserialize)]
pub struct ServerConfig {
    /// Address to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Path prefix applied uniformly to all routes (e.g. `"/telemed"`).
    /// Empty means the server is mounted at the root.
    #[serde(default)]
    pub base_path: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            base_path: String::new(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_owned()
}

fn default_port() -> u16 {
    8080
}

/// Session token configuration.
#[derive(Debug, Deserialize)]
pub struct AuthConfig {
    /// Shared secret for signing session tokens.
    ///
    /// The `MEDWAY_TOKEN_SECRET` environment variable takes precedence.
    /// If neither is set, a random secret is generated on startup
    /// (sessions will not survive server restarts).
    pub token_secret: Option<String>,
    /// Session token lifetime in seconds. Default: 7 days.
    #[serde(default = "default_token_ttl")]
    pub token_ttl_seconds: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_secret: None,
            token_ttl_seconds: default_token_ttl(),
        }
    }
}

fn default_token_ttl() -> u64 {
    60 * 60 * 24 * 7
}

impl AuthConfig {
    /// Resolve the signing secret: env override, then config file, then a
    /// randomly generated fallback.
    pub fn resolve_secret(&self) -> String {
        if let Ok(secret) = std::env::var("MEDWAY_TOKEN_SECRET")
            && !secret.is_empty()
        {
            return secret;
        }
        if let Some(ref secret) = self.token_secret
            && !secret.is_empty()
        {
            return secret.clone();
        }
        tracing::warn!("no token secret configured, generating a random one for this run");
        format!(
            "{}{}",
            uuid::Uuid::new_v4().simple(),
            uuid::Uuid::new_v4().simple()
        )
    }
}

/// Initial-data seeding configuration.
#[derive(Debug, Deserialize)]
pub struct SeedConfig {
    /// Whether to seed the store on startup when it is empty.
    #[serde(default = "default_seed_enabled")]
    pub enabled: bool,
    /// Email for the initial admin user.
    #[serde(default = "default_admin_email")]
    pub admin_email: String,
    /// Password for the initial admin user.
    #[serde(default = "default_admin_password")]
    pub admin_password: String,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            enabled: default_seed_enabled(),
            admin_email: default_admin_email(),
            admin_password: default_admin_password(),
        }
    }
}

fn default_seed_enabled() -> bool {
    true
}

fn default_admin_email() -> String {
    "admin@medway.local".to_owned()
}

fn default_admin_password() -> String {
    "changeme".to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_yields_defaults() {
        let config: MedwayConfig = toml::from_str("").unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.base_path, "");
        assert_eq!(config.auth.token_ttl_seconds, 604_800);
        assert!(config.seed.enabled);
    }

    #[test]
    fn partial_sections_fill_in() {
        let config: MedwayConfig = toml::from_str(
            r#"
            [server]
            port = 3000
            base_path = "/telemed"

            [auth]
            token_secret = "s3cr3t"
            "#,
        )
        .unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.base_path, "/telemed");
        assert_eq!(config.auth.token_secret.as_deref(), Some("s3cr3t"));
        assert_eq!(config.auth.token_ttl_seconds, 604_800);
    }
}
