// Configuration constants for the server

use std::time::Duration;

use relay_core::Credentials;

#[derive(Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub request_timeout_secs: u64,
    pub cors_allowed_origins: Option<Vec<String>>,
    pub app_id: Option<String>,
    pub access_token: Option<String>,
    pub resource_id: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8000,
            request_timeout_secs: 60,
            cors_allowed_origins: None,
            app_id: None,
            access_token: None,
            resource_id: None,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(8000);

        let request_timeout_secs = std::env::var("REQUEST_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(60);

        let cors_allowed_origins = std::env::var("CORS_ALLOWED_ORIGINS")
            .ok()
            .map(|origins| origins.split(',').map(|s| s.trim().to_string()).collect());

        Self {
            port,
            request_timeout_secs,
            cors_allowed_origins,
            app_id: non_empty_env("BYTEPLUS_APP_ID"),
            access_token: non_empty_env("BYTEPLUS_ACCESS_TOKEN"),
            resource_id: non_empty_env("BYTEPLUS_RESOURCE_ID"),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Deployment-default provider credentials; available only when all
    /// three settings are present.
    pub fn default_credentials(&self) -> Option<Credentials> {
        match (&self.app_id, &self.access_token, &self.resource_id) {
            (Some(app_id), Some(access_token), Some(resource_id)) => Some(Credentials {
                app_id: app_id.clone(),
                access_token: access_token.clone(),
                resource_id: resource_id.clone(),
            }),
            _ => None,
        }
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
