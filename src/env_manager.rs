use crate::config::Config;
use log::{debug, info};
use secrecy::SecretString;
use std::env;

pub const MAPBOX_TOKEN_VAR: &str = "MAPBOX_ACCESS_TOKEN";

pub fn load_env_file() {
    match dotenvy::dotenv() {
        Ok(path) => info!("Loaded environment from {:?}", path),
        Err(e) => debug!("No .env file found or error loading it: {}", e),
    }
}

/// Routing token from the environment, falling back to the config file
pub fn mapbox_token(config: &Config) -> Option<SecretString> {
    token_from(env::var(MAPBOX_TOKEN_VAR).ok(), config.routing.access_token.as_deref())
}

fn token_from(env_value: Option<String>, config_value: Option<&str>) -> Option<SecretString> {
    env_value
        .filter(|value| !value.trim().is_empty())
        .or_else(|| config_value.filter(|value| !value.trim().is_empty()).map(str::to_string))
        .map(|value| SecretString::from(value.trim().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_env_token_wins() {
        let token = token_from(Some("pk.env".to_string()), Some("pk.file")).unwrap();
        assert_eq!(token.expose_secret(), "pk.env");
    }

    #[test]
    fn test_blank_env_falls_back_to_config() {
        let token = token_from(Some("  ".to_string()), Some(" pk.file ")).unwrap();
        assert_eq!(token.expose_secret(), "pk.file");
    }

    #[test]
    fn test_no_token() {
        assert!(token_from(None, None).is_none());
        assert!(token_from(None, Some("")).is_none());
    }
}
