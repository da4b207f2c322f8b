use std::env;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt_secret: String,
    pub allowed_origins: Vec<String>,
    pub port: u16,
    pub debug_key: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, String> {
        let database_url =
            env::var("DATABASE_URL").map_err(|_| "DATABASE_URL must be set".to_string())?;

        let jwt_secret =
            env::var("JWT_SECRET").map_err(|_| "JWT_SECRET must be set".to_string())?;

        if jwt_secret.len() < 32 {
            return Err("JWT_SECRET must be at least 32 bytes".to_string());
        }

        // Comma-separated list, e.g. "http://localhost:3000,https://app.example.com"
        let allowed_origins = env::var("ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000".to_string());
        let allowed_origins = parse_origins(&allowed_origins);

        if allowed_origins.is_empty() {
            return Err("ALLOWED_ORIGINS must contain at least one origin".to_string());
        }

        let port = match env::var("PORT") {
            Ok(raw) => raw
                .parse::<u16>()
                .map_err(|_| format!("PORT is not a valid port number: {}", raw))?,
            Err(_) => 8080,
        };

        let debug_key =
            env::var("DEBUG_KEY").map_err(|_| "DEBUG_KEY must be set".to_string())?;

        Ok(Self {
            database_url,
            jwt_secret,
            allowed_origins,
            port,
            debug_key,
        })
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().trim_end_matches('/').to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_origins_splits_and_trims() {
        let origins = parse_origins("http://localhost:3000, https://app.example.com/");
        assert_eq!(
            origins,
            vec![
                "http://localhost:3000".to_string(),
                "https://app.example.com".to_string()
            ]
        );
    }

    #[test]
    fn test_parse_origins_skips_empty_entries() {
        let origins = parse_origins("http://localhost:3000,,");
        assert_eq!(origins, vec!["http://localhost:3000".to_string()]);
    }
}
