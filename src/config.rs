use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub ttl_minutes: i64,
    pub refresh_ttl_minutes: i64,
}

/// Credentials and endpoint of the FoodData Central API.
#[derive(Debug, Clone, Deserialize)]
pub struct UsdaConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for UsdaConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://api.nal.usda.gov/fdc/v1".into(),
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt: JwtConfig,
    pub usda: UsdaConfig,
    pub recipes_path: String,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")?;
        let jwt = JwtConfig {
            secret: std::env::var("JWT_SECRET")?,
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "nutritrack".into()),
            audience: std::env::var("JWT_AUDIENCE").unwrap_or_else(|_| "nutritrack-users".into()),
            ttl_minutes: parsed_var("JWT_TTL_MINUTES").unwrap_or(60),
            refresh_ttl_minutes: parsed_var("JWT_REFRESH_TTL_MINUTES").unwrap_or(60 * 24 * 14),
        };
        let defaults = UsdaConfig::default();
        let usda = UsdaConfig {
            api_key: non_blank(std::env::var("USDA_API_KEY").ok()),
            base_url: std::env::var("USDA_BASE_URL").unwrap_or(defaults.base_url),
            timeout_secs: parsed_var("USDA_TIMEOUT_SECS").unwrap_or(defaults.timeout_secs),
        };
        let recipes_path =
            std::env::var("RECIPES_PATH").unwrap_or_else(|_| "composite_recipes.json".into());
        Ok(Self {
            database_url,
            jwt,
            usda,
            recipes_path,
        })
    }
}

fn parsed_var<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.parse::<T>().ok())
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
