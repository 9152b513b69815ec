use std::env;

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub site_id: i64,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        // Load .env file if it exists (for development)
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite:./api_access_admin.db".to_string());

        let site_id = env::var("SITE_ID")
            .unwrap_or_else(|_| "1".to_string())
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid SITE_ID value: {}", e))?;

        Ok(Config {
            database_url,
            site_id,
        })
    }
}
