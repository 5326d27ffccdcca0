use std::env;
use url::Url;

#[derive(Debug, Clone)]
pub struct Config {
    pub catalog_path: String,
    pub order_api_url: Url,
    pub delivery_fee: f64,
    pub log_level: String,
    pub environment: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv::dotenv().ok();
        let order_api_url = env::var("ORDER_API_URL")
            .unwrap_or("http://localhost:3131/orders".to_string());
        let delivery_fee = env::var("DELIVERY_FEE")
            .unwrap_or("20".to_string())
            .parse::<f64>()
            .map_err(|_| anyhow::anyhow!("DELIVERY_FEE must be a number"))?;

        let config = Config {
            catalog_path: env::var("CATALOG_PATH")
                .unwrap_or("data/catalog.json".to_string())
                .to_string(),
            order_api_url: Url::parse(&order_api_url)
                .map_err(|_| anyhow::anyhow!("ORDER_API_URL is not a valid URL"))?,
            delivery_fee,
            log_level: env::var("LOG_LEVEL")
                .unwrap_or("info".to_string())
                .to_string(),
            environment: env::var("APP_ENV")
                .unwrap_or("development".to_string())
                .to_string(),
        };

        tracing::info!(
            "Config: successfully loaded for {} environment",
            config.environment
        );
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), anyhow::Error> {
        if self.catalog_path.is_empty() {
            return Err(anyhow::anyhow!("CATALOG_PATH is not set"));
        }

        if !self.delivery_fee.is_finite() || self.delivery_fee < 0.0 {
            return Err(anyhow::anyhow!("DELIVERY_FEE must be a non-negative number"));
        }

        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}
