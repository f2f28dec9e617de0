use std::env;

use rust_decimal::Decimal;

use crate::pricing::PricingConfig;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub order_api_url: String,
    pub gateway_timeout_secs: u64,
    pub pricing: PricingConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let order_api_url = env::var("ORDER_API_URL")?;
        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(3000);
        let gateway_timeout_secs = env::var("GATEWAY_TIMEOUT_SECS")
            .ok()
            .and_then(|t| t.parse::<u64>().ok())
            .unwrap_or(10);

        let pricing = PricingConfig {
            free_shipping_threshold: decimal_env("FREE_SHIPPING_THRESHOLD", Decimal::new(50, 0)),
            flat_shipping_rate: decimal_env("FLAT_SHIPPING_RATE", Decimal::new(10, 0)),
            tax_rate: decimal_env("TAX_RATE", Decimal::new(8, 2)),
        };

        Ok(Self {
            host,
            port,
            order_api_url,
            gateway_timeout_secs,
            pricing,
        })
    }
}

fn decimal_env(name: &str, default: Decimal) -> Decimal {
    env::var(name)
        .ok()
        .and_then(|v| v.parse::<Decimal>().ok())
        .unwrap_or(default)
}
