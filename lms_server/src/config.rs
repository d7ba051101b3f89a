use std::env;

use gateway_clients::{CardGatewayConfig, WalletGatewayConfig};
use lms_engine::TaxPolicy;
use log::*;

const DEFAULT_LMS_HOST: &str = "127.0.0.1";
const DEFAULT_LMS_PORT: u16 = 8420;

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    /// What to do with cart requests from countries that are not in the tax directory.
    pub tax_policy: TaxPolicy,
    pub card_gateway: CardGatewayConfig,
    pub wallet_gateway: WalletGatewayConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_LMS_HOST.to_string(),
            port: DEFAULT_LMS_PORT,
            database_url: String::default(),
            tax_policy: TaxPolicy::default(),
            card_gateway: CardGatewayConfig::default(),
            wallet_gateway: WalletGatewayConfig::default(),
        }
    }
}

impl ServerConfig {
    pub fn new(host: &str, port: u16) -> Self {
        Self { host: host.to_string(), port, ..Default::default() }
    }

    pub fn from_env_or_default() -> Self {
        let host = env::var("LMS_HOST").ok().unwrap_or_else(|| DEFAULT_LMS_HOST.into());
        let port = env::var("LMS_PORT")
            .map(|s| {
                s.parse::<u16>().unwrap_or_else(|e| {
                    error!(
                        "🪛️ {s} is not a valid port for LMS_PORT. {e} Using the default, {DEFAULT_LMS_PORT}, instead."
                    );
                    DEFAULT_LMS_PORT
                })
            })
            .ok()
            .unwrap_or(DEFAULT_LMS_PORT);
        let database_url = env::var("LMS_DATABASE_URL").ok().unwrap_or_else(|| {
            error!("🪛️ LMS_DATABASE_URL is not set. Please set it to the URL for the marketplace database.");
            String::default()
        });
        let tax_policy = configure_tax_policy();
        let card_gateway = CardGatewayConfig::new_from_env_or_default();
        let wallet_gateway = WalletGatewayConfig::new_from_env_or_default();
        Self { host, port, database_url, tax_policy, card_gateway, wallet_gateway }
    }
}

/// `LMS_TAX_FALLBACK_RATE=reject` turns unknown countries into validation errors. Any other
/// value is parsed as a percentage for the fallback country.
fn configure_tax_policy() -> TaxPolicy {
    let rate = env::var("LMS_TAX_FALLBACK_RATE").ok();
    if rate.as_deref().map(|s| s.eq_ignore_ascii_case("reject")).unwrap_or(false) {
        info!("🪛️ Unknown countries will be rejected at the cart");
        return TaxPolicy::Reject;
    }
    let default_policy = TaxPolicy::default();
    let TaxPolicy::DefaultRate { country: default_country, rate: default_rate } = default_policy.clone() else {
        unreachable!("TaxPolicy::default is a DefaultRate policy");
    };
    let country = env::var("LMS_TAX_FALLBACK_COUNTRY").ok().unwrap_or_else(|| {
        debug!("🪛️ LMS_TAX_FALLBACK_COUNTRY not set. Using {default_country}.");
        default_country
    });
    let rate = rate
        .map(|s| {
            s.parse::<f64>().unwrap_or_else(|e| {
                error!("🪛️ {s} is not a valid rate for LMS_TAX_FALLBACK_RATE. {e} Using {default_rate} instead.");
                default_rate
            })
        })
        .unwrap_or(default_rate);
    TaxPolicy::DefaultRate { country, rate }
}
