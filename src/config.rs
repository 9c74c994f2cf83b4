use std::env;
use std::net::{IpAddr, SocketAddr};

use tracing::debug;

use crate::error::CalcError;
use crate::format::{CurrencyFormat, DEFAULT_CURRENCY_SYMBOL, DEFAULT_LOCALE};

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// BCP-47 tag driving digit grouping.
    pub locale: String,
    pub currency_symbol: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            locale: DEFAULT_LOCALE.to_string(),
            currency_symbol: DEFAULT_CURRENCY_SYMBOL.to_string(),
        }
    }
}

impl AppConfig {
    /// Reads `FDCALC_*` variables, honouring a `.env` file when present.
    pub fn from_env() -> Result<Self, CalcError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, CalcError> {
        let mut config = Self::default();

        if let Some(host) = lookup("FDCALC_HOST") {
            config.host = host;
        }
        if let Some(port) = lookup("FDCALC_PORT") {
            config.port = port
                .trim()
                .parse()
                .map_err(|_| CalcError::InvalidConfig(format!("FDCALC_PORT={port} is not a port")))?;
        }
        if let Some(locale) = lookup("FDCALC_LOCALE") {
            config.locale = locale;
        }
        if let Some(symbol) = lookup("FDCALC_CURRENCY_SYMBOL") {
            config.currency_symbol = symbol;
        }

        debug!(?config, "loaded configuration");
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), CalcError> {
        self.socket_addr()?;
        self.currency_format()?;
        Ok(())
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, CalcError> {
        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|_| CalcError::InvalidConfig(format!("host {} is not an IP address", self.host)))?;
        Ok(SocketAddr::new(ip, self.port))
    }

    pub fn currency_format(&self) -> Result<CurrencyFormat, CalcError> {
        CurrencyFormat::new(&self.locale, &self.currency_symbol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = AppConfig::from_lookup(lookup_from(&[])).expect("defaults");
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.locale, "en-IN");
        assert_eq!(config.currency_symbol, "₹");
        config.validate().expect("defaults are valid");
    }

    #[test]
    fn environment_overrides_defaults() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("FDCALC_HOST", "127.0.0.1"),
            ("FDCALC_PORT", "3000"),
            ("FDCALC_LOCALE", "en-US"),
            ("FDCALC_CURRENCY_SYMBOL", "$"),
        ]))
        .expect("valid env");

        assert_eq!(
            config.socket_addr().expect("addr"),
            "127.0.0.1:3000".parse::<SocketAddr>().expect("literal")
        );
        assert_eq!(config.currency_format().expect("format").format(1_500.0), "$ 1,500");
    }

    #[test]
    fn rejects_bad_port() {
        let err = AppConfig::from_lookup(lookup_from(&[("FDCALC_PORT", "eighty")]))
            .expect_err("must reject");
        assert!(err.to_string().contains("FDCALC_PORT"));
    }

    #[test]
    fn validate_rejects_bad_host_and_locale() {
        let config = AppConfig {
            host: "localhost:80".to_string(),
            ..AppConfig::default()
        };
        assert!(matches!(config.validate(), Err(CalcError::InvalidConfig(_))));

        let config = AppConfig {
            locale: "??".to_string(),
            ..AppConfig::default()
        };
        assert!(matches!(config.validate(), Err(CalcError::InvalidLocale(_))));
    }
}
