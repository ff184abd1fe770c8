//! Merchant server configuration.
//!
//! Loads configuration from a TOML file with support for environment
//! variable expansion in string values. Variables use `$VAR` or `${VAR}`
//! syntax, which keeps the shared secret out of the file itself.
//!
//! # Example Configuration
//!
//! ```toml
//! host = "0.0.0.0"
//! port = 8080
//!
//! [gateway]
//! tmn_code = "DEMOV210"
//! secret = "$VNPAY_HASH_SECRET"
//! payment_url = "https://sandbox.vnpayment.vn/paymentv2/vpcpay.html"
//! return_url = "https://merchant.example/payment/return"
//! ipn_url = "https://merchant.example/payment/ipn"
//! locale = "vn"
//! ```
//!
//! # Environment Variables
//!
//! - `CONFIG` — Path to configuration file (default: `config.toml`)
//! - `HOST` / `PORT` — Override server bind address and port
//! - Secrets referenced by `$VAR` in the config file

use std::net::IpAddr;
use std::path::Path;

use serde::Deserialize;
use url::Url;
use vnpay::GatewayConfig;

/// Top-level merchant server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct MerchantConfig {
    /// Server bind address (default: `0.0.0.0`).
    #[serde(default = "default_host")]
    pub host: IpAddr,

    /// Server port (default: `8080`).
    #[serde(default = "default_port")]
    pub port: u16,

    /// Gateway terminal credentials and endpoints.
    pub gateway: GatewaySection,
}

/// The `[gateway]` section of the config file.
#[derive(Debug, Clone, Deserialize)]
pub struct GatewaySection {
    /// Merchant (terminal) code issued by the processor.
    pub tmn_code: String,

    /// Shared HMAC secret. Supports `$VAR` / `${VAR}` expansion so it can
    /// live in the environment instead of the file.
    pub secret: String,

    /// The processor's hosted payment page endpoint.
    pub payment_url: Url,

    /// Absolute return URL the processor redirects customers to.
    pub return_url: Url,

    /// Absolute IPN URL registered with the processor.
    #[serde(default)]
    pub ipn_url: Option<Url>,

    /// Hosted-page locale override.
    #[serde(default)]
    pub locale: Option<String>,
}

fn default_host() -> IpAddr {
    IpAddr::V4(std::net::Ipv4Addr::new(0, 0, 0, 0))
}

fn default_port() -> u16 {
    8080
}

impl MerchantConfig {
    /// Loads configuration from the path given by the `CONFIG` environment
    /// variable, falling back to `config.toml` in the current directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load() -> Result<Self, Box<dyn std::error::Error>> {
        let path = std::env::var("CONFIG").unwrap_or_else(|_| "config.toml".to_owned());
        Self::load_from(&path)
    }

    /// Loads configuration from a specific file path, expanding `$VAR` /
    /// `${VAR}` references and applying `HOST` / `PORT` overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from(path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        if !Path::new(path).exists() {
            return Err(format!("config file '{path}' not found").into());
        }
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parses a TOML document with env expansion and overrides applied.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is not valid TOML for this shape.
    pub fn parse(content: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let expanded = expand_env_vars(content);
        let mut config: Self = toml::from_str(&expanded)?;

        if let Ok(host) = std::env::var("HOST") {
            config.host = host.parse()?;
        }
        if let Ok(port) = std::env::var("PORT") {
            config.port = port.parse()?;
        }

        Ok(config)
    }

    /// Converts the `[gateway]` section into the core config value.
    #[must_use]
    pub fn gateway_config(&self) -> GatewayConfig {
        let mut config = GatewayConfig::new(
            self.gateway.tmn_code.clone(),
            self.gateway.secret.clone(),
            self.gateway.payment_url.clone(),
            self.gateway.return_url.clone(),
        );
        if let Some(ipn_url) = &self.gateway.ipn_url {
            config = config.with_ipn_url(ipn_url.clone());
        }
        if let Some(locale) = &self.gateway.locale {
            config = config.with_locale(locale.clone());
        }
        config
    }
}

/// Expands `$VAR` and `${VAR}` references from the process environment.
///
/// Unresolved variables are left as written, so a missing secret fails
/// later at config validation instead of silently becoming empty.
fn expand_env_vars(input: &str) -> String {
    let mut result = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(pos) = rest.find('$') {
        result.push_str(&rest[..pos]);
        rest = &rest[pos + 1..];

        let (name, tail) = if let Some(stripped) = rest.strip_prefix('{') {
            match stripped.find('}') {
                Some(end) => (&stripped[..end], &stripped[end + 1..]),
                None => ("", rest),
            }
        } else {
            let end = rest
                .find(|c: char| !c.is_ascii_alphanumeric() && c != '_')
                .unwrap_or(rest.len());
            (&rest[..end], &rest[end..])
        };

        match std::env::var(name) {
            Ok(value) if !name.is_empty() => {
                result.push_str(&value);
                rest = tail;
            }
            _ => {
                // Keep the reference as written.
                result.push('$');
            }
        }
    }

    result.push_str(rest);
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
        port = 9090

        [gateway]
        tmn_code = "DEMOV210"
        secret = "plainsecret"
        payment_url = "https://sandbox.vnpayment.vn/paymentv2/vpcpay.html"
        return_url = "https://merchant.example/payment/return"
    "#;

    #[test]
    fn test_parse_with_defaults() {
        let config = MerchantConfig::parse(SAMPLE).unwrap();
        assert_eq!(config.port, 9090);
        assert_eq!(config.host, default_host());
        assert_eq!(config.gateway.tmn_code, "DEMOV210");
        assert!(config.gateway.ipn_url.is_none());
    }

    #[test]
    fn test_gateway_section_converts_and_validates() {
        let config = MerchantConfig::parse(SAMPLE).unwrap();
        let gateway = config.gateway_config();
        assert!(gateway.validate().is_ok());
        assert_eq!(gateway.locale, "vn");
    }

    #[test]
    fn test_env_expansion_braced_and_bare() {
        // Safety note: test-local env vars, names unique to this test.
        unsafe {
            std::env::set_var("VNPAY_TEST_SECRET_A", "s3cret");
        }
        let expanded = expand_env_vars("x = \"$VNPAY_TEST_SECRET_A\" y = \"${VNPAY_TEST_SECRET_A}\"");
        assert_eq!(expanded, "x = \"s3cret\" y = \"s3cret\"");
    }

    #[test]
    fn test_unresolved_variable_is_left_as_written() {
        let expanded = expand_env_vars("secret = \"$VNPAY_TEST_SECRET_UNSET\"");
        assert_eq!(expanded, "secret = \"$VNPAY_TEST_SECRET_UNSET\"");
    }

    #[test]
    fn test_missing_gateway_section_is_an_error() {
        assert!(MerchantConfig::parse("port = 1").is_err());
    }
}
