//! Merchant credentials and gateway endpoints.
//!
//! Configuration is an explicit value threaded into request building and
//! callback verification rather than process-wide state, so one process can
//! drive several terminals (e.g. sandbox and production) side by side.

use std::fmt;

use url::Url;

use crate::error::Error;
use crate::params::fields;

/// Everything the core needs to talk to one gateway terminal.
///
/// The shared secret is the key for every secure hash this terminal signs
/// or verifies; [`fmt::Debug`] redacts it.
#[derive(Clone)]
pub struct GatewayConfig {
    /// Merchant (terminal) code issued by the processor.
    pub tmn_code: String,
    /// Shared HMAC secret issued by the processor.
    pub secret: String,
    /// The processor's hosted payment page endpoint.
    pub payment_url: Url,
    /// Absolute URL the customer's browser is redirected back to.
    pub return_url: Url,
    /// Absolute URL the processor posts IPNs to. Registered with the
    /// processor out of band; carried here so deployments can log and
    /// cross-check what they expect to receive.
    pub ipn_url: Option<Url>,
    /// Hosted-page locale, defaults to `"vn"`.
    pub locale: String,
}

impl GatewayConfig {
    /// Creates a config with the default locale and no IPN URL.
    #[must_use]
    pub fn new(
        tmn_code: impl Into<String>,
        secret: impl Into<String>,
        payment_url: Url,
        return_url: Url,
    ) -> Self {
        Self {
            tmn_code: tmn_code.into(),
            secret: secret.into(),
            payment_url,
            return_url,
            ipn_url: None,
            locale: fields::LOCALE_DEFAULT.to_owned(),
        }
    }

    /// Sets the IPN endpoint this deployment expects notifications on.
    #[must_use]
    pub fn with_ipn_url(mut self, ipn_url: Url) -> Self {
        self.ipn_url = Some(ipn_url);
        self
    }

    /// Sets the hosted-page locale.
    #[must_use]
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }

    /// Rejects configurations that cannot sign requests.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if the merchant code or shared
    /// secret is empty.
    pub fn validate(&self) -> Result<(), Error> {
        if self.tmn_code.trim().is_empty() {
            return Err(Error::Configuration("merchant code is empty".to_owned()));
        }
        if self.secret.is_empty() {
            return Err(Error::Configuration("shared secret is empty".to_owned()));
        }
        Ok(())
    }
}

impl fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("tmn_code", &self.tmn_code)
            .field("secret", &"<redacted>")
            .field("payment_url", &self.payment_url.as_str())
            .field("return_url", &self.return_url.as_str())
            .field("ipn_url", &self.ipn_url.as_ref().map(Url::as_str))
            .field("locale", &self.locale)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> GatewayConfig {
        GatewayConfig::new(
            "DEMOV210",
            "VNPAYSECRETKEY123456",
            Url::parse("https://sandbox.vnpayment.vn/paymentv2/vpcpay.html").unwrap(),
            Url::parse("https://merchant.example/payment/return").unwrap(),
        )
    }

    #[test]
    fn test_validate_accepts_complete_config() {
        assert!(sample().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_missing_credentials() {
        let mut config = sample();
        config.tmn_code = "  ".to_owned();
        assert!(matches!(config.validate(), Err(Error::Configuration(_))));

        let mut config = sample();
        config.secret = String::new();
        assert!(matches!(config.validate(), Err(Error::Configuration(_))));
    }

    #[test]
    fn test_debug_redacts_secret() {
        let rendered = format!("{:?}", sample());
        assert!(rendered.contains("<redacted>"));
        assert!(!rendered.contains("VNPAYSECRETKEY123456"));
    }
}
