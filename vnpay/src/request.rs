//! Signed payment-request construction.
//!
//! Builds the full parameter set for one payment attempt, signs its
//! canonical form, and serializes everything into the redirect URL handed
//! to the customer's browser. No network I/O happens here; the caller owns
//! the redirect.

use url::Url;

use crate::canonical::canonicalize;
use crate::config::GatewayConfig;
use crate::error::Error;
use crate::params::{ParameterSet, fields};
use crate::signature::sign;
use crate::timestamp::CreateDate;

/// The amount field carries two implicit decimals on the wire.
const MINOR_UNIT_FACTOR: u64 = 100;

/// One payment attempt as described by the caller.
///
/// The transaction reference identifies the attempt everywhere downstream:
/// it keys idempotent IPN processing and the status query. Callers must
/// generate a fresh one per attempt, e.g. an order id plus a time-based
/// suffix.
#[derive(Debug, Clone)]
pub struct PaymentOrder {
    /// Unique reference for this attempt.
    pub txn_ref: String,
    /// Amount in major currency units.
    pub amount: u64,
    /// Human-readable order description.
    pub order_info: String,
    /// Merchant order category, e.g. `"billpayment"`.
    pub order_type: String,
    /// Customer IP address as seen by the merchant.
    pub ip_addr: String,
    /// Preselected bank, skips the bank-selection page when set.
    pub bank_code: Option<String>,
    /// Per-order locale override.
    pub locale: Option<String>,
    /// Explicit creation timestamp; defaults to the current time. Fixing
    /// it makes the produced URL reproducible in tests.
    pub create_date: Option<CreateDate>,
}

impl PaymentOrder {
    /// Creates an order with the default order type and no overrides.
    #[must_use]
    pub fn new(
        txn_ref: impl Into<String>,
        amount: u64,
        order_info: impl Into<String>,
        ip_addr: impl Into<String>,
    ) -> Self {
        Self {
            txn_ref: txn_ref.into(),
            amount,
            order_info: order_info.into(),
            order_type: fields::ORDER_TYPE_DEFAULT.to_owned(),
            ip_addr: ip_addr.into(),
            bank_code: None,
            locale: None,
            create_date: None,
        }
    }

    /// Sets the merchant order category.
    #[must_use]
    pub fn with_order_type(mut self, order_type: impl Into<String>) -> Self {
        self.order_type = order_type.into();
        self
    }

    /// Preselects a bank on the hosted page.
    #[must_use]
    pub fn with_bank_code(mut self, bank_code: impl Into<String>) -> Self {
        self.bank_code = Some(bank_code.into());
        self
    }

    /// Overrides the hosted-page locale for this order.
    #[must_use]
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    /// Fixes the creation timestamp.
    #[must_use]
    pub const fn with_create_date(mut self, create_date: CreateDate) -> Self {
        self.create_date = Some(create_date);
        self
    }
}

/// A fully signed payment request.
#[derive(Debug, Clone)]
pub struct PaymentRequest {
    /// The redirect URL, secure hash included.
    pub url: Url,
    /// The signed parameter set the URL was serialized from.
    pub params: ParameterSet,
}

/// Assembles, signs, and serializes a payment request.
///
/// The amount is converted to minor units (two implicit decimals), the
/// parameter set is canonicalized and signed with the terminal's secret,
/// and the hash is inserted under [`fields::SECURE_HASH`] before the whole
/// set is percent-encoded onto the payment endpoint.
///
/// # Errors
///
/// - [`Error::Configuration`] if the merchant code or secret is absent.
/// - [`Error::InvalidRequest`] if the reference or description is empty,
///   or the amount overflows the minor-unit conversion.
pub fn build_payment_url(
    order: &PaymentOrder,
    config: &GatewayConfig,
) -> Result<PaymentRequest, Error> {
    config.validate()?;

    if order.txn_ref.trim().is_empty() {
        return Err(Error::InvalidRequest(
            "transaction reference must not be empty".to_owned(),
        ));
    }
    if order.order_info.trim().is_empty() {
        return Err(Error::InvalidRequest(
            "order description must not be empty".to_owned(),
        ));
    }
    let minor_amount = order
        .amount
        .checked_mul(MINOR_UNIT_FACTOR)
        .ok_or_else(|| Error::InvalidRequest("amount overflows minor units".to_owned()))?;

    let create_date = order.create_date.unwrap_or_else(CreateDate::now);
    let locale = order.locale.as_deref().unwrap_or(&config.locale);

    let mut params = ParameterSet::new();
    params.insert(fields::VERSION, fields::VERSION_VALUE);
    params.insert(fields::COMMAND, fields::COMMAND_PAY);
    params.insert(fields::TMN_CODE, config.tmn_code.clone());
    params.insert(fields::AMOUNT, minor_amount.to_string());
    params.insert(fields::CURR_CODE, fields::CURRENCY_VND);
    params.insert(fields::TXN_REF, order.txn_ref.clone());
    params.insert(fields::ORDER_INFO, order.order_info.clone());
    params.insert(fields::ORDER_TYPE, order.order_type.clone());
    params.insert(fields::RETURN_URL, config.return_url.as_str());
    params.insert(fields::IP_ADDR, order.ip_addr.clone());
    params.insert(fields::CREATE_DATE, create_date.to_string());
    params.insert(fields::LOCALE, locale);
    if let Some(bank_code) = &order.bank_code {
        params.insert(fields::BANK_CODE, bank_code.clone());
    }

    let hash = sign(&canonicalize(&params, &[]), &config.secret);
    params.insert(fields::SECURE_HASH, hash);

    let mut url = config.payment_url.clone();
    url.query_pairs_mut().clear().extend_pairs(params.iter());

    Ok(PaymentRequest { url, params })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signature::verify;

    fn config() -> GatewayConfig {
        GatewayConfig::new(
            "DEMOV210",
            "VNPAYSECRETKEY123456",
            Url::parse("https://sandbox.vnpayment.vn/paymentv2/vpcpay.html").unwrap(),
            Url::parse("https://merchant.example/payment/return").unwrap(),
        )
    }

    fn order() -> PaymentOrder {
        PaymentOrder::new("ORDER_1700000000000", 100_000, "Test payment", "203.0.113.9")
            .with_order_type("billpayment")
            .with_create_date(CreateDate::parse("20260807143000").unwrap())
    }

    #[test]
    fn test_amount_is_converted_to_minor_units() {
        let request = build_payment_url(&order(), &config()).unwrap();
        assert_eq!(request.params.get(fields::AMOUNT), Some("10000000"));
    }

    #[test]
    fn test_request_carries_the_full_field_set() {
        let request = build_payment_url(&order(), &config()).unwrap();
        for key in [
            fields::VERSION,
            fields::COMMAND,
            fields::TMN_CODE,
            fields::AMOUNT,
            fields::CURR_CODE,
            fields::TXN_REF,
            fields::ORDER_INFO,
            fields::ORDER_TYPE,
            fields::RETURN_URL,
            fields::IP_ADDR,
            fields::CREATE_DATE,
            fields::LOCALE,
            fields::SECURE_HASH,
        ] {
            assert!(request.params.contains(key), "missing {key}");
        }
        assert_eq!(request.params.get(fields::VERSION), Some("2.1.0"));
        assert_eq!(request.params.get(fields::COMMAND), Some("pay"));
        assert_eq!(request.params.get(fields::CREATE_DATE), Some("20260807143000"));
    }

    #[test]
    fn test_hash_recomputes_over_the_same_canonical_string() {
        let cfg = config();
        let request = build_payment_url(&order(), &cfg).unwrap();
        let hash = request.params.get(fields::SECURE_HASH).unwrap().to_owned();

        let expected = sign(
            &canonicalize(&request.params, &[fields::SECURE_HASH]),
            &cfg.secret,
        );
        assert_eq!(hash, expected);
        assert!(verify(&request.params, &hash, &cfg.secret));
    }

    #[test]
    fn test_url_points_at_the_payment_endpoint_with_query() {
        let request = build_payment_url(&order(), &config()).unwrap();
        assert!(request.url.as_str().starts_with(config().payment_url.as_str()));
        let query: Vec<(String, String)> = request
            .url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert_eq!(query.len(), request.params.len());
        let reparsed = ParameterSet::from_pairs(query);
        assert_eq!(reparsed, request.params);
    }

    #[test]
    fn test_empty_reference_is_rejected() {
        let mut bad = order();
        bad.txn_ref = String::new();
        assert!(matches!(
            build_payment_url(&bad, &config()),
            Err(Error::InvalidRequest(_))
        ));
    }

    #[test]
    fn test_empty_description_is_rejected() {
        let mut bad = order();
        bad.order_info = "  ".to_owned();
        assert!(matches!(
            build_payment_url(&bad, &config()),
            Err(Error::InvalidRequest(_))
        ));
    }

    #[test]
    fn test_missing_secret_is_a_configuration_error() {
        let mut cfg = config();
        cfg.secret = String::new();
        assert!(matches!(
            build_payment_url(&order(), &cfg),
            Err(Error::Configuration(_))
        ));
    }

    #[test]
    fn test_amount_overflow_is_rejected() {
        let mut bad = order();
        bad.amount = u64::MAX;
        assert!(matches!(
            build_payment_url(&bad, &config()),
            Err(Error::InvalidRequest(_))
        ));
    }

    #[test]
    fn test_bank_code_is_optional() {
        let request = build_payment_url(&order(), &config()).unwrap();
        assert!(!request.params.contains(fields::BANK_CODE));

        let with_bank = order().with_bank_code("NCB");
        let request = build_payment_url(&with_bank, &config()).unwrap();
        assert_eq!(request.params.get(fields::BANK_CODE), Some("NCB"));
    }
}
