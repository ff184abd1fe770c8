//! Wire-level parameter sets for the VNPAY gateway protocol.
//!
//! A payment transaction travels as a flat set of string key/value pairs,
//! both in the outbound redirect URL and in the two inbound callbacks.
//! [`ParameterSet`] holds one such set with unique keys in sorted order,
//! which is also the order the canonical signing form requires.
//!
//! The processor fixes every field name; the [`fields`] module lists them
//! along with the protocol constants sent on every request.

use std::collections::BTreeMap;
use std::collections::btree_map;

/// Field names and protocol constants fixed by the VNPAY wire contract.
pub mod fields {
    /// Protocol version field.
    pub const VERSION: &str = "vnp_Version";
    /// Gateway command field.
    pub const COMMAND: &str = "vnp_Command";
    /// Merchant (terminal) code field.
    pub const TMN_CODE: &str = "vnp_TmnCode";
    /// Amount in minor units (two implicit decimals).
    pub const AMOUNT: &str = "vnp_Amount";
    /// ISO currency code field.
    pub const CURR_CODE: &str = "vnp_CurrCode";
    /// Merchant-assigned transaction reference.
    pub const TXN_REF: &str = "vnp_TxnRef";
    /// Human-readable order description.
    pub const ORDER_INFO: &str = "vnp_OrderInfo";
    /// Merchant order category.
    pub const ORDER_TYPE: &str = "vnp_OrderType";
    /// URL the processor redirects the customer back to.
    pub const RETURN_URL: &str = "vnp_ReturnUrl";
    /// Customer IP address as seen by the merchant.
    pub const IP_ADDR: &str = "vnp_IpAddr";
    /// Request creation timestamp, `YYYYMMDDHHmmss`.
    pub const CREATE_DATE: &str = "vnp_CreateDate";
    /// Display locale for the hosted payment page.
    pub const LOCALE: &str = "vnp_Locale";
    /// Preselected bank code, optional.
    pub const BANK_CODE: &str = "vnp_BankCode";
    /// The HMAC-SHA-512 secure hash, excluded from its own canonical form.
    pub const SECURE_HASH: &str = "vnp_SecureHash";
    /// Hash algorithm tag some gateway versions echo back; excluded from
    /// the canonical form alongside the hash itself.
    pub const SECURE_HASH_TYPE: &str = "vnp_SecureHashType";
    /// Processor result code on callbacks.
    pub const RESPONSE_CODE: &str = "vnp_ResponseCode";
    /// Processor-assigned transaction number on callbacks.
    pub const TRANSACTION_NO: &str = "vnp_TransactionNo";
    /// Settlement timestamp on callbacks, `YYYYMMDDHHmmss`.
    pub const PAY_DATE: &str = "vnp_PayDate";

    /// Protocol version sent on every payment request.
    pub const VERSION_VALUE: &str = "2.1.0";
    /// Command for initiating a hosted-checkout payment.
    pub const COMMAND_PAY: &str = "pay";
    /// The gateway settles in Vietnamese dong.
    pub const CURRENCY_VND: &str = "VND";
    /// Default hosted-page locale.
    pub const LOCALE_DEFAULT: &str = "vn";
    /// Default order category when the caller does not specify one.
    pub const ORDER_TYPE_DEFAULT: &str = "other";
}

/// One transaction's wire fields as a sorted string map.
///
/// Keys are unique and held in ascending byte order, matching the order the
/// canonical signing form is defined over. Values are stored verbatim; the
/// percent-encoding applied when the set is serialized into a URL is not
/// part of the canonical form.
///
/// The set is immutable from the perspective of the canonicalizer, signer,
/// and verifier: those operations borrow it and never mutate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterSet(BTreeMap<String, String>);

impl ParameterSet {
    /// Creates an empty parameter set.
    #[must_use]
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Inserts a key/value pair, replacing any existing value for the key.
    ///
    /// Empty keys are ignored; the wire contract never produces them and
    /// they would corrupt the canonical form.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        if key.is_empty() {
            return;
        }
        self.0.insert(key, value.into());
    }

    /// Returns the value for a field, if present.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Removes a field, returning its previous value.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.0.remove(key)
    }

    /// Returns `true` if the field is present, even with an empty value.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Number of fields in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the set has no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over `(key, value)` pairs in ascending key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Builds a set from decoded query pairs, e.g. the output of a query
    /// string parser. Later duplicates win; empty keys are dropped.
    #[must_use]
    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        let mut set = Self::new();
        for (k, v) in pairs {
            set.insert(k, v);
        }
        set
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ParameterSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::from_pairs(iter)
    }
}

impl IntoIterator for ParameterSet {
    type Item = (String, String);
    type IntoIter = btree_map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
