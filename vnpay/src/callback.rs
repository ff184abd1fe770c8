//! Shared verification pipeline for inbound callbacks.
//!
//! The return-URL redirect and the server-to-server IPN carry the same
//! signed parameter set. Both entry points run this pipeline first:
//! signature checks short-circuit before any business interpretation, and a
//! failed check rejects the entire callback.

use rust_decimal::Decimal;

use crate::config::GatewayConfig;
use crate::error::Error;
use crate::params::{ParameterSet, fields};
use crate::response_code::Outcome;
use crate::signature::verify;
use crate::timestamp::CreateDate;

/// A callback whose secure hash has been verified.
///
/// Every field here is authenticated by the hash; nothing is populated
/// from an unverified set.
#[derive(Debug, Clone)]
pub struct CallbackResult {
    /// The merchant transaction reference the callback settles.
    pub txn_ref: String,
    /// Raw processor response code.
    pub response_code: String,
    /// Semantic outcome of the payment attempt.
    pub outcome: Outcome,
    /// Amount in major units, converted back from the wire's two implicit
    /// decimals. Absent if the callback carried no amount.
    pub amount: Option<Decimal>,
    /// Processor-assigned transaction number.
    pub transaction_no: Option<String>,
    /// Bank the customer paid through.
    pub bank_code: Option<String>,
    /// Settlement timestamp, when parseable.
    pub pay_date: Option<CreateDate>,
}

/// Verifies and interprets an inbound callback parameter set.
///
/// Steps, in order:
///
/// 1. reject with [`Error::MissingSignature`] if no secure hash is present;
/// 2. reject with [`Error::InvalidSignature`] if the hash does not verify;
/// 3. map the response code through the outcome table (unknown codes
///    degrade to [`Outcome::UnknownError`], they never fail);
/// 4. convert the minor-unit amount back to major units.
///
/// # Errors
///
/// Besides the signature rejections above, returns
/// [`Error::InvalidRequest`] when a verified set lacks its transaction
/// reference and [`Error::MalformedAmount`] when the amount field is not a
/// minor-unit integer.
pub fn interpret_callback(
    params: &ParameterSet,
    config: &GatewayConfig,
) -> Result<CallbackResult, Error> {
    let received_hash = params
        .get(fields::SECURE_HASH)
        .ok_or(Error::MissingSignature)?;
    if !verify(params, received_hash, &config.secret) {
        return Err(Error::InvalidSignature);
    }

    let txn_ref = params
        .get(fields::TXN_REF)
        .filter(|r| !r.is_empty())
        .ok_or_else(|| Error::InvalidRequest("callback lacks a transaction reference".to_owned()))?
        .to_owned();

    // A signed callback without a code still resolves, to the opaque
    // unknown outcome, matching how unrecognized codes are handled.
    let response_code = params.get(fields::RESPONSE_CODE).unwrap_or("").to_owned();
    let outcome = Outcome::from_code(&response_code);

    let amount = match params.get(fields::AMOUNT) {
        None => None,
        Some(raw) => {
            let minor: u64 = raw
                .parse()
                .map_err(|_| Error::MalformedAmount(raw.to_owned()))?;
            Some(Decimal::from_i128_with_scale(i128::from(minor), 2).normalize())
        }
    };

    Ok(CallbackResult {
        txn_ref,
        response_code,
        outcome,
        amount,
        transaction_no: params.get(fields::TRANSACTION_NO).map(str::to_owned),
        bank_code: params.get(fields::BANK_CODE).map(str::to_owned),
        pay_date: params
            .get(fields::PAY_DATE)
            .and_then(|s| CreateDate::parse(s).ok()),
    })
}
