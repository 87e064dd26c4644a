use rust_decimal::Decimal;
use serde::Serialize;

/// A payload ready to be POSTed to the payments API.
///
/// Implementations are pure data: builders produce them after validation and
/// the submission engine only reads the path and serializes the body.
pub trait WireRequest: Serialize {
    fn path(&self) -> &'static str;
}

/// Wallet payout to a bank account. The API multiplexes the destination into
/// the `msisdn` field as `"<swift>:<account number>"`.
#[derive(Debug, Clone, Serialize)]
pub struct BankTransferRequest {
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub msisdn: String,
    pub narration: String,
    #[serde(rename = "recipientNames")]
    pub recipient_names: String,
}

impl WireRequest for BankTransferRequest {
    fn path(&self) -> &'static str {
        "/payments/wallet-to-bank/"
    }
}

/// Utility code the cash-in endpoint expects for mobile money payouts.
pub const CASHIN_UTILITY_CODE: &str = "CASHIN";

/// Both cash-in and utility payments draw from the merchant float account.
pub const FLOAT_SOURCE_ACCOUNT: &str = "float";

/// Mobile money payout (cash-in) to a subscriber `msisdn`.
#[derive(Debug, Clone, Serialize)]
pub struct MobileMoneyRequest {
    pub transid: String,
    pub utilitycode: String,
    pub utilityref: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub pin: String,
    pub msisdn: String,
    pub source_account: String,
}

impl WireRequest for MobileMoneyRequest {
    fn path(&self) -> &'static str {
        "/payments/walletcashin/process/"
    }
}

/// Phase 1 of a ZenoPay-to-ZenoPay transfer.
#[derive(Debug, Clone, Serialize)]
pub struct InitiateTransferRequest {
    pub recipient_account_id: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl WireRequest for InitiateTransferRequest {
    fn path(&self) -> &'static str {
        "/payments/float-transfer/initiate/"
    }
}

/// Phase 2: the server-issued reference carried forward unchanged, plus the
/// merchant PIN.
#[derive(Debug, Clone, Serialize)]
pub struct ConfirmTransferRequest {
    pub transfer_reference: String,
    pub pin: String,
}

impl WireRequest for ConfirmTransferRequest {
    fn path(&self) -> &'static str {
        "/payments/float-transfer/confirm/"
    }
}

/// Wallet balance moved into the float account.
#[derive(Debug, Clone, Serialize)]
pub struct WalletToFloatRequest {
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub pin: String,
    pub direction: String,
}

pub const WALLET_TO_FLOAT_DIRECTION: &str = "wallet_to_float";

impl WireRequest for WalletToFloatRequest {
    fn path(&self) -> &'static str {
        "/sms/transfer-balance/"
    }
}

/// Utility bill payment through one of the supported billers.
#[derive(Debug, Clone, Serialize)]
pub struct UtilityPaymentRequest {
    pub transid: String,
    pub utilitycode: String,
    pub utilityref: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub pin: String,
    pub msisdn: String,
    pub source_account: String,
}

impl WireRequest for UtilityPaymentRequest {
    fn path(&self) -> &'static str {
        "/payments/utilitypayment/process/"
    }
}

/// Billers the utility channel can pay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UtilityCode {
    Luku,
    Dstv,
    Gotv,
    Azamtv,
    Startimes,
    Ttcl,
    Zuku,
}

impl UtilityCode {
    pub const ALL: [UtilityCode; 7] = [
        UtilityCode::Luku,
        UtilityCode::Dstv,
        UtilityCode::Gotv,
        UtilityCode::Azamtv,
        UtilityCode::Startimes,
        UtilityCode::Ttcl,
        UtilityCode::Zuku,
    ];

    pub fn as_code(&self) -> &'static str {
        match self {
            UtilityCode::Luku => "LUKU",
            UtilityCode::Dstv => "DSTV",
            UtilityCode::Gotv => "GOTV",
            UtilityCode::Azamtv => "AZAMTV",
            UtilityCode::Startimes => "STARTIMES",
            UtilityCode::Ttcl => "TTCL",
            UtilityCode::Zuku => "ZUKU",
        }
    }

    pub fn from_code(code: &str) -> Option<UtilityCode> {
        let code = code.trim().to_uppercase();
        UtilityCode::ALL
            .into_iter()
            .find(|biller| biller.as_code() == code)
    }
}
