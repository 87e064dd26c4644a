use std::fmt;

pub mod outcomes;
pub mod requests;

/// The transfer channels a merchant can pick from the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    /// Wallet payout to a bank account.
    Bank,
    /// Mobile money cash-in to a subscriber wallet.
    Mobile,
    /// ZenoPay-to-ZenoPay transfer, confirmed with a PIN in a second phase.
    Zenopay,
    /// Rebalancing from the merchant wallet into the float account.
    WalletToFloat,
    /// Utility bill payment through a biller.
    Utility,
}

impl Channel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Channel::Bank => "bank",
            Channel::Mobile => "mobile",
            Channel::Zenopay => "zenopay",
            Channel::WalletToFloat => "wallet_to_float",
            Channel::Utility => "utility",
        }
    }

    /// Channels that finish in a single request; ZenoPay transfers need a
    /// PIN confirmation round-trip before they are done.
    pub fn is_single_phase(&self) -> bool {
        !matches!(self, Channel::Zenopay)
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
