use soroban_sdk::contracterror;

/// Error taxonomy for the premium pool.
///
/// Codes mirror the on-chain error table of the settlement protocol so that
/// off-chain indexers can map failures without a translation layer.
/// `InvalidFarmerId`, `InvalidRecipient`, `InvalidCurrency` and
/// `InvalidTimestamp` are reserved kinds: part of the taxonomy, produced by
/// no current operation.
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
pub enum Error {
    NotAuthorized = 100,
    InvalidAmount = 101,
    InvalidPremiumRate = 102,
    InvalidDistributionPeriod = 103,
    InsufficientBalance = 104,
    PremiumAlreadyClaimed = 105,
    NoActivePremium = 106,
    InvalidFarmerId = 107,
    InvalidBatchId = 108,
    InvalidOracleData = 109,
    DisputeInProgress = 110,
    InvalidStatus = 111,
    PoolNotActive = 112,
    InvalidRecipient = 113,
    TransferFailed = 114,
    InvalidPenaltyRate = 115,
    InvalidThreshold = 116,
    MaxDepositsExceeded = 117,
    InvalidCurrency = 118,
    AuthorityNotSet = 119,
    InvalidTimestamp = 120,
}
