use soroban_sdk::{contracttype, Address, String};

/// Pool configuration, mutated only through authority-gated setters.
///
/// `distribution_period`, `penalty_rate` and `claim_threshold` are stored and
/// validated but read by no ledger operation yet; they are wiring for the
/// settlement rules the surrounding protocol defines off-chain.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolConfig {
    /// Whether the pool accepts deposits.
    pub active: bool,
    /// Percentage of a verified sale price credited as premium (0-100).
    pub premium_rate: u32,
    /// Informational distribution cadence, in ledgers.
    pub distribution_period: u64,
    /// Informational late-claim penalty percentage (0-100).
    pub penalty_rate: u32,
    /// Informational minimum claimable credit.
    pub claim_threshold: i128,
    /// Per-depositor cumulative deposit cap.
    pub max_deposits: i128,
    /// Administrative authority for configuration and dispute resolution.
    pub authority: Address,
    /// Token in which deposits and claims settle.
    pub token: Address,
}

/// Cumulative deposit record for a single depositor.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Deposit {
    /// Total deposited across all calls, never decreasing.
    pub amount: i128,
    /// Ledger timestamp of the most recent deposit.
    pub timestamp: u64,
}

/// Oracle attestation of a commodity sale.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SaleVerification {
    pub batch_id: u64,
    pub verified: bool,
    pub price: i128,
}

/// Dispute lifecycle of a premium.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DisputeState {
    None,
    Open,
    ResolvedInFavor,
    ResolvedAgainst,
}

/// A credited-but-not-yet-withdrawn premium owed to a farmer.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Premium {
    pub farmer: Address,
    pub amount: i128,
    pub claimed: bool,
    pub batch_id: u64,
    /// An `Open` dispute gates the claim; resolution outcomes are advisory.
    pub dispute_state: DisputeState,
}

/// A farmer-raised contest against an unclaimed premium.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Dispute {
    /// The premium this dispute contests.
    pub premium_id: u64,
    pub initiator: Address,
    pub reason: String,
    pub resolved: bool,
}

/// Aggregate pool accounting snapshot.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolStats {
    pub active: bool,
    pub total_deposited: i128,
    pub total_distributed: i128,
}

/// Storage keys
#[contracttype]
pub enum DataKey {
    Config,
    Oracle,
    Certification,
    Tracker,
    Resolver,
    TotalDeposited,
    TotalDistributed,
    PremiumCount,
    DisputeCount,
    Deposit(Address),
    Premium(u64),
    Balance(Address),
    Dispute(u64),
    Sale(u64),
}
