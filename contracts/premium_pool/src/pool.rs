use soroban_sdk::{
    contract, contractimpl, symbol_short, token, Address, Env, String,
};

use crate::{
    errors::Error,
    storage,
    types::{Deposit, Dispute, DisputeState, PoolConfig, PoolStats, Premium, SaleVerification},
};

// Defaults seeded at initialization; all are adjustable by the authority.
const DEFAULT_PREMIUM_RATE: u32 = 10;
const DEFAULT_DISTRIBUTION_PERIOD: u64 = 144;
const DEFAULT_PENALTY_RATE: u32 = 5;
const DEFAULT_CLAIM_THRESHOLD: i128 = 100;
const DEFAULT_MAX_DEPOSITS: i128 = 1_000_000;

#[contract]
pub struct PremiumPool;

// ── Helper Functions ─────────────────────────────────────────────────────────

fn require_config(env: &Env) -> Result<PoolConfig, Error> {
    storage::get_config(env).ok_or(Error::AuthorityNotSet)
}

/// Authenticate `caller` and check it against the configured authority.
fn require_authority(env: &Env, caller: &Address) -> Result<PoolConfig, Error> {
    caller.require_auth();
    let config = require_config(env)?;
    if *caller != config.authority {
        return Err(Error::NotAuthorized);
    }
    Ok(config)
}

fn premium_amount(price: i128, rate: u32) -> Result<i128, Error> {
    // Floor division; price and rate are both validated positive by callers.
    Ok(price
        .checked_mul(rate as i128)
        .ok_or(Error::InvalidOracleData)?
        / 100)
}

// ── Contract Implementation ──────────────────────────────────────────────────

#[contractimpl]
impl PremiumPool {
    // ── Initialization ───────────────────────────────────────────────────────

    /// Initialize the pool with its administrative authority and settlement
    /// token. Can only be called once; seeds the default configuration.
    pub fn initialize(env: Env, authority: Address, token: Address) -> Result<(), Error> {
        if storage::has_config(&env) {
            return Err(Error::InvalidStatus);
        }
        authority.require_auth();

        storage::set_config(
            &env,
            &PoolConfig {
                active: true,
                premium_rate: DEFAULT_PREMIUM_RATE,
                distribution_period: DEFAULT_DISTRIBUTION_PERIOD,
                penalty_rate: DEFAULT_PENALTY_RATE,
                claim_threshold: DEFAULT_CLAIM_THRESHOLD,
                max_deposits: DEFAULT_MAX_DEPOSITS,
                authority: authority.clone(),
                token,
            },
        );
        storage::set_total_deposited(&env, 0);
        storage::set_total_distributed(&env, 0);

        env.events().publish((symbol_short!("init"),), authority);

        Ok(())
    }

    // ── Authority Configuration ──────────────────────────────────────────────

    /// Set the oracle identity trusted to verify sales.
    pub fn set_oracle(env: Env, caller: Address, oracle: Address) -> Result<(), Error> {
        require_authority(&env, &caller)?;
        storage::set_oracle(&env, &oracle);
        env.events().publish((symbol_short!("ora_set"),), oracle);
        Ok(())
    }

    /// Set the certification service identity.
    pub fn set_certification(env: Env, caller: Address, certification: Address) -> Result<(), Error> {
        require_authority(&env, &caller)?;
        storage::set_certification(&env, &certification);
        env.events().publish((symbol_short!("cert_set"),), certification);
        Ok(())
    }

    /// Set the batch tracker identity.
    pub fn set_tracker(env: Env, caller: Address, tracker: Address) -> Result<(), Error> {
        require_authority(&env, &caller)?;
        storage::set_tracker(&env, &tracker);
        env.events().publish((symbol_short!("trk_set"),), tracker);
        Ok(())
    }

    /// Set the dispute resolver identity.
    pub fn set_resolver(env: Env, caller: Address, resolver: Address) -> Result<(), Error> {
        require_authority(&env, &caller)?;
        storage::set_resolver(&env, &resolver);
        env.events().publish((symbol_short!("res_set"),), resolver);
        Ok(())
    }

    /// Open or close the pool for deposits.
    pub fn set_pool_active(env: Env, caller: Address, active: bool) -> Result<(), Error> {
        let mut config = require_authority(&env, &caller)?;
        config.active = active;
        storage::set_config(&env, &config);
        env.events().publish((symbol_short!("active"),), active);
        Ok(())
    }

    /// Update the premium rate percentage (1-100).
    pub fn set_premium_rate(env: Env, caller: Address, rate: u32) -> Result<(), Error> {
        let mut config = require_authority(&env, &caller)?;
        if rate == 0 || rate > 100 {
            return Err(Error::InvalidPremiumRate);
        }
        config.premium_rate = rate;
        storage::set_config(&env, &config);
        env.events().publish((symbol_short!("rate_set"),), rate);
        Ok(())
    }

    /// Update the distribution period, in ledgers.
    pub fn set_distribution_period(env: Env, caller: Address, period: u64) -> Result<(), Error> {
        let mut config = require_authority(&env, &caller)?;
        if period == 0 {
            return Err(Error::InvalidDistributionPeriod);
        }
        config.distribution_period = period;
        storage::set_config(&env, &config);
        env.events().publish((symbol_short!("period"),), period);
        Ok(())
    }

    /// Update the late-claim penalty rate percentage (0-100).
    pub fn set_penalty_rate(env: Env, caller: Address, rate: u32) -> Result<(), Error> {
        let mut config = require_authority(&env, &caller)?;
        if rate > 100 {
            return Err(Error::InvalidPenaltyRate);
        }
        config.penalty_rate = rate;
        storage::set_config(&env, &config);
        env.events().publish((symbol_short!("penalty"),), rate);
        Ok(())
    }

    /// Update the minimum claimable credit.
    pub fn set_claim_threshold(env: Env, caller: Address, threshold: i128) -> Result<(), Error> {
        let mut config = require_authority(&env, &caller)?;
        if threshold <= 0 {
            return Err(Error::InvalidThreshold);
        }
        config.claim_threshold = threshold;
        storage::set_config(&env, &config);
        env.events().publish((symbol_short!("thresh"),), threshold);
        Ok(())
    }

    /// Update the per-depositor cumulative deposit cap.
    pub fn set_max_deposits(env: Env, caller: Address, max_deposits: i128) -> Result<(), Error> {
        let mut config = require_authority(&env, &caller)?;
        if max_deposits <= 0 {
            return Err(Error::InvalidAmount);
        }
        config.max_deposits = max_deposits;
        storage::set_config(&env, &config);
        env.events().publish((symbol_short!("max_dep"),), max_deposits);
        Ok(())
    }

    /// Hand the authority role to a new identity.
    pub fn transfer_authority(env: Env, caller: Address, new_authority: Address) -> Result<(), Error> {
        let mut config = require_authority(&env, &caller)?;
        config.authority = new_authority.clone();
        storage::set_config(&env, &config);
        env.events().publish((symbol_short!("auth_xfr"),), (caller, new_authority));
        Ok(())
    }

    // ── Deposits ─────────────────────────────────────────────────────────────

    /// Deposit premium funds into the shared pool.
    ///
    /// The depositor's record is cumulative across calls and capped at the
    /// configured `max_deposits`. The token transfer happens before any
    /// ledger-state write, so a failed transfer leaves the pool untouched.
    pub fn deposit(env: Env, depositor: Address, amount: i128) -> Result<i128, Error> {
        depositor.require_auth();

        if amount <= 0 {
            return Err(Error::InvalidAmount);
        }
        let config = require_config(&env)?;
        if !config.active {
            return Err(Error::PoolNotActive);
        }

        let current = storage::get_deposit(&env, &depositor)
            .map(|d| d.amount)
            .unwrap_or(0);
        let cumulative = current.checked_add(amount).ok_or(Error::InvalidAmount)?;
        if cumulative > config.max_deposits {
            return Err(Error::MaxDepositsExceeded);
        }
        let total = storage::get_total_deposited(&env)
            .checked_add(amount)
            .ok_or(Error::InvalidAmount)?;

        let client = token::Client::new(&env, &config.token);
        if client
            .try_transfer(&depositor, &env.current_contract_address(), &amount)
            .is_err()
        {
            return Err(Error::TransferFailed);
        }

        storage::save_deposit(
            &env,
            &depositor,
            &Deposit { amount: cumulative, timestamp: env.ledger().timestamp() },
        );
        storage::set_total_deposited(&env, total);

        env.events().publish(
            (symbol_short!("deposited"), depositor),
            (amount, cumulative, total),
        );

        Ok(amount)
    }

    // ── Sale Verification ────────────────────────────────────────────────────

    /// Record an oracle attestation of a commodity sale.
    ///
    /// Oracle-only. Reusing a `sale_id` overwrites the prior attestation;
    /// the oracle is trusted for corrections.
    pub fn verify_sale(
        env: Env,
        caller: Address,
        sale_id: u64,
        batch_id: u64,
        price: i128,
    ) -> Result<bool, Error> {
        caller.require_auth();

        match storage::get_oracle(&env) {
            Some(oracle) if oracle == caller => {}
            _ => return Err(Error::NotAuthorized),
        }
        if batch_id == 0 {
            return Err(Error::InvalidBatchId);
        }
        if price <= 0 {
            return Err(Error::InvalidOracleData);
        }

        storage::save_sale(&env, sale_id, &SaleVerification { batch_id, verified: true, price });

        env.events().publish((symbol_short!("sale_ver"), sale_id), (batch_id, price));

        Ok(true)
    }

    // ── Distribution ─────────────────────────────────────────────────────────

    /// Compute the premium for a verified sale and credit it to `farmer`.
    ///
    /// Moves `floor(price * premium_rate / 100)` from the deposited pool into
    /// the farmer's claimable balance. Any identity other than the farmer may
    /// trigger a distribution once the sale is verified; self-crediting is
    /// rejected.
    pub fn distribute_premium(
        env: Env,
        caller: Address,
        farmer: Address,
        batch_id: u64,
        sale_id: u64,
    ) -> Result<i128, Error> {
        caller.require_auth();

        let config = require_config(&env)?;
        let verification = storage::get_sale(&env, sale_id).ok_or(Error::NoActivePremium)?;
        if farmer == caller {
            return Err(Error::NotAuthorized);
        }
        if batch_id == 0 {
            return Err(Error::InvalidBatchId);
        }
        if verification.price <= 0 {
            return Err(Error::InvalidOracleData);
        }
        if !verification.verified {
            return Err(Error::InvalidStatus);
        }

        let amount = premium_amount(verification.price, config.premium_rate)?;
        let total_deposited = storage::get_total_deposited(&env);
        if total_deposited < amount {
            return Err(Error::InsufficientBalance);
        }

        let balance = storage::get_balance(&env, &farmer)
            .checked_add(amount)
            .ok_or(Error::InvalidAmount)?;
        let distributed = storage::get_total_distributed(&env)
            .checked_add(amount)
            .ok_or(Error::InvalidAmount)?;

        let premium_id = storage::next_premium_id(&env);
        storage::save_premium(
            &env,
            premium_id,
            &Premium {
                farmer: farmer.clone(),
                amount,
                claimed: false,
                batch_id,
                dispute_state: DisputeState::None,
            },
        );
        storage::set_balance(&env, &farmer, balance);
        storage::set_total_distributed(&env, distributed);
        storage::set_total_deposited(&env, total_deposited - amount);

        env.events().publish(
            (symbol_short!("distrib"), farmer),
            (premium_id, amount, sale_id),
        );

        Ok(amount)
    }

    // ── Claims ───────────────────────────────────────────────────────────────

    /// Withdraw a previously credited premium.
    ///
    /// Farmer-only, at most once per premium, and gated while a dispute on
    /// the premium is open. The payout transfer happens before any
    /// ledger-state write.
    pub fn claim_premium(env: Env, caller: Address, premium_id: u64) -> Result<i128, Error> {
        caller.require_auth();

        let config = require_config(&env)?;
        let mut premium = storage::get_premium(&env, premium_id).ok_or(Error::NoActivePremium)?;
        if caller != premium.farmer {
            return Err(Error::NotAuthorized);
        }
        if premium.claimed {
            return Err(Error::PremiumAlreadyClaimed);
        }
        if premium.dispute_state == DisputeState::Open {
            return Err(Error::DisputeInProgress);
        }
        let balance = storage::get_balance(&env, &premium.farmer);
        if balance < premium.amount {
            return Err(Error::InsufficientBalance);
        }

        let client = token::Client::new(&env, &config.token);
        if client
            .try_transfer(&env.current_contract_address(), &caller, &premium.amount)
            .is_err()
        {
            return Err(Error::TransferFailed);
        }

        premium.claimed = true;
        storage::save_premium(&env, premium_id, &premium);
        storage::set_balance(&env, &premium.farmer, balance - premium.amount);

        env.events().publish((symbol_short!("claimed"), caller), (premium_id, premium.amount));

        Ok(premium.amount)
    }

    // ── Disputes ─────────────────────────────────────────────────────────────

    /// Contest an unclaimed premium. Farmer-only; opens a dispute tied to
    /// the premium and blocks its claim until the authority resolves it.
    pub fn initiate_dispute(
        env: Env,
        caller: Address,
        premium_id: u64,
        reason: String,
    ) -> Result<u64, Error> {
        caller.require_auth();

        let mut premium = storage::get_premium(&env, premium_id).ok_or(Error::NoActivePremium)?;
        if caller != premium.farmer {
            return Err(Error::NotAuthorized);
        }
        if premium.claimed {
            return Err(Error::PremiumAlreadyClaimed);
        }
        if premium.dispute_state == DisputeState::Open {
            return Err(Error::DisputeInProgress);
        }

        let dispute_id = storage::next_dispute_id(&env);
        storage::save_dispute(
            &env,
            dispute_id,
            &Dispute { premium_id, initiator: caller.clone(), reason, resolved: false },
        );
        premium.dispute_state = DisputeState::Open;
        storage::save_premium(&env, premium_id, &premium);

        env.events().publish((symbol_short!("disputed"), caller), (dispute_id, premium_id));

        Ok(dispute_id)
    }

    /// Resolve an open dispute. Authority-only.
    ///
    /// Records the outcome on the dispute and on the premium's dispute state,
    /// unblocking the claim. The outcome is advisory: it moves no funds and
    /// never alters the premium amount or the farmer's balance.
    pub fn resolve_dispute(
        env: Env,
        caller: Address,
        dispute_id: u64,
        in_favor: bool,
    ) -> Result<bool, Error> {
        caller.require_auth();

        let config = require_config(&env)?;
        let mut dispute = storage::get_dispute(&env, dispute_id).ok_or(Error::NoActivePremium)?;
        if caller != config.authority {
            return Err(Error::NotAuthorized);
        }
        if dispute.resolved {
            return Err(Error::InvalidStatus);
        }

        dispute.resolved = true;
        storage::save_dispute(&env, dispute_id, &dispute);

        if let Some(mut premium) = storage::get_premium(&env, dispute.premium_id) {
            premium.dispute_state = if in_favor {
                DisputeState::ResolvedInFavor
            } else {
                DisputeState::ResolvedAgainst
            };
            storage::save_premium(&env, dispute.premium_id, &premium);
        }

        env.events().publish((symbol_short!("resolved"), dispute_id), in_favor);

        Ok(true)
    }

    // ── Query Functions ──────────────────────────────────────────────────────

    /// Aggregate pool accounting. An uninitialized pool reads as inactive
    /// with zero totals.
    pub fn get_pool_stats(env: Env) -> PoolStats {
        PoolStats {
            active: storage::get_config(&env).map(|c| c.active).unwrap_or(false),
            total_deposited: storage::get_total_deposited(&env),
            total_distributed: storage::get_total_distributed(&env),
        }
    }

    /// Claimable credit for a farmer; 0 for unknown identities.
    pub fn get_farmer_balance(env: Env, farmer: Address) -> i128 {
        storage::get_balance(&env, &farmer)
    }

    pub fn get_config(env: Env) -> Result<PoolConfig, Error> {
        require_config(&env)
    }

    pub fn get_oracle(env: Env) -> Option<Address> {
        storage::get_oracle(&env)
    }

    pub fn get_certification(env: Env) -> Option<Address> {
        storage::get_certification(&env)
    }

    pub fn get_tracker(env: Env) -> Option<Address> {
        storage::get_tracker(&env)
    }

    pub fn get_resolver(env: Env) -> Option<Address> {
        storage::get_resolver(&env)
    }

    pub fn get_deposit(env: Env, depositor: Address) -> Option<Deposit> {
        storage::get_deposit(&env, &depositor)
    }

    pub fn get_premium(env: Env, premium_id: u64) -> Option<Premium> {
        storage::get_premium(&env, premium_id)
    }

    pub fn get_dispute(env: Env, dispute_id: u64) -> Option<Dispute> {
        storage::get_dispute(&env, dispute_id)
    }

    pub fn get_sale_verification(env: Env, sale_id: u64) -> Option<SaleVerification> {
        storage::get_sale(&env, sale_id)
    }
}
