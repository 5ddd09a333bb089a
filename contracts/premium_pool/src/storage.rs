use soroban_sdk::{Address, Env};

use crate::types::{DataKey, Deposit, Dispute, PoolConfig, Premium, SaleVerification};

// Premiums and deposits must outlive long settlement cycles.
// At ~5s per ledger: 2 years ≈ 12,614,400 ledgers.
const RECORD_TTL_LEDGERS: u32 = 12_614_400;

fn bump(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, RECORD_TTL_LEDGERS, RECORD_TTL_LEDGERS);
}

// ── Config ───────────────────────────────────────────────────────────────────

pub fn set_config(env: &Env, config: &PoolConfig) {
    env.storage().persistent().set(&DataKey::Config, config);
    bump(env, &DataKey::Config);
}

pub fn get_config(env: &Env) -> Option<PoolConfig> {
    env.storage().persistent().get(&DataKey::Config)
}

pub fn has_config(env: &Env) -> bool {
    env.storage().persistent().has(&DataKey::Config)
}

// ── Collaborator identities ──────────────────────────────────────────────────

fn set_identity(env: &Env, key: DataKey, id: &Address) {
    env.storage().persistent().set(&key, id);
    bump(env, &key);
}

fn get_identity(env: &Env, key: DataKey) -> Option<Address> {
    env.storage().persistent().get(&key)
}

pub fn set_oracle(env: &Env, id: &Address) {
    set_identity(env, DataKey::Oracle, id);
}

pub fn get_oracle(env: &Env) -> Option<Address> {
    get_identity(env, DataKey::Oracle)
}

pub fn set_certification(env: &Env, id: &Address) {
    set_identity(env, DataKey::Certification, id);
}

pub fn get_certification(env: &Env) -> Option<Address> {
    get_identity(env, DataKey::Certification)
}

pub fn set_tracker(env: &Env, id: &Address) {
    set_identity(env, DataKey::Tracker, id);
}

pub fn get_tracker(env: &Env) -> Option<Address> {
    get_identity(env, DataKey::Tracker)
}

pub fn set_resolver(env: &Env, id: &Address) {
    set_identity(env, DataKey::Resolver, id);
}

pub fn get_resolver(env: &Env) -> Option<Address> {
    get_identity(env, DataKey::Resolver)
}

// ── Pool totals ──────────────────────────────────────────────────────────────

pub fn get_total_deposited(env: &Env) -> i128 {
    env.storage()
        .persistent()
        .get(&DataKey::TotalDeposited)
        .unwrap_or(0i128)
}

pub fn set_total_deposited(env: &Env, total: i128) {
    env.storage().persistent().set(&DataKey::TotalDeposited, &total);
    bump(env, &DataKey::TotalDeposited);
}

pub fn get_total_distributed(env: &Env) -> i128 {
    env.storage()
        .persistent()
        .get(&DataKey::TotalDistributed)
        .unwrap_or(0i128)
}

pub fn set_total_distributed(env: &Env, total: i128) {
    env.storage().persistent().set(&DataKey::TotalDistributed, &total);
    bump(env, &DataKey::TotalDistributed);
}

// ── Id allocation ────────────────────────────────────────────────────────────
// Dedicated monotonic counters, incremented unconditionally on each creation.
// Ids are never derived from running totals or record counts.

pub fn next_premium_id(env: &Env) -> u64 {
    let id: u64 = env
        .storage()
        .persistent()
        .get(&DataKey::PremiumCount)
        .unwrap_or(0u64)
        + 1;
    env.storage().persistent().set(&DataKey::PremiumCount, &id);
    bump(env, &DataKey::PremiumCount);
    id
}

pub fn next_dispute_id(env: &Env) -> u64 {
    let id: u64 = env
        .storage()
        .persistent()
        .get(&DataKey::DisputeCount)
        .unwrap_or(0u64)
        + 1;
    env.storage().persistent().set(&DataKey::DisputeCount, &id);
    bump(env, &DataKey::DisputeCount);
    id
}

// ── Deposits ─────────────────────────────────────────────────────────────────

pub fn save_deposit(env: &Env, depositor: &Address, deposit: &Deposit) {
    let key = DataKey::Deposit(depositor.clone());
    env.storage().persistent().set(&key, deposit);
    bump(env, &key);
}

pub fn get_deposit(env: &Env, depositor: &Address) -> Option<Deposit> {
    env.storage()
        .persistent()
        .get(&DataKey::Deposit(depositor.clone()))
}

// ── Premiums ─────────────────────────────────────────────────────────────────

pub fn save_premium(env: &Env, premium_id: u64, premium: &Premium) {
    let key = DataKey::Premium(premium_id);
    env.storage().persistent().set(&key, premium);
    bump(env, &key);
}

pub fn get_premium(env: &Env, premium_id: u64) -> Option<Premium> {
    env.storage().persistent().get(&DataKey::Premium(premium_id))
}

// ── Farmer balances ──────────────────────────────────────────────────────────

pub fn get_balance(env: &Env, farmer: &Address) -> i128 {
    env.storage()
        .persistent()
        .get(&DataKey::Balance(farmer.clone()))
        .unwrap_or(0i128)
}

pub fn set_balance(env: &Env, farmer: &Address, balance: i128) {
    let key = DataKey::Balance(farmer.clone());
    env.storage().persistent().set(&key, &balance);
    bump(env, &key);
}

// ── Disputes ─────────────────────────────────────────────────────────────────

pub fn save_dispute(env: &Env, dispute_id: u64, dispute: &Dispute) {
    let key = DataKey::Dispute(dispute_id);
    env.storage().persistent().set(&key, dispute);
    bump(env, &key);
}

pub fn get_dispute(env: &Env, dispute_id: u64) -> Option<Dispute> {
    env.storage().persistent().get(&DataKey::Dispute(dispute_id))
}

// ── Sale verifications ───────────────────────────────────────────────────────

pub fn save_sale(env: &Env, sale_id: u64, verification: &SaleVerification) {
    let key = DataKey::Sale(sale_id);
    env.storage().persistent().set(&key, verification);
    bump(env, &key);
}

pub fn get_sale(env: &Env, sale_id: u64) -> Option<SaleVerification> {
    env.storage().persistent().get(&DataKey::Sale(sale_id))
}
