use soroban_sdk::{Address, Env, Vec};

use crate::errors::Error;
use crate::types::{Auction, BidRecord, ClaimRecord, Config, DataKey};

// ---- config ----

pub fn get_config(env: &Env) -> Option<Config> {
    env.storage().instance().get(&DataKey::Config)
}

pub fn set_config(env: &Env, config: &Config) {
    env.storage().instance().set(&DataKey::Config, config);
}

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Config)
}

// ---- auction counter ----

pub fn increment_auction_counter(env: &Env) -> u64 {
    let counter: u64 = env
        .storage()
        .instance()
        .get(&DataKey::AuctionCounter)
        .unwrap_or(0)
        + 1;
    env.storage()
        .instance()
        .set(&DataKey::AuctionCounter, &counter);
    counter
}

// ---- fee accumulator ----

pub fn get_collected_fees(env: &Env) -> i128 {
    env.storage()
        .instance()
        .get(&DataKey::FeesCollected)
        .unwrap_or(0)
}

pub fn add_collected_fees(env: &Env, amount: i128) {
    let total = get_collected_fees(env) + amount;
    env.storage().instance().set(&DataKey::FeesCollected, &total);
}

pub fn reset_collected_fees(env: &Env) {
    env.storage().instance().set(&DataKey::FeesCollected, &0i128);
}

// ---- reentrancy guard ----

pub fn acquire_guard(env: &Env) -> Result<(), Error> {
    if env
        .storage()
        .instance()
        .get(&DataKey::Guard)
        .unwrap_or(false)
    {
        return Err(Error::ReentrantCall);
    }
    env.storage().instance().set(&DataKey::Guard, &true);
    Ok(())
}

pub fn release_guard(env: &Env) {
    env.storage().instance().set(&DataKey::Guard, &false);
}

// ---- auctions ----

pub fn get_auction(env: &Env, auction_id: u64) -> Option<Auction> {
    env.storage()
        .persistent()
        .get(&DataKey::Auction(auction_id))
}

pub fn save_auction(env: &Env, auction: &Auction) {
    env.storage()
        .persistent()
        .set(&DataKey::Auction(auction.id), auction);
}

// ---- bids ----

pub fn get_bid(env: &Env, auction_id: u64, bidder: &Address) -> Option<BidRecord> {
    env.storage()
        .persistent()
        .get(&DataKey::Bid(auction_id, bidder.clone()))
}

pub fn save_bid(env: &Env, auction_id: u64, bidder: &Address, bid: &BidRecord) {
    env.storage()
        .persistent()
        .set(&DataKey::Bid(auction_id, bidder.clone()), bid);
}

// ---- claims ----

pub fn get_claim(env: &Env, auction_id: u64, claimant: &Address) -> Option<ClaimRecord> {
    env.storage()
        .persistent()
        .get(&DataKey::Claim(auction_id, claimant.clone()))
}

pub fn save_claim(env: &Env, auction_id: u64, claimant: &Address, claim: &ClaimRecord) {
    env.storage()
        .persistent()
        .set(&DataKey::Claim(auction_id, claimant.clone()), claim);
}

// ---- bidder roster ----

pub fn get_bidders(env: &Env, auction_id: u64) -> Vec<Address> {
    env.storage()
        .persistent()
        .get(&DataKey::Bidders(auction_id))
        .unwrap_or(Vec::new(env))
}

pub fn add_bidder(env: &Env, auction_id: u64, bidder: &Address) {
    let mut roster = get_bidders(env, auction_id);
    roster.push_back(bidder.clone());
    env.storage()
        .persistent()
        .set(&DataKey::Bidders(auction_id), &roster);
}

// ---- per-user indexes ----

pub fn get_created_by(env: &Env, creator: &Address) -> Vec<u64> {
    env.storage()
        .persistent()
        .get(&DataKey::CreatedBy(creator.clone()))
        .unwrap_or(Vec::new(env))
}

pub fn add_created_by(env: &Env, creator: &Address, auction_id: u64) {
    let mut ids = get_created_by(env, creator);
    ids.push_back(auction_id);
    env.storage()
        .persistent()
        .set(&DataKey::CreatedBy(creator.clone()), &ids);
}

pub fn get_bid_in(env: &Env, bidder: &Address) -> Vec<u64> {
    env.storage()
        .persistent()
        .get(&DataKey::BidIn(bidder.clone()))
        .unwrap_or(Vec::new(env))
}

pub fn add_bid_in(env: &Env, bidder: &Address, auction_id: u64) {
    let mut ids = get_bid_in(env, bidder);
    ids.push_back(auction_id);
    env.storage()
        .persistent()
        .set(&DataKey::BidIn(bidder.clone()), &ids);
}
