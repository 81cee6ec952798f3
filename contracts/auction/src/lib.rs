#![no_std]

mod confidential;
mod delivery;
mod errors;
mod events;
mod settlement;
mod storage;
mod types;

#[cfg(test)]
mod test;

use soroban_sdk::{contract, contractimpl, token, Address, Bytes, Env, String, Vec};

use crate::confidential::{CipherHandle, ConfidentialOpsClient, ConfidentialTokenClient};
pub use crate::errors::Error;
use crate::events::*;
use crate::types::{Auction, BidRecord, ClaimRecord, Config, DeliveryStatus};

// ============================================================================
// Constants
// ============================================================================

/// Number of ledgers in a day (assuming ~5 second block time)
const DAY_IN_LEDGERS: u32 = 17280;

/// TTL extension amount for instance storage (30 days)
const INSTANCE_TTL_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;

/// TTL threshold before extending (29 days)
const INSTANCE_TTL_THRESHOLD: u32 = INSTANCE_TTL_AMOUNT - DAY_IN_LEDGERS;

/// Flat, non-refundable listing fee charged at creation (payment-token
/// stroops); the platform's only guaranteed revenue
pub const LISTING_FEE: i128 = 10_000_000;

/// Fully refundable stake required with every claim
pub const CLAIM_STAKE: i128 = 1_000_000;

/// Hard cap on distinct bidders per auction
pub const MAX_BIDDERS: u32 = 32;

/// Seconds after shipment before the seller may self-release escrow
pub const DELIVERY_TIMEOUT: u64 = 14 * 24 * 60 * 60;

/// Escrow divisor for the platform cut on release (20 => 5%)
pub const PLATFORM_CUT_DIVISOR: u64 = 20;

// ============================================================================
// Contract
// ============================================================================

/// Cloakbid sealed-bid auction contract.
///
/// Runs blind auctions whose bid amounts and running maximum stay
/// confidential: amounts live on an external confidential token ledger and
/// all arithmetic on them is delegated to an encrypted-arithmetic
/// coprocessor. The contract owns the lifecycle — bid accumulation,
/// confidential winner determination with a plaintext tie-break, the unified
/// claim/settlement protocol, the escrow-and-delivery state machine, dispute
/// arbitration and timeout release — plus plaintext fee/stake bookkeeping.
#[contract]
pub struct AuctionContract;

#[contractimpl]
impl AuctionContract {
    // ========================================================================
    // INITIALIZATION
    // ========================================================================

    /// Initialize the contract with the platform admin, the plaintext token
    /// used for fees and stakes, and the two confidential collaborators.
    pub fn initialize(
        env: Env,
        admin: Address,
        payment_token: Address,
        compute: Address,
        ledger: Address,
    ) -> Result<(), Error> {
        admin.require_auth();

        if storage::is_initialized(&env) {
            return Err(Error::AlreadyInitialized);
        }

        storage::set_config(
            &env,
            &Config {
                admin,
                payment_token,
                compute,
                ledger,
                is_paused: false,
            },
        );
        Self::extend_instance_ttl(&env);

        Ok(())
    }

    // ========================================================================
    // AUCTION REGISTRY
    // ========================================================================

    /// Create an auction. `fee_payment` must cover the fixed listing fee and
    /// is credited to the platform accumulator in full.
    pub fn create_auction(
        env: Env,
        seller: Address,
        metadata: String,
        start_time: u64,
        end_time: u64,
        minimum_bid: Option<u64>,
        fee_payment: i128,
    ) -> Result<u64, Error> {
        seller.require_auth();
        let config = storage::get_config(&env).ok_or(Error::NotInitialized)?;
        storage::acquire_guard(&env)?;

        if config.is_paused {
            return Err(Error::ContractPaused);
        }
        if metadata.is_empty() {
            return Err(Error::EmptyMetadata);
        }
        let now = env.ledger().timestamp();
        if start_time >= end_time || start_time < now {
            return Err(Error::InvalidTimeWindow);
        }
        if let Some(floor) = minimum_bid {
            if floor == 0 {
                return Err(Error::InvalidMinimumBid);
            }
        }
        if fee_payment < LISTING_FEE {
            return Err(Error::InsufficientListingFee);
        }

        let token_client = token::TokenClient::new(&env, &config.payment_token);
        token_client.transfer(&seller, &env.current_contract_address(), &fee_payment);
        storage::add_collected_fees(&env, fee_payment);

        let auction_id = storage::increment_auction_counter(&env);
        let auction = Auction {
            id: auction_id,
            seller: seller.clone(),
            metadata,
            listing_fee_paid: fee_payment,
            start_time,
            end_time,
            minimum_bid,
            highest_bid: None,
            leading_bidder: None,
            leading_bid_time: 0,
            winner: None,
            winner_bid_time: 0,
            sold_total: None,
            escrow: None,
            delivery: DeliveryStatus::NotShipped,
            shipped_at: 0,
            tracking: String::from_str(&env, ""),
            dispute_reason: String::from_str(&env, ""),
        };
        storage::save_auction(&env, &auction);
        storage::add_created_by(&env, &seller, auction_id);

        AuctionCreatedEventData {
            auction_id,
            seller,
            start_time,
            end_time,
        }
        .publish(&env);

        Self::extend_instance_ttl(&env);
        storage::release_guard(&env);
        Ok(auction_id)
    }

    // ========================================================================
    // BID LEDGER & WINNER TRACKING
    // ========================================================================

    /// Place (or top up) a confidential bid while the auction is open.
    ///
    /// Admits the ciphertext through the coprocessor, pulls that exact
    /// encrypted amount from the bidder into contract custody, adds it to
    /// the bidder's running total, and incrementally re-selects the
    /// encrypted maximum.
    pub fn bid(
        env: Env,
        auction_id: u64,
        bidder: Address,
        ciphertext: Bytes,
        proof: Bytes,
    ) -> Result<(), Error> {
        bidder.require_auth();
        let config = storage::get_config(&env).ok_or(Error::NotInitialized)?;
        storage::acquire_guard(&env)?;

        if config.is_paused {
            return Err(Error::ContractPaused);
        }
        let mut auction = storage::get_auction(&env, auction_id).ok_or(Error::AuctionNotFound)?;
        let now = env.ledger().timestamp();
        if now < auction.start_time {
            return Err(Error::BiddingNotStarted);
        }
        if now >= auction.end_time {
            return Err(Error::BiddingEnded);
        }

        let existing = storage::get_bid(&env, auction_id, &bidder);
        if existing.is_none() && storage::get_bidders(&env, auction_id).len() >= MAX_BIDDERS {
            return Err(Error::BidderRosterFull);
        }

        let ops = ConfidentialOpsClient::new(&env, &config.compute);
        let ledger = ConfidentialTokenClient::new(&env, &config.ledger);
        let this = env.current_contract_address();

        let amount = ops.admit(&bidder, &ciphertext, &proof);
        ledger.ctransfer_from(&this, &bidder, &this, &amount);

        // Increase-only accumulation: a new bid adds to, never replaces,
        // the previous total.
        let total = match &existing {
            Some(record) => ops.add(&record.total, &amount),
            None => amount,
        };

        // Incremental winner tracking. The stored maximum ciphertext is
        // always the true leading amount: gt replaces it on a strict
        // increase, and the eq gate covers the tie-break preference.
        match auction.highest_bid {
            None => {
                auction.highest_bid = Some(total);
            }
            Some(maximum) => {
                let greater = ops.gt(&total, &maximum);
                let mut new_maximum = ops.select(&greater, &total, &maximum);
                if let Some(leader) = &auction.leading_bidder {
                    if settlement::outranks(now, &bidder, auction.leading_bid_time, leader) {
                        let equal = ops.eq(&total, &maximum);
                        new_maximum = ops.select(&equal, &total, &new_maximum);
                    }
                }
                auction.highest_bid = Some(new_maximum);
            }
        }
        // Advisory pointer only: addresses cannot be homomorphically
        // selected, so identity is re-confirmed at claim time.
        auction.leading_bidder = Some(bidder.clone());
        auction.leading_bid_time = now;

        if existing.is_none() {
            storage::add_bidder(&env, auction_id, &bidder);
            storage::add_bid_in(&env, &bidder, auction_id);
        }
        storage::save_bid(
            &env,
            auction_id,
            &bidder,
            &BidRecord {
                total,
                last_bid_time: now,
            },
        );
        storage::save_auction(&env, &auction);

        BidPlacedEventData { auction_id, bidder }.publish(&env);

        Self::extend_instance_ttl(&env);
        storage::release_guard(&env);
        Ok(())
    }

    // ========================================================================
    // SETTLEMENT
    // ========================================================================

    /// Settle the caller's position after auction end. Callable exactly once
    /// per (auction, bidder); requires the fixed stake as payment.
    pub fn claim(
        env: Env,
        auction_id: u64,
        claimant: Address,
        stake_payment: i128,
    ) -> Result<(), Error> {
        claimant.require_auth();
        let config = storage::get_config(&env).ok_or(Error::NotInitialized)?;
        storage::acquire_guard(&env)?;

        if config.is_paused {
            return Err(Error::ContractPaused);
        }
        settlement::claim(&env, &config, auction_id, &claimant, stake_payment)?;

        Self::extend_instance_ttl(&env);
        storage::release_guard(&env);
        Ok(())
    }

    /// Return the stake paid at claim time. Decoupled from `claim` so
    /// settlement never depends on a second plaintext transfer succeeding.
    pub fn withdraw_stake(env: Env, auction_id: u64, claimant: Address) -> Result<(), Error> {
        claimant.require_auth();
        let config = storage::get_config(&env).ok_or(Error::NotInitialized)?;
        storage::acquire_guard(&env)?;

        settlement::withdraw_stake(&env, &config, auction_id, &claimant)?;

        Self::extend_instance_ttl(&env);
        storage::release_guard(&env);
        Ok(())
    }

    // ========================================================================
    // ESCROW & DELIVERY
    // ========================================================================

    pub fn confirm_shipment(
        env: Env,
        auction_id: u64,
        seller: Address,
        tracking: String,
    ) -> Result<(), Error> {
        seller.require_auth();
        storage::get_config(&env).ok_or(Error::NotInitialized)?;
        storage::acquire_guard(&env)?;

        delivery::confirm_shipment(&env, auction_id, &seller, tracking)?;

        Self::extend_instance_ttl(&env);
        storage::release_guard(&env);
        Ok(())
    }

    pub fn confirm_receipt(env: Env, auction_id: u64, winner: Address) -> Result<(), Error> {
        winner.require_auth();
        storage::get_config(&env).ok_or(Error::NotInitialized)?;
        storage::acquire_guard(&env)?;

        delivery::confirm_receipt(&env, auction_id, &winner)?;

        Self::extend_instance_ttl(&env);
        storage::release_guard(&env);
        Ok(())
    }

    pub fn withdraw_escrow(env: Env, auction_id: u64, seller: Address) -> Result<(), Error> {
        seller.require_auth();
        let config = storage::get_config(&env).ok_or(Error::NotInitialized)?;
        storage::acquire_guard(&env)?;

        delivery::withdraw_escrow(&env, &config, auction_id, &seller)?;

        Self::extend_instance_ttl(&env);
        storage::release_guard(&env);
        Ok(())
    }

    pub fn raise_dispute(
        env: Env,
        auction_id: u64,
        winner: Address,
        reason: String,
    ) -> Result<(), Error> {
        winner.require_auth();
        storage::get_config(&env).ok_or(Error::NotInitialized)?;
        storage::acquire_guard(&env)?;

        delivery::raise_dispute(&env, auction_id, &winner, reason)?;

        Self::extend_instance_ttl(&env);
        storage::release_guard(&env);
        Ok(())
    }

    pub fn admin_arbitrate(
        env: Env,
        auction_id: u64,
        admin: Address,
        refund_to_buyer: bool,
    ) -> Result<(), Error> {
        admin.require_auth();
        let config = storage::get_config(&env).ok_or(Error::NotInitialized)?;
        if admin != config.admin {
            return Err(Error::Unauthorized);
        }
        storage::acquire_guard(&env)?;

        delivery::admin_arbitrate(&env, &config, auction_id, refund_to_buyer)?;

        Self::extend_instance_ttl(&env);
        storage::release_guard(&env);
        Ok(())
    }

    pub fn claim_escrow_after_timeout(
        env: Env,
        auction_id: u64,
        seller: Address,
    ) -> Result<(), Error> {
        seller.require_auth();
        let config = storage::get_config(&env).ok_or(Error::NotInitialized)?;
        storage::acquire_guard(&env)?;

        delivery::claim_escrow_after_timeout(&env, &config, auction_id, &seller)?;

        Self::extend_instance_ttl(&env);
        storage::release_guard(&env);
        Ok(())
    }

    // ========================================================================
    // FEES & ADMIN
    // ========================================================================

    /// Withdraw the platform fee accumulator (admin only).
    pub fn withdraw_fees(env: Env, admin: Address) -> Result<i128, Error> {
        admin.require_auth();
        let config = storage::get_config(&env).ok_or(Error::NotInitialized)?;
        if admin != config.admin {
            return Err(Error::Unauthorized);
        }
        storage::acquire_guard(&env)?;

        let amount = storage::get_collected_fees(&env);
        if amount == 0 {
            return Err(Error::NothingToWithdraw);
        }
        storage::reset_collected_fees(&env);

        let token_client = token::TokenClient::new(&env, &config.payment_token);
        token_client.transfer(&env.current_contract_address(), &admin, &amount);

        FeesWithdrawnEventData {
            admin: admin.clone(),
            amount,
        }
        .publish(&env);

        Self::extend_instance_ttl(&env);
        storage::release_guard(&env);
        Ok(amount)
    }

    /// Engage the global circuit breaker: blocks create/bid/claim. Does not
    /// roll back funds already in flight.
    pub fn pause(env: Env, admin: Address) -> Result<(), Error> {
        Self::set_paused(&env, &admin, true)
    }

    pub fn unpause(env: Env, admin: Address) -> Result<(), Error> {
        Self::set_paused(&env, &admin, false)
    }

    // ========================================================================
    // QUERIES
    // ========================================================================

    pub fn get_auction(env: Env, auction_id: u64) -> Result<Auction, Error> {
        storage::get_auction(&env, auction_id).ok_or(Error::AuctionNotFound)
    }

    pub fn get_auctions_by_creator(env: Env, creator: Address) -> Vec<u64> {
        storage::get_created_by(&env, &creator)
    }

    pub fn get_auctions_by_bidder(env: Env, bidder: Address) -> Vec<u64> {
        storage::get_bid_in(&env, &bidder)
    }

    pub fn get_bidders(env: Env, auction_id: u64) -> Result<Vec<Address>, Error> {
        if storage::get_auction(&env, auction_id).is_none() {
            return Err(Error::AuctionNotFound);
        }
        Ok(storage::get_bidders(&env, auction_id))
    }

    /// A bidder's handle to their own encrypted running total, with a fresh
    /// read grant so they can decrypt it client-side.
    pub fn get_bid_handle(
        env: Env,
        auction_id: u64,
        bidder: Address,
    ) -> Result<CipherHandle, Error> {
        bidder.require_auth();
        let config = storage::get_config(&env).ok_or(Error::NotInitialized)?;
        let record = storage::get_bid(&env, auction_id, &bidder).ok_or(Error::NoBidRecorded)?;

        let ops = ConfidentialOpsClient::new(&env, &config.compute);
        ops.grant_read(&record.total, &bidder);

        Ok(record.total)
    }

    pub fn get_claim(env: Env, auction_id: u64, claimant: Address) -> Result<ClaimRecord, Error> {
        storage::get_claim(&env, auction_id, &claimant).ok_or(Error::NoStakeToWithdraw)
    }

    pub fn get_collected_fees(env: Env) -> i128 {
        storage::get_collected_fees(&env)
    }

    pub fn is_paused(env: Env) -> Result<bool, Error> {
        let config = storage::get_config(&env).ok_or(Error::NotInitialized)?;
        Ok(config.is_paused)
    }

    pub fn get_config(env: Env) -> Result<Config, Error> {
        storage::get_config(&env).ok_or(Error::NotInitialized)
    }

    // ========================================================================
    // INTERNAL HELPERS
    // ========================================================================

    fn set_paused(env: &Env, admin: &Address, paused: bool) -> Result<(), Error> {
        admin.require_auth();
        let mut config = storage::get_config(env).ok_or(Error::NotInitialized)?;
        if *admin != config.admin {
            return Err(Error::Unauthorized);
        }

        config.is_paused = paused;
        storage::set_config(env, &config);

        PauseToggledEventData {
            admin: admin.clone(),
            is_paused: paused,
        }
        .publish(env);

        Self::extend_instance_ttl(env);
        Ok(())
    }

    /// Extend the TTL of instance storage.
    /// Called internally during state-changing operations.
    fn extend_instance_ttl(env: &Env) {
        env.storage()
            .instance()
            .extend_ttl(INSTANCE_TTL_THRESHOLD, INSTANCE_TTL_AMOUNT);
    }
}
