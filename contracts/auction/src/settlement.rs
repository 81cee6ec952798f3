//! Claim protocol: the unified settlement entry point every bidder calls
//! after auction end.
//!
//! Fund routing never branches control flow on ciphertext contents. Escrow
//! and refund legs are computed with predicate-gated homomorphic select and
//! both confidential transfers always execute, one of them carrying an
//! encrypted zero. The only plaintext fact consumed is the revealed
//! winner-identity predicate, which becomes public contract state the moment
//! a winner is confirmed.

use soroban_sdk::{token, Address, Env};

use crate::confidential::{route, ConfidentialOpsClient, ConfidentialTokenClient};
use crate::errors::Error;
use crate::events::{ClaimedEventData, StakeWithdrawnEventData};
use crate::storage;
use crate::types::{ClaimRecord, Config, DeliveryStatus};
use crate::CLAIM_STAKE;

/// Deterministic plaintext tie-break: earlier contribution timestamp wins;
/// equal timestamps fall back to the lexicographically smaller address.
pub fn outranks(time_a: u64, addr_a: &Address, time_b: u64, addr_b: &Address) -> bool {
    time_a < time_b || (time_a == time_b && addr_a < addr_b)
}

pub fn claim(
    env: &Env,
    config: &Config,
    auction_id: u64,
    claimant: &Address,
    stake_payment: i128,
) -> Result<(), Error> {
    let mut auction = storage::get_auction(env, auction_id).ok_or(Error::AuctionNotFound)?;
    if env.ledger().timestamp() < auction.end_time {
        return Err(Error::AuctionNotEnded);
    }
    let bid = storage::get_bid(env, auction_id, claimant).ok_or(Error::NoBidRecorded)?;
    if let Some(existing) = storage::get_claim(env, auction_id, claimant) {
        if existing.claimed {
            return Err(Error::AlreadyClaimed);
        }
    }
    if stake_payment < CLAIM_STAKE {
        return Err(Error::InsufficientStake);
    }

    let this = env.current_contract_address();

    // Take the stake up front; settlement routing below makes no further
    // plaintext-currency transfers, so its success never hinges on a second
    // native leg.
    let token_client = token::TokenClient::new(env, &config.payment_token);
    token_client.transfer(claimant, &this, &stake_payment);

    let ops = ConfidentialOpsClient::new(env, &config.compute);
    let ledger = ConfidentialTokenClient::new(env, &config.ledger);

    // A recorded bid implies the encrypted maximum is set.
    let maximum = auction.highest_bid.ok_or(Error::NoBidRecorded)?;
    let predicate = ops.eq(&bid.total, &maximum);
    ops.grant_read(&predicate, &this);
    let holds_maximum = ops.reveal_bool(&this, &predicate);
    let zero = ops.sub(&bid.total, &bid.total);

    // Check-then-effect: the claim is recorded before any transfer leaves
    // the contract, so a reentrant call observes the claimed state.
    storage::save_claim(
        env,
        auction_id,
        claimant,
        &ClaimRecord {
            claimed: true,
            stake: stake_payment,
        },
    );

    let (escrow_leg, refund_leg) = if holds_maximum {
        match auction.winner.clone() {
            None => {
                // Tentative confirmation, displaceable by a later claimant
                // with better tie-break priority.
                auction.winner = Some(claimant.clone());
                auction.winner_bid_time = bid.last_bid_time;
                let (escrow_leg, refund_leg) = route(&ops, predicate, bid.total, zero);
                auction.sold_total = Some(match auction.sold_total {
                    Some(sold) => ops.add(&sold, &escrow_leg),
                    None => escrow_leg,
                });
                auction.escrow = Some(escrow_leg);
                (escrow_leg, refund_leg)
            }
            Some(winner) => {
                // Displacement closes once the escrow lifecycle advances:
                // after shipment, release or arbitration the sale stands,
                // and a better-ranked claimant gets a full refund instead
                // of re-pointing it.
                let displaceable = auction.escrow.is_some()
                    && auction.delivery == DeliveryStatus::NotShipped;
                if displaceable
                    && outranks(bid.last_bid_time, claimant, auction.winner_bid_time, &winner)
                {
                    // Displacement: the old escrow is zeroed and refunded
                    // before the new one is credited, so no two claimants
                    // ever hold a nonzero escrow at once.
                    if let Some(old_escrow) = auction.escrow {
                        ledger.ctransfer(&this, &winner, &old_escrow);
                        if let Some(sold) = auction.sold_total {
                            auction.sold_total = Some(ops.sub(&sold, &old_escrow));
                        }
                    }
                    auction.winner = Some(claimant.clone());
                    auction.winner_bid_time = bid.last_bid_time;
                    let (escrow_leg, refund_leg) = route(&ops, predicate, bid.total, zero);
                    auction.sold_total = Some(match auction.sold_total {
                        Some(sold) => ops.add(&sold, &escrow_leg),
                        None => escrow_leg,
                    });
                    auction.escrow = Some(escrow_leg);
                    (escrow_leg, refund_leg)
                } else {
                    // Worse tie-break priority, or the sale already
                    // advanced: full refund.
                    (zero, bid.total)
                }
            }
        }
    } else {
        // Not the maximum holder; the gated legs degenerate to a full
        // refund without the shape of the call revealing it.
        route(&ops, predicate, bid.total, zero)
    };

    // Both legs execute on every path. The escrow leg stays in contract
    // custody; the refund leg goes back to the claimant.
    ledger.ctransfer(&this, &this, &escrow_leg);
    ledger.ctransfer(&this, claimant, &refund_leg);

    storage::save_auction(env, &auction);

    ClaimedEventData {
        auction_id,
        claimant: claimant.clone(),
    }
    .publish(env);

    Ok(())
}

pub fn withdraw_stake(
    env: &Env,
    config: &Config,
    auction_id: u64,
    claimant: &Address,
) -> Result<(), Error> {
    if storage::get_auction(env, auction_id).is_none() {
        return Err(Error::AuctionNotFound);
    }
    let mut record =
        storage::get_claim(env, auction_id, claimant).ok_or(Error::NoStakeToWithdraw)?;
    if !record.claimed || record.stake == 0 {
        return Err(Error::NoStakeToWithdraw);
    }

    let amount = record.stake;
    record.stake = 0;
    storage::save_claim(env, auction_id, claimant, &record);

    let token_client = token::TokenClient::new(env, &config.payment_token);
    token_client.transfer(&env.current_contract_address(), claimant, &amount);

    StakeWithdrawnEventData {
        auction_id,
        claimant: claimant.clone(),
        amount,
    }
    .publish(env);

    Ok(())
}
