//! Escrow and goods-delivery state machine layered on top of settlement.
//!
//! Escrowed funds stay locked even after the winner confirms receipt;
//! release is a separate, intentional seller action (or the timeout escape
//! valve for a non-responsive buyer).

use soroban_sdk::{Address, Env, String};

use crate::confidential::{CipherHandle, ConfidentialOpsClient, ConfidentialTokenClient};
use crate::errors::Error;
use crate::events::{
    DisputeArbitratedEventData, DisputeRaisedEventData, EscrowTimeoutEventData,
    EscrowWithdrawnEventData, ReceiptConfirmedEventData, ShipmentConfirmedEventData,
};
use crate::storage;
use crate::types::{Auction, Config, DeliveryStatus};
use crate::{DELIVERY_TIMEOUT, PLATFORM_CUT_DIVISOR};

fn require_seller(auction: &Auction, caller: &Address) -> Result<(), Error> {
    if auction.seller != *caller {
        return Err(Error::NotSeller);
    }
    Ok(())
}

fn require_winner(auction: &Auction, caller: &Address) -> Result<(), Error> {
    match &auction.winner {
        Some(winner) if winner == caller => Ok(()),
        _ => Err(Error::NotWinner),
    }
}

/// Split the escrow into the fixed platform cut and the seller remainder,
/// both via confidential transfer out of contract custody.
fn release_escrow_split(env: &Env, config: &Config, escrow: CipherHandle, seller: &Address) {
    let ops = ConfidentialOpsClient::new(env, &config.compute);
    let ledger = ConfidentialTokenClient::new(env, &config.ledger);
    let this = env.current_contract_address();

    let platform_cut = ops.div(&escrow, &PLATFORM_CUT_DIVISOR);
    let seller_share = ops.sub(&escrow, &platform_cut);

    ledger.ctransfer(&this, seller, &seller_share);
    ledger.ctransfer(&this, &config.admin, &platform_cut);
}

pub fn confirm_shipment(
    env: &Env,
    auction_id: u64,
    seller: &Address,
    tracking: String,
) -> Result<(), Error> {
    let mut auction = storage::get_auction(env, auction_id).ok_or(Error::AuctionNotFound)?;
    require_seller(&auction, seller)?;
    if auction.winner.is_none() {
        return Err(Error::NoWinnerConfirmed);
    }
    if auction.delivery != DeliveryStatus::NotShipped {
        return Err(Error::AlreadyShipped);
    }
    if tracking.is_empty() {
        return Err(Error::EmptyTrackingRef);
    }

    auction.delivery = DeliveryStatus::Shipped;
    auction.shipped_at = env.ledger().timestamp();
    auction.tracking = tracking.clone();
    storage::save_auction(env, &auction);

    ShipmentConfirmedEventData {
        auction_id,
        tracking,
    }
    .publish(env);

    Ok(())
}

pub fn confirm_receipt(env: &Env, auction_id: u64, winner: &Address) -> Result<(), Error> {
    let mut auction = storage::get_auction(env, auction_id).ok_or(Error::AuctionNotFound)?;
    require_winner(&auction, winner)?;
    match auction.delivery {
        DeliveryStatus::Shipped => {}
        DeliveryStatus::NotShipped => return Err(Error::NotYetShipped),
        _ => return Err(Error::WrongDeliveryState),
    }

    // Escrow stays locked; the seller releases it via withdraw_escrow.
    auction.delivery = DeliveryStatus::Received;
    storage::save_auction(env, &auction);

    ReceiptConfirmedEventData { auction_id }.publish(env);

    Ok(())
}

pub fn withdraw_escrow(
    env: &Env,
    config: &Config,
    auction_id: u64,
    seller: &Address,
) -> Result<(), Error> {
    let mut auction = storage::get_auction(env, auction_id).ok_or(Error::AuctionNotFound)?;
    require_seller(&auction, seller)?;
    match auction.delivery {
        DeliveryStatus::Received => {}
        DeliveryStatus::NotShipped | DeliveryStatus::Shipped => {
            return Err(Error::NotYetReceived)
        }
        _ => return Err(Error::WrongDeliveryState),
    }
    let escrow = auction.escrow.ok_or(Error::NoEscrowHeld)?;

    // Zero the escrow record before the transfers leave custody. Received
    // remains the resting state once escrow is empty.
    auction.escrow = None;
    storage::save_auction(env, &auction);

    release_escrow_split(env, config, escrow, seller);

    EscrowWithdrawnEventData {
        auction_id,
        seller: seller.clone(),
    }
    .publish(env);

    Ok(())
}

pub fn raise_dispute(
    env: &Env,
    auction_id: u64,
    winner: &Address,
    reason: String,
) -> Result<(), Error> {
    let mut auction = storage::get_auction(env, auction_id).ok_or(Error::AuctionNotFound)?;
    require_winner(&auction, winner)?;
    match auction.delivery {
        DeliveryStatus::Shipped => {}
        DeliveryStatus::NotShipped => return Err(Error::NotYetShipped),
        _ => return Err(Error::WrongDeliveryState),
    }
    if reason.is_empty() {
        return Err(Error::EmptyDisputeReason);
    }

    auction.delivery = DeliveryStatus::Disputed;
    auction.dispute_reason = reason;
    storage::save_auction(env, &auction);

    DisputeRaisedEventData {
        auction_id,
        winner: winner.clone(),
    }
    .publish(env);

    Ok(())
}

pub fn admin_arbitrate(
    env: &Env,
    config: &Config,
    auction_id: u64,
    refund_to_buyer: bool,
) -> Result<(), Error> {
    let mut auction = storage::get_auction(env, auction_id).ok_or(Error::AuctionNotFound)?;
    if auction.delivery != DeliveryStatus::Disputed {
        return Err(Error::NoActiveDispute);
    }
    let escrow = auction.escrow.ok_or(Error::NoEscrowHeld)?;
    let winner = auction.winner.clone().ok_or(Error::NoWinnerConfirmed)?;

    auction.escrow = None;
    auction.delivery = DeliveryStatus::Arbitrated;
    storage::save_auction(env, &auction);

    let ledger = ConfidentialTokenClient::new(env, &config.ledger);
    let this = env.current_contract_address();
    let recipient = if refund_to_buyer {
        &winner
    } else {
        &auction.seller
    };
    ledger.ctransfer(&this, recipient, &escrow);

    DisputeArbitratedEventData {
        auction_id,
        refund_to_buyer,
    }
    .publish(env);

    Ok(())
}

pub fn claim_escrow_after_timeout(
    env: &Env,
    config: &Config,
    auction_id: u64,
    seller: &Address,
) -> Result<(), Error> {
    let mut auction = storage::get_auction(env, auction_id).ok_or(Error::AuctionNotFound)?;
    require_seller(&auction, seller)?;
    match auction.delivery {
        DeliveryStatus::Shipped => {}
        DeliveryStatus::NotShipped => return Err(Error::NotYetShipped),
        _ => return Err(Error::WrongDeliveryState),
    }
    let now = env.ledger().timestamp();
    if now < auction.shipped_at + DELIVERY_TIMEOUT {
        return Err(Error::TimeoutNotReached);
    }
    let escrow = auction.escrow.ok_or(Error::NoEscrowHeld)?;

    // Behaves as buyer-confirmed receipt plus immediate withdrawal.
    auction.delivery = DeliveryStatus::Received;
    auction.escrow = None;
    storage::save_auction(env, &auction);

    release_escrow_split(env, config, escrow, seller);

    EscrowTimeoutEventData {
        auction_id,
        seller: seller.clone(),
    }
    .publish(env);

    Ok(())
}
