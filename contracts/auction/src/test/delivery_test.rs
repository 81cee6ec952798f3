use soroban_sdk::{testutils::Address as _, Address, String};

use crate::test::{advance_ledger, create_open_auction, encipher, new_bidder, setup_test, TestCtx};
use crate::types::DeliveryStatus;
use crate::{Error, CLAIM_STAKE, DELIVERY_TIMEOUT};

/// Run an auction to a settled state: one winner holding a 250 escrow.
fn settle_with_winner(ctx: &TestCtx) -> (u64, Address) {
    let auction_id = create_open_auction(ctx);
    let winner = new_bidder(ctx, 1_000);
    let (ciphertext, proof) = encipher(&ctx.env, 250);
    ctx.client.bid(&auction_id, &winner, &ciphertext, &proof);

    advance_ledger(&ctx.env, 3600);
    ctx.client.claim(&auction_id, &winner, &CLAIM_STAKE);
    (auction_id, winner)
}

fn tracking_ref(ctx: &TestCtx) -> String {
    String::from_str(&ctx.env, "carrier-7731")
}

#[test]
fn test_full_delivery_happy_path() {
    let ctx = setup_test();
    let (auction_id, winner) = settle_with_winner(&ctx);

    ctx.client
        .confirm_shipment(&auction_id, &ctx.seller, &tracking_ref(&ctx));
    let auction = ctx.client.get_auction(&auction_id);
    assert_eq!(auction.delivery, DeliveryStatus::Shipped);
    assert_eq!(auction.tracking, tracking_ref(&ctx));
    assert_eq!(auction.shipped_at, ctx.env.ledger().timestamp());

    ctx.client.confirm_receipt(&auction_id, &winner);
    let auction = ctx.client.get_auction(&auction_id);
    assert_eq!(auction.delivery, DeliveryStatus::Received);
    // receipt alone does not move escrow
    assert!(auction.escrow.is_some());
    assert_eq!(ctx.confidential.balance_plain(&ctx.contract_id), 250);

    ctx.client.withdraw_escrow(&auction_id, &ctx.seller);
    // 5% platform cut: 250 / 20 = 12, seller keeps 238
    assert_eq!(ctx.confidential.balance_plain(&ctx.seller), 238);
    assert_eq!(ctx.confidential.balance_plain(&ctx.admin), 12);
    assert_eq!(ctx.confidential.balance_plain(&ctx.contract_id), 0);

    let auction = ctx.client.get_auction(&auction_id);
    assert_eq!(auction.delivery, DeliveryStatus::Received);
    assert_eq!(auction.escrow, None);
}

#[test]
fn test_shipment_preconditions() {
    let ctx = setup_test();
    let auction_id = create_open_auction(&ctx);
    let bidder = new_bidder(&ctx, 1_000);
    let (ciphertext, proof) = encipher(&ctx.env, 250);
    ctx.client.bid(&auction_id, &bidder, &ciphertext, &proof);
    advance_ledger(&ctx.env, 3600);

    // no confirmed winner until someone claims
    let result = ctx
        .client
        .try_confirm_shipment(&auction_id, &ctx.seller, &tracking_ref(&ctx));
    assert_eq!(result, Err(Ok(Error::NoWinnerConfirmed)));

    ctx.client.claim(&auction_id, &bidder, &CLAIM_STAKE);

    let stranger = Address::generate(&ctx.env);
    let result = ctx
        .client
        .try_confirm_shipment(&auction_id, &stranger, &tracking_ref(&ctx));
    assert_eq!(result, Err(Ok(Error::NotSeller)));

    let empty = String::from_str(&ctx.env, "");
    let result = ctx.client.try_confirm_shipment(&auction_id, &ctx.seller, &empty);
    assert_eq!(result, Err(Ok(Error::EmptyTrackingRef)));

    ctx.client
        .confirm_shipment(&auction_id, &ctx.seller, &tracking_ref(&ctx));
    let result = ctx
        .client
        .try_confirm_shipment(&auction_id, &ctx.seller, &tracking_ref(&ctx));
    assert_eq!(result, Err(Ok(Error::AlreadyShipped)));
}

#[test]
fn test_receipt_preconditions() {
    let ctx = setup_test();
    let (auction_id, winner) = settle_with_winner(&ctx);

    let result = ctx.client.try_confirm_receipt(&auction_id, &winner);
    assert_eq!(result, Err(Ok(Error::NotYetShipped)));

    ctx.client
        .confirm_shipment(&auction_id, &ctx.seller, &tracking_ref(&ctx));

    let stranger = Address::generate(&ctx.env);
    let result = ctx.client.try_confirm_receipt(&auction_id, &stranger);
    assert_eq!(result, Err(Ok(Error::NotWinner)));
}

#[test]
fn test_escrow_withdrawal_requires_receipt() {
    let ctx = setup_test();
    let (auction_id, winner) = settle_with_winner(&ctx);

    let result = ctx.client.try_withdraw_escrow(&auction_id, &ctx.seller);
    assert_eq!(result, Err(Ok(Error::NotYetReceived)));

    ctx.client
        .confirm_shipment(&auction_id, &ctx.seller, &tracking_ref(&ctx));
    let result = ctx.client.try_withdraw_escrow(&auction_id, &ctx.seller);
    assert_eq!(result, Err(Ok(Error::NotYetReceived)));

    ctx.client.confirm_receipt(&auction_id, &winner);
    ctx.client.withdraw_escrow(&auction_id, &ctx.seller);

    // withdrawal happens exactly once
    let result = ctx.client.try_withdraw_escrow(&auction_id, &ctx.seller);
    assert_eq!(result, Err(Ok(Error::NoEscrowHeld)));
    assert_eq!(ctx.confidential.balance_plain(&ctx.seller), 238);
}

#[test]
fn test_dispute_preconditions() {
    let ctx = setup_test();
    let (auction_id, winner) = settle_with_winner(&ctx);

    let reason = String::from_str(&ctx.env, "never arrived");
    let result = ctx.client.try_raise_dispute(&auction_id, &winner, &reason);
    assert_eq!(result, Err(Ok(Error::NotYetShipped)));

    ctx.client
        .confirm_shipment(&auction_id, &ctx.seller, &tracking_ref(&ctx));

    let empty = String::from_str(&ctx.env, "");
    let result = ctx.client.try_raise_dispute(&auction_id, &winner, &empty);
    assert_eq!(result, Err(Ok(Error::EmptyDisputeReason)));

    let result = ctx.client.try_raise_dispute(&auction_id, &ctx.seller, &reason);
    assert_eq!(result, Err(Ok(Error::NotWinner)));

    ctx.client.raise_dispute(&auction_id, &winner, &reason);
    let auction = ctx.client.get_auction(&auction_id);
    assert_eq!(auction.delivery, DeliveryStatus::Disputed);
    assert_eq!(auction.dispute_reason, reason);
}

#[test]
fn test_arbitration_refunds_buyer() {
    let ctx = setup_test();
    let (auction_id, winner) = settle_with_winner(&ctx);
    ctx.client
        .confirm_shipment(&auction_id, &ctx.seller, &tracking_ref(&ctx));
    ctx.client
        .raise_dispute(&auction_id, &winner, &String::from_str(&ctx.env, "damaged"));

    ctx.client.admin_arbitrate(&auction_id, &ctx.admin, &true);

    // full refund, no platform cut on an arbitrated return
    assert_eq!(ctx.confidential.balance_plain(&winner), 1_000);
    assert_eq!(ctx.confidential.balance_plain(&ctx.seller), 0);
    assert_eq!(ctx.confidential.balance_plain(&ctx.contract_id), 0);

    let auction = ctx.client.get_auction(&auction_id);
    assert_eq!(auction.delivery, DeliveryStatus::Arbitrated);
    assert_eq!(auction.escrow, None);
}

#[test]
fn test_arbitration_pays_seller() {
    let ctx = setup_test();
    let (auction_id, winner) = settle_with_winner(&ctx);
    ctx.client
        .confirm_shipment(&auction_id, &ctx.seller, &tracking_ref(&ctx));
    ctx.client
        .raise_dispute(&auction_id, &winner, &String::from_str(&ctx.env, "frivolous"));

    ctx.client.admin_arbitrate(&auction_id, &ctx.admin, &false);

    // the seller gets the whole escrow; arbitration skips the fee split
    assert_eq!(ctx.confidential.balance_plain(&ctx.seller), 250);
    assert_eq!(ctx.confidential.balance_plain(&winner), 750);
}

#[test]
fn test_arbitration_requires_dispute_and_admin() {
    let ctx = setup_test();
    let (auction_id, winner) = settle_with_winner(&ctx);

    let result = ctx.client.try_admin_arbitrate(&auction_id, &ctx.admin, &true);
    assert_eq!(result, Err(Ok(Error::NoActiveDispute)));

    ctx.client
        .confirm_shipment(&auction_id, &ctx.seller, &tracking_ref(&ctx));
    ctx.client
        .raise_dispute(&auction_id, &winner, &String::from_str(&ctx.env, "late"));

    let result = ctx.client.try_admin_arbitrate(&auction_id, &winner, &true);
    assert_eq!(result, Err(Ok(Error::Unauthorized)));
}

#[test]
fn test_arbitrated_is_terminal() {
    let ctx = setup_test();
    let (auction_id, winner) = settle_with_winner(&ctx);
    ctx.client
        .confirm_shipment(&auction_id, &ctx.seller, &tracking_ref(&ctx));
    ctx.client
        .raise_dispute(&auction_id, &winner, &String::from_str(&ctx.env, "lost"));
    ctx.client.admin_arbitrate(&auction_id, &ctx.admin, &true);

    let result = ctx.client.try_confirm_receipt(&auction_id, &winner);
    assert_eq!(result, Err(Ok(Error::WrongDeliveryState)));

    let result = ctx.client.try_withdraw_escrow(&auction_id, &ctx.seller);
    assert_eq!(result, Err(Ok(Error::WrongDeliveryState)));

    let reason = String::from_str(&ctx.env, "again");
    let result = ctx.client.try_raise_dispute(&auction_id, &winner, &reason);
    assert_eq!(result, Err(Ok(Error::WrongDeliveryState)));

    let result = ctx
        .client
        .try_claim_escrow_after_timeout(&auction_id, &ctx.seller);
    assert_eq!(result, Err(Ok(Error::WrongDeliveryState)));
}

#[test]
fn test_timeout_release() {
    let ctx = setup_test();
    let (auction_id, _winner) = settle_with_winner(&ctx);
    ctx.client
        .confirm_shipment(&auction_id, &ctx.seller, &tracking_ref(&ctx));

    let result = ctx
        .client
        .try_claim_escrow_after_timeout(&auction_id, &ctx.seller);
    assert_eq!(result, Err(Ok(Error::TimeoutNotReached)));

    advance_ledger(&ctx.env, DELIVERY_TIMEOUT - 1);
    let result = ctx
        .client
        .try_claim_escrow_after_timeout(&auction_id, &ctx.seller);
    assert_eq!(result, Err(Ok(Error::TimeoutNotReached)));

    advance_ledger(&ctx.env, 1);
    ctx.client.claim_escrow_after_timeout(&auction_id, &ctx.seller);

    // behaves like receipt plus withdrawal, split included
    assert_eq!(ctx.confidential.balance_plain(&ctx.seller), 238);
    assert_eq!(ctx.confidential.balance_plain(&ctx.admin), 12);
    let auction = ctx.client.get_auction(&auction_id);
    assert_eq!(auction.delivery, DeliveryStatus::Received);
    assert_eq!(auction.escrow, None);
}

#[test]
fn test_timeout_requires_seller() {
    let ctx = setup_test();
    let (auction_id, winner) = settle_with_winner(&ctx);
    ctx.client
        .confirm_shipment(&auction_id, &ctx.seller, &tracking_ref(&ctx));
    advance_ledger(&ctx.env, DELIVERY_TIMEOUT);

    let result = ctx.client.try_claim_escrow_after_timeout(&auction_id, &winner);
    assert_eq!(result, Err(Ok(Error::NotSeller)));
}
