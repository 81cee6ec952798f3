use soroban_sdk::contracterror;

/// Error codes for the Cloakbid auction contract.
///
/// Variants are grouped by class: every failure rolls the whole invocation
/// back, so callers can always retry once the stated condition changes.
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    // ---- validation ----
    /// start_time must be before end_time and not in the past
    InvalidTimeWindow = 1,
    /// Auction metadata reference must not be empty
    EmptyMetadata = 2,
    /// Minimum bid, when given, must be greater than zero
    InvalidMinimumBid = 3,
    /// Payment below the fixed listing fee
    InsufficientListingFee = 4,
    /// Payment below the fixed claim stake
    InsufficientStake = 5,
    /// Tracking reference must not be empty
    EmptyTrackingRef = 6,
    /// Dispute reason must not be empty
    EmptyDisputeReason = 7,

    // ---- authorization ----
    /// Caller is not the contract admin
    Unauthorized = 20,
    /// Caller is not the auction seller
    NotSeller = 21,
    /// Caller is not the confirmed winner
    NotWinner = 22,

    // ---- state ----
    /// Contract has not been initialized
    NotInitialized = 40,
    /// Contract has already been initialized
    AlreadyInitialized = 41,
    /// No auction with this id
    AuctionNotFound = 42,
    /// Bidding window has not opened yet
    BiddingNotStarted = 43,
    /// Bidding window has closed
    BiddingEnded = 44,
    /// Auction end time has not passed yet
    AuctionNotEnded = 45,
    /// Caller has no recorded bid in this auction
    NoBidRecorded = 46,
    /// Caller has already claimed in this auction
    AlreadyClaimed = 47,
    /// No claim recorded, or stake already withdrawn
    NoStakeToWithdraw = 48,
    /// Auction has no confirmed winner
    NoWinnerConfirmed = 49,
    /// Goods have already been shipped
    AlreadyShipped = 50,
    /// Goods have not been shipped yet
    NotYetShipped = 51,
    /// Receipt has not been confirmed yet
    NotYetReceived = 52,
    /// No dispute is active for this auction
    NoActiveDispute = 53,
    /// Delivery timeout has not elapsed since shipment
    TimeoutNotReached = 54,
    /// No escrowed funds held for this auction
    NoEscrowHeld = 55,
    /// Fee accumulator is empty
    NothingToWithdraw = 56,
    /// Delivery state does not admit this transition
    WrongDeliveryState = 57,

    // ---- resource ----
    /// Bidder roster for this auction is at capacity
    BidderRosterFull = 70,

    // ---- circuit breaker ----
    /// Contract is paused by the admin
    ContractPaused = 80,

    // ---- reentrancy ----
    /// A mutating entry point is already in progress
    ReentrantCall = 90,
}
