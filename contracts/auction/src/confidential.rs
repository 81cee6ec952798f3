//! Interface boundary to the external confidential capabilities.
//!
//! The auction contract never sees plaintext bid amounts. It holds opaque
//! handles to encrypted 64-bit unsigned integers and delegates every
//! arithmetic step to a coprocessor contract, the same way bids themselves
//! live on a separate confidential token ledger. Both collaborators are
//! addressed through the clients below; tests register an in-crate mock that
//! implements both traits.

use soroban_sdk::{contractclient, Address, Bytes, Env};

/// Opaque reference to an encrypted 64-bit unsigned integer held by the
/// coprocessor. Comparisons yield handles to encrypted booleans.
pub type CipherHandle = u64;

/// Encrypted-arithmetic coprocessor.
///
/// `admit` verifies the well-formedness proof accompanying a fresh
/// ciphertext and returns a handle for it. All other operations combine
/// existing handles without revealing plaintext. `reveal_bool` reads an
/// encrypted boolean previously granted to the caller; the contract uses it
/// for exactly one predicate, the winner-identity check, whose outcome is
/// public contract state anyway once settlement confirms a winner.
#[contractclient(name = "ConfidentialOpsClient")]
pub trait ConfidentialOps {
    fn admit(env: Env, from: Address, ciphertext: Bytes, proof: Bytes) -> CipherHandle;
    fn add(env: Env, a: CipherHandle, b: CipherHandle) -> CipherHandle;
    fn sub(env: Env, a: CipherHandle, b: CipherHandle) -> CipherHandle;
    /// Division by a plaintext constant; used for the platform fee split.
    fn div(env: Env, a: CipherHandle, divisor: u64) -> CipherHandle;
    /// Encrypted `a > b`.
    fn gt(env: Env, a: CipherHandle, b: CipherHandle) -> CipherHandle;
    /// Encrypted `a == b`.
    fn eq(env: Env, a: CipherHandle, b: CipherHandle) -> CipherHandle;
    /// Homomorphic ternary: `cond ? if_true : if_false`.
    fn select(
        env: Env,
        cond: CipherHandle,
        if_true: CipherHandle,
        if_false: CipherHandle,
    ) -> CipherHandle;
    fn grant_read(env: Env, handle: CipherHandle, principal: Address);
    fn reveal_bool(env: Env, caller: Address, handle: CipherHandle) -> bool;
}

/// Confidential token ledger holding per-account encrypted balances.
#[contractclient(name = "ConfidentialTokenClient")]
pub trait ConfidentialToken {
    fn ctransfer(env: Env, from: Address, to: Address, amount: CipherHandle);
    fn ctransfer_from(
        env: Env,
        operator: Address,
        from: Address,
        to: Address,
        amount: CipherHandle,
    );
    fn cbalance_of(env: Env, account: Address) -> CipherHandle;
}

/// Route an encrypted amount into an escrow leg and a refund leg without
/// branching on the predicate: `(select(p, amount, zero), select(p, zero,
/// amount))`. Callers execute both legs unconditionally so transaction shape
/// reveals nothing about the outcome.
pub fn route(
    ops: &ConfidentialOpsClient,
    predicate: CipherHandle,
    amount: CipherHandle,
    zero: CipherHandle,
) -> (CipherHandle, CipherHandle) {
    let escrow_leg = ops.select(&predicate, &amount, &zero);
    let refund_leg = ops.select(&predicate, &zero, &amount);
    (escrow_leg, refund_leg)
}
