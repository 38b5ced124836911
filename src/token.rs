// Copyright 2026 - See NOTICE file for copyright holders.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//	http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use alloy_primitives::{Address, U256};

use crate::error::Error;

/// The consumed fungible-token ledger interface.
///
/// Tokens are identified by their 20-byte address. A `false` return signals
/// a rejected transfer and aborts the enclosing escrow operation.
pub trait TokenLedger {
    /// transfer_from moves `amount` of `token` from `owner` to `recipient`.
    /// Requires a prior allowance by `owner` to the escrow.
    fn transfer_from(
        &mut self,
        token: Address,
        owner: Address,
        recipient: Address,
        amount: U256,
    ) -> bool;

    /// transfer moves `amount` of `token` out of the escrow's own balance
    /// to `recipient`.
    fn transfer(&mut self, token: Address, recipient: Address, amount: U256) -> bool;
}

/// pull draws `amount` of `token` from `from` into the escrow.
/// A zero amount is a successful no-op.
pub(crate) fn pull<L: TokenLedger>(
    ledger: &mut L,
    token: Address,
    from: Address,
    escrow: Address,
    amount: U256,
) -> Result<(), Error> {
    if amount.is_zero() {
        return Ok(());
    }
    if !ledger.transfer_from(token, from, escrow, amount) {
        return Err(Error::TokenTransferFailed);
    }
    Ok(())
}

/// push pays `amount` of `token` out of the escrow to `to`.
/// A zero amount is a successful no-op.
pub(crate) fn push<L: TokenLedger>(
    ledger: &mut L,
    token: Address,
    to: Address,
    amount: U256,
) -> Result<(), Error> {
    if amount.is_zero() {
        return Ok(());
    }
    if !ledger.transfer(token, to, amount) {
        return Err(Error::TokenTransferFailed);
    }
    Ok(())
}
