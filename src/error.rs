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

use alloy_primitives::{B256, U256};

/// Rejection reasons for escrow operations.
///
/// Every public operation either succeeds atomically or aborts with exactly
/// one of these; no partial effects persist on the error path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("no channel with id {0}")]
    NoSuchChannel(B256),

    #[error("caller is not a channel participant")]
    NotAParticipant,

    #[error("channel is not open")]
    NotOpen,

    #[error("channel is not under challenge")]
    NotOnChallenge,

    #[error("channel is already closed")]
    AlreadyClosed,

    #[error("challenge period has expired")]
    ChallengePeriodExpired,

    #[error("challenge period is still active")]
    ChallengePeriodActive,

    #[error("opener and counterparty coincide")]
    SelfChannel,

    #[error("opening deposit must be non-zero")]
    ZeroDeposit,

    #[error("channel id {0} already exists")]
    IdCollision(B256),

    #[error("counterparty has already joined")]
    DoubleJoin,

    #[error("stale nonce: submitted {submitted}, stored {stored}")]
    StaleNonce { submitted: U256, stored: U256 },

    #[error("receipt balances sum to {submitted}, escrowed total is {escrowed}")]
    ConservationViolation { submitted: U256, escrowed: U256 },

    #[error("signature does not recover to the expected signer")]
    InvalidSignature,

    #[error("token ledger rejected the transfer")]
    TokenTransferFailed,

    #[error("arithmetic overflow")]
    Overflow,
}
