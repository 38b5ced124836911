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

use alloy_primitives::{Address, B256, U256};
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Channel lifecycle status.
///
/// Transitions run only forward: Open → OnChallenge → Closed, or Open →
/// Closed directly when the challenge period is zero. Closed is absorbing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    /// Channel is accepting deposits and a first close.
    Open,
    /// A close was submitted; newer receipts may still override it until
    /// the challenge deadline passes.
    OnChallenge,
    /// Funds are distributed. No operation mutates a closed channel.
    Closed,
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open => write!(f, "Open"),
            Self::OnChallenge => write!(f, "OnChallenge"),
            Self::Closed => write!(f, "Closed"),
        }
    }
}

/// Channel is the escrow's persistent record of one bilateral channel.
///
/// `balance_a + balance_b` always equals the total deposited through `open`
/// and `join`; receipts only reassign the split.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channel {
    /// Hash of the open-time preimage; unique across all channels ever.
    pub id: B256,
    /// Token ledger this channel escrows.
    pub token: Address,
    /// Opener and first depositor.
    pub party_a: Address,
    /// Designated counterparty.
    pub party_b: Address,
    pub balance_a: U256,
    pub balance_b: U256,
    /// Sequence number of the latest accepted receipt.
    pub nonce: U256,
    /// Wall-clock seconds of the first accepted close; 0 until then,
    /// immutable after.
    pub close_time: u64,
    /// Seconds after `close_time` during which a newer receipt may
    /// override. Zero makes the first close final.
    pub challenge_period: u64,
    /// True once the counterparty has joined. Tracked explicitly so a
    /// zero-amount join is still single-shot.
    pub joined: bool,
    pub status: Status,
}

impl Channel {
    /// is_party returns true iff `who` is one of the two participants.
    pub fn is_party(&self, who: Address) -> bool {
        who == self.party_a || who == self.party_b
    }

    pub fn ensure_participant(&self, who: Address) -> Result<(), Error> {
        if self.is_party(who) {
            Ok(())
        } else {
            Err(Error::NotAParticipant)
        }
    }

    pub fn ensure_open(&self) -> Result<(), Error> {
        if self.status == Status::Open {
            Ok(())
        } else {
            Err(Error::NotOpen)
        }
    }

    pub fn ensure_on_challenge(&self) -> Result<(), Error> {
        if self.status == Status::OnChallenge {
            Ok(())
        } else {
            Err(Error::NotOnChallenge)
        }
    }

    pub fn ensure_not_closed(&self) -> Result<(), Error> {
        if self.status == Status::Closed {
            Err(Error::AlreadyClosed)
        } else {
            Ok(())
        }
    }

    /// total returns the escrowed sum `balance_a + balance_b`, checked.
    pub fn total(&self) -> Result<U256, Error> {
        self.balance_a
            .checked_add(self.balance_b)
            .ok_or(Error::Overflow)
    }

    /// challenge_deadline returns `close_time + challenge_period`, checked.
    pub fn challenge_deadline(&self) -> Result<u64, Error> {
        self.close_time
            .checked_add(self.challenge_period)
            .ok_or(Error::Overflow)
    }

    /// Holds iff `now <= close_time + challenge_period`.
    pub fn ensure_within_challenge_window(&self, now: u64) -> Result<(), Error> {
        if now <= self.challenge_deadline()? {
            Ok(())
        } else {
            Err(Error::ChallengePeriodExpired)
        }
    }

    /// Holds iff `now > close_time + challenge_period`. The strict/inclusive
    /// asymmetry with the predicate above is deliberate.
    pub fn ensure_challenge_window_over(&self, now: u64) -> Result<(), Error> {
        if now > self.challenge_deadline()? {
            Ok(())
        } else {
            Err(Error::ChallengePeriodActive)
        }
    }
}
