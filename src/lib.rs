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

//! On-chain settlement core for bilateral fungible-token payment channels.
//!
//! Two parties lock token balances into a shared escrow identified by a
//! channel id, exchange co-signed off-chain receipts that reassign the
//! locked balance between them, and later submit the latest receipt to
//! unlock final balances. An optional challenge period lets either party
//! override a stale submitted receipt with a newer one before funds are
//! distributed.
//!
//! The crate is host-agnostic: the caller identity, clock, block number,
//! and per-operation transactionality come from an [`Environment`]
//! implementation, and token movements go through a [`TokenLedger`]
//! implementation. The receipt wire format ([`Receipt`] plus the prefixed
//! keccak-256 digest in [`ethsig`]) is normative for off-chain signers.

pub mod channel;
pub mod encode;
pub mod env;
pub mod error;
pub mod escrow;
pub mod ethsig;
pub mod events;
pub mod store;
pub mod token;

#[cfg(test)]
mod test_utils;


pub use channel::{Channel, Status};
pub use encode::{channel_id, receipt_digest, Receipt};
pub use env::Environment;
pub use error::Error;
pub use escrow::Escrow;
pub use ethsig::Signature;
pub use events::{Event, EventLog};
pub use store::ChannelStore;
pub use token::TokenLedger;
