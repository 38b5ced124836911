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

//! Canonical byte layouts shared with the off-chain signing tooling.
//!
//! Both preimages are tightly packed with no separators or length prefixes.
//! Packed encoding => We can't use a serializer; any framed or delimited
//! alternative breaks signature compatibility.

use alloy_primitives::{keccak256, Address, B256, U256};
use serde::{Deserialize, Serialize};

/// channel_id derives the 32-byte channel id at open time:
/// keccak256(token(20) ‖ party_a(20) ‖ party_b(20) ‖ block_number(32 BE)).
///
/// `block_number` only disambiguates repeated openings of the same triple.
pub fn channel_id(
    token: Address,
    party_a: Address,
    party_b: Address,
    block_number: U256,
) -> B256 {
    let mut preimage = [0u8; 92];
    preimage[..20].copy_from_slice(token.as_slice());
    preimage[20..40].copy_from_slice(party_a.as_slice());
    preimage[40..60].copy_from_slice(party_b.as_slice());
    preimage[60..].copy_from_slice(&block_number.to_be_bytes::<32>());
    keccak256(preimage)
}

/// A receipt is the tuple both parties co-sign off-chain to reassign the
/// escrowed balance. The escrow accepts the latest co-signed receipt as the
/// channel's final (or challengeable) balance split.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    pub channel_id: B256,
    pub balance_a: U256,
    pub balance_b: U256,
    /// Monotonic sequence number; a later receipt supersedes an earlier one.
    pub nonce: U256,
}

impl Receipt {
    /// digest returns the hash the parties sign:
    /// keccak256(channel_id(32) ‖ balance_a(32 BE) ‖ balance_b(32 BE) ‖ nonce(32 BE)).
    pub fn digest(&self) -> B256 {
        let mut preimage = [0u8; 128];
        preimage[..32].copy_from_slice(self.channel_id.as_slice());
        preimage[32..64].copy_from_slice(&self.balance_a.to_be_bytes::<32>());
        preimage[64..96].copy_from_slice(&self.balance_b.to_be_bytes::<32>());
        preimage[96..].copy_from_slice(&self.nonce.to_be_bytes::<32>());
        keccak256(preimage)
    }
}

/// receipt_digest hashes the receipt tuple without constructing a [`Receipt`].
pub fn receipt_digest(channel_id: B256, balance_a: U256, balance_b: U256, nonce: U256) -> B256 {
    Receipt {
        channel_id,
        balance_a,
        balance_b,
        nonce,
    }
    .digest()
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;

    #[test]
    fn channel_id_preimage_layout() {
        let token = address!("00000000000000000000000000000000000000aa");
        let a = address!("00000000000000000000000000000000000000bb");
        let b = address!("00000000000000000000000000000000000000cc");
        let block = U256::from(7u64);

        let mut manual = Vec::new();
        manual.extend_from_slice(token.as_slice());
        manual.extend_from_slice(a.as_slice());
        manual.extend_from_slice(b.as_slice());
        manual.extend_from_slice(&block.to_be_bytes::<32>());
        assert_eq!(manual.len(), 92);

        assert_eq!(channel_id(token, a, b, block), keccak256(&manual));
    }

    #[test]
    fn receipt_preimage_layout() {
        let receipt = Receipt {
            channel_id: B256::repeat_byte(0x11),
            balance_a: U256::from(40u64),
            balance_b: U256::from(110u64),
            nonce: U256::from(6u64),
        };

        let mut manual = Vec::new();
        manual.extend_from_slice(receipt.channel_id.as_slice());
        manual.extend_from_slice(&receipt.balance_a.to_be_bytes::<32>());
        manual.extend_from_slice(&receipt.balance_b.to_be_bytes::<32>());
        manual.extend_from_slice(&receipt.nonce.to_be_bytes::<32>());
        assert_eq!(manual.len(), 128);

        assert_eq!(receipt.digest(), keccak256(&manual));
        assert_eq!(
            receipt_digest(
                receipt.channel_id,
                receipt.balance_a,
                receipt.balance_b,
                receipt.nonce
            ),
            receipt.digest()
        );
    }

    #[test]
    fn distinct_block_numbers_give_distinct_ids() {
        let token = address!("00000000000000000000000000000000000000aa");
        let a = address!("00000000000000000000000000000000000000bb");
        let b = address!("00000000000000000000000000000000000000cc");

        let id1 = channel_id(token, a, b, U256::from(1u64));
        let id2 = channel_id(token, a, b, U256::from(2u64));
        assert_ne!(id1, id2);
    }

    #[test]
    fn digest_is_sensitive_to_every_field() {
        let base = Receipt {
            channel_id: B256::repeat_byte(0x22),
            balance_a: U256::from(1u64),
            balance_b: U256::from(2u64),
            nonce: U256::from(3u64),
        };
        let mut swapped = base;
        swapped.balance_a = base.balance_b;
        swapped.balance_b = base.balance_a;
        assert_ne!(base.digest(), swapped.digest());

        let mut bumped = base;
        bumped.nonce = U256::from(4u64);
        assert_ne!(base.digest(), bumped.digest());
    }
}
