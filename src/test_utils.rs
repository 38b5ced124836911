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

//! Test doubles: an Ethereum-style signer and mock environment/ledger.

use std::collections::HashMap;

use alloy_primitives::{Address, B256, U256};
use k256::ecdsa::SigningKey;
use rand::{CryptoRng, RngCore};

use crate::encode::Receipt;
use crate::env::Environment;
use crate::ethsig::{self, Signature};
use crate::token::TokenLedger;

/// A party's off-chain signing identity.
pub struct EthSigner {
    skey: SigningKey,
    addr: Address,
}

impl EthSigner {
    pub fn random<R: RngCore + CryptoRng>(rng: &mut R) -> Self {
        Self::init(SigningKey::random(rng))
    }

    pub fn from_bytes(bytes: &[u8; 32]) -> Self {
        Self::init(SigningKey::from_slice(bytes).expect("valid secret key"))
    }

    fn init(skey: SigningKey) -> Self {
        let addr = ethsig::address_of(skey.verifying_key());
        Self { skey, addr }
    }

    pub fn address(&self) -> Address {
        self.addr
    }

    /// sign_digest signs the prefixed digest, yielding the 65-byte
    /// `(r, s, v)` layout with v offset by 27 as on-chain verifiers expect.
    pub fn sign_digest(&self, digest: &B256) -> Signature {
        let prefixed = ethsig::eth_signed_message_hash(digest);
        let (sig, recovery_id) = self
            .skey
            .sign_prehash_recoverable(prefixed.as_slice())
            .expect("prehash signing");

        let mut raw = [0u8; 65];
        raw[..64].copy_from_slice(sig.to_bytes().as_slice());
        raw[64] = recovery_id.to_byte() + 27;
        Signature(raw)
    }

    pub fn sign_receipt(&self, receipt: &Receipt) -> Signature {
        self.sign_digest(&receipt.digest())
    }
}

/// Scripted execution environment: tests set the caller and advance the
/// clock between operations.
pub struct MockEnv {
    pub caller: Address,
    pub escrow: Address,
    pub block_number: U256,
    pub now: u64,
}

impl Environment for MockEnv {
    fn caller(&self) -> Address {
        self.caller
    }

    fn self_address(&self) -> Address {
        self.escrow
    }

    fn block_number(&self) -> U256 {
        self.block_number
    }

    fn now(&self) -> u64 {
        self.now
    }
}

/// In-memory multi-token ledger with escrow-directed allowances and a
/// failure toggle for exercising rejected transfers.
pub struct MockLedger {
    escrow: Address,
    /// (token, holder) -> balance
    balances: HashMap<(Address, Address), U256>,
    /// (token, owner) -> remaining allowance granted to the escrow
    allowances: HashMap<(Address, Address), U256>,
    pub fail_all: bool,
}

impl MockLedger {
    pub fn new(escrow: Address) -> Self {
        Self {
            escrow,
            balances: HashMap::new(),
            allowances: HashMap::new(),
            fail_all: false,
        }
    }

    pub fn mint(&mut self, token: Address, to: Address, amount: U256) {
        let balance = self.balances.entry((token, to)).or_insert(U256::ZERO);
        *balance += amount;
    }

    pub fn approve(&mut self, token: Address, owner: Address, amount: U256) {
        self.allowances.insert((token, owner), amount);
    }

    pub fn balance_of(&self, token: Address, holder: Address) -> U256 {
        self.balances
            .get(&(token, holder))
            .copied()
            .unwrap_or(U256::ZERO)
    }
}

impl TokenLedger for MockLedger {
    fn transfer_from(
        &mut self,
        token: Address,
        owner: Address,
        recipient: Address,
        amount: U256,
    ) -> bool {
        if self.fail_all {
            return false;
        }
        let allowance = self
            .allowances
            .get(&(token, owner))
            .copied()
            .unwrap_or(U256::ZERO);
        if allowance < amount || self.balance_of(token, owner) < amount {
            return false;
        }
        self.allowances.insert((token, owner), allowance - amount);
        *self.balances.entry((token, owner)).or_insert(U256::ZERO) -= amount;
        *self.balances.entry((token, recipient)).or_insert(U256::ZERO) += amount;
        true
    }

    fn transfer(&mut self, token: Address, recipient: Address, amount: U256) -> bool {
        if self.fail_all {
            return false;
        }
        let escrow = self.escrow;
        if self.balance_of(token, escrow) < amount {
            return false;
        }
        *self.balances.entry((token, escrow)).or_insert(U256::ZERO) -= amount;
        *self.balances.entry((token, recipient)).or_insert(U256::ZERO) += amount;
        true
    }
}
