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

//! Detached signature verification over receipt digests.
//!
//! Receipts are signed off-chain with standard Ethereum tooling, so the
//! verifier reproduces that scheme exactly: the digest is re-hashed under
//! the fixed ASCII banner, the secp256k1 public key is recovered from the
//! 65-byte `(r, s, v)` signature, and the signer address is the low 20
//! bytes of the keccak-256 of the uncompressed key.

use alloy_primitives::{Address, B256};
use k256::ecdsa::{RecoveryId, Signature as EcdsaSignature, VerifyingKey};
use sha3::{Digest, Keccak256};

use crate::error::Error;

/// The banner off-chain signing tools prepend before hashing. Must be
/// reproduced byte-for-byte.
pub const ETH_SIGNED_MESSAGE_PREFIX: &[u8] = b"\x19Ethereum Signed Message:\n32";

/// A 65-byte detached signature, laid out as `r(32) ‖ s(32) ‖ v(1)`,
/// with `v` in {27, 28}.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Signature(pub [u8; 65]);

impl Signature {
    /// from_slice parses a 65-byte signature; any other length is rejected.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, Error> {
        let raw: [u8; 65] = bytes.try_into().map_err(|_| Error::InvalidSignature)?;
        Ok(Self(raw))
    }
}

/// eth_signed_message_hash forms the prefixed digest that is actually
/// signed: keccak256(banner ‖ digest).
pub fn eth_signed_message_hash(digest: &B256) -> B256 {
    // Packed encoding => We can't use a serializer.
    let mut hasher = Keccak256::new();
    hasher.update(ETH_SIGNED_MESSAGE_PREFIX);
    hasher.update(digest.as_slice());
    B256::from_slice(&hasher.finalize())
}

/// recover_signer recovers the address that signed `digest` (after
/// prefixing). Malformed signatures are rejected rather than recovering a
/// spurious address: wrong `v`, zero or overflowing scalars, and
/// non-canonical high-`s` all fail with [`Error::InvalidSignature`].
pub fn recover_signer(digest: &B256, sig: &Signature) -> Result<Address, Error> {
    // v carries the recovery id offset by 27, the Ethereum convention.
    let recovery_id = match sig.0[64] {
        27 => RecoveryId::from_byte(0),
        28 => RecoveryId::from_byte(1),
        _ => None,
    }
    .ok_or(Error::InvalidSignature)?;

    let ecdsa = EcdsaSignature::from_slice(&sig.0[..64]).map_err(|_| Error::InvalidSignature)?;
    // Low-s rule: a signature whose s can be normalized was non-canonical.
    if ecdsa.normalize_s().is_some() {
        return Err(Error::InvalidSignature);
    }

    let prefixed = eth_signed_message_hash(digest);
    let key = VerifyingKey::recover_from_prehash(prefixed.as_slice(), &ecdsa, recovery_id)
        .map_err(|_| Error::InvalidSignature)?;
    Ok(address_of(&key))
}

/// verify succeeds iff `sig` recovers to `expected` over the prefixed digest.
pub fn verify(digest: &B256, sig: &Signature, expected: Address) -> Result<(), Error> {
    if recover_signer(digest, sig)? == expected {
        Ok(())
    } else {
        Err(Error::InvalidSignature)
    }
}

/// address_of derives the Ethereum-style address of a public key.
pub(crate) fn address_of(key: &VerifyingKey) -> Address {
    // The uncompressed SEC1 encoding is 65 bytes; the leading 0x04 tag byte
    // is not part of the public key and is thrown away before hashing.
    let point = key.to_encoded_point(false);
    let hash: [u8; 32] = Keccak256::digest(&point.as_bytes()[1..]).into();
    Address::from_slice(&hash[12..])
}
