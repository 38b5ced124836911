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

/// Hooks into the ambient execution environment.
///
/// The host authenticates the caller of each top-level operation, supplies
/// the clock and block readings, and executes each operation transactionally:
/// if an operation returns an error, any token-ledger effects it performed
/// must be unwound along with it. The escrow restores its own record state
/// on the error path; it relies on the host for everything beyond that.
pub trait Environment {
    /// caller returns the authenticated initiator of the current operation.
    fn caller(&self) -> Address;

    /// self_address returns the escrow's own identity. Deposits are pulled
    /// to this address and distributions are paid out of it.
    fn self_address(&self) -> Address;

    /// block_number returns a monotonic scalar. It is mixed into the channel
    /// id preimage so the same (token, party_a, party_b) triple can open
    /// more than one channel; it is never interpreted beyond that.
    fn block_number(&self) -> U256;

    /// now returns wall-clock seconds, non-decreasing across operations.
    fn now(&self) -> u64;
}
