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

use crate::channel::{Channel, Status};
use crate::encode;
use crate::env::Environment;
use crate::error::Error;
use crate::ethsig::{self, Signature};
use crate::events::{Event, EventLog};
use crate::store::ChannelStore;
use crate::token::{self, TokenLedger};

/// The settlement core: custodies deposits for every open channel and
/// arbitrates which co-signed receipt settles each one.
///
/// Each public operation is atomic: it either completes, or returns an
/// error with the channel store exactly as it was. Outbound transfers are
/// issued only after the record is updated (check-effects-interactions),
/// so a misbehaving token ledger can never observe a still-open channel
/// mid-distribution.
pub struct Escrow<E, L> {
    env: E,
    ledger: L,
    store: ChannelStore,
    events: EventLog,
}

impl<E: Environment, L: TokenLedger> Escrow<E, L> {
    pub fn new(env: E, ledger: L) -> Self {
        Self {
            env,
            ledger,
            store: ChannelStore::new(),
            events: EventLog::new(),
        }
    }

    /// open creates a channel between the caller and `counterparty` over
    /// `token`, escrowing the caller's deposit of `amount`.
    ///
    /// The channel id is derived from the (token, caller, counterparty)
    /// triple and the current block number; the id is returned and also
    /// carried by the emitted `ChannelOpened` event.
    ///
    /// There is no deadline by which the counterparty must join; an opener
    /// whose counterparty never shows settles off-chain by obtaining a
    /// co-signed receipt assigning the whole total back and closing with it.
    pub fn open(
        &mut self,
        token: Address,
        counterparty: Address,
        amount: U256,
        challenge_period: u64,
    ) -> Result<B256, Error> {
        let opener = self.env.caller();

        // checks
        if opener == counterparty {
            return Err(Error::SelfChannel);
        }
        if amount.is_zero() {
            return Err(Error::ZeroDeposit);
        }
        let id = encode::channel_id(token, opener, counterparty, self.env.block_number());
        if self.store.contains(&id) {
            return Err(Error::IdCollision(id));
        }

        // interact: pull the opening deposit before any record exists, so a
        // rejected transfer leaves the store untouched.
        token::pull(
            &mut self.ledger,
            token,
            opener,
            self.env.self_address(),
            amount,
        )?;

        // effects
        self.store.insert(Channel {
            id,
            token,
            party_a: opener,
            party_b: counterparty,
            balance_a: amount,
            balance_b: U256::ZERO,
            nonce: U256::ZERO,
            close_time: 0,
            challenge_period,
            joined: false,
            status: Status::Open,
        })?;
        self.events.emit(Event::ChannelOpened(id));

        Ok(id)
    }

    /// join completes the two-sided deposit. Only the designated
    /// counterparty may join, exactly once, while the channel is open.
    ///
    /// A zero `amount` is permitted: a zero-balance counterparty still
    /// co-signs receipts that can reassign the opener's deposit.
    pub fn join(&mut self, id: B256, amount: U256) -> Result<(), Error> {
        let caller = self.env.caller();
        let escrow = self.env.self_address();

        // checks
        let channel = self.store.get_mut(&id).ok_or(Error::NoSuchChannel(id))?;
        if caller != channel.party_b {
            return Err(Error::NotAParticipant);
        }
        channel.ensure_open()?;
        if channel.joined {
            return Err(Error::DoubleJoin);
        }
        channel
            .balance_a
            .checked_add(amount)
            .ok_or(Error::Overflow)?;

        // interact
        token::pull(&mut self.ledger, channel.token, caller, escrow, amount)?;

        // effects
        channel.balance_b = amount;
        channel.joined = true;
        self.events.emit(Event::CounterPartyJoined(id));

        Ok(())
    }

    /// close submits a co-signed receipt against an open channel. With a
    /// zero challenge period the channel settles immediately; otherwise it
    /// moves to `OnChallenge` and waits out the window.
    ///
    /// Any receipt nonce is accepted here: the stored state is still the
    /// opening one and carries nonce 0.
    pub fn close(
        &mut self,
        id: B256,
        nonce: U256,
        balance_a: U256,
        balance_b: U256,
        sig_a: Signature,
        sig_b: Signature,
    ) -> Result<(), Error> {
        let prior = self.store.get(&id).cloned();
        let result = self.close_inner(id, nonce, balance_a, balance_b, sig_a, sig_b);
        if result.is_err() {
            self.store.restore(id, prior);
        }
        result
    }

    fn close_inner(
        &mut self,
        id: B256,
        nonce: U256,
        balance_a: U256,
        balance_b: U256,
        sig_a: Signature,
        sig_b: Signature,
    ) -> Result<(), Error> {
        let caller = self.env.caller();
        let now = self.env.now();

        // checks
        let channel = self.store.get_mut(&id).ok_or(Error::NoSuchChannel(id))?;
        channel.ensure_participant(caller)?;
        channel.ensure_open()?;
        verify_receipt(channel, nonce, balance_a, balance_b, &sig_a, &sig_b)?;

        // effects
        update_receipt(channel, nonce, balance_a, balance_b, now)?;

        if channel.challenge_period == 0 {
            // The transient OnChallenge set above is never observable: the
            // distribution overrides it to Closed in the same operation.
            self.distribute_funds(id)?;
        } else {
            self.events.emit(Event::ChannelOnChallenge(id));
        }

        Ok(())
    }

    /// challenge overrides the pending close with a strictly newer
    /// co-signed receipt. Allowed any number of times before the challenge
    /// deadline, each submission requiring a strictly higher nonce.
    pub fn challenge(
        &mut self,
        id: B256,
        nonce: U256,
        balance_a: U256,
        balance_b: U256,
        sig_a: Signature,
        sig_b: Signature,
    ) -> Result<(), Error> {
        let caller = self.env.caller();
        let now = self.env.now();

        // checks
        let channel = self.store.get_mut(&id).ok_or(Error::NoSuchChannel(id))?;
        channel.ensure_participant(caller)?;
        channel.ensure_on_challenge()?;
        channel.ensure_within_challenge_window(now)?;
        if nonce <= channel.nonce {
            return Err(Error::StaleNonce {
                submitted: nonce,
                stored: channel.nonce,
            });
        }
        verify_receipt(channel, nonce, balance_a, balance_b, &sig_a, &sig_b)?;

        // effects
        update_receipt(channel, nonce, balance_a, balance_b, now)?;
        self.events.emit(Event::ChannelChallenged(id));

        Ok(())
    }

    /// redeem settles a challenged channel once the challenge deadline has
    /// passed, distributing the latest accepted balances.
    pub fn redeem(&mut self, id: B256) -> Result<(), Error> {
        let prior = self.store.get(&id).cloned();
        let result = self.redeem_inner(id);
        if result.is_err() {
            self.store.restore(id, prior);
        }
        result
    }

    fn redeem_inner(&mut self, id: B256) -> Result<(), Error> {
        let caller = self.env.caller();
        let now = self.env.now();

        // checks
        let channel = self.store.get(&id).ok_or(Error::NoSuchChannel(id))?;
        channel.ensure_participant(caller)?;
        channel.ensure_on_challenge()?;
        channel.ensure_challenge_window_over(now)?;

        self.distribute_funds(id)
    }

    /// distribute_funds closes the channel and pays each party its share.
    /// The status flips to Closed before any transfer is issued.
    fn distribute_funds(&mut self, id: B256) -> Result<(), Error> {
        // checks
        let channel = self.store.get_mut(&id).ok_or(Error::NoSuchChannel(id))?;
        channel.ensure_not_closed()?;

        // effects
        channel.status = Status::Closed;
        let (token, party_a, party_b, balance_a, balance_b) = (
            channel.token,
            channel.party_a,
            channel.party_b,
            channel.balance_a,
            channel.balance_b,
        );
        tracing::debug!(id = %id, status = %channel.status, %balance_a, %balance_b, "distributing channel funds");

        // interact
        token::push(&mut self.ledger, token, party_a, balance_a)?;
        token::push(&mut self.ledger, token, party_b, balance_b)?;
        self.events.emit(Event::ChannelClosed(id));

        Ok(())
    }

    /// channel returns the record with the given id, if any.
    pub fn channel(&self, id: &B256) -> Option<&Channel> {
        self.store.get(id)
    }

    /// events returns the lifecycle log, oldest first.
    pub fn events(&self) -> &[Event] {
        self.events.events()
    }

    pub fn env(&self) -> &E {
        &self.env
    }

    pub fn env_mut(&mut self) -> &mut E {
        &mut self.env
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    pub fn ledger_mut(&mut self) -> &mut L {
        &mut self.ledger
    }
}

/// verify_receipt checks both parties' signatures over the receipt digest
/// for exactly the values that would be stored.
fn verify_receipt(
    channel: &Channel,
    nonce: U256,
    balance_a: U256,
    balance_b: U256,
    sig_a: &Signature,
    sig_b: &Signature,
) -> Result<(), Error> {
    let digest = encode::receipt_digest(channel.id, balance_a, balance_b, nonce);
    ethsig::verify(&digest, sig_a, channel.party_a)?;
    ethsig::verify(&digest, sig_b, channel.party_b)?;
    Ok(())
}

/// update_receipt applies an accepted receipt to the record: conservation
/// first, then the new split, the first close time, and OnChallenge status.
fn update_receipt(
    channel: &mut Channel,
    nonce: U256,
    balance_a: U256,
    balance_b: U256,
    now: u64,
) -> Result<(), Error> {
    let escrowed = channel.total()?;
    let submitted = balance_a.checked_add(balance_b).ok_or(Error::Overflow)?;
    if submitted != escrowed {
        return Err(Error::ConservationViolation {
            submitted,
            escrowed,
        });
    }

    channel.nonce = nonce;
    channel.balance_a = balance_a;
    channel.balance_b = balance_b;
    if channel.close_time == 0 {
        channel.close_time = now;
    }
    channel.status = Status::OnChallenge;
    tracing::debug!(id = %channel.id, nonce = %nonce, status = %channel.status, "receipt applied");

    Ok(())
}
