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

use std::collections::HashMap;

use alloy_primitives::B256;

use crate::channel::Channel;
use crate::error::Error;

/// Id-keyed container of all channel records, ever.
///
/// The store exclusively owns the records; every mutation goes through it.
/// Records persist in `Closed` for historical query and are never evicted.
#[derive(Debug, Default)]
pub struct ChannelStore {
    channels: HashMap<B256, Channel>,
}

impl ChannelStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: &B256) -> bool {
        self.channels.contains_key(id)
    }

    pub fn get(&self, id: &B256) -> Option<&Channel> {
        self.channels.get(id)
    }

    pub fn get_mut(&mut self, id: &B256) -> Option<&mut Channel> {
        self.channels.get_mut(id)
    }

    /// insert stores a fresh record, enforcing id uniqueness.
    pub fn insert(&mut self, channel: Channel) -> Result<(), Error> {
        if self.channels.contains_key(&channel.id) {
            return Err(Error::IdCollision(channel.id));
        }
        self.channels.insert(channel.id, channel);
        Ok(())
    }

    /// restore rewinds the slot for `id` to a previously observed state:
    /// `Some` reinstates that record, `None` removes whatever is there.
    /// Used by the escrow to undo partial effects of a failed operation.
    pub(crate) fn restore(&mut self, id: B256, prior: Option<Channel>) {
        match prior {
            Some(channel) => {
                self.channels.insert(id, channel);
            }
            None => {
                self.channels.remove(&id);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }
}
