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

use alloy_primitives::B256;
use serde::{Deserialize, Serialize};

/// Lifecycle notifications for off-chain observers, each carrying the
/// channel id as its sole payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    ChannelOpened(B256),
    CounterPartyJoined(B256),
    ChannelOnChallenge(B256),
    ChannelChallenged(B256),
    ChannelClosed(B256),
}

impl Event {
    pub fn channel_id(&self) -> B256 {
        match self {
            Self::ChannelOpened(id)
            | Self::CounterPartyJoined(id)
            | Self::ChannelOnChallenge(id)
            | Self::ChannelChallenged(id)
            | Self::ChannelClosed(id) => *id,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::ChannelOpened(_) => "ChannelOpened",
            Self::CounterPartyJoined(_) => "CounterPartyJoined",
            Self::ChannelOnChallenge(_) => "ChannelOnChallenge",
            Self::ChannelChallenged(_) => "ChannelChallenged",
            Self::ChannelClosed(_) => "ChannelClosed",
        }
    }
}

/// Append-only event log. Events are recorded only after every fallible
/// step of the enclosing operation; a rolled-back operation records nothing.
#[derive(Debug, Default)]
pub struct EventLog {
    events: Vec<Event>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn emit(&mut self, event: Event) {
        tracing::info!(id = %event.channel_id(), event = event.name(), "channel event");
        self.events.push(event);
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_order_is_preserved() {
        let mut log = EventLog::new();
        let id = B256::repeat_byte(0x07);
        log.emit(Event::ChannelOpened(id));
        log.emit(Event::CounterPartyJoined(id));
        log.emit(Event::ChannelClosed(id));

        assert_eq!(
            log.events(),
            &[
                Event::ChannelOpened(id),
                Event::CounterPartyJoined(id),
                Event::ChannelClosed(id),
            ]
        );
        assert_eq!(log.len(), 3);
    }

    #[test]
    fn payload_is_the_channel_id() {
        let id = B256::repeat_byte(0x07);
        let event = Event::ChannelChallenged(id);
        assert_eq!(event.channel_id(), id);
        assert_eq!(event.name(), "ChannelChallenged");
    }
}
