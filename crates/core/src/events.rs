use crate::{Outcome, Screen};
use serde::{Deserialize, Serialize};

/// Engine-to-frontend notifications. The dealer's turn resolves synchronously
/// but emits one `DealerDrew` per hit so a frontend can pace the reveal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Event {
    RunStarted {
        deck: String,
        seed: u64,
        chips: i64,
    },
    BetPlaced {
        amount: i64,
    },
    HandDealt {
        player_total: i64,
        dealer_upcard: i64,
    },
    PlayerDrew {
        label: String,
        total: i64,
    },
    HoleCardRevealed {
        label: String,
    },
    DealerDrew {
        label: String,
        total: i64,
    },
    HandResolved {
        outcome: Outcome,
        chip_delta: i64,
        chips: i64,
    },
    SplitHandResolved {
        hand: usize,
        outcome: Outcome,
        chip_delta: i64,
    },
    EdgeChanged {
        edge: i64,
    },
    PowerUsed {
        id: String,
        cost: i64,
    },
    /// A power whose effect is not yet wired in; edge is still spent.
    PowerFizzled {
        id: String,
    },
    SpecialTriggered {
        id: String,
        chip_delta: i64,
    },
    TraitTriggered {
        chip_delta: i64,
    },
    ChallengeApplied {
        id: String,
    },
    ChallengeRemoved {
        id: String,
        cost: i64,
    },
    StageCleared {
        stage: u8,
    },
    BossEngaged {
        id: String,
    },
    BossDefeated {
        id: String,
    },
    ScreenChanged {
        screen: Screen,
    },
    RunEnded {
        victory: bool,
        dust_earned: i64,
    },
    DeckUnlocked {
        id: String,
    },
}

#[derive(Debug, Default)]
pub struct EventBus {
    queue: Vec<Event>,
}

impl EventBus {
    pub fn push(&mut self, event: Event) {
        self.queue.push(event);
    }

    pub fn drain(&mut self) -> impl Iterator<Item = Event> + '_ {
        self.queue.drain(..)
    }
}
