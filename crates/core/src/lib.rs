//! Core game logic. Keep this crate free of IO and platform concerns.

pub mod cards;
pub mod config;
pub mod content;
pub mod deck;
pub mod effects;
pub mod events;
pub mod hand;
pub mod meta;
pub mod rng;
pub mod run;
pub mod state;
pub mod stats;

pub use cards::*;
pub use config::*;
pub use content::*;
pub use deck::*;
pub use effects::*;
pub use events::*;
pub use hand::*;
pub use meta::*;
pub use rng::*;
pub use run::*;
pub use state::*;
pub use stats::*;
