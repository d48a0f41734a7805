//! Built-in content catalogs and save-file handling.

mod bosses;
mod challenges;
mod persist;
mod powers;
mod special_cards;
mod starter_decks;

pub use bosses::builtin_bosses;
pub use challenges::builtin_challenges;
pub use persist::*;
pub use powers::builtin_powers;
pub use special_cards::builtin_special_cards;
pub use starter_decks::builtin_starter_decks;

use ascent_core::Content;

pub fn builtin_content() -> Content {
    Content {
        powers: builtin_powers(),
        specials: builtin_special_cards(),
        challenges: builtin_challenges(),
        bosses: builtin_bosses(),
        decks: builtin_starter_decks(),
    }
}
