//! Random display names for agents.
//!
//! Stands in for a full fake-name generator; names carry no game
//! semantics beyond being the exact-match key for vote resolution.

use rand::seq::SliceRandom;
use rand::Rng;

const FIRST_NAMES: &[&str] = &[
    "Ada", "Bruno", "Clara", "Dmitri", "Elena", "Felix", "Greta", "Hugo", "Iris", "Jonas",
    "Kira", "Leo", "Mara", "Nils", "Olga", "Piotr", "Quinn", "Rosa", "Sven", "Tessa",
    "Ugo", "Vera", "Wim", "Xenia", "Yann", "Zora",
];

const LAST_NAMES: &[&str] = &[
    "Abbott", "Becker", "Castillo", "Duval", "Eriksen", "Fontaine", "Garza", "Holm",
    "Ivanov", "Jensen", "Keller", "Lindqvist", "Moreau", "Novak", "Okafor", "Petrov",
    "Quintana", "Rossi", "Silva", "Tanaka", "Ueda", "Vance", "Weber", "Xu", "Yamada", "Zhou",
];

/// Generate a random "First Last" human name.
pub fn random_name(rng: &mut impl Rng) -> String {
    let first = FIRST_NAMES.choose(rng).expect("non-empty name table");
    let last = LAST_NAMES.choose(rng).expect("non-empty name table");
    format!("{first} {last}")
}
