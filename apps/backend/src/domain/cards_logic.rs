//! Card values: meld values for runs, score values for ungrouped cards.

use super::cards_types::{Card, Rank};

impl Rank {
    /// Values this rank may take inside a run. Only the Ace has two.
    pub const fn meld_values(self) -> &'static [u8] {
        match self {
            Rank::Ace => &[1, 11],
            Rank::Two => &[2],
            Rank::Three => &[3],
            Rank::Four => &[4],
            Rank::Five => &[5],
            Rank::Six => &[6],
            Rank::Seven => &[7],
            Rank::Eight => &[8],
            Rank::Nine => &[9],
            Rank::Ten => &[10],
            Rank::Jack => &[12],
            Rank::Queen => &[13],
            Rank::King => &[14],
        }
    }

    /// Penalty this rank adds when left ungrouped at round end.
    pub const fn score_value(self) -> u32 {
        match self {
            Rank::Ace => 11,
            Rank::Two => 2,
            Rank::Three => 3,
            Rank::Four => 4,
            Rank::Five => 5,
            Rank::Six => 6,
            Rank::Seven => 7,
            Rank::Eight => 8,
            Rank::Nine => 9,
            Rank::Ten => 10,
            Rank::Jack => 12,
            Rank::Queen => 13,
            Rank::King => 14,
        }
    }
}

impl Card {
    pub const fn meld_values(&self) -> &'static [u8] {
        self.rank.meld_values()
    }

    pub const fn score_value(&self) -> u32 {
        self.rank.score_value()
    }
}

/// Sum of score values, as if nothing in `cards` were grouped.
pub fn sum_score(cards: &[Card]) -> u32 {
    cards.iter().map(Card::score_value).sum()
}

/// `b` can directly follow `a` in a run: same suit and some value of `b`
/// is one more than some value of `a`.
pub fn is_consecutive(a: Card, b: Card) -> bool {
    a.suit == b.suit
        && a
            .meld_values()
            .iter()
            .any(|va| b.meld_values().iter().any(|vb| *vb == va + 1))
}
