//! Card parsing from string representations (e.g., "AS", "10H", "TH", "7♠")

use std::str::FromStr;

use super::cards_types::{Card, Rank, Suit};
use crate::errors::domain::{DomainError, ValidationKind};

fn parse_err(s: &str) -> DomainError {
    DomainError::validation(ValidationKind::ParseCard, format!("Parse card: {s}"))
}

fn parse_rank(token: &str) -> Option<Rank> {
    let rank = match token {
        "A" => Rank::Ace,
        "2" => Rank::Two,
        "3" => Rank::Three,
        "4" => Rank::Four,
        "5" => Rank::Five,
        "6" => Rank::Six,
        "7" => Rank::Seven,
        "8" => Rank::Eight,
        "9" => Rank::Nine,
        "10" | "T" => Rank::Ten,
        "J" => Rank::Jack,
        "Q" => Rank::Queen,
        "K" => Rank::King,
        _ => return None,
    };
    Some(rank)
}

fn parse_suit(ch: char) -> Option<Suit> {
    match ch {
        'C' | '♣' => Some(Suit::Clubs),
        'D' | '♦' => Some(Suit::Diamonds),
        'H' | '♥' => Some(Suit::Hearts),
        'S' | '♠' => Some(Suit::Spades),
        _ => None,
    }
}

impl FromStr for Card {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Suit is always the final character; everything before it is the rank.
        let suit_ch = s.chars().last().ok_or_else(|| parse_err(s))?;
        let rank_part = &s[..s.len() - suit_ch.len_utf8()];
        let rank = parse_rank(rank_part).ok_or_else(|| parse_err(s))?;
        let suit = parse_suit(suit_ch).ok_or_else(|| parse_err(s))?;
        Ok(Card { suit, rank })
    }
}

/// Non-panicking helper to parse card tokens (e.g., "AS", "10C") into Card instances.
/// Returns Result<Vec<Card>, DomainError> if any token is invalid.
pub fn try_parse_cards<I, S>(tokens: I) -> Result<Vec<Card>, DomainError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    tokens
        .into_iter()
        .map(|s| s.as_ref().parse::<Card>())
        .collect()
}

/// Compact token for a card, the inverse of `FromStr` ("AS", "10H").
pub fn card_token(card: Card) -> String {
    let rank = match card.rank {
        Rank::Ace => "A",
        Rank::Two => "2",
        Rank::Three => "3",
        Rank::Four => "4",
        Rank::Five => "5",
        Rank::Six => "6",
        Rank::Seven => "7",
        Rank::Eight => "8",
        Rank::Nine => "9",
        Rank::Ten => "10",
        Rank::Jack => "J",
        Rank::Queen => "Q",
        Rank::King => "K",
    };
    let suit = match card.suit {
        Suit::Clubs => 'C',
        Suit::Diamonds => 'D',
        Suit::Hearts => 'H',
        Suit::Spades => 'S',
    };
    format!("{rank}{suit}")
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&card_token(*self))
    }
}
