//! Cards travel as their compact token (`"AS"`, `"10H"`), so a hand reads
//! the same in JSON, logs and test fixtures.

use std::fmt;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::cards_parsing::card_token;
use super::cards_types::Card;

impl Serialize for Card {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&card_token(*self))
    }
}

struct CardToken;

impl Visitor<'_> for CardToken {
    type Value = Card;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a card token such as \"QS\" or \"10H\"")
    }

    fn visit_str<E: de::Error>(self, token: &str) -> Result<Card, E> {
        token.parse().map_err(E::custom)
    }
}

impl<'de> Deserialize<'de> for Card {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_str(CardToken)
    }
}
