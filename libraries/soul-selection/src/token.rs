//! Opaque choice tokens
//!
//! Wire form is `<set nonce as hex>.<slot>`, e.g. `9f3a01c2.1`. The nonce is
//! random per choice set, so a token from a replaced set (or from before a
//! restart) can never land on a slot of the current one.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Token naming one slot of one choice set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChoiceToken {
    pub nonce: u32,
    pub slot: usize,
}

impl fmt::Display for ChoiceToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:08x}.{}", self.nonce, self.slot)
    }
}

/// Token text was not produced by [`ChoiceToken`]'s `Display`
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Malformed choice token: {0}")]
pub struct ParseTokenError(String);

impl FromStr for ChoiceToken {
    type Err = ParseTokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || ParseTokenError(s.to_string());
        let (nonce, slot) = s.split_once('.').ok_or_else(malformed)?;

        if nonce.len() != 8 {
            return Err(malformed());
        }
        let nonce = u32::from_str_radix(nonce, 16).map_err(|_| malformed())?;
        let slot = slot.parse().map_err(|_| malformed())?;
        Ok(Self { nonce, slot })
    }
}
