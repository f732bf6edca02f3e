//! Per-requester choice sets
//!
//! One registry-wide lock guards every set. Contention is one human tapping
//! one button at a time, so nothing finer grained is needed, and a single
//! critical section makes "check then consume" atomic for racing taps.

use crate::error::{ResolveError, SelectionError};
use crate::token::ChoiceToken;
use soul_core::{RequesterId, TrackId};
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::debug;

/// Default choice set lifetime
pub const DEFAULT_TTL: Duration = Duration::from_secs(300);

/// One pending disambiguation
#[derive(Debug, Clone)]
pub struct ChoiceSet {
    owner: RequesterId,
    generation: u64,
    nonce: u32,
    tracks: Vec<TrackId>,
    created_at: Instant,
    expires_at: Instant,
    consumed: bool,
}

impl ChoiceSet {
    pub fn owner(&self) -> &RequesterId {
        &self.owner
    }

    /// Library generation the track ids belong to
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn created_at(&self) -> Instant {
        self.created_at
    }

    pub fn expires_at(&self) -> Instant {
        self.expires_at
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Tokens and their tracks, in ranking order
    pub fn choices(&self) -> impl Iterator<Item = (ChoiceToken, &TrackId)> {
        let nonce = self.nonce;
        self.tracks
            .iter()
            .enumerate()
            .map(move |(slot, id)| (ChoiceToken { nonce, slot }, id))
    }

    fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// Successful resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub track_id: TrackId,
    /// Library generation the id was minted by
    pub generation: u64,
}

/// Registry of live choice sets, at most one per requester
#[derive(Debug)]
pub struct SelectionRegistry {
    ttl: Duration,
    sets: Mutex<HashMap<RequesterId, ChoiceSet>>,
}

impl Default for SelectionRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}

impl SelectionRegistry {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            sets: Mutex::new(HashMap::new()),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Mint a choice set for `owner`, replacing any previous one
    ///
    /// Tokens of the replaced set resolve to `Expired` from here on.
    ///
    /// # Errors
    /// Returns `Empty` if `hits` is empty
    pub async fn create(
        &self,
        owner: &RequesterId,
        generation: u64,
        hits: &[TrackId],
    ) -> Result<ChoiceSet, SelectionError> {
        if hits.is_empty() {
            return Err(SelectionError::Empty);
        }

        let mut sets = self.sets.lock().await;
        let previous = sets.get(owner).map(|set| set.nonce);

        let now = Instant::now();
        let set = ChoiceSet {
            owner: owner.clone(),
            generation,
            nonce: fresh_nonce(previous, rand::random),
            tracks: hits.to_vec(),
            created_at: now,
            expires_at: now + self.ttl,
            consumed: false,
        };

        let replaced = sets.insert(owner.clone(), set.clone());
        drop(sets);

        debug!(
            owner = %owner,
            choices = set.len(),
            replaced = replaced.is_some(),
            "Choice set created"
        );
        Ok(set)
    }

    /// Resolve a token to its track, at most once per set
    ///
    /// # Errors
    /// - `NotFound` if the token is malformed or names no slot
    /// - `Expired` if the set was replaced, timed out, or is gone
    /// - `AlreadyConsumed` if a token of this set already resolved
    pub async fn resolve(
        &self,
        owner: &RequesterId,
        token: &str,
    ) -> Result<Resolution, ResolveError> {
        let token: ChoiceToken = token.parse().map_err(|_| ResolveError::NotFound)?;

        let mut sets = self.sets.lock().await;
        let set = sets.get_mut(owner).ok_or(ResolveError::Expired)?;

        if set.nonce != token.nonce {
            return Err(ResolveError::Expired);
        }
        let track_id = set
            .tracks
            .get(token.slot)
            .cloned()
            .ok_or(ResolveError::NotFound)?;
        if set.consumed {
            return Err(ResolveError::AlreadyConsumed);
        }
        if set.is_expired(Instant::now()) {
            return Err(ResolveError::Expired);
        }

        set.consumed = true;
        debug!(owner = %owner, track_id = %track_id, "Choice resolved");

        Ok(Resolution {
            track_id,
            generation: set.generation,
        })
    }

    /// Drop `owner`'s set, if any
    pub async fn discard(&self, owner: &RequesterId) -> bool {
        self.sets.lock().await.remove(owner).is_some()
    }

    /// Evict expired sets; returns how many were removed
    ///
    /// Resolved sets stay until they expire so duplicate taps keep reporting
    /// `AlreadyConsumed`.
    pub async fn sweep(&self) -> usize {
        let now = Instant::now();
        let mut sets = self.sets.lock().await;
        let before = sets.len();
        sets.retain(|_, set| !set.is_expired(now));
        before - sets.len()
    }

    /// Number of sets held, including resolved ones not yet swept
    pub async fn len(&self) -> usize {
        self.sets.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sets.lock().await.is_empty()
    }
}

/// Draw a nonce that differs from the replaced set's
fn fresh_nonce(previous: Option<u32>, mut draw: impl FnMut() -> u32) -> u32 {
    loop {
        let nonce = draw();
        if Some(nonce) != previous {
            return nonce;
        }
    }
}
