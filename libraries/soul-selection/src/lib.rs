//! Soul Remote - Selection
//!
//! Disambiguation state between a search and the user's pick.
//!
//! A search that yields several tracks mints a [`ChoiceSet`]: one opaque
//! token per hit, owned by the requester who searched. The requester taps
//! one token, and [`SelectionRegistry::resolve`] turns it back into a track
//! id exactly once. A newer search from the same requester replaces the
//! older set, and sets that are never resolved expire.
//!
//! [`layout`] arranges the choices into the row-major grid the transport
//! renders as buttons.
//!
//! # Example
//!
//! ```rust
//! use soul_core::{RequesterId, TrackId};
//! use soul_selection::SelectionRegistry;
//! use std::time::Duration;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let registry = SelectionRegistry::new(Duration::from_secs(300));
//! let owner = RequesterId::new("42");
//! let hits = vec![TrackId::new("m-0"), TrackId::new("m-1")];
//!
//! let set = registry.create(&owner, 1, &hits).await.unwrap();
//! let (token, _) = set.choices().nth(1).unwrap();
//!
//! let resolved = registry.resolve(&owner, &token.to_string()).await.unwrap();
//! assert_eq!(resolved.track_id, TrackId::new("m-1"));
//! # }
//! ```

#![forbid(unsafe_code)]

mod error;
mod layout;
mod registry;
mod token;

pub use error::{LayoutError, ResolveError, SelectionError};
pub use layout::layout;
pub use registry::{ChoiceSet, Resolution, SelectionRegistry, DEFAULT_TTL};
pub use token::{ChoiceToken, ParseTokenError};
