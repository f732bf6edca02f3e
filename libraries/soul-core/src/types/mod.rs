mod ids;
mod player_status;
mod track;

pub use ids::{RequesterId, TrackId};
pub use player_status::{PlayState, PlayerStatus};
pub use track::{RawTrackAttrs, Track, TrackError};
