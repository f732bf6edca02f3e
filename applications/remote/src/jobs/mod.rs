//! Background jobs
//!
//! Each job is a periodic task tied to a shared [`CancellationToken`]
//! (`tokio_util::sync::CancellationToken`); cancelling it stops every job
//! at its next await point.

pub mod library_refresh;
pub mod liveness;
pub mod sweeper;
