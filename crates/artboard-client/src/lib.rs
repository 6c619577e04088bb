//! Typed async client for the Artboard design and rendering API.
//!
//! The crate wraps the HTTP API in resource objects reached from
//! [`ArtboardClient`]: designs, templates, render jobs, assets, billing,
//! usage, API keys, and canvas mutation. Around that plumbing it provides
//! the pieces that carry real behavior:
//!
//! - a closed [error taxonomy](error) every response failure is classified
//!   into exactly once,
//! - a [retry engine](retry) with geometric backoff that honors server
//!   `Retry-After` hints,
//! - [wait state machines](poll) that long-poll render jobs and batches to
//!   completion under a wall-clock deadline.
//!
//! Webhook signature verification lives in the sibling `artboard-webhook`
//! crate.

pub mod client;
pub mod error;
pub mod pagination;
pub mod poll;
pub mod resources;
pub mod retry;
pub mod transport;

pub use client::{ArtboardClient, ArtboardClientBuilder};
pub use error::{Error, ErrorKind, Result};
pub use pagination::{ListParams, Page};
pub use poll::{BatchState, JobState, JobStatus, WaitOptions, wait_for_batch, wait_for_completion};
pub use retry::{RetryPolicy, execute_with_retry};
pub use transport::Transport;
