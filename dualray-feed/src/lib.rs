//! Live Feed for the DualRay Fleet Engine
//!
//! ## Overview
//!
//! `dualray-core` is synchronous: a [`TelemetryHub`](dualray_core::TelemetryHub)
//! changes only when something calls `load_snapshot` or `tick`. This crate
//! supplies the something: it fetches a snapshot once, then drives `tick`
//! on a tokio timer while readers query the hub through a shared handle.
//!
//! ## Snapshot Sources
//!
//! | Source | Backing | Feature |
//! |--------|---------|---------|
//! | [`FileSource`] | local file via `tokio::fs` | always |
//! | [`StaticSource`] | in-memory text | always |
//! | `HttpSource` | GET via `ureq` on the blocking pool | `http` |
//!
//! Any other origin implements [`SnapshotSource`].
//!
//! ## Example
//!
//! ```rust,no_run
//! use dualray_feed::{FeedConfig, FileSource, LiveFeed};
//!
//! # async fn example() -> Result<(), dualray_feed::FeedError> {
//! let mut feed = LiveFeed::new(FeedConfig::default().seed(42))?;
//! feed.start(FileSource::new("data/dual_ray_swarm_synthetic.csv"))?;
//!
//! let handle = feed.handle();
//! let boats = handle.read(|hub| hub.boats())?;
//! println!("{} boats", boats.len());
//!
//! feed.stop().await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod errors;
pub mod feed;
#[cfg(feature = "http")]
pub mod http;
pub mod source;

pub use config::FeedConfig;
pub use errors::{FeedError, FeedResult};
pub use feed::{HubHandle, LiveFeed};
#[cfg(feature = "http")]
pub use http::HttpSource;
pub use source::{FileSource, SnapshotSource, StaticSource};
