//! tagpull-middleware
//!
//! Wrappers that layer behavior around any [`tagpull_core::Historian`]:
//!
//! - [`CacheMiddleware`]: memoizes existence checks, descriptions and
//!   listings with a TTL (moka).
//! - [`QuerySlotMiddleware`]: bounds the number of cursors open at once on
//!   one historian (tokio semaphore).
//!
//! Compose them with [`HistorianBuilder`].

mod builder;
mod cache;
mod slots;

pub use crate::builder::HistorianBuilder;
pub use crate::cache::{CacheMiddleware, CachingHistorian};
pub use crate::slots::{QuerySlotHistorian, QuerySlotMiddleware};
