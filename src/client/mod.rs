// src/client/mod.rs

//! Offline-resilient data access for the quiz API.
//!
//! The gateway issues requests and mirrors topic/secret responses into a
//! durable cache; when the network is unreachable the fallback resolver
//! substitutes cached data, and progress writes that fail in flight are
//! queued for the sync agent to replay once connectivity returns.

pub mod cache;
pub mod error;
pub mod fallback;
pub mod gateway;
pub mod resource;
pub mod sync;

pub use cache::{OfflineCache, OfflineQueueEntry, QueueOp};
pub use error::ClientError;
pub use gateway::{ApiClient, ProgressWrite, RefetchPolicy, UnauthorizedPolicy};
pub use resource::Resource;
pub use sync::{Connectivity, SyncAgent, SyncOutcome};
