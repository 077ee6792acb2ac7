//! Cache Module
//!
//! The entry format shared by both tiers, the client's volatile index, and
//! the time source expiry is judged against.

mod clock;
mod entry;
mod index;
mod stats;


// Re-export public types
pub use clock::{current_timestamp_ms, Clock, ManualClock, SystemClock};
pub use entry::{expiry_seconds, ttl_days, CacheEntry, DAY_MS, DAY_SECONDS};
pub use index::{IndexLookup, VolatileIndex};
pub use stats::CacheStats;
