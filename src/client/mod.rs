//! Client Module
//!
//! The cache facade callers use, and the transport it reaches the gateway
//! through.

mod facade;
mod outcome;
mod transport;

pub use facade::{CacheFacade, STORAGE_PROBE_KEY};
pub use outcome::{Lookup, WriteOutcome};
pub use transport::{CacheTransport, HttpTransport};
