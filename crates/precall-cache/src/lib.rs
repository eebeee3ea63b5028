//! SQLite-backed cache for finished audit reports.
//!
//! Audits are expensive (several upstream API calls per run), so completed
//! reports are kept for a configurable TTL keyed by the audit inputs. The
//! cache is local to one service instance; there is no shared invalidation.

mod key;
mod store;

pub use key::cache_key;
pub use store::{AuditCache, CacheError};
