//! Outbound adapters implementing domain ports.
//!
//! - **http**: reqwest adapters for login, the product list, and alerts
//! - **storage**: `cap_std` file stores for credentials and snapshots
//! - **timer**: Tokio single-shot timers for auto-expiry
//! - **navigation**: channel and logging navigators
//!
//! Adapters are thin translators. They contain no session or cache policy.

pub mod http;
pub mod navigation;
pub mod storage;
pub mod timer;
