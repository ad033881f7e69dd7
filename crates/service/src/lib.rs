//! Service layer for the surf spot record store.
//! - `storage`: byte-level storage handles and the JSON document adapter on top of them.
//! - `spots`: in-memory repository operations and the request-facing `SpotService`.
//! - `runtime`: startup helpers.

pub mod errors;
pub mod runtime;
pub mod storage;
pub mod spots;
