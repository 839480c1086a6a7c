//! Security module for client identity anonymization
//!
//! Raw client addresses never reach the store or the logs; only the
//! hashed like-token does.

mod hashing;

pub use hashing::{IpHasher, TOKEN_LEN};
