//! Known-answer vectors.

pub mod ecdh;
pub mod ecdsa;
