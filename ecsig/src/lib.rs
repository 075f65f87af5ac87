#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![doc(
    html_logo_url = "https://raw.githubusercontent.com/RustCrypto/meta/master/logo.svg",
    html_favicon_url = "https://raw.githubusercontent.com/RustCrypto/meta/master/logo.svg"
)]
#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]
#![doc = include_str!("../README.md")]

//! ## Usage
//!
//! ```
//! # #[cfg(feature = "ecdsa")]
//! # {
//! use ecgroup::CurveRegistry;
//! use ecsig::{SecretKey, ecdsa};
//! use modint::BigInt;
//! use sha2::{Digest, Sha256};
//!
//! let curve = CurveRegistry::global().get("SECP256K1").unwrap();
//! let secret = SecretKey::from_scalar(&curve, BigInt::from_u64(1234)).unwrap();
//!
//! let digest = Sha256::digest(b"example message");
//! let (signature, id) = ecdsa::sign_prehash::<Sha256>(&secret, &digest).unwrap();
//!
//! let public = ecdsa::recover_prehash(&curve, &digest, &signature, id).unwrap();
//! assert_eq!(public, secret.public_key());
//! # }
//! ```

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

#[cfg(feature = "ecdh")]
pub mod ecdh;
#[cfg(feature = "ecdsa")]
pub mod ecdsa;
#[cfg(feature = "schnorr")]
pub mod schnorr;

mod error;
mod keys;

#[cfg(any(feature = "test-vectors", test))]
pub mod test_vectors;

pub use crate::{
    error::{Error, Result},
    keys::{PublicKey, SecretKey},
};
pub use ecgroup;
pub use modint;
