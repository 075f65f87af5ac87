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
//! use modint::{BigInt, Context, Strategy};
//!
//! let p: BigInt = "0xffffffff00000001000000000000000000000000ffffffffffffffffffffffff"
//!     .parse()
//!     .unwrap();
//! let ctx = Context::new(p, Strategy::Montgomery).unwrap();
//!
//! let x = ctx.from_u64(4);
//! let root = x.sqrt().unwrap();
//! assert_eq!(root.sqr(), x);
//! ```

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

#[macro_use]
mod macros;

mod arith;
mod bigint;
mod context;
mod error;
mod limb;
mod prime;
mod residue;
mod sqrt;

pub use crate::{
    bigint::BigInt,
    context::{Context, Strategy},
    error::{Error, Result},
    limb::{LIMB_BITS, Limb},
    prime::DEFAULT_MR_ROUNDS,
    residue::Residue,
    sqrt::Algorithm as SqrtAlgorithm,
};
pub use rand_core;
pub use subtle;
pub use zeroize;
