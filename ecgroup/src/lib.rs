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
//! use ecgroup::{CurveRegistry, Point};
//! use modint::BigInt;
//!
//! let curve = CurveRegistry::global().get("P256").unwrap();
//! let g = curve.generator();
//!
//! let k = BigInt::from_u64(7);
//! let p = g.mul(&k);
//!
//! let bytes = p.encode(true);
//! assert_eq!(Point::decode(&curve, &bytes).unwrap(), p);
//! ```

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

#[macro_use]
mod macros;

pub mod map;
pub mod params;

mod convert;
mod curve;
mod encoding;
mod endomorphism;
mod error;
mod mul;
mod point;
mod poly;
mod precomp;
mod registry;
mod util;

#[cfg(any(feature = "test-vectors", test))]
pub mod test_vectors;

pub use crate::{
    convert::ModelMap,
    curve::{AKind, Curve, CurveParams, CurveRef, Model, ModelParams},
    endomorphism::Endomorphism,
    error::{Error, Result},
    map::{Encoder, MapToCurve},
    params::CurveDef,
    point::{Coords, Point, XPoint},
    registry::CurveRegistry,
};
pub use modint;
