//! Known-answer vectors.

use hex_literal::hex;

/// Affine coordinates of a curve point, big-endian.
pub struct PointVector {
    /// Input message.
    pub msg: &'static [u8],
    /// Expected `x`.
    pub x: &'static [u8],
    /// Expected `y`.
    pub y: &'static [u8],
}

/// Domain separation tag of the RFC 9380 `P256_XMD:SHA-256_SSWU_RO_`
/// vectors.
pub const P256_SSWU_RO_DST: &[u8] = b"QUUX-V01-CS02-with-P256_XMD:SHA-256_SSWU_RO_";

/// RFC 9380 appendix J.1.1, `hash_to_curve`.
pub const P256_SSWU_RO: &[PointVector] = &[
    PointVector {
        msg: b"",
        x: &hex!("2c15230b26dbc6fc9a37051158c95b79656e17a1a920b11394ca91c44247d3e4"),
        y: &hex!("8a7a74985cc5c776cdfe4b1f19884970453912e9d31528c060be9ab5c43e8415"),
    },
    PointVector {
        msg: b"abc",
        x: &hex!("0bb8b87485551aa43ed54f009230450b492fead5f1cc91658775dac4a3388a0f"),
        y: &hex!("5c41b3d0731a27a7b14bc0bf0ccded2d8751f83493404c84a88e71ffd424212e"),
    },
];

/// Domain separation tag of the RFC 9380 `P256_XMD:SHA-256_SSWU_NU_`
/// vectors.
pub const P256_SSWU_NU_DST: &[u8] = b"QUUX-V01-CS02-with-P256_XMD:SHA-256_SSWU_NU_";

/// RFC 9380 appendix J.1.2, `encode_to_curve`.
pub const P256_SSWU_NU: &[PointVector] = &[PointVector {
    msg: b"",
    x: &hex!("f871caad25ea3b59c16cf87c1894902f7e7b2c822c3d3f73596c5ace8ddd14d1"),
    y: &hex!("87b9ae23335bee057b99bac1e68588b18b5691af476234b8971bc4f011ddc99b"),
}];

/// Compressed SEC1 encoding of the secp256k1 generator.
pub const SECP256K1_GENERATOR: [u8; 33] =
    hex!("0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798");

/// RFC 8032 Ed25519 base point encoding.
pub const ED25519_BASE_POINT: [u8; 32] =
    hex!("5866666666666666666666666666666666666666666666666666666666666666");
