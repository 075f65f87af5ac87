//! RFC 7748 test vectors.

use hex_literal::hex;

/// Scalar, input `u` and expected output, all little-endian.
pub struct MontgomeryVector {
    /// Scalar before clamping.
    pub scalar: &'static [u8],
    /// Input `u`.
    pub u: &'static [u8],
    /// Expected output `u`.
    pub output: &'static [u8],
}

/// RFC 7748 section 5.2, first X25519 vector.
pub const X25519: MontgomeryVector = MontgomeryVector {
    scalar: &hex!("a546e36bf0527c9d3b16154b82465edd62144c0ac1fc5a18506a2244ba449ac4"),
    u: &hex!("e6db6867583030db3594c1a424b15f7c726624ec26b3353b10a903a6d0ab1c4c"),
    output: &hex!("c3da55379de9c6908e94ea4df28d084f32eccf03491c71f754b4075577a28552"),
};

/// RFC 7748 section 5.2, first X448 vector.
pub const X448: MontgomeryVector = MontgomeryVector {
    scalar: &hex!(
        "3d262fddf9ec8e88495266fea19a34d28882acef045104d0d1aae121700a779c984c24f8cdd78fbff44943eba368f54b29259a4f1c600ad3"
    ),
    u: &hex!(
        "06fce640fa3487bfda5f6cf2d5263f8aad88334cbd07437f020f08f9814dc031ddbdc38c19c6da2583fa5429db94ada18aa7a7fb4ef8a086"
    ),
    output: &hex!(
        "ce3e4ff95a60dc6697da1db1d85e6afbdf79b50a2412d7546d5f239fe14fbaadeb445fc66a01b0779d98223961111e21766282f73dd96b6f"
    ),
};
