//! ECDSA test vectors.

use hex_literal::hex;

/// Deterministic signature of a message hashed with the curve's digest.
///
/// `s` is given as published, before low-S normalization.
pub struct DeterministicVector {
    /// Registry name of the curve.
    pub curve: &'static str,
    /// Secret scalar, big-endian.
    pub d: &'static [u8],
    /// Message, before hashing.
    pub msg: &'static [u8],
    /// Expected `r`.
    pub r: &'static [u8],
    /// Expected `s`.
    pub s: &'static [u8],
}

/// Signature of a digest with a fixed nonce.
pub struct FixedNonceVector {
    /// Registry name of the curve.
    pub curve: &'static str,
    /// Secret scalar.
    pub d: &'static [u8],
    /// Public key `x`.
    pub q_x: &'static [u8],
    /// Public key `y`.
    pub q_y: &'static [u8],
    /// Nonce.
    pub k: &'static [u8],
    /// Message digest.
    pub m: &'static [u8],
    /// Expected `r`.
    pub r: &'static [u8],
    /// Expected `s`.
    pub s: &'static [u8],
}

/// RFC 6979 appendix A.2.5, P-256 with SHA-256.
pub const P256_SHA256: &[DeterministicVector] = &[
    DeterministicVector {
        curve: "P256",
        d: &hex!("C9AFA9D845BA75166B5C215767B1D6934E50C3DB36E89B127B8A622B120F6721"),
        msg: b"sample",
        r: &hex!("EFD48B2AACB6A8FD1140DD9CD45E81D69D2C877B56AAF991C34D0EA84EAF3716"),
        s: &hex!("F7CB1C942D657C41D436C7A1B6E29F65F3E900DBB9AFF4064DC4AB2F843ACDA8"),
    },
    DeterministicVector {
        curve: "P256",
        d: &hex!("C9AFA9D845BA75166B5C215767B1D6934E50C3DB36E89B127B8A622B120F6721"),
        msg: b"test",
        r: &hex!("F1ABB023518351CD71D881567B1EA663ED3EFCF6C5132B354F28D3B0B7D38367"),
        s: &hex!("019F4113742A2B14BD25926B49C649155F267E60D3814B4C0CC84250E46F0083"),
    },
];

/// RFC 6979 appendix A.2.5 public key.
pub const P256_PUBLIC_KEY: (&[u8], &[u8]) = (
    &hex!("60FED4BA255A9D31C961EB74C6356D68C049B8923B61FA6CE669622E60F29FB6"),
    &hex!("7903FE1008B8BC99A41AE9E95628BC64F2F1B20C2D7E9F5177A3C294D4462299"),
);

/// P-521 with SHA-512, where the digest is shorter than the order and
/// `bits2int` pads rather than truncates.
pub const P521_SHA512: &[DeterministicVector] = &[
    DeterministicVector {
        curve: "P521",
        d: &hex!("1234567890abcdef"),
        msg: b"sample",
        r: &hex!(
            "0039c93c5e7b1d5d0f63d036bdbeb2dea1cf163217e80fc4bcb8f18280b131af38911a11ad2af654c7e78509ad39e93167f0457a82113dca0ea19485a413eee8c10b"
        ),
        s: &hex!(
            "01ca1c98e232663b929ed2763a32e89d6a9473450f8bd76dce50c8d014bc844fbb3b724854a279628817caa36c24fe7ac989699f696d84abda5e19171039392b8d39"
        ),
    },
    DeterministicVector {
        curve: "P521",
        d: &hex!("1234567890abcdef"),
        msg: b"test",
        r: &hex!(
            "00744f2c4851297d3e624d806db789e718eff99c5935842f5b644cbe59c55c1f69584df92569616a4f2432f821a0ce53bc8a5721af05e56ca173233018ba6912a60e"
        ),
        s: &hex!(
            "00b8538f99449e71f06689d91afbd5210b62b3deae317c017bd1e18d2111654ccbc144047219da1d44ce03fe0d77622ec093d74681d186a8922c5ad2705045eb1485"
        ),
    },
];

/// secp256k1 signature with an explicit nonce.
pub const SECP256K1_FIXED_NONCE: &[FixedNonceVector] = &[FixedNonceVector {
    curve: "SECP256K1",
    d: &hex!("ebb2c082fd7727890a28ac82f6bdf97bad8de9f5d7c9028692de1a255cad3e0f"),
    q_x: &hex!("779dd197a5df977ed2cf6cb31d82d43328b790dc6b3b7d4437a427bd5847dfcd"),
    q_y: &hex!("e94b724a555b6d017bb7607c3e3281daf5b1699d6ef4124975c9237b917d426f"),
    k: &hex!("49a0d7b786ec9cde0d0721d72804befd06571c974b191efb42ecf322ba9ddd9a"),
    m: &hex!("4b688df40bcedbe641ddb16ff0a1842d9c67ea1c3bf63f3e0471baa664531d1a"),
    r: &hex!("241097efbf8b63bf145c8961dbdf10c310efbb3b2676bbc0f8b08505c9e2f795"),
    s: &hex!("021006b7838609339e8b415a7f9acb1b661828131aef1ecbc7955dfb01f3ca0e"),
}];
