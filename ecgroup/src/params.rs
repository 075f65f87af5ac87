//! Named curve parameters.
//!
//! Every curve is described by a [`CurveDef`] holding its parameters as
//! hexadecimal strings. Definitions are plain data: [`crate::CurveRegistry`]
//! turns them into [`crate::Curve`] instances on first use.

use modint::Strategy;

/// Curve model together with its equation coefficients.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ModelDef {
    /// `y² = x³ + ax + b`.
    Short {
        /// Coefficient `a`.
        a: &'static str,
        /// Coefficient `b`.
        b: &'static str,
    },

    /// `By² = x³ + Ax² + x`.
    Montgomery {
        /// Coefficient `A`.
        a: &'static str,
        /// Coefficient `B`.
        b: &'static str,
    },

    /// `ax² + y² = 1 + dx²y²`.
    Edwards {
        /// Coefficient `a`.
        a: &'static str,
        /// Coefficient `d`.
        d: &'static str,
    },
}

/// Domain parameters of a named curve.
///
/// Integers are hexadecimal, with an optional leading `-`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct CurveDef {
    /// Registry name.
    pub name: &'static str,

    /// Model and coefficients.
    pub model: ModelDef,

    /// Field prime.
    pub p: &'static str,

    /// Order of the generator, `"0"` if unknown.
    pub n: &'static str,

    /// Cofactor.
    pub h: u32,

    /// Generator `x` (or `u`) coordinate.
    pub gx: &'static str,

    /// Generator `y` (or `v`) coordinate.
    pub gy: &'static str,

    /// Field reduction strategy, picked automatically when `None`.
    pub strategy: Option<Strategy>,

    /// Overrides the `Z` constant of the map to curve.
    pub z: Option<i64>,

    /// wNAF window width for points used repeatedly.
    pub window: usize,
}

impl CurveDef {
    /// Every built-in definition.
    pub const BUILTIN: &'static [CurveDef] = &[
        P192, P224, P256, P384, P521, SECP256K1, ED25519, X25519, ED448, X448, CURVE1174,
    ];
}

/// NIST P-192.
pub const P192: CurveDef = CurveDef {
    name: "P192",
    model: ModelDef::Short {
        a: "-3",
        b: "64210519e59c80e70fa7e9ab72243049feb8deecc146b9b1",
    },
    p: "fffffffffffffffffffffffffffffffeffffffffffffffff",
    n: "ffffffffffffffffffffffff99def836146bc9b1b4d22831",
    h: 1,
    gx: "188da80eb03090f67cbf20eb43a18800f4ff0afd82ff1012",
    gy: "07192b95ffc8da78631011ed6b24cdd573f977a11e794811",
    strategy: None,
    z: None,
    window: 5,
};

/// NIST P-224.
pub const P224: CurveDef = CurveDef {
    name: "P224",
    model: ModelDef::Short {
        a: "-3",
        b: "b4050a850c04b3abf54132565044b0b7d7bfd8ba270b39432355ffb4",
    },
    p: "ffffffffffffffffffffffffffffffff000000000000000000000001",
    n: "ffffffffffffffffffffffffffff16a2e0b8f03e13dd29455c5c2a3d",
    h: 1,
    gx: "b70e0cbd6bb4bf7f321390b94a03c1d356c21122343280d6115c1d21",
    gy: "bd376388b5f723fb4c22dfe6cd4375a05a07476444d5819985007e34",
    strategy: None,
    z: None,
    window: 5,
};

/// NIST P-256.
pub const P256: CurveDef = CurveDef {
    name: "P256",
    model: ModelDef::Short {
        a: "-3",
        b: "5ac635d8aa3a93e7b3ebbd55769886bc651d06b0cc53b0f63bce3c3e27d2604b",
    },
    p: "ffffffff00000001000000000000000000000000ffffffffffffffffffffffff",
    n: "ffffffff00000000ffffffffffffffffbce6faada7179e84f3b9cac2fc632551",
    h: 1,
    gx: "6b17d1f2e12c4247f8bce6e563a440f277037d812deb33a0f4a13945d898c296",
    gy: "4fe342e2fe1a7f9b8ee7eb4a7c0f9e162bce33576b315ececbb6406837bf51f5",
    strategy: Some(Strategy::Montgomery),
    z: Some(-10),
    window: 6,
};

/// NIST P-384.
pub const P384: CurveDef = CurveDef {
    name: "P384",
    model: ModelDef::Short {
        a: "-3",
        b: "b3312fa7e23ee7e4988e056be3f82d19181d9c6efe8141120314088f5013875ac656398d8a2ed19d2a85c8edd3ec2aef",
    },
    p: "fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffeffffffff0000000000000000ffffffff",
    n: "ffffffffffffffffffffffffffffffffffffffffffffffffc7634d81f4372ddf581a0db248b0a77aecec196accc52973",
    h: 1,
    gx: "aa87ca22be8b05378eb1c71ef320ad746e1d3b628ba79b9859f741e082542a385502f25dbf55296c3a545e3872760ab7",
    gy: "3617de4a96262c6f5d9e98bf9292dc29f8f41dbd289a147ce9da3113b5f0b8c00a60b1ce1d7e819d7a431d7c90ea0e5f",
    strategy: Some(Strategy::Montgomery),
    z: Some(-12),
    window: 6,
};

/// NIST P-521.
pub const P521: CurveDef = CurveDef {
    name: "P521",
    model: ModelDef::Short {
        a: "-3",
        b: "51953eb9618e1c9a1f929a21a0b68540eea2da725b99b315f3b8b489918ef109e156193951ec7e937b1652c0bd3bb1bf073573df883d2c34f1ef451fd46b503f00",
    },
    p: "1ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff",
    n: "1fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffa51868783bf2f966b7fcc0148f709a5d03bb5c9b8899c47aebb6fb71e91386409",
    h: 1,
    gx: "c6858e06b70404e9cd9e3ecb662395b4429c648139053fb521f828af606b4d3dbaa14b5e77efe75928fe1dc127a2ffa8de3348b3c1856a429bf97e7e31c2e5bd66",
    gy: "11839296a789a3bc0045c8a5fb42c7d1bd998f54449579b446817afbd17273e662c97ee72995ef42640c550b9013fad0761353c7086a272c24088be94769fd16650",
    strategy: Some(Strategy::Special),
    z: Some(-4),
    window: 6,
};

/// secp256k1.
pub const SECP256K1: CurveDef = CurveDef {
    name: "SECP256K1",
    model: ModelDef::Short { a: "0", b: "7" },
    p: "fffffffffffffffffffffffffffffffffffffffffffffffffffffffefffffc2f",
    n: "fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141",
    h: 1,
    gx: "79be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798",
    gy: "483ada7726a3c4655da4fbfc0e1108a8fd17b448a68554199c47d08ffb10d4b8",
    strategy: Some(Strategy::Special),
    z: None,
    window: 5,
};

/// Ed25519 (RFC 8032).
pub const ED25519: CurveDef = CurveDef {
    name: "ED25519",
    model: ModelDef::Edwards {
        a: "-1",
        d: "52036cee2b6ffe738cc740797779e89800700a4d4141d8ab75eb4dca135978a3",
    },
    p: "7fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffed",
    n: "1000000000000000000000000000000014def9dea2f79cd65812631a5cf5d3ed",
    h: 8,
    gx: "216936d3cd6e53fec0a4e231fdd6dc5c692cc7609525a7b2c9562d608f25d51a",
    gy: "6666666666666666666666666666666666666666666666666666666666666658",
    strategy: Some(Strategy::Special),
    z: None,
    window: 6,
};

/// Curve25519 in Montgomery form (RFC 7748).
pub const X25519: CurveDef = CurveDef {
    name: "X25519",
    model: ModelDef::Montgomery { a: "76d06", b: "1" },
    p: "7fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffed",
    n: "1000000000000000000000000000000014def9dea2f79cd65812631a5cf5d3ed",
    h: 8,
    gx: "9",
    gy: "20ae19a1b8a086b4e01edd2c7748d14c923d4d7e6d7c61b229e9c5a27eced3d9",
    strategy: Some(Strategy::Special),
    z: None,
    window: 6,
};

/// Ed448-Goldilocks (RFC 8032).
pub const ED448: CurveDef = CurveDef {
    name: "ED448",
    model: ModelDef::Edwards { a: "1", d: "-98a9" },
    p: "fffffffffffffffffffffffffffffffffffffffffffffffffffffffeffffffffffffffffffffffffffffffffffffffffffffffffffffffff",
    n: "3fffffffffffffffffffffffffffffffffffffffffffffffffffffff7cca23e9c44edb49aed63690216cc2728dc58f552378c292ab5844f3",
    h: 4,
    gx: "4f1970c66bed0ded221d15a622bf36da9e146570470f1767ea6de324a3d3a46412ae1af72ab66511433b80e18b00938e2626a82bc70cc05e",
    gy: "693f46716eb6bc248876203756c9c7624bea73736ca3984087789c1e05a0c2d73ad3ff1ce67c39c4fdbd132c4ed7c8ad9808795bf230fa14",
    strategy: Some(Strategy::Barrett),
    z: None,
    window: 6,
};

/// Curve448 in Montgomery form (RFC 7748).
pub const X448: CurveDef = CurveDef {
    name: "X448",
    model: ModelDef::Montgomery { a: "262a6", b: "1" },
    p: "fffffffffffffffffffffffffffffffffffffffffffffffffffffffeffffffffffffffffffffffffffffffffffffffffffffffffffffffff",
    n: "3fffffffffffffffffffffffffffffffffffffffffffffffffffffff7cca23e9c44edb49aed63690216cc2728dc58f552378c292ab5844f3",
    h: 4,
    gx: "5",
    gy: "7d235d1295f5b1f66c98ab6e58326fcecbae5d34f55545d060f75dc28df3f6edb8027e2346430d211312c4b150677af76fd7223d457b5b1a",
    strategy: Some(Strategy::Barrett),
    z: None,
    window: 6,
};

/// Curve1174, an Edwards curve admitting Elligator 1.
pub const CURVE1174: CurveDef = CurveDef {
    name: "CURVE1174",
    model: ModelDef::Edwards { a: "1", d: "-496" },
    p: "7fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff7",
    n: "1fffffffffffffffffffffffffffffff77965c4dfd307348944d45fd166c971",
    h: 4,
    gx: "37fbb0cea308c479343aee7c029a190c021d96a492ecd6516123f27bce29eda",
    gy: "6b72f82d47fb7cc6656841169840e0c4fe2dee2af3f976ba4ccb1bf9b46360e",
    strategy: Some(Strategy::Special),
    z: None,
    window: 6,
};
