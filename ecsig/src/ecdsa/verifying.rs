//! ECDSA verifying key.

use super::{RecoveryId, Signature, recover_prehash, verify_prehash};
use crate::{PublicKey, Result};
use core::{fmt, marker::PhantomData};
use digest::Digest;
use ecgroup::CurveRef;
use signature::{Error, Verifier};

/// ECDSA verifying key hashing messages with `D`.
pub struct VerifyingKey<D> {
    public_key: PublicKey,
    digest: PhantomData<D>,
}

impl<D: Digest> VerifyingKey<D> {
    /// Verifying key for `public_key`.
    pub fn new(public_key: PublicKey) -> Self {
        Self {
            public_key,
            digest: PhantomData,
        }
    }

    /// Decodes a public key in the curve's point format.
    pub fn from_bytes(curve: &CurveRef, bytes: &[u8]) -> Result<Self> {
        PublicKey::from_bytes(curve, bytes).map(Self::new)
    }

    /// Recovers the key that signed `msg`.
    pub fn recover_from_msg(
        curve: &CurveRef,
        msg: &[u8],
        signature: &Signature,
        id: RecoveryId,
    ) -> Result<Self> {
        recover_prehash(curve, &D::digest(msg), signature, id).map(Self::new)
    }

    /// The public key.
    pub fn as_public_key(&self) -> &PublicKey {
        &self.public_key
    }

    /// Verifies a signature over a digest computed by the caller.
    pub fn verify_prehash(&self, prehash: &[u8], signature: &Signature) -> bool {
        verify_prehash(&self.public_key, prehash, signature)
    }
}

impl<D: Digest> Verifier<Signature> for VerifyingKey<D> {
    fn verify(&self, msg: &[u8], signature: &Signature) -> core::result::Result<(), Error> {
        if self.verify_prehash(&D::digest(msg), signature) {
            Ok(())
        } else {
            Err(Error::new())
        }
    }
}

impl<D> Clone for VerifyingKey<D> {
    fn clone(&self) -> Self {
        Self {
            public_key: self.public_key.clone(),
            digest: PhantomData,
        }
    }
}

impl<D> PartialEq for VerifyingKey<D> {
    fn eq(&self, other: &Self) -> bool {
        self.public_key == other.public_key
    }
}

impl<D> Eq for VerifyingKey<D> {}

impl<D> fmt::Debug for VerifyingKey<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("VerifyingKey").field(&self.public_key).finish()
    }
}
