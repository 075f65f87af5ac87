//! ECDSA signing key.

use super::{RecoveryId, Signature, VerifyingKey, sign_prehash};
use crate::{Result, SecretKey};
use core::{fmt, marker::PhantomData};
use digest::{Digest, FixedOutputReset, core_api::BlockSizeUser};
use signature::{Error, Signer};

/// ECDSA signing key hashing messages with `D`.
pub struct SigningKey<D> {
    /// Secret key material
    secret_key: SecretKey,

    /// Verifying key
    verifying_key: VerifyingKey<D>,

    digest: PhantomData<D>,
}

impl<D> SigningKey<D>
where
    D: Digest + BlockSizeUser + FixedOutputReset,
{
    /// Signing key for `secret_key`.
    pub fn new(secret_key: SecretKey) -> Self {
        let verifying_key = VerifyingKey::new(secret_key.public_key());

        Self {
            secret_key,
            verifying_key,
            digest: PhantomData,
        }
    }

    /// The secret key.
    pub fn as_secret_key(&self) -> &SecretKey {
        &self.secret_key
    }

    /// The matching verifying key.
    pub fn verifying_key(&self) -> &VerifyingKey<D> {
        &self.verifying_key
    }

    /// Signs a digest computed by the caller.
    pub fn sign_prehash(&self, prehash: &[u8]) -> Result<(Signature, RecoveryId)> {
        sign_prehash::<D>(&self.secret_key, prehash)
    }

    /// Hashes `msg` with `D` and signs it, returning the recovery
    /// identifier as well.
    pub fn sign_recoverable(&self, msg: &[u8]) -> Result<(Signature, RecoveryId)> {
        self.sign_prehash(&D::digest(msg))
    }
}

impl<D> Signer<Signature> for SigningKey<D>
where
    D: Digest + BlockSizeUser + FixedOutputReset,
{
    fn try_sign(&self, msg: &[u8]) -> core::result::Result<Signature, Error> {
        self.sign_recoverable(msg)
            .map(|(signature, _)| signature)
            .map_err(|_| Error::new())
    }
}

impl<D> Signer<(Signature, RecoveryId)> for SigningKey<D>
where
    D: Digest + BlockSizeUser + FixedOutputReset,
{
    fn try_sign(&self, msg: &[u8]) -> core::result::Result<(Signature, RecoveryId), Error> {
        self.sign_recoverable(msg).map_err(|_| Error::new())
    }
}

impl<D> Clone for SigningKey<D> {
    fn clone(&self) -> Self {
        Self {
            secret_key: self.secret_key.clone(),
            verifying_key: self.verifying_key.clone(),
            digest: PhantomData,
        }
    }
}

impl<D> fmt::Debug for SigningKey<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningKey")
            .field("verifying_key", &self.verifying_key)
            .finish_non_exhaustive()
    }
}
