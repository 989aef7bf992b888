//! Authenticated identity directory.

use std::collections::HashMap;

use ticketry_canonical::{Hash32, Identity};

use crate::challenge::{login_challenge, static_login_digest, NoncePolicy};
use crate::errors::RegistryError;
use crate::records::{NewPromoter, NewUser, Role, UserRecord};
use crate::signature::{RecoverableSignature, SignatureRecovery};

/// Registry of users and promoters.
///
/// Records are keyed by identity and are write-once. The administrator is
/// fixed at construction and is the only caller allowed to register promoters.
#[derive(Debug, Clone)]
pub struct UserRegistry {
    admin: Identity,
    nonce_policy: NoncePolicy,
    users: HashMap<Identity, UserRecord>,
}

impl UserRegistry {
    /// Creates an empty registry administered by `admin`.
    pub fn new(admin: Identity) -> Self {
        Self::with_nonce_policy(admin, NoncePolicy::default())
    }

    /// Creates an empty registry with an explicit login nonce policy.
    pub fn with_nonce_policy(admin: Identity, nonce_policy: NoncePolicy) -> Self {
        Self {
            admin,
            nonce_policy,
            users: HashMap::new(),
        }
    }

    /// The administrator identity.
    pub fn admin(&self) -> Identity {
        self.admin
    }

    /// The login nonce policy.
    pub fn nonce_policy(&self) -> NoncePolicy {
        self.nonce_policy
    }

    /// Registers the caller as a user.
    ///
    /// # Errors
    ///
    /// [`RegistryError::AlreadyRegistered`] if the caller already holds a record.
    pub fn add_user(&mut self, caller: Identity, user: NewUser) -> Result<(), RegistryError> {
        if self.users.contains_key(&caller) {
            tracing::debug!(caller = %caller, "user registration rejected: already registered");
            return Err(RegistryError::AlreadyRegistered { role: Role::User });
        }
        self.users.insert(caller, UserRecord::user(caller, user));
        tracing::debug!(caller = %caller, "user registered");
        Ok(())
    }

    /// Registers `promoter.identity` as a promoter on the administrator's behalf.
    ///
    /// # Errors
    ///
    /// Checked in order: [`RegistryError::NotAdmin`], [`RegistryError::InvalidIdentity`],
    /// [`RegistryError::AlreadyRegistered`].
    pub fn add_promoter(
        &mut self,
        caller: Identity,
        promoter: NewPromoter,
    ) -> Result<(), RegistryError> {
        let identity = promoter.identity;
        let result = if caller != self.admin {
            Err(RegistryError::NotAdmin)
        } else if identity.is_zero() {
            Err(RegistryError::InvalidIdentity)
        } else if self.users.contains_key(&identity) {
            Err(RegistryError::AlreadyRegistered {
                role: Role::Promoter,
            })
        } else {
            Ok(())
        };
        if let Err(err) = result {
            tracing::debug!(caller = %caller, promoter = %identity, reason = err.code(), "promoter registration rejected");
            return Err(err);
        }
        self.users.insert(identity, UserRecord::promoter(promoter));
        tracing::debug!(caller = %caller, promoter = %identity, "promoter registered");
        Ok(())
    }

    /// True if `identity` is registered with the `User` role.
    pub fn user_exists(&self, identity: &Identity) -> bool {
        self.has_role(identity, Role::User)
    }

    /// True if `identity` is registered with the `Promoter` role.
    pub fn promoter_exists(&self, identity: &Identity) -> bool {
        self.has_role(identity, Role::Promoter)
    }

    fn has_role(&self, identity: &Identity, role: Role) -> bool {
        self.users
            .get(identity)
            .map(|record| record.role == role)
            .unwrap_or(false)
    }

    /// The record held by `identity`, if any.
    pub fn get_user(&self, identity: &Identity) -> Option<&UserRecord> {
        self.users.get(identity)
    }

    /// Role of `identity`. The administrator reports `Admin` whether or not it
    /// has registered a record of its own.
    pub fn role_of(&self, identity: &Identity) -> Option<Role> {
        if *identity == self.admin {
            return Some(Role::Admin);
        }
        self.users.get(identity).map(|record| record.role)
    }

    /// Number of registered records.
    pub fn len(&self) -> usize {
        self.users.len()
    }

    /// True if nobody is registered.
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Digest `identity` must sign for its next login.
    ///
    /// Under [`NoncePolicy::PerAccount`] this is `None` for unregistered identities.
    pub fn login_challenge(&self, identity: &Identity) -> Option<Hash32> {
        match self.nonce_policy {
            NoncePolicy::Static => Some(static_login_digest()),
            NoncePolicy::PerAccount => self
                .users
                .get(identity)
                .map(|record| login_challenge(identity, record.nonce)),
        }
    }

    /// Proves that the caller controls its identity.
    ///
    /// The signer recovered from `(digest, signature)` must equal the caller and the
    /// caller must be registered. Under [`NoncePolicy::PerAccount`] the digest must
    /// also be the caller's current challenge, and success consumes the nonce.
    ///
    /// `claimed_slot` is accepted for interface compatibility and never consulted.
    ///
    /// # Errors
    ///
    /// [`RegistryError::LoginForbidden`] on any failed check, including malformed
    /// signatures.
    pub fn login<R: SignatureRecovery + ?Sized>(
        &mut self,
        caller: Identity,
        claimed_slot: u64,
        signature: &RecoverableSignature,
        digest: &Hash32,
        recovery: &R,
    ) -> Result<bool, RegistryError> {
        let recovered = match recovery.recover(digest, signature) {
            Ok(identity) => identity,
            Err(err) => {
                tracing::debug!(caller = %caller, error = %err, "login rejected: signature not recoverable");
                return Err(RegistryError::LoginForbidden);
            }
        };
        if recovered != caller {
            tracing::debug!(caller = %caller, signer = %recovered, "login rejected: signer is not caller");
            return Err(RegistryError::LoginForbidden);
        }

        let nonce_policy = self.nonce_policy;
        let Some(record) = self.users.get_mut(&caller) else {
            tracing::debug!(caller = %caller, "login rejected: caller not registered");
            return Err(RegistryError::LoginForbidden);
        };

        if nonce_policy == NoncePolicy::PerAccount {
            if *digest != login_challenge(&caller, record.nonce) {
                tracing::debug!(caller = %caller, nonce = record.nonce, "login rejected: stale or foreign challenge");
                return Err(RegistryError::LoginForbidden);
            }
            record.nonce += 1;
        }

        tracing::debug!(caller = %caller, claimed_slot, nonce = record.nonce, "login accepted");
        Ok(true)
    }
}
