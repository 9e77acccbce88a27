//! Deterministic development accounts.
//!
//! Stand-ins for the host ledger's pre-funded signer list, so local runs and
//! tests agree on who the owner, publisher and verifiers are.

use sha3::{Digest, Keccak256};
use shared_types::Identity;

const DEV_ACCOUNT_DOMAIN: &[u8] = b"provenance-dev-account";

/// The `index`-th development account: `keccak256(domain || index)[12..]`.
#[must_use]
pub fn dev_account(index: u32) -> Identity {
    let mut hasher = Keccak256::new();
    hasher.update(DEV_ACCOUNT_DOMAIN);
    hasher.update(index.to_be_bytes());
    let hash = hasher.finalize();

    let mut bytes = [0u8; 20];
    bytes.copy_from_slice(&hash[12..]);
    Identity::new(bytes)
}

/// The first `count` development accounts.
#[must_use]
pub fn dev_accounts(count: u32) -> Vec<Identity> {
    (0..count).map(dev_account).collect()
}

/// Named roles used by the scripted exercise.
#[derive(Debug, Clone, Copy)]
pub struct DevRoles {
    /// Registry owner.
    pub owner: Identity,
    /// Trusted publisher.
    pub publisher: Identity,
    /// First trusted verifier.
    pub verifier1: Identity,
    /// Second trusted verifier.
    pub verifier2: Identity,
    /// Account with no role.
    pub reader: Identity,
}

impl DevRoles {
    /// Accounts 0..5 in owner, publisher, verifier1, verifier2, reader order.
    #[must_use]
    pub fn standard() -> Self {
        Self::with_owner(dev_account(0))
    }

    /// Same assignment with a different owner.
    #[must_use]
    pub fn with_owner(owner: Identity) -> Self {
        Self {
            owner,
            publisher: dev_account(1),
            verifier1: dev_account(2),
            verifier2: dev_account(3),
            reader: dev_account(4),
        }
    }
}
