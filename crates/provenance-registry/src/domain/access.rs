//! # Access Control
//!
//! Owns the owner identity and the two trust sets. Every mutating registry
//! call passes through `require` before anything else is looked at.

use super::value_objects::Role;
use crate::errors::RegistryError;
use shared_types::Identity;
use std::collections::HashSet;

/// Which trust set an administrative call targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrustList {
    /// Identities allowed to publish.
    Publishers,
    /// Identities allowed to attest.
    Verifiers,
}

/// Owner plus publisher/verifier trust sets.
#[derive(Debug, Clone)]
pub struct AccessControl {
    owner: Identity,
    publishers: HashSet<Identity>,
    verifiers: HashSet<Identity>,
}

impl AccessControl {
    /// Genesis: the owner starts out in both trust sets.
    #[must_use]
    pub fn genesis(owner: Identity) -> Self {
        Self {
            owner,
            publishers: HashSet::from([owner]),
            verifiers: HashSet::from([owner]),
        }
    }

    /// The fixed administrative identity.
    #[must_use]
    pub fn owner(&self) -> Identity {
        self.owner
    }

    /// Whether `id` may publish.
    #[must_use]
    pub fn is_trusted_publisher(&self, id: &Identity) -> bool {
        self.publishers.contains(id)
    }

    /// Whether `id` may attest.
    #[must_use]
    pub fn is_trusted_verifier(&self, id: &Identity) -> bool {
        self.verifiers.contains(id)
    }

    /// Whether `id` currently holds `role`.
    #[must_use]
    pub fn has_role(&self, role: Role, id: &Identity) -> bool {
        match role {
            Role::Owner => *id == self.owner,
            Role::Publisher => self.is_trusted_publisher(id),
            Role::Verifier => self.is_trusted_verifier(id),
        }
    }

    /// Guard clause: `Unauthorized` unless `caller` holds `role`.
    pub fn require(&self, role: Role, caller: Identity) -> Result<(), RegistryError> {
        if self.has_role(role, &caller) {
            Ok(())
        } else {
            Err(RegistryError::Unauthorized {
                caller,
                required: role,
            })
        }
    }

    /// Insert into a trust set. Returns true if the set changed.
    pub(crate) fn grant(&mut self, list: TrustList, id: Identity) -> bool {
        self.set_mut(list).insert(id)
    }

    /// Remove from a trust set. Returns true if the set changed.
    pub(crate) fn revoke(&mut self, list: TrustList, id: Identity) -> bool {
        self.set_mut(list).remove(&id)
    }

    /// Sorted snapshot of a trust set.
    #[must_use]
    pub fn members(&self, list: TrustList) -> Vec<Identity> {
        let set = match list {
            TrustList::Publishers => &self.publishers,
            TrustList::Verifiers => &self.verifiers,
        };
        let mut members: Vec<Identity> = set.iter().copied().collect();
        members.sort_unstable();
        members
    }

    fn set_mut(&mut self, list: TrustList) -> &mut HashSet<Identity> {
        match list {
            TrustList::Publishers => &mut self.publishers,
            TrustList::Verifiers => &mut self.verifiers,
        }
    }
}
