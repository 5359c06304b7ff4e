//! Injected authorization capability.
//!
//! Admin mutations (creating regions, deleting collecting regions) take an
//! [`Authorizer`] supplied by the hosting application rather than comparing
//! against a privileged identity baked into the engine.

use std::collections::HashSet;
use uuid::Uuid;

pub trait Authorizer: Send + Sync {
    fn can_administer(&self, actor_id: Uuid) -> bool;
}

/// Authorizer backed by an explicit admin list.
#[derive(Debug, Clone, Default)]
pub struct AdminList {
    admins: HashSet<Uuid>,
}

impl AdminList {
    pub fn new(admins: impl IntoIterator<Item = Uuid>) -> Self {
        Self {
            admins: admins.into_iter().collect(),
        }
    }
}

impl Authorizer for AdminList {
    fn can_administer(&self, actor_id: Uuid) -> bool {
        self.admins.contains(&actor_id)
    }
}

/// Permissive authorizer for tests.
#[derive(Debug, Clone, Default)]
pub struct AllowAll;

impl Authorizer for AllowAll {
    fn can_administer(&self, _actor_id: Uuid) -> bool {
        true
    }
}
