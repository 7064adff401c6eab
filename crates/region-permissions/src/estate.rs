//! Estate authority.

use uuid::Uuid;

use crate::context::PermissionContext;

impl PermissionContext<'_> {
    /// Estate managers and administrators hold estate authority.
    pub fn has_estate_authority(&self, user: Uuid) -> bool {
        self.is_estate_manager(user) || self.is_administrator(user)
    }

    /// Whether `user` may issue an estate command.
    ///
    /// Administrators and the estate owner always may. Commands reserved for
    /// the owner (`owner_only`) are denied to everyone else; other commands
    /// fall back to estate authority.
    pub fn can_issue_estate_command(&self, user: Uuid, owner_only: bool) -> bool {
        if self.is_administrator(user) {
            return true;
        }

        if self.is_estate_owner(user) {
            return true;
        }

        if owner_only {
            return false;
        }

        self.has_estate_authority(user)
    }
}
