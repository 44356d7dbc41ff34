use super::{AdminCapability, AuthError};

/// Who is calling a workflow
///
/// Built by the HTTP layer from the admin session cookie. Workflows never look
/// at cookies themselves; they ask the actor for a capability:
/// ```
/// # use registration_core::common::auth::{Actor, AdminCapability};
/// # let actor = Actor::anonymous();
/// let denied = actor.can(AdminCapability::ReviewRegistrations).check();
/// assert!(denied.is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    is_admin: bool,
}

impl Actor {
    /// A caller holding a valid admin session
    pub fn admin() -> Self {
        Self { is_admin: true }
    }

    /// A caller without a session (or with an invalid one)
    pub fn anonymous() -> Self {
        Self { is_admin: false }
    }

    pub fn from_session_flag(is_admin: bool) -> Self {
        Self { is_admin }
    }

    pub fn is_admin(&self) -> bool {
        self.is_admin
    }

    /// Specify what capability the actor needs
    pub fn can(self, capability: AdminCapability) -> CapabilityBuilder {
        CapabilityBuilder {
            is_admin: self.is_admin,
            capability,
        }
    }
}

/// Builder after specifying capability
pub struct CapabilityBuilder {
    is_admin: bool,
    capability: AdminCapability,
}

impl CapabilityBuilder {
    /// Perform the authorization check
    pub fn check(self) -> Result<(), AuthError> {
        match self.capability {
            AdminCapability::ViewRegistrations | AdminCapability::ReviewRegistrations => {
                if !self.is_admin {
                    return Err(AuthError::AdminRequired);
                }
            }
        }

        Ok(())
    }
}
