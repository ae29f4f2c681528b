use super::{policy, AuthError, Capability, Role};
use crate::common::entity_ids::UserId;

/// Entry point for authorization checks
///
/// Usage:
/// ```
/// # use portal_core::common::auth::{Actor, Capability, Role};
/// # use portal_core::common::UserId;
/// # fn demo(user_id: UserId) -> Result<(), portal_core::common::auth::AuthError> {
/// Actor::new(user_id, Role::Chairperson)
///     .can(Capability::SetLoanStatus)
///     .check()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Actor {
    actor_id: UserId,
    role: Role,
}

impl Actor {
    /// `role` comes from the verified JWT.
    pub fn new(actor_id: UserId, role: Role) -> Self {
        Self { actor_id, role }
    }

    pub fn id(&self) -> UserId {
        self.actor_id
    }

    pub fn role(&self) -> Role {
        self.role
    }

    /// Specify what capability the actor needs
    pub fn can(self, capability: Capability) -> CapabilityBuilder {
        CapabilityBuilder {
            actor: self,
            capability,
        }
    }
}

/// Builder after specifying capability
pub struct CapabilityBuilder {
    actor: Actor,
    capability: Capability,
}

impl CapabilityBuilder {
    /// Perform the authorization check against the policy table
    pub fn check(self) -> Result<(), AuthError> {
        if policy::allows(self.actor.role, self.capability) {
            return Ok(());
        }

        tracing::warn!(
            actor_id = %self.actor.actor_id,
            role = %self.actor.role,
            capability = %self.capability,
            "Permission denied"
        );
        Err(AuthError::PermissionDenied(self.capability))
    }
}
