//! Review actions - approve or reject a registration and notify the registrant
//!
//! Order is fixed: authorize, load, consult the review policy, write the new
//! status, then queue the email. Email is queued only after the write
//! succeeded and its delivery never affects the result.

use tracing::{info, warn};

use crate::common::{Actor, AdminCapability, RegistrationId};
use crate::domains::moderation::errors::ModerationError;
use crate::domains::moderation::notifications::{approval_email, rejection_email};
use crate::domains::moderation::policy::ReviewStep;
use crate::domains::registration::models::{Registration, RegistrationStatus};
use crate::kernel::ServerDeps;

/// An admin decision on a registration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Approve,
    Reject,
}

impl Decision {
    pub fn target_status(&self) -> RegistrationStatus {
        match self {
            Decision::Approve => RegistrationStatus::Approved,
            Decision::Reject => RegistrationStatus::Rejected,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ReviewOutcome {
    pub registration: Registration,
    /// False when the review policy skipped an already-applied decision
    pub changed: bool,
    /// Whether an email was handed to the outbox
    pub notification_queued: bool,
}

pub async fn approve_registration(
    actor: Actor,
    id: RegistrationId,
    deps: &ServerDeps,
) -> Result<ReviewOutcome, ModerationError> {
    review_registration(actor, id, Decision::Approve, deps).await
}

pub async fn reject_registration(
    actor: Actor,
    id: RegistrationId,
    deps: &ServerDeps,
) -> Result<ReviewOutcome, ModerationError> {
    review_registration(actor, id, Decision::Reject, deps).await
}

pub async fn review_registration(
    actor: Actor,
    id: RegistrationId,
    decision: Decision,
    deps: &ServerDeps,
) -> Result<ReviewOutcome, ModerationError> {
    actor.can(AdminCapability::ReviewRegistrations).check()?;

    let current = deps
        .registrations
        .find_by_id(id)
        .await
        .map_err(ModerationError::Storage)?
        .ok_or(ModerationError::NotFound(id))?;

    let target = decision.target_status();
    match deps.review_policy.step(current.status, target) {
        ReviewStep::Apply => {}
        ReviewStep::Skip => {
            info!(registration_id = %id, status = %target, "Decision already applied, skipping");
            return Ok(ReviewOutcome {
                registration: current,
                changed: false,
                notification_queued: false,
            });
        }
        ReviewStep::Conflict => {
            warn!(
                registration_id = %id,
                current = %current.status,
                requested = %target,
                "Refusing to reverse a decided registration"
            );
            return Err(ModerationError::AlreadyDecided {
                id,
                current: current.status,
            });
        }
    }

    let updated = deps
        .registrations
        .update_status(id, target)
        .await
        .map_err(ModerationError::Storage)?
        .ok_or(ModerationError::NotFound(id))?;

    info!(
        registration_id = %id,
        from = %current.status,
        to = %updated.status,
        "Registration reviewed"
    );

    let email = match decision {
        Decision::Approve => approval_email(&updated),
        Decision::Reject => rejection_email(&updated, &deps.support_phone),
    };
    let notification_queued = deps.outbox.enqueue(email);

    Ok(ReviewOutcome {
        registration: updated,
        changed: true,
        notification_queued,
    })
}
