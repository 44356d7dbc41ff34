//! Email bodies for moderation outcomes

use crate::common::html::escape;
use crate::domains::registration::models::Registration;
use crate::kernel::OutboundEmail;

pub const APPROVED_SUBJECT: &str = "Cloud Workshop – Registration Approved";
pub const REJECTED_SUBJECT: &str = "Cloud Workshop – Payment Could Not Be Verified";

fn greeting_name(registration: &Registration) -> String {
    let name = registration.full_name.trim();
    if name.is_empty() {
        "participant".to_string()
    } else {
        escape(name)
    }
}

pub fn approval_email(registration: &Registration) -> OutboundEmail {
    let html = format!(
        r#"<div style="font-family: system-ui, -apple-system, sans-serif;">
  <h2>{subject}</h2>
  <p>Hi {name},</p>
  <p>Your payment has been verified and your seat for the Cloud Workshop is <strong>confirmed</strong>.</p>
  <p>Please bring this email and a valid ID to the workshop check-in desk.</p>
</div>"#,
        subject = APPROVED_SUBJECT,
        name = greeting_name(registration),
    );

    OutboundEmail {
        to: registration.email.clone(),
        subject: APPROVED_SUBJECT.to_string(),
        html,
    }
}

pub fn rejection_email(registration: &Registration, support_phone: &str) -> OutboundEmail {
    let html = format!(
        r#"<div style="font-family: system-ui, -apple-system, sans-serif; line-height: 1.6;">
  <h2 style="color: #1c4e80;">{subject}</h2>
  <p>Hi {name},</p>
  <p>Unfortunately, we were not able to verify your payment and your workshop registration has been <strong>rejected</strong> for now.</p>
  <p>This usually happens when the uploaded receipt is unclear, incorrect, or missing required transaction details.</p>
  <p>If you believe this is a mistake, please reach out to us at <strong>{phone}</strong> and mention the email you used during registration.</p>
  <hr style="margin: 24px 0; border: none; border-top: 1px solid #d7e3ee;" />
  <p style="font-size: 13px; color: #444;">You may submit a new registration at any time with a clear receipt screenshot.</p>
</div>"#,
        subject = REJECTED_SUBJECT,
        name = greeting_name(registration),
        phone = escape(support_phone),
    );

    OutboundEmail {
        to: registration.email.clone(),
        subject: REJECTED_SUBJECT.to_string(),
        html,
    }
}
