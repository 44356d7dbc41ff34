use crate::common::{Actor, AdminCapability, Page, PageRequest};
use crate::domains::moderation::errors::ModerationError;
use crate::domains::registration::models::Registration;
use crate::kernel::ServerDeps;

/// Registrations newest first, for the admin view
pub async fn list_registrations(
    actor: Actor,
    page: PageRequest,
    deps: &ServerDeps,
) -> Result<Page<Registration>, ModerationError> {
    actor.can(AdminCapability::ViewRegistrations).check()?;

    deps.registrations
        .list(&page)
        .await
        .map_err(ModerationError::Storage)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::registration::actions::submit_registration;
    use crate::domains::registration::validation::{ReceiptUpload, RegistrationForm};
    use crate::kernel::TestDependencies;
    use bytes::Bytes;

    fn form(name: &str) -> RegistrationForm {
        RegistrationForm {
            full_name: name.to_string(),
            tp_number: "TP012345".to_string(),
            sex: "male".to_string(),
            age: "30".to_string(),
            email: "someone@x.com".to_string(),
            phone: "0123456789".to_string(),
            nationality: "Malaysia".to_string(),
            receipt: Some(ReceiptUpload {
                file_name: Some("r.pdf".to_string()),
                content_type: "application/pdf".to_string(),
                bytes: Bytes::from_static(b"%PDF-1.4"),
            }),
        }
    }

    async fn submit_all(test: &TestDependencies, names: &[&str]) {
        for name in names {
            submit_registration(form(name), &test.deps()).await.unwrap();
        }
    }

    #[tokio::test]
    async fn test_lists_newest_first() {
        let test = TestDependencies::new();
        submit_all(&test, &["First One", "Second One", "Third One"]).await;

        let page = list_registrations(Actor::admin(), PageRequest::all(), &test.deps())
            .await
            .unwrap();

        let names: Vec<_> = page.items.iter().map(|r| r.full_name.as_str()).collect();
        assert_eq!(names, vec!["Third One", "Second One", "First One"]);
        assert!(!page.has_next_page);
    }

    #[tokio::test]
    async fn test_pages_follow_cursor() {
        let test = TestDependencies::new();
        submit_all(&test, &["First One", "Second One", "Third One"]).await;
        let deps = test.deps();

        let first = list_registrations(Actor::admin(), PageRequest::first(2, None), &deps)
            .await
            .unwrap();
        assert_eq!(first.items.len(), 2);
        assert!(first.has_next_page);

        let cursor = crate::common::Cursor::decode(first.next_cursor.as_deref().unwrap()).unwrap();
        let second = list_registrations(Actor::admin(), PageRequest::first(2, Some(cursor)), &deps)
            .await
            .unwrap();
        assert_eq!(second.items.len(), 1);
        assert_eq!(second.items[0].full_name, "First One");
        assert!(!second.has_next_page);
    }

    #[tokio::test]
    async fn test_requires_admin() {
        let test = TestDependencies::new();

        let err = list_registrations(Actor::anonymous(), PageRequest::all(), &test.deps())
            .await
            .unwrap_err();

        assert!(matches!(err, ModerationError::Unauthorized(_)));
    }
}
