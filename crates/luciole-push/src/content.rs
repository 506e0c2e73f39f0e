//! Status-to-notification content mapping.
//!
//! The mapping is an explicit table: a status with no entry never reaches
//! this module, because [`SignalementStatus`] is a closed enum that fails
//! parsing at the request boundary. Payload construction itself is pure
//! and has no failure mode.

use luciole_core::config::push::PushConfig;
use luciole_core::types::id::SignalementId;
use luciole_core::types::notification::{NotificationData, NotificationPayload, SignalementStatus};

/// Human-readable title/body pair for a status change.
fn content_for(status: SignalementStatus) -> (&'static str, &'static str) {
    match status {
        SignalementStatus::Approved => (
            "Signalement approved",
            "Your streetlight report has been approved and forwarded to the maintenance team.",
        ),
        SignalementStatus::Rejected => (
            "Signalement rejected",
            "Your streetlight report could not be accepted. Open the app for details.",
        ),
        SignalementStatus::Resolved => (
            "Streetlight repaired",
            "The outage you reported has been fixed. Thank you for your report!",
        ),
    }
}

/// Build the notification payload for one status change.
///
/// The `tag` is always `signalement-<id>` so that repeated status changes
/// on the same signalement collapse to one visible notification on the
/// receiving side rather than stacking.
pub fn build_payload(
    signalement_id: SignalementId,
    status: SignalementStatus,
    config: &PushConfig,
) -> NotificationPayload {
    let (title, body) = content_for(status);

    NotificationPayload {
        title: title.to_string(),
        body: body.to_string(),
        icon: config.icon_path.clone(),
        badge: config.badge_path.clone(),
        tag: format!("signalement-{signalement_id}"),
        data: NotificationData {
            signalement_id,
            status,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_is_derived_from_signalement_id() {
        let id = SignalementId::new();
        let payload = build_payload(id, SignalementStatus::Approved, &PushConfig::default());
        assert_eq!(payload.tag, format!("signalement-{id}"));
    }

    #[test]
    fn test_every_status_has_nonempty_content() {
        for status in [
            SignalementStatus::Approved,
            SignalementStatus::Rejected,
            SignalementStatus::Resolved,
        ] {
            let payload = build_payload(SignalementId::new(), status, &PushConfig::default());
            assert!(!payload.title.is_empty());
            assert!(!payload.body.is_empty());
            assert_eq!(payload.data.status, status);
        }
    }

    #[test]
    fn test_payload_serializes_with_wire_field_names() {
        let id = SignalementId::new();
        let payload = build_payload(id, SignalementStatus::Resolved, &PushConfig::default());
        let json = serde_json::to_value(&payload).unwrap();

        assert_eq!(json["data"]["signalement_id"], id.to_string());
        assert_eq!(json["data"]["status"], "resolved");
        assert!(json["icon"].as_str().unwrap().starts_with('/'));
        assert!(json["badge"].as_str().unwrap().starts_with('/'));
    }
}
