// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for notification inboxes.

use rota_domain::DomainError;

use super::{seed_employee, seed_manager};
use crate::{Persistence, PersistenceError};

#[test]
fn test_inbox_is_newest_first() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let (alice, _) = seed_employee(&mut persistence, "alice@example.com");

    let first = persistence.insert_notification(alice.id, "first").unwrap();
    let second = persistence.insert_notification(alice.id, "second").unwrap();

    let inbox = persistence.list_notifications_for_user(alice.id).unwrap();
    let ids: Vec<i64> = inbox.iter().map(|n| n.id).collect();
    assert_eq!(ids, vec![second.id, first.id]);
}

#[test]
fn test_inboxes_are_per_user() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let (alice, _) = seed_employee(&mut persistence, "alice@example.com");
    let manager = seed_manager(&mut persistence);

    persistence.insert_notification(alice.id, "hello").unwrap();

    assert_eq!(persistence.list_notifications_for_user(alice.id).unwrap().len(), 1);
    assert!(persistence.list_notifications_for_user(manager.id).unwrap().is_empty());
}

#[test]
fn test_notify_unknown_user_is_foreign_key_violation() {
    let mut persistence = Persistence::new_in_memory().unwrap();

    let result = persistence.insert_notification(12_345, "hello");

    assert!(matches!(
        result,
        Err(PersistenceError::ForeignKeyViolation(_))
    ));
}

#[test]
fn test_blank_message_is_rejected_and_not_stored() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let (alice, _) = seed_employee(&mut persistence, "alice@example.com");

    for message in ["", "   "] {
        assert_eq!(
            persistence.insert_notification(alice.id, message),
            Err(PersistenceError::Rejected(
                DomainError::EmptyNotificationMessage
            ))
        );
    }

    assert!(persistence.list_notifications_for_user(alice.id).unwrap().is_empty());
}

#[test]
fn test_owner_can_mark_read() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let (alice, _) = seed_employee(&mut persistence, "alice@example.com");
    let notification = persistence.insert_notification(alice.id, "hello").unwrap();

    let updated = persistence
        .mark_notification_read(notification.id, alice.id)
        .unwrap();

    assert!(updated.read);
    assert_eq!(updated.id, notification.id);

    // Marking again is harmless
    assert!(
        persistence
            .mark_notification_read(notification.id, alice.id)
            .unwrap()
            .read
    );
}

#[test]
fn test_non_owner_cannot_mark_read() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let (alice, _) = seed_employee(&mut persistence, "alice@example.com");
    let (mallory, _) = seed_employee(&mut persistence, "mallory@example.com");
    let notification = persistence.insert_notification(alice.id, "hello").unwrap();

    let result = persistence.mark_notification_read(notification.id, mallory.id);

    assert_eq!(
        result,
        Err(PersistenceError::NotFound(String::from(
            "Notification not found or does not belong to user"
        )))
    );
    let stored = persistence
        .get_notification(notification.id)
        .unwrap()
        .unwrap();
    assert!(!stored.read);
}

#[test]
fn test_mark_read_of_missing_notification_is_not_found() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let (alice, _) = seed_employee(&mut persistence, "alice@example.com");

    let result = persistence.mark_notification_read(77, alice.id);

    assert!(matches!(result, Err(PersistenceError::NotFound(_))));
}
