//! Announcements and minutes fan out one notification per user and a real-time event.

mod common;

use std::sync::Arc;

use crate::common::TestHarness;
use portal_core::common::{Actor, NotificationId, PortalError, Role, UserId};
use portal_core::domains::announcements::activities::post_announcement;
use portal_core::domains::announcements::AnnouncementForm;
use portal_core::domains::meetings::activities::post_meeting_note;
use portal_core::domains::meetings::{Attachment, MeetingNoteForm};
use portal_core::domains::notifications::activities::{fetch_unread, list_notifications, mark_read};
use portal_core::domains::notifications::Notification;
use portal_core::kernel::{FailingNotifier, MockNotifier};
use test_context::test_context;

fn announcement(title: &str) -> AnnouncementForm {
    AnnouncementForm {
        title: title.to_string(),
        message: "Bring your passbooks.".to_string(),
    }
}

async fn notifications_with_link(ctx: &TestHarness, link: &str) -> Vec<Notification> {
    sqlx::query_as::<_, Notification>("SELECT * FROM notifications WHERE link = $1")
        .bind(link)
        .fetch_all(&ctx.db_pool)
        .await
        .unwrap()
}

#[test_context(TestHarness)]
#[tokio::test]
async fn announcement_notifies_every_user_once(ctx: &TestHarness) {
    let coordinator = ctx.user("coordinator", Role::Coordinator).await;
    let members = [
        ctx.user("amina", Role::Member).await,
        ctx.user("baraka", Role::Member).await,
        ctx.user("admin", Role::Admin).await,
    ];
    let mut rx = ctx.hub.subscribe();

    let posted = post_announcement(ctx.actor(&coordinator), announcement("AGM on Saturday"), &ctx.deps)
        .await
        .unwrap();

    let link = format!("/announcements/{}/", posted.data.id);
    let rows = notifications_with_link(ctx, &link).await;
    assert_eq!(rows.len(), members.len() + 1);
    for row in &rows {
        assert_eq!(row.title, "New Announcement");
        assert_eq!(row.message, "AGM on Saturday");
        assert!(!row.is_read);
    }

    let mut recipients: Vec<_> = rows.iter().map(|row| row.recipient_id).collect();
    recipients.sort();
    recipients.dedup();
    assert_eq!(recipients.len(), rows.len());

    let event = rx.try_recv().unwrap();
    assert_eq!(event.title, "New Announcement");
    assert_eq!(event.link, link);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn broadcast_failure_keeps_announcement(ctx: &TestHarness) {
    let coordinator = ctx.user("coordinator", Role::Coordinator).await;
    ctx.user("amina", Role::Member).await;
    let deps = ctx.deps_with_notifier(Arc::new(FailingNotifier));

    let posted = post_announcement(ctx.actor(&coordinator), announcement("Dues reminder"), &deps)
        .await
        .unwrap();

    let rows = notifications_with_link(ctx, &format!("/announcements/{}/", posted.data.id)).await;
    assert_eq!(rows.len(), 2);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn only_coordinator_announces(ctx: &TestHarness) {
    let secretary = ctx.user("secretary", Role::Secretary).await;

    let err = post_announcement(ctx.actor(&secretary), announcement("Unofficial"), &ctx.deps)
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Only the Coordinator can create announcements.");

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM notifications")
        .fetch_one(&ctx.db_pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn minutes_link_to_attachment(ctx: &TestHarness) {
    let secretary = ctx.user("secretary", Role::Secretary).await;
    ctx.user("amina", Role::Member).await;
    let notifier = MockNotifier::new();
    let deps = ctx.deps_with_notifier(Arc::new(notifier.clone()));

    let form = MeetingNoteForm {
        title: "March meeting".to_string(),
        description: "Monthly".to_string(),
        content: "Quorum reached.".to_string(),
        attachment: Some(Attachment {
            file_name: "march minutes.pdf".to_string(),
            bytes: b"%PDF-1.4".to_vec(),
        }),
    };
    let posted = post_meeting_note(ctx.actor(&secretary), form, &deps).await.unwrap();

    let file_url = posted.data.file_url.clone().unwrap();
    assert!(file_url.starts_with("/media/minutes/"));
    assert!(file_url.ends_with("-march_minutes.pdf"));

    let relative = file_url.trim_start_matches("/media/");
    let stored = tokio::fs::read(ctx.media_root.join(relative)).await.unwrap();
    assert_eq!(stored, b"%PDF-1.4");

    let rows = notifications_with_link(ctx, &file_url).await;
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|row| row.title == "New Meeting Note"));
    assert!(notifier.was_sent_with_title("New Meeting Note"));
}

#[test_context(TestHarness)]
#[tokio::test]
async fn failed_minutes_leave_no_attachment(ctx: &TestHarness) {
    ctx.user("amina", Role::Member).await;
    // Secretary with no users row: the note insert violates its foreign key
    let ghost = Actor::new(UserId::new(), Role::Secretary);

    let form = MeetingNoteForm {
        title: "May meeting".to_string(),
        attachment: Some(Attachment {
            file_name: "may.pdf".to_string(),
            bytes: b"%PDF-1.4".to_vec(),
        }),
        ..Default::default()
    };
    let result = post_meeting_note(ghost, form, &ctx.deps).await;
    assert!(result.is_err());

    let mut entries = tokio::fs::read_dir(ctx.media_root.join("minutes")).await.unwrap();
    assert!(entries.next_entry().await.unwrap().is_none());

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM notifications")
        .fetch_one(&ctx.db_pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn minutes_without_attachment_link_to_detail(ctx: &TestHarness) {
    let secretary = ctx.user("secretary", Role::Secretary).await;
    let form = MeetingNoteForm {
        title: "April meeting".to_string(),
        ..Default::default()
    };

    let posted = post_meeting_note(ctx.actor(&secretary), form, &ctx.deps)
        .await
        .unwrap();

    assert_eq!(posted.data.file_url, None);
    let rows = notifications_with_link(ctx, &format!("/minutes/{}/", posted.data.id)).await;
    assert_eq!(rows.len(), 1);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn inbox_read_and_unread(ctx: &TestHarness) {
    let coordinator = ctx.user("coordinator", Role::Coordinator).await;
    let member = ctx.user("amina", Role::Member).await;
    let other = ctx.user("baraka", Role::Member).await;

    for title in ["First", "Second"] {
        post_announcement(ctx.actor(&coordinator), announcement(title), &ctx.deps)
            .await
            .unwrap();
    }

    let inbox = list_notifications(member.id, &ctx.deps).await.unwrap();
    assert_eq!(inbox.notifications.len(), 2);
    assert_eq!(inbox.unread_count, 2);
    assert_eq!(inbox.notifications[0].message, "Second");

    let target = inbox.notifications[0].id;

    // Someone else's notification is indistinguishable from a missing one
    let err = mark_read(other.id, target, &ctx.deps).await.unwrap_err();
    assert!(matches!(err, PortalError::NotFound(_)));
    let err = mark_read(member.id, NotificationId::new(), &ctx.deps)
        .await
        .unwrap_err();
    assert!(matches!(err, PortalError::NotFound(_)));

    let read = mark_read(member.id, target, &ctx.deps).await.unwrap();
    assert!(read.is_read);

    let unread = fetch_unread(member.id, &ctx.deps).await.unwrap();
    assert_eq!(unread.unread_count, 1);
    assert_eq!(unread.notifications.len(), 1);
    assert_eq!(unread.notifications[0].message, "First");

    let untouched = fetch_unread(other.id, &ctx.deps).await.unwrap();
    assert_eq!(untouched.unread_count, 2);
}
