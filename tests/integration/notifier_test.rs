//! Notifier Integration Tests
//!
//! Drives `NotifierService` with an in-memory host and checks the exact
//! requests that reach a mock Bot API.

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tracker_telegram::{
    DeliveryOutcome, Issue, Journal, JournalDetail, NotificationEvent, NotificationSink,
    NotifierService, NotifierSettings, Project, SuppressReason,
};
use tracker_telegram_core::{Attachment, InMemoryDirectory, ReferenceKind};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ============================================================================
// Fixtures
// ============================================================================

fn settings(api_base: &str) -> NotifierSettings {
    NotifierSettings {
        telegram_bot_token: "global-token".to_string(),
        channel: "-100general".to_string(),
        host_name: "tracker.example".to_string(),
        protocol: "https".to_string(),
        api_base: api_base.to_string(),
        ..Default::default()
    }
}

/// Company > Web > Frontend
fn directory() -> InMemoryDirectory {
    InMemoryDirectory::new()
        .with_project(Project::new(1, "Company"))
        .with_project(Project::new(2, "Web").with_parent(1))
        .with_project(Project::new(3, "Frontend").with_parent(2))
        .with_custom_value(2, "Telegram Channel", "-100web")
        .with_custom_value(1, "Telegram BOT Token", "company-token")
        .with_label(ReferenceKind::Status, 2, "In Progress")
        .with_label(ReferenceKind::User, 3, "Bob")
        .with_custom_field(7, "Severity")
        .with_attachment(Attachment {
            id: 9,
            filename: "log.txt".to_string(),
        })
}

fn issue(project: Project) -> Issue {
    Issue {
        id: 42,
        project,
        tracker: "Bug".to_string(),
        status: "New".to_string(),
        subject: "Login [500]".to_string(),
        description: Some("Broken since deploy @bob @carol @bob".to_string()),
        author: "alice".to_string(),
    }
}

async fn mock_api(token: &str) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("/bot{}/sendMessage", token)))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"ok": true})))
        .mount(&server)
        .await;
    server
}

async fn sent_bodies(server: &MockServer) -> Vec<Value> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .map(|r| serde_json::from_slice(&r.body).unwrap())
        .collect()
}

fn service(server: &MockServer, directory: InMemoryDirectory) -> NotifierService {
    NotifierService::new(Arc::new(settings(&server.uri())), Arc::new(directory)).unwrap()
}

// ============================================================================
// Created
// ============================================================================

#[tokio::test]
async fn test_created_event_end_to_end() {
    let server = mock_api("company-token").await;
    let svc = service(&server, directory());

    let project = Project::new(3, "Frontend").with_parent(2);
    let outcome = svc
        .notify(&NotificationEvent::Created {
            issue: issue(project),
        })
        .await;
    assert_eq!(outcome, DeliveryOutcome::Sent);

    let bodies = sent_bodies(&server).await;
    assert_eq!(bodies.len(), 1);
    assert_eq!(bodies[0]["chat_id"], "-100web");
    assert_eq!(bodies[0]["parse_mode"], "Markdown");
    assert_eq!(
        bodies[0]["text"],
        "*[Frontend]* _alice_ created [Bug #42: Login \\[500\\]](https://tracker.example/issues/42)\nTo: bob, carol"
    );
}

#[tokio::test]
async fn test_event_project_without_parent_still_inherits() {
    let server = mock_api("company-token").await;
    let svc = service(&server, directory());

    // The event carries only the project's id and name
    let outcome = svc
        .notify(&NotificationEvent::Created {
            issue: issue(Project::new(3, "Frontend")),
        })
        .await;
    assert_eq!(outcome, DeliveryOutcome::Sent);
    assert_eq!(sent_bodies(&server).await[0]["chat_id"], "-100web");
}

#[tokio::test]
async fn test_created_uses_global_defaults_outside_configured_tree() {
    let server = mock_api("global-token").await;
    let dir = directory().with_project(Project::new(10, "Standalone"));
    let svc = service(&server, dir);

    let mut issue = issue(Project::new(10, "Standalone"));
    issue.description = None;
    let outcome = svc.notify(&NotificationEvent::Created { issue }).await;
    assert_eq!(outcome, DeliveryOutcome::Sent);

    let bodies = sent_bodies(&server).await;
    assert_eq!(bodies[0]["chat_id"], "-100general");
    assert!(!bodies[0]["text"].as_str().unwrap().contains("To:"));
}

// ============================================================================
// Edited
// ============================================================================

#[tokio::test]
async fn test_edited_event_end_to_end() {
    let server = mock_api("company-token").await;
    let svc = service(&server, directory());

    let journal = Journal {
        id: 77,
        user: "dave".to_string(),
        notes: Some("Fixed in r123, @alice please verify".to_string()),
        details: vec![
            JournalDetail::attr("status_id", "2"),
            JournalDetail::attr("assigned_to_id", "3"),
            JournalDetail::custom_field(7, "High"),
            JournalDetail::attachment(9, "log.txt"),
            JournalDetail::attr("priority_id", "999"),
        ],
    };
    let outcome = svc
        .notify(&NotificationEvent::Edited {
            issue: issue(Project::new(2, "Web").with_parent(1)),
            journal,
        })
        .await;
    assert_eq!(outcome, DeliveryOutcome::Sent);

    let bodies = sent_bodies(&server).await;
    let expected = [
        "*[Web]* _dave_ updated [Login \\[500\\]](https://tracker.example/issues/42#change-77)\nTo: alice",
        "Fixed in r123, @alice please verify",
        "> *Status:* In Progress",
        "> *Assignee:* Bob",
        "> *Severity:* High",
        "> *File:* [log.txt](https://tracker.example/attachments/9)",
        "> *Priority:* 999",
    ]
    .join("\r\n");
    assert_eq!(bodies[0]["text"], expected);
    assert_eq!(bodies[0]["chat_id"], "-100web");
}

// ============================================================================
// Suppression and failure
// ============================================================================

#[tokio::test]
async fn test_dash_on_ancestor_sends_nothing() {
    let server = mock_api("company-token").await;
    let dir = directory().with_custom_value(2, "Telegram Channel", "-");
    let svc = service(&server, dir);

    for project in [Project::new(3, "Frontend").with_parent(2), Project::new(3, "Frontend")] {
        let outcome = svc
            .notify(&NotificationEvent::Created {
                issue: issue(project),
            })
            .await;
        assert_eq!(outcome, DeliveryOutcome::Suppressed(SuppressReason::NoChannel));
    }
    assert!(sent_bodies(&server).await.is_empty());
}

#[tokio::test]
async fn test_api_error_is_reported_not_raised() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(403).set_body_string("bot was kicked"))
        .mount(&server)
        .await;
    let svc = service(&server, directory());

    let outcome = svc
        .notify(&NotificationEvent::Created {
            issue: issue(Project::new(2, "Web").with_parent(1)),
        })
        .await;
    match outcome {
        DeliveryOutcome::Failed(e) => assert!(e.contains("403")),
        other => panic!("unexpected outcome: {other:?}"),
    }
}

#[tokio::test]
async fn test_unreachable_api_is_reported_not_raised() {
    let settings = settings("http://127.0.0.1:9");
    let svc = NotifierService::new(Arc::new(settings), Arc::new(directory())).unwrap();
    let outcome = svc
        .notify(&NotificationEvent::Created {
            issue: issue(Project::new(2, "Web").with_parent(1)),
        })
        .await;
    assert!(matches!(outcome, DeliveryOutcome::Failed(_)));
}

// ============================================================================
// Host hook
// ============================================================================

#[tokio::test]
async fn test_sink_hooks_send_both_events() {
    let server = mock_api("company-token").await;
    let svc = service(&server, directory());
    let sink: &dyn NotificationSink = &svc;

    let issue = issue(Project::new(2, "Web").with_parent(1));
    sink.on_issue_created(&issue);
    sink.on_issue_updated(
        &issue,
        &Journal {
            id: 1,
            user: "dave".to_string(),
            notes: Some("ack".to_string()),
            details: vec![],
        },
    );

    for _ in 0..100 {
        if sent_bodies(&server).await.len() >= 2 {
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }

    let mut texts: Vec<String> = sent_bodies(&server)
        .await
        .iter()
        .map(|b| b["text"].as_str().unwrap_or_default().to_string())
        .collect();
    texts.sort();
    assert_eq!(texts.len(), 2);
    assert!(texts[0].contains(" created "));
    assert!(texts[1].contains(" updated "));
}
