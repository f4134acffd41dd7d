use std::time::Duration;

use contact_relay::{
    client::{
        ContactApiClient, ContactForm, FAILURE_TITLE, NotificationCenter, NotificationKind,
        Outcome, SUCCESS_TITLE,
    },
    domain::{Field, Submission},
};
use serde_json::json;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{any, body_json, method, path},
};

use crate::helpers::{StubTransport, spawn_app, spawn_app_with};

fn fill(form: &ContactForm, name: &str, email: &str, message: &str) {
    form.set_field(Field::Name, name);
    form.set_field(Field::Email, email);
    form.set_field(Field::Message, message);
}

#[tokio::test]
async fn invalid_submissions_never_reach_the_network() {
    // Arrange
    let mock_server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;
    let notifications = NotificationCenter::new();
    let form = ContactForm::new(ContactApiClient::new(mock_server.uri()), notifications.clone());
    let test_cases = [
        ("", "a@b.com", "hi"),
        ("A", "", "hi"),
        ("A", "a@b.com", ""),
        ("A", "ab.com", "hi"),
        ("A", "a@b", "hi"),
    ];

    for (name, email, message) in test_cases {
        fill(&form, name, email, message);

        // Act
        let outcome = form.submit().await;

        // Assert
        assert!(
            matches!(outcome, Outcome::Invalid(ref errors) if !errors.is_empty()),
            "{:?} should have been rejected locally",
            (name, email, message)
        );
    }
    assert!(notifications.notifications().is_empty());
}

#[tokio::test]
async fn valid_submission_is_posted_once_and_clears_the_form() {
    // Arrange
    let mock_server = MockServer::start().await;
    Mock::given(path("/api/send-email"))
        .and(method("POST"))
        .and(body_json(json!({"name": "A", "email": "a@b.com", "message": "hi"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&mock_server)
        .await;
    let notifications = NotificationCenter::new();
    let _surface = notifications.acquire().unwrap();
    let form = ContactForm::new(ContactApiClient::new(mock_server.uri()), notifications.clone());
    fill(&form, "A", "a@b.com", "hi");

    // Act
    let outcome = form.submit().await;

    // Assert
    assert_eq!(outcome, Outcome::Sent);
    assert_eq!(form.values(), Submission::default());
    let shown = notifications.notifications();
    assert_eq!(shown.len(), 1);
    assert_eq!(shown[0].kind, NotificationKind::Success);
    assert_eq!(shown[0].title, SUCCESS_TITLE);
    assert!(!form.is_submitting());
}

#[tokio::test]
async fn rejected_submission_keeps_the_values_and_shows_one_failure() {
    for (status, error) in [(400, "Name, email, and message are required"), (500, "Failed to send email")] {
        // Arrange
        let mock_server = MockServer::start().await;
        Mock::given(path("/api/send-email"))
            .respond_with(ResponseTemplate::new(status).set_body_json(json!({"error": error})))
            .expect(1)
            .mount(&mock_server)
            .await;
        let notifications = NotificationCenter::new();
        let _surface = notifications.acquire().unwrap();
        let form =
            ContactForm::new(ContactApiClient::new(mock_server.uri()), notifications.clone());
        fill(&form, "A", "a@b.com", "hi");

        // Act
        let outcome = form.submit().await;

        // Assert
        assert_eq!(outcome, Outcome::Failed(error.to_string()));
        assert_eq!(form.values(), Submission::new("A", "a@b.com", "hi"));
        let shown = notifications.notifications();
        assert_eq!(shown.len(), 1, "the pending notification must be replaced, not stacked");
        assert_eq!(shown[0].kind, NotificationKind::Failure);
        assert_eq!(shown[0].title, FAILURE_TITLE);
        assert_eq!(shown[0].description.as_deref(), Some(error));
    }
}

#[tokio::test]
async fn repeated_submissions_leave_a_single_notification() {
    // Arrange
    let mock_server = MockServer::start().await;
    Mock::given(path("/api/send-email"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"error": "Failed to send email"})))
        .expect(5)
        .mount(&mock_server)
        .await;
    let notifications = NotificationCenter::new();
    let _surface = notifications.acquire().unwrap();
    let form = ContactForm::new(ContactApiClient::new(mock_server.uri()), notifications.clone());
    fill(&form, "A", "a@b.com", "hi");

    for _ in 0..5 {
        // Act
        let outcome = form.submit().await;

        // Assert
        assert_eq!(outcome, Outcome::Failed("Failed to send email".to_string()));
        assert_eq!(notifications.notifications().len(), 1);
    }
}

#[tokio::test]
async fn submitting_without_a_mounted_surface_shows_nothing() {
    // Arrange
    let mock_server = MockServer::start().await;
    Mock::given(path("/api/send-email"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&mock_server)
        .await;
    let notifications = NotificationCenter::new();
    let form = ContactForm::new(ContactApiClient::new(mock_server.uri()), notifications.clone());
    fill(&form, "A", "a@b.com", "hi");

    // Act
    let outcome = form.submit().await;

    // Assert
    assert_eq!(outcome, Outcome::Sent);
    assert!(notifications.notifications().is_empty());
}

#[tokio::test]
async fn a_second_submit_while_in_flight_is_ignored() {
    // Arrange
    let mock_server = MockServer::start().await;
    Mock::given(path("/api/send-email"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"success": true}))
                .set_delay(Duration::from_millis(300)),
        )
        .expect(1)
        .mount(&mock_server)
        .await;
    let notifications = NotificationCenter::new();
    let _surface = notifications.acquire().unwrap();
    let form = ContactForm::new(ContactApiClient::new(mock_server.uri()), notifications.clone());
    fill(&form, "A", "a@b.com", "hi");

    // Act
    let second = async {
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(form.is_submitting());
        form.submit().await
    };
    let (first, second) = tokio::join!(form.submit(), second);

    // Assert
    assert_eq!(first, Outcome::Sent);
    assert_eq!(second, Outcome::AlreadySubmitting);
    assert_eq!(notifications.notifications().len(), 1);
}

#[tokio::test]
async fn late_response_after_the_surface_is_released_is_harmless() {
    // Arrange
    let mock_server = MockServer::start().await;
    Mock::given(path("/api/send-email"))
        .respond_with(ResponseTemplate::new(500).set_delay(Duration::from_millis(200)))
        .expect(1)
        .mount(&mock_server)
        .await;
    let notifications = NotificationCenter::new();
    let surface = notifications.acquire().unwrap();
    let form = ContactForm::new(ContactApiClient::new(mock_server.uri()), notifications.clone());
    fill(&form, "A", "a@b.com", "hi");

    // Act
    let teardown = async {
        tokio::time::sleep(Duration::from_millis(50)).await;
        drop(surface);
    };
    let (outcome, ()) = tokio::join!(form.submit(), teardown);

    // Assert
    assert_eq!(outcome, Outcome::Failed("Failed to send message".to_string()));
    assert!(notifications.notifications().is_empty());
    assert!(!notifications.is_mounted());
}

#[tokio::test]
async fn form_and_handler_work_end_to_end() {
    // Arrange
    let app = spawn_app().await;
    let notifications = NotificationCenter::new();
    let form = ContactForm::new(ContactApiClient::new(&app.address), notifications.clone());
    fill(&form, "Ada", "ada@example.com", "line one\nline two");

    // Act
    let outcome = form.submit().await;

    // Assert
    assert_eq!(outcome, Outcome::Sent);
    let sent = app.email_client.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].html_body.matches("<br>").count(), 1);
    assert!(!sent[0].html_body.contains('\n'));
}

#[tokio::test]
async fn form_surfaces_the_generic_server_error_end_to_end() {
    // Arrange
    let app = spawn_app_with(StubTransport::failing(), None).await;
    let notifications = NotificationCenter::new();
    let _surface = notifications.acquire().unwrap();
    let form = ContactForm::new(ContactApiClient::new(&app.address), notifications.clone());
    fill(&form, "Ada", "ada@example.com", "hi");

    // Act
    let outcome = form.submit().await;

    // Assert
    assert_eq!(outcome, Outcome::Failed("Failed to send email".to_string()));
    assert_eq!(form.values().name, "Ada");
    let shown = notifications.notifications();
    assert_eq!(shown.len(), 1);
    assert_eq!(shown[0].description.as_deref(), Some("Failed to send email"));
}
