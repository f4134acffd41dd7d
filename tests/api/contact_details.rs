use contact_relay::routes::ContactDetails;

use crate::helpers::{StubTransport, spawn_app, spawn_app_with};

#[tokio::test]
async fn contact_details_fall_back_to_the_recipient() {
    // Arrange
    let app = spawn_app().await;

    // Act
    let response = app.get("/api/contact").await;

    // Assert
    assert_eq!(response.status().as_u16(), 200);
    let details: ContactDetails = response.json().await.unwrap();
    assert_eq!(details.email, "owner@example.com");
}

#[tokio::test]
async fn contact_details_prefer_the_display_override() {
    // Arrange
    let app = spawn_app_with(StubTransport::default(), Some("hi@portfolio.dev")).await;

    // Act
    let response = app.get("/api/contact").await;

    // Assert
    let details: ContactDetails = response.json().await.unwrap();
    assert_eq!(details.email, "hi@portfolio.dev");
}
