use std::{sync::Arc, time::Duration};

use axum::{
    Router,
    extract::Request,
    response::Response,
    routing::{get, post},
    serve::Serve,
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{Span, field::Empty, info, info_span};
use uuid::Uuid;

use crate::{
    configuration::Settings,
    email_client::{MailTransport, SmtpEmailClient},
    routes::{contact_details, health_check, send_email},
};

pub struct AppState {
    pub email_client: Box<dyn MailTransport>,
    pub contact_email: String,
}

pub fn run(
    listener: TcpListener,
    email_client: Box<dyn MailTransport>,
    contact_email: String,
) -> Serve<TcpListener, Router, Router> {
    // Shared across handlers; the transport itself is never cloned.
    let app_state = Arc::new(AppState {
        email_client,
        contact_email,
    });
    let app = Router::new()
        .route("/health_check", get(health_check))
        .route("/api/send-email", post(send_email))
        .route("/api/contact", get(contact_details))
        .with_state(app_state)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<_>| {
                    let request_id = Uuid::new_v4();
                    info_span!(
                        "http_request",
                        method = ?request.method(),
                        uri = ?request.uri(),
                        version = ?request.version(),
                        request_id = ?request_id,
                        status = Empty,
                    )
                })
                .on_response(|response: &Response, latency: Duration, span: &Span| {
                    let status = response.status();
                    span.record("status", status.as_u16());
                    info!(parent: span, ?status, ?latency, "Response sent");
                }),
        );

    axum::serve(listener, app)
}

pub struct Application {
    port: u16,
    server: Serve<TcpListener, Router, Router>,
}

impl Application {
    pub async fn build(configuration: Settings) -> anyhow::Result<Self> {
        let email_client = SmtpEmailClient::new(&configuration.email_client)?;
        Self::build_with_transport(configuration, email_client).await
    }

    /// Like [`Application::build`], relaying through `email_client` instead of SMTP.
    pub async fn build_with_transport(
        configuration: Settings,
        email_client: impl MailTransport + 'static,
    ) -> anyhow::Result<Self> {
        let contact_email = configuration
            .application
            .contact_email
            .unwrap_or(configuration.email_client.recipient_email);

        let listener = TcpListener::bind(format!(
            "{}:{}",
            configuration.application.host, configuration.application.port
        ))
        .await?;
        let port = listener.local_addr()?.port();
        info!(port, "Listening for contact submissions");

        let server = run(listener, Box::new(email_client), contact_email);

        Ok(Self { port, server })
    }

    pub async fn run_until_stopped(self) -> anyhow::Result<()> {
        Ok(self.server.await?)
    }

    pub fn port(&self) -> u16 {
        self.port
    }
}
