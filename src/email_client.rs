use async_trait::async_trait;
use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    address::AddressError,
    message::{Mailbox, MultiPart},
    transport::smtp::{
        authentication::Credentials,
        client::{Tls, TlsParameters},
    },
};
use secrecy::ExposeSecret;

use crate::{configuration::EmailClientSettings, domain::OutboundMessage};

#[derive(thiserror::Error, Debug)]
pub enum TransportError {
    #[error("invalid mailbox address, {0}")]
    Address(#[from] AddressError),
    #[error("couldn't build the email, {0}")]
    Message(#[from] lettre::error::Error),
    #[error("mail relay refused or failed the delivery, {0}")]
    Relay(#[from] lettre::transport::smtp::Error),
}

/// Delivers one message to the site owner. Exactly one attempt per call.
#[async_trait]
pub trait MailTransport: Send + Sync {
    async fn send(&self, message: OutboundMessage) -> Result<(), TransportError>;
}

pub struct SmtpEmailClient {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    sender: Mailbox,
    recipient: Mailbox,
}

impl SmtpEmailClient {
    pub fn new(settings: &EmailClientSettings) -> Result<Self, TransportError> {
        let sender = settings.sender()?;
        let recipient = settings.recipient()?;

        let secure = settings.is_secure();
        if secure != settings.port_implies_secure() {
            tracing::warn!(
                port = settings.port,
                secure,
                "secure flag does not match the relay port, the TLS handshake will likely fail"
            );
        }

        let tls_parameters = TlsParameters::new(settings.host.clone())?;
        let tls = if secure {
            Tls::Wrapper(tls_parameters)
        } else {
            Tls::Opportunistic(tls_parameters)
        };

        let credentials = Credentials::new(
            settings.username.clone(),
            settings.password.expose_secret().to_owned(),
        );

        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&settings.host)
            .port(settings.port)
            .tls(tls)
            .credentials(credentials);
        if let Some(timeout) = settings.timeout() {
            builder = builder.timeout(Some(timeout));
        }

        Ok(Self {
            transport: builder.build(),
            sender,
            recipient,
        })
    }

    fn build_email(&self, message: OutboundMessage) -> Result<Message, TransportError> {
        let OutboundMessage {
            subject,
            text_body,
            html_body,
            reply_to,
        } = message;

        let mut builder = Message::builder()
            .from(self.sender.clone())
            .to(self.recipient.clone())
            .subject(subject);
        if let Some(reply_to) = reply_to {
            builder = builder.reply_to(reply_to);
        }

        Ok(builder.multipart(MultiPart::alternative_plain_html(text_body, html_body))?)
    }
}

#[async_trait]
impl MailTransport for SmtpEmailClient {
    #[tracing::instrument(
        name = "Relaying email over SMTP",
        skip(self, message),
        fields(subject = %message.subject)
    )]
    async fn send(&self, message: OutboundMessage) -> Result<(), TransportError> {
        let email = self.build_email(message)?;
        self.transport.send(email).await?;
        Ok(())
    }
}
