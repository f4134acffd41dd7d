use lettre::{Address, message::Mailbox};

use super::Submission;

/// The email relayed to the site owner for one contact submission.
///
/// Sender and recipient mailboxes belong to the transport configuration,
/// so only the per-request content lives here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage {
    pub subject: String,
    pub text_body: String,
    pub html_body: String,
    pub reply_to: Option<Mailbox>,
}

impl OutboundMessage {
    pub fn from_submission(submission: &Submission) -> Self {
        let Submission {
            name,
            email,
            message,
        } = submission;

        let subject = format!("New Contact Form Submission from {}", name);
        let text_body = format!(
            "Name: {}\nEmail: {}\n\nMessage:\n{}\n",
            name, email, message
        );
        let html_body = format!(
            "<h3>New Contact Form Submission</h3>\
             <p><strong>Name:</strong> {}</p>\
             <p><strong>Email:</strong> {}</p>\
             <p><strong>Message:</strong></p>\
             <p>{}</p>",
            ammonia::clean_text(name),
            ammonia::clean_text(email),
            html_paragraph(message),
        );
        // The visitor's address is only a reply hint; a weird one must not block delivery.
        let reply_to = email
            .trim()
            .parse::<Address>()
            .ok()
            .map(|address| Mailbox::new(Some(name.trim().to_owned()), address));

        Self {
            subject,
            text_body,
            html_body,
            reply_to,
        }
    }
}

/// Escape `text` and render its line breaks as `<br>`.
fn html_paragraph(text: &str) -> String {
    text.split('\n')
        .map(|line| ammonia::clean_text(line.strip_suffix('\r').unwrap_or(line)))
        .collect::<Vec<_>>()
        .join("<br>")
}
