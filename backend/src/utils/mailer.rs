use async_trait::async_trait;
use lettre::{
    message::{header::ContentType, Mailbox},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use studio_shared::ContactSubmission;
use thiserror::Error;

use crate::config::SmtpConfig;

#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("invalid address: {0}")]
    Address(#[from] lettre::address::AddressError),
    #[error("failed to build message: {0}")]
    Message(#[from] lettre::error::Error),
    #[error("smtp error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),
}

/// Destination for accepted contact requests.
#[async_trait]
pub trait ContactSink: Send + Sync {
    async fn deliver(&self, submission: &ContactSubmission) -> Result<(), DeliveryError>;
}

/// Emails every request to the agency inbox, with reply-to set to the sender.
pub struct SmtpSink {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    inbox: Mailbox,
}

impl SmtpSink {
    /// Must run inside a Tokio runtime: the pooled transport spawns on drop.
    pub fn new(config: &SmtpConfig) -> Result<Self, DeliveryError> {
        // Addresses first, so a bad one fails before any transport exists.
        let from = config.from.parse()?;
        let inbox = config.inbox.parse()?;
        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)?
            .credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ))
            .build();
        Ok(Self { transport, from, inbox })
    }
}

#[async_trait]
impl ContactSink for SmtpSink {
    async fn deliver(&self, submission: &ContactSubmission) -> Result<(), DeliveryError> {
        let mut builder = Message::builder()
            .from(self.from.clone())
            .to(self.inbox.clone())
            .subject(subject_line(submission))
            .header(ContentType::TEXT_PLAIN);
        // The address already passed the lenient form check; lettre is stricter.
        match submission.email.trim().parse::<Mailbox>() {
            Ok(reply_to) => builder = builder.reply_to(reply_to),
            Err(e) => tracing::warn!("Not setting reply-to for {:?}: {}", submission.email, e),
        }
        let message = builder.body(render_body(submission))?;
        self.transport.send(message).await?;
        Ok(())
    }
}

/// Used when no SMTP server is configured, e.g. in local development.
pub struct LogSink;

#[async_trait]
impl ContactSink for LogSink {
    async fn deliver(&self, submission: &ContactSubmission) -> Result<(), DeliveryError> {
        tracing::info!(
            "Contact request (not emailed, SMTP not configured)\n{}",
            render_body(submission)
        );
        Ok(())
    }
}

pub fn subject_line(submission: &ContactSubmission) -> String {
    let name = submission.name.trim();
    match submission.company.trim() {
        "" => format!("Contact request from {}", name),
        company => format!("Contact request from {} ({})", name, company),
    }
}

pub fn render_body(submission: &ContactSubmission) -> String {
    fn or_dash(value: &str) -> &str {
        match value.trim() {
            "" => "-",
            v => v,
        }
    }

    format!(
        "Name: {}\nEmail: {}\nPhone: {}\nCompany: {}\nProject type: {}\nBudget: {}\nTimeline: {}\n\n{}\n",
        submission.name.trim(),
        submission.email.trim(),
        or_dash(&submission.phone),
        or_dash(&submission.company),
        submission.project_type.map_or("-", |p| p.as_str()),
        submission.budget.map_or("-", |b| b.as_str()),
        submission.timeline.map_or("-", |t| t.as_str()),
        submission.message.trim(),
    )
}
