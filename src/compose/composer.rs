use serde::Serialize;

use crate::error::AppResult;
use crate::transport::SendChannel;

use super::descriptor::Descriptor;
use super::options::{DeliveryOptions, OptionsPatch};
use super::part::Part;
use super::pipeline;

/// Accumulated state for exactly one outgoing message. Consumed by one send,
/// never reused.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PendingMessage {
    parts: Vec<Part>,
}

impl PendingMessage {
    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }
}

/// Snapshot handed to the channel: headers resolved at send time plus the
/// full ordered part list.
#[derive(Debug, Clone, PartialEq)]
pub struct FinalizedMessage {
    pub from: String,
    pub to: Vec<String>,
    pub subject: String,
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SendReceipt {
    pub to: Vec<String>,
    pub subject: String,
    pub parts: usize,
    pub note: String,
}

pub struct MessageComposer<C> {
    channel: C,
    from: String,
    defaults: DeliveryOptions,
    pending: PendingMessage,
}

impl<C: SendChannel> MessageComposer<C> {
    pub fn new(channel: C, from: impl Into<String>, defaults: DeliveryOptions) -> Self {
        Self {
            channel,
            from: from.into(),
            defaults,
            pending: PendingMessage::default(),
        }
    }

    pub fn pending(&self) -> &PendingMessage {
        &self.pending
    }

    pub fn add_text(&mut self, text: impl Into<String>, options: Option<OptionsPatch>) {
        let mut descriptor = Descriptor::text(text);
        if let Some(patch) = options {
            descriptor = descriptor.with_options(patch);
        }
        self.add_attachments([descriptor]);
    }

    pub fn add_attachments<I>(&mut self, batch: I)
    where
        I: IntoIterator<Item = Descriptor>,
    {
        let parts = pipeline::process(batch, &self.defaults);
        self.pending.parts.extend(parts);
    }

    /// Finalize and deliver: body first, accumulated parts in order, then the
    /// signature. The pending state is reset whether delivery succeeds or
    /// fails; a failed message is reported, not kept around.
    pub async fn send(
        &mut self,
        to: &[String],
        subject: &str,
        body: &str,
        signature: &str,
    ) -> AppResult<SendReceipt> {
        let pending = std::mem::take(&mut self.pending);

        let mut parts = Vec::with_capacity(pending.parts.len() + 2);
        parts.push(Part::plain(format!("{body}\n")));
        parts.extend(pending.parts);
        parts.push(Part::plain(signature));

        let message = FinalizedMessage {
            from: self.from.clone(),
            to: to.to_vec(),
            subject: subject.to_string(),
            parts,
        };
        let part_count = message.parts.len();

        match self.channel.deliver(&message).await {
            Ok(()) => {
                tracing::info!(to = ?message.to, subject = %message.subject, "message sent");
                Ok(SendReceipt {
                    to: message.to,
                    subject: message.subject,
                    parts: part_count,
                    note: "message accepted by smtp server".to_string(),
                })
            }
            Err(err) => {
                tracing::error!(error = %err, "message delivery failed");
                Err(err)
            }
        }
    }

    /// Release the transport connection. Dropping the composer has the same
    /// effect; this makes the release point explicit.
    pub fn close(self) {
        drop(self.channel);
    }
}
