use std::time::Duration;

use lettre::address::Envelope;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Address, AsyncSmtpTransport, AsyncTransport, Tokio1Executor};

use crate::compose::composer::FinalizedMessage;
use crate::compose::mime;
use crate::error::{AppError, AppResult};

use super::SendChannel;

/// STARTTLS SMTP channel. The pooled connection is released when the channel
/// is dropped.
pub struct SmtpChannel {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    sender: Address,
}

impl SmtpChannel {
    /// Connect and authenticate against the relay. Any failure here is fatal
    /// to construction; there is no retry.
    pub async fn connect(
        host: &str,
        port: u16,
        address: &str,
        password: &str,
        timeout: Duration,
    ) -> AppResult<Self> {
        let sender: Address = address.parse()?;
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)?
            .port(port)
            .credentials(Credentials::new(address.to_string(), password.to_string()))
            .timeout(Some(timeout))
            .build();

        if !transport.test_connection().await? {
            return Err(AppError::Auth(format!(
                "smtp server {host}:{port} rejected the connection"
            )));
        }

        tracing::debug!(host, port, "smtp channel ready");
        Ok(Self { transport, sender })
    }
}

impl SendChannel for SmtpChannel {
    async fn deliver(&self, message: &FinalizedMessage) -> AppResult<()> {
        let recipients = message
            .to
            .iter()
            .map(|to| to.parse::<Address>())
            .collect::<Result<Vec<_>, _>>()?;
        let envelope = Envelope::new(Some(self.sender.clone()), recipients)?;

        let raw = mime::render(message);
        self.transport.send_raw(&envelope, &raw).await?;
        Ok(())
    }
}
