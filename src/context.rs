use std::env;

use crate::compose::MessageComposer;
use crate::config::{self, AppPaths, Settings};
use crate::error::{AppError, AppResult};
use crate::output::Output;
use crate::transport::SmtpChannel;

const PASSWORD_ENV: &str = "MAILFORGE_PASSWORD";

#[derive(Debug)]
pub struct AppContext {
    pub profile: String,
    pub verbose: u8,
    pub paths: AppPaths,
    pub settings: Settings,
    pub output: Output,
}

impl AppContext {
    pub fn bootstrap(profile: String, json: bool, verbose: u8) -> AppResult<Self> {
        let profile = config::resolve_profile(&profile);
        let paths = AppPaths::discover()?;
        let settings = config::load_settings(&paths, &profile)?;
        let output = Output::new(json);

        Ok(Self {
            profile,
            verbose,
            paths,
            settings,
            output,
        })
    }

    /// Connect and authenticate the SMTP channel. Any failure here aborts the
    /// whole operation; there is no composer without a working channel.
    pub async fn channel(&self) -> AppResult<SmtpChannel> {
        let password = self.password()?;
        SmtpChannel::connect(
            self.settings.server(),
            self.settings.port(),
            self.settings.address()?,
            &password,
            self.settings.timeout(),
        )
        .await
    }

    pub async fn composer(&self) -> AppResult<MessageComposer<SmtpChannel>> {
        let channel = self.channel().await?;
        Ok(MessageComposer::new(
            channel,
            self.settings.from_header()?,
            self.settings.delivery_defaults(),
        ))
    }

    fn password(&self) -> AppResult<String> {
        env::var(PASSWORD_ENV).map_err(|_| {
            AppError::Config(format!(
                "missing smtp password; export {PASSWORD_ENV} before sending"
            ))
        })
    }
}
