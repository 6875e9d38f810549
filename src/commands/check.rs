use serde::Serialize;

use crate::context::AppContext;
use crate::error::AppResult;

#[derive(Debug, Clone, Serialize)]
pub struct CheckReport {
    pub server: String,
    pub port: u16,
    pub address: String,
    pub note: String,
}

pub async fn run(ctx: &AppContext) -> AppResult<()> {
    let channel = ctx.channel().await?;
    drop(channel);

    let report = CheckReport {
        server: ctx.settings.server().to_string(),
        port: ctx.settings.port(),
        address: ctx.settings.address()?.to_string(),
        note: "connection and login verified".to_string(),
    };

    let text = format!("smtp connection to {}:{} verified", report.server, report.port);
    ctx.output.emit(&text, &report)
}
