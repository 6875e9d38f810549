pub mod smtp;

pub use smtp::SmtpChannel;

use crate::compose::composer::FinalizedMessage;
use crate::error::AppResult;

/// Delivery capability the composer depends on. Implementations wrap a
/// connection that was authenticated at construction time.
#[allow(async_fn_in_trait)]
pub trait SendChannel {
    async fn deliver(&self, message: &FinalizedMessage) -> AppResult<()>;
}
