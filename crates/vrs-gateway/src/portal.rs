use async_trait::async_trait;

use vrs_config::Credentials;
use vrs_core::AppError;

/// Session bootstrap and page-level operations on the booking portal.
///
/// One implementor owns one authenticated session; calls are strictly
/// sequential, which is why the methods take `&mut self`.
#[async_trait]
pub trait Portal: Send {
    /// Sign in and land on the group page.
    async fn login(&mut self, credentials: &Credentials) -> Result<(), AppError>;

    /// Follow the continue link to the reschedule appointment page.
    /// Returns the action id extracted on the way.
    async fn goto_reschedule(&mut self) -> Result<String, AppError>;

    /// Re-fetch the current page and scrape the rotating csrf token.
    /// A page without one yields `AppError::TokenUnavailable`.
    async fn csrf_token(&mut self) -> Result<String, AppError>;

    /// Reload the current page. Used after the retry threshold trips
    /// to shake off stale server-rendered state.
    async fn reload(&mut self) -> Result<(), AppError>;

    fn current_url(&self) -> &str;
}
