//! Test fixture scoping: acquire a resource, run the test body, always release.
//!
//! Session lifecycle lives outside the page objects. A [`Fixture`] owns the
//! acquisition and teardown of one test's resources (typically a session);
//! [`with_fixture`] guarantees teardown on every exit path, including a
//! failing body.

use std::future::Future;
use std::pin::Pin;

use async_trait::async_trait;

use crate::result::EntrarResult;

/// A resource with scoped setup and teardown around one test body.
#[async_trait]
pub trait Fixture: Send {
    /// Set up the fixture before the test body runs.
    ///
    /// # Errors
    ///
    /// Returns an error if acquisition fails; the body is not run.
    async fn setup(&mut self) -> EntrarResult<()>;

    /// Tear down the fixture after the test body, pass or fail.
    ///
    /// # Errors
    ///
    /// Returns an error if release fails.
    async fn teardown(&mut self) -> EntrarResult<()>;

    /// Fixture name for logging/debugging.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

/// Boxed test body borrowing the fixture for its duration.
pub type FixtureBody<'a, T> = Pin<Box<dyn Future<Output = EntrarResult<T>> + Send + 'a>>;

/// Run `body` against a freshly set-up fixture, tearing it down afterwards.
///
/// Teardown runs whether the body passed or failed. A body error takes
/// precedence over a teardown error; a teardown error surfaces when the body
/// was otherwise green.
///
/// # Errors
///
/// Returns the first error out of setup, body, or teardown.
pub async fn with_fixture<Fx, T, F>(mut fixture: Fx, body: F) -> EntrarResult<T>
where
    Fx: Fixture,
    F: for<'a> FnOnce(&'a mut Fx) -> FixtureBody<'a, T>,
{
    tracing::debug!(fixture = fixture.name(), "fixture setup");
    fixture.setup().await?;
    let outcome = body(&mut fixture).await;
    tracing::debug!(fixture = fixture.name(), "fixture teardown");
    let teardown = fixture.teardown().await;
    match (outcome, teardown) {
        (Ok(value), Ok(())) => Ok(value),
        (Err(err), _) | (Ok(_), Err(err)) => Err(err),
    }
}
