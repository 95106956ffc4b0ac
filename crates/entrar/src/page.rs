//! Page objects for the demo site's login flow.
//!
//! A page object encapsulates one page's locators and user-facing actions
//! behind a stable, behavior-level API, so tests never touch selectors. It
//! borrows its session and never outlives it; nothing else is held, and no
//! element handle survives between actions.

use tracing::debug;

use crate::locator::Locator;
use crate::result::EntrarResult;
use crate::session::Session;

/// A username/password pair, supplied per test invocation and never persisted.
///
/// Empty strings are accepted and passed through verbatim; validation is the
/// server's job, not the page object's.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Username as typed into the form
    pub username: String,
    /// Password as typed into the form
    pub password: String,
}

impl Credentials {
    /// Create a new credential pair
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

/// Trait for page objects representing one page of the site under test.
pub trait PageObject {
    /// The fixed URL this page object navigates to
    fn url(&self) -> &str;

    /// Page name for logging/debugging
    fn page_name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

/// Page object for `https://the-internet.herokuapp.com/login`.
///
/// # Example
///
/// ```ignore
/// let mut page = LoginPage::new(&mut session);
/// page.open().await?;
/// page.login("tomsmith", "SuperSecretPassword!").await?;
/// assert!(page.message().await?.contains("You logged into a secure area!"));
/// ```
#[derive(Debug)]
pub struct LoginPage<'s, S: Session> {
    session: &'s mut S,
    username_input: Locator,
    password_input: Locator,
    submit_button: Locator,
    flash_message: Locator,
}

impl<'s, S: Session> LoginPage<'s, S> {
    /// The login page URL
    pub const URL: &'static str = "https://the-internet.herokuapp.com/login";

    /// Create a login page bound to an existing session.
    ///
    /// The caller (normally a test fixture) keeps ownership of the session
    /// and is responsible for its teardown.
    #[must_use]
    pub fn new(session: &'s mut S) -> Self {
        Self {
            session,
            username_input: Locator::id("username"),
            password_input: Locator::id("password"),
            submit_button: Locator::css("button[type='submit']"),
            flash_message: Locator::id("flash"),
        }
    }

    /// Navigate the session to the login page.
    ///
    /// # Errors
    ///
    /// Propagates the backend's navigation failure unmodified.
    pub async fn open(&mut self) -> EntrarResult<()> {
        debug!(url = Self::URL, "opening login page");
        self.session.navigate(Self::URL).await
    }

    /// Fill in both credential fields and submit the form.
    ///
    /// The order is fixed: username, then password, then the click. The
    /// submit may navigate, invalidating prior element handles, so both
    /// fields are filled before anything is clicked.
    ///
    /// # Errors
    ///
    /// Propagates the first failing lookup or input action; later steps are
    /// not attempted.
    pub async fn login(&mut self, user: &str, pwd: &str) -> EntrarResult<()> {
        debug!(user, "submitting login form");
        self.session.fill(&self.username_input, user).await?;
        self.session.fill(&self.password_input, pwd).await?;
        self.session.click(&self.submit_button).await
    }

    /// Read the visible text of the flash/message region.
    ///
    /// # Errors
    ///
    /// Fails with a lookup error when no prior action has established the
    /// message region (e.g., called before any login attempt).
    pub async fn message(&mut self) -> EntrarResult<String> {
        self.session.text_of(&self.flash_message).await
    }
}

impl<S: Session> PageObject for LoginPage<'_, S> {
    fn url(&self) -> &str {
        Self::URL
    }
}
