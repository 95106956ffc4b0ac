//! Login flow scenarios against a scripted model of the demo site.
//!
//! Each test owns a fresh session acquired through a fixture; nothing is
//! shared between cases, so they pass in any order and in parallel.

use async_trait::async_trait;
use entrar::mock::{ClickEffect, FormOutcome, MockElement, MockPage, MockSession};
use entrar::{
    with_fixture, Assertion, Credentials, EntrarError, EntrarResult, Fixture, LoginPage,
};

const LOGIN_URL: &str = "https://the-internet.herokuapp.com/login";
const SECURE_URL: &str = "https://the-internet.herokuapp.com/secure";

const VALID_USER: &str = "tomsmith";
const VALID_PASSWORD: &str = "SuperSecretPassword!";

fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

/// Model of the demo site's login form: the accepted credential pair, the
/// secure-area redirect on success, and the re-rendered login page with an
/// error flash on failure.
fn demo_site() -> MockSession {
    let submit = ClickEffect::SubmitCredentials {
        username_field: "username".to_string(),
        password_field: "password".to_string(),
        message_field: "flash".to_string(),
        accepted: Credentials::new(VALID_USER, VALID_PASSWORD),
        success: FormOutcome::new(SECURE_URL, "You logged into a secure area! ×"),
        failure: FormOutcome::new(LOGIN_URL, "Your username is invalid! ×"),
    };
    MockSession::new().with_page(
        LOGIN_URL,
        MockPage::new()
            .with_element(MockElement::new("input").with_id("username"))
            .with_element(MockElement::new("input").with_id("password"))
            .with_element(
                MockElement::new("button")
                    .with_css("button[type='submit']")
                    .with_click_effect(submit),
            ),
    )
}

struct DemoSiteFixture {
    session: Option<MockSession>,
}

impl DemoSiteFixture {
    fn new() -> Self {
        Self { session: None }
    }

    fn session_mut(&mut self) -> EntrarResult<&mut MockSession> {
        self.session.as_mut().ok_or(EntrarError::InvalidState {
            message: "fixture not set up".to_string(),
        })
    }
}

#[async_trait]
impl Fixture for DemoSiteFixture {
    async fn setup(&mut self) -> EntrarResult<()> {
        self.session = Some(demo_site());
        Ok(())
    }

    async fn teardown(&mut self) -> EntrarResult<()> {
        self.session = None;
        Ok(())
    }
}

async fn run_login_scenario(
    user: &'static str,
    pwd: &'static str,
    expected: &'static str,
) -> EntrarResult<()> {
    with_fixture(DemoSiteFixture::new(), |fx: &mut DemoSiteFixture| {
        Box::pin(async move {
            let session = fx.session_mut()?;
            let mut page = LoginPage::new(session);
            page.open().await?;
            page.login(user, pwd).await?;
            let message = page.message().await?;
            Assertion::contains(&message, expected).into_result()
        })
    })
    .await
}

#[tokio::test]
async fn test_valid_login() -> EntrarResult<()> {
    init_logging();
    run_login_scenario(VALID_USER, VALID_PASSWORD, "You logged into a secure area!").await
}

#[tokio::test]
async fn test_invalid_login() -> EntrarResult<()> {
    init_logging();
    run_login_scenario("wrong", "wrong", "Your username is invalid!").await
}

#[tokio::test]
async fn test_message_before_login_is_an_error() -> EntrarResult<()> {
    init_logging();
    with_fixture(DemoSiteFixture::new(), |fx: &mut DemoSiteFixture| {
        Box::pin(async move {
            let session = fx.session_mut()?;
            let mut page = LoginPage::new(session);
            page.open().await?;
            // The flash region only exists after a login attempt.
            let err = page
                .message()
                .await
                .expect_err("flash region should be absent before login");
            Assertion::is_true(
                matches!(err, EntrarError::ElementNotFound { .. }),
                "missing flash region should surface as a lookup failure",
            )
            .into_result()
        })
    })
    .await
}

#[tokio::test]
async fn test_repeated_invalid_login_is_idempotent() -> EntrarResult<()> {
    init_logging();
    with_fixture(DemoSiteFixture::new(), |fx: &mut DemoSiteFixture| {
        Box::pin(async move {
            let session = fx.session_mut()?;
            let mut page = LoginPage::new(session);
            page.open().await?;

            page.login("wrong", "wrong").await?;
            let first = page.message().await?;
            page.login("wrong", "wrong").await?;
            let second = page.message().await?;

            Assertion::equals(&first, &second).into_result()
        })
    })
    .await
}

#[tokio::test]
async fn test_scenarios_are_independent_across_sessions() -> EntrarResult<()> {
    init_logging();
    // Same outcomes regardless of order; each scenario owns its session.
    run_login_scenario("wrong", "wrong", "Your username is invalid!").await?;
    run_login_scenario(VALID_USER, VALID_PASSWORD, "You logged into a secure area!").await?;
    run_login_scenario("wrong", "wrong", "Your username is invalid!").await
}
