//! Entrar: page-object driven login flow testing over swappable browser sessions.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                      ENTRAR Architecture                         │
//! ├──────────────────────────────────────────────────────────────────┤
//! │   ┌────────────┐    ┌────────────┐    ┌─────────────────────┐   │
//! │   │ Test Case  │    │ Page       │    │ Session backend      │   │
//! │   │ (fixture-  │───►│ Object     │───►│ (CDP via chromium,   │   │
//! │   │  scoped)   │    │ (LoginPage)│    │  or scripted mock)   │   │
//! │   └────────────┘    └────────────┘    └─────────────────────┘   │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Test cases acquire a session through a [`Fixture`], drive it through a
//! page object's behavior-level API, and assert on the one observable
//! outcome: the flash message text. Locators stay inside the page object;
//! element handles are re-resolved per action and never cached.

#![warn(missing_docs)]
// Lints are configured in workspace Cargo.toml [workspace.lints.clippy]

mod assertion;
mod fixture;
mod locator;
mod page;
mod result;
mod session;

/// Scripted in-memory session backend for browser-free tests
pub mod mock;

/// CDP browser backend (requires chromium)
#[cfg(feature = "browser")]
mod cdp;

pub use assertion::{Assertion, AssertionResult};
pub use fixture::{with_fixture, Fixture, FixtureBody};
pub use locator::Locator;
pub use page::{Credentials, LoginPage, PageObject};
pub use result::{EntrarError, EntrarResult};
pub use session::{Action, ElementHandle, Session};

#[cfg(feature = "browser")]
pub use cdp::{Browser, BrowserConfig, BrowserFixture, CdpSession};
