//! Session abstraction over one live browser page.
//!
//! A [`Session`] is the opaque handle the page objects drive: navigate to a
//! URL, locate an element, act on it, read its visible text. Locating and
//! acting are separate capabilities so alternate automation backends can be
//! substituted without touching any page object's public methods.
//!
//! Handles are never cached across actions. Every action re-locates its
//! element, which tolerates page reloads and navigation between steps.

use async_trait::async_trait;

use crate::locator::Locator;
use crate::result::EntrarResult;

/// Handle to a located element.
///
/// Valid until the next navigation; stale handles fail on use rather than
/// silently resolving to a different element.
#[derive(Debug, Clone)]
pub struct ElementHandle {
    /// Backend-specific identifier for the element
    pub id: String,
    /// Element tag name (lowercase)
    pub tag_name: String,
    /// Text content snapshot taken at locate time
    pub text_content: Option<String>,
}

/// An action performed on a located element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Click the element
    Click,
    /// Replace the element's value with the given text
    Fill(String),
}

/// One active browser session (page/tab) under automated control.
///
/// Each operation drives the backend to completion and surfaces its failure
/// unmodified; there is no retry, timeout, or recovery layer here beyond
/// whatever the backend itself applies.
#[async_trait]
pub trait Session: Send {
    /// Navigate the session to `url`.
    async fn navigate(&mut self, url: &str) -> EntrarResult<()>;

    /// Locate exactly one element.
    ///
    /// # Errors
    ///
    /// Returns [`crate::EntrarError::ElementNotFound`] when nothing matches,
    /// or [`crate::EntrarError::InvalidState`] when no page is loaded.
    async fn locate(&mut self, locator: &Locator) -> EntrarResult<ElementHandle>;

    /// Perform an action on a previously located element.
    async fn act(&mut self, element: &ElementHandle, action: Action) -> EntrarResult<()>;

    /// Read the visible text of a previously located element.
    async fn read_text(&mut self, element: &ElementHandle) -> EntrarResult<String>;

    /// The URL the session currently points at.
    fn current_url(&self) -> &str;

    /// Locate an element and fill it with `text`.
    async fn fill(&mut self, locator: &Locator, text: &str) -> EntrarResult<()> {
        let element = self.locate(locator).await?;
        self.act(&element, Action::Fill(text.to_owned())).await
    }

    /// Locate an element and click it.
    async fn click(&mut self, locator: &Locator) -> EntrarResult<()> {
        let element = self.locate(locator).await?;
        self.act(&element, Action::Click).await
    }

    /// Locate an element and read its visible text.
    async fn text_of(&mut self, locator: &Locator) -> EntrarResult<String> {
        let element = self.locate(locator).await?;
        self.read_text(&element).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::mock::{MockElement, MockPage, MockSession};

    fn single_input_session() -> MockSession {
        MockSession::new().with_page(
            "https://example.com/form",
            MockPage::new()
                .with_element(MockElement::new("input").with_id("q"))
                .with_element(MockElement::new("div").with_id("note").with_text("hello")),
        )
    }

    #[tokio::test]
    async fn test_fill_combinator_locates_then_types() {
        let mut session = single_input_session();
        session.navigate("https://example.com/form").await.unwrap();
        session.fill(&Locator::id("q"), "rust").await.unwrap();

        let element = session.locate(&Locator::id("q")).await.unwrap();
        assert_eq!(element.tag_name, "input");
    }

    #[tokio::test]
    async fn test_text_of_combinator_reads_visible_text() {
        let mut session = single_input_session();
        session.navigate("https://example.com/form").await.unwrap();
        let text = session.text_of(&Locator::id("note")).await.unwrap();
        assert_eq!(text, "hello");
    }

    #[tokio::test]
    async fn test_click_missing_element_propagates() {
        let mut session = single_input_session();
        session.navigate("https://example.com/form").await.unwrap();
        let err = session.click(&Locator::id("submit")).await.unwrap_err();
        assert!(err.to_string().contains("id=submit"));
    }
}
