//! Scripted in-memory session for exercising page objects without a browser.
//!
//! A [`MockSession`] holds a small site model: pages keyed by URL, each a flat
//! list of elements. Clicking an element can trigger a [`ClickEffect`], which
//! is how form behavior (credential checks, redirects, flash messages) is
//! scripted. Unit and integration tests drive page objects against this model
//! through the same [`Session`] trait the real backend implements.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::locator::Locator;
use crate::page::Credentials;
use crate::result::{EntrarError, EntrarResult};
use crate::session::{Action, ElementHandle, Session};

/// Where a scripted form submission lands and what its flash region says.
#[derive(Debug, Clone)]
pub struct FormOutcome {
    /// URL the submission navigates to
    pub url: String,
    /// Text placed in the flash region of the target page
    pub flash: String,
}

impl FormOutcome {
    /// Create a new form outcome
    #[must_use]
    pub fn new(url: impl Into<String>, flash: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            flash: flash.into(),
        }
    }
}

/// Effect triggered by clicking an element.
#[derive(Debug, Clone)]
pub enum ClickEffect {
    /// Submit a credential form: read the two input values, compare against
    /// the accepted pair, then apply the success or failure outcome and
    /// navigate to its URL. The flash region is created on the target page if
    /// it does not already exist.
    SubmitCredentials {
        /// Element id of the username input
        username_field: String,
        /// Element id of the password input
        password_field: String,
        /// Element id of the flash region written on the outcome page
        message_field: String,
        /// The one credential pair the form accepts
        accepted: Credentials,
        /// Outcome applied on a match
        success: FormOutcome,
        /// Outcome applied on a mismatch
        failure: FormOutcome,
    },
}

/// One element in the mock site model.
#[derive(Debug, Clone)]
pub struct MockElement {
    id: Option<String>,
    css: Option<String>,
    tag: String,
    text: String,
    value: String,
    on_click: Option<ClickEffect>,
    handle: u64,
}

impl MockElement {
    /// Create a new element with the given tag name
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            id: None,
            css: None,
            tag: tag.into(),
            text: String::new(),
            value: String::new(),
            on_click: None,
            handle: 0,
        }
    }

    /// Set the element's id attribute
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Register a CSS selector this element answers to
    #[must_use]
    pub fn with_css(mut self, selector: impl Into<String>) -> Self {
        self.css = Some(selector.into());
        self
    }

    /// Set the element's visible text
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Attach a click effect
    #[must_use]
    pub fn with_click_effect(mut self, effect: ClickEffect) -> Self {
        self.on_click = Some(effect);
        self
    }

    fn matches(&self, locator: &Locator) -> bool {
        match locator {
            Locator::Id(v) => self.id.as_deref() == Some(v),
            Locator::Css(v) => {
                self.css.as_deref() == Some(v)
                    || self.id.as_deref().is_some_and(|id| format!("#{id}") == *v)
            }
            Locator::Text(t) => self.text.contains(t),
            // The model does not index name attributes or XPath.
            Locator::Name(_) | Locator::XPath(_) => false,
        }
    }
}

/// One page in the mock site model.
#[derive(Debug, Clone, Default)]
pub struct MockPage {
    elements: Vec<MockElement>,
}

impl MockPage {
    /// Create an empty page
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an element to the page
    #[must_use]
    pub fn with_element(mut self, element: MockElement) -> Self {
        self.elements.push(element);
        self
    }

    fn find(&self, locator: &Locator) -> Option<&MockElement> {
        self.elements.iter().find(|e| e.matches(locator))
    }

    fn by_handle_mut(&mut self, handle: u64) -> Option<&mut MockElement> {
        self.elements.iter_mut().find(|e| e.handle == handle)
    }

    fn by_id(&self, id: &str) -> Option<&MockElement> {
        self.elements.iter().find(|e| e.id.as_deref() == Some(id))
    }
}

/// In-memory [`Session`] backed by a scripted site model.
#[derive(Debug, Default)]
pub struct MockSession {
    pages: HashMap<String, MockPage>,
    current: Option<String>,
    next_handle: u64,
}

impl MockSession {
    /// Create an empty session with no registered pages
    #[must_use]
    pub fn new() -> Self {
        Self {
            pages: HashMap::new(),
            current: None,
            next_handle: 1,
        }
    }

    /// Register a page under a URL
    #[must_use]
    pub fn with_page(mut self, url: impl Into<String>, mut page: MockPage) -> Self {
        for element in &mut page.elements {
            element.handle = self.next_handle;
            self.next_handle += 1;
        }
        let _ = self.pages.insert(url.into(), page);
        self
    }

    fn current_page(&self) -> EntrarResult<&MockPage> {
        let url = self.current.as_ref().ok_or(EntrarError::InvalidState {
            message: "no page loaded".to_string(),
        })?;
        self.pages
            .get(url)
            .ok_or_else(|| EntrarError::InvalidState {
                message: format!("current page {url} is gone"),
            })
    }

    fn parse_handle(element: &ElementHandle) -> EntrarResult<u64> {
        element.id.parse().map_err(|_| EntrarError::InputError {
            message: format!("foreign element handle '{}'", element.id),
        })
    }

    fn apply_click(&mut self, handle: u64) -> EntrarResult<()> {
        let page = self.current_page()?;
        let Some(element) = page.elements.iter().find(|e| e.handle == handle) else {
            return Err(EntrarError::ElementNotFound {
                locator: format!("element handle {handle}"),
            });
        };
        let Some(effect) = element.on_click.clone() else {
            return Ok(());
        };

        match effect {
            ClickEffect::SubmitCredentials {
                username_field,
                password_field,
                message_field,
                accepted,
                success,
                failure,
            } => {
                let read = |field: &str| -> EntrarResult<String> {
                    page.by_id(field).map(|e| e.value.clone()).ok_or_else(|| {
                        EntrarError::InputError {
                            message: format!("form field '{field}' not on page"),
                        }
                    })
                };
                let submitted = Credentials::new(read(&username_field)?, read(&password_field)?);
                let outcome = if submitted == accepted { success } else { failure };

                let flash_handle = self.next_handle;
                self.next_handle += 1;
                let target = self.pages.entry(outcome.url.clone()).or_default();
                let existing = target
                    .elements
                    .iter_mut()
                    .find(|e| e.id.as_deref() == Some(message_field.as_str()));
                if let Some(flash) = existing {
                    flash.text = outcome.flash;
                } else {
                    let mut flash = MockElement::new("div")
                        .with_id(message_field)
                        .with_text(outcome.flash);
                    flash.handle = flash_handle;
                    target.elements.push(flash);
                }
                self.current = Some(outcome.url);
                Ok(())
            }
        }
    }
}

#[async_trait]
impl Session for MockSession {
    async fn navigate(&mut self, url: &str) -> EntrarResult<()> {
        if !self.pages.contains_key(url) {
            return Err(EntrarError::NavigationError {
                url: url.to_string(),
                message: "URL not registered in site model".to_string(),
            });
        }
        self.current = Some(url.to_string());
        Ok(())
    }

    async fn locate(&mut self, locator: &Locator) -> EntrarResult<ElementHandle> {
        let page = self.current_page()?;
        page.find(locator).map_or_else(
            || {
                Err(EntrarError::ElementNotFound {
                    locator: locator.to_string(),
                })
            },
            |element| {
                Ok(ElementHandle {
                    id: element.handle.to_string(),
                    tag_name: element.tag.clone(),
                    text_content: Some(element.text.clone()),
                })
            },
        )
    }

    async fn act(&mut self, element: &ElementHandle, action: Action) -> EntrarResult<()> {
        let handle = Self::parse_handle(element)?;
        match action {
            Action::Click => self.apply_click(handle),
            Action::Fill(text) => {
                let url = self.current.clone().ok_or(EntrarError::InvalidState {
                    message: "no page loaded".to_string(),
                })?;
                let page = self.pages.get_mut(&url).ok_or(EntrarError::InvalidState {
                    message: format!("current page {url} is gone"),
                })?;
                let target = page
                    .by_handle_mut(handle)
                    .ok_or(EntrarError::ElementNotFound {
                        locator: format!("element handle {handle}"),
                    })?;
                target.value = text;
                Ok(())
            }
        }
    }

    async fn read_text(&mut self, element: &ElementHandle) -> EntrarResult<String> {
        let handle = Self::parse_handle(element)?;
        let page = self.current_page()?;
        page.elements
            .iter()
            .find(|e| e.handle == handle)
            .map(|e| e.text.clone())
            .ok_or(EntrarError::ElementNotFound {
                locator: format!("element handle {handle}"),
            })
    }

    fn current_url(&self) -> &str {
        self.current.as_deref().unwrap_or("about:blank")
    }
}
