//! Locator abstraction for element selection.
//!
//! A locator is an immutable strategy+value pair identifying how to find one
//! page element. Each logical element owns exactly one locator: there are no
//! fallback chains and no retry policy, so a failed lookup surfaces directly
//! as [`crate::EntrarError::ElementNotFound`].

use std::fmt;

/// A strategy+value pair for finding a single element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Locator {
    /// Element id attribute (e.g., "username")
    Id(String),
    /// CSS selector (e.g., "button[type='submit']")
    Css(String),
    /// XPath expression
    XPath(String),
    /// Element name attribute
    Name(String),
    /// Visible text content
    Text(String),
}

impl Locator {
    /// Create an id locator
    #[must_use]
    pub fn id(value: impl Into<String>) -> Self {
        Self::Id(value.into())
    }

    /// Create a CSS selector locator
    #[must_use]
    pub fn css(selector: impl Into<String>) -> Self {
        Self::Css(selector.into())
    }

    /// Create an XPath locator
    #[must_use]
    pub fn xpath(expr: impl Into<String>) -> Self {
        Self::XPath(expr.into())
    }

    /// Create a name-attribute locator
    #[must_use]
    pub fn name(value: impl Into<String>) -> Self {
        Self::Name(value.into())
    }

    /// Create a visible-text locator
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// The strategy name, for logging and error display.
    #[must_use]
    pub const fn strategy(&self) -> &'static str {
        match self {
            Self::Id(_) => "id",
            Self::Css(_) => "css",
            Self::XPath(_) => "xpath",
            Self::Name(_) => "name",
            Self::Text(_) => "text",
        }
    }

    /// The raw locator value.
    #[must_use]
    pub fn value(&self) -> &str {
        match self {
            Self::Id(v) | Self::Css(v) | Self::XPath(v) | Self::Name(v) | Self::Text(v) => v,
        }
    }

    /// Convert to a CSS selector, if the strategy is CSS-expressible.
    ///
    /// XPath and text strategies have no CSS equivalent and return `None`;
    /// backends resolve those through [`Self::to_query`].
    #[must_use]
    pub fn to_css(&self) -> Option<String> {
        match self {
            Self::Id(v) => Some(format!("#{v}")),
            Self::Css(v) => Some(v.clone()),
            Self::Name(v) => Some(format!("[name={v:?}]")),
            Self::XPath(_) | Self::Text(_) => None,
        }
    }

    /// Convert to a JavaScript lookup expression evaluating to the element
    /// (or `null` when nothing matches).
    #[must_use]
    pub fn to_query(&self) -> String {
        match self {
            Self::Id(v) => format!("document.getElementById({v:?})"),
            Self::Css(v) => format!("document.querySelector({v:?})"),
            Self::XPath(v) => {
                format!("document.evaluate({v:?}, document, null, XPathResult.FIRST_ORDERED_NODE_TYPE, null).singleNodeValue")
            }
            Self::Name(v) => format!("document.querySelector('[name=' + JSON.stringify({v:?}) + ']')"),
            Self::Text(v) => {
                format!("Array.from(document.querySelectorAll('*')).find(el => el.textContent.includes({v:?})) ?? null")
            }
        }
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.strategy(), self.value())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    mod display_tests {
        use super::*;

        #[test]
        fn test_id_display() {
            assert_eq!(Locator::id("username").to_string(), "id=username");
        }

        #[test]
        fn test_css_display() {
            assert_eq!(
                Locator::css("button[type='submit']").to_string(),
                "css=button[type='submit']"
            );
        }

        #[test]
        fn test_strategy_names() {
            assert_eq!(Locator::xpath("//div").strategy(), "xpath");
            assert_eq!(Locator::name("q").strategy(), "name");
            assert_eq!(Locator::text("Login").strategy(), "text");
        }
    }

    mod conversion_tests {
        use super::*;

        #[test]
        fn test_id_to_css() {
            assert_eq!(Locator::id("flash").to_css(), Some("#flash".to_string()));
        }

        #[test]
        fn test_css_to_css_is_identity() {
            let locator = Locator::css("button.primary");
            assert_eq!(locator.to_css(), Some("button.primary".to_string()));
        }

        #[test]
        fn test_xpath_has_no_css_form() {
            assert!(Locator::xpath("//button").to_css().is_none());
            assert!(Locator::text("Submit").to_css().is_none());
        }

        #[test]
        fn test_id_query_uses_get_element_by_id() {
            let query = Locator::id("username").to_query();
            assert!(query.contains("getElementById"));
            assert!(query.contains("username"));
        }

        #[test]
        fn test_css_query_uses_query_selector() {
            let query = Locator::css("button[type='submit']").to_query();
            assert!(query.starts_with("document.querySelector"));
        }

        #[test]
        fn test_xpath_query_uses_evaluate() {
            let query = Locator::xpath("//div[@id='flash']").to_query();
            assert!(query.contains("document.evaluate"));
        }
    }
}
