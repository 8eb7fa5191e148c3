//! Web pages as EARL test subjects.

use serde::{Deserialize, Serialize};

use crate::assertion::ToEarl;
use crate::vocab::{dct, earl, literal, node, push_value, sch, Node};

/// An evaluated page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    /// URL the page was loaded from; also its `@id`.
    pub url: String,
    /// Document title, when the page has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Final URL after redirects, when it differs from `url`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirected_to: Option<String>,
}

impl Page {
    /// A page without title or redirect.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: None,
            redirected_to: None,
        }
    }
}

impl ToEarl for Page {
    fn to_earl(&self) -> Node {
        let mut page = node(Some(self.url.as_str()), &[earl("TestSubject"), sch("WebPage")]);
        push_value(&mut page, &dct("source"), literal(self.url.as_str()));
        if let Some(redirect) = self.redirected_to.as_deref().filter(|r| *r != self.url) {
            push_value(&mut page, &dct("source"), literal(redirect));
        }
        if let Some(title) = &self.title {
            push_value(&mut page, &dct("title"), literal(title.as_str()));
        }
        page
    }
}
