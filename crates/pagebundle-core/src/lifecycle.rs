//! Page lifecycle: `DataPageReady` events and the app-key filter that
//! decides whether the bundle flow attaches to a page.

/// A data page finished initializing. `app_key` identifies which one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageReady {
    pub app_key: String,
}

impl PageReady {
    pub fn new(app_key: impl Into<String>) -> Self {
        Self {
            app_key: app_key.into(),
        }
    }
}

/// Attaches the bundle flow only to the data page with the expected key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Activation {
    expected_app_key: String,
}

impl Activation {
    pub fn new(expected_app_key: impl Into<String>) -> Self {
        Self {
            expected_app_key: expected_app_key.into(),
        }
    }

    pub fn expected_app_key(&self) -> &str {
        &self.expected_app_key
    }

    pub fn accepts(&self, event: &PageReady) -> bool {
        event.app_key == self.expected_app_key
    }

    /// First event that activates the flow, if any.
    pub fn first_accepted<'a, I>(&self, events: I) -> Option<&'a PageReady>
    where
        I: IntoIterator<Item = &'a PageReady>,
    {
        events.into_iter().find(|e| self.accepts(e))
    }
}
