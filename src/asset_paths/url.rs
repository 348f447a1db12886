/// Builds the final URL written for every rewritten asset of one invocation.
///
/// The timestamp is fixed at construction, so all assets of a document share one
/// cache-busting value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlDecorator {
    prefix: Option<String>,
    timestamp: Option<i64>,
}

impl UrlDecorator {
    /// Decorator prepending `prefix` and appending `?t=<timestamp>` when given.
    pub fn new(prefix: Option<&str>, timestamp: Option<i64>) -> Self {
        Self {
            prefix: prefix.filter(|value| !value.is_empty()).map(str::to_string),
            timestamp,
        }
    }

    /// Timestamp appended to every URL, if any.
    pub fn timestamp(&self) -> Option<i64> {
        self.timestamp
    }

    /// Final URL for an emitted asset path.
    pub fn decorate(&self, path: &str) -> String {
        let mut url = match &self.prefix {
            Some(prefix) => format!("{prefix}{path}"),
            None => path.to_string(),
        };
        if let Some(stamp) = self.timestamp {
            url.push_str(&format!("?t={stamp}"));
        }
        url
    }
}
