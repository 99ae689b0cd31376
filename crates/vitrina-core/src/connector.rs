use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use url::Url;

/// Leading digit run with internal separators (spaces, commas, dots).
static PRICE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d[\d\s,.]*").expect("static regex"));

/// Closed set of extraction strategies.
///
/// Connector names on jobs are free-form strings; they are resolved to a
/// variant here at execution time. Unknown names fall back to `Generic`
/// rather than erroring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connector {
    Generic,
    Wildberries,
    Ozon,
    Lamoda,
}

impl Connector {
    pub fn as_str(&self) -> &'static str {
        match self {
            Connector::Generic => "generic",
            Connector::Wildberries => "wildberries",
            Connector::Ozon => "ozon",
            Connector::Lamoda => "lamoda",
        }
    }

    /// Exact name lookup. `None` for names outside the known set.
    pub fn from_name(name: &str) -> Option<Connector> {
        match name.to_lowercase().as_str() {
            "generic" => Some(Connector::Generic),
            "wildberries" => Some(Connector::Wildberries),
            "ozon" => Some(Connector::Ozon),
            "lamoda" => Some(Connector::Lamoda),
            _ => None,
        }
    }

    /// Infer a connector from the URL host (domain fragment match).
    pub fn infer_from_url(url: &str) -> Option<Connector> {
        let host = Url::parse(url).ok()?.host_str()?.to_lowercase();
        [Connector::Wildberries, Connector::Ozon, Connector::Lamoda]
            .into_iter()
            .find(|c| host.contains(c.as_str()))
    }

    /// Dispatch rule for picking the strategy of a job.
    ///
    /// A recognized site-specific name wins outright. When the name is
    /// unknown or still the `generic` default, host inference gets a say
    /// before falling back to `Generic`.
    pub fn resolve(name: &str, url: &str) -> Connector {
        match Connector::from_name(name) {
            Some(connector) if connector != Connector::Generic => connector,
            _ => Connector::infer_from_url(url).unwrap_or(Connector::Generic),
        }
    }
}

impl fmt::Display for Connector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Normalize a raw price candidate to a numeric-looking string.
///
/// Keeps the first run of digits plus internal separators verbatim and
/// drops currency symbols and surrounding text. No digits at all yields an
/// empty string, never an error: `"1 234,56 ₽"` -> `"1 234,56"`.
pub fn normalize_price(text: &str) -> String {
    match PRICE_RE.find(text) {
        Some(m) => m.as_str().trim().to_string(),
        None => String::new(),
    }
}

/// True if the text contains anything a price candidate could be cut from.
pub fn has_price_candidate(text: &str) -> bool {
    PRICE_RE.is_match(text)
}
