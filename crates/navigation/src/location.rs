/// The navigation target: path plus raw query string.
///
/// `search` is either empty or starts with `?`, the same shape a browser
/// location reports.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Location {
    pathname: String,
    search: String,
}

impl Location {
    pub fn new(pathname: impl Into<String>, search: impl Into<String>) -> Self {
        let search = search.into();
        let search = if search.is_empty() || search.starts_with('?') {
            search
        } else {
            format!("?{search}")
        };
        Self {
            pathname: pathname.into(),
            search,
        }
    }

    /// Split a URL-ish string (`/path?query#fragment`) into a location.
    /// The fragment is dropped.
    pub fn parse(url: &str) -> Self {
        let url = url.split_once('#').map_or(url, |(before, _)| before);
        match url.split_once('?') {
            Some((path, query)) if !query.is_empty() => Self::new(path, format!("?{query}")),
            Some((path, _)) => Self::new(path, ""),
            None => Self::new(url, ""),
        }
    }

    pub fn pathname(&self) -> &str {
        &self.pathname
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    /// Path and query together, as used for the `redirect` parameter.
    pub fn path_and_query(&self) -> String {
        format!("{}{}", self.pathname, self.search)
    }

    /// First value of a query parameter, decoded form-style (`+` is a space).
    pub fn query_param(&self, name: &str) -> Option<String> {
        let query = self.search.strip_prefix('?')?;
        query
            .split('&')
            .filter(|pair| !pair.is_empty())
            .map(|pair| pair.split_once('=').unwrap_or((pair, "")))
            .find(|(key, _)| decode_component(key).as_deref() == Some(name))
            .and_then(|(_, value)| decode_component(value))
    }
}

impl core::fmt::Display for Location {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}{}", self.pathname, self.search)
    }
}

fn decode_component(raw: &str) -> Option<String> {
    let spaced = raw.replace('+', " ");
    match urlencoding::decode(&spaced) {
        Ok(decoded) => Some(decoded.into_owned()),
        Err(err) => {
            tracing::debug!(raw, error = %err, "query component is not valid UTF-8");
            None
        }
    }
}
