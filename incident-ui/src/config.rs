/// Query parameter that overrides the endpoint address for one page load.
pub const QUERY_PARAM: &str = "ws";
/// `<meta name="...">` the host page can use to configure the address.
pub const META_NAME: &str = "live-summary-ws";

/// Address baked in at build time, if any.
pub const BUILD_TIME_ADDRESS: Option<&str> = option_env!("LIVE_SUMMARY_WS_URL");

/// Address of the live feed. An empty address disables the connection.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Endpoint(String);

impl Endpoint {
    pub fn new(address: &str) -> Self {
        Self(address.trim().to_string())
    }

    pub fn is_configured(&self) -> bool {
        !self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Candidate addresses, one per configuration source.
#[derive(Clone, Debug, Default)]
pub struct EndpointSources {
    pub query: Option<String>,
    pub meta: Option<String>,
    pub build_time: Option<String>,
}

impl EndpointSources {
    /// First non-blank source wins: query, then meta tag, then build time.
    pub fn resolve(&self) -> Endpoint {
        [&self.query, &self.meta, &self.build_time]
            .into_iter()
            .flatten()
            .map(|raw| Endpoint::new(raw))
            .find(Endpoint::is_configured)
            .unwrap_or_default()
    }

    /// Reads every source available in the current page.
    pub fn from_browser() -> Self {
        Self {
            query: query_param(QUERY_PARAM),
            meta: meta_content(META_NAME),
            build_time: BUILD_TIME_ADDRESS.map(ToString::to_string),
        }
    }
}

fn query_param(name: &str) -> Option<String> {
    let window = web_sys::window()?;
    let search = window.location().search().ok()?;
    let params = web_sys::UrlSearchParams::new_with_str(&search).ok()?;
    params.get(name)
}

fn meta_content(name: &str) -> Option<String> {
    let document = web_sys::window()?.document()?;
    let meta = document
        .query_selector(&format!("meta[name=\"{name}\"]"))
        .ok()??;
    meta.get_attribute("content")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sources(
        query: Option<&str>,
        meta: Option<&str>,
        build_time: Option<&str>,
    ) -> EndpointSources {
        EndpointSources {
            query: query.map(Into::into),
            meta: meta.map(Into::into),
            build_time: build_time.map(Into::into),
        }
    }

    #[test]
    fn nothing_configured_is_disabled() {
        let endpoint = sources(None, None, None).resolve();
        assert!(!endpoint.is_configured());
        assert_eq!(endpoint.as_str(), "");
    }

    #[test]
    fn query_beats_meta_beats_build_time() {
        let all = sources(Some("ws://q"), Some("ws://m"), Some("ws://b"));
        assert_eq!(all.resolve().as_str(), "ws://q");
        let no_query = sources(None, Some("ws://m"), Some("ws://b"));
        assert_eq!(no_query.resolve().as_str(), "ws://m");
        let build_only = sources(None, None, Some("ws://b"));
        assert_eq!(build_only.resolve().as_str(), "ws://b");
    }

    #[test]
    fn blank_values_fall_through() {
        let resolved = sources(Some("   "), Some(""), Some(" wss://feed.example/live ")).resolve();
        assert_eq!(resolved.as_str(), "wss://feed.example/live");
    }

    #[test]
    fn endpoint_trims() {
        assert!(!Endpoint::new(" \t").is_configured());
        assert_eq!(Endpoint::new(" ws://a ").as_str(), "ws://a");
    }
}
