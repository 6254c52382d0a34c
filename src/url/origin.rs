use url::Url;

/// The host a crawl is confined to
///
/// Two URLs share an origin when their hosts match and they name the same
/// explicit port, so `http://` and `https://` links to the same site are
/// both followed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Origin {
    host: String,
    port: Option<u16>,
}

impl Origin {
    /// Extracts the origin of a URL, or `None` when the URL has no host
    ///
    /// # Examples
    ///
    /// ```
    /// use cv_finder::url::Origin;
    /// use url::Url;
    ///
    /// let origin = Origin::of(&Url::parse("https://Example.com/about").unwrap()).unwrap();
    /// assert!(origin.contains(&Url::parse("http://example.com/cv.pdf").unwrap()));
    /// assert!(!origin.contains(&Url::parse("https://other.com/").unwrap()));
    /// ```
    pub fn of(url: &Url) -> Option<Self> {
        url.host_str().map(|host| Self {
            host: host.to_lowercase(),
            port: url.port(),
        })
    }

    /// Returns true if the URL is an http(s) URL on this origin
    pub fn contains(&self, url: &Url) -> bool {
        if url.scheme() != "http" && url.scheme() != "https" {
            return false;
        }
        Self::of(url).as_ref() == Some(self)
    }

    /// The lowercase host name
    pub fn host(&self) -> &str {
        &self.host
    }
}
