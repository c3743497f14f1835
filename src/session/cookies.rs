//! Cookie reading and writing as an explicit capability

pub const CHALLENGE_COOKIE: &str = "earthwalker_lastChallenge";
pub const RESULT_COOKIE_PREFIX: &str = "earthwalker_lastResult_";

/// Two days
pub const COOKIE_MAX_AGE_SECS: u64 = 172_800;

/// Name of the cookie holding the result ID for `challenge_id`
pub fn result_cookie_name(challenge_id: &str) -> String {
    format!("{RESULT_COOKIE_PREFIX}{challenge_id}")
}

/// A cookie to be sent back to the client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cookie {
    pub name: String,
    pub value: String,
    pub path: &'static str,
    pub max_age: u64,
    pub same_site: &'static str,
}

impl Cookie {
    /// Site-wide, two-day, same-site-lax tracking cookie
    pub fn tracking(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            path: "/",
            max_age: COOKIE_MAX_AGE_SECS,
            same_site: "Lax",
        }
    }

    /// `Set-Cookie` header value
    pub fn to_header_value(&self) -> String {
        format!(
            "{}={}; Path={}; Max-Age={}; SameSite={}",
            self.name, self.value, self.path, self.max_age, self.same_site
        )
    }
}

/// Read access to request cookies and write access to response cookies
pub trait CookieJar {
    /// Value of the first request cookie called `name`
    fn get(&self, name: &str) -> Option<&str>;

    /// Queue a cookie on the response
    fn set(&mut self, cookie: Cookie);
}

/// [`CookieJar`] backed by a request's `Cookie` headers
#[derive(Debug, Default)]
pub struct RequestCookies {
    incoming: Vec<(String, String)>,
    outgoing: Vec<Cookie>,
}

impl RequestCookies {
    /// Parse every `Cookie` header value, in order
    pub fn parse<'a>(header_values: impl IntoIterator<Item = &'a str>) -> Self {
        let incoming = header_values
            .into_iter()
            .flat_map(|value| value.split(';'))
            .filter_map(|pair| {
                let (name, value) = pair.trim().split_once('=')?;
                let name = name.trim();
                if name.is_empty() {
                    return None;
                }
                let value = value.trim();
                let value = value
                    .strip_prefix('"')
                    .and_then(|v| v.strip_suffix('"'))
                    .unwrap_or(value);
                Some((name.to_string(), value.to_string()))
            })
            .collect();

        Self {
            incoming,
            outgoing: Vec::new(),
        }
    }

    /// Cookies queued with [`CookieJar::set`]
    pub fn outgoing(&self) -> &[Cookie] {
        &self.outgoing
    }

    /// `Set-Cookie` header values for the response
    pub fn set_cookie_headers(&self) -> Vec<String> {
        self.outgoing.iter().map(Cookie::to_header_value).collect()
    }
}

impl CookieJar for RequestCookies {
    fn get(&self, name: &str) -> Option<&str> {
        self.incoming
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    fn set(&mut self, cookie: Cookie) {
        self.outgoing.retain(|c| c.name != cookie.name);
        self.outgoing.push(cookie);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_multiple_pairs_and_headers() {
        let jar = RequestCookies::parse([
            "earthwalker_lastChallenge=c1; theme=dark",
            "earthwalker_lastResult_c1=\"r9\"",
        ]);

        assert_eq!(jar.get(CHALLENGE_COOKIE), Some("c1"));
        assert_eq!(jar.get("theme"), Some("dark"));
        assert_eq!(jar.get(&result_cookie_name("c1")), Some("r9"));
        assert_eq!(jar.get("missing"), None);
    }

    #[test]
    fn test_first_cookie_wins() {
        let jar = RequestCookies::parse(["a=1; a=2"]);
        assert_eq!(jar.get("a"), Some("1"));
    }

    #[test]
    fn test_malformed_pairs_are_skipped() {
        let jar = RequestCookies::parse(["novalue; =x; ok=yes"]);
        assert_eq!(jar.get("ok"), Some("yes"));
        assert_eq!(jar.get("novalue"), None);
    }

    #[test]
    fn test_tracking_cookie_header() {
        let cookie = Cookie::tracking(result_cookie_name("c1"), "r1");
        assert_eq!(
            cookie.to_header_value(),
            "earthwalker_lastResult_c1=r1; Path=/; Max-Age=172800; SameSite=Lax"
        );
    }

    #[test]
    fn test_setting_same_name_replaces() {
        let mut jar = RequestCookies::default();
        jar.set(Cookie::tracking("a", "1"));
        jar.set(Cookie::tracking("a", "2"));
        assert_eq!(jar.outgoing().len(), 1);
        assert_eq!(jar.outgoing()[0].value, "2");
    }
}
