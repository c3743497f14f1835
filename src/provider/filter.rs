//! Rewriting of provider payloads
//!
//! Each filter is an ordered list of regex substitutions run over the whole
//! body. The provider changes its formats from time to time; when that
//! happens, edit the step tables below rather than the code around them.
//!
//! Matching is done on bytes so binary passthrough bodies survive untouched.

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::bytes::{NoExpand, Regex};

/// Characters allowed inside a stripped label: letters of any script,
/// ASCII digits, space, `_`, `,`, `.`, `/` and `-`.
const LABEL_CHARS: &str = r"[\p{L} 0-9_,./-]";

/// `["Sumatera Utara","de"]` style label/locale pairs
static LABEL_PAIR: Lazy<String> =
    Lazy::new(|| format!(r#"\["{c}+","{c}{{2,10}}"\]"#, c = LABEL_CHARS));

/// Quoted place-type icon URLs
static ICON_URL: Lazy<String> = Lazy::new(|| {
    format!(
        r#""https://maps\.gstatic\.com/mapfiles/annotations/icons/{c}+""#,
        c = LABEL_CHARS
    )
});

/// Provider site root, bare or under `www.`/`maps.`
const PROVIDER_ROOT: &str = r"https://(?:www\.|maps\.)?google\.com/";

/// Consent interstitial root
const CONSENT_ROOT: &str = r"https://consent\.google\.com/";

/// Keeps the pair's brackets so the payload still parses
const EMPTY_PAIR: &[u8] = br#"["",""]"#;
const EMPTY_STRING: &[u8] = br#""""#;
const SITE_ROOT: &[u8] = b"/";

static PHOTOMETA_PIPELINE: Lazy<Pipeline> = Lazy::new(|| {
    Pipeline::new(
        "photometa",
        &[
            (LABEL_PAIR.as_str(), EMPTY_PAIR),
            (ICON_URL.as_str(), EMPTY_STRING),
        ],
    )
});

static URL_PIPELINE: Lazy<Pipeline> = Lazy::new(|| {
    Pipeline::new(
        "urls",
        &[(PROVIDER_ROOT, SITE_ROOT), (CONSENT_ROOT, SITE_ROOT)],
    )
});

/// One pattern and its literal replacement
struct Substitution {
    pattern: Regex,
    replacement: &'static [u8],
}

/// Ordered substitutions, each applied to every non-overlapping match
pub struct Pipeline {
    name: &'static str,
    steps: Vec<Substitution>,
}

impl Pipeline {
    fn new(name: &'static str, steps: &[(&str, &'static [u8])]) -> Self {
        let steps = steps
            .iter()
            .map(|&(pattern, replacement)| Substitution {
                pattern: Regex::new(pattern)
                    .unwrap_or_else(|e| panic!("{name} filter pattern {pattern:?}: {e}")),
                replacement,
            })
            .collect();
        Self { name, steps }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Run every step left to right; borrows when nothing matched
    pub fn apply<'a>(&self, body: &'a [u8]) -> Cow<'a, [u8]> {
        let mut out = Cow::Borrowed(body);
        for step in &self.steps {
            let replaced = match step.pattern.replace_all(&out, NoExpand(step.replacement)) {
                Cow::Owned(bytes) => Some(bytes),
                Cow::Borrowed(_) => None,
            };
            if let Some(bytes) = replaced {
                out = Cow::Owned(bytes);
            }
        }
        out
    }

    fn apply_str(&self, body: &str) -> String {
        match self.apply(body.as_bytes()) {
            Cow::Borrowed(_) => body.to_string(),
            // Matches start and end on ASCII, so valid UTF-8 stays valid
            Cow::Owned(bytes) => String::from_utf8(bytes)
                .unwrap_or_else(|e| String::from_utf8_lossy(e.as_bytes()).into_owned()),
        }
    }
}

/// Strip localized labels and icon URLs from a photo metadata payload
pub fn filter_photometa(body: &str) -> String {
    PHOTOMETA_PIPELINE.apply_str(body)
}

/// Point provider and consent links back at this server
pub fn filter_urls(body: &str) -> String {
    URL_PIPELINE.apply_str(body)
}

/// Byte-level [`filter_urls`]
pub fn filter_urls_bytes(body: &[u8]) -> Cow<'_, [u8]> {
    URL_PIPELINE.apply(body)
}

/// Photo metadata requests get the metadata filter, everything else the URL filter
pub fn pipeline_for(target: &str) -> &'static Pipeline {
    if target.contains("photometa") {
        &*PHOTOMETA_PIPELINE
    } else {
        &*URL_PIPELINE
    }
}
