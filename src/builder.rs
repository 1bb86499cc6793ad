//! URL construction from the form fields.
//!
//! Two modes:
//! - **Engine mode** (no base URL): `<engine endpoint>?q=<encoded term>`
//! - **Params mode** (base URL given): `<base>?params=<encoded JSON>` or
//!   `<base>&params=<encoded JSON>` when the base already carries a query.
//!
//! Encoding follows JavaScript's `encodeURIComponent` so links built here are
//! byte-identical to the ones produced by the web version of the tool.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Characters left unescaped by `encodeURIComponent`: `A-Z a-z 0-9 - _ . ! ~ * ' ( )`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BuildError {
    /// The search term was empty or whitespace-only.
    #[error("search term is empty")]
    EmptyTerm,

    /// The params payload could not be serialized.
    #[error("failed to serialize params payload: {0}")]
    Payload(String),
}

// ============================================================================
// Engine
// ============================================================================

/// Search provider used when no base URL is given.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Engine {
    #[default]
    Google,
    Bing,
}

impl Engine {
    /// Parse an engine name (case-insensitive).
    pub fn from_str_name(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "google" => Some(Self::Google),
            "bing" => Some(Self::Bing),
            _ => None,
        }
    }

    pub fn endpoint(self) -> &'static str {
        match self {
            Self::Google => "https://www.google.com/search",
            Self::Bing => "https://www.bing.com/search",
        }
    }

    /// Cycle to the next engine: Google → Bing → Google.
    pub fn next(self) -> Self {
        match self {
            Self::Google => Self::Bing,
            Self::Bing => Self::Google,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Google => "Google",
            Self::Bing => "Bing",
        }
    }
}

// ============================================================================
// Params payload
// ============================================================================

/// Fixed fields embedded in the params-mode JSON payload.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ParamDefaults {
    /// Serialized as `corp`.
    pub organization: String,
    /// Serialized as `baseDados`.
    pub dataset: String,
}

impl Default for ParamDefaults {
    fn default() -> Self {
        Self {
            organization: "corporação".to_string(),
            dataset: "users".to_string(),
        }
    }
}

/// Wire shape of the `params` query value. Field order is part of the output.
#[derive(Serialize)]
struct ParamsPayload<'a> {
    q: &'a str,
    corp: &'a str,
    #[serde(rename = "baseDados")]
    base_dados: &'a str,
    advanced: bool,
}

// ============================================================================
// Build
// ============================================================================

/// The three user-editable inputs of the form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchRequest {
    pub search_term: String,
    pub base_url: String,
    pub engine: Engine,
}

impl SearchRequest {
    pub fn build(&self, params: &ParamDefaults) -> Result<String, BuildError> {
        build(&self.search_term, &self.base_url, self.engine, params)
    }
}

/// Percent-encode a string the way `encodeURIComponent` does.
pub fn encode_component(s: &str) -> String {
    utf8_percent_encode(s, URI_COMPONENT).to_string()
}

/// Build the final URL.
///
/// Both inputs are trimmed. A blank term yields [`BuildError::EmptyTerm`].
/// A non-blank base URL switches to params mode, otherwise the engine's
/// endpoint is used.
pub fn build(
    search_term: &str,
    base_url: &str,
    engine: Engine,
    params: &ParamDefaults,
) -> Result<String, BuildError> {
    let term = search_term.trim();
    if term.is_empty() {
        return Err(BuildError::EmptyTerm);
    }

    let base = base_url.trim();
    if base.is_empty() {
        return Ok(format!("{}?q={}", engine.endpoint(), encode_component(term)));
    }

    let payload = ParamsPayload {
        q: term,
        corp: &params.organization,
        base_dados: &params.dataset,
        advanced: true,
    };
    let json = serde_json::to_string(&payload).map_err(|e| BuildError::Payload(e.to_string()))?;
    let separator = if base.contains('?') { '&' } else { '?' };

    Ok(format!(
        "{}{}params={}",
        base,
        separator,
        encode_component(&json)
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn defaults() -> ParamDefaults {
        ParamDefaults::default()
    }

    #[test]
    fn google_plain_term() {
        let url = build("cats", "", Engine::Google, &defaults()).unwrap();
        assert_eq!(url, "https://www.google.com/search?q=cats");
    }

    #[test]
    fn bing_plain_term() {
        let url = build("cats", "", Engine::Bing, &defaults()).unwrap();
        assert_eq!(url, "https://www.bing.com/search?q=cats");
    }

    #[test]
    fn term_is_trimmed_and_encoded() {
        let url = build("  rust & tokio ", "   ", Engine::Google, &defaults()).unwrap();
        assert_eq!(url, "https://www.google.com/search?q=rust%20%26%20tokio");
    }

    #[test]
    fn encoding_matches_encode_uri_component() {
        assert_eq!(encode_component("a-b_c.d!e~f*g'h(i)j"), "a-b_c.d!e~f*g'h(i)j");
        assert_eq!(encode_component("a b+c/d?e=f&g#h"), "a%20b%2Bc%2Fd%3Fe%3Df%26g%23h");
        assert_eq!(encode_component("ção"), "%C3%A7%C3%A3o");
        assert_eq!(encode_component("\"{}:,"), "%22%7B%7D%3A%2C");
    }

    #[test]
    fn params_mode_without_query() {
        let url = build("cats", "https://x.com/api", Engine::Google, &defaults()).unwrap();
        let expected_json = r#"{"q":"cats","corp":"corporação","baseDados":"users","advanced":true}"#;
        assert_eq!(
            url,
            format!("https://x.com/api?params={}", encode_component(expected_json))
        );
    }

    #[test]
    fn params_mode_with_existing_query() {
        let url = build("cats", "https://x.com/api?x=1", Engine::Bing, &defaults()).unwrap();
        assert!(url.starts_with("https://x.com/api?x=1&params="));
        assert!(url.contains(&encode_component(r#""q":"cats""#)));
    }

    #[test]
    fn params_mode_ignores_engine() {
        let google = build("cats", "https://x.com", Engine::Google, &defaults()).unwrap();
        let bing = build("cats", "https://x.com", Engine::Bing, &defaults()).unwrap();
        assert_eq!(google, bing);
    }

    #[test]
    fn base_url_is_trimmed() {
        let url = build("cats", "  https://x.com/api  ", Engine::Google, &defaults()).unwrap();
        assert!(url.starts_with("https://x.com/api?params="));
    }

    #[test]
    fn custom_param_defaults() {
        let params = ParamDefaults {
            organization: "acme".to_string(),
            dataset: "orders".to_string(),
        };
        let url = build("x", "https://x.com", Engine::Google, &params).unwrap();
        let expected_json = r#"{"q":"x","corp":"acme","baseDados":"orders","advanced":true}"#;
        assert_eq!(
            url,
            format!("https://x.com?params={}", encode_component(expected_json))
        );
    }

    #[test]
    fn json_escapes_quotes_in_term() {
        let url = build(r#"say "hi""#, "https://x.com", Engine::Google, &defaults()).unwrap();
        assert!(url.contains(&encode_component(r#""q":"say \"hi\"""#)));
    }

    #[test]
    fn empty_term_rejected() {
        assert_eq!(
            build("", "", Engine::Google, &defaults()),
            Err(BuildError::EmptyTerm)
        );
        assert_eq!(
            build(" \t\n ", "https://x.com", Engine::Bing, &defaults()),
            Err(BuildError::EmptyTerm)
        );
    }

    #[test]
    fn request_builds_through_free_function() {
        let req = SearchRequest {
            search_term: "dogs".to_string(),
            base_url: String::new(),
            engine: Engine::Bing,
        };
        assert_eq!(
            req.build(&defaults()).unwrap(),
            "https://www.bing.com/search?q=dogs"
        );
    }

    #[test]
    fn engine_from_str_name() {
        assert_eq!(Engine::from_str_name("google"), Some(Engine::Google));
        assert_eq!(Engine::from_str_name(" BING "), Some(Engine::Bing));
        assert_eq!(Engine::from_str_name("duckduckgo"), None);
    }

    #[test]
    fn engine_cycles() {
        assert_eq!(Engine::Google.next(), Engine::Bing);
        assert_eq!(Engine::Bing.next(), Engine::Google);
    }

    /// Decode the `params` value of a params-mode link.
    fn decode_params(url: &str) -> serde_json::Value {
        let (_, encoded) = url.split_once("params=").unwrap();
        let json = percent_encoding::percent_decode_str(encoded)
            .decode_utf8()
            .unwrap();
        serde_json::from_str(&json).unwrap()
    }

    fn non_blank() -> impl Strategy<Value = String> {
        "\\PC{0,40}".prop_filter("must not be blank", |s| !s.trim().is_empty())
    }

    proptest! {
        #[test]
        fn engine_mode_shape(term in non_blank()) {
            let url = build(&term, "", Engine::Google, &defaults()).unwrap();
            prop_assert_eq!(
                url,
                format!("https://www.google.com/search?q={}", encode_component(term.trim()))
            );
        }

        #[test]
        fn params_separator_follows_query(term in non_blank(), with_query in any::<bool>()) {
            let base = if with_query { "https://x.com/s?a=1" } else { "https://x.com/s" };
            let url = build(&term, base, Engine::Google, &defaults()).unwrap();
            let sep = if with_query { "&params=" } else { "?params=" };
            let prefix = format!("{base}{sep}");
            prop_assert!(url.starts_with(&prefix));
        }

        #[test]
        fn params_value_carries_full_payload(term in non_blank()) {
            let url = build(&term, "https://x.com/s", Engine::Google, &defaults()).unwrap();
            let json = decode_params(&url);
            prop_assert_eq!(json["q"].as_str(), Some(term.trim()));
            prop_assert_eq!(json["corp"].as_str(), Some("corporação"));
            prop_assert_eq!(json["baseDados"].as_str(), Some("users"));
            prop_assert_eq!(json["advanced"].as_bool(), Some(true));
        }

        #[test]
        fn build_is_deterministic(term in "\\PC{0,40}", base in "\\PC{0,20}") {
            let a = build(&term, &base, Engine::Bing, &defaults());
            let b = build(&term, &base, Engine::Bing, &defaults());
            prop_assert_eq!(a, b);
        }

        #[test]
        fn blank_term_always_rejected(ws in "[ \t\r\n]{0,10}", base in "\\PC{0,20}") {
            prop_assert_eq!(
                build(&ws, &base, Engine::Google, &defaults()),
                Err(BuildError::EmptyTerm)
            );
        }
    }
}
