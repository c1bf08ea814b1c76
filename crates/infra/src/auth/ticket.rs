//! Login ticket extraction from the CAS login form

use std::borrow::Cow;
use std::fmt;

use cmslink_domain::constants::LOGIN_TICKET_FIELD;
use once_cell::sync::Lazy;
use regex::Regex;

// comments (an unterminated one runs to the end) and raw-text elements
static INERT_MARKUP: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?is)<!--.*?(?:-->|\z)|<script\b.*?</script\s*>|<style\b.*?</style\s*>|<textarea\b.*?</textarea\s*>|<title\b.*?</title\s*>",
    )
    .expect("INERT_MARKUP should compile - this is a bug")
});

static INPUT_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<input\b[^>]*>").expect("INPUT_TAG should compile - this is a bug"));

// name, then one of double-quoted, single-quoted or bare value
static ATTRIBUTE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?s)([A-Za-z_:][-A-Za-z0-9_:.]*)\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'>/]+))"#)
        .expect("ATTRIBUTE should compile - this is a bug")
});

/// One-time token from the CAS login form. Consumed by the login POST and
/// never logged.
#[derive(Clone, PartialEq, Eq)]
pub struct LoginTicket(String);

impl LoginTicket {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for LoginTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("LoginTicket(<redacted>)")
    }
}

/// Value of the first `<input name="lt">` in `html`.
///
/// Inputs inside comments and raw-text elements (`script`, `style`,
/// `textarea`, `title`) are not form fields and are skipped. Character
/// references in the value are decoded. `None` when the field is missing or
/// its value is absent or empty.
pub fn extract_login_ticket(html: &str) -> Option<LoginTicket> {
    let markup = INERT_MARKUP.replace_all(html, " ");
    let attributes = INPUT_TAG
        .find_iter(&markup)
        .map(|tag| input_attributes(tag.as_str()))
        .find(|attrs| {
            attrs.iter().any(|(name, value)| {
                name.eq_ignore_ascii_case("name") && *value == LOGIN_TICKET_FIELD
            })
        })?;

    let value = attributes
        .into_iter()
        .find_map(|(name, value)| name.eq_ignore_ascii_case("value").then_some(value))?;
    if value.is_empty() {
        return None;
    }
    Some(LoginTicket(decode_entities(value).into_owned()))
}

fn decode_entities(value: &str) -> Cow<'_, str> {
    if !value.contains('&') {
        return Cow::Borrowed(value);
    }
    // `&amp;` last so `&amp;lt;` stays `&lt;`
    Cow::Owned(
        value
            .replace("&quot;", "\"")
            .replace("&#34;", "\"")
            .replace("&#39;", "'")
            .replace("&#x27;", "'")
            .replace("&apos;", "'")
            .replace("&lt;", "<")
            .replace("&gt;", ">")
            .replace("&amp;", "&"),
    )
}

fn input_attributes(tag: &str) -> Vec<(&str, &str)> {
    ATTRIBUTE
        .captures_iter(tag)
        .filter_map(|caps| {
            let name = caps.get(1)?.as_str();
            let value = caps.get(2).or_else(|| caps.get(3)).or_else(|| caps.get(4))?.as_str();
            Some((name, value))
        })
        .collect()
}
