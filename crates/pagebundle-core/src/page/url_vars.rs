//! Query-string variables of the page URL.

use percent_encoding::percent_decode_str;
use url::Url;

/// Ordered `name -> value` table of a URL's query string (values percent-decoded).
///
/// Only `%XX` escapes are decoded; a literal `+` stays a `+`.
///
/// A name repeated later overwrites the value but keeps its first position.
/// A bare name (`?debug`) maps to an empty value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlVars {
    vars: Vec<(String, String)>,
}

impl UrlVars {
    pub fn parse(url: &str) -> Result<Self, url::ParseError> {
        let parsed = Url::parse(url)?;
        let mut vars: Vec<(String, String)> = Vec::new();
        let pairs = parsed.query().unwrap_or("").split('&').filter(|p| !p.is_empty());
        for pair in pairs {
            let (name, value) = pair.split_once('=').unwrap_or((pair, ""));
            let name = decode(name);
            let value = decode(value);
            match vars.iter_mut().find(|(n, _)| *n == name) {
                Some(slot) => slot.1 = value,
                None => vars.push((name, value)),
            }
        }
        Ok(Self { vars })
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

fn decode(part: &str) -> String {
    percent_decode_str(part).decode_utf8_lossy().into_owned()
}
