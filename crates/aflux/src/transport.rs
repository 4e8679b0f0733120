//! The seam between queries and the network.
//!
//! A [`Transport`] turns a URL into a response body. Queries only need JSON
//! objects, which the provided [`Transport::fetch_json`] derives from the text;
//! entries also fetch plain text (lazy keywords and files).

use std::rc::Rc;

use serde_json::{Map, Value};

use crate::error::FetchError;

/// A decoded AFLUX page: positional keys mapped to raw records.
pub type Page = Map<String, Value>;

/// A source of response bodies.
///
/// Implementations perform one blocking request per call and never retry.
pub trait Transport {
    /// Fetches the body behind `url` as text.
    fn get_text(&self, url: &str) -> Result<String, FetchError>;

    /// Fetches `url` and decodes the body as a JSON object.
    fn fetch_json(&self, url: &str) -> Result<Page, FetchError> {
        let body = self.get_text(url)?;
        decode_object(url, body)
    }
}

impl<T: Transport + ?Sized> Transport for &T {
    fn get_text(&self, url: &str) -> Result<String, FetchError> {
        (**self).get_text(url)
    }

    fn fetch_json(&self, url: &str) -> Result<Page, FetchError> {
        (**self).fetch_json(url)
    }
}

impl<T: Transport + ?Sized> Transport for Rc<T> {
    fn get_text(&self, url: &str) -> Result<String, FetchError> {
        (**self).get_text(url)
    }

    fn fetch_json(&self, url: &str) -> Result<Page, FetchError> {
        (**self).fetch_json(url)
    }
}

/// Parses a response body that must hold a JSON object.
pub fn decode_object(url: &str, body: String) -> Result<Page, FetchError> {
    match serde_json::from_str::<Value>(&body) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(FetchError::NotAnObject {
            url: url.to_string(),
            body,
        }),
        Err(source) => Err(FetchError::Decode {
            url: url.to_string(),
            body,
            source,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Canned(&'static str);

    impl Transport for Canned {
        fn get_text(&self, _url: &str) -> Result<String, FetchError> {
            Ok(self.0.to_string())
        }
    }

    #[test]
    fn fetch_json_decodes_objects() {
        let page = Canned(r#"{"1 of 2": {"auid": "a"}, "2 of 2": {}}"#)
            .fetch_json("u")
            .unwrap();
        assert_eq!(page.len(), 2);
        assert_eq!(page.keys().next().map(String::as_str), Some("1 of 2"));
    }

    #[test]
    fn fetch_json_rejects_non_objects() {
        let err = Canned("[1, 2]").fetch_json("u").unwrap_err();
        assert!(matches!(err, FetchError::NotAnObject { ref body, .. } if body == "[1, 2]"));
    }

    #[test]
    fn fetch_json_reports_body_on_decode_failure() {
        let err = Canned("<html>").fetch_json("http://x").unwrap_err();
        assert_eq!(err.url(), Some("http://x"));
        assert_eq!(err.body(), Some("<html>"));
    }

    #[test]
    fn shared_transports_delegate() {
        let shared: Rc<dyn Transport> = Rc::new(Canned("{}"));
        assert!(shared.fetch_json("u").unwrap().is_empty());
        assert!((&Canned("{}")).fetch_json("u").unwrap().is_empty());
    }
}
