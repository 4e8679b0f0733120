//! A single material record returned by AFLUX.

use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};

use aflux_keywords::catalog::{AUID, AURL, FILES};
use aflux_keywords::Field;
use serde_json::{Map, Value as Json};
use tracing::debug;

use crate::caster::{self, Value};
use crate::error::FileError;
use crate::files::EntryFiles;
use crate::transport::Transport;

/// One material: the raw record as received plus its decoded attributes.
///
/// Keywords that were not part of the query can be fetched on demand with
/// [`Entry::load`]. Two entries are equal when they share an `auid`.
#[derive(Debug, Clone)]
pub struct Entry {
    raw: Map<String, Json>,
    attributes: BTreeMap<String, Value>,
}

impl Entry {
    /// Decodes every field of a raw record.
    pub fn from_map(raw: Map<String, Json>) -> Self {
        let attributes = raw
            .iter()
            .map(|(name, value)| (name.clone(), caster::decode_keyword(name, value)))
            .collect();
        Entry { raw, attributes }
    }

    /// The record exactly as the server returned it.
    pub fn raw(&self) -> &Map<String, Json> {
        &self.raw
    }

    pub fn attributes(&self) -> &BTreeMap<String, Value> {
        &self.attributes
    }

    /// Names of the keywords currently held.
    pub fn keywords(&self) -> impl Iterator<Item = &str> + '_ {
        self.attributes.keys().map(String::as_str)
    }

    pub fn get(&self, field: Field) -> Option<&Value> {
        self.attributes.get(field.name())
    }

    pub fn get_named(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    pub fn auid(&self) -> Option<&str> {
        self.get(AUID).and_then(Value::as_str)
    }

    pub fn aurl(&self) -> Option<&str> {
        self.get(AURL).and_then(Value::as_str)
    }

    /// Browsable address of the entry: `http://` plus the aurl with its
    /// host separator turned into a path separator.
    pub fn url(&self) -> Option<String> {
        self.aurl().map(|aurl| format!("http://{}", host_path(aurl)))
    }

    /// Returns `field`, fetching it from the entry's aurl when absent.
    ///
    /// An empty response means the entry has no such keyword.
    pub fn load(
        &mut self,
        field: Field,
        transport: &dyn Transport,
    ) -> Result<Option<&Value>, FileError> {
        let name = field.name();
        if self.attributes.contains_key(name) {
            return Ok(self.attributes.get(name));
        }

        let aurl = self.aurl().ok_or(FileError::MissingAurl)?;
        let url = format!("http://{}?{}", host_path(aurl), name);
        debug!(%url, keyword = name, "loading keyword");

        let body = transport.get_text(&url)?;
        let body = body.trim();
        if body.is_empty() {
            return Ok(None);
        }

        let value = caster::decode(field.wire_type(), &Json::String(body.to_string()));
        Ok(Some(self.attributes.entry(name.to_string()).or_insert(value)))
    }

    /// The files stored for this entry, loading the `files` keyword if needed.
    pub fn files(&mut self, transport: &dyn Transport) -> Result<EntryFiles, FileError> {
        let names = match self.load(FILES, transport)? {
            Some(Value::TextList(names)) => names.clone(),
            _ => Vec::new(),
        };
        let aurl = self.aurl().ok_or(FileError::MissingAurl)?;
        Ok(EntryFiles::new(aurl, names))
    }
}

impl From<Map<String, Json>> for Entry {
    fn from(raw: Map<String, Json>) -> Self {
        Entry::from_map(raw)
    }
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.auid() == other.auid()
    }
}

impl Eq for Entry {}

impl Hash for Entry {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.auid().hash(state);
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.url() {
            Some(url) => f.write_str(&url),
            None => f.write_str(self.auid().unwrap_or("<entry>")),
        }
    }
}

fn host_path(aurl: &str) -> String {
    aurl.replace(".edu:", ".edu/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use aflux_keywords::catalog::{EGAP, ENERGY_ATOM, SPECIES};
    use aflux_keywords::Number;
    use serde_json::json;
    use std::cell::RefCell;
    use std::collections::HashSet;

    use crate::error::FetchError;

    fn be2o2() -> Entry {
        let raw = json!({
            "compound": "Be2O2",
            "auid": "aflow:ed51b7b3938f117f",
            "aurl": "aflowlib.duke.edu:AFLOWDATA/ICSD_WEB/HEX/Be1O1_ICSD_15620",
            "agl_thermal_conductivity_300K": "53.361",
            "Egap": "7.4494"
        });
        match raw {
            Json::Object(map) => Entry::from_map(map),
            _ => unreachable!(),
        }
    }

    struct Recorder {
        body: &'static str,
        urls: RefCell<Vec<String>>,
    }

    impl Transport for Recorder {
        fn get_text(&self, url: &str) -> Result<String, FetchError> {
            self.urls.borrow_mut().push(url.to_string());
            Ok(self.body.to_string())
        }
    }

    #[test]
    fn attributes_are_decoded() {
        let entry = be2o2();
        assert_eq!(entry.get(EGAP).and_then(Value::as_f64), Some(7.4494));
        assert_eq!(
            entry.get_named("agl_thermal_conductivity_300K"),
            Some(&Value::Number(Number::F64(53.361)))
        );
        assert_eq!(entry.raw()["Egap"], json!("7.4494"));
        assert_eq!(entry.keywords().count(), 5);
    }

    #[test]
    fn url_replaces_host_separator() {
        let entry = be2o2();
        assert_eq!(
            entry.url().unwrap(),
            "http://aflowlib.duke.edu/AFLOWDATA/ICSD_WEB/HEX/Be1O1_ICSD_15620"
        );
        assert_eq!(entry.to_string(), entry.url().unwrap());
    }

    #[test]
    fn identity_follows_auid() {
        let a = be2o2();
        let mut b = be2o2();
        b.attributes.insert("Egap".into(), Value::Null);
        assert_eq!(a, b);

        let set: HashSet<Entry> = [a, b].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn load_fetches_missing_keywords_once() {
        let transport = Recorder {
            body: "-7.10342\n",
            urls: RefCell::new(Vec::new()),
        };
        let mut entry = be2o2();

        let energy = entry.load(ENERGY_ATOM, &transport).unwrap().cloned();
        assert_eq!(energy.and_then(|v| v.as_f64()), Some(-7.10342));
        entry.load(ENERGY_ATOM, &transport).unwrap();

        assert_eq!(
            transport.urls.borrow().as_slice(),
            ["http://aflowlib.duke.edu/AFLOWDATA/ICSD_WEB/HEX/Be1O1_ICSD_15620?energy_atom"]
        );
    }

    #[test]
    fn load_skips_present_keywords() {
        let transport = Recorder {
            body: "",
            urls: RefCell::new(Vec::new()),
        };
        let mut entry = be2o2();
        assert!(entry.load(EGAP, &transport).unwrap().is_some());
        assert!(transport.urls.borrow().is_empty());
    }

    #[test]
    fn empty_response_means_absent() {
        let transport = Recorder {
            body: "",
            urls: RefCell::new(Vec::new()),
        };
        let mut entry = be2o2();
        assert!(entry.load(SPECIES, &transport).unwrap().is_none());
        assert!(entry.get(SPECIES).is_none());
    }

    #[test]
    fn load_requires_aurl() {
        let transport = Recorder {
            body: "x",
            urls: RefCell::new(Vec::new()),
        };
        let mut entry = Entry::from_map(Map::new());
        assert!(matches!(
            entry.load(SPECIES, &transport),
            Err(FileError::MissingAurl)
        ));
    }
}
