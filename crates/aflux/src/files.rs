//! Files stored alongside an entry.
//!
//! The `files` keyword lists every file AFLOW keeps for an entry. Files are
//! addressed by position or by shell-style glob (`*`, `?`, `[...]`); a glob
//! must select exactly one file.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use regex::Regex;
use tracing::debug;

use crate::error::FileError;
use crate::transport::Transport;

/// One remote file of an entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AflowFile {
    aurl: String,
    filename: String,
}

impl AflowFile {
    pub fn new(aurl: impl Into<String>, filename: impl Into<String>) -> Self {
        AflowFile {
            aurl: aurl.into(),
            filename: filename.into(),
        }
    }

    pub fn aurl(&self) -> &str {
        &self.aurl
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Download address; every `:` of the aurl becomes a path separator.
    pub fn url(&self) -> String {
        format!("http://{}/{}", self.aurl.replace(':', "/"), self.filename)
    }

    /// Fetches the file contents.
    pub fn fetch(&self, transport: &dyn Transport) -> Result<String, FileError> {
        let url = self.url();
        debug!(%url, "fetching file");
        Ok(transport.get_text(&url)?)
    }

    /// Writes the file to `target` and returns its absolute path.
    pub fn download(
        &self,
        transport: &dyn Transport,
        target: impl AsRef<Path>,
    ) -> Result<PathBuf, FileError> {
        let contents = self.fetch(transport)?;
        let path = std::path::absolute(target.as_ref()).map_err(|source| FileError::Io {
            path: target.as_ref().to_path_buf(),
            source,
        })?;
        fs::write(&path, contents).map_err(|source| FileError::Io {
            path: path.clone(),
            source,
        })?;
        Ok(path)
    }
}

impl fmt::Display for AflowFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AflowFile({}/{})", self.aurl, self.filename)
    }
}

/// The file listing of one entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryFiles {
    aurl: String,
    names: Vec<String>,
}

impl EntryFiles {
    pub fn new(aurl: impl Into<String>, names: Vec<String>) -> Self {
        EntryFiles {
            aurl: aurl.into(),
            names: names.into_iter().map(|n| n.trim().to_string()).collect(),
        }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = AflowFile> + '_ {
        self.names
            .iter()
            .map(|name| AflowFile::new(self.aurl.as_str(), name.as_str()))
    }

    /// The file at `index` in listing order.
    pub fn get(&self, index: usize) -> Result<AflowFile, FileError> {
        self.names
            .get(index)
            .map(|name| AflowFile::new(self.aurl.as_str(), name.as_str()))
            .ok_or(FileError::IndexOutOfRange {
                index,
                len: self.names.len(),
            })
    }

    /// The single file matching the glob `pattern`.
    pub fn find(&self, pattern: &str) -> Result<AflowFile, FileError> {
        let matcher = glob(pattern).map_err(|source| FileError::Pattern {
            pattern: pattern.to_string(),
            source,
        })?;
        let mut matches: Vec<&String> = self
            .names
            .iter()
            .filter(|name| matcher.is_match(name))
            .collect();

        match matches.len() {
            0 => Err(FileError::NoMatch {
                pattern: pattern.to_string(),
            }),
            1 => Ok(AflowFile::new(self.aurl.as_str(), matches.remove(0).as_str())),
            _ => Err(FileError::Ambiguous {
                pattern: pattern.to_string(),
                matches: matches.into_iter().cloned().collect(),
            }),
        }
    }
}

/// Translates a shell glob into an anchored regex.
fn glob(pattern: &str) -> Result<Regex, regex::Error> {
    let chars: Vec<char> = pattern.chars().collect();
    let mut out = String::from("^");
    let mut i = 0;

    while i < chars.len() {
        match chars[i] {
            '*' => out.push_str(".*"),
            '?' => out.push('.'),
            '[' => match class_end(&chars, i) {
                Some(end) => {
                    let mut class = String::from("[");
                    let mut j = i + 1;
                    if chars[j] == '!' {
                        class.push('^');
                        j += 1;
                    }
                    for &c in &chars[j..end] {
                        if matches!(c, '\\' | '[' | ']' | '^') {
                            class.push('\\');
                        }
                        class.push(c);
                    }
                    class.push(']');
                    out.push_str(&class);
                    i = end;
                }
                None => out.push_str(r"\["),
            },
            c => out.push_str(&regex::escape(&c.to_string())),
        }
        i += 1;
    }

    out.push('$');
    Regex::new(&out)
}

/// Index of the `]` closing the class opened at `open`. A `]` right after
/// the opening (or after `!`) is a literal member.
fn class_end(chars: &[char], open: usize) -> Option<usize> {
    let mut j = open + 1;
    if chars.get(j) == Some(&'!') {
        j += 1;
    }
    if chars.get(j) == Some(&']') {
        j += 1;
    }
    (j..chars.len()).find(|&k| chars[k] == ']')
}
