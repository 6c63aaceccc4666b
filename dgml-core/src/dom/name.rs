//! Element and attribute names

use std::fmt;
use std::str::FromStr;

/// A name as it appears in the source, with its resolved namespace
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QName {
    /// Resolved namespace URI
    pub namespace: Option<String>,
    /// Prefix as written, if any
    pub prefix: Option<String>,
    /// Local part of the name
    pub local: String,
}

impl QName {
    /// `prefix:local` or `local`, as written in the source
    pub fn qualified(&self) -> String {
        match &self.prefix {
            Some(prefix) => format!("{prefix}:{}", self.local),
            None => self.local.clone(),
        }
    }

    /// Whether namespace and local name equal the given expanded name
    pub fn matches(&self, name: &ExpandedName) -> bool {
        self.local == name.local && self.namespace.as_deref() == name.namespace.as_deref()
    }

    /// The prefix-free identity of this name
    pub fn expanded(&self) -> ExpandedName {
        ExpandedName {
            namespace: self.namespace.clone(),
            local: self.local.clone(),
        }
    }
}

/// A namespace URI plus local name, written in Clark notation (`{uri}local`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ExpandedName {
    /// Namespace URI, `None` for names outside any namespace
    pub namespace: Option<String>,
    /// Local part of the name
    pub local: String,
}

impl ExpandedName {
    /// Create a name in the given namespace
    pub fn new(namespace: Option<&str>, local: impl Into<String>) -> Self {
        Self {
            namespace: namespace.map(str::to_string),
            local: local.into(),
        }
    }

    /// Create a name outside any namespace
    pub fn local(local: impl Into<String>) -> Self {
        Self {
            namespace: None,
            local: local.into(),
        }
    }

    /// A sibling name sharing this name's namespace
    pub fn with_local(&self, local: impl Into<String>) -> Self {
        Self {
            namespace: self.namespace.clone(),
            local: local.into(),
        }
    }
}

impl fmt::Display for ExpandedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.namespace {
            Some(ns) => write!(f, "{{{ns}}}{}", self.local),
            None => f.write_str(&self.local),
        }
    }
}

/// Error returned when a Clark-notation name is malformed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseNameError(String);

impl fmt::Display for ParseNameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid expanded name '{}'", self.0)
    }
}

impl std::error::Error for ParseNameError {}

impl FromStr for ExpandedName {
    type Err = ParseNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseNameError(s.to_string());
        let (namespace, local) = match s.strip_prefix('{') {
            Some(rest) => {
                let (ns, local) = rest.split_once('}').ok_or_else(invalid)?;
                if ns.is_empty() {
                    (None, local)
                } else {
                    (Some(ns.to_string()), local)
                }
            }
            None => (None, s),
        };
        let reserved: &[char] = &['{', '}', ':'];
        if local.is_empty() || local.contains(reserved) || local.contains(char::is_whitespace) {
            return Err(invalid());
        }
        Ok(Self {
            namespace,
            local: local.to_string(),
        })
    }
}
