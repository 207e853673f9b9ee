use std::fmt;

pub const METHOD_KEY_SEPARATOR: char = '|';

/// Identifier of an impact-assessment method, e.g.
/// `("IPCC 2013", "climate change", "GWP 100a")`.
///
/// The path is opaque to this crate; only the impact engine interprets it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ImpactMethod {
    path: Vec<String>,
}

impl ImpactMethod {
    pub fn new<I, S>(path: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            path: path.into_iter().map(Into::into).collect(),
        }
    }

    /// Parses a `|`-separated key such as `IPCC 2013|climate change|GWP 100a`.
    pub fn from_key(key: &str) -> Option<Self> {
        let path: Vec<String> = key
            .split(METHOD_KEY_SEPARATOR)
            .map(|part| part.trim().to_string())
            .collect();
        if path.iter().any(|part| part.is_empty()) {
            return None;
        }
        Some(Self { path })
    }

    pub fn path(&self) -> &[String] {
        &self.path
    }

    pub fn key(&self) -> String {
        self.path.join(&METHOD_KEY_SEPARATOR.to_string())
    }
}

impl fmt::Display for ImpactMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({})", self.path.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_key_trims_components() {
        let method = ImpactMethod::from_key("IPCC 2013 | climate change | GWP 100a").unwrap();
        assert_eq!(
            method.path(),
            &["IPCC 2013", "climate change", "GWP 100a"]
        );
        assert_eq!(method.key(), "IPCC 2013|climate change|GWP 100a");
    }

    #[test]
    fn from_key_rejects_empty_components() {
        assert!(ImpactMethod::from_key("IPCC 2013||GWP 100a").is_none());
        assert!(ImpactMethod::from_key("").is_none());
    }

    #[test]
    fn display_lists_path_as_tuple() {
        let method = ImpactMethod::new(["a", "b"]);
        assert_eq!(method.to_string(), "(a, b)");
    }
}
