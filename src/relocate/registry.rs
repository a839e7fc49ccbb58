use std::collections::HashMap;

/// Content hash to destination file name, scoped to a single run.
#[derive(Debug, Default, Clone)]
pub struct HashRegistry {
    names: HashMap<String, String>,
}

impl HashRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Destination name previously registered for a hash.
    pub fn lookup(&self, hash: &str) -> Option<&str> {
        self.names.get(hash).map(String::as_str)
    }

    /// Record the destination name for a hash, replacing any earlier entry.
    pub fn register(&mut self, hash: impl Into<String>, file_name: impl Into<String>) {
        self.names.insert(hash.into(), file_name.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_returns_registered_name() {
        let mut registry = HashRegistry::new();
        assert_eq!(registry.lookup("abc"), None);
        registry.register("abc", "a.png");
        assert_eq!(registry.lookup("abc"), Some("a.png"));
        assert_eq!(registry.lookup("def"), None);
    }
}
