//! Where secrets come from. Keychain back ends live outside this crate;
//! [`MemoryStore`] serves tests and short-lived tools.

use std::collections::HashMap;
use std::convert::Infallible;

use zeroize::Zeroizing;

/// Secret text looked up by label.
pub trait CredentialStore {
    type Error: std::error::Error + Send + Sync + 'static;

    fn get(&self, label: &str) -> Result<Option<Zeroizing<String>>, Self::Error>;

    /// Stores `secret` under `label`, replacing any previous value.
    fn set(&mut self, label: &str, secret: &str) -> Result<(), Self::Error>;
}

#[derive(Default)]
pub struct MemoryStore {
    entries: HashMap<String, Zeroizing<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CredentialStore for MemoryStore {
    type Error = Infallible;

    fn get(&self, label: &str) -> Result<Option<Zeroizing<String>>, Self::Error> {
        Ok(self.entries.get(label).cloned())
    }

    fn set(&mut self, label: &str, secret: &str) -> Result<(), Self::Error> {
        self.entries
            .insert(label.to_owned(), Zeroizing::new(secret.to_owned()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_replaces_previous_secret() {
        let mut store = MemoryStore::new();
        assert!(store.get("vpn").unwrap().is_none());
        store.set("vpn", "JBSWY3DPEHPK3PXP").unwrap();
        store.set("vpn", "GEZDGNBVGY3TQOJQ").unwrap();
        assert_eq!(store.get("vpn").unwrap().as_deref().map(String::as_str), Some("GEZDGNBVGY3TQOJQ"));
        assert!(store.get("other").unwrap().is_none());
    }
}
