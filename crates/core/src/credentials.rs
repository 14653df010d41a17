use serde::{Deserialize, Serialize};

/// Kaggle account credentials, read once at startup and immutable afterwards.
///
/// Values never appear in logs; summaries report set/missing markers only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KaggleCredentials {
    pub username: Option<String>,
    pub key: Option<String>,
}

impl KaggleCredentials {
    /// Empty strings count as absent, matching how env values are read.
    pub fn new(username: Option<String>, key: Option<String>) -> Self {
        Self {
            username: username.filter(|s| !s.is_empty()),
            key: key.filter(|s| !s.is_empty()),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.username.is_some() && self.key.is_some()
    }

    /// Env pairs injected into the Kaggle CLI subprocess environment.
    pub fn as_env(&self) -> Vec<(String, String)> {
        let mut vars = Vec::new();
        if let Some(u) = &self.username {
            vars.push(("KAGGLE_USERNAME".to_string(), u.clone()));
        }
        if let Some(k) = &self.key {
            vars.push(("KAGGLE_KEY".to_string(), k.clone()));
        }
        vars
    }

    /// Username/key pair for HTTP Basic auth, when fully configured.
    pub fn basic_auth(&self) -> Option<(&str, &str)> {
        match (&self.username, &self.key) {
            (Some(u), Some(k)) => Some((u.as_str(), k.as_str())),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configured_requires_both_fields() {
        let full = KaggleCredentials::new(Some("alice".into()), Some("k3y".into()));
        assert!(full.is_configured());

        let no_key = KaggleCredentials::new(Some("alice".into()), None);
        assert!(!no_key.is_configured());

        let no_user = KaggleCredentials::new(None, Some("k3y".into()));
        assert!(!no_user.is_configured());
    }

    #[test]
    fn empty_strings_count_as_absent() {
        let creds = KaggleCredentials::new(Some("".into()), Some("k3y".into()));
        assert!(!creds.is_configured());
        assert!(creds.username.is_none());
    }

    #[test]
    fn env_pairs_cover_present_fields_only() {
        let creds = KaggleCredentials::new(Some("alice".into()), None);
        let env = creds.as_env();
        assert_eq!(env, vec![("KAGGLE_USERNAME".to_string(), "alice".to_string())]);
    }

    #[test]
    fn basic_auth_requires_full_configuration() {
        let creds = KaggleCredentials::new(Some("alice".into()), Some("k3y".into()));
        assert_eq!(creds.basic_auth(), Some(("alice", "k3y")));

        let partial = KaggleCredentials::new(Some("alice".into()), None);
        assert!(partial.basic_auth().is_none());
    }
}
