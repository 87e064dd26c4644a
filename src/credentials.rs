use serde::Deserialize;
use tracing::error;

/// Narrow capability the submission engine needs: a bearer token, or nothing.
/// The read is synchronous and side-effect free; it happens immediately
/// before every request so a logged-out session fails fast without touching
/// the network.
pub trait CredentialProvider: Send + Sync {
    fn bearer_token(&self) -> Option<String>;
}

/// Wherever the persisted session blob lives (browser storage, a file, a
/// keychain). Absence is an ordinary answer, not an error.
pub trait SessionStorage: Send + Sync {
    fn read(&self) -> Option<String>;
}

// Shape of the persisted session: { "tokens": { "access": { "token": .. } } }
#[derive(Debug, Deserialize)]
struct StoredSession {
    tokens: SessionTokens,
}

#[derive(Debug, Deserialize)]
struct SessionTokens {
    access: AccessToken,
}

#[derive(Debug, Deserialize)]
struct AccessToken {
    token: String,
}

/// Reads the bearer token out of a persisted session object. A missing or
/// unparsable session is treated as "no credential", never a crash.
pub struct StoredSessionCredentials<S> {
    storage: S,
}

impl<S: SessionStorage> StoredSessionCredentials<S> {
    pub fn new(storage: S) -> StoredSessionCredentials<S> {
        StoredSessionCredentials { storage }
    }
}

impl<S: SessionStorage> CredentialProvider for StoredSessionCredentials<S> {
    fn bearer_token(&self) -> Option<String> {
        let raw = self.storage.read()?;
        let session = match serde_json::from_str::<StoredSession>(&raw) {
            Ok(session) => session,
            Err(err) => {
                error!("Failed to parse stored session ===> {}", err);
                return None;
            }
        };

        let token = session.tokens.access.token;
        if token.trim().is_empty() {
            return None;
        }
        Some(token)
    }
}

/// Fixed token, for tests and hosts that manage credentials themselves.
pub struct StaticToken(pub String);

impl CredentialProvider for StaticToken {
    fn bearer_token(&self) -> Option<String> {
        if self.0.trim().is_empty() {
            None
        } else {
            Some(self.0.clone())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedStorage(Option<&'static str>);

    impl SessionStorage for FixedStorage {
        fn read(&self) -> Option<String> {
            self.0.map(String::from)
        }
    }

    #[test]
    fn reads_token_from_stored_session() {
        let credentials = StoredSessionCredentials::new(FixedStorage(Some(
            r#"{ "tokens": { "access": { "token": "abc123" } } }"#,
        )));
        assert_eq!(credentials.bearer_token().as_deref(), Some("abc123"));
    }

    #[test]
    fn missing_session_is_no_credential() {
        let credentials = StoredSessionCredentials::new(FixedStorage(None));
        assert!(credentials.bearer_token().is_none());
    }

    #[test]
    fn malformed_session_is_no_credential() {
        let credentials =
            StoredSessionCredentials::new(FixedStorage(Some("not json at all")));
        assert!(credentials.bearer_token().is_none());

        let credentials =
            StoredSessionCredentials::new(FixedStorage(Some(r#"{ "tokens": {} }"#)));
        assert!(credentials.bearer_token().is_none());
    }

    #[test]
    fn blank_token_is_no_credential() {
        let credentials = StoredSessionCredentials::new(FixedStorage(Some(
            r#"{ "tokens": { "access": { "token": "  " } } }"#,
        )));
        assert!(credentials.bearer_token().is_none());
    }
}
