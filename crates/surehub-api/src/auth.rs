use secrecy::SecretString;

/// Credentials for authenticating with the Sure Petcare cloud.
///
/// The API uses a long-lived bearer token obtained from `auth/login`.
/// A client built from [`Token`](Self::Token) never logs in; one built
/// from [`EmailPassword`](Self::EmailPassword) logs in lazily on the
/// first call and again whenever the server rejects the token.
#[derive(Debug, Clone)]
pub enum Credentials {
    /// A pre-acquired auth token (e.g. carried over from a previous
    /// session by the caller -- this crate never persists tokens).
    Token(String),

    /// Account credentials for the login endpoint.
    EmailPassword {
        email: String,
        password: SecretString,
    },
}

/// Shape check for an auth token, without a network round-trip.
///
/// Sure Petcare tokens are JWT-like blobs: dot-separated base64url
/// segments within a known length window. A token that fails this check
/// is certainly invalid; one that passes may still be rejected server-side.
pub fn token_seems_valid(token: &str) -> bool {
    (320..=448).contains(&token.len())
        && token
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fake_token(len: usize) -> String {
        "eyJ".chars().chain(std::iter::repeat_n('a', len - 3)).collect()
    }

    #[test]
    fn accepts_plausible_token() {
        assert!(token_seems_valid(&fake_token(360)));
    }

    #[test]
    fn rejects_short_token() {
        assert!(!token_seems_valid(&fake_token(40)));
    }

    #[test]
    fn rejects_bad_characters() {
        let mut token = fake_token(360);
        token.push('!');
        assert!(!token_seems_valid(&token));
    }
}
