//! Identifier and type redaction.
//!
//! Identifiers (field names and string map keys) are compared after
//! normalization: ASCII lowercase with `_`, `-`, `$` and `@` removed, so
//! `api_key`, `apiKey` and `API-KEY` all match the keyword `apikey`.
//!
//! Type patterns either match a type name exactly or, when they end with `*`,
//! match every type name starting with the text before the `*`.

use std::{collections::BTreeSet, sync::LazyLock};

// =============================================================================
// RedactionPolicy trait
// =============================================================================

/// Decides which values must never be captured.
///
/// The serializer consults `is_redacted_keyword` for field names and string map
/// keys, and `is_redacted_type` for every value's type name.
pub trait RedactionPolicy {
    /// Whether a value stored under this identifier is redacted.
    fn is_redacted_keyword(&self, identifier: &str) -> bool;

    /// Whether every value of this type is redacted.
    fn is_redacted_type(&self, type_name: &str) -> bool;
}

impl<P: RedactionPolicy + ?Sized> RedactionPolicy for &P {
    fn is_redacted_keyword(&self, identifier: &str) -> bool {
        (**self).is_redacted_keyword(identifier)
    }

    fn is_redacted_type(&self, type_name: &str) -> bool {
        (**self).is_redacted_type(type_name)
    }
}

/// Keywords redacted by default, in normalized form.
pub const DEFAULT_KEYWORDS: &[&str] = &[
    "2fa",
    "accesstoken",
    "apikey",
    "apisecret",
    "apisignature",
    "applicationkey",
    "auth",
    "authorization",
    "authtoken",
    "ccnumber",
    "certificatepin",
    "cipher",
    "clientid",
    "clientsecret",
    "connectionstring",
    "connectsid",
    "cookie",
    "credentials",
    "creditcard",
    "csrf",
    "csrftoken",
    "cvv",
    "databaseurl",
    "dburl",
    "encryptionkey",
    "encryptionkeyid",
    "geolocation",
    "gpgkey",
    "ipaddress",
    "jti",
    "jwt",
    "licensekey",
    "masterkey",
    "mysqlpwd",
    "nonce",
    "oauth",
    "oauthtoken",
    "otp",
    "passhash",
    "passwd",
    "password",
    "passwordb",
    "pemfile",
    "pgpkey",
    "phpsessid",
    "pin",
    "pincode",
    "pkcs8",
    "privatekey",
    "publickey",
    "pwd",
    "recaptchakey",
    "refreshtoken",
    "routingnumber",
    "salt",
    "secret",
    "secretkey",
    "secrettoken",
    "securityanswer",
    "securitycode",
    "securityquestion",
    "serviceaccountcredentials",
    "session",
    "sessionid",
    "sessionkey",
    "setcookie",
    "signature",
    "signaturekey",
    "sshkey",
    "ssn",
    "symfony",
    "token",
    "transactionid",
    "twiliotoken",
    "usersession",
    "voterid",
    "xapikey",
    "xauthtoken",
    "xcsrftoken",
    "xforwardedfor",
    "xrealip",
    "xsrf",
    "xsrftoken",
];

static DEFAULT_KEYWORD_SET: LazyLock<BTreeSet<&'static str>> =
    LazyLock::new(|| DEFAULT_KEYWORDS.iter().copied().collect());

/// Normalizes an identifier for keyword comparison.
pub fn normalize_identifier(identifier: &str) -> String {
    identifier
        .chars()
        .filter(|c| !matches!(c, '_' | '-' | '$' | '@'))
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

// =============================================================================
// DefaultRedaction
// =============================================================================

/// Redacts the [`DEFAULT_KEYWORDS`] and no types.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultRedaction;

impl RedactionPolicy for DefaultRedaction {
    fn is_redacted_keyword(&self, identifier: &str) -> bool {
        DEFAULT_KEYWORD_SET.contains(normalize_identifier(identifier).as_str())
    }

    fn is_redacted_type(&self, _type_name: &str) -> bool {
        false
    }
}

// =============================================================================
// KeywordRedaction
// =============================================================================

/// Configurable redaction: default keywords plus and minus user identifiers,
/// and exact or wildcard type patterns.
#[derive(Clone, Debug)]
pub struct KeywordRedaction {
    keywords: BTreeSet<String>,
    exact_types: BTreeSet<String>,
    type_prefixes: Vec<String>,
}

impl KeywordRedaction {
    pub fn builder() -> KeywordRedactionBuilder {
        KeywordRedactionBuilder::default()
    }
}

impl Default for KeywordRedaction {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl RedactionPolicy for KeywordRedaction {
    fn is_redacted_keyword(&self, identifier: &str) -> bool {
        self.keywords.contains(&normalize_identifier(identifier))
    }

    fn is_redacted_type(&self, type_name: &str) -> bool {
        self.exact_types.contains(type_name)
            || self
                .type_prefixes
                .iter()
                .any(|prefix| type_name.starts_with(prefix.as_str()))
    }
}

/// Builder for [`KeywordRedaction`].
#[derive(Clone, Debug, Default)]
pub struct KeywordRedactionBuilder {
    added: Vec<String>,
    excluded: Vec<String>,
    types: Vec<String>,
    without_defaults: bool,
}

impl KeywordRedactionBuilder {
    /// Adds an identifier to redact.
    #[must_use]
    pub fn redact_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.added.push(identifier.into());
        self
    }

    /// Removes an identifier from the redacted set, including default keywords.
    #[must_use]
    pub fn exclude_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.excluded.push(identifier.into());
        self
    }

    /// Adds a type pattern; a trailing `*` matches any suffix.
    #[must_use]
    pub fn redact_type(mut self, pattern: impl Into<String>) -> Self {
        self.types.push(pattern.into());
        self
    }

    /// Starts from an empty keyword set instead of [`DEFAULT_KEYWORDS`].
    #[must_use]
    pub fn without_defaults(mut self) -> Self {
        self.without_defaults = true;
        self
    }

    pub fn build(self) -> KeywordRedaction {
        let mut keywords: BTreeSet<String> = if self.without_defaults {
            BTreeSet::new()
        } else {
            DEFAULT_KEYWORDS.iter().map(ToString::to_string).collect()
        };
        keywords.extend(self.added.iter().map(|id| normalize_identifier(id)));
        for excluded in &self.excluded {
            keywords.remove(&normalize_identifier(excluded));
        }

        let mut exact_types = BTreeSet::new();
        let mut type_prefixes = Vec::new();
        for pattern in self.types {
            match pattern.strip_suffix('*') {
                Some(prefix) => type_prefixes.push(prefix.to_string()),
                None => {
                    exact_types.insert(pattern);
                }
            }
        }

        KeywordRedaction {
            keywords,
            exact_types,
            type_prefixes,
        }
    }
}
