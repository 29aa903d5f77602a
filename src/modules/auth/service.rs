use sha2::{Digest, Sha256};
use subtle::{Choice, ConstantTimeEq};

#[derive(Debug, PartialEq, Eq)]
pub enum Error {
    MissingKey,
    InvalidKey,
}

/// An accepted API key, held only as its SHA-256 digest.
#[derive(Clone)]
pub struct ApiKey {
    digest: [u8; 32],
}

impl ApiKey {
    pub fn new(raw: &str) -> Self {
        Self {
            digest: Sha256::digest(raw.as_bytes()).into(),
        }
    }

    /// Short, non-reversible identifier safe to put in logs.
    pub fn fingerprint(&self) -> String {
        hex::encode(&self.digest[..4])
    }
}

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ApiKey").field(&self.fingerprint()).finish()
    }
}

/// The header carries the bare key; a `Bearer` scheme prefix is tolerated.
fn key_from_header(header: &str) -> &str {
    let header = header.trim();
    if header.eq_ignore_ascii_case("bearer") {
        return "";
    }
    match header.split_once(' ') {
        Some((scheme, key)) if scheme.eq_ignore_ascii_case("bearer") => key.trim(),
        _ => header,
    }
}

pub fn verify_api_key(keys: &[ApiKey], header: &str) -> Result<ApiKey, Error> {
    let presented = key_from_header(header);
    if presented.is_empty() {
        return Err(Error::MissingKey);
    }

    let candidate = ApiKey::new(presented);

    // Every configured key is compared so the timing does not reveal which one matched
    let mut matched = Choice::from(0);
    for key in keys {
        matched |= key.digest[..].ct_eq(&candidate.digest[..]);
    }

    match bool::from(matched) {
        true => Ok(candidate),
        false => Err(Error::InvalidKey),
    }
}
