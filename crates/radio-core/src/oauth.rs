//! OAuth 1.0a request signing (HMAC-SHA1), as required by the X API for
//! user-context writes.
//!
//! Only the `Authorization` header flavour is implemented. JSON request
//! bodies are not part of the signature base string; query and form
//! parameters are, and callers pass them in `extra_params`.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use hmac::{Hmac, Mac};
use rand::{distributions::Alphanumeric, Rng};
use sha1::Sha1;

use crate::config::XCredentials;
use crate::error::PublishError;

type HmacSha1 = Hmac<Sha1>;

const SIGNATURE_METHOD: &str = "HMAC-SHA1";
const VERSION: &str = "1.0";
const NONCE_LEN: usize = 32;

/// RFC 3986 percent-encoding: everything except `A-Z a-z 0-9 - . _ ~`.
fn pct(s: &str) -> String {
    urlencoding::encode(s).into_owned()
}

fn nonce() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(NONCE_LEN)
        .map(char::from)
        .collect()
}

/// Build a signed `Authorization: OAuth ...` header value with a fresh
/// nonce and the current time.
pub fn authorization_header(
    method: &str,
    url: &str,
    extra_params: &[(&str, &str)],
    creds: &XCredentials,
) -> Result<String, PublishError> {
    let timestamp = chrono::Utc::now().timestamp();
    authorization_header_with(method, url, extra_params, creds, &nonce(), timestamp)
}

/// Deterministic core of [`authorization_header`].
pub fn authorization_header_with(
    method: &str,
    url: &str,
    extra_params: &[(&str, &str)],
    creds: &XCredentials,
    nonce: &str,
    timestamp: i64,
) -> Result<String, PublishError> {
    let timestamp = timestamp.to_string();
    let mut oauth_params = vec![
        ("oauth_consumer_key", creds.consumer_key.as_str()),
        ("oauth_nonce", nonce),
        ("oauth_signature_method", SIGNATURE_METHOD),
        ("oauth_timestamp", timestamp.as_str()),
        ("oauth_token", creds.access_token.as_str()),
        ("oauth_version", VERSION),
    ];

    let all_params: Vec<(&str, &str)> = oauth_params
        .iter()
        .chain(extra_params.iter())
        .copied()
        .collect();
    let signature = sign(
        method,
        url,
        &all_params,
        &creds.consumer_secret,
        &creds.access_token_secret,
    )?;
    oauth_params.push(("oauth_signature", signature.as_str()));
    oauth_params.sort_by(|a, b| a.0.cmp(b.0));

    let fields: Vec<String> = oauth_params
        .iter()
        .map(|(k, v)| format!("{}=\"{}\"", pct(k), pct(v)))
        .collect();
    Ok(format!("OAuth {}", fields.join(", ")))
}

/// Signature base string per RFC 5849 §3.4.1.
fn base_string(method: &str, url: &str, params: &[(&str, &str)]) -> String {
    let mut encoded: Vec<(String, String)> =
        params.iter().map(|(k, v)| (pct(k), pct(v))).collect();
    encoded.sort();
    let normalized = encoded
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&");
    format!(
        "{}&{}&{}",
        method.to_ascii_uppercase(),
        pct(url),
        pct(&normalized)
    )
}

/// Base64 HMAC-SHA1 of the base string, keyed by both secrets.
fn sign(
    method: &str,
    url: &str,
    params: &[(&str, &str)],
    consumer_secret: &str,
    token_secret: &str,
) -> Result<String, PublishError> {
    let key = format!("{}&{}", pct(consumer_secret), pct(token_secret));
    let mut mac = HmacSha1::new_from_slice(key.as_bytes())
        .map_err(|e| PublishError::Signing(e.to_string()))?;
    mac.update(base_string(method, url, params).as_bytes());
    Ok(STANDARD.encode(mac.finalize().into_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    // Reference values from X's "Creating a signature" developer guide.
    const CONSUMER_SECRET: &str = "kAcSOqF21Fu85e7zjz7ZN2U4ZRhfV3WpwPAoE3Z7kBw";
    const TOKEN_SECRET: &str = "LswwdoUaIvS8ltyTt5jkRh4J50vUPVVHtR2YPi5kE";
    const NONCE: &str = "kYjzVBB8Y0ZFabxSWbWovY3uYSQ2pTgmZeNu2VS4cg";
    const TIMESTAMP: i64 = 1318622958;

    fn creds() -> XCredentials {
        XCredentials {
            consumer_key: "xvz1evFS4wEEPTGEFPHBog".into(),
            consumer_secret: CONSUMER_SECRET.into(),
            access_token: "370773112-GmHxMAgYyLbNEtIKZeRNFsMKPR9EyMZeS9weJAEb".into(),
            access_token_secret: TOKEN_SECRET.into(),
        }
    }

    #[test]
    fn pct_encodes_reserved_but_not_unreserved() {
        assert_eq!(pct("Ladies + Gentlemen"), "Ladies%20%2B%20Gentlemen");
        assert_eq!(pct("a-b.c_d~e"), "a-b.c_d~e");
        assert_eq!(pct("!"), "%21");
    }

    #[test]
    fn signature_matches_reference_vector() {
        let header = authorization_header_with(
            "POST",
            "https://api.twitter.com/1.1/statuses/update.json",
            &[
                ("include_entities", "true"),
                ("status", "Hello Ladies + Gentlemen, a signed OAuth request!"),
            ],
            &creds(),
            NONCE,
            TIMESTAMP,
        )
        .unwrap();

        assert!(
            header.contains("oauth_signature=\"hCtSmYh%2BiHYCEqBWrE7C7hYmtUk%3D\""),
            "header: {header}"
        );
    }

    #[test]
    fn header_lists_oauth_fields_sorted() {
        let header = authorization_header_with(
            "post",
            "https://api.twitter.com/2/tweets",
            &[],
            &creds(),
            NONCE,
            TIMESTAMP,
        )
        .unwrap();

        assert_eq!(
            header,
            "OAuth oauth_consumer_key=\"xvz1evFS4wEEPTGEFPHBog\", \
             oauth_nonce=\"kYjzVBB8Y0ZFabxSWbWovY3uYSQ2pTgmZeNu2VS4cg\", \
             oauth_signature=\"KW%2FbTR%2F89oblzvjn7CwP2L8j5qQ%3D\", \
             oauth_signature_method=\"HMAC-SHA1\", \
             oauth_timestamp=\"1318622958\", \
             oauth_token=\"370773112-GmHxMAgYyLbNEtIKZeRNFsMKPR9EyMZeS9weJAEb\", \
             oauth_version=\"1.0\""
        );
    }

    #[test]
    fn fresh_headers_use_distinct_nonces() {
        let url = "https://api.twitter.com/2/tweets";
        let a = authorization_header("POST", url, &[], &creds()).unwrap();
        let b = authorization_header("POST", url, &[], &creds()).unwrap();
        assert_ne!(a, b);
    }
}
