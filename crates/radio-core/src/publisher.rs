use serde::{Deserialize, Serialize};

use crate::config::{XCredentials, DEFAULT_X_BASE_URL};
use crate::error::PublishError;
use crate::oauth;

/// Longest post the platform accepts, as measured by [`weighted_len`].
pub const MAX_POST_WEIGHT: usize = 280;

/// Code point ranges X counts once. Everything outside them (CJK, Hangul,
/// emoji) counts twice.
const SINGLE_WEIGHT_RANGES: &[(char, char)] = &[
    ('\u{0000}', '\u{10FF}'),
    ('\u{2000}', '\u{200D}'),
    ('\u{2010}', '\u{201F}'),
    ('\u{2032}', '\u{2037}'),
];

/// Post length the way X weighs it: 1 per code point in the Latin-ish
/// ranges, 2 for the rest.
///
/// Emoji sequences are weighed per code point, so joined emoji come out
/// heavier than X would count them. The guard errs on the strict side.
pub fn weighted_len(text: &str) -> usize {
    text.chars()
        .map(|c| {
            if SINGLE_WEIGHT_RANGES
                .iter()
                .any(|&(lo, hi)| (lo..=hi).contains(&c))
            {
                1
            } else {
                2
            }
        })
        .sum()
}

/// Makes a name public. Irreversible from this system's point of view.
pub trait Publisher {
    fn publish(&self, text: &str) -> Result<(), PublishError>;
}

impl<T: Publisher + ?Sized> Publisher for &T {
    fn publish(&self, text: &str) -> Result<(), PublishError> {
        (**self).publish(text)
    }
}

#[derive(Debug, Serialize)]
struct CreatePost<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct CreatePostResponse {
    data: CreatedPost,
}

#[derive(Debug, Deserialize)]
struct CreatedPost {
    id: String,
}

/// Problem-details body the v2 API sends on failure. Older endpoints use
/// `errors[]` instead; both are read.
#[derive(Debug, Default, Deserialize)]
struct ApiProblem {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    detail: Option<String>,
    #[serde(default)]
    errors: Vec<ApiProblemItem>,
}

#[derive(Debug, Deserialize)]
struct ApiProblemItem {
    message: String,
}

/// Posts through `POST /2/tweets` with OAuth 1.0a user-context auth.
#[derive(Debug, Clone)]
pub struct XPublisher {
    http: reqwest::blocking::Client,
    credentials: XCredentials,
    base_url: String,
}

impl XPublisher {
    pub fn new(credentials: &XCredentials) -> Self {
        Self {
            http: reqwest::blocking::Client::new(),
            credentials: credentials.clone(),
            base_url: DEFAULT_X_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn endpoint(&self) -> String {
        format!("{}/2/tweets", self.base_url)
    }
}

impl Publisher for XPublisher {
    fn publish(&self, text: &str) -> Result<(), PublishError> {
        let url = self.endpoint();
        let auth = oauth::authorization_header("POST", &url, &[], &self.credentials)?;

        let response = self
            .http
            .post(&url)
            .header(reqwest::header::AUTHORIZATION, auth)
            .json(&CreatePost { text })
            .send()?;

        let status = response.status();
        let body = response.text()?;
        if !status.is_success() {
            return Err(PublishError::Api {
                status: status.as_u16(),
                message: problem_message(&body),
            });
        }

        match serde_json::from_str::<CreatePostResponse>(&body) {
            Ok(created) => tracing::debug!(post_id = %created.data.id, "post created"),
            Err(e) => tracing::debug!(error = %e, "post created; response body not recognised"),
        }
        Ok(())
    }
}

fn problem_message(body: &str) -> String {
    let problem: ApiProblem = serde_json::from_str(body).unwrap_or_default();
    if let Some(detail) = problem.detail {
        return detail;
    }
    if let Some(first) = problem.errors.into_iter().next() {
        return first.message;
    }
    problem.title.unwrap_or_else(|| body.trim().to_string())
}
