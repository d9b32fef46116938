// API client module: a small blocking HTTP client for the public
// random-user demo API. Requests are unauthenticated.

use anyhow::{Context, Result};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

/// Base URL used when `RANDOMUSER_API_URL` is not set.
pub const DEFAULT_BASE_URL: &str = "https://randomuser.me";

/// Holds a reqwest blocking client and the base URL of the API.
#[derive(Clone)]
pub struct RandomUserClient {
    client: Client,
    base_url: String,
}

/// Response body of `GET /api/`. Only the fields we print are kept.
#[derive(Serialize, Deserialize, Debug)]
pub struct RandomUserResponse {
    pub results: Vec<RandomUser>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RandomUser {
    pub gender: String,
    pub name: UserName,
    pub email: String,
    #[serde(default)]
    pub location: Location,
    #[serde(default)]
    pub picture: Picture,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct UserName {
    pub title: String,
    pub first: String,
    pub last: String,
}

/// `postcode` is sometimes a number and sometimes a string, so it stays a
/// raw JSON value.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct Location {
    #[serde(default)]
    pub street: Street,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub postcode: serde_json::Value,
}

impl Location {
    pub fn postcode_text(&self) -> String {
        match &self.postcode {
            serde_json::Value::String(s) => s.clone(),
            serde_json::Value::Null => String::new(),
            other => other.to_string(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct Street {
    #[serde(default)]
    pub number: u32,
    #[serde(default)]
    pub name: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct Picture {
    #[serde(default)]
    pub large: String,
    #[serde(default)]
    pub medium: String,
    #[serde(default)]
    pub thumbnail: String,
}

impl RandomUserClient {
    /// Create a client configured from `RANDOMUSER_API_URL`, falling back
    /// to `https://randomuser.me`.
    pub fn from_env() -> Result<Self> {
        let base_url =
            std::env::var("RANDOMUSER_API_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.into());
        Self::new(base_url)
    }

    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .build()
            .context("Failed to build HTTP client")?;
        Ok(RandomUserClient {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Fetch one random user. `None` when the API returns no results.
    pub fn fetch_user(&self) -> Result<Option<RandomUser>> {
        let url = format!("{}/api/", &self.base_url);
        tracing::debug!(%url, "fetching random user");
        let res = self
            .client
            .get(&url)
            .send()
            .context("Error fetching random user")?;
        if !res.status().is_success() {
            let status = res.status();
            let txt = res.text().unwrap_or_else(|_| "".into());
            anyhow::bail!("Random user request failed: {} - {}", status, txt);
        }
        let resp: RandomUserResponse = res.json().context("Error decoding JSON")?;
        Ok(resp.results.into_iter().next())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_api_payload_with_numeric_postcode() {
        let body = r#"{
            "results": [{
                "gender": "female",
                "name": {"title": "Ms", "first": "Ada", "last": "Lovelace"},
                "email": "ada@example.com",
                "location": {
                    "street": {"number": 12, "name": "Main St"},
                    "city": "London",
                    "state": "Greater London",
                    "country": "United Kingdom",
                    "postcode": 10115
                },
                "picture": {
                    "large": "https://example.com/l.jpg",
                    "medium": "https://example.com/m.jpg",
                    "thumbnail": "https://example.com/t.jpg"
                }
            }],
            "info": {"seed": "abc", "results": 1}
        }"#;

        let resp: RandomUserResponse = serde_json::from_str(body).unwrap();
        let user = &resp.results[0];
        assert_eq!(user.name.first, "Ada");
        assert_eq!(user.location.street.number, 12);
        assert_eq!(user.location.postcode_text(), "10115");
        assert_eq!(user.picture.thumbnail, "https://example.com/t.jpg");
    }

    #[test]
    fn location_and_picture_are_optional() {
        let body = r#"{"results": [{
            "gender": "male",
            "name": {"title": "Mr", "first": "Alan", "last": "Turing"},
            "email": "alan@example.com"
        }]}"#;

        let resp: RandomUserResponse = serde_json::from_str(body).unwrap();
        assert_eq!(resp.results[0].location.postcode_text(), "");
        assert_eq!(resp.results[0].picture.large, "");
    }

    #[test]
    fn trailing_slash_in_base_url_is_dropped() {
        let client = RandomUserClient::new("http://localhost:9000/").unwrap();
        assert_eq!(client.base_url, "http://localhost:9000");
    }
}
