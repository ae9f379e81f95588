use crate::domain::geo::{LookupError, Pincode, PostalAddress, PostalLookup, Region};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, instrument};

pub const DEFAULT_BASE_URL: &str = "https://api.postalpincode.in";

/// Postal lookup against an India Post style directory API.
///
/// `GET {base_url}/pincode/{pincode}` answers with a one-element array whose
/// `Status` is `"Success"` or `"Error"` and whose `PostOffice` list carries
/// district and state names. The first post office's district becomes the
/// city.
pub struct IndiaPostLookup {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct PincodeResponse {
    status: String,
    #[serde(default)]
    post_office: Option<Vec<PostOffice>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct PostOffice {
    district: String,
    state: String,
}

impl IndiaPostLookup {
    pub fn new(base_url: impl Into<String>, user_agent: Option<&str>) -> anyhow::Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(agent) = user_agent {
            builder = builder.user_agent(agent.to_string());
        }

        Ok(Self {
            client: builder.build()?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn url_for(&self, pincode: &Pincode) -> String {
        format!("{}/pincode/{}", self.base_url, pincode)
    }
}

#[async_trait]
impl PostalLookup for IndiaPostLookup {
    #[instrument(skip_all, fields(pincode = %pincode))]
    async fn resolve(&self, pincode: &Pincode) -> Result<PostalAddress, LookupError> {
        if !pincode.is_deliverable() {
            return Err(LookupError::Malformed(format!(
                "{pincode} is not a valid Indian pincode"
            )));
        }

        let response = self
            .client
            .get(self.url_for(pincode))
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| LookupError::Transport(e.to_string()))?;
        let body = response
            .text()
            .await
            .map_err(|e| LookupError::Transport(e.to_string()))?;
        debug!(bytes = body.len(), "postal directory responded");

        interpret(pincode, &body)
    }
}

fn interpret(pincode: &Pincode, body: &str) -> Result<PostalAddress, LookupError> {
    let responses: Vec<PincodeResponse> =
        serde_json::from_str(body).map_err(|e| LookupError::Malformed(e.to_string()))?;

    let response = responses
        .into_iter()
        .next()
        .ok_or_else(|| LookupError::Malformed("empty response".to_string()))?;

    if !response.status.eq_ignore_ascii_case("success") {
        return Err(LookupError::NotFound(pincode.to_string()));
    }

    let office = response
        .post_office
        .unwrap_or_default()
        .into_iter()
        .next()
        .ok_or_else(|| LookupError::NotFound(pincode.to_string()))?;

    let state = office
        .state
        .parse::<Region>()
        .map_err(|_| LookupError::UnsupportedRegion(office.state.clone()))?;

    let city = office.district.trim();
    if city.is_empty() {
        return Err(LookupError::Malformed("post office without district".to_string()));
    }

    Ok(PostalAddress {
        state,
        city: city.to_string(),
    })
}
