//! Remote parameter resolution.
//!
//! The destination bucket may be omitted from the command line
//! and configuration, in which case it is resolved once, before
//! the pipeline starts, from a remote parameter store. The wire
//! shape follows the SSM `GetParameter` call: request
//! `{"Name": <path>}`, response `{"Parameter": {"Value": ...}}`.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde::{Deserialize, Serialize};

use crate::core::error::{IngestError, Result};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const TARGET_HEADER: &str = "X-Amz-Target";
const GET_PARAMETER_TARGET: &str = "AmazonSSM.GetParameter";

/// Client for the remote parameter store
#[derive(Debug, Clone)]
pub struct ParameterClient {
    client: reqwest::Client,
    endpoint: String,
}

impl ParameterClient {
    /// Build a client against the given parameter-store endpoint.
    pub fn new(endpoint: &str) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_static("application/x-amz-json-1.1"),
        );
        headers.insert(TARGET_HEADER, HeaderValue::from_static(GET_PARAMETER_TARGET));

        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .default_headers(headers)
            .build()
            .map_err(|e| {
                IngestError::Config(format!("failed to build parameter HTTP client: {e}"))
            })?;

        Ok(Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
        })
    }

    /// Default parameter-store endpoint for a region.
    pub fn endpoint_for_region(region: &str) -> String {
        format!("https://ssm.{region}.amazonaws.com")
    }

    /// Fetch one parameter value by path.
    ///
    /// Any failure here is a configuration error: without a
    /// resolved destination the run cannot produce an artifact.
    pub async fn get_parameter(&self, name: &str) -> Result<String> {
        let request = GetParameterRequest { name };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                IngestError::Config(format!("parameter lookup for '{name}' failed: {e}"))
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(IngestError::Config(format!(
                "parameter lookup for '{name}' returned {status}"
            )));
        }

        let parsed: GetParameterResponse = response.json().await.map_err(|e| {
            IngestError::Config(format!("malformed parameter response for '{name}': {e}"))
        })?;

        Ok(parsed.parameter.value)
    }
}

#[derive(Serialize)]
struct GetParameterRequest<'a> {
    #[serde(rename = "Name")]
    name: &'a str,
}

#[derive(Debug, Deserialize)]
struct GetParameterResponse {
    #[serde(rename = "Parameter")]
    parameter: Parameter,
}

#[derive(Debug, Deserialize)]
struct Parameter {
    #[serde(rename = "Value")]
    value: String,
}
