use std::{collections::HashMap, sync::LazyLock};

use chrono::NaiveDate;
use mime::Mime;
use reqwest::{header::CONTENT_TYPE, Client, Url};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    api_interfaces::routes::{ResponseData, RouteEntry},
    constants::{DEFAULT_ROUTES_SERVICE_URL_FORMAT, DEFAULT_ROUTES_SERVICE_URL_REPLACE_TOKEN},
    error::GetError,
};

static DEFAULT_ENDPOINT_CONFIG: LazyLock<Endpoint> = LazyLock::new(|| {
    Endpoint::try_new(
        DEFAULT_ROUTES_SERVICE_URL_FORMAT.to_string(),
        DEFAULT_ROUTES_SERVICE_URL_REPLACE_TOKEN.to_string(),
    )
    .expect("Invalid default endpoint config")
});

/// One normalized delivery route entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Address {
    pub street_address: String,
    pub city: String,
    pub state: String,
    pub postal_code: Option<String>,
    pub service_type: String,
    pub frequency: String,
}

impl From<RouteEntry> for Address {
    fn from(entry: RouteEntry) -> Self {
        Self {
            street_address: entry.endereco,
            city: entry.cidade,
            state: entry.estado,
            postal_code: entry.zip,
            service_type: entry.servico,
            frequency: entry.frequencia,
        }
    }
}

#[derive(Debug, PartialEq)]
pub struct Endpoint {
    pub url: String,
    pub replace_token: String,
}

#[derive(Debug, Error, PartialEq)]
pub enum EndpointConfigError {
    #[error("the endpoint format is missing")]
    MissingEndpoint,
    #[error("the replace token is missing")]
    MissingReplaceToken,
    #[error("the replace token provided is not in the endpoint format")]
    ReplaceTokenNotInEndpoint,
}

impl Endpoint {
    pub fn try_new(
        endpoint_format: String,
        replace_token: String,
    ) -> Result<Self, EndpointConfigError> {
        if replace_token.is_empty() {
            return Err(EndpointConfigError::MissingReplaceToken);
        }
        if endpoint_format.is_empty() {
            return Err(EndpointConfigError::MissingEndpoint);
        }
        if !endpoint_format.contains(&replace_token) {
            return Err(EndpointConfigError::ReplaceTokenNotInEndpoint);
        }
        Ok(Self {
            url: endpoint_format,
            replace_token,
        })
    }

    /// Substitutes the zero-padded `YYYY-MM-DD` rendering of the date into
    /// the endpoint format.
    pub fn to_url(&self, date: NaiveDate) -> String {
        self.url
            .replace(&self.replace_token, &date.format("%Y-%m-%d").to_string())
    }
}

fn is_json_content_type(value: &str) -> bool {
    value
        .parse::<Mime>()
        .map(|mime| mime.essence_str() == mime::APPLICATION_JSON.essence_str())
        .unwrap_or(false)
}

/// Get the route addresses scheduled for a date from the routes service.
pub async fn get(
    client: &Client,
    date: NaiveDate,
    endpoint_config: Option<Endpoint>,
) -> Result<Vec<Address>, GetError> {
    let url = match endpoint_config {
        Some(config) => config.to_url(date),
        None => DEFAULT_ENDPOINT_CONFIG.to_url(date),
    };
    let url = Url::parse(&url).map_err(|e| GetError::InvalidRequest(e.to_string()))?;
    let response = client.get(url).send().await?;
    if !response.status().is_success() {
        return Err(GetError::ResponseStatus(response.status()));
    }
    let json_content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(is_json_content_type)
        .unwrap_or(false);
    if !json_content_type {
        return Err(GetError::UnexpectedFormat);
    }
    let body = response.text().await.map_err(GetError::ResponseBody)?;
    if body.is_empty() {
        return Err(GetError::UnexpectedFormat);
    }
    let parsed_body = serde_json::from_str::<ResponseData>(&body)?;
    Ok(parsed_body
        .enderecos
        .into_entries()
        .into_iter()
        .map(Address::from)
        .collect())
}

/// Buckets addresses by their verbatim `city` string, preserving each
/// address's relative order within its bucket.
///
/// Keys are case-sensitive and never trimmed, so "SP" and "sp" form distinct
/// groups. Folding those together is a product decision this layer does not
/// take.
pub fn group_by_city(addresses: Vec<Address>) -> HashMap<String, Vec<Address>> {
    let mut groups: HashMap<String, Vec<Address>> = HashMap::new();
    for address in addresses {
        groups.entry(address.city.clone()).or_default().push(address);
    }
    groups
}
