use chrono::NaiveDate;
use thiserror::Error;

use crate::{
    error::{GetError, UploadError},
    routes,
    upload::{self, PhotoUpload},
};

/// Stateless handle on the PWMS services. Holds no fetch state; callers own
/// whatever collection they display.
#[derive(Clone, Debug)]
pub struct Client {
    http_client: reqwest::Client,
    endpoints: Option<EndpointConfig>,
}

#[derive(Clone, Debug)]
pub struct EndpointConfig {
    pub routes: Option<Endpoint>,
    pub photos: Option<Endpoint>,
}

#[derive(Debug, Error)]
pub enum EndpointConfigError {
    #[error("missing replace token for endpoint {0} (url: {1})")]
    MissingReplaceToken(String, String),
    #[error("unnecessary replace token `{1}` provided in endpoint {0}")]
    UnnecessaryReplaceToken(String, String),
}

impl EndpointConfig {
    pub fn validate(&self) -> Result<(), EndpointConfigError> {
        if let Some(routes) = &self.routes {
            if routes.replace_token.is_none() {
                return Err(EndpointConfigError::MissingReplaceToken(
                    "routes".to_string(),
                    routes.url.clone(),
                ));
            }
        }
        if let Some(photos) = &self.photos {
            if photos.replace_token.is_some() {
                return Err(EndpointConfigError::UnnecessaryReplaceToken(
                    "photos".to_string(),
                    photos.replace_token.clone().unwrap(),
                ));
            }
        }
        Ok(())
    }
}

#[derive(Clone, Debug)]
pub struct Endpoint {
    pub url: String,
    pub replace_token: Option<String>,
}

#[derive(Debug, Error)]
pub enum ClientInitError {
    #[error("invalid endpoint configuration: {0}")]
    InvalidEndpointConfig(#[from] EndpointConfigError),
}

impl Client {
    pub fn new(
        http_client: reqwest::Client,
        endpoints: Option<EndpointConfig>,
    ) -> Result<Self, ClientInitError> {
        if let Some(endpoints) = &endpoints {
            endpoints.validate()?
        }
        Ok(Self {
            http_client,
            endpoints,
        })
    }

    /// Fetch the route addresses scheduled for `date`, in the order the
    /// service returned them.
    pub async fn get_route_addresses(&self, date: NaiveDate) -> Result<Vec<routes::Address>, GetError> {
        let endpoint = self
            .endpoints
            .as_ref()
            .and_then(|endpoints| endpoints.routes.as_ref())
            .and_then(|endpoint| {
                endpoint
                    .replace_token
                    .as_ref()
                    .map(|token| routes::Endpoint {
                        url: endpoint.url.clone(),
                        replace_token: token.clone(),
                    })
            });
        routes::get(&self.http_client, date, endpoint).await
    }

    /// Upload one captured photo to the photo service.
    pub async fn upload_photo(&self, photo: &PhotoUpload) -> Result<(), UploadError> {
        let url = self
            .endpoints
            .as_ref()
            .and_then(|endpoints| endpoints.photos.as_ref())
            .map(|endpoint| endpoint.url.clone());
        upload::post(&self.http_client, photo, url.as_deref()).await
    }
}
