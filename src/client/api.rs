//! Transport between the client controllers and the REST API.

use async_trait::async_trait;
use reqwest::{Client as HttpClient, Response};
use serde::de::DeserializeOwned;
use url::Url;
use uuid::Uuid;

use super::error::{ClientError, Result};
use crate::models::employee::Employee;
use crate::utils::validation::EmployeeInput;

/// The five employee operations as seen from the client.
#[async_trait]
pub trait EmployeeApi: Send + Sync {
    async fn list(&self) -> Result<Vec<Employee>>;
    async fn get(&self, id: Uuid) -> Result<Employee>;
    async fn create(&self, input: &EmployeeInput) -> Result<Employee>;
    async fn update(&self, id: Uuid, input: &EmployeeInput) -> Result<Employee>;
    async fn delete(&self, id: Uuid) -> Result<()>;
}

/// [`EmployeeApi`] over HTTP. No retries and no timeout beyond reqwest's defaults.
#[derive(Debug, Clone)]
pub struct HttpEmployeeApi {
    base_url: String,
    http: HttpClient,
}

impl HttpEmployeeApi {
    /// `base_url` is the server root, e.g. `http://localhost:5000`.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let base_url = base_url.into();
        let parsed = Url::parse(&base_url).map_err(|err| ClientError::InvalidUrl(format!("{}: {}", base_url, err)))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ClientError::InvalidUrl(format!(
                "URL must start with http:// or https://, got: {}",
                base_url
            )));
        }

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: HttpClient::new(),
        })
    }

    fn collection_url(&self) -> String {
        format!("{}/employees", self.base_url)
    }

    fn record_url(&self, id: Uuid) -> String {
        format!("{}/employees/{}", self.base_url, id)
    }

    async fn handle_response<T: DeserializeOwned>(response: Response) -> Result<T> {
        let response = Self::check_status(response).await?;
        response.json::<T>().await.map_err(ClientError::Http)
    }

    async fn check_status(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|json| json["error"].as_str().map(str::to_string));

        Err(ClientError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl EmployeeApi for HttpEmployeeApi {
    async fn list(&self) -> Result<Vec<Employee>> {
        let response = self.http.get(self.collection_url()).send().await?;
        Self::handle_response(response).await
    }

    async fn get(&self, id: Uuid) -> Result<Employee> {
        let response = self.http.get(self.record_url(id)).send().await?;
        Self::handle_response(response).await
    }

    async fn create(&self, input: &EmployeeInput) -> Result<Employee> {
        let response = self.http.post(self.collection_url()).json(input).send().await?;
        Self::handle_response(response).await
    }

    async fn update(&self, id: Uuid, input: &EmployeeInput) -> Result<Employee> {
        let response = self.http.put(self.record_url(id)).json(input).send().await?;
        Self::handle_response(response).await
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        let response = self.http.delete(self.record_url(id)).send().await?;
        Self::check_status(response).await.map(|_| ())
    }
}
