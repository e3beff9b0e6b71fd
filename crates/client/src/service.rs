//! HTTP client for the forms API.
//!
//! Every call goes through [`FormClient::execute`]: one request per attempt,
//! timing and outcome logged, retryable failures re-sent after a backoff,
//! and whatever finally fails normalized into an [`ApiError`].

use serde::de::DeserializeOwned;
use tokio::time::Instant;

use myform_core::{CreateFormRequest, Form, FormId};

use crate::config::{ApiEndpoints, ClientConfig};
use crate::error::{normalize, ApiError, HttpFailure};
use crate::retry::RetryPolicy;
use crate::transport::{HttpRequest, HttpResponse, ReqwestTransport, Transport};

pub struct FormClient<T> {
    transport: T,
    endpoints: ApiEndpoints,
}

impl FormClient<ReqwestTransport> {
    pub fn from_config(config: &ClientConfig) -> Self {
        let transport =
            ReqwestTransport::new(reqwest::Client::new()).with_api_token(config.api_token.clone());
        Self::new(transport, config.endpoints())
    }
}

impl<T: Transport> FormClient<T> {
    pub fn new(transport: T, endpoints: ApiEndpoints) -> Self {
        Self { transport, endpoints }
    }

    pub fn endpoints(&self) -> &ApiEndpoints {
        &self.endpoints
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub async fn get_all_forms(&self) -> Result<Vec<Form>, ApiError> {
        let request = HttpRequest::get(self.endpoints.forms());
        let response = self.execute(request, RetryPolicy::READ).await?;
        decode(response)
    }

    pub async fn create_form(&self, request: &CreateFormRequest) -> Result<Form, ApiError> {
        let body = serde_json::to_value(request)
            .map_err(|e| ApiError::new(format!("Could not encode request: {e}")))?;
        let request = HttpRequest::post(self.endpoints.forms(), body);
        let response = self.execute(request, RetryPolicy::WRITE).await?;
        decode(response)
    }

    pub async fn delete_form(&self, id: FormId) -> Result<(), ApiError> {
        let request = HttpRequest::delete(self.endpoints.form(id));
        self.execute(request, RetryPolicy::WRITE).await?;
        Ok(())
    }

    async fn execute(
        &self,
        request: HttpRequest,
        policy: RetryPolicy,
    ) -> Result<HttpResponse, ApiError> {
        let mut retry = 0;
        loop {
            let started = Instant::now();
            let outcome = self.transport.send(request.clone()).await;
            let elapsed_ms = started.elapsed().as_millis() as u64;

            let failure = match outcome {
                Ok(response) if response.is_success() => {
                    tracing::debug!(
                        method = %request.method,
                        url = %request.url,
                        status = response.status,
                        elapsed_ms,
                        "request completed"
                    );
                    if retry > 0 {
                        tracing::info!(url = %request.url, retries = retry, "request succeeded after retry");
                    }
                    return Ok(response);
                }
                Ok(response) => HttpFailure {
                    status: response.status,
                    body: response.body,
                },
                Err(e) => {
                    tracing::debug!(error = %e, "transport failure");
                    HttpFailure::network()
                }
            };

            tracing::warn!(
                method = %request.method,
                url = %request.url,
                status = failure.status,
                elapsed_ms,
                "request failed"
            );

            if retry >= policy.max_retries || !RetryPolicy::is_retryable(failure.status) {
                return Err(normalize(&failure));
            }

            retry += 1;
            let delay = policy.delay_for(retry);
            tracing::info!(
                url = %request.url,
                attempt = retry,
                max_retries = policy.max_retries,
                delay_ms = delay.as_millis() as u64,
                "retrying request"
            );
            tokio::time::sleep(delay).await;
        }
    }
}

/// A 2xx whose body is not what we expected is reported like any other
/// unexpected status.
fn decode<D: DeserializeOwned>(response: HttpResponse) -> Result<D, ApiError> {
    let status = response.status;
    response
        .body
        .and_then(|body| serde_json::from_value(body).ok())
        .ok_or_else(|| normalize(&HttpFailure { status, body: None }))
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use serde_json::json;

    use super::*;
    use crate::error::{NETWORK_ERROR, NOT_FOUND, SERVER_ERROR};
    use crate::transport::scripted::ScriptedTransport;
    use crate::transport::{HttpResponse, Method, TransportError};

    fn client(script: Vec<Result<HttpResponse, TransportError>>) -> FormClient<ScriptedTransport> {
        FormClient::new(
            ScriptedTransport::new(script),
            ApiEndpoints::new("http://api.test/api/v1"),
        )
    }

    fn ok(status: u16, body: serde_json::Value) -> Result<HttpResponse, TransportError> {
        Ok(HttpResponse::new(status, Some(body)))
    }

    fn status(status: u16) -> Result<HttpResponse, TransportError> {
        Ok(HttpResponse::new(status, None))
    }

    fn form_json(id: i32) -> serde_json::Value {
        json!({
            "id": id,
            "firstName": "Ada",
            "lastName": "Lovelace",
            "createdAt": "2024-01-01T00:00:00Z"
        })
    }

    #[tokio::test(start_paused = true)]
    async fn read_recovers_after_one_server_error() {
        let client = client(vec![status(503), ok(200, json!([form_json(1)]))]);

        let started = Instant::now();
        let forms = client.get_all_forms().await.unwrap();

        assert_eq!(forms.len(), 1);
        assert_eq!(forms[0].first_name, "Ada");
        assert_eq!(client.transport().calls(), 2);
        let elapsed = started.elapsed();
        assert!(elapsed >= Duration::from_secs(1));
        assert!(elapsed < Duration::from_millis(1100));
    }

    #[tokio::test(start_paused = true)]
    async fn validation_failure_is_never_retried() {
        let body = json!({
            "message": "Validation failed",
            "errors": { "lastName": ["Last name is required."] }
        });
        let client = client(vec![ok(400, body)]);

        let err = client
            .create_form(&CreateFormRequest::new("Ada", ""))
            .await
            .unwrap_err();

        assert_eq!(client.transport().calls(), 1);
        assert_eq!(err.status_code, Some(400));
        assert_eq!(err.message, "Last name is required.");
        assert!(err.has_field_errors());
    }

    #[tokio::test(start_paused = true)]
    async fn read_gives_up_after_three_retries() {
        let client = client(vec![status(500)]);

        let started = Instant::now();
        let err = client.get_all_forms().await.unwrap_err();

        assert_eq!(client.transport().calls(), 4);
        assert_eq!(err.message, SERVER_ERROR);
        // 1s + 2s + 4s of backoff.
        assert!(started.elapsed() >= Duration::from_secs(7));
        assert!(started.elapsed() < Duration::from_secs(8));
    }

    #[tokio::test(start_paused = true)]
    async fn write_gives_up_after_two_retries() {
        let client = client(vec![status(502)]);

        let started = Instant::now();
        let err = client
            .create_form(&CreateFormRequest::new("Ada", "Lovelace"))
            .await
            .unwrap_err();

        assert_eq!(client.transport().count(Method::Post), 3);
        assert_eq!(err.status_code, Some(502));
        assert!(started.elapsed() >= Duration::from_secs(3));
        assert!(started.elapsed() < Duration::from_secs(4));
    }

    #[tokio::test(start_paused = true)]
    async fn network_failures_are_retried_then_reported_as_status_zero() {
        let client = client(vec![Err(TransportError::Network("connection refused".into()))]);

        let err = client.get_all_forms().await.unwrap_err();

        assert_eq!(client.transport().calls(), 4);
        assert_eq!(err.status_code, Some(0));
        assert_eq!(err.message, NETWORK_ERROR);
    }

    #[tokio::test(start_paused = true)]
    async fn rate_limit_is_retried() {
        let client = client(vec![status(429), ok(201, form_json(3))]);

        let form = client
            .create_form(&CreateFormRequest::new("Ada", "Lovelace"))
            .await
            .unwrap();

        assert_eq!(form.id, FormId::new(3));
        assert_eq!(client.transport().calls(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn delete_of_missing_form_is_not_retried() {
        let client = client(vec![ok(404, json!({ "message": "The requested resource was not found" }))]);

        let err = client.delete_form(FormId::new(999)).await.unwrap_err();

        assert_eq!(client.transport().calls(), 1);
        assert_eq!(err.message, NOT_FOUND);
        let requests = client.transport().requests();
        let request = &requests[0];
        assert_eq!(request.method, Method::Delete);
        assert_eq!(request.url, "http://api.test/api/v1/forms/999");
    }

    #[tokio::test]
    async fn create_posts_camel_case_body() {
        let client = client(vec![ok(201, form_json(1))]);

        client
            .create_form(&CreateFormRequest::new("Ada", "Lovelace"))
            .await
            .unwrap();

        let requests = client.transport().requests();
        let request = &requests[0];
        assert_eq!(request.url, "http://api.test/api/v1/forms");
        assert_eq!(
            request.body,
            Some(json!({ "firstName": "Ada", "lastName": "Lovelace" }))
        );
    }

    #[tokio::test]
    async fn unexpected_success_body_is_an_error() {
        let client = client(vec![ok(200, json!({ "not": "a list" }))]);

        let err = client.get_all_forms().await.unwrap_err();

        assert_eq!(err.message, "An unexpected error occurred. (200)");
        assert_eq!(client.transport().calls(), 1);
    }
}
