use async_trait::async_trait;
use contracts::domain::a002_rsvp::{RelayResponse, RelayTransport, RsvpPayload};
use contracts::shared::RsvpError;
use gloo_net::http::Request;

/// Отправка RSVP во внешний сервис пересылки форм (Formspree и т.п.)
pub struct GlooRelayTransport;

#[async_trait(?Send)]
impl RelayTransport for GlooRelayTransport {
    async fn post_form(
        &self,
        endpoint: &str,
        payload: &RsvpPayload,
    ) -> Result<RelayResponse, RsvpError> {
        let body = serde_qs::to_string(payload)
            .map_err(|e| RsvpError::SubmissionNetwork(format!("Failed to encode form: {}", e)))?;

        let response = Request::post(endpoint)
            .header("Accept", "application/json")
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body(body)
            .map_err(|e| RsvpError::SubmissionNetwork(format!("Failed to build request: {}", e)))?
            .send()
            .await
            .map_err(|e| RsvpError::SubmissionNetwork(format!("Request failed: {}", e)))?;

        let status = response.status();
        // Тело нужно только для текста ошибки
        let body = response.text().await.unwrap_or_default();

        Ok(RelayResponse { status, body })
    }
}
