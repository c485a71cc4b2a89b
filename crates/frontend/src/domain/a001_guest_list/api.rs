use async_trait::async_trait;
use contracts::domain::a001_guest_list::NameSource;
use contracts::shared::RsvpError;
use gloo_net::http::Request;

/// Список гостей из статического файла (`assets/data/names.json`)
pub struct HttpNameSource {
    url: String,
}

impl HttpNameSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

#[async_trait(?Send)]
impl NameSource for HttpNameSource {
    async fn fetch_names(&self) -> Result<String, RsvpError> {
        let response = Request::get(&self.url)
            .send()
            .await
            .map_err(|e| RsvpError::NameListFetch(format!("Request failed: {}", e)))?;

        if !response.ok() {
            return Err(RsvpError::NameListFetch(format!(
                "HTTP error: {}",
                response.status()
            )));
        }

        response
            .text()
            .await
            .map_err(|e| RsvpError::NameListFetch(format!("Failed to read response: {}", e)))
    }
}
