//! Google Docs: create a document and fill it with text.

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::GoogleApiError;
use crate::{ensure_success, parse_response};

pub struct DocsClient {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreatedDocument {
    pub id: String,
    pub url: String,
}

#[derive(Deserialize)]
struct CreateResponse {
    #[serde(rename = "documentId")]
    document_id: String,
}

/// Browser URL for a document id.
pub fn document_url(id: &str) -> String {
    format!("https://docs.google.com/document/d/{id}/edit")
}

impl DocsClient {
    /// * `base_url` - e.g. `https://docs.googleapis.com/v1`.
    pub fn with_client(client: reqwest::Client, base_url: String) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Create a document titled `title` whose content is `body`.
    ///
    /// This is two calls: `documents.create` and then a `batchUpdate` that
    /// inserts the text at the start of the body. An empty `body` skips the
    /// second call.
    pub async fn create_document(
        &self,
        access_token: &str,
        title: &str,
        body: &str,
    ) -> Result<CreatedDocument, GoogleApiError> {
        let response = self
            .client
            .post(format!("{}/documents", self.base_url))
            .bearer_auth(access_token)
            .json(&json!({ "title": title }))
            .send()
            .await?;
        let created: CreateResponse = parse_response(response).await?;

        if !body.is_empty() {
            let requests = json!({
                "requests": [
                    { "insertText": { "location": { "index": 1 }, "text": body } }
                ]
            });
            let response = self
                .client
                .post(format!(
                    "{}/documents/{}:batchUpdate",
                    self.base_url, created.document_id
                ))
                .bearer_auth(access_token)
                .json(&requests)
                .send()
                .await?;
            ensure_success(response).await?;
        }

        tracing::debug!(document_id = %created.document_id, "Planning document created");
        Ok(CreatedDocument {
            url: document_url(&created.document_id),
            id: created.document_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use mockito::Matcher;

    use super::*;

    #[tokio::test]
    async fn create_then_insert_text() {
        let mut server = mockito::Server::new_async().await;
        let create = server
            .mock("POST", "/documents")
            .match_header("authorization", "Bearer tok")
            .match_body(Matcher::Json(json!({ "title": "Shoot plan" })))
            .with_body(r#"{"documentId":"doc123","title":"Shoot plan"}"#)
            .create_async()
            .await;
        let update = server
            .mock("POST", "/documents/doc123:batchUpdate")
            .match_body(Matcher::Regex(
                r#""insertText":\{"location":\{"index":1\},"text":"Hello"\}"#.into(),
            ))
            .with_body("{}")
            .create_async()
            .await;

        let docs = DocsClient::with_client(reqwest::Client::new(), server.url());
        let doc = docs.create_document("tok", "Shoot plan", "Hello").await.unwrap();

        create.assert_async().await;
        update.assert_async().await;
        assert_eq!(
            doc,
            CreatedDocument {
                id: "doc123".into(),
                url: "https://docs.google.com/document/d/doc123/edit".into(),
            }
        );
    }

    #[tokio::test]
    async fn failed_insert_is_an_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/documents")
            .with_body(r#"{"documentId":"d1"}"#)
            .create_async()
            .await;
        server
            .mock("POST", "/documents/d1:batchUpdate")
            .with_status(403)
            .with_body("insufficient scope")
            .create_async()
            .await;

        let docs = DocsClient::with_client(reqwest::Client::new(), server.url());
        assert_matches!(
            docs.create_document("tok", "t", "body").await,
            Err(GoogleApiError::Api { status: 403, body }) if body == "insufficient scope"
        );
    }
}
