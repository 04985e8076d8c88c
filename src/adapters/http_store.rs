use crate::domain::id::DocId;
use crate::domain::model::Document;
use crate::domain::ports::DocumentStore;
use crate::utils::error::Result;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;

/// Document store client speaking the store's HTTP/JSON dialect:
/// `GET {base}/{collection}` lists a collection, `GET {base}/{collection}/{id}`
/// resolves one document (404 means absent), `GET {base}/{collection}/count`
/// returns `{"count": n}`.
pub struct HttpStore {
    client: Client,
    base_url: String,
}

#[derive(Deserialize)]
struct CountResponse {
    count: u64,
}

impl HttpStore {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn collection_url(&self, collection: &str) -> String {
        format!("{}/{}", self.base_url, collection)
    }
}

#[async_trait]
impl DocumentStore for HttpStore {
    async fn find_all(&self, collection: &str) -> Result<Vec<Document>> {
        let url = self.collection_url(collection);
        tracing::debug!("Store request: GET {}", url);
        let response = self.client.get(&url).send().await?.error_for_status()?;
        Ok(response.json().await?)
    }

    async fn find_by_id(&self, collection: &str, id: &DocId) -> Result<Option<Document>> {
        let url = format!("{}/{}", self.collection_url(collection), id.encode());
        tracing::debug!("Store request: GET {}", url);
        let response = self.client.get(&url).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let document = response.error_for_status()?.json().await?;
        Ok(Some(document))
    }

    async fn count(&self, collection: &str) -> Result<u64> {
        let url = format!("{}/count", self.collection_url(collection));
        tracing::debug!("Store request: GET {}", url);
        let response = self.client.get(&url).send().await?.error_for_status()?;
        let body: CountResponse = response.json().await?;
        Ok(body.count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::UPLOADS;
    use crate::utils::error::ServiceError;
    use httpmock::prelude::*;
    use serde_json::json;

    fn store(server: &MockServer) -> HttpStore {
        HttpStore::new(&server.base_url(), Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_find_all_decodes_document_array() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/uploads");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(json!([{"_id": {"$oid": "665f1f77bcf86cd799439011"}, "filename": "a.csv"}]));
        });

        let documents = store(&server).find_all(UPLOADS).await.unwrap();
        mock.assert();
        assert_eq!(documents.len(), 1);
        assert_eq!(documents[0]["filename"], json!("a.csv"));
    }

    #[tokio::test]
    async fn test_find_by_id_maps_404_to_none() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET)
                .path("/uploads/665f1f77bcf86cd799439011");
            then.status(404);
        });

        let id = DocId::decode("665f1f77bcf86cd799439011").unwrap();
        let document = store(&server).find_by_id(UPLOADS, &id).await.unwrap();
        assert!(document.is_none());
    }

    #[tokio::test]
    async fn test_count_reads_count_field() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/uploads/count");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(json!({"count": 42}));
        });

        assert_eq!(store(&server).count(UPLOADS).await.unwrap(), 42);
    }

    #[tokio::test]
    async fn test_server_error_surfaces_as_data_access() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/uploads");
            then.status(500);
        });

        let err = store(&server).find_all(UPLOADS).await.unwrap_err();
        assert!(matches!(err, ServiceError::DataAccess(_)));
    }
}
