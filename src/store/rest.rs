//! HTTP client for the managed store's REST table and storage APIs.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use serde_json::Value;

use super::{BlobStore, StoreError, TableStore};
use crate::config::StoreConfig;

fn build_client(cfg: &StoreConfig) -> Result<reqwest::Client, StoreError> {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static("grid-atlas/0.2"));
    if !cfg.api_key.is_empty() {
        let key = HeaderValue::from_str(&cfg.api_key)
            .map_err(|e| StoreError::Config(format!("api key not header-safe: {e}")))?;
        let bearer = HeaderValue::from_str(&format!("Bearer {}", cfg.api_key))
            .map_err(|e| StoreError::Config(format!("api key not header-safe: {e}")))?;
        headers.insert("apikey", key);
        headers.insert(AUTHORIZATION, bearer);
    }
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(cfg.http_timeout_seconds))
        .default_headers(headers)
        .build()?;
    Ok(client)
}

async fn expect_success(resp: reqwest::Response) -> Result<reqwest::Response, StoreError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(StoreError::Api { status, body })
}

/// PostgREST-style table client. Mutations send `Prefer:
/// return=representation` so the affected rows come back and can be counted.
#[derive(Clone)]
pub struct RestTableStore {
    base_url: String,
    client: reqwest::Client,
}

impl RestTableStore {
    pub fn new(cfg: &StoreConfig) -> Result<Self, StoreError> {
        Ok(Self {
            base_url: cfg.base_url.trim_end_matches('/').to_string(),
            client: build_client(cfg)?,
        })
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    async fn rows(resp: reqwest::Response) -> Result<Vec<Value>, StoreError> {
        let resp = expect_success(resp).await?;
        let rows: Vec<Value> = resp.json().await?;
        Ok(rows)
    }
}

#[async_trait::async_trait]
impl TableStore for RestTableStore {
    async fn select(&self, table: &str, columns: &str) -> Result<Vec<Value>, StoreError> {
        let resp = self
            .client
            .get(self.table_url(table))
            .query(&[("select", columns)])
            .send()
            .await?;
        Self::rows(resp).await
    }

    async fn select_by_id(&self, table: &str, id: &str) -> Result<Option<Value>, StoreError> {
        let id_filter = format!("eq.{id}");
        let resp = self
            .client
            .get(self.table_url(table))
            .query(&[("select", "*"), ("id", id_filter.as_str())])
            .send()
            .await?;
        let mut rows = Self::rows(resp).await?;
        if rows.is_empty() {
            Ok(None)
        } else {
            Ok(Some(rows.swap_remove(0)))
        }
    }

    async fn insert(&self, table: &str, row: Value) -> Result<u64, StoreError> {
        let resp = self
            .client
            .post(self.table_url(table))
            .header("Prefer", "return=representation")
            .json(&row)
            .send()
            .await?;
        Ok(Self::rows(resp).await?.len() as u64)
    }

    async fn update(&self, table: &str, id: &str, row: Value) -> Result<u64, StoreError> {
        let id_filter = format!("eq.{id}");
        let resp = self
            .client
            .patch(self.table_url(table))
            .query(&[("id", id_filter.as_str())])
            .header("Prefer", "return=representation")
            .json(&row)
            .send()
            .await?;
        Ok(Self::rows(resp).await?.len() as u64)
    }

    async fn delete(&self, table: &str, id: &str) -> Result<u64, StoreError> {
        let id_filter = format!("eq.{id}");
        let resp = self
            .client
            .delete(self.table_url(table))
            .query(&[("id", id_filter.as_str())])
            .header("Prefer", "return=representation")
            .send()
            .await?;
        Ok(Self::rows(resp).await?.len() as u64)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        let resp = self
            .client
            .get(format!("{}/rest/v1/", self.base_url))
            .send()
            .await?;
        expect_success(resp).await?;
        Ok(())
    }
}

/// Storage bucket client: raw object upload plus the conventional public
/// URL layout of the managed storage API.
#[derive(Clone)]
pub struct RestBlobStore {
    base_url: String,
    bucket: String,
    client: reqwest::Client,
}

impl RestBlobStore {
    pub fn new(cfg: &StoreConfig, bucket: &str) -> Result<Self, StoreError> {
        Ok(Self {
            base_url: cfg.base_url.trim_end_matches('/').to_string(),
            bucket: bucket.to_string(),
            client: build_client(cfg)?,
        })
    }
}

#[async_trait::async_trait]
impl BlobStore for RestBlobStore {
    async fn upload(
        &self,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, StoreError> {
        let url = format!("{}/storage/v1/object/{}/{}", self.base_url, self.bucket, path);
        let ct = HeaderValue::from_str(content_type)
            .unwrap_or_else(|_| HeaderValue::from_static("application/octet-stream"));
        let resp = self
            .client
            .post(&url)
            .header(CONTENT_TYPE, ct)
            .body(bytes)
            .send()
            .await?;
        expect_success(resp).await?;
        Ok(format!(
            "{}/storage/v1/object/public/{}/{}",
            self.base_url, self.bucket, path
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StoreConfig;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn cfg(base_url: &str) -> StoreConfig {
        StoreConfig {
            provider: "rest".into(),
            base_url: base_url.into(),
            api_key: "test-key".into(),
            http_timeout_seconds: 5,
        }
    }

    #[tokio::test]
    async fn select_sends_projection_and_auth() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/infrastructure_assets"))
            .and(query_param("select", "id,name,lat,lng,type"))
            .and(header("apikey", "test-key"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!([{"id": "a1", "name": "s"}])),
            )
            .mount(&server)
            .await;

        let store = RestTableStore::new(&cfg(&server.uri())).unwrap();
        let rows = store
            .select("infrastructure_assets", "id,name,lat,lng,type")
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["id"], "a1");
    }

    #[tokio::test]
    async fn select_by_id_filters_on_id() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/demand_centers"))
            .and(query_param("id", "eq.d7"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": "d7"}])))
            .mount(&server)
            .await;

        let store = RestTableStore::new(&cfg(&server.uri())).unwrap();
        let row = store.select_by_id("demand_centers", "d7").await.unwrap();
        assert_eq!(row.unwrap()["id"], "d7");
    }

    #[tokio::test]
    async fn select_by_id_absent_is_none() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/demand_centers"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        let store = RestTableStore::new(&cfg(&server.uri())).unwrap();
        assert!(store
            .select_by_id("demand_centers", "nope")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn insert_counts_returned_rows() {
        let server = MockServer::start().await;
        let row = json!({"name": "wind farm", "lat": 1.0, "lng": 2.0});
        Mock::given(method("POST"))
            .and(path("/rest/v1/renewable_sources"))
            .and(header("Prefer", "return=representation"))
            .and(body_json(&row))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!([{"id": "r1"}])))
            .mount(&server)
            .await;

        let store = RestTableStore::new(&cfg(&server.uri())).unwrap();
        assert_eq!(store.insert("renewable_sources", row).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn delete_of_missing_row_counts_zero() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/rest/v1/infrastructure_assets"))
            .and(query_param("id", "eq.gone"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        let store = RestTableStore::new(&cfg(&server.uri())).unwrap();
        assert_eq!(
            store.delete("infrastructure_assets", "gone").await.unwrap(),
            0
        );
    }

    #[tokio::test]
    async fn non_success_status_surfaces_as_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/infrastructure_assets"))
            .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
            .mount(&server)
            .await;

        let store = RestTableStore::new(&cfg(&server.uri())).unwrap();
        let err = store.select("infrastructure_assets", "*").await.unwrap_err();
        match err {
            StoreError::Api { status, body } => {
                assert_eq!(status.as_u16(), 503);
                assert_eq!(body, "overloaded");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn blob_upload_returns_public_url() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/storage/v1/object/uploads/report.pdf"))
            .and(header("content-type", "application/pdf"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"Key": "x"})))
            .mount(&server)
            .await;

        let store = RestBlobStore::new(&cfg(&server.uri()), "uploads").unwrap();
        let url = store
            .upload("report.pdf", b"%PDF".to_vec(), "application/pdf")
            .await
            .unwrap();
        assert_eq!(
            url,
            format!("{}/storage/v1/object/public/uploads/report.pdf", server.uri())
        );
    }
}
