use bon::Builder;
use derive_more::Deref;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{
    client::Glik,
    error::GlikRequestError,
    file::FileUploadRequest,
    internal::{Endpoint, HttpMethod},
    response::ApiResponse,
};

const DATASETS_URL: &str = "datasets";

/// Default indexing technique applied to new documents.
const DEFAULT_INDEXING_TECHNIQUE: &str = "high_quality";

/// Segmentation and cleaning rules applied while indexing a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessRule {
    /// `automatic` or `custom`.
    pub mode: String,
    /// Rule details for `custom` mode.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rules: Option<Value>,
}

impl ProcessRule {
    /// Service-managed segmentation.
    pub fn automatic() -> Self {
        Self {
            mode: "automatic".to_string(),
            rules: None,
        }
    }
}

impl Default for ProcessRule {
    fn default() -> Self {
        Self::automatic()
    }
}

/// One segment submitted to a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Builder)]
pub struct SegmentInput {
    #[builder(into)]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(into)]
    pub answer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
}

/// Facade for knowledge-base datasets.
///
/// Dataset-scoped operations need a `dataset_id`; constructing the client
/// without one is fine for `create_dataset` / `list_datasets`, and the
/// scoped calls return [`GlikRequestError::DatasetIdMissing`] until an id is
/// set.
#[derive(Clone, Debug, Deref)]
pub struct GlikDatasets {
    #[deref]
    core: Glik,
    /// Dataset the document and segment operations act on.
    dataset_id: Option<String>,
}

impl From<Glik> for GlikDatasets {
    fn from(core: Glik) -> Self {
        Self {
            core,
            dataset_id: None,
        }
    }
}

impl GlikDatasets {
    /// Create a new dataset client with the provided API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Glik::new(api_key).into()
    }

    /// Read the API key from the `GLIK_API_KEY` environment variable.
    pub fn load_from_env() -> Result<Self, std::env::VarError> {
        Ok(Glik::load_from_env()?.into())
    }

    /// Scope this client to a dataset.
    pub fn with_dataset_id(mut self, dataset_id: impl Into<String>) -> Self {
        self.dataset_id = Some(dataset_id.into());
        self
    }

    /// Dataset id the scoped operations act on, if set.
    pub fn dataset_id(&self) -> Option<&str> {
        self.dataset_id.as_deref()
    }

    /// Scoped id, or the error every dataset-scoped call reports without one.
    fn require_dataset_id(&self) -> Result<&str, GlikRequestError> {
        self.dataset_id
            .as_deref()
            .ok_or(GlikRequestError::DatasetIdMissing)
    }

    /// Create an empty dataset.
    pub async fn create_dataset(&self, name: &str) -> Result<ApiResponse, GlikRequestError> {
        let endpoint = Endpoint::new(DATASETS_URL, HttpMethod::Post);
        let body = serde_json::json!({ "name": name });

        self.core.request_helper().send(&endpoint, Some(&body)).await
    }

    /// List datasets, paginated.
    pub async fn list_datasets(
        &self,
        page: Option<u32>,
        page_size: Option<u32>,
    ) -> Result<ApiResponse, GlikRequestError> {
        let mut query_params = Vec::new();
        if let Some(page) = page {
            query_params.push(("page".to_string(), page.to_string()));
        }
        if let Some(page_size) = page_size {
            query_params.push(("limit".to_string(), page_size.to_string()));
        }

        let endpoint = Endpoint::new(DATASETS_URL, HttpMethod::Get).with_query_params(query_params);

        self.core.request_helper().send(&endpoint, None::<&()>).await
    }

    /// Delete the scoped dataset.
    pub async fn delete_dataset(&self) -> Result<ApiResponse, GlikRequestError> {
        let endpoint = Endpoint::new(
            format!("{DATASETS_URL}/{}", self.require_dataset_id()?),
            HttpMethod::Delete,
        );

        self.core.request_helper().send(&endpoint, None::<&()>).await
    }

    /// Create a document from a piece of text.
    ///
    /// `extra` is merged over the default indexing settings, so callers can
    /// override `indexing_technique` or supply a custom process rule.
    pub async fn create_document_by_text(
        &self,
        name: &str,
        text: &str,
        extra: Option<&Map<String, Value>>,
    ) -> Result<ApiResponse, GlikRequestError> {
        let mut body = document_defaults()?;
        body.insert("name".to_string(), Value::from(name));
        body.insert("text".to_string(), Value::from(text));
        if let Some(extra) = extra {
            body.extend(extra.clone());
        }

        let endpoint = Endpoint::new(
            format!(
                "{DATASETS_URL}/{}/document/create_by_text",
                self.require_dataset_id()?
            ),
            HttpMethod::Post,
        );

        self.core
            .request_helper()
            .send(&endpoint, Some(&Value::Object(body)))
            .await
    }

    /// Replace a document's name and text.
    pub async fn update_document_by_text(
        &self,
        document_id: &str,
        name: &str,
        text: &str,
        extra: Option<&Map<String, Value>>,
    ) -> Result<ApiResponse, GlikRequestError> {
        let mut body = Map::new();
        body.insert("name".to_string(), Value::from(name));
        body.insert("text".to_string(), Value::from(text));
        if let Some(extra) = extra {
            body.extend(extra.clone());
        }

        let endpoint = Endpoint::new(
            format!(
                "{DATASETS_URL}/{}/documents/{document_id}/update_by_text",
                self.require_dataset_id()?
            ),
            HttpMethod::Post,
        );

        self.core
            .request_helper()
            .send(&endpoint, Some(&Value::Object(body)))
            .await
    }

    /// Create a document from an uploaded file.
    ///
    /// The indexing settings travel as a JSON-encoded `data` form field next
    /// to the file part. Set `original_document_id` to replace an existing
    /// document.
    pub async fn create_document_by_file(
        &self,
        file: &FileUploadRequest,
        original_document_id: Option<&str>,
        extra: Option<&Map<String, Value>>,
    ) -> Result<ApiResponse, GlikRequestError> {
        let mut data = document_defaults()?;
        if let Some(extra) = extra {
            data.extend(extra.clone());
        }
        if let Some(original_document_id) = original_document_id {
            data.insert(
                "original_document_id".to_string(),
                Value::from(original_document_id),
            );
        }

        let endpoint = Endpoint::new(
            format!(
                "{DATASETS_URL}/{}/document/create_by_file",
                self.require_dataset_id()?
            ),
            HttpMethod::Post,
        );
        let form = reqwest::multipart::Form::new()
            .text("data", Value::Object(data).to_string())
            .part("file", file.to_part()?);

        self.core.request_helper().send_multipart(&endpoint, form).await
    }

    /// Replace a document's content with an uploaded file.
    pub async fn update_document_by_file(
        &self,
        document_id: &str,
        file: &FileUploadRequest,
        extra: Option<&Map<String, Value>>,
    ) -> Result<ApiResponse, GlikRequestError> {
        let data = extra.cloned().unwrap_or_default();

        let endpoint = Endpoint::new(
            format!(
                "{DATASETS_URL}/{}/documents/{document_id}/update_by_file",
                self.require_dataset_id()?
            ),
            HttpMethod::Post,
        );
        let form = reqwest::multipart::Form::new()
            .text("data", Value::Object(data).to_string())
            .part("file", file.to_part()?);

        self.core.request_helper().send_multipart(&endpoint, form).await
    }

    /// Check the indexing progress of a document batch.
    pub async fn batch_indexing_status(
        &self,
        batch_id: &str,
    ) -> Result<ApiResponse, GlikRequestError> {
        let endpoint = Endpoint::new(
            format!(
                "{DATASETS_URL}/{}/documents/{batch_id}/indexing-status",
                self.require_dataset_id()?
            ),
            HttpMethod::Get,
        );

        self.core.request_helper().send(&endpoint, None::<&()>).await
    }

    /// List documents in the scoped dataset.
    pub async fn list_documents(
        &self,
        page: Option<u32>,
        page_size: Option<u32>,
        keyword: Option<&str>,
    ) -> Result<ApiResponse, GlikRequestError> {
        let mut query_params = Vec::new();
        if let Some(page) = page {
            query_params.push(("page".to_string(), page.to_string()));
        }
        if let Some(page_size) = page_size {
            query_params.push(("limit".to_string(), page_size.to_string()));
        }
        if let Some(keyword) = keyword {
            query_params.push(("keyword".to_string(), keyword.to_string()));
        }

        let endpoint = Endpoint::new(
            format!("{DATASETS_URL}/{}/documents", self.require_dataset_id()?),
            HttpMethod::Get,
        )
        .with_query_params(query_params);

        self.core.request_helper().send(&endpoint, None::<&()>).await
    }

    /// Delete a document.
    pub async fn delete_document(
        &self,
        document_id: &str,
    ) -> Result<ApiResponse, GlikRequestError> {
        let endpoint = Endpoint::new(
            format!(
                "{DATASETS_URL}/{}/documents/{document_id}",
                self.require_dataset_id()?
            ),
            HttpMethod::Delete,
        );

        self.core.request_helper().send(&endpoint, None::<&()>).await
    }

    /// Append segments to a document.
    pub async fn add_segments(
        &self,
        document_id: &str,
        segments: &[SegmentInput],
    ) -> Result<ApiResponse, GlikRequestError> {
        let endpoint = Endpoint::new(
            format!(
                "{DATASETS_URL}/{}/documents/{document_id}/segments",
                self.require_dataset_id()?
            ),
            HttpMethod::Post,
        );
        let body = serde_json::json!({ "segments": segments });

        self.core.request_helper().send(&endpoint, Some(&body)).await
    }

    /// Query a document's segments.
    pub async fn query_segments(
        &self,
        document_id: &str,
        keyword: Option<&str>,
        status: Option<&str>,
    ) -> Result<ApiResponse, GlikRequestError> {
        let mut query_params = Vec::new();
        if let Some(keyword) = keyword {
            query_params.push(("keyword".to_string(), keyword.to_string()));
        }
        if let Some(status) = status {
            query_params.push(("status".to_string(), status.to_string()));
        }

        let endpoint = Endpoint::new(
            format!(
                "{DATASETS_URL}/{}/documents/{document_id}/segments",
                self.require_dataset_id()?
            ),
            HttpMethod::Get,
        )
        .with_query_params(query_params);

        self.core.request_helper().send(&endpoint, None::<&()>).await
    }

    /// Replace one segment's content.
    pub async fn update_document_segment(
        &self,
        document_id: &str,
        segment_id: &str,
        segment: &SegmentInput,
    ) -> Result<ApiResponse, GlikRequestError> {
        let endpoint = Endpoint::new(
            format!(
                "{DATASETS_URL}/{}/documents/{document_id}/segments/{segment_id}",
                self.require_dataset_id()?
            ),
            HttpMethod::Post,
        );
        let body = serde_json::json!({ "segment": segment });

        self.core.request_helper().send(&endpoint, Some(&body)).await
    }

    /// Delete one segment.
    pub async fn delete_document_segment(
        &self,
        document_id: &str,
        segment_id: &str,
    ) -> Result<ApiResponse, GlikRequestError> {
        let endpoint = Endpoint::new(
            format!(
                "{DATASETS_URL}/{}/documents/{document_id}/segments/{segment_id}",
                self.require_dataset_id()?
            ),
            HttpMethod::Delete,
        );

        self.core.request_helper().send(&endpoint, None::<&()>).await
    }
}

/// Default indexing settings for new documents.
fn document_defaults() -> Result<Map<String, Value>, GlikRequestError> {
    let mut map = Map::new();
    map.insert(
        "indexing_technique".to_string(),
        Value::from(DEFAULT_INDEXING_TECHNIQUE),
    );
    map.insert(
        "process_rule".to_string(),
        serde_json::to_value(ProcessRule::automatic())?,
    );
    Ok(map)
}
