//! Preview image upload.
//!
//! Images go to an external asset host that answers with a stable URL; that
//! URL becomes the draft's `preview_url` before the project is saved. Unlike
//! document-service calls, upload failures are returned to the caller, since
//! nothing has been saved yet.

use std::future::Future;

use hub_core::project::ProjectDraft;
use reqwest::{
  Client, StatusCode,
  multipart::{Form, Part},
};
use serde::Deserialize;
use thiserror::Error;

/// A host that stores binary assets and returns a URL for each.
pub trait AssetUploader: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  fn upload(
    &self,
    file_name: String,
    bytes: Vec<u8>,
  ) -> impl Future<Output = Result<String, Self::Error>> + Send + '_;
}

/// Upload `bytes` and attach the resulting URL to `draft`.
pub async fn attach_preview<U: AssetUploader>(
  uploader: &U,
  draft: ProjectDraft,
  file_name: String,
  bytes: Vec<u8>,
) -> Result<ProjectDraft, U::Error> {
  let url = uploader.upload(file_name, bytes).await?;
  Ok(draft.with_preview(url))
}

// ─── HTTP implementation ─────────────────────────────────────────────────────

/// Settings for an unsigned multipart upload endpoint.
#[derive(Debug, Clone)]
pub struct AssetConfig {
  /// Full upload URL, e.g. `https://api.cloudinary.com/v1_1/<cloud>/image/upload`.
  pub endpoint:      String,
  pub upload_preset: String,
}

#[derive(Debug, Error)]
pub enum AssetError {
  #[error("transport error: {0}")]
  Transport(#[from] reqwest::Error),

  #[error("upload rejected: {0}")]
  Status(StatusCode),

  #[error("upload response carried no secure_url")]
  MissingUrl,
}

#[derive(Deserialize)]
struct UploadResponse {
  secure_url: Option<String>,
}

/// Posts `file` and `upload_preset` as a multipart form and reads
/// `secure_url` from the JSON reply.
#[derive(Clone)]
pub struct HttpAssetUploader {
  client: Client,
  config: AssetConfig,
}

impl HttpAssetUploader {
  pub fn new(config: AssetConfig) -> Self { Self { client: Client::new(), config } }
}

impl AssetUploader for HttpAssetUploader {
  type Error = AssetError;

  async fn upload(&self, file_name: String, bytes: Vec<u8>) -> Result<String, AssetError> {
    let form = Form::new()
      .part("file", Part::bytes(bytes).file_name(file_name))
      .text("upload_preset", self.config.upload_preset.clone());

    let resp = self
      .client
      .post(&self.config.endpoint)
      .multipart(form)
      .send()
      .await?;

    if !resp.status().is_success() {
      tracing::error!(status = %resp.status(), "asset upload failed");
      return Err(AssetError::Status(resp.status()));
    }

    let body: UploadResponse = resp.json().await?;
    body.secure_url.ok_or(AssetError::MissingUrl)
  }
}
