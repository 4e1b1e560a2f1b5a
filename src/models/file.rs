//! File references and upload descriptors.

use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DefaultOnNull};
use serde_json::{Map, Value};

use super::common::{BaseEntity, IncludedData, Meta};
use crate::pagination::Pagination;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FileType {
    #[default]
    Attachment,
    /// Any type this client does not know about yet.
    #[serde(other)]
    Other,
}

/// Where an attachment is shown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Disposition {
    #[default]
    Attachment,
    AttachmentInline,
    #[serde(other)]
    Other,
}

/// A stored file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct File {
    #[serde(flatten)]
    pub base: BaseEntity,
    /// Standard MIME type of the file.
    #[serde(rename = "mimeType")]
    pub mime_type: String,
    pub filename: String,
    pub disposition: Disposition,
    #[serde(rename = "type")]
    pub kind: FileType,
}

/// Signed form fields for a direct upload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadParams {
    #[serde(rename = "Content-Type")]
    pub content_type: String,
    pub bucket: String,
    pub key: String,
    pub policy: String,
    pub success_action_status: String,
    #[serde(rename = "x-amz-algorithm")]
    pub x_amz_algorithm: String,
    #[serde(rename = "x-amz-credential")]
    pub x_amz_credential: String,
    #[serde(rename = "x-amz-date")]
    pub x_amz_date: String,
    #[serde(rename = "x-amz-signature")]
    pub x_amz_signature: String,
    /// Any further fields the server signs.
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

impl UploadParams {
    /// Non-empty form fields in submission order.
    pub fn form_fields(&self) -> Vec<(String, String)> {
        let known = [
            ("Content-Type", &self.content_type),
            ("bucket", &self.bucket),
            ("key", &self.key),
            ("policy", &self.policy),
            ("success_action_status", &self.success_action_status),
            ("x-amz-algorithm", &self.x_amz_algorithm),
            ("x-amz-credential", &self.x_amz_credential),
            ("x-amz-date", &self.x_amz_date),
            ("x-amz-signature", &self.x_amz_signature),
        ];

        let mut fields: Vec<(String, String)> = known
            .into_iter()
            .filter(|(_, value)| !value.is_empty())
            .map(|(name, value)| (name.to_string(), value.clone()))
            .collect();

        fields.extend(self.other.iter().filter_map(|(name, value)| match value {
            Value::String(s) if !s.is_empty() => Some((name.clone(), s.clone())),
            _ => None,
        }));

        fields
    }
}

/// File creation envelope.
///
/// Sent with only `file` set; the server answers with the upload target in
/// `url` and the signed fields in `params`.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileResponse {
    pub url: String,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub params: UploadParams,
    pub file: File,
}

#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilesResponse {
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub files: Vec<File>,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub included: IncludedData,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub pagination: Pagination,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub meta: Meta,
}
