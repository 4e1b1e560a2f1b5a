use reqwest::multipart::{Form, Part};
use reqwest::StatusCode;

use super::FileService;
use crate::error::{DeskError, Result};
use crate::models::FileResponse;

const UPLOAD_ACCEPTED: [StatusCode; 3] = [StatusCode::OK, StatusCode::CREATED, StatusCode::NO_CONTENT];

impl FileService {
    /// Upload file contents to the storage target named by a descriptor
    /// from [`create`](crate::Create::create).
    ///
    /// The signed parameters are sent as form fields followed by the file
    /// itself. The request goes straight to `descriptor.url` without the
    /// API key or the middleware chain.
    ///
    /// # Errors
    ///
    /// Returns [`DeskError::UnexpectedStatus`] unless the target answers
    /// 200, 201 or 204.
    #[tracing::instrument(skip(self, descriptor, contents), fields(filename = %descriptor.file.filename, size = contents.len()))]
    pub async fn upload(&self, descriptor: &FileResponse, contents: Vec<u8>) -> Result<()> {
        let mut form = Form::new();
        for (name, value) in descriptor.params.form_fields() {
            form = form.text(name, value);
        }

        let mut part = Part::bytes(contents).file_name(descriptor.file.filename.clone());
        if !descriptor.file.mime_type.is_empty() {
            part = part
                .mime_str(&descriptor.file.mime_type)
                .map_err(|e| DeskError::RequestBuild(format!("invalid MIME type: {e}")))?;
        }
        form = form.part("file", part);

        let client = self.client();
        let response = client
            .cancellable(client.http().post(&descriptor.url).multipart(form).send())
            .await
            .map_err(|e| {
                tracing::error!(error = %e, url = %descriptor.url, "upload failed");
                e
            })?;

        let status = response.status();
        if UPLOAD_ACCEPTED.contains(&status) {
            tracing::debug!(status = status.as_u16(), "upload accepted");
            return Ok(());
        }

        let body = client.read_body(response).await?;
        let body = String::from_utf8_lossy(&body).into_owned();
        tracing::error!(status_code = status.as_u16(), url = %descriptor.url, response_body = %body, "upload rejected");
        Err(DeskError::UnexpectedStatus {
            status: status.as_u16(),
            body,
        })
    }
}
