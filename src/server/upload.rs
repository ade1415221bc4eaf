use std::collections::HashMap;

use bytes::BufMut;
use futures::TryStreamExt;
use warp::multipart::{FormData, Part};

use crate::server::error::ApiError;

/// Text fields and the single file of a simulation upload.
#[derive(Debug, Default)]
pub struct UploadForm {
    pub file_name: Option<String>,
    pub file: Option<Vec<u8>>,
    pub fields: HashMap<String, String>,
}

impl UploadForm {
    pub fn field(&self, name: &str) -> Result<&str, ApiError> {
        self.fields
            .get(name)
            .map(String::as_str)
            .ok_or_else(|| ApiError::bad_request(format!("missing form field {name}")))
    }
}

/// Reads parts one at a time; multipart parts must be consumed in order.
pub async fn read_upload(mut form: FormData) -> Result<UploadForm, ApiError> {
    let mut upload = UploadForm::default();
    while let Some(part) = form
        .try_next()
        .await
        .map_err(|e| ApiError::bad_request(format!("invalid multipart body: {e}")))?
    {
        let name = part.name().to_string();
        let file_name = part.filename().map(str::to_string);
        let data = read_part(part).await?;

        if name == "file" {
            upload.file_name = file_name;
            upload.file = Some(data);
        } else {
            let text = String::from_utf8(data)
                .map_err(|_| ApiError::bad_request(format!("form field {name} is not utf-8")))?;
            upload.fields.insert(name, text);
        }
    }
    Ok(upload)
}

async fn read_part(part: Part) -> Result<Vec<u8>, ApiError> {
    part.stream()
        .try_fold(Vec::new(), |mut data, chunk| async move {
            data.put(chunk);
            Ok(data)
        })
        .await
        .map_err(|e| ApiError::bad_request(format!("failed to read upload: {e}")))
}
