// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Floor plan upload endpoint.

use crate::error::ApiError;
use crate::services::process_image;
use crate::types::WallsResponse;
use crate::AppState;
use axum::{
    extract::{Multipart, State},
    Json,
};

/// Extract file data from multipart request.
async fn extract_file(multipart: &mut Multipart) -> Result<Vec<u8>, ApiError> {
    while let Some(field) = multipart.next_field().await? {
        let field_name = field.name().unwrap_or_default();
        tracing::debug!(field_name = %field_name, "Processing multipart field");

        if field_name == "file" {
            let bytes = field.bytes().await?;
            tracing::debug!(size = bytes.len(), "Extracted file from multipart");
            return Ok(bytes.to_vec());
        }
    }

    tracing::warn!("No 'file' field found in multipart request");
    Err(ApiError::MissingFile)
}

/// POST /process-image/ and /api/v1/walls - Floor plan to wall loops.
pub async fn process(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<WallsResponse>, ApiError> {
    let data = extract_file(&mut multipart).await?;

    if data.len() > state.config.max_file_size_bytes() {
        return Err(ApiError::FileTooLarge {
            max_mb: state.config.max_file_size_mb,
        });
    }

    let response = process_image(data, state.pipeline.clone()).await?;
    Ok(Json(response))
}
