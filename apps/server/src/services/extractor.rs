// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Floor plan processing service.

use crate::error::ApiError;
use crate::types::WallsResponse;
use std::sync::Arc;
use wallplan_vision::{extract_walls, PipelineConfig};

/// Decode an uploaded floor plan and extract its wall loops.
///
/// CPU-bound; runs on the blocking pool, contours fan out over rayon.
pub async fn process_image(data: Vec<u8>, config: Arc<PipelineConfig>) -> Result<WallsResponse, ApiError> {
    let size = data.len();
    let extraction = tokio::task::spawn_blocking(move || extract_walls(&data, &config)).await??;

    tracing::info!(
        size,
        width = extraction.frame.width,
        height = extraction.frame.height,
        contours = extraction.stats.contours_found,
        rejected_by_area = extraction.stats.rejected_by_area,
        rejected_by_vertices = extraction.stats.rejected_by_vertices,
        walls = extraction.stats.walls_emitted,
        elapsed_ms = extraction.stats.elapsed_ms,
        "Processed floor plan"
    );

    Ok(extraction.into())
}
