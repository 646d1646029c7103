// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Response types for the API.

use serde::Serialize;
use wallplan_vision::{WallExtraction, WallLoop};

/// Wall outlines in world units: `{"walls": [{"points": [...], "isInner": false}]}`.
#[derive(Debug, Clone, Serialize)]
pub struct WallsResponse {
    /// Closed wall loops, in contour discovery order.
    pub walls: Vec<WallLoop>,
}

impl From<WallExtraction> for WallsResponse {
    fn from(extraction: WallExtraction) -> Self {
        Self {
            walls: extraction.walls,
        }
    }
}
