// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use thiserror::Error;

/// Result type for wall extraction
pub type Result<T> = std::result::Result<T, VisionError>;

/// Errors that can occur during wall extraction
#[derive(Error, Debug)]
pub enum VisionError {
    /// Undecodable upload, degenerate image, or unusable configuration
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
