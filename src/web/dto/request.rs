//! Request DTOs for the Web API.

use serde::Deserialize;
use utoipa::IntoParams;

/// Query parameters for the recursive listing endpoint.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListFilesQuery {
    /// Case-insensitive substring filter on file names.
    pub search: Option<String>,
}

/// Query parameters for the relative-path view endpoint.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ViewFileQuery {
    /// Directory portion of the file's relative path. Empty addresses the
    /// top level of the storage root.
    #[serde(rename = "folderPath")]
    pub folder_path: Option<String>,
    /// File name within the folder.
    #[serde(rename = "fileName")]
    pub file_name: Option<String>,
}

/// Query parameters for the discrete-segment viewer endpoint.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ViewerQuery {
    /// Top-level folder segment.
    pub folder: Option<String>,
    /// Optional subfolder segment.
    pub subfolder: Option<String>,
    /// File name segment.
    pub file: Option<String>,
}
