use std::path::PathBuf;

use thiserror::Error;

use crate::core::error::AppError;

/// Errors raised by the region directory
#[derive(Debug, Error)]
pub enum RegionError {
    #[error("Failed to load region data: {0}")]
    DataLoad(#[from] DataLoadError),

    #[error("City with id '{0}' not found")]
    CityNotFound(String),

    #[error("District with id '{district_id}' not found in city '{city_id}'")]
    DistrictNotFound {
        city_id: String,
        district_id: String,
    },

    #[error("Village with id '{0}' not found")]
    VillageNotFound(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Underlying cause of a failed dataset load
#[derive(Debug, Error)]
pub enum DataLoadError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl RegionError {
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            RegionError::CityNotFound(_)
                | RegionError::DistrictNotFound { .. }
                | RegionError::VillageNotFound(_)
        )
    }
}

impl From<RegionError> for AppError {
    fn from(err: RegionError) -> Self {
        match err {
            RegionError::InvalidArgument(msg) => AppError::BadRequest(msg),
            RegionError::DataLoad(e) => AppError::Internal(e.to_string()),
            e => AppError::NotFound(e.to_string()),
        }
    }
}
