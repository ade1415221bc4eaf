use std::convert::Infallible;

use serde::Serialize;
use tracing::{error, warn};
use warp::http::StatusCode;
use warp::reject::Reject;
use warp::{Rejection, Reply};

use crate::services::cost_simulation::SimulationError;
use crate::services::dataset_builder::DatasetError;
use crate::services::insights::InsightsError;
use crate::services::table_reader::TableReadError;

/// A failed request: status code plus a message for the `detail` field.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub detail: String,
}

impl Reject for ApiError {}

impl ApiError {
    pub fn new(status: StatusCode, detail: impl Into<String>) -> Self {
        Self {
            status,
            detail: detail.into(),
        }
    }

    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, detail)
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, detail)
    }
}

impl From<SimulationError> for ApiError {
    fn from(err: SimulationError) -> Self {
        Self::bad_request(err.to_string())
    }
}

impl From<DatasetError> for ApiError {
    fn from(err: DatasetError) -> Self {
        Self::bad_request(err.to_string())
    }
}

impl From<InsightsError> for ApiError {
    fn from(err: InsightsError) -> Self {
        match err {
            InsightsError::NoData => Self::new(StatusCode::NOT_FOUND, err.to_string()),
        }
    }
}

impl From<TableReadError> for ApiError {
    fn from(err: TableReadError) -> Self {
        match err {
            TableReadError::UnsupportedFileType(_)
            | TableReadError::EmptyInput
            | TableReadError::Csv(_)
            | TableReadError::Workbook(_) => Self::bad_request(err.to_string()),
            TableReadError::Read(_) => Self::internal(err.to_string()),
        }
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    status: &'static str,
    detail: &'a str,
}

pub async fn handle_rejection(err: Rejection) -> Result<impl Reply, Infallible> {
    let (status, detail) = if let Some(api_error) = err.find::<ApiError>() {
        (api_error.status, api_error.detail.clone())
    } else if err.is_not_found() {
        (StatusCode::NOT_FOUND, "not found".to_string())
    } else if let Some(e) = err.find::<warp::reject::InvalidQuery>() {
        (StatusCode::BAD_REQUEST, e.to_string())
    } else if let Some(e) = err.find::<warp::filters::body::BodyDeserializeError>() {
        (StatusCode::BAD_REQUEST, e.to_string())
    } else if err.find::<warp::reject::PayloadTooLarge>().is_some() {
        (StatusCode::PAYLOAD_TOO_LARGE, "upload exceeds the size limit".to_string())
    } else if let Some(e) = err.find::<warp::reject::UnsupportedMediaType>() {
        (StatusCode::UNSUPPORTED_MEDIA_TYPE, e.to_string())
    } else if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        (StatusCode::METHOD_NOT_ALLOWED, "method not allowed".to_string())
    } else {
        (StatusCode::INTERNAL_SERVER_ERROR, format!("unhandled rejection: {err:?}"))
    };

    if status.is_server_error() {
        error!(status = status.as_u16(), %detail, "request failed");
    } else {
        warn!(status = status.as_u16(), %detail, "request rejected");
    }

    let body = warp::reply::json(&ErrorBody {
        status: "error",
        detail: &detail,
    });
    Ok(warp::reply::with_status(body, status))
}
