use std::convert::Infallible;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;
use warp::multipart::FormData;
use warp::{Rejection, Reply};

use crate::server::error::ApiError;
use crate::server::upload::{UploadForm, read_upload};
use crate::services::aggregate_metrics::aggregate_metrics;
use crate::services::blueprint::{optimize_blueprint, simulate_blueprint, zone_catalog};
use crate::services::blueprint_types::BlueprintRequest;
use crate::services::city_demand::city_demand;
use crate::services::cost_sampler::RngCostSampler;
use crate::services::cost_simulation::simulate_and_publish;
use crate::services::dataset_builder::build_dataset;
use crate::services::grouped_summary::grouped_summary;
use crate::services::insights::{InsightsFilter, build_insights};
use crate::services::order_details::order_details;
use crate::services::session_state::SessionState;
use crate::services::simulation_types::{SimulationParameters, SimulationResult};
use crate::services::table_reader::read_table_from_bytes;

#[derive(Serialize)]
struct Envelope<T: Serialize> {
    status: &'static str,
    data: T,
    message: String,
}

fn success<T: Serialize>(data: T, message: impl Into<String>) -> warp::reply::Json {
    warp::reply::json(&Envelope {
        status: "success",
        data,
        message: message.into(),
    })
}

#[derive(Deserialize, Debug)]
pub struct OrderDetailsQuery {
    pub city: String,
    pub order_type: String,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct InsightsQuery {
    pub city: Option<String>,
    pub order_type: Option<String>,
    pub min_volume: Option<f64>,
    pub savings_threshold: Option<f64>,
}

pub async fn root() -> Result<impl Reply, Infallible> {
    Ok(warp::reply::json(&serde_json::json!({
        "message": "FulfillSmart API is running"
    })))
}

pub async fn simulate(form: FormData, state: Arc<SessionState>) -> Result<impl Reply, Rejection> {
    let upload = read_upload(form).await.map_err(warp::reject::custom)?;
    let results = run_upload(&state, &upload).map_err(warp::reject::custom)?;
    Ok(success(
        results.as_slice(),
        "Simulation completed successfully",
    ))
}

fn run_upload(
    state: &SessionState,
    upload: &UploadForm,
) -> Result<Arc<Vec<SimulationResult>>, ApiError> {
    let params = SimulationParameters::parse(
        upload.field("breakEvenVolume")?,
        upload.field("targetTime")?,
        upload.field("demandMultiplier")?,
    )?;
    let bytes = upload
        .file
        .as_deref()
        .ok_or_else(|| ApiError::bad_request("missing form field file"))?;
    let file_name = upload.file_name.as_deref().unwrap_or_default();

    let table = read_table_from_bytes(file_name, bytes)?;
    info!(file = file_name, rows = table.len(), columns = table.columns.len(), "upload decoded");
    let dataset = state.publish_dataset(build_dataset(&table)?);

    let mut sampler = RngCostSampler::new(rand::thread_rng());
    Ok(simulate_and_publish(state, &dataset, &params, &mut sampler)?)
}

pub async fn grouped_summary_view(state: Arc<SessionState>) -> Result<impl Reply, Infallible> {
    let summary = grouped_summary(&state.latest_results());
    Ok(success(summary, "Grouped summary data retrieved successfully"))
}

pub async fn order_details_view(
    query: OrderDetailsQuery,
    state: Arc<SessionState>,
) -> Result<impl Reply, Infallible> {
    let details = order_details(&state.latest_results(), &query.city, &query.order_type);
    Ok(success(
        details,
        format!(
            "Order details for {} - {} retrieved successfully",
            query.city, query.order_type
        ),
    ))
}

pub async fn insights_view(
    query: InsightsQuery,
    state: Arc<SessionState>,
) -> Result<impl Reply, Rejection> {
    let filter = InsightsFilter::from_lists(
        query.city.as_deref(),
        query.order_type.as_deref(),
        query.min_volume,
        query.savings_threshold,
    );
    let report = build_insights(&state.latest_results(), &filter)
        .map_err(|e| warp::reject::custom(ApiError::from(e)))?;
    Ok(warp::reply::json(&report))
}

pub async fn summary_view() -> Result<impl Reply, Infallible> {
    Ok(success(aggregate_metrics(), "Summary data retrieved successfully"))
}

pub async fn uploaded_data_view(state: Arc<SessionState>) -> Result<impl Reply, Infallible> {
    let reply = match state.latest_dataset().filter(|dataset| !dataset.is_empty()) {
        Some(dataset) => success(
            Some(city_demand(&dataset)),
            "Uploaded data retrieved successfully",
        ),
        None => success(None::<()>, "No data uploaded yet"),
    };
    Ok(reply)
}

pub async fn zone_types_view() -> Result<impl Reply, Infallible> {
    Ok(warp::reply::json(&zone_catalog()))
}

pub async fn blueprint_simulate_view(request: BlueprintRequest) -> Result<impl Reply, Infallible> {
    Ok(warp::reply::json(&simulate_blueprint(&request)))
}

pub async fn blueprint_optimize_view(request: BlueprintRequest) -> Result<impl Reply, Infallible> {
    Ok(warp::reply::json(&optimize_blueprint(&request)))
}
