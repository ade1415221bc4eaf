use std::convert::Infallible;
use std::sync::Arc;

use warp::{Filter, Rejection, Reply};

use crate::server::error::handle_rejection;
use crate::server::handlers;
use crate::services::config::ServerConfig;
use crate::services::session_state::SessionState;

fn with_state(
    state: Arc<SessionState>,
) -> impl Filter<Extract = (Arc<SessionState>,), Error = Infallible> + Clone {
    warp::any().map(move || state.clone())
}

/// Every HTTP route, with rejection handling, CORS and request tracing.
pub fn api(
    state: Arc<SessionState>,
    config: ServerConfig,
) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    let cors = warp::cors()
        .allow_origins(config.allowed_origins.iter().map(String::as_str))
        .allow_methods(vec!["GET", "POST", "OPTIONS"])
        .allow_headers(vec!["content-type", "accept", "authorization"]);

    let root = warp::path::end().and(warp::get()).and_then(handlers::root);

    let simulate = warp::path!("api" / "simulate")
        .and(warp::post())
        .and(warp::multipart::form().max_length(config.max_upload_bytes))
        .and(with_state(state.clone()))
        .and_then(handlers::simulate);

    let grouped_summary = warp::path!("api" / "grouped-summary")
        .and(warp::get())
        .and(with_state(state.clone()))
        .and_then(handlers::grouped_summary_view);

    let order_details = warp::path!("api" / "order-details")
        .and(warp::get())
        .and(warp::query::<handlers::OrderDetailsQuery>())
        .and(with_state(state.clone()))
        .and_then(handlers::order_details_view);

    let insights = warp::path!("api" / "insights-data")
        .and(warp::get())
        .and(warp::query::<handlers::InsightsQuery>())
        .and(with_state(state.clone()))
        .and_then(handlers::insights_view);

    let summary = warp::path!("api" / "summary")
        .and(warp::get())
        .and_then(handlers::summary_view);

    let data = warp::path!("api" / "data")
        .and(warp::get())
        .and(with_state(state))
        .and_then(handlers::uploaded_data_view);

    let zone_types = warp::path!("api" / "blueprint" / "zone-types")
        .and(warp::get())
        .and_then(handlers::zone_types_view);

    let blueprint_simulate = warp::path!("api" / "blueprint" / "simulate")
        .and(warp::post())
        .and(warp::body::json())
        .and_then(handlers::blueprint_simulate_view);

    let blueprint_optimize = warp::path!("api" / "blueprint" / "optimize")
        .and(warp::post())
        .and(warp::body::json())
        .and_then(handlers::blueprint_optimize_view);

    root.or(simulate)
        .or(grouped_summary)
        .or(order_details)
        .or(insights)
        .or(summary)
        .or(data)
        .or(zone_types)
        .or(blueprint_simulate)
        .or(blueprint_optimize)
        .recover(handle_rejection)
        .with(cors)
        .with(warp::trace::request())
}
