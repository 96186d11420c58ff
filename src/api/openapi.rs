//! OpenAPI document for the REST surface.

use utoipa::OpenApi;

use crate::api::handlers::{admin, farm, system, weather, yields};

/// Generated OpenAPI description of every endpoint.
#[derive(Debug, OpenApi)]
#[openapi(
    info(
        title = "agri-ledger",
        description = "Farm, weather and crop-yield registries"
    ),
    paths(
        system::health_handler,
        farm::register_farm,
        farm::get_farm,
        farm::update_farm,
        farm::deactivate_farm,
        weather::submit_observation,
        weather::get_observation,
        weather::report_event,
        weather::get_event,
        yields::register_expected_yield,
        yields::get_yield,
        yields::verify_actual_yield,
        yields::yield_loss,
        admin::set_farm_admin,
        admin::set_weather_admin,
        admin::set_weather_oracle,
        admin::set_yield_admin,
        admin::set_yield_verifier,
    ),
    tags(
        (name = "System", description = "Liveness"),
        (name = "Farms", description = "Farm Registry"),
        (name = "Weather", description = "Weather Registry"),
        (name = "Yields", description = "Yield Registry"),
        (name = "Admin", description = "Role administration"),
    )
)]
pub struct ApiDoc;
