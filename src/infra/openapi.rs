//! OpenAPI configuration.

use crate::api::name_validation::name_validation_api;
use utoipa::OpenApi;

/// OpenApi configuration.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Name validation API",
        description = "Greets people whose names are made up of letters only."
    ),
    paths(name_validation_api::validate_name),
    components(schemas(crate::infra::error::ErrorBody)),
    tags((name = "name validation", description = "Name validation"))
)]
#[derive(Clone, Copy, Debug)]
pub struct ApiDoc;
