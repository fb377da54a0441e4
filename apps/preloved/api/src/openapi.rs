//! OpenAPI documentation configuration

use utoipa::OpenApi;

/// Combined OpenAPI documentation for the Preloved API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Preloved API",
        version = "0.1.0",
        description = "Secondhand fashion catalog and shopping cart API",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    nest(
        (path = "/api/products", api = domain_products::handlers::ApiDoc),
        (path = "/api/cart", api = domain_cart::handlers::ApiDoc)
    ),
    tags(
        (name = "products", description = "Secondhand catalog endpoints"),
        (name = "cart", description = "Shopping cart endpoints")
    )
)]
pub struct ApiDoc;
