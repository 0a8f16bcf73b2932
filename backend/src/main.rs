//! Backend entry-point: wires REST endpoints, adapters, and OpenAPI docs.

use std::env;
use std::sync::Arc;

use actix_web::{App, HttpServer, web};
use mockable::DefaultClock;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};
use url::Url;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(debug_assertions)]
use backend::ApiDoc;
use backend::domain::ports::{FixtureGeoLocationResolver, GeoLocationResolver};
use backend::domain::{RestaurantService, ReviewService};
use backend::inbound::http::state::HttpState;
use backend::inbound::http::{restaurants, reviews};
use backend::outbound::geocoding::NominatimGeoLocationResolver;
use backend::outbound::persistence::InMemoryRestaurantStore;

fn geo_resolver() -> std::io::Result<Arc<dyn GeoLocationResolver>> {
    match env::var("GEOCODER_URL") {
        Ok(raw) => {
            let endpoint = Url::parse(&raw).map_err(|error| {
                std::io::Error::other(format!("invalid GEOCODER_URL {raw}: {error}"))
            })?;
            Ok(Arc::new(NominatimGeoLocationResolver::new(endpoint)))
        }
        Err(_) => {
            warn!("GEOCODER_URL not set; using the fixture geolocation resolver");
            Ok(Arc::new(FixtureGeoLocationResolver))
        }
    }
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".into());

    let store = Arc::new(InMemoryRestaurantStore::new());
    let clock = Arc::new(DefaultClock);
    let resolver = geo_resolver()?;
    let state = HttpState::new(
        Arc::new(RestaurantService::new(
            store.clone(),
            resolver,
            clock.clone(),
        )),
        Arc::new(ReviewService::new(store, clock)),
    );

    let server = HttpServer::new(move || {
        let api = web::scope("/api")
            .service(restaurants::create_restaurant)
            .service(restaurants::search_restaurants)
            .service(restaurants::get_restaurant)
            .service(restaurants::update_restaurant)
            .service(restaurants::delete_restaurant)
            .service(reviews::create_review)
            .service(reviews::list_reviews)
            .service(reviews::get_review)
            .service(reviews::update_review)
            .service(reviews::delete_review);

        let app = App::new()
            .app_data(web::Data::new(state.clone()))
            .service(api);

        #[cfg(debug_assertions)]
        let app =
            app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

        #[cfg(feature = "metrics")]
        let app = app.wrap(make_metrics());

        app
    })
    .bind(bind_addr)?;

    server.run().await
}

#[cfg(feature = "metrics")]
fn make_metrics() -> actix_web_prom::PrometheusMetrics {
    actix_web_prom::PrometheusMetricsBuilder::new("restaurant_backend")
        .endpoint("/metrics")
        .build()
        .expect("configure Prometheus metrics")
}
