use actix_cors::Cors;
use actix_web::{error, web, App, HttpResponse, HttpServer, Result as ActixResult};
use serde::Serialize;
use stockpickr_core::{Error, RowId};
use stockpickr_features::InputBounds;
use stockpickr_similarity::{RecommendRequest, Recommender};
use tracing::{debug, info};

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    companies: usize,
}

#[derive(Serialize)]
struct CatalogInfo<'a> {
    companies: usize,
    reference_year: i32,
    industries: Vec<&'a str>,
    countries: Vec<&'a str>,
    bounds: InputBounds,
}

pub struct RestApi;

impl RestApi {
    pub async fn start(recommender: Recommender, port: u16) -> std::io::Result<()> {
        info!("HTTP API listening on 0.0.0.0:{}", port);
        HttpServer::new(move || {
            let cors = Cors::default()
                .allow_any_origin()
                .allow_any_method()
                .allow_any_header()
                .max_age(3600);

            App::new()
                .wrap(cors)
                .app_data(web::Data::new(recommender.clone()))
                .configure(configure)
        })
        .bind(("0.0.0.0", port))?
        .run()
        .await
    }
}

/// Register the routes and a JSON error handler for malformed bodies
pub fn configure(cfg: &mut web::ServiceConfig) {
    let json_config = web::JsonConfig::default().error_handler(|err, _req| {
        let body = serde_json::json!({ "error": err.to_string() });
        error::InternalError::from_response(err, HttpResponse::BadRequest().json(body)).into()
    });

    cfg.app_data(json_config)
        .route("/health", web::get().to(health))
        .route("/catalog", web::get().to(catalog_info))
        .route("/companies/{id}", web::get().to(get_company))
        .route("/recommend", web::post().to(recommend));
}

fn error_response(e: &Error) -> HttpResponse {
    let body = serde_json::json!({ "error": e.to_string() });
    if e.is_request_error() {
        HttpResponse::BadRequest().json(body)
    } else {
        HttpResponse::InternalServerError().json(body)
    }
}

async fn health(recommender: web::Data<Recommender>) -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(HealthResponse {
        status: "ok",
        companies: recommender.len(),
    }))
}

async fn catalog_info(recommender: web::Data<Recommender>) -> ActixResult<HttpResponse> {
    let catalog = recommender.catalog();
    let info = CatalogInfo {
        companies: catalog.len(),
        reference_year: catalog.reference_year(),
        industries: catalog.distinct_industries(),
        countries: catalog.distinct_countries(),
        bounds: catalog.input_bounds(),
    };
    Ok(HttpResponse::Ok().json(info))
}

async fn get_company(
    recommender: web::Data<Recommender>,
    path: web::Path<u32>,
) -> ActixResult<HttpResponse> {
    let id = RowId(path.into_inner());

    match recommender.catalog().get(id) {
        Some(record) => Ok(HttpResponse::Ok().json(serde_json::json!({
            "result": record
        }))),
        None => Ok(HttpResponse::NotFound().json(serde_json::json!({
            "error": "Company not found"
        }))),
    }
}

async fn recommend(
    recommender: web::Data<Recommender>,
    req: web::Json<RecommendRequest>,
) -> ActixResult<HttpResponse> {
    let request = req.into_inner();
    debug!(risk_level = %request.risk_level, k = request.k, "recommend request");

    match recommender.recommend_explained(&request) {
        Ok(response) => Ok(HttpResponse::Ok().json(response)),
        Err(e) => {
            debug!("rejected recommend request: {}", e);
            Ok(error_response(&e))
        }
    }
}
