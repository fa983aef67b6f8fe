use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    http::header,
    middleware::Logger,
    web, App, HttpRequest, HttpResponse, Resource, Responder, Route,
};
use tokio::sync::RwLock;

use crate::error::{json_error_handler, path_error_handler, ApiError};
use crate::models::{DataResponse, DeletedResponse, ErrorDetail, Record, RecordPatch, Welcome};
use crate::store::{Merge, RecordStore};

pub type SharedStore = web::Data<RwLock<RecordStore>>;

pub const WELCOME: &str = "Welcome to my FastAPI Application";
pub const DATA_RECEIVED: &str = "Data Received";
pub const DATA_UPDATED: &str = "Data Updated";
pub const DATA_EDITED: &str = "Data Edited";
pub const NOTHING_TO_EDIT: &str = "No fields to update";
pub const DATA_DELETED: &str = "Data Deleted";

/// Assembles the application around a shared store: request logging,
/// the six record routes, 422 handlers for bad bodies and ids, a JSON 405 for
/// a known path hit with the wrong method, and a JSON 404 for everything else.
pub fn build_app(
    store: SharedStore,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(store)
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::PathConfig::default().error_handler(path_error_handler))
        .wrap(Logger::default())
        .service(resource("/", web::get().to(welcome), "GET"))
        .service(resource("/get-data", web::get().to(get_data), "GET"))
        .service(resource("/create", web::post().to(create_data), "POST"))
        .service(resource("/update-data/{id}", web::put().to(update_data), "PUT"))
        .service(resource("/edit-data/{id}", web::patch().to(edit_data), "PATCH"))
        .service(resource("/delete-data/{id}", web::delete().to(delete_data), "DELETE"))
        .default_service(web::to(not_found))
}

// One method per path; any other method on the path is a 405.
fn resource(path: &str, route: Route, allow: &'static str) -> Resource {
    web::resource(path)
        .route(route)
        .default_service(web::to(move |request: HttpRequest| method_not_allowed(request, allow)))
}

async fn method_not_allowed(request: HttpRequest, allow: &'static str) -> HttpResponse {
    tracing::debug!(method = %request.method(), path = request.path(), allow, "method not allowed");
    HttpResponse::MethodNotAllowed()
        .insert_header((header::ALLOW, allow))
        .json(ErrorDetail {
            detail: "Method Not Allowed".to_string(),
        })
}

async fn not_found(request: HttpRequest) -> impl Responder {
    tracing::debug!(method = %request.method(), path = request.path(), "no route matched");
    HttpResponse::NotFound().json(ErrorDetail {
        detail: "Not Found".to_string(),
    })
}

pub async fn welcome() -> impl Responder {
    HttpResponse::Ok().json(Welcome { message: WELCOME })
}

pub async fn get_data(store: SharedStore) -> impl Responder {
    let store = store.read().await;
    HttpResponse::Ok().json(store.records())
}

pub async fn create_data(record: web::Json<Record>, store: SharedStore) -> impl Responder {
    let mut store = store.write().await;
    let index = store.append(record.into_inner());
    tracing::info!(index, "record created");

    HttpResponse::Ok().json(DataResponse {
        message: DATA_RECEIVED,
        data: store.records(),
    })
}

pub async fn update_data(
    id: web::Path<i64>,
    record: web::Json<Record>,
    store: SharedStore,
) -> Result<HttpResponse, ApiError> {
    let id = id.into_inner();
    let mut store = store.write().await;
    store.replace(id, record.into_inner())?;
    tracing::info!(id, "record replaced");

    Ok(HttpResponse::Ok().json(DataResponse {
        message: DATA_UPDATED,
        data: store.records(),
    }))
}

pub async fn edit_data(
    id: web::Path<i64>,
    patch: web::Json<RecordPatch>,
    store: SharedStore,
) -> Result<HttpResponse, ApiError> {
    let id = id.into_inner();
    let mut store = store.write().await;
    let message = match store.merge(id, patch.into_inner())? {
        Merge::Merged => {
            tracing::info!(id, "record edited");
            DATA_EDITED
        }
        Merge::Unchanged => NOTHING_TO_EDIT,
    };

    Ok(HttpResponse::Ok().json(DataResponse {
        message,
        data: store.records(),
    }))
}

pub async fn delete_data(id: web::Path<i64>, store: SharedStore) -> Result<HttpResponse, ApiError> {
    let id = id.into_inner();
    let deleted = store.write().await.remove(id)?;
    tracing::info!(id, "record deleted");

    Ok(HttpResponse::Ok().json(DeletedResponse {
        message: DATA_DELETED,
        deleted,
    }))
}
