use actix_web::http::header::ContentType;
use actix_web::{web, HttpRequest, HttpResponse};
use chrono::{DateTime, Local};
use log::{debug, info};

use crate::{
    error::ServiceError,
    models::person::PersonInput,
    services::person_service,
    storage::PersonStore,
};

type Store = web::Data<dyn PersonStore>;

// GET api/persons
pub async fn find_all(store: Store) -> Result<HttpResponse, ServiceError> {
    info!("Find all people request");
    let people = person_service::find_all(store.get_ref()).await?;
    Ok(HttpResponse::Ok().json(people))
}

// GET api/persons/{id}
pub async fn find_by_id(id: web::Path<String>, store: Store) -> Result<HttpResponse, ServiceError> {
    let person = person_service::find_by_id(&id, store.get_ref()).await?;
    Ok(HttpResponse::Ok().json(person))
}

// POST api/persons
pub async fn insert(
    body: web::Json<PersonInput>,
    store: Store,
) -> Result<HttpResponse, ServiceError> {
    debug!("Insert person body: {:?}", body);
    let person = person_service::create_and_validate(body.into_inner(), store.get_ref()).await?;
    Ok(HttpResponse::Ok().json(person))
}

// PUT api/persons/{id}
pub async fn update(
    id: web::Path<String>,
    body: web::Json<PersonInput>,
    store: Store,
) -> Result<HttpResponse, ServiceError> {
    debug!("Update person {} body: {:?}", id, body);
    let person =
        person_service::replace_by_id(&id, body.into_inner(), store.get_ref()).await?;
    Ok(HttpResponse::Ok().json(person))
}

// DELETE api/persons/{id}
pub async fn delete(id: web::Path<String>, store: Store) -> Result<HttpResponse, ServiceError> {
    person_service::delete_by_id(&id, store.get_ref()).await?;
    Ok(HttpResponse::NoContent().finish())
}

// GET api/info
pub async fn info(store: Store) -> Result<HttpResponse, ServiceError> {
    let count = person_service::count(store.get_ref()).await?;
    Ok(HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(info_page(count, &Local::now())))
}

/// HTML fragment with the record count and the server's current time.
pub fn info_page(count: usize, now: &DateTime<Local>) -> String {
    format!(
        "<p>Phonebook has info for {} people</p><p>{}</p>",
        count,
        now.format("%a %b %d %Y %H:%M:%S GMT%z")
    )
}

/// Fallback for every path and method without a route.
pub async fn unknown_endpoint(req: HttpRequest) -> Result<HttpResponse, ServiceError> {
    Err(ServiceError::unknown_route(format!(
        "{} {}",
        req.method(),
        req.path()
    ))
    .with_tag("router"))
}

#[cfg(test)]
mod info_page_tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn info_page_reports_count_and_time() {
        let now = Local.with_ymd_and_hms(2024, 11, 9, 12, 30, 0).unwrap();
        let page = info_page(2, &now);
        assert!(page.starts_with(
            "<p>Phonebook has info for 2 people</p><p>Sat Nov 09 2024 12:30:00 GMT"
        ));
        assert!(page.ends_with("</p>"));
    }
}
