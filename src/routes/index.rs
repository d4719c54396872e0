use actix_web::{http::header::ContentType, HttpResponse, Responder};

const INDEX_HTML: &str = include_str!("../../static/index.html");

/*
    /
*/
pub async fn index() -> impl Responder {
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(INDEX_HTML)
}
