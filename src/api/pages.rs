use actix_web::http::header::ContentType;
use actix_web::{get, web, HttpResponse, Responder};

use super::term::{get_term, list_terms, PageQuery};
use crate::response::ApiError;
use crate::views;
use crate::DBPool;

const SCRIPTS_JS: &str = include_str!("../../static/scripts.js");

fn html(body: String) -> HttpResponse {
    HttpResponse::Ok().content_type(ContentType::html()).body(body)
}

#[get("/")]
pub async fn index() -> impl Responder {
    html(views::index())
}

#[get("/add")]
pub async fn add() -> impl Responder {
    html(views::add())
}

/// Paginated term list, at most 100 per page
#[get("/terms")]
pub async fn terms(
    pool: web::Data<DBPool>,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse, ApiError> {
    let page = query.into_inner();
    let (offset, limit) = page.bounds();

    let terms = web::block(move || {
        let mut conn = pool.get()?;
        list_terms(&mut conn, &page)
    })
    .await??;

    Ok(html(views::terms(&terms, offset, limit)))
}

#[get("/edit/{term}")]
pub async fn edit(
    pool: web::Data<DBPool>,
    term: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let key = term.into_inner();

    let found = web::block(move || {
        let mut conn = pool.get()?;
        get_term(&mut conn, &key)?.ok_or_else(|| ApiError::term_not_found(&key))
    })
    .await??;

    Ok(html(views::edit(&found)))
}

#[get("/static/scripts.js")]
pub async fn scripts() -> impl Responder {
    HttpResponse::Ok()
        .content_type("application/javascript; charset=utf-8")
        .body(SCRIPTS_JS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::term::{create_term, Term};
    use crate::test_utils::{service_should_ok_and_return_html, TestContext};
    use crate::views::escape;
    use actix_web::{http::StatusCode, test, App};

    #[actix_rt::test]
    async fn test_static_pages() {
        let app = test::init_service(App::new().service(index).service(add).service(scripts)).await;

        let req = test::TestRequest::get().uri("/");
        let body = service_should_ok_and_return_html!(app, req);
        assert!(body.contains("/terms"));

        let req = test::TestRequest::get().uri("/add");
        let body = service_should_ok_and_return_html!(app, req);
        assert!(body.contains("name=\"term\""));

        let req = test::TestRequest::get().uri("/static/scripts.js").to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());
        let body = test::read_body(resp).await;
        assert!(std::str::from_utf8(&body).unwrap().contains("DOMContentLoaded"));
    }

    #[actix_rt::test]
    async fn test_terms_page_limit_is_clamped() {
        let ctx = TestContext::new("test_terms_page_limit_is_clamped");
        let pool = web::Data::new(ctx.get_pool());
        {
            let mut conn = pool.get().unwrap();
            for i in 0..105 {
                create_term(&mut conn, Term::new(&format!("t{}", i), None)).unwrap();
            }
        }

        let app = test::init_service(App::new().app_data(pool).service(terms)).await;

        let req = test::TestRequest::get().uri("/terms?limit=1000");
        let body = service_should_ok_and_return_html!(app, req);
        assert_eq!(body.matches("data-delete-url").count(), 100);

        let req = test::TestRequest::get().uri("/terms?offset=100&limit=50");
        let body = service_should_ok_and_return_html!(app, req);
        assert_eq!(body.matches("data-delete-url").count(), 5);
    }

    #[actix_rt::test]
    async fn test_malformed_query_gets_detail_body() {
        use crate::response::ErrorResp;

        let ctx = TestContext::new("test_malformed_query_gets_detail_body");
        let pool = web::Data::new(ctx.get_pool());

        let app =
            test::init_service(App::new().app_data(pool).configure(crate::configure)).await;

        let req = test::TestRequest::get()
            .uri("/terms?offset=abc")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            resp.headers().get("content-type").unwrap(),
            "application/json"
        );

        let err: ErrorResp = test::read_body_json(resp).await;
        assert!(!err.detail.is_empty());
    }

    #[actix_rt::test]
    async fn test_edit_page() {
        let ctx = TestContext::new("test_edit_page");
        let pool = web::Data::new(ctx.get_pool());
        create_term(
            &mut pool.get().unwrap(),
            Term::new("Circuit Breaker", Some("Stops cascading failures")),
        )
        .unwrap();

        let app = test::init_service(App::new().app_data(pool).service(edit)).await;

        let req = test::TestRequest::get().uri("/edit/Circuit%20Breaker");
        let body = service_should_ok_and_return_html!(app, req);
        assert!(body.contains(&escape("Stops cascading failures")));
        assert!(body.contains("/glossary/Circuit%20Breaker"));

        let req = test::TestRequest::get().uri("/edit/ghost").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
