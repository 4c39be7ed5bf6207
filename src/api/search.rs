use actix_web::http::header::ContentType;
use actix_web::{get, post, web, HttpResponse};
use diesel::SqliteConnection;
use serde::{Deserialize, Serialize};

use super::term::get_term;
use crate::response::ApiError;
use crate::views;
use crate::DBPool;

pub const NO_DESCRIPTION: &str = "No description available";

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct SearchForm {
    #[serde(default)]
    pub term: Option<String>,
}

impl SearchForm {
    fn query(&self) -> Option<&str> {
        self.term.as_deref().map(str::trim).filter(|t| !t.is_empty())
    }
}

/// Outcome of an exact-name lookup. A miss is a normal result, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchResult {
    Found {
        term: String,
        description: String,
        edit_url: String,
        delete_url: String,
    },
    Missing {
        message: String,
    },
}

pub fn search_term(conn: &mut SqliteConnection, key: &str) -> Result<SearchResult, ApiError> {
    let result = match get_term(conn, key)? {
        Some(found) => SearchResult::Found {
            edit_url: views::term_url("edit", &found.term),
            delete_url: views::term_url("glossary", &found.term),
            description: found
                .description
                .unwrap_or_else(|| NO_DESCRIPTION.to_string()),
            term: found.term,
        },
        None => SearchResult::Missing {
            message: format!("Term '{}' not found.", key),
        },
    };

    Ok(result)
}

async fn render_search(pool: web::Data<DBPool>, key: String) -> Result<HttpResponse, ApiError> {
    let result = web::block(move || {
        let mut conn = pool.get()?;
        search_term(&mut conn, &key)
    })
    .await??;

    Ok(HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(views::search_results(&result)))
}

/// Search form, or the result page when `?term=` is given
#[get("/search")]
pub async fn search_page(
    pool: web::Data<DBPool>,
    query: web::Query<SearchForm>,
) -> Result<HttpResponse, ApiError> {
    match query.query() {
        Some(key) => render_search(pool, key.to_string()).await,
        None => Ok(HttpResponse::Ok()
            .content_type(ContentType::html())
            .body(views::search_form())),
    }
}

/// Look a term up by its exact name
#[post("/search")]
pub async fn search_submit(
    pool: web::Data<DBPool>,
    form: web::Form<SearchForm>,
) -> Result<HttpResponse, ApiError> {
    let key = form
        .query()
        .ok_or_else(|| ApiError::invalid_input("Search term is required"))?
        .to_string();

    render_search(pool, key).await
}
