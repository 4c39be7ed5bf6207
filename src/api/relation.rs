use actix_web::http::header::ContentType;
use actix_web::{get, post, web, HttpResponse, Responder};
use actix_web_validator::Json;
use diesel::{ExpressionMethods, Insertable, QueryDsl, Queryable, RunQueryDsl};
use diesel::SqliteConnection;
use log::info;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::term::{get_term, list_all_terms};
use crate::response::ApiError;
use crate::schema::term_relations;
use crate::views;
use crate::DBPool;

/// A labeled directed edge between two terms.
#[derive(Debug, Clone, Deserialize, Serialize, Eq, PartialEq, Queryable)]
pub struct TermRelation {
    pub id: i32,
    pub term_from: String,
    pub term_to: String,
    pub label: String,
}

#[derive(Insertable)]
#[diesel(table_name = term_relations)]
struct NewTermRelation<'a> {
    term_from: &'a str,
    term_to: &'a str,
    label: &'a str,
}

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct RelationRequest {
    #[validate(required, length(min = 1))]
    #[serde(default)]
    pub term_from: Option<String>,
    #[validate(required, length(min = 1))]
    #[serde(default)]
    pub term_to: Option<String>,
    #[serde(default)]
    pub label: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct RelationCreated {
    pub ok: bool,
    pub relation: TermRelation,
}

/// Insert a relation after checking both endpoints exist.
///
/// The check and the insert share one write transaction, so a concurrent
/// term delete cannot slip in between them.
pub fn create_relation(
    conn: &mut SqliteConnection,
    from: &str,
    to: &str,
    label: &str,
) -> Result<TermRelation, ApiError> {
    conn.immediate_transaction::<_, ApiError, _>(|conn| {
        for endpoint in [from, to] {
            if get_term(conn, endpoint)?.is_none() {
                return Err(ApiError::term_not_found(endpoint));
            }
        }

        let created = diesel::insert_into(term_relations::table)
            .values(&NewTermRelation {
                term_from: from,
                term_to: to,
                label,
            })
            .returning((
                term_relations::id,
                term_relations::term_from,
                term_relations::term_to,
                term_relations::label,
            ))
            .get_result::<TermRelation>(conn)?;

        info!(
            "Created relation #{}: {:?} -[{}]-> {:?}",
            created.id, created.term_from, created.label, created.term_to
        );
        Ok(created)
    })
}

pub fn list_relations(conn: &mut SqliteConnection) -> Result<Vec<TermRelation>, ApiError> {
    use crate::schema::term_relations::dsl::*;

    Ok(term_relations.order(id.asc()).load::<TermRelation>(conn)?)
}

/// Form for adding a relation, with every term as a choice
#[get("/add_relation")]
pub async fn add_relation_page(pool: web::Data<DBPool>) -> Result<HttpResponse, ApiError> {
    let terms = web::block(move || {
        let mut conn = pool.get()?;
        list_all_terms(&mut conn)
    })
    .await??;

    Ok(HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(views::add_relation(&terms)))
}

/// Create a relation between two existing terms
#[post("/add_relation")]
pub async fn create(
    json: Json<RelationRequest>,
    pool: web::Data<DBPool>,
) -> Result<impl Responder, ApiError> {
    let value = json.into_inner();

    let relation = web::block(move || {
        let mut conn = pool.get()?;
        create_relation(
            &mut conn,
            value.term_from.as_deref().unwrap_or_default(),
            value.term_to.as_deref().unwrap_or_default(),
            &value.label,
        )
    })
    .await??;

    Ok(web::Json(RelationCreated { ok: true, relation }))
}

/// List all relations
#[get("/relations")]
pub async fn list(pool: web::Data<DBPool>) -> Result<impl Responder, ApiError> {
    let relations = web::block(move || {
        let mut conn = pool.get()?;
        list_relations(&mut conn)
    })
    .await??;

    Ok(web::Json(relations))
}
