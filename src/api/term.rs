use actix_web::{delete, get, post, put, web, Responder};
use actix_web_validator::Json;
use diesel::dsl::sql;
use diesel::result::{DatabaseErrorKind, Error};
use diesel::sql_types::BigInt;
use diesel::{BoolExpressionMethods, ExpressionMethods, OptionalExtension};
use diesel::{Insertable, QueryDsl, Queryable, RunQueryDsl, SqliteConnection};
use log::{debug, info};
use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

use crate::response::{ApiError, OkResp};
use crate::schema::{term_relations, terms};
use crate::DBPool;

/// Upper bound on the number of terms returned by a single listing.
pub const MAX_PAGE_LIMIT: i64 = 100;

#[derive(Debug, Clone, Deserialize, Serialize, Eq, PartialEq, Queryable, Insertable)]
#[diesel(table_name = terms)]
pub struct Term {
    pub term: String,
    pub description: Option<String>,
}

impl Term {
    pub fn new(term: &str, description: Option<&str>) -> Self {
        Self {
            term: term.to_string(),
            description: description.map(str::to_string),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct TermRequest {
    #[validate(required, length(min = 1))]
    pub term: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl TermRequest {
    pub fn to_term(&self) -> Option<Term> {
        let description = self.description.as_deref().filter(|d| !d.is_empty());
        self.term.as_deref().map(|term| Term::new(term, description))
    }
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct UpdateTermRequest {
    #[serde(default, deserialize_with = "string_or_none")]
    pub description: Option<String>,
}

/// Any JSON value that is not a string reads as an absent field.
fn string_or_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value.as_str().map(str::to_string))
}

/// `offset`/`limit` query of the term listing.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub offset: Option<i64>,
    pub limit: Option<i64>,
}

impl PageQuery {
    /// Offset and limit after clamping: offset >= 0, 0 <= limit <= 100.
    pub fn bounds(&self) -> (i64, i64) {
        let offset = self.offset.unwrap_or(0).max(0);
        let limit = self
            .limit
            .unwrap_or(MAX_PAGE_LIMIT)
            .clamp(0, MAX_PAGE_LIMIT);

        (offset, limit)
    }
}

pub fn create_term(conn: &mut SqliteConnection, value: Term) -> Result<Term, ApiError> {
    use crate::schema::terms::dsl::*;

    match diesel::insert_into(terms).values(&value).execute(conn) {
        Ok(_) => {
            info!("Created term {:?}", value.term);
            Ok(value)
        }
        Err(Error::DatabaseError(DatabaseErrorKind::UniqueViolation, _)) => Err(
            ApiError::Conflict(format!("Term '{}' already exists", value.term)),
        ),
        Err(e) => Err(e.into()),
    }
}

pub fn get_term(conn: &mut SqliteConnection, key: &str) -> Result<Option<Term>, ApiError> {
    use crate::schema::terms::dsl::*;

    Ok(terms.find(key).first::<Term>(conn).optional()?)
}

/// A slice of terms in insertion order.
pub fn list_terms(
    conn: &mut SqliteConnection,
    page: &PageQuery,
) -> Result<Vec<Term>, ApiError> {
    use crate::schema::terms::dsl::*;

    let (offset, limit) = page.bounds();

    Ok(terms
        .order(sql::<BigInt>("rowid"))
        .offset(offset)
        .limit(limit)
        .load::<Term>(conn)?)
}

/// Every term in insertion order, for pickers and the graph view.
pub fn list_all_terms(conn: &mut SqliteConnection) -> Result<Vec<Term>, ApiError> {
    use crate::schema::terms::dsl::*;

    Ok(terms.order(sql::<BigInt>("rowid")).load::<Term>(conn)?)
}

pub fn count_terms(conn: &mut SqliteConnection) -> Result<i64, ApiError> {
    use crate::schema::terms::dsl::*;

    Ok(terms.count().get_result(conn)?)
}

pub fn update_term(
    conn: &mut SqliteConnection,
    key: &str,
    new_description: Option<&str>,
) -> Result<Term, ApiError> {
    use crate::schema::terms::dsl::*;

    let new_description = match new_description {
        Some(d) if !d.trim().is_empty() => d,
        _ => return Err(ApiError::invalid_input("Description is required")),
    };

    let updated = diesel::update(terms.find(key))
        .set(description.eq(new_description))
        .execute(conn)?;
    if updated == 0 {
        return Err(ApiError::term_not_found(key));
    }

    debug!("Updated description of term {:?}", key);
    Ok(Term::new(key, Some(new_description)))
}

/// Delete a term together with every relation that references it.
pub fn delete_term(conn: &mut SqliteConnection, key: &str) -> Result<usize, ApiError> {
    use crate::schema::term_relations::dsl::{term_from, term_to};

    conn.immediate_transaction::<_, ApiError, _>(|conn| {
        let deleted = diesel::delete(terms::table.find(key)).execute(conn)?;
        if deleted == 0 {
            return Err(ApiError::term_not_found(key));
        }

        let relations = diesel::delete(
            term_relations::table.filter(term_from.eq(key).or(term_to.eq(key))),
        )
        .execute(conn)?;

        info!("Deleted term {:?} and {} relation(s)", key, relations);
        Ok(deleted)
    })
}

/// Create a new term
#[post("/glossary/")]
pub async fn create(
    json: Json<TermRequest>,
    pool: web::Data<DBPool>,
) -> Result<impl Responder, ApiError> {
    let value = json
        .into_inner()
        .to_term()
        .ok_or_else(|| ApiError::invalid_input("Term is required"))?;

    let created = web::block(move || {
        let mut conn = pool.get()?;
        create_term(&mut conn, value)
    })
    .await??;

    Ok(web::Json(created))
}

/// Find a term by its name
#[get("/glossary/{term}")]
pub async fn get(
    pool: web::Data<DBPool>,
    term: web::Path<String>,
) -> Result<impl Responder, ApiError> {
    let key = term.into_inner();

    let found = web::block(move || {
        let mut conn = pool.get()?;
        get_term(&mut conn, &key)?.ok_or_else(|| ApiError::term_not_found(&key))
    })
    .await??;

    Ok(web::Json(found))
}

/// Replace the description of a term
#[put("/glossary/{term}")]
pub async fn update(
    pool: web::Data<DBPool>,
    term: web::Path<String>,
    web::Json(value): web::Json<UpdateTermRequest>,
) -> Result<impl Responder, ApiError> {
    let key = term.into_inner();

    let updated = web::block(move || {
        let mut conn = pool.get()?;
        update_term(&mut conn, &key, value.description.as_deref())
    })
    .await??;

    Ok(web::Json(updated))
}

/// Delete a term
#[delete("/glossary/{term}")]
pub async fn delete(
    pool: web::Data<DBPool>,
    term: web::Path<String>,
) -> Result<impl Responder, ApiError> {
    let key = term.into_inner();

    web::block(move || {
        let mut conn = pool.get()?;
        delete_term(&mut conn, &key)
    })
    .await??;

    Ok(web::Json(OkResp::new()))
}
