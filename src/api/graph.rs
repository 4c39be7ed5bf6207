use actix_web::http::header::ContentType;
use actix_web::{get, web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};

use super::relation::{list_relations, TermRelation};
use super::term::{list_all_terms, Term};
use crate::response::ApiError;
use crate::views;
use crate::DBPool;

#[derive(Debug, Clone, Deserialize, Serialize, Eq, PartialEq)]
pub struct GraphNode {
    pub id: String,
    pub label: String,
}

#[derive(Debug, Clone, Deserialize, Serialize, Eq, PartialEq)]
pub struct GraphEdge {
    pub from: String,
    pub to: String,
    pub label: String,
}

/// Display-ready form of the glossary: one node per term, one edge per relation.
#[derive(Debug, Clone, Default, Deserialize, Serialize, Eq, PartialEq)]
pub struct Graph {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

impl From<&Term> for GraphNode {
    fn from(term: &Term) -> Self {
        Self {
            id: term.term.clone(),
            label: term.term.clone(),
        }
    }
}

impl From<&TermRelation> for GraphEdge {
    fn from(relation: &TermRelation) -> Self {
        Self {
            from: relation.term_from.clone(),
            to: relation.term_to.clone(),
            label: relation.label.clone(),
        }
    }
}

impl Graph {
    pub fn project(terms: &[Term], relations: &[TermRelation]) -> Self {
        Self {
            nodes: terms.iter().map(GraphNode::from).collect(),
            edges: relations.iter().map(GraphEdge::from).collect(),
        }
    }
}

async fn load_graph(pool: web::Data<DBPool>) -> Result<Graph, ApiError> {
    web::block(move || {
        let mut conn = pool.get()?;
        let terms = list_all_terms(&mut conn)?;
        let relations = list_relations(&mut conn)?;
        Ok::<_, ApiError>(Graph::project(&terms, &relations))
    })
    .await?
}

/// Graph page; layout happens in the browser
#[get("/graph")]
pub async fn graph_page(pool: web::Data<DBPool>) -> Result<HttpResponse, ApiError> {
    let graph = load_graph(pool).await?;
    let html = views::graph(&graph).map_err(|e| ApiError::InternalError(e.to_string()))?;

    Ok(HttpResponse::Ok().content_type(ContentType::html()).body(html))
}

/// Nodes and edges as JSON
#[get("/graph/data")]
pub async fn graph_data(pool: web::Data<DBPool>) -> Result<impl Responder, ApiError> {
    Ok(web::Json(load_graph(pool).await?))
}
