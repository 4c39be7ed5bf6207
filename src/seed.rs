//! Fixture vocabulary loaded into an empty glossary on first start.

use diesel::SqliteConnection;
use log::info;

use crate::api::relation::create_relation;
use crate::api::term::{count_terms, create_term, Term};
use crate::response::ApiError;

/// `(term, description)`
pub const SEED_TERMS: &[(&str, &str)] = &[
    ("API Gateway", "Single entry point that routes client requests to backend services."),
    ("Microservice", "Small, independently deployable service owning a single business capability."),
    ("Service Discovery", "Mechanism by which services find the network locations of each other."),
    ("Load Balancer", "Distributes incoming traffic across several instances of a service."),
    ("Circuit Breaker", "Stops calling a failing dependency until it has had time to recover."),
    ("Message Broker", "Intermediary that receives, stores and delivers messages between services."),
    ("Event Sourcing", "Persisting state as an append-only sequence of domain events."),
    ("CQRS", "Command Query Responsibility Segregation: separate models for writes and reads."),
    ("Container", "Lightweight, isolated runtime packaging an application with its dependencies."),
    ("Orchestrator", "Schedules, scales and heals containers across a cluster of machines."),
];

/// `(term_from, term_to, label)`
pub const SEED_RELATIONS: &[(&str, &str, &str)] = &[
    ("API Gateway", "Microservice", "routes requests to"),
    ("API Gateway", "Service Discovery", "resolves services via"),
    ("Service Discovery", "Load Balancer", "feeds instances to"),
    ("Load Balancer", "Microservice", "distributes traffic across"),
    ("Circuit Breaker", "Microservice", "protects calls to"),
    ("Microservice", "Message Broker", "publishes events to"),
    ("Event Sourcing", "CQRS", "often paired with"),
    ("Microservice", "Container", "packaged as"),
    ("Orchestrator", "Container", "schedules"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    Inserted { terms: usize, relations: usize },
    /// The glossary already had terms; nothing was written.
    Skipped,
}

/// Insert the fixture terms and relations, but only into an empty glossary.
pub fn seed(conn: &mut SqliteConnection) -> Result<SeedOutcome, ApiError> {
    conn.immediate_transaction::<_, ApiError, _>(|conn| {
        if count_terms(conn)? > 0 {
            return Ok(SeedOutcome::Skipped);
        }

        for (term, description) in SEED_TERMS {
            create_term(conn, Term::new(term, Some(*description)))?;
        }
        for (from, to, label) in SEED_RELATIONS {
            create_relation(conn, from, to, label)?;
        }

        Ok(SeedOutcome::Inserted {
            terms: SEED_TERMS.len(),
            relations: SEED_RELATIONS.len(),
        })
    })
    .map(|outcome| {
        match outcome {
            SeedOutcome::Inserted { terms, relations } => {
                info!("Seeded {} terms and {} relations", terms, relations)
            }
            SeedOutcome::Skipped => info!("Glossary is not empty, skipping seed data"),
        }
        outcome
    })
}
