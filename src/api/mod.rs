pub mod graph;
pub mod health;
pub mod pages;
pub mod relation;
pub mod search;
pub mod term;
