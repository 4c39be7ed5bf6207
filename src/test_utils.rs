use diesel::{Connection, SqliteConnection};
use std::env;
use std::path::PathBuf;
use uuid::Uuid;

use crate::db::{build_pool, run_migrations};
use crate::DBPool;

/// A throwaway SQLite database file with the schema applied.
pub struct TestContext {
    path: PathBuf,
}

impl TestContext {
    pub fn new(db_name: &str) -> Self {
        let path = env::temp_dir().join(format!("{}_{}.db", db_name, Uuid::new_v4().simple()));
        println!("Creating test database `{}` ...", path.display());

        let mut conn = SqliteConnection::establish(&path.to_string_lossy())
            .unwrap_or_else(|_| panic!("Could not create database {}", path.display()));
        run_migrations(&mut conn).expect("Failed to run migrations");

        Self { path }
    }

    pub fn database_url(&self) -> String {
        self.path.to_string_lossy().to_string()
    }

    pub fn get_conn(&self) -> SqliteConnection {
        SqliteConnection::establish(&self.database_url()).expect("Could not connect to database")
    }

    pub fn get_pool(&self) -> DBPool {
        build_pool(&self.database_url()).expect("Failed to create connection pool")
    }
}

impl Drop for TestContext {
    fn drop(&mut self) {
        println!("Dropping test database {}", self.path.display());
        let _ = std::fs::remove_file(&self.path);
    }
}

macro_rules! service_should_ok_and_return_json {
    ($app:expr, $req:expr) => {{
        let req = actix_web::test::TestRequest::from($req).to_request();
        let resp = actix_web::test::call_service(&$app, req).await;
        println!("{:?}", resp);

        assert!(resp.status().is_success());
        assert_eq!(
            resp.headers().get("content-type").unwrap(),
            "application/json"
        );

        resp
    }};
}

macro_rules! service_should_ok_and_return_html {
    ($app:expr, $req:expr) => {{
        let req = actix_web::test::TestRequest::from($req).to_request();
        let resp = actix_web::test::call_service(&$app, req).await;
        println!("{:?}", resp);

        assert!(resp.status().is_success());
        assert_eq!(
            resp.headers().get("content-type").unwrap(),
            "text/html; charset=utf-8"
        );

        let body = actix_web::test::read_body(resp).await;
        String::from_utf8(body.to_vec()).unwrap()
    }};
}

pub(crate) use service_should_ok_and_return_html;
pub(crate) use service_should_ok_and_return_json;
