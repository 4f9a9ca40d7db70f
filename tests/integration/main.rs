//! Integration tests

mod routes;
