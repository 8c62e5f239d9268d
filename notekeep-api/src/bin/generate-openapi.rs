//! OpenAPI Specification Generator Binary
//!
//! Prints the notekeep OpenAPI document as JSON to stdout.
//!
//! Usage:
//!   cargo run -p notekeep-api --bin generate-openapi > openapi.json

use notekeep_api::ApiDoc;
use utoipa::OpenApi;

fn main() {
    match ApiDoc::openapi().to_pretty_json() {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Failed to serialize OpenAPI spec: {}", e);
            std::process::exit(1);
        }
    }
}
