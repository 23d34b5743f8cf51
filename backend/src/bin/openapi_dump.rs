//! Print the OpenAPI document as JSON.

use backend::doc::ApiDoc;
use utoipa::OpenApi;

fn main() {
    match ApiDoc::openapi().to_json() {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("failed to serialise OpenAPI document: {e}");
            std::process::exit(1);
        }
    }
}
