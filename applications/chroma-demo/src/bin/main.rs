//! Talks to a Chroma server: heartbeat, create a collection, read it back.
//!
//! `CHROMA_URL` and `CHROMA_COLLECTION` select the server and collection;
//! both can also come from a `.env` file.

use dotenvy::dotenv;
use libchroma::chroma::{ChromaClient, Options};
use libchroma::network::tcp::TcpConnector;
use std::env;
use std::process::ExitCode;

const DEFAULT_URL: &str = "http://localhost:8000";
const DEFAULT_COLLECTION: &str = "TestCollection";

fn main() -> ExitCode {
    dotenv().ok();
    let base_url = env::var("CHROMA_URL").unwrap_or(DEFAULT_URL.to_string());
    let collection_name = env::var("CHROMA_COLLECTION").unwrap_or(DEFAULT_COLLECTION.to_string());

    let mut client = match ChromaClient::new(TcpConnector::new(), Options::new(&base_url)) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("invalid CHROMA_URL {base_url:?}: {e:?}");
            return ExitCode::FAILURE;
        }
    };

    if client.heartbeat() {
        println!("HEARTBEAT: Success");
    }

    println!("\n\nCreate Collection");
    if client.create_collection(&collection_name) {
        println!("Collection created successfully.");
    } else {
        println!("Failed to create collection.");
    }

    let body = client.get_collection(&collection_name);
    println!("\n\nGet Collection");
    if body.is_empty() {
        println!("Collection not found or an error occurred.");
        return ExitCode::SUCCESS;
    }

    let collection = libchroma::chroma::decode_collection(&body);
    if collection.is_complete() {
        println!("Collection ID: {}", collection.id);
        println!("Collection Name: {}", collection.name);
    }
    ExitCode::SUCCESS
}
