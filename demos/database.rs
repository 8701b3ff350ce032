//! Parsing a configuration file and querying it by path.
//!
//! Run with: cargo run --example database

use braceconf::{parse, Node};
use std::error::Error;

const CONFIG: &str = "# Example configuration of an elasticsearch database
database testdb {
\ttype elasticsearch;
\tnode node-00 {
\t\thost 192.168.1.10;
\t\tport 9200;
\t}
\tnode node-01 {
\t\thost 192.168.1.11;
\t\tport 9200;
\t}
\tnode node-02 {
\t\thost 192.168.1.12;
\t\tport 9201;
\t}
}
";

fn main() -> Result<(), Box<dyn Error>> {
    let root = parse(CONFIG)?;

    // First match
    let name = root.query("database").map(Node::value).unwrap_or_default();
    let kind: String = root.get_or("database/type", "unknown".to_string())?;
    println!("database {} ({})", name, kind);

    // Conditions select a section by its tag
    let port: Option<u16> = root.get("database/node:node-02/port")?;
    println!("node-02 listens on {:?}", port);

    // Every match, in document order
    for node in root.query_all("database/node") {
        let host = node.query("host").map(Node::value).unwrap_or("?");
        let port: u16 = node.get_or("port", 9200)?;
        println!("  {} -> {}:{}", node.value(), host, port);
    }

    // Missing paths fall back to defaults
    let timeout: u32 = root.get_or("database/timeout", 30)?;
    println!("timeout {}s", timeout);

    // Errors carry the position of the offending character
    if let Err(err) = parse("database testdb {\n\ttype elasticsearch\n}") {
        println!("rejected: {}", err);
    }

    Ok(())
}
