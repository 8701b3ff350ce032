//! Writing configuration text with the builder.
//!
//! Run with: cargo run --example builder

use braceconf::{parse, Builder, BuilderOptions, Indent};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let mut builder = Builder::new(Vec::new());
    builder
        .write_comment("Example configuration of an elasticsearch database")?
        .start_section_with_value("database", "testdb")?
        .write_value("type", "elasticsearch")?
        .write_value("replicas", 2)?
        .write_value("compress", true)?
        .write_value("motd", "Hello, \"world\"\n")?;
    for i in 0..3 {
        builder
            .start_section_with_value("node", format!("node_0{}", i))?
            .write_value("host", format!("192.168.1.1{}", i))?
            .write_value("port", 9200)?
            .close_section()?;
    }
    builder.close_section()?;

    let text = String::from_utf8(builder.finish()?)?;
    println!("{}", text);

    // What the builder writes, the parser reads back
    let root = parse(&text)?;
    assert_eq!(root.get::<String>("database/motd")?.as_deref(), Some("Hello, \"world\"\n"));
    println!("✓ Round-trip successful\n");

    // Spaces instead of tabs
    let options = BuilderOptions::new().with_indent(Indent::Spaces(2));
    let mut builder = Builder::with_options(Vec::new(), options);
    builder.write_children(&root)?;
    println!("{}", String::from_utf8(builder.finish()?)?);

    Ok(())
}
