use braceconf::{parse, to_string, Builder, BuilderOptions, Error, Indent, Result};

fn build<F>(f: F) -> String
where
    F: FnOnce(&mut Builder<Vec<u8>>) -> Result<()>,
{
    let mut builder = Builder::new(Vec::new());
    f(&mut builder).unwrap();
    String::from_utf8(builder.finish().unwrap()).unwrap()
}

#[test]
fn test_builder() {
    let text = build(|b| {
        b.write_comment("Example configuration of an elasticsearch database")?
            .start_section_with_value("database", "testdb")?
            .write_value("type", "elasticsearch")?;
        for i in 0..3 {
            b.start_section_with_value("node", format!("node_0{}", i))?
                .write_value("host", format!("192.168.1.1{}", i))?
                .write_value("port", 9200)?
                .close_section()?;
        }
        b.close_section()?;
        Ok(())
    });

    assert_eq!(
        text,
        "# Example configuration of an elasticsearch database\n\
         database testdb {\n\
         \ttype elasticsearch;\n\
         \tnode node_00 {\n\
         \t\thost 192.168.1.10;\n\
         \t\tport 9200;\n\
         \t}\n\
         \tnode node_01 {\n\
         \t\thost 192.168.1.11;\n\
         \t\tport 9200;\n\
         \t}\n\
         \tnode node_02 {\n\
         \t\thost 192.168.1.12;\n\
         \t\tport 9200;\n\
         \t}\n\
         }\n"
    );

    let root = parse(&text).unwrap();
    assert_eq!(root.get::<u16>("database/node:node_01/port").unwrap(), Some(9200));
}

#[test]
fn test_hyphenated_values_are_quoted() {
    let text = build(|b| {
        b.start_section_with_value("node", "node-00")?
            .write_value("offset", -128)?
            .close_section()?;
        Ok(())
    });
    assert_eq!(text, "node \"node-00\" {\n\toffset \"-128\";\n}\n");

    let root = parse(&text).unwrap();
    assert_eq!(root.get::<i8>("node:node-00/offset").unwrap(), Some(-128));
}

#[test]
fn test_write_boolean() {
    let text = build(|b| {
        b.write_value("test_boolean_true", true)?
            .write_value("test_boolean_false", false)?;
        Ok(())
    });
    assert_eq!(text, "test_boolean_true on;\ntest_boolean_false off;\n");
}

#[test]
fn test_write_integers() {
    let text = build(|b| {
        b.write_value("test_byte_zero", 0i8)?
            .write_value("test_byte_max", i8::MAX)?
            .write_value("test_short_max", i16::MAX)?
            .write_value("test_integer_max", i32::MAX)?
            .write_value("test_long_max", i64::MAX)?
            .write_value("test_unsigned_max", u64::MAX)?;
        Ok(())
    });
    assert_eq!(
        text,
        "test_byte_zero 0;\ntest_byte_max 127;\ntest_short_max 32767;\n\
         test_integer_max 2147483647;\ntest_long_max 9223372036854775807;\n\
         test_unsigned_max 18446744073709551615;\n"
    );
}

#[test]
fn test_write_character() {
    let text = build(|b| {
        b.write_value("test_character_null", '\0')?
            .write_value("test_character_new_line", '\n')?
            .write_value("test_character_special", '\u{4545}')?;
        Ok(())
    });
    assert_eq!(
        text,
        "test_character_null \"\\0\";\ntest_character_new_line \"\\n\";\ntest_character_special \"\u{4545}\";\n"
    );

    let root = parse(&text).unwrap();
    assert_eq!(root.get::<char>("test_character_null").unwrap(), Some('\0'));
    assert_eq!(root.get::<char>("test_character_special").unwrap(), Some('\u{4545}'));
}

#[test]
fn test_write_comment() {
    let text = build(|b| {
        b.write_comment("One line comment")?
            .write_line()?
            .write_comment("Multiline comment\nFirst line\nSecond line")?;
        Ok(())
    });
    assert_eq!(
        text,
        "# One line comment\n\n# Multiline comment\n# First line\n# Second line\n"
    );
}

#[test]
fn test_write_comment_inside_section() {
    let text = build(|b| {
        b.start_section("events")?
            .write_comment("tuned for linux")?
            .write_value("use", "epoll")?
            .close_section()?;
        Ok(())
    });
    assert_eq!(text, "events {\n\t# tuned for linux\n\tuse epoll;\n}\n");
    assert_eq!(parse(&text).unwrap().query("events/use").unwrap().value(), "epoll");
}

#[test]
fn test_write_double() {
    let text = build(|b| {
        b.write_value("test_double_zero", 0.0)?
            .write_value("test_double_infinity", f64::INFINITY)?
            .write_value("test_double_nan", f64::NAN)?
            .write_value("test_double_positive", f64::MAX)?
            .write_value("test_double_fraction", 0.25)?;
        Ok(())
    });
    assert_eq!(
        text,
        "test_double_zero 0.0;\ntest_double_infinity Infinity;\ntest_double_nan NaN;\n\
         test_double_positive 1.7976931348623157e308;\ntest_double_fraction 0.25;\n"
    );

    let root = parse(&text).unwrap();
    assert_eq!(root.get::<f64>("test_double_positive").unwrap(), Some(f64::MAX));
    assert_eq!(root.get::<f64>("test_double_infinity").unwrap(), Some(f64::INFINITY));
}

#[test]
fn test_write_float() {
    let text = build(|b| {
        b.write_value("test_float_zero", 0.0f32)?
            .write_value("test_float_positive", f32::MAX)?
            .write_value("test_float_negative_infinity", f32::NEG_INFINITY)?;
        Ok(())
    });
    assert_eq!(
        text,
        "test_float_zero 0.0;\ntest_float_positive 3.4028235e38;\ntest_float_negative_infinity \"-Infinity\";\n"
    );

    let root = parse(&text).unwrap();
    assert_eq!(root.get::<f32>("test_float_positive").unwrap(), Some(f32::MAX));
    assert_eq!(
        root.get::<f32>("test_float_negative_infinity").unwrap(),
        Some(f32::NEG_INFINITY)
    );
}

#[test]
fn test_write_string() {
    let text = build(|b| {
        b.write_value("test_string_empty", "")?
            .write_value("test_string_safe", "this_is_safe_string")?
            .write_value("test_string_unsafe", "this is unsafe string")?
            .write_value("test_string_path", "/var/log/nginx")?;
        Ok(())
    });
    assert_eq!(
        text,
        "test_string_empty \"\";\ntest_string_safe this_is_safe_string;\n\
         test_string_unsafe \"this is unsafe string\";\ntest_string_path /var/log/nginx;\n"
    );
}

#[test]
fn test_invalid_names_are_rejected() {
    let mut builder = Builder::new(Vec::new());
    for name in ["", "9lives", "with space", "dash-ed", "caf\u{e9}"] {
        assert_eq!(
            builder.write_value(name, 1).err(),
            Some(Error::InvalidName(name.to_string()))
        );
        assert!(builder.start_section(name).is_err());
    }
    assert!(builder.get_ref().is_empty());
    assert_eq!(builder.depth(), 0);
}

#[test]
fn test_close_without_open_section() {
    let mut builder = Builder::new(Vec::new());
    assert_eq!(builder.close_section().err(), Some(Error::NoOpenSection));
}

#[test]
fn test_finish_with_open_sections() {
    let mut builder = Builder::new(Vec::new());
    builder.start_section("http").unwrap().start_section("server").unwrap();
    assert_eq!(builder.depth(), 2);
    assert_eq!(builder.finish().err(), Some(Error::UnclosedSections(2)));
}

#[test]
fn test_space_indent() {
    let mut builder = Builder::with_options(
        Vec::new(),
        BuilderOptions::new().with_indent(Indent::Spaces(4)),
    );
    builder
        .start_section("http")
        .unwrap()
        .start_section_with_value("server", "main")
        .unwrap()
        .write_value("listen", 80)
        .unwrap()
        .close_section()
        .unwrap()
        .close_section()
        .unwrap();
    let text = String::from_utf8(builder.finish().unwrap()).unwrap();
    assert_eq!(
        text,
        "http {\n    server main {\n        listen 80;\n    }\n}\n"
    );
}

#[test]
fn test_render_parsed_tree() {
    let input = "# comment\nuser www;\nhttp {\n  server main {\n    listen 80;\n    motd \"a\\tb\";\n  }\n}\n";
    let root = parse(input).unwrap();
    let text = to_string(&root).unwrap();
    assert_eq!(
        text,
        "user www;\nhttp {\n\tserver main {\n\t\tlisten 80;\n\t\tmotd \"a\\tb\";\n\t}\n}\n"
    );
    assert_eq!(parse(&text).unwrap(), root);
}

#[test]
fn test_render_parsed_tree_with_paths_and_addresses() {
    let root = parse("root \"/var/www\";\nlisten \"[::1]:80\";\nlocation \"/api\" { proxy_pass \"http://backend\"; }").unwrap();
    let text = to_string(&root).unwrap();
    assert_eq!(
        text,
        "root \"/var/www\";\nlisten \"[::1]:80\";\nlocation \"/api\" {\n\tproxy_pass \"http://backend\";\n}\n"
    );
    assert_eq!(parse(&text).unwrap(), root);
}
