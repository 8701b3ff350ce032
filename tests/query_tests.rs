use braceconf::query::{resolve_all, resolve_first};
use braceconf::{parse, Error, Node, Path};

const CLUSTER: &str = "
cluster main {
    node node-00 { host 10.0.0.1; port 9200; role master; }
    node node-01 { host 10.0.0.2; port 9201; }
    node node-02 { host 10.0.0.3; port 9202; role data; }
}
cluster backup {
    node node-00 { host 10.1.0.1; port 9300; }
}
";

fn cluster() -> Node {
    parse(CLUSTER).unwrap()
}

#[test]
fn test_first_match_is_depth_first_in_document_order() {
    let root = cluster();
    assert_eq!(root.get::<String>("cluster/node/host").unwrap().as_deref(), Some("10.0.0.1"));
    assert_eq!(root.get::<String>("cluster/node/role").unwrap().as_deref(), Some("master"));
    assert_eq!(
        root.get::<u16>("cluster:backup/node/port").unwrap(),
        Some(9300)
    );
}

#[test]
fn test_first_match_backtracks_into_later_siblings() {
    let root = parse("a { b 1; } a { c 2; }").unwrap();
    assert_eq!(root.get::<u8>("a/c").unwrap(), Some(2));

    let root = parse("cluster a { node x { host h; } } cluster b { node y { role r; } }").unwrap();
    assert_eq!(root.query("cluster/node/role").map(Node::value), Some("r"));
}

#[test]
fn test_all_matches_across_every_branch() {
    let root = cluster();
    let ports: Vec<u16> = root.get_all("cluster/node/port").unwrap();
    assert_eq!(ports, [9200, 9201, 9202, 9300]);

    let roles: Vec<String> = root.get_all("cluster/node/role").unwrap();
    assert_eq!(roles, ["master", "data"]);

    let hosts: Vec<String> = root.get_all("cluster:main/node/host").unwrap();
    assert_eq!(hosts.len(), 3);
}

#[test]
fn test_conditions() {
    let root = cluster();
    assert_eq!(
        root.query("cluster:main/node:node-02/host").map(Node::value),
        Some("10.0.0.3")
    );
    assert_eq!(
        root.query("cluster:backup/node:node-00/host").map(Node::value),
        Some("10.1.0.1")
    );
    assert!(root.query("cluster:backup/node:node-01").is_none());

    let node_00: Vec<&str> = root
        .query_all("cluster/node:node-00/host")
        .into_iter()
        .map(Node::value)
        .collect();
    assert_eq!(node_00, ["10.0.0.1", "10.1.0.1"]);
}

#[test]
fn test_condition_splits_on_first_colon() {
    let root = parse("upstream \"a:b\" { server x; }").unwrap();
    assert_eq!(root.query("upstream:a:b/server").map(Node::value), Some("x"));
}

#[test]
fn test_empty_condition_matches_empty_tag() {
    let root = parse("events { use epoll; } events tagged { use kqueue; }").unwrap();
    assert_eq!(root.query("events:/use").map(Node::value), Some("epoll"));
}

#[test]
fn test_missing_paths_return_defaults() {
    let root = cluster();
    assert!(root.query("cluster/missing").is_none());
    assert!(root.query_all("cluster/missing").is_empty());
    assert_eq!(root.get::<u16>("cluster/timeout").unwrap(), None);
    assert_eq!(root.get_or("cluster/timeout", 30u16).unwrap(), 30);
    assert_eq!(root.get_or("cluster:main/node/port", 1u16).unwrap(), 9200);
    assert!(root.get_all::<u16>("cluster:none/node/port").unwrap().is_empty());
}

#[test]
fn test_empty_segments_match_nothing() {
    let root = cluster();
    assert!(root.query("").is_none());
    assert!(root.query("cluster//node").is_none());
    assert!(root.query("/cluster").is_none());
}

#[test]
fn test_trailing_slash_ignored() {
    let root = cluster();
    assert_eq!(root.query("cluster/"), root.query("cluster"));
    assert!(root.query("cluster/").is_some());
    assert_eq!(
        root.get_all::<String>("cluster/node/host/").unwrap(),
        root.get_all::<String>("cluster/node/host").unwrap()
    );
}

#[test]
fn test_path_through_leaf_matches_nothing() {
    let root = cluster();
    assert!(root.query("cluster/node/host/more").is_none());
}

#[test]
fn test_conversion_error_aborts_query() {
    let root = parse("limits { max 10; max lots; max 30; }").unwrap();
    assert_eq!(root.get::<u32>("limits/max").unwrap(), Some(10));
    assert!(matches!(
        root.get_all::<u32>("limits/max"),
        Err(Error::Conversion { .. })
    ));
    let as_text: Vec<String> = root.get_all("limits/max").unwrap();
    assert_eq!(as_text, ["10", "lots", "30"]);
}

#[test]
fn test_custom_conversion() {
    let root = cluster();
    let addresses = root
        .query_all_with("cluster:main/node", |node| {
            let host = node.query("host").map(Node::value).unwrap_or_default();
            let port: u16 = node.get_or("port", 0)?;
            Ok(format!("{}:{}", host, port))
        })
        .unwrap();
    assert_eq!(addresses, ["10.0.0.1:9200", "10.0.0.2:9201", "10.0.0.3:9202"]);

    let fallback = root
        .query_or("cluster:staging", |node| Ok(node.value().len()), 0)
        .unwrap();
    assert_eq!(fallback, 0);
}

#[test]
fn test_first_stops_at_first_match() {
    let root = parse("v 1; v 2; v 3;").unwrap();
    let mut calls = 0;
    let first = resolve_first(&root, &Path::parse("v"), |node| {
        calls += 1;
        node.value_as::<u8>()
    })
    .unwrap();
    assert_eq!(first, Some(1));
    assert_eq!(calls, 1);

    let all = resolve_all(&root, &"v".parse().unwrap(), |node| node.value_as::<u8>()).unwrap();
    assert_eq!(all, [1, 2, 3]);
}

#[test]
fn test_path_display() {
    let path = Path::parse("database/node:node-00/port");
    assert_eq!(path.segments().len(), 3);
    assert_eq!(path.segments()[1].name, "node");
    assert_eq!(path.segments()[1].condition.as_deref(), Some("node-00"));
    assert_eq!(path.to_string(), "database/node:node-00/port");
}
