use docshell::{
    render_document, Attributes, Content, DocumentAssembler, DocumentConfig, Node, RawHtml,
    Script, Stylesheet,
};
use pretty_assertions::assert_eq;

fn count(haystack: &str, needle: &str) -> usize {
    haystack.matches(needle).count()
}

#[test]
fn renders_home_page_scenario() {
    let config: DocumentConfig = serde_json::from_str(
        r#"{
            "title": "Home",
            "metatags": [{"name": "x", "content": "y"}],
            "stylesheets": ["a.css"],
            "scripts": ["b.js"],
            "state": {"count": 1},
            "stateKey": "s"
        }"#,
    )
    .unwrap();
    let config = config.with_content(RawHtml::new("<p>Hi</p>"));

    let html = render_document(&config).unwrap();

    assert!(html.contains("<title>Home</title>"));
    assert!(html.contains(r#"<meta name="x" content="y">"#));
    assert!(html.contains(r#"<link rel="stylesheet" href="a.css">"#));
    assert!(html.contains(r#"<div id="app"><p>Hi</p></div>"#));

    let state = r#"<script data-s>window.s = {"count":1};</script>"#;
    let user = r#"<script src="b.js"></script>"#;
    let state_at = html.find(state).unwrap();
    let user_at = html.find(user).unwrap();
    assert!(state_at < user_at);
}

#[test]
fn renders_minimal_document_from_empty_config() {
    let config: DocumentConfig = serde_json::from_str("{}").unwrap();

    let html = render_document(&config).unwrap();

    assert_eq!(
        html,
        "<html><head><title></title></head><body><script data-__state>window.__state = {};</script></body></html>"
    );
}

#[test]
fn emits_exactly_one_title_and_state_script() {
    for scripts in [vec![], vec![Script::from("a.js")], vec!["a.js".into(), "b.js".into()]] {
        let config = DocumentConfig {
            title: "T".to_string(),
            scripts,
            ..Default::default()
        };

        let html = render_document(&config).unwrap();

        assert_eq!(count(&html, "<title>"), 1);
        assert_eq!(count(&html, "window.__state = {};"), 1);
        assert!(html.contains("<body><script data-__state>"));
    }
}

#[test]
fn metatags_keep_count_order_and_attributes() {
    let metatags = vec![
        Attributes::new().with("charset", "utf-8"),
        Attributes::new()
            .with("name", "viewport")
            .with("content", "width=device-width"),
        Attributes::new()
            .with("property", "og:title")
            .with("content", "Home"),
    ];
    let config = DocumentConfig {
        metatags,
        ..Default::default()
    };

    let html = render_document(&config).unwrap();

    assert_eq!(count(&html, "<meta"), 3);
    assert!(html.contains(concat!(
        r#"<meta charset="utf-8">"#,
        r#"<meta name="viewport" content="width=device-width">"#,
        r#"<meta property="og:title" content="Home">"#
    )));
}

#[test]
fn string_and_expanded_stylesheets_render_the_same() {
    let short = DocumentConfig {
        stylesheets: vec!["x.css".into()],
        ..Default::default()
    };
    let long = DocumentConfig {
        stylesheets: vec![Stylesheet::Linked(Attributes::new().with("href", "x.css"))],
        ..Default::default()
    };

    assert_eq!(
        render_document(&short).unwrap(),
        render_document(&long).unwrap()
    );
}

#[test]
fn inline_stylesheet_produces_style_without_link() {
    let config: DocumentConfig = serde_json::from_str(
        r#"{"stylesheets": [{"href": "ignored.css", "inline": "h1 > span { color: red }"}]}"#,
    )
    .unwrap();

    let html = render_document(&config).unwrap();

    assert!(html.contains("<style>h1 > span { color: red }</style>"));
    assert!(!html.contains("<link"));
}

#[test]
fn interactive_and_static_trees_differ_only_in_markers() {
    let tree = vec![Node::element("ul")
        .child(Node::element("li").child(Node::text("one")))
        .child(Node::element("li").child(Node::text("two")))];

    let interactive = DocumentConfig::new().with_content(Content::Tree(tree.clone()));
    let static_config = DocumentConfig {
        should_render_children_statically: true,
        ..DocumentConfig::new().with_content(Content::Tree(tree))
    };

    let assembler = DocumentAssembler::new();
    let interactive = assembler.render(&interactive).unwrap();
    let static_html = assembler.render(&static_config).unwrap();

    assert!(interactive.contains(r#"<ul data-hydrate-root="">"#));
    assert!(static_html.contains("<div id=\"app\"><ul><li>one</li><li>two</li></ul></div>"));
    assert_eq!(interactive.replace(r#" data-hydrate-root="""#, ""), static_html);
}

#[test]
fn renders_concurrently_from_many_threads() {
    let config = DocumentConfig {
        title: "Shared".to_string(),
        state: serde_json::json!({"n": 42}),
        ..Default::default()
    };
    let expected = render_document(&config).unwrap();

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let config = config.clone();
            std::thread::spawn(move || render_document(&config).unwrap())
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}
