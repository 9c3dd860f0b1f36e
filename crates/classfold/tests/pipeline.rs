//! End-to-end runs of the optimizer on in-memory inputs.

use classfold::{Config, Error, Optimizer};

const HTML: &str = r#"<div class="card">
  <h1 class="x-red x-bold title">One</h1>
  <h2 class="x-red x-bold">Two</h2>
  <p class="x-bold" id="last">Three</p>
</div>"#;

const CSS: &str = r#"@import url(base.css);
h1 { margin: 0 }
.x-red { color: red }
.x-bold { font-weight: bold }
"#;

fn optimizer(config: Config) -> Optimizer {
    Optimizer::new(config).unwrap()
}

#[test]
fn merges_overlapping_declarations() {
    let output = optimizer(Config::default()).run(HTML, CSS).unwrap();

    assert_eq!(
        output.markup,
        r#"<div class="card">
  <h1 class="title q0">One</h1>
  <h2 class="q0">Two</h2>
  <p class="q1" id="last">Three</p>
</div>"#
    );
    assert_eq!(
        output.css,
        "@import url(base.css);\nh1{margin: 0}\n.q0{color: red;font-weight: bold}\n.q1{font-weight: bold}\n"
    );

    let report = &output.report;
    assert_eq!(report.declarations, 2);
    assert_eq!(report.relevant_elements, 3);
    assert_eq!(report.rules, 2);
    assert_eq!(report.modified_elements, 3);
    assert_eq!(report.passthrough_items, 2);
    assert_eq!(report.stats.fallbacks(), 0);
}

#[test]
fn passthrough_can_be_dropped() {
    let config = Config {
        keep_passthrough_rules: false,
        ..Config::default()
    };
    let output = optimizer(config).run(HTML, CSS).unwrap();

    assert_eq!(output.css, ".q0{color: red;font-weight: bold}\n.q1{font-weight: bold}\n");
    assert_eq!(output.report.passthrough_items, 0);
}

#[test]
fn custom_namespace_and_rule_prefix() {
    let html = r#"<b class="u-a">1</b><i class="u-a">2</i>"#;
    let css = ".u-a { color: blue; text-decoration: underline }";
    let config = Config {
        namespace_prefix: "u-".into(),
        rule_prefix: "m-".into(),
        ..Config::default()
    };

    let output = optimizer(config).run(html, css).unwrap();

    assert_eq!(output.markup, r#"<b class="m-0">1</b><i class="m-0">2</i>"#);
    assert_eq!(output.css, ".m-0{color: blue;text-decoration: underline}\n");
}

#[test]
fn single_application_becomes_one_rule() {
    let output = optimizer(Config::default())
        .run(r#"<span class="x-only">s</span>"#, ".x-only { color: green }")
        .unwrap();

    assert_eq!(output.markup, r#"<span class="q0">s</span>"#);
    assert_eq!(output.css, ".q0{color: green}\n");
}

#[test]
fn step_limit_falls_back_to_single_cells() {
    let config = Config {
        max_refinement_steps: Some(0),
        keep_passthrough_rules: false,
        ..Config::default()
    };
    let output = optimizer(config).run(HTML, CSS).unwrap();

    assert_eq!(output.report.rules, 5);
    assert_eq!(output.report.stats.fallbacks(), 5);
    assert!(output.markup.contains(r#"<h1 class="title q0 q2">"#));
    assert!(output.markup.contains(r#"<p class="q4" id="last">"#));
}

#[test]
fn no_relevant_elements_keeps_markup_and_passthrough() {
    let html = r#"<p class="plain">text</p>"#;
    let output = optimizer(Config::default()).run(html, CSS).unwrap();

    assert_eq!(output.markup, html);
    assert_eq!(output.css, "@import url(base.css);\nh1{margin: 0}\n");
    assert!(output.report.is_unchanged());
    assert_eq!(output.report.relevant_elements, 0);
}

#[test]
fn no_namespaced_declarations_still_strips_the_namespace() {
    let css = "p { color: red }";
    let output = optimizer(Config::default()).run(HTML, css).unwrap();

    assert_eq!(
        output.markup,
        r#"<div class="card">
  <h1 class="title">One</h1>
  <h2>Two</h2>
  <p id="last">Three</p>
</div>"#
    );
    assert_eq!(output.css, "p{color: red}\n");
    assert_eq!(output.report.rules, 0);
    assert_eq!(output.report.modified_elements, 3);
}

#[test]
fn empty_cover_honors_passthrough_policy() {
    let html = r#"<p class="x-unused keep">a</p>"#;
    let config = Config {
        keep_passthrough_rules: false,
        ..Config::default()
    };

    let output = optimizer(config.clone()).run(html, "p { color: red }").unwrap();
    assert_eq!(output.markup, r#"<p class="keep">a</p>"#);
    assert_eq!(output.css, "");

    let output = optimizer(config).run(html, ".x-other { color: red }").unwrap();
    assert_eq!(output.markup, r#"<p class="keep">a</p>"#);
    assert_eq!(output.css, "");
    assert_eq!(output.report.declarations, 1);
}

#[test]
fn reject_policy_reports_unsupported_selector() {
    let config = Config {
        selector_policy: classfold::style::SelectorPolicy::Reject,
        ..Config::default()
    };
    let css = format!("{CSS}\n.x-red:hover {{ color: darkred }}");

    let err = optimizer(config).run(HTML, &css).unwrap_err();
    assert!(
        matches!(
            err,
            Error::Style(classfold::style::Error::Core(
                classfold::engine::Error::UnsupportedSelector { .. }
            ))
        ),
        "{err}"
    );
}

#[test]
fn generated_name_collision_is_reported() {
    let html = r#"<p class="x-red q1">a</p>"#;
    let err = optimizer(Config::default()).run(html, CSS).unwrap_err();

    match err {
        Error::NameCollision { class, .. } => assert_eq!(class, "q1"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn invalid_config_is_refused() {
    let config = Config {
        rule_prefix: "9".into(),
        ..Config::default()
    };
    assert!(matches!(Optimizer::new(config), Err(Error::Config(_))));
}

#[test]
fn malformed_markup_is_reported() {
    let err = optimizer(Config::default()).run("<p class=\"x-red\"", CSS).unwrap_err();
    assert!(matches!(err, Error::Markup(classfold::markup::Error::Parse { .. })), "{err}");
}
