//! End-to-end runs of the summary and EARL pipelines against a scratch
//! reports directory.

use std::fs;
use std::path::PathBuf;

use alfa_act_clients::{write_atomic, Config};
use alfa_act_earl::{expand, report, Assertor, GraphBuilder, LocalCompactor, OutcomePair};
use alfa_act_summary::{classify, Flavor, JsonMappingSource, MappingSource, SummaryDocument};

fn scratch(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("alfa-act-pipeline-{}-{name}", std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).expect("scratch dir");
    dir
}

#[test]
fn summaries_are_written_per_flavor() {
    let dir = scratch("summary");
    let mapping = r#"{
        "vendor": "Siteimprove",
        "name": "Alfa (automated)",
        "actRuleMapping": [
            {"ruleId": "R1", "ruleName": "Rule one", "procedureNames": [], "consistency": "complete"},
            {"ruleId": "R2", "ruleName": "Rule two", "procedureNames": ["sia-r2"], "consistency": null,
             "coverage": {"covered": 2, "untested": 1, "cantTell": 0, "testCaseTotal": 5}},
            {"ruleId": "R3", "ruleName": "Rule three", "procedureNames": ["sia-r3"], "consistency": "partial"}
        ]
    }"#;
    for flavor in Flavor::ALL {
        fs::write(dir.join(flavor.mapping_file()), mapping).expect("fixture");
    }
    let config = Config::from_toml("ignored_rules = [\"R3\"]").expect("valid config");

    let source = JsonMappingSource::new(&dir);
    let date = chrono::NaiveDate::from_ymd_opt(2026, 10, 18).expect("valid date");
    for flavor in Flavor::ALL {
        let report = source.mapping_report(flavor).expect("report loads");
        let buckets = classify(&report.act_rule_mapping, &config.ignored_rules);
        let markdown = SummaryDocument::new(flavor, &buckets).render(date);
        write_atomic(&dir.join(flavor.summary_file()), markdown.as_bytes()).expect("written");
    }

    let assisted = fs::read_to_string(dir.join("summary-assisted.md")).expect("summary exists");
    assert!(assisted.starts_with("# Summary for Alfa assisted"));
    assert!(assisted.contains("Last generated: Sun Oct 18 2026"));
    assert!(assisted.contains("## Rules with a broken implementation (1)"));
    assert!(assisted.contains("## Ignored rules (no implementation intended) (1)"));
    assert!(dir.join("summary-automated.md").exists());
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn earl_report_is_written_and_reads_back() {
    let dir = scratch("earl");
    let pairs: Vec<OutcomePair> = serde_json::from_str(
        r#"[
            {"subject": {"url": "https://example.org/", "title": "Example"},
             "outcome": {"rule": {"uri": "https://alfa.siteimprove.com/rules/sia-r1"},
                         "outcome": "passed", "target": "title"}},
            {"subject": {"url": "https://example.org/"},
             "outcome": {"rule": {"uri": "https://alfa.siteimprove.com/rules/sia-r2"},
                         "outcome": "inapplicable"}}
        ]"#,
    )
    .expect("valid outcomes");

    let config = Config::from_toml(
        r#"
        [assertor]
        name = "Alfa"
        homepage = "https://alfa.siteimprove.com/"
        "#,
    )
    .expect("valid config");
    let builder = GraphBuilder::new().with_assertor(Assertor::from(
        config.assertor.expect("assertor configured"),
    ));
    let compactor = LocalCompactor::act().expect("embedded context");

    let document = report(&builder, &compactor, pairs.into_iter().map(OutcomePair::into_tuple))
        .expect("report builds");
    let out = dir.join("earl.json");
    let json = serde_json::to_string_pretty(&document).expect("serializes");
    write_atomic(&out, json.as_bytes()).expect("written");

    let written: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&out).expect("report exists")).expect("valid json");
    let nodes = expand(&written, compactor.context()).expect("expands");
    assert_eq!(nodes.len(), 5);
    assert_eq!(nodes[0]["@id"], "https://alfa.siteimprove.com/");
    assert_eq!(written["@graph"][2]["assertedBy"], "https://alfa.siteimprove.com/");
    assert!(json.contains("\n  \"@context\""));
    let _ = fs::remove_dir_all(&dir);
}
