//! Structural checks on rendered summaries.
//!
//! Summaries carry a generation date, so they are compared through their
//! parsed markdown structure rather than byte-for-byte.

use std::collections::BTreeSet;

use alfa_act_summary::{classify, Flavor, ImplementationReport, SummaryDocument};
use chrono::NaiveDate;
use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};

const REPORT: &str = r#"{
  "vendor": "Siteimprove",
  "name": "Alfa (automated)",
  "version": "0.98.0",
  "actRuleMapping": [
    {
      "ruleId": "23a2a8",
      "ruleName": "Image has non-empty accessible name",
      "procedureNames": ["SIA-R2"],
      "consistency": "complete",
      "coverage": {"covered": 12, "untested": 0, "cantTell": 0, "testCaseTotal": 12}
    },
    {
      "ruleId": "R2",
      "ruleName": "Broken mapping",
      "procedureNames": ["P2"],
      "consistency": null,
      "coverage": {"covered": 1, "untested": 1, "cantTell": 0, "testCaseTotal": 3}
    },
    {
      "ruleId": "R1",
      "ruleName": "Never implemented",
      "procedureNames": [],
      "consistency": "complete"
    },
    {
      "ruleId": "R3",
      "ruleName": "Ignored on purpose",
      "procedureNames": ["P3"],
      "consistency": "complete"
    },
    {
      "ruleId": "b5c3f8",
      "ruleName": "HTML page has lang attribute",
      "procedureNames": ["SIA-R1"],
      "consistency": "partial",
      "coverage": {"covered": 4, "untested": 2, "cantTell": 1, "testCaseTotal": 6}
    }
  ]
}"#;

#[derive(Debug, Default)]
struct Section {
    heading: String,
    header: Vec<String>,
    rows: Vec<Vec<String>>,
}

/// Collects every `##` section with its table.
fn sections(markdown: &str) -> Vec<Section> {
    let mut sections: Vec<Section> = Vec::new();
    let mut text = String::new();
    let mut row: Vec<String> = Vec::new();
    let mut in_head = false;

    for event in Parser::new_ext(markdown, Options::ENABLE_TABLES) {
        match event {
            Event::Start(Tag::Heading { .. }) => text.clear(),
            Event::End(TagEnd::Heading(level)) => {
                if level == pulldown_cmark::HeadingLevel::H2 {
                    sections.push(Section {
                        heading: text.clone(),
                        ..Section::default()
                    });
                }
            }
            Event::Start(Tag::TableHead) => in_head = true,
            Event::End(TagEnd::TableHead) => {
                in_head = false;
                if let Some(section) = sections.last_mut() {
                    section.header = std::mem::take(&mut row);
                }
            }
            Event::Start(Tag::TableCell) => text.clear(),
            Event::End(TagEnd::TableCell) => row.push(text.trim().to_owned()),
            Event::End(TagEnd::TableRow) if !in_head => {
                if let Some(section) = sections.last_mut() {
                    section.rows.push(std::mem::take(&mut row));
                }
            }
            Event::Text(t) | Event::Code(t) => text.push_str(&t),
            _ => {}
        }
    }

    sections
}

fn render() -> String {
    let report = ImplementationReport::from_json(REPORT).expect("fixture parses");
    let ignored: BTreeSet<String> = ["R3".to_owned()].into_iter().collect();
    let buckets = classify(&report.act_rule_mapping, &ignored);
    let date = NaiveDate::from_ymd_opt(2026, 10, 18).expect("valid date");
    SummaryDocument::new(Flavor::Automated, &buckets).render(date)
}

#[test]
fn five_sections_in_order() {
    let headings: Vec<String> = sections(&render()).into_iter().map(|s| s.heading).collect();
    assert_eq!(
        headings,
        [
            "Rules with a broken implementation (1)",
            "Rules without implementation (1)",
            "Rules with a partial implementation (1)",
            "Rules with a complete implementation (1)",
            "Ignored rules (no implementation intended) (1)",
        ]
    );
}

#[test]
fn coverage_columns_only_where_expected() {
    for section in sections(&render()) {
        let expected = if section.heading.starts_with("Rules without")
            || section.heading.starts_with("Ignored")
        {
            4
        } else {
            9
        };
        assert_eq!(section.header.len(), expected, "{}", section.heading);
        for row in &section.rows {
            assert_eq!(row.len(), expected, "{}: {row:?}", section.heading);
        }
    }
}

#[test]
fn incorrect_column_is_the_remainder() {
    for section in sections(&render()) {
        if section.header.len() != 9 {
            continue;
        }
        for row in &section.rows {
            let n: Vec<i64> = row[4..].iter().map(|c| c.parse().expect("numeric cell")).collect();
            assert_eq!(n[4], n[0] - n[1] - n[2] - n[3], "{row:?}");
        }
    }
}

#[test]
fn broken_rule_row() {
    let all = sections(&render());
    assert_eq!(
        all[0].rows,
        [["R2", "Broken mapping", "P2", "null", "3", "1", "1", "0", "1"]]
    );
}

#[test]
fn ignored_rule_stays_out_of_complete() {
    let all = sections(&render());
    let complete = &all[3];
    assert_eq!(complete.rows.len(), 1);
    assert_eq!(complete.rows[0][0], "23a2a8");
    assert_eq!(all[4].rows[0][0], "R3");
}

#[test]
fn renders_are_identical_apart_from_date() {
    let report = ImplementationReport::from_json(REPORT).expect("fixture parses");
    let buckets = classify(&report.act_rule_mapping, &BTreeSet::new());
    let doc = SummaryDocument::new(Flavor::Assisted, &buckets);
    let a = doc.render(NaiveDate::from_ymd_opt(2026, 1, 1).expect("valid date"));
    let b = doc.render(NaiveDate::from_ymd_opt(2026, 1, 2).expect("valid date"));
    let strip = |s: &str| {
        s.lines()
            .filter(|l| !l.starts_with("Last generated:"))
            .collect::<Vec<_>>()
            .join("\n")
    };
    assert_ne!(a, b);
    assert_eq!(strip(&a), strip(&b));
}

#[test]
fn unknown_consistency_rejects_the_report() {
    let bad = REPORT.replace("\"partial\"", "\"half\"");
    let err = ImplementationReport::from_json(&bad).expect_err("must fail");
    assert!(err.to_string().contains("half"), "{err}");
}
