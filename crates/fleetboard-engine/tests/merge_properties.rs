// SPDX-License-Identifier: Apache-2.0

use fleetboard_engine::canonical::stable_json_hash_hex;
use fleetboard_engine::{merge, MergeError};
use fleetboard_model::{
    DashboardSchema, FieldDef, FieldKind, ProjectId, SourceDocument, SourceName, SourceSchema,
};
use proptest::prelude::*;
use serde_json::{json, Value};

fn project(name: &str) -> ProjectId {
    ProjectId::parse(name).expect("project id")
}

fn source_name(name: &str) -> SourceName {
    SourceName::parse(name).expect("source name")
}

fn standard_supplements(
    coverage: SourceDocument,
    unit_tests: SourceDocument,
    pipelines: SourceDocument,
) -> Vec<(SourceName, SourceDocument)> {
    vec![
        (source_name("coverage"), coverage),
        (source_name("unit_tests"), unit_tests),
        (source_name("pipelines"), pipelines),
    ]
}

fn base_doc(projects: &[&str]) -> SourceDocument {
    let mut doc = SourceDocument::empty();
    for name in projects {
        doc.insert(
            project(name),
            vec![
                json!(name),
                json!(["platform"]),
                json!(1),
                json!(0),
                json!(["dev"]),
                json!([]),
            ],
        );
    }
    doc
}

#[test]
fn every_merged_record_has_the_declared_total_arity() {
    let schema = DashboardSchema::standard();
    let base = base_doc(&["svc-alpha", "svc-beta", "svc-gamma"]);
    let mut coverage = SourceDocument::empty();
    coverage.insert(project("svc-alpha"), vec![json!(81), json!(76)]);

    let table = merge(
        &schema,
        &base,
        &standard_supplements(coverage, SourceDocument::empty(), SourceDocument::empty()),
    )
    .expect("merge");

    assert_eq!(table.len(), 3);
    for record in table.records().values() {
        assert_eq!(record.len(), schema.total_arity());
    }
}

#[test]
fn missing_supplement_entries_pad_with_exactly_arity_nulls() {
    let schema = DashboardSchema::standard();
    let base = base_doc(&["svc-alpha"]);
    let table = merge(
        &schema,
        &base,
        &standard_supplements(
            SourceDocument::empty(),
            SourceDocument::empty(),
            SourceDocument::empty(),
        ),
    )
    .expect("merge");

    let record = table.get(&project("svc-alpha")).expect("record");
    let coverage_offset = schema
        .field_offset(&source_name("coverage"))
        .expect("offset");
    for idx in coverage_offset..schema.total_arity() {
        assert_eq!(record.get(idx), Some(&Value::Null), "index {idx}");
    }
}

#[test]
fn an_empty_supplement_document_behaves_like_a_per_key_miss() {
    let schema = DashboardSchema::standard();
    let base = base_doc(&["svc-alpha", "svc-beta"]);
    let mut coverage_present = SourceDocument::empty();
    coverage_present.insert(project("svc-alpha"), vec![json!(80), json!(70)]);
    coverage_present.insert(project("svc-beta"), vec![json!(90), json!(91)]);

    let with_data = merge(
        &schema,
        &base,
        &standard_supplements(
            coverage_present,
            SourceDocument::empty(),
            SourceDocument::empty(),
        ),
    )
    .expect("merge");
    let degraded = merge(
        &schema,
        &base,
        &standard_supplements(
            SourceDocument::empty(),
            SourceDocument::empty(),
            SourceDocument::empty(),
        ),
    )
    .expect("merge");

    let offset = schema
        .field_offset(&source_name("coverage"))
        .expect("offset");
    let record = degraded.get(&project("svc-beta")).expect("record");
    assert_eq!(record.get(offset), Some(&Value::Null));
    assert_eq!(record.get(offset + 1), Some(&Value::Null));
    // Shapes agree between the degraded and healthy cycles.
    assert_eq!(
        with_data.get(&project("svc-beta")).expect("record").len(),
        record.len()
    );
}

#[test]
fn projects_absent_from_base_are_not_merged() {
    let schema = DashboardSchema::standard();
    let base = base_doc(&["svc-alpha"]);
    let mut coverage = SourceDocument::empty();
    coverage.insert(project("svc-orphan"), vec![json!(50), json!(50)]);

    let table = merge(
        &schema,
        &base,
        &standard_supplements(coverage, SourceDocument::empty(), SourceDocument::empty()),
    )
    .expect("merge");
    assert!(table.get(&project("svc-orphan")).is_none());
    assert_eq!(table.len(), 1);
}

#[test]
fn supplement_order_is_significant_and_checked() {
    let schema = DashboardSchema::standard();
    let base = base_doc(&["svc-alpha"]);
    let shuffled = vec![
        (source_name("unit_tests"), SourceDocument::empty()),
        (source_name("coverage"), SourceDocument::empty()),
        (source_name("pipelines"), SourceDocument::empty()),
    ];
    let err = merge(&schema, &base, &shuffled).expect_err("order mismatch");
    assert!(matches!(err, MergeError::SchemaMismatch { .. }));
}

#[test]
fn present_entries_with_wrong_arity_fail_fast() {
    let schema = DashboardSchema::standard();
    let base = base_doc(&["svc-alpha"]);
    let mut coverage = SourceDocument::empty();
    coverage.insert(project("svc-alpha"), vec![json!(80)]);

    let err = merge(
        &schema,
        &base,
        &standard_supplements(coverage, SourceDocument::empty(), SourceDocument::empty()),
    )
    .expect_err("arity violation");
    match err {
        MergeError::ArityViolation {
            source,
            expected,
            got,
            ..
        } => {
            assert_eq!(source.as_str(), "coverage");
            assert_eq!((expected, got), (2, 1));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn merge_is_idempotent_over_identical_inputs() {
    let schema = DashboardSchema::standard();
    let base = base_doc(&["svc-alpha", "svc-beta", "svc-gamma", "svc-delta"]);
    let mut coverage = SourceDocument::empty();
    coverage.insert(project("svc-beta"), vec![json!(66), json!(59)]);
    let mut pipelines = SourceDocument::empty();
    pipelines.insert(
        project("svc-alpha"),
        vec![json!({"svc-alpha-pipeline": "Succeeded"})],
    );

    let supplements =
        standard_supplements(coverage, SourceDocument::empty(), pipelines);
    let first = merge(&schema, &base, &supplements).expect("merge");
    let second = merge(&schema, &base, &supplements).expect("merge");

    assert_eq!(
        stable_json_hash_hex(&first).expect("hash"),
        stable_json_hash_hex(&second).expect("hash")
    );
}

fn small_schema() -> DashboardSchema {
    let base = SourceSchema::new(
        "repositories",
        vec![
            FieldDef::new("project_name", "Repository Name", FieldKind::Repository)
                .expect("field"),
            FieldDef::new("tags", "Repository Tags", FieldKind::Tags).expect("field"),
        ],
    )
    .expect("base");
    let coverage = SourceSchema::new(
        "coverage",
        vec![
            FieldDef::new("line_coverage", "Line", FieldKind::Coverage).expect("field"),
            FieldDef::new("branch_coverage", "Branch", FieldKind::Coverage).expect("field"),
        ],
    )
    .expect("coverage");
    DashboardSchema::new(base, vec![coverage]).expect("schema")
}

proptest! {
    #[test]
    fn alignment_and_padding_laws_hold_for_arbitrary_key_overlap(
        base_keys in proptest::collection::btree_set("[a-z]{1,8}", 0..12),
        coverage_keys in proptest::collection::btree_set("[a-z]{1,8}", 0..12),
    ) {
        let schema = small_schema();
        let mut base = SourceDocument::empty();
        for key in &base_keys {
            base.insert(
                ProjectId::parse(key).expect("key"),
                vec![json!(key), json!([])],
            );
        }
        let mut coverage = SourceDocument::empty();
        for key in &coverage_keys {
            coverage.insert(
                ProjectId::parse(key).expect("key"),
                vec![json!(75), json!(60)],
            );
        }

        let table = merge(
            &schema,
            &base,
            &[(SourceName::parse("coverage").expect("name"), coverage)],
        )
        .expect("merge");

        prop_assert_eq!(table.len(), base_keys.len());
        for (key, record) in table.records() {
            prop_assert_eq!(record.len(), schema.total_arity());
            if !coverage_keys.contains(key.as_str()) {
                prop_assert_eq!(record.get(2), Some(&Value::Null));
                prop_assert_eq!(record.get(3), Some(&Value::Null));
            }
        }
    }
}
