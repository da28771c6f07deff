use criterion::{criterion_group, criterion_main, Criterion};
use fleetboard_engine::merge;
use fleetboard_model::{DashboardSchema, ProjectId, SourceDocument, SourceName};
use serde_json::json;

fn fixture(projects: usize) -> (SourceDocument, Vec<(SourceName, SourceDocument)>) {
    let mut base = SourceDocument::empty();
    let mut coverage = SourceDocument::empty();
    let mut unit_tests = SourceDocument::empty();
    let mut pipelines = SourceDocument::empty();
    for i in 0..projects {
        let name = format!("svc-{i:04}");
        let id = ProjectId::parse(&name).expect("project id");
        base.insert(
            id.clone(),
            vec![
                json!(name),
                json!(["platform", "tier-2"]),
                json!(i % 5),
                json!(0),
                json!(["dev", "int", "prod"]),
                json!([{"Pull Request ID": format!("{i}"), "Title": "routine"}]),
            ],
        );
        // Every third project misses coverage to exercise padding.
        if i % 3 != 0 {
            coverage.insert(id.clone(), vec![json!(70 + (i % 30)), json!(65)]);
        }
        unit_tests.insert(id.clone(), vec![json!([120, 4, 0, 124])]);
        let mut subs = serde_json::Map::new();
        subs.insert(format!("{name}-build"), json!("Succeeded"));
        subs.insert(format!("{name}-deploy"), json!("InProgress"));
        pipelines.insert(id, vec![serde_json::Value::Object(subs)]);
    }
    let supplements = vec![
        (SourceName::parse("coverage").expect("name"), coverage),
        (SourceName::parse("unit_tests").expect("name"), unit_tests),
        (SourceName::parse("pipelines").expect("name"), pipelines),
    ];
    (base, supplements)
}

fn bench_merge(c: &mut Criterion) {
    let schema = DashboardSchema::standard();
    let (base, supplements) = fixture(500);
    c.bench_function("merge_500_projects", |b| {
        b.iter(|| merge(&schema, &base, &supplements).expect("merge"))
    });
}

criterion_group!(benches, bench_merge);
criterion_main!(benches);
