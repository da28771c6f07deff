use fleetboard_engine::LinkBuilder;
use fleetboard_model::{CompareRoute, ProjectId};

const DOMAIN: &str = "us-east-1.console.aws.amazon.com";

fn alpha() -> ProjectId {
    ProjectId::parse("svc-alpha").expect("project id")
}

#[test]
fn region_is_the_first_domain_label() {
    assert_eq!(LinkBuilder::new(DOMAIN).region(), "us-east-1");
    assert_eq!(LinkBuilder::new("").region(), "");
}

#[test]
fn repository_link_family() {
    let links = LinkBuilder::new(DOMAIN);
    assert_eq!(
        links.repository_browse(&alpha()),
        format!("https://{DOMAIN}/codesuite/codecommit/repositories/svc-alpha/browse")
    );
    assert_eq!(
        links.branch_browse(&alpha(), "feature/x"),
        format!(
            "https://{DOMAIN}/codesuite/codecommit/repositories/svc-alpha/browse/refs/heads/feature/x"
        )
    );
    assert_eq!(
        links.pull_request(&alpha(), "12"),
        format!("https://{DOMAIN}/codesuite/codecommit/repositories/svc-alpha/pull-requests/12")
    );
}

#[test]
fn compare_links_carry_route_and_region() {
    let links = LinkBuilder::new(DOMAIN);
    assert_eq!(
        links.open_pull_request(&alpha(), &CompareRoute::staging()),
        format!(
            "https://{DOMAIN}/codesuite/codecommit/repositories/svc-alpha/pull-requests/new/refs/heads/int/.../refs/heads/dev?region=us-east-1"
        )
    );
    assert_eq!(
        links.open_pull_request(&alpha(), &CompareRoute::production()),
        format!(
            "https://{DOMAIN}/codesuite/codecommit/repositories/svc-alpha/pull-requests/new/refs/heads/prod/.../refs/heads/int?region=us-east-1"
        )
    );
}

#[test]
fn pipeline_link_family() {
    let links = LinkBuilder::new(DOMAIN);
    assert_eq!(
        LinkBuilder::default_pipeline_name(&alpha()),
        "svc-alpha-pipeline"
    );
    assert_eq!(
        links.pipeline_view("svc-alpha-pipeline"),
        format!("https://{DOMAIN}/codesuite/codepipeline/pipelines/svc-alpha-pipeline/view")
    );
}
