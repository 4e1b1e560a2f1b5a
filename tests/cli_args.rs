//! CLI argument parsing tests for the deskgen binary.

use clap::Parser;
use desk_client::cli::{Action, Cli, Resource};

#[test]
fn test_cli_defaults() {
    let cli = Cli::parse_from(["deskgen", "--api-key", "k"]);

    assert_eq!(cli.api_key.as_deref(), Some("k"));
    assert_eq!(cli.action, Action::List);
    assert_eq!(cli.resource, Resource::Tickets);
    assert_eq!(cli.count, 1);
    assert_eq!(cli.id, 0);
    assert!(!cli.debug);
    assert!(cli.data.is_none());
}

#[test]
fn test_cli_parses_create_with_count() {
    let cli = Cli::parse_from([
        "deskgen",
        "--resource",
        "customers",
        "--action",
        "create",
        "--count",
        "5",
    ]);

    assert_eq!(cli.resource, Resource::Customers);
    assert_eq!(cli.action, Action::Create);
    assert_eq!(cli.effective_count(), 5);
}

#[test]
fn test_count_forced_to_one_unless_creating() {
    let cli = Cli::parse_from(["deskgen", "--action", "update", "--id", "9", "--count", "5"]);

    assert_eq!(cli.id, 9);
    assert_eq!(cli.effective_count(), 1);
}

#[test]
fn test_resource_names_are_case_insensitive() {
    let cli = Cli::parse_from(["deskgen", "--resource", "BusinessHours"]);
    assert_eq!(cli.resource, Resource::BusinessHours);

    let cli = Cli::parse_from(["deskgen", "--resource", "helpdocarticles"]);
    assert_eq!(cli.resource, Resource::HelpDocArticles);
}

#[test]
fn test_all_expands_in_fixed_order() {
    let cli = Cli::parse_from(["deskgen", "--resource", "all"]);
    let names: Vec<String> = cli.resources().into_iter().map(Resource::name).collect();

    assert_eq!(
        names,
        [
            "businesshours",
            "companies",
            "customers",
            "inboxes",
            "priorities",
            "slas",
            "spamlists",
            "statuses",
            "tags",
            "tickets",
            "types",
        ]
    );
}

#[test]
fn test_data_must_be_a_json_object() {
    let cli = Cli::parse_from(["deskgen", "--data", r#"{"name": "Escalations"}"#]);
    let data = cli.data.unwrap();
    assert_eq!(data["name"], "Escalations");

    assert!(Cli::try_parse_from(["deskgen", "--data", "[1, 2]"]).is_err());
    assert!(Cli::try_parse_from(["deskgen", "--data", "{not json"]).is_err());
}

#[test]
fn test_unknown_resource_is_rejected() {
    assert!(Cli::try_parse_from(["deskgen", "--resource", "projects"]).is_err());
    assert!(Cli::try_parse_from(["deskgen", "--action", "delete"]).is_err());
}
