// tests/report/registry_test.rs
use async_trait::async_trait;
use nau_reports::db::{DataSet, DbResult};
use nau_reports::report::{
    standard_registry, RegistryError, ReportContext, ReportProducer, ReportRegistry,
};

struct Nothing;

#[async_trait]
impl ReportProducer for Nothing {
    async fn produce(&self, _ctx: &ReportContext) -> DbResult<DataSet> {
        Ok(DataSet::empty(vec![]))
    }
}

fn registry() -> ReportRegistry {
    ReportRegistry::builder()
        .register("organizations", "Organizations", Nothing)
        .register("course_runs", "Course runs", Nothing)
        .register("users", "Users", Nothing)
        .build()
        .unwrap()
}

fn keys(selection: &[&nau_reports::report::ReportDescriptor]) -> Vec<String> {
    selection.iter().map(|d| d.key().to_string()).collect()
}

#[test]
fn test_select_follows_registration_order() {
    let registry = registry();
    let selection = registry.select(&["users", "organizations"]);
    assert_eq!(keys(&selection), vec!["organizations", "users"]);
}

#[test]
fn test_select_drops_unknown_keys() {
    let registry = registry();
    let selection = registry.select(&["users", "bogus"]);
    assert_eq!(keys(&selection), vec!["users"]);
}

#[test]
fn test_select_ignores_duplicates_in_request() {
    let registry = registry();
    let selection = registry.select(&["users", "users"]);
    assert_eq!(keys(&selection), vec!["users"]);
}

#[test]
fn test_select_nothing() {
    let registry = registry();
    let none: [&str; 0] = [];
    assert!(registry.select(&none).is_empty());
    assert!(registry.select(&["bogus"]).is_empty());
}

#[test]
fn test_select_default_without_configuration_is_everything() {
    let registry = registry();
    let selection = registry.select_default::<String>(None);
    assert_eq!(keys(&selection), vec!["organizations", "course_runs", "users"]);
}

#[test]
fn test_select_default_with_configuration() {
    let registry = registry();
    let configured = vec!["course_runs".to_string()];
    let selection = registry.select_default(Some(configured.as_slice()));
    assert_eq!(keys(&selection), vec!["course_runs"]);
}

#[test]
fn test_lookup() {
    let registry = registry();
    assert_eq!(registry.len(), 3);
    assert_eq!(registry.get("course_runs").map(|d| d.title()), Some("Course runs"));
    assert!(registry.get("bogus").is_none());
    assert!(registry.contains("users"));
}

#[test]
fn test_duplicate_registration_fails() {
    let err = ReportRegistry::builder()
        .register("users", "Users", Nothing)
        .register("organizations", "Organizations", Nothing)
        .register("users", "Users", Nothing)
        .build()
        .unwrap_err();
    assert!(matches!(err, RegistryError::DuplicateKey(key) if key == "users"));
}

#[test]
fn test_standard_registry_order() {
    let registry = standard_registry().unwrap();
    let keys: Vec<&str> = registry.keys().collect();
    assert_eq!(
        keys,
        vec![
            "organizations",
            "course_runs",
            "course_run_by_date",
            "enrollments_with_profile_info",
            "enrollments_year_of_birth",
            "enrollments_gender",
            "enrollments_level_of_education",
            "enrollments_country",
            "enrollments_employment_situation",
            "users",
            "registered_users_by_day",
            "distinct_users_by_day",
            "distinct_users_by_month",
            "summary",
            "final_summary",
        ]
    );
    assert_eq!(registry.get("summary").map(|d| d.title()), Some("Summary"));
    assert_eq!(
        registry.get("distinct_users_by_month").map(|d| d.title()),
        Some("Distinct Users by Month")
    );
}

#[test]
fn test_standard_default_selection_includes_summary() {
    let registry = standard_registry().unwrap();
    let selection = registry.select_default::<String>(None);
    let selected = keys(&selection);

    assert_eq!(selected.len(), registry.len());
    assert!(selected.iter().any(|k| k == "summary"));
    assert_eq!(selected.last().map(String::as_str), Some("final_summary"));
}
