// tests/report/catalog_test.rs
use std::sync::Arc;

use nau_reports::config::ConnectionSettings;
use nau_reports::db::{
    Column, DbError, QueryExecutor, ScriptedConnector, StatementResult, Value,
    READ_ONLY_TRANSACTION,
};
use nau_reports::report::catalog::{FinalSummary, Summary, SUMMARY_VERSION};
use nau_reports::report::{ReportContext, ReportProducer, SqlReport};

fn context(connector: &ScriptedConnector) -> ReportContext {
    let settings = ConnectionSettings::new("db.example", 3306, "edxapp", "read_only", "secret");
    ReportContext::new(QueryExecutor::new(Arc::new(connector.clone())), &settings)
}

fn count(n: i64) -> Vec<StatementResult> {
    vec![StatementResult::rows(
        vec![Column::new("count(1)", "BIGINT")],
        vec![vec![Value::Int(n)]],
    )]
}

#[tokio::test]
async fn test_sql_report_qualifies_schema() {
    let connector = ScriptedConnector::new().then_batch(vec![
        StatementResult::ack(),
        StatementResult::rows(
            vec![Column::named("id"), Column::named("name")],
            vec![vec![Value::Int(1), Value::from("NAU")]],
        ),
    ]);
    let report = SqlReport::new("SELECT id, name FROM {db}.organizations_organization");

    let data = report.produce(&context(&connector)).await.unwrap();

    assert_eq!(data.len(), 1);
    assert_eq!(
        connector.statements(),
        vec![
            READ_ONLY_TRANSACTION.to_string(),
            "SELECT id, name FROM `edxapp`.organizations_organization".to_string(),
        ]
    );
}

#[tokio::test]
async fn test_summary_shape() {
    let mut connector = ScriptedConnector::new();
    for n in 1..=14 {
        connector = connector.then_batch(count(n));
    }

    let data = Summary.produce(&context(&connector)).await.unwrap();

    assert_eq!(data.len(), 1);
    assert_eq!(
        data.columns(),
        &[
            "Version",
            "DataBase",
            "Date",
            "Organizations",
            "Courses",
            "Users",
            "Enrollments",
            "Certificates",
            "New Users - 7 days",
            "New Enrollments - 7 days",
            "News Certificates - 7 days",
            "New Users - 15 days",
            "New Enrollments - 15 days",
            "News Certificates - 15 days",
            "New Users - 30 days",
            "New Enrollments - 30 days",
            "News Certificates - 30 days",
        ]
        .map(String::from)
    );

    let record = &data.records()[0];
    assert_eq!(record.get("Version"), Some(&Value::from(SUMMARY_VERSION)));
    assert_eq!(record.get("DataBase"), Some(&Value::from("db.example:3306")));
    assert!(matches!(record.get("Date"), Some(Value::DateTime(_))));
    assert_eq!(record.get("Organizations"), Some(&Value::Int(1)));
    assert_eq!(record.get("News Certificates - 30 days"), Some(&Value::Int(14)));

    assert_eq!(connector.opened(), 14);
    assert_eq!(connector.closed(), 14);
    assert!(connector
        .statements()
        .iter()
        .all(|sql| sql.contains("`edxapp`.") && !sql.contains("{db}")));
}

#[tokio::test]
async fn test_summary_fails_on_first_failed_count() {
    let connector = ScriptedConnector::new()
        .then_batch(count(3))
        .then_error(DbError::QueryFailed("lost connection".into()));

    let err = Summary.produce(&context(&connector)).await.unwrap_err();

    assert!(matches!(err, DbError::QueryFailed(_)));
    assert_eq!(connector.opened(), 2);
    assert_eq!(connector.closed(), 2);
}

#[tokio::test]
async fn test_final_summary_needs_no_queries() {
    let connector = ScriptedConnector::new();

    let data = FinalSummary.produce(&context(&connector)).await.unwrap();

    assert_eq!(data.columns(), &["Version", "DataBase", "Date"].map(String::from));
    assert_eq!(connector.opened(), 0);
}
