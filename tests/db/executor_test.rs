// tests/db/executor_test.rs
use std::sync::Arc;

use nau_reports::db::{
    Column, DbError, QueryExecutor, ScriptedConnector, StatementResult, Value,
    READ_ONLY_TRANSACTION,
};

fn executor(connector: &ScriptedConnector) -> QueryExecutor {
    QueryExecutor::new(Arc::new(connector.clone()))
}

fn count_result(n: i64) -> StatementResult {
    StatementResult::rows(vec![Column::new("count(1)", "BIGINT")], vec![vec![Value::Int(n)]])
}

#[tokio::test]
async fn test_get_returns_first_cell() {
    let connector = ScriptedConnector::new().then_batch(vec![count_result(42)]);

    let value = executor(&connector)
        .get("SELECT count(1) FROM `edxapp`.auth_user")
        .await
        .unwrap();

    assert_eq!(value, Value::Int(42));
    assert_eq!(connector.opened(), 1);
    assert_eq!(connector.closed(), 1);
}

#[tokio::test]
async fn test_get_ignores_other_cells() {
    let connector = ScriptedConnector::new().then_batch(vec![StatementResult::rows(
        vec![Column::named("a"), Column::named("b")],
        vec![
            vec![Value::Int(1), Value::Int(2)],
            vec![Value::Int(3), Value::Int(4)],
        ],
    )]);

    let value = executor(&connector).get("SELECT a, b FROM t").await.unwrap();
    assert_eq!(value, Value::Int(1));
}

#[tokio::test]
async fn test_get_on_zero_rows_is_empty_result() {
    let connector = ScriptedConnector::new()
        .then_batch(vec![StatementResult::rows(vec![Column::named("id")], vec![])]);

    let err = executor(&connector)
        .get("SELECT id FROM t WHERE 1 = 0")
        .await
        .unwrap_err();

    assert!(matches!(err, DbError::EmptyResult));
    assert_eq!(connector.closed(), 1);
}

#[tokio::test]
async fn test_get_on_zero_columns_is_empty_result() {
    let connector =
        ScriptedConnector::new().then_batch(vec![StatementResult::rows(vec![], vec![vec![]])]);

    let err = executor(&connector).get("SELECT").await.unwrap_err();
    assert!(matches!(err, DbError::EmptyResult));
}

#[tokio::test]
async fn test_query_sends_read_only_marker_first() {
    let connector = ScriptedConnector::new().then_batch(vec![
        StatementResult::ack(),
        StatementResult::rows(
            vec![Column::named("a"), Column::named("b")],
            vec![
                vec![Value::Int(1), Value::from("x")],
                vec![Value::Int(2), Value::from("y")],
            ],
        ),
    ]);

    let data = executor(&connector).query("SELECT a, b FROM t").await.unwrap();

    assert_eq!(data.len(), 2);
    assert_eq!(data.records()[1].get("b"), Some(&Value::from("y")));
    assert_eq!(
        connector.statements(),
        vec![READ_ONLY_TRANSACTION.to_string(), "SELECT a, b FROM t".to_string()]
    );
}

#[tokio::test]
async fn test_query_returns_first_result_set() {
    let connector = ScriptedConnector::new().then_batch(vec![
        StatementResult::ack(),
        StatementResult::Ack { rows_affected: 3 },
        StatementResult::rows(vec![Column::named("first")], vec![vec![Value::Int(1)]]),
        StatementResult::rows(vec![Column::named("second")], vec![vec![Value::Int(2)]]),
    ]);

    let data = executor(&connector)
        .query("SET @x = 1; SELECT 1 AS first; SELECT 2 AS second")
        .await
        .unwrap();

    assert_eq!(data.columns(), &["first".to_string()]);
    assert_eq!(data.records()[0].get("first"), Some(&Value::Int(1)));
    assert_eq!(connector.statements().len(), 4);
}

#[tokio::test]
async fn test_query_zero_row_select_is_a_result_set() {
    let connector = ScriptedConnector::new().then_batch(vec![
        StatementResult::ack(),
        StatementResult::rows(vec![Column::named("id")], vec![]),
    ]);

    let data = executor(&connector)
        .query("SELECT id FROM t WHERE 1 = 0")
        .await
        .unwrap();

    assert!(data.is_empty());
    assert_eq!(data.columns(), &["id".to_string()]);
}

#[tokio::test]
async fn test_query_without_result_set_fails() {
    let connector = ScriptedConnector::new()
        .then_batch(vec![StatementResult::ack(), StatementResult::ack()]);

    let err = executor(&connector).query("DO 1").await.unwrap_err();

    assert!(matches!(err, DbError::NoResultSet));
    assert_eq!(connector.opened(), 1);
    assert_eq!(connector.closed(), 1);
}

#[tokio::test]
async fn test_query_failure_still_closes_connection() {
    let connector = ScriptedConnector::new()
        .then_error(DbError::QueryFailed("Table 'edxapp.nope' doesn't exist".into()));

    let err = executor(&connector)
        .query("SELECT * FROM `edxapp`.nope")
        .await
        .unwrap_err();

    assert!(matches!(err, DbError::QueryFailed(msg) if msg.contains("nope")));
    assert_eq!(connector.opened(), 1);
    assert_eq!(connector.closed(), 1);
}

#[tokio::test]
async fn test_shape_mismatch_is_reported() {
    let connector = ScriptedConnector::new().then_batch(vec![
        StatementResult::ack(),
        StatementResult::rows(
            vec![Column::named("a"), Column::named("b")],
            vec![vec![Value::Int(1)]],
        ),
    ]);

    let err = executor(&connector).query("SELECT a, b FROM t").await.unwrap_err();
    assert!(matches!(err, DbError::ShapeMismatch { .. }));
    assert_eq!(connector.closed(), 1);
}

#[tokio::test]
async fn test_refused_connection_propagates() {
    let connector = ScriptedConnector::new().refuse_connections("db.example:3306: access denied");

    let err = executor(&connector).get("SELECT 1").await.unwrap_err();

    assert!(err.is_connection_failure());
    assert_eq!(connector.opened(), 0);
    assert_eq!(connector.closed(), 0);
}

#[tokio::test]
async fn test_close_failure_after_success_is_reported() {
    let connector = ScriptedConnector::new()
        .then_batch(vec![count_result(1)])
        .fail_on_close();

    let err = executor(&connector).get("SELECT 1").await.unwrap_err();
    assert!(matches!(err, DbError::QueryFailed(msg) if msg == "close failed"));
}

#[tokio::test]
async fn test_operation_error_wins_over_close_failure() {
    let connector = ScriptedConnector::new()
        .then_batch(vec![StatementResult::ack()])
        .fail_on_close();

    let err = executor(&connector).get("DO 1").await.unwrap_err();

    assert!(matches!(err, DbError::NoResultSet));
    assert_eq!(connector.closed(), 1);
}

#[tokio::test]
async fn test_each_call_uses_its_own_connection() {
    let connector = ScriptedConnector::new()
        .then_batch(vec![count_result(1)])
        .then_batch(vec![count_result(2)])
        .then_batch(vec![StatementResult::ack()]);
    let executor = executor(&connector);

    assert_eq!(executor.get("SELECT 1").await.unwrap(), Value::Int(1));
    assert_eq!(executor.get("SELECT 2").await.unwrap(), Value::Int(2));
    executor.execute("DO 1").await.unwrap();

    assert_eq!(connector.opened(), 3);
    assert_eq!(connector.closed(), 3);
    assert_eq!(connector.pending_replies(), 0);
}

#[tokio::test]
async fn test_execute_sends_statement_verbatim() {
    let connector = ScriptedConnector::new().then_batch(vec![StatementResult::ack()]);

    executor(&connector).execute("DO 1").await.unwrap();

    assert_eq!(connector.statements(), vec!["DO 1".to_string()]);
}
