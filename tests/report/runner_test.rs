// tests/report/runner_test.rs
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use nau_reports::config::ConnectionSettings;
use nau_reports::db::{DataSet, DbError, DbResult, QueryExecutor, ScriptedConnector, Value};
use nau_reports::report::{
    ProgressObserver, ReportContext, ReportProducer, ReportRegistry, ReportRunner,
};

type Events = Arc<Mutex<Vec<String>>>;

/// Records every call and answers with a one-cell dataset, or fails.
struct Recording {
    name: &'static str,
    events: Events,
    fail: bool,
}

#[async_trait]
impl ReportProducer for Recording {
    async fn produce(&self, _ctx: &ReportContext) -> DbResult<DataSet> {
        self.events.lock().unwrap().push(format!("produce {}", self.name));
        if self.fail {
            return Err(DbError::QueryFailed(format!("{} failed", self.name)));
        }
        Ok(DataSet::single(vec![("name", Value::from(self.name))]))
    }
}

struct RecordingProgress(Events);

impl ProgressObserver for RecordingProgress {
    fn producing(&mut self, title: &str) {
        self.0.lock().unwrap().push(format!("progress {}", title));
    }
}

fn context() -> ReportContext {
    let executor = QueryExecutor::new(Arc::new(ScriptedConnector::new()));
    let settings = ConnectionSettings::new("localhost", 3306, "edxapp", "read_only", "secret");
    ReportContext::new(executor, &settings)
}

fn registry(events: &Events, failing: Option<&str>) -> ReportRegistry {
    let producer = |name: &'static str| Recording {
        name,
        events: Arc::clone(events),
        fail: failing == Some(name),
    };
    ReportRegistry::builder()
        .register("a", "Report A", producer("a"))
        .register("b", "Report B", producer("b"))
        .register("c", "Report C", producer("c"))
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_runs_selection_in_order() {
    let events = Events::default();
    let registry = registry(&events, None);
    let ctx = context();

    let sheets = ReportRunner::new(&ctx)
        .run(&registry.select(&["c", "a"]))
        .await
        .unwrap();

    let titles: Vec<&str> = sheets.iter().map(|s| s.title.as_str()).collect();
    assert_eq!(titles, vec!["Report A", "Report C"]);
    assert_eq!(sheets[1].data.records()[0].get("name"), Some(&Value::from("c")));
    assert_eq!(*events.lock().unwrap(), vec!["produce a", "produce c"]);
}

#[tokio::test]
async fn test_progress_precedes_each_producer() {
    let events = Events::default();
    let registry = registry(&events, None);
    let ctx = context();

    ReportRunner::new(&ctx)
        .with_progress(RecordingProgress(Arc::clone(&events)))
        .run(&registry.select(&["a", "b", "c"]))
        .await
        .unwrap();

    assert_eq!(
        *events.lock().unwrap(),
        vec![
            "progress Report A",
            "produce a",
            "progress Report B",
            "produce b",
            "progress Report C",
            "produce c",
        ]
    );
}

#[tokio::test]
async fn test_failure_aborts_remaining_reports() {
    let events = Events::default();
    let registry = registry(&events, Some("b"));
    let ctx = context();

    let err = ReportRunner::new(&ctx)
        .with_progress(RecordingProgress(Arc::clone(&events)))
        .run(&registry.select(&["a", "b", "c"]))
        .await
        .unwrap_err();

    assert!(matches!(err, DbError::QueryFailed(msg) if msg == "b failed"));
    assert_eq!(
        *events.lock().unwrap(),
        vec!["progress Report A", "produce a", "progress Report B", "produce b"]
    );
}

#[tokio::test]
async fn test_empty_selection() {
    let events = Events::default();
    let ctx = context();

    let sheets = ReportRunner::new(&ctx).run(&[]).await.unwrap();

    assert!(sheets.is_empty());
    assert!(events.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_output_serialization() {
    let events = Events::default();
    let registry = registry(&events, None);
    let ctx = context();

    let sheets = ReportRunner::new(&ctx)
        .run(&registry.select(&["a"]))
        .await
        .unwrap();

    let json = serde_json::to_string(&sheets).unwrap();
    assert_eq!(json, r#"[{"title":"Report A","records":[{"name":"a"}]}]"#);
}
