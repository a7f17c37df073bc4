//! Single-record summaries describing the export itself.

use async_trait::async_trait;
use chrono::Local;

use crate::db::{DataSet, DbResult, Value};
use crate::report::{ReportContext, ReportProducer};

/// Version tag written at the head of every summary record.
pub const SUMMARY_VERSION: &str = "v2";

/// Aggregate counts, one `get` per entry, in output order.
const COUNTS: &[(&str, &str)] = &[
    ("Organizations", "SELECT count(1) FROM {db}.organizations_organization"),
    ("Courses", "SELECT count(1) FROM {db}.course_overviews_courseoverview"),
    ("Users", "SELECT count(1) FROM {db}.auth_user"),
    ("Enrollments", "SELECT count(1) FROM {db}.student_courseenrollment"),
    ("Certificates", "SELECT count(1) FROM {db}.certificates_generatedcertificate"),
    (
        "New Users - 7 days",
        "SELECT count(1) FROM {db}.auth_user au WHERE au.date_joined > NOW() - INTERVAL 7 DAY",
    ),
    (
        "New Enrollments - 7 days",
        "SELECT count(1) FROM {db}.student_courseenrollment sce WHERE sce.created > NOW() - INTERVAL 7 DAY",
    ),
    (
        "News Certificates - 7 days",
        "SELECT count(1) FROM {db}.certificates_generatedcertificate cgc WHERE cgc.created_date > NOW() - INTERVAL 7 DAY",
    ),
    (
        "New Users - 15 days",
        "SELECT count(1) FROM {db}.auth_user au WHERE au.date_joined > NOW() - INTERVAL 15 DAY",
    ),
    (
        "New Enrollments - 15 days",
        "SELECT count(1) FROM {db}.student_courseenrollment sce WHERE sce.created > NOW() - INTERVAL 15 DAY",
    ),
    (
        "News Certificates - 15 days",
        "SELECT count(1) FROM {db}.certificates_generatedcertificate cgc WHERE cgc.created_date > NOW() - INTERVAL 15 DAY",
    ),
    (
        "New Users - 30 days",
        "SELECT count(1) FROM {db}.auth_user au WHERE au.date_joined > NOW() - INTERVAL 30 DAY",
    ),
    (
        "New Enrollments - 30 days",
        "SELECT count(1) FROM {db}.student_courseenrollment sce WHERE sce.created > NOW() - INTERVAL 30 DAY",
    ),
    (
        "News Certificates - 30 days",
        "SELECT count(1) FROM {db}.certificates_generatedcertificate cgc WHERE cgc.created_date > NOW() - INTERVAL 30 DAY",
    ),
];

fn header(ctx: &ReportContext) -> Vec<(&'static str, Value)> {
    vec![
        ("Version", Value::from(SUMMARY_VERSION)),
        ("DataBase", Value::from(ctx.endpoint())),
        ("Date", Value::from(Local::now().naive_local())),
    ]
}

/// Version, endpoint, generation time and platform-wide counts.
#[derive(Debug, Default, Clone, Copy)]
pub struct Summary;

#[async_trait]
impl ReportProducer for Summary {
    async fn produce(&self, ctx: &ReportContext) -> DbResult<DataSet> {
        let mut fields = header(ctx);
        for &(label, template) in COUNTS {
            let count = ctx.executor().get(&ctx.sql(template)).await?;
            fields.push((label, count));
        }
        Ok(DataSet::single(fields))
    }
}

/// Version, endpoint and generation time, written last.
#[derive(Debug, Default, Clone, Copy)]
pub struct FinalSummary;

#[async_trait]
impl ReportProducer for FinalSummary {
    async fn produce(&self, ctx: &ReportContext) -> DbResult<DataSet> {
        Ok(DataSet::single(header(ctx)))
    }
}
