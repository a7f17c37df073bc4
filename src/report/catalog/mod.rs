//! Report definitions for the Open edX platform database.
//!
//! Most reports are a single `{db}`-templated SELECT run through
//! [`QueryExecutor::query`](crate::db::QueryExecutor::query). The two
//! summaries assemble a fixed-shape record instead.

mod courses;
mod enrollments;
mod summary;
mod users;

use async_trait::async_trait;

use super::producer::{ReportContext, ReportProducer};
use super::registry::{RegistryError, ReportRegistry};
use crate::db::{DataSet, DbResult};

pub use summary::{FinalSummary, Summary, SUMMARY_VERSION};

/// A report defined by one SQL template.
#[derive(Debug, Clone, Copy)]
pub struct SqlReport {
    template: &'static str,
}

impl SqlReport {
    pub const fn new(template: &'static str) -> Self {
        Self { template }
    }

    pub fn template(&self) -> &'static str {
        self.template
    }
}

#[async_trait]
impl ReportProducer for SqlReport {
    async fn produce(&self, ctx: &ReportContext) -> DbResult<DataSet> {
        ctx.executor().query(&ctx.sql(self.template)).await
    }
}

/// Every platform report, in export order.
///
/// With no enabled sheets configured, all of these run, `summary` included.
pub fn standard_registry() -> Result<ReportRegistry, RegistryError> {
    ReportRegistry::builder()
        .register("organizations", "Organizations", courses::ORGANIZATIONS)
        .register("course_runs", "Course runs", courses::COURSE_RUNS)
        .register(
            "course_run_by_date",
            "Course run by date",
            courses::COURSE_RUN_BY_DATE,
        )
        .register(
            "enrollments_with_profile_info",
            "Enrollments with profile info",
            enrollments::WITH_PROFILE_INFO,
        )
        .register(
            "enrollments_year_of_birth",
            "Enrollments with year of birth",
            enrollments::YEAR_OF_BIRTH,
        )
        .register(
            "enrollments_gender",
            "Enrollments with gender",
            enrollments::GENDER,
        )
        .register(
            "enrollments_level_of_education",
            "Enrollments with level of education",
            enrollments::LEVEL_OF_EDUCATION,
        )
        .register(
            "enrollments_country",
            "Enrollments with country",
            enrollments::COUNTRY,
        )
        .register(
            "enrollments_employment_situation",
            "Enrollments with employment situation",
            enrollments::EMPLOYMENT_SITUATION,
        )
        .register("users", "Users", users::USERS)
        .register(
            "registered_users_by_day",
            "Registered users by day",
            users::REGISTERED_BY_DAY,
        )
        .register(
            "distinct_users_by_day",
            "Distinct Users by Day",
            users::DISTINCT_BY_DAY,
        )
        .register(
            "distinct_users_by_month",
            "Distinct Users by Month",
            users::DISTINCT_BY_MONTH,
        )
        .register("summary", "Summary", Summary)
        .register("final_summary", "Final Summary", FinalSummary)
        .build()
}
