//! User and learning-activity reports.

use super::SqlReport;

pub const USERS: SqlReport = SqlReport::new(
    r#"
SELECT
    DATE_FORMAT(date_joined, "%Y-%m-%d") AS register_date,
    au.is_active,
    aup.year_of_birth,
    aup.gender,
    aup.level_of_education,
    aup.country,
    nuem.employment_situation,
    (SELECT count(1) FROM {db}.student_courseenrollment sce WHERE sce.user_id = au.id) AS enrollment_count
FROM {db}.auth_user au
LEFT JOIN {db}.auth_userprofile aup ON aup.user_id = au.id
LEFT JOIN {db}.nau_openedx_extensions_nauuserextendedmodel nuem ON nuem.user_id = au.id
"#,
);

/// Registrations (total and still active) and enrollments per day.
pub const REGISTERED_BY_DAY: SqlReport = SqlReport::new(
    r#"
SELECT register_date, sum(active) AS total_active, sum(total) AS total, sum(enrollment_count) AS enrollment_count
FROM (
    (
        SELECT
            DATE_FORMAT(date_joined, "%Y-%m-%d") AS register_date,
            0 AS active,
            count(1) AS total,
            0 AS enrollment_count
        FROM {db}.auth_user au
        GROUP BY DATE_FORMAT(date_joined, "%Y-%m-%d"), au.is_active
    ) UNION (
        SELECT
            DATE_FORMAT(date_joined, "%Y-%m-%d") AS register_date,
            count(1) AS active,
            0 AS total,
            0 AS enrollment_count
        FROM {db}.auth_user au
        WHERE is_active = true
        GROUP BY DATE_FORMAT(date_joined, "%Y-%m-%d"), au.is_active
    ) UNION (
        SELECT
            DATE_FORMAT(created, "%Y-%m-%d") AS register_date,
            0 AS active,
            0 AS total,
            count(1) AS enrollment_count
        FROM {db}.student_courseenrollment sce
        GROUP BY DATE_FORMAT(created, "%Y-%m-%d")
    )
) AS t
GROUP BY register_date
ORDER BY register_date ASC
"#,
);

/// Learners that completed at least one block, per day.
pub const DISTINCT_BY_DAY: SqlReport = SqlReport::new(
    r#"
SELECT DATE_FORMAT(created, "%Y-%m-%d") date, COUNT(DISTINCT user_id) AS users
FROM {db}.completion_blockcompletion cbc
GROUP BY date
"#,
);

/// Learners that completed at least one block, per month.
pub const DISTINCT_BY_MONTH: SqlReport = SqlReport::new(
    r#"
SELECT DATE_FORMAT(created, "%Y-%m") date, COUNT(DISTINCT user_id) AS users
FROM {db}.completion_blockcompletion cbc
GROUP BY date
"#,
);
