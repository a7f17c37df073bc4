//! Organization and course run reports.

use super::SqlReport;

pub const ORGANIZATIONS: SqlReport = SqlReport::new(
    r#"
SELECT
    id, created, modified, name, short_name, description, logo, active
FROM {db}.organizations_organization
"#,
);

/// One line per course run, with availability state and headline counts.
pub const COURSE_RUNS: SqlReport = SqlReport::new(
    r#"
SELECT
    SUBSTRING_INDEX(SUBSTRING_INDEX(id, ':', -1), '+', 1) AS org_code,
    SUBSTRING_INDEX(SUBSTRING_INDEX(id, '+', -2), '+', 1) AS course_code,
    SUBSTRING_INDEX(id, '+', -1) AS edition_code,
    (SELECT oo.name FROM {db}.organizations_organization oo WHERE org_code = oo.short_name) AS org_name,
    created, modified, id, _location, display_name,
    start, end,
    advertised_start,
    CONCAT('https://lms.nau.edu.pt', course_image_url) AS course_image_url,
    social_sharing_url,
    certificates_display_behavior,
    certificates_show_before_end, cert_html_view_enabled,
    has_any_active_web_certificate, cert_name_short, cert_name_long,
    lowest_passing_grade, days_early_for_beta, mobile_available,
    visible_to_staff_only, enrollment_start,
    enrollment_end, enrollment_domain, invitation_only,
    max_student_enrollments_allowed, announcement, catalog_visibility,
    course_video_url, effort, self_paced,
    certificate_available_date,
    end AS end_date,
    start AS start_date,
    COALESCE(enrollment_start, start) AS enrollment_start_or_course_start,
    COALESCE(enrollment_end, end) AS enrollment_end_or_course_end,
    DATEDIFF(COALESCE(enrollment_start, start), NOW()) AS days_to_enrollment_start,
    DATEDIFF(start, NOW()) AS days_to_course_start,
    DATEDIFF(COALESCE(enrollment_end, end), NOW()) AS days_to_enrollment_end,
    DATEDIFF(end, NOW()) AS days_to_course_end,
    (
        SELECT CASE
            WHEN (COALESCE(coc.enrollment_start, coc.start) < NOW() AND NOW() < COALESCE(coc.enrollment_end, coc.end) AND coc.start < NOW() AND NOW() < coc.end) THEN 'ONGOING_OPEN'
            WHEN (COALESCE(coc.enrollment_start, coc.start) < NOW() AND NOW() < COALESCE(coc.enrollment_end, coc.end) AND NOW() < coc.start) THEN 'FUTURE_OPEN'
            WHEN (COALESCE(coc.enrollment_start, coc.start) < NOW() AND NOW() < COALESCE(coc.enrollment_end, coc.end) AND coc.end < NOW()) THEN 'ARCHIVED_OPEN'
            WHEN (NOW() < COALESCE(coc.enrollment_start, coc.start) AND NOW() < coc.start) THEN 'FUTURE_NOT_YET_OPEN'
            WHEN (NOT(COALESCE(coc.enrollment_start, coc.start) < NOW() AND NOW() < COALESCE(coc.enrollment_end, coc.end)) AND NOW() < coc.start) THEN 'FUTURE_CLOSED'
            WHEN (NOT(COALESCE(coc.enrollment_start, coc.start) < NOW() AND NOW() < COALESCE(coc.enrollment_end, coc.end)) AND coc.start < NOW() AND NOW() < coc.end) THEN 'ONGOING_CLOSED'
            WHEN (NOT(COALESCE(coc.enrollment_start, coc.start) < NOW() AND NOW() < COALESCE(coc.enrollment_end, coc.end)) AND coc.end < NOW()) THEN 'ARCHIVED_CLOSED'
            ELSE 'OTHER'
        END
    ) AS availability_state,
    (SELECT count(1) FROM {db}.student_courseenrollment sce WHERE sce.course_id = coc.id) AS enrolled_count,
    (SELECT count(1) FROM {db}.student_courseenrollment sce WHERE sce.course_id = coc.id AND sce.is_active) AS enrolled_count_active,
    (SELECT count(1) FROM {db}.certificates_generatedcertificate cgc WHERE cgc.course_id = coc.id) AS certificates_count,
    (SELECT AVG(grade) FROM {db}.certificates_generatedcertificate cgc WHERE cgc.course_id = coc.id) AS average_grade,
    (SELECT count(1) FROM {db}.course_overviews_courseoverview coc2 WHERE course_code = SUBSTRING_INDEX(SUBSTRING_INDEX(coc2.id, '+', -2), '+', 1)) AS course_runs_count,
    (SELECT id FROM {db}.course_overviews_courseoverview coc2 WHERE course_code = SUBSTRING_INDEX(SUBSTRING_INDEX(coc2.id, '+', -2), '+', 1) ORDER BY created ASC LIMIT 1) = id AS course_run_is_first_edition,
    (SELECT count(1) FROM {db}.grades_persistentcoursegrade gpcg WHERE coc.id = gpcg.course_id AND gpcg.passed_timestamp IS NOT NULL) AS passed
FROM {db}.course_overviews_courseoverview coc
ORDER BY created ASC
"#,
);

/// Per course run and day: enrollments, passes, certificates and block completions.
pub const COURSE_RUN_BY_DATE: SqlReport = SqlReport::new(
    r#"
SELECT
    SUBSTRING_INDEX(SUBSTRING_INDEX(course_id, ':', -1), '+', 1) AS org_code,
    SUBSTRING_INDEX(SUBSTRING_INDEX(course_id, '+', -2), '+', 1) AS course_code,
    SUBSTRING_INDEX(course_id, '+', -1) AS edition_code,
    (SELECT oo.name FROM {db}.organizations_organization oo WHERE org_code = oo.short_name) AS org_name,
    course_id,
    date,
    (
        SELECT CASE
            WHEN (COALESCE(co.enrollment_start, co.start) < t.date AND t.date < COALESCE(co.enrollment_end, co.end) AND co.start < t.date AND t.date < co.end) THEN 'ONGOING_OPEN'
            WHEN (COALESCE(co.enrollment_start, co.start) < t.date AND t.date < COALESCE(co.enrollment_end, co.end) AND t.date < co.start) THEN 'FUTURE_OPEN'
            WHEN (COALESCE(co.enrollment_start, co.start) < t.date AND t.date < COALESCE(co.enrollment_end, co.end) AND co.end < t.date) THEN 'ARCHIVED_OPEN'
            WHEN (t.date < COALESCE(co.enrollment_start, co.start) AND t.date < co.start) THEN 'FUTURE_NOT_YET_OPEN'
            WHEN (NOT(COALESCE(co.enrollment_start, co.start) < t.date AND t.date < COALESCE(co.enrollment_end, co.end)) AND t.date IS NOT NULL AND t.date < co.start) THEN 'FUTURE_CLOSED'
            WHEN (NOT(COALESCE(co.enrollment_start, co.start) < t.date AND t.date < COALESCE(co.enrollment_end, co.end)) AND co.start < t.date AND t.date < co.end) THEN 'ONGOING_CLOSED'
            WHEN (NOT(COALESCE(co.enrollment_start, co.start) < t.date AND t.date < COALESCE(co.enrollment_end, co.end)) AND co.end < t.date) THEN 'ARCHIVED_CLOSED'
            ELSE 'OTHER'
        END
        FROM {db}.course_overviews_courseoverview co
        WHERE co.id = t.course_id
    ) AS availability_state,
    (SELECT co.enrollment_start FROM {db}.course_overviews_courseoverview co WHERE co.id = t.course_id) AS enrollment_start,
    (SELECT co.enrollment_end FROM {db}.course_overviews_courseoverview co WHERE co.id = t.course_id) AS enrollment_end,
    (SELECT co.start FROM {db}.course_overviews_courseoverview co WHERE co.id = t.course_id) AS start,
    (SELECT co.end FROM {db}.course_overviews_courseoverview co WHERE co.id = t.course_id) AS end,
    (SELECT co.display_name FROM {db}.course_overviews_courseoverview co WHERE co.id = t.course_id) AS course_name,
    (SELECT co.catalog_visibility FROM {db}.course_overviews_courseoverview co WHERE co.id = t.course_id) AS catalog_visibility,
    (SELECT co.social_sharing_url FROM {db}.course_overviews_courseoverview co WHERE co.id = t.course_id) AS course_marketing_url,
    (SELECT co.self_paced FROM {db}.course_overviews_courseoverview co WHERE co.id = t.course_id) AS self_paced,
    (SELECT co.invitation_only FROM {db}.course_overviews_courseoverview co WHERE co.id = t.course_id) AS invitation_only,
    SUM(enrollments_count) AS enrollments_count,
    SUM(passed) AS passed,
    SUM(certificates_count) AS certificates_count,
    SUM(block_completion_count) AS block_completion_count,
    (SELECT id FROM {db}.course_overviews_courseoverview coc2 WHERE course_code = SUBSTRING_INDEX(SUBSTRING_INDEX(coc2.id, '+', -2), '+', 1) ORDER BY created ASC LIMIT 1) = course_id AS course_run_is_first_edition
FROM (
    (
        SELECT
            course_id,
            DATE_FORMAT(sce.created, "%Y-%m-%d") date,
            count(1) AS enrollments_count,
            0 AS passed,
            0 AS certificates_count,
            0 AS block_completion_count
        FROM {db}.student_courseenrollment sce
        GROUP BY course_id, date
    ) UNION (
        SELECT
            course_id,
            DATE_FORMAT(gpg.passed_timestamp, "%Y-%m-%d") AS date,
            0 AS enrollments_count,
            count(1) AS passed,
            0 AS certificates_count,
            0 AS block_completion_count
        FROM {db}.grades_persistentcoursegrade gpg
        WHERE gpg.passed_timestamp IS NOT NULL
        GROUP BY course_id, date
    ) UNION (
        SELECT
            course_id,
            DATE_FORMAT(created_date, "%Y-%m-%d") AS date,
            0 AS enrollments_count,
            0 AS passed,
            count(1) AS certificates_count,
            0 AS block_completion_count
        FROM {db}.certificates_generatedcertificate
        GROUP BY course_id, date
    ) UNION (
        SELECT
            course_key AS course_id,
            DATE_FORMAT(cbc.created, "%Y-%m-%d") AS date,
            0 AS enrollments_count,
            0 AS passed,
            0 AS certificates_count,
            count(1) AS block_completion_count
        FROM {db}.completion_blockcompletion cbc
        GROUP BY course_key, date
    )
) AS t
GROUP BY course_id, date
ORDER BY date ASC
"#,
);
