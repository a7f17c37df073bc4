//! Enrollment breakdowns.
//!
//! The grouped reports count enrollments (`enrolled`) and passing learners
//! (`approved`) per course run and one profile attribute.

use super::SqlReport;

/// One line per enrollment, joined with the learner's profile.
pub const WITH_PROFILE_INFO: SqlReport = SqlReport::new(
    r#"
SELECT
    SUBSTRING_INDEX(SUBSTRING_INDEX(sce.course_id, ':', -1), '+', 1) AS org_code,
    SUBSTRING_INDEX(SUBSTRING_INDEX(sce.course_id, '+', -2), '+', 1) AS course_code,
    SUBSTRING_INDEX(sce.course_id, '+', -1) AS edition_code,
    (SELECT oo.name FROM {db}.organizations_organization oo WHERE org_code = oo.short_name) AS org_name,
    aup.year_of_birth,
    aup.gender,
    aup.level_of_education,
    aup.country,
    sce.course_id,
    DATE_FORMAT(sce.created, "%Y-%m-%d") AS enrollment_created_date,
    sce.is_active AS enrollment_is_active,
    sce.mode AS enrollment_mode,
    nuem.employment_situation,
    (SELECT count(1) FROM {db}.student_courseenrollment sce2 WHERE sce2.user_id = sce.user_id) AS user_enrollments_count,
    (SELECT count(1) FROM {db}.student_courseenrollment sce2 WHERE sce2.user_id = sce.user_id AND SUBSTRING_INDEX(SUBSTRING_INDEX(sce2.course_id, ':', -1), '+', 1) = org_code) AS same_org_enrollments_count,
    (SELECT count(1) FROM {db}.student_courseenrollment sce2 WHERE sce2.user_id = sce.user_id AND SUBSTRING_INDEX(SUBSTRING_INDEX(sce2.course_id, ':', -1), '+', 1) != org_code) = 0 AS only_enrollments_this_org,
    (SELECT count(1) FROM {db}.grades_persistentcoursegrade gpcg WHERE sce.course_id = gpcg.course_id AND sce.user_id = gpcg.user_id AND gpcg.passed_timestamp IS NOT NULL) AS passed,
    (SELECT gpcg.passed_timestamp FROM {db}.grades_persistentcoursegrade gpcg WHERE sce.course_id = gpcg.course_id AND sce.user_id = gpcg.user_id AND gpcg.passed_timestamp IS NOT NULL) AS passed_timestamp,
    (SELECT count(1) FROM {db}.certificates_generatedcertificate cgc WHERE sce.user_id = cgc.user_id AND sce.course_id = cgc.course_id) AS certificate,
    aup.country IN ('AO','BR','CV','GW','GQ','MZ','PT','ST','TL') AS cplp
FROM {db}.student_courseenrollment sce
LEFT JOIN {db}.auth_userprofile aup ON sce.user_id = aup.user_id
LEFT JOIN {db}.nau_openedx_extensions_nauuserextendedmodel nuem ON nuem.user_id = sce.user_id
"#,
);

pub const YEAR_OF_BIRTH: SqlReport = SqlReport::new(
    r#"
SELECT
    SUBSTRING_INDEX(SUBSTRING_INDEX(sce.course_id, ':', -1), '+', 1) AS org_code,
    SUBSTRING_INDEX(SUBSTRING_INDEX(sce.course_id, '+', -2), '+', 1) AS course_code,
    SUBSTRING_INDEX(sce.course_id, '+', -1) AS edition_code,
    aup.year_of_birth,
    count(gpcg.id) AS approved,
    count(1) AS enrolled
FROM {db}.student_courseenrollment sce
LEFT JOIN {db}.auth_userprofile aup ON sce.user_id = aup.user_id
LEFT JOIN {db}.grades_persistentcoursegrade gpcg ON sce.course_id = gpcg.course_id AND sce.user_id = gpcg.user_id AND gpcg.passed_timestamp IS NOT NULL
GROUP BY org_code, course_code, edition_code, year_of_birth, sce.course_id
"#,
);

pub const GENDER: SqlReport = SqlReport::new(
    r#"
SELECT
    SUBSTRING_INDEX(SUBSTRING_INDEX(sce.course_id, ':', -1), '+', 1) AS org_code,
    SUBSTRING_INDEX(SUBSTRING_INDEX(sce.course_id, '+', -2), '+', 1) AS course_code,
    SUBSTRING_INDEX(sce.course_id, '+', -1) AS edition_code,
    aup.gender,
    count(gpcg.id) AS approved,
    count(1) AS enrolled
FROM {db}.student_courseenrollment sce
LEFT JOIN {db}.auth_userprofile aup ON sce.user_id = aup.user_id
LEFT JOIN {db}.grades_persistentcoursegrade gpcg ON sce.course_id = gpcg.course_id AND sce.user_id = gpcg.user_id AND gpcg.passed_timestamp IS NOT NULL
GROUP BY sce.course_id, gender
"#,
);

pub const LEVEL_OF_EDUCATION: SqlReport = SqlReport::new(
    r#"
SELECT
    SUBSTRING_INDEX(SUBSTRING_INDEX(sce.course_id, ':', -1), '+', 1) AS org_code,
    SUBSTRING_INDEX(SUBSTRING_INDEX(sce.course_id, '+', -2), '+', 1) AS course_code,
    SUBSTRING_INDEX(sce.course_id, '+', -1) AS edition_code,
    aup.level_of_education,
    count(gpcg.id) AS approved,
    count(1) AS enrolled
FROM {db}.student_courseenrollment sce
LEFT JOIN {db}.auth_userprofile aup ON sce.user_id = aup.user_id
LEFT JOIN {db}.grades_persistentcoursegrade gpcg ON sce.course_id = gpcg.course_id AND sce.user_id = gpcg.user_id AND gpcg.passed_timestamp IS NOT NULL
GROUP BY sce.course_id, level_of_education
"#,
);

/// Includes whether the country is a CPLP (Portuguese-speaking) member state.
pub const COUNTRY: SqlReport = SqlReport::new(
    r#"
SELECT
    SUBSTRING_INDEX(SUBSTRING_INDEX(sce.course_id, ':', -1), '+', 1) AS org_code,
    SUBSTRING_INDEX(SUBSTRING_INDEX(sce.course_id, '+', -2), '+', 1) AS course_code,
    SUBSTRING_INDEX(sce.course_id, '+', -1) AS edition_code,
    aup.country,
    aup.country IN ('AO','BR','CV','GW','GQ','MZ','PT','ST','TL') AS cplp,
    count(gpcg.id) AS approved,
    count(1) AS enrolled
FROM {db}.student_courseenrollment sce
LEFT JOIN {db}.auth_userprofile aup ON sce.user_id = aup.user_id
LEFT JOIN {db}.grades_persistentcoursegrade gpcg ON sce.course_id = gpcg.course_id AND sce.user_id = gpcg.user_id AND gpcg.passed_timestamp IS NOT NULL
GROUP BY sce.course_id, country
"#,
);

pub const EMPLOYMENT_SITUATION: SqlReport = SqlReport::new(
    r#"
SELECT
    SUBSTRING_INDEX(SUBSTRING_INDEX(sce.course_id, ':', -1), '+', 1) AS org_code,
    SUBSTRING_INDEX(SUBSTRING_INDEX(sce.course_id, '+', -2), '+', 1) AS course_code,
    SUBSTRING_INDEX(sce.course_id, '+', -1) AS edition_code,
    nuem.employment_situation,
    count(gpcg.id) AS approved,
    count(1) AS enrolled
FROM {db}.student_courseenrollment sce
LEFT JOIN {db}.nau_openedx_extensions_nauuserextendedmodel nuem ON nuem.user_id = sce.user_id
LEFT JOIN {db}.grades_persistentcoursegrade gpcg ON sce.course_id = gpcg.course_id AND sce.user_id = gpcg.user_id AND gpcg.passed_timestamp IS NOT NULL
GROUP BY sce.course_id, employment_situation
"#,
);
