//! Blob upload destination paths.
//!
//! Task output lands in the configured container under a prefix that
//! namespaces by job, task, and submission time so repeated runs never
//! overwrite each other.

use chrono::{Datelike, Local, Timelike};

/// Upload prefix `{job}/{task}/{stamp}` for a given submission time.
///
/// The stamp concatenates local year, month, day, hour and minute with no
/// separators and no zero padding, e.g. `2026861412` for 2026-08-06 14:12.
pub fn upload_path<T: Datelike + Timelike>(job_id: &str, task_id: &str, when: &T) -> String {
    format!(
        "{job_id}/{task_id}/{}{}{}{}{}",
        when.year(),
        when.month(),
        when.day(),
        when.hour(),
        when.minute()
    )
}

/// [`upload_path`] stamped with the current local time.
pub fn upload_path_now(job_id: &str, task_id: &str) -> String {
    upload_path(job_id, task_id, &Local::now())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn path_concatenates_unpadded_components() {
        let when = NaiveDate::from_ymd_opt(2026, 8, 6)
            .unwrap()
            .and_hms_opt(14, 5, 59)
            .unwrap();
        assert_eq!(
            upload_path("ga_job_1", "task_2_4", &when),
            "ga_job_1/task_2_4/202686145"
        );
    }

    #[test]
    fn path_has_exactly_three_segments() {
        let when = NaiveDate::from_ymd_opt(2026, 12, 31)
            .unwrap()
            .and_hms_opt(23, 59, 0)
            .unwrap();
        let path = upload_path("job", "task", &when);
        assert_eq!(path.split('/').count(), 3);
        assert_eq!(path, "job/task/202612312359");
    }

    #[test]
    fn now_path_is_prefixed_by_job_and_task() {
        let path = upload_path_now("j", "t");
        assert!(path.starts_with("j/t/"));
    }
}
