//! Computed field engine
//!
//! Derives secondary display values from primitive inputs and writes them
//! straight into the preview nodes bound to the computed keys. Runs before
//! the binding pass on every update. Missing or unparsable inputs silently
//! skip the dependent outputs; that silence is part of the contract.

use chrono::{Datelike, Months, NaiveDate};

use crate::form::FormModel;
use crate::preview::PreviewDoc;

/// Producer field ids
pub const ENROLLMENT_DATE_FIELD: &str = "enrollmentDate";
pub const STUDY_PERIOD_FIELD: &str = "studyPeriod";
pub const INSTITUTION_NAME_FIELD: &str = "institutionName";

/// Consumer binding keys
pub const ACADEMIC_YEAR_KEY: &str = "academicYear";
pub const ENROLL_YEAR_KEY: &str = "enrollYear";
pub const ISSUE_DATE_KEY: &str = "issueDate";
pub const VALID_DATE_KEY: &str = "validDate";
pub const NOTICE_KEY: &str = "notice";

/// Substituted into every `{name}` occurrence of the notice template
const NOTICE_TEMPLATE: &str = "This card is the property of {name} and must be \
returned upon request. Эта карта является собственностью {name} и подлежит \
возврату по требованию.";

const FALLBACK_INSTITUTION_NAME: &str = "the institution";

/// Parse a `YYYY-MM-DD` field value
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

/// Format a date the way every date-bound preview node displays it
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Run every computed rule against the current form values
pub fn update_computed_fields(form: &FormModel, preview: &mut PreviewDoc) {
    if let Some(start) = form.value(ENROLLMENT_DATE_FIELD).and_then(parse_date) {
        let year = start.year();
        let academic_full = format!("{}-{}", year, year + 1);
        let academic_short = year.to_string();

        for node in preview.nodes_mut(ACADEMIC_YEAR_KEY) {
            let text = if node.full_year {
                academic_full.clone()
            } else {
                academic_short.clone()
            };
            if let crate::preview::NodeContent::Text(ref mut t) = node.content {
                *t = text;
            }
        }
        preview.set_text(ENROLL_YEAR_KEY, &year.to_string());
        preview.set_text(ISSUE_DATE_KEY, &format_date(start));

        // Validity is derived only when the study period parses as an integer
        if let Some(period) = form
            .value(STUDY_PERIOD_FIELD)
            .and_then(|v| v.trim().parse::<u32>().ok())
        {
            if let Some(end) = start.checked_add_months(Months::new(period.saturating_mul(12))) {
                preview.set_text(VALID_DATE_KEY, &format_date(end));
            }
        }
    }

    let name = match form.value(INSTITUTION_NAME_FIELD) {
        Some(v) if !v.trim().is_empty() => v.to_string(),
        _ => FALLBACK_INSTITUTION_NAME.to_string(),
    };
    let notice = NOTICE_TEMPLATE.replace("{name}", &name);
    preview.set_text(NOTICE_KEY, &notice);
}
