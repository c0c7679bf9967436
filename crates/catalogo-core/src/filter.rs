use crate::errors::{CatalogError, Result};
use crate::model::RowRecord;
use crate::util::{fold, parse_number};

/// A single predicate over a row, built from a URL path parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterCriterion {
    /// Case-insensitive equality. `value` is stored folded.
    ExactMatch { field: String, value: String },
    /// `field` parses as a number and is at least `min`.
    Threshold { field: String, min: f64 },
    /// Case-insensitive containment. `fragment` is stored folded.
    Substring { field: String, fragment: String },
}

impl FilterCriterion {
    pub fn exact(field: impl Into<String>, value: &str) -> Self {
        FilterCriterion::ExactMatch {
            field: field.into(),
            value: fold(value),
        }
    }

    pub fn substring(field: impl Into<String>, fragment: &str) -> Self {
        FilterCriterion::Substring {
            field: field.into(),
            fragment: fold(fragment),
        }
    }

    pub fn threshold(field: impl Into<String>, raw_min: &str) -> Result<Self> {
        let min = parse_number(raw_min).ok_or_else(|| {
            CatalogError::InvalidArgument(format!("{raw_min:?} is not a number"))
        })?;
        Ok(FilterCriterion::Threshold {
            field: field.into(),
            min,
        })
    }

    pub fn field(&self) -> &str {
        match self {
            FilterCriterion::ExactMatch { field, .. }
            | FilterCriterion::Threshold { field, .. }
            | FilterCriterion::Substring { field, .. } => field,
        }
    }

    /// Rows without the field never match.
    pub fn matches(&self, row: &RowRecord) -> bool {
        let Some(raw) = row.get(self.field()) else {
            return false;
        };
        match self {
            FilterCriterion::ExactMatch { value, .. } => fold(raw) == *value,
            FilterCriterion::Threshold { min, .. } => {
                parse_number(raw).map(|n| n >= *min).unwrap_or(false)
            }
            FilterCriterion::Substring { fragment, .. } => fold(raw).contains(fragment.as_str()),
        }
    }

    /// Keeps matching rows in their original order.
    pub fn apply(&self, rows: Vec<RowRecord>) -> Vec<RowRecord> {
        rows.into_iter().filter(|r| self.matches(r)).collect()
    }
}

/// The sub-endpoints registered under every dataset prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    Lenguaje,
    Institucion,
    Salary,
    Experiencia,
}

impl FilterKind {
    pub const ALL: [FilterKind; 4] = [
        FilterKind::Lenguaje,
        FilterKind::Institucion,
        FilterKind::Salary,
        FilterKind::Experiencia,
    ];

    /// Path segment following the dataset prefix.
    pub fn segment(self) -> &'static str {
        match self {
            FilterKind::Lenguaje => "lenguaje",
            FilterKind::Institucion => "institucion",
            FilterKind::Salary => "salary",
            FilterKind::Experiencia => "experiencia",
        }
    }

    /// Column the filter reads.
    pub fn field(self) -> &'static str {
        match self {
            FilterKind::Lenguaje => "Language",
            FilterKind::Institucion => "Institution",
            FilterKind::Salary => "Salary_USD",
            FilterKind::Experiencia => "Experience_Level",
        }
    }

    pub fn from_segment(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.segment() == s)
    }

    pub fn criterion(self, value: &str) -> Result<FilterCriterion> {
        match self {
            FilterKind::Lenguaje | FilterKind::Institucion => {
                Ok(FilterCriterion::exact(self.field(), value))
            }
            FilterKind::Salary => FilterCriterion::threshold(self.field(), value),
            FilterKind::Experiencia => Ok(FilterCriterion::substring(self.field(), value)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows() -> Vec<RowRecord> {
        vec![
            [
                ("Language", "Python"),
                ("Institution", "UNAL"),
                ("Salary_USD", "52000"),
                ("Experience_Level", "Senior"),
            ]
            .into_iter()
            .collect(),
            [
                ("Language", "Rust"),
                ("Institution", "unal"),
                ("Salary_USD", "n/a"),
                ("Experience_Level", "Mid-Senior"),
            ]
            .into_iter()
            .collect(),
            [("Language", "python"), ("Salary_USD", "1200.5")]
                .into_iter()
                .collect(),
            [("Institution", "EAFIT"), ("Experience_Level", "Junior")]
                .into_iter()
                .collect(),
        ]
    }

    fn languages(rows: &[RowRecord]) -> Vec<&str> {
        rows.iter().map(|r| r.get("Language").unwrap_or("-")).collect()
    }

    #[test]
    fn exact_match_ignores_case() {
        let upper = FilterKind::Lenguaje.criterion("PYTHON").unwrap().apply(rows());
        let lower = FilterKind::Lenguaje.criterion("python").unwrap().apply(rows());
        assert_eq!(upper, lower);
        assert_eq!(languages(&upper), vec!["Python", "python"]);
    }

    #[test]
    fn exact_match_is_not_substring() {
        let out = FilterKind::Lenguaje.criterion("pyth").unwrap().apply(rows());
        assert!(out.is_empty());
    }

    #[test]
    fn missing_field_is_excluded() {
        let out = FilterKind::Institucion.criterion("unal").unwrap().apply(rows());
        assert_eq!(out.len(), 2);
        let out = FilterKind::Institucion.criterion("eafit").unwrap().apply(rows());
        assert_eq!(languages(&out), vec!["-"]);
    }

    #[test]
    fn threshold_skips_unparseable_rows() {
        let all = FilterKind::Salary.criterion("0").unwrap().apply(rows());
        assert_eq!(languages(&all), vec!["Python", "python"]);
        let high = FilterKind::Salary.criterion("52000").unwrap().apply(rows());
        assert_eq!(languages(&high), vec!["Python"]);
        let none = FilterKind::Salary.criterion("1000000").unwrap().apply(rows());
        assert!(none.is_empty());
    }

    #[test]
    fn threshold_rejects_non_numeric_input() {
        let err = FilterKind::Salary.criterion("abc").unwrap_err();
        assert!(err.is_client_error());
    }

    #[test]
    fn substring_ignores_case() {
        let out = FilterKind::Experiencia.criterion("SENIOR").unwrap().apply(rows());
        assert_eq!(languages(&out), vec!["Python", "Rust"]);
    }

    #[test]
    fn segments_round_trip() {
        for k in FilterKind::ALL {
            assert_eq!(FilterKind::from_segment(k.segment()), Some(k));
        }
        assert_eq!(FilterKind::from_segment("pais"), None);
    }
}
