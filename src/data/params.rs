use std::collections::BTreeMap;

use crate::error::{ParamField, ParameterError, ParameterErrors};

/// Weight and maximum mark of one subject column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SubjectParameter {
    pub weight: f64,
    pub max_mark: f64,
}

/// Raw text typed for one subject, before validation.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParameterEntry {
    pub subject: String,
    pub weight: String,
    pub max_mark: String,
}

impl ParameterEntry {
    pub fn new(subject: &str, weight: &str, max_mark: &str) -> Self {
        Self {
            subject: subject.to_string(),
            weight: weight.to_string(),
            max_mark: max_mark.to_string(),
        }
    }

    /// Empty entry row for a subject, as shown before the user types anything.
    pub fn blank(subject: &str) -> Self {
        Self::new(subject, "", "")
    }
}

/// Blank entries for every subject, in column order.
pub fn blank_entries(subjects: &[String]) -> Vec<ParameterEntry> {
    subjects.iter().map(|s| ParameterEntry::blank(s)).collect()
}

// ---------------------------------------------------------------------------
// ParameterSet – validated as a unit
// ---------------------------------------------------------------------------

/// A complete, validated set of subject parameters in subject column order.
///
/// Only [`ParameterSet::parse`] builds one, so every subject has exactly one
/// finite, strictly positive weight and max mark.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterSet {
    params: Vec<(String, SubjectParameter)>,
}

impl ParameterSet {
    /// Validate raw entries against the subject columns of the filtered table.
    ///
    /// All problems are reported together; any problem rejects the whole set.
    pub fn parse(subjects: &[String], entries: &[ParameterEntry]) -> Result<Self, ParameterErrors> {
        if subjects.is_empty() {
            return Err(ParameterErrors(vec![ParameterError::NoSubjects]));
        }

        let mut errors = Vec::new();
        let mut parsed: BTreeMap<&str, SubjectParameter> = BTreeMap::new();
        let mut seen: Vec<&str> = Vec::new();

        for entry in entries {
            let subject = entry.subject.as_str();
            if !subjects.iter().any(|s| s == subject) {
                errors.push(ParameterError::UnknownSubject {
                    subject: subject.to_string(),
                });
                continue;
            }
            if seen.contains(&subject) {
                errors.push(ParameterError::DuplicateSubject {
                    subject: subject.to_string(),
                });
                continue;
            }
            seen.push(subject);

            let weight = parse_positive(subject, ParamField::Weight, &entry.weight);
            let max_mark = parse_positive(subject, ParamField::MaxMark, &entry.max_mark);
            match (weight, max_mark) {
                (Ok(weight), Ok(max_mark)) => {
                    parsed.insert(subject, SubjectParameter { weight, max_mark });
                }
                (weight, max_mark) => {
                    errors.extend(weight.err());
                    errors.extend(max_mark.err());
                }
            }
        }

        for subject in subjects {
            if !seen.contains(&subject.as_str()) {
                errors.push(ParameterError::MissingSubject {
                    subject: subject.clone(),
                });
            }
        }

        if !errors.is_empty() {
            return Err(ParameterErrors(errors));
        }

        let params = subjects
            .iter()
            .filter_map(|s| parsed.get(s.as_str()).map(|p| (s.clone(), *p)))
            .collect();
        Ok(ParameterSet { params })
    }

    /// Parameters in subject column order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &SubjectParameter)> {
        self.params.iter().map(|(s, p)| (s.as_str(), p))
    }

    pub fn get(&self, subject: &str) -> Option<&SubjectParameter> {
        self.params.iter().find(|(s, _)| s == subject).map(|(_, p)| p)
    }

    /// Sum of all weights, in subject order.
    pub fn total_weight(&self) -> f64 {
        self.params.iter().map(|(_, p)| p.weight).sum()
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}

fn parse_positive(subject: &str, field: ParamField, input: &str) -> Result<f64, ParameterError> {
    let value = input
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ParameterError::InvalidNumber {
            subject: subject.to_string(),
            field,
            input: input.to_string(),
        })?;

    if value <= 0.0 {
        return Err(ParameterError::NotPositive {
            subject: subject.to_string(),
            field,
            value,
        });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subjects() -> Vec<String> {
        vec!["Math".to_string(), "English".to_string()]
    }

    #[test]
    fn test_valid_parameters_follow_subject_order() {
        let entries = vec![
            ParameterEntry::new("English", "1", " 50 "),
            ParameterEntry::new("Math", "2", "100"),
        ];
        let set = ParameterSet::parse(&subjects(), &entries).unwrap();

        let order: Vec<&str> = set.iter().map(|(s, _)| s).collect();
        assert_eq!(order, vec!["Math", "English"]);
        assert_eq!(set.get("English"), Some(&SubjectParameter { weight: 1.0, max_mark: 50.0 }));
        assert_eq!(set.total_weight(), 3.0);
    }

    #[test]
    fn test_one_bad_entry_rejects_everything() {
        let entries = vec![
            ParameterEntry::new("Math", "2", "100"),
            ParameterEntry::new("English", "one", "50"),
        ];
        let errors = ParameterSet::parse(&subjects(), &entries).unwrap_err();
        assert_eq!(
            errors.0,
            vec![ParameterError::InvalidNumber {
                subject: "English".into(),
                field: ParamField::Weight,
                input: "one".into(),
            }]
        );
    }

    #[test]
    fn test_zero_and_negative_values_rejected() {
        let entries = vec![
            ParameterEntry::new("Math", "0", "100"),
            ParameterEntry::new("English", "1", "-5"),
        ];
        let errors = ParameterSet::parse(&subjects(), &entries).unwrap_err();
        assert_eq!(errors.0.len(), 2);
        assert!(matches!(
            errors.0[0],
            ParameterError::NotPositive { field: ParamField::Weight, .. }
        ));
        assert!(matches!(
            errors.0[1],
            ParameterError::NotPositive { field: ParamField::MaxMark, .. }
        ));
    }

    #[test]
    fn test_non_finite_rejected() {
        let entries = vec![
            ParameterEntry::new("Math", "inf", "100"),
            ParameterEntry::new("English", "1", "NaN"),
        ];
        let errors = ParameterSet::parse(&subjects(), &entries).unwrap_err();
        assert_eq!(errors.0.len(), 2);
        assert!(errors
            .0
            .iter()
            .all(|e| matches!(e, ParameterError::InvalidNumber { .. })));
    }

    #[test]
    fn test_collects_all_errors() {
        let entries = vec![
            ParameterEntry::new("Math", "", ""),
            ParameterEntry::new("Math", "1", "1"),
            ParameterEntry::new("Physics", "1", "1"),
        ];
        let errors = ParameterSet::parse(&subjects(), &entries).unwrap_err();
        assert_eq!(errors.0.len(), 5);
        assert!(errors.0.contains(&ParameterError::DuplicateSubject { subject: "Math".into() }));
        assert!(errors.0.contains(&ParameterError::UnknownSubject { subject: "Physics".into() }));
        assert!(errors.0.contains(&ParameterError::MissingSubject { subject: "English".into() }));
    }

    #[test]
    fn test_no_subjects() {
        let errors = ParameterSet::parse(&[], &[]).unwrap_err();
        assert_eq!(errors.0, vec![ParameterError::NoSubjects]);
    }

    #[test]
    fn test_blank_entries() {
        let entries = blank_entries(&subjects());
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1], ParameterEntry::blank("English"));
        assert!(ParameterSet::parse(&subjects(), &entries).is_err());
    }
}
