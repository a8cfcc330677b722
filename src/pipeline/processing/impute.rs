use crate::constants::{
    EMPLOYMENT_TYPE_REMAPS, NO_EXPERIENCE, NO_PROFILE_PLACEHOLDER, UNKNOWN_DEPARTMENT,
    UNSPECIFIED_EMPLOYMENT,
};
use crate::types::InternPosting;

/// Categorical fields after null-fill and normalization.
///
/// The three optional text fields are `None` whenever they count as absent
/// for labeling.
#[derive(Debug, Clone, PartialEq)]
pub struct ImputedFields {
    pub department: String,
    pub company_profile: Option<String>,
    pub requirements: Option<String>,
    pub required_education: Option<String>,
    pub employment_type: String,
    pub required_experience: String,
}

pub fn impute_fields(posting: &InternPosting) -> ImputedFields {
    ImputedFields {
        department: posting
            .department
            .clone()
            .unwrap_or_else(|| UNKNOWN_DEPARTMENT.to_string()),
        company_profile: normalize_company_profile(posting.company_profile.clone()),
        requirements: null_if_empty(posting.requirements.clone()),
        required_education: null_if_empty(posting.required_education.clone()),
        employment_type: normalize_employment_type(posting.employment_type.clone()),
        required_experience: posting
            .required_experience
            .clone()
            .unwrap_or_else(|| NO_EXPERIENCE.to_string()),
    }
}

pub fn null_if_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Empty text and the literal placeholder both count as no profile.
pub fn normalize_company_profile(value: Option<String>) -> Option<String> {
    null_if_empty(value).filter(|v| v != NO_PROFILE_PLACEHOLDER)
}

/// Null-fill, then apply each remap in order.
pub fn normalize_employment_type(value: Option<String>) -> String {
    let mut kind = value.unwrap_or_else(|| UNSPECIFIED_EMPLOYMENT.to_string());
    for (from, to) in EMPLOYMENT_TYPE_REMAPS {
        if kind == *from {
            kind = to.to_string();
        }
    }
    kind
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(v: &str) -> Option<String> {
        Some(v.to_string())
    }

    #[test]
    fn test_company_profile_placeholders() {
        assert_eq!(normalize_company_profile(s("")), None);
        assert_eq!(normalize_company_profile(s("no profile")), None);
        assert_eq!(normalize_company_profile(None), None);
        // Case-sensitive match
        assert_eq!(normalize_company_profile(s("No Profile")), s("No Profile"));
        assert_eq!(normalize_company_profile(s("We build rockets")), s("We build rockets"));
    }

    #[test]
    fn test_employment_type_fill_and_remap() {
        assert_eq!(normalize_employment_type(None), "Unspecified");
        assert_eq!(normalize_employment_type(s("Other")), "Unspecified");
        assert_eq!(normalize_employment_type(s("Temporary")), "Short Term");
        assert_eq!(normalize_employment_type(s("Full-time")), "Full-time");
    }

    #[test]
    fn test_impute_fields_defaults() {
        let posting = InternPosting {
            job_id: "1".to_string(),
            title: "intern".to_string(),
            description: None,
            department: None,
            salary_range: None,
            company_profile: s("Acme"),
            requirements: s(""),
            required_education: s("Bachelor's Degree"),
            employment_type: None,
            required_experience: None,
            fraudulent: Some(0),
        };

        let fields = impute_fields(&posting);
        assert_eq!(fields.department, "unknown");
        assert_eq!(fields.company_profile, s("Acme"));
        assert_eq!(fields.requirements, None);
        assert_eq!(fields.required_education, s("Bachelor's Degree"));
        assert_eq!(fields.employment_type, "Unspecified");
        assert_eq!(fields.required_experience, "no experience");
    }
}
