//! Voter registration form.

use crate::core::document::DocumentHandle;

use super::ValidationError;

/// Minimum voting age.
pub const MIN_VOTING_AGE: u32 = 18;

#[derive(Debug, Clone, Default)]
pub struct RegistrationForm {
    pub full_name: String,
    pub age: String,
    pub mobile: String,
    pub document: Option<DocumentHandle>,
}

impl RegistrationForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attach_document(&mut self, document: DocumentHandle) {
        log::debug!("Document attached: {document:?}");
        self.document = Some(document);
    }

    pub fn remove_document(&mut self) {
        self.document = None;
    }

    /// Age parsed as a whole number, if it is one.
    pub fn parsed_age(&self) -> Option<u32> {
        self.age.trim().parse().ok()
    }

    pub fn is_age_valid(&self) -> bool {
        self.parsed_age().is_some_and(|age| age >= MIN_VOTING_AGE)
    }

    /// Whether the "must be 18" hint should show: something was typed and it
    /// does not qualify.
    pub fn shows_age_warning(&self) -> bool {
        !self.age.is_empty() && !self.is_age_valid()
    }

    /// Gate: all four fields present and the age qualifies.
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.full_name.trim().is_empty() {
            return Err(ValidationError::MissingField("full name"));
        }
        if self.age.trim().is_empty() {
            return Err(ValidationError::MissingField("age"));
        }
        if self.parsed_age().is_none() {
            return Err(ValidationError::InvalidValue {
                field: "age",
                reason: "must be a whole number".to_string(),
            });
        }
        if !self.is_age_valid() {
            return Err(ValidationError::Underage);
        }
        if self.mobile.trim().is_empty() {
            return Err(ValidationError::MissingField("mobile number"));
        }
        if self.document.is_none() {
            return Err(ValidationError::MissingField("Aadhaar document"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn form(name: &str, age: &str, mobile: &str, with_document: bool) -> RegistrationForm {
        RegistrationForm {
            full_name: name.to_string(),
            age: age.to_string(),
            mobile: mobile.to_string(),
            document: with_document.then(|| DocumentHandle::new("aadhaar.pdf", vec![1, 2, 3])),
        }
    }

    #[rstest]
    #[case("Jane", "17", "555", true, false)]
    #[case("Jane", "18", "555", true, true)]
    #[case("Jane", "64", "555", true, true)]
    #[case("", "18", "555", true, false)]
    #[case("Jane", "", "555", true, false)]
    #[case("Jane", "18", "", true, false)]
    #[case("Jane", "18", "555", false, false)]
    #[case("Jane", "eighteen", "555", true, false)]
    fn test_gate(
        #[case] name: &str,
        #[case] age: &str,
        #[case] mobile: &str,
        #[case] with_document: bool,
        #[case] expected: bool,
    ) {
        assert_eq!(form(name, age, mobile, with_document).is_valid(), expected);
    }

    #[test]
    fn test_underage_reason() {
        let f = form("Jane", "17", "555", true);
        assert_eq!(f.validate(), Err(ValidationError::Underage));
        assert!(f.shows_age_warning());
    }

    #[test]
    fn test_no_warning_for_empty_age() {
        let f = form("Jane", "", "555", true);
        assert!(!f.shows_age_warning());
        assert_eq!(f.validate(), Err(ValidationError::MissingField("age")));
    }

    #[test]
    fn test_remove_document_closes_gate() {
        let mut f = form("Jane", "30", "555", true);
        assert!(f.is_valid());
        f.remove_document();
        assert!(!f.is_valid());
        f.attach_document(DocumentHandle::new("scan.png", vec![]));
        assert!(f.is_valid());
    }
}
