//! # Submission Form
//!
//! Intake for new listings.
//!
//! - Every field required and non-blank, email shaped like an address
//! - Category from the fixed vocabulary, pricing from the fixed options
//! - Website gets `https://` unless it already has an http scheme
//! - Plan only picks where the submitter goes next. Premium does not feature the listing; that is
//!   left to whatever confirms the payment
use catalog::{PRICING_OPTIONS, Submission, categories};
use serde::{Deserialize, Serialize};

use crate::{
    error::AppError,
    utils::{is_valid_email, normalize_website},
};

pub const SUCCESS_PATH: &str = "/submit/success";
pub const PAYMENT_PATH: &str = "/payment";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Plan {
    #[default]
    Free,
    Premium,
}

impl Plan {
    pub fn next_step(self, listing_id: &str) -> String {
        match self {
            Plan::Free => SUCCESS_PATH.to_string(),
            Plan::Premium => format!("{PAYMENT_PATH}?listing_id={listing_id}"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SubmissionForm {
    pub name: String,
    pub description: String,
    pub category: String,
    pub website: String,
    pub pricing: String,
    pub email: String,
    #[serde(default)]
    pub plan: Plan,
}

impl SubmissionForm {
    pub fn into_submission(self) -> Result<(Submission, Plan), AppError> {
        let required = [
            ("name", &self.name),
            ("description", &self.description),
            ("category", &self.category),
            ("website", &self.website),
            ("pricing", &self.pricing),
            ("email", &self.email),
        ];
        if let Some((field, _)) = required.iter().find(|(_, value)| value.trim().is_empty()) {
            return Err(AppError::InvalidSubmission(format!("{field} is required")));
        }

        if !is_valid_email(&self.email) {
            return Err(AppError::InvalidSubmission(format!(
                "{} is not an email address",
                self.email
            )));
        }

        if categories::find(&self.category).is_none() {
            return Err(AppError::InvalidSubmission(format!(
                "unknown category {}",
                self.category
            )));
        }

        if !PRICING_OPTIONS.contains(&self.pricing.as_str()) {
            return Err(AppError::InvalidSubmission(format!(
                "unknown pricing model {}",
                self.pricing
            )));
        }

        let submission = Submission {
            website: normalize_website(&self.website),
            name: self.name,
            description: self.description,
            category: self.category,
            pricing: self.pricing,
            email: self.email,
        };

        Ok((submission, self.plan))
    }
}

/// What the submitter sees after posting the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmitResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn form(website: &str) -> SubmissionForm {
        serde_json::from_value(json!({
            "name": "Foo",
            "website": website,
            "category": "cms",
            "pricing": "Free",
            "email": "a@b.com",
            "description": "x",
        }))
        .unwrap()
    }

    fn rejection(form: SubmissionForm) -> String {
        match form.into_submission() {
            Err(AppError::InvalidSubmission(reason)) => reason,
            other => panic!("expected a rejection, got {other:?}"),
        }
    }

    #[test]
    fn test_plan_defaults_to_free() {
        assert_eq!(form("foo.com").plan, Plan::Free);
    }

    #[test]
    fn test_normalizes_website() {
        let (submission, _) = form("foo.com").into_submission().unwrap();
        assert_eq!(submission.website, "https://foo.com");

        let (submission, _) = form("http://foo.com").into_submission().unwrap();
        assert_eq!(submission.website, "http://foo.com");
    }

    #[test]
    fn test_next_step() {
        assert_eq!(Plan::Free.next_step("abc"), "/submit/success");
        assert_eq!(Plan::Premium.next_step("abc"), "/payment?listing_id=abc");
    }

    #[test]
    fn test_blank_field() {
        let mut blank = form("foo.com");
        blank.name = "   ".to_string();

        assert_eq!(rejection(blank), "name is required");
    }

    #[test]
    fn test_bad_email() {
        let mut bad = form("foo.com");
        bad.email = "not-an-email".to_string();

        assert_eq!(rejection(bad), "not-an-email is not an email address");
    }

    #[test]
    fn test_unknown_category() {
        let mut bad = form("foo.com");
        bad.category = "games".to_string();

        assert_eq!(rejection(bad), "unknown category games");
    }

    #[test]
    fn test_unknown_pricing() {
        let mut bad = form("foo.com");
        bad.pricing = "Free / Cloud".to_string();

        assert_eq!(rejection(bad), "unknown pricing model Free / Cloud");
    }

    #[test]
    fn test_premium_plan_parsed() {
        let form: SubmissionForm = serde_json::from_value(json!({
            "name": "Foo",
            "website": "foo.com",
            "category": "cms",
            "pricing": "Paid",
            "email": "a@b.com",
            "description": "x",
            "plan": "premium",
        }))
        .unwrap();

        let (_, plan) = form.into_submission().unwrap();
        assert_eq!(plan, Plan::Premium);
    }
}
