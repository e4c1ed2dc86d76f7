//! Request DTOs with validation.
//!
//! Owner fields are never read from a body: unknown keys are ignored and
//! the owner always comes from the authenticated caller.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use flashdeck_service::{CategoryInput, FlashcardInput, TagInput};

/// Registration request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Username.
    #[validate(length(min = 1, max = 150, message = "Username must be 1-150 characters"))]
    pub username: String,
    /// Email address.
    #[validate(email(message = "Enter a valid email address"))]
    pub email: Option<String>,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Username.
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Category create/update body.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct CategoryRequest {
    /// Display name.
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: String,
    /// Abbreviation.
    #[validate(length(max = 50, message = "Short name must be at most 50 characters"))]
    pub short_name: Option<String>,
    /// Parent category.
    #[serde(default, alias = "parent")]
    pub parent_id: Option<Uuid>,
    /// Free-form description.
    pub description: Option<String>,
    /// Requested public flag.
    pub is_public: Option<bool>,
}

impl From<CategoryRequest> for CategoryInput {
    fn from(req: CategoryRequest) -> Self {
        Self {
            name: req.name,
            short_name: req.short_name.filter(|s| !s.trim().is_empty()),
            parent_id: req.parent_id,
            description: req.description.filter(|s| !s.trim().is_empty()),
            is_public: req.is_public,
        }
    }
}

/// Tag create/update body.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct TagRequest {
    /// Tag name.
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: String,
    /// Requested public flag.
    pub is_public: Option<bool>,
}

impl From<TagRequest> for TagInput {
    fn from(req: TagRequest) -> Self {
        Self {
            name: req.name,
            is_public: req.is_public,
        }
    }
}

/// Flashcard create/update body.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct FlashcardRequest {
    /// Prompt side.
    #[validate(length(min = 1, message = "This field may not be blank."))]
    pub question: String,
    /// Answer side.
    #[validate(length(min = 1, message = "This field may not be blank."))]
    pub answer: String,
    /// Category reference.
    #[serde(default, alias = "category")]
    pub category_id: Option<Uuid>,
    /// Tag references.
    #[serde(default, alias = "tags")]
    pub tag_ids: Vec<Uuid>,
    /// Whether the answer is a code snippet.
    #[serde(default)]
    pub is_code_snippet: bool,
    /// Requested public flag.
    pub is_public: Option<bool>,
}

impl From<FlashcardRequest> for FlashcardInput {
    fn from(req: FlashcardRequest) -> Self {
        Self {
            question: req.question,
            answer: req.answer,
            category_id: req.category_id,
            tag_ids: req.tag_ids,
            is_code_snippet: req.is_code_snippet,
            is_public: req.is_public,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flashcard_request_accepts_short_reference_names() {
        let cat = Uuid::new_v4();
        let tag = Uuid::new_v4();
        let body = serde_json::json!({
            "question": "q",
            "answer": "a",
            "category": cat,
            "tags": [tag],
            "owner_id": Uuid::new_v4(),
        });

        let req: FlashcardRequest = serde_json::from_value(body).expect("deserialize");
        assert_eq!(req.category_id, Some(cat));
        assert_eq!(req.tag_ids, vec![tag]);
        assert!(!req.is_code_snippet);
        assert_eq!(req.is_public, None);
    }

    #[test]
    fn test_blank_question_fails_validation() {
        let req = FlashcardRequest {
            question: String::new(),
            answer: "a".to_string(),
            ..Default::default()
        };
        let errors = req.validate().expect_err("blank question");
        assert!(errors.field_errors().contains_key("question"));
    }

    #[test]
    fn test_blank_optional_category_fields_become_none() {
        let input: CategoryInput = CategoryRequest {
            name: "Rust".to_string(),
            short_name: Some("  ".to_string()),
            description: Some(String::new()),
            ..Default::default()
        }
        .into();
        assert!(input.short_name.is_none());
        assert!(input.description.is_none());
    }
}
