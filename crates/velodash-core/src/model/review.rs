//! Customer reviews.

use chrono::{DateTime, Utc};

use velodash_api::types::{ReviewCreate, ReviewResponse};

/// A published customer review.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Review {
    pub id: Option<String>,
    pub author: String,
    /// Star rating, clamped to 1..=5 on conversion.
    pub rating: u8,
    pub comment: String,
    pub created_at: Option<DateTime<Utc>>,
}

impl From<ReviewResponse> for Review {
    fn from(wire: ReviewResponse) -> Self {
        Self {
            id: wire.id,
            author: wire.author,
            rating: wire.rating.clamp(1, 5),
            comment: wire.comment,
            created_at: wire.created_at,
        }
    }
}

/// A review being composed on the submission form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewDraft {
    pub author: String,
    pub rating: u8,
    pub comment: String,
}

impl ReviewDraft {
    /// Validate the draft; returns a user-facing message on failure.
    pub fn validate(&self) -> Result<(), String> {
        if self.author.trim().is_empty() {
            return Err("Le nom est requis".into());
        }
        if !(1..=5).contains(&self.rating) {
            return Err("La note doit être entre 1 et 5".into());
        }
        Ok(())
    }
}

impl From<&ReviewDraft> for ReviewCreate {
    fn from(draft: &ReviewDraft) -> Self {
        Self {
            author: draft.author.trim().to_owned(),
            rating: draft.rating,
            comment: draft.comment.trim().to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draft_requires_author_and_rating() {
        let mut draft = ReviewDraft {
            author: "  ".into(),
            rating: 5,
            comment: String::new(),
        };
        assert!(draft.validate().is_err());

        draft.author = "Awa".into();
        draft.rating = 0;
        assert!(draft.validate().is_err());

        draft.rating = 4;
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn wire_rating_is_clamped() {
        let review = Review::from(ReviewResponse {
            id: None,
            author: "X".into(),
            rating: 9,
            comment: String::new(),
            created_at: None,
        });
        assert_eq!(review.rating, 5);
    }
}
