use crate::api::{ApiClient, ApiError};
use crate::models::{AppointmentDetail, CreateReviewRequest};

/// Highest star rating.
pub const MAX_RATING: u8 = 5;

/// An unsent review. A rating of 0 means no stars picked yet.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReviewDraft {
    pub rating: u8,
    pub comment: String,
}

impl ReviewDraft {
    pub fn set_rating(&mut self, rating: u8) {
        self.rating = rating.min(MAX_RATING);
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Check the draft without touching the network.
    pub fn validate(&self) -> Result<(), ReviewError> {
        if self.rating == 0 {
            return Err(ReviewError::MissingRating);
        }
        if self.comment.trim().is_empty() {
            return Err(ReviewError::EmptyComment);
        }
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ReviewError {
    #[error("User Id required")]
    NotAuthenticated,

    #[error("Appointment details required")]
    MissingAppointment,

    #[error("only completed appointments can be reviewed")]
    NotCompleted,

    #[error("Please select a rating")]
    MissingRating,

    #[error("Please enter a review")]
    EmptyComment,

    #[error("could not submit review: {0}")]
    Submit(#[source] ApiError),
}

impl ReviewError {
    pub fn is_validation(&self) -> bool {
        matches!(self, ReviewError::MissingRating | ReviewError::EmptyComment)
    }

    pub fn user_message(&self) -> String {
        match self {
            ReviewError::NotAuthenticated => "Please sign in to leave a review.".to_string(),
            ReviewError::MissingAppointment => "Appointment details required".to_string(),
            ReviewError::NotCompleted => {
                "Reviews open once the appointment is completed.".to_string()
            }
            ReviewError::MissingRating | ReviewError::EmptyComment => self.to_string(),
            ReviewError::Submit(e) => match e {
                ApiError::Server { .. } => e.user_message(),
                _ => "Could not submit review".to_string(),
            },
        }
    }
}

/// Send a review for the doctor of `appointment`.
pub async fn submit_review(
    api: &ApiClient,
    patient_id: Option<&str>,
    appointment: Option<&AppointmentDetail>,
    draft: &ReviewDraft,
) -> Result<(), ReviewError> {
    let patient_id = patient_id
        .filter(|id| !id.is_empty())
        .ok_or(ReviewError::NotAuthenticated)?;
    let appointment = appointment.ok_or(ReviewError::MissingAppointment)?;
    if !appointment.status.accepts_review() {
        return Err(ReviewError::NotCompleted);
    }
    draft.validate()?;

    let request = CreateReviewRequest {
        patient_id: patient_id.to_string(),
        doctor_id: appointment.doctor_id.clone(),
        rating: draft.rating,
        comment: draft.comment.clone(),
    };

    api.create_review(&request)
        .await
        .map_err(ReviewError::Submit)
}
