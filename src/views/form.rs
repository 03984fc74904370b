use crate::core::{validate_draft, Scheduled, ValidationErrors};
use crate::models::{Field, ProfileDraft};
use crate::views::{Navigation, Navigator};
use std::time::Duration;

/// Result of pressing the submit button
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// At least one field failed; nothing was sent and the input is kept
    Rejected(ValidationErrors),
    /// Valid; navigation to the results view is scheduled
    Submitting,
    /// The button is disabled while a submission is pending
    AlreadySubmitting,
}

/// Profile creation form
///
/// Holds the draft, the per-field errors of the last rejected submit, and
/// the pending navigation once a valid draft has been accepted.
#[derive(Debug)]
pub struct FormView {
    draft: ProfileDraft,
    errors: ValidationErrors,
    submit_delay: Duration,
    navigator: Navigator,
    pending: Option<Scheduled>,
}

impl FormView {
    pub fn new(navigator: Navigator, submit_delay: Duration) -> Self {
        Self {
            draft: ProfileDraft::default(),
            errors: ValidationErrors::new(),
            submit_delay,
            navigator,
            pending: None,
        }
    }

    pub fn draft(&self) -> &ProfileDraft {
        &self.draft
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn is_submitting(&self) -> bool {
        self.pending.is_some()
    }

    /// Apply an edit and forget the error shown for that field
    pub fn edit(&mut self, field: Field, value: &str) {
        self.draft.set_field(field, value);
        self.errors.clear(field);
    }

    pub fn submit(&mut self) -> SubmitOutcome {
        if self.is_submitting() {
            return SubmitOutcome::AlreadySubmitting;
        }

        let errors = validate_draft(&self.draft);
        if !errors.is_empty() {
            tracing::debug!("Profile form rejected: {}", errors);
            self.errors = errors.clone();
            return SubmitOutcome::Rejected(errors);
        }

        self.errors = ValidationErrors::new();

        let payload = self.draft.clone();
        let navigator = self.navigator.clone();
        tracing::info!("Profile accepted, showing results in {:?}", self.submit_delay);
        self.pending = Some(Scheduled::after(self.submit_delay, move || {
            navigator.navigate(Navigation::Results(Some(payload)));
        }));

        SubmitOutcome::Submitting
    }

    /// "Back to home" link
    pub fn back(&self) {
        self.navigator.navigate(Navigation::Landing);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::validation::{AGE_TOO_LOW, NAME_REQUIRED};
    use tokio::sync::mpsc::error::TryRecvError;

    fn fill(form: &mut FormView) {
        form.edit(Field::Name, "Durand");
        form.edit(Field::Surname, "Léa");
        form.edit(Field::Age, "27");
        form.edit(Field::Gender, "female");
        form.edit(Field::Bio, "Randonnée et jazz");
    }

    #[tokio::test(start_paused = true)]
    async fn test_valid_submit_navigates_after_delay() {
        let (navigator, mut inbox) = Navigator::channel();
        let mut form = FormView::new(navigator, Duration::from_millis(1000));
        fill(&mut form);

        assert_eq!(form.submit(), SubmitOutcome::Submitting);
        assert!(form.is_submitting());
        assert_eq!(inbox.try_recv(), Err(TryRecvError::Empty));

        let expected = form.draft().clone();
        assert_eq!(inbox.recv().await, Some(Navigation::Results(Some(expected))));
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_submit_is_ignored() {
        let (navigator, mut inbox) = Navigator::channel();
        let mut form = FormView::new(navigator, Duration::from_millis(1000));
        fill(&mut form);

        form.submit();
        assert_eq!(form.submit(), SubmitOutcome::AlreadySubmitting);

        assert!(inbox.recv().await.is_some());
        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(inbox.try_recv(), Err(TryRecvError::Empty));
    }

    #[tokio::test(start_paused = true)]
    async fn test_invalid_submit_keeps_input_and_stays() {
        let (navigator, mut inbox) = Navigator::channel();
        let mut form = FormView::new(navigator, Duration::from_millis(1000));
        form.edit(Field::Surname, "Léa");
        form.edit(Field::Age, "16");

        let SubmitOutcome::Rejected(errors) = form.submit() else {
            panic!("expected rejection");
        };
        assert_eq!(errors.get(Field::Name), Some(NAME_REQUIRED));
        assert_eq!(errors.get(Field::Age), Some(AGE_TOO_LOW));
        assert!(!form.is_submitting());
        assert_eq!(form.draft().surname, "Léa");
        assert_eq!(form.draft().age, "16");

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(inbox.try_recv(), Err(TryRecvError::Empty));
    }

    #[tokio::test]
    async fn test_editing_clears_only_that_field_error() {
        let (navigator, _inbox) = Navigator::channel();
        let mut form = FormView::new(navigator, Duration::from_millis(1000));
        form.submit();
        assert_eq!(form.errors().len(), 4);

        form.edit(Field::Name, "D");
        assert!(!form.errors().contains(Field::Name));
        assert!(form.errors().contains(Field::Surname));
        assert_eq!(form.errors().len(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropping_form_cancels_navigation() {
        let (navigator, mut inbox) = Navigator::channel();
        let mut form = FormView::new(navigator, Duration::from_millis(1000));
        fill(&mut form);
        form.submit();
        drop(form);

        // Every sender is gone once the aborted task is cleaned up
        assert_eq!(inbox.recv().await, None);
    }
}
