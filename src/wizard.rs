//! Try-on wizard state machine.
//!
//! `SelectCategory → SelectGarment → SelectHuman → Generating → Result`
//!
//! The session owns every in-flight field of one wizard pass. Screens only
//! mutate it through the transitions below, so a generation request can only
//! leave the session once both images are present.

use crate::error::AppError;
use crate::models::{
    GeneratedImage, GenerationParams, ImageFile, ImageSlot, ProductCategory, TryOnRequest,
    DOWNLOAD_FILE_NAME, INITIAL_REQUEST,
};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardStep {
    SelectCategory,
    SelectGarment,
    SelectHuman,
    Generating,
    Result,
}

impl WizardStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            WizardStep::SelectCategory => "select-category",
            WizardStep::SelectGarment => "select-garment",
            WizardStep::SelectHuman => "select-human",
            WizardStep::Generating => "generating",
            WizardStep::Result => "result",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum WizardError {
    /// Submission refused before any network call
    MissingImage(ImageSlot),
    InvalidTransition {
        from: WizardStep,
        action: &'static str,
    },
    /// A submission is already waiting for the generation service
    SubmissionPending,
    /// Download requested before anything was generated
    NoResult,
}

impl fmt::Display for WizardError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            WizardError::MissingImage(slot) => write!(f, "Missing {} image", slot.as_str()),
            WizardError::InvalidTransition { from, action } => {
                write!(f, "Cannot {} while in step {}", action, from.as_str())
            }
            WizardError::SubmissionPending => write!(f, "A try-on request is already running"),
            WizardError::NoResult => write!(f, "No generated image available"),
        }
    }
}

impl std::error::Error for WizardError {}

impl WizardError {
    pub fn user_message(&self) -> String {
        match self {
            WizardError::MissingImage(ImageSlot::Garment) => {
                "Please choose a garment before trying it on.".to_string()
            }
            WizardError::MissingImage(ImageSlot::Human) => {
                "Please upload a photo of yourself before proceeding.".to_string()
            }
            WizardError::InvalidTransition { .. } => {
                "Please complete the previous steps first.".to_string()
            }
            WizardError::SubmissionPending => "Processing...".to_string(),
            WizardError::NoResult => "Nothing to download yet.".to_string(),
        }
    }
}

/// A request that passed the precondition checks
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub ticket: u64,
    pub request: TryOnRequest,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionOutcome {
    Stored,
    /// Stayed in `Generating`; the message is meant for the user
    Failed(String),
    /// The session moved on (start over or newer submission) in the meantime
    Ignored,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TryOnSession {
    step: WizardStep,
    request: TryOnRequest,
    generated: Option<GeneratedImage>,
    pending: Option<u64>,
    next_ticket: u64,
    last_error: Option<String>,
}

impl Default for TryOnSession {
    fn default() -> Self {
        Self::new()
    }
}

impl TryOnSession {
    pub fn new() -> Self {
        Self {
            step: WizardStep::SelectCategory,
            request: INITIAL_REQUEST,
            generated: None,
            pending: None,
            next_ticket: 1,
            last_error: None,
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn request(&self) -> &TryOnRequest {
        &self.request
    }

    pub fn generated(&self) -> Option<&GeneratedImage> {
        self.generated.as_ref()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn is_submitting(&self) -> bool {
        self.pending.is_some()
    }

    fn expect_step(&self, allowed: &[WizardStep], action: &'static str) -> Result<(), WizardError> {
        if allowed.contains(&self.step) {
            Ok(())
        } else {
            Err(WizardError::InvalidTransition {
                from: self.step,
                action,
            })
        }
    }

    /// `SelectCategory → SelectGarment`. Re-picking on the garment step is allowed.
    pub fn select_category(&mut self, category: ProductCategory) -> Result<(), WizardError> {
        self.expect_step(
            &[WizardStep::SelectCategory, WizardStep::SelectGarment],
            "select a category",
        )?;

        self.request.gender = Some(category.gender);
        self.request.category = category.region;
        self.step = WizardStep::SelectGarment;
        log::debug!("Wizard: category {} selected", category);
        Ok(())
    }

    /// `SelectGarment → SelectHuman`. Replaces any previous garment.
    pub fn choose_garment(
        &mut self,
        image: ImageFile,
        description: Option<String>,
    ) -> Result<(), WizardError> {
        self.expect_step(&[WizardStep::SelectGarment], "choose a garment")?;
        if image.is_empty() {
            return Err(WizardError::MissingImage(ImageSlot::Garment));
        }

        self.request.garment_image = Some(image);
        if let Some(description) = description {
            self.request.garment_description = description;
        }
        self.step = WizardStep::SelectHuman;
        Ok(())
    }

    /// `SelectHuman → Generating`. Replaces any previous photo.
    pub fn confirm_human(&mut self, image: ImageFile) -> Result<(), WizardError> {
        self.expect_step(&[WizardStep::SelectHuman], "confirm a photo")?;
        if image.is_empty() {
            return Err(WizardError::MissingImage(ImageSlot::Human));
        }

        self.request.human_image = Some(image);
        self.step = WizardStep::Generating;
        Ok(())
    }

    pub fn set_description(&mut self, description: String) {
        self.request.garment_description = description;
    }

    pub fn set_params(&mut self, params: GenerationParams) {
        self.request.params = params;
    }

    /// Checks the preconditions of `Generating → Result` and hands out the
    /// request to send. Missing images are reported before anything else.
    pub fn prepare_submission(&mut self) -> Result<Submission, WizardError> {
        if let Some(slot) = self.request.missing_image() {
            let err = WizardError::MissingImage(slot);
            self.last_error = Some(err.user_message());
            return Err(err);
        }
        self.expect_step(&[WizardStep::Generating], "submit")?;
        if self.pending.is_some() {
            return Err(WizardError::SubmissionPending);
        }

        let ticket = self.next_ticket;
        self.next_ticket += 1;
        self.pending = Some(ticket);
        self.last_error = None;

        Ok(Submission {
            ticket,
            request: self.request.clone(),
        })
    }

    /// Stores the answer of the generation service for `ticket`
    pub fn complete_submission(
        &mut self,
        ticket: u64,
        result: Result<GeneratedImage, AppError>,
    ) -> SubmissionOutcome {
        if self.pending != Some(ticket) {
            log::debug!("Wizard: ignoring stale result for ticket {}", ticket);
            return SubmissionOutcome::Ignored;
        }
        self.pending = None;

        match result {
            Ok(image) => {
                self.generated = Some(image);
                self.step = WizardStep::Result;
                SubmissionOutcome::Stored
            }
            Err(e) => {
                log::warn!("Try-on generation failed: {}", e);
                let message = e.user_message();
                self.last_error = Some(message.clone());
                SubmissionOutcome::Failed(message)
            }
        }
    }

    /// One step back, keeping what was collected so far
    pub fn back(&mut self) -> Result<(), WizardError> {
        self.step = match self.step {
            WizardStep::SelectGarment => WizardStep::SelectCategory,
            WizardStep::SelectHuman => WizardStep::SelectGarment,
            WizardStep::Generating if self.pending.is_none() => WizardStep::SelectHuman,
            from => {
                return Err(WizardError::InvalidTransition {
                    from,
                    action: "go back",
                })
            }
        };
        self.last_error = None;
        Ok(())
    }

    /// Back to `SelectCategory` with every in-flight field cleared
    pub fn start_over(&mut self) {
        self.request = INITIAL_REQUEST;
        self.generated = None;
        self.pending = None;
        self.last_error = None;
        self.step = WizardStep::SelectCategory;
    }

    /// File name and image to save from the `Result` step
    pub fn download(&self) -> Result<(&'static str, &GeneratedImage), WizardError> {
        match (&self.step, &self.generated) {
            (WizardStep::Result, Some(image)) => Ok((DOWNLOAD_FILE_NAME, image)),
            _ => Err(WizardError::NoResult),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BodyRegion, Gender};
    use crate::services::generation_service::{generate_for, ImageGenerator};
    use std::cell::RefCell;

    /// Records every request it receives
    struct FakeGenerator {
        calls: RefCell<Vec<TryOnRequest>>,
        fail: bool,
    }

    impl FakeGenerator {
        fn new(fail: bool) -> Self {
            Self {
                calls: RefCell::new(Vec::new()),
                fail,
            }
        }
    }

    impl ImageGenerator for FakeGenerator {
        async fn generate(&self, request: &TryOnRequest) -> Result<GeneratedImage, AppError> {
            self.calls.borrow_mut().push(request.clone());
            if self.fail {
                Err(AppError::Network("connection reset".to_string()))
            } else {
                Ok(GeneratedImage::from_png(b"generated".to_vec()))
            }
        }
    }

    async fn submit(
        session: &mut TryOnSession,
        generator: &FakeGenerator,
    ) -> Result<SubmissionOutcome, WizardError> {
        let submission = session.prepare_submission()?;
        let result = generate_for(generator, &submission).await;
        Ok(session.complete_submission(submission.ticket, result))
    }

    fn image(name: &str) -> ImageFile {
        ImageFile::new(name, "image/jpeg", name.as_bytes().to_vec())
    }

    fn male_tops() -> ProductCategory {
        ProductCategory::new(Gender::Male, BodyRegion::UpperBody)
    }

    fn session_ready_to_submit() -> TryOnSession {
        let mut session = TryOnSession::new();
        session.select_category(male_tops()).unwrap();
        session.choose_garment(image("garment-a"), None).unwrap();
        session.confirm_human(image("human-b")).unwrap();
        session
    }

    #[test]
    fn test_happy_path_transitions() {
        let mut session = TryOnSession::new();
        assert_eq!(session.step(), WizardStep::SelectCategory);

        session.select_category(male_tops()).unwrap();
        assert_eq!(session.step(), WizardStep::SelectGarment);
        assert_eq!(session.request().gender, Some(Gender::Male));
        assert_eq!(session.request().category, BodyRegion::UpperBody);

        session
            .choose_garment(image("garment-a"), Some("denim jacket".to_string()))
            .unwrap();
        assert_eq!(session.step(), WizardStep::SelectHuman);
        assert_eq!(session.request().garment_description, "denim jacket");

        session.confirm_human(image("human-b")).unwrap();
        assert_eq!(session.step(), WizardStep::Generating);
    }

    #[test]
    fn test_transitions_out_of_order_are_refused() {
        let mut session = TryOnSession::new();
        assert!(matches!(
            session.choose_garment(image("g"), None),
            Err(WizardError::InvalidTransition {
                from: WizardStep::SelectCategory,
                ..
            })
        ));
        assert!(session.confirm_human(image("h")).is_err());
        assert_eq!(session.step(), WizardStep::SelectCategory);
        assert_eq!(session.request(), &INITIAL_REQUEST);
    }

    #[test]
    fn test_empty_images_are_refused() {
        let mut session = TryOnSession::new();
        session.select_category(male_tops()).unwrap();
        assert_eq!(
            session.choose_garment(ImageFile::new("g", "image/png", Vec::new()), None),
            Err(WizardError::MissingImage(ImageSlot::Garment))
        );
        assert_eq!(session.step(), WizardStep::SelectGarment);
    }

    #[test]
    fn test_reselecting_garment_replaces_previous() {
        let mut session = TryOnSession::new();
        session.select_category(male_tops()).unwrap();
        session.choose_garment(image("first"), None).unwrap();
        session.back().unwrap();
        session.choose_garment(image("second"), None).unwrap();

        let garment = session.request().garment_image.as_ref().unwrap();
        assert_eq!(garment.name, "second");
    }

    #[tokio::test]
    async fn test_scenario_male_upper_body_generates_one_image() {
        let mut session = session_ready_to_submit();
        session.set_params(GenerationParams {
            denoise_steps: 50,
            seed: 42,
            number_of_images: 1,
        });
        let generator = FakeGenerator::new(false);

        let outcome = submit(&mut session, &generator).await.unwrap();
        assert_eq!(outcome, SubmissionOutcome::Stored);
        assert_eq!(session.step(), WizardStep::Result);

        let calls = generator.calls.borrow();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].category, BodyRegion::UpperBody);
        assert_eq!(calls[0].params, GenerationParams::DEFAULT);

        let (file_name, generated) = session.download().unwrap();
        assert_eq!(file_name, "generated-outfit.png");
        assert_eq!(generated.png, b"generated".to_vec());
        assert!(generated.data_url().starts_with("data:image/png;base64,"));
    }

    #[tokio::test]
    async fn test_submit_with_only_garment_sends_nothing() {
        let mut session = TryOnSession::new();
        session.select_category(male_tops()).unwrap();
        session.choose_garment(image("garment-a"), None).unwrap();
        let generator = FakeGenerator::new(false);

        let result = submit(&mut session, &generator).await;
        assert_eq!(result, Err(WizardError::MissingImage(ImageSlot::Human)));
        assert!(generator.calls.borrow().is_empty());
        assert_eq!(
            session.last_error(),
            Some("Please upload a photo of yourself before proceeding.")
        );
        assert_eq!(session.step(), WizardStep::SelectHuman);
    }

    #[tokio::test]
    async fn test_failure_stays_in_generating_and_allows_retry() {
        let mut session = session_ready_to_submit();

        let failing = FakeGenerator::new(true);
        let outcome = submit(&mut session, &failing).await.unwrap();
        assert!(matches!(outcome, SubmissionOutcome::Failed(_)));
        assert_eq!(session.step(), WizardStep::Generating);
        assert!(session.last_error().is_some());
        assert!(session.generated().is_none());
        assert!(!session.is_submitting());

        let working = FakeGenerator::new(false);
        let outcome = submit(&mut session, &working).await.unwrap();
        assert_eq!(outcome, SubmissionOutcome::Stored);
        assert_eq!(session.step(), WizardStep::Result);
        assert_eq!(session.last_error(), None);
    }

    #[test]
    fn test_double_submit_is_refused() {
        let mut session = session_ready_to_submit();
        let first = session.prepare_submission().unwrap();
        assert!(session.is_submitting());
        assert_eq!(
            session.prepare_submission(),
            Err(WizardError::SubmissionPending)
        );
        assert!(session.back().is_err());

        let outcome = session.complete_submission(
            first.ticket,
            Ok(GeneratedImage::from_png(vec![1, 2, 3])),
        );
        assert_eq!(outcome, SubmissionOutcome::Stored);
    }

    #[test]
    fn test_result_after_start_over_is_ignored() {
        let mut session = session_ready_to_submit();
        let submission = session.prepare_submission().unwrap();

        session.start_over();
        let outcome = session.complete_submission(
            submission.ticket,
            Ok(GeneratedImage::from_png(vec![9])),
        );

        assert_eq!(outcome, SubmissionOutcome::Ignored);
        assert!(session.generated().is_none());
        assert_eq!(session.step(), WizardStep::SelectCategory);
    }

    #[test]
    fn test_start_over_clears_everything() {
        let mut session = session_ready_to_submit();
        session.set_description("silk blouse".to_string());
        session.set_params(GenerationParams {
            denoise_steps: 20,
            seed: 7,
            number_of_images: 2,
        });
        let submission = session.prepare_submission().unwrap();
        session.complete_submission(submission.ticket, Ok(GeneratedImage::from_png(vec![1])));
        assert_eq!(session.step(), WizardStep::Result);

        session.start_over();
        assert_eq!(session.step(), WizardStep::SelectCategory);
        assert_eq!(session.request(), &INITIAL_REQUEST);
        assert!(session.generated().is_none());
        assert_eq!(session.download().unwrap_err(), WizardError::NoResult);
    }

    #[test]
    fn test_back_keeps_collected_data() {
        let mut session = session_ready_to_submit();
        session.back().unwrap();
        assert_eq!(session.step(), WizardStep::SelectHuman);
        session.back().unwrap();
        assert_eq!(session.step(), WizardStep::SelectGarment);
        session.back().unwrap();
        assert_eq!(session.step(), WizardStep::SelectCategory);
        assert!(session.back().is_err());

        assert!(session.request().garment_image.is_some());
        assert!(session.request().human_image.is_some());
    }
}
