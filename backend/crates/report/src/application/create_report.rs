//! Create Report Use Case
//!
//! Classifies the uploaded photo, then stores the report for its owner in
//! one transaction.

use std::sync::Arc;

use auth::UserRepository;
use kernel::db::Store;
use kernel::error::app_error::AppResult;
use kernel::id::UserId;

use crate::domain::classifier::ImageClassifier;
use crate::domain::entity::report::{Location, NewReport, Report};
use crate::domain::repository::ReportRepository;
use crate::domain::value_object::uploaded_image::UploadedImage;

/// Create report input
#[derive(Debug)]
pub struct CreateReportInput {
    pub user_id: UserId,
    pub note: String,
    pub address: String,
    pub location: Location,
    pub image: UploadedImage,
}

/// Create report use case
pub struct CreateReportUseCase<S, C>
where
    S: Store,
    S::Executor: UserRepository + ReportRepository,
    C: ImageClassifier,
{
    store: Arc<S>,
    classifier: Arc<C>,
}

impl<S, C> CreateReportUseCase<S, C>
where
    S: Store,
    S::Executor: UserRepository + ReportRepository,
    C: ImageClassifier,
{
    pub fn new(store: Arc<S>, classifier: Arc<C>) -> Self {
        Self { store, classifier }
    }

    /// Classification failures keep their own kind and happen before any
    /// write. The owner lookup and the insert commit together.
    pub async fn execute(&self, input: CreateReportInput) -> AppResult<Report> {
        const OP: &str = "CreateReportUseCase::execute";

        let classification = self.classifier.classify(input.image).await?;

        let user_id = input.user_id;
        let new_report = NewReport {
            user_id,
            image_url: classification.image_url,
            classes: classification.classes,
            note: input.note,
            address: input.address,
            location: input.location,
        };

        let report = self
            .store
            .transaction(OP, move |tx| {
                Box::pin(async move {
                    let owner = tx.get(user_id).await?;
                    let mut report = ReportRepository::create(&mut *tx, new_report).await?;
                    report.reporter_name = owner.name;
                    Ok(report)
                })
            })
            .await?;

        tracing::info!(report_id = %report.id, user_id = %user_id, "Report created");

        Ok(report)
    }
}
