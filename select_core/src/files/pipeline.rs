use futures_util::stream::{self, Stream, StreamExt, TryStreamExt};
use std::pin::Pin;
use std::sync::Arc;
use std::task::{ready, Context, Poll};
use tokio::sync::watch;
use tracing::{debug, warn};

use super::models::{FileHandle, UploadPolicy};
use super::validation::{beyond_maximal_size, is_allowed_file_type, ValidationError};
use crate::i18n::UploadText;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationState {
    Idle,
    Streaming,
    Completed,
    Failed,
}

/// Accept pattern, size cap and the message subscription used to word
/// rejections in the language active at the time of the failure.
#[derive(Debug, Clone)]
pub struct FileRules {
    accept: Option<String>,
    maximum_size_mb: Option<f64>,
    messages: watch::Receiver<Arc<UploadText>>,
}

impl FileRules {
    pub fn new(
        accept: Option<&str>,
        policy: &UploadPolicy,
        messages: watch::Receiver<Arc<UploadText>>,
    ) -> Self {
        Self {
            accept: accept.filter(|accept| !accept.is_empty()).map(str::to_string),
            maximum_size_mb: policy.maximum_size_mb,
            messages,
        }
    }

    pub fn check<F: FileHandle + ?Sized>(&self, file: &F) -> Result<(), ValidationError> {
        let accept = self.accept.as_deref();

        if !is_allowed_file_type(accept, file) {
            let accept = accept.unwrap_or_default();
            return Err(ValidationError::DisallowedFileType {
                message: self.text().not_allowed_file_type_msg(file.name(), accept),
                file_name: file.name().to_string(),
                accept: accept.to_string(),
            });
        }

        if beyond_maximal_size(file.size(), self.maximum_size_mb) {
            let maximum_size_mb = self.maximum_size_mb.unwrap_or_default();
            return Err(ValidationError::FileTooLarge {
                message: self
                    .text()
                    .beyond_maximal_file_size_msg(file.size(), maximum_size_mb),
                file_size: file.size(),
                maximum_size_mb,
            });
        }

        Ok(())
    }

    fn text(&self) -> Arc<UploadText> {
        self.messages.borrow().clone()
    }
}

/// Stream of validated files. Yields `Ok` for each accepted file in arrival
/// order; the first rejection is yielded as `Err` and ends the stream.
pub struct FileValidation<'a, F> {
    files: Pin<Box<dyn Stream<Item = F> + Send + 'a>>,
    rules: FileRules,
    state: ValidationState,
}

impl<'a, F: FileHandle + 'a> FileValidation<'a, F> {
    pub fn state(&self) -> ValidationState {
        self.state
    }

    /// Drains the stream, failing on the first rejection.
    pub async fn into_files(self) -> Result<Vec<F>, ValidationError> {
        self.try_collect().await
    }
}

impl<'a, F: FileHandle + 'a> Stream for FileValidation<'a, F> {
    type Item = Result<F, ValidationError>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();

        match this.state {
            ValidationState::Completed | ValidationState::Failed => return Poll::Ready(None),
            ValidationState::Idle => this.state = ValidationState::Streaming,
            ValidationState::Streaming => {}
        }

        let Some(file) = ready!(this.files.as_mut().poll_next(cx)) else {
            debug!("File validation completed");
            this.state = ValidationState::Completed;
            return Poll::Ready(None);
        };

        match this.rules.check(&file) {
            Ok(()) => {
                debug!(name = file.name(), size = file.size(), "File accepted");
                Poll::Ready(Some(Ok(file)))
            }
            Err(err) => {
                warn!(name = file.name(), size = file.size(), "File rejected: {}", err);
                this.state = ValidationState::Failed;
                Poll::Ready(Some(Err(err)))
            }
        }
    }
}

/// Validates every file of every batch in `source`, in order.
pub fn validate_files<'a, F, S>(
    source: S,
    accept: Option<&str>,
    policy: &UploadPolicy,
    messages: watch::Receiver<Arc<UploadText>>,
) -> FileValidation<'a, F>
where
    F: FileHandle + 'a,
    S: Stream<Item = Vec<F>> + Send + 'a,
{
    FileValidation {
        files: Box::pin(source.flat_map(stream::iter)),
        rules: FileRules::new(accept, policy, messages),
        state: ValidationState::Idle,
    }
}
