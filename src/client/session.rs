use crate::analysis::{AnalysisResult, UploadedImage};

/// UI-layer soft cap on the working list. The relay enforces its own
/// limits and remains the authority.
pub const SOFT_CAP: usize = 5;

/// Minimum batch size checked locally before any network call.
pub const MIN_IMAGES: usize = 2;

/// Working list of selected images plus the last analysis result.
#[derive(Debug, Default)]
pub struct UploadSession {
    images: Vec<UploadedImage>,
    result: Option<AnalysisResult>,
}

impl UploadSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an image. Returns false (and drops the image) once the
    /// soft cap is reached.
    pub fn add_image(&mut self, image: UploadedImage) -> bool {
        if self.images.len() >= SOFT_CAP {
            return false;
        }
        self.images.push(image);
        true
    }

    pub fn images(&self) -> &[UploadedImage] {
        &self.images
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Enough images selected to submit.
    pub fn ready(&self) -> bool {
        self.images.len() >= MIN_IMAGES
    }

    pub fn set_result(&mut self, result: AnalysisResult) {
        self.result = Some(result);
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        self.result.as_ref()
    }

    /// Back to the upload view: clears the working list and any result.
    pub fn reset(&mut self) {
        self.images.clear();
        self.result = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use pretty_assertions::assert_eq;

    fn fake_image() -> UploadedImage {
        UploadedImage::new("image/png", Bytes::from_static(b"x"))
    }

    #[test]
    fn test_not_ready_below_minimum() {
        let mut session = UploadSession::new();
        assert!(!session.ready());

        session.add_image(fake_image());
        assert!(!session.ready());

        session.add_image(fake_image());
        assert!(session.ready());
    }

    #[test]
    fn test_soft_cap_refuses_sixth_image() {
        let mut session = UploadSession::new();
        for _ in 0..SOFT_CAP {
            assert!(session.add_image(fake_image()));
        }

        assert!(!session.add_image(fake_image()));
        assert_eq!(session.len(), SOFT_CAP);
    }

    #[test]
    fn test_reset_clears_images_and_result() {
        let mut session = UploadSession::new();
        session.add_image(fake_image());
        session.add_image(fake_image());
        session.set_result(AnalysisResult {
            danger_index: Some(4.0),
            danger_level: None,
            warning_message: None,
            toxic_traits: vec![],
            mbti_guess: None,
            appearance_roast: None,
            survival_guide: None,
        });

        session.reset();

        assert!(session.is_empty());
        assert!(session.result().is_none());
        assert!(!session.ready());
    }
}
