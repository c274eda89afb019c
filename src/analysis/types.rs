use base64::Engine;
use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// One uploaded image, held in memory for the duration of a single
/// request. Never persisted.
#[derive(Debug, Clone)]
pub struct UploadedImage {
    pub mime_type: String,
    pub bytes: Bytes,
}

impl UploadedImage {
    pub fn new(mime_type: impl Into<String>, bytes: Bytes) -> Self {
        Self {
            mime_type: mime_type.into(),
            bytes,
        }
    }

    /// Data URI for embedding the image in a multimodal message.
    pub fn to_data_uri(&self) -> String {
        let payload = base64::engine::general_purpose::STANDARD.encode(&self.bytes);
        format!("data:{};base64,{}", self.mime_type, payload)
    }
}

/// The roast the model is asked to produce. Every field is optional so a
/// reply that omits some of them still renders; a mistyped field is an
/// output-format error.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalysisResult {
    pub danger_index: Option<f64>,
    pub danger_level: Option<String>,
    pub warning_message: Option<String>,
    /// The prompt asks for three, but however many the model returns is
    /// what the caller gets.
    #[serde(default)]
    pub toxic_traits: Vec<ToxicTrait>,
    pub mbti_guess: Option<MbtiGuess>,
    pub appearance_roast: Option<String>,
    pub survival_guide: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToxicTrait {
    #[serde(rename = "trait")]
    pub trait_name: Option<String>,
    pub roast: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MbtiGuess {
    #[serde(rename = "type")]
    pub mbti_type: Option<String>,
    pub roast: Option<String>,
}
