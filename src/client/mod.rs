mod render;
mod resize;
mod session;

pub use render::render_result;
pub use resize::{JPEG_QUALITY, MAX_DIMENSION, shrink_image};
pub use session::{MIN_IMAGES, SOFT_CAP, UploadSession};

use crate::{
    Result,
    analysis::{AnalysisResult, UploadedImage},
    server::{ErrorEnvelope, IMAGE_FIELD, SuccessEnvelope},
};
use std::path::Path;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Generous enough for tens of seconds of model latency.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Cosmetic stage lines shown while a request is in flight. They advance
/// on a fixed timer and say nothing about real relay progress.
pub const PROGRESS_STAGES: &[&str] = &[
    "正在观察微表情...",
    "正在鉴定拍照姿势...",
    "正在分析穿搭品味...",
    "正在推算 MBTI...",
    "正在撰写鉴定报告...",
];

#[derive(Debug)]
pub enum AnalyzeOutcome {
    Roast(AnalysisResult),
    Rejected { status: u16, server_message: String },
}

pub struct RelayClient {
    http: reqwest::Client,
    base_url: String,
}

impl RelayClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// One multipart POST carrying the whole batch under the shared
    /// field name. Non-2xx replies come back as `Rejected` with the
    /// server's own message attached for diagnosis.
    pub async fn analyze(&self, images: &[UploadedImage]) -> Result<AnalyzeOutcome> {
        let mut form = reqwest::multipart::Form::new();
        for (i, image) in images.iter().enumerate() {
            let part = reqwest::multipart::Part::bytes(image.bytes.to_vec())
                .file_name(format!("photo-{}", i + 1))
                .mime_str(&image.mime_type)?;
            form = form.part(IMAGE_FIELD, part);
        }

        let response = self
            .http
            .post(format!("{}/api/analyze", self.base_url))
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            let envelope: SuccessEnvelope = response.json().await?;
            return Ok(AnalyzeOutcome::Roast(envelope.data));
        }

        let server_message = match response.json::<ErrorEnvelope>().await {
            Ok(envelope) => envelope.message,
            Err(_) => String::new(),
        };

        Ok(AnalyzeOutcome::Rejected {
            status: status.as_u16(),
            server_message,
        })
    }
}

/// User-facing message for a failed upload, keyed by HTTP status.
pub fn message_for_status(status: u16) -> &'static str {
    match status {
        413 => "图片太多或太大了，减少数量或压缩一下再试",
        504 => "模型思考太久了，稍后再试一次",
        500..=599 => "服务器出了点问题，可能是还没配置 API 密钥",
        _ => "分析失败了，请稍后重试",
    }
}

/// Guesses a MIME type from the file extension. Unknown extensions get a
/// non-image type so the relay's own validation has the final say.
pub fn mime_for_path(path: &Path) -> String {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default()
        .to_lowercase();

    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "webp" => "image/webp",
        "gif" => "image/gif",
        "heic" => "image/heic",
        _ => "application/octet-stream",
    }
    .to_string()
}

/// Prints the cosmetic stage lines until aborted. Kept apart from the
/// request lifecycle so it can never gate the real success or error
/// path; abort the handle when the request settles.
pub fn spawn_progress_printer() -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_millis(1800));
        for stage in PROGRESS_STAGES.iter().cycle() {
            interval.tick().await;
            eprintln!("{stage}");
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_status_mapping() {
        assert!(message_for_status(413).contains("压缩"));
        assert!(message_for_status(504).contains("太久"));
        assert!(message_for_status(500).contains("API 密钥"));
        assert!(message_for_status(502).contains("API 密钥"));
        assert!(message_for_status(404).contains("重试"));
        assert!(message_for_status(400).contains("重试"));
    }

    #[test]
    fn test_mime_for_path() {
        assert_eq!(mime_for_path(Path::new("a.PNG")), "image/png");
        assert_eq!(mime_for_path(Path::new("b.jpeg")), "image/jpeg");
        assert_eq!(mime_for_path(Path::new("c.webp")), "image/webp");
        assert_eq!(
            mime_for_path(Path::new("notes.txt")),
            "application/octet-stream"
        );
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = RelayClient::new("http://localhost:8080/").unwrap();
        assert_eq!(client.base_url, "http://localhost:8080");
    }
}
