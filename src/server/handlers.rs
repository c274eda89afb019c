use super::IMAGE_FIELD;
use super::types::{ErrorEnvelope, StatusResponse, SuccessEnvelope};
use crate::{
    Error, Result,
    analysis::{self, AnalysisResult, UploadedImage},
    config::UploadConfig,
    llm::{ChatCompletionRequest, LlmClient},
};
use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::Json,
};
use std::sync::Arc;
use tracing::{error, info};

#[derive(Clone)]
pub struct AppState {
    pub llm: Arc<dyn LlmClient>,
    pub upload: UploadConfig,
}

pub async fn health() -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "ok".to_string(),
        message: "照骗鉴定服务运行中".to_string(),
    })
}

pub async fn analyze(
    State(state): State<AppState>,
    multipart: Multipart,
) -> std::result::Result<Json<SuccessEnvelope>, (StatusCode, Json<ErrorEnvelope>)> {
    match run_analysis(&state, multipart).await {
        Ok(result) => Ok(Json(SuccessEnvelope::new(result))),
        Err(e) => {
            error!("Analysis request failed: {}", e);
            Err(error_response(e))
        }
    }
}

async fn run_analysis(state: &AppState, mut multipart: Multipart) -> Result<AnalysisResult> {
    let images = collect_images(&mut multipart, &state.upload).await?;

    info!(
        "Relaying batch of {} images ({} bytes total) to the model",
        images.len(),
        images.iter().map(|i| i.bytes.len()).sum::<usize>()
    );

    let request = ChatCompletionRequest {
        messages: analysis::build_analysis_messages(&images),
        temperature: None,
        max_tokens: None,
    };

    // A single attempt; malformed output or upstream failure is surfaced
    // to the caller, never retried.
    let response = state.llm.create_chat_completion(request).await?;

    let reply = response
        .first_content()
        .ok_or_else(|| Error::llm("Model reply contained no text content"))?;

    analysis::parse_analysis(reply)
}

async fn collect_images(
    multipart: &mut Multipart,
    limits: &UploadConfig,
) -> Result<Vec<UploadedImage>> {
    let mut images = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| Error::validation(format!("上传内容读取失败: {}", e)))?
    {
        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }

        let mime_type = field.content_type().unwrap_or_default().to_string();
        if !mime_type.starts_with("image/") {
            return Err(Error::validation(format!(
                "只支持图片文件，收到的文件类型是 {}",
                if mime_type.is_empty() {
                    "未知"
                } else {
                    mime_type.as_str()
                }
            )));
        }

        let bytes = field
            .bytes()
            .await
            .map_err(|e| Error::validation(format!("上传内容读取失败: {}", e)))?;
        if bytes.len() > limits.max_file_bytes {
            return Err(Error::validation(format!(
                "单张图片大小不能超过 {}",
                human_size(limits.max_file_bytes)
            )));
        }

        images.push(UploadedImage::new(mime_type, bytes));
    }

    if images.len() < limits.min_files {
        return Err(Error::validation(format!(
            "请至少上传 {} 张照片",
            limits.min_files
        )));
    }
    if images.len() > limits.max_files {
        return Err(Error::validation(format!(
            "最多只能上传 {} 张照片",
            limits.max_files
        )));
    }

    Ok(images)
}

/// Renders a byte limit in the largest unit that divides it evenly, so
/// sub-MB caps never collapse to "0 MB".
fn human_size(bytes: usize) -> String {
    const MIB: usize = 1024 * 1024;
    const KIB: usize = 1024;

    if bytes >= MIB && bytes % MIB == 0 {
        format!("{} MB", bytes / MIB)
    } else if bytes >= KIB && bytes % KIB == 0 {
        format!("{} KB", bytes / KIB)
    } else {
        format!("{} 字节", bytes)
    }
}

fn error_response(err: Error) -> (StatusCode, Json<ErrorEnvelope>) {
    match err {
        Error::Validation(message) => (StatusCode::BAD_REQUEST, Json(ErrorEnvelope::new(message))),
        Error::OutputFormat { raw } => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorEnvelope::new("AI output format could not be parsed").with_raw(raw)),
        ),
        other => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorEnvelope::new(format!("internal server error: {}", other))),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_human_size_units() {
        assert_eq!(human_size(10 * 1024 * 1024), "10 MB");
        assert_eq!(human_size(1024 * 1024), "1 MB");
        assert_eq!(human_size(512 * 1024), "512 KB");
        assert_eq!(human_size(1024), "1 KB");
        assert_eq!(human_size(1500), "1500 字节");
        assert_eq!(human_size(100), "100 字节");
    }
}
