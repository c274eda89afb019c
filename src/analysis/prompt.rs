use super::types::UploadedImage;
use crate::llm::{ChatMessage, ContentPart};

/// Fixed instruction block sent ahead of the images. Specifies the
/// persona, the tone limits, and the exact JSON shape of the reply.
pub const ANALYSIS_PROMPT: &str = r#"你是一位眼光毒辣但内心善良的"人类行为观察家"。根据下面这组照片，对照片中的人做一份幽默的"危险人格鉴定报告"。

要求：
1. 语气犀利、搞笑、有网感，像好朋友之间的互相吐槽；
2. 不要人身攻击，不要涉及外貌缺陷、身材羞辱或敏感身份；
3. 只输出一个 JSON 对象，不要输出任何其他文字，也不要用代码块包裹；
4. JSON 格式严格如下：

{
  "danger_index": 0到5之间的一位小数,
  "danger_level": "危险等级的简短称号",
  "warning_message": "一句正式口吻的风险提示",
  "toxic_traits": [
    {"trait": "特质名", "roast": "对这个特质的吐槽"},
    {"trait": "特质名", "roast": "对这个特质的吐槽"},
    {"trait": "特质名", "roast": "对这个特质的吐槽"}
  ],
  "mbti_guess": {"type": "四个字母的MBTI类型", "roast": "对这个类型的吐槽"},
  "appearance_roast": "对整体造型和气质的善意吐槽",
  "survival_guide": "和这个人相处的生存指南"
}"#;

/// One multimodal user message: the instruction block first, then one
/// image part per upload, in upload order.
pub fn build_analysis_messages(images: &[UploadedImage]) -> Vec<ChatMessage> {
    let mut parts = Vec::with_capacity(images.len() + 1);
    parts.push(ContentPart::text(ANALYSIS_PROMPT));

    for image in images {
        parts.push(ContentPart::image_url(image.to_data_uri()));
    }

    vec![ChatMessage::user_parts(parts)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::MessageContent;
    use bytes::Bytes;
    use pretty_assertions::assert_eq;

    fn fake_image(mime: &str, data: &'static [u8]) -> UploadedImage {
        UploadedImage::new(mime, Bytes::from_static(data))
    }

    #[test]
    fn test_single_user_message() {
        let images = vec![fake_image("image/png", b"a"), fake_image("image/jpeg", b"b")];
        let messages = build_analysis_messages(&images);

        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].role, "user");
    }

    #[test]
    fn test_prompt_part_comes_first() {
        let images = vec![fake_image("image/png", b"a"), fake_image("image/png", b"b")];
        let messages = build_analysis_messages(&images);

        let MessageContent::Parts(parts) = &messages[0].content else {
            panic!("expected multimodal parts");
        };
        assert_eq!(parts.len(), 3);
        assert!(matches!(&parts[0], ContentPart::Text { text } if text == ANALYSIS_PROMPT));
    }

    #[test]
    fn test_image_parts_preserve_upload_order() {
        let images = vec![
            fake_image("image/png", b"first"),
            fake_image("image/jpeg", b"second"),
            fake_image("image/webp", b"third"),
        ];
        let messages = build_analysis_messages(&images);

        let MessageContent::Parts(parts) = &messages[0].content else {
            panic!("expected multimodal parts");
        };
        let uris: Vec<&str> = parts[1..]
            .iter()
            .map(|part| match part {
                ContentPart::ImageUrl { image_url } => image_url.url.as_str(),
                ContentPart::Text { .. } => panic!("unexpected text part"),
            })
            .collect();

        assert!(uris[0].starts_with("data:image/png;base64,"));
        assert!(uris[1].starts_with("data:image/jpeg;base64,"));
        assert!(uris[2].starts_with("data:image/webp;base64,"));
    }

    #[test]
    fn test_prompt_names_every_result_field() {
        for field in [
            "danger_index",
            "danger_level",
            "warning_message",
            "toxic_traits",
            "mbti_guess",
            "appearance_roast",
            "survival_guide",
        ] {
            assert!(ANALYSIS_PROMPT.contains(field), "prompt missing {}", field);
        }
    }
}
