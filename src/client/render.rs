use crate::analysis::AnalysisResult;
use std::fmt::Write;

/// Terminal rendering of the roast report. Absent fields are simply
/// skipped; the relay guarantees the shape, not the completeness.
pub fn render_result(result: &AnalysisResult) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "========== 危险人格鉴定报告 ==========");

    if let Some(index) = result.danger_index {
        let _ = writeln!(out, "危险指数: {:.1} / 5.0", index);
    }
    if let Some(level) = &result.danger_level {
        let _ = writeln!(out, "危险等级: {}", level);
    }
    if let Some(warning) = &result.warning_message {
        let _ = writeln!(out, "风险提示: {}", warning);
    }

    if !result.toxic_traits.is_empty() {
        let _ = writeln!(out, "\n-- 毒点鉴定 --");
        for trait_entry in &result.toxic_traits {
            let name = trait_entry.trait_name.as_deref().unwrap_or("???");
            let roast = trait_entry.roast.as_deref().unwrap_or("");
            let _ = writeln!(out, "· {}: {}", name, roast);
        }
    }

    if let Some(mbti) = &result.mbti_guess {
        let _ = writeln!(
            out,
            "\nMBTI 盲猜: {} — {}",
            mbti.mbti_type.as_deref().unwrap_or("????"),
            mbti.roast.as_deref().unwrap_or("")
        );
    }
    if let Some(appearance) = &result.appearance_roast {
        let _ = writeln!(out, "造型点评: {}", appearance);
    }
    if let Some(guide) = &result.survival_guide {
        let _ = writeln!(out, "生存指南: {}", guide);
    }

    out
}
