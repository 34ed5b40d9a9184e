//! Instructions and response schema sent with a plan request.

use jiff::civil::{Date, Weekday};
use serde_json::{json, Value};

use crate::models::MarketingInput;

/// Framework and case names the model reasons with but must never print.
pub const FORBIDDEN_TERMS: &[&str] = &[
    "JTBD",
    "Jobs-to-be-Done",
    "ODI",
    "Outcome-Driven Innovation",
    "馬斯洛",
    "奶昔案例",
    "安東尼·烏爾威克",
    "鑽孔理論",
];

/// Style preamble wrapped around every image prompt.
pub const IMAGE_STYLE_PREAMBLE: &str =
    "High quality professional social media visual, commercial photography style";

/// The Monday the calendar starts on: the first Monday strictly after `today`.
pub fn next_monday(today: Date) -> Date {
    let days_ahead = 7 - i64::from(today.weekday().to_monday_zero_offset());
    today
        .checked_add(jiff::Span::new().days(days_ahead))
        .unwrap_or(today)
}

fn weekday_label(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Monday => "星期一",
        Weekday::Tuesday => "星期二",
        Weekday::Wednesday => "星期三",
        Weekday::Thursday => "星期四",
        Weekday::Friday => "星期五",
        Weekday::Saturday => "星期六",
        Weekday::Sunday => "星期日",
    }
}

/// Behavioural rules: persona, research scope, output language, forbidden
/// vocabulary and the per-week content layout.
pub fn system_instruction(input: &MarketingInput) -> String {
    format!(
        "你是一位世界級的社群行銷策略家。\n\
         【任務程序】\n\
         1. 深入研究「{industry}」領域近 3 年的行銷議題與成功案例。\n\
         2. 案例比重：70% 來自台灣地區的品牌與社群帳號，30% 為國際案例。\n\
         3. 所有規劃都必須符合台灣相關法令規範。\n\
         \n\
         【思考框架（僅供內化，輸出中嚴禁提及名稱）】\n\
         - 以用戶想完成的任務與期望成果為核心，而非產品規格。\n\
         - 以成果驅動的創新流程檢視每一則內容。\n\
         - 依需求層級定位受眾的心理動機。\n\
         \n\
         【內容產出規則】\n\
         - 第 1 週為準備週：提供 Markdown 格式的深度人物誌表格（背景、核心目標、預期成果、阻礙、心理需求），以及品牌價值定位策略。第 1 週不產出貼文。\n\
         - 第 2 至 12 週為貼文週：每週 1 篇 FB 貼文（約 300 字）與 1 篇 IG 貼文（約 150 字）。\n\
         - 創意風格：{style}。\n\
         - 計畫從最近的下一個星期一開始，每篇貼文需標註日期（date）與星期幾（dayOfWeek）。\n\
         - 每一篇貼文的結尾都必須原封不動附上以下聯絡資訊作為行動呼籲：\n{contact}\n\
         - 每篇貼文提供一段簡短的英文 imagePrompt 描述配圖畫面，並附上 hashtags。\n\
         - 全部內容必須使用繁體中文撰寫。\n\
         - 【絕對禁令】輸出中不可出現以下文字：{forbidden}。請將其內化為專業的商業建議。\n\
         - 只輸出符合指定 JSON 結構的內容，不要加入任何其他文字。",
        industry = input.industry.trim(),
        style = input.style.label(),
        contact = input.contact_info,
        forbidden = FORBIDDEN_TERMS.join("、"),
    )
}

/// The user turn: every form field, with fallbacks for the optional
/// reference pairs.
pub fn user_prompt(input: &MarketingInput, start: Date) -> String {
    let brand = if input.brand_name.trim().is_empty() {
        "（未提供）"
    } else {
        input.brand_name.trim()
    };
    let target = if input.target_brand_name.trim().is_empty() {
        "自動蒐集業內領先者"
    } else {
        input.target_brand_name.trim()
    };
    let creator = if input.favorite_creator_name.trim().is_empty() {
        "自動蒐集相關風格創作者"
    } else {
        input.favorite_creator_name.trim()
    };

    format!(
        "【行銷參數設定】\n\
         - 產業類型：{industry}\n\
         - 品牌名稱：{brand}\n\
         - 創意風格：{style}\n\
         - 主要受眾：{audience}\n\
         - 戰略目標：{goal}\n\
         - 核心重點：{focus}\n\
         - 對標品牌/帳號：{target} ({target_url})\n\
         - 喜愛的創作者：{creator} ({creator_url})\n\
         - 計畫起始日：{start}（{weekday}）\n\
         \n\
         請根據以上參數，為我打造一份為期 12 週的社群行銷計畫，weekNumber 依序為 1 到 12。",
        industry = input.industry.trim(),
        style = input.style.label(),
        audience = input.audience.label(),
        goal = input.marketing_goal.label(),
        focus = input.strategy_focus.label(),
        target_url = input.target_brand_url.trim(),
        creator_url = input.favorite_creator_url.trim(),
        weekday = weekday_label(start.weekday()),
    )
}

/// Strict response schema in the Gemini `responseSchema` dialect.
pub fn response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "weeks": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "weekNumber": { "type": "INTEGER" },
                        "startDate": { "type": "STRING" },
                        "prepPhase": {
                            "type": "OBJECT",
                            "properties": {
                                "persona": {
                                    "type": "STRING",
                                    "description": "Markdown 格式的人物誌分析表格"
                                },
                                "brandPositioning": {
                                    "type": "STRING",
                                    "description": "品牌定位與價值觀建議"
                                }
                            }
                        },
                        "posts": {
                            "type": "ARRAY",
                            "items": {
                                "type": "OBJECT",
                                "properties": {
                                    "date": { "type": "STRING" },
                                    "dayOfWeek": { "type": "STRING" },
                                    "platform": { "type": "STRING", "enum": ["FB", "IG"] },
                                    "content": { "type": "STRING" },
                                    "imagePrompt": { "type": "STRING" },
                                    "hashtags": { "type": "ARRAY", "items": { "type": "STRING" } }
                                },
                                "required": ["platform", "content", "imagePrompt", "hashtags"]
                            }
                        }
                    },
                    "required": ["weekNumber", "startDate"]
                }
            }
        },
        "required": ["weeks"]
    })
}

/// Wraps a post's image prompt with the fixed style preamble.
pub fn image_prompt(prompt: &str) -> String {
    format!("{IMAGE_STYLE_PREAMBLE}, {}", prompt.trim())
}

/// Forbidden terms that appear in `text`.
pub fn forbidden_terms_in(text: &str) -> Vec<&'static str> {
    FORBIDDEN_TERMS
        .iter()
        .copied()
        .filter(|term| text.contains(term))
        .collect()
}
