//! Template formatters for lessons, rewrites and comprehension questions.
//!
//! All three are pure and total: any request produces a string.

use crate::config::{QUESTION_SNIPPET_CHARS, REWRITE_FLOOR};
use crate::model::{LessonRequest, MaterialType, QuestionRequest, RewriteRequest};

/// Returned by [`rewrite_lesson`] when there is nothing to rewrite.
pub const EMPTY_SOURCE_PROMPT: &str = "請貼上參考文字。";

/// Appended to a rewrite that was cut short.
pub const ELLIPSIS: &str = "……";

pub fn generate_lesson(req: &LessonRequest) -> String {
    let header = format!(
        "【等級】{}｜【字體】{}｜【母語】{}｜【長度】約{}字｜【類型】{}｜【主題】{}",
        req.level,
        req.script,
        req.native_language,
        req.target_length,
        req.material_type,
        req.topic
    );
    let grammar = req.grammar_point.as_str();
    let grammar_line = if grammar.is_empty() {
        String::new()
    } else {
        format!("\n【文法點】{grammar}")
    };

    let body = match req.material_type {
        MaterialType::Dialogue => dialogue_body(req),
        MaterialType::Article => article_body(req),
    };

    format!("{header}{grammar_line}\n\n{body}")
}

fn dialogue_body(req: &LessonRequest) -> String {
    let topic = &req.topic;
    let practice = if req.grammar_point.is_empty() {
        format!("「{topic}」")
    } else {
        format!("「{topic}」＋「{}」", req.grammar_point)
    };

    [
        format!("老師：今天我們要講「{topic}」。"),
        format!("學生：老師，{topic}是什麼？"),
        format!(
            "老師：用最簡單的方式說，{topic}就是⋯（{}，用容易理解的例子說明）。",
            req.persona
        ),
        format!("學生：好，我試試看用{practice}造句。"),
    ]
    .join("\n")
}

fn article_body(req: &LessonRequest) -> String {
    let topic = &req.topic;
    let focus = if req.grammar_point.is_empty() {
        String::new()
    } else {
        format!("本課聚焦文法：「{}」。", req.grammar_point)
    };

    format!(
        "{topic}和我們的生活有關。先理解關鍵詞，再在情境裡使用。{focus}\n\
         接著，請閱讀下文並畫出重點：\n\n\
         （本文）{topic}常在下列情境中出現⋯（以{}程度撰寫，{}的語氣）。",
        req.level, req.persona
    )
}

/// Condense pasted text to roughly the requested length.
///
/// The cut is by character count and never goes below [`REWRITE_FLOOR`],
/// whatever `target_length` says.
pub fn rewrite_lesson(req: &RewriteRequest) -> String {
    let trimmed = req.source_text.trim();
    if trimmed.is_empty() {
        return EMPTY_SOURCE_PROMPT.to_string();
    }

    let prefix = format!(
        "【改寫到{}｜類型：{}｜約{}字｜語氣：{}】",
        req.level, req.material_type, req.target_length, req.persona
    );

    let collapsed = trimmed.split_whitespace().collect::<Vec<_>>().join(" ");
    let limit = REWRITE_FLOOR.max(req.target_length as usize);

    let body = match collapsed.char_indices().nth(limit) {
        Some((cut, _)) => format!("{}{ELLIPSIS}", &collapsed[..cut]),
        None => collapsed,
    };

    format!("{prefix}\n\n{body}")
}

/// Six fixed prompts, one per Bloom level. Only the first one quotes the
/// passage.
pub fn generate_questions(req: &QuestionRequest) -> String {
    let base = req
        .passage
        .chars()
        .take(QUESTION_SNIPPET_CHARS)
        .collect::<String>()
        .replace('\n', " ");

    [
        format!("記憶（Remember）：請用自己的話說明「{base}…」在說什麼。"),
        "理解（Understand）：找出文中的三個關鍵詞並解釋。".to_string(),
        "應用（Apply）：用課文句型造一個和你生活有關的句子。".to_string(),
        "分析（Analyze）：找出文中一個因果關係並說明。".to_string(),
        "評估（Evaluate）：你同意文中的觀點嗎？為什麼？".to_string(),
        "創造（Create）：用同一個主題，寫一段三句的新對話。".to_string(),
    ]
    .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CefrLevel;

    fn is_speaker_turn(line: &str) -> bool {
        line.starts_with("老師：") || line.starts_with("學生：")
    }

    fn rewrite_body(output: &str) -> &str {
        output.split_once("\n\n").map(|(_, body)| body).unwrap()
    }

    fn rewrite_of(source: &str, target_length: u32) -> String {
        rewrite_lesson(&RewriteRequest {
            source_text: source.to_string(),
            target_length,
            ..RewriteRequest::default()
        })
    }

    #[test]
    fn dialogue_has_four_turns_and_repeats_topic() {
        let req = LessonRequest {
            topic: "在餐廳點餐".to_string(),
            ..LessonRequest::default()
        };
        let lesson = generate_lesson(&req);

        let turns = lesson.lines().filter(|l| is_speaker_turn(l)).count();
        assert_eq!(turns, 4);
        assert!(lesson.matches("在餐廳點餐").count() >= 2);
    }

    #[test]
    fn dialogue_final_turn_carries_grammar_point() {
        let lesson = generate_lesson(&LessonRequest::default());
        let last = lesson.lines().last().unwrap();
        assert_eq!(last, "學生：好，我試試看用「颱風」＋「⋯是什麼？」造句。");
    }

    #[test]
    fn dialogue_without_grammar_closes_quote_on_topic() {
        let req = LessonRequest {
            grammar_point: String::new(),
            ..LessonRequest::default()
        };
        let lesson = generate_lesson(&req);
        assert!(!lesson.contains("【文法點】"));
        assert!(!lesson.contains('＋'));
        assert!(lesson.ends_with("用「颱風」造句。"));
    }

    #[test]
    fn header_lists_every_setting() {
        let req = LessonRequest {
            level: CefrLevel::B1,
            target_length: 420,
            ..LessonRequest::default()
        };
        let lesson = generate_lesson(&req);
        let header = lesson.lines().next().unwrap();
        assert_eq!(
            header,
            "【等級】B1｜【字體】繁體中文｜【母語】中文｜【長度】約420字｜【類型】對話｜【主題】颱風"
        );
        assert_eq!(lesson.lines().nth(1).unwrap(), "【文法點】⋯是什麼？");
    }

    #[test]
    fn article_has_body_stub_and_no_turns() {
        let req = LessonRequest {
            material_type: MaterialType::Article,
            persona: "嚴謹條列的考試輔導".to_string(),
            ..LessonRequest::default()
        };
        let lesson = generate_lesson(&req);

        assert!(lesson.contains("（本文）颱風"));
        assert!(lesson.contains("以A1程度撰寫，嚴謹條列的考試輔導的語氣"));
        assert!(lesson.contains("本課聚焦文法：「⋯是什麼？」。"));
        assert_eq!(lesson.lines().filter(|l| is_speaker_turn(l)).count(), 0);
    }

    #[test]
    fn article_without_grammar_skips_focus_sentence() {
        let req = LessonRequest {
            material_type: MaterialType::Article,
            grammar_point: String::new(),
            ..LessonRequest::default()
        };
        let lesson = generate_lesson(&req);
        assert!(!lesson.contains("本課聚焦文法"));
        assert!(lesson.contains("再在情境裡使用。\n接著"));
    }

    #[test]
    fn target_length_never_limits_lesson() {
        let req = LessonRequest {
            target_length: 1,
            topic: "很長的主題".repeat(40),
            ..LessonRequest::default()
        };
        assert!(generate_lesson(&req).chars().count() > 200);
    }

    #[test]
    fn empty_or_blank_source_returns_prompt() {
        assert_eq!(rewrite_of("", 200), EMPTY_SOURCE_PROMPT);
        assert_eq!(rewrite_of(" \n\t　", 600), EMPTY_SOURCE_PROMPT);
    }

    #[test]
    fn short_source_is_kept_whole_under_floor() {
        let source = "A".repeat(50);
        let output = rewrite_of(&source, 80);
        assert_eq!(rewrite_body(&output), source);
        assert!(!output.contains(ELLIPSIS));
    }

    #[test]
    fn long_source_is_cut_at_floor() {
        let output = rewrite_of(&"A".repeat(500), 80);
        assert_eq!(rewrite_body(&output), format!("{}{ELLIPSIS}", "A".repeat(120)));
    }

    #[test]
    fn long_source_is_cut_at_target_above_floor() {
        let output = rewrite_of(&"A".repeat(500), 300);
        let body = rewrite_body(&output);
        assert_eq!(body.trim_end_matches(ELLIPSIS).len(), 300);
        assert!(body.ends_with(ELLIPSIS));
    }

    #[test]
    fn exact_fit_has_no_ellipsis() {
        let output = rewrite_of(&"A".repeat(120), 80);
        assert_eq!(rewrite_body(&output), "A".repeat(120));
    }

    #[test]
    fn rewrite_counts_characters_not_bytes() {
        let output = rewrite_of(&"颱".repeat(130), 80);
        let body = rewrite_body(&output);
        assert_eq!(body.trim_end_matches(ELLIPSIS).chars().count(), 120);
        assert!(body.ends_with(ELLIPSIS));
    }

    #[test]
    fn rewrite_collapses_whitespace() {
        let output = rewrite_of("  花蓮有颱風，\n\n大雨   很多。\t", 200);
        assert_eq!(rewrite_body(&output), "花蓮有颱風， 大雨 很多。");
    }

    #[test]
    fn rewrite_prefix_names_settings() {
        let req = RewriteRequest {
            source_text: "短文".to_string(),
            level: CefrLevel::C1,
            material_type: MaterialType::Dialogue,
            target_length: 260,
            persona: "溫暖".to_string(),
        };
        assert_eq!(
            rewrite_lesson(&req),
            "【改寫到C1｜類型：對話｜約260字｜語氣：溫暖】\n\n短文"
        );
    }

    #[test]
    fn always_six_questions() {
        for passage in ["", "短", &"長".repeat(500), "第一行\n第二行\n第三行"] {
            let questions = generate_questions(&QuestionRequest {
                passage: passage.to_string(),
            });
            assert_eq!(questions.split('\n').count(), 6, "passage: {passage:?}");
        }
    }

    #[test]
    fn first_question_quotes_passage_snippet() {
        let passage = format!("{}\n{}", "一".repeat(20), "二".repeat(40));
        let questions = generate_questions(&QuestionRequest { passage });
        let first = questions.lines().next().unwrap();
        let expected = format!("「{} {}…」", "一".repeat(20), "二".repeat(15));
        assert!(first.contains(&expected), "{first}");
    }

    #[test]
    fn remaining_questions_ignore_passage() {
        let a = generate_questions(&QuestionRequest {
            passage: "颱風".to_string(),
        });
        let b = generate_questions(&QuestionRequest {
            passage: "地震".to_string(),
        });
        assert_eq!(a.lines().skip(1).collect::<Vec<_>>(), b.lines().skip(1).collect::<Vec<_>>());
    }
}
