//! Compile-time settings and built-in content.

/// Local storage key holding the persisted persona preference.
pub const STORAGE_KEY: &str = "mvp-hanbox";

// Target length slider
pub const LENGTH_MIN: u32 = 80;
pub const LENGTH_MAX: u32 = 600;
pub const LENGTH_STEP: u32 = 20;
pub const DEFAULT_LENGTH: u32 = 200;

/// Rewritten passages are never cut shorter than this many characters.
pub const REWRITE_FLOOR: usize = 120;

/// Characters of the passage quoted in the first question.
pub const QUESTION_SNIPPET_CHARS: usize = 36;

pub const EXPORT_FILE_PREFIX: &str = "材料匯出";
pub const EXPORT_MIME: &str = "text/plain;charset=utf-8";
pub const EXPORT_SEPARATOR: &str = "\n\n---\n\n";

pub const PERSONAS: [&str; 4] = [
    "溫暖耐心的AI助教（生活化例子、多示範）",
    "學術精準的語言學助教（定義清楚、有對比）",
    "活潑互動的課堂助教（提問式引導）",
    "嚴謹條列的考試輔導（題型化、可評量）",
];

pub const DEFAULT_PERSONA: &str = PERSONAS[0];

pub const NATIVE_LANGUAGES: [&str; 7] = ["中文", "日文", "韓文", "西文", "越南文", "泰文", "其他"];

pub const DEFAULT_NATIVE_LANGUAGE: &str = "中文";
pub const DEFAULT_TOPIC: &str = "颱風";
pub const DEFAULT_GRAMMAR_POINT: &str = "⋯是什麼？";

/// Sample typhoon dialogue, used as the default question passage and by the
/// lesson "load sample" action.
pub const SAMPLE_DIALOGUE: &str = "小明：老師，今天的天氣很不好。\n\
老師：對，今天有颱風。颱風來了，要小心。\n\
小明：颱風是什麼？\n\
老師：颱風就是很大的風和雨。\n\
小明：哦，我明白了。我們今天還要上課嗎？\n\
老師：今天不上課，大家在家要注意安全。";

/// Sample reference passage for the rewrite form.
pub const SAMPLE_REWRITE_SOURCE: &str = "花蓮有颱風，大雨很多。水和泥沙流下來，房子、車子都壞了。很多人都很害怕。\n\
志工拿著鏟子，幫忙清理家園。大家叫他們「鏟子超人」。志工有學生、老師、爸爸媽媽，也有外地人。大家說「加油」，一起工作。\n\
這裡的居民很努力，他們說：「謝謝你們來花蓮。」";

/// Clamp a slider reading into the supported target length range.
pub fn clamp_length(value: u32) -> u32 {
    value.clamp(LENGTH_MIN, LENGTH_MAX)
}

/// Parse a raw slider value; unparsable input yields `None`.
pub fn clamp_length_input(raw: &str) -> Option<u32> {
    raw.trim().parse::<u32>().ok().map(clamp_length)
}
