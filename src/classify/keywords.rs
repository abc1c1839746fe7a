//! Built-in relevance keyword lists
//!
//! Keywords are grouped by language and matched case-insensitively as
//! substrings of profile text. The default set targets AI and machine
//! learning accounts; deployments can extend it through
//! `classifier.extra-keywords` without touching these lists.

/// English keywords: core concepts, model families, vendors, and applications
pub const ENGLISH: &[&str] = &[
    // Core concepts
    "AI",
    "Artificial Intelligence",
    "Machine Learning",
    "Deep Learning",
    "ML",
    "DL",
    "Neural Network",
    "Transformer",
    // Large models
    "LLM",
    "Large Language Model",
    "GPT",
    "Claude",
    "Gemini",
    "Grok",
    "ChatGPT",
    "DeepSeek",
    "Llama",
    "Mistral",
    "OpenAI",
    "Anthropic",
    "Codex",
    // Technical areas
    "NLP",
    "Natural Language Processing",
    "Computer Vision",
    "CV",
    "Agent",
    "AI Agent",
    "Robotics",
    "Reinforcement Learning",
    "Generative AI",
    "Gen AI",
    "AGI",
    "Prompt Engineering",
    // Companies and products
    "Google AI",
    "Meta AI",
    "DeepMind",
    "Stability AI",
    "Midjourney",
    "Stable Diffusion",
    "DALL-E",
    // Applications
    "Data Science",
    "MLOps",
    "AI Research",
    "AI Safety",
    "Autonomous",
    "Automation",
];

/// Simplified Chinese keywords
pub const CHINESE: &[&str] = &[
    "人工智能",
    "AI",
    "机器学习",
    "深度学习",
    "大模型",
    "大语言模型",
    "LLM",
    "GPT",
    "Claude",
    "ChatGPT",
    "通义",
    "文心",
    "智谱",
    "百川",
    "月之暗面",
    "数据科学",
    "自然语言处理",
    "计算机视觉",
    "强化学习",
    "生成式AI",
    "Agent",
    "智能体",
];

/// Japanese keywords
pub const JAPANESE: &[&str] = &[
    "AI",
    "人工知能",
    "機械学習",
    "深層学習",
    "LLM",
    "GPT",
    "ChatGPT",
    "データサイエンス",
];

/// Returns every built-in keyword across all languages
///
/// The lists overlap (several Latin-script terms appear in more than one
/// language group); callers that need a unique set should dedup after
/// normalizing case.
pub fn builtin_keywords() -> impl Iterator<Item = &'static str> {
    ENGLISH
        .iter()
        .chain(CHINESE.iter())
        .chain(JAPANESE.iter())
        .copied()
}
