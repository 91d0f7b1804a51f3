use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use jieba_rs::Jieba;
use regex::Regex;
use tracing::debug;

use crate::cache::NormalizationCache;
use crate::error::{Result, SimilarityError};

/// Bumped whenever a change to the rules below can alter a normalized string.
pub const RULESET_VERSION: u32 = 2;

lazy_static::lazy_static! {
    // `\w` here is the regex crate's Unicode class: Alphabetic, Mark,
    // Decimal_Number, Connector_Punctuation and Join_Control.
    static ref NON_WORD: Regex = Regex::new(r"[^\w\s]").expect("valid punctuation pattern");
    static ref SEGMENTER: Jieba = Jieba::new();
}

pub struct Tokenizer {
    cache: Option<Arc<NormalizationCache>>,
}

impl Tokenizer {
    pub fn new() -> Self {
        Self { cache: None }
    }

    /// Tokenizer that memoizes normalizations in `cache`.
    ///
    /// The cache may be shared with other tokenizers; it never changes what
    /// `normalize` returns.
    pub fn with_cache(cache: Arc<NormalizationCache>) -> Self {
        Self { cache: Some(cache) }
    }

    pub fn cache(&self) -> Option<&Arc<NormalizationCache>> {
        self.cache.as_ref()
    }

    /// Remove everything that is neither a word character nor whitespace
    fn strip_punctuation<'a>(&self, text: &'a str) -> std::borrow::Cow<'a, str> {
        NON_WORD.replace_all(text, "")
    }

    /// Split cleaned text into word tokens.
    ///
    /// The dictionary segmenter runs over the whole text with its HMM pass
    /// on, so unknown words are joined and Latin words stay whole. Whitespace
    /// comes back as its own tokens for `blank_filter` to drop.
    fn segment<'a>(&self, text: &'a str) -> Vec<&'a str> {
        SEGMENTER.cut(text, true)
    }

    /// Drop tokens that are blank once trimmed
    fn blank_filter<'a>(&self, tokens: Vec<&'a str>) -> Vec<&'a str> {
        tokens
            .into_iter()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .collect()
    }

    fn normalize_uncached(&self, text: &str) -> Result<String> {
        let cleaned = self.strip_punctuation(text);
        let cleaned = cleaned.trim();
        if cleaned.is_empty() {
            return Ok(String::new());
        }

        let tokens = panic::catch_unwind(AssertUnwindSafe(|| self.segment(cleaned))).map_err(
            |payload| {
                let message = payload
                    .downcast_ref::<&str>()
                    .map(|s| s.to_string())
                    .or_else(|| payload.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "segmenter panicked".to_string());
                SimilarityError::NormalizationFailure {
                    role: None,
                    message,
                }
            },
        )?;

        Ok(self.blank_filter(tokens).join(" "))
    }

    /// Normalize raw text into a space-joined token string.
    ///
    /// Empty and whitespace-only input yields an empty string without
    /// touching the segmenter.
    pub fn normalize(&self, text: &str) -> Result<String> {
        let Some(cache) = &self.cache else {
            return self.normalize_uncached(text);
        };

        if let Some(normalized) = cache.get(text) {
            debug!(chars = text.len(), "normalization cache hit");
            return Ok(normalized);
        }

        let normalized = self.normalize_uncached(text)?;
        cache.put(text.to_string(), normalized.clone());
        Ok(normalized)
    }

    /// Normalize and return the individual tokens
    pub fn analyze(&self, text: &str) -> Result<Vec<String>> {
        Ok(self
            .normalize(text)?
            .split(' ')
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect())
    }
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_punctuation() {
        let tokenizer = Tokenizer::new();
        let cleaned = tokenizer.strip_punctuation("Hello, World! 你好，世界。🎉 #tag@");
        assert_eq!(cleaned, "Hello World 你好世界 tag");
    }

    #[test]
    fn test_strip_keeps_combining_marks_and_digits() {
        let tokenizer = Tokenizer::new();
        // Devanagari vowel signs are combining marks
        assert_eq!(tokenizer.strip_punctuation("नमस्ते 42"), "नमस्ते 42");
        assert_eq!(tokenizer.strip_punctuation("snake_case"), "snake_case");
    }

    #[test]
    fn test_normalize_latin_text() -> Result<()> {
        let tokenizer = Tokenizer::new();
        let normalized = tokenizer.normalize("Hello, World!  This is a test.")?;
        assert_eq!(normalized, "Hello World This is a test");
        Ok(())
    }

    #[test]
    fn test_normalize_empty_and_whitespace() -> Result<()> {
        let tokenizer = Tokenizer::new();
        assert_eq!(tokenizer.normalize("")?, "");
        assert_eq!(tokenizer.normalize("   \t\n  ")?, "");
        assert_eq!(tokenizer.normalize("！？。，…🎉")?, "");
        Ok(())
    }

    #[test]
    fn test_normalize_chinese_punctuation() -> Result<()> {
        let tokenizer = Tokenizer::new();
        let normalized =
            tokenizer.normalize("你好！这是一个测试...包含逗号，分号；问号？还有引号'\"。")?;
        assert_eq!(normalized, "你好 这是 一个 测试 包含 逗号 分 号 问号 还有 引号");
        Ok(())
    }

    #[test]
    fn test_normalize_emoji_and_symbols() -> Result<()> {
        let tokenizer = Tokenizer::new();
        let normalized = tokenizer.normalize("🎉 今天是2023年10月1日，#国庆节# 快乐！@所有人")?;
        assert_eq!(normalized, "今天 是 2023 年 10 月 1 日 国庆节 快乐 所有人");
        Ok(())
    }

    #[test]
    fn test_normalize_mixed_scripts() -> Result<()> {
        let tokenizer = Tokenizer::new();
        let tokens = tokenizer.analyze("C语言是1972年由Bell Labs开发的；日本語の文字も含む；한국어도 포함된다.")?;

        assert!(tokens.iter().any(|t| t == "C语言"));
        assert!(tokens.iter().any(|t| t == "1972"));
        assert!(tokens.iter().any(|t| t == "Bell"));
        assert!(tokens.iter().any(|t| t == "Labs"));
        assert!(tokens.iter().all(|t| !t.trim().is_empty()));
        Ok(())
    }

    #[test]
    fn test_normalize_keeps_connectors_and_marks() -> Result<()> {
        let tokenizer = Tokenizer::new();
        assert_eq!(tokenizer.normalize("___")?.replace(' ', ""), "___");
        assert_eq!(tokenizer.normalize("\u{301}")?, "\u{301}");
        Ok(())
    }

    #[test]
    fn test_normalize_joins_unknown_words() -> Result<()> {
        let tokenizer = Tokenizer::new();
        let tokens = tokenizer.analyze("他来到了网易杭研大厦")?;
        assert!(tokens.iter().any(|t| t == "杭研"));
        Ok(())
    }

    #[test]
    fn test_normalize_single_character() -> Result<()> {
        let tokenizer = Tokenizer::new();
        assert_eq!(tokenizer.normalize("球")?, "球");
        assert_eq!(tokenizer.normalize("a")?, "a");
        Ok(())
    }

    #[test]
    fn test_normalize_is_idempotent() -> Result<()> {
        let tokenizer = Tokenizer::new();
        for text in [
            "The quick brown fox, jumps over the lazy dog.",
            "他每天早上都去公园跑步。",
            "C语言是1972年由Bell Labs开发的",
            "他来到了网易杭研大厦",
        ] {
            let once = tokenizer.normalize(text)?;
            let twice = tokenizer.normalize(&once)?;
            assert_eq!(once, twice);
        }
        Ok(())
    }

    #[test]
    fn test_cached_normalization_matches_uncached() -> Result<()> {
        let cache = Arc::new(NormalizationCache::new(8)?);
        let cached = Tokenizer::with_cache(cache.clone());
        let plain = Tokenizer::new();
        let text = "机器学习是人工智能的一个分支。";

        let first = cached.normalize(text)?;
        let second = cached.normalize(text)?;
        assert_eq!(first, second);
        assert_eq!(first, plain.normalize(text)?);

        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        Ok(())
    }
}
