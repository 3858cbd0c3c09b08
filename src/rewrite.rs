//! Line reassembly: translate the Chinese spans of each comment and
//! substitute them back into the line.
//!
//! A span whose translation fails is left untouched; the failure is logged
//! with its file, line number and original text, and counted in the report.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::ops::AddAssign;
use std::path::Path;

use crate::cache::CacheManager;
use crate::scan::{LineChunks, chinese_spans};
use crate::translation::{TranslationRequest, Translator};
use crate::ui::{Spinner, Style};
use crate::{status, warn};

/// Per-run settings for the rewriter.
#[derive(Debug, Clone)]
pub struct RewriteOptions {
    pub from: String,
    pub to: String,
    pub marker: String,
    pub chunk_size: usize,
}

/// Counters for one file (or, summed, for a batch).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FileReport {
    pub lines: usize,
    pub spans: usize,
    pub translated: usize,
    pub cached: usize,
    pub failed: usize,
}

impl AddAssign for FileReport {
    fn add_assign(&mut self, other: Self) {
        self.lines += other.lines;
        self.spans += other.spans;
        self.translated += other.translated;
        self.cached += other.cached;
        self.failed += other.failed;
    }
}

/// A Chinese span found during a scan-only pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpanHit {
    pub line_no: usize,
    pub span: String,
}

/// Rewrites lines by translating the Chinese spans in their comment text.
pub struct Rewriter<'a, T: Translator + ?Sized> {
    translator: &'a T,
    cache: Option<&'a CacheManager>,
    options: &'a RewriteOptions,
}

impl<'a, T: Translator + ?Sized> Rewriter<'a, T> {
    pub const fn new(translator: &'a T, options: &'a RewriteOptions) -> Self {
        Self {
            translator,
            cache: None,
            options,
        }
    }

    #[must_use]
    pub fn with_cache(mut self, cache: &'a CacheManager) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Reads and rewrites a whole file, returning its lines in order.
    pub async fn rewrite_file(&self, path: &Path) -> Result<(Vec<String>, FileReport)> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open input file: {}", path.display()))?;
        let label = path.display().to_string();

        self.rewrite_reader(BufReader::new(file), &label).await
    }

    /// Rewrites every line from `reader`. `label` names the source in logs.
    pub async fn rewrite_reader<R: BufRead>(
        &self,
        reader: R,
        label: &str,
    ) -> Result<(Vec<String>, FileReport)> {
        let mut report = FileReport::default();
        let mut output = Vec::new();

        for batch in LineChunks::new(reader, self.options.chunk_size) {
            let batch = batch.with_context(|| format!("Failed to read {label}"))?;
            for line in batch {
                report.lines += 1;
                let rewritten = self
                    .rewrite_line(&line, label, report.lines, &mut report)
                    .await;
                output.push(rewritten);
            }
        }

        Ok((output, report))
    }

    /// Rewrites a single line. Lines without Chinese comment text come back
    /// unchanged.
    pub async fn rewrite_line(
        &self,
        line: &str,
        label: &str,
        line_no: usize,
        report: &mut FileReport,
    ) -> String {
        let spans = unique_in_order(chinese_spans(line, &self.options.marker));
        if spans.is_empty() {
            return line.to_string();
        }

        status!("{} {}", Style::line_number(line_no), line.trim());

        let mut substitutions = Vec::with_capacity(spans.len());
        for span in spans {
            report.spans += 1;
            match self.translate_span(span).await {
                Ok((translated, from_cache)) => {
                    if from_cache {
                        report.cached += 1;
                    }
                    status!(
                        "    {} ----> {}{}",
                        Style::source(span),
                        Style::value(&translated),
                        if from_cache {
                            Style::secondary(" (cached)")
                        } else {
                            String::new()
                        }
                    );
                    substitutions.push((span, translated));
                }
                Err(e) => {
                    report.failed += 1;
                    warn!("{label}:{line_no}: failed to translate '{span}', left as is: {e:#}");
                }
            }
        }

        // Longest spans first; a shorter span may occur inside a longer one
        substitutions.sort_by_key(|(span, _)| std::cmp::Reverse(span.chars().count()));

        let mut rewritten = line.to_string();
        for (span, translated) in &substitutions {
            rewritten = rewritten.replace(span, translated);
        }
        report.translated += substitutions.len();

        rewritten
    }

    async fn translate_span(&self, span: &str) -> Result<(String, bool)> {
        let request = TranslationRequest::new(span, &self.options.from, &self.options.to);

        if let Some(cache) = self.cache {
            match cache.get(&request) {
                Ok(Some(cached)) => return Ok((cached, true)),
                Ok(None) => {}
                Err(e) => warn!("Cache lookup failed: {e:#}"),
            }
        }

        let spinner = Spinner::new(&format!("Translating {span}..."));
        let result = self.translator.translate(&request).await;
        spinner.stop();
        let translated = result?;

        if let Some(cache) = self.cache
            && let Err(e) = cache.put(&request, &translated)
        {
            warn!("Cache write failed: {e:#}");
        }

        Ok((translated, false))
    }
}

/// Lists the Chinese spans of a file without translating anything.
pub fn scan_file(path: &Path, options: &RewriteOptions) -> Result<Vec<SpanHit>> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open input file: {}", path.display()))?;

    let mut hits = Vec::new();
    let mut line_no = 0;
    for batch in LineChunks::new(BufReader::new(file), options.chunk_size) {
        let batch = batch.with_context(|| format!("Failed to read {}", path.display()))?;
        for line in batch {
            line_no += 1;
            hits.extend(
                chinese_spans(&line, &options.marker)
                    .into_iter()
                    .map(|span| SpanHit {
                        line_no,
                        span: span.to_string(),
                    }),
            );
        }
    }

    Ok(hits)
}

fn unique_in_order(spans: Vec<&str>) -> Vec<&str> {
    let mut unique: Vec<&str> = Vec::with_capacity(spans.len());
    for span in spans {
        if !unique.contains(&span) {
            unique.push(span);
        }
    }
    unique
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::io::Cursor;
    use std::sync::Mutex;
    use tempfile::TempDir;

    /// Translates from a fixed table and records every request.
    struct TableTranslator {
        table: HashMap<&'static str, &'static str>,
        calls: Mutex<Vec<String>>,
    }

    impl TableTranslator {
        fn new(entries: &[(&'static str, &'static str)]) -> Self {
            Self {
                table: entries.iter().copied().collect(),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Translator for TableTranslator {
        async fn translate(&self, request: &TranslationRequest) -> Result<String> {
            self.calls.lock().unwrap().push(request.source_text.clone());
            self.table
                .get(request.source_text.as_str())
                .map(ToString::to_string)
                .ok_or_else(|| anyhow::anyhow!("no entry for {}", request.source_text))
        }
    }

    fn options() -> RewriteOptions {
        RewriteOptions {
            from: "zh".to_string(),
            to: "en".to_string(),
            marker: "//".to_string(),
            chunk_size: 10_000,
        }
    }

    async fn rewrite(translator: &TableTranslator, line: &str) -> (String, FileReport) {
        let options = options();
        let rewriter = Rewriter::new(translator, &options);
        let mut report = FileReport::default();
        let out = rewriter.rewrite_line(line, "test", 1, &mut report).await;
        (out, report)
    }

    #[tokio::test]
    async fn test_print_result_example() {
        let translator = TableTranslator::new(&[("打印结果", "Print result")]);

        let (out, report) = rewrite(&translator, "// 打印结果 print result\n").await;

        assert_eq!(out, "// Print result print result\n");
        assert_eq!(report.spans, 1);
        assert_eq!(report.translated, 1);
        assert_eq!(translator.calls(), vec!["打印结果"]);
    }

    #[tokio::test]
    async fn test_two_spans_replaced_independently() {
        let translator = TableTranslator::new(&[("你好", "Hi"), ("再见", "Bye")]);

        let (out, report) = rewrite(&translator, "    x(); // hello 你好 world 再见\n").await;

        assert_eq!(out, "    x(); // hello Hi world Bye\n");
        assert_eq!(report.translated, 2);
        assert_eq!(translator.calls(), vec!["你好", "再见"]);
    }

    #[tokio::test]
    async fn test_span_contained_in_later_span() {
        let translator =
            TableTranslator::new(&[("中文", "Chinese"), ("中文注释", "Chinese comment")]);

        let (out, report) = rewrite(&translator, "// 中文 和 中文注释\n").await;

        assert_eq!(out, "// Chinese 和 Chinese comment\n");
        assert_eq!(report.spans, 3);
        assert_eq!(report.translated, 2);
        assert_eq!(report.failed, 1);
        assert_eq!(translator.calls(), vec!["中文", "和", "中文注释"]);
    }

    #[tokio::test]
    async fn test_line_without_marker_passes_through() {
        let translator = TableTranslator::new(&[("你好", "Hi")]);

        let (out, report) = rewrite(&translator, "let s = \"你好\";\n").await;

        assert_eq!(out, "let s = \"你好\";\n");
        assert_eq!(report, FileReport::default());
        assert!(translator.calls().is_empty());
    }

    #[tokio::test]
    async fn test_replacement_covers_whole_line() {
        let translator = TableTranslator::new(&[("你好", "Hi")]);

        let (out, _) = rewrite(&translator, "say(\"你好\"); // 你好\n").await;

        assert_eq!(out, "say(\"Hi\"); // Hi\n");
    }

    #[tokio::test]
    async fn test_repeated_span_translated_once() {
        let translator = TableTranslator::new(&[("注意", "Note")]);

        let (out, report) = rewrite(&translator, "// 注意: a, 注意: b\n").await;

        assert_eq!(out, "// Note: a, Note: b\n");
        assert_eq!(report.spans, 1);
        assert_eq!(translator.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_failed_span_left_unchanged() {
        let translator = TableTranslator::new(&[("你好", "Hi")]);

        let (out, report) = rewrite(&translator, "// 你好 未知\n").await;

        assert_eq!(out, "// Hi 未知\n");
        assert_eq!(report.translated, 1);
        assert_eq!(report.failed, 1);
    }

    #[tokio::test]
    async fn test_rewrite_reader_preserves_line_count_across_chunks() {
        let translator = TableTranslator::new(&[("中文", "Chinese")]);
        let mut options = options();
        options.chunk_size = 8;
        let rewriter = Rewriter::new(&translator, &options);

        let input = "fn a() {}\n// 中文\nfn b() {}\n// plain\n// 中文 again";
        let (lines, report) = rewriter
            .rewrite_reader(Cursor::new(input), "test")
            .await
            .unwrap();

        assert_eq!(lines.len(), 5);
        assert_eq!(report.lines, 5);
        assert_eq!(
            lines.concat(),
            "fn a() {}\n// Chinese\nfn b() {}\n// plain\n// Chinese again"
        );
    }

    #[tokio::test]
    async fn test_cache_hit_skips_translator() {
        let temp_dir = TempDir::new().unwrap();
        let cache = CacheManager::open(temp_dir.path().join("cache.db"), "table").unwrap();
        cache
            .put(&TranslationRequest::new("打印结果", "zh", "en"), "Print result")
            .unwrap();

        let translator = TableTranslator::new(&[]);
        let options = options();
        let rewriter = Rewriter::new(&translator, &options).with_cache(&cache);
        let mut report = FileReport::default();

        let out = rewriter
            .rewrite_line("// 打印结果\n", "test", 1, &mut report)
            .await;

        assert_eq!(out, "// Print result\n");
        assert_eq!(report.cached, 1);
        assert!(translator.calls().is_empty());
    }

    #[tokio::test]
    async fn test_successful_translation_is_cached() {
        let temp_dir = TempDir::new().unwrap();
        let cache = CacheManager::open(temp_dir.path().join("cache.db"), "table").unwrap();
        let translator = TableTranslator::new(&[("你好", "Hi")]);
        let options = options();
        let rewriter = Rewriter::new(&translator, &options).with_cache(&cache);
        let mut report = FileReport::default();

        rewriter.rewrite_line("// 你好\n", "test", 1, &mut report).await;
        rewriter.rewrite_line("// 你好\n", "test", 2, &mut report).await;

        assert_eq!(translator.calls().len(), 1);
        assert_eq!(report.translated, 2);
        assert_eq!(report.cached, 1);
    }

    #[test]
    fn test_scan_file_lists_spans_with_line_numbers() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("main.rs");
        std::fs::write(&path, "fn main() {\n    // 打印结果\n    run(); // 你好 再见\n}\n").unwrap();

        let hits = scan_file(&path, &options()).unwrap();

        assert_eq!(
            hits,
            vec![
                SpanHit { line_no: 2, span: "打印结果".to_string() },
                SpanHit { line_no: 3, span: "你好".to_string() },
                SpanHit { line_no: 3, span: "再见".to_string() },
            ]
        );
    }

    #[test]
    fn test_report_add_assign() {
        let mut total = FileReport::default();
        total += FileReport { lines: 3, spans: 2, translated: 1, cached: 0, failed: 1 };
        total += FileReport { lines: 1, spans: 1, translated: 1, cached: 1, failed: 0 };
        assert_eq!(
            total,
            FileReport { lines: 4, spans: 3, translated: 2, cached: 1, failed: 1 }
        );
    }
}
