//! 分页排版引擎 - 业务能力层
//!
//! 把一条 `QaRecord` 排成固定高度的页面序列，供文档导出使用。
//!
//! 排版规则：
//! 1. 游标 `y` 从上边距开始，先放文档标题
//! 2. 每个分组标题、每道题目放置前检查剩余空间，不足则换页
//! 3. 答案紧跟题目放置，放置前不单独检查剩余空间
//! 4. 超过整页高度的块不会被拆分，允许溢出页面下边界

use serde::Deserialize;
use tracing::debug;

use crate::models::{QaRecord, Section};

/// 排版参数（单位: 毫米，`wrap_columns` 为正文字号下的字符格数）
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub page_height: f32,
    pub page_width: f32,
    pub top_margin: f32,
    pub left_margin: f32,
    pub line_height: f32,
    pub wrap_columns: usize,
    /// 放置标题或题目前，页面底部至少需要保留的空间
    pub reserve_for_header: f32,
    /// 每组问答之后的间距
    pub block_gap: f32,
    /// 两个分组之间的额外间距
    pub section_gap: f32,
    pub title_advance: f32,
    pub header_advance: f32,
    pub title_font_size: f32,
    pub section_font_size: f32,
    pub body_font_size: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            page_height: 297.0,
            page_width: 210.0,
            top_margin: 20.0,
            left_margin: 20.0,
            line_height: 7.0,
            wrap_columns: 95,
            reserve_for_header: 40.0,
            block_gap: 5.0,
            section_gap: 10.0,
            title_advance: 15.0,
            header_advance: 10.0,
            title_font_size: 18.0,
            section_font_size: 14.0,
            body_font_size: 10.0,
        }
    }
}

impl LayoutConfig {
    /// 超过该位置就必须换页
    fn break_threshold(&self) -> f32 {
        self.page_height - self.reserve_for_header
    }

    /// 块的字号
    pub fn font_size(&self, kind: BlockKind) -> f32 {
        match kind {
            BlockKind::Title => self.title_font_size,
            BlockKind::SectionHeader => self.section_font_size,
            BlockKind::Question | BlockKind::Answer => self.body_font_size,
        }
    }
}

/// 块的类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Title,
    SectionHeader,
    Question,
    Answer,
}

/// 块对应的原始题目位置
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemRef {
    pub section: Section,
    pub index: usize,
}

/// 页面上的一段文字
#[derive(Debug, Clone, PartialEq)]
pub struct TextBlock {
    pub kind: BlockKind,
    /// 是否加粗
    pub emphasis: bool,
    /// 第一行基线的纵坐标
    pub y: f32,
    pub lines: Vec<String>,
    /// 题目/答案块对应的题目，标题块为 `None`
    pub item: Option<ItemRef>,
}

impl TextBlock {
    /// 块占用的高度
    pub fn height(&self, line_height: f32) -> f32 {
        self.lines.len() as f32 * line_height
    }
}

/// 一页
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub blocks: Vec<TextBlock>,
}

/// 排版
///
/// 纯函数，可对同一条记录重复调用。结果至少包含一页。
pub fn layout(record: &QaRecord, config: &LayoutConfig) -> Vec<Page> {
    let mut cursor = PageCursor::new(config);

    cursor.place(
        BlockKind::Title,
        vec![format!("Interview Q&A: {}", record.role())],
        None,
    );
    cursor.advance(config.title_advance);

    for (position, section) in Section::ALL.into_iter().enumerate() {
        if position > 0 {
            cursor.advance(config.section_gap);
        }

        cursor.break_if_needed();
        cursor.place(
            BlockKind::SectionHeader,
            vec![section.title().to_string()],
            None,
        );
        cursor.advance(config.header_advance);

        for (index, item) in record.section(section).iter().enumerate() {
            let item_ref = Some(ItemRef { section, index });

            cursor.break_if_needed();

            let question = wrap_text(
                &format!("Q{}: {}", index + 1, item.question),
                config.wrap_columns,
            );
            let question_height = question.len() as f32 * config.line_height;
            cursor.place(BlockKind::Question, question, item_ref);
            cursor.advance(question_height);

            // 答案不单独检查剩余空间
            let answer = wrap_text(&format!("A: {}", item.answer), config.wrap_columns);
            let answer_height = answer.len() as f32 * config.line_height;
            cursor.place(BlockKind::Answer, answer, item_ref);
            cursor.advance(answer_height + config.block_gap);
        }
    }

    let pages = cursor.finish();
    debug!(
        "排版完成: {} 页, {} 道题",
        pages.len(),
        record.total_items()
    );
    pages
}

/// 排版游标
struct PageCursor<'a> {
    config: &'a LayoutConfig,
    pages: Vec<Page>,
    y: f32,
}

impl<'a> PageCursor<'a> {
    fn new(config: &'a LayoutConfig) -> Self {
        Self {
            config,
            pages: vec![Page::default()],
            y: config.top_margin,
        }
    }

    fn advance(&mut self, delta: f32) {
        self.y += delta;
    }

    fn break_if_needed(&mut self) {
        if self.y > self.config.break_threshold() {
            debug!("y={:.1} 超过 {:.1}，换页", self.y, self.config.break_threshold());
            self.pages.push(Page::default());
            self.y = self.config.top_margin;
        }
    }

    fn place(&mut self, kind: BlockKind, lines: Vec<String>, item: Option<ItemRef>) {
        let block = TextBlock {
            kind,
            emphasis: !matches!(kind, BlockKind::Title | BlockKind::Answer),
            y: self.y,
            lines,
            item,
        };
        if let Some(page) = self.pages.last_mut() {
            page.blocks.push(block);
        }
    }

    fn finish(self) -> Vec<Page> {
        self.pages
    }
}

/// 按字符格数折行
///
/// 先按换行符分段，段内按空白贪心断词；单个词超过宽度时按字符硬切。
/// 空文本也返回一行。
pub fn wrap_text(text: &str, columns: usize) -> Vec<String> {
    let columns = columns.max(1);
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let mut current = String::new();
        let mut current_len = 0;

        for word in paragraph.split_whitespace() {
            let word_len = word.chars().count();

            if current_len > 0 && current_len + 1 + word_len <= columns {
                current.push(' ');
                current.push_str(word);
                current_len += 1 + word_len;
                continue;
            }

            if current_len > 0 {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }

            if word_len <= columns {
                current.push_str(word);
                current_len = word_len;
            } else {
                let chars: Vec<char> = word.chars().collect();
                let mut chunks = chars.chunks(columns).peekable();
                while let Some(chunk) = chunks.next() {
                    if chunks.peek().is_some() {
                        lines.push(chunk.iter().collect());
                    } else {
                        current = chunk.iter().collect();
                        current_len = chunk.len();
                    }
                }
            }
        }

        lines.push(current);
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::QaItem;

    fn record_with(technical: usize, personal: usize, answer: &str) -> QaRecord {
        let items = |prefix: &str, n: usize| -> Vec<QaItem> {
            (0..n)
                .map(|i| QaItem::new(format!("{} question {}", prefix, i), answer))
                .collect()
        };
        QaRecord::new(
            "Software Engineer",
            items("tech", technical),
            items("personal", personal),
        )
    }

    fn item_blocks(pages: &[Page]) -> Vec<(BlockKind, ItemRef)> {
        pages
            .iter()
            .flat_map(|p| p.blocks.iter())
            .filter_map(|b| b.item.map(|i| (b.kind, i)))
            .collect()
    }

    #[test]
    fn test_wrap_text_greedy_words() {
        let lines = wrap_text("the quick brown fox jumps", 10);
        assert_eq!(lines, vec!["the quick", "brown fox", "jumps"]);
    }

    #[test]
    fn test_wrap_text_hard_splits_long_word() {
        let lines = wrap_text("abcdefghij xy", 4);
        assert_eq!(lines, vec!["abcd", "efgh", "ij", "xy"]);
    }

    #[test]
    fn test_wrap_text_keeps_explicit_newlines_and_empty_input() {
        assert_eq!(wrap_text("one\n\ntwo", 20), vec!["one", "", "two"]);
        assert_eq!(wrap_text("", 20), vec![""]);
    }

    #[test]
    fn test_small_record_fits_on_one_page() {
        let record = record_with(1, 1, "short");
        let pages = layout(&record, &LayoutConfig::default());
        assert_eq!(pages.len(), 1);

        let kinds: Vec<BlockKind> = pages[0].blocks.iter().map(|b| b.kind).collect();
        assert_eq!(
            kinds,
            vec![
                BlockKind::Title,
                BlockKind::SectionHeader,
                BlockKind::Question,
                BlockKind::Answer,
                BlockKind::SectionHeader,
                BlockKind::Question,
                BlockKind::Answer,
            ]
        );
        assert_eq!(pages[0].blocks[0].lines, vec!["Interview Q&A: Software Engineer"]);
        assert_eq!(pages[0].blocks[2].lines, vec!["Q1: tech question 0"]);
        assert_eq!(pages[0].blocks[3].lines, vec!["A: short"]);
        assert_eq!(pages[0].blocks[5].lines, vec!["Q1: personal question 0"]);
    }

    #[test]
    fn test_cursor_positions_follow_geometry() {
        let config = LayoutConfig::default();
        let record = record_with(2, 0, "short");
        let pages = layout(&record, &config);
        let ys: Vec<f32> = pages[0].blocks.iter().map(|b| b.y).collect();
        // 标题 20, 分组标题 35, Q1 45, A1 52, Q2 64, A2 71, 个人分组标题 93
        assert_eq!(ys, vec![20.0, 35.0, 45.0, 52.0, 64.0, 71.0, 93.0]);
    }

    #[test]
    fn test_emphasis_marks_questions_and_headers() {
        let pages = layout(&record_with(1, 0, "a"), &LayoutConfig::default());
        let emphasis: Vec<bool> = pages[0].blocks.iter().map(|b| b.emphasis).collect();
        assert_eq!(emphasis, vec![false, true, true, false, true]);
    }

    #[test]
    fn test_overflow_creates_pages_and_preserves_order() {
        let record = record_with(10, 5, &"detailed answer ".repeat(40));
        let pages = layout(&record, &LayoutConfig::default());
        assert!(pages.len() > 1);

        let blocks = item_blocks(&pages);
        assert_eq!(blocks.len(), record.total_items() * 2);

        let mut expected = Vec::new();
        for section in Section::ALL {
            for index in 0..record.section(section).len() {
                let item = ItemRef { section, index };
                expected.push((BlockKind::Question, item));
                expected.push((BlockKind::Answer, item));
            }
        }
        assert_eq!(blocks, expected);
    }

    #[test]
    fn test_new_page_restarts_at_top_margin() {
        let config = LayoutConfig::default();
        let record = record_with(10, 0, &"word ".repeat(60));
        let pages = layout(&record, &config);
        assert!(pages.len() > 1);
        for page in &pages[1..] {
            assert_eq!(page.blocks[0].y, config.top_margin);
            assert_eq!(page.blocks[0].kind, BlockKind::Question);
        }
    }

    #[test]
    fn test_oversized_item_is_not_split() {
        let config = LayoutConfig::default();
        let huge = "x ".repeat(config.wrap_columns * 60);
        let record = QaRecord::new("Role", vec![QaItem::new("Big one", huge)], vec![]);
        let pages = layout(&record, &config);

        let answers: Vec<&TextBlock> = pages
            .iter()
            .flat_map(|p| p.blocks.iter())
            .filter(|b| b.kind == BlockKind::Answer)
            .collect();
        assert_eq!(answers.len(), 1);
        assert!(answers[0].height(config.line_height) > config.page_height);
        assert_eq!(pages[0].blocks.iter().filter(|b| b.kind == BlockKind::Answer).count(), 1);
    }

    #[test]
    fn test_answer_is_never_checked_independently() {
        // 题目在阈值之前，答案越过页面下边界仍留在同一页
        let config = LayoutConfig {
            page_height: 100.0,
            reserve_for_header: 40.0,
            ..LayoutConfig::default()
        };
        let record = QaRecord::new(
            "Role",
            vec![QaItem::new("q", "long ".repeat(200))],
            vec![],
        );
        let pages = layout(&record, &config);
        let first = &pages[0];
        let last_question = first
            .blocks
            .iter()
            .rev()
            .find(|b| b.kind == BlockKind::Question)
            .unwrap();
        let answer = first.blocks.last().unwrap();
        assert_eq!(answer.kind, BlockKind::Answer);
        assert_eq!(answer.item, last_question.item);
        assert!(answer.y + answer.height(config.line_height) > config.page_height);
    }

    #[test]
    fn test_empty_record_has_title_and_both_headers() {
        let record = QaRecord::new("Role", vec![], vec![]);
        let pages = layout(&record, &LayoutConfig::default());
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].blocks.len(), 3);
    }
}
