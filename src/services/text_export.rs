//! 纯文本导出 - 业务能力层
//!
//! 负责剪贴板文本的生成与解析，以及终端上的结果展示

use std::sync::OnceLock;

use regex::Regex;

use crate::error::ExportError;
use crate::models::{QaItem, QaRecord, Section};

const HEADER_PREFIX: &str = "Interview Q&A for: ";
const DIVIDER_WIDTH: usize = 50;

fn divider() -> String {
    "=".repeat(DIVIDER_WIDTH)
}

/// 生成剪贴板文本
///
/// 每个分组独立编号，问答之间空一行
pub fn to_plain_text(record: &QaRecord) -> String {
    let mut text = format!("{}{}\n\n", HEADER_PREFIX, record.role());

    for (position, section) in Section::ALL.into_iter().enumerate() {
        if position > 0 {
            text.push('\n');
        }
        text.push_str(&divider());
        text.push('\n');
        text.push_str(section.banner());
        text.push('\n');
        text.push_str(&divider());
        text.push_str("\n\n");

        for (index, item) in record.section(section).iter().enumerate() {
            text.push_str(&format!("Q{}: {}\n", index + 1, item.question));
            text.push_str(&format!("A: {}\n\n", item.answer));
        }
    }

    text
}

/// 终端展示用的结果列表
pub fn render_display(record: &QaRecord) -> String {
    let mut out = String::new();
    for section in Section::ALL {
        out.push_str(section.title());
        out.push('\n');
        for (index, item) in record.section(section).iter().enumerate() {
            out.push_str(&format!("  Q{}: {}\n", index + 1, item.question));
            out.push_str(&format!("  A: {}\n\n", item.answer));
        }
    }
    out
}

fn question_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^Q(\d+): (.*)$").expect("valid question pattern"))
}

/// 正在解析的题目
struct Draft {
    question: String,
    answer: Option<String>,
    line: usize,
}

impl Draft {
    /// 空行并入当前题目或答案末尾
    fn absorb_blank_lines(&mut self, count: usize) {
        let target = match self.answer.as_mut() {
            Some(answer) => answer,
            None => &mut self.question,
        };
        target.push_str(&"\n".repeat(count));
    }
}

/// 题目之间固定的空行数
const ITEM_GAP: usize = 1;
/// 第二个分组前多出一行空行
const SECTION_GAP: usize = 2;

/// 题目结束时，超出固定间隔的空行属于答案本身
fn close_draft(draft: &mut Option<Draft>, pending_blank: usize, gap: usize) -> Option<Draft> {
    let mut closed = draft.take()?;
    closed.absorb_blank_lines(pending_blank.saturating_sub(gap));
    Some(closed)
}

/// 分组横幅由上下两条分隔线包围
#[derive(Clone, Copy, PartialEq, Eq)]
enum Cursor {
    Body,
    AwaitBanner,
    AwaitClosingDivider,
}

fn parse_error(line: usize, reason: impl Into<String>) -> ExportError {
    ExportError::Parse {
        line,
        reason: reason.into(),
    }
}

/// 解析后的各分组题目
#[derive(Default)]
struct Collected {
    technical: Vec<QaItem>,
    personal: Vec<QaItem>,
}

impl Collected {
    fn push(&mut self, section: Option<Section>, draft: Option<Draft>) -> Result<(), ExportError> {
        let Some(draft) = draft else {
            return Ok(());
        };
        let answer = draft
            .answer
            .ok_or_else(|| parse_error(draft.line, "题目缺少答案"))?;
        let item = QaItem::new(draft.question, answer);
        match section {
            Some(Section::Technical) => self.technical.push(item),
            Some(Section::Personal) => self.personal.push(item),
            None => return Err(parse_error(draft.line, "题目出现在分组之前")),
        }
        Ok(())
    }
}

/// 把 `to_plain_text` 的输出解析回 `QaRecord`
///
/// 只恢复内容，不保证格式；答案中不能出现以 `Q<n>: ` 或 `A: ` 开头的行。
/// 只按 `\n` 分行，`\r` 保留在内容中，因此不接受 CRLF 换行的文本。
pub fn parse_plain_text(text: &str) -> Result<QaRecord, ExportError> {
    let body = text.strip_suffix('\n').unwrap_or(text);
    let line_count = body.split('\n').count();
    let mut lines = body.split('\n').enumerate();

    let role = lines
        .next()
        .and_then(|(_, l)| l.strip_prefix(HEADER_PREFIX))
        .ok_or_else(|| parse_error(1, "缺少标题行"))?
        .to_string();

    let divider = divider();
    let mut collected = Collected::default();
    let mut section: Option<Section> = None;
    let mut draft: Option<Draft> = None;
    let mut cursor = Cursor::Body;
    let mut pending_blank = 0usize;

    for (index, line) in lines {
        let line_no = index + 1;

        match cursor {
            Cursor::AwaitBanner => {
                section = Some(
                    Section::ALL
                        .into_iter()
                        .find(|s| s.banner() == line)
                        .ok_or_else(|| parse_error(line_no, format!("未知分组: {}", line)))?,
                );
                cursor = Cursor::AwaitClosingDivider;
                continue;
            }
            Cursor::AwaitClosingDivider => {
                if line != divider {
                    return Err(parse_error(line_no, "分组名后缺少分隔线"));
                }
                cursor = Cursor::Body;
                pending_blank = 0;
                continue;
            }
            Cursor::Body => {}
        }

        if line == divider {
            collected.push(section, close_draft(&mut draft, pending_blank, SECTION_GAP))?;
            cursor = Cursor::AwaitBanner;
            continue;
        }

        if line.is_empty() {
            pending_blank += 1;
            continue;
        }

        if let Some(caps) = question_pattern().captures(line) {
            collected.push(section, close_draft(&mut draft, pending_blank, ITEM_GAP))?;
            draft = Some(Draft {
                question: caps[2].to_string(),
                answer: None,
                line: line_no,
            });
        } else if let Some(answer) = line.strip_prefix("A: ") {
            match draft.as_mut() {
                Some(d) if d.answer.is_none() => {
                    // 题目与答案之间没有固定空行
                    d.absorb_blank_lines(pending_blank);
                    d.answer = Some(answer.to_string());
                }
                _ => return Err(parse_error(line_no, "答案没有对应的题目")),
            }
        } else {
            // 续行：并入当前题目或答案
            let d = draft
                .as_mut()
                .ok_or_else(|| parse_error(line_no, format!("无法识别的行: {}", line)))?;
            let target = match d.answer.as_mut() {
                Some(answer) => answer,
                None => &mut d.question,
            };
            target.push_str(&"\n".repeat(pending_blank + 1));
            target.push_str(line);
        }
        pending_blank = 0;
    }

    if cursor != Cursor::Body {
        return Err(parse_error(line_count, "分组横幅不完整"));
    }
    collected.push(section, close_draft(&mut draft, pending_blank, ITEM_GAP))?;

    Ok(QaRecord::new(role, collected.technical, collected.personal))
}
