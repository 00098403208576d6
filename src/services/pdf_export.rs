//! 文档导出 - 业务能力层
//!
//! 把排版结果转成绘制指令，交给 `DocumentWriter` 生成文档

use std::sync::OnceLock;

use regex::Regex;
use tracing::debug;

use crate::error::ExportError;
use crate::infrastructure::PdfWriter;
use crate::models::QaRecord;
use crate::services::layout::{layout, LayoutConfig};

/// 文档写入能力
pub trait DocumentWriter {
    /// 设置后续文字的字号与粗细
    fn set_font(&mut self, size: f32, bold: bool);
    /// 从 (x, y) 开始逐行写入文字，坐标以页面左上角为原点
    fn text(&mut self, lines: &[String], x: f32, y: f32);
    /// 开始新的一页
    fn add_page(&mut self);
    /// 生成最终文档
    fn finish(self) -> Result<Vec<u8>, ExportError>;
}

/// 按页绘制记录
///
/// 第一页直接使用，之后每页先调用 `add_page`
pub fn render_document<W: DocumentWriter>(record: &QaRecord, config: &LayoutConfig, writer: &mut W) {
    let pages = layout(record, config);

    for (index, page) in pages.iter().enumerate() {
        if index > 0 {
            writer.add_page();
        }
        for block in &page.blocks {
            writer.set_font(config.font_size(block.kind), block.emphasis);
            writer.text(&block.lines, config.left_margin, block.y);
        }
    }

    debug!("文档绘制完成: {} 页", pages.len());
}

/// 生成 PDF 字节
pub fn export_pdf(record: &QaRecord, config: &LayoutConfig) -> Result<Vec<u8>, ExportError> {
    let title = format!("Interview Q&A: {}", record.role());
    let mut writer = PdfWriter::new(&title, config.page_width, config.page_height)?;
    render_document(record, config, &mut writer);
    writer.finish()
}

/// 导出文件名：`interview-qa-<role>.pdf`，空白序列替换为单个 `-` 并转小写
///
/// 路径分隔符和文件系统不允许的字符同样替换为 `-`
pub fn document_filename(role: &str) -> String {
    static WHITESPACE: OnceLock<Regex> = OnceLock::new();
    static UNSAFE_CHARS: OnceLock<Regex> = OnceLock::new();
    let whitespace = WHITESPACE.get_or_init(|| Regex::new(r"\s+").expect("valid whitespace pattern"));
    let unsafe_chars = UNSAFE_CHARS
        .get_or_init(|| Regex::new(r#"[/\\:*?"<>|\x00-\x1f]"#).expect("valid filename pattern"));

    let slug = whitespace.replace_all(role, "-").to_lowercase();
    format!("interview-qa-{}.pdf", unsafe_chars.replace_all(&slug, "-"))
}
