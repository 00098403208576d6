//! PDF 写入器 - 基础设施层
//!
//! 持有 printpdf 文档，只暴露"写字 / 换页 / 生成字节"的能力。
//! 使用 PDF 内置的 Helvetica 与 Helvetica-Bold 字体，不嵌入字体文件。

use printpdf::{
    BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference,
};

use crate::error::ExportError;
use crate::services::pdf_export::DocumentWriter;

const MM_PER_POINT: f32 = 25.4 / 72.0;
/// 多行文字的行距系数（相对字号）
const LINE_HEIGHT_FACTOR: f32 = 1.15;
const LAYER_NAME: &str = "Content";

/// WinAnsi 编码 0x80–0x9F 区间可表示的字符
const WIN_ANSI_EXTRAS: &[char] = &[
    '€', '‚', 'ƒ', '„', '…', '†', '‡', 'ˆ', '‰', 'Š', '‹', 'Œ', 'Ž', '‘', '’', '“', '”', '•', '–',
    '—', '˜', '™', 'š', '›', 'œ', 'ž', 'Ÿ',
];

/// PDF 写入器
pub struct PdfWriter {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    page_width_mm: f32,
    page_height_mm: f32,
    font_size: f32,
    use_bold: bool,
    page_count: usize,
}

impl PdfWriter {
    /// 创建写入器，页面尺寸单位为毫米，初始即有一页
    pub fn new(title: &str, page_width_mm: f32, page_height_mm: f32) -> Result<Self, ExportError> {
        let (doc, page, layer) =
            PdfDocument::new(title, Mm(page_width_mm), Mm(page_height_mm), LAYER_NAME);
        let regular = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(document_error)?;
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(document_error)?;
        let layer = doc.get_page(page).get_layer(layer);

        Ok(Self {
            doc,
            layer,
            regular,
            bold,
            page_width_mm,
            page_height_mm,
            font_size: 10.0,
            use_bold: false,
            page_count: 1,
        })
    }

    pub fn page_count(&self) -> usize {
        self.page_count
    }
}

impl DocumentWriter for PdfWriter {
    fn set_font(&mut self, size: f32, bold: bool) {
        self.font_size = size;
        self.use_bold = bold;
    }

    fn text(&mut self, lines: &[String], x: f32, y: f32) {
        let font = if self.use_bold { &self.bold } else { &self.regular };
        let leading = self.font_size * LINE_HEIGHT_FACTOR * MM_PER_POINT;

        // printpdf 以左下角为原点
        for (index, line) in lines.iter().enumerate() {
            let baseline = self.page_height_mm - y - index as f32 * leading;
            self.layer
                .use_text(win_ansi_text(line), self.font_size, Mm(x), Mm(baseline), font);
        }
    }

    fn add_page(&mut self) {
        let (page, layer) = self
            .doc
            .add_page(Mm(self.page_width_mm), Mm(self.page_height_mm), LAYER_NAME);
        self.layer = self.doc.get_page(page).get_layer(layer);
        self.page_count += 1;
    }

    fn finish(self) -> Result<Vec<u8>, ExportError> {
        self.doc.save_to_bytes().map_err(document_error)
    }
}

fn document_error(err: impl std::fmt::Display) -> ExportError {
    ExportError::Document(err.to_string())
}

/// 内置字体只能显示 WinAnsi 字符，其余字符替换为 `?`，制表符视为空格
fn win_ansi_text(text: &str) -> String {
    text.chars()
        .filter_map(|c| match c {
            '\t' => Some(' '),
            c if c.is_control() => None,
            ' '..='~' | '\u{a0}'..='\u{ff}' => Some(c),
            c if WIN_ANSI_EXTRAS.contains(&c) => Some(c),
            _ => Some('?'),
        })
        .collect()
}
