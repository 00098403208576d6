pub mod layout;
pub mod pdf_export;
pub mod platform;
pub mod text_export;

pub use layout::{layout, BlockKind, LayoutConfig, Page, TextBlock};
pub use pdf_export::{document_filename, export_pdf, render_document, DocumentWriter};
pub use platform::{Clipboard, DirectorySaver, FileSaver, MemoryClipboard, SystemClipboard};
pub use text_export::{parse_plain_text, render_display, to_plain_text};
