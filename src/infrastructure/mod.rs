pub mod pdf_writer;

pub use pdf_writer::PdfWriter;
