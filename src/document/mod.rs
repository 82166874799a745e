/*!
 * Source and output documents.
 *
 * - `extractor`: Plain text out of a PDF
 * - `writer`: A Word document out of translated text
 */

pub use self::extractor::{PdfTextExtractor, TextExtractor};
pub use self::writer::{DocumentWriter, DocxWriter};

pub mod extractor;
pub mod writer;
