// Document rendering: record → ordered blocks → .docx package.
// Block rendering is pure; packaging is byte-deterministic.

pub mod blocks;
pub mod cover_letter;
pub mod cv;
pub mod docx;

pub use blocks::{Block, Document};
pub use cover_letter::render_cover_letter;
pub use cv::render_cv;
