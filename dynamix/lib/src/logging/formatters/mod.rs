//! Built-in content formatters, one per media family.

mod binary;
mod form_data;
mod html;
mod json;
mod table;
mod text;
mod xml;
mod yaml;

pub use binary::{BinaryFormatter, DEFAULT_MAX_FILE_SIZE};
pub use form_data::FormDataFormatter;
pub use html::HtmlFormatter;
pub use json::JsonFormatter;
pub use table::CsvFormatter;
pub use text::TextFormatter;
pub use xml::XmlFormatter;
pub use yaml::YamlFormatter;
