pub mod io;
pub mod models;
pub mod parsing;
pub mod properties;
pub mod render;

// Re-export key types for easier usage
pub use io::*;
pub use models::{DocumentProperties, Element};
pub use parsing::{
    BlockExtension, Dialect, ExtensionRegistry, IncludeError, LineCursor, MarkupParser,
    ParseContext, ParseOutcome, Preprocessor,
};
pub use properties::PropertiesError;
pub use render::{ConverterSettings, HtmlRenderer, HtmlToMarkupConverter};
