pub mod document_properties;
pub mod element;

pub use document_properties::DocumentProperties;
pub use element::Element;
