pub mod compiler;
pub mod definition;
pub mod example;

pub use compiler::FieldCompiler;
pub use definition::{
    BodyTarget, DisplayScope, FieldDefinition, FieldKind, FieldOption, RoutedRequest,
    RoutingDirective, ValueExtraction,
};
pub use example::extract_example;
