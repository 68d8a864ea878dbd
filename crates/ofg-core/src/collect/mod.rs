pub mod operation;
pub mod resource;

pub use operation::OperationCollector;
pub use resource::ResourceCollector;
