pub mod tool;
pub mod registry;
pub mod validate;
pub mod executor;
pub mod normalize;
pub mod probe;
pub mod tools;

pub use tool::{Tool, ToolDefinition};
pub use registry::{RegistryError, ToolRegistry};
pub use executor::{
    ExecutionResult, FnBackend, KaggleBackend, KaggleCli, KaggleOperation, OperationClass,
    RecordingBackend, StaticBackend,
};
pub use probe::{validate_credentials, ProbeStatus};
pub use tools::default_registry;
