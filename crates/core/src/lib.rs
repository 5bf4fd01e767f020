//! Lowering of discovery API methods into render-ready request views.
//!
//! [`generate`] walks a [`DiscoveryDocument`] interface by interface, builds
//! one [`RequestView`] per method with [`RequestViewBuilder`] and positions it
//! as an [`OutputUnit`] with [`FileAssembler`]. Rendering the units is left
//! to the caller.

pub mod assemble;
pub mod config;
pub mod error;
pub mod model;
pub mod naming;
pub mod pipeline;
pub mod request;
pub mod symbol_table;
pub mod type_resolver;
pub mod view;

pub use assemble::{CORE_IMPORTS, FileAssembler, sort_output_units};
pub use config::{
    FeatureConfig, FieldConfig, FlatteningGroup, GeneratorConfig, MethodConfig, OutputConfig,
    ResourceNameTreatment,
};
pub use error::GeneratorError;
pub use model::{DiscoveryDocument, FieldModel, FieldType, Method, MethodModel, Primitive};
pub use naming::{JavaNamer, Name, Namer};
pub use pipeline::{generate, generate_parallel};
pub use request::RequestViewBuilder;
pub use symbol_table::SymbolTable;
pub use type_resolver::{ResolvedType, TypeResolver};
pub use view::{
    FieldView, FileHeader, ImportEntry, OutputUnit, RequestView, ResourceNameParamView,
};
