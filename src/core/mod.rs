pub mod assembler;
pub mod builder;
pub mod derivation;
pub mod engine;
pub mod guard;
pub mod keys;
pub mod overrides;
pub mod projector;
pub mod reconcile;
pub mod table;

pub use crate::domain::model::{Category, Focus, Module, ModuleExport, ModuleId, Term};
pub use crate::domain::ports::{CurriculumSource, Storage};
pub use crate::utils::error::Result;
