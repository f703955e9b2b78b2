//! Type system: descriptors, registries, basic types and resolution

pub mod adjustable;
pub mod basic_registry;
pub mod basic_type;
pub mod binary;
pub mod character;
pub mod configuration;
pub mod domain_registry;
pub mod domain_type;
pub mod indicators;
pub mod numeric;
pub mod resolver;
pub mod sql_registry;
pub mod sql_type;
pub mod standard;
pub mod temporal;
pub mod value;
pub mod version;

pub use adjustable::{resolve_indicated_type, AdjustableType};
pub use basic_registry::{BasicTypeRegistry, Registration};
pub use basic_type::{BasicType, BasicTypeRef, Resolution, StandardBasicType, TypeDescriptors};
pub use configuration::{TypeConfiguration, TypeConfigurationBuilder};
pub use domain_registry::DomainTypeRegistry;
pub use domain_type::{DomainTypeDescriptor, DomainTypeId};
pub use indicators::ResolutionIndicators;
pub use resolver::{resolve_attribute_type, AttributeTypeRequest};
pub use sql_registry::SqlTypeRegistry;
pub use sql_type::{ColumnRepr, SqlTypeCode, SqlTypeDescriptor};
pub use standard::StandardTypes;
pub use temporal::{resolve_temporal_precision, TemporalPrecision, TemporalType};
pub use value::{ColumnValue, Value};
pub use version::{Clock, FixedClock, SystemClock, VersionContext, VersionType};
