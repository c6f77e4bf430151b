pub mod collection;
pub mod error;
pub mod field;
pub mod record;
pub mod registry;

pub use collection::{Catalog, Collection, CollectionId};
pub use error::CoreError;
pub use field::{FieldValue, parse_date, parse_number};
pub use record::Record;
pub use registry::{Accessor, FieldDescriptor, FieldKind, FieldRegistry};
