//! # Attribute System
//!
//! Citation data arrives as loosely shaped key/value records: CSL-JSON items,
//! name parts, date parts. Rather than give each domain type its own struct
//! fields, they all sit on a shared attribute container, which provides:
//!
//! - **Storage**: [`Attributes`], a symbol-keyed map of JSON values that copies
//!   everything it stores
//! - **Merging**: [`MergeSource`], the shapes `merge` accepts (mappings, JSON
//!   text, other containers, `null`)
//! - **Capabilities**: [`AttributeValue`], what each value variant supports
//!   (deep copy, emptiness, projection)
//! - **Declared fields**: [`FieldTable`] and [`HasAttributes`], named
//!   reader/writer/predicate operations bound to individual keys
//!
//! ## Value Capabilities
//!
//! | Variant | Deep copy | Empty query | Projection |
//! |---------|-----------|-------------|------------|
//! | `null` | no | no | `null` |
//! | boolean | no | no | text (`"true"`) |
//! | number | no | no | text (`"42"`) |
//! | text | no | yes | itself |
//! | sequence | yes | yes | itself |
//! | mapping | yes | yes | itself |
//!
//! ## Usage
//!
//! ```ignore
//! let mut item = Attributes::try_create(r#"{"title": "On Computable Numbers"}"#)?;
//! item.merge(json!({ "issued": { "date-parts": [[1936]] } }))?;
//!
//! assert_eq!(item.deep_fetch(&["issued", "date-parts"]), Some(&json!([[1936]])));
//! let json = item.to_json()?;
//! ```

mod container;
mod fields;
mod key;
mod source;
mod spec;
mod value;

pub use container::Attributes;
pub use fields::{FieldTable, HasAttributes, Operation, Predicate, Reader, Writer};
pub use key::Key;
pub use source::MergeSource;
pub use spec::{method_name, FieldDescriptor, FieldSpec};
pub use value::{AttributeValue, FALSE_PATTERN};
