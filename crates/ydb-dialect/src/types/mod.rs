//! The YDB type system and the native <-> wire mapping.
//!
//! Parameters are classified from [`NativeValue`] into [`TypedValue`] with a
//! fixed precedence (see [`value_to_typed`]); only primitive types can be
//! declared. Result cells go the other way through [`typed_to_native`].
//!
//! | native            | declared as |
//! |-------------------|-------------|
//! | `Text`            | `Utf8`      |
//! | `Int/Uint/Float`  | `Uint32`    |
//! | `Bool`            | `Bool`      |
//! | `Date/Timestamp`  | `Timestamp` |

mod mapper;
mod native;
mod value;

pub use mapper::{type_keyword, typed_to_native, value_to_typed};
pub use native::{NativeValue, typed_param};
pub use value::{PrimitiveType, Type, TypeKind, TypedValue, Value};
