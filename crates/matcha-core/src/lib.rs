//! Matcha Core - composable structural matchers for test assertions
//!
//! This crate decides whether an actual value satisfies an expectation and,
//! when it does not, explains every point of mismatch:
//! - A runtime value model ([`Value`]) and the [`Inspect`] conversion from host types
//! - Expectations as literal values or matching rules ([`Expect`], [`Rule`])
//! - Primitive, modifier and composite matchers ([`matcher`])
//! - The equality dispatcher ([`equal`], [`evaluate`])
//! - The diagnostic record tree and its text rendering ([`record`], [`render`])
//!
//! ```
//! use matcha_core::prelude::*;
//!
//! let user = Value::structure("User")
//!     .field("ID", &7)
//!     .field("Name", "ann")
//!     .build();
//!
//! let rule = field_map_of(fields! {
//!     "ID" => be_int(),
//!     "Name" => "bob",
//! });
//!
//! let verdict = rule.evaluate(&user);
//! assert!(!verdict.is_match());
//! assert_eq!(verdict.records()[0].key, "Name");
//! ```

pub mod equal;
pub mod errors;
pub mod expect;
pub mod inspect;
pub mod logging_facility;
pub mod matcher;
pub mod record;
pub mod render;
pub mod value;

pub use matcha_core_types::schema;

// Re-export commonly used types
pub use equal::{equal, evaluate};
pub use errors::{ErrorKind, MatchaError, Result};
pub use expect::{expect, Expect, IntoExpect, Rule};
pub use inspect::Inspect;
pub use matcher::{Matcher, MatcherKind, Verdict};
pub use record::{Record, RecordCode};
pub use render::{render_record, render_report, sorted_by_key, RenderOptions};
pub use value::{FieldAccess, StructValue, Value, ValueKind};

/// Everything a test module usually needs.
pub mod prelude {
    pub use crate::equal::{equal, evaluate};
    pub use crate::expect::{expect, Expect, IntoExpect, Rule};
    pub use crate::inspect::Inspect;
    pub use crate::matcher::{
        be_any, be_bool, be_int, be_slice, be_string, be_struct, be_time, be_uuid, be_zero, email,
        field_map_of, negation, pointer_of, reg_exp, sequence_of, slice_len, Matcher, Verdict,
    };
    pub use crate::record::{Record, RecordCode};
    pub use crate::value::{FieldAccess, Value};
    pub use crate::{elements, fields, inspect_struct};
}
