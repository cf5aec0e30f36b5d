//! Conversion of host values into [`Value`].

use chrono::{DateTime, Utc};
use std::rc::Rc;
use std::sync::Arc;
use uuid::Uuid;

use crate::value::{StructValue, Value};

/// Turns a host value into the engine's [`Value`] model.
///
/// Shared references are transparent. `Box`, `Rc`, `Arc` and `Some(_)` become
/// [`Value::Ref`]; `None` becomes [`Value::Nil`]. This mirrors pointer
/// semantics: a field declared as `Option<String>` holds a *reference* to a
/// string, so it only matches `be_string().pointer()`, not `be_string()`.
///
/// `Option` and `Result` have an inherent `inspect` taking a closure, so an
/// owned one must go through the trait path: `Inspect::inspect(&value)`.
pub trait Inspect {
    fn inspect(&self) -> Value;
}

macro_rules! inspect_as {
    ($variant:ident as $cast:ty: $($t:ty),*) => {
        $(
            impl Inspect for $t {
                fn inspect(&self) -> Value {
                    Value::$variant(*self as $cast)
                }
            }
        )*
    };
}

inspect_as!(Int as i64: i8, i16, i32, i64, isize, u8, u16, u32);
inspect_as!(Uint as u64: u64, usize);
inspect_as!(Float as f64: f32, f64);

impl Inspect for bool {
    fn inspect(&self) -> Value {
        Value::Bool(*self)
    }
}

impl Inspect for char {
    fn inspect(&self) -> Value {
        Value::Str(self.to_string())
    }
}

impl Inspect for str {
    fn inspect(&self) -> Value {
        Value::Str(self.to_owned())
    }
}

impl Inspect for String {
    fn inspect(&self) -> Value {
        Value::Str(self.clone())
    }
}

impl Inspect for Uuid {
    fn inspect(&self) -> Value {
        Value::Uuid(*self)
    }
}

impl Inspect for DateTime<Utc> {
    fn inspect(&self) -> Value {
        Value::Time(*self)
    }
}

impl Inspect for Value {
    fn inspect(&self) -> Value {
        self.clone()
    }
}

impl Inspect for StructValue {
    fn inspect(&self) -> Value {
        Value::Struct(self.clone())
    }
}

impl<T: Inspect> Inspect for [T] {
    fn inspect(&self) -> Value {
        Value::Seq(self.iter().map(Inspect::inspect).collect())
    }
}

impl<T: Inspect, const N: usize> Inspect for [T; N] {
    fn inspect(&self) -> Value {
        self.as_slice().inspect()
    }
}

impl<T: Inspect> Inspect for Vec<T> {
    fn inspect(&self) -> Value {
        self.as_slice().inspect()
    }
}

impl<T: Inspect> Inspect for Option<T> {
    fn inspect(&self) -> Value {
        match self {
            Some(inner) => Value::Ref(Box::new(inner.inspect())),
            None => Value::Nil,
        }
    }
}

impl<T: Inspect + ?Sized> Inspect for Box<T> {
    fn inspect(&self) -> Value {
        Value::Ref(Box::new((**self).inspect()))
    }
}

impl<T: Inspect + ?Sized> Inspect for Rc<T> {
    fn inspect(&self) -> Value {
        Value::Ref(Box::new((**self).inspect()))
    }
}

impl<T: Inspect + ?Sized> Inspect for Arc<T> {
    fn inspect(&self) -> Value {
        Value::Ref(Box::new((**self).inspect()))
    }
}

impl<T: Inspect + ?Sized> Inspect for &T {
    fn inspect(&self) -> Value {
        (**self).inspect()
    }
}

/// JSON documents: objects become records named `"Object"`, so they can be
/// matched with `field_map_of`.
impl Inspect for serde_json::Value {
    fn inspect(&self) -> Value {
        use serde_json::Value as Json;
        match self {
            Json::Null => Value::Nil,
            Json::Bool(b) => Value::Bool(*b),
            Json::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Int(i)
                } else if let Some(u) = n.as_u64() {
                    Value::Uint(u)
                } else {
                    Value::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            Json::String(s) => Value::Str(s.clone()),
            Json::Array(items) => Value::Seq(items.iter().map(Inspect::inspect).collect()),
            Json::Object(map) => Value::Struct(StructValue {
                type_name: "Object".to_string(),
                fields: map.iter().map(|(k, v)| (k.clone(), v.inspect())).collect(),
            }),
        }
    }
}

/// Implement [`Inspect`] and [`IntoExpect`](crate::expect::IntoExpect) for a
/// struct by listing the fields to expose.
///
/// Field names are used verbatim as record keys.
///
/// ```
/// use matcha_core::inspect_struct;
///
/// struct Group {
///     id: u32,
///     name: String,
/// }
///
/// inspect_struct!(Group { id, name });
/// ```
#[macro_export]
macro_rules! inspect_struct {
    ($ty:ident { $($field:ident),* $(,)? }) => {
        impl $crate::inspect::Inspect for $ty {
            fn inspect(&self) -> $crate::value::Value {
                $crate::value::Value::structure(stringify!($ty))
                    $(.field(stringify!($field), &self.$field))*
                    .build()
            }
        }

        impl $crate::expect::IntoExpect for $ty {
            fn into_expect(self) -> $crate::expect::Expect {
                $crate::expect::Expect::Literal($crate::inspect::Inspect::inspect(&self))
            }
        }
    };
}
