//! Rendering of panic payloads raised by step handlers.

use std::any::Any;

/// Extracts a panic payload into a human-readable message.
///
/// String and numeric payloads are rendered directly; anything else is
/// described by its [`TypeId`](std::any::TypeId).
///
/// # Examples
///
/// ```
/// use stepbind_harness::panic_message;
///
/// let err = std::panic::catch_unwind(|| panic!("boom")).unwrap_err();
/// assert_eq!(panic_message(err.as_ref()), "boom");
/// ```
#[must_use]
pub fn panic_message(payload: &(dyn Any + Send)) -> String {
    macro_rules! try_downcast {
        ($($ty:ty),* $(,)?) => {
            $(
                if let Some(val) = payload.downcast_ref::<$ty>() {
                    return val.to_string();
                }
            )*
        };
    }

    try_downcast!(&str, String, i32, u32, i64, u64, isize, usize, f32, f64);
    format!(
        "opaque panic payload (TypeId({:?}))",
        payload.type_id()
    )
}
