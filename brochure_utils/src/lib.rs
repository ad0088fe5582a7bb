/// Version reported by `brochure --version`.
pub const fn brochure_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Builder style mutation for types without builders.
pub trait Apply {
    /// Applies the function `f` with a mutable reference to `self`.
    fn with<X>(mut self, f: impl FnOnce(&mut Self) -> X) -> Self
    where
        Self: Sized,
    {
        f(&mut self);
        self
    }
}

impl<T> Apply for T {}

#[macro_export]
macro_rules! assert_matches {
    ($expr:expr, $pat:pat) => {
        match ($expr) {
            $pat => (),
            val => ::core::panic!(
                "Assertion failed: Value {val:?} did not match pattern {}",
                ::core::stringify!($pat)
            ),
        }
    };
    ($expr:expr, $pat:pat if $pred:expr) => {{
        let val = $expr;
        match (&val) {
            $pat if $pred => (),
            #[allow(unused_variables, reason = "bindings are only used by the predicate")]
            $pat => ::core::panic!(
                "Assertion failed: Value {val:?} does not match predicate {}",
                ::core::stringify!($pred)
            ),
            _ => ::core::panic!(
                "Assertion failed: Value {val:?} did not match pattern {}",
                ::core::stringify!($pat)
            ),
        }
    }};
}
