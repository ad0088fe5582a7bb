macro_rules! id {
    ($ident:ident) => {
        #[::nutype::nutype(derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
            Deref,
            From,
            Display,
            Serialize,
            Deserialize,
        ))]
        pub struct $ident(::uuid::Uuid);
    };
}

macro_rules! nutype_string {
    ($(#[$meta:meta])* $ident:ident($($args:tt)*)) => {
        $(#[$meta])*
        #[::nutype::nutype(
            derive(Debug, Clone, PartialEq, Eq, Deref, AsRef, TryFrom, Display, Serialize, Deserialize),
            $($args)*
        )]
        pub struct $ident(String);
    };
}

pub(crate) use id;
pub(crate) use nutype_string;
