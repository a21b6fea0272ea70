//! Helper macro generating port error enums with `impl Into` constructors.
//!
//! Each variant gets a snake_case constructor, so adapters can write
//! `UserPersistenceError::query("boom")` instead of spelling out struct
//! variants.

macro_rules! define_port_error {
    (@ctor $variant:ident) => {
        ::paste::paste! {
            #[doc = "Construct the `" $variant "` variant."]
            pub fn [<$variant:snake>]() -> Self {
                Self::$variant
            }
        }
    };

    (@ctor $variant:ident { $($field:ident : $ty:ty),* $(,)? }) => {
        define_port_error!(@ctor_impl $variant () () $( $field : $ty, )*);
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) ) => {
        ::paste::paste! {
            #[doc = "Construct the `" $variant "` variant."]
            pub fn [<$variant:snake>]($($params)*) -> Self {
                Self::$variant { $($inits)* }
            }
        }
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) $field:ident : $ty:ty, $($rest:tt)*) => {
        define_port_error!(
            @ctor_impl
            $variant
            ($($params)* $field: impl Into<$ty>,)
            ($($inits)* $field: $field.into(),)
            $($rest)*
        );
    };

    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $( { $($field:ident : $ty:ty),* $(,)? } )? => $message:expr
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant $( { $($field : $ty),* } )?,
            )*
        }

        impl $name {
            $(
                define_port_error!(@ctor $variant $( { $($field : $ty),* } )?);
            )*
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    //! Constructor generation for unit and struct variants.

    define_port_error! {
        pub enum StoreError {
            Closed => "store closed",
            Rejected { reason: String } => "rejected: {reason}",
            Conflict { table: String, id: i64 } => "conflict in {table} for id {id}",
        }
    }

    #[test]
    fn unit_variants_get_nullary_constructors() {
        assert_eq!(StoreError::closed(), StoreError::Closed);
        assert_eq!(StoreError::closed().to_string(), "store closed");
    }

    #[test]
    fn string_fields_accept_str() {
        let err = StoreError::rejected("duplicate");
        assert_eq!(err.to_string(), "rejected: duplicate");
    }

    #[test]
    fn mixed_fields_keep_their_types() {
        let err = StoreError::conflict("users", 4_i64);
        assert_eq!(err.to_string(), "conflict in users for id 4");
    }
}
