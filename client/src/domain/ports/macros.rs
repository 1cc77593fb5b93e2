//! `define_port_error!`: port error enums with snake-case constructors.
//!
//! Each variant gets a snake-case constructor; `String` fields accept
//! anything `Into<String>` so adapters can pass `&str` or formatted text.

macro_rules! define_port_error {
    (@ctor $variant:ident) => {
        ::paste::paste! {
            #[doc = concat!("Construct [`Self::", stringify!($variant), "`].")]
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
            #[doc = concat!("Construct [`Self::", stringify!($variant), "`].")]
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
                $variant $( {
                    $(
                        #[doc = concat!("Detail carried as `", stringify!($field), "`.")]
                        $field : $ty
                    ),*
                } )?,
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
    //! Generated constructors and messages.
    define_port_error! {
        pub enum StorePortError {
            Unavailable => "store unavailable",
            Io { message: String } => "store io failed: {message}",
            Corrupt { slot: String, offset: u64 } => "slot {slot} corrupt at {offset}",
        }
    }

    #[test]
    fn unit_variants_get_constructors() {
        let err = StorePortError::unavailable();
        assert_eq!(err.to_string(), "store unavailable");
    }

    #[test]
    fn string_fields_take_borrowed_text() {
        let err = StorePortError::io("disk full");
        assert_eq!(err.to_string(), "store io failed: disk full");
    }

    #[test]
    fn mixed_field_types_are_converted() {
        let err = StorePortError::corrupt("products", 42_u64);
        assert_eq!(err.to_string(), "slot products corrupt at 42");
    }
}
