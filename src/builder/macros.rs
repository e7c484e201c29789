//! Macros for ergonomic identifier declaration.

/// Declare an enum and implement [`State`](crate::core::State) for it.
///
/// The enum derives everything the engine requires and names each
/// variant after its identifier.
///
/// # Example
///
/// ```
/// use switchboard::state_enum;
/// use switchboard::core::State;
///
/// state_enum! {
///     pub enum CallState {
///         OffHook,
///         Ringing,
///         Connected,
///     }
/// }
///
/// assert_eq!(CallState::Ringing.name(), "Ringing");
/// ```
#[macro_export]
macro_rules! state_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),* $(,)?
        }
    ) => {
        $crate::__identifier_enum! {
            $crate::core::State;
            $(#[$meta])*
            $vis enum $name {
                $(
                    $(#[$variant_meta])*
                    $variant
                ),*
            }
        }
    };
}

/// Declare an enum and implement [`Trigger`](crate::core::Trigger) for it.
///
/// # Example
///
/// ```
/// use switchboard::trigger_enum;
/// use switchboard::core::Trigger;
///
/// trigger_enum! {
///     pub enum CallTrigger {
///         CallDialed,
///         CallConnected,
///     }
/// }
///
/// assert_eq!(CallTrigger::CallDialed.name(), "CallDialed");
/// ```
#[macro_export]
macro_rules! trigger_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),* $(,)?
        }
    ) => {
        $crate::__identifier_enum! {
            $crate::core::Trigger;
            $(#[$meta])*
            $vis enum $name {
                $(
                    $(#[$variant_meta])*
                    $variant
                ),*
            }
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __identifier_enum {
    (
        $trait:path;
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),*
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            Debug,
            serde::Serialize,
            serde::Deserialize
        )]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $trait for $name {
            fn name(&self) -> &str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }
        }
    };
}
