//! Utility macros for the front end.
//!
//! This module defines helper macros used throughout the crate:
//!
//! - `MK_TOKEN!` - Creates a Token instance
//! - `TOKEN_CATALOG!` - Declares `TokenKind` together with its names,
//!   canonical spellings and classification groups from a single table
//!
//! These macros reduce boilerplate in the lexer implementation.

/// Creates a Token instance.
///
/// # Arguments
///
/// * `$kind` - The TokenKind
/// * `$value` - The token's string value
/// * `$span` - The source span
///
/// # Example
///
/// ```ignore
/// let token = MK_TOKEN!(TokenKind::IntVal, "42".to_string(), span);
/// ```
#[macro_export]
macro_rules! MK_TOKEN {
    ($kind:expr, $value:expr, $span:expr) => {
        Token {
            kind: $kind,
            value: $value,
            span: $span,
        }
    };
}

/// Declares the `TokenKind` enum from a table of
/// `Variant => "NAME", "spelling", [GROUP | GROUP];` rows.
///
/// Generates `TokenKind::ALL`, `name()`, `spelling()` and `groups()` so the
/// three views of a kind can never drift apart.
#[macro_export]
macro_rules! TOKEN_CATALOG {
    ($($variant:ident => $name:literal, $spelling:literal, [$($group:ident)|*];)*) => {
        #[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, PartialOrd, Ord)]
        pub enum TokenKind {
            $($variant,)*
        }

        impl TokenKind {
            /// Every kind, in catalog order.
            pub const ALL: &'static [TokenKind] = &[$(TokenKind::$variant,)*];

            /// The upper-snake name used in the textual token form.
            pub fn name(&self) -> &'static str {
                match self {
                    $(TokenKind::$variant => $name,)*
                }
            }

            /// The canonical source spelling. Empty for kinds that carry
            /// arbitrary text (identifiers, literals) and for end of input.
            pub fn spelling(&self) -> &'static str {
                match self {
                    $(TokenKind::$variant => $spelling,)*
                }
            }

            pub fn groups(&self) -> $crate::lexer::tokens::Groups {
                match self {
                    $(TokenKind::$variant => $crate::lexer::tokens::Groups::NONE
                        $(.with($crate::lexer::tokens::Groups::$group))*,)*
                }
            }
        }
    };
}
