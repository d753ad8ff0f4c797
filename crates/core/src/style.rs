//! Segment styling.
//!
//! Substituted identity and location data renders bold; calendar boilerplate renders plain.

use crate::resolver::Placeholder;

impl Placeholder {
    pub fn is_bold(self) -> bool {
        !matches!(
            self,
            Placeholder::Date
                | Placeholder::Month
                | Placeholder::Year
                | Placeholder::ClosureDate
                | Placeholder::StartDate
                | Placeholder::EndDate
                | Placeholder::DateOfDeath
        )
    }
}

/// Whether a resolved placeholder renders bold.
///
/// Unrecognized placeholders are treated as literal text and are never bold.
pub fn is_bold(token: &str) -> bool {
    Placeholder::from_token(token).is_some_and(Placeholder::is_bold)
}
