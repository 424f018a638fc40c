/// Validation failures raised by the booking core.
///
/// All variants are recoverable by the caller and carry the user-facing
/// message; nothing here ever terminates the process.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum BookingError {
    /// Check-out is on or before check-in.
    #[error("Check-out date must be after check-in date.")]
    InvalidRange,

    /// Check-in is before the current date.
    #[error("Check-in date cannot be in the past.")]
    PastDate,

    /// The requested dates overlap an existing booking on the plot.
    #[error("This plot is no longer available for the selected dates.")]
    Unavailable,

    /// The party is larger than the plot allows.
    #[error("Number of guests ({guests}) exceeds plot capacity ({capacity}).")]
    CapacityExceeded {
        /// Requested number of guests.
        guests: i32,
        /// Maximum the plot allows.
        capacity: i32,
    },

    /// The guest email does not look like an email address.
    #[error("A valid guest email address is required.")]
    InvalidContact,

    /// A raw query parameter could not be parsed.
    #[error("{0}")]
    MalformedInput(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_are_user_facing() {
        assert_eq!(
            BookingError::InvalidRange.to_string(),
            "Check-out date must be after check-in date."
        );
        assert_eq!(
            BookingError::CapacityExceeded {
                guests: 6,
                capacity: 4
            }
            .to_string(),
            "Number of guests (6) exceeds plot capacity (4)."
        );
        assert_eq!(
            BookingError::MalformedInput("bad month".into()).to_string(),
            "bad month"
        );
    }
}
