//! Status code groups from the fetch standard.

/// Statuses that carry a `Location` to follow.
pub const REDIRECT_STATUSES: [u16; 5] = [301, 302, 303, 307, 308];

/// Statuses whose responses never have a body.
pub const NULL_BODY_STATUSES: [u16; 5] = [101, 103, 204, 205, 304];

pub fn is_redirect_status(status: u16) -> bool {
    REDIRECT_STATUSES.contains(&status)
}

pub fn is_null_body_status(status: u16) -> bool {
    NULL_BODY_STATUSES.contains(&status)
}

/// An ok status is any status in the range 200 to 299, inclusive.
pub fn is_ok_status(status: u16) -> bool {
    (200..=299).contains(&status)
}
