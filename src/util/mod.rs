//! Small reusable utilities.
//!
//! # Examples
//!
//! ```
//! use vitrine::util::is_valid_email;
//!
//! assert!(is_valid_email("a@b.co"));
//! assert!(!is_valid_email("not-an-email"));
//! ```

mod email;

pub use email::is_valid_email;
