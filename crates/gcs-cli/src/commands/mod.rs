//! Console command implementations
//!
//! One function per menu entry: collect parameters through the prompter,
//! run the storage operation, present the result.

pub mod bucket;
pub mod object;

pub use bucket::*;
pub use object::*;

use bytes::Bytes;

pub(crate) const BUCKET_PROMPT: &str = "Bucket Name";
pub(crate) const OBJECT_PROMPT: &str = "Object Name";
pub(crate) const ACL_PROMPT: &str = "an acl (private, public-read, etc)";

/// Print a response payload, skipping empty bodies
pub(crate) fn print_body(body: &Bytes) {
    if !body.is_empty() {
        println!("{}", String::from_utf8_lossy(body));
    }
}

/// A blank entry means the parameter was not supplied
pub(crate) fn blank_to_none(entry: &str) -> Option<&str> {
    if entry.is_empty() {
        None
    } else {
        Some(entry)
    }
}
