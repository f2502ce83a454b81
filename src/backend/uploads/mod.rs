//! Image Upload Gateway
//!
//! Accepts multipart uploads, writes them to object storage and hands back
//! public URLs for card images and board thumbnails.

/// `file` part extraction
pub mod multipart;

/// Upload and thumbnail handlers
pub mod handlers;
