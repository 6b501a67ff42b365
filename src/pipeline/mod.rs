//! Pipeline stages for item analysis.
//!
//! Each submodule implements exactly one step so each can be tested on its
//! own.
//!
//! ## Data Flow
//!
//! ```text
//! input ──▶ encode ──▶ llm ──▶ decode
//! (bytes)   (base64)   (VLM)   (validate)
//! ```
//!
//! 1. [`input`]  — the image and its declared MIME type; picker-style
//!    admission of PNG/JPEG/WEBP files
//! 2. [`encode`] — read the bytes once and base64-wrap them
//! 3. [`llm`]    — build the structured-output request and send it under a
//!    deadline; the only stage with network I/O
//! 4. [`decode`] — JSON-decode the answer and reject any shape mismatch

pub mod decode;
pub mod encode;
pub mod input;
pub mod llm;
