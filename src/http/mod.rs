//! HTTP/1.0 protocol implementation.
//!
//! One request per connection, GET only, answered with a file or a bare
//! status line and then closed.
//!
//! # Architecture
//!
//! - **`connection`**: Per-connection handler driving the request-response cycle
//! - **`parser`**: Tokenizes the request line out of the bytes read so far
//! - **`request`**: Request representation
//! - **`response`**: Status codes and the response head
//! - **`writer`**: Streams the head and the file body to the client
//! - **`mime`**: MIME type detection based on file extensions
//!
//! # Connection State Machine
//!
//! ```text
//!        ┌─────────────┐
//!        │   Reading   │ ← Wait for the request line
//!        └──────┬──────┘
//!               │ Request line parsed (malformed → Writing 400)
//!               ▼
//!        ┌──────────────────┐
//!        │   Resolving      │ ← Map target under the document root
//!        └──────┬───────────┘
//!               │ 200 / 403 / 404 chosen
//!               ▼
//!        ┌──────────────────┐
//!        │    Writing       │ ← Send head and file body
//!        └──────┬───────────┘
//!               │
//!               ▼
//!             Closed
//! ```

pub mod request;
pub mod response;
pub mod parser;
pub mod connection;
pub mod writer;
pub mod mime;
