//! Routes packed requests to registered resource handlers and writes a
//! packed response in place into the same buffer.
//!
//! A request is a pack-encoded integer *method token* (high byte: method
//! code; low 24 bits: a caller-chosen correlation id) followed by a packed
//! list: the path, then method arguments. A response overwrites the same
//! buffer with a pack-encoded integer *status token*, built from the
//! response code and the request's correlation id, followed by a packed
//! result list. The token is read and written through [`Pack`]'s own
//! integer accessors, exactly like any other element — its encoded width
//! (one word for a small value, more for a larger one) can differ between
//! the request and the response, and the response list is positioned by
//! mirroring the reader's offset onto the writer after the token, the way
//! the two cursors share one buffer throughout request handling.

use core::cell::Cell;

use crate::pack::{ContainerKind, Pack};

/// Maximum number of registered resources.
pub const MAX_RESOURCES: usize = 8;

/// GET method code.
pub const GET: u8 = 0x01;
/// POST method code.
pub const POST: u8 = 0x02;
/// PUT method code.
pub const PUT: u8 = 0x03;
/// DELETE method code.
pub const DELETE: u8 = 0x04;

/// 2.01 Created.
pub const CREATED: u8 = 0x21;
/// 2.02 Deleted.
pub const DELETED: u8 = 0x22;
/// 2.04 Changed.
pub const CHANGED: u8 = 0x24;
/// 2.05 Content.
pub const CONTENT: u8 = 0x25;
/// 4.00 Bad Request.
pub const BAD_REQUEST: u8 = 0x40;
/// 4.01 Unauthorized.
pub const UNAUTHORIZED: u8 = 0x41;
/// 4.03 Forbidden.
pub const FORBIDDEN: u8 = 0x43;
/// 4.04 Not Found.
pub const NOT_FOUND: u8 = 0x44;
/// 4.05 Method Not Allowed.
pub const METHOD_NOT_ALLOWED: u8 = 0x45;
/// 4.13 Request Entity Too Large.
pub const TOO_LARGE: u8 = 0x4D;
/// 5.00 Internal Server Error.
pub const INTERNAL_ERROR: u8 = 0x50;

/// A resource handler: method code in, status code out. Reads remaining
/// request arguments from the reader and appends response arguments to the
/// writer, which is already positioned inside the opened response list.
pub type Handler = fn(u8, &mut Pack<'_>, &mut Pack<'_>) -> u8;

struct Resource<'a> {
    path: &'a str,
    handler: Handler,
}

/// A fixed-capacity dispatch table routing packed requests to handlers by
/// path.
pub struct Postman<'a> {
    resources: [Option<Resource<'a>>; MAX_RESOURCES],
    count: usize,
}

impl<'a> Default for Postman<'a> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> Postman<'a> {
    pub fn new() -> Self {
        Self {
            resources: [const { None }; MAX_RESOURCES],
            count: 0,
        }
    }

    /// Registers a handler for `path`. Fails once the table is full.
    pub fn register_resource(&mut self, path: &'a str, handler: Handler) -> bool {
        if self.count == MAX_RESOURCES {
            return false;
        }
        self.resources[self.count] = Some(Resource { path, handler });
        self.count += 1;
        true
    }

    /// Handles one packed request. `length` and `max_length` are the
    /// request's and the buffer's capacity, in words (as passed straight
    /// through to the reader's and writer's cursors); the writer's capacity
    /// reserves one trailing word for the framer's CRC. Returns the
    /// response length in bytes.
    pub fn handle_pack(&mut self, buffer: &mut [u32], length: usize, max_length: usize) -> usize {
        let cells = Cell::from_mut(buffer).as_slice_of_cells();
        let reader_cap = length.min(cells.len());
        let writer_cap = max_length.saturating_sub(1).min(cells.len());
        let mut reader = Pack::from_cells(&cells[..reader_cap]);
        let mut writer = Pack::from_cells(&cells[..writer_cap]);

        let (status, correlation) = self.dispatch(&mut reader, &mut writer);

        let response_length = writer.get_offset();
        writer.set_offset(0);
        writer.put_integer((((status as u32) << 24) | correlation) as i32);
        response_length
    }

    /// Returns the response status and the correlation id to echo back, the
    /// low 24 bits of whatever method token was found (`0` if none was).
    fn dispatch(&mut self, reader: &mut Pack<'_>, writer: &mut Pack<'_>) -> (u8, u32) {
        if !reader.next() || !reader.is_integer() {
            return (BAD_REQUEST, 0);
        }
        let method_token = reader.get_big_integer() as u32;
        if method_token == 0 {
            return (BAD_REQUEST, 0);
        }
        let correlation = method_token & 0x00FF_FFFF;
        if !reader.next() || !writer.set_offset(reader.get_offset()) || !writer.next() {
            return (BAD_REQUEST, correlation);
        }
        if !reader.is_list() {
            return (BAD_REQUEST, correlation);
        }
        let method = (method_token >> 24) as u8;
        if !reader.open() {
            return (BAD_REQUEST, correlation);
        }
        if !reader.has_next() {
            let status = if method == GET {
                writer.create_container(ContainerKind::List);
                for resource in self.resources[..self.count].iter().flatten() {
                    writer.put_string(resource.path);
                }
                writer.finish_container();
                CONTENT
            } else {
                METHOD_NOT_ALLOWED
            };
            return (status, correlation);
        }
        if !reader.next() || !reader.is_string() {
            // Integer paths are reserved; no semantics are assigned to them.
            return (NOT_FOUND, correlation);
        }
        for resource in self.resources[..self.count].iter().flatten() {
            if reader.equals(resource.path) {
                return ((resource.handler)(method, reader, writer), correlation);
            }
        }
        (NOT_FOUND, correlation)
    }
}
