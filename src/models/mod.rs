//! Request and Response models for the cache HTTP API
//!
//! DTOs used for serializing/deserializing HTTP request and response bodies.

pub mod requests;
pub mod responses;

pub use requests::{PutRequest, MAX_KEY_LENGTH, MAX_VALUE_SIZE};
pub use responses::{
    DeleteResponse, ErrorResponse, GetResponse, HealthResponse, PutResponse, StatsResponse,
};
