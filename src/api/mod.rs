//! HTTP surface for the rendering collaborator
//!
//! The front end renders; this side only serves JSON snapshots and accepts
//! the single user action (picking a patient).

pub mod rest;

pub use rest::RestApi;
