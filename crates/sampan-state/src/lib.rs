#![doc = include_str!("../README.md")]

/// This module provides a generic repository interface for storing and retrieving values.
pub mod repository;

/// This module provides a registry holding the repository supplied by the client.
pub mod registry;

mod memory;

pub use memory::MemoryRepository;
