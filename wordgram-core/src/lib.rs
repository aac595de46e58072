//! Word-level n-gram language modeling library.
//!
//! This crate provides a small statistical language model including:
//! - Vocabulary construction with unknown-token substitution
//! - Unigram and bigram frequency tables
//! - Add-one smoothed sequence scoring
//! - Probabilistic sentence generation (Shannon technique)
//!
//! The model owns no I/O: callers supply a flat, whitespace-tokenized
//! token stream in which every sentence is wrapped in begin/end markers,
//! and receive scores and generated token sequences back.

/// Core language model and its supporting structures.
///
/// This module exposes the trainable model and its marker configuration
/// while keeping counting and sampling internals private.
pub mod model;

/// Error taxonomy shared across the crate.
///
/// All fallible operations return [`error::Result`].
pub mod error;
