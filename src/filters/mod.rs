//! Filter stages of the edge pipeline.
//!
//! | Stage | Module | Input | Output |
//! |-------|--------|-------|--------|
//! | Color normalizer | [`grayscale`] | `Frame` | `IntensityMap` |
//! | Smoothing filter | [`blur`] | `IntensityMap` | `IntensityMap` |
//! | Gradient extractor | [`edge`] | `IntensityMap` | `EdgeMap` |
//!
//! ## Architecture
//!
//! All stages follow these principles:
//! - **Pure** - buffer in, freshly allocated buffer of the same size out
//! - **Stateless** - nothing is kept between frames
//! - **Fallible allocation** - buffers are reserved up front and failure is an error
//! - **Single-threaded** - parallelism is left to the caller (see `pipeline::process_batch`)

pub mod core;
pub mod grayscale;
pub mod blur;
pub mod edge;
