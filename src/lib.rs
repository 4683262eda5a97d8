//! Skylark is an event-driven audio feature extraction library.
//!
//! Given a mono signal, skylark band-pass filters it, detects acoustic
//! onsets, slices a fixed-length chunk at each onset and summarizes every
//! chunk into a row of named features: power-weighted spectral statistics,
//! MFCC means, YIN pitch quartiles and generic descriptors. The result is
//! a [`table::FeatureTable`] whose rows line up one-to-one with the
//! onsets, regardless of how many worker threads did the work.
//!
//! # Example
//! ```
//! use skylark::config::ExtractionConfig;
//! use skylark::extract::extract_at;
//! use skylark::io;
//!
//! let fs = 16000;
//! let signal = io::tone(1200.0, fs, 3.0);
//! let config = ExtractionConfig::default().with_sample_len(0.5);
//!
//! let table = extract_at(&signal, fs, &[0.5, 1.5], &config, 2).unwrap();
//! assert_eq!(table.len(), 2);
//! assert_eq!(table.get(0, "onset"), Some(0.5));
//! ```

#![forbid(unsafe_code)]

pub mod config;
pub mod dispatch;
pub mod error;
pub mod extract;
pub mod feature;
pub mod fft;
pub mod filters;
pub mod frame;
pub mod io;
pub mod onset;
pub mod pitch;
pub mod split;
pub mod spectrum;
pub mod stats;
pub mod table;
pub mod window;

pub use error::{Error, Result};
