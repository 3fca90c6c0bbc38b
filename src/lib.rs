// src/lib.rs
//! # bsplit-rs
//!
//! A streaming splitter for binary files: one sequential read pass, output
//! cut into segment files at caller-specified absolute byte offsets.
//!
//! ## Features
//!
//! - 🚀 **Single pass**: the source is read exactly once, front to back
//! - 📦 **Memory bounded**: fixed-size read/write staging buffers, never the
//!   whole file
//! - ✂️ **Offset precise**: segment `k` holds exactly the bytes in
//!   `[plan[k], plan[k+1])`
//! - 🗂️ **Templated names**: printf-style output templates such as
//!   `split-%02d.raw`
//!
//! ## Quick Start
//!
//! ```no_run
//! use bsplit_rs::*;
//!
//! fn main() -> Result<()> {
//!     let size = std::fs::metadata("dump.bin")?.len();
//!
//!     // Cut at bytes 1000000 and 2000000: three output segments.
//!     let plan = SplitPlan::from_spec("1000000:2000000", size);
//!
//!     let summary = SplitEngine::new().run("dump.bin", &plan)?;
//!     for path in &summary.segments {
//!         println!("wrote {}", path.display());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! The `bsplit` binary wraps the same engine:
//!
//! ```text
//! bsplit --name part-%03d.bin dump.bin 1000000:2000000
//! ```

// Modules
pub mod buffer;
pub mod engine;
pub mod error;
pub mod naming;
pub mod plan;

// Re-export commonly used types at the crate root for convenience
pub use error::{Result, SplitError};

pub use buffer::{ReadBuffer, WriteBuffer, DEFAULT_BUFFER_CAPACITY};
pub use engine::{SplitEngine, SplitSummary};
pub use naming::{SegmentNamer, DEFAULT_NAME_TEMPLATE};
pub use plan::SplitPlan;

// Prelude module for glob imports
pub mod prelude {
    //! Convenient imports for common use cases.
    //!
    //! ```rust
    //! use bsplit_rs::prelude::*;
    //! ```

    pub use crate::engine::{SplitEngine, SplitSummary};
    pub use crate::error::{Result, SplitError};
    pub use crate::plan::SplitPlan;
}

/// The library version
pub const LIBRARY_VERSION: &str = env!("CARGO_PKG_VERSION");
