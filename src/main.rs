//! # Voxel World Entry Point
//!
//! Calls into the library's `run()` and exits non-zero if it fails.
//!
//! ## Usage
//!
//! ```bash
//! RUST_LOG=info cargo run --release
//! ```

fn main() {
    if let Err(err) = voxel_world::run() {
        log::error!("{}", err);
        std::process::exit(1);
    }
}
