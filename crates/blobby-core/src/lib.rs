pub mod world;

// Re-export from blobby-creature so hosts only need one dependency
pub mod creature {
    pub use blobby_creature::*;
}
