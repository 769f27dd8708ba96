pub mod patterns;

pub use patterns::FileMatcher;
