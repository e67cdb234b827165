pub use super::*;

mod lib_tests;
