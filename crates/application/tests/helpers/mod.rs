#![allow(unused_imports)]

mod mock_tools;

pub use mock_tools::*;
