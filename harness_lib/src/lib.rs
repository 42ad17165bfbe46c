pub mod diagnostic;
pub mod grammar;
pub mod harness;
pub mod inspectors;
pub mod prediction;
pub mod stream;
pub mod token;
pub mod token_stream;
pub mod tree;
pub mod util;
