// Core modules implementing tokenizing, tag location, tag splicing, and error modeling.
pub mod error;
pub mod locate;
pub mod schema;
pub mod splice;
pub mod token;
