// Stylejump Utilities Module
//
// Common helpers shared by the engine and the bindings.

pub mod paths;
