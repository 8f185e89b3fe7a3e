//! UI-free core of NoPaste: a lazily loaded file tree with persisted
//! check-state, and the command construction / session dispatch layer
//! that compiles and runs the selection inside WSL.

pub mod core;
