// Compatibility module for std/no_std builds
// Everything the engine allocates goes through these re-exports

#[cfg(target_os = "none")]
extern crate alloc;

#[cfg(not(target_os = "none"))]
pub use std::{
    boxed::Box,
    cell::RefCell,
    collections::{HashMap, VecDeque},
    fmt,
    format,
    rc::Rc,
    string::{String, ToString},
    vec::Vec,
};

#[cfg(not(target_os = "none"))]
#[allow(unused_imports)]
pub use std::vec;

#[cfg(target_os = "none")]
pub use self::alloc::{
    boxed::Box,
    collections::{BTreeMap as HashMap, VecDeque},
    format,
    rc::Rc,
    string::{String, ToString},
    vec::Vec,
};

#[cfg(target_os = "none")]
#[allow(unused_imports)]
pub use self::alloc::vec;

#[cfg(target_os = "none")]
pub use core::{cell::RefCell, fmt};
