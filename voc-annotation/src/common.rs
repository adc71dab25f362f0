//! Common imports from external crates.

pub use anyhow::{bail, ensure, format_err, Context, Error, Result};
pub use itertools::Itertools;
pub use once_cell::sync::Lazy;
pub use regex::{Captures, Regex};
pub use serde::{Deserialize, Serialize};
pub use std::{
    borrow::Cow,
    fmt::{self, Display},
    fs,
    path::{Path, PathBuf},
};
pub use tracing::{debug, error, info, warn};
