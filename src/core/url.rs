//! Normalized resource paths.
//!
//! A `Url` is the path half of a request: fragments joined with `/`, runs of
//! separators collapsed and the trailing separator dropped. The host half
//! lives on the [`Connection`](crate::sources::Connection).

use std::fmt;
use std::ops::{Add, Deref, Sub};

use serde::{Serialize, Serializer};

/// Build a [`Url`] from any number of displayable fragments.
///
/// ```
/// use remotely::url;
///
/// assert_eq!(url!("adventures", 1, "members"), "/adventures/1/members");
/// assert_eq!(url!(), "/");
/// ```
#[macro_export]
macro_rules! url {
    () => {
        $crate::core::Url::root()
    };
    ($($fragment:expr),+ $(,)?) => {
        $crate::core::Url::new([$($fragment.to_string()),+])
    };
}

/// An immutable, normalized request path.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Url {
    path: String,
}

impl Url {
    /// Join fragments into a normalized path.
    pub fn new<I, S>(fragments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut joined = String::from("/");
        for fragment in fragments {
            joined.push_str(fragment.as_ref());
            joined.push('/');
        }

        Url {
            path: normalize(&joined),
        }
    }

    /// The root path (`/`).
    pub fn root() -> Self {
        Url {
            path: "/".to_string(),
        }
    }

    /// Re-normalize an arbitrary path string.
    pub fn parse(path: impl AsRef<str>) -> Self {
        Url::new([path])
    }

    /// Get the normalized path.
    pub fn as_str(&self) -> &str {
        &self.path
    }

    /// Check if this is the root path.
    pub fn is_root(&self) -> bool {
        self.path == "/"
    }

    /// Iterate over the non-empty path segments.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.path.split('/').filter(|s| !s.is_empty())
    }
}

/// Collapse separator runs and strip the trailing separator.
fn normalize(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len() + 1);
    out.push('/');

    for c in raw.chars() {
        if c == '/' && out.ends_with('/') {
            continue;
        }
        out.push(c);
    }

    while out.len() > 1 && out.ends_with('/') {
        out.pop();
    }

    out
}

impl Default for Url {
    fn default() -> Self {
        Url::root()
    }
}

impl Add for Url {
    type Output = Url;

    fn add(self, other: Url) -> Url {
        Url::new([self.path, other.path])
    }
}

impl Add<&Url> for &Url {
    type Output = Url;

    fn add(self, other: &Url) -> Url {
        Url::new([self.as_str(), other.as_str()])
    }
}

impl Add<&str> for Url {
    type Output = Url;

    fn add(self, other: &str) -> Url {
        Url::new([self.as_str(), other])
    }
}

impl Sub for Url {
    type Output = Url;

    /// Remove the first occurrence of `other` from this path.
    fn sub(self, other: Url) -> Url {
        Url::parse(self.path.replacen(other.as_str(), "", 1))
    }
}

impl Sub<&str> for Url {
    type Output = Url;

    fn sub(self, other: &str) -> Url {
        Url::parse(self.path.replacen(other, "", 1))
    }
}

impl Deref for Url {
    type Target = str;

    fn deref(&self) -> &str {
        &self.path
    }
}

impl AsRef<str> for Url {
    fn as_ref(&self) -> &str {
        &self.path
    }
}

impl PartialEq<str> for Url {
    fn eq(&self, other: &str) -> bool {
        self.path == other
    }
}

impl PartialEq<&str> for Url {
    fn eq(&self, other: &&str) -> bool {
        self.path == *other
    }
}

impl PartialEq<String> for Url {
    fn eq(&self, other: &String) -> bool {
        &self.path == other
    }
}

impl From<&str> for Url {
    fn from(path: &str) -> Self {
        Url::parse(path)
    }
}

impl From<String> for Url {
    fn from(path: String) -> Self {
        Url::parse(path)
    }
}

impl fmt::Debug for Url {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.path, f)
    }
}

impl fmt::Display for Url {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.path, f)
    }
}

impl Serialize for Url {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.path.serialize(serializer)
    }
}
