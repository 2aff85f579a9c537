//! # Vertex Layout
//!
//! Compact vertex layout strings such as `"3f 3f"`, as used to bind vertex
//! buffers to pipeline inputs. Each whitespace-separated token is an
//! optional count followed by a kind:
//!
//! | Kind | Meaning       | Bytes |
//! |------|---------------|-------|
//! | `f`  | `f32`         | 4     |
//! | `i`  | `i32`         | 4     |
//! | `u`  | `u32`         | 4     |
//! | `x`  | padding byte  | 1     |

use crate::error::HullError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Scalar kind of a layout attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttributeKind {
    /// `f`: 32-bit float.
    Float,
    /// `i`: 32-bit signed integer.
    Int,
    /// `u`: 32-bit unsigned integer.
    Uint,
    /// `x`: one byte of padding.
    Padding,
}

impl AttributeKind {
    fn from_code(code: char) -> Option<Self> {
        match code {
            'f' => Some(Self::Float),
            'i' => Some(Self::Int),
            'u' => Some(Self::Uint),
            'x' => Some(Self::Padding),
            _ => None,
        }
    }

    fn code(self) -> char {
        match self {
            Self::Float => 'f',
            Self::Int => 'i',
            Self::Uint => 'u',
            Self::Padding => 'x',
        }
    }

    /// Size of one component in bytes.
    pub fn size(self) -> usize {
        match self {
            Self::Float | Self::Int | Self::Uint => 4,
            Self::Padding => 1,
        }
    }
}

/// One token of a layout string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    /// Number of components (1 when the token has no count).
    pub count: usize,
    /// Component kind.
    pub kind: AttributeKind,
}

impl Attribute {
    /// Size of the attribute in bytes.
    pub fn size(&self) -> usize {
        self.count * self.kind.size()
    }
}

/// A parsed vertex layout.
///
/// # Example
///
/// ```rust
/// use hull_mesh::layout::VertexLayout;
///
/// let layout = VertexLayout::parse("3f 3f").unwrap();
/// assert_eq!(layout.stride(), 24);
/// assert_eq!(layout.locations(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VertexLayout {
    attributes: Vec<Attribute>,
}

impl VertexLayout {
    /// Parses a layout string.
    ///
    /// # Errors
    ///
    /// [`HullError::InvalidLayout`] for empty layouts, zero counts, or
    /// unknown kinds.
    pub fn parse(layout: &str) -> Result<Self, HullError> {
        let attributes = layout
            .split_whitespace()
            .map(parse_token)
            .collect::<Result<Vec<_>, _>>()?;

        if attributes.is_empty() {
            return Err(HullError::invalid_layout("layout is empty"));
        }

        Ok(Self { attributes })
    }

    /// The interleaved position + normal layout of hull meshes.
    pub fn position_normal() -> Self {
        Self {
            attributes: vec![
                Attribute {
                    count: 3,
                    kind: AttributeKind::Float,
                };
                2
            ],
        }
    }

    /// Returns the parsed attributes, padding included.
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    /// Number of shader input locations (padding excluded).
    pub fn locations(&self) -> usize {
        self.attributes
            .iter()
            .filter(|a| a.kind != AttributeKind::Padding)
            .count()
    }

    /// Bytes per vertex.
    pub fn stride(&self) -> usize {
        self.attributes.iter().map(Attribute::size).sum()
    }

    /// Number of whole vertices in `bytes` bytes.
    pub fn vertex_count(&self, bytes: usize) -> usize {
        bytes / self.stride()
    }
}

impl Default for VertexLayout {
    fn default() -> Self {
        Self::position_normal()
    }
}

impl fmt::Display for VertexLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, attr) in self.attributes.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}{}", attr.count, attr.kind.code())?;
        }
        Ok(())
    }
}

fn parse_token(token: &str) -> Result<Attribute, HullError> {
    let Some(code) = token.chars().last() else {
        return Err(HullError::invalid_layout("empty token"));
    };
    let kind = AttributeKind::from_code(code)
        .ok_or_else(|| HullError::invalid_layout(format!("unknown kind '{code}' in '{token}'")))?;

    let digits = &token[..token.len() - code.len_utf8()];
    let count = if digits.is_empty() {
        1
    } else {
        digits
            .parse::<usize>()
            .map_err(|_| HullError::invalid_layout(format!("bad count in '{token}'")))?
    };

    if count == 0 {
        return Err(HullError::invalid_layout(format!("zero count in '{token}'")));
    }

    Ok(Attribute { count, kind })
}

/// Returns the stride in bytes of a layout string.
///
/// # Example
///
/// ```rust
/// use hull_mesh::layout::calcsize;
///
/// assert_eq!(calcsize("3f 3f").unwrap(), 24);
/// assert_eq!(calcsize("3f 4x").unwrap(), 16);
/// ```
pub fn calcsize(layout: &str) -> Result<usize, HullError> {
    Ok(VertexLayout::parse(layout)?.stride())
}

/// Stride of the layout hull meshes are packed in.
pub fn position_normal_stride() -> usize {
    VertexLayout::position_normal().stride()
}
