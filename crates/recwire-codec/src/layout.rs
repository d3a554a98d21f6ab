//! Layout planning.
//!
//! A type's stack length is a compile-time constant built by summing the
//! widths of its fields; its heap length is computed per instance. The
//! planner also resolves field offsets for introspection.

use crate::encoder::{add_len, Encode};

/// How a field is represented in the stack region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// Fixed-width integer, bool or enum discriminant.
    Scalar,
    /// Fixed-size byte array stored inline.
    Array,
    /// String or byte slice: descriptor length counts bytes.
    Bytes,
    /// Slice of fixed-size arrays: descriptor length counts elements.
    Slice,
    /// Nested record occupying its own stack sub-range.
    Composite,
}

impl FieldKind {
    pub fn as_str(self) -> &'static str {
        match self {
            FieldKind::Scalar => "scalar",
            FieldKind::Array => "array",
            FieldKind::Bytes => "bytes",
            FieldKind::Slice => "slice",
            FieldKind::Composite => "composite",
        }
    }
}

/// Static description of one declared field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub ty: &'static str,
    pub width: u32,
    pub kind: FieldKind,
    /// Child fields when `kind` is [`FieldKind::Composite`].
    pub fields: &'static [FieldSpec],
}

/// Size contract shared by every encodable field type.
pub trait Layout {
    /// Bytes this type occupies in the stack region.
    const STACK_LEN: u32;

    const KIND: FieldKind;

    /// Declared fields, for composite types.
    const FIELDS: &'static [FieldSpec] = &[];

    /// Bytes this value contributes to the heap region.
    ///
    /// Descriptors address the buffer with `u32` offsets, so a whole
    /// encoded record, reserved header included, is limited to
    /// `u32::MAX` bytes. Implementations panic past that limit rather
    /// than truncate.
    fn heap_len(&self) -> u32;

    fn stack_len(&self) -> u32 {
        Self::STACK_LEN
    }
}

/// Total encoded size of a value, excluding any reserved header.
///
/// # Panics
///
/// Panics when the size exceeds `u32::MAX`.
pub fn encoded_len<T: Encode>(value: &T) -> u32 {
    add_len(T::STACK_LEN, value.heap_len())
}

/// A field with its resolved stack offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedField {
    /// Dotted path for fields of nested composites (`lot.owner_id`).
    pub name: String,
    pub ty: &'static str,
    /// Offset relative to the start of the outermost record.
    pub offset: u32,
    pub width: u32,
    pub kind: FieldKind,
    /// Nesting depth, 0 for top-level fields.
    pub depth: usize,
}

/// Resolve every field of `T`, descending into composites depth-first.
pub fn plan<T: Layout>() -> Vec<PlannedField> {
    let mut out = Vec::with_capacity(T::FIELDS.len());
    plan_fields(T::FIELDS, "", 0, 0, &mut out);
    out
}

fn plan_fields(
    fields: &'static [FieldSpec],
    prefix: &str,
    base: u32,
    depth: usize,
    out: &mut Vec<PlannedField>,
) {
    let mut offset = base;
    for field in fields {
        let name = if prefix.is_empty() {
            field.name.to_string()
        } else {
            format!("{prefix}.{}", field.name)
        };
        out.push(PlannedField {
            name: name.clone(),
            ty: field.ty,
            offset,
            width: field.width,
            kind: field.kind,
            depth,
        });
        if field.kind == FieldKind::Composite {
            plan_fields(field.fields, &name, offset, depth + 1, out);
        }
        offset += field.width;
    }
}
