use bytes::{BufMut, Bytes, BytesMut};

pub const CURRENT_MARKER: &[u8] = b"<<<<<<< HEAD\n";
pub const SEPARATOR_MARKER: &[u8] = b"=======\n";
pub const TARGET_MARKER: &[u8] = b">>>>>>>\n";

/// Combine both sides of a conflicting file
///
/// Each side is inserted verbatim; a side that deleted the file contributes
/// nothing.
pub fn conflict_content(current: &[u8], target: &[u8]) -> Bytes {
    let mut content = BytesMut::with_capacity(
        CURRENT_MARKER.len()
            + current.len()
            + SEPARATOR_MARKER.len()
            + target.len()
            + TARGET_MARKER.len(),
    );

    content.put_slice(CURRENT_MARKER);
    content.put_slice(current);
    content.put_slice(SEPARATOR_MARKER);
    content.put_slice(target);
    content.put_slice(TARGET_MARKER);

    content.freeze()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn both_sides_are_kept_verbatim() {
        let content = conflict_content(b"current\n", b"target\n");

        assert_eq!(
            String::from_utf8_lossy(&content),
            "<<<<<<< HEAD\ncurrent\n=======\ntarget\n>>>>>>>\n"
        );
    }

    #[test]
    fn deleted_side_is_empty() {
        let content = conflict_content(b"", b"target\n");

        assert_eq!(
            String::from_utf8_lossy(&content),
            "<<<<<<< HEAD\n=======\ntarget\n>>>>>>>\n"
        );
    }
}
