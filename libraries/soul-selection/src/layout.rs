//! Row-major grid layout for choice buttons

use crate::error::LayoutError;

/// Split `items` into rows of at most `max_row_width`, keeping their order
///
/// Rows fill left to right, top to bottom; only the last row may be short.
///
/// # Errors
/// Returns `InvalidArgument` if `max_row_width` is zero
pub fn layout<T>(items: &[T], max_row_width: usize) -> Result<Vec<&[T]>, LayoutError> {
    if max_row_width == 0 {
        return Err(LayoutError::InvalidArgument(
            "max_row_width must be positive".to_string(),
        ));
    }
    Ok(items.chunks(max_row_width).collect())
}
