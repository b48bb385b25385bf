//! Initial widget collections: read from a file or generated.

use crate::model::{Direction, InputError, Widget};
use crate::parser::parse_widgets;
use std::fs;
use std::io;
use std::path::Path;
use tracing::info;

/// Read and parse a JSON array of widgets.
///
/// # Errors
///
/// - `InputError::FileNotFound` if the path does not exist
/// - `InputError::Io` for other read failures
/// - `InputError::InvalidWidgets` if the content does not parse
pub fn load_widgets(path: &Path) -> Result<Vec<Widget>, InputError> {
    let content = fs::read_to_string(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => InputError::FileNotFound {
            path: path.to_path_buf(),
        },
        _ => InputError::Io {
            path: path.to_path_buf(),
            source,
        },
    })?;

    let widgets = parse_widgets(&content).map_err(|source| InputError::InvalidWidgets {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), count = widgets.len(), "loaded widgets");
    Ok(widgets)
}

/// Generate `count` widgets with ids `1..=count`.
///
/// Starting values are spread deterministically over `[-100, 100]` so a
/// fresh dashboard shows every color band.
pub fn generate_widgets(count: usize) -> Vec<Widget> {
    (1..=count)
        .map(|n| {
            let value = ((n as i64 * 73) % 201) - 100;
            Widget::new(n as i64, value)
                .with_name(format!("Widget {n}"))
                .with_direction(Direction::Up)
        })
        .collect()
}
