use crate::canvas::{resolve_format, Canvas};
use crate::compose::StyledImage;
use crate::config::StyleOptions;
use crate::error::{Result, StyleError};
use crate::geometry::{classify_in, ModuleRole};
use crate::grid::{Layout, ModuleGrid};

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

/*---- Utilities ----*/

/// Builds the layout for `grid` with the box size and border from `options`.
pub fn layout_for<G: ModuleGrid>(grid: &G, options: &StyleOptions) -> Result<Layout> {
    if grid.width() == 0 {
        return Err(StyleError::InvalidConfig("module grid is empty".into()));
    }
    Ok(Layout::new(grid.width() as u32, options.box_size, options.border))
}

/// Draws every dark module of `grid`, leaving the image ready to finalize.
pub fn draw_grid<G: ModuleGrid>(grid: &G, options: StyleOptions) -> Result<StyledImage> {
    let layout = layout_for(grid, &options)?;
    let mut image = StyledImage::new(layout, options)?;
    for row in 0 .. grid.width() {
        for col in 0 .. grid.width() {
            if grid.is_dark(row, col) {
                image.draw_module(row, col);
            }
        }
    }
    Ok(image)
}

/// Renders `grid` into a finished canvas.
///
/// # Example
///
/// ```rust
/// use qirust_style::{config::StyleOptions, grid::ModuleMatrix, helper::render};
///
/// let grid = ModuleMatrix::new(21, vec![false; 21 * 21]).unwrap();
/// let canvas = render(&grid, StyleOptions::default()).unwrap();
/// assert_eq!(canvas.dimensions(), (210, 210));
/// ```
pub fn render<G: ModuleGrid>(grid: &G, options: StyleOptions) -> Result<Canvas> {
    Ok(draw_grid(grid, options)?.finalize())
}

/// Renders `grid` and writes the encoded image to `sink`.
pub fn render_to_writer<G: ModuleGrid, W: Write>(grid: &G, options: StyleOptions, sink: &mut W) -> Result<()> {
    draw_grid(grid, options)?.save(sink)
}

/// Renders `grid` and saves it to a file.
///
/// # Arguments
///
/// * `grid` - The module grid to render.
/// * `options` - Colors, logo and output format.
/// * `directory_path` - Optional. Target directory, created if missing. Defaults to "generated".
/// * `filename` - Optional. File name without extension. Defaults to a timestamp.
///
/// # Returns
///
/// The path of the written file. Its extension follows the output format.
pub fn render_and_save<G: ModuleGrid>(
    grid: &G,
    options: StyleOptions,
    directory_path: Option<&str>,
    filename: Option<&str>,
) -> Result<PathBuf> {
    let format = resolve_format(options.kind())?;
    let extension = format.extensions_str().first().copied().unwrap_or("img");

    let directory_path = directory_path.unwrap_or("generated");
    let filename = match filename {
        Some(name) => name.to_string(),
        None => {
            let since_the_epoch = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .unwrap_or_default();
            format!("{}", since_the_epoch.as_nanos())
        },
    };

    // Check if the directory exists, create it if it doesn't
    if !Path::new(directory_path).exists() {
        fs::create_dir_all(directory_path)?;
    }

    let file_path = Path::new(directory_path).join(format!("{}.{}", filename, extension));
    let mut bytes = Vec::new();
    render_to_writer(grid, options, &mut bytes)?;
    fs::write(&file_path, bytes)?;
    Ok(file_path)
}

/// Returns one line per module row showing the role each dark module is drawn as.
/// Light modules are shown as spaces.
pub fn role_map<G: ModuleGrid>(grid: &G, layout: &Layout) -> String {
    let mut result = String::new();
    for row in 0 .. grid.width() {
        for col in 0 .. grid.width() {
            let c = if grid.is_dark(row, col) {
                classify_in(layout, layout.pixel_box(row, col)).symbol()
            } else {
                ' '
            };
            result.push(c);
        }
        result.push('\n');
    }
    result
}

/// Prints the role map of `grid` to the console.
pub fn print_roles<G: ModuleGrid>(grid: &G, layout: &Layout) {
    print!("{}", role_map(grid, layout));
    println!();
}

/// Counts the dark modules of `grid` per role.
pub fn role_counts<G: ModuleGrid>(grid: &G, layout: &Layout) -> Vec<(ModuleRole, usize)> {
    let mut counts: Vec<(ModuleRole, usize)> = Vec::new();
    for row in 0 .. grid.width() {
        for col in 0 .. grid.width() {
            if !grid.is_dark(row, col) {
                continue;
            }
            let role = classify_in(layout, layout.pixel_box(row, col));
            match counts.iter_mut().find(|(r, _)| *r == role) {
                Some((_, n)) => *n += 1,
                None => counts.push((role, 1)),
            }
        }
    }
    counts
}
