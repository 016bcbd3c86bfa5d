use anyhow::Result;
use poster_font_core::FontPaths;

/// Removes the subset artifact of `paths`; the source font is never touched.
pub fn clean(paths: &FontPaths) -> Result<()> {
    let subset = &paths.subset;
    if paths.remove_subset()? {
        println!("Removed {}", subset.display());
    } else {
        println!("Skipped {} (not found)", subset.display());
    }
    Ok(())
}
