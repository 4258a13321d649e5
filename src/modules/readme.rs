use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;
use tokio::fs;

// A top-level heading starts the line after the replaceable section.
static TOP_LEVEL_HEADING: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^#").unwrap());

/// Patch the README section marked by `section_header` with `markdown`.
///
/// Three outcomes: the file is created when absent, the marked section is
/// replaced when present, and the fragment is appended otherwise. I/O
/// errors are logged and reported as `false`, never raised.
pub async fn update_readme_section(
    readme_path: &Path,
    markdown: &str,
    section_header: &str,
) -> bool {
    match try_update(readme_path, markdown, section_header).await {
        Ok(_) => true,
        Err(e) => {
            tracing::error!("failed to update {}: {:?}", readme_path.display(), e);
            false
        }
    }
}

async fn try_update(readme_path: &Path, markdown: &str, section_header: &str) -> Result<()> {
    if !readme_path.exists() {
        tracing::warn!(
            "README not found at {}, creating a new file",
            readme_path.display()
        );
        fs::write(readme_path, markdown)
            .await
            .with_context(|| format!("failed to create {}", readme_path.display()))?;
        return Ok(());
    }

    let content = fs::read_to_string(readme_path)
        .await
        .with_context(|| format!("failed to read {}", readme_path.display()))?;

    let new_content = match content.find(section_header) {
        Some(start) => {
            // Replace from the marker up to the next top-level heading, or
            // to the end of the document.
            let search_from = start + section_header.len();
            let end = TOP_LEVEL_HEADING
                .find_at(&content, search_from)
                .map_or(content.len(), |m| m.start());

            tracing::info!(
                "updating section {:?} in {}",
                section_header,
                readme_path.display()
            );
            format!("{}{}{}", &content[..start], markdown, &content[end..])
        }
        None => {
            tracing::info!(
                "adding new section {:?} to {}",
                section_header,
                readme_path.display()
            );
            format!("{}\n{}\n", content, markdown)
        }
    };

    fs::write(readme_path, new_content)
        .await
        .with_context(|| format!("failed to write {}", readme_path.display()))?;

    Ok(())
}

/// Persist the rendered fragment standalone, for inspection.
pub async fn save_markdown(markdown: &str, output_path: &Path) -> bool {
    match fs::write(output_path, markdown).await {
        Ok(_) => {
            tracing::info!("markdown saved to {}", output_path.display());
            true
        }
        Err(e) => {
            tracing::error!("failed to save markdown to {}: {}", output_path.display(), e);
            false
        }
    }
}
