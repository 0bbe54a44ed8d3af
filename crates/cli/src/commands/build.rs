use anyhow::{Context, Result};
use metamap_core::FsStorage;
use metamap_generator::{FsModuleLoader, generate_html_pages};

use super::{ProjectArgs, load_entry_chunks};

/// Generate every page into the output directory
pub fn run(project: ProjectArgs) -> Result<()> {
    let config = project.resolve()?;
    let mut options = config.generate_options()?;
    options.out_dir = std::path::absolute(&options.out_dir)
        .with_context(|| format!("Invalid output directory {}", options.out_dir.display()))?;
    let bundle = config.bundle_path()?;

    println!("🔨 Generating pages...");
    println!("   Template: {}", options.page_template.display());
    println!("   Pages:    {}", options.page_meta_map.display());
    println!("   Output:   {}", options.out_dir.display());
    println!();

    let chunks = load_entry_chunks(bundle)?;
    println!("✓ Found {} entry chunk(s) in {}", chunks.len(), bundle.display());

    let report = generate_html_pages(&options, &chunks, &FsModuleLoader, &FsStorage)
        .context("Page generation failed")?;

    for page in &report.pages {
        println!("   ✓ {}", page.display());
    }
    if let Some(err) = &report.cleanup_error {
        eprintln!("   ⚠ Warning: {}", err);
    }

    println!();
    println!("✅ Generated {} page(s)", report.pages.len());
    Ok(())
}
