use anyhow::Result;
use metamap_core::FsStorage;
use metamap_generator::{FsModuleLoader, check_pages};

use super::{ProjectArgs, load_entry_chunks};

pub fn run(project: ProjectArgs) -> Result<()> {
    let config = project.resolve()?;
    let options = config.generate_options()?;
    let chunks = load_entry_chunks(config.bundle_path()?)?;

    println!("Validating pages from: {}", options.page_meta_map.display());

    let report = check_pages(&options, &chunks, &FsModuleLoader, &FsStorage);

    for info in &report.info {
        println!("  {}", info);
    }
    for warning in &report.warnings {
        println!("  ⚠ {}", warning);
    }
    for error in &report.errors {
        println!("  ✗ {}", error);
    }

    if !report.is_ok() {
        anyhow::bail!("{} page problem(s) found", report.errors.len());
    }

    println!("✓ All pages valid");
    Ok(())
}
